use n_render::{BufferHandle, WindowHandle};
use thiserror::Error;

/// Failures of the in-memory host. They mirror what a real editor reports for
/// the same misuse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum HostError {
    #[error("unknown buffer {0}")]
    UnknownBuffer(BufferHandle),

    #[error("unknown window {0}")]
    UnknownWindow(WindowHandle),

    #[error("buffer {0} is not modifiable")]
    NotEditable(BufferHandle),

    #[error("line {line} out of range for {buffer} ({count} lines)")]
    LineOutOfRange {
        buffer: BufferHandle,
        line: usize,
        count: usize,
    },

    #[error("line {index} passed to {buffer} contains a newline")]
    NewlineInLine { buffer: BufferHandle, index: usize },
}

pub type Result<T> = std::result::Result<T, HostError>;
