//! # n-host — In-memory editor host for n-diffview
//!
//! Implements the [`n_render::Host`] boundary without a running editor:
//!
//! - **[`buffer`]** — `Buffer`, rope-backed text with loaded/editable flags
//!   and highlights grouped by namespace
//! - **[`memory`]** — `MemoryHost`, the buffer/window/namespace registry
//! - **[`error`]** — `HostError`, the misuse a real editor would reject
//!
//! Buffers created through the host start read-only, like a panel buffer in
//! the editor, so a render that forgets to lift the flag fails loudly.

pub mod buffer;
pub mod error;
pub mod memory;

pub use buffer::Buffer;
pub use error::HostError;
pub use memory::{MemoryHost, Window};
