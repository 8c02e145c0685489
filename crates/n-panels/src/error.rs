use std::path::PathBuf;

use thiserror::Error;

/// Git output (`status --porcelain`, `log --name-status`) that does not parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatusError {
    #[error("line {line} of git output is malformed: {text:?}")]
    Malformed { line: usize, text: String },
}

/// Failure to load a panel configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid panel config")]
    Parse(#[from] toml::de::Error),
}
