//! Error types for coursesched.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while building or writing a schedule.
#[derive(Error, Debug)]
pub enum SchedError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Could not write {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SchedError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        SchedError::InvalidConfiguration(msg.into())
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SchedError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for coursesched operations.
pub type SchedResult<T> = Result<T, SchedError>;
