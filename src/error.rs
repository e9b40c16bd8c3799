//! Error types for colorexp

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for colorexp operations
pub type Result<T> = std::result::Result<T, ColorexpError>;

/// colorexp error types
#[derive(Error, Debug)]
pub enum ColorexpError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Error writing output: {0}")]
    Output(#[source] std::io::Error),

    #[error("Invalid regular expression '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid configuration file {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("Conflicting options: {0}")]
    ConflictingOptions(String),

    #[error("The {0} palette has no colors")]
    EmptyPalette(&'static str),

    #[error("Line exceeds the maximum length of {limit} bytes")]
    LineTooLong { limit: usize },
}

impl ColorexpError {
    /// Process exit code for this error
    ///
    /// Configuration problems exit with 1, input stream problems with 2
    /// and output problems with 3.
    pub fn exit_code(&self) -> i32 {
        match self {
            ColorexpError::Io(_) | ColorexpError::LineTooLong { .. } => 2,
            ColorexpError::Output(_) => 3,
            ColorexpError::InvalidPattern { .. }
            | ColorexpError::Config { .. }
            | ColorexpError::ConflictingOptions(_)
            | ColorexpError::EmptyPalette(_) => 1,
        }
    }
}
