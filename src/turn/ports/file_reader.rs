//! Port for reading files referenced by prompt templates.

use async_trait::async_trait;
use thiserror::Error;

/// Reads the text of a file.
#[async_trait]
pub trait FileReader: Send + Sync {
    /// Returns the contents of `path`.
    ///
    /// # Errors
    ///
    /// Returns [`FileReadError::NotFound`] when the file does not exist and
    /// [`FileReadError::Io`] for any other failure.
    async fn read_file(&self, path: &str) -> Result<String, FileReadError>;
}

/// Errors raised while reading a file.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FileReadError {
    /// No file exists at the path.
    #[error("file not found: {0}")]
    NotFound(String),

    /// Reading failed for another reason.
    #[error("failed to read '{path}': {reason}")]
    Io {
        /// The requested path.
        path: String,
        /// Failure description.
        reason: String,
    },
}
