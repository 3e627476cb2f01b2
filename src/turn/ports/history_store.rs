//! Port for the caller-owned conversation history.
//!
//! The history is shared with other observers (a UI, for instance), so the
//! turn engine never assumes exclusive access. Reads return an immutable
//! snapshot and every write replaces exactly one index with a whole value.

use async_trait::async_trait;
use thiserror::Error;

use crate::turn::domain::{History, HistoryItem, SequenceIndexError};

/// Result type for history store operations.
pub type HistoryStoreResult<T> = Result<T, HistoryStoreError>;

/// Port for reading and writing the conversation history.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Returns the current history.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryStoreError::Unavailable`] when the store cannot be
    /// read.
    async fn snapshot(&self) -> HistoryStoreResult<History>;

    /// Writes `item` at `index`, appending when `index` equals the current
    /// length, and returns the history after the write.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryStoreError::IndexOutOfRange`] when `index` exceeds
    /// the current length, leaving the history untouched.
    async fn put_item(&self, index: usize, item: HistoryItem) -> HistoryStoreResult<History>;
}

/// Errors for history store operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HistoryStoreError {
    /// The target index lies beyond the end of the history.
    #[error("history index {index} is out of range for a history of length {len}")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The history length.
        len: usize,
    },

    /// General storage or adapter failure.
    #[error("history store unavailable: {0}")]
    Unavailable(String),
}

impl From<SequenceIndexError> for HistoryStoreError {
    fn from(error: SequenceIndexError) -> Self {
        match error {
            SequenceIndexError::OutOfRange { index, len } => Self::IndexOutOfRange { index, len },
        }
    }
}
