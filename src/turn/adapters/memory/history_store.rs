//! In-memory conversation history.

use async_trait::async_trait;
use std::sync::{Arc, PoisonError, RwLock};

use crate::turn::domain::{History, HistoryItem};
use crate::turn::ports::history_store::{HistoryStore, HistoryStoreError, HistoryStoreResult};

/// Thread-safe history shared between clones.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHistoryStore {
    history: Arc<RwLock<History>>,
}

impl InMemoryHistoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `history`.
    #[must_use]
    pub fn with_history(history: History) -> Self {
        Self {
            history: Arc::new(RwLock::new(history)),
        }
    }

    /// Returns the history as it is now.
    #[must_use]
    pub fn current(&self) -> History {
        self.history
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn snapshot(&self) -> HistoryStoreResult<History> {
        let history = self
            .history
            .read()
            .map_err(|err| HistoryStoreError::Unavailable(err.to_string()))?;
        Ok(history.clone())
    }

    async fn put_item(&self, index: usize, item: HistoryItem) -> HistoryStoreResult<History> {
        let mut history = self
            .history
            .write()
            .map_err(|err| HistoryStoreError::Unavailable(err.to_string()))?;
        let updated = history.replaced_at(index, item)?;
        *history = updated.clone();
        Ok(updated)
    }
}
