//! In-memory file reader.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::turn::ports::file_reader::{FileReadError, FileReader};

/// Serves file contents from a map and records every read.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFileReader {
    files: HashMap<String, String>,
    reads: Arc<Mutex<Vec<String>>>,
}

impl InMemoryFileReader {
    /// Creates a reader with no files.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<String>, contents: impl Into<String>) -> Self {
        self.files.insert(path.into(), contents.into());
        self
    }

    /// Returns the paths read so far, in order, including misses.
    #[must_use]
    pub fn reads(&self) -> Vec<String> {
        self.reads
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl FileReader for InMemoryFileReader {
    async fn read_file(&self, path: &str) -> Result<String, FileReadError> {
        self.reads
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(path.to_owned());
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| FileReadError::NotFound(path.to_owned()))
    }
}
