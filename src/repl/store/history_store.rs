//! History document store: load-modify-save of the newest-first entry list

use std::path::PathBuf;

use super::{DocumentStore, JsonFileStore, StoreError};
use crate::config::HISTORY_LIMIT;
use crate::repl::models::{HistoryDocument, HistoryEntry};

pub struct HistoryStore {
    file: JsonFileStore<HistoryDocument>,
    limit: usize,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_limit(path, HISTORY_LIMIT)
    }

    pub fn with_limit(path: impl Into<PathBuf>, limit: usize) -> Self {
        Self {
            file: JsonFileStore::new(path),
            limit,
        }
    }

    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.file.load().entries
    }

    /// Record an entry and return the entries as persisted
    pub fn add_entry(&self, entry: HistoryEntry) -> Result<Vec<HistoryEntry>, StoreError> {
        let mut document = self.file.load();
        document.record(entry, self.limit);
        self.file.save(&document)?;
        tracing::debug!("History now holds {} entries", document.entries.len());
        Ok(document.entries)
    }
}
