//! Theme selection store

use std::path::PathBuf;

use super::{DocumentStore, JsonFileStore, StoreError};
use crate::repl::models::Theme;

pub struct ThemeStore {
    file: JsonFileStore<Theme>,
}

impl ThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file: JsonFileStore::new(path),
        }
    }

    pub fn load(&self) -> Theme {
        self.file.load()
    }

    pub fn save(&self, theme: &Theme) -> Result<(), StoreError> {
        tracing::info!("Persisting theme '{}'", theme.name);
        self.file.save(theme)
    }
}
