//! # Persistence Store
//!
//! One JSON document per file under the config directory. Loading never fails:
//! a missing directory is created, a missing or corrupt file is replaced with the
//! default document. Saving overwrites the whole file and reports errors.
//!
//! The store assumes a single writer process; there is no locking.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod history_store;
pub mod theme_store;

pub use history_store::HistoryStore;
pub use theme_store::ThemeStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Load/save contract for a single document type
pub trait DocumentStore<D> {
    /// Never fails; falls back to the default document
    fn load(&self) -> D;

    fn save(&self, document: &D) -> Result<(), StoreError>;
}

/// JSON file backed document store
#[derive(Debug, Clone)]
pub struct JsonFileStore<D> {
    path: PathBuf,
    _document: PhantomData<fn() -> D>,
}

impl<D> JsonFileStore<D>
where
    D: Serialize + DeserializeOwned + Default,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _document: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_dir(&self) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                tracing::debug!("Creating config directory {:?}", dir);
                fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;
            }
        }
        Ok(())
    }

    fn write_default(&self) -> Result<D, StoreError> {
        let document = D::default();
        self.write(&document)?;
        Ok(document)
    }

    fn write(&self, document: &D) -> Result<(), StoreError> {
        self.ensure_dir()?;
        let json = serde_json::to_string_pretty(document)?;

        // Write beside the target then rename so readers never see half a file
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| StoreError::io(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| StoreError::io(&self.path, e))?;
        Ok(())
    }

    /// Load with self-healing. Only I/O failures surface as errors.
    pub fn try_load(&self) -> Result<D, StoreError> {
        self.ensure_dir()?;

        if !self.path.exists() {
            tracing::info!("{:?} not found, writing default document", self.path);
            return self.write_default();
        }

        let content = fs::read_to_string(&self.path).map_err(|e| StoreError::io(&self.path, e))?;
        match serde_json::from_str::<D>(&content) {
            Ok(document) => Ok(document),
            Err(e) => {
                tracing::warn!("{:?} is corrupt ({}), resetting to default", self.path, e);
                self.write_default()
            }
        }
    }
}

impl<D> DocumentStore<D> for JsonFileStore<D>
where
    D: Serialize + DeserializeOwned + Default,
{
    fn load(&self) -> D {
        self.try_load().unwrap_or_else(|e| {
            tracing::warn!("Failed to load {:?}: {}", self.path, e);
            D::default()
        })
    }

    fn save(&self, document: &D) -> Result<(), StoreError> {
        self.write(document)
    }
}
