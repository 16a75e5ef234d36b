//! File-backed store: one JSON object on disk, write-through.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tracing::{debug, warn};

use crate::{BlobStore, Result, StoreError};

/// A [`BlobStore`] persisted as a single JSON object file.
///
/// The whole map is loaded once at open and rewritten on every mutation.
/// A missing or corrupt file opens as an empty store; the gate's state is
/// small enough that rewriting the file per attempt is the simple and
/// correct choice.
pub struct FileStore {
    path: PathBuf,
    values: RwLock<HashMap<String, String>>,
}

impl FileStore {
    /// Open the store at `path`, creating parent directories as needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        }

        let values = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(map) => map,
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "Corrupt store file, starting empty");
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };

        debug!(path = %path.display(), keys = values.len(), "Opened file store");
        Ok(Self {
            path,
            values: RwLock::new(values),
        })
    }

    fn flush(&self, values: &HashMap<String, String>) -> Result<()> {
        let raw = serde_json::to_string(values)?;
        fs::write(&self.path, raw).map_err(|e| StoreError::WriteFailed(e.to_string()))
    }
}

impl BlobStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self
            .values
            .write()
            .map_err(|_| StoreError::WriteFailed("store lock poisoned".to_string()))?;
        values.insert(key.to_string(), value.to_string());
        self.flush(&values)
    }

    fn remove(&self, key: &str) {
        if let Ok(mut values) = self.values.write() {
            if values.remove(key).is_some() {
                if let Err(err) = self.flush(&values) {
                    warn!(key = %key, error = %err, "Failed to persist key removal");
                }
            }
        }
    }

    fn clear(&self) {
        if let Ok(mut values) = self.values.write() {
            values.clear();
            if let Err(err) = self.flush(&values) {
                warn!(error = %err, "Failed to persist store clear");
            }
        }
    }
}
