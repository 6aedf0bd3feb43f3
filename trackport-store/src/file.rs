//! JSON-file-backed store for the command-line front end.

use crate::error::{StoreError, StoreResult};
use crate::memory::MemoryStore;
use crate::TrackStore;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A [`TrackStore`] persisted as a single JSON object file.
///
/// The file maps keys to string values, the same flat shape the game keeps
/// in its own storage. All operations work on an in-memory copy; [`save`]
/// writes the file back. A missing file loads as an empty store.
///
/// [`save`]: JsonFileStore::save
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl JsonFileStore {
    /// Loads the store at `path`, or starts empty when the file does not
    /// exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or does not contain a
    /// flat string-to-string JSON object.
    pub fn load(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            debug!("store file {} absent, starting empty", path.display());
            return Ok(Self {
                path,
                inner: MemoryStore::new(),
            });
        }

        let text = fs::read_to_string(&path)?;
        let value: Value = serde_json::from_str(&text)?;
        let Value::Object(map) = value else {
            return Err(StoreError::InvalidData(format!(
                "{} is not a JSON object",
                path.display()
            )));
        };

        let mut entries = Vec::with_capacity(map.len());
        for (key, value) in map {
            let Value::String(value) = value else {
                return Err(StoreError::InvalidData(format!(
                    "value for key {key:?} is not a string"
                )));
            };
            entries.push((key, value));
        }

        Ok(Self {
            path,
            inner: MemoryStore::from_entries(entries),
        })
    }

    /// Writes the store back to its file.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be written.
    pub fn save(&self) -> StoreResult<()> {
        let mut map = serde_json::Map::new();
        for (key, value) in self.inner.iter() {
            map.insert(key.to_string(), Value::String(value.to_string()));
        }
        let text = serde_json::to_string_pretty(&Value::Object(map))?;
        fs::write(&self.path, text)?;
        debug!(
            "saved {} entries to {}",
            self.inner.len(),
            self.path.display()
        );
        Ok(())
    }

    /// The backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// True when the store holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl TrackStore for JsonFileStore {
    fn has(&self, key: &str) -> bool {
        self.inner.has(key)
    }

    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) {
        self.inner.set(key, value);
    }

    fn remove(&mut self, key: &str) {
        self.inner.remove(key);
    }

    fn keys(&self) -> Vec<String> {
        self.inner.keys()
    }
}
