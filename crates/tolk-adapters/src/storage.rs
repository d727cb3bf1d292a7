//! Storage adapters for persisting the current locale.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tolk_core::traits::Storage;
use tolk_core::{shellexpand, TolkError};
use tracing::warn;

/// In-process storage. Lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn name(&self) -> &str {
        "memory"
    }

    fn get_item(&self, key: &str) -> Result<Option<String>, TolkError> {
        let items = self
            .items
            .lock()
            .map_err(|e| TolkError::Storage(format!("memory storage poisoned: {e}")))?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), TolkError> {
        let mut items = self
            .items
            .lock()
            .map_err(|e| TolkError::Storage(format!("memory storage poisoned: {e}")))?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON object on disk, e.g. `{"locale": "no"}`.
///
/// A missing file reads as empty. A corrupt file also reads as empty (with a
/// warning) and is replaced on the next write.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    /// Storage at `path`; `~/` is expanded.
    pub fn new(path: &str) -> Self {
        Self {
            path: PathBuf::from(shellexpand(path)),
            lock: Mutex::new(()),
        }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<BTreeMap<String, String>, TolkError> {
        let content = match std::fs::read(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_slice(&content) {
            Ok(doc) => Ok(doc),
            Err(e) => {
                warn!("ignoring corrupt storage file {}: {e}", self.path.display());
                Ok(BTreeMap::new())
            }
        }
    }
}

impl Storage for FileStorage {
    fn name(&self) -> &str {
        "file"
    }

    fn get_item(&self, key: &str) -> Result<Option<String>, TolkError> {
        let _guard = self
            .lock
            .lock()
            .map_err(|e| TolkError::Storage(format!("file storage poisoned: {e}")))?;
        Ok(self.read_document()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), TolkError> {
        let _guard = self
            .lock
            .lock()
            .map_err(|e| TolkError::Storage(format!("file storage poisoned: {e}")))?;
        let mut doc = self.read_document()?;
        doc.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(&doc)?)?;
        Ok(())
    }
}
