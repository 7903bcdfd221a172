//! JSON file store.
//!
//! Keeps all slots in one JSON object on disk. The whole file is rewritten
//! on every mutation through a temporary file and a rename, so a crash
//! mid-write leaves the previous contents intact.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde_json::{Map, Value};

use super::traits::{DataStore, StoreError};

/// Durable [`DataStore`] backed by a single JSON file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    slots: RwLock<Map<String, Value>>,
}

impl JsonFileStore {
    /// Open the store at `path`.
    ///
    /// A missing file yields an empty store. A file that does not hold a
    /// JSON object is logged and treated as empty; it is overwritten on the
    /// next write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let slots = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<Value>(&contents) {
                Ok(Value::Object(map)) => map,
                Ok(_) | Err(_) => {
                    tracing::warn!(
                        path = %path.display(),
                        "Store file is not a JSON object, starting empty"
                    );
                    Map::new()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => Map::new(),
            Err(e) => return Err(StoreError::Io(e)),
        };

        tracing::debug!(path = %path.display(), slots = slots.len(), "Opened store");

        Ok(Self {
            path,
            slots: RwLock::new(slots),
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, slots: &Map<String, Value>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let contents = serde_json::to_string_pretty(slots)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl DataStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.slots.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let mut slots = self.slots.write();
        slots.insert(key.to_string(), value);
        self.flush(&slots)
    }

    fn remove(&self, key: &str) -> Result<bool, StoreError> {
        let mut slots = self.slots.write();
        let existed = slots.remove(key).is_some();
        if existed {
            self.flush(&slots)?;
        }
        Ok(existed)
    }
}
