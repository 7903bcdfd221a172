//! In-memory store.
//!
//! Holds every slot in a map guarded by a `parking_lot::RwLock`. Nothing
//! survives the process; used by tests and by hosts that do not need
//! durability.

use std::collections::HashMap;

use parking_lot::RwLock;
use serde_json::Value;

use super::traits::{DataStore, StoreError};

/// Volatile [`DataStore`] backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.read().is_empty()
    }
}

impl DataStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.slots.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        self.slots.write().insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.slots.write().remove(key).is_some())
    }
}
