//! Core trait for key/value persistence.
//!
//! The `DataStore` trait is the only thing the membership engine knows about
//! durable storage. Values are JSON scalars so any backend that can hold a
//! string, a double or a long can implement it.
//!
//! # Design Principles
//!
//! - **String keys**: one slot per piece of state
//! - **Minimal interface**: `get`, `set`, `remove`; typed helpers are provided
//! - **Synchronous**: every write completes before the caller continues
//! - **Interior mutability**: methods take `&self` so a store can be shared
//!   behind `Arc<dyn DataStore>`

use serde_json::Value;
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O error while reading or writing the backing file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The store contents could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The value cannot be represented in the store (e.g. a non-finite double).
    #[error("Unsupported value for key '{key}': {reason}")]
    UnsupportedValue { key: String, reason: String },
}

/// Durable key/value storage with typed slots.
///
/// Reading a slot with the wrong type yields `None`, the same as an
/// absent slot.
pub trait DataStore: Send + Sync {
    /// Read the raw value stored under `key`.
    fn get(&self, key: &str) -> Option<Value>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: Value) -> Result<(), StoreError>;

    /// Remove `key`. Returns whether it existed.
    fn remove(&self, key: &str) -> Result<bool, StoreError>;

    /// Check whether `key` holds a value.
    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    fn get_string(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    fn set_string(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.set(key, Value::String(value.to_string()))
    }

    fn get_double(&self, key: &str) -> Option<f64> {
        self.get(key)?.as_f64()
    }

    fn set_double(&self, key: &str, value: f64) -> Result<(), StoreError> {
        let number =
            serde_json::Number::from_f64(value).ok_or_else(|| StoreError::UnsupportedValue {
                key: key.to_string(),
                reason: format!("{} is not a finite number", value),
            })?;
        self.set(key, Value::Number(number))
    }

    fn get_long(&self, key: &str) -> Option<i64> {
        self.get(key)?.as_i64()
    }

    fn set_long(&self, key: &str, value: i64) -> Result<(), StoreError> {
        self.set(key, Value::from(value))
    }
}
