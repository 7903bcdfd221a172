//! Key/value persistence for membership state.
//!
//! The membership engine reads its slots at startup and rewrites them after
//! every mutation through the [`DataStore`] trait. Two providers ship with
//! the crate:
//!
//! - [`MemoryStore`]: volatile, for tests and hosts without durable storage
//! - [`JsonFileStore`]: one JSON file, rewritten atomically on each write
//!
//! ```ignore
//! use std::sync::Arc;
//! use poitrack::store::{DataStore, JsonFileStore};
//!
//! let store: Arc<dyn DataStore> = Arc::new(JsonFileStore::open("state.json")?);
//! store.set_string("authstatus", "always")?;
//! ```

mod file;
mod memory;
mod traits;

pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use traits::{DataStore, StoreError};
