//! Service layer for persistent marker storage.
//! - `storage` defines the string key-value port and its backends.
//! - `markers` implements the marker list on top of one slot of that port.

pub mod errors;
pub mod storage;
pub mod markers;

pub use errors::StoreError;
pub use markers::{MarkerRepository, MarkerStore, SharedMarkerStore};
pub use storage::{InMemoryKvStore, JsonPrefsStore, KeyValueStore};
