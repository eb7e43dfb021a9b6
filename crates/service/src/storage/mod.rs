//! Storage abstractions for the service layer
//!
//! A private, named string-to-string store. Serialization of the values is the
//! caller's business; backends only move text.

use std::sync::Arc;

pub mod json_prefs_store;
pub mod memory;

pub use json_prefs_store::JsonPrefsStore;
pub use memory::InMemoryKvStore;

/// String key-value port backing the marker slot.
///
/// `set` has apply semantics: a later `get` in the same process observes the
/// value immediately, durability is the backend's concern.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String);
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: String) {
        (**self).set(key, value)
    }
}
