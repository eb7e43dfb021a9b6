use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use super::KeyValueStore;

/// Process-local key-value store; nothing survives the process.
#[derive(Debug, Default)]
pub struct InMemoryKvStore {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with existing entries.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Self { entries: Mutex::new(map) }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for InMemoryKvStore {
    fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get() {
        let kv = InMemoryKvStore::new();
        assert!(kv.is_empty());
        assert_eq!(kv.get("k"), None);
        kv.set("k", "v1".into());
        kv.set("k", "v2".into());
        assert_eq!(kv.get("k").as_deref(), Some("v2"));
        assert_eq!(kv.len(), 1);
    }

    #[test]
    fn seeded_entries_are_visible() {
        let kv = InMemoryKvStore::with_entries([("a", "1"), ("b", "2")]);
        assert_eq!(kv.get("a").as_deref(), Some("1"));
        assert_eq!(kv.get("b").as_deref(), Some("2"));
    }
}
