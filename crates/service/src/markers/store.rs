use models::MarkerRecord;
use tracing::debug;

use crate::errors::StoreError;
use crate::storage::KeyValueStore;

/// Well-known key of the marker slot.
pub const DEFAULT_MARKER_KEY: &str = "markerDataList";

const EMPTY_LIST: &str = "[]";

/// Ordered marker list stored as a JSON array under one key.
///
/// Nothing is cached: every call reads the slot, and every mutation rewrites
/// it with one `set`. Not safe for concurrent read-modify-write; share it
/// through [`SharedMarkerStore`](super::SharedMarkerStore) instead.
pub struct MarkerStore<S> {
    kv: S,
    key: String,
}

impl<S: KeyValueStore> MarkerStore<S> {
    pub fn new(kv: S) -> Self {
        Self::with_key(kv, DEFAULT_MARKER_KEY)
    }

    pub fn with_key(kv: S, key: impl Into<String>) -> Self {
        Self { kv, key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    #[cfg(test)]
    pub(crate) fn backend(&self) -> &S {
        &self.kv
    }

    /// Slot text verbatim; `[]` when the key is absent.
    pub fn raw(&self) -> String {
        self.kv.get(&self.key).unwrap_or_else(|| EMPTY_LIST.to_string())
    }

    /// All markers in insertion order.
    pub fn list(&self) -> Result<Vec<MarkerRecord>, StoreError> {
        let raw = self.raw();
        serde_json::from_str(&raw).map_err(StoreError::Deserialization)
    }

    /// Append `record`. Duplicates are kept.
    pub fn add(&self, record: MarkerRecord) -> Result<(), StoreError> {
        let mut markers = self.list()?;
        markers.push(record);
        self.write(&markers)
    }

    /// Drop every marker structurally equal to `record`; returns how many went.
    pub fn remove(&self, record: &MarkerRecord) -> Result<usize, StoreError> {
        let mut markers = self.list()?;
        let before = markers.len();
        markers.retain(|m| !m.matches(record));
        let removed = before - markers.len();
        self.write(&markers)?;
        Ok(removed)
    }

    fn write(&self, markers: &[MarkerRecord]) -> Result<(), StoreError> {
        let json = serde_json::to_string(markers).map_err(StoreError::Serialization)?;
        self.kv.set(&self.key, json);
        debug!(key = %self.key, count = markers.len(), "marker slot written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use models::LatLng;

    use super::*;
    use crate::storage::InMemoryKvStore;

    fn marker(title: &str, lat: f64, lng: f64) -> MarkerRecord {
        MarkerRecord::new(title, LatLng { latitude: lat, longitude: lng })
    }

    fn store() -> MarkerStore<Arc<InMemoryKvStore>> {
        MarkerStore::new(Arc::new(InMemoryKvStore::new()))
    }

    /// Counts port traffic to check one read + one write per mutation.
    #[derive(Default)]
    struct CountingKv {
        inner: InMemoryKvStore,
        gets: AtomicUsize,
        sets: AtomicUsize,
    }

    impl KeyValueStore for CountingKv {
        fn get(&self, key: &str) -> Option<String> {
            self.gets.fetch_add(1, Ordering::SeqCst);
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: String) {
            self.sets.fetch_add(1, Ordering::SeqCst);
            self.inner.set(key, value)
        }
    }

    #[test]
    fn empty_store_lists_nothing() {
        let s = store();
        assert!(s.list().unwrap().is_empty());
        assert_eq!(s.raw(), "[]");
    }

    #[test]
    fn add_add_remove_scenario() {
        let s = store();
        s.add(marker("A", 1.0, 2.0)).unwrap();
        assert_eq!(s.list().unwrap(), vec![marker("A", 1.0, 2.0)]);
        s.add(marker("B", 3.0, 4.0)).unwrap();
        assert_eq!(s.list().unwrap(), vec![marker("A", 1.0, 2.0), marker("B", 3.0, 4.0)]);
        assert_eq!(s.remove(&marker("A", 1.0, 2.0)).unwrap(), 1);
        assert_eq!(s.list().unwrap(), vec![marker("B", 3.0, 4.0)]);
    }

    #[test]
    fn adds_preserve_call_order() {
        let s = store();
        let expected: Vec<_> = (0..10).map(|i| marker(&format!("m{i}"), i as f64, -(i as f64))).collect();
        for m in &expected {
            s.add(m.clone()).unwrap();
        }
        assert_eq!(s.list().unwrap(), expected);
    }

    #[test]
    fn add_then_remove_restores_previous_list() {
        let s = store();
        s.add(marker("keep", 10.0, 20.0)).unwrap();
        let before = s.list().unwrap();
        let r = marker("temp", 5.5, -7.25);
        s.add(r.clone()).unwrap();
        s.remove(&r).unwrap();
        assert_eq!(s.list().unwrap(), before);
    }

    #[test]
    fn removing_absent_marker_is_a_noop() {
        let s = store();
        s.add(marker("A", 1.0, 2.0)).unwrap();
        let raw_before = s.raw();
        assert_eq!(s.remove(&marker("A", 1.0, 2.5)).unwrap(), 0);
        assert_eq!(s.remove(&marker("Z", 1.0, 2.0)).unwrap(), 0);
        assert_eq!(s.raw(), raw_before);
    }

    #[test]
    fn remove_drops_all_duplicates() {
        let s = store();
        s.add(marker("dup", 1.0, 1.0)).unwrap();
        s.add(marker("other", 2.0, 2.0)).unwrap();
        s.add(marker("dup", 1.0, 1.0)).unwrap();
        assert_eq!(s.list().unwrap().len(), 3);
        assert_eq!(s.remove(&marker("dup", 1.0, 1.0)).unwrap(), 2);
        assert_eq!(s.list().unwrap(), vec![marker("other", 2.0, 2.0)]);
    }

    #[test]
    fn persisted_layout_and_round_trip() {
        let s = store();
        s.add(marker("Home", -33.86, 151.2)).unwrap();
        assert_eq!(s.raw(), r#"[{"title":"Home","latLng":{"latitude":-33.86,"longitude":151.2}}]"#);

        s.add(marker("Work", 0.1, -0.2)).unwrap();
        let listed = s.list().unwrap();
        let json = serde_json::to_string(&listed).unwrap();
        let back: Vec<MarkerRecord> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, listed);
    }

    #[test]
    fn malformed_slot_is_a_deserialization_error() {
        for bad in ["{not json", "{\"title\":\"x\"}", "null", "[{\"title\":1}]"] {
            let kv = InMemoryKvStore::with_entries([(DEFAULT_MARKER_KEY, bad)]);
            let s = MarkerStore::new(kv);
            assert!(matches!(s.list(), Err(StoreError::Deserialization(_))), "input {bad}");
            assert!(matches!(s.add(marker("A", 0.0, 0.0)), Err(StoreError::Deserialization(_))));
            // the bad value is left in place
            assert_eq!(s.raw(), bad);
        }
    }

    #[test]
    fn each_mutation_reads_and_writes_once() {
        let s = MarkerStore::new(CountingKv::default());
        s.add(marker("A", 1.0, 2.0)).unwrap();
        assert_eq!(s.backend().gets.load(Ordering::SeqCst), 1);
        assert_eq!(s.backend().sets.load(Ordering::SeqCst), 1);
        s.remove(&marker("A", 1.0, 2.0)).unwrap();
        assert_eq!(s.backend().gets.load(Ordering::SeqCst), 2);
        assert_eq!(s.backend().sets.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn custom_key_leaves_other_keys_alone() {
        let kv = Arc::new(InMemoryKvStore::with_entries([("unrelated", "keep")]));
        let s = MarkerStore::with_key(Arc::clone(&kv), "markers");
        s.add(marker("A", 1.0, 2.0)).unwrap();
        assert_eq!(s.key(), "markers");
        assert_eq!(kv.get("unrelated").as_deref(), Some("keep"));
        assert!(kv.get(DEFAULT_MARKER_KEY).is_none());
    }
}
