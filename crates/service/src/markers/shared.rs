use std::sync::Arc;

use async_trait::async_trait;
use models::MarkerRecord;
use tokio::sync::Mutex;

use super::{MarkerRepository, MarkerStore};
use crate::errors::StoreError;
use crate::storage::KeyValueStore;

/// A [`MarkerStore`] shared across tasks. Each operation holds the lock for its
/// whole read-modify-write, so concurrent adds never lose updates.
pub struct SharedMarkerStore<S> {
    inner: Arc<Mutex<MarkerStore<S>>>,
}

impl<S> Clone for SharedMarkerStore<S> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<S: KeyValueStore> SharedMarkerStore<S> {
    pub fn new(store: MarkerStore<S>) -> Self {
        Self { inner: Arc::new(Mutex::new(store)) }
    }

    pub async fn list(&self) -> Result<Vec<MarkerRecord>, StoreError> {
        self.inner.lock().await.list()
    }

    pub async fn add(&self, record: MarkerRecord) -> Result<(), StoreError> {
        self.inner.lock().await.add(record)
    }

    pub async fn remove(&self, record: &MarkerRecord) -> Result<usize, StoreError> {
        self.inner.lock().await.remove(record)
    }

    pub async fn raw(&self) -> String {
        self.inner.lock().await.raw()
    }
}

#[async_trait]
impl<S: KeyValueStore + 'static> MarkerRepository for SharedMarkerStore<S> {
    async fn list(&self) -> Result<Vec<MarkerRecord>, StoreError> { SharedMarkerStore::list(self).await }
    async fn add(&self, record: MarkerRecord) -> Result<(), StoreError> { SharedMarkerStore::add(self, record).await }
    async fn remove(&self, record: &MarkerRecord) -> Result<usize, StoreError> { SharedMarkerStore::remove(self, record).await }
    async fn raw(&self) -> String { SharedMarkerStore::raw(self).await }
}
