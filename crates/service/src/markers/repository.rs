use async_trait::async_trait;
use models::MarkerRecord;

use crate::errors::StoreError;

/// Trait abstraction over marker persistence for async callers.
#[async_trait]
pub trait MarkerRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<MarkerRecord>, StoreError>;
    async fn add(&self, record: MarkerRecord) -> Result<(), StoreError>;
    async fn remove(&self, record: &MarkerRecord) -> Result<usize, StoreError>;
    async fn raw(&self) -> String;
}
