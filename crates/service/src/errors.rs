use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The marker slot holds text that is not a JSON array of markers.
    #[error("stored marker data is malformed: {0}")]
    Deserialization(#[source] serde_json::Error),
    #[error("failed to serialize markers: {0}")]
    Serialization(#[source] serde_json::Error),
    #[error("storage error: {0}")]
    Storage(String),
}

impl StoreError {
    pub fn storage(context: &str, err: impl std::fmt::Display) -> Self {
        Self::Storage(format!("{context}: {err}"))
    }
}
