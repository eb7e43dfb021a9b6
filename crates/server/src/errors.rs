use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use models::errors::ModelError;
use service::StoreError;
use thiserror::Error;
use tracing::error;

use crate::observability::{STORE_ERRORS_TOTAL, VALIDATION_REJECTED_TOTAL};

/// JSON error body: `{"error": <kind>, "message": <detail>}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub error: &'static str,
    pub message: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: &'static str, message: Option<String>) -> Self {
        Self { status, error, message }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.error, "message": self.message });
        (self.status, Json(body)).into_response()
    }
}

impl From<ModelError> for JsonApiError {
    fn from(e: ModelError) -> Self {
        VALIDATION_REJECTED_TOTAL.inc();
        match e {
            ModelError::Validation(msg) => Self::new(StatusCode::BAD_REQUEST, "Validation Error", Some(msg)),
        }
    }
}

impl From<StoreError> for JsonApiError {
    fn from(e: StoreError) -> Self {
        STORE_ERRORS_TOTAL.inc();
        error!(error = %e, "marker store failure");
        let kind = match e {
            StoreError::Deserialization(_) => "Corrupt Marker Data",
            StoreError::Serialization(_) | StoreError::Storage(_) => "Internal Server Error",
        };
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, kind, Some(e.to_string()))
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("storage unavailable: {0}")]
    Storage(#[from] StoreError),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
