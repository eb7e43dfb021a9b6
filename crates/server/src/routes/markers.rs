use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use models::{MarkerInput, MarkerRecord};
use serde::Serialize;
use tracing::info;

use crate::errors::JsonApiError;
use crate::observability::{MARKERS_ADDED_TOTAL, MARKERS_REMOVED_TOTAL, MARKER_LISTS_TOTAL};
use crate::startup::AppState;

#[derive(Debug, Serialize)]
pub struct RemoveResponse {
    pub removed: usize,
}

/// List every stored marker in insertion order.
pub async fn list_markers(State(state): State<AppState>) -> Result<Json<Vec<MarkerRecord>>, JsonApiError> {
    MARKER_LISTS_TOTAL.inc();
    let markers = state.markers.list().await?;
    Ok(Json(markers))
}

/// Validate raw input and append the marker.
pub async fn add_marker(
    State(state): State<AppState>,
    Json(input): Json<MarkerInput>,
) -> Result<(StatusCode, Json<MarkerRecord>), JsonApiError> {
    let record = input.validate()?;
    state.markers.add(record.clone()).await?;
    MARKERS_ADDED_TOTAL.inc();
    info!(title = %record.title, lat = record.lat_lng.latitude, lng = record.lat_lng.longitude, "marker added");
    Ok((StatusCode::CREATED, Json(record)))
}

/// Delete every marker equal to the body; reports how many were dropped.
pub async fn remove_marker(
    State(state): State<AppState>,
    Json(record): Json<MarkerRecord>,
) -> Result<Json<RemoveResponse>, JsonApiError> {
    let removed = state.markers.remove(&record).await?;
    MARKERS_REMOVED_TOTAL.inc_by(removed as u64);
    info!(title = %record.title, removed, "marker delete");
    Ok(Json(RemoveResponse { removed }))
}

/// Read-only view of the slot text, as stored.
pub async fn raw_markers(State(state): State<AppState>) -> impl IntoResponse {
    let raw = state.markers.raw().await;
    ([(header::CONTENT_TYPE, "application/json")], raw)
}
