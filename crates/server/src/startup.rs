use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::{AppConfig, StorageConfig};
use service::{JsonPrefsStore, MarkerRepository, MarkerStore, SharedMarkerStore};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::observability::init_metrics;
use crate::routes;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub markers: Arc<dyn MarkerRepository>,
}

impl AppState {
    pub fn new(markers: Arc<dyn MarkerRepository>) -> Self {
        Self { markers }
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Open the preferences file named by `storage` and wrap it in a shared marker store.
pub async fn build_state(storage: &StorageConfig) -> Result<AppState, StartupError> {
    storage
        .validate()
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    common::env::ensure_data_dir(&storage.data_dir).await?;

    let prefs = JsonPrefsStore::open(storage.preferences_path())?;
    info!(path = %prefs.path().display(), key = %storage.marker_key, "marker storage opened");
    let store = MarkerStore::with_key(prefs, storage.marker_key.clone());
    Ok(AppState::new(Arc::new(SharedMarkerStore::new(store))))
}

pub fn build_app(state: AppState) -> Router {
    init_metrics();
    routes::build_router(state, build_cors())
}

/// Public entry: build the app and run the HTTP server
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let state = build_state(&cfg.storage).await?;
    let app = build_app(state);

    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
    info!(%addr, "starting marker server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
