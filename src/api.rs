// src/api.rs
use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use tower_http::cors::CorsLayer;

use crate::snapshot::{Snapshot, SnapshotStore};

#[derive(Clone)]
pub struct AppState {
    pub snapshot: Arc<SnapshotStore>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/contributors", get(contributors))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

/// The whole view is one read of the current snapshot. Handlers never
/// wait on a refresh; they serve whatever was last published.
async fn contributors(State(state): State<AppState>) -> Json<Snapshot> {
    Json(state.snapshot.current().as_ref().clone())
}
