//! Contributor Board — Binary Entrypoint
//! Boots the Axum HTTP server and, when a token is configured, the
//! background refresh scheduler that keeps the contributor snapshot fresh.

use std::sync::Arc;

use shuttle_axum::ShuttleAxum;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use contributor_board::api::{self, AppState};
use contributor_board::config::BoardConfig;
use contributor_board::github::GithubClient;
use contributor_board::metrics::Metrics;
use contributor_board::refresh;
use contributor_board::snapshot::SnapshotStore;

/// Enable compact tracing logs in development only.
/// Activation requires BOTH:
///   - dev environment (debug build OR SHUTTLE_ENV in {local, development, dev})
///   - BOARD_DEV_LOG=1
fn enable_dev_tracing() {
    let dev_flag = std::env::var("BOARD_DEV_LOG").ok().is_some_and(|v| v == "1");

    let is_dev_env = cfg!(debug_assertions)
        || matches!(
            std::env::var("SHUTTLE_ENV")
                .unwrap_or_default()
                .to_ascii_lowercase()
                .as_str(),
            "local" | "development" | "dev"
        );

    if !(dev_flag && is_dev_env) {
        return;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("contributor_board=info,refresh=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments. Provides
    // GITHUB_TOKEN / BOARD_CONFIG_PATH before config load.
    let _ = dotenvy::dotenv();

    enable_dev_tracing();

    let cfg = BoardConfig::load().expect("Failed to load board config");

    // Fallback data is served until the first refresh succeeds.
    let store = Arc::new(SnapshotStore::with_fallback());
    let metrics = Metrics::init(cfg.refresh_interval_secs);

    match cfg.token.clone() {
        Some(token) => {
            let client = GithubClient::with_base(&cfg.api_base, token);
            refresh::spawn_scheduler(Arc::new(client), cfg, Arc::clone(&store));
        }
        None => {
            tracing::warn!(
                "GITHUB_TOKEN not set; refresh pipeline disabled, serving bundled fallback data"
            );
        }
    }

    let router = api::router(AppState { snapshot: store }).merge(metrics.router());

    Ok(router.into())
}
