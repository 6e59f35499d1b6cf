//! HTTP server for skilltreed.

use crate::routes;
use anyhow::Result;
use axum::Router;
use skilltree_common::LedgerStore;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Application state shared across handlers.
pub struct AppState {
    pub store: LedgerStore,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(store: LedgerStore) -> Self {
        Self {
            store,
            start_time: Instant::now(),
        }
    }
}

/// Assemble the router. Split out from [`run`] so tests can drive it
/// in-process.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(routes::account_routes())
        .merge(routes::course_routes())
        .merge(routes::health_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // The browser frontend calls this API cross-origin.
        .layer(CorsLayer::permissive())
}

/// Run the HTTP server until the process is stopped.
pub async fn run(state: AppState, addr: &str) -> Result<()> {
    let app = app(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
