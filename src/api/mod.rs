//! HTTP API for asset energy lookups.
//!
//! Provides two GET endpoints:
//! - `/asset/{asset_id}`: HTML view of the reduced demand
//! - `/api/asset/{asset_id}`: the same figures as JSON

mod handlers;
mod render;
mod types;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;

use crate::reducer::Reducer;
use crate::store::EnergyStore;

pub use types::{AssetResponse, ErrorResponse, INVALID_ASSET_MESSAGE};

/// Immutable application state shared across all request handlers.
///
/// Constructed once at startup after the data file is loaded and wrapped
/// in `Arc`; no locks needed since all data is read-only.
pub struct AppState {
    /// Indexed energy data.
    pub store: EnergyStore,
    /// Demand reduction rule.
    pub reducer: Reducer,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/asset/{asset_id}", get(handlers::get_asset_page))
        .route("/api/asset/{asset_id}", get(handlers::get_asset_json))
        .with_state(state)
}

/// Binds to the given address and serves the API until the process exits.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("API server listening on http://{addr}");
    axum::serve(listener, app).await
}
