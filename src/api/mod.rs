//! REST API over the grid simulator and job registry.
//!
//! Read endpoints:
//! - `/grid-status/{hour}` — grid state for one hour
//! - `/grid-status` — full 24-hour profile
//! - `/jobs` — every compute job in insertion order
//!
//! Write endpoints:
//! - `POST /jobs/{id}/status` — set a job's status
//! - `POST /jobs/{id}/migrate` — move a job and mark it migrated

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

use crate::grid::GridSimulator;
use crate::jobs::JobRegistry;

pub use types::{ErrorResponse, MigrateRequest, MutationResponse, StatusRequest};

/// Application state shared across all request handlers.
///
/// The registry locks internally; the simulator needs its own lock
/// because drawing carbon noise advances its RNG.
pub struct AppState {
    /// Grid simulator with its random source.
    pub simulator: Mutex<GridSimulator>,
    /// In-memory job registry.
    pub registry: JobRegistry,
}

impl AppState {
    /// Wraps a simulator and registry for sharing across handlers.
    pub fn new(simulator: GridSimulator, registry: JobRegistry) -> Arc<Self> {
        Arc::new(Self {
            simulator: Mutex::new(simulator),
            registry,
        })
    }

    fn simulator(&self) -> MutexGuard<'_, GridSimulator> {
        self.simulator
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Builds the axum router with all API routes.
///
/// Any origin may call the API, so a browser dashboard served elsewhere
/// can poll it.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::banner))
        .route("/grid-status", get(handlers::get_grid_profile))
        .route("/grid-status/{hour}", get(handlers::get_grid_status))
        .route("/jobs", get(handlers::list_jobs))
        .route("/jobs/{id}/status", post(handlers::update_status))
        .route("/jobs/{id}/migrate", post(handlers::migrate))
        .layer(cors)
        .with_state(state)
}

/// Binds to the given address and serves the API.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server is running");
    axum::serve(listener, app).await
}
