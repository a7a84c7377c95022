//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use super::AppState;
use super::types::{ErrorResponse, MigrateRequest, MutationResponse, StatusRequest};
use crate::grid::GridState;
use crate::jobs::{ComputeJob, RegistryError};

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

/// `GET /` → liveness banner.
pub async fn banner() -> &'static str {
    "Eco-Compute Arbitrageur Backend is Running!"
}

/// Returns the grid state for one hour.
///
/// `GET /grid-status/{hour}` → 200 + `GridState` JSON
/// `GET /grid-status/abc` → 400 (path rejection)
pub async fn get_grid_status(
    State(state): State<Arc<AppState>>,
    Path(hour): Path<i32>,
) -> Json<GridState> {
    Json(state.simulator().state_at(hour))
}

/// `GET /grid-status` → 200 + 24 `GridState` records, hour 0 first.
pub async fn get_grid_profile(State(state): State<Arc<AppState>>) -> Json<Vec<GridState>> {
    Json(state.simulator().day_profile())
}

/// `GET /jobs` → 200 + `Vec<ComputeJob>` in insertion order.
pub async fn list_jobs(State(state): State<Arc<AppState>>) -> Json<Vec<ComputeJob>> {
    Json(state.registry.list_jobs())
}

/// Sets a job's status.
///
/// `POST /jobs/{id}/status` with `{"status": "Paused"}` → 200 + `MutationResponse`
pub async fn update_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<StatusRequest>,
) -> ApiResult<MutationResponse> {
    state
        .registry
        .update_status(&id, req.status)
        .map(|job| Json(job.into()))
        .map_err(reject)
}

/// Migrates a job.
///
/// `POST /jobs/{id}/migrate` with `{"location": "Iceland"}` → 200 + `MutationResponse`
pub async fn migrate(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<MigrateRequest>,
) -> ApiResult<MutationResponse> {
    state
        .registry
        .migrate(&id, req.location)
        .map(|job| Json(job.into()))
        .map_err(reject)
}

fn reject(err: RegistryError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match err {
        RegistryError::JobNotFound(_) => StatusCode::NOT_FOUND,
        RegistryError::IllegalTransition { .. } | RegistryError::UrgentJobPause { .. } => {
            StatusCode::CONFLICT
        }
    };
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}
