//! API request and response bodies.

use serde::{Deserialize, Serialize};

use crate::jobs::{ComputeJob, JobStatus, Location};

/// Body of `POST /jobs/{id}/status`.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusRequest {
    pub status: JobStatus,
}

/// Body of `POST /jobs/{id}/migrate`.
#[derive(Debug, Serialize, Deserialize)]
pub struct MigrateRequest {
    pub location: Location,
}

/// Result of a write endpoint.
///
/// `updated == false` with `job == null` means the id was unknown and the
/// registry is configured to ignore that.
#[derive(Debug, Serialize, Deserialize)]
pub struct MutationResponse {
    pub updated: bool,
    pub job: Option<ComputeJob>,
}

impl From<Option<ComputeJob>> for MutationResponse {
    fn from(job: Option<ComputeJob>) -> Self {
        Self {
            updated: job.is_some(),
            job,
        }
    }
}

/// Error response body for 4xx errors.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
