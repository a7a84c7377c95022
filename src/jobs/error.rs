use thiserror::Error;

use super::types::JobStatus;

/// Registry result type.
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Errors surfaced by [`JobRegistry`](super::JobRegistry) mutations.
///
/// Which of these can occur depends on the registry's
/// [`RegistryPolicy`](super::RegistryPolicy).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// No job with this id (only under `MissingJobPolicy::Reject`).
    #[error("job {0} not found")]
    JobNotFound(String),

    /// Status change not allowed by the strict transition table.
    #[error("job {id}: illegal status transition {from} -> {to}")]
    IllegalTransition {
        id: String,
        from: JobStatus,
        to: JobStatus,
    },

    /// Attempt to pause a high-urgency job while urgent jobs are protected.
    #[error("job {id} has high urgency and cannot be paused")]
    UrgentJobPause { id: String },
}
