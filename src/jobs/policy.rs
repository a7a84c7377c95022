//! Policies governing how strictly the registry validates mutations.

use serde::Deserialize;

use super::types::JobStatus;

/// What a mutation does when the id is unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingJobPolicy {
    /// Leave the collection untouched and report nothing updated.
    #[default]
    Ignore,
    /// Report `RegistryError::JobNotFound`.
    Reject,
}

/// Which status changes `update_status` accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionPolicy {
    /// Any status may replace any other.
    #[default]
    Permissive,
    /// Only the transitions in [`TransitionPolicy::allows`] are accepted.
    Strict,
}

impl TransitionPolicy {
    /// Returns `true` when `from -> to` is allowed under this policy.
    ///
    /// Strict table: Running and Paused switch between each other, either
    /// may complete, anything may become Migrated, and rewriting the
    /// current status is always accepted. Completed and Migrated are
    /// otherwise final.
    pub fn allows(self, from: JobStatus, to: JobStatus) -> bool {
        use JobStatus::*;

        match self {
            Self::Permissive => true,
            Self::Strict => {
                from == to
                    || matches!(
                        (from, to),
                        (Running, Paused)
                            | (Paused, Running)
                            | (Running | Paused, Completed)
                            | (_, Migrated)
                    )
            }
        }
    }
}

/// Validation knobs for [`JobRegistry`](super::JobRegistry).
///
/// The default reproduces the permissive demo behaviour: unknown ids are
/// ignored, any transition is accepted, urgent jobs may be paused.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistryPolicy {
    pub missing_job: MissingJobPolicy,
    pub transitions: TransitionPolicy,
    /// Refuse to pause jobs with `Urgency::High`.
    pub protect_urgent: bool,
}

impl RegistryPolicy {
    /// Policy that rejects unknown ids, enforces the transition table, and
    /// protects urgent jobs.
    pub fn strict() -> Self {
        Self {
            missing_job: MissingJobPolicy::Reject,
            transitions: TransitionPolicy::Strict,
            protect_urgent: true,
        }
    }
}
