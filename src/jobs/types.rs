//! Compute job entity and its enumerated attributes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a string does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} \"{value}\"")]
pub struct ParseVariantError {
    /// Which attribute was being parsed (`"status"`, `"location"`, ...).
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

/// Generates `Display` and case-insensitive `FromStr` for a fieldless enum.
macro_rules! named_variants {
    ($ty:ident, $kind:literal, [$($variant:ident),+ $(,)?]) => {
        impl $ty {
            /// All variants in declaration order.
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            /// Variant name as serialized on the wire.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($ty::$variant => stringify!($variant)),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ParseVariantError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $ty::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
                    .ok_or_else(|| ParseVariantError {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

/// Kind of workload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobType {
    Training,
    Inference,
}

/// Lifecycle status of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobStatus {
    Running,
    Paused,
    Completed,
    Migrated,
}

/// How urgently a job must keep running. `High` jobs should not be paused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Urgency {
    High,
    Low,
}

/// Datacenter a job runs in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    #[default]
    London,
    Iceland,
}

named_variants!(JobType, "job type", [Training, Inference]);
named_variants!(JobStatus, "status", [Running, Paused, Completed, Migrated]);
named_variants!(Urgency, "urgency", [High, Low]);
named_variants!(Location, "location", [London, Iceland]);

/// A simulated compute workload.
///
/// Identity is `id`; only `status` and `location` change after creation,
/// and only through [`JobRegistry`](super::JobRegistry).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeJob {
    pub id: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
    pub power_consumption_kw: u32,
    pub status: JobStatus,
    pub urgency: Urgency,
    pub location: Location,
}

impl ComputeJob {
    /// Creates a running job in the default location.
    pub fn new(id: &str, job_type: JobType, power_consumption_kw: u32, urgency: Urgency) -> Self {
        Self {
            id: id.to_string(),
            job_type,
            power_consumption_kw,
            status: JobStatus::Running,
            urgency,
            location: Location::default(),
        }
    }
}
