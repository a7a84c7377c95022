//! Compute job registry.

pub mod error;
pub mod policy;
pub mod registry;
pub mod types;

pub use error::RegistryError;
pub use policy::{MissingJobPolicy, RegistryPolicy, TransitionPolicy};
pub use registry::{JobRegistry, seed_jobs};
pub use types::{ComputeJob, JobStatus, JobType, Location, Urgency};
