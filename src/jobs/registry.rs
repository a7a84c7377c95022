//! In-memory job registry guarded by a single lock.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

use super::error::{RegistryError, Result};
use super::policy::{MissingJobPolicy, RegistryPolicy};
use super::types::{ComputeJob, JobStatus, JobType, Location, Urgency};

/// Returns the fixed initial workload: one critical inference job and two
/// low-urgency training jobs, all running in London.
pub fn seed_jobs() -> Vec<ComputeJob> {
    vec![
        ComputeJob::new("job-critical-1", JobType::Inference, 50, Urgency::High),
        ComputeJob::new("job-training-alpha", JobType::Training, 500, Urgency::Low),
        ComputeJob::new("job-analytics-daily", JobType::Training, 120, Urgency::Low),
    ]
}

/// In-memory registry of compute jobs.
///
/// Jobs enter only through seeding and are never removed. All operations
/// take the same lock, so a listing never observes a half-applied update.
///
/// # Examples
///
/// ```
/// use eco_compute::jobs::{JobRegistry, JobStatus, Location};
///
/// let registry = JobRegistry::default();
/// registry.migrate("job-training-alpha", Location::Iceland).unwrap();
///
/// let job = registry.get("job-training-alpha").unwrap();
/// assert_eq!(job.location, Location::Iceland);
/// assert_eq!(job.status, JobStatus::Migrated);
/// ```
#[derive(Debug)]
pub struct JobRegistry {
    jobs: Mutex<Vec<ComputeJob>>,
    policy: RegistryPolicy,
}

impl Default for JobRegistry {
    fn default() -> Self {
        Self::initialize(RegistryPolicy::default())
    }
}

impl JobRegistry {
    /// Creates a registry holding the seed jobs.
    pub fn initialize(policy: RegistryPolicy) -> Self {
        Self {
            jobs: Mutex::new(seed_jobs()),
            policy,
        }
    }

    /// Policy this registry validates mutations with.
    pub fn policy(&self) -> RegistryPolicy {
        self.policy
    }

    /// Restores the seed jobs, discarding every mutation.
    pub fn reset(&self) {
        *self.lock() = seed_jobs();
        debug!("job registry reset to seed state");
    }

    /// Snapshot of all jobs in insertion order.
    pub fn list_jobs(&self) -> Vec<ComputeJob> {
        self.lock().clone()
    }

    /// Looks up a single job by id.
    pub fn get(&self, id: &str) -> Option<ComputeJob> {
        self.lock().iter().find(|j| j.id == id).cloned()
    }

    /// Sets the status of job `id`.
    ///
    /// Returns the updated job, or `Ok(None)` when the id is unknown and
    /// the policy ignores missing jobs.
    ///
    /// # Errors
    ///
    /// - `JobNotFound` when the id is unknown and the policy rejects it
    /// - `IllegalTransition` when strict transitions forbid the change
    /// - `UrgentJobPause` when pausing a protected high-urgency job
    pub fn update_status(&self, id: &str, status: JobStatus) -> Result<Option<ComputeJob>> {
        let mut jobs = self.lock();
        let Some(job) = jobs.iter_mut().find(|j| j.id == id) else {
            return self.missing(id);
        };

        if self.policy.protect_urgent && status == JobStatus::Paused && job.urgency == Urgency::High
        {
            warn!(job = id, "refused to pause high-urgency job");
            return Err(RegistryError::UrgentJobPause { id: id.to_string() });
        }
        if !self.policy.transitions.allows(job.status, status) {
            warn!(job = id, from = %job.status, to = %status, "illegal status transition");
            return Err(RegistryError::IllegalTransition {
                id: id.to_string(),
                from: job.status,
                to: status,
            });
        }

        debug!(job = id, from = %job.status, to = %status, "status updated");
        job.status = status;
        Ok(Some(job.clone()))
    }

    /// Moves job `id` to `location` and marks it `Migrated`.
    ///
    /// Migration overrides any prior status, including Paused and Completed.
    ///
    /// # Errors
    ///
    /// `JobNotFound` when the id is unknown and the policy rejects it.
    pub fn migrate(&self, id: &str, location: Location) -> Result<Option<ComputeJob>> {
        let mut jobs = self.lock();
        let Some(job) = jobs.iter_mut().find(|j| j.id == id) else {
            return self.missing(id);
        };

        debug!(job = id, from = %job.location, to = %location, "job migrated");
        job.location = location;
        job.status = JobStatus::Migrated;
        Ok(Some(job.clone()))
    }

    /// Total power draw (kW) of jobs at `location` with `status`.
    pub fn total_power_kw(&self, location: Location, status: JobStatus) -> u32 {
        self.lock()
            .iter()
            .filter(|j| j.location == location && j.status == status)
            .map(|j| j.power_consumption_kw)
            .sum()
    }

    fn missing(&self, id: &str) -> Result<Option<ComputeJob>> {
        match self.policy.missing_job {
            MissingJobPolicy::Ignore => {
                debug!(job = id, "mutation ignored: unknown job");
                Ok(None)
            }
            MissingJobPolicy::Reject => {
                warn!(job = id, "mutation rejected: unknown job");
                Err(RegistryError::JobNotFound(id.to_string()))
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ComputeJob>> {
        // Every write is a single field assignment, so a poisoned lock
        // still guards a consistent collection.
        self.jobs.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::policy::TransitionPolicy;

    const ALPHA: &str = "job-training-alpha";

    #[test]
    fn initialize_seeds_three_jobs_in_order() {
        let registry = JobRegistry::default();
        let jobs = registry.list_jobs();
        let ids: Vec<&str> = jobs.iter().map(|j| j.id.as_str()).collect();
        assert_eq!(
            ids,
            ["job-critical-1", "job-training-alpha", "job-analytics-daily"]
        );

        assert_eq!(jobs[0].job_type, JobType::Inference);
        assert_eq!(jobs[0].power_consumption_kw, 50);
        assert_eq!(jobs[0].urgency, Urgency::High);
        assert_eq!(jobs[1].power_consumption_kw, 500);
        assert_eq!(jobs[2].power_consumption_kw, 120);
        for job in &jobs {
            assert_eq!(job.status, JobStatus::Running);
            assert_eq!(job.location, Location::London);
        }
    }

    #[test]
    fn update_status_changes_only_status() {
        let registry = JobRegistry::default();
        let before = registry.get(ALPHA).unwrap();

        let updated = registry.update_status(ALPHA, JobStatus::Paused).unwrap();
        let after = registry.get(ALPHA).unwrap();

        assert_eq!(updated.as_ref(), Some(&after));
        assert_eq!(after.status, JobStatus::Paused);
        assert_eq!(
            ComputeJob {
                status: JobStatus::Running,
                ..after
            },
            before
        );
    }

    #[test]
    fn migrate_overrides_paused_status() {
        let registry = JobRegistry::default();
        registry.update_status(ALPHA, JobStatus::Paused).unwrap();
        registry.migrate(ALPHA, Location::Iceland).unwrap();

        let job = registry.get(ALPHA).unwrap();
        assert_eq!(job.location, Location::Iceland);
        assert_eq!(job.status, JobStatus::Migrated);
    }

    #[test]
    fn migrate_overrides_completed_status() {
        let registry = JobRegistry::default();
        registry.update_status(ALPHA, JobStatus::Completed).unwrap();
        let job = registry.migrate(ALPHA, Location::Iceland).unwrap().unwrap();
        assert_eq!(job.status, JobStatus::Migrated);
    }

    #[test]
    fn missing_job_is_ignored_by_default() {
        let registry = JobRegistry::default();
        let before = registry.list_jobs();

        assert_eq!(
            registry.update_status("job-does-not-exist", JobStatus::Completed),
            Ok(None)
        );
        assert_eq!(
            registry.migrate("job-does-not-exist", Location::Iceland),
            Ok(None)
        );
        assert_eq!(registry.list_jobs(), before);
    }

    #[test]
    fn missing_job_rejected_when_configured() {
        let registry = JobRegistry::initialize(RegistryPolicy {
            missing_job: MissingJobPolicy::Reject,
            ..RegistryPolicy::default()
        });
        assert_eq!(
            registry.update_status("nope", JobStatus::Paused),
            Err(RegistryError::JobNotFound("nope".to_string()))
        );
        assert!(registry.migrate("nope", Location::Iceland).is_err());
    }

    #[test]
    fn permissive_allows_reviving_completed_job() {
        let registry = JobRegistry::default();
        registry.update_status(ALPHA, JobStatus::Completed).unwrap();
        let job = registry.update_status(ALPHA, JobStatus::Running).unwrap();
        assert_eq!(job.map(|j| j.status), Some(JobStatus::Running));
    }

    #[test]
    fn strict_transitions_reject_reviving_completed_job() {
        let registry = JobRegistry::initialize(RegistryPolicy {
            transitions: TransitionPolicy::Strict,
            ..RegistryPolicy::default()
        });
        registry.update_status(ALPHA, JobStatus::Completed).unwrap();

        let err = registry.update_status(ALPHA, JobStatus::Running).unwrap_err();
        assert_eq!(
            err,
            RegistryError::IllegalTransition {
                id: ALPHA.to_string(),
                from: JobStatus::Completed,
                to: JobStatus::Running,
            }
        );
        assert_eq!(registry.get(ALPHA).unwrap().status, JobStatus::Completed);
    }

    #[test]
    fn urgent_jobs_protected_when_configured() {
        let registry = JobRegistry::initialize(RegistryPolicy {
            protect_urgent: true,
            ..RegistryPolicy::default()
        });
        assert!(matches!(
            registry.update_status("job-critical-1", JobStatus::Paused),
            Err(RegistryError::UrgentJobPause { .. })
        ));
        // completing or migrating is still fine
        assert!(
            registry
                .update_status("job-critical-1", JobStatus::Completed)
                .is_ok()
        );
    }

    #[test]
    fn urgent_jobs_pausable_by_default() {
        let registry = JobRegistry::default();
        let job = registry
            .update_status("job-critical-1", JobStatus::Paused)
            .unwrap();
        assert_eq!(job.map(|j| j.status), Some(JobStatus::Paused));
    }

    #[test]
    fn total_power_tracks_mutations() {
        let registry = JobRegistry::default();
        assert_eq!(
            registry.total_power_kw(Location::London, JobStatus::Running),
            670
        );
        registry.migrate(ALPHA, Location::Iceland).unwrap();
        assert_eq!(
            registry.total_power_kw(Location::London, JobStatus::Running),
            170
        );
        assert_eq!(
            registry.total_power_kw(Location::Iceland, JobStatus::Migrated),
            500
        );
    }

    #[test]
    fn reset_restores_seed() {
        let registry = JobRegistry::default();
        registry.migrate(ALPHA, Location::Iceland).unwrap();
        registry.reset();
        assert_eq!(registry.list_jobs(), seed_jobs());
    }
}
