//! Dashboard application state.

use crate::grid::{GridSimulator, GridState, HOURS_PER_DAY};
use crate::jobs::{ComputeJob, JobRegistry, JobStatus, Location};

/// Hour shown when the dashboard opens.
const START_HOUR: i32 = 12;

/// TUI application state.
pub struct App {
    simulator: GridSimulator,
    registry: JobRegistry,
    /// Hour selected on the slider (0–23).
    pub hour: i32,
    /// Grid state for `hour`, refreshed whenever the hour changes.
    pub grid: GridState,
    /// Snapshot of the registry, refreshed after every mutation.
    pub jobs: Vec<ComputeJob>,
    /// Index of the highlighted row in `jobs`.
    pub selected: usize,
    /// Outcome of the last action, shown in the footer.
    pub message: Option<String>,
    /// Whether the user has requested quit.
    pub quit: bool,
}

impl App {
    /// Creates the dashboard at noon.
    pub fn new(mut simulator: GridSimulator, registry: JobRegistry) -> Self {
        let grid = simulator.state_at(START_HOUR);
        let jobs = registry.list_jobs();
        Self {
            simulator,
            registry,
            hour: START_HOUR,
            grid,
            jobs,
            selected: 0,
            message: None,
            quit: false,
        }
    }

    /// Moves the slider one hour later, stopping at 23.
    pub fn next_hour(&mut self) {
        self.set_hour(self.hour + 1);
    }

    /// Moves the slider one hour earlier, stopping at 0.
    pub fn prev_hour(&mut self) {
        self.set_hour(self.hour - 1);
    }

    fn set_hour(&mut self, hour: i32) {
        let hour = hour.clamp(0, HOURS_PER_DAY - 1);
        if hour != self.hour {
            self.hour = hour;
            self.grid = self.simulator.state_at(hour);
            self.message = None;
        }
    }

    /// Highlights the next job row.
    pub fn select_next(&mut self) {
        if self.selected + 1 < self.jobs.len() {
            self.selected += 1;
            self.message = None;
        }
    }

    /// Highlights the previous job row.
    pub fn select_prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.message = None;
        }
    }

    /// The highlighted job, if any.
    pub fn selected_job(&self) -> Option<&ComputeJob> {
        self.jobs.get(self.selected)
    }

    /// Sets the status of the highlighted job.
    pub fn set_status(&mut self, status: JobStatus) {
        let Some(id) = self.selected_job().map(|j| j.id.clone()) else {
            return;
        };
        let outcome = self.registry.update_status(&id, status);
        self.finish(outcome.map(|job| job.map(|j| format!("{} -> {}", j.id, j.status))));
    }

    /// Migrates the highlighted job.
    pub fn migrate(&mut self, location: Location) {
        let Some(id) = self.selected_job().map(|j| j.id.clone()) else {
            return;
        };
        let outcome = self.registry.migrate(&id, location);
        self.finish(outcome.map(|job| job.map(|j| format!("{} migrated to {}", j.id, j.location))));
    }

    /// Restores the seed jobs.
    pub fn reset_jobs(&mut self) {
        self.registry.reset();
        self.jobs = self.registry.list_jobs();
        self.message = Some("jobs reset".to_string());
    }

    /// Power (kW) of jobs still running in London.
    pub fn london_running_kw(&self) -> u32 {
        self.registry
            .total_power_kw(Location::London, JobStatus::Running)
    }

    fn finish(&mut self, outcome: crate::jobs::error::Result<Option<String>>) {
        self.message = Some(match outcome {
            Ok(Some(done)) => done,
            Ok(None) => "job no longer exists".to_string(),
            Err(e) => e.to_string(),
        });
        self.jobs = self.registry.list_jobs();
    }
}
