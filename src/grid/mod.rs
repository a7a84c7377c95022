//! Synthetic electricity grid model.

/// Hour-to-metrics simulator.
pub mod simulator;
pub mod state;

pub use simulator::{CRISIS_HOUR, GridSimulator, HOURS_PER_DAY, compute_grid_state};
pub use state::GridState;
