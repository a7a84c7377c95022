//! Grid-aware compute workload simulator.
//!
//! Two independent cores: a synthetic [`grid`] model that maps an hour to
//! load, carbon intensity, and price, and an in-memory [`jobs`] registry
//! whose workloads can be paused, completed, or migrated.

/// REST API (feature `api`).
#[cfg(feature = "api")]
pub mod api;
pub mod config;
pub mod grid;
pub mod io;
pub mod jobs;
/// Terminal dashboard (feature `tui`).
#[cfg(feature = "tui")]
pub mod tui;
