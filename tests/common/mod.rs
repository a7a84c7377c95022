//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use eco_compute::grid::GridSimulator;
use eco_compute::jobs::{JobRegistry, RegistryPolicy};

/// Job the demo scenario pauses and migrates.
pub const ALPHA: &str = "job-training-alpha";

/// Seeded simulator so carbon noise is reproducible.
pub fn seeded_simulator() -> GridSimulator {
    GridSimulator::new(42)
}

/// Registry with the permissive demo policy.
pub fn demo_registry() -> JobRegistry {
    JobRegistry::initialize(RegistryPolicy::default())
}

/// Registry with every check switched on.
pub fn strict_registry() -> JobRegistry {
    JobRegistry::initialize(RegistryPolicy::strict())
}
