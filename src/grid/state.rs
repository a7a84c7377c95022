//! Grid snapshot value type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A synthetic snapshot of grid load, carbon intensity, and price for one hour.
///
/// Produced fresh on every call to
/// [`compute_grid_state`](super::compute_grid_state); never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridState {
    /// Hour of day as requested (0–23 is meaningful, not enforced).
    pub hour: i32,
    /// Grid load in MW, floored.
    pub grid_load_mw: u32,
    /// Carbon intensity in gCO2/kWh, floored.
    pub carbon_intensity: u32,
    /// Wholesale price per MWh, rounded to 2 decimals.
    pub price_per_mwh: f64,
    /// Set only for the scripted crisis hour.
    pub is_peak: bool,
}

impl fmt::Display for GridState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:00 load={:>4} MW carbon={:>3} g/kWh price=£{:>7.2}",
            self.hour, self.grid_load_mw, self.carbon_intensity, self.price_per_mwh
        )?;
        if self.is_peak {
            write!(f, " PEAK")?;
        }
        Ok(())
    }
}
