use rand::{Rng, SeedableRng, rngs::StdRng};

use super::state::GridState;

/// The scripted crisis hour (19:00) whose metrics are fixed.
pub const CRISIS_HOUR: i32 = 19;

/// Number of hours in a full day profile.
pub const HOURS_PER_DAY: i32 = 24;

/// Mean grid load of the diurnal curve (MW).
const LOAD_BASE_MW: f64 = 400.0;
/// Amplitude of the diurnal curve (MW).
const LOAD_AMP_MW: f64 = 200.0;
/// Hour at which the diurnal curve crosses its mean on the way up.
const LOAD_PHASE_HOUR: f64 = 6.0;
/// Angular step per hour (radians).
const LOAD_RAD_PER_HOUR: f64 = 0.25;

/// Lower bound of carbon intensity (gCO2/kWh).
const CARBON_BASE: f64 = 150.0;
/// Width of the uniform carbon noise band (gCO2/kWh).
const CARBON_SPREAD: f64 = 50.0;

/// Price floor per MWh.
const PRICE_BASE: f64 = 80.0;
/// Price added per MW of load.
const PRICE_PER_MW: f64 = 0.2;

/// Fixed crisis-hour metrics.
const CRISIS_LOAD_MW: u32 = 950;
const CRISIS_CARBON: u32 = 350;
const CRISIS_PRICE: f64 = 450.0;

/// Computes the synthetic grid state for `hour`.
///
/// The crisis hour returns fixed stress values without touching `rng`.
/// Every other hour follows a sinusoidal load curve, a price derived from
/// the unfloored load, and carbon intensity drawn uniformly from
/// `[150, 200)`. Hours outside `0..24` are not rejected.
///
/// # Examples
///
/// ```
/// use eco_compute::grid::compute_grid_state;
/// use rand::{SeedableRng, rngs::StdRng};
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let peak = compute_grid_state(19, &mut rng);
/// assert!(peak.is_peak);
/// assert_eq!(peak.grid_load_mw, 950);
/// ```
pub fn compute_grid_state<R: Rng>(hour: i32, rng: &mut R) -> GridState {
    if hour == CRISIS_HOUR {
        return GridState {
            hour,
            grid_load_mw: CRISIS_LOAD_MW,
            carbon_intensity: CRISIS_CARBON,
            price_per_mwh: CRISIS_PRICE,
            is_peak: true,
        };
    }

    let base_load = base_load_mw(hour);
    let base_carbon = CARBON_BASE + rng.random_range(0.0..CARBON_SPREAD);
    let base_price = PRICE_BASE + base_load * PRICE_PER_MW;

    GridState {
        hour,
        grid_load_mw: base_load.floor().max(0.0) as u32,
        carbon_intensity: base_carbon.floor() as u32,
        price_per_mwh: round_cents(base_price),
        is_peak: false,
    }
}

/// Unfloored diurnal load curve in MW.
pub(crate) fn base_load_mw(hour: i32) -> f64 {
    let angle = (f64::from(hour) - LOAD_PHASE_HOUR) * LOAD_RAD_PER_HOUR;
    LOAD_BASE_MW + LOAD_AMP_MW * angle.sin()
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Grid simulator owning a seedable random source for the carbon noise.
///
/// Two simulators built from the same seed produce identical sequences,
/// which keeps tests and demo runs reproducible.
#[derive(Debug, Clone)]
pub struct GridSimulator {
    rng: StdRng,
}

impl GridSimulator {
    /// Creates a simulator with a fixed seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates a simulator seeded from the operating system.
    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Creates a simulator from an optional seed, falling back to OS entropy.
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_os_rng, Self::new)
    }

    /// Returns the grid state for a single hour.
    pub fn state_at(&mut self, hour: i32) -> GridState {
        compute_grid_state(hour, &mut self.rng)
    }

    /// Returns the grid state for every hour of the day, in order.
    pub fn day_profile(&mut self) -> Vec<GridState> {
        (0..HOURS_PER_DAY).map(|h| self.state_at(h)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn crisis_hour_is_fixed() {
        let mut sim = GridSimulator::new(1);
        for _ in 0..5 {
            let s = sim.state_at(CRISIS_HOUR);
            assert_eq!(s.hour, 19);
            assert_eq!(s.grid_load_mw, 950);
            assert_eq!(s.carbon_intensity, 350);
            assert_eq!(s.price_per_mwh, 450.0);
            assert!(s.is_peak);
        }
    }

    #[test]
    fn crisis_hour_consumes_no_randomness() {
        let mut a = StdRng::seed_from_u64(9);
        let mut b = StdRng::seed_from_u64(9);
        let _ = compute_grid_state(CRISIS_HOUR, &mut a);
        assert_eq!(compute_grid_state(3, &mut a), compute_grid_state(3, &mut b));
    }

    #[test]
    fn off_peak_hours_stay_in_bounds() {
        let mut sim = GridSimulator::new(42);
        for _ in 0..20 {
            for hour in (0..HOURS_PER_DAY).filter(|h| *h != CRISIS_HOUR) {
                let s = sim.state_at(hour);
                assert!(!s.is_peak);
                assert!((150..200).contains(&s.carbon_intensity), "hour {hour}: {s:?}");
                let expected = round_cents(80.0 + base_load_mw(hour) * 0.2);
                assert!((s.price_per_mwh - expected).abs() < EPS, "hour {hour}");
            }
        }
    }

    #[test]
    fn load_follows_sine_curve() {
        let mut sim = GridSimulator::new(0);
        // (6 - 6) * 0.25 = 0, sin = 0
        assert_eq!(sim.state_at(6).grid_load_mw, 400);
        assert_eq!(sim.state_at(6).price_per_mwh, 160.0);
        // 400 + 200 * sin(-1.5) = 200.50..
        assert_eq!(sim.state_at(0).grid_load_mw, 200);
        // 400 + 200 * sin(1.5) = 599.49..
        assert_eq!(sim.state_at(12).grid_load_mw, 599);
    }

    #[test]
    fn same_hour_repeats_load_and_price() {
        let mut sim = GridSimulator::new(7);
        let a = sim.state_at(14);
        let b = sim.state_at(14);
        assert_eq!(a.grid_load_mw, b.grid_load_mw);
        assert_eq!(a.price_per_mwh, b.price_per_mwh);
        assert!((150..200).contains(&b.carbon_intensity));
    }

    #[test]
    fn out_of_range_hours_flow_through() {
        let mut sim = GridSimulator::new(3);
        let neg = sim.state_at(-5);
        assert_eq!(neg.hour, -5);
        assert!(!neg.is_peak);

        let late = sim.state_at(43);
        assert_eq!(late.hour, 43);
        // 43 is not the crisis hour even though 43 % 24 == 19
        assert!(!late.is_peak);
    }

    #[test]
    fn same_seed_same_profile() {
        let a = GridSimulator::new(42).day_profile();
        let b = GridSimulator::new(42).day_profile();
        assert_eq!(a, b);
        assert_eq!(a.len(), 24);
        assert_eq!(a.iter().filter(|s| s.is_peak).count(), 1);
    }
}
