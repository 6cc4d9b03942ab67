//! Run configuration.
//!
//! One `SimConfig` value is built (or deserialized) by the application and
//! handed to the simulation builder.  Components copy out what they need at
//! construction time; nothing reads configuration from global state.

use crate::{CoreError, CoreResult, SimClock, SimTime};

// ── UncertaintyConfig ─────────────────────────────────────────────────────────

/// Parameters of the stochastic speed perturbation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UncertaintyConfig {
    /// Build an uncertainty injector at all.
    pub enabled: bool,

    /// Per-aircraft, per-tick probability that a perturbation is attempted.
    pub prob_hold: f64,

    /// Mean of the Gaussian speed bias, in m/s.
    pub speed_bias_mu: f64,

    /// Standard deviation of the Gaussian speed bias, in m/s.
    pub speed_bias_sigma: f64,

    /// Aircraft parked at a gate are eligible.
    pub at_gate: bool,

    /// Aircraft standing on a spot are eligible.
    pub at_spot: bool,

    /// Aircraft whose next itinerary node is close to their runway start
    /// are eligible.
    pub at_runway: bool,

    /// Distance under which "next node" counts as the runway start.
    pub runway_tolerance_m: f32,
}

impl Default for UncertaintyConfig {
    fn default() -> Self {
        Self {
            enabled:            false,
            prob_hold:          0.0,
            speed_bias_mu:      0.0,
            speed_bias_sigma:   1.0,
            at_gate:            true,
            at_spot:            false,
            at_runway:          false,
            runway_tolerance_m: 50.0,
        }
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically loaded from a JSON file by the application crate (with the
/// `serde` feature) and passed to the simulation builder.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Simulated start of the run.
    pub start: SimTime,

    /// Horizon: the clock never advances past this instant.
    pub end: SimTime,

    /// Seconds per tick.
    pub tick_duration_secs: u32,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Minimum simulated seconds between two reschedules.
    pub reschedule_cycle_secs: u64,

    /// Skip state logging and analytics.  Selects the uninstrumented
    /// pipeline at build time; errors still propagate.
    pub test_mode: bool,

    /// Distance under which an aircraft counts as "at" its runway start.
    pub close_tolerance_m: f32,

    /// Minimum spacing between two aircraft on the same link.
    pub separation_m: f32,

    /// Registry name of the scheduler to run.
    pub scheduler: String,

    pub uncertainty: UncertaintyConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            start:                 SimTime::MIDNIGHT,
            end:                   SimTime::from_hms(23, 59, 59),
            tick_duration_secs:    30,
            seed:                  42,
            reschedule_cycle_secs: 300,
            test_mode:             false,
            close_tolerance_m:     10.0,
            separation_m:          50.0,
            scheduler:             "fcfs".to_owned(),
            uncertainty:           UncertaintyConfig::default(),
        }
    }
}

impl SimConfig {
    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.start, self.tick_duration_secs, self.end)
    }

    /// Reject configurations the engine cannot run.
    pub fn validate(&self) -> CoreResult<()> {
        if self.tick_duration_secs == 0 {
            return Err(CoreError::Config("tick_duration_secs must be > 0".into()));
        }
        if self.end <= self.start {
            return Err(CoreError::Config(format!(
                "end {} must be after start {}",
                self.end, self.start
            )));
        }
        if !(self.close_tolerance_m.is_finite() && self.close_tolerance_m >= 0.0) {
            return Err(CoreError::Config("close_tolerance_m must be finite and >= 0".into()));
        }
        if !(self.separation_m.is_finite() && self.separation_m >= 0.0) {
            return Err(CoreError::Config("separation_m must be finite and >= 0".into()));
        }

        let u = &self.uncertainty;
        if !(0.0..=1.0).contains(&u.prob_hold) {
            return Err(CoreError::Config(format!(
                "uncertainty.prob_hold {} outside [0, 1]",
                u.prob_hold
            )));
        }
        if !(u.speed_bias_sigma.is_finite() && u.speed_bias_sigma >= 0.0) {
            return Err(CoreError::Config("uncertainty.speed_bias_sigma must be finite and >= 0".into()));
        }
        if !u.speed_bias_mu.is_finite() {
            return Err(CoreError::Config("uncertainty.speed_bias_mu must be finite".into()));
        }
        if !(u.runway_tolerance_m.is_finite() && u.runway_tolerance_m >= 0.0) {
            return Err(CoreError::Config("uncertainty.runway_tolerance_m must be finite and >= 0".into()));
        }
        Ok(())
    }
}
