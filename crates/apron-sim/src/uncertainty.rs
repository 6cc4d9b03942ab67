//! Stochastic speed perturbation.
//!
//! Each tick, every active aircraft draws `u ~ U[0, 1)`.  When `u` is not
//! below `prob_hold` its speed bias is reset to zero.  Otherwise, if the
//! aircraft stands at an enabled trigger location and has an itinerary, a
//! bias is drawn from `Normal(mu, sigma)` and added to its nominal speed for
//! this tick.  Nothing carries over between ticks apart from the bias value
//! itself.

use std::sync::Arc;

use apron_airport::{Aircraft, AirportState};
use apron_core::{SimConfig, SimRng, UncertaintyConfig};
use apron_scenario::Scenario;
use apron_surface::{Location, Surface};
use rand_distr::{Distribution, Normal};
use tracing::info;

use crate::{SimError, SimResult};

/// RNG stream reserved for uncertainty draws.
const UNCERTAINTY_STREAM: u64 = 1;

#[derive(Clone, Debug)]
pub struct Uncertainty {
    prob_hold:          f64,
    speed_bias:         Normal<f64>,
    at_gate:            bool,
    at_spot:            bool,
    at_runway:          bool,
    runway_tolerance_m: f32,
    rng:                SimRng,
}

impl Uncertainty {
    pub fn new(config: &UncertaintyConfig, rng: SimRng) -> SimResult<Self> {
        let speed_bias = Normal::new(config.speed_bias_mu, config.speed_bias_sigma)
            .map_err(|e| SimError::config(format!("uncertainty speed bias: {e}")))?;
        Ok(Self {
            prob_hold: config.prob_hold,
            speed_bias,
            at_gate: config.at_gate,
            at_spot: config.at_spot,
            at_runway: config.at_runway,
            runway_tolerance_m: config.runway_tolerance_m,
            rng,
        })
    }

    /// The injector described by `config.uncertainty`, seeded from the run's
    /// master seed, or `None` when disabled.
    pub fn from_config(config: &SimConfig) -> SimResult<Option<Self>> {
        if !config.uncertainty.enabled {
            return Ok(None);
        }
        let rng = SimRng::for_stream(config.seed, UNCERTAINTY_STREAM);
        Self::new(&config.uncertainty, rng).map(Some)
    }

    #[inline]
    pub fn prob_hold(&self) -> f64 {
        self.prob_hold
    }

    /// Perturb every active aircraft in `airport`.  Returns how many received
    /// a sampled bias.
    pub fn inject(&mut self, airport: &mut AirportState, scenario: &Scenario) -> usize {
        let surface = Arc::clone(airport.surface());
        let mut perturbed = 0;

        for aircraft in airport.aircrafts_mut() {
            if self.rng.unit() >= self.prob_hold {
                aircraft.set_speed_bias(0.0);
                continue;
            }
            if !self.is_eligible(aircraft, &surface, scenario) || aircraft.itinerary.is_none() {
                continue;
            }

            let bias = self.speed_bias.sample(self.rng.inner()) as f32;
            aircraft.set_speed_bias(bias);
            perturbed += 1;
            info!(
                aircraft = %aircraft.callsign,
                bias_mps = bias,
                speed_mps = aircraft.speed(),
                "speed uncertainty applied"
            );
        }
        perturbed
    }

    fn is_eligible(&self, aircraft: &Aircraft, surface: &Surface, scenario: &Scenario) -> bool {
        match aircraft.location {
            Some(Location::Gate(_)) if self.at_gate => return true,
            Some(Location::Spot(_)) if self.at_spot => return true,
            _ => {}
        }
        if !self.at_runway {
            return false;
        }
        let (Some(next), Some(flight)) = (aircraft.next_node(surface), scenario.get_flight(aircraft.id))
        else {
            return false;
        };
        let runway_start = surface.runway(flight.runway()).start;
        surface.node_pos[next.index()].is_close_to(surface.node_pos[runway_start.index()], self.runway_tolerance_m)
    }
}
