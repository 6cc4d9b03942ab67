//! `SimulationDelegate` — the read-only view handed to schedulers and
//! observers.

use std::time::Duration;

use apron_airport::AirportState;
use apron_core::{SimClock, SimConfig, SimTime};
use apron_scenario::Scenario;
use apron_surface::RoutingExpert;

use crate::{CompletedItinerary, Instrumentation, SimState, Simulation, Uncertainty};

/// Borrowed, read-only access to a running engine.
///
/// The borrow checker enforces the contract: nothing reachable from a
/// delegate can mutate the live simulation.  What-if exploration goes
/// through [`snapshot`](Self::snapshot), which returns an owned, independent
/// engine.
#[derive(Copy, Clone)]
pub struct SimulationDelegate<'a> {
    state: &'a SimState,
}

impl<'a> SimulationDelegate<'a> {
    pub(crate) fn new(state: &'a SimState) -> Self {
        Self { state }
    }

    #[inline]
    pub fn now(&self) -> SimTime {
        self.state.clock.now()
    }

    #[inline]
    pub fn clock(&self) -> &'a SimClock {
        &self.state.clock
    }

    #[inline]
    pub fn config(&self) -> &'a SimConfig {
        &self.state.config
    }

    #[inline]
    pub fn airport(&self) -> &'a AirportState {
        &self.state.airport
    }

    #[inline]
    pub fn scenario(&self) -> &'a Scenario {
        &self.state.scenario
    }

    #[inline]
    pub fn routing_expert(&self) -> &'a RoutingExpert {
        &self.state.routing_expert
    }

    /// Wall-clock time the last scheduler call took.
    #[inline]
    pub fn last_schedule_exec_time(&self) -> Option<Duration> {
        self.state.last_schedule_exec_time
    }

    /// Simulated time of the last reschedule.
    #[inline]
    pub fn last_schedule_time(&self) -> Option<SimTime> {
        self.state.last_schedule_time
    }

    #[inline]
    pub fn completed_itineraries(&self) -> &'a [CompletedItinerary] {
        &self.state.completed
    }

    /// Deep-copy the engine.
    ///
    /// The copy owns clones of the clock, airport, completed log, and
    /// reschedule bookkeeping; the surface, scenario, and router stay shared
    /// because they never change.  `uncertainty` replaces the original's
    /// injector (`None` disables it) and instrumentation is always `Off`.
    pub fn snapshot(&self, uncertainty: Option<Uncertainty>) -> Simulation {
        let state = SimState {
            config:                  self.state.config.clone(),
            clock:                   self.state.clock.clone(),
            airport:                 self.state.airport.clone(),
            scenario:                self.state.scenario.clone(),
            routing_expert:          self.state.routing_expert.clone(),
            scheduler:               self.state.scheduler.clone(),
            uncertainty,
            completed:               self.state.completed.clone(),
            last_schedule_time:      self.state.last_schedule_time,
            last_schedule_exec_time: self.state.last_schedule_exec_time,
            ended:                   self.state.ended,
        };
        Simulation::from_parts(state, Instrumentation::Off)
    }
}

impl std::fmt::Debug for SimulationDelegate<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulationDelegate")
            .field("now", &self.now())
            .field("active", &self.state.airport.aircrafts().len())
            .field("completed", &self.state.completed.len())
            .finish()
    }
}
