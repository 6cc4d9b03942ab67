//! Fluent builder for constructing a [`Simulation`].

use std::sync::Arc;

use apron_airport::AirportState;
use apron_core::SimConfig;
use apron_scenario::{Flight, Scenario};
use apron_surface::{DijkstraRouter, Router, RoutingExpert, Surface};

use crate::{
    Analyst, Instrumentation, NoopAnalyst, NoopStateLogger, Scheduler, SchedulerRegistry, SimError,
    SimResult, SimState, Simulation, StateLogger, Uncertainty,
};

/// Fluent builder for [`Simulation`].
///
/// # Required inputs
///
/// - [`SimConfig`]: horizon, tick duration, seed, reschedule cycle, …
/// - [`Surface`]: the airport graph, shared behind an `Arc`
/// - [`Scenario`]: the day's flights
///
/// # Optional inputs (have defaults)
///
/// | Method               | Default                                         |
/// |----------------------|-------------------------------------------------|
/// | `.router(r)`         | `DijkstraRouter`                                |
/// | `.scheduler(s)`      | `registry.resolve(config.scheduler)`            |
/// | `.registry(r)`       | `SchedulerRegistry::default()` (noop, fcfs)     |
/// | `.analyst(a)`        | `NoopAnalyst`                                   |
/// | `.state_logger(l)`   | `NoopStateLogger`                               |
///
/// With `config.test_mode` set the engine is built with instrumentation
/// `Off` and any analyst or state logger supplied here is dropped.
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, surface, scenario)
///     .analyst(Box::new(analysis))
///     .build()?;
/// while !sim.tick()?.is_end_of_day() {}
/// ```
pub struct SimBuilder {
    config:       SimConfig,
    surface:      Arc<Surface>,
    scenario:     Arc<Scenario>,
    router:       Option<Arc<dyn Router>>,
    scheduler:    Option<Box<dyn Scheduler>>,
    registry:     Option<SchedulerRegistry>,
    analyst:      Option<Box<dyn Analyst>>,
    state_logger: Option<Box<dyn StateLogger>>,
}

impl SimBuilder {
    pub fn new(config: SimConfig, surface: Arc<Surface>, scenario: impl Into<Arc<Scenario>>) -> Self {
        Self {
            config,
            surface,
            scenario:     scenario.into(),
            router:       None,
            scheduler:    None,
            registry:     None,
            analyst:      None,
            state_logger: None,
        }
    }

    pub fn router(mut self, router: Arc<dyn Router>) -> Self {
        self.router = Some(router);
        self
    }

    /// Use `scheduler` directly instead of looking up `config.scheduler`.
    pub fn scheduler(mut self, scheduler: Box<dyn Scheduler>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    /// Resolve `config.scheduler` against `registry`.
    pub fn registry(mut self, registry: SchedulerRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn analyst(mut self, analyst: Box<dyn Analyst>) -> Self {
        self.analyst = Some(analyst);
        self
    }

    pub fn state_logger(mut self, state_logger: Box<dyn StateLogger>) -> Self {
        self.state_logger = Some(state_logger);
        self
    }

    /// Validate inputs, resolve the scheduler, and return a ready-to-tick
    /// [`Simulation`] at `config.start`.
    pub fn build(self) -> SimResult<Simulation> {
        self.config.validate()?;
        check_scenario(&self.scenario, &self.surface)?;

        let scheduler = match self.scheduler {
            Some(s) => s,
            None => self
                .registry
                .unwrap_or_default()
                .resolve(&self.config.scheduler, &self.config)?,
        };
        let uncertainty = Uncertainty::from_config(&self.config)?;

        let instrumentation = if self.config.test_mode {
            Instrumentation::Off
        } else {
            Instrumentation::new(
                self.analyst.unwrap_or_else(|| Box::new(NoopAnalyst)),
                self.state_logger.unwrap_or_else(|| Box::new(NoopStateLogger)),
            )
        };

        let router = self.router.unwrap_or_else(|| Arc::new(DijkstraRouter));
        let airport = AirportState::new(Arc::clone(&self.surface), self.config.separation_m);
        airport.log_stats();
        self.scenario.log_stats();

        let state = SimState {
            clock: self.config.make_clock(),
            airport,
            scenario: self.scenario,
            routing_expert: RoutingExpert::new(self.surface, router),
            scheduler,
            uncertainty,
            completed: Vec::new(),
            last_schedule_time: None,
            last_schedule_exec_time: None,
            ended: false,
            config: self.config,
        };
        Ok(Simulation::from_parts(state, instrumentation))
    }
}

/// Every gate, spot and runway a flight names must exist on the surface.
fn check_scenario(scenario: &Scenario, surface: &Surface) -> SimResult<()> {
    for flight in scenario.flights() {
        let gate = match flight {
            Flight::Departure(d) => d.from_gate,
            Flight::Arrival(a)   => a.to_gate,
        };
        let missing = if gate.index() >= surface.gates.len() {
            Some(format!("gate {gate}"))
        } else if flight.spot().index() >= surface.spots.len() {
            Some(format!("spot {}", flight.spot()))
        } else if flight.runway().index() >= surface.runways.len() {
            Some(format!("runway {}", flight.runway()))
        } else {
            None
        };
        if let Some(what) = missing {
            return Err(SimError::config(format!(
                "flight {} references unknown {what}",
                flight.aircraft().callsign
            )));
        }
    }
    Ok(())
}
