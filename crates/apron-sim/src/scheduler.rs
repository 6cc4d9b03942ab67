//! Pluggable scheduling strategies and the name → factory registry.

use std::collections::BTreeMap;
use std::fmt;

use apron_airport::{Itinerary, Schedule};
use apron_core::{AircraftId, SimConfig, SimTime};
use apron_scenario::Flight;
use tracing::debug;

use crate::{SimError, SimResult, SimulationDelegate};

// ── Scheduler trait ───────────────────────────────────────────────────────────

/// Computes itineraries for the aircraft on the surface.
///
/// Called synchronously inside a tick with a read-only delegate.  A scheduler
/// that wants to look ahead can take `sim.snapshot(None)` and `quiet_tick()`
/// the copy as often as it likes.
///
/// Implementors must be `Clone` (snapshots carry their own scheduler); the
/// blanket [`SchedulerClone`] impl provides boxing.
pub trait Scheduler: SchedulerClone + fmt::Debug + Send + Sync {
    /// Registry name.
    fn name(&self) -> &str;

    fn schedule(&self, sim: &SimulationDelegate<'_>) -> SimResult<Schedule>;
}

/// Object-safe cloning for `Box<dyn Scheduler>`.
pub trait SchedulerClone {
    fn clone_box(&self) -> Box<dyn Scheduler>;
}

impl<T: Scheduler + Clone + 'static> SchedulerClone for T {
    fn clone_box(&self) -> Box<dyn Scheduler> {
        Box::new(self.clone())
    }
}

impl Clone for Box<dyn Scheduler> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

// ── Registry ──────────────────────────────────────────────────────────────────

/// Builds a scheduler from the run configuration.
pub type SchedulerFactory = fn(&SimConfig) -> Box<dyn Scheduler>;

/// Maps configuration names to scheduler factories.
///
/// `SchedulerRegistry::default()` knows the built-ins `"noop"` and `"fcfs"`.
#[derive(Clone)]
pub struct SchedulerRegistry {
    factories: BTreeMap<String, SchedulerFactory>,
}

impl SchedulerRegistry {
    /// A registry with no entries.
    pub fn empty() -> Self {
        Self { factories: BTreeMap::new() }
    }

    /// Register (or replace) `name`.
    pub fn register(&mut self, name: impl Into<String>, factory: SchedulerFactory) -> &mut Self {
        self.factories.insert(name.into(), factory);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.factories.keys().map(String::as_str)
    }

    pub fn resolve(&self, name: &str, config: &SimConfig) -> SimResult<Box<dyn Scheduler>> {
        self.factories
            .get(name)
            .map(|factory| factory(config))
            .ok_or_else(|| SimError::UnknownScheduler(name.to_owned()))
    }
}

impl Default for SchedulerRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry
            .register(NoopScheduler::NAME, noop_factory)
            .register(FcfsScheduler::NAME, fcfs_factory);
        registry
    }
}

fn noop_factory(_config: &SimConfig) -> Box<dyn Scheduler> {
    Box::new(NoopScheduler)
}

fn fcfs_factory(config: &SimConfig) -> Box<dyn Scheduler> {
    Box::new(FcfsScheduler::from_config(config))
}

impl fmt::Debug for SchedulerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

// ── NoopScheduler ─────────────────────────────────────────────────────────────

/// Returns an empty schedule: aircraft keep whatever itinerary they have.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoopScheduler;

impl NoopScheduler {
    pub const NAME: &'static str = "noop";
}

impl Scheduler for NoopScheduler {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn schedule(&self, _sim: &SimulationDelegate<'_>) -> SimResult<Schedule> {
        Ok(Schedule::new())
    }
}

// ── FcfsScheduler ─────────────────────────────────────────────────────────────

/// First-come first-served departure release.
///
/// Every departure that is not already taxiing gets a shortest-path
/// itinerary from where it stands, via its spot, to its runway start.  If no
/// aircraft is currently taxiing, the one with the earliest scheduled
/// departure (ties by id) is released immediately; all others hold until the
/// next reschedule.  At most one aircraft moves at a time, so the surface
/// never sees two taxiing aircraft.
#[derive(Copy, Clone, Debug)]
pub struct FcfsScheduler {
    /// Hold length given to aircraft that are not released.
    pub hold_ticks: u32,
}

impl FcfsScheduler {
    pub const NAME: &'static str = "fcfs";

    /// Hold long enough to still be waiting when the next reschedule runs.
    pub fn from_config(config: &SimConfig) -> Self {
        let dt = u64::from(config.tick_duration_secs.max(1));
        let ticks = config.reschedule_cycle_secs.div_ceil(dt) + 1;
        Self { hold_ticks: u32::try_from(ticks).unwrap_or(u32::MAX) }
    }
}

impl Scheduler for FcfsScheduler {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn schedule(&self, sim: &SimulationDelegate<'_>) -> SimResult<Schedule> {
        let airport = sim.airport();
        let surface = airport.surface();
        let expert = sim.routing_expert();

        let mut taxiing = false;
        let mut waiting: Vec<(SimTime, AircraftId)> = Vec::new();

        for aircraft in airport.aircrafts() {
            if aircraft.itinerary.as_ref().is_some_and(Itinerary::is_moving) {
                taxiing = true;
                continue;
            }
            let flight = sim
                .scenario()
                .get_flight(aircraft.id)
                .ok_or(SimError::UnknownFlight(aircraft.id))?;
            if let Flight::Departure(departure) = flight {
                waiting.push((departure.departure_time, aircraft.id));
            }
        }
        waiting.sort_unstable();

        let mut schedule = Schedule::new();
        for (i, &(_, id)) in waiting.iter().enumerate() {
            let Some(aircraft) = airport.aircraft(id) else { continue };
            let Some(from) = aircraft.location.as_ref().and_then(|loc| surface.node_at(loc)) else {
                continue;
            };
            let Some(Flight::Departure(departure)) = sim.scenario().get_flight(id) else {
                continue;
            };

            let spot = surface.spot(departure.spot).node;
            let runway = surface.runway(departure.runway).start;
            let route = expert.route_via(&[from, spot, runway])?;

            let release = !taxiing && i == 0;
            let hold = if release { 0 } else { self.hold_ticks };
            debug!(aircraft = %aircraft.callsign, hold, length_m = route.length_m, "fcfs itinerary");
            schedule.insert(id, Itinerary::new(route).with_hold(hold));
        }

        Ok(schedule)
    }
}
