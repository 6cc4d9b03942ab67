//! The `Simulation` engine and its tick pipeline.

use std::sync::Arc;
use std::time::{Duration, Instant};

use apron_airport::{AirportState, Schedule};
use apron_core::{AircraftId, ClockStep, SimClock, SimConfig, SimTime};
use apron_scenario::{Flight, Scenario};
use apron_surface::{Location, RoutingExpert};
use tracing::{debug, debug_span, error, info};

use crate::{
    CompletedItinerary, Instrumentation, Scheduler, SimError, SimResult, SimulationDelegate,
    TickStatus, Uncertainty,
};

// ── SimState ──────────────────────────────────────────────────────────────────

/// Everything a snapshot copies: the clock, the airport, the completed log,
/// and reschedule bookkeeping, plus handles to the immutable collaborators.
#[derive(Clone, Debug)]
pub struct SimState {
    pub(crate) config:                  SimConfig,
    pub(crate) clock:                   SimClock,
    pub(crate) airport:                 AirportState,
    pub(crate) scenario:                Arc<Scenario>,
    pub(crate) routing_expert:          RoutingExpert,
    pub(crate) scheduler:               Box<dyn Scheduler>,
    pub(crate) uncertainty:             Option<Uncertainty>,
    pub(crate) completed:               Vec<CompletedItinerary>,
    pub(crate) last_schedule_time:      Option<SimTime>,
    pub(crate) last_schedule_exec_time: Option<Duration>,
    /// Set once the clock has reported end of day.  Terminal.
    pub(crate) ended:                   bool,
}

impl SimState {
    fn delegate(&self) -> SimulationDelegate<'_> {
        SimulationDelegate::new(self)
    }

    /// First tick, or at least one reschedule cycle since the last one.
    fn reschedule_due(&self) -> bool {
        match self.last_schedule_time {
            None       => true,
            Some(last) => self.clock.now().since(last) >= self.config.reschedule_cycle_secs,
        }
    }

    fn reschedule(&mut self) -> SimResult<Schedule> {
        let started = Instant::now();
        let schedule = self.scheduler.schedule(&self.delegate())?;
        let elapsed = started.elapsed();

        let applied = self.airport.apply_schedule(&schedule);
        self.last_schedule_time = Some(self.clock.now());
        self.last_schedule_exec_time = Some(elapsed);

        info!(
            now       = %self.clock.now(),
            scheduler = self.scheduler.name(),
            applied,
            holds     = schedule.n_holds,
            exec_ms   = elapsed.as_secs_f64() * 1e3,
            "rescheduled"
        );
        Ok(schedule)
    }

    fn inject_uncertainty(&mut self) {
        if let Some(uncertainty) = self.uncertainty.as_mut() {
            uncertainty.inject(&mut self.airport, &self.scenario);
        }
    }

    /// Fill freed gates from their queues, then admit departures appearing
    /// in `[now, now + tick_duration)`.
    fn admit(&mut self) -> SimResult<()> {
        for gate in self.airport.gates_with_queue() {
            if self.airport.is_occupied_at(gate) {
                continue;
            }
            if let Some(mut aircraft) = self.airport.dequeue(gate) {
                aircraft.set_location(Location::Gate(gate));
                info!(aircraft = %aircraft.callsign, %gate, "admitted from gate queue");
                self.airport.add_aircraft(aircraft)?;
            }
        }

        let (now, until) = (self.clock.now(), self.clock.next_tick_time());
        for flight in self.scenario.appearing(now, until) {
            let Flight::Departure(departure) = flight else {
                continue;
            };
            let gate = departure.from_gate;
            let mut aircraft = departure.aircraft.clone();

            if self.airport.is_occupied_at(gate) {
                info!(aircraft = %aircraft.callsign, %gate, "gate occupied, queued");
                self.airport.enqueue(gate, aircraft);
            } else {
                aircraft.set_location(Location::Gate(gate));
                info!(aircraft = %aircraft.callsign, %gate, "admitted");
                self.airport.add_aircraft(aircraft)?;
            }
        }
        Ok(())
    }

    /// Retire every departure that snaps onto its runway start.
    ///
    /// Decisions are collected first, then applied.
    fn remove_departed(&mut self) -> SimResult<usize> {
        let surface = self.airport.surface();
        let tolerance = self.config.close_tolerance_m;

        let mut departed: Vec<(AircraftId, SimTime)> = Vec::new();
        for aircraft in self.airport.aircrafts() {
            let flight = self
                .scenario
                .get_flight(aircraft.id)
                .ok_or(SimError::UnknownFlight(aircraft.id))?;
            // Arrivals are never removed.
            let Flight::Departure(departure) = flight else {
                continue;
            };
            let Some(location) = aircraft.location.as_ref() else {
                continue;
            };
                let runway_start = surface.runway(departure.runway).start;
            if surface.snap(location, tolerance) == Some(runway_start) {
                departed.push((aircraft.id, departure.appear_time));
            }
        }

        let now = self.clock.now();
        for &(id, appear_time) in &departed {
            let aircraft = self.airport.remove_aircraft(id)?;
            info!(aircraft = %aircraft.callsign, %now, "reached runway, removed");
            self.completed.push(CompletedItinerary {
                aircraft:     id,
                callsign:     aircraft.callsign,
                appear_time,
                removal_time: now,
                itinerary:    aircraft.itinerary,
            });
        }
        Ok(departed.len())
    }

    /// Admission then physics; shared by both pipelines.
    fn advance_airport(&mut self) -> SimResult<()> {
        self.admit()?;
        self.airport.tick(self.clock.tick_duration());
        Ok(())
    }
}

// ── Simulation ────────────────────────────────────────────────────────────────

/// The simulation engine.
///
/// One call to [`tick`](Self::tick) runs, in order:
///
/// 1. reschedule (first tick, then once per reschedule cycle)
/// 2. uncertainty injection
/// 3. admission (gate queues first, then newly appearing departures)
/// 4. airport physics
/// 5. state logging
/// 6. removal of departures at their runway
/// 7. clock advance (end of day finalizes instrumentation)
/// 8. conflict check
/// 9. analytics observation
///
/// [`quiet_tick`](Self::quiet_tick) runs only 3, 4, 6 and 7.
///
/// Build with [`SimBuilder`][crate::SimBuilder].
#[derive(Debug)]
pub struct Simulation {
    pub(crate) state:           SimState,
    pub(crate) instrumentation: Instrumentation,
}

impl Simulation {
    pub(crate) fn from_parts(state: SimState, instrumentation: Instrumentation) -> Self {
        Self { state, instrumentation }
    }

    // ── Read access ───────────────────────────────────────────────────────

    #[inline]
    pub fn now(&self) -> SimTime {
        self.state.clock.now()
    }

    /// Read-only view for schedulers, observers and callers.
    #[inline]
    pub fn delegate(&self) -> SimulationDelegate<'_> {
        self.state.delegate()
    }

    #[inline]
    pub fn airport(&self) -> &AirportState {
        &self.state.airport
    }

    #[inline]
    pub fn clock(&self) -> &SimClock {
        &self.state.clock
    }

    #[inline]
    pub fn completed_itineraries(&self) -> &[CompletedItinerary] {
        &self.state.completed
    }

    #[inline]
    pub fn uncertainty(&self) -> Option<&Uncertainty> {
        self.state.uncertainty.as_ref()
    }

    /// `true` once a tick has returned `EndOfDay`.  Further ticks are no-ops.
    #[inline]
    pub fn is_ended(&self) -> bool {
        self.state.ended
    }

    #[inline]
    pub fn instrumentation(&self) -> &Instrumentation {
        &self.instrumentation
    }

    /// Mutable airport access for setting up scenarios and what-if
    /// experiments on a snapshot.
    #[inline]
    pub fn airport_mut(&mut self) -> &mut AirportState {
        &mut self.state.airport
    }

    // ── Ticking ───────────────────────────────────────────────────────────

    /// Run one full tick.
    ///
    /// Returns `TickStatus::EndOfDay` once the clock reaches its horizon.
    /// The engine is then ended: later calls return `EndOfDay` and change
    /// nothing.
    /// Conflicts surface as `SimError::Conflict`; any other failure is
    /// logged and returned.  Mutations made before a failure are kept.
    pub fn tick(&mut self) -> SimResult<TickStatus> {
        let now = self.now();
        let result = self.run_tick();
        if let Err(e) = &result {
            if let SimError::Conflict { conflicts, .. } = e {
                for conflict in conflicts {
                    error!(%now, %conflict, "conflict");
                }
            } else {
                error!(
                    %now,
                    error     = %e,
                    active    = self.state.airport.aircrafts().len(),
                    queued    = self.state.airport.queued_count(),
                    completed = self.state.completed.len(),
                    "tick failed"
                );
            }
        }
        result
    }

    fn run_tick(&mut self) -> SimResult<TickStatus> {
        let Simulation { state, instrumentation } = self;
        if state.ended {
            return Ok(TickStatus::EndOfDay);
        }
        debug!(now = %state.clock.now(), active = state.airport.aircrafts().len(), "tick");

        if state.reschedule_due() {
            let schedule = state.reschedule()?;
            instrumentation.on_reschedule(&schedule, &state.delegate());
        }

        state.inject_uncertainty();
        state.advance_airport()?;
        instrumentation.log_tick(&state.delegate());
        state.remove_departed()?;

        let now = match state.clock.advance() {
            ClockStep::Advanced(now) => now,
            ClockStep::EndOfDay => {
                info!(now = %state.clock.now(), completed = state.completed.len(), "end of day");
                state.ended = true;
                instrumentation.finalize()?;
                return Ok(TickStatus::EndOfDay);
            }
        };

        let conflicts = state.airport.conflicts();
        if !conflicts.is_empty() {
            return Err(SimError::Conflict { time: now, conflicts: conflicts.to_vec() });
        }

        instrumentation.observe_tick(&state.delegate());
        Ok(TickStatus::Running(now))
    }

    /// Admission, physics, removal and clock only.  Meant for look-ahead on
    /// a snapshot: no rescheduling, uncertainty, logging, analytics,
    /// conflict check or end-of-day finalization.
    pub fn quiet_tick(&mut self) -> SimResult<TickStatus> {
        let _quiet = debug_span!("quiet", now = %self.now()).entered();
        let state = &mut self.state;
        if state.ended {
            return Ok(TickStatus::EndOfDay);
        }

        state.advance_airport()?;
        state.remove_departed()?;

        Ok(match state.clock.advance() {
            ClockStep::Advanced(now) => TickStatus::Running(now),
            ClockStep::EndOfDay => {
                state.ended = true;
                TickStatus::EndOfDay
            }
        })
    }

    /// Tick until end of day.  Returns the number of ticks run.
    pub fn run(&mut self) -> SimResult<u64> {
        let mut ticks = 0;
        loop {
            ticks += 1;
            if self.tick()?.is_end_of_day() {
                return Ok(ticks);
            }
        }
    }
}
