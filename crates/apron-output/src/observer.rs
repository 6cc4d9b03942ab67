//! `StateLog<W>` and `Analysis<W>`: bridge the engine's `StateLogger` and
//! `Analyst` hooks to an output backend.
//!
//! Hooks have no return value, so write errors are stored (first one wins)
//! and returned from `save()` at end of day.

use apron_airport::Schedule;
use apron_sim::{Analyst, SimResult, SimulationDelegate, StateLogger};
use tracing::{debug, warn};

use crate::row::{AircraftStateRow, ItineraryRow, RescheduleRow, TickSummaryRow};
use crate::writer::{AnalysisWriter, StateWriter};
use crate::{OutputError, OutputResult};

fn store_err(slot: &mut Option<OutputError>, result: OutputResult<()>) {
    if let Err(e) = result {
        warn!(error = %e, "output write failed");
        // Keep only the first error.
        if slot.is_none() {
            *slot = Some(e);
        }
    }
}

/// Finish `writer`, then report the first stored error (if any).
fn finish_with(slot: &mut Option<OutputError>, finished: OutputResult<()>) -> SimResult<()> {
    store_err(slot, finished);
    match slot.take() {
        Some(e) => Err(e.into()),
        None    => Ok(()),
    }
}

// ── StateLog ──────────────────────────────────────────────────────────────────

/// A [`StateLogger`] writing every active aircraft each tick.
pub struct StateLog<W: StateWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: StateWriter> StateLog<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<W: StateWriter> StateLogger for StateLog<W> {
    fn log_on_tick(&mut self, sim: &SimulationDelegate<'_>) {
        let airport = sim.airport();
        let surface = airport.surface();
        let time_secs = sim.now().0;

        let rows: Vec<AircraftStateRow> = airport
            .aircrafts()
            .iter()
            .filter_map(|a| {
                let location = a.location.as_ref()?;
                let pos = surface.position(location);
                Some(AircraftStateRow {
                    time_secs,
                    aircraft_id:    a.id.0,
                    callsign:       a.callsign.clone(),
                    location:       location.to_string(),
                    lat:            pos.lat,
                    lon:            pos.lon,
                    speed_mps:      a.speed(),
                    speed_bias_mps: a.speed_bias_mps,
                    holding:        a.itinerary.as_ref().is_some_and(|it| !it.is_moving()),
                })
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_states(&rows);
            store_err(&mut self.last_error, result);
        }
    }

    fn save(&mut self) -> SimResult<()> {
        let finished = self.writer.finish();
        finish_with(&mut self.last_error, finished)
    }
}

// ── Analysis ──────────────────────────────────────────────────────────────────

/// An [`Analyst`] writing tick summaries, reschedule events and completed
/// itineraries.
pub struct Analysis<W: AnalysisWriter> {
    writer:     W,
    /// Completed itineraries already written.
    written:    usize,
    last_error: Option<OutputError>,
}

impl<W: AnalysisWriter> Analysis<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0, last_error: None }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<W: AnalysisWriter> Analyst for Analysis<W> {
    fn observe_on_tick(&mut self, sim: &SimulationDelegate<'_>) {
        let airport = sim.airport();
        let completed = sim.completed_itineraries();

        let row = TickSummaryRow {
            time_secs: sim.now().0,
            active:    airport.aircrafts().len() as u64,
            queued:    airport.queued_count() as u64,
            completed: completed.len() as u64,
        };
        let result = self.writer.write_tick_summary(&row);
        store_err(&mut self.last_error, result);

        let fresh: Vec<ItineraryRow> = completed
            .get(self.written..)
            .unwrap_or_default()
            .iter()
            .map(|c| ItineraryRow {
                aircraft_id:  c.aircraft.0,
                callsign:     c.callsign.clone(),
                appear_secs:  c.appear_time.0,
                removal_secs: c.removal_time.0,
                travelled_m:  c.itinerary.as_ref().map_or(0.0, |it| it.travelled_m()),
                ticks_held:   c.itinerary.as_ref().map_or(0, |it| it.ticks_held()),
            })
            .collect();
        if !fresh.is_empty() {
            self.written += fresh.len();
            let result = self.writer.write_itineraries(&fresh);
            store_err(&mut self.last_error, result);
        }
    }

    fn observe_on_reschedule(&mut self, schedule: &Schedule, sim: &SimulationDelegate<'_>) {
        let exec_ms = sim
            .last_schedule_exec_time()
            .map_or(0.0, |d| d.as_secs_f64() * 1e3);
        debug!(now = %sim.now(), exec_ms, itineraries = schedule.len(), "reschedule recorded");

        let row = RescheduleRow {
            time_secs:   sim.now().0,
            exec_ms,
            itineraries: schedule.len() as u64,
            holds:       schedule.n_holds,
        };
        let result = self.writer.write_reschedule(&row);
        store_err(&mut self.last_error, result);
    }

    fn save(&mut self) -> SimResult<()> {
        let finished = self.writer.finish();
        finish_with(&mut self.last_error, finished)
    }
}
