//! Serializable capture of a running engine.
//!
//! A checkpoint holds only dynamic state.  The surface, scenario, scheduler,
//! uncertainty injector and instrumentation are not serialized; they are
//! rebound by [`SimBuilder::resume`], so a checkpoint can be restored with a
//! fresh analyst and state logger.

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use apron_airport::{Aircraft, AirportState};
use apron_core::{AircraftId, GateId, SimClock, SimTime};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{CompletedItinerary, SimBuilder, SimError, SimResult, Simulation};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub clock:                   SimClock,
    pub aircrafts:               Vec<Aircraft>,
    pub gate_queue:              BTreeMap<GateId, VecDeque<Aircraft>>,
    pub admitted:                BTreeSet<AircraftId>,
    pub completed:               Vec<CompletedItinerary>,
    pub last_schedule_time:      Option<SimTime>,
    pub last_schedule_exec_time: Option<Duration>,
    pub ended:                   bool,
}

impl Simulation {
    /// Capture the dynamic state of this engine.
    pub fn checkpoint(&self) -> Checkpoint {
        let state = &self.state;
        Checkpoint {
            clock:                   state.clock.clone(),
            aircrafts:               state.airport.aircrafts().to_vec(),
            gate_queue:              state.airport.gate_queue().clone(),
            admitted:                state.airport.admitted().clone(),
            completed:               state.completed.clone(),
            last_schedule_time:      state.last_schedule_time,
            last_schedule_exec_time: state.last_schedule_exec_time,
            ended:                   state.ended,
        }
    }
}

impl SimBuilder {
    /// Build an engine exactly as [`build`](Self::build) would, then replace
    /// its dynamic state with `checkpoint`.
    ///
    /// The checkpoint's tick duration must match the configuration.
    pub fn resume(self, checkpoint: Checkpoint) -> SimResult<Simulation> {
        let mut sim = self.build()?;
        let state = &mut sim.state;

        if checkpoint.clock.tick_duration() != state.config.tick_duration_secs {
            return Err(SimError::config(format!(
                "checkpoint tick duration {}s differs from configured {}s",
                checkpoint.clock.tick_duration(),
                state.config.tick_duration_secs
            )));
        }

        state.airport = AirportState::from_parts(
            Arc::clone(state.airport.surface()),
            state.config.separation_m,
            checkpoint.aircrafts,
            checkpoint.gate_queue,
            checkpoint.admitted,
        );
        state.clock = checkpoint.clock;
        state.completed = checkpoint.completed;
        state.last_schedule_time = checkpoint.last_schedule_time;
        state.last_schedule_exec_time = checkpoint.last_schedule_exec_time;
        state.ended = checkpoint.ended;

        info!(
            now       = %state.clock.now(),
            active    = state.airport.aircrafts().len(),
            completed = state.completed.len(),
            "resumed from checkpoint"
        );
        Ok(sim)
    }
}
