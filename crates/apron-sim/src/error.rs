use apron_airport::{AirportError, Conflict};
use apron_core::{AircraftId, CoreError, SimTime};
use apron_surface::SurfaceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] CoreError),

    /// The airport reported unsafe separation after a physics tick.  The run
    /// is invalid and must stop.
    #[error("{} conflict(s) at {time}", .conflicts.len())]
    Conflict {
        time:      SimTime,
        conflicts: Vec<Conflict>,
    },

    #[error("aircraft {0} has no flight in the scenario")]
    UnknownFlight(AircraftId),

    #[error("no scheduler registered under {0:?}")]
    UnknownScheduler(String),

    #[error("scheduler failed: {0}")]
    Scheduler(String),

    #[error("airport error: {0}")]
    Airport(#[from] AirportError),

    #[error("surface error: {0}")]
    Surface(#[from] SurfaceError),

    #[error("output error: {0}")]
    Output(Box<dyn std::error::Error + Send + Sync>),
}

impl SimError {
    /// Shorthand for a configuration error with a formatted message.
    pub fn config(msg: impl Into<String>) -> Self {
        SimError::Config(CoreError::Config(msg.into()))
    }

    #[inline]
    pub fn is_conflict(&self) -> bool {
        matches!(self, SimError::Conflict { .. })
    }
}

pub type SimResult<T> = Result<T, SimError>;
