use apron_core::AircraftId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("aircraft {0} belongs to more than one flight")]
    DuplicateAircraft(AircraftId),

    #[error("callsign {0:?} is used by more than one flight")]
    DuplicateCallsign(String),

    #[error("flight {callsign} appears at {appear} but is scheduled at {scheduled}")]
    AppearsAfterSchedule {
        callsign:  String,
        appear:    apron_core::SimTime,
        scheduled: apron_core::SimTime,
    },
}

pub type ScenarioResult<T> = Result<T, ScenarioError>;
