use apron_core::AircraftId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AirportError {
    #[error("aircraft {0} was already admitted to the airport")]
    AlreadyAdmitted(AircraftId),

    #[error("aircraft {0} has no location")]
    NotPlaced(AircraftId),

    #[error("aircraft {0} is not in the airport")]
    AircraftNotFound(AircraftId),
}

pub type AirportResult<T> = Result<T, AirportError>;
