//! Arrival and departure flight records.

use std::fmt;

use apron_airport::Aircraft;
use apron_core::{AircraftId, GateId, RunwayId, SimTime, SpotId};

/// A departure: gate → spot → runway.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DepartureFlight {
    pub aircraft:       Aircraft,
    pub to_airport:     String,
    pub from_gate:      GateId,
    pub spot:           SpotId,
    pub runway:         RunwayId,
    pub departure_time: SimTime,
    /// When the aircraft becomes eligible to enter the surface.
    pub appear_time:    SimTime,
}

/// An arrival: runway → spot → gate.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArrivalFlight {
    pub aircraft:     Aircraft,
    pub from_airport: String,
    pub to_gate:      GateId,
    pub spot:         SpotId,
    pub runway:       RunwayId,
    pub arrival_time: SimTime,
    pub appear_time:  SimTime,
}

/// Either kind of flight.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Flight {
    Departure(DepartureFlight),
    Arrival(ArrivalFlight),
}

impl Flight {
    pub fn aircraft(&self) -> &Aircraft {
        match self {
            Flight::Departure(f) => &f.aircraft,
            Flight::Arrival(f)   => &f.aircraft,
        }
    }

    #[inline]
    pub fn aircraft_id(&self) -> AircraftId {
        self.aircraft().id
    }

    pub fn appear_time(&self) -> SimTime {
        match self {
            Flight::Departure(f) => f.appear_time,
            Flight::Arrival(f)   => f.appear_time,
        }
    }

    /// Scheduled departure or arrival time.
    pub fn scheduled_time(&self) -> SimTime {
        match self {
            Flight::Departure(f) => f.departure_time,
            Flight::Arrival(f)   => f.arrival_time,
        }
    }

    pub fn runway(&self) -> RunwayId {
        match self {
            Flight::Departure(f) => f.runway,
            Flight::Arrival(f)   => f.runway,
        }
    }

    pub fn spot(&self) -> SpotId {
        match self {
            Flight::Departure(f) => f.spot,
            Flight::Arrival(f)   => f.spot,
        }
    }

    pub fn as_departure(&self) -> Option<&DepartureFlight> {
        match self {
            Flight::Departure(f) => Some(f),
            Flight::Arrival(_)   => None,
        }
    }
}

impl fmt::Display for DepartureFlight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Departure:{} gate:{} spot:{} runway:{} time:{} appear:{}>",
            self.aircraft.callsign, self.from_gate, self.spot, self.runway,
            self.departure_time, self.appear_time
        )
    }
}

impl fmt::Display for ArrivalFlight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Arrival:{} runway:{} spot:{} gate:{} time:{} appear:{}>",
            self.aircraft.callsign, self.runway, self.spot, self.to_gate,
            self.arrival_time, self.appear_time
        )
    }
}

impl fmt::Display for Flight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Flight::Departure(d) => d.fmt(f),
            Flight::Arrival(a)   => a.fmt(f),
        }
    }
}
