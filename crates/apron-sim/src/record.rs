//! Per-tick outcome and the completed-itinerary log entry.

use apron_airport::Itinerary;
use apron_core::{AircraftId, SimTime};

/// Result of one successful tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickStatus {
    /// The tick ran; carries the clock time after advancing.
    Running(SimTime),
    /// The clock reached its horizon.  Instrumentation (if any) has been
    /// finalized and further ticks are not expected.
    EndOfDay,
}

impl TickStatus {
    #[inline]
    pub fn is_end_of_day(self) -> bool {
        matches!(self, TickStatus::EndOfDay)
    }
}

/// Written once when an aircraft leaves the surface; never modified.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompletedItinerary {
    pub aircraft:     AircraftId,
    pub callsign:     String,
    pub appear_time:  SimTime,
    pub removal_time: SimTime,
    /// `None` if the aircraft reached its runway without ever being
    /// scheduled.
    pub itinerary:    Option<Itinerary>,
}

impl CompletedItinerary {
    /// Seconds between appearing and leaving the surface.
    #[inline]
    pub fn duration_secs(&self) -> u64 {
        self.removal_time.since(self.appear_time)
    }
}
