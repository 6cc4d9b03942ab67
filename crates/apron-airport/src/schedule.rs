//! The value a scheduler hands back to the airport.

use std::collections::BTreeMap;

use apron_core::AircraftId;

use crate::Itinerary;

/// New itineraries keyed by aircraft.
///
/// Aircraft absent from the map keep whatever itinerary they already have.
/// `BTreeMap` keeps application order deterministic.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Schedule {
    pub itineraries: BTreeMap<AircraftId, Itinerary>,
    /// Number of aircraft the scheduler told to hold this round.
    pub n_holds: u32,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, aircraft: AircraftId, itinerary: Itinerary) {
        if itinerary.hold_remaining() > 0 {
            self.n_holds += 1;
        }
        self.itineraries.insert(aircraft, itinerary);
    }

    pub fn len(&self) -> usize {
        self.itineraries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.itineraries.is_empty()
    }
}
