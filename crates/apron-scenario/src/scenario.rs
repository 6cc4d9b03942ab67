//! `Scenario` — every flight of the day, ordered by appear time.

use std::collections::{HashMap, HashSet};

use apron_core::{AircraftId, SimTime};
use tracing::info;

use crate::{ArrivalFlight, DepartureFlight, Flight, ScenarioError, ScenarioResult};

/// The immutable flight schedule for one simulated day.
///
/// Flights are sorted by appear time (ties keep insertion order), so the set
/// of flights appearing in a window is found with two binary searches.
#[derive(Clone, Debug, Default)]
pub struct Scenario {
    flights:     Vec<Flight>,
    by_aircraft: HashMap<AircraftId, usize>,
}

impl Scenario {
    /// A scenario with no flights.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.flights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flights.is_empty()
    }

    /// All flights ordered by appear time.
    pub fn flights(&self) -> &[Flight] {
        &self.flights
    }

    /// Departures ordered by appear time.
    pub fn departures(&self) -> impl Iterator<Item = &DepartureFlight> + '_ {
        self.flights.iter().filter_map(|f| match f {
            Flight::Departure(d) => Some(d),
            Flight::Arrival(_)   => None,
        })
    }

    /// Arrivals ordered by appear time.
    pub fn arrivals(&self) -> impl Iterator<Item = &ArrivalFlight> + '_ {
        self.flights.iter().filter_map(|f| match f {
            Flight::Arrival(a)   => Some(a),
            Flight::Departure(_) => None,
        })
    }

    /// Flights whose appear time lies in `[from, until)`.
    pub fn appearing(&self, from: SimTime, until: SimTime) -> &[Flight] {
        let lo = self.flights.partition_point(|f| f.appear_time() < from);
        let hi = self.flights.partition_point(|f| f.appear_time() < until);
        &self.flights[lo..hi.max(lo)]
    }

    /// The flight that owns `aircraft`.
    pub fn get_flight(&self, aircraft: AircraftId) -> Option<&Flight> {
        self.by_aircraft.get(&aircraft).map(|&i| &self.flights[i])
    }

    pub fn log_stats(&self) {
        let departures = self.departures().count();
        info!(
            flights    = self.flights.len(),
            departures,
            arrivals   = self.flights.len() - departures,
            first      = %self.flights.first().map(Flight::appear_time).unwrap_or_default(),
            last       = %self.flights.last().map(Flight::appear_time).unwrap_or_default(),
            "scenario loaded"
        );
    }
}

// ── ScenarioBuilder ───────────────────────────────────────────────────────────

/// Collect flights in any order, then [`build`](Self::build) a sorted,
/// indexed [`Scenario`].
#[derive(Default)]
pub struct ScenarioBuilder {
    flights: Vec<Flight>,
}

impl ScenarioBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn departure(mut self, flight: DepartureFlight) -> Self {
        self.flights.push(Flight::Departure(flight));
        self
    }

    pub fn arrival(mut self, flight: ArrivalFlight) -> Self {
        self.flights.push(Flight::Arrival(flight));
        self
    }

    pub fn push(&mut self, flight: Flight) {
        self.flights.push(flight);
    }

    /// Sort by appear time, index by aircraft, and reject duplicate aircraft
    /// or callsigns and flights that appear after their scheduled time.
    pub fn build(self) -> ScenarioResult<Scenario> {
        let mut flights = self.flights;
        flights.sort_by_key(Flight::appear_time);

        let mut by_aircraft = HashMap::with_capacity(flights.len());
        let mut callsigns = HashSet::with_capacity(flights.len());

        for (i, flight) in flights.iter().enumerate() {
            let aircraft = flight.aircraft();
            if flight.appear_time() > flight.scheduled_time() {
                return Err(ScenarioError::AppearsAfterSchedule {
                    callsign:  aircraft.callsign.clone(),
                    appear:    flight.appear_time(),
                    scheduled: flight.scheduled_time(),
                });
            }
            if by_aircraft.insert(aircraft.id, i).is_some() {
                return Err(ScenarioError::DuplicateAircraft(aircraft.id));
            }
            if !callsigns.insert(aircraft.callsign.as_str()) {
                return Err(ScenarioError::DuplicateCallsign(aircraft.callsign.clone()));
            }
        }

        Ok(Scenario { flights, by_aircraft })
    }
}
