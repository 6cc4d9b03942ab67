//! Aircraft entity and lifecycle state.

use std::fmt;

use apron_core::{AircraftId, NodeId};
use apron_surface::{Location, Surface};

use crate::Itinerary;

/// Lifecycle of an aircraft.  Transitions only go forward.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AircraftState {
    /// Created with its flight; not yet on the surface (possibly queued).
    #[default]
    Scheduled,
    /// On the surface, owned by `AirportState`.
    Active,
    /// Retired after reaching its runway.
    Removed,
}

/// One aircraft.
///
/// `location` is `None` until the aircraft is placed at its gate.  The
/// effective speed is `nominal_speed_mps + speed_bias_mps`, where the bias is
/// whatever the uncertainty injector drew for the current tick.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aircraft {
    pub id:                AircraftId,
    pub callsign:          String,
    pub model:             String,
    pub state:             AircraftState,
    pub location:          Option<Location>,
    pub nominal_speed_mps: f32,
    pub speed_bias_mps:    f32,
    pub itinerary:         Option<Itinerary>,
}

impl Aircraft {
    pub fn new(
        id:                AircraftId,
        callsign:          impl Into<String>,
        model:             impl Into<String>,
        nominal_speed_mps: f32,
    ) -> Self {
        Self {
            id,
            callsign: callsign.into(),
            model: model.into(),
            state: AircraftState::Scheduled,
            location: None,
            nominal_speed_mps,
            speed_bias_mps: 0.0,
            itinerary: None,
        }
    }

    #[inline]
    pub fn set_location(&mut self, location: Location) {
        self.location = Some(location);
    }

    /// Effective speed this tick, never negative.
    #[inline]
    pub fn speed(&self) -> f32 {
        (self.nominal_speed_mps + self.speed_bias_mps).max(0.0)
    }

    /// Record the uncertainty bias for the current tick.  Zero clears it.
    #[inline]
    pub fn set_speed_bias(&mut self, bias_mps: f32) {
        self.speed_bias_mps = bias_mps;
    }

    /// The node the aircraft is heading to along its itinerary.
    pub fn next_node(&self, surface: &Surface) -> Option<NodeId> {
        self.itinerary.as_ref().and_then(|it| it.next_node(surface))
    }

    /// Move along the itinerary for one tick.
    pub fn tick(&mut self, surface: &Surface, dt_secs: u32) {
        let speed = self.speed();
        let Some(itinerary) = self.itinerary.as_mut() else {
            return;
        };
        if let Some(location) = itinerary.step(surface, speed, dt_secs) {
            self.location = Some(location);
        }
    }
}

impl fmt::Display for Aircraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(loc) => write!(f, "<{} {} @ {}>", self.callsign, self.model, loc),
            None      => write!(f, "<{} {}>", self.callsign, self.model),
        }
    }
}
