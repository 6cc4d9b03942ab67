//! Plain data row types written by output backends.
//!
//! Times are seconds since the start of the simulated day.

/// One active aircraft at the end of a physics tick.
#[derive(Debug, Clone, PartialEq)]
pub struct AircraftStateRow {
    pub time_secs:      u64,
    pub aircraft_id:    u32,
    pub callsign:       String,
    /// `Location` display form, e.g. `GateId(2)` or `LinkId(7)+35.0m`.
    pub location:       String,
    pub lat:            f32,
    pub lon:            f32,
    pub speed_mps:      f32,
    pub speed_bias_mps: f32,
    /// Assigned itinerary but not moving this tick (hold ticks left or done).
    pub holding:        bool,
}

/// Airport-wide counters after one observed tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub time_secs: u64,
    pub active:    u64,
    pub queued:    u64,
    pub completed: u64,
}

/// One scheduler invocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RescheduleRow {
    pub time_secs:   u64,
    pub exec_ms:     f64,
    pub itineraries: u64,
    pub holds:       u32,
}

/// One aircraft that left the surface.
#[derive(Debug, Clone, PartialEq)]
pub struct ItineraryRow {
    pub aircraft_id:  u32,
    pub callsign:     String,
    pub appear_secs:  u64,
    pub removal_secs: u64,
    pub travelled_m:  f32,
    pub ticks_held:   u32,
}
