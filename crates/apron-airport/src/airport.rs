//! `AirportState` — every aircraft currently on the surface plus gate queues.

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::sync::Arc;

use apron_core::{AircraftId, GateId};
use apron_surface::Surface;
use tracing::info;

use crate::{
    detect_conflicts, Aircraft, AircraftState, AirportError, AirportResult, Conflict, Schedule,
};

/// Live airport state: active aircraft, per-gate waiting queues, and the
/// conflicts found by the last physics tick.
///
/// The surface is shared and immutable; everything else is owned, so
/// `clone()` yields a fully independent copy of the dynamic state.
///
/// Aircraft are kept in admission order, which makes every iteration (physics,
/// removal, conflict reporting) deterministic.
#[derive(Clone, Debug)]
pub struct AirportState {
    surface:      Arc<Surface>,
    aircrafts:    Vec<Aircraft>,
    gate_queue:   BTreeMap<GateId, VecDeque<Aircraft>>,
    conflicts:    Vec<Conflict>,
    /// Every aircraft ever admitted, including removed ones.
    admitted:     BTreeSet<AircraftId>,
    separation_m: f32,
}

impl AirportState {
    pub fn new(surface: Arc<Surface>, separation_m: f32) -> Self {
        Self {
            surface,
            aircrafts:  Vec::new(),
            gate_queue: BTreeMap::new(),
            conflicts:  Vec::new(),
            admitted:   BTreeSet::new(),
            separation_m,
        }
    }

    /// Rebuild a state from previously captured parts.  Conflicts are
    /// recomputed from the restored positions.
    pub fn from_parts(
        surface:      Arc<Surface>,
        separation_m: f32,
        aircrafts:    Vec<Aircraft>,
        gate_queue:   BTreeMap<GateId, VecDeque<Aircraft>>,
        admitted:     BTreeSet<AircraftId>,
    ) -> Self {
        let conflicts = detect_conflicts(&aircrafts, &surface, separation_m);
        Self { surface, aircrafts, gate_queue, conflicts, admitted, separation_m }
    }

    // ── Read access ───────────────────────────────────────────────────────

    #[inline]
    pub fn surface(&self) -> &Arc<Surface> {
        &self.surface
    }

    /// Active aircraft in admission order.
    #[inline]
    pub fn aircrafts(&self) -> &[Aircraft] {
        &self.aircrafts
    }

    /// Mutable access to active aircraft (speed bias, location).  A slice,
    /// so membership can only change through `add_aircraft` /
    /// `remove_aircraft`.
    #[inline]
    pub fn aircrafts_mut(&mut self) -> &mut [Aircraft] {
        &mut self.aircrafts
    }

    pub fn aircraft(&self, id: AircraftId) -> Option<&Aircraft> {
        self.aircrafts.iter().find(|a| a.id == id)
    }

    #[inline]
    pub fn gate_queue(&self) -> &BTreeMap<GateId, VecDeque<Aircraft>> {
        &self.gate_queue
    }

    /// Total aircraft waiting across all gate queues.
    pub fn queued_count(&self) -> usize {
        self.gate_queue.values().map(VecDeque::len).sum()
    }

    /// Conflicts found by the most recent [`tick`](Self::tick).
    #[inline]
    pub fn conflicts(&self) -> &[Conflict] {
        &self.conflicts
    }

    /// `true` if `id` has ever been admitted (even if since removed).
    #[inline]
    pub fn was_admitted(&self, id: AircraftId) -> bool {
        self.admitted.contains(&id)
    }

    #[inline]
    pub fn admitted(&self) -> &BTreeSet<AircraftId> {
        &self.admitted
    }

    #[inline]
    pub fn separation_m(&self) -> f32 {
        self.separation_m
    }

    /// `true` if any active aircraft stands on `gate`'s node.
    pub fn is_occupied_at(&self, gate: GateId) -> bool {
        let node = self.surface.gate(gate).node;
        self.aircrafts.iter().any(|a| {
            a.location
                .as_ref()
                .and_then(|loc| self.surface.node_at(loc))
                == Some(node)
        })
    }

    // ── Membership ────────────────────────────────────────────────────────

    /// Admit a placed aircraft.  Each aircraft may be admitted once in its
    /// lifetime.
    pub fn add_aircraft(&mut self, mut aircraft: Aircraft) -> AirportResult<()> {
        if aircraft.location.is_none() {
            return Err(AirportError::NotPlaced(aircraft.id));
        }
        if !self.admitted.insert(aircraft.id) {
            return Err(AirportError::AlreadyAdmitted(aircraft.id));
        }
        aircraft.state = AircraftState::Active;
        self.aircrafts.push(aircraft);
        Ok(())
    }

    /// Retire an active aircraft and hand it back to the caller.
    pub fn remove_aircraft(&mut self, id: AircraftId) -> AirportResult<Aircraft> {
        let idx = self
            .aircrafts
            .iter()
            .position(|a| a.id == id)
            .ok_or(AirportError::AircraftNotFound(id))?;
        let mut aircraft = self.aircrafts.remove(idx);
        aircraft.state = AircraftState::Removed;
        Ok(aircraft)
    }

    /// Append `aircraft` to `gate`'s waiting line.
    pub fn enqueue(&mut self, gate: GateId, aircraft: Aircraft) {
        self.gate_queue.entry(gate).or_default().push_back(aircraft);
    }

    /// Take the longest-waiting aircraft at `gate`.
    pub fn dequeue(&mut self, gate: GateId) -> Option<Aircraft> {
        self.gate_queue.get_mut(&gate)?.pop_front()
    }

    /// Gates whose queue is non-empty, in ascending order.
    pub fn gates_with_queue(&self) -> Vec<GateId> {
        self.gate_queue
            .iter()
            .filter(|(_, q)| !q.is_empty())
            .map(|(&g, _)| g)
            .collect()
    }

    // ── Dynamics ──────────────────────────────────────────────────────────

    /// Advance every aircraft by one tick, then recompute conflicts.
    pub fn tick(&mut self, dt_secs: u32) {
        let surface = &self.surface;
        for aircraft in &mut self.aircrafts {
            aircraft.tick(surface, dt_secs);
        }
        self.conflicts = detect_conflicts(&self.aircrafts, &self.surface, self.separation_m);
    }

    /// Install the itineraries of `schedule` on the matching active aircraft.
    ///
    /// Returns how many aircraft received a new itinerary.  Entries for
    /// aircraft not on the surface are ignored.
    pub fn apply_schedule(&mut self, schedule: &Schedule) -> usize {
        let mut applied = 0;
        for aircraft in &mut self.aircrafts {
            if let Some(itinerary) = schedule.itineraries.get(&aircraft.id) {
                aircraft.itinerary = Some(itinerary.clone());
                applied += 1;
            }
        }
        applied
    }

    pub fn log_stats(&self) {
        info!(
            nodes   = self.surface.node_count(),
            links   = self.surface.link_count(),
            gates   = self.surface.gates.len(),
            spots   = self.surface.spots.len(),
            runways = self.surface.runways.len(),
            active  = self.aircrafts.len(),
            queued  = self.queued_count(),
            "airport surface loaded"
        );
    }
}
