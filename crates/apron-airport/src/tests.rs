//! Unit tests for apron-airport.

use std::sync::Arc;

use apron_core::{AircraftId, GateId, GeoPoint, LinkId, NodeId};
use apron_surface::{Location, RoutingExpert, Surface, SurfaceBuilder};

use crate::{Aircraft, AircraftState, AirportError, AirportState, Itinerary, Schedule};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Two gates (nodes 0, 1) feeding a junction (2), then a spot (3), then the
/// runway start (4).  Every link is 100 m.
fn surface() -> Arc<Surface> {
    let mut b = SurfaceBuilder::new();
    let g1 = b.add_node(GeoPoint::new(0.0009, 0.0));
    let g2 = b.add_node(GeoPoint::new(-0.0009, 0.0));
    let j  = b.add_node(GeoPoint::new(0.0, 0.0009));
    let sp = b.add_node(GeoPoint::new(0.0, 0.0018));
    let rw = b.add_node(GeoPoint::new(0.0, 0.0027));
    b.add_taxiway(g1, j, 100.0);
    b.add_taxiway(g2, j, 100.0);
    b.add_taxiway(j, sp, 100.0);
    b.add_taxiway(sp, rw, 100.0);
    b.add_gate("G1", g1);
    b.add_gate("G2", g2);
    b.add_spot("S1", sp);
    b.add_runway("09", rw, rw);
    Arc::new(b.build())
}

/// The directed link `from → to`.  Panics if there is none.
fn link(s: &Surface, from: NodeId, to: NodeId) -> LinkId {
    s.out_links(from)
        .find(|&l| s.link_endpoints(l).1 == to)
        .unwrap_or_else(|| panic!("no link {from} -> {to}"))
}

fn aircraft(id: u32, speed: f32) -> Aircraft {
    Aircraft::new(AircraftId(id), format!("TST{id}"), "A320", speed)
}

fn at_gate(id: u32, gate: u16, speed: f32) -> Aircraft {
    let mut a = aircraft(id, speed);
    a.set_location(Location::Gate(GateId(gate)));
    a
}

fn to_runway(surface: &Arc<Surface>, from: NodeId) -> Itinerary {
    let expert = RoutingExpert::dijkstra(Arc::clone(surface));
    Itinerary::new(expert.route(from, NodeId(4)).unwrap())
}

// ── Itinerary ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod itinerary {
    use super::*;

    #[test]
    fn step_moves_into_link_then_onto_node() {
        let s = surface();
        let mut it = to_runway(&s, NodeId(0));
        assert_eq!(it.next_node(&s), Some(NodeId(2)));

        // 5 m/s × 10 s = 50 m: halfway down the first link.
        let loc = it.step(&s, 5.0, 10).unwrap();
        assert!(matches!(loc, Location::Link { offset_m, .. } if (offset_m - 50.0).abs() < 1e-3));

        // Another 100 m: past the junction, 50 m toward the spot.
        let loc = it.step(&s, 10.0, 10).unwrap();
        assert!(matches!(loc, Location::Link { .. }));
        assert_eq!(it.next_node(&s), Some(NodeId(3)));
        assert!((it.travelled_m() - 150.0).abs() < 1e-3);
    }

    #[test]
    fn landing_exactly_on_spot_reports_spot() {
        let s = surface();
        let mut it = to_runway(&s, NodeId(0));
        let loc = it.step(&s, 20.0, 10).unwrap(); // 200 m
        assert!(loc.is_spot(), "got {loc}");
    }

    #[test]
    fn completes_at_end_node() {
        let s = surface();
        let mut it = to_runway(&s, NodeId(0));
        let loc = it.step(&s, 100.0, 10).unwrap(); // overshoots 300 m path
        assert_eq!(loc, Location::Node(NodeId(4)));
        assert!(it.is_completed());
        assert_eq!(it.step(&s, 100.0, 10), None);
        assert_eq!(it.next_node(&s), None);
    }

    #[test]
    fn hold_ticks_delay_movement() {
        let s = surface();
        let mut it = to_runway(&s, NodeId(0)).with_hold(2);
        assert!(!it.is_moving());
        assert_eq!(it.step(&s, 5.0, 10), None);
        assert_eq!(it.step(&s, 5.0, 10), None);
        assert!(it.is_moving());
        assert!(it.step(&s, 5.0, 10).is_some());
        assert_eq!(it.ticks_held(), 2);
    }

    #[test]
    fn zero_speed_counts_as_held() {
        let s = surface();
        let mut it = to_runway(&s, NodeId(0));
        assert_eq!(it.step(&s, 0.0, 10), None);
        assert_eq!(it.ticks_held(), 1);
    }
}

// ── Aircraft ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod aircraft {
    use super::*;

    #[test]
    fn speed_includes_bias_and_floors_at_zero() {
        let mut a = aircraft(1, 8.0);
        assert_eq!(a.speed(), 8.0);
        a.set_speed_bias(-2.5);
        assert_eq!(a.speed(), 5.5);
        a.set_speed_bias(-20.0);
        assert_eq!(a.speed(), 0.0);
        a.set_speed_bias(0.0);
        assert_eq!(a.speed(), 8.0);
    }

    #[test]
    fn tick_without_itinerary_stays_put() {
        let s = surface();
        let mut a = at_gate(1, 0, 10.0);
        a.tick(&s, 30);
        assert_eq!(a.location, Some(Location::Gate(GateId(0))));
    }

    #[test]
    fn new_aircraft_is_scheduled_and_unplaced() {
        let a = aircraft(3, 5.0);
        assert_eq!(a.state, AircraftState::Scheduled);
        assert!(a.location.is_none());
        assert_eq!(a.to_string(), "<TST3 A320>");
    }
}

// ── AirportState ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod airport_state {
    use super::*;

    #[test]
    fn add_marks_active_and_occupies_gate() {
        let mut airport = AirportState::new(surface(), 30.0);
        assert!(!airport.is_occupied_at(GateId(0)));
        airport.add_aircraft(at_gate(1, 0, 10.0)).unwrap();
        assert!(airport.is_occupied_at(GateId(0)));
        assert!(!airport.is_occupied_at(GateId(1)));
        assert_eq!(airport.aircrafts()[0].state, AircraftState::Active);
    }

    #[test]
    fn unplaced_aircraft_rejected() {
        let mut airport = AirportState::new(surface(), 30.0);
        assert!(matches!(
            airport.add_aircraft(aircraft(1, 10.0)),
            Err(AirportError::NotPlaced(AircraftId(1)))
        ));
    }

    #[test]
    fn removed_aircraft_cannot_return() {
        let mut airport = AirportState::new(surface(), 30.0);
        airport.add_aircraft(at_gate(1, 0, 10.0)).unwrap();
        let removed = airport.remove_aircraft(AircraftId(1)).unwrap();
        assert_eq!(removed.state, AircraftState::Removed);
        assert!(airport.aircrafts().is_empty());
        assert!(airport.was_admitted(AircraftId(1)));
        assert!(matches!(
            airport.add_aircraft(at_gate(1, 0, 10.0)),
            Err(AirportError::AlreadyAdmitted(AircraftId(1)))
        ));
        assert!(matches!(
            airport.remove_aircraft(AircraftId(1)),
            Err(AirportError::AircraftNotFound(_))
        ));
    }

    #[test]
    fn gate_queue_is_fifo() {
        let mut airport = AirportState::new(surface(), 30.0);
        airport.enqueue(GateId(0), aircraft(1, 10.0));
        airport.enqueue(GateId(0), aircraft(2, 10.0));
        airport.enqueue(GateId(1), aircraft(3, 10.0));
        assert_eq!(airport.queued_count(), 3);
        assert_eq!(airport.gates_with_queue(), [GateId(0), GateId(1)]);
        assert_eq!(airport.dequeue(GateId(0)).unwrap().id, AircraftId(1));
        assert_eq!(airport.dequeue(GateId(0)).unwrap().id, AircraftId(2));
        assert!(airport.dequeue(GateId(0)).is_none());
        assert_eq!(airport.gates_with_queue(), [GateId(1)]);
    }

    #[test]
    fn apply_schedule_only_touches_listed_aircraft() {
        let s = surface();
        let mut airport = AirportState::new(Arc::clone(&s), 30.0);
        airport.add_aircraft(at_gate(1, 0, 10.0)).unwrap();
        airport.add_aircraft(at_gate(2, 1, 10.0)).unwrap();

        let mut schedule = Schedule::new();
        schedule.insert(AircraftId(1), to_runway(&s, NodeId(0)));
        schedule.insert(AircraftId(9), to_runway(&s, NodeId(1)).with_hold(3));
        assert_eq!(schedule.n_holds, 1);

        assert_eq!(airport.apply_schedule(&schedule), 1);
        assert!(airport.aircraft(AircraftId(1)).unwrap().itinerary.is_some());
        assert!(airport.aircraft(AircraftId(2)).unwrap().itinerary.is_none());
    }

    #[test]
    fn tick_moves_aircraft_off_gate() {
        let s = surface();
        let mut airport = AirportState::new(Arc::clone(&s), 30.0);
        let mut a = at_gate(1, 0, 5.0);
        a.itinerary = Some(to_runway(&s, NodeId(0)));
        airport.add_aircraft(a).unwrap();

        airport.tick(10);
        assert!(!airport.is_occupied_at(GateId(0)));
        assert!(airport.conflicts().is_empty());
    }

    #[test]
    fn clone_is_independent() {
        let mut airport = AirportState::new(surface(), 30.0);
        airport.add_aircraft(at_gate(1, 0, 10.0)).unwrap();
        let mut copy = airport.clone();
        copy.remove_aircraft(AircraftId(1)).unwrap();
        copy.enqueue(GateId(1), aircraft(2, 10.0));
        assert_eq!(airport.aircrafts().len(), 1);
        assert_eq!(airport.queued_count(), 0);
    }
}

// ── Conflicts ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod conflicts {
    use super::*;
    use crate::{ConflictSite, detect_conflicts};

    #[test]
    fn converging_on_junction_conflicts() {
        let s = surface();
        let mut airport = AirportState::new(Arc::clone(&s), 30.0);
        for (id, gate) in [(1u32, 0u16), (2, 1)] {
            let mut a = at_gate(id, gate, 10.0);
            a.itinerary = Some(to_runway(&s, NodeId(gate as u32)));
            airport.add_aircraft(a).unwrap();
        }

        airport.tick(10); // both cover exactly 100 m → junction
        assert_eq!(airport.conflicts().len(), 1);
        let c = airport.conflicts()[0];
        assert_eq!(c.site, ConflictSite::Node(NodeId(2)));
        assert_eq!((c.first, c.second), (AircraftId(1), AircraftId(2)));
    }

    #[test]
    fn same_taxiway_within_separation() {
        let s = surface();
        let fwd = link(&s, NodeId(2), NodeId(3));
        let back = link(&s, NodeId(3), NodeId(2));

        let mut a = aircraft(1, 0.0);
        a.set_location(Location::Link { link: fwd, offset_m: 40.0 });
        let mut b = aircraft(2, 0.0);
        // 50 m from node 3 heading back == 50 m from node 2: 10 m gap.
        b.set_location(Location::Link { link: back, offset_m: 50.0 });

        let found = detect_conflicts(&[a.clone(), b.clone()], &s, 30.0);
        assert_eq!(found.len(), 1);
        assert!(matches!(found[0].site, ConflictSite::Taxiway { gap_m, .. } if (gap_m - 10.0).abs() < 1e-3));

        assert!(detect_conflicts(&[a, b], &s, 5.0).is_empty());
    }

    #[test]
    fn unplaced_and_distinct_nodes_do_not_conflict() {
        let s = surface();
        let found = detect_conflicts(&[at_gate(1, 0, 0.0), at_gate(2, 1, 0.0), aircraft(3, 0.0)], &s, 30.0);
        assert!(found.is_empty());
    }
}
