//! Synthetic four-gate apron with two spots feeding one runway.
//!
//! ```text
//!   G1   G2        G3   G4
//!     \ /            \ /
//!     J1 ─────────── J2
//!     |              |
//!     S1             S2
//!       \          /
//!        R ═══════════ RE     runway 28L
//! ```

use anyhow::Result;

use apron_airport::Aircraft;
use apron_core::{AircraftId, GeoPoint, SimTime};
use apron_scenario::{ArrivalFlight, DepartureFlight, Scenario, ScenarioBuilder};
use apron_surface::{Surface, SurfaceBuilder};

const FIRST_DEPARTURE:  (u64, u64) = (6, 10);
const DEPARTURE_COUNT:  u64 = 55;
const DEPARTURE_GAP:    u64 = 4 * 60;
const APPEAR_LEAD:      u64 = 20 * 60;
const GATES:            [&str; 4] = ["G1", "G2", "G3", "G4"];
const MODELS:           [(&str, f32); 3] = [("A320", 10.0), ("B738", 9.0), ("E175", 11.0)];

pub fn build_surface() -> Surface {
    let mut b = SurfaceBuilder::new();

    let g1 = b.add_node(GeoPoint::new(37.6160, -122.3900));
    let g2 = b.add_node(GeoPoint::new(37.6160, -122.3880));
    let g3 = b.add_node(GeoPoint::new(37.6160, -122.3840));
    let g4 = b.add_node(GeoPoint::new(37.6160, -122.3820));
    let j1 = b.add_node(GeoPoint::new(37.6145, -122.3890));
    let j2 = b.add_node(GeoPoint::new(37.6145, -122.3830));
    let s1 = b.add_node(GeoPoint::new(37.6130, -122.3890));
    let s2 = b.add_node(GeoPoint::new(37.6130, -122.3830));
    let rw = b.add_node(GeoPoint::new(37.6115, -122.3860));
    let re = b.add_node(GeoPoint::new(37.6115, -122.3760));

    for (gate, junction) in [(g1, j1), (g2, j1), (g3, j2), (g4, j2)] {
        b.add_taxiway(gate, junction, 190.0);
    }
    b.add_taxiway(j1, j2, 530.0);
    b.add_taxiway(j1, s1, 170.0);
    b.add_taxiway(j2, s2, 170.0);
    b.add_taxiway(s1, rw, 312.0);
    b.add_taxiway(s2, rw, 312.0);
    b.add_directed_link(rw, re, 880.0);

    for (name, node) in GATES.into_iter().zip([g1, g2, g3, g4]) {
        b.add_gate(name, node);
    }
    b.add_spot("S1", s1);
    b.add_spot("S2", s2);
    b.add_runway("28L", rw, re);
    b.build()
}

/// A departure every four minutes from 06:10, rotating through the gates,
/// plus a few inbound flights.
pub fn build_scenario(surface: &Surface) -> Result<Scenario> {
    let runway = surface.runway_by_name("28L")?;
    let first = SimTime::from_hms(FIRST_DEPARTURE.0, FIRST_DEPARTURE.1, 0);
    let opening = SimTime::from_hms(6, 0, 0);

    let mut builder = ScenarioBuilder::new();
    for i in 0..DEPARTURE_COUNT {
        let gate_name = GATES[i as usize % GATES.len()];
        // G1/G2 push back towards S1, G3/G4 towards S2.
        let spot_name = if i as usize % GATES.len() < 2 { "S1" } else { "S2" };
        let (model, speed) = MODELS[i as usize % MODELS.len()];
        let departure_time = first.offset(i * DEPARTURE_GAP);
        let appear_time = SimTime(departure_time.0.saturating_sub(APPEAR_LEAD)).max(opening);

        builder = builder.departure(DepartureFlight {
            aircraft:       Aircraft::new(AircraftId(i as u32), format!("UAL{}", 100 + i), model, speed),
            to_airport:     "LAX".into(),
            from_gate:      surface.gate_by_name(gate_name)?,
            spot:           surface.spot_by_name(spot_name)?,
            runway,
            departure_time,
            appear_time,
        });
    }

    for (k, (gate_name, hh, mm)) in [("G2", 7, 30), ("G4", 9, 15), ("G1", 11, 0)].into_iter().enumerate() {
        let id = AircraftId((DEPARTURE_COUNT as usize + k) as u32);
        let arrival_time = SimTime::from_hms(hh, mm, 0);
        builder = builder.arrival(ArrivalFlight {
            aircraft:     Aircraft::new(id, format!("SWA{}", 700 + k), "B737", 10.0),
            from_airport: "SEA".into(),
            to_gate:      surface.gate_by_name(gate_name)?,
            spot:         surface.spot_by_name("S1")?,
            runway,
            arrival_time,
            appear_time:  arrival_time,
        });
    }

    Ok(builder.build()?)
}
