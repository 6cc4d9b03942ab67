//! Conflict detection between aircraft on the surface.

use std::collections::BTreeMap;
use std::fmt;

use apron_core::{AircraftId, NodeId};
use apron_surface::{Location, Surface};

use crate::Aircraft;

/// Where two aircraft came too close.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConflictSite {
    /// Both aircraft resolve to the same node (gate, spot, intersection).
    Node(NodeId),
    /// Both aircraft are on the taxiway between `a` and `b` (either
    /// direction) and closer than the separation minimum.
    Taxiway { a: NodeId, b: NodeId, gap_m: f32 },
}

/// A pair of aircraft violating separation after a physics tick.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Conflict {
    pub first:  AircraftId,
    pub second: AircraftId,
    pub site:   ConflictSite,
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.site {
            ConflictSite::Node(n) => write!(f, "{} and {} at {}", self.first, self.second, n),
            ConflictSite::Taxiway { a, b, gap_m } => write!(
                f,
                "{} and {} {:.1} m apart between {} and {}",
                self.first, self.second, gap_m, a, b
            ),
        }
    }
}

/// Find every separation violation among `aircrafts`.
///
/// Aircraft without a location are ignored.  Node occupants are grouped in a
/// `NodeId → Vec<AircraftId>` index; link occupants are grouped by the
/// undirected taxiway they are on, with offsets measured from the
/// lower-numbered endpoint so opposite-direction traffic is compared too.
/// Output order is deterministic (by node / taxiway, then position).
pub fn detect_conflicts(aircrafts: &[Aircraft], surface: &Surface, separation_m: f32) -> Vec<Conflict> {
    let mut at_node: BTreeMap<NodeId, Vec<AircraftId>> = BTreeMap::new();
    let mut on_taxiway: BTreeMap<(NodeId, NodeId), Vec<(f32, AircraftId)>> = BTreeMap::new();

    for aircraft in aircrafts {
        let Some(location) = aircraft.location.as_ref() else {
            continue;
        };
        if let Some(node) = surface.node_at(location) {
            at_node.entry(node).or_default().push(aircraft.id);
            continue;
        }
        if let Location::Link { link, offset_m } = *location {
            let (from, to) = surface.link_endpoints(link);
            let len = surface.link_length(link);
            let (key, pos) = if from <= to {
                ((from, to), offset_m)
            } else {
                ((to, from), len - offset_m)
            };
            on_taxiway.entry(key).or_default().push((pos, aircraft.id));
        }
    }

    let mut conflicts = Vec::new();

    for (node, ids) in &at_node {
        for pair in ids.windows(2) {
            conflicts.push(Conflict {
                first:  pair[0],
                second: pair[1],
                site:   ConflictSite::Node(*node),
            });
        }
    }

    for ((a, b), mut occupants) in on_taxiway {
        occupants.sort_by(|x, y| x.0.total_cmp(&y.0));
        for pair in occupants.windows(2) {
            let gap_m = pair[1].0 - pair[0].0;
            if gap_m < separation_m {
                conflicts.push(Conflict {
                    first:  pair[0].1,
                    second: pair[1].1,
                    site:   ConflictSite::Taxiway { a, b, gap_m },
                });
            }
        }
    }

    conflicts
}
