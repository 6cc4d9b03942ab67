//! Where an aircraft is on the surface.

use std::fmt;

use apron_core::{GateId, LinkId, NodeId, SpotId};

/// The current location of an aircraft.
///
/// Gate and spot locations are kept distinct from plain nodes so eligibility
/// checks ("is this aircraft at a gate?") need no surface lookup.  Use
/// [`Surface::node_at`][crate::Surface::node_at] and
/// [`Surface::position`][crate::Surface::position] to resolve them.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Location {
    Gate(GateId),
    Spot(SpotId),
    Node(NodeId),
    /// `offset_m` metres along `link` from its source node.
    Link { link: LinkId, offset_m: f32 },
}

impl Location {
    #[inline]
    pub fn is_gate(&self) -> bool {
        matches!(self, Location::Gate(_))
    }

    #[inline]
    pub fn is_spot(&self) -> bool {
        matches!(self, Location::Spot(_))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Gate(g) => write!(f, "{g}"),
            Location::Spot(s) => write!(f, "{s}"),
            Location::Node(n) => write!(f, "{n}"),
            Location::Link { link, offset_m } => write!(f, "{link}+{offset_m:.1}m"),
        }
    }
}
