//! Airport surface representation and builder.
//!
//! # Data layout
//!
//! The taxiway/runway graph uses **Compressed Sparse Row (CSR)** format for
//! outgoing links.  Given a `NodeId n`, its outgoing links occupy the slice:
//!
//! ```text
//! link_from[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! All link arrays (`link_from`, `link_to`, `link_length_m`) are sorted by
//! source node and indexed by `LinkId`.
//!
//! Gates, spots and runways are named points of interest bound to nodes.  A
//! runway is entered at its `start` node; departures are retired when they
//! get there.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps `(lat, lon)` to the nearest `NodeId`.
//! [`Surface::snap`] uses it to resolve an aircraft partway along a link to
//! the node it has effectively reached.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use apron_core::{GateId, GeoPoint, LinkId, NodeId, RunwayId, SpotId};

use crate::{Location, SurfaceError, SurfaceResult};

// ── R-tree node entry ─────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
struct NodeEntry {
    point: [f32; 2], // [lat, lon]
    id:    NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    /// Squared Euclidean distance in lat/lon space.  Fine at airport scale.
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dlat = self.point[0] - point[0];
        let dlon = self.point[1] - point[1];
        dlat * dlat + dlon * dlon
    }
}

// ── Points of interest ────────────────────────────────────────────────────────

/// An aircraft stand.  At most one aircraft may occupy it at a time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Gate {
    pub name: String,
    pub node: NodeId,
}

/// A ramp/taxiway handover point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Spot {
    pub name: String,
    pub node: NodeId,
}

/// A runway, entered at `start` and left at `end`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Runway {
    pub name:  String,
    pub start: NodeId,
    pub end:   NodeId,
}

// ── Surface ───────────────────────────────────────────────────────────────────

/// Directed taxiway graph in CSR format plus points of interest and a
/// spatial index.
///
/// Immutable once built; simulations share it behind an `Arc`.  Do not
/// construct directly; use [`SurfaceBuilder`].
#[derive(Clone, Debug)]
pub struct Surface {
    /// Geographic position of each node.  Indexed by `NodeId`.
    pub node_pos: Vec<GeoPoint>,

    /// CSR row pointer.  Outgoing links of node `n` are at LinkIds
    /// `node_out_start[n] .. node_out_start[n+1]`.
    pub node_out_start: Vec<u32>,

    /// Source node of each link.
    pub link_from: Vec<NodeId>,

    /// Destination node of each link.
    pub link_to: Vec<NodeId>,

    /// Length of each link in metres.
    pub link_length_m: Vec<f32>,

    pub gates:   Vec<Gate>,
    pub spots:   Vec<Spot>,
    pub runways: Vec<Runway>,

    spatial_idx: RTree<NodeEntry>,
}

impl Surface {
    /// Construct an empty surface with no nodes or links.
    pub fn empty() -> Self {
        SurfaceBuilder::new().build()
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    pub fn link_count(&self) -> usize {
        self.link_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.node_pos.len()
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the `LinkId`s of all outgoing links from `node`.
    #[inline]
    pub fn out_links(&self, node: NodeId) -> impl Iterator<Item = LinkId> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|i| LinkId(i as u32))
    }

    #[inline]
    pub fn link_length(&self, link: LinkId) -> f32 {
        self.link_length_m[link.index()]
    }

    /// `(from, to)` of `link`.
    #[inline]
    pub fn link_endpoints(&self, link: LinkId) -> (NodeId, NodeId) {
        (self.link_from[link.index()], self.link_to[link.index()])
    }

    // ── Points of interest ────────────────────────────────────────────────

    #[inline]
    pub fn gate(&self, id: GateId) -> &Gate {
        &self.gates[id.index()]
    }

    #[inline]
    pub fn spot(&self, id: SpotId) -> &Spot {
        &self.spots[id.index()]
    }

    #[inline]
    pub fn runway(&self, id: RunwayId) -> &Runway {
        &self.runways[id.index()]
    }

    pub fn gate_by_name(&self, name: &str) -> SurfaceResult<GateId> {
        position_by_name(self.gates.iter().map(|g| g.name.as_str()), name, "gate").map(|i| GateId(i as u16))
    }

    pub fn spot_by_name(&self, name: &str) -> SurfaceResult<SpotId> {
        position_by_name(self.spots.iter().map(|s| s.name.as_str()), name, "spot").map(|i| SpotId(i as u16))
    }

    pub fn runway_by_name(&self, name: &str) -> SurfaceResult<RunwayId> {
        position_by_name(self.runways.iter().map(|r| r.name.as_str()), name, "runway").map(|i| RunwayId(i as u16))
    }

    // ── Location resolution ───────────────────────────────────────────────

    /// The node `location` sits on, or `None` for a point inside a link.
    pub fn node_at(&self, location: &Location) -> Option<NodeId> {
        match *location {
            Location::Gate(g)  => Some(self.gate(g).node),
            Location::Spot(s)  => Some(self.spot(s).node),
            Location::Node(n)  => Some(n),
            Location::Link { link, offset_m } => {
                let (from, to) = self.link_endpoints(link);
                if offset_m <= 0.0 {
                    Some(from)
                } else if offset_m >= self.link_length(link) {
                    Some(to)
                } else {
                    None
                }
            }
        }
    }

    /// The most specific location for a bare node: its gate, else its spot,
    /// else the node itself.
    pub fn location_of(&self, node: NodeId) -> Location {
        if let Some(i) = self.gates.iter().position(|g| g.node == node) {
            return Location::Gate(GateId(i as u16));
        }
        if let Some(i) = self.spots.iter().position(|s| s.node == node) {
            return Location::Spot(SpotId(i as u16));
        }
        Location::Node(node)
    }

    /// Geographic position of `location`.  Positions inside a link are
    /// interpolated linearly between its endpoints.
    pub fn position(&self, location: &Location) -> GeoPoint {
        let node = match *location {
            Location::Gate(g) => self.gate(g).node,
            Location::Spot(s) => self.spot(s).node,
            Location::Node(n) => n,
            Location::Link { link, offset_m } => {
                let (from, to) = self.link_endpoints(link);
                let len = self.link_length(link);
                let t = if len > 0.0 { offset_m / len } else { 1.0 };
                return self.node_pos[from.index()].lerp(self.node_pos[to.index()], t);
            }
        };
        self.node_pos[node.index()]
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// Return the `NodeId` of the nearest surface node to `pos`.
    ///
    /// Returns `None` only if the surface has no nodes.
    pub fn nearest_node(&self, pos: GeoPoint) -> Option<NodeId> {
        self.spatial_idx
            .nearest_neighbor(&[pos.lat, pos.lon])
            .map(|e| e.id)
    }

    /// The node `location` is at, or within `tolerance_m` of.
    ///
    /// Exact nodes resolve through [`node_at`](Self::node_at); a point inside
    /// a link snaps to its nearest node if that node is close enough.
    pub fn snap(&self, location: &Location, tolerance_m: f32) -> Option<NodeId> {
        if let Some(node) = self.node_at(location) {
            return Some(node);
        }
        let pos = self.position(location);
        self.nearest_node(pos)
            .filter(|n| self.node_pos[n.index()].is_close_to(pos, tolerance_m))
    }
}

fn position_by_name<'a>(
    mut names: impl Iterator<Item = &'a str>,
    name:      &str,
    kind:      &'static str,
) -> SurfaceResult<usize> {
    names
        .position(|n| n == name)
        .ok_or_else(|| SurfaceError::UnknownName { kind, name: name.to_owned() })
}

// ── SurfaceBuilder ────────────────────────────────────────────────────────────

/// Construct a [`Surface`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use apron_core::GeoPoint;
/// use apron_surface::SurfaceBuilder;
///
/// let mut b = SurfaceBuilder::new();
/// let stand = b.add_node(GeoPoint::new(37.6150, -122.3900));
/// let hold  = b.add_node(GeoPoint::new(37.6160, -122.3900));
/// b.add_taxiway(stand, hold, 111.0);
/// b.add_gate("A1", stand);
/// b.add_runway("28L", hold, hold);
/// let surface = b.build();
/// assert_eq!(surface.node_count(), 2);
/// assert_eq!(surface.link_count(), 2); // bidirectional
/// ```
pub struct SurfaceBuilder {
    nodes:     Vec<GeoPoint>,
    raw_links: Vec<RawLink>,
    gates:     Vec<Gate>,
    spots:     Vec<Spot>,
    runways:   Vec<Runway>,
}

struct RawLink {
    from:     NodeId,
    to:       NodeId,
    length_m: f32,
}

impl SurfaceBuilder {
    pub fn new() -> Self {
        Self {
            nodes:     Vec::new(),
            raw_links: Vec::new(),
            gates:     Vec::new(),
            spots:     Vec::new(),
            runways:   Vec::new(),
        }
    }

    /// Add a surface node and return its `NodeId` (sequential from 0).
    pub fn add_node(&mut self, pos: GeoPoint) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(pos);
        id
    }

    /// Add a **directed** link from `from` to `to`.
    pub fn add_directed_link(&mut self, from: NodeId, to: NodeId, length_m: f32) {
        self.raw_links.push(RawLink { from, to, length_m });
    }

    /// Add links in **both directions** (the common case for taxiways).
    pub fn add_taxiway(&mut self, a: NodeId, b: NodeId, length_m: f32) {
        self.add_directed_link(a, b, length_m);
        self.add_directed_link(b, a, length_m);
    }

    pub fn add_gate(&mut self, name: impl Into<String>, node: NodeId) -> GateId {
        let id = GateId(self.gates.len() as u16);
        self.gates.push(Gate { name: name.into(), node });
        id
    }

    pub fn add_spot(&mut self, name: impl Into<String>, node: NodeId) -> SpotId {
        let id = SpotId(self.spots.len() as u16);
        self.spots.push(Spot { name: name.into(), node });
        id
    }

    pub fn add_runway(&mut self, name: impl Into<String>, start: NodeId, end: NodeId) -> RunwayId {
        let id = RunwayId(self.runways.len() as u16);
        self.runways.push(Runway { name: name.into(), start, end });
        id
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn link_count(&self) -> usize { self.raw_links.len() }

    /// Consume the builder and produce a [`Surface`].
    pub fn build(self) -> Surface {
        let node_count = self.nodes.len();
        let link_count = self.raw_links.len();

        // Stable sort keeps insertion order among a node's links, so routing
        // ties resolve the same way on every run.
        let mut raw = self.raw_links;
        raw.sort_by_key(|l| l.from.0);

        let link_from:     Vec<NodeId> = raw.iter().map(|l| l.from).collect();
        let link_to:       Vec<NodeId> = raw.iter().map(|l| l.to).collect();
        let link_length_m: Vec<f32>    = raw.iter().map(|l| l.length_m).collect();

        let mut node_out_start = vec![0u32; node_count + 1];
        for l in &raw {
            node_out_start[l.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, link_count);

        let entries: Vec<NodeEntry> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, &pos)| NodeEntry {
                point: [pos.lat, pos.lon],
                id:    NodeId(i as u32),
            })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        Surface {
            node_pos: self.nodes,
            node_out_start,
            link_from,
            link_to,
            link_length_m,
            gates: self.gates,
            spots: self.spots,
            runways: self.runways,
            spatial_idx,
        }
    }
}

impl Default for SurfaceBuilder {
    fn default() -> Self {
        Self::new()
    }
}
