//! Routing trait, default Dijkstra implementation, and the routing expert.
//!
//! # Pluggability
//!
//! Schedulers ask for paths through [`RoutingExpert`], which pairs the shared
//! [`Surface`] with any [`Router`].  The default [`DijkstraRouter`] minimises
//! taxi distance.
//!
//! # Cost units
//!
//! Costs are link lengths in **centimetres** (u32) inside the search so that
//! tie-breaking is exact; `Route` exposes the total in metres.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt;
use std::sync::Arc;

use apron_core::{LinkId, NodeId};

use crate::surface::Surface;
use crate::{SurfaceError, SurfaceResult};

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a routing query: an ordered list of links and their total
/// length.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    /// Links to traverse in order, from source to destination.
    pub links: Vec<LinkId>,
    /// Total length in metres.
    pub length_m: f32,
}

impl Route {
    /// `true` if the source and destination are the same node.
    pub fn is_trivial(&self) -> bool {
        self.links.is_empty()
    }

    /// Append `other`, which must start where `self` ends.
    pub fn extend(&mut self, other: Route) {
        self.links.extend(other.links);
        self.length_m += other.length_m;
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable path-finding over a [`Surface`].
pub trait Router: Send + Sync {
    /// Compute a route from `from` to `to`.
    ///
    /// `from == to` yields an empty route rather than an error.
    fn route(&self, surface: &Surface, from: NodeId, to: NodeId) -> SurfaceResult<Route>;
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Standard Dijkstra's algorithm over the CSR surface graph, by link length.
#[derive(Clone, Copy, Debug, Default)]
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn route(&self, surface: &Surface, from: NodeId, to: NodeId) -> SurfaceResult<Route> {
        dijkstra(surface, from, to)
    }
}

#[inline]
fn link_cost_cm(surface: &Surface, link: LinkId) -> u32 {
    (surface.link_length_m[link.index()].max(0.0) * 100.0).round() as u32
}

fn dijkstra(surface: &Surface, from: NodeId, to: NodeId) -> SurfaceResult<Route> {
    if !surface.contains(from) {
        return Err(SurfaceError::NodeNotFound(from));
    }
    if !surface.contains(to) {
        return Err(SurfaceError::NodeNotFound(to));
    }
    if from == to {
        return Ok(Route { links: vec![], length_m: 0.0 });
    }

    let n = surface.node_count();
    let mut dist      = vec![u32::MAX; n];
    let mut prev_link = vec![LinkId::INVALID; n];

    dist[from.index()] = 0;

    // Secondary key NodeId ensures deterministic tie-breaking.
    let mut heap: BinaryHeap<Reverse<(u32, NodeId)>> = BinaryHeap::new();
    heap.push(Reverse((0, from)));

    while let Some(Reverse((cost, node))) = heap.pop() {
        if node == to {
            return Ok(reconstruct(surface, &prev_link, to));
        }

        // Skip stale heap entries.
        if cost > dist[node.index()] {
            continue;
        }

        for link in surface.out_links(node) {
            let neighbor = surface.link_to[link.index()];
            let new_cost = cost.saturating_add(link_cost_cm(surface, link));

            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                prev_link[neighbor.index()] = link;
                heap.push(Reverse((new_cost, neighbor)));
            }
        }
    }

    Err(SurfaceError::NoRoute { from, to })
}

fn reconstruct(surface: &Surface, prev_link: &[LinkId], to: NodeId) -> Route {
    let mut links = Vec::new();
    let mut cur = to;
    loop {
        let l = prev_link[cur.index()];
        if l == LinkId::INVALID {
            break;
        }
        links.push(l);
        cur = surface.link_from[l.index()];
    }
    links.reverse();
    let length_m = links.iter().map(|&l| surface.link_length(l)).sum();
    Route { links, length_m }
}

// ── RoutingExpert ─────────────────────────────────────────────────────────────

/// Answers path queries on one airport surface.
///
/// Cheap to clone: both the surface and the router are shared and immutable.
#[derive(Clone)]
pub struct RoutingExpert {
    surface: Arc<Surface>,
    router:  Arc<dyn Router>,
}

impl RoutingExpert {
    pub fn new(surface: Arc<Surface>, router: Arc<dyn Router>) -> Self {
        Self { surface, router }
    }

    /// Routing expert using [`DijkstraRouter`].
    pub fn dijkstra(surface: Arc<Surface>) -> Self {
        Self::new(surface, Arc::new(DijkstraRouter))
    }

    pub fn surface(&self) -> &Arc<Surface> {
        &self.surface
    }

    pub fn route(&self, from: NodeId, to: NodeId) -> SurfaceResult<Route> {
        self.router.route(&self.surface, from, to)
    }

    /// Route through every node of `waypoints` in order.
    pub fn route_via(&self, waypoints: &[NodeId]) -> SurfaceResult<Route> {
        let mut route = Route { links: vec![], length_m: 0.0 };
        for pair in waypoints.windows(2) {
            route.extend(self.route(pair[0], pair[1])?);
        }
        Ok(route)
    }
}

impl fmt::Debug for RoutingExpert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoutingExpert")
            .field("nodes", &self.surface.node_count())
            .field("links", &self.surface.link_count())
            .finish()
    }
}
