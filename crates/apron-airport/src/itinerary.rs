//! The path an aircraft follows across the surface.

use apron_core::{LinkId, NodeId};
use apron_surface::{Location, Route, Surface};

/// An ordered list of links to traverse plus the aircraft's progress along
/// them.
///
/// A scheduler may prepend `hold_ticks`: the aircraft stays put for that many
/// ticks before moving.  Held ticks are counted so analytics can report the
/// delay an itinerary accumulated.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Itinerary {
    links:      Vec<LinkId>,
    /// Index of the link currently being traversed.  `== links.len()` once
    /// the itinerary is complete.
    cursor:     usize,
    /// Metres covered on `links[cursor]`.
    offset_m:   f32,
    hold_ticks: u32,
    ticks_held: u32,
    travelled_m: f32,
}

impl Itinerary {
    pub fn new(route: Route) -> Self {
        Self {
            links:       route.links,
            cursor:      0,
            offset_m:    0.0,
            hold_ticks:  0,
            ticks_held:  0,
            travelled_m: 0.0,
        }
    }

    /// Hold for `ticks` ticks before starting to move.
    pub fn with_hold(mut self, ticks: u32) -> Self {
        self.hold_ticks = ticks;
        self
    }

    #[inline]
    pub fn links(&self) -> &[LinkId] {
        &self.links
    }

    #[inline]
    pub fn is_completed(&self) -> bool {
        self.cursor >= self.links.len()
    }

    /// Remaining hold ticks before the aircraft starts moving.
    #[inline]
    pub fn hold_remaining(&self) -> u32 {
        self.hold_ticks
    }

    /// `true` if the aircraft will move on its next tick (given speed > 0).
    #[inline]
    pub fn is_moving(&self) -> bool {
        self.hold_ticks == 0 && !self.is_completed()
    }

    /// Ticks spent holding or stopped so far.
    #[inline]
    pub fn ticks_held(&self) -> u32 {
        self.ticks_held
    }

    #[inline]
    pub fn travelled_m(&self) -> f32 {
        self.travelled_m
    }

    /// The node the aircraft is heading to, or `None` once complete.
    pub fn next_node(&self, surface: &Surface) -> Option<NodeId> {
        self.links.get(self.cursor).map(|&l| surface.link_endpoints(l).1)
    }

    /// Advance one tick at `speed_mps`.
    ///
    /// Returns the new location if the aircraft moved, `None` if it held,
    /// stood still, or had nothing left to traverse.
    pub fn step(&mut self, surface: &Surface, speed_mps: f32, dt_secs: u32) -> Option<Location> {
        if self.hold_ticks > 0 {
            self.hold_ticks -= 1;
            self.ticks_held += 1;
            return None;
        }
        if self.is_completed() {
            return None;
        }

        let mut remaining = speed_mps.max(0.0) * dt_secs as f32;
        if remaining <= 0.0 {
            self.ticks_held += 1;
            return None;
        }

        while remaining > 0.0 && !self.is_completed() {
            let left = surface.link_length(self.links[self.cursor]) - self.offset_m;
            if remaining >= left {
                remaining -= left;
                self.travelled_m += left;
                self.cursor += 1;
                self.offset_m = 0.0;
            } else {
                self.offset_m += remaining;
                self.travelled_m += remaining;
                remaining = 0.0;
            }
        }

        Some(self.location(surface))
    }

    /// Current location implied by the cursor and offset.
    fn location(&self, surface: &Surface) -> Location {
        if self.is_completed() {
            // `step` only reaches here after traversing at least one link.
            let (_, to) = surface.link_endpoints(self.links[self.links.len() - 1]);
            return surface.location_of(to);
        }
        let link = self.links[self.cursor];
        if self.offset_m <= 0.0 {
            surface.location_of(surface.link_endpoints(link).0)
        } else {
            Location::Link { link, offset_m: self.offset_m }
        }
    }
}
