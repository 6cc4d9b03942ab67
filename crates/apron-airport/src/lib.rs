//! `apron-airport` — aircraft, itineraries, and the live airport state.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                      |
//! |---------------|---------------------------------------------------------------|
//! | [`aircraft`]  | `Aircraft`, `AircraftState`                                   |
//! | [`itinerary`] | `Itinerary` — the path an aircraft follows, with hold ticks   |
//! | [`schedule`]  | `Schedule` — itineraries produced by a scheduler              |
//! | [`conflict`]  | `Conflict`, `ConflictSite`, `detect_conflicts`                |
//! | [`airport`]   | `AirportState` — active aircraft, gate queues, physics tick   |
//! | [`error`]     | `AirportError`, `AirportResult<T>`                            |
//!
//! # Movement model
//!
//! Each tick an aircraft with an itinerary covers `speed × tick_duration`
//! metres along its remaining links (after serving any hold ticks).  Its
//! location becomes the node it stopped on, or a point inside the current
//! link.  After every aircraft has moved, `AirportState::tick` recomputes the
//! conflict list from scratch.

pub mod aircraft;
pub mod airport;
pub mod conflict;
pub mod error;
pub mod itinerary;
pub mod schedule;

#[cfg(test)]
mod tests;

pub use aircraft::{Aircraft, AircraftState};
pub use airport::AirportState;
pub use conflict::{Conflict, ConflictSite, detect_conflicts};
pub use error::{AirportError, AirportResult};
pub use itinerary::Itinerary;
pub use schedule::Schedule;
