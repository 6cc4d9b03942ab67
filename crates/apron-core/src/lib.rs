//! `apron-core` — foundational types for the `apron` ground-traffic simulator.
//!
//! This crate is a dependency of every other `apron-*` crate.  It intentionally
//! has no `apron-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`ids`]         | `AircraftId`, `NodeId`, `LinkId`, `GateId`, `SpotId`, `RunwayId` |
//! | [`geo`]         | `GeoPoint`, haversine distance, tolerance checks          |
//! | [`time`]        | `SimTime`, `SimClock`, `ClockStep`                        |
//! | [`rng`]         | `SimRng` (seeded, clonable)                               |
//! | [`config`]      | `SimConfig`, `UncertaintyConfig`                          |
//! | [`error`]       | `CoreError`, `CoreResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types; needed for config files and checkpoints. |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{SimConfig, UncertaintyConfig};
pub use error::{CoreError, CoreResult};
pub use geo::GeoPoint;
pub use ids::{AircraftId, GateId, LinkId, NodeId, RunwayId, SpotId};
pub use rng::SimRng;
pub use time::{ClockStep, SimClock, SimTime};
