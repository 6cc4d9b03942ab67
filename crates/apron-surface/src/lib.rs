//! `apron-surface` — airport surface graph, spatial indexing, and routing.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`surface`]  | `Surface` (CSR + R-tree), `SurfaceBuilder`, gates/spots/runways |
//! | [`location`] | `Location` — where an aircraft currently is                  |
//! | [`router`]   | `Router` trait, `Route`, `DijkstraRouter`, `RoutingExpert`   |
//! | [`error`]    | `SurfaceError`, `SurfaceResult<T>`                           |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `Location` and `Route`. |

pub mod error;
pub mod location;
pub mod router;
pub mod surface;


pub use error::{SurfaceError, SurfaceResult};
pub use location::Location;
pub use router::{DijkstraRouter, Route, Router, RoutingExpert};
pub use surface::{Gate, Runway, Spot, Surface, SurfaceBuilder};
