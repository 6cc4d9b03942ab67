//! `apron-scenario` — the flight schedule a simulated day replays.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`flight`]   | `Flight`, `DepartureFlight`, `ArrivalFlight`               |
//! | [`scenario`] | `Scenario` (flights by appear time + lookup), `ScenarioBuilder` |
//! | [`error`]    | `ScenarioError`, `ScenarioResult<T>`                       |
//!
//! Each flight owns the aircraft it will put on the surface, created in the
//! `Scheduled` state.  The engine clones that aircraft when the flight's
//! appear time arrives; the scenario itself never changes after `build()`.

pub mod error;
pub mod flight;
pub mod scenario;


pub use error::{ScenarioError, ScenarioResult};
pub use flight::{ArrivalFlight, DepartureFlight, Flight};
pub use scenario::{Scenario, ScenarioBuilder};
