//! `apron-output` — CSV output for the apron simulator.
//!
//! | Type           | Engine hook   | Files created                                          |
//! |----------------|---------------|--------------------------------------------------------|
//! | [`CsvStateLog`]| `StateLogger` | `aircraft_states.csv`                                  |
//! | [`CsvAnalysis`]| `Analyst`     | `tick_summaries.csv`, `reschedules.csv`, `itineraries.csv` |
//!
//! Backends implement [`StateWriter`] / [`AnalysisWriter`] and are driven by
//! [`StateLog`] / [`Analysis`], which plug into `apron_sim::SimBuilder`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use apron_output::{Analysis, CsvAnalysis, CsvStateLog, StateLog};
//!
//! let mut sim = SimBuilder::new(config, surface, scenario)
//!     .analyst(Box::new(Analysis::new(CsvAnalysis::new(dir)?)))
//!     .state_logger(Box::new(StateLog::new(CsvStateLog::new(dir)?)))
//!     .build()?;
//! sim.run()?; // write errors surface here, from the end-of-day save
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::{CsvAnalysis, CsvStateLog};
pub use error::{OutputError, OutputResult};
pub use observer::{Analysis, StateLog};
pub use row::{AircraftStateRow, ItineraryRow, RescheduleRow, TickSummaryRow};
pub use writer::{AnalysisWriter, StateWriter};
