//! `apron-sim` — the tick-driven engine of the apron ground-traffic simulator.
//!
//! # Tick pipeline
//!
//! ```text
//! tick():
//!   ① Reschedule   — first tick, then every reschedule_cycle_secs: call the
//!                    Scheduler with a delegate, time it, apply the schedule.
//!   ② Uncertainty  — perturb eligible aircraft speeds (if configured).
//!   ③ Admission    — freed gates take the head of their queue; departures
//!                    appearing in [now, now + dt) are admitted or queued.
//!   ④ Physics      — AirportState::tick moves aircraft, detects conflicts.
//!   ⑤ State log    — StateLogger::log_on_tick (instrumented runs only).
//!   ⑥ Removal      — departures at their runway start are retired and
//!                    recorded as CompletedItinerary.
//!   ⑦ Clock        — advance; at the horizon finalize and return EndOfDay.
//!   ⑧ Conflicts    — any conflict aborts with SimError::Conflict.
//!   ⑨ Analytics    — Analyst::observe_on_tick (instrumented runs only).
//!
//! quiet_tick():  ③ ④ ⑥ ⑦
//! ```
//!
//! Logging and analytics are selected once at build time through
//! [`Instrumentation`]; snapshots always run without them.
//!
//! # Cargo features
//!
//! | Feature | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Adds [`Checkpoint`] and `SimBuilder::resume`.                |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use apron_sim::SimBuilder;
//!
//! let mut sim = SimBuilder::new(config, Arc::new(surface), scenario).build()?;
//! let ticks = sim.run()?;
//! println!("{} aircraft departed in {ticks} ticks", sim.completed_itineraries().len());
//! ```

pub mod builder;
pub mod delegate;
pub mod error;
pub mod observer;
pub mod record;
pub mod scheduler;
pub mod sim;
pub mod uncertainty;

#[cfg(feature = "serde")]
pub mod checkpoint;


pub use builder::SimBuilder;
pub use delegate::SimulationDelegate;
pub use error::{SimError, SimResult};
pub use observer::{Analyst, Instrumentation, NoopAnalyst, NoopStateLogger, StateLogger};
pub use record::{CompletedItinerary, TickStatus};
pub use scheduler::{
    FcfsScheduler, NoopScheduler, Scheduler, SchedulerClone, SchedulerFactory, SchedulerRegistry,
};
pub use sim::{SimState, Simulation};
pub use uncertainty::Uncertainty;

#[cfg(feature = "serde")]
pub use checkpoint::Checkpoint;
