//! Analytics and state-logging hooks, and the instrumentation that drives
//! them.

use apron_airport::Schedule;

use crate::{SimResult, SimulationDelegate};

/// Collects statistics over a run.
///
/// Observation methods have no return value: implementations keep the first
/// error they hit and report it from [`save`](Self::save), which the engine
/// calls once at end of day.
///
/// # Example: completion counter
///
/// ```rust,ignore
/// struct Completions(usize);
///
/// impl Analyst for Completions {
///     fn observe_on_tick(&mut self, sim: &SimulationDelegate<'_>) {
///         self.0 = sim.completed_itineraries().len();
///     }
/// }
/// ```
pub trait Analyst {
    /// Called at the end of every full tick that did not fail.
    fn observe_on_tick(&mut self, _sim: &SimulationDelegate<'_>) {}

    /// Called right after a schedule has been applied.
    fn observe_on_reschedule(&mut self, _schedule: &Schedule, _sim: &SimulationDelegate<'_>) {}

    /// Flush collected statistics.
    fn save(&mut self) -> SimResult<()> {
        Ok(())
    }
}

/// Persists the per-tick airport state.  Same error contract as [`Analyst`].
pub trait StateLogger {
    /// Called after the physics tick, before departed aircraft are removed.
    fn log_on_tick(&mut self, _sim: &SimulationDelegate<'_>) {}

    fn save(&mut self) -> SimResult<()> {
        Ok(())
    }
}

/// An [`Analyst`] that does nothing.
pub struct NoopAnalyst;

impl Analyst for NoopAnalyst {}

/// A [`StateLogger`] that does nothing.
pub struct NoopStateLogger;

impl StateLogger for NoopStateLogger {}

// ── Instrumentation ───────────────────────────────────────────────────────────

/// The optional analytics and logging stages of the tick pipeline.
///
/// Chosen once when the engine is built.  Snapshots always run `Off`.
pub enum Instrumentation {
    Off,
    On {
        analyst:      Box<dyn Analyst>,
        state_logger: Box<dyn StateLogger>,
    },
}

impl Instrumentation {
    pub fn new(analyst: Box<dyn Analyst>, state_logger: Box<dyn StateLogger>) -> Self {
        Instrumentation::On { analyst, state_logger }
    }

    #[inline]
    pub fn is_on(&self) -> bool {
        matches!(self, Instrumentation::On { .. })
    }

    pub(crate) fn on_reschedule(&mut self, schedule: &Schedule, sim: &SimulationDelegate<'_>) {
        if let Instrumentation::On { analyst, .. } = self {
            analyst.observe_on_reschedule(schedule, sim);
        }
    }

    pub(crate) fn log_tick(&mut self, sim: &SimulationDelegate<'_>) {
        if let Instrumentation::On { state_logger, .. } = self {
            state_logger.log_on_tick(sim);
        }
    }

    pub(crate) fn observe_tick(&mut self, sim: &SimulationDelegate<'_>) {
        if let Instrumentation::On { analyst, .. } = self {
            analyst.observe_on_tick(sim);
        }
    }

    /// Save analytics, then the state log.  Both are attempted; the first
    /// error is returned.
    pub(crate) fn finalize(&mut self) -> SimResult<()> {
        match self {
            Instrumentation::Off => Ok(()),
            Instrumentation::On { analyst, state_logger } => {
                let analysed = analyst.save();
                let logged = state_logger.save();
                analysed.and(logged)
            }
        }
    }
}

impl std::fmt::Debug for Instrumentation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(if self.is_on() { "Instrumentation::On" } else { "Instrumentation::Off" })
    }
}
