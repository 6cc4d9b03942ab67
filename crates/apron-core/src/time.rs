//! Simulation time model.
//!
//! # Design
//!
//! Simulated time is an integer count of seconds since midnight of the
//! simulated day (`SimTime`).  The clock advances by a fixed tick duration
//! and refuses to step past a configured horizon:
//!
//! ```text
//! advance():  next = now + tick_duration
//!             next >  horizon  →  ClockStep::EndOfDay   (now unchanged)
//!             next <= horizon  →  ClockStep::Advanced(next)
//! ```
//!
//! Reaching the horizon is the normal end of a run, so it is reported as a
//! value rather than an error.  Integer seconds keep every window comparison
//! exact.

use std::fmt;

// ── SimTime ───────────────────────────────────────────────────────────────────

/// An absolute simulated instant, in seconds since the start of the day.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub u64);

impl SimTime {
    pub const MIDNIGHT: SimTime = SimTime(0);

    /// Build a time from hour/minute/second components.
    #[inline]
    pub fn from_hms(hours: u64, minutes: u64, seconds: u64) -> SimTime {
        SimTime(hours * 3_600 + minutes * 60 + seconds)
    }

    /// Return the instant `secs` seconds after `self`.
    #[inline]
    pub fn offset(self, secs: u64) -> SimTime {
        SimTime(self.0 + secs)
    }

    /// Seconds elapsed from `earlier` to `self`, saturating at zero.
    #[inline]
    pub fn since(self, earlier: SimTime) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// `(hours, minutes, seconds)` components for display.
    pub fn hms(self) -> (u64, u64, u64) {
        (self.0 / 3_600, (self.0 % 3_600) / 60, self.0 % 60)
    }
}

impl std::ops::Add<u64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: u64) -> SimTime {
        SimTime(self.0 + rhs)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (h, m, s) = self.hms();
        write!(f, "{h:02}:{m:02}:{s:02}")
    }
}

// ── ClockStep ─────────────────────────────────────────────────────────────────

/// Outcome of [`SimClock::advance`].
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ClockStep {
    /// The clock moved forward; carries the new current time.
    Advanced(SimTime),
    /// The next step would pass the horizon: the simulated day is over.
    EndOfDay,
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Owns the current simulated time and the fixed tick duration.
///
/// Fields are private: `advance()` is the only way to move time, which keeps
/// the clock monotonic.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    now:                SimTime,
    tick_duration_secs: u32,
    horizon:            SimTime,
}

impl SimClock {
    /// Create a clock at `start` stepping `tick_duration_secs` at a time until
    /// `horizon` (inclusive).
    pub fn new(start: SimTime, tick_duration_secs: u32, horizon: SimTime) -> Self {
        Self { now: start, tick_duration_secs, horizon }
    }

    /// Current simulated time.
    #[inline]
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Fixed duration of one tick, in seconds.
    #[inline]
    pub fn tick_duration(&self) -> u32 {
        self.tick_duration_secs
    }

    /// Last instant the clock may reach.
    #[inline]
    pub fn horizon(&self) -> SimTime {
        self.horizon
    }

    /// The instant one tick after `now`.  Admission windows are
    /// `[now, next_tick_time)`.
    #[inline]
    pub fn next_tick_time(&self) -> SimTime {
        self.now.offset(self.tick_duration_secs as u64)
    }

    /// Advance by one tick, or report the end of the simulated day.
    pub fn advance(&mut self) -> ClockStep {
        let next = self.next_tick_time();
        if next > self.horizon {
            return ClockStep::EndOfDay;
        }
        self.now = next;
        ClockStep::Advanced(next)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (+{}s, until {})", self.now, self.tick_duration_secs, self.horizon)
    }
}
