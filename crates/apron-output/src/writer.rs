//! Backend traits driven by the observers in [`crate::observer`].

use crate::{AircraftStateRow, ItineraryRow, OutputResult, RescheduleRow, TickSummaryRow};

/// Sink for per-tick aircraft states.
pub trait StateWriter {
    fn write_states(&mut self, rows: &[AircraftStateRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}

/// Sink for run statistics.
pub trait AnalysisWriter {
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    fn write_reschedule(&mut self, row: &RescheduleRow) -> OutputResult<()>;

    fn write_itineraries(&mut self, rows: &[ItineraryRow]) -> OutputResult<()>;

    /// Idempotent, like [`StateWriter::finish`].
    fn finish(&mut self) -> OutputResult<()>;
}
