//! CSV output backend.
//!
//! [`CsvStateLog`] creates `aircraft_states.csv`; [`CsvAnalysis`] creates
//! `tick_summaries.csv`, `reschedules.csv` and `itineraries.csv`.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::{AnalysisWriter, StateWriter};
use crate::{AircraftStateRow, ItineraryRow, OutputResult, RescheduleRow, TickSummaryRow};

/// Writes one row per active aircraft per tick.
pub struct CsvStateLog {
    states:   Writer<File>,
    finished: bool,
}

impl CsvStateLog {
    /// Create `aircraft_states.csv` in `dir` and write the header row.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut states = Writer::from_path(dir.join("aircraft_states.csv"))?;
        states.write_record([
            "time_secs", "aircraft_id", "callsign", "location", "lat", "lon",
            "speed_mps", "speed_bias_mps", "holding",
        ])?;
        Ok(Self { states, finished: false })
    }
}

impl StateWriter for CsvStateLog {
    fn write_states(&mut self, rows: &[AircraftStateRow]) -> OutputResult<()> {
        for row in rows {
            self.states.write_record(&[
                row.time_secs.to_string(),
                row.aircraft_id.to_string(),
                row.callsign.clone(),
                row.location.clone(),
                row.lat.to_string(),
                row.lon.to_string(),
                row.speed_mps.to_string(),
                row.speed_bias_mps.to_string(),
                (row.holding as u8).to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.states.flush()?;
        Ok(())
    }
}

/// Writes run statistics to three CSV files.
pub struct CsvAnalysis {
    summaries:   Writer<File>,
    reschedules: Writer<File>,
    itineraries: Writer<File>,
    finished:    bool,
}

impl CsvAnalysis {
    /// Open (or create) the three CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(["time_secs", "active", "queued", "completed"])?;

        let mut reschedules = Writer::from_path(dir.join("reschedules.csv"))?;
        reschedules.write_record(["time_secs", "exec_ms", "itineraries", "holds"])?;

        let mut itineraries = Writer::from_path(dir.join("itineraries.csv"))?;
        itineraries.write_record([
            "aircraft_id", "callsign", "appear_secs", "removal_secs", "travelled_m", "ticks_held",
        ])?;

        Ok(Self { summaries, reschedules, itineraries, finished: false })
    }
}

impl AnalysisWriter for CsvAnalysis {
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.time_secs.to_string(),
            row.active.to_string(),
            row.queued.to_string(),
            row.completed.to_string(),
        ])?;
        Ok(())
    }

    fn write_reschedule(&mut self, row: &RescheduleRow) -> OutputResult<()> {
        self.reschedules.write_record(&[
            row.time_secs.to_string(),
            format!("{:.3}", row.exec_ms),
            row.itineraries.to_string(),
            row.holds.to_string(),
        ])?;
        Ok(())
    }

    fn write_itineraries(&mut self, rows: &[ItineraryRow]) -> OutputResult<()> {
        for row in rows {
            self.itineraries.write_record(&[
                row.aircraft_id.to_string(),
                row.callsign.clone(),
                row.appear_secs.to_string(),
                row.removal_secs.to_string(),
                row.travelled_m.to_string(),
                row.ticks_held.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.summaries.flush()?;
        self.reschedules.flush()?;
        self.itineraries.flush()?;
        Ok(())
    }
}
