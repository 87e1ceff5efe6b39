//! CSV trace backend.
//!
//! Creates two files in the configured directory:
//! - `events.csv`
//! - `ticks.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::TraceWriter;
use crate::{EventRow, OutputResult, TickRow};

pub const EVENT_HEADER: [&str; 6] = ["tick", "vehicle", "op", "outcome", "segment", "lane"];
pub const TICK_HEADER: [&str; 4] = ["tick", "decremented", "reached_zero", "resumed"];

/// Writes a road trace to two CSV files.
pub struct CsvTraceWriter {
    events:   Writer<File>,
    ticks:    Writer<File>,
    finished: bool,
}

impl CsvTraceWriter {
    /// Create (or truncate) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut events = Writer::from_path(dir.join("events.csv"))?;
        events.write_record(EVENT_HEADER)?;

        let mut ticks = Writer::from_path(dir.join("ticks.csv"))?;
        ticks.write_record(TICK_HEADER)?;

        Ok(Self { events, ticks, finished: false })
    }
}

fn opt(v: Option<usize>) -> String {
    v.map(|n| n.to_string()).unwrap_or_default()
}

impl TraceWriter for CsvTraceWriter {
    fn write_event(&mut self, row: &EventRow) -> OutputResult<()> {
        self.events.write_record(&[
            row.tick.to_string(),
            row.vehicle.clone(),
            row.op.to_string(),
            row.outcome.clone(),
            opt(row.segment),
            opt(row.lane),
        ])?;
        Ok(())
    }

    fn write_tick(&mut self, row: &TickRow) -> OutputResult<()> {
        self.ticks.write_record(&[
            row.tick.to_string(),
            row.decremented.to_string(),
            row.reached_zero.to_string(),
            row.resumed.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.events.flush()?;
        self.ticks.flush()?;
        Ok(())
    }
}
