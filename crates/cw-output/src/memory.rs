//! In-memory trace backend.

use crate::writer::TraceWriter;
use crate::{EventRow, OutputResult, TickRow};

/// Keeps every row in memory.  Never fails.
#[derive(Debug, Default)]
pub struct MemoryTraceWriter {
    pub events:   Vec<EventRow>,
    pub ticks:    Vec<TickRow>,
    pub finished: bool,
}

impl MemoryTraceWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events recorded for one vehicle, in order.
    pub fn events_for<'a>(&'a self, vehicle: &'a str) -> impl Iterator<Item = &'a EventRow> + 'a {
        self.events.iter().filter(move |r| r.vehicle == vehicle)
    }
}

impl TraceWriter for MemoryTraceWriter {
    fn write_event(&mut self, row: &EventRow) -> OutputResult<()> {
        self.events.push(row.clone());
        Ok(())
    }

    fn write_tick(&mut self, row: &TickRow) -> OutputResult<()> {
        self.ticks.push(*row);
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.finished = true;
        Ok(())
    }
}
