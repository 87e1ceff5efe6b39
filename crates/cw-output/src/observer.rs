//! `TraceObserver<W>` — bridges `RoadObserver` to a `TraceWriter`.

use cw_coord::{RoadEvent, RoadObserver, TickReport};
use cw_core::RoadClock;
use log::{info, warn};

use crate::row::{EventRow, TickRow};
use crate::writer::TraceWriter;
use crate::{OutputError, OutputResult};

/// A [`RoadObserver`] that writes every event and tick report to any
/// [`TraceWriter`] backend.
///
/// Observer callbacks have no return value, so writer errors are stored.
/// Once the road is dropped (which finishes the writer), check with
/// [`take_error`][Self::take_error].
pub struct TraceObserver<W: TraceWriter> {
    writer:     W,
    events:     u64,
    last_error: Option<OutputError>,
}

impl<W: TraceWriter> TraceObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, events: 0, last_error: None }
    }

    /// Take the stored write error, if any.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                warn!("trace output failed, later rows may be missing: {e}");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: TraceWriter> RoadObserver for TraceObserver<W> {
    fn on_event(&mut self, event: &RoadEvent) {
        self.events += 1;
        let result = self.writer.write_event(&EventRow::from(event));
        self.store_err(result);
    }

    fn on_tick(&mut self, report: &TickReport) {
        let result = self.writer.write_tick(&TickRow::from(report));
        self.store_err(result);
    }

    fn on_shutdown(&mut self, final_tick: RoadClock) {
        info!("trace closed at {final_tick} after {} event(s)", self.events);
        let result = self.writer.finish();
        self.store_err(result);
    }
}
