//! The `TraceWriter` trait implemented by every backend.

use crate::{EventRow, OutputResult, TickRow};

/// A sink for event and tick rows.
///
/// Errors are returned here but swallowed by [`TraceObserver`](crate::TraceObserver),
/// which keeps the first one for [`take_error`](crate::TraceObserver::take_error).
pub trait TraceWriter {
    fn write_event(&mut self, row: &EventRow) -> OutputResult<()>;

    fn write_tick(&mut self, row: &TickRow) -> OutputResult<()>;

    /// Flush and close.  Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
