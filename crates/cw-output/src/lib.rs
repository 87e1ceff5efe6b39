//! `cw-output` — trace writers for a coordinated road.
//!
//! | Writer                | Destination                        |
//! |-----------------------|------------------------------------|
//! | [`CsvTraceWriter`]    | `events.csv`, `ticks.csv` in a dir |
//! | [`MemoryTraceWriter`] | two `Vec`s, for tests and replays  |
//!
//! Both implement [`TraceWriter`] and are driven by [`TraceObserver`], which
//! implements `cw_coord::RoadObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use parking_lot::Mutex;
//! use cw_output::{CsvTraceWriter, TraceObserver};
//!
//! let trace = Arc::new(Mutex::new(TraceObserver::new(CsvTraceWriter::new(dir)?)));
//! let road = RoadBuilder::new(config).observer(Arc::clone(&trace)).build_monitor()?;
//! // ... drive the road, then drop it to flush ...
//! drop(road);
//! if let Some(e) = trace.lock().take_error() {
//!     eprintln!("trace error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod memory;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use crate::csv::CsvTraceWriter;
pub use error::{OutputError, OutputResult};
pub use memory::MemoryTraceWriter;
pub use observer::TraceObserver;
pub use row::{EventRow, TickRow};
pub use writer::TraceWriter;
