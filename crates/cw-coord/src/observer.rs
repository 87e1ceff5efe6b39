//! Observer hooks for event logs, traces, and visualizations.

use std::sync::Arc;

use cw_core::{OpKind, RoadClock, RoadError, VehicleId};
use cw_rules::Reply;
use parking_lot::Mutex;

use crate::TickReport;

/// What happened to one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// The precondition failed; the caller is now waiting.
    Deferred,
    /// The operation took effect.  `resumed` is `true` when it completed from
    /// the deferred queue rather than on arrival.
    Completed { reply: Reply, resumed: bool },
    /// The request was refused with an error.
    Rejected(RoadError),
    /// A waiting request was withdrawn by `cancel`.
    Cancelled,
}

/// One step in the life of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoadEvent {
    pub tick:    RoadClock,
    pub vehicle: VehicleId,
    pub op:      OpKind,
    pub outcome: EventOutcome,
}

/// Callbacks invoked by the coordinator.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// Callbacks run inside the coordinator's critical section: every vehicle
/// operation waits while one runs.  Keep them short and never call back into
/// the road from one.
///
/// # Example: event printer
///
/// ```rust,ignore
/// struct Printer;
///
/// impl RoadObserver for Printer {
///     fn on_event(&mut self, event: &RoadEvent) {
///         println!("{} {} {}: {:?}", event.tick, event.vehicle, event.op, event.outcome);
///     }
/// }
/// ```
pub trait RoadObserver {
    /// Called for every deferral, completion, rejection, and cancellation.
    fn on_event(&mut self, _event: &RoadEvent) {}

    /// Called at the end of every clock tick, after re-evaluation.
    fn on_tick(&mut self, _report: &TickReport) {}

    /// Called once when the coordinator is torn down.
    fn on_shutdown(&mut self, _final_tick: RoadClock) {}
}

/// A [`RoadObserver`] that does nothing.
pub struct NoopObserver;

impl RoadObserver for NoopObserver {}

/// Lets the caller keep a handle on an observer after handing it to the road.
impl<O: RoadObserver + ?Sized> RoadObserver for Arc<Mutex<O>> {
    fn on_event(&mut self, event: &RoadEvent) {
        self.lock().on_event(event);
    }

    fn on_tick(&mut self, report: &TickReport) {
        self.lock().on_tick(report);
    }

    fn on_shutdown(&mut self, final_tick: RoadClock) {
        self.lock().on_shutdown(final_tick);
    }
}
