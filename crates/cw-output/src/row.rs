//! Plain data rows written by trace backends.

use cw_coord::{EventOutcome, Reply, RoadEvent, TickReport};

/// One request event, flattened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRow {
    pub tick:    u64,
    pub vehicle: String,
    pub op:      &'static str,
    /// `deferred`, `completed`, `resumed`, `noop` (exit of an absent vehicle),
    /// `rejected: <error>`, or `cancelled`.
    pub outcome: String,
    /// Position reported to the caller, for enter, advance, and change-lane.
    pub segment: Option<usize>,
    pub lane:    Option<usize>,
}

impl From<&RoadEvent> for EventRow {
    fn from(event: &RoadEvent) -> Self {
        let (outcome, pos) = match &event.outcome {
            EventOutcome::Deferred => ("deferred".to_string(), None),
            EventOutcome::Completed { reply: Reply::Removed(false), .. } => ("noop".to_string(), None),
            EventOutcome::Completed { reply, resumed } => {
                let label = if *resumed { "resumed" } else { "completed" };
                (label.to_string(), reply.position())
            }
            EventOutcome::Rejected(e) => (format!("rejected: {e}"), None),
            EventOutcome::Cancelled => ("cancelled".to_string(), None),
        };
        Self {
            tick:    event.tick.0,
            vehicle: event.vehicle.to_string(),
            op:      event.op.as_str(),
            outcome,
            segment: pos.map(|p| p.segment),
            lane:    pos.map(|p| p.lane),
        }
    }
}

/// Counters for one clock tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickRow {
    pub tick:         u64,
    pub decremented:  usize,
    pub reached_zero: usize,
    pub resumed:      usize,
}

impl From<&TickReport> for TickRow {
    fn from(report: &TickReport) -> Self {
        Self {
            tick:         report.tick.0,
            decremented:  report.decremented,
            reached_zero: report.reached_zero,
            resumed:      report.resumed,
        }
    }
}
