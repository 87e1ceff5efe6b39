//! `Coordinator` — the single-threaded heart of both road realizations.
//!
//! The coordinator owns the road state and the deferred queues and knows
//! nothing about threads.  A realization wraps it in some form of exclusive
//! access (a mutex, or a dedicated server thread) and supplies a resumption
//! handle type `H` that knows how to deliver a result to one suspended caller.
//!
//! # Request protocol
//!
//! ```text
//! submit(request, handle):
//!   ① reject           : a second waiting request for the same vehicle,
//!                        or a rule error           → resume(handle, Err)
//!   ② admit            : rule holds                → apply, resume(handle, Ok)
//!                                                    then re-evaluate if state changed
//!   ③ defer            : rule blocked              → queue (request, handle)
//!
//! re-evaluate:
//!   loop:
//!     take the next eligible deferred request under the wake policy
//!     none left eligible → stop
//!     apply it, resume its handle
//! ```
//!
//! Each resumption restarts the scan from the top, so a change made by one
//! resumed request (an exit freeing a lane, say) is seen by every request
//! behind it in the same pass.

use cw_core::{
    OpKind, Pos, RoadClock, RoadConfig, RoadError, RoadResult, Ticks, VehicleId, WakePolicy,
};
use cw_grid::{RoadState, VehicleRecord};
use cw_rules::{Admission, Reply, Request, Transition, admit, apply};
use log::{debug, info, trace, warn};

use crate::deferred::DeferredQueues;
use crate::{EventOutcome, RoadEvent, RoadObserver};

// ── Resumption handles ────────────────────────────────────────────────────────

/// Delivers the outcome of a request to the caller that made it.
///
/// Called exactly once per submitted request, either during `submit` or
/// during a later re-evaluation pass, and always while the coordinator is
/// exclusively held.
pub trait Resume {
    fn resume(self, outcome: RoadResult<Reply>);
}

// ── Reports ───────────────────────────────────────────────────────────────────

/// Result of one clock tick.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct TickReport {
    /// Clock value after this tick.
    pub tick:         RoadClock,
    /// Vehicles whose countdown went down.
    pub decremented:  usize,
    /// Vehicles whose countdown reached zero on this tick.
    pub reached_zero: usize,
    /// Deferred requests resumed by the re-evaluation this tick triggered.
    pub resumed:      usize,
}

/// A waiting request as seen from outside.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PendingRequest {
    pub seq:     u64,
    pub op:      OpKind,
    pub vehicle: VehicleId,
    /// Clock value when the request was deferred.
    pub since:   RoadClock,
}

/// Point-in-time copy of the whole road, for visualizations and tests.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct RoadSnapshot {
    pub segments: usize,
    pub lanes:    usize,
    pub tick:     RoadClock,
    /// Row-major `segments × lanes` occupancy.
    pub cells:    Vec<Option<VehicleId>>,
    /// Live vehicles, sorted by id.
    pub vehicles: Vec<(VehicleId, VehicleRecord)>,
    /// Waiting requests in arrival order.
    pub pending:  Vec<PendingRequest>,
}

impl RoadSnapshot {
    /// Occupant of the 1-based position `pos`, if it is on the road.
    pub fn occupant(&self, pos: Pos) -> Option<&VehicleId> {
        if pos.segment == 0 || pos.lane == 0 || pos.segment > self.segments || pos.lane > self.lanes {
            return None;
        }
        self.cells[(pos.segment - 1) * self.lanes + (pos.lane - 1)].as_ref()
    }

    pub fn record(&self, vehicle: &VehicleId) -> Option<&VehicleRecord> {
        self.vehicles
            .binary_search_by(|(id, _)| id.cmp(vehicle))
            .ok()
            .map(|i| &self.vehicles[i].1)
    }

    pub fn is_pending(&self, vehicle: &VehicleId) -> bool {
        self.pending.iter().any(|p| &p.vehicle == vehicle)
    }

    /// `true` if every record points at a cell holding its vehicle and no
    /// cell holds an unrecorded vehicle.
    pub fn is_consistent(&self) -> bool {
        let occupied = self.cells.iter().filter(|c| c.is_some()).count();
        occupied == self.vehicles.len()
            && self
                .vehicles
                .iter()
                .all(|(id, rec)| self.occupant(rec.pos) == Some(id))
    }
}

// ── Coordinator ───────────────────────────────────────────────────────────────

/// Road state, deferred requests, clock, and observer behind one `&mut`.
pub struct Coordinator<H: Resume> {
    config:   RoadConfig,
    state:    RoadState,
    deferred: DeferredQueues<H>,
    clock:    RoadClock,
    observer: Box<dyn RoadObserver + Send>,
}

impl<H: Resume> Coordinator<H> {
    /// Validate `config` and build an empty road.
    pub fn new(config: RoadConfig, observer: Box<dyn RoadObserver + Send>) -> RoadResult<Self> {
        config.validate()?;
        info!(
            "road ready: {} segment(s) x {} lane(s), {:?} wake policy",
            config.segments, config.lanes, config.policy
        );
        Ok(Self {
            state:    RoadState::new(config.segments, config.lanes),
            deferred: DeferredQueues::new(),
            clock:    RoadClock::default(),
            config,
            observer,
        })
    }

    #[inline]
    pub fn config(&self) -> &RoadConfig {
        &self.config
    }

    #[inline]
    pub fn state(&self) -> &RoadState {
        &self.state
    }

    #[inline]
    pub fn clock(&self) -> RoadClock {
        self.clock
    }

    #[inline]
    pub fn policy(&self) -> WakePolicy {
        self.config.policy
    }

    /// Number of requests currently waiting.
    pub fn pending_count(&self) -> usize {
        self.deferred.len()
    }

    // ── Operations ────────────────────────────────────────────────────────

    /// Run `request` now or park it until it can run.  `handle` is resumed
    /// exactly once with the outcome.
    pub fn submit(&mut self, request: Request, handle: H) {
        let vehicle = request.vehicle().clone();
        let op = request.kind();

        if op.is_deferrable() && self.deferred.contains_vehicle(&vehicle) {
            self.reject(op, vehicle.clone(), RoadError::RequestInFlight(vehicle), handle);
            return;
        }

        match admit(&self.state, &request) {
            Err(e) => self.reject(op, vehicle, e, handle),
            Ok(Admission::Ready(transition)) => {
                let changed = transition.changes_state();
                let reply = self.commit(transition);
                self.emit(vehicle, op, EventOutcome::Completed { reply, resumed: false });
                handle.resume(Ok(reply));
                if changed {
                    self.reevaluate();
                }
            }
            Ok(Admission::Blocked) => {
                debug!("{} {op} deferred at {}", vehicle, self.clock);
                self.emit(vehicle, op, EventOutcome::Deferred);
                self.deferred.push(request, self.clock, handle);
            }
        }
    }

    /// Advance the clock: count every positive countdown down by one, then
    /// re-evaluate if any reached zero.
    pub fn tick(&mut self) -> TickReport {
        self.clock.advance();
        let counts = self.state.tick();
        let resumed = if counts.reached_zero > 0 { self.reevaluate() } else { 0 };
        let report = TickReport {
            tick:         self.clock,
            decremented:  counts.decremented,
            reached_zero: counts.reached_zero,
            resumed,
        };
        trace!(
            "{}: {} countdown(s) decremented, {} reached zero, {} request(s) resumed, {} waiting",
            report.tick, report.decremented, report.reached_zero, report.resumed, self.deferred.len()
        );
        self.observer.on_tick(&report);
        report
    }

    /// Withdraw the waiting request numbered `seq` (see
    /// [`PendingRequest::seq`]); its caller is resumed with
    /// [`RoadError::Cancelled`].  Returns `false` if that request is no longer
    /// waiting, even if its vehicle has since parked a newer one.
    pub fn cancel(&mut self, seq: u64) -> bool {
        let Some(entry) = self.deferred.remove_seq(seq) else {
            return false;
        };
        let vehicle = entry.request.vehicle().clone();
        let op = entry.request.kind();
        debug!("{vehicle} {op} #{seq} cancelled after waiting since {}", entry.since);
        self.emit(vehicle.clone(), op, EventOutcome::Cancelled);
        entry.handle.resume(Err(RoadError::Cancelled(vehicle)));
        true
    }

    /// Copy out the full road state.
    pub fn snapshot(&self) -> RoadSnapshot {
        let mut pending: Vec<PendingRequest> = self
            .deferred
            .iter()
            .map(|d| PendingRequest {
                seq:     d.seq,
                op:      d.request.kind(),
                vehicle: d.request.vehicle().clone(),
                since:   d.since,
            })
            .collect();
        pending.sort_by_key(|p| p.seq);

        RoadSnapshot {
            segments: self.state.segments(),
            lanes:    self.state.lanes(),
            tick:     self.clock,
            cells:    self.state.grid().cells().to_vec(),
            vehicles: self.state.vehicles(),
            pending,
        }
    }

    /// Remaining ticks of `vehicle`, if it is on the road.
    pub fn remaining(&self, vehicle: &VehicleId) -> Option<Ticks> {
        self.state.record(vehicle).map(|r| r.remaining)
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// Resume every deferred request that can now proceed, repeating until a
    /// full pass finds nothing.  Returns how many were resumed.
    fn reevaluate(&mut self) -> usize {
        let mut resumed = 0;
        loop {
            let state = &self.state;
            let next = self.deferred.take_next(self.config.policy, |request| {
                match admit(state, request) {
                    Ok(Admission::Blocked)  => None,
                    Ok(Admission::Ready(t)) => Some(Ok(t)),
                    Err(e)                  => Some(Err(e)),
                }
            });
            let Some((entry, admitted)) = next else {
                break;
            };

            let vehicle = entry.request.vehicle().clone();
            let op = entry.request.kind();
            match admitted {
                Ok(transition) => {
                    let reply = self.commit(transition);
                    debug!(
                        "{vehicle} {op} resumed at {} after {} tick(s)",
                        self.clock,
                        self.clock.since(entry.since)
                    );
                    self.emit(vehicle, op, EventOutcome::Completed { reply, resumed: true });
                    entry.handle.resume(Ok(reply));
                }
                Err(e) => {
                    warn!("{vehicle} {op} failed while waiting: {e}");
                    self.emit(vehicle, op, EventOutcome::Rejected(e.clone()));
                    entry.handle.resume(Err(e));
                }
            }
            resumed += 1;
        }
        resumed
    }

    /// Apply an admitted transition and verify the road afterwards.
    fn commit(&mut self, transition: Transition) -> Reply {
        match &transition {
            Transition::Depart { vehicle, exit, .. } => debug!("{vehicle} departs the road at {exit}"),
            Transition::Exit { vehicle, from: None } => debug!("{vehicle} exit ignored: not on the road"),
            _ => {}
        }
        let op = transition.kind();
        let reply = apply(&mut self.state, transition);

        // Checked in every build: a broken grid/registry bijection is fatal.
        if let Err(e) = self.state.check_invariants() {
            panic!("road invariant violated by {op}: {e}");
        }
        reply
    }

    fn reject(&mut self, op: OpKind, vehicle: VehicleId, error: RoadError, handle: H) {
        warn!("{vehicle} {op} rejected: {error}");
        self.emit(vehicle, op, EventOutcome::Rejected(error.clone()));
        handle.resume(Err(error));
    }

    fn emit(&mut self, vehicle: VehicleId, op: OpKind, outcome: EventOutcome) {
        let event = RoadEvent { tick: self.clock, vehicle, op, outcome };
        self.observer.on_event(&event);
    }
}

impl<H: Resume> Drop for Coordinator<H> {
    fn drop(&mut self) {
        if !self.deferred.is_empty() {
            warn!(
                "road shut down with {} request(s) still waiting",
                self.deferred.len()
            );
        }
        self.observer.on_shutdown(self.clock);
    }
}
