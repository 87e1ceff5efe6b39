//! `DeferredQueues` — the requests that could not proceed yet.
//!
//! # Layout
//!
//! One FIFO `VecDeque` per deferrable [`OpKind`] (advance, change-lane,
//! circulate, enter).  Exit never waits, so it has no queue.  Every pushed
//! request gets a global arrival sequence number, which is what
//! [`WakePolicy::GlobalFifo`] orders by.
//!
//! # Picking the next request to resume
//!
//! [`DeferredQueues::take_next`] probes each queue front-to-back and stops at
//! the first eligible entry, so within a category the oldest eligible request
//! always wins.  Across categories the policy decides: the highest-precedence
//! category with an eligible entry, or the eligible entry with the lowest
//! sequence number.
//!
//! Queues are scanned linearly.  Their length is bounded by the number of
//! vehicles, and a scan is cheap next to the thread wake-up it triggers.

use std::collections::VecDeque;

use cw_core::{OpKind, RoadClock, VehicleId, WakePolicy};
use cw_rules::Request;

/// A suspended request plus the handle that resumes its caller.
#[derive(Debug)]
pub struct Deferred<H> {
    /// Global arrival order.
    pub seq: u64,
    /// Clock value when the request was deferred.
    pub since: RoadClock,
    pub request: Request,
    pub handle: H,
}

/// Per-category FIFO queues of deferred requests.
#[derive(Debug)]
pub struct DeferredQueues<H> {
    queues:   [VecDeque<Deferred<H>>; 4],
    next_seq: u64,
}

impl<H> Default for DeferredQueues<H> {
    fn default() -> Self {
        Self {
            queues:   Default::default(),
            next_seq: 0,
        }
    }
}

/// Queue index of a deferrable kind (its position in `OpKind::DEFERRABLE`).
#[inline]
fn slot(kind: OpKind) -> usize {
    debug_assert!(kind.is_deferrable(), "{kind} requests are never deferred");
    kind.rank() - 1
}

impl<H> DeferredQueues<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `request` to the back of its category's queue.
    ///
    /// # Panics
    /// Panics in debug mode if `request` is an exit.
    pub fn push(&mut self, request: Request, since: RoadClock, handle: H) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queues[slot(request.kind())].push_back(Deferred { seq, since, request, handle });
        seq
    }

    /// Total deferred requests across all categories.
    pub fn len(&self) -> usize {
        self.queues.iter().map(VecDeque::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.queues.iter().all(VecDeque::is_empty)
    }

    /// Deferred requests of one category.
    pub fn len_of(&self, kind: OpKind) -> usize {
        if !kind.is_deferrable() {
            return 0;
        }
        self.queues[slot(kind)].len()
    }

    /// `true` if `vehicle` already has a request waiting.
    pub fn contains_vehicle(&self, vehicle: &VehicleId) -> bool {
        self.iter().any(|d| d.request.vehicle() == vehicle)
    }

    /// Withdraw the request with arrival number `seq`, if it is still waiting.
    pub fn remove_seq(&mut self, seq: u64) -> Option<Deferred<H>> {
        for queue in &mut self.queues {
            // Sequence numbers ascend within each queue.
            if let Ok(i) = queue.binary_search_by_key(&seq, |d| d.seq) {
                return queue.remove(i);
            }
        }
        None
    }

    /// All waiting requests, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Deferred<H>> + '_ {
        self.queues.iter().flatten()
    }

    /// Remove and return the next request to resume under `policy`.
    ///
    /// `probe` is asked about queued requests and returns `Some` for those
    /// that can be resolved now (successfully or with an error); its value is
    /// handed back alongside the request.  `probe` must not depend on which
    /// requests it has already been asked about.
    pub fn take_next<T>(
        &mut self,
        policy: WakePolicy,
        mut probe: impl FnMut(&Request) -> Option<T>,
    ) -> Option<(Deferred<H>, T)> {
        let mut best: Option<(usize, usize, T)> = None;

        for (q, queue) in self.queues.iter().enumerate() {
            let first_eligible = queue
                .iter()
                .enumerate()
                .find_map(|(i, d)| probe(&d.request).map(|t| (i, t)));
            let Some((i, t)) = first_eligible else {
                continue;
            };
            match policy {
                WakePolicy::Precedence => {
                    // Queues are laid out in precedence order.
                    best = Some((q, i, t));
                    break;
                }
                WakePolicy::GlobalFifo => {
                    let older = match &best {
                        None              => true,
                        Some((bq, bi, _)) => queue[i].seq < self.queues[*bq][*bi].seq,
                    };
                    if older {
                        best = Some((q, i, t));
                    }
                }
            }
        }

        let (q, i, t) = best?;
        let entry = self.queues[q].remove(i)?;
        Some((entry, t))
    }
}
