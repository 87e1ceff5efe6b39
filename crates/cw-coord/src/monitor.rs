//! `MonitorRoad` — shared-state monitor realization.
//!
//! One `parking_lot::Mutex` guards the [`Coordinator`].  A caller whose
//! request is deferred gets a private [`Waiter`]: a result slot plus its own
//! condition variable, so a resumption signals exactly that caller.
//!
//! Results are handed off, not re-checked by the woken thread: whoever runs
//! re-evaluation applies the transition while holding the lock, at the moment
//! the rule holds, and stores the reply in the waiter's slot.  The woken
//! caller only collects it.  Waiting loops on the slot, so spurious condvar
//! wake-ups are harmless.

use std::sync::Arc;

use cw_core::{RoadConfig, RoadResult};
use cw_rules::{Reply, Request};
use parking_lot::{Condvar, Mutex};

use crate::{Coordinator, NoopObserver, Resume, Road, RoadObserver, RoadSnapshot, TickReport};

/// Resumption handle of one blocked caller.
#[derive(Default)]
struct Waiter {
    outcome: Mutex<Option<RoadResult<Reply>>>,
    ready:   Condvar,
}

impl Resume for Arc<Waiter> {
    fn resume(self, outcome: RoadResult<Reply>) {
        *self.outcome.lock() = Some(outcome);
        self.ready.notify_one();
    }
}

/// A [`Road`] whose state is protected by a mutex and per-caller condition
/// variables.
pub struct MonitorRoad {
    config: RoadConfig,
    core:   Mutex<Coordinator<Arc<Waiter>>>,
}

impl MonitorRoad {
    /// A road with no observer.
    pub fn new(config: RoadConfig) -> RoadResult<Self> {
        Self::with_observer(config, Box::new(NoopObserver))
    }

    pub fn with_observer(
        config:   RoadConfig,
        observer: Box<dyn RoadObserver + Send>,
    ) -> RoadResult<Self> {
        let core = Coordinator::new(config.clone(), observer)?;
        Ok(Self { config, core: Mutex::new(core) })
    }
}

impl Road for MonitorRoad {
    fn call(&self, request: Request) -> RoadResult<Reply> {
        let waiter = Arc::new(Waiter::default());
        let mut core = self.core.lock();
        core.submit(request, Arc::clone(&waiter));
        loop {
            if let Some(outcome) = waiter.outcome.lock().take() {
                return outcome;
            }
            // Releases the road lock while suspended.
            waiter.ready.wait(&mut core);
        }
    }

    fn tick(&self) -> RoadResult<TickReport> {
        Ok(self.core.lock().tick())
    }

    fn cancel(&self, seq: u64) -> RoadResult<bool> {
        Ok(self.core.lock().cancel(seq))
    }

    fn snapshot(&self) -> RoadResult<RoadSnapshot> {
        Ok(self.core.lock().snapshot())
    }

    fn config(&self) -> &RoadConfig {
        &self.config
    }
}
