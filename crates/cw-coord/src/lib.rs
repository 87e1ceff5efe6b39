//! `cw-coord` — the blocking coordinator for a shared multi-lane road.
//!
//! # Two realizations, one core
//!
//! ```text
//!   vehicle threads ──┐                         ┌── MonitorRoad: Mutex<Coordinator>
//!   driver (tick) ────┼── Road trait ───────────┤     + one Condvar per waiter
//!                     │                         └── ChannelRoad: server thread owns
//!                     │                               Coordinator, callers send
//!                     │                               commands + reply channels
//!                     ▼
//!              Coordinator<H: Resume>
//!                ├─ RoadState        (cw-grid: grid + registry)
//!                ├─ admission rules  (cw-rules)
//!                ├─ DeferredQueues   (per-category FIFO, WakePolicy)
//!                ├─ RoadClock
//!                └─ RoadObserver
//! ```
//!
//! Both realizations delegate every decision to [`Coordinator`]; they only
//! differ in how they obtain exclusive access and in the handle type used to
//! resume a suspended caller.
//!
//! # Guarantees
//!
//! - Mutual exclusion over road state.
//! - No lost wake-up: re-evaluation runs after every state change and repeats
//!   until nothing more can proceed.
//! - No spurious completion: a deferred request is applied only at the moment
//!   its rule is re-checked and holds.
//! - FIFO within each operation category; cross-category order per
//!   [`WakePolicy`](cw_core::WakePolicy).
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use cw_coord::{Realization, Road, RoadBuilder};
//! use cw_core::{RoadConfig, Ticks, VehicleId};
//!
//! let road = RoadBuilder::new(RoadConfig::new(3, 2)).build(Realization::Monitor)?;
//! let pos = road.enter(&VehicleId::new("car-1"), Ticks(2))?;
//! road.tick()?;
//! ```

pub mod builder;
pub mod channel;
pub mod coordinator;
pub mod deferred;
pub mod monitor;
pub mod observer;
pub mod road;


pub use builder::{Realization, RoadBuilder};
pub use channel::ChannelRoad;
pub use coordinator::{Coordinator, PendingRequest, Resume, RoadSnapshot, TickReport};
pub use deferred::{Deferred, DeferredQueues};
pub use monitor::MonitorRoad;
pub use observer::{EventOutcome, NoopObserver, RoadEvent, RoadObserver};
pub use road::Road;

pub use cw_rules::{Reply, Request};
