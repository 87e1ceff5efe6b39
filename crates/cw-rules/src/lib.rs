//! `cw-rules` — when may a vehicle operation proceed, and what does it change?
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`request`]   | `Request` — an operation call and its arguments            |
//! | [`admission`] | `admit` and the per-operation rules; `Admission`, `Transition` |
//! | [`apply`]     | `apply` — perform a `Transition`; `Reply`                  |
//!
//! # Design notes
//!
//! Rules are split in two phases, mirroring an intent/apply loop:
//!
//! 1. **Admission** reads a `&RoadState` and either says `Blocked` or returns
//!    a fully resolved [`Transition`] (which cells, which lane).  Lane choice
//!    is a pure function of the grid: the lowest free index always wins, so
//!    traces are reproducible.
//! 2. **Apply** takes `&mut RoadState` and performs that transition.
//!
//! A transition is only valid against the state it was planned on.  The
//! coordinator plans and applies inside one critical section.

pub mod admission;
pub mod apply;
pub mod request;


pub use admission::{
    Admission, Transition, admit, can_advance, can_change_lane, can_circulate, can_enter,
    can_exit,
};
pub use apply::{Reply, apply};
pub use request::Request;
