//! `cw-grid` — the shared occupancy state of one road.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`grid`]     | `OccupancyGrid` — flat `segments × lanes` cell array       |
//! | [`registry`] | `VehicleRegistry`, `VehicleRecord`, `TickCounts`           |
//! | [`state`]    | `RoadState` — grid + registry kept in lockstep             |
//! | [`error`]    | `GridError` (invariant violations), `GridResult<T>`        |
//!
//! Nothing here synchronizes.  The coordinator in `cw-coord` owns exactly one
//! `RoadState` and only touches it inside its critical section.
//!
//! # Invariant
//!
//! A registry record exists iff its vehicle occupies a grid cell, and the
//! record's position names that cell.  `RoadState`'s mutators keep both sides
//! in step; [`RoadState::check_invariants`] verifies it.

pub mod error;
pub mod grid;
pub mod registry;
pub mod state;

#[cfg(test)]
mod tests;

pub use error::{GridError, GridResult};
pub use grid::OccupancyGrid;
pub use registry::{TickCounts, VehicleRecord, VehicleRegistry};
pub use state::RoadState;
