//! `cw-core` — foundational types for the `carriageway` road coordinator.
//!
//! This crate is a dependency of every other `cw-*` crate.  It has no `cw-*`
//! dependencies and only `thiserror` (plus optional `serde`) externally.
//!
//! # What lives here
//!
//! | Module      | Contents                                              |
//! |-------------|-------------------------------------------------------|
//! | [`ids`]     | `VehicleId`                                           |
//! | [`pos`]     | `Pos` (1-based, external), `Cell` (0-based, grid)     |
//! | [`time`]    | `Ticks` countdown, `RoadClock`                        |
//! | [`op`]      | `OpKind`, precedence order                            |
//! | [`config`]  | `RoadConfig`, `WakePolicy`                            |
//! | [`error`]   | `RoadError`, `RoadResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod ids;
pub mod op;
pub mod pos;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{RoadConfig, WakePolicy};
pub use error::{RoadError, RoadResult};
pub use ids::VehicleId;
pub use op::OpKind;
pub use pos::{Cell, Pos};
pub use time::{RoadClock, Ticks};
