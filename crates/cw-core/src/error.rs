//! Coordinator error type.
//!
//! Capacity exhaustion is deliberately absent: a full segment makes the caller
//! block, it never fails.  Everything here is either a caller precondition
//! violation or a configuration problem caught at construction.

use thiserror::Error;

use crate::VehicleId;

/// The error type shared by every `cw-*` crate that talks to the coordinator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoadError {
    #[error("vehicle {0} is not on the road")]
    UnknownVehicle(VehicleId),

    #[error("vehicle {0} is already on the road")]
    AlreadyOnRoad(VehicleId),

    #[error("vehicle {0} already has a request waiting")]
    RequestInFlight(VehicleId),

    #[error("cannot change lane on a road with {lanes} lane(s)")]
    LaneChangeImpossible { lanes: usize },

    #[error("request from vehicle {0} was cancelled")]
    Cancelled(VehicleId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to start coordinator thread: {0}")]
    Spawn(String),

    #[error("coordinator is no longer running")]
    Disconnected,
}

/// Shorthand result type for all `cw-*` crates.
pub type RoadResult<T> = Result<T, RoadError>;
