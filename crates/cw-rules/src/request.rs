//! Vehicle operation requests.

use cw_core::{OpKind, Ticks, VehicleId};

/// One call to a vehicle-facing operation, with its arguments.
///
/// A deferred request is stored as-is and re-admitted on every
/// re-evaluation pass until it succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Join segment 1 with `budget` ticks to wait there.
    Enter { vehicle: VehicleId, budget: Ticks },

    /// Move to the next segment (or off the road) and wait `budget` ticks there.
    Advance { vehicle: VehicleId, budget: Ticks },

    /// Wait in place until the countdown reaches zero.
    Circulate { vehicle: VehicleId },

    /// Move to another free lane of the current segment.
    ChangeLane { vehicle: VehicleId },

    /// Leave the road.
    Exit { vehicle: VehicleId },
}

impl Request {
    pub fn kind(&self) -> OpKind {
        match self {
            Request::Enter { .. }      => OpKind::Enter,
            Request::Advance { .. }    => OpKind::Advance,
            Request::Circulate { .. }  => OpKind::Circulate,
            Request::ChangeLane { .. } => OpKind::ChangeLane,
            Request::Exit { .. }       => OpKind::Exit,
        }
    }

    pub fn vehicle(&self) -> &VehicleId {
        match self {
            Request::Enter { vehicle, .. }
            | Request::Advance { vehicle, .. }
            | Request::Circulate { vehicle }
            | Request::ChangeLane { vehicle }
            | Request::Exit { vehicle } => vehicle,
        }
    }
}
