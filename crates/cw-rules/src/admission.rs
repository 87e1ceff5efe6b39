//! Admission rules — side-effect-free checks over a road snapshot.

use cw_core::{Cell, OpKind, Pos, RoadError, RoadResult, Ticks, VehicleId};
use cw_grid::{RoadState, VehicleRecord};

use crate::Request;

/// A resolved state change, ready for [`apply`](crate::apply).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Occupy `to` in segment 0.
    Enter { vehicle: VehicleId, to: Cell, budget: Ticks },

    /// Move from `from` to `to` in the next segment.
    Advance { vehicle: VehicleId, from: Cell, to: Cell, budget: Ticks },

    /// Advance past the last segment: free `from` and report `exit`, which is
    /// off the road.
    Depart { vehicle: VehicleId, from: Cell, exit: Pos },

    /// Countdown is at zero; nothing changes.
    Circulate { vehicle: VehicleId },

    /// Move from `from` to `to` within one segment.
    ChangeLane { vehicle: VehicleId, from: Cell, to: Cell },

    /// Free `from`.  `None` means the vehicle was not on the road and exit is
    /// a no-op.
    Exit { vehicle: VehicleId, from: Option<Cell> },
}

impl Transition {
    pub fn kind(&self) -> OpKind {
        match self {
            Transition::Enter { .. }      => OpKind::Enter,
            Transition::Advance { .. }    => OpKind::Advance,
            Transition::Depart { .. }     => OpKind::Advance,
            Transition::Circulate { .. }  => OpKind::Circulate,
            Transition::ChangeLane { .. } => OpKind::ChangeLane,
            Transition::Exit { .. }       => OpKind::Exit,
        }
    }

    pub fn vehicle(&self) -> &VehicleId {
        match self {
            Transition::Enter { vehicle, .. }
            | Transition::Advance { vehicle, .. }
            | Transition::Depart { vehicle, .. }
            | Transition::Circulate { vehicle }
            | Transition::ChangeLane { vehicle, .. }
            | Transition::Exit { vehicle, .. } => vehicle,
        }
    }

    /// `false` for transitions that leave the grid and registry untouched.
    /// Only state-changing transitions can unblock other requests.
    pub fn changes_state(&self) -> bool {
        match self {
            Transition::Circulate { .. }  => false,
            Transition::Exit { from, .. } => from.is_some(),
            _                             => true,
        }
    }
}

/// Outcome of an admission check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    Ready(Transition),
    /// The precondition does not hold yet; the caller must wait.
    Blocked,
}

/// Dispatch `request` to its rule.
///
/// # Errors
///
/// Precondition violations that waiting can never fix: unknown vehicle,
/// duplicate enter, lane change on a one-lane road.
pub fn admit(state: &RoadState, request: &Request) -> RoadResult<Admission> {
    match request {
        Request::Enter { vehicle, budget }   => can_enter(state, vehicle, *budget),
        Request::Advance { vehicle, budget } => can_advance(state, vehicle, *budget),
        Request::Circulate { vehicle }       => can_circulate(state, vehicle),
        Request::ChangeLane { vehicle }      => can_change_lane(state, vehicle),
        Request::Exit { vehicle }            => Ok(can_exit(state, vehicle)),
    }
}

fn record<'a>(state: &'a RoadState, vehicle: &VehicleId) -> RoadResult<&'a VehicleRecord> {
    state
        .record(vehicle)
        .ok_or_else(|| RoadError::UnknownVehicle(vehicle.clone()))
}

/// Ready iff some lane of segment 0 is free; takes the lowest one.
pub fn can_enter(state: &RoadState, vehicle: &VehicleId, budget: Ticks) -> RoadResult<Admission> {
    if state.record(vehicle).is_some() {
        return Err(RoadError::AlreadyOnRoad(vehicle.clone()));
    }
    Ok(match state.grid().first_free_lane(0) {
        Some(lane) => Admission::Ready(Transition::Enter {
            vehicle: vehicle.clone(),
            to:      Cell::new(0, lane),
            budget,
        }),
        None => Admission::Blocked,
    })
}

/// Blocked while the countdown is positive.  From the last segment the
/// vehicle departs unconditionally; otherwise it needs a free lane (lowest
/// index, any lane) in the next segment.
pub fn can_advance(state: &RoadState, vehicle: &VehicleId, budget: Ticks) -> RoadResult<Admission> {
    let record = record(state, vehicle)?;
    if !record.remaining.is_zero() {
        return Ok(Admission::Blocked);
    }
    let from = record.pos.cell();
    let next = from.segment + 1;
    if next >= state.segments() {
        return Ok(Admission::Ready(Transition::Depart {
            vehicle: vehicle.clone(),
            from,
            exit: Pos::new(next + 1, record.pos.lane),
        }));
    }
    Ok(match state.grid().first_free_lane(next) {
        Some(lane) => Admission::Ready(Transition::Advance {
            vehicle: vehicle.clone(),
            from,
            to: Cell::new(next, lane),
            budget,
        }),
        None => Admission::Blocked,
    })
}

/// Ready iff the countdown is zero.
pub fn can_circulate(state: &RoadState, vehicle: &VehicleId) -> RoadResult<Admission> {
    let record = record(state, vehicle)?;
    Ok(if record.remaining.is_zero() {
        Admission::Ready(Transition::Circulate { vehicle: vehicle.clone() })
    } else {
        Admission::Blocked
    })
}

/// Ready iff the countdown is zero and another lane of the same segment is
/// free (lowest index wins).
pub fn can_change_lane(state: &RoadState, vehicle: &VehicleId) -> RoadResult<Admission> {
    let record = record(state, vehicle)?;
    if state.lanes() < 2 {
        return Err(RoadError::LaneChangeImpossible { lanes: state.lanes() });
    }
    if !record.remaining.is_zero() {
        return Ok(Admission::Blocked);
    }
    let from = record.pos.cell();
    Ok(match state.grid().first_free_lane_except(from.segment, from.lane) {
        Some(lane) => Admission::Ready(Transition::ChangeLane {
            vehicle: vehicle.clone(),
            from,
            to: Cell::new(from.segment, lane),
        }),
        None => Admission::Blocked,
    })
}

/// Always ready.  Exiting a vehicle that is not on the road is a no-op.
pub fn can_exit(state: &RoadState, vehicle: &VehicleId) -> Admission {
    Admission::Ready(Transition::Exit {
        vehicle: vehicle.clone(),
        from:    state.record(vehicle).map(|r| r.pos.cell()),
    })
}
