//! The `Road` trait — the operations vehicles and the driver call.

use cw_core::{OpKind, Pos, RoadConfig, RoadResult, Ticks, VehicleId};
use cw_rules::{Reply, Request};

use crate::{RoadSnapshot, TickReport};

/// A shared road that many vehicle threads drive on at once.
///
/// Every method is synchronous.  `enter`, `advance`, `circulate`, and
/// `change_lane` block the calling thread until the operation can take
/// effect; `exit`, `tick`, `cancel`, and `snapshot` return immediately.
///
/// A vehicle must issue its operations one at a time: a request for a vehicle
/// that already has one waiting fails with
/// [`RoadError::RequestInFlight`](cw_core::RoadError::RequestInFlight).
///
/// # Required methods
///
/// Implementations provide [`call`][Self::call] plus the driver operations;
/// the vehicle operations are built on `call`.
///
/// # Example
///
/// ```rust,ignore
/// let road = MonitorRoad::new(RoadConfig::new(3, 2))?;
/// let car = VehicleId::new("car-1");
/// let mut pos = road.enter(&car, Ticks(2))?;
/// while !pos.is_off_road(road.config().segments) {
///     road.circulate(&car)?;
///     pos = road.advance(&car, Ticks(2))?;
/// }
/// road.exit(&car)?;
/// ```
pub trait Road: Send + Sync {
    /// Submit one vehicle request and block until it completes.
    fn call(&self, request: Request) -> RoadResult<Reply>;

    /// Advance the clock by one tick.  Never blocks.
    fn tick(&self) -> RoadResult<TickReport>;

    /// Withdraw the waiting request numbered `seq`, as listed in
    /// [`RoadSnapshot::pending`].  The blocked caller returns
    /// [`RoadError::Cancelled`](cw_core::RoadError::Cancelled).  Returns
    /// `false` if that request already completed or was withdrawn.
    fn cancel(&self, seq: u64) -> RoadResult<bool>;

    /// Copy of the current road state.
    fn snapshot(&self) -> RoadResult<RoadSnapshot>;

    fn config(&self) -> &RoadConfig;

    // ── Vehicle operations ────────────────────────────────────────────────

    /// Join the road in the lowest free lane of segment 1, then wait `budget`
    /// ticks there.  Blocks while segment 1 is full.
    fn enter(&self, vehicle: &VehicleId, budget: Ticks) -> RoadResult<Pos> {
        let reply = self.call(Request::Enter { vehicle: vehicle.clone(), budget })?;
        Ok(expect_position(reply, OpKind::Enter))
    }

    /// Move to the lowest free lane of the next segment and wait `budget`
    /// ticks there.  Blocks until the countdown is zero and the next segment
    /// has room.  From the last segment the vehicle leaves the road and the
    /// returned position is off it (`segment == segments + 1`).
    fn advance(&self, vehicle: &VehicleId, budget: Ticks) -> RoadResult<Pos> {
        let reply = self.call(Request::Advance { vehicle: vehicle.clone(), budget })?;
        Ok(expect_position(reply, OpKind::Advance))
    }

    /// Block until the vehicle's countdown reaches zero.
    fn circulate(&self, vehicle: &VehicleId) -> RoadResult<()> {
        match self.call(Request::Circulate { vehicle: vehicle.clone() })? {
            Reply::Proceed => Ok(()),
            other => unreachable!("circulate completed with {other:?}"),
        }
    }

    /// Move to the lowest other free lane of the current segment.  Blocks
    /// until the countdown is zero and such a lane exists.
    fn change_lane(&self, vehicle: &VehicleId) -> RoadResult<Pos> {
        let reply = self.call(Request::ChangeLane { vehicle: vehicle.clone() })?;
        Ok(expect_position(reply, OpKind::ChangeLane))
    }

    /// Leave the road.  Returns `false` (and changes nothing) if the vehicle
    /// was not on it, e.g. because it already drove off the end.
    fn exit(&self, vehicle: &VehicleId) -> RoadResult<bool> {
        match self.call(Request::Exit { vehicle: vehicle.clone() })? {
            Reply::Removed(removed) => Ok(removed),
            other => unreachable!("exit completed with {other:?}"),
        }
    }
}

fn expect_position(reply: Reply, op: OpKind) -> Pos {
    match reply {
        Reply::Position(pos) => pos,
        other => unreachable!("{op} completed with {other:?}"),
    }
}
