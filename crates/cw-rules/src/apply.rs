//! Performing admitted transitions.

use cw_core::Pos;
use cw_grid::RoadState;

use crate::Transition;

/// What a completed operation hands back to its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    /// Enter, advance, and change-lane: the vehicle's new position.  For a
    /// departing advance this is off the road.
    Position(Pos),
    /// Circulate: the countdown is at zero.
    Proceed,
    /// Exit: whether a vehicle was actually removed.
    Removed(bool),
}

impl Reply {
    pub fn position(self) -> Option<Pos> {
        match self {
            Reply::Position(pos) => Some(pos),
            _ => None,
        }
    }
}

/// Apply `transition` to `state`.
///
/// `transition` must come from admitting against this same `state` with no
/// mutation in between; the cells it names are assumed free.
pub fn apply(state: &mut RoadState, transition: Transition) -> Reply {
    match transition {
        Transition::Enter { vehicle, to, budget } => {
            state.place(vehicle, to, budget);
            Reply::Position(to.pos())
        }
        Transition::Advance { vehicle, from, to, budget } => {
            let left = state.relocate(&vehicle, to, Some(budget));
            debug_assert_eq!(left, Some(from));
            Reply::Position(to.pos())
        }
        Transition::Depart { vehicle, from, exit } => {
            let removed = state.remove(&vehicle);
            debug_assert_eq!(removed.map(|r| r.pos.cell()), Some(from));
            Reply::Position(exit)
        }
        Transition::Circulate { .. } => Reply::Proceed,
        Transition::ChangeLane { vehicle, from, to } => {
            let left = state.relocate(&vehicle, to, None);
            debug_assert_eq!(left, Some(from));
            Reply::Position(to.pos())
        }
        Transition::Exit { vehicle, from } => {
            if from.is_none() {
                return Reply::Removed(false);
            }
            Reply::Removed(state.remove(&vehicle).is_some())
        }
    }
}
