use cw_core::{Cell, Pos, VehicleId};
use thiserror::Error;

/// A broken grid ↔ registry bijection.  Always a coordinator defect, never a
/// caller error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("vehicle {vehicle} recorded at {pos}, which is outside the road")]
    PositionOutOfRange { vehicle: VehicleId, pos: Pos },

    #[error("vehicle {vehicle} recorded at {pos} but that cell holds {occupant:?}")]
    RecordWithoutCell {
        vehicle:  VehicleId,
        pos:      Pos,
        occupant: Option<VehicleId>,
    },

    #[error("cell {cell} holds {occupant} but its record says {recorded:?}")]
    CellWithoutRecord {
        cell:     Cell,
        occupant: VehicleId,
        recorded: Option<Pos>,
    },
}

pub type GridResult<T> = Result<T, GridError>;
