//! `RoadState` — the grid and the registry, mutated together.

use cw_core::{Cell, Ticks, VehicleId};

use crate::{GridError, GridResult, OccupancyGrid, TickCounts, VehicleRecord, VehicleRegistry};

/// All shared occupancy state of one road.
///
/// The fields are private so the only way to change occupancy is through the
/// mutators below, each of which updates grid and registry in the same call.
#[derive(Clone, Debug)]
pub struct RoadState {
    grid:     OccupancyGrid,
    registry: VehicleRegistry,
}

impl RoadState {
    /// An empty road of `segments × lanes` cells.
    pub fn new(segments: usize, lanes: usize) -> Self {
        Self {
            grid:     OccupancyGrid::new(segments, lanes),
            registry: VehicleRegistry::new(),
        }
    }

    #[inline]
    pub fn segments(&self) -> usize {
        self.grid.segments()
    }

    #[inline]
    pub fn lanes(&self) -> usize {
        self.grid.lanes()
    }

    #[inline]
    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    #[inline]
    pub fn registry(&self) -> &VehicleRegistry {
        &self.registry
    }

    #[inline]
    pub fn record(&self, vehicle: &VehicleId) -> Option<&VehicleRecord> {
        self.registry.get(vehicle)
    }

    // ── Mutators ──────────────────────────────────────────────────────────

    /// Put a new vehicle on the road at the free cell `cell`.
    ///
    /// # Panics
    /// Panics if `cell` is occupied: occupancy planning has gone wrong and the
    /// bijection would break.
    pub fn place(&mut self, vehicle: VehicleId, cell: Cell, remaining: Ticks) {
        debug_assert!(!self.registry.contains(&vehicle), "vehicle {vehicle} placed twice");
        if let Some(previous) = self.grid.occupy(cell, vehicle.clone()) {
            panic!("placed {vehicle} on cell {cell} already held by {previous}");
        }
        self.registry.insert(vehicle, VehicleRecord { pos: cell.pos(), remaining });
    }

    /// Move a vehicle to the free cell `to`, optionally resetting its
    /// countdown.  Returns the cell it left, or `None` if it is not on the road.
    ///
    /// # Panics
    /// Panics if `to` is occupied.
    pub fn relocate(&mut self, vehicle: &VehicleId, to: Cell, remaining: Option<Ticks>) -> Option<Cell> {
        let record = self.registry.get_mut(vehicle)?;
        let from = record.pos.cell();
        record.pos = to.pos();
        if let Some(remaining) = remaining {
            record.remaining = remaining;
        }
        self.grid.vacate(from);
        if let Some(previous) = self.grid.occupy(to, vehicle.clone()) {
            panic!("moved {vehicle} onto cell {to} already held by {previous}");
        }
        Some(from)
    }

    /// Take a vehicle off the road, freeing its cell.
    pub fn remove(&mut self, vehicle: &VehicleId) -> Option<VehicleRecord> {
        let record = self.registry.remove(vehicle)?;
        self.grid.vacate(record.pos.cell());
        Some(record)
    }

    /// Count every vehicle's positive countdown down by one.
    pub fn tick(&mut self) -> TickCounts {
        self.registry.tick_all()
    }

    // ── Inspection ────────────────────────────────────────────────────────

    /// Every live record, sorted by vehicle id for reproducible output.
    pub fn vehicles(&self) -> Vec<(VehicleId, VehicleRecord)> {
        let mut out: Vec<_> = self
            .registry
            .iter()
            .map(|(id, record)| (id.clone(), *record))
            .collect();
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }

    /// Verify the grid ↔ registry bijection.
    ///
    /// O(cells + vehicles).  The coordinator runs it after every mutation.
    pub fn check_invariants(&self) -> GridResult<()> {
        for (vehicle, record) in self.registry.iter() {
            let pos = record.pos;
            if pos.segment == 0
                || pos.lane == 0
                || !self.grid.contains(pos.cell())
            {
                return Err(GridError::PositionOutOfRange { vehicle: vehicle.clone(), pos });
            }
            let occupant = self.grid.occupant(pos.cell());
            if occupant != Some(vehicle) {
                return Err(GridError::RecordWithoutCell {
                    vehicle:  vehicle.clone(),
                    pos,
                    occupant: occupant.cloned(),
                });
            }
        }
        for (cell, occupant) in self.grid.occupied() {
            let recorded = self.registry.get(occupant).map(|r| r.pos);
            if recorded != Some(cell.pos()) {
                return Err(GridError::CellWithoutRecord {
                    cell,
                    occupant: occupant.clone(),
                    recorded,
                });
            }
        }
        Ok(())
    }

    /// Build a state directly from parts, bypassing the lockstep mutators.
    /// Only for exercising [`check_invariants`](Self::check_invariants).
    #[cfg(test)]
    pub(crate) fn from_parts(grid: OccupancyGrid, registry: VehicleRegistry) -> Self {
        Self { grid, registry }
    }
}
