//! `OccupancyGrid` — which vehicle (if any) holds each cell.

use cw_core::{Cell, VehicleId};

/// A `segments × lanes` table of cells stored row-major in one `Vec`
/// (`index = segment * lanes + lane`).
#[derive(Clone, Debug)]
pub struct OccupancyGrid {
    segments: usize,
    lanes:    usize,
    cells:    Vec<Option<VehicleId>>,
}

impl OccupancyGrid {
    /// An all-free grid.
    pub fn new(segments: usize, lanes: usize) -> Self {
        Self {
            segments,
            lanes,
            cells: vec![None; segments * lanes],
        }
    }

    #[inline]
    pub fn segments(&self) -> usize {
        self.segments
    }

    #[inline]
    pub fn lanes(&self) -> usize {
        self.lanes
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.segment < self.segments && cell.lane < self.lanes
    }

    #[inline]
    fn index(&self, cell: Cell) -> usize {
        debug_assert!(self.contains(cell), "cell {cell} outside {}x{} grid", self.segments, self.lanes);
        cell.segment * self.lanes + cell.lane
    }

    /// The vehicle in `cell`, or `None` if the cell is free.
    #[inline]
    pub fn occupant(&self, cell: Cell) -> Option<&VehicleId> {
        self.cells[self.index(cell)].as_ref()
    }

    #[inline]
    pub fn is_free(&self, cell: Cell) -> bool {
        self.occupant(cell).is_none()
    }

    /// Lowest-index free lane of `segment`.
    pub fn first_free_lane(&self, segment: usize) -> Option<usize> {
        self.segment(segment).iter().position(Option::is_none)
    }

    /// Lowest-index free lane of `segment` other than `except`.
    pub fn first_free_lane_except(&self, segment: usize, except: usize) -> Option<usize> {
        self.segment(segment)
            .iter()
            .enumerate()
            .find(|&(lane, slot)| lane != except && slot.is_none())
            .map(|(lane, _)| lane)
    }

    /// Number of free lanes in `segment`.
    pub fn free_lanes(&self, segment: usize) -> usize {
        self.segment(segment).iter().filter(|slot| slot.is_none()).count()
    }

    /// The lanes of one segment, lane 0 first.
    pub fn segment(&self, segment: usize) -> &[Option<VehicleId>] {
        let start = segment * self.lanes;
        &self.cells[start..start + self.lanes]
    }

    /// Put `vehicle` in `cell`, returning whoever was there before.
    ///
    /// Callers must only occupy free cells; a `Some` return means the grid
    /// has already been corrupted.
    pub fn occupy(&mut self, cell: Cell, vehicle: VehicleId) -> Option<VehicleId> {
        let i = self.index(cell);
        self.cells[i].replace(vehicle)
    }

    /// Free `cell`, returning its previous occupant.
    pub fn vacate(&mut self, cell: Cell) -> Option<VehicleId> {
        let i = self.index(cell);
        self.cells[i].take()
    }

    /// Every occupied cell with its occupant, in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (Cell, &VehicleId)> + '_ {
        let lanes = self.lanes;
        self.cells.iter().enumerate().filter_map(move |(i, slot)| {
            slot.as_ref().map(|id| (Cell::new(i / lanes, i % lanes), id))
        })
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|slot| slot.is_some()).count()
    }

    /// Raw row-major cell array.
    pub fn cells(&self) -> &[Option<VehicleId>] {
        &self.cells
    }
}
