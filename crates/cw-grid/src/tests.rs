//! Unit tests for cw-grid.

use cw_core::{Cell, Pos, Ticks, VehicleId};

fn v(name: &str) -> VehicleId {
    VehicleId::new(name)
}

#[cfg(test)]
mod grid_tests {
    use super::*;
    use crate::OccupancyGrid;

    #[test]
    fn new_grid_is_free() {
        let grid = OccupancyGrid::new(3, 2);
        assert_eq!(grid.cells().len(), 6);
        assert_eq!(grid.occupied_count(), 0);
        assert_eq!(grid.first_free_lane(2), Some(0));
        assert_eq!(grid.free_lanes(1), 2);
    }

    #[test]
    fn first_free_lane_is_lowest_index() {
        let mut grid = OccupancyGrid::new(1, 3);
        grid.occupy(Cell::new(0, 0), v("a"));
        assert_eq!(grid.first_free_lane(0), Some(1));
        grid.occupy(Cell::new(0, 1), v("b"));
        assert_eq!(grid.first_free_lane(0), Some(2));
        grid.occupy(Cell::new(0, 2), v("c"));
        assert_eq!(grid.first_free_lane(0), None);
        grid.vacate(Cell::new(0, 1));
        assert_eq!(grid.first_free_lane(0), Some(1));
    }

    #[test]
    fn first_free_lane_except_skips_own_lane() {
        let mut grid = OccupancyGrid::new(1, 3);
        grid.occupy(Cell::new(0, 1), v("a"));
        assert_eq!(grid.first_free_lane_except(0, 0), Some(2));
        assert_eq!(grid.first_free_lane_except(0, 1), Some(0));
        grid.occupy(Cell::new(0, 2), v("b"));
        assert_eq!(grid.first_free_lane_except(0, 0), None);
    }

    #[test]
    fn segments_are_independent() {
        let mut grid = OccupancyGrid::new(2, 1);
        grid.occupy(Cell::new(0, 0), v("a"));
        assert_eq!(grid.first_free_lane(0), None);
        assert_eq!(grid.first_free_lane(1), Some(0));
        assert_eq!(grid.occupant(Cell::new(0, 0)), Some(&v("a")));
        assert!(grid.is_free(Cell::new(1, 0)));
    }

    #[test]
    fn occupy_and_vacate_report_previous() {
        let mut grid = OccupancyGrid::new(1, 1);
        assert_eq!(grid.occupy(Cell::new(0, 0), v("a")), None);
        assert_eq!(grid.vacate(Cell::new(0, 0)), Some(v("a")));
        assert_eq!(grid.vacate(Cell::new(0, 0)), None);
    }

    #[test]
    fn occupied_iterates_row_major() {
        let mut grid = OccupancyGrid::new(2, 2);
        grid.occupy(Cell::new(1, 1), v("late"));
        grid.occupy(Cell::new(0, 1), v("early"));
        let seen: Vec<_> = grid.occupied().map(|(c, id)| (c, id.clone())).collect();
        assert_eq!(seen, vec![(Cell::new(0, 1), v("early")), (Cell::new(1, 1), v("late"))]);
    }
}

#[cfg(test)]
mod registry_tests {
    use super::*;
    use crate::{TickCounts, VehicleRecord, VehicleRegistry};

    #[test]
    fn tick_all_decrements_and_counts_zeroes() {
        let mut reg = VehicleRegistry::new();
        reg.insert(v("a"), VehicleRecord { pos: Pos::new(1, 1), remaining: Ticks(1) });
        reg.insert(v("b"), VehicleRecord { pos: Pos::new(1, 2), remaining: Ticks(3) });
        reg.insert(v("c"), VehicleRecord { pos: Pos::new(2, 1), remaining: Ticks(0) });

        let counts = reg.tick_all();
        assert_eq!(counts, TickCounts { decremented: 2, reached_zero: 1 });
        assert_eq!(reg.get(&v("a")).unwrap().remaining, Ticks(0));
        assert_eq!(reg.get(&v("b")).unwrap().remaining, Ticks(2));
        assert_eq!(reg.get(&v("c")).unwrap().remaining, Ticks(0));

        // Already-zero countdowns never go negative nor count again.
        let counts = reg.tick_all();
        assert_eq!(counts, TickCounts { decremented: 1, reached_zero: 0 });
    }

    #[test]
    fn insert_remove() {
        let mut reg = VehicleRegistry::new();
        assert!(reg.is_empty());
        reg.insert(v("a"), VehicleRecord { pos: Pos::new(1, 1), remaining: Ticks(0) });
        assert!(reg.contains(&v("a")));
        assert_eq!(reg.len(), 1);
        assert!(reg.remove(&v("a")).is_some());
        assert!(reg.remove(&v("a")).is_none());
        assert!(reg.is_empty());
    }
}

#[cfg(test)]
mod state_tests {
    use super::*;
    use crate::{GridError, OccupancyGrid, RoadState, VehicleRecord, VehicleRegistry};

    #[test]
    fn place_relocate_remove_keep_bijection() {
        let mut state = RoadState::new(2, 2);
        state.place(v("a"), Cell::new(0, 0), Ticks(2));
        state.place(v("b"), Cell::new(0, 1), Ticks(1));
        assert!(state.check_invariants().is_ok());

        let from = state.relocate(&v("a"), Cell::new(1, 0), Some(Ticks(4)));
        assert_eq!(from, Some(Cell::new(0, 0)));
        assert_eq!(state.record(&v("a")).unwrap().pos, Pos::new(2, 1));
        assert_eq!(state.record(&v("a")).unwrap().remaining, Ticks(4));
        assert!(state.grid().is_free(Cell::new(0, 0)));
        assert!(state.check_invariants().is_ok());

        // Lane change keeps the countdown.
        state.relocate(&v("b"), Cell::new(0, 0), None);
        assert_eq!(state.record(&v("b")).unwrap().remaining, Ticks(1));
        assert!(state.check_invariants().is_ok());

        let removed = state.remove(&v("a")).unwrap();
        assert_eq!(removed.pos, Pos::new(2, 1));
        assert!(state.grid().is_free(Cell::new(1, 0)));
        assert!(state.remove(&v("a")).is_none());
        assert!(state.check_invariants().is_ok());
    }

    #[test]
    fn relocate_unknown_vehicle_is_none() {
        let mut state = RoadState::new(1, 2);
        assert_eq!(state.relocate(&v("ghost"), Cell::new(0, 1), None), None);
        assert_eq!(state.grid().occupied_count(), 0);
    }

    #[test]
    #[should_panic(expected = "already held by")]
    fn placing_on_occupied_cell_panics() {
        let mut state = RoadState::new(1, 1);
        state.place(v("a"), Cell::new(0, 0), Ticks(0));
        state.place(v("b"), Cell::new(0, 0), Ticks(0));
    }

    #[test]
    fn vehicles_sorted_by_id() {
        let mut state = RoadState::new(1, 3);
        state.place(v("c"), Cell::new(0, 0), Ticks(0));
        state.place(v("a"), Cell::new(0, 1), Ticks(0));
        state.place(v("b"), Cell::new(0, 2), Ticks(0));
        let ids: Vec<_> = state.vehicles().into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![v("a"), v("b"), v("c")]);
    }

    #[test]
    fn detects_record_without_cell() {
        let grid = OccupancyGrid::new(1, 2);
        let mut reg = VehicleRegistry::new();
        reg.insert(v("a"), VehicleRecord { pos: Pos::new(1, 1), remaining: Ticks(0) });
        let state = RoadState::from_parts(grid, reg);
        assert!(matches!(state.check_invariants(), Err(GridError::RecordWithoutCell { .. })));
    }

    #[test]
    fn detects_cell_without_record() {
        let mut grid = OccupancyGrid::new(1, 2);
        grid.occupy(Cell::new(0, 1), v("a"));
        let state = RoadState::from_parts(grid, VehicleRegistry::new());
        assert!(matches!(state.check_invariants(), Err(GridError::CellWithoutRecord { .. })));
    }

    #[test]
    fn detects_out_of_range_record() {
        let grid = OccupancyGrid::new(1, 1);
        let mut reg = VehicleRegistry::new();
        reg.insert(v("a"), VehicleRecord { pos: Pos::new(2, 1), remaining: Ticks(0) });
        let state = RoadState::from_parts(grid, reg);
        assert!(matches!(state.check_invariants(), Err(GridError::PositionOutOfRange { .. })));
    }

    #[test]
    fn detects_mismatched_position() {
        let mut grid = OccupancyGrid::new(1, 2);
        grid.occupy(Cell::new(0, 0), v("a"));
        let mut reg = VehicleRegistry::new();
        reg.insert(v("a"), VehicleRecord { pos: Pos::new(1, 2), remaining: Ticks(0) });
        let state = RoadState::from_parts(grid, reg);
        assert!(state.check_invariants().is_err());
    }
}
