//! Road coordinates.
//!
//! Two coordinate systems coexist and must not be mixed:
//!
//! - [`Pos`]: 1-based `(segment, lane)`, the only form callers ever see.  A
//!   segment of `S + 1` is the out-of-range position returned when a vehicle
//!   drives off the end of the road.
//! - [`Cell`]: 0-based `(segment, lane)`, used to index the occupancy grid.

use std::fmt;

/// A 1-based road position as reported to vehicles.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pos {
    pub segment: usize,
    pub lane:    usize,
}

impl Pos {
    #[inline]
    pub const fn new(segment: usize, lane: usize) -> Self {
        Self { segment, lane }
    }

    /// Grid cell for this position.
    ///
    /// # Panics
    /// Panics in debug mode if either coordinate is 0 (not 1-based).
    #[inline]
    pub fn cell(self) -> Cell {
        debug_assert!(self.segment >= 1 && self.lane >= 1, "position {self} is not 1-based");
        Cell::new(self.segment - 1, self.lane - 1)
    }

    /// `true` if this position lies past the last of `segments` segments,
    /// i.e. the vehicle has driven off the road.
    #[inline]
    pub fn is_off_road(self, segments: usize) -> bool {
        self.segment > segments
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.segment, self.lane)
    }
}

/// A 0-based grid cell.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub segment: usize,
    pub lane:    usize,
}

impl Cell {
    #[inline]
    pub const fn new(segment: usize, lane: usize) -> Self {
        Self { segment, lane }
    }

    /// External position for this cell.
    #[inline]
    pub fn pos(self) -> Pos {
        Pos::new(self.segment + 1, self.lane + 1)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}][{}]", self.segment, self.lane)
    }
}
