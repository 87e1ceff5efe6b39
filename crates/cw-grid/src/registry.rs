//! `VehicleRegistry` — position and remaining ticks of every vehicle on the road.

use cw_core::{Pos, Ticks, VehicleId};

#[cfg(feature = "fx-hash")]
type RecordMap = rustc_hash::FxHashMap<VehicleId, VehicleRecord>;
#[cfg(not(feature = "fx-hash"))]
type RecordMap = std::collections::HashMap<VehicleId, VehicleRecord>;

/// Where a vehicle is and how long it must still wait there.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleRecord {
    /// 1-based position; always names the grid cell the vehicle occupies.
    pub pos: Pos,
    /// Ticks left before the vehicle may leave its cell.
    pub remaining: Ticks,
}

/// What one clock tick did to the registry.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct TickCounts {
    /// Records whose countdown was positive and went down by one.
    pub decremented: usize,
    /// Records whose countdown went from 1 to 0 on this tick.
    pub reached_zero: usize,
}

/// Sparse map of live vehicles.  Vehicles that have exited have no entry.
#[derive(Clone, Debug, Default)]
pub struct VehicleRegistry {
    records: RecordMap,
}

impl VehicleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, vehicle: &VehicleId) -> Option<&VehicleRecord> {
        self.records.get(vehicle)
    }

    #[inline]
    pub fn get_mut(&mut self, vehicle: &VehicleId) -> Option<&mut VehicleRecord> {
        self.records.get_mut(vehicle)
    }

    #[inline]
    pub fn contains(&self, vehicle: &VehicleId) -> bool {
        self.records.contains_key(vehicle)
    }

    /// Insert or replace a record, returning the previous one.
    pub fn insert(&mut self, vehicle: VehicleId, record: VehicleRecord) -> Option<VehicleRecord> {
        self.records.insert(vehicle, record)
    }

    pub fn remove(&mut self, vehicle: &VehicleId) -> Option<VehicleRecord> {
        self.records.remove(vehicle)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Unordered iteration over all live records.
    pub fn iter(&self) -> impl Iterator<Item = (&VehicleId, &VehicleRecord)> + '_ {
        self.records.iter()
    }

    /// Count every positive countdown down by one.
    pub fn tick_all(&mut self) -> TickCounts {
        let mut counts = TickCounts::default();
        for record in self.records.values_mut() {
            if record.remaining.decrement() {
                counts.decremented += 1;
                if record.remaining.is_zero() {
                    counts.reached_zero += 1;
                }
            }
        }
        counts
    }
}
