//! One vehicle's trip down the road.

use anyhow::{Context, Result};
use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use cw_coord::Road;
use cw_core::{Pos, RoadError, Ticks, VehicleId};

/// Parameters drawn by the driver for one vehicle.
pub struct JourneyPlan {
    pub index:       usize,
    pub seed:        u64,
    pub max_budget:  u32,
    pub change_lane: f64,
}

/// What happened on the way.
#[derive(Debug)]
pub struct Journey {
    pub vehicle:           VehicleId,
    pub entered_lane:      usize,
    pub exit:              Pos,
    pub lane_changes:      usize,
    pub cancelled_changes: usize,
}

impl JourneyPlan {
    pub fn run(self, road: &dyn Road) -> Result<Journey> {
        let vehicle = VehicleId::new(format!("car-{:02}", self.index));
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let segments = road.config().segments;
        let lanes = road.config().lanes;

        let mut pos = road
            .enter(&vehicle, self.budget(&mut rng))
            .with_context(|| format!("{vehicle} entering"))?;
        let mut journey = Journey {
            vehicle:           vehicle.clone(),
            entered_lane:      pos.lane,
            exit:              pos,
            lane_changes:      0,
            cancelled_changes: 0,
        };
        debug!("{vehicle} entered at {pos}");

        while !pos.is_off_road(segments) {
            road.circulate(&vehicle)
                .with_context(|| format!("{vehicle} circulating at {pos}"))?;

            if lanes > 1 && rng.gen_bool(self.change_lane) {
                match road.change_lane(&vehicle) {
                    Ok(moved) => {
                        debug!("{vehicle} changed lane {pos} -> {moved}");
                        pos = moved;
                        journey.lane_changes += 1;
                    }
                    Err(RoadError::Cancelled(_)) => journey.cancelled_changes += 1,
                    Err(e) => return Err(e).with_context(|| format!("{vehicle} changing lane at {pos}")),
                }
            }

            pos = road
                .advance(&vehicle, self.budget(&mut rng))
                .with_context(|| format!("{vehicle} advancing from {pos}"))?;
        }

        // Already off the road; exit is a no-op but keeps the protocol whole.
        road.exit(&vehicle)?;
        journey.exit = pos;
        debug!("{vehicle} left at {pos}");
        Ok(journey)
    }

    fn budget(&self, rng: &mut SmallRng) -> Ticks {
        Ticks(rng.gen_range(0..=self.max_budget))
    }
}
