//! Road configuration.

use crate::{RoadError, RoadResult};

/// How re-evaluation picks the next deferred request to resume when several
/// categories have eligible requests.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WakePolicy {
    /// Fixed category order: exit > advance > change-lane > circulate > enter.
    /// FIFO within each category.
    #[default]
    Precedence,
    /// Oldest eligible request first, whatever its category.
    GlobalFifo,
}

/// Dimensions and scheduling policy of one road.
///
/// Typically built by the driver's bootstrap code and handed to
/// `RoadBuilder`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoadConfig {
    /// Number of sequential segments.  Must be at least 1.
    pub segments: usize,

    /// Number of parallel lanes per segment.  Must be at least 1.
    pub lanes: usize,

    /// Cross-category wake-up order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub policy: WakePolicy,
}

impl RoadConfig {
    /// A road with the default [`WakePolicy::Precedence`] policy.
    pub fn new(segments: usize, lanes: usize) -> Self {
        Self { segments, lanes, policy: WakePolicy::default() }
    }

    pub fn with_policy(mut self, policy: WakePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Reject non-positive dimensions.
    pub fn validate(&self) -> RoadResult<()> {
        if self.segments == 0 {
            return Err(RoadError::Config("segment count must be at least 1".into()));
        }
        if self.lanes == 0 {
            return Err(RoadError::Config("lane count must be at least 1".into()));
        }
        Ok(())
    }

    /// Total number of grid cells.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.segments * self.lanes
    }
}
