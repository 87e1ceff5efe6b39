//! Fluent builder for constructing a [`Road`].

use cw_core::{RoadConfig, RoadResult, WakePolicy};

use crate::{ChannelRoad, MonitorRoad, NoopObserver, Road, RoadObserver};

/// Which synchronization strategy backs the road.  Both satisfy the same
/// contract; they differ only in how exclusive access is obtained.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum Realization {
    /// Mutex plus per-caller condition variables.
    #[default]
    Monitor,
    /// Dedicated server thread fed over channels.
    Channel,
}

/// Fluent builder for [`MonitorRoad`] / [`ChannelRoad`].
///
/// # Optional inputs (have defaults)
///
/// | Method           | Default                               |
/// |------------------|---------------------------------------|
/// | `.policy(p)`     | the policy already in the config      |
/// | `.observer(o)`   | [`NoopObserver`]                      |
///
/// # Example
///
/// ```rust,ignore
/// let road = RoadBuilder::new(RoadConfig::new(4, 2))
///     .policy(WakePolicy::GlobalFifo)
///     .observer(trace)
///     .build(Realization::Channel)?;
/// ```
pub struct RoadBuilder {
    config:   RoadConfig,
    observer: Option<Box<dyn RoadObserver + Send>>,
}

impl RoadBuilder {
    pub fn new(config: RoadConfig) -> Self {
        Self { config, observer: None }
    }

    /// Override the cross-category wake-up policy.
    pub fn policy(mut self, policy: WakePolicy) -> Self {
        self.config.policy = policy;
        self
    }

    /// Receive every request event and tick report.
    pub fn observer(mut self, observer: impl RoadObserver + Send + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    fn take_observer(&mut self) -> Box<dyn RoadObserver + Send> {
        self.observer.take().unwrap_or_else(|| Box::new(NoopObserver))
    }

    /// Validate the configuration and build a [`MonitorRoad`].
    pub fn build_monitor(mut self) -> RoadResult<MonitorRoad> {
        let observer = self.take_observer();
        MonitorRoad::with_observer(self.config, observer)
    }

    /// Validate the configuration and start a [`ChannelRoad`] server.
    pub fn spawn_channel(mut self) -> RoadResult<ChannelRoad> {
        let observer = self.take_observer();
        ChannelRoad::spawn_with_observer(self.config, observer)
    }

    /// Build either realization behind the [`Road`] trait.
    pub fn build(self, realization: Realization) -> RoadResult<Box<dyn Road>> {
        Ok(match realization {
            Realization::Monitor => Box::new(self.build_monitor()?),
            Realization::Channel => Box::new(self.spawn_channel()?),
        })
    }
}
