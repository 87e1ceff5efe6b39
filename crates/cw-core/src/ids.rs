//! Vehicle identifiers.
//!
//! Vehicles are named by the driver (e.g. `"car-17"`), not allocated by the
//! coordinator, so the id wraps a shared string rather than an index.  Cloning
//! is a reference-count bump; ids are cloned into the grid, the registry, and
//! every deferred request.

use std::fmt;
use std::sync::Arc;

/// Unique name of a vehicle.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleId(Arc<str>);

impl VehicleId {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VehicleId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for VehicleId {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

impl AsRef<str> for VehicleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
