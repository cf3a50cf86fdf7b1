use anyhow::Result;

use crate::loader::snapshot::UnitSet;

/// Units the host already loads through its own registration mechanism.
/// Anything reported here is excluded from the autoloaded set and merged
/// back in for the admin listing.
pub trait HostRegistry {
    fn native_units(&self) -> Result<UnitSet>;
}

/// Fixed registry contents, for hosts whose native set is known up front.
#[derive(Debug, Default)]
pub struct StaticRegistry {
    units: UnitSet,
}

impl StaticRegistry {
    pub fn new(units: UnitSet) -> Self {
        Self { units }
    }
}

impl HostRegistry for StaticRegistry {
    fn native_units(&self) -> Result<UnitSet> {
        Ok(self.units.clone())
    }
}
