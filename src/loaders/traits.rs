use crate::error::Result;
use crate::loaders::types::LoadOutcome;

/// Common trait for anything that can fill a catalog with listings
pub trait ListingSource {
    /// Read every record and build the catalog
    fn load(&self) -> Result<LoadOutcome>;

    /// Get the name of the source, for logging
    fn source_name(&self) -> &'static str;
}
