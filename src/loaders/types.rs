use crate::catalog::Catalog;
use crate::error::ParseError;

/// What to do when a record cannot be parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParsePolicy {
    /// Log the record, count it and keep going
    #[default]
    Skip,
    /// Fail the whole load
    Abort,
}

/// Options applied while loading listings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadOptions {
    pub policy: ParsePolicy,
    /// Percentage discount applied to every listing before it is cataloged
    pub discount: Option<f64>,
}

/// Counters describing one load
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadSummary {
    /// Non-blank lines read
    pub records: usize,
    pub inserted: usize,
    /// Well-formed records dropped because their key was already present
    pub duplicates: usize,
    pub skipped: Vec<ParseError>,
}

/// A freshly loaded catalog and how it was built
#[derive(Debug, Clone, Default)]
pub struct LoadOutcome {
    pub catalog: Catalog,
    pub summary: LoadSummary,
}
