pub mod text;
pub mod traits;
pub mod types;

pub use text::TextFileLoader;
pub use traits::ListingSource;
pub use types::{LoadOptions, LoadOutcome, LoadSummary, ParsePolicy};
