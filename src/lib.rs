pub mod catalog;
pub mod cli;
pub mod error;
pub mod loaders;
pub mod models;
pub mod report;

pub use catalog::Catalog;
pub use error::{ArithmeticError, Error, ParseError, Result};
pub use models::{Apartment, Category, Listing, Property, Valuation};
pub use report::Report;
