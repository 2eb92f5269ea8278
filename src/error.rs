use thiserror::Error;

/// A malformed line in a listings file. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("line {line}: expected {expected} fields for {kind} record, found {found}")]
    FieldCount {
        line: usize,
        kind: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: invalid {field} '{value}'")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("line {line}: {field} out of range: {value}")]
    OutOfRange {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("line {line}: unknown category '{value}'")]
    UnknownCategory { line: usize, value: String },

    #[error("line {line}: insulation flag must be yes or no, got '{value}'")]
    InvalidFlag { line: usize, value: String },
}

impl ParseError {
    pub fn line(&self) -> usize {
        match self {
            Self::FieldCount { line, .. }
            | Self::InvalidNumber { line, .. }
            | Self::OutOfRange { line, .. }
            | Self::UnknownCategory { line, .. }
            | Self::InvalidFlag { line, .. } => *line,
        }
    }
}

/// Division that has no defined result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArithmeticError {
    #[error("listing has no rooms")]
    NoRooms,

    #[error("total area of the catalog is zero")]
    ZeroTotalArea,

    #[error("cannot average over zero listings")]
    ZeroCount,

    #[error("total price exceeds the supported range")]
    Overflow,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Arithmetic error: {0}")]
    Arithmetic(#[from] ArithmeticError),

    #[error("Catalog is empty: no {0}")]
    EmptyCatalog(&'static str),

    #[error("Invalid discount: {0}%")]
    InvalidDiscount(f64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
