//! `#`-separated listings files.
//!
//! ```text
//! <KIND>#<city>#<unit price>#<area>#<rooms>#<CATEGORY>[#<floor>#<yes|no>]
//! ```
//!
//! `PANEL` (any case) marks an apartment and requires the floor and
//! insulation fields. Every other kind is a plain property with exactly
//! six fields.

use crate::catalog::Catalog;
use crate::error::{Error, ParseError, Result};
use crate::loaders::traits::ListingSource;
use crate::loaders::types::{LoadOptions, LoadOutcome, LoadSummary, ParsePolicy};
use crate::models::{valuation, Apartment, Category, Listing, Property};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const APARTMENT_KIND: &str = "PANEL";
const PROPERTY_FIELDS: usize = 6;
const APARTMENT_FIELDS: usize = 8;

/// Loads listings from a text file on disk
pub struct TextFileLoader {
    path: PathBuf,
    options: LoadOptions,
}

impl TextFileLoader {
    /// Create a loader with default options (skip bad records, no discount)
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_options(path, LoadOptions::default())
    }

    pub fn with_options(path: impl Into<PathBuf>, options: LoadOptions) -> Self {
        Self {
            path: path.into(),
            options,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ListingSource for TextFileLoader {
    fn load(&self) -> Result<LoadOutcome> {
        info!("Loading listings from {}", self.path().display());
        let file = File::open(self.path())?;
        load_from_reader(BufReader::new(file), &self.options)
    }

    fn source_name(&self) -> &'static str {
        "text file"
    }
}

/// Parse every line of `reader` into a fresh catalog.
pub fn load_from_reader<R: BufRead>(reader: R, options: &LoadOptions) -> Result<LoadOutcome> {
    if let Some(percent) = options.discount {
        if !percent.is_finite() || percent < 0.0 {
            return Err(Error::InvalidDiscount(percent));
        }
    }

    let mut catalog = Catalog::new();
    let mut summary = LoadSummary::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = index + 1;
        if line.trim().is_empty() {
            continue;
        }
        summary.records += 1;

        let mut listing = match parse_record(line_no, &line) {
            Ok(listing) => listing,
            Err(e) => match options.policy {
                ParsePolicy::Skip => {
                    warn!("Skipping record: {}", e);
                    summary.skipped.push(e);
                    continue;
                }
                ParsePolicy::Abort => return Err(e.into()),
            },
        };

        if let Some(percent) = options.discount {
            listing.apply_discount(percent)?;
        }

        if catalog.add(listing) {
            summary.inserted += 1;
        } else {
            summary.duplicates += 1;
        }
    }

    info!(
        "Loaded {} listings from {} records ({} duplicates, {} skipped)",
        summary.inserted,
        summary.records,
        summary.duplicates,
        summary.skipped.len()
    );

    Ok(LoadOutcome { catalog, summary })
}

/// Parse one record. `line_no` is only used for error reporting.
pub fn parse_record(line_no: usize, line: &str) -> std::result::Result<Listing, ParseError> {
    let fields: Vec<&str> = line.split('#').map(str::trim).collect();

    let is_apartment = fields[0].eq_ignore_ascii_case(APARTMENT_KIND);
    let (kind, expected) = if is_apartment {
        ("apartment", APARTMENT_FIELDS)
    } else {
        ("property", PROPERTY_FIELDS)
    };
    if fields.len() != expected {
        return Err(ParseError::FieldCount {
            line: line_no,
            kind,
            expected,
            found: fields.len(),
        });
    }

    let city = fields[1];
    let unit_price = parse_non_negative(line_no, "unit price", fields[2])?;
    let area = parse_area(line_no, fields[3])?;
    if !valuation::price_fits(unit_price, area) {
        return Err(ParseError::OutOfRange {
            line: line_no,
            field: "unit price",
            value: fields[2].to_string(),
        });
    }
    let room_count = parse_non_negative(line_no, "room count", fields[4])?;
    let category = fields[5].parse::<Category>().map_err(|value| ParseError::UnknownCategory {
        line: line_no,
        value,
    })?;

    let property = Property::new(city, unit_price, area, room_count, category);
    if !is_apartment {
        debug!("Parsed property in {} (line {})", city, line_no);
        return Ok(Listing::Property(property));
    }

    let floor: i32 = fields[6].parse().map_err(|_| ParseError::InvalidNumber {
        line: line_no,
        field: "floor",
        value: fields[6].to_string(),
    })?;
    let insulated = parse_flag(line_no, fields[7])?;

    debug!("Parsed apartment in {} on floor {} (line {})", city, floor, line_no);
    Ok(Listing::Apartment(Apartment::new(property, floor, insulated)))
}

fn parse_non_negative(
    line_no: usize,
    field: &'static str,
    value: &str,
) -> std::result::Result<f64, ParseError> {
    let number: f64 = value.parse().map_err(|_| ParseError::InvalidNumber {
        line: line_no,
        field,
        value: value.to_string(),
    })?;
    if !number.is_finite() || number < 0.0 {
        return Err(ParseError::OutOfRange {
            line: line_no,
            field,
            value: value.to_string(),
        });
    }
    Ok(number)
}

fn parse_area(line_no: usize, value: &str) -> std::result::Result<u32, ParseError> {
    let number: i64 = value.parse().map_err(|_| ParseError::InvalidNumber {
        line: line_no,
        field: "area",
        value: value.to_string(),
    })?;
    match u32::try_from(number) {
        Ok(area) if area > 0 => Ok(area),
        _ => Err(ParseError::OutOfRange {
            line: line_no,
            field: "area",
            value: value.to_string(),
        }),
    }
}

fn parse_flag(line_no: usize, value: &str) -> std::result::Result<bool, ParseError> {
    if value.eq_ignore_ascii_case("yes") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("no") {
        Ok(false)
    } else {
        Err(ParseError::InvalidFlag {
            line: line_no,
            value: value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Valuation;
    use std::io::Cursor;

    const SAMPLE: &str = "\
HOUSE#Budapest#35000#120#4#FAMILY_HOUSE
panel#Debrecen#12#234#3#CONDOMINIUM#6#no
PANEL#Budapest#35000#120#4#CONDOMINIUM#10#yes
HOUSE#Nyíregyháza#20000#80#2#FARM
";

    fn load(input: &str, options: LoadOptions) -> Result<LoadOutcome> {
        load_from_reader(Cursor::new(input), &options)
    }

    #[test]
    fn parses_property_record() {
        let listing = parse_record(1, "HOUSE#Budapest#35000#120#4#FAMILY_HOUSE").unwrap();
        assert_eq!(
            listing,
            Listing::Property(Property::new("Budapest", 35000.0, 120, 4.0, Category::FamilyHouse))
        );
        assert_eq!(listing.total_price(), 5_460_000);
    }

    #[test]
    fn parses_apartment_record_case_insensitively() {
        let listing = parse_record(1, "Panel#Debrecen#12#234#3#FARM#6#No").unwrap();
        let apartment = listing.as_apartment().unwrap();
        assert_eq!(apartment.floor, 6);
        assert!(!apartment.insulated);
        assert!(apartment.has_same_adjusted_amount());
    }

    #[test]
    fn tolerates_whitespace_and_carriage_return() {
        let listing = parse_record(1, " PANEL # Eger # 10.5 # 40 # 1.5 # FARM # 1 # YES \r").unwrap();
        let apartment = listing.as_apartment().unwrap();
        assert_eq!(apartment.property.city, "Eger");
        assert!(apartment.insulated);
    }

    #[test]
    fn rejects_wrong_field_count() {
        let err = parse_record(3, "PANEL#Eger#10#40#2#FARM").unwrap_err();
        assert_eq!(
            err,
            ParseError::FieldCount {
                line: 3,
                kind: "apartment",
                expected: 8,
                found: 6,
            }
        );

        let err = parse_record(4, "HOUSE#Eger#10#40#2#FARM#1#yes").unwrap_err();
        assert!(matches!(err, ParseError::FieldCount { expected: 6, found: 8, .. }));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            parse_record(1, "HOUSE#Eger#abc#40#2#FARM").unwrap_err(),
            ParseError::InvalidNumber { field: "unit price", .. }
        ));
        assert!(matches!(
            parse_record(1, "HOUSE#Eger#10#40.5#2#FARM").unwrap_err(),
            ParseError::InvalidNumber { field: "area", .. }
        ));
        assert!(matches!(
            parse_record(1, "HOUSE#Eger#10#0#2#FARM").unwrap_err(),
            ParseError::OutOfRange { field: "area", .. }
        ));
        assert!(matches!(
            parse_record(1, "HOUSE#Eger#-10#40#2#FARM").unwrap_err(),
            ParseError::OutOfRange { field: "unit price", .. }
        ));
        assert!(matches!(
            parse_record(1, "HOUSE#Eger#10#40#2#farm").unwrap_err(),
            ParseError::UnknownCategory { .. }
        ));
        assert!(matches!(
            parse_record(1, "PANEL#Eger#10#40#2#FARM#x#yes").unwrap_err(),
            ParseError::InvalidNumber { field: "floor", .. }
        ));
        assert!(matches!(
            parse_record(1, "PANEL#Eger#10#40#2#FARM#1#maybe").unwrap_err(),
            ParseError::InvalidFlag { .. }
        ));
    }

    #[test]
    fn rejects_price_whose_total_cannot_be_represented() {
        let err = parse_record(2, "HOUSE#Eger#1e300#10#2#FARM").unwrap_err();
        assert_eq!(
            err,
            ParseError::OutOfRange {
                line: 2,
                field: "unit price",
                value: "1e300".to_string(),
            }
        );

        let outcome = load(
            "HOUSE#Eger#1e300#10#2#FARM\nHOUSE#Pecs#1e300#10#2#FARM\nHOUSE#Eger#10#40#2#FARM\n",
            LoadOptions::default(),
        )
        .unwrap();
        assert_eq!(outcome.catalog.len(), 1);
        assert_eq!(outcome.summary.skipped.len(), 2);
    }

    #[test]
    fn zero_rooms_are_accepted() {
        let listing = parse_record(1, "HOUSE#Eger#10#40#0#FARM").unwrap();
        assert!(listing.average_area_per_room().is_err());
    }

    #[test]
    fn loads_sample_in_catalog_order() {
        let outcome = load(SAMPLE, LoadOptions::default()).unwrap();
        assert_eq!(outcome.summary.records, 4);
        assert_eq!(outcome.summary.inserted, 3);
        assert_eq!(outcome.summary.duplicates, 1);
        assert!(outcome.summary.skipped.is_empty());

        let cities: Vec<&str> = outcome.catalog.all().map(Listing::city).collect();
        assert_eq!(cities, vec!["Budapest", "Debrecen", "Nyíregyháza"]);
        // The house came first, so the apartment with the same key is dropped.
        assert!(outcome.catalog.all().next().unwrap().as_apartment().is_none());
    }

    #[test]
    fn skip_policy_counts_bad_lines() {
        let input = "HOUSE#Eger#10#40#2#FARM\n\nbroken line\nHOUSE#Pécs#10#40#2#SHED\n";
        let outcome = load(input, LoadOptions::default()).unwrap();
        assert_eq!(outcome.summary.records, 3);
        assert_eq!(outcome.summary.inserted, 1);
        let lines: Vec<usize> = outcome.summary.skipped.iter().map(ParseError::line).collect();
        assert_eq!(lines, vec![3, 4]);
    }

    #[test]
    fn abort_policy_stops_at_first_bad_line() {
        let options = LoadOptions {
            policy: ParsePolicy::Abort,
            ..LoadOptions::default()
        };
        let err = load("HOUSE#Eger#10#40#2#FARM\nbroken\n", options).unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::FieldCount { line: 2, .. })));
    }

    #[test]
    fn discount_applies_before_cataloging() {
        let options = LoadOptions {
            discount: Some(50.0),
            ..LoadOptions::default()
        };
        let outcome = load("HOUSE#Eger#100#40#2#FARM\n", options).unwrap();
        let listing = outcome.catalog.all().next().unwrap();
        assert_eq!(listing.unit_price(), 50.0);
        assert_eq!(listing.total_price(), 2000);
    }

    #[test]
    fn negative_discount_is_refused_up_front() {
        let options = LoadOptions {
            discount: Some(-1.0),
            ..LoadOptions::default()
        };
        let err = load(SAMPLE, options).unwrap_err();
        assert!(matches!(err, Error::InvalidDiscount(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let loader = TextFileLoader::new("/nonexistent/listings.txt");
        assert_eq!(loader.path(), Path::new("/nonexistent/listings.txt"));
        assert!(matches!(loader.load().unwrap_err(), Error::Io(_)));
        assert_eq!(loader.source_name(), "text file");
    }
}
