pub mod sink;

pub use sink::{ConsoleSink, FanOut, FileSink, LineWriter};

use crate::catalog::Catalog;
use crate::error::{ArithmeticError, Error, Result};
use crate::models::{Category, Listing, Valuation};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io;
use tracing::{debug, info};

/// City whose priciest listing gets its own statistic.
pub const FEATURED_CITY: &str = "Budapest";

pub const AVERAGE_PRICE_PER_AREA: &str = "Average square meter price";
pub const CHEAPEST_TOTAL_PRICE: &str = "Cheapest property total price";
pub const FEATURED_AREA_PER_ROOM: &str = "Avg sqm/room (most expensive Budapest)";
pub const PORTFOLIO_TOTAL: &str = "Total price of all properties";
pub const MEAN_TOTAL_PRICE: &str = "Average total price";
pub const BELOW_MEAN_CONDOMINIUMS: &str = "Condominiums below average price";

/// A condominium priced at or below the catalog mean
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CondominiumEntry {
    pub city: String,
    pub total_price: i64,
}

/// Aggregate statistics over one catalog
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub listing_count: usize,
    /// Sum of unit prices over sum of areas
    pub average_price_per_area: f64,
    pub cheapest: Listing,
    pub cheapest_total_price: i64,
    /// Area per room of the priciest Budapest listing, if there is one
    pub featured_area_per_room: Option<f64>,
    pub portfolio_total: i64,
    /// Truncated toward zero
    pub mean_total_price: i64,
    pub below_mean_condominiums: Vec<CondominiumEntry>,
}

impl Report {
    /// Compute every statistic, in output order.
    pub fn generate(catalog: &Catalog) -> Result<Self> {
        info!("Generating report over {} listings", catalog.len());

        let average_price_per_area = average_price_per_area(catalog)?;

        let cheapest = catalog
            .all()
            .min_by_key(|listing| listing.total_price())
            .ok_or(Error::EmptyCatalog("cheapest listing"))?;
        let cheapest_total_price = cheapest.total_price();

        let featured_area_per_room = match priciest_in_city(catalog, FEATURED_CITY) {
            Some(listing) => Some(listing.average_area_per_room()?),
            None => {
                debug!("No {} listings, skipping featured statistic", FEATURED_CITY);
                None
            }
        };

        let portfolio_total = catalog
            .all()
            .try_fold(0i64, |sum, listing| sum.checked_add(listing.total_price()))
            .ok_or(ArithmeticError::Overflow)?;

        let count = catalog.len() as i64;
        if count == 0 {
            return Err(ArithmeticError::ZeroCount.into());
        }
        let mean_total_price = portfolio_total / count;

        let below_mean_condominiums = catalog
            .all()
            .filter(|listing| listing.category() == Category::Condominium)
            .filter(|listing| listing.total_price() <= mean_total_price)
            .map(|listing| CondominiumEntry {
                city: listing.city().to_string(),
                total_price: listing.total_price(),
            })
            .collect();

        Ok(Self {
            generated_at: Utc::now(),
            listing_count: catalog.len(),
            average_price_per_area,
            cheapest: cheapest.clone(),
            cheapest_total_price,
            featured_area_per_room,
            portfolio_total,
            mean_total_price,
            below_mean_condominiums,
        })
    }

    /// Report text, one statistic per line.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("{}: {:.2}", AVERAGE_PRICE_PER_AREA, self.average_price_per_area),
            format!("{}: {}", CHEAPEST_TOTAL_PRICE, self.cheapest_total_price),
        ];
        if let Some(area_per_room) = self.featured_area_per_room {
            lines.push(format!("{}: {:.2}", FEATURED_AREA_PER_ROOM, area_per_room));
        }
        lines.push(format!("{}: {}", PORTFOLIO_TOTAL, self.portfolio_total));
        lines.push(format!("{}: {}", MEAN_TOTAL_PRICE, self.mean_total_price));
        lines.push(format!(
            "{}: {}",
            BELOW_MEAN_CONDOMINIUMS,
            self.below_mean_condominiums.len()
        ));
        lines.extend(
            self.below_mean_condominiums
                .iter()
                .map(|entry| format!("{} {}", entry.city, entry.total_price)),
        );
        lines
    }

    pub fn write_to<W: LineWriter + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
        for line in self.lines() {
            writer.write_line(&line)?;
        }
        writer.flush()
    }
}

fn average_price_per_area(catalog: &Catalog) -> Result<f64> {
    let total_unit_price: f64 = catalog.all().map(Listing::unit_price).sum();
    let total_area: f64 = catalog.all().map(|listing| f64::from(listing.area())).sum();
    if total_area == 0.0 {
        return Err(ArithmeticError::ZeroTotalArea.into());
    }
    Ok(total_unit_price / total_area)
}

/// Highest unit price among listings in `city` (case-insensitive). The
/// earliest listing in catalog order wins a tie.
fn priciest_in_city<'a>(catalog: &'a Catalog, city: &str) -> Option<&'a Listing> {
    catalog
        .all()
        .filter(|listing| listing.city().to_lowercase() == city.to_lowercase())
        .reduce(|best, listing| {
            if listing.unit_price() > best.unit_price() {
                listing
            } else {
                best
            }
        })
}
