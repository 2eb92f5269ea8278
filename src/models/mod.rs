pub mod valuation;

use crate::error::{ArithmeticError, Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;
use valuation::FloorAdjustment;

/// Kind of property a listing describes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    #[serde(alias = "FAMILYHOUSE")]
    FamilyHouse,
    Condominium,
    Farm,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FamilyHouse => "FAMILY_HOUSE",
            Self::Condominium => "CONDOMINIUM",
            Self::Farm => "FARM",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact, case-sensitive match. `FAMILYHOUSE` is accepted for older files.
impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "FAMILY_HOUSE" | "FAMILYHOUSE" => Ok(Self::FamilyHouse),
            "CONDOMINIUM" => Ok(Self::Condominium),
            "FARM" => Ok(Self::Farm),
            other => Err(other.to_string()),
        }
    }
}

/// Derived values every listing kind can answer
pub trait Valuation {
    /// Total price in whole currency units, after all surcharges.
    fn total_price(&self) -> i64;

    /// Area divided by room count. Fails when the listing has no rooms.
    fn average_area_per_room(&self) -> std::result::Result<f64, ArithmeticError>;

    /// Multi-line human readable summary.
    fn describe(&self) -> String;
}

/// Core listing data
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Property {
    pub city: String,
    /// Price per square meter
    pub unit_price: f64,
    /// Square meters
    pub area: u32,
    pub room_count: f64,
    pub category: Category,
}

impl Property {
    pub fn new(
        city: impl Into<String>,
        unit_price: f64,
        area: u32,
        room_count: f64,
        category: Category,
    ) -> Self {
        Self {
            city: city.into(),
            unit_price,
            area,
            room_count,
            category,
        }
    }

    /// Reduce the unit price by `percent`. Anything above 100 makes the
    /// price negative; only negative or non-finite input is refused.
    pub fn apply_discount(&mut self, percent: f64) -> Result<()> {
        if !percent.is_finite() || percent < 0.0 {
            return Err(Error::InvalidDiscount(percent));
        }
        let discounted = self.unit_price * (1.0 - percent / 100.0);
        debug!(
            "Discount {}% on {}: {} -> {}",
            percent, self.city, self.unit_price, discounted
        );
        self.unit_price = discounted;
        Ok(())
    }

    /// Summary block reporting `total_price` as the listing's total.
    fn describe_with_total(&self, total_price: i64) -> String {
        let average = match self.average_area_per_room() {
            Ok(value) => format!("{:.2}", value),
            Err(e) => format!("undefined ({})", e),
        };
        format!(
            "City: {}\nPrice: {}\nSize: {} sqm\nNumber of rooms: {}\nCategory: {}\nTotal price: {}\nAverage area per room: {}",
            self.city,
            self.unit_price,
            self.area,
            self.room_count,
            self.category,
            total_price,
            average,
        )
    }
}

impl Valuation for Property {
    fn total_price(&self) -> i64 {
        valuation::total_price(&self.city, self.unit_price, self.area)
    }

    fn average_area_per_room(&self) -> std::result::Result<f64, ArithmeticError> {
        valuation::per_room(f64::from(self.area), self.room_count)
    }

    fn describe(&self) -> String {
        self.describe_with_total(self.total_price())
    }
}

/// Panel apartment: a property on a given floor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Apartment {
    #[serde(flatten)]
    pub property: Property,
    pub floor: i32,
    pub insulated: bool,
}

impl Apartment {
    pub fn new(property: Property, floor: i32, insulated: bool) -> Self {
        Self {
            property,
            floor,
            insulated,
        }
    }

    pub fn floor_adjustment(&self) -> FloorAdjustment {
        FloorAdjustment::for_floor(self.floor, self.insulated)
    }

    /// True when neither the floor bonus nor the penalty changed the price.
    pub fn has_same_adjusted_amount(&self) -> bool {
        self.property.total_price() == self.total_price()
    }

    /// Adjusted total price per room.
    pub fn room_price(&self) -> std::result::Result<f64, ArithmeticError> {
        valuation::per_room(self.total_price() as f64, self.property.room_count)
    }
}

impl Valuation for Apartment {
    fn total_price(&self) -> i64 {
        let base = self.property.total_price();
        let adjustment = self.floor_adjustment();
        let total = adjustment.apply(base);
        if adjustment != FloorAdjustment::None {
            debug!("Floor {} {:?}: {} -> {}", self.floor, adjustment, base, total);
        }
        total
    }

    fn average_area_per_room(&self) -> std::result::Result<f64, ArithmeticError> {
        self.property.average_area_per_room()
    }

    fn describe(&self) -> String {
        format!(
            "{}\nFloor: {}\nInsulated: {}",
            self.property.describe_with_total(self.total_price()),
            self.floor,
            if self.insulated { "yes" } else { "no" },
        )
    }
}

/// Any listing in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Listing {
    Property(Property),
    Apartment(Apartment),
}

impl Listing {
    pub fn property(&self) -> &Property {
        match self {
            Self::Property(property) => property,
            Self::Apartment(apartment) => &apartment.property,
        }
    }

    pub fn property_mut(&mut self) -> &mut Property {
        match self {
            Self::Property(property) => property,
            Self::Apartment(apartment) => &mut apartment.property,
        }
    }

    pub fn as_apartment(&self) -> Option<&Apartment> {
        match self {
            Self::Apartment(apartment) => Some(apartment),
            Self::Property(_) => None,
        }
    }

    pub fn city(&self) -> &str {
        &self.property().city
    }

    pub fn unit_price(&self) -> f64 {
        self.property().unit_price
    }

    pub fn area(&self) -> u32 {
        self.property().area
    }

    pub fn room_count(&self) -> f64 {
        self.property().room_count
    }

    pub fn category(&self) -> Category {
        self.property().category
    }

    pub fn apply_discount(&mut self, percent: f64) -> Result<()> {
        self.property_mut().apply_discount(percent)
    }
}

impl Valuation for Listing {
    fn total_price(&self) -> i64 {
        match self {
            Self::Property(property) => property.total_price(),
            Self::Apartment(apartment) => apartment.total_price(),
        }
    }

    fn average_area_per_room(&self) -> std::result::Result<f64, ArithmeticError> {
        self.property().average_area_per_room()
    }

    fn describe(&self) -> String {
        match self {
            Self::Property(property) => property.describe(),
            Self::Apartment(apartment) => apartment.describe(),
        }
    }
}

impl From<Property> for Listing {
    fn from(value: Property) -> Self {
        Self::Property(value)
    }
}

impl From<Apartment> for Listing {
    fn from(value: Apartment) -> Self {
        Self::Apartment(value)
    }
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}
