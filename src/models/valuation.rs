//! Pricing rules shared by every listing kind.
//!
//! All amounts are whole currency units. Each step works on the integer
//! result of the previous one and truncates toward zero, so fractional
//! amounts are dropped at every surcharge or adjustment.

use crate::error::ArithmeticError;
use tracing::debug;

/// City surcharges, matched exactly against the listing's city.
const CITY_SURCHARGES: [(&str, f64); 3] = [
    ("Budapest", 0.30),
    ("Debrecen", 0.20),
    ("Nyíregyháza", 0.15),
];

const INSULATED_GROUND_FLOOR_BONUS: f64 = 0.10;
const TOP_FLOOR_PENALTY: f64 = 0.05;
const TOP_FLOOR: i32 = 10;

/// Surcharge rate for a city, if it has one.
pub fn city_surcharge(city: &str) -> Option<f64> {
    CITY_SURCHARGES
        .iter()
        .find(|(name, _)| *name == city)
        .map(|(_, rate)| *rate)
}

/// `truncate(unit_price * area)`.
pub fn base_price(unit_price: f64, area: u32) -> i64 {
    (unit_price * f64::from(area)) as i64
}

/// `truncate(amount + amount * rate)`. A negative rate is a reduction.
pub fn apply_rate(amount: i64, rate: f64) -> i64 {
    let amount = amount as f64;
    (amount + amount * rate) as i64
}

/// Whether the largest possible total for this price and area (highest
/// city surcharge plus the floor bonus) still fits in an `i64`.
pub fn price_fits(unit_price: f64, area: u32) -> bool {
    let max_surcharge = CITY_SURCHARGES
        .iter()
        .map(|(_, rate)| *rate)
        .fold(0.0, f64::max);
    let worst_case = unit_price
        * f64::from(area)
        * (1.0 + max_surcharge)
        * (1.0 + INSULATED_GROUND_FLOOR_BONUS);
    worst_case < i64::MAX as f64
}

/// Base price plus the city surcharge.
pub fn total_price(city: &str, unit_price: f64, area: u32) -> i64 {
    let base = base_price(unit_price, area);
    match city_surcharge(city) {
        Some(rate) => {
            let total = apply_rate(base, rate);
            debug!("{} surcharge {:.0}%: {} -> {}", city, rate * 100.0, base, total);
            total
        }
        None => base,
    }
}

/// Floor-dependent adjustment for apartments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloorAdjustment {
    /// First floor with insulation.
    InsulatedBonus,
    /// Tenth floor.
    TopFloorPenalty,
    None,
}

impl FloorAdjustment {
    /// The bonus check wins over the penalty check.
    pub fn for_floor(floor: i32, insulated: bool) -> Self {
        if floor > 0 && floor < 2 && insulated {
            Self::InsulatedBonus
        } else if floor == TOP_FLOOR {
            Self::TopFloorPenalty
        } else {
            Self::None
        }
    }

    pub fn apply(self, total: i64) -> i64 {
        match self {
            Self::InsulatedBonus => apply_rate(total, INSULATED_GROUND_FLOOR_BONUS),
            Self::TopFloorPenalty => apply_rate(total, -TOP_FLOOR_PENALTY),
            Self::None => total,
        }
    }
}

/// `numerator / count`, refusing a zero count.
pub fn per_room(numerator: f64, room_count: f64) -> Result<f64, ArithmeticError> {
    if room_count == 0.0 {
        return Err(ArithmeticError::NoRooms);
    }
    Ok(numerator / room_count)
}
