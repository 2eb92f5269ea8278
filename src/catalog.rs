use crate::models::Listing;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::warn;

/// Ordering and identity of a listing inside the catalog
#[derive(Debug, Clone)]
struct CatalogKey {
    city: String,
    unit_price: f64,
    area: u32,
}

impl CatalogKey {
    fn of(listing: &Listing) -> Self {
        Self {
            city: listing.city().to_string(),
            unit_price: listing.unit_price(),
            area: listing.area(),
        }
    }
}

impl Ord for CatalogKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.city
            .cmp(&other.city)
            .then_with(|| self.unit_price.total_cmp(&other.unit_price))
            .then_with(|| self.area.cmp(&other.area))
    }
}

impl PartialOrd for CatalogKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for CatalogKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CatalogKey {}

/// Listings ordered by city, then unit price, then area.
///
/// Two listings with the same city, unit price and area are the same entry:
/// the first one added is kept and later ones are dropped.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: BTreeMap<CatalogKey, Listing>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a listing. Returns `false` if an entry with the same key was
    /// already present, in which case the catalog is unchanged.
    pub fn add(&mut self, listing: Listing) -> bool {
        let key = CatalogKey::of(&listing);
        if self.entries.contains_key(&key) {
            warn!(
                "Dropping duplicate listing: {} {} x {} sqm",
                key.city, key.unit_price, key.area
            );
            return false;
        }
        self.entries.insert(key, listing);
        true
    }

    /// Listings in catalog order. Each call starts a fresh pass.
    pub fn all(&self) -> impl Iterator<Item = &Listing> + Clone + '_ {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Extend<Listing> for Catalog {
    fn extend<I: IntoIterator<Item = Listing>>(&mut self, iter: I) {
        for listing in iter {
            self.add(listing);
        }
    }
}

impl FromIterator<Listing> for Catalog {
    fn from_iter<I: IntoIterator<Item = Listing>>(iter: I) -> Self {
        let mut catalog = Self::new();
        catalog.extend(iter);
        catalog
    }
}
