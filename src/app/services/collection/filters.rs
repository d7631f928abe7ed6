//! Search and range filters
//!
//! Filters borrow from the input slice and keep source order.

use crate::app::models::{CatalogItem, StoreProduct};

/// Records that expose a display name for searching
pub trait Named {
    fn name(&self) -> &str;
}

impl Named for CatalogItem {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for StoreProduct {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Case-insensitive containment test; a blank term matches everything
pub fn matches_search(name: &str, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    term.is_empty() || name.to_lowercase().contains(&term)
}

/// Records whose name contains the search term
pub fn filter_by_name<'a, T: Named>(records: &'a [T], term: &str) -> Vec<&'a T> {
    records
        .iter()
        .filter(|record| matches_search(record.name(), term))
        .collect()
}

/// Inclusive price bounds; a missing bound is unbounded on that side
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PriceRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl PriceRange {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    /// Range accepting every price
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Whether a price lies within both bounds
    pub fn contains(&self, price: f64) -> bool {
        let min = self.min.unwrap_or(f64::NEG_INFINITY);
        let max = self.max.unwrap_or(f64::INFINITY);
        price >= min && price <= max
    }

    /// A lower bound above the upper bound can never match
    pub fn is_empty(&self) -> bool {
        matches!((self.min, self.max), (Some(min), Some(max)) if min > max)
    }
}

/// Store products matching both the search term and the price range
pub fn filter_products<'a>(
    products: &'a [StoreProduct],
    term: &str,
    range: PriceRange,
) -> Vec<&'a StoreProduct> {
    products
        .iter()
        .filter(|product| matches_search(&product.name, term))
        .filter(|product| range.contains(product.price as f64))
        .collect()
}
