//! Collection operations over parsed storefront records
//!
//! Everything here is pure and deterministic: the same input sequence
//! always produces the same output, and source order is preserved unless an
//! operation is explicitly a sort.
//!
//! # Architecture
//!
//! - [`filters`] - Name search and inclusive price ranges
//! - [`sorting`] - Review ordering by rating, then recency
//! - [`aggregation`] - Order totals, per-item breakdown and best discount
//!
//! # Example Usage
//!
//! ```rust
//! use storefront_sheets::CatalogItem;
//! use storefront_sheets::app::services::collection::summarize_order;
//!
//! let mut almonds = CatalogItem::new(1, "Almonds", 100.0).unwrap();
//! almonds.quantity_selected = 2;
//! let cashew = CatalogItem::new(2, "Cashew", 50.0).unwrap();
//!
//! let summary = summarize_order(&[almonds, cashew]);
//! assert_eq!(summary.total, 200.0);
//! assert_eq!(summary.lines.len(), 1);
//! ```

pub mod aggregation;
pub mod filters;
pub mod sorting;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use aggregation::{OrderLine, OrderSummary, discount_banner, max_discount, summarize_order};
pub use filters::{Named, PriceRange, filter_by_name, filter_products, matches_search};
pub use sorting::{compare_reviews, sort_reviews};
