//! Tests for collection operations
//!
//! Shared record builders used by the filter, sorting and aggregation
//! test modules.


use crate::app::models::{CatalogItem, Review, StoreProduct};
use chrono::{NaiveDate, NaiveDateTime};

/// Catalog item with a preset quantity
pub fn create_catalog_item(id: usize, name: &str, price: f64, quantity: u32) -> CatalogItem {
    let mut item = CatalogItem::new(id, name, price).unwrap();
    item.quantity_selected = quantity;
    item
}

/// Store product with the given price and discount percentage
pub fn create_store_product(id: i64, name: &str, price: i64, discount: i64) -> StoreProduct {
    StoreProduct::new(
        id,
        name,
        price,
        format!("{}% off", discount),
        discount,
        "https://img.example/p.jpg",
        "Test product",
    )
    .unwrap()
}

/// Review with a rating and an optional day-of-March timestamp
pub fn create_review(username: &str, rating: i64, day: Option<u32>) -> Review {
    let timestamp = day.map(march);
    Review::new(
        1,
        username,
        None,
        "Tasty and fresh",
        rating,
        timestamp.map(|t| t.to_string()),
        timestamp,
    )
    .unwrap()
}

/// Midnight on the given day of March 2024
pub fn march(day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, day)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}
