//! Data models for storefront records
//!
//! This module contains the typed records produced from the three published
//! sheets: order-builder catalog items, showcase store products and customer
//! reviews. Each record family has a single validating constructor so a
//! record is either fully valid or never built.

use crate::constants::{ANONYMOUS_USERNAME, MAX_STAR_RATING, MIN_STAR_RATING};
use crate::{Error, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Persisted mapping from product name to selected quantity
pub type SelectionMap = BTreeMap<String, u32>;

// =============================================================================
// Catalog Item (order builder)
// =============================================================================

/// A product on the order-builder page, priced per order unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Line number of the row in the sheet (header is line 0)
    pub id: usize,

    /// Product name, never empty
    pub name: String,

    /// Price per unit, never negative
    pub unit_price: f64,

    /// Units currently selected
    pub quantity_selected: u32,
}

impl CatalogItem {
    /// Create a new catalog item with validation
    pub fn new(id: usize, name: impl Into<String>, unit_price: f64) -> Result<Self> {
        let item = Self {
            id,
            name: name.into(),
            unit_price,
            quantity_selected: 0,
        };

        item.validate()?;
        Ok(item)
    }

    /// Validate name and price
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::row_rejected(self.id, "product name is empty"));
        }

        if !self.unit_price.is_finite() || self.unit_price < 0.0 {
            return Err(Error::row_rejected(
                self.id,
                format!("invalid unit price {}", self.unit_price),
            ));
        }

        Ok(())
    }

    /// Price of the selected quantity
    pub fn line_total(&self) -> f64 {
        self.quantity_selected as f64 * self.unit_price
    }
}

// =============================================================================
// Store Product (showcase)
// =============================================================================

/// A product on the showcase page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreProduct {
    /// Explicit id column, or the row's line number
    pub id: i64,

    /// Product name, never empty
    pub name: String,

    /// Price per kilogram
    pub price: i64,

    /// Free-form discount label, e.g. "15% off"
    pub discount_label: String,

    /// Leading integer of the discount label
    pub discount_percent: i64,

    /// Product image URL
    pub image_url: String,

    /// Longer description
    pub description: String,
}

impl StoreProduct {
    /// Create a new store product with validation
    pub fn new(
        id: i64,
        name: impl Into<String>,
        price: i64,
        discount_label: impl Into<String>,
        discount_percent: i64,
        image_url: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self> {
        let product = Self {
            id,
            name: name.into(),
            price,
            discount_label: discount_label.into(),
            discount_percent,
            image_url: image_url.into(),
            description: description.into(),
        };

        if product.name.trim().is_empty() {
            return Err(Error::row_rejected(
                id.max(0) as usize,
                "product name is empty",
            ));
        }
        if product.price < 0 {
            return Err(Error::row_rejected(
                id.max(0) as usize,
                format!("negative price {}", product.price),
            ));
        }

        Ok(product)
    }

    /// Whether the product advertises a discount
    pub fn has_discount(&self) -> bool {
        self.discount_percent > 0
    }
}

// =============================================================================
// Review
// =============================================================================

/// A customer review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// Reviewer name, "Anonymous" when left blank
    pub username: String,

    /// Normalized image URL, if one was attached
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_link: Option<String>,

    /// Review text, never empty
    pub body: String,

    /// Star rating in 1..=5
    pub star_rating: u8,

    /// Timestamp cell as written in the sheet
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp_raw: Option<String>,

    /// Best-effort parse of the timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<NaiveDateTime>,
}

impl Review {
    /// Create a new review with validation
    ///
    /// A blank username becomes "Anonymous"; ratings above the maximum are
    /// clamped, while zero or negative ratings reject the review.
    pub fn new(
        line: usize,
        username: &str,
        image_link: Option<String>,
        body: impl Into<String>,
        star_rating: i64,
        timestamp_raw: Option<String>,
        timestamp: Option<NaiveDateTime>,
    ) -> Result<Self> {
        let body = body.into();
        if body.trim().is_empty() {
            return Err(Error::row_rejected(line, "review text is empty"));
        }

        if star_rating < MIN_STAR_RATING as i64 {
            return Err(Error::row_rejected(
                line,
                format!("star rating {} is not positive", star_rating),
            ));
        }

        let username = if username.trim().is_empty() {
            ANONYMOUS_USERNAME.to_string()
        } else {
            username.trim().to_string()
        };

        Ok(Self {
            username,
            image_link,
            body,
            star_rating: star_rating.min(MAX_STAR_RATING as i64) as u8,
            timestamp_raw,
            timestamp,
        })
    }
}

// =============================================================================
// Order Hand-off
// =============================================================================

/// Delivery details entered before sending an order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub name: String,
    pub district: Option<String>,
    pub thana: Option<String>,
    pub address: Option<String>,
}

impl CustomerDetails {
    /// Build details from raw form values, trimming and dropping blanks
    pub fn new(
        name: &str,
        district: Option<&str>,
        thana: Option<&str>,
        address: Option<&str>,
    ) -> Self {
        let optional = |value: Option<&str>| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        Self {
            name: name.trim().to_string(),
            district: optional(district),
            thana: optional(thana),
            address: optional(address),
        }
    }

    /// Name is the only required field
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::validation("name", "Please enter your name."));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_item_rejects_empty_name() {
        assert!(CatalogItem::new(1, "   ", 10.0).is_err());
    }

    #[test]
    fn test_catalog_item_rejects_nan_price() {
        assert!(CatalogItem::new(1, "Almonds", f64::NAN).is_err());
    }

    #[test]
    fn test_catalog_item_line_total() {
        let mut item = CatalogItem::new(3, "Cashew", 45.5).unwrap();
        assert_eq!(item.line_total(), 0.0);
        item.quantity_selected = 4;
        assert_eq!(item.line_total(), 182.0);
    }

    #[test]
    fn test_review_defaults_anonymous_and_clamps_rating() {
        let review = Review::new(2, "  ", None, "Lovely almonds", 9, None, None).unwrap();
        assert_eq!(review.username, "Anonymous");
        assert_eq!(review.star_rating, 5);
    }

    #[test]
    fn test_review_rejects_zero_rating() {
        assert!(Review::new(2, "Rafi", None, "Great", 0, None, None).is_err());
    }

    #[test]
    fn test_review_rejects_blank_body() {
        assert!(Review::new(2, "Rafi", None, "  ", 4, None, None).is_err());
    }

    #[test]
    fn test_store_product_rejects_blank_name() {
        assert!(StoreProduct::new(1, "", 100, "", 0, "", "").is_err());
    }

    #[test]
    fn test_customer_details_trims_and_validates() {
        let details = CustomerDetails::new("  Nadia ", Some(" "), Some("Mirpur"), None);
        assert_eq!(details.name, "Nadia");
        assert_eq!(details.district, None);
        assert_eq!(details.thana.as_deref(), Some("Mirpur"));
        assert!(details.validate().is_ok());

        assert!(CustomerDetails::new(" ", None, None, None).validate().is_err());
    }
}
