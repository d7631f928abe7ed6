//! Structured view models for the storefront pages
//!
//! Rendering targets (the terminal, a web page) consume these plain values
//! instead of raw records, so formatting rules live in one place.

use crate::app::models::{CatalogItem, Review, StoreProduct};
use crate::app::services::collection::aggregation::format_amount;
use crate::app::services::order_message::enquiry_link;
use crate::constants::{CURRENCY, MAX_STAR_RATING, TOP_REVIEW_THRESHOLD};
use chrono::NaiveDateTime;
use serde::Serialize;

/// Title and explanation shown instead of an empty list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmptyState {
    pub title: String,
    pub message: String,
}

impl EmptyState {
    fn new(title: &str, message: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            message: message.into(),
        }
    }

    pub fn catalog_unavailable() -> Self {
        Self::new(
            "Error Loading Products",
            "We couldn't load the product list. Please check your connection and try again.",
        )
    }

    pub fn catalog_format_error() -> Self {
        Self::new(
            "Data Format Error",
            "The CSV data doesn't have the expected columns. Please check the source.",
        )
    }

    pub fn no_catalog_products() -> Self {
        Self::new(
            "No Products Found",
            "We couldn't find any products in the CSV data.",
        )
    }

    pub fn no_search_match() -> Self {
        Self::new(
            "No Products Found",
            "No nuts match your search. Try a different keyword.",
        )
    }

    pub fn no_selection() -> Self {
        Self::new(
            "Your Order",
            "No items selected yet. Use the + buttons to add nuts to your order.",
        )
    }

    pub fn no_store_match() -> Self {
        Self::new(
            "No Products Found",
            "No products found. Try adjusting your search filters.",
        )
    }

    pub fn no_reviews() -> Self {
        Self::new("No reviews yet", "Be the first to share your experience!")
    }

    pub fn reviews_unavailable(detail: impl std::fmt::Display) -> Self {
        Self::new(
            "Failed to load reviews",
            format!(
                "Please check your internet connection and try again. Error: {}",
                detail
            ),
        )
    }
}

// =============================================================================
// Order builder
// =============================================================================

/// One row of the order-builder listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogCard {
    pub id: usize,
    pub name: String,
    pub price_label: String,
    pub quantity: u32,
    pub line_total_label: String,
    pub can_decrement: bool,
}

impl CatalogCard {
    pub fn from_item(item: &CatalogItem, grams_per_unit: u32) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            price_label: format!(
                "{:.2} {} / {}gm",
                item.unit_price, CURRENCY, grams_per_unit
            ),
            quantity: item.quantity_selected,
            line_total_label: format_amount(item.line_total()),
            can_decrement: item.quantity_selected > 0,
        }
    }
}

// =============================================================================
// Store
// =============================================================================

/// One product on the showcase page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductCard {
    pub id: i64,
    pub name: String,
    pub price_label: String,

    /// Present only when the product has a positive discount
    pub discount_badge: Option<String>,

    pub image_url: String,
    pub description: String,
    pub enquiry_url: String,
}

impl ProductCard {
    pub fn from_product(product: &StoreProduct, enquiry_number: &str) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price_label: format!("{} {} /kg", CURRENCY, product.price),
            discount_badge: product
                .has_discount()
                .then(|| product.discount_label.clone()),
            image_url: product.image_url.clone(),
            description: product.description.clone(),
            enquiry_url: enquiry_link(enquiry_number, product),
        }
    }
}

// =============================================================================
// Reviews
// =============================================================================

/// One review on the review page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewCard {
    pub username: String,
    pub initials: String,
    pub display_date: String,
    pub stars: String,
    pub star_rating: u8,
    pub body: String,
    pub image_link: Option<String>,
    pub is_top_review: bool,
}

impl ReviewCard {
    pub fn from_review(review: &Review) -> Self {
        Self {
            username: review.username.clone(),
            initials: initials(&review.username),
            display_date: display_date(review.timestamp_raw.as_deref(), review.timestamp),
            stars: star_icons(review.star_rating),
            star_rating: review.star_rating,
            body: review.body.clone(),
            image_link: review.image_link.clone(),
            is_top_review: review.star_rating >= TOP_REVIEW_THRESHOLD,
        }
    }
}

/// Up to two upper-cased initials, one per space-separated word
pub fn initials(name: &str) -> String {
    if name.is_empty() {
        return "??".to_string();
    }

    name.split(' ')
        .filter_map(|part| part.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}

/// Date shown on a review card
///
/// Blank is "Recently", a parsed timestamp is `Mar 5, 2024`, and anything
/// else shows its first space-separated token.
pub fn display_date(raw: Option<&str>, parsed: Option<NaiveDateTime>) -> String {
    let raw = raw.map(str::trim).unwrap_or("");
    if raw.is_empty() {
        return "Recently".to_string();
    }

    match parsed {
        Some(timestamp) => timestamp.format("%b %-d, %Y").to_string(),
        None => raw.split(' ').next().unwrap_or(raw).to_string(),
    }
}

/// Filled and empty stars for a rating
pub fn star_icons(rating: u8) -> String {
    let filled = rating.min(MAX_STAR_RATING) as usize;
    let empty = MAX_STAR_RATING as usize - filled;
    format!("{}{}", "★".repeat(filled), "☆".repeat(empty))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_initials() {
        assert_eq!(initials("nadia rahman"), "NR");
        assert_eq!(initials("Md Abdul Karim"), "MA");
        assert_eq!(initials("Rafi"), "R");
        assert_eq!(initials(""), "??");
    }

    #[test]
    fn test_display_date() {
        let parsed = NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(14, 30, 0);
        assert_eq!(display_date(Some("2024-03-05 14:30:00"), parsed), "Mar 5, 2024");
        assert_eq!(display_date(None, None), "Recently");
        assert_eq!(display_date(Some("  "), None), "Recently");
        assert_eq!(display_date(Some("last week sometime"), None), "last");
    }

    #[test]
    fn test_star_icons() {
        assert_eq!(star_icons(4), "★★★★☆");
        assert_eq!(star_icons(5), "★★★★★");
    }

    #[test]
    fn test_review_card_highlight() {
        let top = Review::new(1, "Nadia", None, "Lovely almonds", 4, None, None).unwrap();
        let plain = Review::new(2, "Rafi", None, "Okay cashews", 3, None, None).unwrap();

        let card = ReviewCard::from_review(&top);
        assert!(card.is_top_review);
        assert_eq!(card.display_date, "Recently");
        assert!(!ReviewCard::from_review(&plain).is_top_review);
    }

    #[test]
    fn test_catalog_card() {
        let mut item = CatalogItem::new(1, "Almonds", 120.0).unwrap();
        let card = CatalogCard::from_item(&item, 50);
        assert_eq!(card.price_label, "120.00 BDT / 50gm");
        assert!(!card.can_decrement);

        item.quantity_selected = 3;
        let card = CatalogCard::from_item(&item, 50);
        assert_eq!(card.line_total_label, "360.00 BDT");
        assert!(card.can_decrement);
    }

    #[test]
    fn test_product_card_badge_only_with_discount() {
        let discounted =
            StoreProduct::new(1, "Almonds", 1200, "15% off", 15, "img", "desc").unwrap();
        let regular = StoreProduct::new(2, "Cashew", 1400, "0% off", 0, "img", "desc").unwrap();

        let card = ProductCard::from_product(&discounted, "8801673064324");
        assert_eq!(card.discount_badge.as_deref(), Some("15% off"));
        assert_eq!(card.price_label, "BDT 1200 /kg");
        assert!(card.enquiry_url.contains("Product%20ID%3A%201"));

        assert!(ProductCard::from_product(&regular, "8801673064324").discount_badge.is_none());
    }
}
