//! Row normalization for each record family
//!
//! Every record family describes how its sheet is laid out
//! ([`SheetLayout`]) and how one tokenized row becomes a record. Rows that
//! fail any rule produce a row rejection; records are never partially built.

use super::column_mapping::{ColumnMapping, KeyMatcher};
use super::field_parsers::{
    clean_text, get_field, get_text, normalize_image_link, parse_discount, parse_leading_int,
    parse_price, parse_rating, parse_timestamp,
};
use super::tokenizer::SplitStrategy;
use crate::app::models::{CatalogItem, Review, StoreProduct};
use crate::constants::{
    DEFAULT_DISCOUNT_LABEL, DEFAULT_PRODUCT_DESCRIPTION, DEFAULT_PRODUCT_IMAGE,
};
use crate::{Error, Result};

/// Where a sheet's field delimiter comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelimiterChoice {
    /// Always this character
    Fixed(char),
    /// Detected from the header line
    Detect,
}

/// How semantic columns are located
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnLayout {
    /// Matched against the header row; listed keys must resolve
    Resolved {
        matchers: Vec<KeyMatcher>,
        required: Vec<&'static str>,
    },
    /// Fixed positions, header row ignored
    Positional(Vec<(&'static str, usize)>),
}

/// Per-sheet normalizer configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SheetLayout {
    /// Sheet name used in logs and format errors
    pub sheet: &'static str,

    pub delimiter: DelimiterChoice,
    pub strategy: SplitStrategy,
    pub columns: ColumnLayout,

    /// Rows with fewer fields are skipped
    pub min_columns: usize,

    /// Trim the whole line before splitting
    pub trim_lines: bool,
}

impl SheetLayout {
    /// Change the minimum column count
    pub fn with_min_columns(mut self, min_columns: usize) -> Self {
        self.min_columns = min_columns;
        self
    }

    /// Change the split strategy
    pub fn with_strategy(mut self, strategy: SplitStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Change the delimiter
    pub fn with_delimiter(mut self, delimiter: DelimiterChoice) -> Self {
        self.delimiter = delimiter;
        self
    }
}

/// A record family that can be built from one sheet row
pub trait SheetRecord: Sized {
    /// Default layout for this family's sheet
    fn layout() -> SheetLayout;

    /// Build a record from a tokenized row; `line` counts the header as 0
    fn from_row(columns: &[String], mapping: &ColumnMapping, line: usize) -> Result<Self>;
}

impl SheetRecord for CatalogItem {
    fn layout() -> SheetLayout {
        SheetLayout {
            sheet: "catalog",
            delimiter: DelimiterChoice::Fixed(','),
            strategy: SplitStrategy::Plain,
            columns: ColumnLayout::Resolved {
                matchers: vec![
                    KeyMatcher::new("name", &["product", "name"]),
                    KeyMatcher::new("price", &["price", "50gm"]),
                ],
                required: vec!["name", "price"],
            },
            min_columns: 2,
            trim_lines: false,
        }
    }

    fn from_row(columns: &[String], mapping: &ColumnMapping, line: usize) -> Result<Self> {
        let name = get_text(columns, mapping, "name")
            .ok_or_else(|| Error::row_rejected(line, "missing product name"))?;

        let raw_price = get_field(columns, mapping, "price")
            .ok_or_else(|| Error::row_rejected(line, "missing price column"))?;
        let unit_price = parse_price(raw_price)
            .ok_or_else(|| Error::row_rejected(line, format!("unparsable price '{}'", raw_price)))?;

        CatalogItem::new(line, name, unit_price)
    }
}

impl SheetRecord for StoreProduct {
    fn layout() -> SheetLayout {
        SheetLayout {
            sheet: "products",
            delimiter: DelimiterChoice::Fixed(','),
            strategy: SplitStrategy::BalancedQuotes,
            columns: ColumnLayout::Positional(vec![
                ("id", 0),
                ("name", 1),
                ("price", 2),
                ("discount", 3),
                ("image", 4),
                ("description", 5),
            ]),
            min_columns: 3,
            trim_lines: false,
        }
    }

    fn from_row(columns: &[String], mapping: &ColumnMapping, line: usize) -> Result<Self> {
        let id = get_text(columns, mapping, "id")
            .and_then(|raw| parse_leading_int(&raw))
            .unwrap_or(line as i64);

        let name = get_text(columns, mapping, "name")
            .ok_or_else(|| Error::row_rejected(line, "missing product name"))?;

        let raw_price = get_text(columns, mapping, "price")
            .ok_or_else(|| Error::row_rejected(line, "missing price"))?;
        let price = parse_price(&raw_price)
            .ok_or_else(|| Error::row_rejected(line, format!("unparsable price '{}'", raw_price)))?
            .trunc() as i64;

        let discount_label =
            get_text(columns, mapping, "discount").unwrap_or_else(|| DEFAULT_DISCOUNT_LABEL.to_string());
        let discount_percent = parse_discount(&discount_label);

        let image_url =
            get_text(columns, mapping, "image").unwrap_or_else(|| DEFAULT_PRODUCT_IMAGE.to_string());
        let description = get_text(columns, mapping, "description")
            .unwrap_or_else(|| DEFAULT_PRODUCT_DESCRIPTION.to_string());

        StoreProduct::new(
            id,
            name,
            price,
            discount_label,
            discount_percent,
            image_url,
            description,
        )
        .map_err(|e| Error::row_rejected(line, e.to_string()))
    }
}

impl SheetRecord for Review {
    fn layout() -> SheetLayout {
        SheetLayout {
            sheet: "reviews",
            delimiter: DelimiterChoice::Detect,
            strategy: SplitStrategy::Quoted,
            columns: ColumnLayout::Positional(vec![
                ("username", 0),
                ("image", 1),
                ("body", 2),
                ("star", 3),
                ("timestamp", 4),
            ]),
            min_columns: 4,
            trim_lines: true,
        }
    }

    fn from_row(columns: &[String], mapping: &ColumnMapping, line: usize) -> Result<Self> {
        let username = get_field(columns, mapping, "username")
            .map(clean_text)
            .unwrap_or_default();
        let image_link = get_field(columns, mapping, "image").and_then(normalize_image_link);
        let body = get_text(columns, mapping, "body")
            .ok_or_else(|| Error::row_rejected(line, "missing review text"))?;
        let star_rating = get_field(columns, mapping, "star")
            .map(parse_rating)
            .unwrap_or(0);
        let timestamp_raw = get_text(columns, mapping, "timestamp");
        let timestamp = timestamp_raw.as_deref().and_then(parse_timestamp);

        Review::new(
            line,
            &username,
            image_link,
            body,
            star_rating,
            timestamp_raw,
            timestamp,
        )
    }
}
