//! Permissive CSV/TSV parser for published storefront sheets
//!
//! This module turns loosely formatted sheet text into validated records.
//! It is deliberately lenient: quoting does not have to balance, header
//! names only have to contain a recognisable fragment, and bad rows are
//! skipped rather than failing the sheet.
//!
//! ## Architecture
//!
//! - [`tokenizer`] - Line splitting with three quoting conventions
//! - [`column_mapping`] - Fuzzy header resolution to semantic columns
//! - [`field_parsers`] - Price, discount, rating, text, date and link parsing
//! - [`record_parser`] - Per-family layouts and row normalization
//! - [`parser`] - Sheet-level orchestration
//! - [`stats`] - Parsing statistics and result structures
//!
//! ## Usage
//!
//! ```rust
//! use storefront_sheets::app::services::sheet_parser::parse_catalog;
//!
//! let sheet = "Product Name,Price per 50gm\nAlmonds,120\nCashew,BDT 95.50\n";
//! let result = parse_catalog(sheet).unwrap();
//!
//! assert_eq!(result.records.len(), 2);
//! assert_eq!(result.records[1].unit_price, 95.5);
//! ```

pub mod column_mapping;
pub mod field_parsers;
pub mod parser;
pub mod record_parser;
pub mod stats;
pub mod tokenizer;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use column_mapping::{ColumnMapping, KeyMatcher};
pub use parser::{SheetParser, normalize_row, parse_catalog, parse_products, parse_reviews};
pub use record_parser::{ColumnLayout, DelimiterChoice, SheetLayout, SheetRecord};
pub use stats::{ParseResult, ParseStats};
pub use tokenizer::{SplitStrategy, Tokenizer, detect_delimiter, tokenize};
