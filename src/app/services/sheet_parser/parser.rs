//! Sheet parsing orchestration
//!
//! Splits the payload into lines, locates the header, resolves columns and
//! normalizes each data row. A missing required column aborts the whole
//! sheet; a bad row is logged and skipped.

use super::column_mapping::ColumnMapping;
use super::record_parser::{ColumnLayout, DelimiterChoice, SheetLayout, SheetRecord};
use super::stats::{ParseResult, ParseStats};
use super::tokenizer::{Tokenizer, detect_delimiter};
use crate::app::models::{CatalogItem, Review, StoreProduct};
use crate::{Error, Result};
use tracing::{debug, info};

/// Parser for one record family's sheet
#[derive(Debug, Clone)]
pub struct SheetParser {
    layout: SheetLayout,
}

impl SheetParser {
    /// Parser using the family's default layout
    pub fn for_record<T: SheetRecord>() -> Self {
        Self {
            layout: T::layout(),
        }
    }

    /// Parser with an explicit layout
    pub fn with_layout(layout: SheetLayout) -> Self {
        Self { layout }
    }

    /// Layout in use
    pub fn layout(&self) -> &SheetLayout {
        &self.layout
    }

    /// Parse a whole sheet payload into records of type `T`
    pub fn parse<T: SheetRecord>(&self, text: &str) -> Result<ParseResult<T>> {
        let lines: Vec<&str> = text.lines().collect();
        let header_index = lines.iter().position(|line| !line.trim().is_empty());

        let header_line = header_index.map(|i| lines[i]).unwrap_or("");
        let delimiter = match self.layout.delimiter {
            DelimiterChoice::Fixed(c) => c,
            DelimiterChoice::Detect => detect_delimiter(header_line),
        };
        let tokenizer = Tokenizer::new(delimiter, self.layout.strategy);

        let mapping = self.resolve_columns(&tokenizer, header_line)?;

        let mut records = Vec::new();
        let mut stats = ParseStats::new();

        if let Some(header_index) = header_index {
            for (offset, raw_line) in lines[header_index + 1..].iter().enumerate() {
                let line_number = offset + 1;
                if raw_line.trim().is_empty() {
                    continue;
                }
                stats.total_rows += 1;

                match normalize_row::<T>(&tokenizer, &self.layout, raw_line, &mapping, line_number)
                {
                    Ok(record) => records.push(record),
                    Err(e) => {
                        debug!("Skipping {} row {}: {}", self.layout.sheet, line_number, e);
                        stats.record_skip(e.to_string());
                    }
                }
            }
        }

        stats.records_parsed = records.len();
        info!(
            "Parsed {} sheet: {} records from {} rows ({} skipped)",
            self.layout.sheet, stats.records_parsed, stats.total_rows, stats.rows_skipped
        );

        Ok(ParseResult { records, stats })
    }

    fn resolve_columns(&self, tokenizer: &Tokenizer, header_line: &str) -> Result<ColumnMapping> {
        match &self.layout.columns {
            ColumnLayout::Positional(columns) => Ok(ColumnMapping::positional(columns)),
            ColumnLayout::Resolved { matchers, required } => {
                let header: Vec<String> = tokenizer
                    .split(header_line)
                    .iter()
                    .map(|h| h.trim().to_string())
                    .collect();
                let mapping = ColumnMapping::resolve(&header, matchers);
                mapping.require(self.layout.sheet, required)?;
                debug!(
                    "Resolved {} of {} {} columns from header",
                    mapping.resolved_count(),
                    matchers.len(),
                    self.layout.sheet
                );
                Ok(mapping)
            }
        }
    }
}

/// Tokenize and normalize one data row
pub fn normalize_row<T: SheetRecord>(
    tokenizer: &Tokenizer,
    layout: &SheetLayout,
    raw_line: &str,
    mapping: &ColumnMapping,
    line_number: usize,
) -> Result<T> {
    // Trimming must not eat a leading empty field of a tab-separated row
    let line = if layout.trim_lines {
        raw_line.trim_matches(|c: char| c.is_whitespace() && c != tokenizer.delimiter)
    } else {
        raw_line
    };

    let columns = tokenizer.split(line);
    if columns.len() < layout.min_columns {
        return Err(Error::row_rejected(
            line_number,
            format!(
                "insufficient columns: {} < {}",
                columns.len(),
                layout.min_columns
            ),
        ));
    }

    T::from_row(&columns, mapping, line_number)
}

/// Parse an order-builder catalog sheet
pub fn parse_catalog(text: &str) -> Result<ParseResult<CatalogItem>> {
    SheetParser::for_record::<CatalogItem>().parse(text)
}

/// Parse a store product sheet
pub fn parse_products(text: &str) -> Result<ParseResult<StoreProduct>> {
    SheetParser::for_record::<StoreProduct>().parse(text)
}

/// Parse a review sheet; records come back in sheet order, unsorted
pub fn parse_reviews(text: &str) -> Result<ParseResult<Review>> {
    SheetParser::for_record::<Review>().parse(text)
}
