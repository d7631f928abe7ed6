//! Field parsing utilities for sheet rows
//!
//! This module provides helper functions for turning raw cell text into
//! typed values. They never fail loudly: unparsable input yields `None` or
//! a documented default so the caller decides whether the row survives.

use super::column_mapping::ColumnMapping;
use crate::constants::NO_IMAGE_MARKER;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::OnceLock;

/// Timestamp layouts tried in order after RFC 3339
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%d/%m/%Y"];

/// Parse a price, ignoring everything but digits and decimal points
///
/// The cleaned text is read as the longest leading decimal number, so
/// `"BDT 1,200.50"` is `1200.5` and a cell with no digits is `None`.
pub fn parse_price(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    let mut end = 0;
    let mut seen_point = false;
    for (i, c) in cleaned.char_indices() {
        if c == '.' {
            if seen_point {
                break;
            }
            seen_point = true;
        }
        end = i + c.len_utf8();
    }

    let number = &cleaned[..end];
    if !number.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    number.parse::<f64>().ok()
}

/// Parse the leading integer run of a cell, after optional whitespace and sign
///
/// `"15% off"` is 15, `"4.5"` is 4, `"off"` is `None`.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    static LEADING_INT: OnceLock<Regex> = OnceLock::new();
    let re = LEADING_INT.get_or_init(|| Regex::new(r"^\s*([+-]?\d+)").expect("valid regex"));

    re.captures(raw)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<i64>().ok())
}

/// Discount percentage from a label; missing or unparsable is 0
pub fn parse_discount(label: &str) -> i64 {
    parse_leading_int(&label.replace('"', "")).unwrap_or(0)
}

/// Star rating from a cell; missing or unparsable is 0
pub fn parse_rating(raw: &str) -> i64 {
    parse_leading_int(raw).unwrap_or(0)
}

/// Trim a cell and strip one layer of surrounding quotes
pub fn clean_text(raw: &str) -> String {
    let trimmed = raw.trim();
    let unquoted = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    unquoted.trim().to_string()
}

/// Best-effort timestamp parse; date-only cells become midnight
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }

    for format in TIMESTAMP_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    None
}

/// Normalize a review image link into something embeddable
///
/// Blank cells and the "No Image" marker mean no image; direct image URLs
/// are kept; Google Drive share links with an `id=` parameter become direct
/// view links; anything else is passed through.
pub fn normalize_image_link(raw: &str) -> Option<String> {
    static IMAGE_EXT: OnceLock<Regex> = OnceLock::new();
    static DRIVE_ID: OnceLock<Regex> = OnceLock::new();

    let link = clean_text(raw);
    if link.is_empty() || link == NO_IMAGE_MARKER {
        return None;
    }

    let image_ext = IMAGE_EXT
        .get_or_init(|| Regex::new(r"(?i)\.(jpg|jpeg|png|gif|webp)$").expect("valid regex"));
    if image_ext.is_match(&link) {
        return Some(link);
    }

    if link.contains("drive.google.com") {
        let drive_id =
            DRIVE_ID.get_or_init(|| Regex::new(r"[?&]id=([^&#]+)").expect("valid regex"));
        if let Some(id) = drive_id.captures(&link).and_then(|caps| caps.get(1)) {
            return Some(format!(
                "https://drive.google.com/uc?export=view&id={}",
                id.as_str()
            ));
        }
    }

    Some(link)
}

/// Get a raw field by semantic key
pub fn get_field<'a>(columns: &'a [String], mapping: &ColumnMapping, key: &str) -> Option<&'a str> {
    mapping
        .index_of(key)
        .and_then(|index| columns.get(index))
        .map(String::as_str)
}

/// Get a cleaned, non-empty field by semantic key
pub fn get_text(columns: &[String], mapping: &ColumnMapping, key: &str) -> Option<String> {
    get_field(columns, mapping, key)
        .map(clean_text)
        .filter(|s| !s.is_empty())
}
