//! Tests for header resolution

use crate::Error;
use crate::app::services::sheet_parser::column_mapping::{ColumnMapping, KeyMatcher};

fn catalog_matchers() -> Vec<KeyMatcher> {
    vec![
        KeyMatcher::new("name", &["product", "name"]),
        KeyMatcher::new("price", &["price", "50gm"]),
    ]
}

fn header(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
}

#[test]
fn test_resolves_by_substring() {
    let mapping = ColumnMapping::resolve(
        &header(&["Sl", "Product Name", "Price (50gm)"]),
        &catalog_matchers(),
    );
    assert_eq!(mapping.index_of("name"), Some(1));
    assert_eq!(mapping.index_of("price"), Some(2));
    assert!(mapping.require("catalog", &["name", "price"]).is_ok());
}

#[test]
fn test_column_order_does_not_matter() {
    let mapping = ColumnMapping::resolve(&header(&["PRICE", "name"]), &catalog_matchers());
    assert_eq!(mapping.index_of("name"), Some(1));
    assert_eq!(mapping.index_of("price"), Some(0));
}

#[test]
fn test_first_matching_column_wins() {
    let mapping = ColumnMapping::resolve(&header(&["Name", "Product"]), &catalog_matchers());
    assert_eq!(mapping.index_of("name"), Some(0));
}

#[test]
fn test_alternate_needle_matches() {
    let mapping = ColumnMapping::resolve(&header(&["Nut", " Per 50GM "]), &catalog_matchers());
    assert_eq!(mapping.index_of("name"), None);
    assert_eq!(mapping.index_of("price"), Some(1));
    assert_eq!(mapping.resolved_count(), 1);
}

#[test]
fn test_missing_required_column_is_a_format_error() {
    let mapping = ColumnMapping::resolve(&header(&["Item", "Cost"]), &catalog_matchers());
    match mapping.require("catalog", &["name", "price"]) {
        Err(Error::SheetFormat { sheet, message }) => {
            assert_eq!(sheet, "catalog");
            assert!(message.contains("name"));
            assert!(message.contains("price"));
        }
        other => panic!("expected format error, got {:?}", other),
    }
}

#[test]
fn test_positional_mapping() {
    let mapping = ColumnMapping::positional(&[("username", 0), ("body", 2)]);
    assert_eq!(mapping.index_of("body"), Some(2));
    assert_eq!(mapping.index_of("star"), None);
}
