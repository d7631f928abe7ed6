//! Tests for the sheet parser across record families

use super::*;
use crate::Error;
use crate::app::models::{CatalogItem, Review};
use crate::app::services::sheet_parser::{
    DelimiterChoice, SheetParser, SheetRecord, SplitStrategy, parse_catalog, parse_products,
    parse_reviews,
};
use chrono::NaiveDate;

#[test]
fn test_catalog_parsing_skips_bad_rows() {
    let result = parse_catalog(&create_test_catalog_csv()).unwrap();

    let names: Vec<&str> = result.records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Almonds", "Cashew"]);

    // Header is line 0; the blank line still counts toward line numbers
    assert_eq!(result.records[0].id, 1);
    assert_eq!(result.records[1].id, 3);
    assert_eq!(result.records[1].unit_price, 95.5);
    assert!(result.records.iter().all(|r| r.quantity_selected == 0));

    assert_eq!(result.stats.total_rows, 4);
    assert_eq!(result.stats.records_parsed, 2);
    assert_eq!(result.stats.rows_skipped, 2);
    assert_eq!(result.stats.errors.len(), 2);
}

#[test]
fn test_catalog_with_reordered_columns() {
    let result = parse_catalog("Price,Product\n100,Almonds\r\n").unwrap();
    assert_eq!(result.records.len(), 1);
    assert_eq!(result.records[0].name, "Almonds");
    assert_eq!(result.records[0].unit_price, 100.0);
}

#[test]
fn test_catalog_missing_columns_fails_whole_sheet() {
    let result = parse_catalog("Item,Cost\nAlmonds,100\n");
    assert!(matches!(result, Err(Error::SheetFormat { .. })));
}

#[test]
fn test_empty_catalog_is_a_format_error() {
    assert!(matches!(parse_catalog(""), Err(Error::SheetFormat { .. })));
}

#[test]
fn test_catalog_short_row_is_skipped() {
    let result = parse_catalog("Name,Price\nAlmonds\nCashew,80\n").unwrap();
    assert_eq!(result.records.len(), 1);
    assert!(result.stats.errors[0].contains("insufficient columns"));
}

#[test]
fn test_blank_name_rejected_for_every_column_order() {
    let cells = [("Name", "   "), ("Price", "100"), ("Notes", "fresh")];
    let orders = [
        [0, 1, 2],
        [0, 2, 1],
        [1, 0, 2],
        [1, 2, 0],
        [2, 0, 1],
        [2, 1, 0],
    ];

    for order in orders {
        let header: Vec<&str> = order.iter().map(|&i| cells[i].0).collect();
        let row: Vec<&str> = order.iter().map(|&i| cells[i].1).collect();
        let sheet = format!("{}\n{}\n", header.join(","), row.join(","));

        let result = parse_catalog(&sheet).unwrap();
        assert!(result.records.is_empty(), "order {:?} kept a blank name", order);
        assert_eq!(result.stats.rows_skipped, 1);
    }
}

#[test]
fn test_products_parsing_fills_defaults() {
    let result = parse_products(&create_test_products_csv()).unwrap();
    assert_eq!(result.records.len(), 2);

    let almonds = &result.records[0];
    assert_eq!(almonds.id, 1);
    assert_eq!(almonds.price, 1200);
    assert_eq!(almonds.discount_percent, 15);
    assert_eq!(almonds.description, "Crunchy, fresh almonds");

    let cashew = &result.records[1];
    assert_eq!(cashew.id, 2, "unparsable id falls back to the line number");
    assert_eq!(cashew.name, "Cashew, Organic");
    assert_eq!(cashew.price, 1400);
    assert_eq!(cashew.discount_label, "0% off");
    assert_eq!(cashew.discount_percent, 0);
    assert_eq!(cashew.image_url, crate::constants::DEFAULT_PRODUCT_IMAGE);
    assert_eq!(cashew.description, "No description available.");

    assert_eq!(result.stats.rows_skipped, 2);
}

#[test]
fn test_reviews_parsing() {
    let result = parse_reviews(&create_test_reviews_tsv()).unwrap();
    assert_eq!(result.records.len(), 3);

    let nadia = &result.records[0];
    assert_eq!(nadia.username, "Nadia");
    assert_eq!(nadia.image_link, None);
    assert_eq!(nadia.star_rating, 5);
    assert_eq!(
        nadia.timestamp,
        NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(14, 30, 0)
    );

    let anonymous = &result.records[1];
    assert_eq!(anonymous.username, "Anonymous");
    assert_eq!(anonymous.body, "Good packaging");
    assert_eq!(anonymous.timestamp, None);
    assert_eq!(anonymous.timestamp_raw, None);

    let rafi = &result.records[2];
    assert_eq!(rafi.body, r#"Fresh, "crunchy" cashews"#);
    assert_eq!(
        rafi.image_link.as_deref(),
        Some("https://drive.google.com/uc?export=view&id=ABC123")
    );

    // Zero rating and the two-column row are dropped
    assert_eq!(result.stats.rows_skipped, 2);
}

#[test]
fn test_reviews_detect_comma_delimiter() {
    let sheet = "username,image,review,star\nAsha,,\"Nice, fresh stock\",6\n";
    let result = parse_reviews(sheet).unwrap();
    assert_eq!(result.records.len(), 1);
    assert_eq!(result.records[0].body, "Nice, fresh stock");
    assert_eq!(result.records[0].star_rating, 5);
}

#[test]
fn test_reviews_header_only_is_empty() {
    let result = parse_reviews("username\timage\treview\tstar\n\n").unwrap();
    assert!(result.is_empty());
    assert_eq!(result.stats.total_rows, 0);
}

#[test]
fn test_custom_layout_for_tab_separated_catalog() {
    let layout = CatalogItem::layout().with_delimiter(DelimiterChoice::Detect);
    let parser = SheetParser::with_layout(layout);
    let result = parser
        .parse::<CatalogItem>("Name\tPrice\nAlmonds, roasted\t120\n")
        .unwrap();
    assert_eq!(result.records[0].name, "Almonds, roasted");
}

#[test]
fn test_stricter_review_layout() {
    let layout = Review::layout()
        .with_min_columns(5)
        .with_strategy(SplitStrategy::Quoted);
    let parser = SheetParser::with_layout(layout);
    let result = parser
        .parse::<Review>("u\ti\tr\ts\tt\nAsha\t\tGreat stuff\t5\n")
        .unwrap();
    assert!(result.records.is_empty());
}
