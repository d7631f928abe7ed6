//! Test fixtures for sheet parser testing
//!
//! This module provides sample sheet payloads shared across the parser
//! test modules.

// Test modules
mod column_mapping_tests;
mod parser_tests;

/// Order-builder catalog with a blank line and two bad rows
pub fn create_test_catalog_csv() -> String {
    "Product Name,Price per 50gm\n\
     Almonds,120\n\
     \n\
     Cashew,BDT 95.50\n\
     ,30\n\
     Pistachio,n/a\n"
        .to_string()
}

/// Store product sheet with quoted fields and defaults to fill in
pub fn create_test_products_csv() -> String {
    [
        "id,name,price,discount,image,description",
        r#"1,Premium Almonds,1200,15% off,https://img.example/a.jpg,"Crunchy, fresh almonds""#,
        r#"x,"Cashew, Organic","1,400",,,"#,
        "3,,500,5% off,,",
        "4,Walnuts,n/a,,,",
    ]
    .join("\n")
}

/// Review sheet, tab separated, with rows that must be dropped
pub fn create_test_reviews_tsv() -> String {
    [
        "username\timage_link\treviews\tstar\ttimestamp",
        "Nadia\tNo Image\tBest almonds in Dhaka!\t5\t2024-03-05 14:30:00",
        "\t\tGood packaging\t4\t",
        "Rafi\thttps://drive.google.com/open?id=ABC123\t\"Fresh, \"\"crunchy\"\" cashews\"\t5\t2024-04-01 09:00:00",
        "Tanvir\t\tNot great\t0\t2024-01-01",
        "Short\trow",
    ]
    .join("\n")
}
