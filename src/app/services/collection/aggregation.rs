//! Order totals and discount lookups

use crate::app::models::{CatalogItem, StoreProduct};
use crate::constants::CURRENCY;
use serde::Serialize;

/// One selected item in an order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderLine {
    pub name: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub line_total: f64,
}

impl OrderLine {
    /// Label such as `Almonds (2 × 50gm)`
    pub fn label(&self, grams_per_unit: u32) -> String {
        format!("{} ({} × {}gm)", self.name, self.quantity, grams_per_unit)
    }

    /// Amount such as `240.00 BDT`
    pub fn formatted_total(&self) -> String {
        format_amount(self.line_total)
    }

    /// Weight of the line in grams
    pub fn grams(&self, grams_per_unit: u32) -> u32 {
        self.quantity.saturating_mul(grams_per_unit)
    }
}

/// Selected items and their grand total
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OrderSummary {
    /// Items with a positive quantity, in catalog order
    pub lines: Vec<OrderLine>,
    pub total: f64,
}

impl OrderSummary {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total units across all lines
    pub fn total_quantity(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    pub fn formatted_total(&self) -> String {
        format_amount(self.total)
    }

    /// One `label: amount` row per selected item
    pub fn breakdown(&self, grams_per_unit: u32) -> Vec<String> {
        self.lines
            .iter()
            .map(|line| format!("{}: {}", line.label(grams_per_unit), line.formatted_total()))
            .collect()
    }
}

/// Two-decimal amount with the currency label
pub fn format_amount(amount: f64) -> String {
    format!("{:.2} {}", amount, CURRENCY)
}

/// Sum `quantity × unit price` over every selected item
pub fn summarize_order(items: &[CatalogItem]) -> OrderSummary {
    let lines: Vec<OrderLine> = items
        .iter()
        .filter(|item| item.quantity_selected > 0)
        .map(|item| OrderLine {
            name: item.name.clone(),
            quantity: item.quantity_selected,
            unit_price: item.unit_price,
            line_total: item.line_total(),
        })
        .collect();

    let total = lines.iter().map(|line| line.line_total).sum();
    OrderSummary { lines, total }
}

/// Product with the strictly greatest positive discount; ties keep the first
pub fn max_discount(products: &[StoreProduct]) -> Option<&StoreProduct> {
    let mut best: Option<&StoreProduct> = None;
    let mut best_percent = 0;

    for product in products {
        if product.discount_percent > best_percent {
            best_percent = product.discount_percent;
            best = Some(product);
        }
    }

    best
}

/// Banner text for the best discount, or the fallback message
pub fn discount_banner(products: &[StoreProduct], fallback: &str) -> String {
    match max_discount(products) {
        Some(product) => format!("{} - {}", product.name, product.discount_label),
        None => fallback.to_string(),
    }
}
