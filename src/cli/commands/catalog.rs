//! Catalog command: the order-builder listing

use super::shared::{
    create_spinner, finish_spinner, print_empty_state, print_json, selection_store,
};
use crate::app::adapters::view::{CatalogCard, EmptyState};
use crate::app::services::collection::OrderSummary;
use crate::app::services::order_builder::{CatalogState, OrderSession};
use crate::app::services::page_loader::{PageLoader, PageState};
use crate::cli::args::{Args, CatalogArgs, OutputFormat};
use crate::config::StorefrontConfig;
use crate::Result;
use colored::*;
use serde::Serialize;
use tracing::info;

#[derive(Serialize)]
struct CatalogOutput<'a> {
    items: Vec<CatalogCard>,
    summary: &'a OrderSummary,
}

/// Catalog command runner
pub async fn run_catalog(
    args: &Args,
    catalog_args: &CatalogArgs,
    config: &StorefrontConfig,
    pages: &PageLoader,
) -> Result<()> {
    let Some(session) = open_session(args, pages, config).await? else {
        return Ok(());
    };

    let state = session.state();
    let term = catalog_args.search.as_deref().unwrap_or("");
    let visible = state.filtered(term);
    let summary = state.summary();
    info!(
        "Catalog has {} items, {} match '{}'",
        state.len(),
        visible.len(),
        term
    );

    if args.output_format == OutputFormat::Json {
        let items = visible
            .iter()
            .map(|item| CatalogCard::from_item(item, config.grams_per_unit))
            .collect();
        return print_json(&CatalogOutput {
            items,
            summary: &summary,
        });
    }

    if visible.is_empty() {
        print_empty_state(&EmptyState::no_search_match());
    } else {
        for item in visible {
            print_catalog_card(&CatalogCard::from_item(item, config.grams_per_unit));
        }
    }
    println!();
    print_order_summary(state, config);
    Ok(())
}

/// Load the catalog and open an order session over the saved selection
///
/// Returns `None` after printing an empty state when there is nothing to
/// order from.
pub async fn open_session(
    args: &Args,
    pages: &PageLoader,
    config: &StorefrontConfig,
) -> Result<Option<OrderSession>> {
    let spinner = create_spinner(args, "Loading catalog...");
    let page = pages.load_catalog().await;
    finish_spinner(spinner);

    let empty = match page? {
        PageState::Ready { records, stats } => {
            if stats.rows_skipped > 0 {
                info!("Skipped {} malformed catalog rows", stats.rows_skipped);
            }
            return Ok(Some(OrderSession::open(records, selection_store(config))));
        }
        PageState::Empty { .. } => EmptyState::no_catalog_products(),
        PageState::FormatError { .. } => EmptyState::catalog_format_error(),
        PageState::Unavailable { .. } => EmptyState::catalog_unavailable(),
    };

    if args.output_format == OutputFormat::Json {
        print_json(&empty)?;
    } else {
        print_empty_state(&empty);
    }
    Ok(None)
}

fn print_catalog_card(card: &CatalogCard) {
    let quantity = if card.quantity > 0 {
        card.quantity.to_string().green().bold()
    } else {
        card.quantity.to_string().dimmed()
    };
    println!(
        "{:>4}  {:<32} {:>20}  qty {:>3}  {}",
        card.id.to_string().dimmed(),
        card.name.bold(),
        card.price_label,
        quantity,
        card.line_total_label
    );
}

/// Print the selected items and grand total
pub fn print_order_summary(state: &CatalogState, config: &StorefrontConfig) {
    let summary = state.summary();
    if summary.is_empty() {
        print_empty_state(&EmptyState::no_selection());
        return;
    }

    println!("{}", "Your Order".bold().underline());
    for row in summary.breakdown(config.grams_per_unit) {
        println!("  {}", row);
    }
    println!(
        "{} {}",
        "Total:".bold(),
        summary.formatted_total().green().bold()
    );
}
