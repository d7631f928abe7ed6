//! Store command: the product showcase

use super::shared::{create_spinner, finish_spinner, print_empty_state, print_json};
use crate::app::adapters::view::{EmptyState, ProductCard};
use crate::app::services::collection::filter_products;
use crate::app::services::page_loader::PageLoader;
use crate::cli::args::{Args, OutputFormat, StoreArgs};
use crate::config::StorefrontConfig;
use crate::{Error, Result};
use colored::*;
use serde::Serialize;
use tracing::{info, warn};

#[derive(Serialize)]
struct StoreOutput {
    banner: String,
    from_sample: bool,
    products: Vec<ProductCard>,
}

/// Store command runner
pub async fn run_store(
    args: &Args,
    store_args: &StoreArgs,
    config: &StorefrontConfig,
    pages: &PageLoader,
) -> Result<()> {
    store_args.validate()?;

    let spinner = create_spinner(args, "Loading products...");
    let page = pages.load_store().await;
    finish_spinner(spinner);
    let page = page?;

    if page.from_sample {
        warn!("Showing sample products; the product sheet could not be loaded");
    }

    if let Some(id) = store_args.show {
        let product = page
            .products
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| Error::validation("show", format!("No product with id {}", id)))?;
        let card = ProductCard::from_product(product, &config.enquiry_number);
        return match args.output_format {
            OutputFormat::Json => print_json(&card),
            OutputFormat::Human => {
                print_product_details(&card);
                Ok(())
            }
        };
    }

    let term = store_args.search.as_deref().unwrap_or("");
    let cards: Vec<ProductCard> = filter_products(&page.products, term, store_args.price_range())
        .into_iter()
        .map(|p| ProductCard::from_product(p, &config.enquiry_number))
        .collect();
    info!("{} of {} products shown", cards.len(), page.products.len());

    if args.output_format == OutputFormat::Json {
        return print_json(&StoreOutput {
            banner: page.banner,
            from_sample: page.from_sample,
            products: cards,
        });
    }

    println!("{}", page.banner.yellow().bold());
    if page.from_sample {
        println!("{}", "(sample products shown; live list unavailable)".dimmed());
    }
    println!("{} products", cards.len());
    println!();

    if cards.is_empty() {
        print_empty_state(&EmptyState::no_store_match());
        return Ok(());
    }

    for card in &cards {
        let badge = card
            .discount_badge
            .as_deref()
            .map(|b| format!(" [{}]", b).red().to_string())
            .unwrap_or_default();
        println!(
            "{:>4}  {:<32} {}{}",
            card.id.to_string().dimmed(),
            card.name.bold(),
            card.price_label,
            badge
        );
    }
    Ok(())
}

fn print_product_details(card: &ProductCard) {
    println!("{}", card.name.bold().underline());
    match &card.discount_badge {
        Some(badge) => println!("{}  {}", card.price_label, badge.red()),
        None => println!("{}", card.price_label),
    }
    println!();
    println!("{}", card.description);
    println!();
    println!("Image: {}", card.image_url.dimmed());
    println!("Enquire on WhatsApp: {}", card.enquiry_url.cyan());
}
