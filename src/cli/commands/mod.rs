//! Command implementations for the storefront CLI
//!
//! Each subcommand lives in its own module:
//! - `catalog`: order-builder listing with saved quantities
//! - `order`: quantity changes and the WhatsApp hand-off
//! - `store`: product showcase with search and price filters
//! - `reviews`: review listing and submission

pub mod catalog;
pub mod order;
pub mod reviews;
pub mod shared;
pub mod store;

use crate::Result;
use crate::cli::args::{Args, Commands};
use crate::config::StorefrontConfig;
use shared::{build_page_loader, load_config, setup_logging};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Main command runner
///
/// Sets up logging and configuration, then dispatches to the subcommand.
/// Network work is tied to `cancellation` so Ctrl+C stops retries promptly.
pub async fn run(args: Args, cancellation: CancellationToken) -> Result<()> {
    setup_logging(&args)?;

    let Some(command) = args.get_command() else {
        return Ok(());
    };
    let config = effective_config(load_config(&args)?, command);
    let pages = build_page_loader(&config, cancellation)?;
    debug!("Running {:?}", command);

    match command {
        Commands::Catalog(catalog_args) => {
            catalog::run_catalog(&args, catalog_args, &config, &pages).await
        }
        Commands::Order(order_args) => order::run_order(&args, order_args, &config, &pages).await,
        Commands::Store(store_args) => store::run_store(&args, store_args, &config, &pages).await,
        Commands::Reviews(reviews_args) => {
            reviews::run_reviews(&args, reviews_args, &pages).await
        }
        Commands::Review(review_args) => {
            reviews::run_review(&args, review_args, &config, &pages).await
        }
    }
}

/// Apply a per-command `--url` override to the loaded configuration
fn effective_config(config: StorefrontConfig, command: &Commands) -> StorefrontConfig {
    match command {
        Commands::Catalog(a) => match &a.url {
            Some(url) => config.with_catalog_url(url),
            None => config,
        },
        Commands::Order(a) => match &a.url {
            Some(url) => config.with_catalog_url(url),
            None => config,
        },
        Commands::Store(a) => match &a.url {
            Some(url) => config.with_products_url(url),
            None => config,
        },
        Commands::Reviews(a) => match &a.url {
            Some(url) => config.with_reviews_url(url),
            None => config,
        },
        Commands::Review(_) => config,
    }
}
