//! Command-line argument definitions for the storefront
//!
//! This module defines the CLI interface using the clap derive API. The
//! three storefront pages map onto subcommands: `catalog` and `order` for
//! the order builder, `store` for the product showcase, and `reviews` /
//! `review` for reading and writing customer reviews.

use crate::app::services::collection::PriceRange;
use crate::constants::MAX_STAR_RATING;
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the storefront
///
/// Browses the published catalog, product and review sheets, builds an
/// order for WhatsApp hand-off and submits reviews.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "storefront",
    version,
    about = "Browse a spreadsheet-backed storefront, build orders and share reviews",
    long_about = "Reads the catalog, product and review sheets published from a spreadsheet, \
                  tolerating drifting headers and malformed rows. Keeps the current order \
                  selection on disk between runs and hands finished orders off to WhatsApp."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to a JSON configuration file
    #[arg(
        long = "config",
        value_name = "FILE",
        global = true,
        help = "Path to configuration file"
    )]
    pub config_file: Option<PathBuf>,

    /// Where the order selection is stored
    #[arg(
        long = "selections",
        value_name = "FILE",
        global = true,
        help = "Override the selection file location"
    )]
    pub selections_path: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(
        long = "timeout",
        value_name = "SECONDS",
        global = true,
        help = "Override the per-request network timeout"
    )]
    pub timeout_seconds: Option<u64>,

    /// Output format
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        global = true,
        help = "Output format for results"
    )]
    pub output_format: OutputFormat,

    /// Enable verbose logging output
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// List the order-builder catalog with selected quantities
    Catalog(CatalogArgs),
    /// Change the current order or send it
    Order(OrderArgs),
    /// Browse the product showcase
    Store(StoreArgs),
    /// Show customer reviews, best first
    Reviews(ReviewsArgs),
    /// Write a review
    Review(ReviewArgs),
}

/// Arguments for the catalog command
#[derive(Debug, Clone, Parser)]
pub struct CatalogArgs {
    /// Only show products whose name contains this text
    #[arg(short = 's', long = "search", value_name = "TEXT")]
    pub search: Option<String>,

    /// Read the catalog from this URL instead of the configured one
    #[arg(long = "url", value_name = "URL")]
    pub url: Option<String>,
}

/// Arguments for the order command
#[derive(Debug, Clone, Parser)]
pub struct OrderArgs {
    #[command(subcommand)]
    pub action: OrderAction,

    /// Read the catalog from this URL instead of the configured one
    #[arg(long = "url", value_name = "URL", global = true)]
    pub url: Option<String>,
}

/// Changes to the current order
#[derive(Debug, Clone, Subcommand)]
pub enum OrderAction {
    /// Add units of an item (line id or name)
    Add {
        item: String,
        #[arg(long = "by", default_value_t = 1)]
        by: u32,
    },
    /// Remove units of an item; quantities never drop below zero
    Remove {
        item: String,
        #[arg(long = "by", default_value_t = 1)]
        by: u32,
    },
    /// Set an item's quantity
    Set { item: String, quantity: u32 },
    /// Clear the whole order
    Reset,
    /// Compose the WhatsApp hand-off for the current order
    Send(SendArgs),
}

/// Delivery details for sending an order
#[derive(Debug, Clone, Parser)]
pub struct SendArgs {
    #[arg(long = "name", help = "Customer name (required)")]
    pub name: String,

    #[arg(long = "district")]
    pub district: Option<String>,

    #[arg(long = "thana")]
    pub thana: Option<String>,

    #[arg(long = "address")]
    pub address: Option<String>,

    /// Clear the order after composing the message
    #[arg(long = "reset-after")]
    pub reset_after: bool,
}

/// Arguments for the store command
#[derive(Debug, Clone, Parser)]
pub struct StoreArgs {
    /// Only show products whose name contains this text
    #[arg(short = 's', long = "search", value_name = "TEXT")]
    pub search: Option<String>,

    /// Lowest price per kg to include
    #[arg(long = "min-price", value_name = "BDT")]
    pub min_price: Option<f64>,

    /// Highest price per kg to include
    #[arg(long = "max-price", value_name = "BDT")]
    pub max_price: Option<f64>,

    /// Show full details for one product id
    #[arg(long = "show", value_name = "ID")]
    pub show: Option<i64>,

    /// Read products from this URL instead of the configured one
    #[arg(long = "url", value_name = "URL")]
    pub url: Option<String>,
}

/// Arguments for the reviews command
#[derive(Debug, Clone, Parser)]
pub struct ReviewsArgs {
    /// Show at most this many reviews
    #[arg(short = 'n', long = "limit", value_name = "COUNT")]
    pub limit: Option<usize>,

    /// Read reviews from this URL instead of the configured one
    #[arg(long = "url", value_name = "URL")]
    pub url: Option<String>,
}

/// Arguments for the review command
#[derive(Debug, Clone, Parser)]
pub struct ReviewArgs {
    #[command(subcommand)]
    pub action: ReviewAction,
}

#[derive(Debug, Clone, Subcommand)]
pub enum ReviewAction {
    /// Submit a new review
    Submit(SubmitArgs),
}

/// A review to submit
#[derive(Debug, Clone, Parser)]
pub struct SubmitArgs {
    #[arg(long = "name")]
    pub name: String,

    /// Star rating from 1 to 5
    #[arg(long = "rating")]
    pub rating: u8,

    /// Review text, at least 10 characters
    #[arg(long = "text")]
    pub text: String,

    /// JPG or PNG image to attach, up to 5 MB
    #[arg(long = "image", value_name = "PATH")]
    pub image: Option<PathBuf>,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

impl Args {
    /// Get the command if one was specified
    pub fn get_command(&self) -> Option<&Commands> {
        self.command.as_ref()
    }

    /// Get the log level based on verbosity settings
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show spinners (not in quiet mode or JSON output)
    pub fn show_progress(&self) -> bool {
        !self.quiet && self.output_format == OutputFormat::Human
    }
}

impl StoreArgs {
    /// Price bounds from the command line
    pub fn price_range(&self) -> PriceRange {
        PriceRange::new(self.min_price, self.max_price)
    }

    /// Validate the store command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("min-price", self.min_price), ("max-price", self.max_price)] {
            if let Some(value) = value {
                if !value.is_finite() || value < 0.0 {
                    return Err(Error::validation(
                        name,
                        format!("must be a non-negative number, got {}", value),
                    ));
                }
            }
        }

        if self.price_range().is_empty() {
            return Err(Error::validation(
                "price range",
                "min-price must not exceed max-price",
            ));
        }

        Ok(())
    }
}

impl SubmitArgs {
    /// Reject ratings outside the star range before any network work
    pub fn validate(&self) -> Result<()> {
        if self.rating > MAX_STAR_RATING {
            return Err(Error::validation(
                "rating",
                format!("Rating must be between 1 and {}", MAX_STAR_RATING),
            ));
        }
        Ok(())
    }
}
