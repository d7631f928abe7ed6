//! Shared components for CLI commands
//!
//! Logging setup, layered configuration, spinners and the wiring that
//! turns a configuration into loaders and stores.

use crate::app::adapters::selection_store::JsonFileSelectionStore;
use crate::app::adapters::sheet_source::{HttpSheetSource, SheetLoader};
use crate::app::adapters::view::EmptyState;
use crate::app::services::page_loader::PageLoader;
use crate::cli::args::Args;
use crate::config::StorefrontConfig;
use crate::{Error, Result};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Set up structured logging
pub fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    // Create filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("storefront_sheets={}", log_level)));

    if args.quiet {
        // Minimal logging for quiet mode
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
            .map_err(|e| Error::configuration(format!("Failed to initialise logging: {}", e)))?;
    } else {
        // Standard logging with timestamps
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .map_err(|e| Error::configuration(format!("Failed to initialise logging: {}", e)))?;
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration using layered approach (defaults -> file -> args)
pub fn load_config(args: &Args) -> Result<StorefrontConfig> {
    let mut config = StorefrontConfig::load_layered(args.config_file.as_deref())?;

    if let Some(path) = &args.selections_path {
        config = config.with_selections_path(path.clone());
    }
    if let Some(seconds) = args.timeout_seconds {
        config = config.with_timeout_seconds(seconds);
    }

    config.validate()?;
    debug!("Effective configuration: {:?}", config);
    Ok(config)
}

/// Page loader backed by HTTP, tied to the process cancellation token
pub fn build_page_loader(
    config: &StorefrontConfig,
    cancellation: CancellationToken,
) -> Result<PageLoader> {
    let source = Arc::new(HttpSheetSource::from_config(&config.network)?);
    let loader =
        SheetLoader::from_config(source, &config.network).with_cancellation(cancellation);
    Ok(PageLoader::new(loader, config.clone()))
}

/// Selection store at the configured path
pub fn selection_store(config: &StorefrontConfig) -> Arc<JsonFileSelectionStore> {
    Arc::new(JsonFileSelectionStore::new(&config.selections_path))
}

/// Create a spinner for network work, or nothing when output is quiet
pub fn create_spinner(args: &Args, message: &str) -> Option<ProgressBar> {
    if !args.show_progress() {
        return None;
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) =
        ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    Some(pb)
}

/// Stop a spinner, clearing its line
pub fn finish_spinner(spinner: Option<ProgressBar>) {
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
}

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| Error::serialization("Failed to encode output", e))?;
    println!("{}", json);
    Ok(())
}

/// Print an empty state block
pub fn print_empty_state(state: &EmptyState) {
    println!("{}", state.title.bold());
    println!("{}", state.message.dimmed());
}
