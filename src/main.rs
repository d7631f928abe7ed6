use clap::Parser;
use std::process;
use storefront_sheets::cli::{args::Args, commands};
use tokio_util::sync::CancellationToken;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    // All work is network-bound, so a single-threaded runtime is enough
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap_or_else(|e| {
            eprintln!("Failed to create async runtime: {}", e);
            process::exit(1);
        });

    let result = runtime.block_on(async {
        // Create cancellation token for coordinating graceful shutdown
        let cancellation_token = CancellationToken::new();

        let shutdown_signal = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("Failed to install CTRL+C signal handler: {}", e);
                std::future::pending::<()>().await;
            }
            cancellation_token.cancel();
        };

        tokio::select! {
            result = commands::run(args, cancellation_token.clone()) => {
                result
            }
            _ = shutdown_signal => {
                eprintln!("\nReceived CTRL+C, shutting down...");
                Err(storefront_sheets::Error::cancelled("Interrupted by user"))
            }
        }
    });

    match result {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            let code = match error {
                storefront_sheets::Error::Validation { .. } => 2,
                storefront_sheets::Error::Cancelled { .. } => 130,
                _ => 1,
            };
            process::exit(code);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Storefront - spreadsheet-backed shop from the terminal");
    println!("======================================================");
    println!();
    println!("Browse a dry-fruit shop whose catalog, products and reviews live in");
    println!("published spreadsheets, build an order and hand it off over WhatsApp.");
    println!();
    println!("USAGE:");
    println!("    storefront <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    catalog     List the order-builder catalog with your quantities");
    println!("    order       Add, remove or set quantities, reset, or send the order");
    println!("    store       Browse the product showcase");
    println!("    reviews     Show customer reviews, best first");
    println!("    review      Submit a review");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Add two units of almonds to the order:");
    println!("    storefront order add almonds --by 2");
    println!();
    println!("    # Send the order with delivery details:");
    println!("    storefront order send --name \"Nadia\" --district Dhaka --address \"Road 5\"");
    println!();
    println!("    # Products between 500 and 1500 BDT/kg as JSON:");
    println!("    storefront store --min-price 500 --max-price 1500 --output-format json");
    println!();
    println!("    # Submit a review with a photo:");
    println!("    storefront review submit --name Rafi --rating 5 \\");
    println!("                             --text \"Fresh and crunchy\" --image nuts.jpg");
    println!();
    println!("For detailed help on any command, use:");
    println!("    storefront <COMMAND> --help");
}
