//! Order command: change quantities, reset, or hand the order off

use super::catalog::{open_session, print_order_summary};
use super::shared::print_json;
use crate::app::models::CustomerDetails;
use crate::app::services::order_builder::OrderSession;
use crate::app::services::order_message::{OrderMessageSettings, build_order_handoff};
use crate::app::services::page_loader::PageLoader;
use crate::cli::args::{Args, OrderAction, OrderArgs, OutputFormat, SendArgs};
use crate::config::StorefrontConfig;
use crate::{Error, Result};
use colored::*;
use tracing::info;

/// Order command runner
pub async fn run_order(
    args: &Args,
    order_args: &OrderArgs,
    config: &StorefrontConfig,
    pages: &PageLoader,
) -> Result<()> {
    let Some(mut session) = open_session(args, pages, config).await? else {
        return Ok(());
    };

    match &order_args.action {
        OrderAction::Add { item, by } => {
            adjust(&mut session, item, *by as i64)?;
        }
        OrderAction::Remove { item, by } => {
            adjust(&mut session, item, -(*by as i64))?;
        }
        OrderAction::Set { item, quantity } => {
            let id = resolve_item(&session, item)?;
            session.set_quantity(id, *quantity)?;
            info!("Set quantity of item {} to {}", id, quantity);
        }
        OrderAction::Reset => {
            session.reset_all()?;
            println!("{}", "Order cleared.".green());
        }
        OrderAction::Send(send_args) => {
            return send(args, &mut session, send_args, config);
        }
    }

    if args.output_format == OutputFormat::Json {
        return print_json(&session.state().summary());
    }
    print_order_summary(session.state(), config);
    Ok(())
}

fn resolve_item(session: &OrderSession, key: &str) -> Result<usize> {
    session
        .state()
        .find(key)
        .map(|item| item.id)
        .ok_or_else(|| Error::validation("item", format!("No catalog item matches '{}'", key)))
}

fn adjust(session: &mut OrderSession, key: &str, delta: i64) -> Result<()> {
    let id = resolve_item(session, key)?;
    if let Some(quantity) = session.adjust_quantity(id, delta)? {
        info!("Quantity of item {} is now {}", id, quantity);
    }
    Ok(())
}

fn send(
    args: &Args,
    session: &mut OrderSession,
    send_args: &SendArgs,
    config: &StorefrontConfig,
) -> Result<()> {
    let customer = CustomerDetails::new(
        &send_args.name,
        send_args.district.as_deref(),
        send_args.thana.as_deref(),
        send_args.address.as_deref(),
    );
    let settings = OrderMessageSettings {
        shop_name: config.shop_name.clone(),
        grams_per_unit: config.grams_per_unit,
        whatsapp_number: config.whatsapp_number.clone(),
    };

    let handoff = build_order_handoff(session.state(), &customer, &settings)?;
    info!(
        "Composed order with {} items, total {:.2}",
        handoff.item_count, handoff.total
    );

    if args.output_format == OutputFormat::Json {
        print_json(&serde_json::json!({
            "message": handoff.message,
            "url": handoff.url,
            "total": handoff.total,
        }))?;
    } else {
        println!("{}", handoff.message);
        println!();
        println!("{}", "Open this link to send the order on WhatsApp:".bold());
        println!("{}", handoff.url.cyan());
    }

    if send_args.reset_after {
        session.reset_all()?;
    }
    Ok(())
}
