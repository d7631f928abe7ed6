//! Review commands: list reviews and submit a new one

use super::shared::{create_spinner, finish_spinner, print_empty_state, print_json};
use crate::app::adapters::review_submitter::{HttpReviewSubmitter, ReviewSubmitter};
use crate::app::adapters::view::{EmptyState, ReviewCard};
use crate::app::services::page_loader::{PageLoader, PageState};
use crate::app::services::review_form::{ImageAttachment, ReviewDraft};
use crate::cli::args::{Args, OutputFormat, ReviewAction, ReviewArgs, ReviewsArgs, SubmitArgs};
use crate::config::StorefrontConfig;
use crate::Result;
use chrono::Utc;
use colored::*;
use tracing::info;

/// Reviews command runner
pub async fn run_reviews(
    args: &Args,
    reviews_args: &ReviewsArgs,
    pages: &PageLoader,
) -> Result<()> {
    let spinner = create_spinner(args, "Loading reviews...");
    let state = pages.load_reviews().await;
    finish_spinner(spinner);

    let cards: Vec<ReviewCard> = match state? {
        PageState::Ready { records, .. } => records
            .iter()
            .take(reviews_args.limit.unwrap_or(usize::MAX))
            .map(ReviewCard::from_review)
            .collect(),
        PageState::Empty { .. } | PageState::FormatError { .. } => {
            return show_empty(args, EmptyState::no_reviews());
        }
        PageState::Unavailable { message } => {
            return show_empty(args, EmptyState::reviews_unavailable(message));
        }
    };

    if args.output_format == OutputFormat::Json {
        return print_json(&cards);
    }

    for card in &cards {
        print_review_card(card);
    }
    Ok(())
}

fn show_empty(args: &Args, empty: EmptyState) -> Result<()> {
    match args.output_format {
        OutputFormat::Json => print_json(&empty),
        OutputFormat::Human => {
            print_empty_state(&empty);
            Ok(())
        }
    }
}

fn print_review_card(card: &ReviewCard) {
    let header = format!("[{}] {}", card.initials, card.username);
    let badge = if card.is_top_review {
        format!("  {}", "Top Review".yellow().bold())
    } else {
        String::new()
    };

    println!("{}{}", header.bold(), badge);
    println!("{}  {}", card.stars.yellow(), card.display_date.dimmed());
    println!("{}", card.body);
    if let Some(link) = &card.image_link {
        println!("Image: {}", link.cyan());
    }
    println!();
}

/// Review command runner
pub async fn run_review(
    args: &Args,
    review_args: &ReviewArgs,
    config: &StorefrontConfig,
    pages: &PageLoader,
) -> Result<()> {
    match &review_args.action {
        ReviewAction::Submit(submit_args) => {
            let submitter = HttpReviewSubmitter::new(&config.review_submit_url, &config.network)?;
            submit_review(args, submit_args, &submitter).await?;

            let reload = ReviewsArgs {
                limit: Some(3),
                url: None,
            };
            run_reviews(args, &reload, pages).await
        }
    }
}

/// Validate a review from the command line and send it
pub async fn submit_review(
    args: &Args,
    submit_args: &SubmitArgs,
    submitter: &dyn ReviewSubmitter,
) -> Result<()> {
    submit_args.validate()?;

    let mut draft = ReviewDraft::new(&submit_args.name, submit_args.rating, &submit_args.text);
    draft.validate()?;
    if let Some(path) = &submit_args.image {
        draft = draft.with_image(ImageAttachment::from_path(path)?);
    }
    let payload = draft.to_payload(Utc::now())?;

    let spinner = create_spinner(args, "Submitting review...");
    let result = submitter.submit(&payload).await;
    finish_spinner(spinner);
    result?;

    info!("Submitted review from {}", payload.name);
    if args.output_format == OutputFormat::Human {
        println!(
            "{}",
            "Review submitted successfully! Thank you for your feedback.".green()
        );
    }
    Ok(())
}
