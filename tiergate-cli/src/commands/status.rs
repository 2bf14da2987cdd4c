//! Status command - show the tier and resolved models for an email.

use anyhow::Result;
use clap::Args;
use tiergate_core::{Email, Feature};

use super::AppContext;

/// Arguments for the status command.
#[derive(Args)]
pub struct StatusArgs {
    /// Email to look up.
    #[arg(long, short, default_value = "")]
    pub email: String,
}

/// Runs the status command.
pub fn run(args: &StatusArgs, ctx: &AppContext) -> Result<()> {
    let gate = ctx.gate();
    let email = Email::normalize(&args.email);

    let tier = gate.tier(&email)?;
    let chat = gate.select_model(Feature::TextCompletion, &email)?;
    let image = gate.select_model(Feature::ImageGeneration, &email)?;

    let who = if email.is_empty() {
        "(no email)".to_string()
    } else {
        email.to_string()
    };

    println!("Email:       {who}");
    println!("Tier:        {}", tier.display_name());
    println!("Chat model:  {chat}");
    println!("Image model: {image}");

    println!();
    println!(
        "Model API:   {}",
        if ctx.secrets.model_api_key.is_some() {
            "configured"
        } else {
            "not configured (ask/analyze/imagine disabled)"
        }
    );
    println!(
        "Payments:    {}",
        if ctx.secrets.payment_api_key.is_some() {
            "configured"
        } else {
            "not configured (buy/callback disabled)"
        }
    );

    Ok(())
}
