//! Ask command - tiered chat completion.

use anyhow::Result;
use clap::Args;
use tiergate_core::{ChatMessage, Email, Feature, Tier};
use tracing::info;

use super::AppContext;

/// Arguments for the ask command.
#[derive(Args)]
pub struct AskArgs {
    /// The question or prompt to send.
    pub text: String,

    /// Email used to determine the tier.
    #[arg(long, short, default_value = "")]
    pub email: String,
}

/// Runs the ask command.
pub async fn run(args: &AskArgs, ctx: &AppContext) -> Result<()> {
    if args.text.trim().is_empty() {
        println!("Please enter some text first.");
        return Ok(());
    }

    let client = ctx.model_client()?;
    let gate = ctx.gate();
    let email = Email::normalize(&args.email);

    // Tier is decided immediately before the call; a purchase completed
    // since the last command is picked up here.
    let model = gate.select_model(Feature::TextCompletion, &email)?;
    info!(model = %model, "Sending chat request");

    let messages = vec![ChatMessage::user(args.text.clone())];
    let reply = client.chat(&model, &messages).await?;

    println!("{reply}");

    if gate.tier(&email)? == Tier::Advanced {
        eprintln!("(Premium tier active: {model})");
    }

    Ok(())
}
