//! Imagine command - tiered image generation.

use anyhow::Result;
use clap::Args;
use tiergate_core::{Email, Feature, Tier};
use tracing::info;

use super::AppContext;

/// Arguments for the imagine command.
#[derive(Args)]
pub struct ImagineArgs {
    /// Description of the image to generate.
    pub prompt: String,

    /// Email used to determine the tier.
    #[arg(long, short, default_value = "")]
    pub email: String,
}

/// Runs the imagine command.
pub async fn run(args: &ImagineArgs, ctx: &AppContext) -> Result<()> {
    if args.prompt.trim().is_empty() {
        println!("Please enter an image description first.");
        return Ok(());
    }

    let client = ctx.model_client()?;
    let gate = ctx.gate();
    let email = Email::normalize(&args.email);

    let model = gate.select_model(Feature::ImageGeneration, &email)?;
    info!(model = %model, "Sending image generation request");

    let url = client.generate_image(&model, &args.prompt).await?;

    println!("{url}");

    if gate.tier(&email)? == Tier::Advanced {
        eprintln!("(Premium tier active: {model})");
    }

    Ok(())
}
