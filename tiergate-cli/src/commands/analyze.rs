//! Analyze command - OCR plus vision analysis of an uploaded image.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tiergate_adapters::OcrEngine;
use tiergate_core::{Email, Feature, ImageAttachment};
use tracing::{info, warn};

use super::AppContext;

/// Default analysis prompt sent alongside the image.
const ANALYSIS_PROMPT: &str = "Please analyze this image thoroughly.";

/// Arguments for the analyze command.
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Path to the image file (png, jpg, webp, gif).
    pub image: PathBuf,

    /// Email used for entitlement bookkeeping.
    #[arg(long, short, default_value = "")]
    pub email: String,

    /// Custom analysis prompt.
    #[arg(long)]
    pub prompt: Option<String>,
}

/// Runs the analyze command.
pub async fn run(args: &AnalyzeArgs, ctx: &AppContext) -> Result<()> {
    let client = ctx.model_client()?;
    let gate = ctx.gate();
    let email = Email::normalize(&args.email);

    let data = std::fs::read(&args.image)
        .with_context(|| format!("reading image {}", args.image.display()))?;
    let media_type = args
        .image
        .extension()
        .and_then(|e| e.to_str())
        .map_or("image/png", ImageAttachment::media_type_for_extension);
    let image = ImageAttachment::new(data, media_type);

    // OCR is best-effort: a failure is reported and the vision analysis
    // proceeds regardless.
    let ocr = OcrEngine::new();
    match ocr.extract_text(&image).await {
        Ok(text) => {
            println!("Text found in image:");
            if text.trim().is_empty() {
                println!("(none)");
            } else {
                println!("{}", text.trim());
            }
        }
        Err(e) => {
            warn!(error = %e, "OCR failed");
            println!("Text found in image: (OCR unavailable: {e})");
        }
    }

    // Analysis always uses the vision model; it is not a tiered feature.
    let model = gate.select_model(Feature::ImageAnalysis, &email)?;
    info!(model = %model, "Sending analysis request");

    let prompt = args.prompt.as_deref().unwrap_or(ANALYSIS_PROMPT);
    let analysis = client.analyze_image(&model, prompt, &image).await?;

    println!();
    println!("Analysis:");
    println!("{analysis}");

    Ok(())
}
