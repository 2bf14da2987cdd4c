//! Buy command - initiate a premium purchase.

use anyhow::Result;
use clap::Args;
use tiergate_core::Email;
use tiergate_gate::GateError;

use super::AppContext;

/// Arguments for the buy command.
#[derive(Args)]
pub struct BuyArgs {
    /// Email to purchase premium access for.
    #[arg(long, short, default_value = "")]
    pub email: String,
}

/// Runs the buy command.
pub async fn run(args: &BuyArgs, ctx: &AppContext) -> Result<()> {
    let email = Email::normalize(&args.email);

    if email.is_empty() {
        println!("Please enter an email for premium verification first.");
        return Ok(());
    }

    let gate = ctx.payment_gate()?;

    if gate.is_premium(&email)? {
        println!("{email} already has premium access.");
        return Ok(());
    }

    match gate.initiate_purchase(&email).await {
        Ok(url) => {
            println!("Open this link to pay:");
            println!("{url}");
            println!();
            println!("After checkout, run `tiergate callback <redirect-url>` to activate premium.");
            Ok(())
        }
        Err(GateError::EmptyEmail) => {
            println!("Please enter an email for premium verification first.");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
