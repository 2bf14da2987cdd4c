//! Callback command - complete a purchase from a gateway redirect.

use anyhow::Result;
use clap::Args;
use tiergate_gate::{parse_callback, CallbackOutcome};
use tracing::info;

use super::AppContext;

/// Arguments for the callback command.
#[derive(Args)]
pub struct CallbackArgs {
    /// The full redirect URL the gateway sent the browser back to.
    pub url: String,
}

/// Runs the callback command.
pub async fn run(args: &CallbackArgs, ctx: &AppContext) -> Result<()> {
    match parse_callback(&args.url)? {
        CallbackOutcome::Canceled => {
            println!("Payment canceled. No changes made.");
            Ok(())
        }
        CallbackOutcome::Success { email, session_id } => {
            // The redirect is a claim, not proof; the gate re-checks the
            // session with the gateway before granting.
            let gate = ctx.payment_gate()?;
            gate.complete_purchase(&email, &session_id).await?;

            info!(email = %email, "Purchase completed");
            println!("Premium access activated for {email}.");
            Ok(())
        }
    }
}
