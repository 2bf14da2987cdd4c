//! Payment redirect parsing.
//!
//! After checkout the gateway redirects the user back to the return URL.
//! This module classifies that redirect; it never grants anything itself.
//! A successful outcome still has to pass server-side verification in
//! [`EntitlementGate::complete_purchase`](crate::EntitlementGate::complete_purchase).

use tiergate_core::Email;
use url::Url;

use crate::error::GateError;

/// Classified payment redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackOutcome {
    /// The gateway reported success. Carries the email embedded at
    /// checkout-initiation time and the session id to verify.
    Success {
        /// Email embedded in the success URL.
        email: Email,
        /// Gateway session identifier.
        session_id: String,
    },
    /// The user canceled at checkout.
    Canceled,
}

/// Parses a redirect URL into a callback outcome.
///
/// A cancel redirect carries `canceled=true`; a success redirect carries
/// both `email` and `session_id`. Anything else is an invalid callback.
pub fn parse_callback(raw: &str) -> Result<CallbackOutcome, GateError> {
    let url = Url::parse(raw).map_err(|e| GateError::InvalidCallback(e.to_string()))?;

    let mut email = None;
    let mut session_id = None;
    let mut canceled = false;

    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "email" => email = Some(Email::normalize(&value)),
            "session_id" => session_id = Some(value.into_owned()),
            "canceled" if value == "true" => canceled = true,
            _ => {}
        }
    }

    if canceled {
        return Ok(CallbackOutcome::Canceled);
    }

    match (email, session_id) {
        (Some(email), Some(session_id)) if !email.is_empty() && !session_id.is_empty() => {
            Ok(CallbackOutcome::Success { email, session_id })
        }
        _ => Err(GateError::InvalidCallback(
            "redirect carries neither a cancellation nor an email and session id".to_string(),
        )),
    }
}

// ============================================================================
// Tests
// ============================================================================
