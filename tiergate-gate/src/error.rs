//! Gate error types.

use thiserror::Error;
use tiergate_core::{CoreError, PaymentError};

/// Errors produced by the entitlement gate.
#[derive(Debug, Error)]
pub enum GateError {
    /// The user supplied no email for an action that requires one.
    ///
    /// Surfaced as a warning; no store or gateway call is made.
    #[error("An email address is required for this action")]
    EmptyEmail,

    /// The payment boundary failed.
    #[error(transparent)]
    Payment(#[from] PaymentError),

    /// The entitlement store failed.
    #[error("Entitlement store error: {0}")]
    Store(#[from] CoreError),

    /// A completion callback referenced a session the gateway reports as
    /// not settled. No entitlement is granted.
    #[error("Payment not completed for session {session_id}")]
    PaymentIncomplete {
        /// Gateway session identifier.
        session_id: String,
    },

    /// The session's recorded customer does not match the callback email.
    /// No entitlement is granted.
    #[error("Session {session_id} was not paid for by {email}")]
    EmailMismatch {
        /// Gateway session identifier.
        session_id: String,
        /// Email claimed by the callback.
        email: String,
    },

    /// A redirect URL could not be interpreted as a payment callback.
    #[error("Invalid payment callback: {0}")]
    InvalidCallback(String),
}
