//! Core error types for `TierGate`.

use thiserror::Error;

/// Core error type for `TierGate` operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Feature not available in the current configuration.
    #[error("Feature not available: {0}")]
    FeatureUnavailable(String),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid data from API response.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

/// Error type for the payment boundary.
///
/// The gateway distinguishes exactly two failure classes: credential
/// rejection and everything else. Callers surface both to the user and
/// make no further attempt.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// The gateway rejected the configured credentials.
    #[error("Payment gateway rejected credentials: {0}")]
    Authentication(String),

    /// Any other gateway failure (transport, bad response, declined setup).
    #[error("Payment gateway error: {0}")]
    Gateway(String),
}

impl PaymentError {
    /// Returns true if this failure is a credential rejection.
    pub fn is_authentication(&self) -> bool {
        matches!(self, PaymentError::Authentication(_))
    }
}
