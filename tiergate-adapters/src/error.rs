//! Adapter error types.

use std::time::Duration;
use thiserror::Error;
use tiergate_core::PaymentError;

// ============================================================================
// HTTP Error
// ============================================================================

/// HTTP-specific error type shared by the API adapters.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Request error (transport, TLS, timeout).
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// The service rejected the configured credentials.
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Unexpected status code from the service.
    #[error("Unexpected status {status}: {body}")]
    UnexpectedStatus {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated for display.
        body: String,
    },
}

// ============================================================================
// Model Error
// ============================================================================

/// Error type for the hosted model API.
#[derive(Debug, Error)]
pub enum ModelError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// The API rejected the configured credentials.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Response did not have the expected shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<HttpError> for ModelError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::AuthenticationFailed(msg) => ModelError::Authentication(msg),
            HttpError::UnexpectedStatus { status, body } => {
                ModelError::InvalidResponse(format!("HTTP {status}: {body}"))
            }
            HttpError::Request(e) => ModelError::Http(e.to_string()),
        }
    }
}

impl From<reqwest::Error> for ModelError {
    fn from(err: reqwest::Error) -> Self {
        ModelError::Http(err.to_string())
    }
}

// ============================================================================
// OCR Error
// ============================================================================

/// Error type for the OCR boundary.
///
/// OCR failures are surfaced to the user but never abort the surrounding
/// analysis flow.
#[derive(Debug, Error)]
pub enum OcrError {
    /// The `tesseract` binary is not installed or not on PATH.
    #[error("OCR engine not installed (tesseract not found on PATH)")]
    NotInstalled,

    /// The OCR process exited with a non-zero code.
    #[error("OCR failed with code {code}: {stderr}")]
    Failed {
        /// Exit code from the process.
        code: i32,
        /// Standard error output.
        stderr: String,
    },

    /// The OCR process exceeded its time budget.
    #[error("OCR timed out after {0:?}")]
    Timeout(Duration),

    /// IO error writing the image or reading output.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// ============================================================================
// Payment mapping
// ============================================================================

/// Maps shared HTTP failures onto the payment taxonomy.
///
/// Credential rejection keeps its identity; every other failure collapses
/// into the generic gateway class.
pub(crate) fn payment_error_from_http(err: HttpError) -> PaymentError {
    match err {
        HttpError::AuthenticationFailed(msg) => PaymentError::Authentication(msg),
        HttpError::UnexpectedStatus { status, body } => {
            PaymentError::Gateway(format!("HTTP {status}: {body}"))
        }
        HttpError::Request(e) => PaymentError::Gateway(e.to_string()),
    }
}
