// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `TierGate` Adapters
//!
//! Boundary components wrapping the external services `TierGate` consumes.
//! Nothing in this crate makes tier decisions; each adapter turns one
//! external API into a typed Rust surface and a typed failure:
//!
//! - [`ModelClient`] - hosted language/vision model API (chat completions,
//!   image analysis, image generation)
//! - [`OcrEngine`] - optical character recognition via the external
//!   `tesseract` binary
//! - [`StripeGateway`] - checkout session creation and retrieval,
//!   implementing the [`PaymentGateway`](tiergate_core::PaymentGateway) seam
//! - [`HttpClient`] - shared HTTP plumbing (timeout, user-agent, bearer
//!   auth, status mapping)
//!
//! Per the interaction model, one user action maps to at most one external
//! call: no adapter retries internally.

pub mod error;
pub mod http;
pub mod model;
pub mod ocr;
pub mod payment;

// Re-export key types at crate root
pub use error::{HttpError, ModelError, OcrError};
pub use http::HttpClient;
pub use model::ModelClient;
pub use ocr::OcrEngine;
pub use payment::StripeGateway;
