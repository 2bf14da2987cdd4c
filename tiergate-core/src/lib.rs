// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `TierGate` Core
//!
//! Core types, models, and traits for the `TierGate` application.
//!
//! This crate provides the foundational abstractions used across all other
//! `TierGate` crates, including:
//!
//! - Domain models (features, tiers, model identifiers, chat messages)
//! - Checkout types for the payment boundary
//! - Error types
//! - Trait seams for the entitlement store and payment gateway
//!
//! ## Key Types
//!
//! ### Tiering
//! - [`Feature`] - User-facing feature kinds (text, image generation, analysis)
//! - [`Tier`] - Entitlement tier (standard vs advanced)
//! - [`ModelId`] - Concrete backing model identifier
//! - [`ModelCatalog`] - Maps (feature, tier) to a model identifier
//!
//! ### Identity
//! - [`Email`] - Normalized user identity used as the entitlement key
//! - [`PremiumGrant`] - Recorded grant (email plus timestamp)
//!
//! ### Chat
//! - [`ChatMessage`] - Role-tagged message for model requests
//! - [`MessageContent`] - Plain text or multi-part (text + image) content
//!
//! ### Payments
//! - [`CheckoutRequest`] - Product + callback URLs sent to the gateway
//! - [`CheckoutSession`] - Gateway session (id, url, payment status, email)
//!
//! ### Seams
//! - [`EntitlementStore`] - Injectable premium-membership store
//! - [`PaymentGateway`] - Injectable checkout session creation/retrieval

pub mod error;
pub mod models;
pub mod traits;

// Re-export error types
pub use error::{CoreError, PaymentError};

// Re-export all model types
pub use models::{
    // Checkout types
    CheckoutRequest,
    CheckoutSession,
    PaymentStatus,
    // Chat types
    ChatMessage,
    ContentPart,
    ImageAttachment,
    ImageUrl,
    MessageContent,
    Role,
    // Identity
    Email,
    // Grants
    PremiumGrant,
    // Tiering types
    Feature,
    ModelCatalog,
    ModelId,
    Tier,
};

// Re-export traits
pub use traits::{EntitlementStore, PaymentGateway};
