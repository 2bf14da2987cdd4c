//! Domain models for TierGate.
//!
//! This module contains the core data structures representing features,
//! tiers, model identifiers, user identity, chat messages, and checkout
//! sessions.
//!
//! ## Submodules
//!
//! - [`tier`] - Tiering types (Feature, Tier, ModelId, ModelCatalog)
//! - [`email`] - Normalized user identity
//! - [`message`] - Chat message types for model requests
//! - [`checkout`] - Payment boundary types (CheckoutRequest, CheckoutSession)
//! - [`grant`] - Premium grant records (PremiumGrant)

mod checkout;
mod email;
mod grant;
mod message;
mod tier;

// Re-export everything at the models level
pub use checkout::{CheckoutRequest, CheckoutSession, PaymentStatus};
pub use email::Email;
pub use grant::PremiumGrant;
pub use message::{ChatMessage, ContentPart, ImageAttachment, ImageUrl, MessageContent, Role};
pub use tier::{Feature, ModelCatalog, ModelId, Tier};
