//! Payment boundary types.
//!
//! A [`CheckoutRequest`] describes the fixed product and the two callback
//! URLs handed to the gateway; a [`CheckoutSession`] is the gateway's
//! ephemeral record, retrieved again at completion time to verify that the
//! payment actually happened before entitlement is granted.

use serde::{Deserialize, Serialize};

// ============================================================================
// Checkout Request
// ============================================================================

/// Parameters for creating a checkout session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRequest {
    /// Product name shown on the checkout page.
    pub product_name: String,
    /// Price in the currency's minor unit (e.g. cents).
    pub unit_amount: u64,
    /// ISO currency code, lowercase (e.g. `usd`).
    pub currency: String,
    /// Email of the purchasing user, forwarded to the gateway so the
    /// completed session records who paid.
    pub customer_email: String,
    /// URL the gateway redirects to after successful payment.
    pub success_url: String,
    /// URL the gateway redirects to when the user cancels.
    pub cancel_url: String,
}

// ============================================================================
// Checkout Session
// ============================================================================

/// Payment state of a checkout session, as reported by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Payment has completed.
    Paid,
    /// Payment has not completed.
    #[default]
    Unpaid,
    /// Session required no payment (e.g. fully discounted).
    NoPaymentRequired,
}

impl PaymentStatus {
    /// Returns true if this status settles the purchase.
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Paid | Self::NoPaymentRequired)
    }
}

/// A checkout session as known to the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSession {
    /// Gateway-assigned session identifier.
    pub id: String,
    /// Hosted checkout page URL; present on freshly created sessions.
    pub url: Option<String>,
    /// Current payment state.
    pub payment_status: PaymentStatus,
    /// Email the gateway has recorded for the customer, if any.
    pub customer_email: Option<String>,
}

// ============================================================================
// Tests
// ============================================================================
