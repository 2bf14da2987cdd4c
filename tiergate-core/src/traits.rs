//! Trait definitions for TierGate.
//!
//! This module defines the two seams the entitlement gate is built on:
//! the membership store and the payment gateway. Both are object-safe so
//! the gate can hold `Arc<dyn ...>` and tests can inject in-memory or
//! mock implementations.

use crate::error::{CoreError, PaymentError};
use crate::models::{CheckoutRequest, CheckoutSession, Email};

/// Store of emails currently granted premium entitlement.
///
/// Implementors must make [`grant`](EntitlementStore::grant) idempotent:
/// granting an already-premium email is a no-op from the caller's
/// perspective. Callers pass normalized emails; the store treats them as
/// opaque exact-match keys.
pub trait EntitlementStore: Send + Sync {
    /// Returns true if the email currently holds entitlement.
    fn contains(&self, email: &Email) -> Result<bool, CoreError>;

    /// Records entitlement for the email. Idempotent.
    fn grant(&self, email: &Email) -> Result<(), CoreError>;

    /// Removes entitlement, returning true if the email was present.
    ///
    /// The gate never revokes; this exists for operational cleanup.
    fn remove(&self, email: &Email) -> Result<bool, CoreError>;

    /// Returns all emails currently granted, in unspecified order.
    fn all(&self) -> Result<Vec<Email>, CoreError>;
}

/// Checkout session creation and retrieval at the payment boundary.
///
/// Implementors wrap a hosted payment service. A single user action maps
/// to at most one call; implementors must not retry internally.
#[async_trait::async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Creates a checkout session for the fixed premium product.
    ///
    /// Fails with [`PaymentError::Authentication`] when the service
    /// rejects the configured credentials, [`PaymentError::Gateway`]
    /// otherwise.
    async fn create_checkout_session(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError>;

    /// Retrieves an existing session by id.
    ///
    /// Used at completion time to verify payment status server-side
    /// before entitlement is granted.
    async fn retrieve_session(&self, session_id: &str) -> Result<CheckoutSession, PaymentError>;
}
