//! The entitlement gate.

use std::sync::Arc;
use tiergate_core::{
    CheckoutRequest, Email, EntitlementStore, Feature, ModelCatalog, ModelId, PaymentError,
    PaymentGateway, Tier,
};
use tracing::{debug, info, warn};
use url::Url;

use crate::config::CheckoutConfig;
use crate::error::GateError;

/// Single source of truth for premium status and model-tier selection.
///
/// Tier decisions consult the store on every call; entitlement can change
/// between requests within the same session, so nothing is cached.
pub struct EntitlementGate {
    store: Arc<dyn EntitlementStore>,
    gateway: Arc<dyn PaymentGateway>,
    checkout: CheckoutConfig,
    catalog: ModelCatalog,
}

impl EntitlementGate {
    /// Creates a gate over the given store and gateway with default
    /// checkout and catalog configuration.
    pub fn new(store: Arc<dyn EntitlementStore>, gateway: Arc<dyn PaymentGateway>) -> Self {
        Self {
            store,
            gateway,
            checkout: CheckoutConfig::default(),
            catalog: ModelCatalog::default(),
        }
    }

    /// Overrides the checkout configuration.
    pub fn with_checkout(mut self, checkout: CheckoutConfig) -> Self {
        self.checkout = checkout;
        self
    }

    /// Overrides the model catalog.
    pub fn with_catalog(mut self, catalog: ModelCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Returns the model catalog in use.
    pub fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    // ========================================================================
    // Decisions
    // ========================================================================

    /// Returns true iff the email currently holds premium entitlement.
    ///
    /// The empty identity is never premium, regardless of store contents,
    /// and is answered without touching the store.
    pub fn is_premium(&self, email: &Email) -> Result<bool, GateError> {
        if email.is_empty() {
            return Ok(false);
        }
        Ok(self.store.contains(email)?)
    }

    /// Returns the effective tier for the email.
    pub fn tier(&self, email: &Email) -> Result<Tier, GateError> {
        Ok(Tier::from_premium(self.is_premium(email)?))
    }

    /// Resolves the model to use for a feature invocation.
    ///
    /// Consulted immediately before every model call; the result reflects
    /// the store's membership at this moment.
    pub fn select_model(&self, feature: Feature, email: &Email) -> Result<ModelId, GateError> {
        let tier = self.tier(email)?;
        let model = self.catalog.resolve(feature, tier);
        debug!(feature = ?feature, tier = ?tier, model = %model, "Selected model");
        Ok(model)
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// Records premium entitlement for the email. Idempotent.
    ///
    /// Callers must only invoke this on a verified payment-completion
    /// signal; [`complete_purchase`](Self::complete_purchase) is the path
    /// that enforces that.
    pub fn grant_premium(&self, email: &Email) -> Result<(), GateError> {
        if email.is_empty() {
            return Err(GateError::EmptyEmail);
        }
        self.store.grant(email)?;
        Ok(())
    }

    /// Starts a purchase for the fixed premium product.
    ///
    /// Fails fast on an empty email without calling the gateway. One
    /// user action produces exactly one gateway attempt; failures are
    /// surfaced, never retried.
    pub async fn initiate_purchase(&self, email: &Email) -> Result<Url, GateError> {
        if email.is_empty() {
            return Err(GateError::EmptyEmail);
        }

        let request = CheckoutRequest {
            product_name: self.checkout.product_name.clone(),
            unit_amount: self.checkout.unit_amount,
            currency: self.checkout.currency.clone(),
            customer_email: email.as_str().to_string(),
            success_url: self.checkout.success_url(email),
            cancel_url: self.checkout.cancel_url(),
        };

        let session = self.gateway.create_checkout_session(&request).await?;

        let raw_url = session.url.ok_or_else(|| {
            PaymentError::Gateway(format!("session {} has no checkout URL", session.id))
        })?;
        let url = Url::parse(&raw_url)
            .map_err(|e| PaymentError::Gateway(format!("invalid checkout URL: {e}")))?;

        info!(email = %email, session_id = %session.id, "Checkout session created");
        Ok(url)
    }

    /// Completes a purchase after a success redirect.
    ///
    /// The redirect alone proves nothing: the session is retrieved from
    /// the gateway and entitlement is granted only when the gateway says
    /// the session is settled and its recorded customer matches the
    /// callback email.
    pub async fn complete_purchase(
        &self,
        email: &Email,
        session_id: &str,
    ) -> Result<(), GateError> {
        if email.is_empty() {
            return Err(GateError::EmptyEmail);
        }

        let session = self.gateway.retrieve_session(session_id).await?;

        if !session.payment_status.is_settled() {
            warn!(session_id, "Completion callback for unsettled session");
            return Err(GateError::PaymentIncomplete {
                session_id: session.id,
            });
        }

        let session_email = session.customer_email.as_deref().map(Email::normalize);
        if session_email.as_ref() != Some(email) {
            warn!(session_id, email = %email, "Completion callback email mismatch");
            return Err(GateError::EmailMismatch {
                session_id: session.id,
                email: email.as_str().to_string(),
            });
        }

        self.store.grant(email)?;
        info!(email = %email, session_id, "Premium entitlement granted");
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tiergate_core::{CheckoutSession, PaymentStatus};
    use tiergate_store::MemoryEntitlementStore;

    use crate::callback::{parse_callback, CallbackOutcome};
    use crate::config::SESSION_ID_PLACEHOLDER;

    /// Gateway double: records requests, mints sessions, and can be told
    /// to reject credentials or mark a session paid.
    #[derive(Default)]
    struct MockGateway {
        reject_credentials: bool,
        create_calls: AtomicUsize,
        last_request: Mutex<Option<CheckoutRequest>>,
        sessions: Mutex<HashMap<String, CheckoutSession>>,
    }

    impl MockGateway {
        fn rejecting_credentials() -> Self {
            Self {
                reject_credentials: true,
                ..Self::default()
            }
        }

        fn create_count(&self) -> usize {
            self.create_calls.load(Ordering::SeqCst)
        }

        fn last_request(&self) -> Option<CheckoutRequest> {
            self.last_request.lock().unwrap().clone()
        }

        fn mark_paid(&self, session_id: &str) {
            let mut sessions = self.sessions.lock().unwrap();
            if let Some(session) = sessions.get_mut(session_id) {
                session.payment_status = PaymentStatus::Paid;
            }
        }

        fn set_session_email(&self, session_id: &str, email: Option<&str>) {
            let mut sessions = self.sessions.lock().unwrap();
            if let Some(session) = sessions.get_mut(session_id) {
                session.customer_email = email.map(str::to_string);
            }
        }
    }

    #[async_trait::async_trait]
    impl PaymentGateway for MockGateway {
        async fn create_checkout_session(
            &self,
            request: &CheckoutRequest,
        ) -> Result<CheckoutSession, PaymentError> {
            self.create_calls.fetch_add(1, Ordering::SeqCst);

            if self.reject_credentials {
                return Err(PaymentError::Authentication("invalid API key".to_string()));
            }

            *self.last_request.lock().unwrap() = Some(request.clone());

            let id = format!("cs_mock_{}", self.create_count());
            let session = CheckoutSession {
                id: id.clone(),
                url: Some(format!(
                    "https://pay.example.com/{id}?prefilled_email={}",
                    request.customer_email
                )),
                payment_status: PaymentStatus::Unpaid,
                customer_email: Some(request.customer_email.clone()),
            };

            self.sessions.lock().unwrap().insert(id, session.clone());
            Ok(session)
        }

        async fn retrieve_session(
            &self,
            session_id: &str,
        ) -> Result<CheckoutSession, PaymentError> {
            self.sessions
                .lock()
                .unwrap()
                .get(session_id)
                .cloned()
                .ok_or_else(|| PaymentError::Gateway(format!("no such session: {session_id}")))
        }
    }

    fn gate_with(gateway: Arc<MockGateway>) -> EntitlementGate {
        EntitlementGate::new(Arc::new(MemoryEntitlementStore::new()), gateway)
    }

    #[test]
    fn test_ungranted_email_is_not_premium() {
        let gate = gate_with(Arc::new(MockGateway::default()));
        assert!(!gate.is_premium(&Email::normalize("b@x.com")).unwrap());
    }

    #[test]
    fn test_empty_email_is_never_premium() {
        let store = Arc::new(MemoryEntitlementStore::new());
        // Poison the store directly with an empty key; the gate must still
        // answer false without consulting it.
        store.grant(&Email::normalize("")).unwrap();

        let gate = EntitlementGate::new(store, Arc::new(MockGateway::default()));
        assert!(!gate.is_premium(&Email::normalize("")).unwrap());
        assert!(!gate.is_premium(&Email::normalize("   ")).unwrap());
    }

    #[test]
    fn test_grant_is_idempotent() {
        let gate = gate_with(Arc::new(MockGateway::default()));
        let email = Email::normalize("a@x.com");

        gate.grant_premium(&email).unwrap();
        gate.grant_premium(&email).unwrap();

        assert!(gate.is_premium(&email).unwrap());
    }

    #[test]
    fn test_grant_rejects_empty_email() {
        let gate = gate_with(Arc::new(MockGateway::default()));
        assert!(matches!(
            gate.grant_premium(&Email::normalize(" ")),
            Err(GateError::EmptyEmail)
        ));
    }

    #[test]
    fn test_select_model_per_tier() {
        let gate = gate_with(Arc::new(MockGateway::default()));
        let standard = Email::normalize("standard@x.com");
        let premium = Email::normalize("premium@x.com");
        gate.grant_premium(&premium).unwrap();

        assert_eq!(
            gate.select_model(Feature::TextCompletion, &standard)
                .unwrap()
                .as_str(),
            "gpt-3.5-turbo"
        );
        assert_eq!(
            gate.select_model(Feature::TextCompletion, &premium)
                .unwrap()
                .as_str(),
            "gpt-4-turbo"
        );
        assert_eq!(
            gate.select_model(Feature::ImageGeneration, &standard)
                .unwrap()
                .as_str(),
            "dall-e-2"
        );
        assert_eq!(
            gate.select_model(Feature::ImageGeneration, &premium)
                .unwrap()
                .as_str(),
            "dall-e-3"
        );
    }

    #[test]
    fn test_selection_reflects_store_changes_between_requests() {
        let gate = gate_with(Arc::new(MockGateway::default()));
        let email = Email::normalize("a@x.com");

        assert_eq!(
            gate.select_model(Feature::TextCompletion, &email)
                .unwrap()
                .as_str(),
            "gpt-3.5-turbo"
        );

        gate.grant_premium(&email).unwrap();

        assert_eq!(
            gate.select_model(Feature::TextCompletion, &email)
                .unwrap()
                .as_str(),
            "gpt-4-turbo"
        );
    }

    #[test]
    fn test_normalization_unifies_identities() {
        let gate = gate_with(Arc::new(MockGateway::default()));

        gate.grant_premium(&Email::normalize("  A@X.com ")).unwrap();
        assert!(gate.is_premium(&Email::normalize("a@x.com")).unwrap());
    }

    #[tokio::test]
    async fn test_initiate_purchase_empty_email_skips_gateway() {
        let gateway = Arc::new(MockGateway::default());
        let gate = gate_with(gateway.clone());

        let err = gate.initiate_purchase(&Email::normalize("")).await.unwrap_err();

        assert!(matches!(err, GateError::EmptyEmail));
        assert_eq!(gateway.create_count(), 0);
    }

    #[tokio::test]
    async fn test_initiate_purchase_auth_rejection() {
        let gateway = Arc::new(MockGateway::rejecting_credentials());
        let gate = gate_with(gateway.clone());

        let err = gate
            .initiate_purchase(&Email::normalize("user@example.com"))
            .await
            .unwrap_err();

        match err {
            GateError::Payment(e) => assert!(e.is_authentication()),
            other => panic!("expected payment error, got {other:?}"),
        }
        // The single attempt happened, and only one.
        assert_eq!(gateway.create_count(), 1);
    }

    #[tokio::test]
    async fn test_purchase_end_to_end() {
        let gateway = Arc::new(MockGateway::default());
        let gate = gate_with(gateway.clone());
        let email = Email::normalize("a@x.com");

        // Initiate: checkout URL carries the purchaser.
        let checkout_url = gate.initiate_purchase(&email).await.unwrap();
        assert!(checkout_url.as_str().contains("a@x.com"));

        // The success URL we handed the gateway embeds the email and the
        // session-id placeholder.
        let request = gateway.last_request().unwrap();
        assert!(request.success_url.contains("email=a%40x.com"));
        assert!(request.success_url.contains(SESSION_ID_PLACEHOLDER));

        // Simulate the gateway: payment settles, then it redirects back
        // with the placeholder substituted.
        gateway.mark_paid("cs_mock_1");
        let redirect = request
            .success_url
            .replace(SESSION_ID_PLACEHOLDER, "cs_mock_1");

        let outcome = parse_callback(&redirect).unwrap();
        let CallbackOutcome::Success { email: cb_email, session_id } = outcome else {
            panic!("expected success outcome");
        };
        assert_eq!(cb_email, email);

        gate.complete_purchase(&cb_email, &session_id).await.unwrap();

        assert!(gate.is_premium(&email).unwrap());
        assert_eq!(
            gate.select_model(Feature::TextCompletion, &email)
                .unwrap()
                .as_str(),
            "gpt-4-turbo"
        );
    }

    #[tokio::test]
    async fn test_never_paid_user_stays_standard() {
        let gateway = Arc::new(MockGateway::default());
        let gate = gate_with(gateway.clone());
        let email = Email::normalize("b@x.com");

        // Initiates but never completes payment.
        gate.initiate_purchase(&email).await.unwrap();

        for _ in 0..3 {
            assert_eq!(
                gate.select_model(Feature::TextCompletion, &email)
                    .unwrap()
                    .as_str(),
                "gpt-3.5-turbo"
            );
        }
    }

    #[tokio::test]
    async fn test_unsettled_session_grants_nothing() {
        let gateway = Arc::new(MockGateway::default());
        let gate = gate_with(gateway.clone());
        let email = Email::normalize("a@x.com");

        gate.initiate_purchase(&email).await.unwrap();

        // Redirect arrives but the gateway still reports the session
        // unpaid: a forged or premature callback.
        let err = gate.complete_purchase(&email, "cs_mock_1").await.unwrap_err();

        assert!(matches!(err, GateError::PaymentIncomplete { .. }));
        assert!(!gate.is_premium(&email).unwrap());
    }

    #[tokio::test]
    async fn test_email_mismatch_grants_nothing() {
        let gateway = Arc::new(MockGateway::default());
        let gate = gate_with(gateway.clone());
        let buyer = Email::normalize("a@x.com");
        let claimer = Email::normalize("mallory@x.com");

        gate.initiate_purchase(&buyer).await.unwrap();
        gateway.mark_paid("cs_mock_1");

        let err = gate
            .complete_purchase(&claimer, "cs_mock_1")
            .await
            .unwrap_err();

        assert!(matches!(err, GateError::EmailMismatch { .. }));
        assert!(!gate.is_premium(&claimer).unwrap());
    }

    #[tokio::test]
    async fn test_session_without_email_grants_nothing() {
        let gateway = Arc::new(MockGateway::default());
        let gate = gate_with(gateway.clone());
        let email = Email::normalize("a@x.com");

        gate.initiate_purchase(&email).await.unwrap();
        gateway.mark_paid("cs_mock_1");
        gateway.set_session_email("cs_mock_1", None);

        let err = gate.complete_purchase(&email, "cs_mock_1").await.unwrap_err();

        assert!(matches!(err, GateError::EmailMismatch { .. }));
        assert!(!gate.is_premium(&email).unwrap());
    }

    #[tokio::test]
    async fn test_unknown_session_is_gateway_error() {
        let gateway = Arc::new(MockGateway::default());
        let gate = gate_with(gateway);

        let err = gate
            .complete_purchase(&Email::normalize("a@x.com"), "cs_unknown")
            .await
            .unwrap_err();

        assert!(matches!(err, GateError::Payment(PaymentError::Gateway(_))));
    }
}
