//! Payment gateway adapter (Stripe Checkout REST API).
//!
//! Creates hosted checkout sessions for the fixed premium product and
//! retrieves them again at completion time so the gate can verify the
//! payment server-side instead of trusting the redirect.

use serde::Deserialize;
use tiergate_core::{
    CheckoutRequest, CheckoutSession, PaymentError, PaymentGateway, PaymentStatus,
};
use tracing::{debug, instrument, warn};

use crate::error::payment_error_from_http;
use crate::http::HttpClient;

// ============================================================================
// Constants
// ============================================================================

/// Gateway API base URL.
const STRIPE_API_BASE: &str = "https://api.stripe.com";

/// Checkout sessions endpoint.
const SESSIONS_ENDPOINT: &str = "/v1/checkout/sessions";

// ============================================================================
// Wire Types
// ============================================================================

/// Checkout session payload as returned by the gateway.
#[derive(Debug, Deserialize)]
pub struct SessionPayload {
    /// Session identifier.
    pub id: String,

    /// Hosted checkout page URL (present on open sessions).
    #[serde(default)]
    pub url: Option<String>,

    /// Payment state string (`paid`, `unpaid`, `no_payment_required`).
    #[serde(default)]
    pub payment_status: Option<String>,

    /// Email supplied at session creation.
    #[serde(default)]
    pub customer_email: Option<String>,

    /// Customer details populated after checkout.
    #[serde(default)]
    pub customer_details: Option<CustomerDetails>,
}

/// Customer block inside a session payload.
#[derive(Debug, Deserialize)]
pub struct CustomerDetails {
    /// Email the customer entered (or confirmed) at checkout.
    #[serde(default)]
    pub email: Option<String>,
}

impl SessionPayload {
    /// Converts the wire payload into the domain session type.
    fn into_session(self) -> CheckoutSession {
        let payment_status = match self.payment_status.as_deref() {
            Some("paid") => PaymentStatus::Paid,
            Some("no_payment_required") => PaymentStatus::NoPaymentRequired,
            _ => PaymentStatus::Unpaid,
        };

        // Prefer the post-checkout customer details; they reflect what the
        // gateway actually charged, not just what we sent.
        let customer_email = self
            .customer_details
            .and_then(|d| d.email)
            .or(self.customer_email);

        CheckoutSession {
            id: self.id,
            url: self.url,
            payment_status,
            customer_email,
        }
    }
}

// ============================================================================
// Gateway Client
// ============================================================================

/// Stripe-backed implementation of the [`PaymentGateway`] seam.
#[derive(Debug, Clone)]
pub struct StripeGateway {
    http: HttpClient,
    secret_key: String,
    api_base: String,
}

impl StripeGateway {
    /// Creates a gateway client with the given secret key.
    pub fn new(secret_key: impl Into<String>) -> Result<Self, PaymentError> {
        let http = HttpClient::new().map_err(payment_error_from_http)?;
        Ok(Self {
            http,
            secret_key: secret_key.into(),
            api_base: STRIPE_API_BASE.to_string(),
        })
    }

    /// Overrides the API base URL (used against stub servers in tests).
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// Builds the form body for session creation.
    ///
    /// The gateway takes a flat form encoding with bracketed keys for the
    /// single card line item.
    fn build_session_form(request: &CheckoutRequest) -> Vec<(String, String)> {
        vec![
            (
                "payment_method_types[0]".to_string(),
                "card".to_string(),
            ),
            (
                "line_items[0][price_data][currency]".to_string(),
                request.currency.clone(),
            ),
            (
                "line_items[0][price_data][product_data][name]".to_string(),
                request.product_name.clone(),
            ),
            (
                "line_items[0][price_data][unit_amount]".to_string(),
                request.unit_amount.to_string(),
            ),
            ("line_items[0][quantity]".to_string(), "1".to_string()),
            ("mode".to_string(), "payment".to_string()),
            (
                "customer_email".to_string(),
                request.customer_email.clone(),
            ),
            ("success_url".to_string(), request.success_url.clone()),
            ("cancel_url".to_string(), request.cancel_url.clone()),
        ]
    }

    /// Parses a session payload from a response body.
    fn parse_session(body: &str) -> Result<CheckoutSession, PaymentError> {
        let payload: SessionPayload = serde_json::from_str(body).map_err(|e| {
            warn!(error = %e, "Failed to parse checkout session");
            PaymentError::Gateway(format!("Invalid session payload: {e}"))
        })?;
        Ok(payload.into_session())
    }
}

#[async_trait::async_trait]
impl PaymentGateway for StripeGateway {
    #[instrument(skip(self, request), fields(product = %request.product_name))]
    async fn create_checkout_session(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        debug!("Creating checkout session");

        let url = format!("{}{}", self.api_base, SESSIONS_ENDPOINT);
        let form = Self::build_session_form(request);

        let response = self
            .http
            .post_form(&url, &self.secret_key, &form)
            .await
            .map_err(payment_error_from_http)?;

        let body = response
            .text()
            .await
            .map_err(|e| PaymentError::Gateway(e.to_string()))?;

        Self::parse_session(&body)
    }

    #[instrument(skip(self))]
    async fn retrieve_session(&self, session_id: &str) -> Result<CheckoutSession, PaymentError> {
        debug!("Retrieving checkout session");

        let url = format!("{}{}/{}", self.api_base, SESSIONS_ENDPOINT, session_id);

        let response = self
            .http
            .get_with_auth(&url, &self.secret_key)
            .await
            .map_err(payment_error_from_http)?;

        let body = response
            .text()
            .await
            .map_err(|e| PaymentError::Gateway(e.to_string()))?;

        Self::parse_session(&body)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_request() -> CheckoutRequest {
        CheckoutRequest {
            product_name: "Premium model access".to_string(),
            unit_amount: 500,
            currency: "usd".to_string(),
            customer_email: "a@x.com".to_string(),
            success_url: "http://localhost:8501/?email=a%40x.com&session_id={CHECKOUT_SESSION_ID}"
                .to_string(),
            cancel_url: "http://localhost:8501/?canceled=true".to_string(),
        }
    }

    #[test]
    fn test_session_form_shape() {
        let form = StripeGateway::build_session_form(&sample_request());
        let get = |key: &str| {
            form.iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        };

        assert_eq!(get("payment_method_types[0]"), Some("card"));
        assert_eq!(get("line_items[0][price_data][currency]"), Some("usd"));
        assert_eq!(
            get("line_items[0][price_data][product_data][name]"),
            Some("Premium model access")
        );
        assert_eq!(get("line_items[0][price_data][unit_amount]"), Some("500"));
        assert_eq!(get("line_items[0][quantity]"), Some("1"));
        assert_eq!(get("mode"), Some("payment"));
        assert_eq!(get("customer_email"), Some("a@x.com"));
    }

    #[test]
    fn test_parse_open_session() {
        let body = r#"{
            "id": "cs_test_123",
            "url": "https://checkout.stripe.com/c/pay/cs_test_123",
            "payment_status": "unpaid",
            "customer_email": "a@x.com"
        }"#;

        let session = StripeGateway::parse_session(body).unwrap();
        assert_eq!(session.id, "cs_test_123");
        assert_eq!(session.payment_status, PaymentStatus::Unpaid);
        assert_eq!(session.customer_email.as_deref(), Some("a@x.com"));
        assert!(session.url.is_some());
    }

    #[test]
    fn test_parse_completed_session_prefers_customer_details() {
        let body = r#"{
            "id": "cs_test_123",
            "payment_status": "paid",
            "customer_email": "a@x.com",
            "customer_details": {"email": "paid-as@x.com"}
        }"#;

        let session = StripeGateway::parse_session(body).unwrap();
        assert_eq!(session.payment_status, PaymentStatus::Paid);
        assert_eq!(session.customer_email.as_deref(), Some("paid-as@x.com"));
    }

    #[test]
    fn test_parse_garbage_is_gateway_error() {
        let err = StripeGateway::parse_session("not json").unwrap_err();
        assert!(!err.is_authentication());
    }
}
