//! Checkout configuration.

use tiergate_core::Email;
use url::Url;

/// Placeholder the gateway substitutes with the real session id when it
/// redirects back after checkout.
pub const SESSION_ID_PLACEHOLDER: &str = "{CHECKOUT_SESSION_ID}";

/// Fixed product and callback configuration for purchases.
///
/// The product is deliberately a single fixed offering: one price, one
/// description, one currency. The only per-purchase variation is the
/// email embedded in the success URL.
#[derive(Debug, Clone)]
pub struct CheckoutConfig {
    /// Product name shown at checkout.
    pub product_name: String,
    /// Price in the currency's minor unit.
    pub unit_amount: u64,
    /// ISO currency code, lowercase.
    pub currency: String,
    /// Base URL the gateway redirects back to after checkout.
    pub return_url: Url,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            product_name: "Premium model access".to_string(),
            unit_amount: 500,
            currency: "usd".to_string(),
            // Default matches a locally served front end.
            return_url: Url::parse("http://localhost:8501/").expect("static URL parses"),
        }
    }
}

impl CheckoutConfig {
    /// Builds the success callback URL for a purchase.
    ///
    /// Embeds the purchaser's email (so the completion path knows who to
    /// verify) and the gateway's session-id placeholder. The placeholder
    /// must stay literal, so it is appended outside the encoding
    /// query-pair API.
    pub fn success_url(&self, email: &Email) -> String {
        let mut url = self.return_url.clone();
        url.query_pairs_mut().append_pair("email", email.as_str());
        format!("{url}&session_id={SESSION_ID_PLACEHOLDER}")
    }

    /// Builds the cancellation callback URL.
    pub fn cancel_url(&self) -> String {
        let mut url = self.return_url.clone();
        url.query_pairs_mut().append_pair("canceled", "true");
        url.to_string()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_url_embeds_email_and_placeholder() {
        let config = CheckoutConfig::default();
        let url = config.success_url(&Email::normalize("a@x.com"));

        assert!(url.contains("email=a%40x.com"));
        assert!(url.ends_with("&session_id={CHECKOUT_SESSION_ID}"));
    }

    #[test]
    fn test_cancel_url() {
        let config = CheckoutConfig::default();
        assert_eq!(config.cancel_url(), "http://localhost:8501/?canceled=true");
    }
}
