//! Typed secrets loading.
//!
//! Credentials live in a local `secrets.toml`. Both keys are optional at
//! load time: an absent file or absent key disables the dependent feature
//! with a clear message, never crashing the process. The `require_*`
//! accessors produce the typed missing-key outcome at the point a feature
//! actually needs its credential.

use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::paths::default_secrets_path;

/// Key name for the model API credential.
pub const MODEL_API_KEY: &str = "model_api_key";

/// Key name for the payment gateway credential.
pub const PAYMENT_API_KEY: &str = "payment_api_key";

/// Named secrets loaded from `secrets.toml`.
///
/// Accepts the legacy upper-case key names as aliases so existing secrets
/// files keep working.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Secrets {
    /// Credential for the hosted model API.
    #[serde(default, alias = "OPENAI_API_KEY")]
    pub model_api_key: Option<String>,

    /// Credential for the payment gateway.
    #[serde(default, alias = "STRIPE_SECRET_KEY")]
    pub payment_api_key: Option<String>,
}

impl Secrets {
    /// Loads secrets from the default path.
    pub fn load_default() -> Result<Self, StoreError> {
        Self::load(&default_secrets_path())
    }

    /// Loads secrets from a specific path.
    ///
    /// A missing file is not an error; it loads as empty secrets so the
    /// caller can report per-feature unavailability.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            warn!(path = %path.display(), "Secrets file not found; model and payment features will be unavailable");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let secrets: Secrets = toml::from_str(&content)?;

        info!(
            path = %path.display(),
            model_key = secrets.model_api_key.is_some(),
            payment_key = secrets.payment_api_key.is_some(),
            "Loaded secrets"
        );
        Ok(secrets)
    }

    /// Parses secrets from an in-memory TOML string.
    pub fn from_toml(content: &str) -> Result<Self, StoreError> {
        debug!("Parsing secrets from string");
        Ok(toml::from_str(content)?)
    }

    /// Returns the model API credential or the typed missing-key error.
    pub fn require_model_key(&self) -> Result<&str, StoreError> {
        self.model_api_key
            .as_deref()
            .ok_or_else(|| StoreError::MissingSecret {
                key: MODEL_API_KEY.to_string(),
            })
    }

    /// Returns the payment credential or the typed missing-key error.
    pub fn require_payment_key(&self) -> Result<&str, StoreError> {
        self.payment_api_key
            .as_deref()
            .ok_or_else(|| StoreError::MissingSecret {
                key: PAYMENT_API_KEY.to_string(),
            })
    }
}

// ============================================================================
// Tests
// ============================================================================
