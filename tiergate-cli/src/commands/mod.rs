//! Command implementations and shared wiring.

pub mod analyze;
pub mod ask;
pub mod buy;
pub mod callback;
pub mod imagine;
pub mod status;

use anyhow::{Context, Result};
use std::sync::Arc;
use tiergate_adapters::{ModelClient, StripeGateway};
use tiergate_core::{
    CheckoutRequest, CheckoutSession, EntitlementStore, PaymentError, PaymentGateway,
};
use tiergate_gate::EntitlementGate;
use tiergate_store::{
    default_entitlements_path, default_secrets_path, MemoryEntitlementStore, Secrets,
    SqliteEntitlementStore,
};
use tracing::debug;

use crate::Cli;

// ============================================================================
// Disabled Gateway
// ============================================================================

/// Gateway stand-in for commands that never touch the payment boundary.
///
/// The gate requires a gateway at construction; commands that only make
/// tier decisions inject this one. `buy` and `callback` verify the
/// payment credential first and build the real gateway instead.
struct DisabledGateway;

#[async_trait::async_trait]
impl PaymentGateway for DisabledGateway {
    async fn create_checkout_session(
        &self,
        _request: &CheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        Err(PaymentError::Gateway(
            "payment gateway not configured for this command".to_string(),
        ))
    }

    async fn retrieve_session(&self, _session_id: &str) -> Result<CheckoutSession, PaymentError> {
        Err(PaymentError::Gateway(
            "payment gateway not configured for this command".to_string(),
        ))
    }
}

// ============================================================================
// App Context
// ============================================================================

/// Shared wiring for all commands: loaded secrets and the entitlement
/// store selected by the global flags.
pub struct AppContext {
    /// Loaded secrets (either key may be absent).
    pub secrets: Secrets,
    store: Arc<dyn EntitlementStore>,
}

impl AppContext {
    /// Initializes the context from the global CLI flags.
    pub fn init(cli: &Cli) -> Result<Self> {
        let secrets_path = cli
            .secrets
            .clone()
            .unwrap_or_else(default_secrets_path);
        let secrets = Secrets::load(&secrets_path)?;

        let store: Arc<dyn EntitlementStore> = if cli.ephemeral {
            debug!("Using in-memory entitlement store");
            Arc::new(MemoryEntitlementStore::new())
        } else {
            let path = default_entitlements_path();
            Arc::new(
                SqliteEntitlementStore::open(&path)
                    .with_context(|| format!("opening entitlement database at {}", path.display()))?,
            )
        };

        Ok(Self { secrets, store })
    }

    /// Builds a gate for commands that only make tier decisions.
    pub fn gate(&self) -> EntitlementGate {
        EntitlementGate::new(self.store.clone(), Arc::new(DisabledGateway))
    }

    /// Builds a gate wired to the real payment gateway.
    ///
    /// Fails with the typed missing-secret error (CLI exit code 2) when
    /// the payment credential is absent.
    pub fn payment_gate(&self) -> Result<EntitlementGate> {
        let key = self
            .secrets
            .require_payment_key()
            .context("payment features are disabled")?;
        let gateway = StripeGateway::new(key)?;
        Ok(EntitlementGate::new(self.store.clone(), Arc::new(gateway)))
    }

    /// Builds the model API client.
    ///
    /// Fails with the typed missing-secret error (CLI exit code 2) when
    /// the model credential is absent.
    pub fn model_client(&self) -> Result<ModelClient> {
        let key = self
            .secrets
            .require_model_key()
            .context("model features are disabled")?;
        Ok(ModelClient::new(key)?)
    }
}
