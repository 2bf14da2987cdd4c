// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `TierGate` Gate
//!
//! The premium-entitlement gate: the single source of truth for whether a
//! user is premium and which model tier a feature invocation should use.
//!
//! The gate owns no I/O of its own. It is built from two injected seams:
//!
//! - an [`EntitlementStore`](tiergate_core::EntitlementStore) holding the
//!   set of premium emails (in-memory or SQLite-backed)
//! - a [`PaymentGateway`](tiergate_core::PaymentGateway) for checkout
//!   session creation and verification
//!
//! Entitlement has exactly two states per email: unverified (initial) and
//! premium. The only transition is [`EntitlementGate::complete_purchase`],
//! which grants only after retrieving the session from the gateway and
//! verifying both the payment status and the customer email. A success
//! redirect on its own never grants anything.

pub mod callback;
pub mod config;
pub mod error;
pub mod gate;

pub use callback::{parse_callback, CallbackOutcome};
pub use config::CheckoutConfig;
pub use error::GateError;
pub use gate::EntitlementGate;
