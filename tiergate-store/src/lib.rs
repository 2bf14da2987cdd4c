// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `TierGate` Store
//!
//! State and configuration for the `TierGate` application.
//!
//! This crate provides:
//!
//! - **Secrets**: typed loading of `secrets.toml` (model API credential,
//!   payment gateway credential) with explicit missing-key outcomes
//! - **MemoryEntitlementStore**: in-process premium membership, used for
//!   tests and ephemeral runs
//! - **SqliteEntitlementStore**: persistent premium membership, so a
//!   restart does not forget who paid
//! - Default filesystem paths for config and data
//!
//! Both stores implement the
//! [`EntitlementStore`](tiergate_core::EntitlementStore) seam; the gate
//! takes whichever one the caller injects.

pub mod error;
pub mod memory;
pub mod paths;
pub mod secrets;
pub mod sqlite;

pub use error::StoreError;
pub use memory::MemoryEntitlementStore;
pub use paths::{default_config_dir, default_data_dir, default_entitlements_path, default_secrets_path};
pub use secrets::Secrets;
pub use sqlite::SqliteEntitlementStore;
