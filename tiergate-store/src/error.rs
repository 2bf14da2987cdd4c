//! Store error types.

use thiserror::Error;
use tiergate_core::CoreError;

/// Errors that can occur in the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A required secret is absent from the secrets file.
    ///
    /// This disables the dependent feature; it is never fatal to the
    /// process.
    #[error("Missing secret '{key}' in secrets file")]
    MissingSecret {
        /// Name of the absent key.
        key: String,
    },

    /// Secrets file could not be parsed.
    #[error("Invalid secrets file: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Entitlement database error.
    #[error("Entitlement database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Stored data could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::MissingSecret { key } => {
                CoreError::InvalidConfig(format!("missing secret '{key}'"))
            }
            other => CoreError::Other(other.to_string()),
        }
    }
}
