//! Default filesystem paths.

use std::path::PathBuf;

/// Returns the default configuration directory.
///
/// - macOS: `~/Library/Application Support/TierGate`
/// - Linux: `~/.config/tiergate`
/// - Windows: `%APPDATA%\TierGate`
pub fn default_config_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        dirs::home_dir()
            .map(|h| h.join("Library").join("Application Support").join("TierGate"))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    #[cfg(not(target_os = "macos"))]
    {
        dirs::config_dir()
            .map(|c| c.join("tiergate"))
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Returns the default data directory.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("tiergate"))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns the default secrets file path.
pub fn default_secrets_path() -> PathBuf {
    default_config_dir().join("secrets.toml")
}

/// Returns the default entitlement database path.
pub fn default_entitlements_path() -> PathBuf {
    default_data_dir().join("entitlements.db")
}
