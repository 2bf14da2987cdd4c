//! Normalized user identity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A user's email address, used as the entitlement lookup key.
///
/// Input is normalized once at construction: surrounding whitespace is
/// trimmed and the address is ASCII-lowercased, so `" A@X.com "` and
/// `a@x.com` name the same identity. No further validation is performed;
/// the address is an opaque key, not a deliverable mailbox.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Normalizes raw user input into an email key.
    pub fn normalize(raw: &str) -> Self {
        Self(raw.trim().to_ascii_lowercase())
    }

    /// Returns true if the normalized address is empty.
    ///
    /// Empty identities never hold entitlement and are rejected before
    /// any store or gateway call.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the normalized address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_lowercases() {
        assert_eq!(Email::normalize("  A@X.com ").as_str(), "a@x.com");
        assert_eq!(Email::normalize("user@example.com").as_str(), "user@example.com");
    }

    #[test]
    fn test_whitespace_only_is_empty() {
        assert!(Email::normalize("   ").is_empty());
        assert!(Email::normalize("").is_empty());
        assert!(!Email::normalize("a@x.com").is_empty());
    }
}
