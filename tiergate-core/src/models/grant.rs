//! Premium grant records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Email;

/// One recorded premium grant, as kept by a persistent store.
///
/// The membership decision only needs the email; the timestamp exists so
/// operators can see when an entitlement was granted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PremiumGrant {
    /// Normalized email holding the entitlement.
    pub email: Email,
    /// When the grant was recorded.
    pub granted_at: DateTime<Utc>,
}

impl PremiumGrant {
    /// Creates a grant record stamped with the current time.
    pub fn now(email: Email) -> Self {
        Self {
            email,
            granted_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_stamps_current_time() {
        let before = Utc::now();
        let grant = PremiumGrant::now(Email::normalize("a@x.com"));
        let after = Utc::now();

        assert_eq!(grant.email.as_str(), "a@x.com");
        assert!(grant.granted_at >= before && grant.granted_at <= after);
    }

    #[test]
    fn test_serde_roundtrip() {
        let grant = PremiumGrant::now(Email::normalize("a@x.com"));
        let json = serde_json::to_string(&grant).unwrap();
        let back: PremiumGrant = serde_json::from_str(&json).unwrap();

        assert_eq!(back, grant);
    }
}
