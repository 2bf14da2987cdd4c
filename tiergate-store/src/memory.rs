//! In-memory entitlement store.

use std::collections::HashSet;
use std::sync::Mutex;
use tiergate_core::{CoreError, Email, EntitlementStore};
use tracing::debug;

/// Entitlement store backed by an in-process set.
///
/// State is lost on restart; use it for tests and explicitly ephemeral
/// runs. Production runs want [`SqliteEntitlementStore`](crate::SqliteEntitlementStore).
#[derive(Debug, Default)]
pub struct MemoryEntitlementStore {
    inner: Mutex<HashSet<String>>,
}

impl MemoryEntitlementStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashSet<String>>, CoreError> {
        self.inner
            .lock()
            .map_err(|_| CoreError::Other("entitlement store lock poisoned".to_string()))
    }
}

impl EntitlementStore for MemoryEntitlementStore {
    fn contains(&self, email: &Email) -> Result<bool, CoreError> {
        Ok(self.lock()?.contains(email.as_str()))
    }

    fn grant(&self, email: &Email) -> Result<(), CoreError> {
        let inserted = self.lock()?.insert(email.as_str().to_string());
        if inserted {
            debug!(email = %email, "Granted entitlement");
        }
        Ok(())
    }

    fn remove(&self, email: &Email) -> Result<bool, CoreError> {
        Ok(self.lock()?.remove(email.as_str()))
    }

    fn all(&self) -> Result<Vec<Email>, CoreError> {
        Ok(self
            .lock()?
            .iter()
            .map(|e| Email::normalize(e))
            .collect())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store_contains_nothing() {
        let store = MemoryEntitlementStore::new();
        assert!(!store.contains(&Email::normalize("a@x.com")).unwrap());
    }

    #[test]
    fn test_grant_then_contains() {
        let store = MemoryEntitlementStore::new();
        let email = Email::normalize("a@x.com");

        store.grant(&email).unwrap();
        assert!(store.contains(&email).unwrap());
    }

    #[test]
    fn test_grant_is_idempotent() {
        let store = MemoryEntitlementStore::new();
        let email = Email::normalize("a@x.com");

        store.grant(&email).unwrap();
        store.grant(&email).unwrap();
        store.grant(&email).unwrap();

        assert!(store.contains(&email).unwrap());
        assert_eq!(store.all().unwrap().len(), 1);
    }

    #[test]
    fn test_remove() {
        let store = MemoryEntitlementStore::new();
        let email = Email::normalize("a@x.com");

        store.grant(&email).unwrap();
        assert!(store.remove(&email).unwrap());
        assert!(!store.remove(&email).unwrap());
        assert!(!store.contains(&email).unwrap());
    }
}
