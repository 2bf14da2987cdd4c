//! SQLite-backed entitlement store.
//!
//! Persists premium membership so a process restart does not forget who
//! paid, and so multiple invocations of the CLI see the same view.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::Mutex;
use tiergate_core::{CoreError, Email, EntitlementStore, PremiumGrant};
use tracing::{debug, info};

use crate::error::StoreError;

/// Schema for the membership table. `INSERT OR IGNORE` against the
/// primary key is what makes grants idempotent.
const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS premium_users (
    email TEXT PRIMARY KEY,
    granted_at TEXT NOT NULL
)";

/// Entitlement store backed by a SQLite database.
#[derive(Debug)]
pub struct SqliteEntitlementStore {
    conn: Mutex<Connection>,
}

impl SqliteEntitlementStore {
    /// Opens (or creates) the database at the given path.
    ///
    /// Parent directories are created as needed.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        conn.execute(SCHEMA, [])?;

        info!(path = %path.display(), "Opened entitlement database");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Opens an in-memory database (for tests).
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        conn.execute(SCHEMA, [])?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Returns all grant records with their timestamps, ordered by email.
    ///
    /// The trait-level [`all`](EntitlementStore::all) answers the
    /// membership question; this is the operator view.
    pub fn grants(&self) -> Result<Vec<PremiumGrant>, StoreError> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::Io(std::io::Error::other("entitlement database lock poisoned")))?;

        let mut stmt =
            conn.prepare("SELECT email, granted_at FROM premium_users ORDER BY email")?;
        let rows = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(email, granted_at)| {
                let granted_at = DateTime::parse_from_rfc3339(&granted_at)
                    .map_err(|e| StoreError::Parse(format!("bad granted_at for {email}: {e}")))?
                    .with_timezone(&Utc);
                Ok(PremiumGrant {
                    email: Email::normalize(&email),
                    granted_at,
                })
            })
            .collect()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, CoreError> {
        self.conn
            .lock()
            .map_err(|_| CoreError::Other("entitlement database lock poisoned".to_string()))
    }

    fn db_err(err: rusqlite::Error) -> CoreError {
        CoreError::Other(format!("entitlement database error: {err}"))
    }
}

impl EntitlementStore for SqliteEntitlementStore {
    fn contains(&self, email: &Email) -> Result<bool, CoreError> {
        let conn = self.lock()?;
        let exists: bool = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM premium_users WHERE email = ?1)",
                params![email.as_str()],
                |row| row.get(0),
            )
            .map_err(Self::db_err)?;
        Ok(exists)
    }

    fn grant(&self, email: &Email) -> Result<(), CoreError> {
        let conn = self.lock()?;
        let inserted = conn
            .execute(
                "INSERT OR IGNORE INTO premium_users (email, granted_at) VALUES (?1, ?2)",
                params![email.as_str(), Utc::now().to_rfc3339()],
            )
            .map_err(Self::db_err)?;

        if inserted > 0 {
            debug!(email = %email, "Granted entitlement");
        }
        Ok(())
    }

    fn remove(&self, email: &Email) -> Result<bool, CoreError> {
        let conn = self.lock()?;
        let removed = conn
            .execute(
                "DELETE FROM premium_users WHERE email = ?1",
                params![email.as_str()],
            )
            .map_err(Self::db_err)?;
        Ok(removed > 0)
    }

    fn all(&self) -> Result<Vec<Email>, CoreError> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare("SELECT email FROM premium_users ORDER BY email")
            .map_err(Self::db_err)?;

        let emails = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(Self::db_err)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(Self::db_err)?;

        Ok(emails.iter().map(|e| Email::normalize(e)).collect())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_grant_and_contains() {
        let store = SqliteEntitlementStore::open_in_memory().unwrap();
        let email = Email::normalize("a@x.com");

        assert!(!store.contains(&email).unwrap());
        store.grant(&email).unwrap();
        assert!(store.contains(&email).unwrap());
    }

    #[test]
    fn test_grant_is_idempotent() {
        let store = SqliteEntitlementStore::open_in_memory().unwrap();
        let email = Email::normalize("a@x.com");

        store.grant(&email).unwrap();
        store.grant(&email).unwrap();

        assert_eq!(store.all().unwrap().len(), 1);
    }

    #[test]
    fn test_grants_carry_timestamps() {
        let store = SqliteEntitlementStore::open_in_memory().unwrap();
        let before = Utc::now();

        store.grant(&Email::normalize("b@x.com")).unwrap();
        store.grant(&Email::normalize("a@x.com")).unwrap();

        let grants = store.grants().unwrap();
        assert_eq!(grants.len(), 2);
        assert_eq!(grants[0].email.as_str(), "a@x.com");
        assert_eq!(grants[1].email.as_str(), "b@x.com");
        for grant in &grants {
            assert!(grant.granted_at >= before && grant.granted_at <= Utc::now());
        }
    }

    #[test]
    fn test_remove() {
        let store = SqliteEntitlementStore::open_in_memory().unwrap();
        let email = Email::normalize("a@x.com");

        store.grant(&email).unwrap();
        assert!(store.remove(&email).unwrap());
        assert!(!store.remove(&email).unwrap());
    }

    #[test]
    fn test_membership_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("entitlements.db");
        let email = Email::normalize("a@x.com");

        {
            let store = SqliteEntitlementStore::open(&path).unwrap();
            store.grant(&email).unwrap();
        }

        let store = SqliteEntitlementStore::open(&path).unwrap();
        assert!(store.contains(&email).unwrap());
    }

    #[test]
    fn test_open_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join("entitlements.db");

        let store = SqliteEntitlementStore::open(&path).unwrap();
        assert!(path.exists());
        assert!(store.all().unwrap().is_empty());
    }
}
