//! On-device cache: one row per namespace, JSON payloads, durable across
//! restarts. No transactions, expiry, or size limits; the cache is pure
//! storage and the store layer owns all failure policy.

use std::path::Path;
use std::sync::Mutex;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use gymtrack_core::cache::{CacheError, CacheNamespace, CacheResult, CacheStoreTrait};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS cache (
    namespace TEXT PRIMARY KEY,
    payload TEXT NOT NULL,
    updated_at TEXT NOT NULL
)";

/// Namespace→JSON-blob store in the app's private storage area.
///
/// The contract is tiny and every call is a single statement, so one
/// mutex-guarded connection is plenty; there is no pooling to manage.
pub struct SqliteCacheStore {
    conn: Mutex<Connection>,
}

impl SqliteCacheStore {
    /// Open (or create) the cache database at `path`.
    pub fn open(path: impl AsRef<Path>) -> CacheResult<Self> {
        let conn = Connection::open(path).map_err(|e| CacheError::storage(e.to_string()))?;
        Self::with_connection(conn)
    }

    /// Ephemeral store for tests and previews.
    pub fn open_in_memory() -> CacheResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| CacheError::storage(e.to_string()))?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> CacheResult<Self> {
        conn.execute(SCHEMA, [])
            .map_err(|e| CacheError::storage(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl CacheStoreTrait for SqliteCacheStore {
    fn get(&self, namespace: CacheNamespace) -> CacheResult<Option<String>> {
        let conn = self.conn.lock().expect("cache connection lock poisoned");
        conn.query_row(
            "SELECT payload FROM cache WHERE namespace = ?1",
            params![namespace.key()],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| CacheError::storage(e.to_string()))
    }

    fn set(&self, namespace: CacheNamespace, payload: &str) -> CacheResult<()> {
        let conn = self.conn.lock().expect("cache connection lock poisoned");
        conn.execute(
            "INSERT INTO cache (namespace, payload, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(namespace) DO UPDATE SET
                 payload = excluded.payload,
                 updated_at = excluded.updated_at",
            params![namespace.key(), payload, Utc::now().to_rfc3339()],
        )
        .map_err(|e| CacheError::storage(e.to_string()))?;
        Ok(())
    }

    fn remove(&self, namespaces: &[CacheNamespace]) -> CacheResult<()> {
        let conn = self.conn.lock().expect("cache connection lock poisoned");
        for namespace in namespaces {
            conn.execute(
                "DELETE FROM cache WHERE namespace = ?1",
                params![namespace.key()],
            )
            .map_err(|e| CacheError::storage(e.to_string()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_overwrite_remove() {
        let store = SqliteCacheStore::open_in_memory().unwrap();
        assert!(store.get(CacheNamespace::Goals).unwrap().is_none());

        store.set(CacheNamespace::Goals, "[1,2]").unwrap();
        assert_eq!(store.get(CacheNamespace::Goals).unwrap().as_deref(), Some("[1,2]"));

        store.set(CacheNamespace::Goals, "[3]").unwrap();
        assert_eq!(store.get(CacheNamespace::Goals).unwrap().as_deref(), Some("[3]"));

        store
            .remove(&[CacheNamespace::Goals, CacheNamespace::Workouts])
            .unwrap();
        assert!(store.get(CacheNamespace::Goals).unwrap().is_none());
    }

    #[test]
    fn namespaces_are_isolated() {
        let store = SqliteCacheStore::open_in_memory().unwrap();
        store.set(CacheNamespace::Goals, "goals").unwrap();
        store.set(CacheNamespace::Workouts, "workouts").unwrap();

        store.remove(&[CacheNamespace::Goals]).unwrap();
        assert!(store.get(CacheNamespace::Goals).unwrap().is_none());
        assert_eq!(
            store.get(CacheNamespace::Workouts).unwrap().as_deref(),
            Some("workouts")
        );
    }

    #[test]
    fn payloads_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.db");

        {
            let store = SqliteCacheStore::open(&path).unwrap();
            store
                .set(CacheNamespace::Account, r#"{"id":"acct-1"}"#)
                .unwrap();
        }

        let store = SqliteCacheStore::open(&path).unwrap();
        let payload = store.get(CacheNamespace::Account).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(value["id"], "acct-1");
    }

    #[test]
    fn clearing_all_namespaces_empties_the_store() {
        let store = SqliteCacheStore::open_in_memory().unwrap();
        for namespace in CacheNamespace::ALL {
            store.set(namespace, "x").unwrap();
        }
        store.remove(&CacheNamespace::ALL).unwrap();
        for namespace in CacheNamespace::ALL {
            assert!(store.get(namespace).unwrap().is_none());
        }
    }
}
