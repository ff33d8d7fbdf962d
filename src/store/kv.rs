//! Typed access to the durable key-value table.
//!
//! Two layers: `try_get`/`try_set` surface every failure as a typed
//! result, and `get_or`/`set` swallow them so callers always get a value
//! back. The swallowing layer is the external contract: the application
//! must stay usable session-to-session even with storage disabled or
//! corrupted, falling back to defaults. If the host environment opens
//! the same store from several processes there is no coordination; the
//! last writer wins.

use crate::errors::{Error, Result};
use crate::store::StorePool;
use rusqlite::{OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

/// Prefix applied to every key, kept from the historical store layout.
const NAMESPACE: &str = "ecdz_";

/// Handle to the durable key-value store. Cheap to clone.
#[derive(Clone)]
pub struct Store {
    pub(crate) pool: StorePool,
}

impl Store {
    pub fn new(pool: StorePool) -> Self {
        Self { pool }
    }

    /// Reads and deserializes the value stored under `NAMESPACE + key`.
    ///
    /// Returns `Ok(None)` if the key has never been written.
    ///
    /// # Errors
    ///
    /// Returns `Error::Storage` if the database lock cannot be acquired,
    /// `Error::Rusqlite` on query failure, and `Error::Serde` if the
    /// stored text is not valid JSON for `T`.
    #[instrument(skip(self))]
    pub async fn try_get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let conn = self
            .pool
            .lock()
            .map_err(|_| Error::Storage("Failed to acquire store lock".to_string()))?;
        let mut stmt = conn.prepare_cached("SELECT value FROM app_state WHERE key = ?1")?;
        let namespaced = format!("{NAMESPACE}{key}");
        let raw: Option<String> = stmt
            .query_row(params![namespaced], |row| row.get(0))
            .optional()?;
        debug!("Store read for key '{}': present = {}", key, raw.is_some());
        match raw {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    /// Serializes `value` and writes it under `NAMESPACE + key`
    /// (UPSERT behavior).
    ///
    /// # Errors
    ///
    /// Returns `Error::Serde` if serialization fails, `Error::Storage`
    /// if the lock cannot be acquired, and `Error::Rusqlite` on write
    /// failure.
    #[instrument(skip(self, value))]
    pub async fn try_set<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let text = serde_json::to_string(value)?;
        let conn = self
            .pool
            .lock()
            .map_err(|_| Error::Storage("Failed to acquire store lock".to_string()))?;
        conn.execute(
            "INSERT INTO app_state (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![format!("{NAMESPACE}{key}"), text],
        )?;
        debug!("Store write for key '{}' ({} bytes)", key, text.len());
        Ok(())
    }

    /// Reads the value for `key`, falling back to `default` when the key
    /// is absent, unreadable, or fails to deserialize. The failure is
    /// swallowed and never surfaced; startup stays resilient to a
    /// corrupted store.
    pub async fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.try_get(key).await {
            Ok(Some(value)) => value,
            Ok(None) => default,
            Err(e) => {
                warn!("Store read failed for key '{}', using default: {}", key, e);
                default
            }
        }
    }

    /// Best-effort write. On failure the in-memory state stays ahead of
    /// durable state until a future successful write; no retry, no
    /// queue. Returns whether the write reached the store.
    pub async fn set<T: Serialize>(&self, key: &str, value: &T) -> bool {
        match self.try_set(key, value).await {
            Ok(()) => true,
            Err(e) => {
                warn!("Store write failed for key '{}': {}", key, e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Result;
    use crate::store::test_utils::{init_test_tracing, raw_insert, setup_test_store};

    #[tokio::test]
    async fn test_set_and_get_roundtrip() -> Result<()> {
        init_test_tracing();
        let store = setup_test_store()?;

        store.try_set("invoice_counter", &42u64).await?;
        let counter: Option<u64> = store.try_get("invoice_counter").await?;
        assert_eq!(counter, Some(42));

        Ok(())
    }

    #[tokio::test]
    async fn test_set_updates_existing_key() -> Result<()> {
        init_test_tracing();
        let store = setup_test_store()?;

        store.try_set("invoice_counter", &1u64).await?;
        store.try_set("invoice_counter", &2u64).await?;
        let counter: Option<u64> = store.try_get("invoice_counter").await?;
        assert_eq!(counter, Some(2), "Second write should replace the first");

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_key_is_none() -> Result<()> {
        init_test_tracing();
        let store = setup_test_store()?;

        let value: Option<Vec<String>> = store.try_get("this_key_does_not_exist").await?;
        assert!(value.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_get_or_returns_default_on_missing_key() -> Result<()> {
        init_test_tracing();
        let store = setup_test_store()?;

        let products: Vec<String> = store.get_or("products", Vec::new()).await;
        assert!(products.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_get_or_returns_default_on_corrupted_value() -> Result<()> {
        init_test_tracing();
        let store = setup_test_store()?;

        // Malformed JSON planted directly under the namespaced key.
        raw_insert(&store, "settings", "{not json at all")?;

        let value: u64 = store.get_or("settings", 7).await;
        assert_eq!(value, 7, "Corrupted payload must yield the supplied default");

        // But the typed layer surfaces the failure for assertions.
        let typed: Result<Option<u64>> = store.try_get("settings").await;
        assert!(matches!(typed, Err(Error::Serde(_))));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_or_returns_default_on_type_mismatch() -> Result<()> {
        init_test_tracing();
        let store = setup_test_store()?;

        store.try_set("cart_saved", &vec!["line".to_string()]).await?;
        // Reading the list back as a number fails to deserialize and
        // falls back.
        let value: u64 = store.get_or("cart_saved", 99).await;
        assert_eq!(value, 99);

        Ok(())
    }

    #[tokio::test]
    async fn test_keys_are_namespaced() -> Result<()> {
        init_test_tracing();
        let store = setup_test_store()?;

        store.try_set("users", &vec![1, 2, 3]).await?;
        let raw = crate::store::test_utils::raw_select(&store, "ecdz_users")?;
        assert_eq!(raw.as_deref(), Some("[1,2,3]"));

        Ok(())
    }
}
