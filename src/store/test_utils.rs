#![allow(dead_code)]
use crate::errors::{Error, Result};
use crate::store::{Store, connection};
use rusqlite::{Connection, OptionalExtension, params};
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

pub(crate) fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace")),
        )
        .with_test_writer()
        .try_init();
}

/// Fresh in-memory store with the schema created, one per test.
pub(crate) fn setup_test_store() -> Result<Store> {
    let conn = Connection::open_in_memory()
        .map_err(|e| Error::Storage(format!("Test store: failed to open in-memory: {}", e)))?;
    connection::create_tables(&conn)?;
    Ok(Store::new(Arc::new(Mutex::new(conn))))
}

/// Plants raw text under the namespaced `key`, bypassing serialization.
/// Used to simulate a corrupted or foreign payload.
pub(crate) fn raw_insert(store: &Store, key: &str, raw: &str) -> Result<()> {
    let conn = store
        .pool
        .lock()
        .map_err(|_| Error::Storage("Test store: failed to acquire lock".to_string()))?;
    conn.execute(
        "INSERT INTO app_state (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![format!("ecdz_{key}"), raw],
    )?;
    Ok(())
}

/// Reads the raw stored text for a fully-qualified key (namespace
/// included), for asserting on the on-disk layout.
pub(crate) fn raw_select(store: &Store, full_key: &str) -> Result<Option<String>> {
    let conn = store
        .pool
        .lock()
        .map_err(|_| Error::Storage("Test store: failed to acquire lock".to_string()))?;
    let mut stmt = conn.prepare_cached("SELECT value FROM app_state WHERE key = ?1")?;
    let raw = stmt
        .query_row(params![full_key], |row| row.get(0))
        .optional()?;
    Ok(raw)
}
