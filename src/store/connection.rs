use crate::errors::{Error, Result};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, instrument};

pub type StorePool = Arc<Mutex<Connection>>;

/// Opens (or creates) the durable store at `db_path` and ensures the
/// key-value table exists.
///
/// # Errors
///
/// Returns `Error::Storage` if the database file cannot be opened or the
/// schema cannot be created.
#[instrument]
pub async fn init_store(db_path: &str) -> Result<StorePool> {
    debug!("Initializing durable store at: {}", db_path);
    let conn = Connection::open(db_path)
        .map_err(|e| Error::Storage(format!("Failed to open store at {}: {}", db_path, e)))?;

    info!("Store opened. Ensuring schema is created...");
    create_tables(&conn)?;

    Ok(Arc::new(Mutex::new(conn)))
}

/// Creates the single key-value table backing every persisted collection.
#[instrument(skip(conn))]
pub(crate) fn create_tables(conn: &Connection) -> Result<()> {
    debug!("Executing CREATE TABLE statement if table does not exist.");
    conn.execute(
        "CREATE TABLE IF NOT EXISTS app_state ( key TEXT PRIMARY KEY, value TEXT NOT NULL )",
        [],
    )
    .map_err(|e| Error::Storage(format!("Failed to create app_state table: {}", e)))?;
    Ok(())
}
