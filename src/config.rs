//! Application configuration.
//!
//! The engine needs exactly one external setting: where the durable
//! store lives. It is read from `SHOPKEEPER_DB_PATH` (settable through a
//! `.env` file loaded in `main`) and defaults to a file in the working
//! directory.

use crate::errors::{Error, Result};
use std::env;
use tracing::debug;

const DB_PATH_VAR: &str = "SHOPKEEPER_DB_PATH";
const DEFAULT_DB_PATH: &str = "shopkeeper.db";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_path: String,
}

/// Builds the application configuration from the environment.
///
/// # Errors
///
/// Returns `Error::Config` if `SHOPKEEPER_DB_PATH` is set but empty.
pub fn load_app_configuration() -> Result<AppConfig> {
    let database_path = env::var(DB_PATH_VAR).unwrap_or_else(|_| DEFAULT_DB_PATH.to_string());
    if database_path.trim().is_empty() {
        return Err(Error::Config(format!(
            "{DB_PATH_VAR} is set but empty; unset it or point it at a file"
        )));
    }
    debug!("Using durable store path: {}", database_path);
    Ok(AppConfig { database_path })
}
