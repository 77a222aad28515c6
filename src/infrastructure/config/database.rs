//! Database configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::adapter::outbound::sqlite::database::connection::ConnectionOptions;

/// Environment variable that overrides `[database] path`.
pub const DATABASE_ENV: &str = "FOODBRIDGE_DATABASE";

/// `[database]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite file; `None` means the default under the home directory.
    pub path: Option<PathBuf>,
    pub pool_size: u32,
    pub busy_timeout_ms: u64,
}

impl DatabaseConfig {
    /// Pool settings for the SQLite adapter.
    #[must_use]
    pub fn connection_options(&self) -> ConnectionOptions {
        ConnectionOptions {
            pool_size: self.pool_size,
            busy_timeout_ms: self.busy_timeout_ms,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        let options = ConnectionOptions::default();
        Self {
            path: None,
            pool_size: options.pool_size,
            busy_timeout_ms: options.busy_timeout_ms,
        }
    }
}
