//! Temporary SQLite databases for tests.
//!
//! Each database lives in its own file under the system temp directory so
//! every pooled connection sees the same data (`:memory:` would give each
//! connection a private database). The file is removed on drop.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::adapter::outbound::sqlite::database::connection::{
    open, ConnectionOptions, DbPool,
};
use crate::adapter::outbound::sqlite::{SqliteReportReader, SqliteStore};

static COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Migrated SQLite database backed by a temp file.
pub struct TempDatabase {
    path: PathBuf,
    pool: DbPool,
}

impl TempDatabase {
    /// Create an empty database with the schema applied.
    pub fn create(name: &str) -> Self {
        let path = temp_path(name);
        let pool = open(&path, ConnectionOptions::default()).expect("open temp database");
        Self { path, pool }
    }

    /// Create a database loaded with [`seed`](super::seed).
    pub fn seeded(name: &str) -> Self {
        let db = Self::create(name);
        super::seed(&db.store());
        db
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn store(&self) -> SqliteStore {
        SqliteStore::new(self.pool.clone())
    }

    pub fn reports(&self) -> SqliteReportReader {
        SqliteReportReader::new(self.pool.clone())
    }
}

impl Drop for TempDatabase {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

/// Unique path for a scratch database file.
pub fn temp_path(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let sequence = COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!(
        "foodbridge-{name}-{}-{nanos}-{sequence}.db",
        std::process::id()
    ))
}
