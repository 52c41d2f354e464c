use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{Connection, OptionalExtension};
use tracing::{debug, info};

use crate::fetch::error::CacheError;

/// SQLite-backed store of fetched page bodies keyed by URL
pub struct PageCache {
    conn: Mutex<Connection>,
    ttl_ms: i64,
}

impl PageCache {
    pub fn new(db_path: &Path, ttl_ms: i64) -> Result<Self, CacheError> {
        info!("Initializing page cache at {:?}", db_path);

        let conn = Connection::open(db_path)?;

        // Enable WAL mode for better concurrency
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;

        let cache = Self {
            conn: Mutex::new(conn),
            ttl_ms,
        };

        cache.create_schema()?;
        debug!("Page cache initialized");

        Ok(cache)
    }

    /// Acquire database connection lock with proper error handling
    fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>, CacheError> {
        self.conn.lock().map_err(|_| CacheError::LockPoisoned)
    }

    fn current_timestamp_ms() -> i64 {
        chrono::Utc::now().timestamp_millis()
    }

    fn create_schema(&self) -> Result<(), CacheError> {
        let conn = self.lock_conn()?;

        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS pages (
                url TEXT PRIMARY KEY,
                content TEXT NOT NULL,
                fetched_at INTEGER NOT NULL
            )
            "#,
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_fetched_at ON pages(fetched_at)",
            [],
        )?;

        Ok(())
    }

    /// Content stored for `url`, if it is younger than the TTL
    pub fn get_fresh(&self, url: &str) -> Result<Option<String>, CacheError> {
        let threshold = Self::current_timestamp_ms() - self.ttl_ms;
        let conn = self.lock_conn()?;

        let content = conn
            .query_row(
                "SELECT content FROM pages WHERE url = ?1 AND fetched_at >= ?2",
                (url, threshold),
                |row| row.get(0),
            )
            .optional()?;

        Ok(content)
    }

    /// Insert or replace the content stored for `url`
    pub fn store(&self, url: &str, content: &str) -> Result<(), CacheError> {
        self.store_at(url, content, Self::current_timestamp_ms())
    }

    fn store_at(&self, url: &str, content: &str, fetched_at: i64) -> Result<(), CacheError> {
        debug!("Caching {} bytes for {}", content.len(), url);

        let conn = self.lock_conn()?;
        conn.execute(
            r#"
            INSERT INTO pages (url, content, fetched_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(url) DO UPDATE SET
                content = excluded.content,
                fetched_at = excluded.fetched_at
            "#,
            (url, content, fetched_at),
        )?;

        Ok(())
    }

    /// Delete every entry older than the TTL, returning how many were removed
    pub fn purge_stale(&self) -> Result<usize, CacheError> {
        let threshold = Self::current_timestamp_ms() - self.ttl_ms;
        let conn = self.lock_conn()?;

        let removed = conn.execute("DELETE FROM pages WHERE fetched_at < ?1", [threshold])?;
        debug!("Purged {} stale page(s)", removed);

        Ok(removed)
    }
}
