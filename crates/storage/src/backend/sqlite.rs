#![forbid(unsafe_code)]

use super::{KvBackend, StorageError, check_quota};
use crate::time::now_ms;
use rusqlite::{Connection, OptionalExtension, params};
use std::path::{Path, PathBuf};
use std::time::Duration;

const DB_FILE_NAME: &str = "trace_catalog.db";

/// File-backed medium: one SQLite table used as a key/value map.
#[derive(Debug)]
pub struct SqliteBackend {
    conn: Connection,
    storage_dir: Option<PathBuf>,
    quota_bytes: Option<u64>,
}

impl SqliteBackend {
    pub fn open(storage_dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let storage_dir = storage_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&storage_dir)?;

        let db_path = storage_dir.join(DB_FILE_NAME);
        let conn = Connection::open(&db_path)?;
        conn.busy_timeout(Duration::from_secs(5))?;
        install_schema(&conn)?;

        log::info!("opened catalog storage at {}", db_path.display());
        Ok(Self {
            conn,
            storage_dir: Some(storage_dir),
            quota_bytes: None,
        })
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        install_schema(&conn)?;
        Ok(Self {
            conn,
            storage_dir: None,
            quota_bytes: None,
        })
    }

    pub fn with_quota(mut self, quota_bytes: Option<u64>) -> Self {
        self.quota_bytes = quota_bytes;
        self
    }

    pub fn storage_dir(&self) -> Option<&Path> {
        self.storage_dir.as_deref()
    }

    fn used_bytes_except(&self, key: &str) -> Result<u64, StorageError> {
        let used: i64 = self.conn.query_row(
            "SELECT COALESCE(SUM(LENGTH(value)), 0) FROM kv WHERE key <> ?1",
            params![key],
            |row| row.get(0),
        )?;
        Ok(used.max(0) as u64)
    }
}

fn install_schema(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        r#"
        PRAGMA journal_mode=WAL;
        PRAGMA synchronous=NORMAL;

        CREATE TABLE IF NOT EXISTS kv (
          key TEXT PRIMARY KEY,
          value BLOB NOT NULL,
          updated_at_ms INTEGER NOT NULL
        );
        "#,
    )?;
    Ok(())
}

impl KvBackend for SqliteBackend {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv WHERE key=?1",
                params![key],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn put(&mut self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        if self.quota_bytes.is_some() {
            let used_by_others = self.used_bytes_except(key)?;
            check_quota(self.quota_bytes, used_by_others, value.len())?;
        }
        self.conn.execute(
            r#"
            INSERT INTO kv(key, value, updated_at_ms) VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE
              SET value=excluded.value, updated_at_ms=excluded.updated_at_ms
            "#,
            params![key, value, now_ms()],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool, StorageError> {
        let removed = self
            .conn
            .execute("DELETE FROM kv WHERE key=?1", params![key])?;
        Ok(removed > 0)
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        let mut stmt = self.conn.prepare("SELECT key FROM kv ORDER BY key ASC")?;
        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            out.push(row.get::<_, String>(0)?);
        }
        Ok(out)
    }
}
