// Storage manager for VitaVoice
// Owns the SQLite connection backing the key-value store

use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use std::path::PathBuf;
use std::sync::Mutex;

/// Storage manager that owns the SQLite connection.
///
/// The app persists its lists and preferences as string values under
/// well-known keys (see `storage::keys`), one row per key.
pub struct StorageManager {
    conn: Mutex<Connection>,
    db_path: PathBuf,
}

impl StorageManager {
    /// Create a new StorageManager with the database at the specified path
    pub fn new(db_path: PathBuf) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .context("Failed to create storage directory")?;
        }

        let conn = Connection::open(&db_path)
            .context("Failed to open storage database")?;

        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL DEFAULT (datetime('now'))
            )
            "#,
            [],
        )
        .context("Failed to create kv_store table")?;

        log::info!("Storage initialized at: {:?}", db_path);

        Ok(Self {
            conn: Mutex::new(conn),
            db_path,
        })
    }

    /// Execute a function with access to the database connection
    pub fn with_connection<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.conn.lock()
            .map_err(|e| anyhow::anyhow!("Failed to lock storage connection: {}", e))?;
        f(&conn)
    }

    /// Get the value stored under a key
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        self.with_connection(|conn| get_impl(conn, key))
    }

    /// Set (insert or overwrite) the value stored under a key
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        self.with_connection(|conn| set_impl(conn, key, value))
    }

    /// Remove a key and its value
    pub fn remove(&self, key: &str) -> Result<()> {
        self.with_connection(|conn| remove_impl(conn, key))
    }

    /// Get the database path
    pub fn db_path(&self) -> &PathBuf {
        &self.db_path
    }
}

fn get_impl(conn: &Connection, key: &str) -> Result<Option<String>> {
    let mut stmt = conn.prepare(
        "SELECT value FROM kv_store WHERE key = ?"
    ).context("Failed to prepare get query")?;

    let result = stmt.query_row(params![key], |row| row.get(0));

    match result {
        Ok(value) => Ok(Some(value)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e).context("Failed to get value"),
    }
}

fn set_impl(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        r#"
        INSERT INTO kv_store (key, value, updated_at)
        VALUES (?1, ?2, datetime('now'))
        ON CONFLICT(key) DO UPDATE SET
            value = excluded.value,
            updated_at = datetime('now')
        "#,
        params![key, value],
    ).context("Failed to set value")?;

    Ok(())
}

fn remove_impl(conn: &Connection, key: &str) -> Result<()> {
    conn.execute("DELETE FROM kv_store WHERE key = ?", params![key])
        .context("Failed to remove key")?;

    Ok(())
}
