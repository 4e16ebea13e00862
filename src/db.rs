//! Database module for the catalog
//!
//! Provides durable storage for catalog items. Every call commits before it
//! returns; there is no cache in front of the table.

mod schema;

pub use schema::*;

use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Invalid item: {0}")]
    Validation(String),
    #[error("Database error: {0}")]
    Storage(#[from] rusqlite::Error),
    #[error("Database unavailable: {0}")]
    Unavailable(String),
}

impl CatalogError {
    /// Whether the caller supplied bad input, as opposed to storage failing
    pub fn is_validation(&self) -> bool {
        matches!(self, CatalogError::Validation(_))
    }
}

pub type DbResult<T> = Result<T, CatalogError>;

/// Thread-safe database handle
///
/// A single connection behind a mutex: writes are serialized and readers
/// never see a half-applied statement.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open or create database at the given path
    ///
    /// `busy_timeout` bounds how long a statement waits on a lock held by
    /// another process before failing.
    pub fn open<P: AsRef<Path>>(path: P, busy_timeout: Duration) -> DbResult<Self> {
        let conn = Connection::open(path)?;
        conn.busy_timeout(busy_timeout)?;
        Self::from_connection(conn)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> DbResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> DbResult<Self> {
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.run_migrations()?;
        Ok(db)
    }

    fn run_migrations(&self) -> DbResult<()> {
        let conn = self.conn()?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    fn conn(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| CatalogError::Unavailable(e.to_string()))
    }

    // ==================== Item Operations ====================

    /// Insert a new item and return its id
    pub fn create_item(&self, name: &str, price: i64) -> DbResult<ItemId> {
        validate_item(name, price).map_err(CatalogError::Validation)?;

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO items (name, price) VALUES (?1, ?2)",
            params![name, price],
        )?;
        let id = conn.last_insert_rowid();

        tracing::info!(item_id = id, name = %name, price, "Item created");
        Ok(id)
    }

    /// List all items in creation order
    pub fn list_items(&self) -> DbResult<Vec<Item>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT id, name, price FROM items ORDER BY id")?;

        let rows = stmt.query_map([], |row| {
            Ok(Item {
                id: row.get(0)?,
                name: row.get(1)?,
                price: row.get(2)?,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(CatalogError::from)
    }

    /// Delete an item. Deleting a missing id is not an error.
    ///
    /// Returns whether a row was actually removed.
    pub fn delete_item(&self, id: ItemId) -> DbResult<bool> {
        let conn = self.conn()?;
        let removed = conn.execute("DELETE FROM items WHERE id = ?1", params![id])?;

        if removed > 0 {
            tracing::info!(item_id = id, "Item deleted");
        } else {
            tracing::debug!(item_id = id, "Delete of unknown item ignored");
        }
        Ok(removed > 0)
    }
}
