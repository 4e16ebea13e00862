//! Database schema and types

use serde::{Deserialize, Serialize};

/// SQL schema for initialization
pub const SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS items (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    price INTEGER NOT NULL
);
";

/// Row id of a catalog item. Assigned by `SQLite`, never reused.
pub type ItemId = i64;

/// Catalog item record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub price: i64,
}

/// Check the application-level constraints the table itself does not enforce.
///
/// Names must contain something other than whitespace and prices must not be
/// negative.
pub fn validate_item(name: &str, price: i64) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("item name must not be empty".to_string());
    }
    if price < 0 {
        return Err(format!("price must not be negative (got {price})"));
    }
    Ok(())
}
