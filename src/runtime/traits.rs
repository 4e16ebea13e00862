//! Trait abstractions for runtime I/O
//!
//! These traits enable testing the executor with mock implementations.

use crate::db::{CatalogError, Database, Item, ItemId};
use async_trait::async_trait;
use std::sync::Arc;

/// Storage for catalog items
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Insert an item, returning its new id
    async fn create_item(&self, name: &str, price: i64) -> Result<ItemId, CatalogError>;

    /// All items in creation order
    async fn list_items(&self) -> Result<Vec<Item>, CatalogError>;

    /// Remove an item; missing ids are not an error
    async fn delete_item(&self, id: ItemId) -> Result<(), CatalogError>;
}

// ============================================================================
// Arc implementations for trait objects
// ============================================================================

#[async_trait]
impl<T: CatalogStore + ?Sized> CatalogStore for Arc<T> {
    async fn create_item(&self, name: &str, price: i64) -> Result<ItemId, CatalogError> {
        (**self).create_item(name, price).await
    }

    async fn list_items(&self) -> Result<Vec<Item>, CatalogError> {
        (**self).list_items().await
    }

    async fn delete_item(&self, id: ItemId) -> Result<(), CatalogError> {
        (**self).delete_item(id).await
    }
}

// ============================================================================
// Production Adapters
// ============================================================================

/// Adapter to use Database as a `CatalogStore`
#[derive(Clone)]
pub struct DatabaseStorage {
    db: Database,
}

impl DatabaseStorage {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    #[allow(dead_code)] // Useful for tests
    pub fn inner(&self) -> &Database {
        &self.db
    }
}

#[async_trait]
impl CatalogStore for DatabaseStorage {
    async fn create_item(&self, name: &str, price: i64) -> Result<ItemId, CatalogError> {
        self.db.create_item(name, price)
    }

    async fn list_items(&self) -> Result<Vec<Item>, CatalogError> {
        self.db.list_items()
    }

    async fn delete_item(&self, id: ItemId) -> Result<(), CatalogError> {
        self.db.delete_item(id).map(|_removed| ())
    }
}
