//! HTTP surface for the transport adapter
//!
//! A chat platform (or a relay in front of it) posts each inbound event to
//! `/webhook/{token}` and delivers the messages in the response.

mod handlers;
mod types;

pub use handlers::create_router;

use crate::db::Database;
use crate::runtime::{DatabaseStorage, ProductionRuntimeManager, RuntimeManager};
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub runtime: Arc<ProductionRuntimeManager>,
    /// Webhook secret; requests on any other path segment are rejected
    pub token: Arc<str>,
}

impl AppState {
    pub fn new(db: Database, token: &str) -> Self {
        Self {
            runtime: Arc::new(RuntimeManager::new(DatabaseStorage::new(db))),
            token: Arc::from(token),
        }
    }
}
