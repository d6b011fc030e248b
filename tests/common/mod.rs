#![allow(dead_code)]

use std::sync::Arc;

use course_explorer::db::{DocumentStore, StoreConfig};

pub const TEST_KEY_PEM: &str = include_str!("../fixtures/service_account_key.pem");

/// In-memory SQLite lives per connection, so the pool is capped at one.
pub fn memory_store() -> Arc<DocumentStore> {
    let config = StoreConfig::new("sqlite::memory:")
        .expect("Failed to build store config")
        .with_max_connections(1);
    Arc::new(DocumentStore::new(config))
}
