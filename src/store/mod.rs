//! Schemaless document persistence.
//!
//! Accounts and recorded recipe searches are flat JSON documents addressed
//! by collection name and an equality filter. The store is injected into
//! handlers through `AppState` so tests can substitute [`MemoryStore`].

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Collection holding signed-up accounts.
pub const ACCOUNTS: &str = "account";
/// Collection holding recorded recipe searches.
pub const RECIPE_SEARCHES: &str = "recipe_search";

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Persist a document and return its generated identifier.
    async fn insert(&self, collection: &str, document: Value) -> Result<String>;

    /// Return every document in `collection` matching `filter`.
    async fn find(&self, collection: &str, filter: &Value) -> Result<Vec<Value>>;

    /// Return the first document in `collection` matching `filter`.
    async fn find_one(&self, collection: &str, filter: &Value) -> Result<Option<Value>>;

    /// List the names of all non-empty collections.
    async fn list_collections(&self) -> Result<Vec<String>>;
}

/// Equality match of a flat filter object against a document's top-level
/// keys. An empty filter matches everything.
pub(crate) fn matches_filter(document: &Value, filter: &Value) -> bool {
    match filter.as_object() {
        Some(fields) => fields
            .iter()
            .all(|(key, expected)| document.get(key) == Some(expected)),
        None => true,
    }
}
