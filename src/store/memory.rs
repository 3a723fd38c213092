//! In-memory document store for tests and ephemeral runs.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Mutex;

use super::{matches_filter, DocumentStore};

#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<BTreeMap<String, Vec<Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(&self, collection: &str, document: Value) -> Result<String> {
        let id = uuid::Uuid::new_v4().to_string();
        let mut collections = self.collections.lock().expect("store lock poisoned");
        collections
            .entry(collection.to_string())
            .or_default()
            .push(document);
        Ok(id)
    }

    async fn find(&self, collection: &str, filter: &Value) -> Result<Vec<Value>> {
        let collections = self.collections.lock().expect("store lock poisoned");
        Ok(collections
            .get(collection)
            .map(|documents| {
                documents
                    .iter()
                    .filter(|document| matches_filter(document, filter))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn find_one(&self, collection: &str, filter: &Value) -> Result<Option<Value>> {
        Ok(self.find(collection, filter).await?.into_iter().next())
    }

    async fn list_collections(&self) -> Result<Vec<String>> {
        let collections = self.collections.lock().expect("store lock poisoned");
        Ok(collections.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_find_filters_by_collection_and_fields() {
        let store = MemoryStore::new();
        store
            .insert("account", json!({"email": "a@b.com", "password": "pw"}))
            .await
            .unwrap();
        store
            .insert("recipe_search", json!({"query": "chicken"}))
            .await
            .unwrap();

        let hit = store
            .find_one("account", &json!({"email": "a@b.com", "password": "pw"}))
            .await
            .unwrap();
        assert!(hit.is_some());

        let wrong_password = store
            .find_one("account", &json!({"email": "a@b.com", "password": "x"}))
            .await
            .unwrap();
        assert!(wrong_password.is_none());

        assert_eq!(
            store.list_collections().await.unwrap(),
            vec!["account", "recipe_search"]
        );
    }
}
