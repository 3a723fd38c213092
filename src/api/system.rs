//! Liveness and store connectivity probes.

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ProbeResponse {
    pub backend: &'static str,
    pub store: String,
    pub collections: Vec<String>,
}

/// Liveness message
///
/// GET /
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Platewise API running",
    })
}

/// Store connectivity probe
///
/// GET /test
///
/// Always answers 200; a failing probe degrades to a truncated error string
/// instead of an HTTP error.
pub async fn probe(State(state): State<Arc<AppState>>) -> Json<ProbeResponse> {
    let (store, collections) = match &state.store {
        None => ("not configured".to_string(), Vec::new()),
        Some(store) => match store.list_collections().await {
            Ok(collections) => ("connected".to_string(), collections),
            Err(e) => (truncate_error(&e.to_string()), Vec::new()),
        },
    };

    Json(ProbeResponse {
        backend: "running",
        store,
        collections,
    })
}

fn truncate_error(message: &str) -> String {
    let truncated: String = message.chars().take(60).collect();
    format!("error: {truncated}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{state_with_store, state_without_store};
    use crate::store::ACCOUNTS;

    #[tokio::test]
    async fn test_root_liveness() {
        let response = root().await;
        assert_eq!(response.message, "Platewise API running");
    }

    #[tokio::test]
    async fn test_probe_lists_collections() {
        let state = state_with_store();
        state
            .store
            .clone()
            .unwrap()
            .insert(ACCOUNTS, serde_json::json!({"email": "a@b.com"}))
            .await
            .unwrap();

        let response = probe(State(state)).await;
        assert_eq!(response.backend, "running");
        assert_eq!(response.store, "connected");
        assert_eq!(response.collections, vec![ACCOUNTS.to_string()]);
    }

    #[tokio::test]
    async fn test_probe_without_store() {
        let response = probe(State(state_without_store())).await;
        assert_eq!(response.store, "not configured");
        assert!(response.collections.is_empty());
    }

    #[test]
    fn test_truncate_error_caps_at_sixty_chars() {
        let long = "x".repeat(200);
        let truncated = truncate_error(&long);
        assert_eq!(truncated.len(), "error: ".len() + 60);
        assert!(truncated.starts_with("error: "));
    }
}
