//! SQLite-backed document store.
//!
//! Documents live in a single `documents` table as JSON text. Filtering
//! happens in-process after narrowing by collection; the workloads here are
//! single-digit collections of demo records, not query engines.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

use super::{matches_filter, DocumentStore};

pub struct SqliteStore {
    pool: SqlitePool,
}

/// Execute a SQL migration file statement by statement, skipping comments.
async fn execute_sql(pool: &SqlitePool, sql: &str) -> Result<()> {
    for statement in sql.split(';') {
        let cleaned: String = statement
            .lines()
            .filter(|line| !line.trim().starts_with("--"))
            .collect::<Vec<_>>()
            .join("\n");
        let trimmed = cleaned.trim();
        if !trimmed.is_empty() {
            sqlx::query(trimmed).execute(pool).await?;
        }
    }
    Ok(())
}

impl SqliteStore {
    /// Open (or create) the database under `data_dir` and bootstrap the
    /// documents table.
    pub async fn init(data_dir: &Path) -> Result<Self> {
        let db_path = data_dir.join("platewise.db");
        let db_url = format!("sqlite:{}?mode=rwc", db_path.display());

        info!("Initializing document store at {}", db_path.display());

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&db_url)
            .await?;

        // WAL for better concurrency under parallel requests
        sqlx::query("PRAGMA journal_mode = WAL").execute(&pool).await?;
        sqlx::query("PRAGMA synchronous = NORMAL").execute(&pool).await?;

        execute_sql(&pool, include_str!("../../migrations/001_documents.sql")).await?;

        info!("Document store initialized");
        Ok(Self { pool })
    }
}

#[async_trait]
impl DocumentStore for SqliteStore {
    async fn insert(&self, collection: &str, document: Value) -> Result<String> {
        let id = uuid::Uuid::new_v4().to_string();
        let created_at = chrono::Utc::now().to_rfc3339();

        sqlx::query("INSERT INTO documents (id, collection, body, created_at) VALUES (?, ?, ?, ?)")
            .bind(&id)
            .bind(collection)
            .bind(document.to_string())
            .bind(&created_at)
            .execute(&self.pool)
            .await?;

        Ok(id)
    }

    async fn find(&self, collection: &str, filter: &Value) -> Result<Vec<Value>> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT body FROM documents WHERE collection = ? ORDER BY created_at")
                .bind(collection)
                .fetch_all(&self.pool)
                .await?;

        let mut documents = Vec::new();
        for (body,) in rows {
            let document: Value = serde_json::from_str(&body)?;
            if matches_filter(&document, filter) {
                documents.push(document);
            }
        }
        Ok(documents)
    }

    async fn find_one(&self, collection: &str, filter: &Value) -> Result<Option<Value>> {
        Ok(self.find(collection, filter).await?.into_iter().next())
    }

    async fn list_collections(&self) -> Result<Vec<String>> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT DISTINCT collection FROM documents ORDER BY collection")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().map(|(name,)| name).collect())
    }
}
