//! Persisted vector store: open a handle, search by similarity.
//!
//! A store is a directory containing a single SQLite database of documents
//! with pre-computed embedding vectors. Opening binds an
//! [`EmbeddingProvider`] to the handle so queries are embedded with the same
//! model the index was built with. Indexing is performed elsewhere; this
//! crate only reads.

use anyhow::Result;
use sqlx::{Row, SqlitePool};
use std::path::Path;

use crate::db;
use crate::embedding::{blob_to_vec, cosine_similarity, EmbeddingProvider};
use crate::models::{Document, SearchResult};

/// Handle to a persisted vector store.
pub struct VectorStore {
    pool: SqlitePool,
    provider: Box<dyn EmbeddingProvider>,
}

impl VectorStore {
    /// Open the store at `store_dir` with the given embedding provider.
    ///
    /// Creates the database file and schema on first open; an existing
    /// database is loaded as-is. A fresh directory yields an empty store.
    pub async fn open(store_dir: &Path, provider: Box<dyn EmbeddingProvider>) -> Result<Self> {
        let pool = db::connect(store_dir).await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                id            TEXT PRIMARY KEY,
                content       TEXT NOT NULL,
                metadata_json TEXT NOT NULL DEFAULT '{}',
                embedding     BLOB NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool, provider })
    }

    /// Model identifier of the bound embedding provider.
    pub fn embedding_model(&self) -> &str {
        self.provider.model_name()
    }

    /// Return the `k` most similar documents to `query` with their scores,
    /// ordered by descending cosine similarity (ties broken by document id
    /// so the ordering is deterministic).
    pub async fn similarity_search_with_score(
        &self,
        query: &str,
        k: usize,
    ) -> Result<Vec<SearchResult>> {
        let query_vec = self.provider.embed_query(query).await?;

        let rows = sqlx::query("SELECT id, content, metadata_json, embedding FROM documents")
            .fetch_all(&self.pool)
            .await?;

        let mut results: Vec<SearchResult> = rows
            .iter()
            .map(|row| {
                let blob: Vec<u8> = row.get("embedding");
                let score = cosine_similarity(&query_vec, &blob_to_vec(&blob));
                let metadata_json: String = row.get("metadata_json");
                let metadata: serde_json::Value =
                    serde_json::from_str(&metadata_json).unwrap_or(serde_json::json!({}));

                SearchResult {
                    document: Document {
                        id: row.get("id"),
                        page_content: row.get("content"),
                        metadata,
                    },
                    score,
                }
            })
            .collect();

        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.document.id.cmp(&b.document.id))
        });
        results.truncate(k);

        Ok(results)
    }

    /// Close the underlying connection pool.
    pub async fn close(self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::vec_to_blob;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use tempfile::TempDir;

    /// Deterministic provider: maps known query strings to fixed vectors.
    struct StubProvider;

    #[async_trait]
    impl EmbeddingProvider for StubProvider {
        async fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
            match text {
                "oil" => Ok(vec![1.0, 0.0, 0.0]),
                "tires" => Ok(vec![0.0, 1.0, 0.0]),
                _ => Err(anyhow!("unexpected query in test: {}", text)),
            }
        }

        fn model_name(&self) -> &str {
            "stub"
        }

        fn dims(&self) -> usize {
            3
        }
    }

    async fn open_store(dir: &Path) -> VectorStore {
        VectorStore::open(dir, Box::new(StubProvider)).await.unwrap()
    }

    async fn seed(store: &VectorStore, id: &str, content: &str, metadata: &str, vec: &[f32]) {
        sqlx::query("INSERT INTO documents (id, content, metadata_json, embedding) VALUES (?, ?, ?, ?)")
            .bind(id)
            .bind(content)
            .bind(metadata)
            .bind(vec_to_blob(vec))
            .execute(&store.pool)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn open_fresh_directory_yields_empty_store() {
        let tmp = TempDir::new().unwrap();
        let store = open_store(tmp.path()).await;

        let results = store.similarity_search_with_score("oil", 5).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn open_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let store = open_store(tmp.path()).await;
        seed(&store, "a", "alpha", r#"{"id":"doc1"}"#, &[1.0, 0.0, 0.0]).await;
        store.close().await;

        // Reopening must load the existing rows, not recreate the schema.
        let store = open_store(tmp.path()).await;
        let results = store.similarity_search_with_score("oil", 5).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].document.page_content, "alpha");
    }

    #[tokio::test]
    async fn search_orders_by_descending_similarity() {
        let tmp = TempDir::new().unwrap();
        let store = open_store(tmp.path()).await;
        seed(&store, "a", "about oil", "{}", &[1.0, 0.0, 0.0]).await;
        seed(&store, "b", "about tires", "{}", &[0.0, 1.0, 0.0]).await;
        seed(&store, "c", "mixed", "{}", &[0.7, 0.7, 0.0]).await;

        let results = store.similarity_search_with_score("oil", 5).await.unwrap();
        let ids: Vec<&str> = results.iter().map(|r| r.document.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c", "b"]);
        assert!(results[0].score > results[1].score);
        assert!(results[1].score > results[2].score);
    }

    #[tokio::test]
    async fn search_returns_at_most_k() {
        let tmp = TempDir::new().unwrap();
        let store = open_store(tmp.path()).await;
        for i in 0..4 {
            seed(&store, &format!("d{}", i), "text", "{}", &[1.0, 0.0, 0.0]).await;
        }

        let results = store.similarity_search_with_score("oil", 2).await.unwrap();
        assert_eq!(results.len(), 2);
    }

    #[tokio::test]
    async fn k_larger_than_store_returns_everything() {
        let tmp = TempDir::new().unwrap();
        let store = open_store(tmp.path()).await;
        seed(&store, "a", "alpha", "{}", &[1.0, 0.0, 0.0]).await;
        seed(&store, "b", "beta", "{}", &[0.0, 1.0, 0.0]).await;

        let results = store.similarity_search_with_score("oil", 10).await.unwrap();
        assert_eq!(results.len(), 2);
    }

    #[tokio::test]
    async fn equal_scores_break_ties_by_id() {
        let tmp = TempDir::new().unwrap();
        let store = open_store(tmp.path()).await;
        seed(&store, "b", "second", "{}", &[1.0, 0.0, 0.0]).await;
        seed(&store, "a", "first", "{}", &[1.0, 0.0, 0.0]).await;

        let results = store.similarity_search_with_score("oil", 5).await.unwrap();
        let ids: Vec<&str> = results.iter().map(|r| r.document.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn malformed_metadata_decodes_to_empty_object() {
        let tmp = TempDir::new().unwrap();
        let store = open_store(tmp.path()).await;
        seed(&store, "a", "alpha", "not json", &[1.0, 0.0, 0.0]).await;

        let results = store.similarity_search_with_score("oil", 5).await.unwrap();
        assert_eq!(results[0].document.metadata, serde_json::json!({}));
    }
}
