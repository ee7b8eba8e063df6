//! Embedding provider abstraction and the Ollama implementation.
//!
//! Defines the [`EmbeddingProvider`] trait and the production
//! [`OllamaProvider`], which calls the local Ollama embeddings API with a
//! fixed model. The trait seam exists so the store can be exercised with a
//! deterministic in-process provider in tests.
//!
//! Also provides the vector utilities shared with the store:
//! - [`cosine_similarity`] — similarity between two embedding vectors
//! - [`vec_to_blob`] — encode a `Vec<f32>` as little-endian bytes for
//!   SQLite BLOB storage
//! - [`blob_to_vec`] — decode a SQLite BLOB back into a `Vec<f32>`
//!
//! A failed embedding call is fatal to the run: there is a single attempt
//! and the error propagates unmodified to the caller.

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Fixed embedding model; queries must be embedded with the same model the
/// index was built with.
pub const EMBEDDING_MODEL: &str = "nomic-embed-text";

/// Dimensionality of [`EMBEDDING_MODEL`] vectors.
pub const EMBEDDING_DIMS: usize = 768;

/// Environment variable naming the Ollama endpoint.
pub const OLLAMA_HOST_ENV: &str = "OLLAMA_HOST";

/// Default Ollama endpoint when [`OLLAMA_HOST_ENV`] is unset.
pub const DEFAULT_OLLAMA_HOST: &str = "http://localhost:11434";

/// Resolve the Ollama endpoint from the environment.
pub fn ollama_endpoint() -> String {
    std::env::var(OLLAMA_HOST_ENV)
        .ok()
        .filter(|host| !host.is_empty())
        .unwrap_or_else(|| DEFAULT_OLLAMA_HOST.to_string())
}

/// Trait for embedding providers.
///
/// The store holds a provider so that queries are embedded with the same
/// function the index was built with.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a single query text.
    async fn embed_query(&self, text: &str) -> Result<Vec<f32>>;
    /// Returns the model identifier (e.g. `"nomic-embed-text"`).
    fn model_name(&self) -> &str;
    /// Returns the embedding vector dimensionality (e.g. `768`).
    fn dims(&self) -> usize;
}

/// Create the production provider, bound to the fixed embedding model.
pub fn create_provider() -> Box<dyn EmbeddingProvider> {
    Box::new(OllamaProvider::new())
}

// ============ Ollama provider ============

/// Embedding provider backed by the Ollama embeddings API.
///
/// Posts to `POST /api/embed` on the endpoint named by `OLLAMA_HOST`
/// (default `http://localhost:11434`).
pub struct OllamaProvider {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    dims: usize,
}

#[derive(Debug, Serialize)]
struct EmbedRequest {
    model: String,
    input: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

impl OllamaProvider {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: ollama_endpoint(),
            model: EMBEDDING_MODEL.to_string(),
            dims: EMBEDDING_DIMS,
        }
    }
}

impl Default for OllamaProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaProvider {
    async fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
        let url = format!("{}/api/embed", self.endpoint);
        let request = EmbedRequest {
            model: self.model.clone(),
            input: vec![text.to_string()],
        };

        let response = self.client.post(&url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("Ollama embeddings API error {}: {}", status, body);
        }

        let parsed: EmbedResponse = response.json().await?;
        parsed
            .embeddings
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("Empty embedding response from Ollama"))
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn dims(&self) -> usize {
        self.dims
    }
}

// ============ Vector utilities ============

/// Encode a float vector as a BLOB (little-endian f32 bytes).
///
/// Each `f32` is stored as 4 bytes in little-endian order, producing a BLOB
/// of `vec.len() × 4` bytes — the on-disk format of the `embedding` column.
pub fn vec_to_blob(vec: &[f32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(vec.len() * 4);
    for &v in vec {
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    bytes
}

/// Decode a BLOB back into a float vector.
///
/// Reverses [`vec_to_blob`]: reads 4-byte little-endian `f32` values from
/// the byte slice.
pub fn blob_to_vec(blob: &[u8]) -> Vec<f32> {
    blob.chunks_exact(4)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect()
}

/// Compute cosine similarity between two embedding vectors.
///
/// Returns a value in `[-1.0, 1.0]`. Returns `0.0` for empty vectors or
/// vectors of different lengths.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom < f32::EPSILON {
        return 0.0;
    }

    dot / denom
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_defaults() {
        let provider = OllamaProvider::new();
        assert_eq!(provider.model_name(), EMBEDDING_MODEL);
        assert_eq!(provider.dims(), EMBEDDING_DIMS);
    }

    #[test]
    fn test_embed_request_shape() {
        let request = EmbedRequest {
            model: EMBEDDING_MODEL.to_string(),
            input: vec!["hello".to_string()],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "nomic-embed-text");
        assert_eq!(json["input"][0], "hello");
    }

    #[test]
    fn test_vec_blob_roundtrip() {
        let vec = vec![1.0f32, -2.5, 3.125, 0.0, -0.001];
        let blob = vec_to_blob(&vec);
        let restored = blob_to_vec(&blob);
        assert_eq!(vec, restored);
    }

    #[test]
    fn test_cosine_identical() {
        let v = vec![1.0, 2.0, 3.0];
        let sim = cosine_similarity(&v, &v);
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_orthogonal() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![0.0, 1.0, 0.0];
        let sim = cosine_similarity(&a, &b);
        assert!(sim.abs() < 1e-6);
    }

    #[test]
    fn test_cosine_opposite() {
        let a = vec![1.0, 0.0];
        let b = vec![-1.0, 0.0];
        let sim = cosine_similarity(&a, &b);
        assert!((sim + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_empty() {
        let sim = cosine_similarity(&[], &[]);
        assert_eq!(sim, 0.0);
    }

    #[test]
    fn test_cosine_different_lengths() {
        let a = vec![1.0, 2.0];
        let b = vec![1.0];
        let sim = cosine_similarity(&a, &b);
        assert_eq!(sim, 0.0);
    }
}
