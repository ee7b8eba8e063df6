//! Text-generation client for the Ollama API.
//!
//! One synchronous completion call per invocation: `POST /api/generate`
//! with a rendered prompt, no streaming, no retries. Errors carry the HTTP
//! status and body text and propagate unmodified.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::embedding::ollama_endpoint;

/// Client for the Ollama generation API.
pub struct OllamaClient {
    client: reqwest::Client,
    endpoint: String,
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaClient {
    /// Create a client against the endpoint named by `OLLAMA_HOST`
    /// (default `http://localhost:11434`).
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: ollama_endpoint(),
        }
    }

    /// Generate a completion for `prompt` with the named model and return
    /// the response text.
    pub async fn generate(&self, model: &str, prompt: &str) -> Result<String> {
        let url = format!("{}/api/generate", self.endpoint);
        let request = GenerateRequest {
            model: model.to_string(),
            prompt: prompt.to_string(),
            stream: false,
        };

        let response = self.client.post(&url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("Ollama generate API error {}: {}", status, body);
        }

        let parsed: GenerateResponse = response.json().await?;
        Ok(parsed.response)
    }
}

impl Default for OllamaClient {
    fn default() -> Self {
        Self::new()
    }
}
