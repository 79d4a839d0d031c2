//! Embedding service seam and the OpenAI implementation.
//!
//! The [`Embedder`] trait is the testability seam for everything that needs
//! vectors: pipelines hold a `dyn Embedder`, and tests substitute a fake.
//! Batching and the single-query convenience form are provided methods so
//! every implementation gets the same order-preserving behavior.
//!
//! Failures propagate as [`Error::EmbeddingService`] and abort any remaining
//! batches; there is no retry and no partial-result recovery.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{Error, Result};

const OPENAI_EMBEDDINGS_URL: &str = "https://api.openai.com/v1/embeddings";

/// Converts text into fixed-length numeric vectors.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed one batch of texts with a single remote call, returning one
    /// vector per input text in input order.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Embed any number of texts, splitting into groups of at most
    /// `batch_size` to respect the remote service's request limits.
    ///
    /// Order-preserving: output vector `i` corresponds to input text `i`.
    async fn embed(&self, texts: &[String], batch_size: usize) -> Result<Vec<Vec<f32>>> {
        if batch_size == 0 {
            return Err(Error::Configuration("batch size must be >= 1".to_string()));
        }
        let mut vectors = Vec::with_capacity(texts.len());
        for batch in texts.chunks(batch_size) {
            vectors.extend(self.embed_batch(batch).await?);
        }
        Ok(vectors)
    }

    /// Embed a single text (used for queries).
    async fn embed_one(&self, text: &str) -> Result<Vec<f32>> {
        let vectors = self.embed_batch(&[text.to_string()]).await?;
        vectors
            .into_iter()
            .next()
            .ok_or_else(|| Error::EmbeddingService("empty embedding response".to_string()))
    }
}

/// Embedder backed by the OpenAI embeddings API.
pub struct OpenAiEmbedder {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl OpenAiEmbedder {
    pub fn new(config: &Config, client: reqwest::Client) -> Self {
        Self {
            client,
            api_key: config.openai_api_key.clone(),
            model: config.embed_model.clone(),
        }
    }
}

#[derive(Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    index: usize,
    embedding: Vec<f32>,
}

#[async_trait]
impl Embedder for OpenAiEmbedder {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let body = EmbeddingsRequest {
            model: &self.model,
            input: texts,
        };

        let response = self
            .client
            .post(OPENAI_EMBEDDINGS_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::EmbeddingService(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(Error::EmbeddingService(format!(
                "OpenAI embeddings API returned {}: {}",
                status, detail
            )));
        }

        let mut parsed: EmbeddingsResponse = response
            .json()
            .await
            .map_err(|e| Error::EmbeddingService(format!("malformed response: {}", e)))?;

        if parsed.data.len() != texts.len() {
            return Err(Error::EmbeddingService(format!(
                "expected {} embeddings, got {}",
                texts.len(),
                parsed.data.len()
            )));
        }

        // The API tags each embedding with its input index; sort to guarantee
        // input order regardless of response order.
        parsed.data.sort_by_key(|d| d.index);
        Ok(parsed.data.into_iter().map(|d| d.embedding).collect())
    }
}
