//! Vector index seam and the Pinecone implementation.
//!
//! The [`VectorIndex`] trait covers the two operations the system needs:
//! batched upsert during ingestion and top-K nearest-neighbor query during
//! retrieval. No delete or update is exposed.
//!
//! The Pinecone client resolves the index's data-plane host from the control
//! plane once at connect time, then talks to the data plane directly. Raw
//! responses are normalized into [`Match`] immediately so the rest of the
//! system never depends on the service's wire shape.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::{Match, VectorRecord};

const CONTROL_PLANE_URL: &str = "https://api.pinecone.io";
const API_VERSION: &str = "2025-01";

/// Vectors per upsert request, to respect the service's request size limits.
const UPSERT_BATCH_SIZE: usize = 100;

/// Stores vector records and answers nearest-neighbor queries.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Upsert records into the index. Implementations batch internally.
    async fn upsert(&self, records: &[VectorRecord]) -> Result<()>;

    /// Return the `top_k` records nearest to `vector`, with stored metadata.
    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<Match>>;
}

/// Index backed by a Pinecone serverless index.
pub struct PineconeIndex {
    client: reqwest::Client,
    api_key: String,
    host: String,
}

#[derive(Deserialize)]
struct DescribeIndexResponse {
    host: String,
}

#[derive(Serialize)]
struct UpsertRequest<'a> {
    vectors: &'a [VectorRecord],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    vector: &'a [f32],
    top_k: usize,
    include_metadata: bool,
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<Match>,
}

impl PineconeIndex {
    /// Connect to the configured index, resolving its data-plane host.
    pub async fn connect(config: &Config, client: reqwest::Client) -> Result<Self> {
        let url = format!(
            "{}/indexes/{}",
            CONTROL_PLANE_URL, config.pinecone_index_name
        );
        let response = client
            .get(&url)
            .header("Api-Key", &config.pinecone_api_key)
            .header("X-Pinecone-API-Version", API_VERSION)
            .send()
            .await
            .map_err(|e| Error::IndexService(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(Error::IndexService(format!(
                "failed to describe index '{}': {} {}",
                config.pinecone_index_name, status, detail
            )));
        }

        let described: DescribeIndexResponse = response
            .json()
            .await
            .map_err(|e| Error::IndexService(format!("malformed describe response: {}", e)))?;

        Ok(Self {
            client,
            api_key: config.pinecone_api_key.clone(),
            host: format!("https://{}", described.host),
        })
    }

    async fn upsert_batch(&self, records: &[VectorRecord]) -> Result<()> {
        let body = UpsertRequest { vectors: records };
        let response = self
            .client
            .post(format!("{}/vectors/upsert", self.host))
            .header("Api-Key", &self.api_key)
            .header("X-Pinecone-API-Version", API_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::IndexService(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(Error::IndexService(format!(
                "upsert returned {}: {}",
                status, detail
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl VectorIndex for PineconeIndex {
    async fn upsert(&self, records: &[VectorRecord]) -> Result<()> {
        for batch in records.chunks(UPSERT_BATCH_SIZE) {
            self.upsert_batch(batch).await?;
        }
        Ok(())
    }

    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<Match>> {
        let body = QueryRequest {
            vector,
            top_k,
            include_metadata: true,
        };
        let response = self
            .client
            .post(format!("{}/query", self.host))
            .header("Api-Key", &self.api_key)
            .header("X-Pinecone-API-Version", API_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::IndexService(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(Error::IndexService(format!(
                "query returned {}: {}",
                status, detail
            )));
        }

        let parsed: QueryResponse = response
            .json()
            .await
            .map_err(|e| Error::IndexService(format!("malformed query response: {}", e)))?;
        Ok(parsed.matches)
    }
}
