//! Ingestion pipeline orchestration.
//!
//! One-shot batch job: PDF → extracted text → overlapping chunks → batched
//! embeddings → tagged vector records → index upsert. Returns the chunk
//! count. Any failure propagates immediately; batches already upserted stay
//! persisted, with no resumption bookkeeping.

use uuid::Uuid;

use crate::chunk::chunk_text;
use crate::config::Config;
use crate::embedding::Embedder;
use crate::error::{Error, Result};
use crate::extract::extract_pdf;
use crate::index::VectorIndex;
use crate::models::{RecordMetadata, VectorRecord};

/// Run the full ingestion pipeline for the configured document.
pub async fn run_ingest(
    config: &Config,
    embedder: &dyn Embedder,
    index: &dyn VectorIndex,
) -> Result<usize> {
    let text = extract_pdf(&config.pdf_path)?;
    let chunks = chunk_text(&text, config.chunk_size, config.chunk_overlap)?;
    let records = embed_chunks(embedder, &chunks, config.embed_batch_size).await?;
    index.upsert(&records).await?;
    Ok(chunks.len())
}

/// Embed chunks and tag each with a fresh record id.
///
/// Every record's `metadata.text` carries the original chunk content so the
/// retriever can reconstruct context later.
pub async fn embed_chunks(
    embedder: &dyn Embedder,
    chunks: &[String],
    batch_size: usize,
) -> Result<Vec<VectorRecord>> {
    let vectors = embedder.embed(chunks, batch_size).await?;
    if vectors.len() != chunks.len() {
        return Err(Error::EmbeddingService(format!(
            "expected {} vectors for {} chunks, got {}",
            chunks.len(),
            chunks.len(),
            vectors.len()
        )));
    }

    Ok(chunks
        .iter()
        .zip(vectors)
        .map(|(chunk, values)| VectorRecord {
            id: Uuid::new_v4().to_string(),
            values,
            metadata: RecordMetadata {
                text: chunk.clone(),
            },
        })
        .collect())
}
