//! Query pipeline: retrieve relevant chunks, then answer from them.
//!
//! The retriever embeds the question, asks the index for the top-K nearest
//! records, and joins their stored text into a single context block in rank
//! order — no re-ranking, no deduplication. The pipeline is stateless per
//! call; the interactive loop and the HTTP endpoint use it identically.

use crate::config::Config;
use crate::embedding::{Embedder, OpenAiEmbedder};
use crate::error::Result;
use crate::generate::{self, ChatModel, OpenAiChat};
use crate::index::{PineconeIndex, VectorIndex};
use crate::models::Match;

/// Separator between retrieved chunk texts in the context block.
pub const CONTEXT_SEPARATOR: &str = "\n\n---\n\n";

/// Join match texts into a context block, in input order.
///
/// Matches with missing or empty text are skipped. Zero matches yield the
/// empty string, not an error.
pub fn build_context(matches: &[Match]) -> String {
    let parts: Vec<&str> = matches
        .iter()
        .filter_map(|m| m.metadata.as_ref())
        .map(|metadata| metadata.text.as_str())
        .filter(|text| !text.is_empty())
        .collect();
    parts.join(CONTEXT_SEPARATOR)
}

/// Long-lived service clients plus the parameters of one query run.
pub struct QueryPipeline {
    embedder: Box<dyn Embedder>,
    index: Box<dyn VectorIndex>,
    chat: Box<dyn ChatModel>,
    top_k: usize,
}

impl QueryPipeline {
    /// Build a pipeline over explicit service clients.
    ///
    /// This is the seam for tests: all real logic sits behind the three
    /// remote-service traits, so fakes slot in here.
    pub fn new(
        embedder: Box<dyn Embedder>,
        index: Box<dyn VectorIndex>,
        chat: Box<dyn ChatModel>,
        top_k: usize,
    ) -> Self {
        Self {
            embedder,
            index,
            chat,
            top_k,
        }
    }

    /// Build a pipeline over the real OpenAI and Pinecone clients.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let client = reqwest::Client::new();
        let index = PineconeIndex::connect(config, client.clone()).await?;
        Ok(Self::new(
            Box::new(OpenAiEmbedder::new(config, client.clone())),
            Box::new(index),
            Box::new(OpenAiChat::new(config, client)),
            config.top_k,
        ))
    }

    /// Retrieve the context block for a question.
    pub async fn retrieve(&self, question: &str) -> Result<String> {
        let vector = self.embedder.embed_one(question).await?;
        let matches = self.index.query(&vector, self.top_k).await?;
        Ok(build_context(&matches))
    }

    /// Answer a question using only retrieved context.
    pub async fn answer_question(&self, question: &str) -> Result<String> {
        let context = self.retrieve(question).await?;
        generate::answer(self.chat.as_ref(), question, &context).await
    }
}
