//! Error taxonomy for the ingestion and query pipelines.
//!
//! Every failure in the system falls into one of five categories, each
//! wrapping a human-readable message. None of these are caught or retried
//! internally: pipelines propagate them to whichever surface invoked them
//! (CLI exit, or an HTTP 5xx from the server).

/// Pipeline error. One variant per failure category.
#[derive(Debug)]
pub enum Error {
    /// Missing or invalid environment configuration, or invalid chunker
    /// parameters (e.g. `overlap >= size`).
    Configuration(String),
    /// The source document could not be parsed, or yielded no text.
    Extraction(String),
    /// The embedding service call failed (network, quota, malformed response).
    EmbeddingService(String),
    /// The vector index service call failed.
    IndexService(String),
    /// The chat completion service call failed.
    GenerationService(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Configuration(msg) => write!(f, "configuration error: {}", msg),
            Error::Extraction(msg) => write!(f, "extraction failed: {}", msg),
            Error::EmbeddingService(msg) => write!(f, "embedding service error: {}", msg),
            Error::IndexService(msg) => write!(f, "index service error: {}", msg),
            Error::GenerationService(msg) => write!(f, "generation service error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_category_and_message() {
        let err = Error::Configuration("PINECONE_INDEX_NAME not set".to_string());
        let msg = err.to_string();
        assert!(msg.contains("configuration error"));
        assert!(msg.contains("PINECONE_INDEX_NAME"));
    }
}
