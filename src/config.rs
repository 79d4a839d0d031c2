use std::path::PathBuf;

use crate::error::{Error, Result};

/// Process configuration, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub pinecone_api_key: String,
    pub pinecone_index_name: String,
    pub openai_api_key: String,
    pub pdf_path: PathBuf,
    pub embed_model: String,
    pub chat_model: String,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub embed_batch_size: usize,
    pub top_k: usize,
    pub bind: String,
}

const DEFAULT_PDF_PATH: &str = "constitution.pdf";
const DEFAULT_EMBED_MODEL: &str = "text-embedding-3-small";
const DEFAULT_CHAT_MODEL: &str = "gpt-4.1-mini";
const DEFAULT_CHUNK_SIZE: usize = 1000;
const DEFAULT_CHUNK_OVERLAP: usize = 200;
const DEFAULT_EMBED_BATCH_SIZE: usize = 64;
const DEFAULT_TOP_K: usize = 5;
const DEFAULT_BIND: &str = "0.0.0.0:8000";

impl Config {
    /// Load configuration from process environment variables.
    ///
    /// Fails fast with a `Configuration` error if a required variable is
    /// missing or a value is invalid, before any pipeline executes.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Tests use this to supply variables without touching the process
    /// environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let config = Self {
            pinecone_api_key: required(&lookup, "PINECONE_API_KEY")?,
            pinecone_index_name: required(&lookup, "PINECONE_INDEX_NAME")?,
            openai_api_key: required(&lookup, "OPENAI_API_KEY")?,
            pdf_path: PathBuf::from(
                lookup("CONSTITUTION_PDF_PATH").unwrap_or_else(|| DEFAULT_PDF_PATH.to_string()),
            ),
            embed_model: lookup("EMBED_MODEL").unwrap_or_else(|| DEFAULT_EMBED_MODEL.to_string()),
            chat_model: lookup("CHAT_MODEL").unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string()),
            chunk_size: parsed(&lookup, "CHUNK_SIZE", DEFAULT_CHUNK_SIZE)?,
            chunk_overlap: parsed(&lookup, "CHUNK_OVERLAP", DEFAULT_CHUNK_OVERLAP)?,
            embed_batch_size: parsed(&lookup, "EMBED_BATCH_SIZE", DEFAULT_EMBED_BATCH_SIZE)?,
            top_k: parsed(&lookup, "TOP_K", DEFAULT_TOP_K)?,
            bind: lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND.to_string()),
        };

        if config.chunk_size == 0 {
            return Err(Error::Configuration("CHUNK_SIZE must be > 0".to_string()));
        }
        if config.chunk_overlap >= config.chunk_size {
            return Err(Error::Configuration(format!(
                "CHUNK_OVERLAP ({}) must be < CHUNK_SIZE ({})",
                config.chunk_overlap, config.chunk_size
            )));
        }
        if config.embed_batch_size == 0 {
            return Err(Error::Configuration(
                "EMBED_BATCH_SIZE must be >= 1".to_string(),
            ));
        }
        if config.top_k == 0 {
            return Err(Error::Configuration("TOP_K must be >= 1".to_string()));
        }

        Ok(config)
    }
}

fn required(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::Configuration(format!(
            "required environment variable {} is not set",
            key
        ))),
    }
}

fn parsed(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: usize,
) -> Result<usize> {
    match lookup(key) {
        Some(value) => value.trim().parse().map_err(|_| {
            Error::Configuration(format!("{} must be a non-negative integer, got '{}'", key, value))
        }),
        None => Ok(default),
    }
}
