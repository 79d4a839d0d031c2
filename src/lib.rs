//! # Constitution RAG
//!
//! Retrieval-augmented question answering over a fixed reference document
//! (a constitution PDF). Two independent pipelines share a vector index and
//! an embedding service:
//!
//! ```text
//! ┌─────────┐   ┌───────────────┐   ┌──────────────┐
//! │   PDF   │──▶│ Chunk + Embed │──▶│   Pinecone   │
//! └─────────┘   └───────────────┘   └──────┬───────┘
//!                                          │ top-K
//!                    ┌─────────────────────┤
//!                    ▼                     ▼
//!              ┌──────────┐         ┌──────────┐
//!              │   CLI    │         │   HTTP   │
//!              │  (crag)  │         │  (axum)  │
//!              └──────────┘         └──────────┘
//! ```
//!
//! Ingestion splits the document into overlapping fixed-size chunks, embeds
//! them in batches, and upserts one tagged vector record per chunk. Queries
//! embed the question, retrieve the nearest chunks, and ask a chat model to
//! answer using only that context.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | Environment-variable configuration |
//! | [`error`] | Error taxonomy |
//! | [`extract`] | PDF text extraction |
//! | [`chunk`] | Overlapping fixed-size chunker |
//! | [`models`] | Vector record and match types |
//! | [`embedding`] | Embedding service seam + OpenAI client |
//! | [`index`] | Vector index seam + Pinecone client |
//! | [`generate`] | Chat completion seam + Answerer |
//! | [`query`] | Retriever and query pipeline |
//! | [`ingest`] | Ingestion pipeline |
//! | [`chat`] | Interactive question loop |
//! | [`server`] | Axum HTTP server |

pub mod chat;
pub mod chunk;
pub mod config;
pub mod embedding;
pub mod error;
pub mod extract;
pub mod generate;
pub mod index;
pub mod ingest;
pub mod models;
pub mod query;
pub mod server;
