//! # Constitution RAG CLI (`crag`)
//!
//! Command-line interface for the Constitution question-answering system.
//! All configuration comes from environment variables (see `config`);
//! missing required variables fail fast before any pipeline runs.
//!
//! | Command | Description |
//! |---------|-------------|
//! | `crag ingest` | Chunk, embed, and index the configured PDF |
//! | `crag chat` | Interactive question loop |
//! | `crag ask "<question>"` | Answer a single question and exit |
//! | `crag serve` | Start the HTTP API |

use clap::{Parser, Subcommand};

use constitution_rag::chat::run_chat;
use constitution_rag::config::Config;
use constitution_rag::embedding::OpenAiEmbedder;
use constitution_rag::index::PineconeIndex;
use constitution_rag::ingest::run_ingest;
use constitution_rag::query::QueryPipeline;
use constitution_rag::server::run_server;

/// Constitution RAG — question answering grounded in a constitution PDF.
#[derive(Parser)]
#[command(
    name = "crag",
    about = "Ask natural-language questions about a constitution, grounded in its text",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest the configured PDF into the vector index.
    ///
    /// Extracts text, splits it into overlapping chunks, embeds them in
    /// batches, and upserts one vector record per chunk. Re-running ingests
    /// the document again; records are never deduplicated.
    Ingest,

    /// Ask questions interactively.
    Chat,

    /// Answer a single question and exit.
    Ask {
        /// The question to answer.
        question: String,
    },

    /// Start the HTTP API server.
    ///
    /// Serves `GET /` (liveness) and `POST /chat` on the configured bind
    /// address.
    Serve,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command {
        Commands::Ingest => {
            let client = reqwest::Client::new();
            let embedder = OpenAiEmbedder::new(&config, client.clone());
            let index = PineconeIndex::connect(&config, client).await?;
            let count = run_ingest(&config, &embedder, &index).await?;
            println!("Ingestion complete. Total chunks: {}", count);
        }
        Commands::Chat => {
            let pipeline = QueryPipeline::from_config(&config).await?;
            run_chat(&pipeline).await?;
        }
        Commands::Ask { question } => {
            let pipeline = QueryPipeline::from_config(&config).await?;
            let answer = pipeline.answer_question(&question).await?;
            println!("{}", answer);
        }
        Commands::Serve => {
            let pipeline = QueryPipeline::from_config(&config).await?;
            run_server(pipeline, &config.bind).await?;
        }
    }

    Ok(())
}
