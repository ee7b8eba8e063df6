//! # RAG query CLI (`ragq`)
//!
//! Queries a pre-built local vector index and forwards the retrieved
//! context plus the user's question to a locally hosted Ollama model,
//! printing the model's answer and the identifiers of the source documents
//! used.
//!
//! ## Usage
//!
//! ```bash
//! ragq "What is the engine oil capacity?"
//! ragq "How do I reset the service light?" --store-path ./store --k 3 --model mistral
//! ```
//!
//! The storage directory is resolved from `--store-path`, then the
//! `RAGQ_STORE_PATH` environment variable, then `./store`, and is created
//! if absent. Failures from the store or the Ollama endpoint exit nonzero
//! with the propagated error message.

mod config;
mod db;
mod embedding;
mod llm;
mod models;
mod prompt;
mod query;
mod store;

use clap::Parser;
use std::path::PathBuf;

/// Query a local vector index and answer with a locally hosted model.
#[derive(Parser)]
#[command(
    name = "ragq",
    about = "Query a local vector index and answer questions with a locally hosted Ollama model",
    version
)]
struct Cli {
    /// The query text to process.
    query: String,

    /// Storage directory of the vector index.
    ///
    /// Defaults to the `RAGQ_STORE_PATH` environment variable, else `./store`.
    #[arg(long)]
    store_path: Option<PathBuf>,

    /// Number of top results to retrieve.
    #[arg(long, default_value_t = config::DEFAULT_K)]
    k: usize,

    /// Ollama model to use for generation.
    #[arg(long, default_value = config::DEFAULT_MODEL)]
    model: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let store_path = config::resolve_store_path(cli.store_path);
    std::fs::create_dir_all(&store_path)?;

    query::run_query(&cli.query, cli.k, &cli.model, &store_path).await?;

    Ok(())
}
