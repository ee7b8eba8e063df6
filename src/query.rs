//! The query routine: retrieve context, ask the model, report sources.

use anyhow::Result;
use std::path::Path;

use crate::embedding;
use crate::llm::OllamaClient;
use crate::prompt;
use crate::store::VectorStore;

/// Run one retrieval-augmented query against the store at `store_path`.
///
/// Retrieves at most `k` documents, renders the prompt, invokes
/// `model_name` for generation, prints the response with its source labels,
/// and returns the response text. Any failure from the embedding call,
/// store open, search, or generation propagates unmodified and ends the
/// run.
pub async fn run_query(
    query: &str,
    k: usize,
    model_name: &str,
    store_path: &Path,
) -> Result<String> {
    println!(
        "Initializing embedding function ({})...",
        embedding::EMBEDDING_MODEL
    );
    let provider = embedding::create_provider();
    let store = VectorStore::open(store_path, provider).await?;

    println!("Searching for top {} results...", k);
    let results = store.similarity_search_with_score(query, k).await?;

    let context = prompt::build_context(&results);
    let rendered = prompt::render_prompt(&context, query);

    println!("Using model '{}' to generate response...", model_name);
    let response = OllamaClient::new().generate(model_name, &rendered).await?;

    let sources = prompt::source_labels(&results);
    println!("{}", format_response(&response, &sources));

    store.close().await;
    Ok(response)
}

/// Combined output block: response text followed by the source labels.
fn format_response(response: &str, sources: &[String]) -> String {
    format!("Response: {}\nSources: {:?}", response, sources)
}
