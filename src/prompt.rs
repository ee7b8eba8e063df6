//! Prompt construction from retrieved documents.
//!
//! The template and separator are fixed. Context and question are
//! substituted verbatim — no escaping and no length bounding; an over-long
//! prompt fails at the model call, not here.

use crate::models::SearchResult;

/// Separator between retrieved documents in the context block.
pub const CONTEXT_SEPARATOR: &str = "\n\n---\n\n";

/// Join retrieved documents' content in result-set order.
///
/// An empty result set yields an empty context block.
pub fn build_context(results: &[SearchResult]) -> String {
    results
        .iter()
        .map(|r| r.document.page_content.as_str())
        .collect::<Vec<_>>()
        .join(CONTEXT_SEPARATOR)
}

/// Render the fixed prompt template with the context block and the
/// verbatim question.
pub fn render_prompt(context: &str, question: &str) -> String {
    format!(
        "Answer the question based only on the following context:\n\n\
         {context}\n\n\
         ---\n\n\
         Answer the question based on the above context: {question}"
    )
}

/// Source labels aligned with the result set, one per document.
pub fn source_labels(results: &[SearchResult]) -> Vec<String> {
    results.iter().map(|r| r.document.source_label()).collect()
}
