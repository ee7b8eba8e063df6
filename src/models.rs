//! Data types that flow through one query invocation.
//!
//! Everything here is transient: produced once by the similarity search and
//! consumed once by the prompt builder and the output formatter.

/// A stored document returned by similarity search.
#[derive(Debug, Clone)]
pub struct Document {
    /// Store record key.
    pub id: String,
    /// Full text content fed into the prompt context.
    pub page_content: String,
    /// Schemaless metadata attached at indexing time.
    pub metadata: serde_json::Value,
}

/// Sentinel label for documents whose metadata carries no identifier.
pub const UNKNOWN_SOURCE: &str = "Unknown";

impl Document {
    /// Source identifier from the metadata `id` key, or [`UNKNOWN_SOURCE`]
    /// when absent or not a string.
    pub fn source_label(&self) -> String {
        self.metadata
            .get("id")
            .and_then(|v| v.as_str())
            .unwrap_or(UNKNOWN_SOURCE)
            .to_string()
    }
}

/// A similarity-search hit: a document together with its relevance score.
///
/// Result sets are ordered by descending score; that ordering is
/// authoritative for every consumer downstream.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub document: Document,
    pub score: f32,
}
