//! Chunk record stored alongside the lexical index.
//!
//! Deliberately lighter than `features::chunking::domain::Chunk` (the
//! hierarchical RAG chunk model) — this is the flat file:line-range:content
//! mapping the lexical index needs to resolve a search hit back to source.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub id: String,
    pub file_path: String,
    pub start_line: usize,
    pub end_line: usize,
    pub content: String,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl Chunk {
    pub fn new(
        id: impl Into<String>,
        file_path: impl Into<String>,
        start_line: usize,
        end_line: usize,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            file_path: file_path.into(),
            start_line,
            end_line,
            content: content.into(),
            metadata: serde_json::Value::Null,
        }
    }

    pub fn with_metadata(
        id: impl Into<String>,
        file_path: impl Into<String>,
        start_line: usize,
        end_line: usize,
        content: impl Into<String>,
        metadata: serde_json::Value,
    ) -> Self {
        Self {
            metadata,
            ..Self::new(id, file_path, start_line, end_line, content)
        }
    }

    pub fn line_count(&self) -> usize {
        self.end_line.saturating_sub(self.start_line) + 1
    }
}
