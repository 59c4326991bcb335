//! Index API: batch indexing and search over the multi-index write path.
//!
//! Fans writes out across the decoupled `IndexWriter` kinds
//! (`features::index_writers`) instead of calling `TantivyLexicalIndex`
//! directly, so lexical and fuzzy indexing share one batch call and one
//! `WriteOutcome` shape. Search is delegated to `features::lexical::
//! QueryRouter`, which itself fuses through `features::fusion`.

use std::path::Path;
use std::sync::Arc;

use crate::errors::{CodegraphError, Result};
use crate::features::index_writers::{FuzzyIndexWriter, IndexWriter, LexicalIndexWriter};
use crate::features::lexical::{
    FileToIndex, IndexingMode, InMemoryChunkStore, QueryRouter, SearchRequest, SearchResponse,
    TantivyLexicalIndex,
};

/// Result of `index_files()`: the Index API shape from the system's build
/// surface, with `throughput` computed from `success_count`/`duration_secs`.
#[derive(Debug, Clone)]
pub struct IndexResult {
    pub success_count: usize,
    pub total_files: usize,
    pub duration_secs: f64,
    pub throughput: f64,
    pub failures: Vec<(String, String)>,
}

/// Owns the lexical index and fans batch writes out to every configured
/// `IndexWriter`. One instance per repo.
pub struct IndexApi {
    lexical: LexicalIndexWriter,
    fuzzy: FuzzyIndexWriter,
    router: QueryRouter,
}

impl IndexApi {
    /// `index_dir` backs the Tantivy lexical index on disk; chunk storage is
    /// in-memory, matching `TantivyLexicalIndex::new`'s test-harness setup
    /// (`chunk_store.rs`'s `InMemoryChunkStore` callers).
    pub fn open(index_dir: &Path, repo_id: impl Into<String>) -> Result<Self> {
        let chunk_store = Arc::new(InMemoryChunkStore::new());
        let index = Arc::new(
            TantivyLexicalIndex::new(index_dir, chunk_store, repo_id.into(), IndexingMode::Balanced)
                .map_err(|e| CodegraphError::Pipeline(format!("{:?}", e)))?,
        );

        Ok(Self {
            lexical: LexicalIndexWriter::new(index.clone()),
            fuzzy: FuzzyIndexWriter::new(),
            router: QueryRouter::new(index),
        })
    }

    /// Batch-index files across the lexical and fuzzy writers. `fail_fast`
    /// stops at the first writer with an infrastructure-level failure rather
    /// than running every kind regardless.
    pub fn index_files(&self, repo_id: &str, files: &[(String, String)], fail_fast: bool) -> IndexResult {
        let to_index: Vec<FileToIndex> = files
            .iter()
            .filter_map(|(path, content)| FileToIndex::new(repo_id, path.clone(), content.clone()).ok())
            .collect();

        let mut success_count = 0;
        let mut failures = Vec::new();
        let mut total_secs = 0.0;

        for writer in [&self.lexical as &dyn IndexWriter, &self.fuzzy as &dyn IndexWriter] {
            let outcome = writer.index_files(&to_index);
            success_count += outcome.success_count;
            total_secs += outcome.duration.as_secs_f64();
            let infra_failure = outcome.has_infrastructure_failure();
            failures.extend(
                outcome
                    .failed
                    .into_iter()
                    .map(|f| (f.file_path, f.message)),
            );
            if fail_fast && infra_failure {
                break;
            }
        }

        let throughput = if total_secs > 0.0 {
            to_index.len() as f64 / total_secs
        } else {
            to_index.len() as f64
        };

        IndexResult {
            success_count,
            total_files: to_index.len(),
            duration_secs: total_secs,
            throughput,
            failures,
        }
    }

    /// Search indexed files, fused across sources and ranked by
    /// `features::fusion`.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
        self.router
            .search(request)
            .await
            .map_err(|e| CodegraphError::Pipeline(format!("{:?}", e)))
    }
}
