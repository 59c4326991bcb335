//! Vector (embedding) index.
//!
//! No embedding model lives in this crate — embeddings are supplied by an
//! injected `EmbeddingProvider`, kept at arm's length the same way the taint
//! module keeps sanitizer/sink pattern tables external rather than baking in
//! a fixed ruleset. Similarity search is a linear cosine scan; callers
//! needing ANN performance swap in a different `IndexWriter` behind the same
//! port.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Instant;

use crate::features::index_writers::domain::{FailureKind, WriteFailure, WriteOutcome};
use crate::features::index_writers::ports::{IndexWriter, WriterKind};
use crate::features::lexical::FileToIndex;

/// Produces an embedding vector for a file's content. Implementations call
/// out to whatever model-serving stack the deployment uses; this crate never
/// computes embeddings itself.
pub trait EmbeddingProvider: Send + Sync {
    fn embed(&self, content: &str) -> Result<Vec<f32>, String>;
    fn dimensions(&self) -> usize;
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

pub struct VectorIndexWriter {
    provider: Box<dyn EmbeddingProvider>,
    vectors: Mutex<HashMap<String, Vec<f32>>>,
}

impl VectorIndexWriter {
    pub fn new(provider: Box<dyn EmbeddingProvider>) -> Self {
        Self {
            provider,
            vectors: Mutex::new(HashMap::new()),
        }
    }

    /// Top-`k` files by cosine similarity to `query`'s embedding.
    pub fn search(&self, query: &str, k: usize) -> Result<Vec<(String, f32)>, String> {
        let query_vec = self.provider.embed(query)?;
        let vectors = self.vectors.lock().expect("vector index mutex poisoned");
        let mut scored: Vec<(String, f32)> = vectors
            .iter()
            .map(|(path, vec)| (path.clone(), cosine_similarity(&query_vec, vec)))
            .collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);
        Ok(scored)
    }
}

impl IndexWriter for VectorIndexWriter {
    fn writer_kind(&self) -> WriterKind {
        WriterKind::Vector
    }

    fn index_files(&self, files: &[FileToIndex]) -> WriteOutcome {
        let start = Instant::now();
        let mut vectors = self.vectors.lock().expect("vector index mutex poisoned");
        let mut success_count = 0;
        let mut failed = Vec::new();

        for file in files {
            match self.provider.embed(&file.content) {
                Ok(vec) if vec.len() == self.provider.dimensions() => {
                    vectors.insert(file.file_path.clone(), vec);
                    success_count += 1;
                }
                Ok(_) => failed.push(WriteFailure::new(
                    file.file_path.clone(),
                    FailureKind::Permanent,
                    "embedding dimensionality mismatch".to_string(),
                )),
                Err(message) => failed.push(WriteFailure::new(
                    file.file_path.clone(),
                    FailureKind::Infrastructure,
                    message,
                )),
            }
        }

        WriteOutcome {
            success_count,
            failed,
            duration: start.elapsed(),
        }
    }
}
