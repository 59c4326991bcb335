use std::sync::Arc;
use std::time::Duration;

use crate::features::index_writers::domain::{FailureKind, WriteFailure, WriteOutcome};
use crate::features::index_writers::ports::{IndexWriter, WriterKind};
use crate::features::lexical::{FileToIndex, TantivyLexicalIndex};

/// Classifies a `TantivyLexicalIndex::index_files_batch` failure message into
/// the TRANSIENT/PERMANENT/INFRASTRUCTURE taxonomy. The underlying index
/// only ever returns a formatted string, so this is a best-effort match on
/// the phrases its own error paths produce (lock contention, disk, and
/// everything else).
fn classify(message: &str) -> FailureKind {
    let lower = message.to_ascii_lowercase();
    if lower.contains("lock") {
        FailureKind::Transient
    } else if lower.contains("disk") || lower.contains("no space") {
        FailureKind::Infrastructure
    } else {
        FailureKind::Permanent
    }
}

/// Shares the index with `QueryRouter` (same `Arc`, no second Tantivy writer
/// lock on the same directory) so writes and reads go through one instance.
pub struct LexicalIndexWriter {
    index: Arc<TantivyLexicalIndex>,
}

impl LexicalIndexWriter {
    pub fn new(index: Arc<TantivyLexicalIndex>) -> Self {
        Self { index }
    }
}

impl IndexWriter for LexicalIndexWriter {
    fn writer_kind(&self) -> WriterKind {
        WriterKind::Lexical
    }

    fn index_files(&self, files: &[FileToIndex]) -> WriteOutcome {
        match self.index.index_files_batch(files, false) {
            Ok(result) => WriteOutcome {
                success_count: result.success_count,
                failed: result
                    .failed_files
                    .into_iter()
                    .map(|(path, message)| {
                        let kind = classify(&message);
                        WriteFailure::new(path, kind, message)
                    })
                    .collect(),
                duration: Duration::from_secs_f64(result.duration_seconds),
            },
            Err(err) => WriteOutcome {
                success_count: 0,
                failed: files
                    .iter()
                    .map(|f| WriteFailure::new(f.file_path.clone(), classify(&err.to_string()), err.to_string()))
                    .collect(),
                duration: Duration::ZERO,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_lock_is_transient() {
        assert_eq!(classify("Failed to acquire writer lock"), FailureKind::Transient);
    }

    #[test]
    fn test_classify_disk_is_infrastructure() {
        assert_eq!(classify("no space left on device"), FailureKind::Infrastructure);
    }

    #[test]
    fn test_classify_default_is_permanent() {
        assert_eq!(classify("invalid query syntax"), FailureKind::Permanent);
    }
}
