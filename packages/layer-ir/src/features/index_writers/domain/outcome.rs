//! Batch write result shared by every index writer kind.

use std::time::Duration;

/// Partitions a writer failure the way an orchestrator needs to react to it:
/// retry, report, or escalate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Index lock contention, transient I/O blip — safe to retry.
    Transient,
    /// Invalid payload, corrupted index — reported, not retried.
    Permanent,
    /// Disk full and similar resource exhaustion — surfaced to the operator.
    Infrastructure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteFailure {
    pub file_path: String,
    pub kind: FailureKind,
    pub message: String,
}

impl WriteFailure {
    pub fn new(file_path: impl Into<String>, kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            kind,
            message: message.into(),
        }
    }
}

/// Result of one `IndexWriter::index_files` batch call.
#[derive(Debug, Clone, PartialEq)]
pub struct WriteOutcome {
    pub success_count: usize,
    pub failed: Vec<WriteFailure>,
    pub duration: Duration,
}

impl WriteOutcome {
    pub fn empty() -> Self {
        Self {
            success_count: 0,
            failed: Vec::new(),
            duration: Duration::ZERO,
        }
    }

    pub fn total(&self) -> usize {
        self.success_count + self.failed.len()
    }

    pub fn has_infrastructure_failure(&self) -> bool {
        self.failed
            .iter()
            .any(|f| f.kind == FailureKind::Infrastructure)
    }
}
