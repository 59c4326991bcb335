use crate::features::index_writers::domain::WriteOutcome;
use crate::features::lexical::FileToIndex;

/// Which of the five decoupled indices a writer serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WriterKind {
    Lexical,
    Vector,
    Symbol,
    Fuzzy,
    Domain,
}

/// Batch write surface every index type implements, independent of storage
/// backend. Mirrors `TantivyLexicalIndex::index_files_batch`'s shape
/// (`total_files`/`success_count`/`failed_files`/`duration`) generalized to
/// the other four writer kinds.
pub trait IndexWriter: Send + Sync {
    fn writer_kind(&self) -> WriterKind;

    fn index_files(&self, files: &[FileToIndex]) -> WriteOutcome;
}
