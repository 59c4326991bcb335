//! Multi-index write path: one decoupled `IndexWriter` per index kind
//! (lexical, vector, symbol, fuzzy, domain), each taking the same batch of
//! files and returning the same `WriteOutcome` shape, plus an idempotency
//! store so an orchestrator can skip files that are already indexed for the
//! current commit.

pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use domain::{FailureKind, WriteFailure, WriteOutcome};
pub use infrastructure::{
    DomainIndexWriter, DomainRule, EmbeddingProvider, FuzzyIndexWriter, IdempotencyKey,
    IdempotencyStore, LexicalIndexWriter, SymbolIndexWriter, VectorIndexWriter, DEFAULT_TTL,
};
pub use ports::{IndexWriter, WriterKind};
