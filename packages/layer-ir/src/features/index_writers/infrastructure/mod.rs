pub mod domain_writer;
pub mod fuzzy_writer;
pub mod idempotency_store;
pub mod lexical_writer;
pub mod symbol_writer;
pub mod vector_writer;

pub use domain_writer::{DomainIndexWriter, DomainRule};
pub use fuzzy_writer::FuzzyIndexWriter;
pub use idempotency_store::{IdempotencyKey, IdempotencyStore, DEFAULT_TTL};
pub use lexical_writer::LexicalIndexWriter;
pub use symbol_writer::SymbolIndexWriter;
pub use vector_writer::{EmbeddingProvider, VectorIndexWriter};
