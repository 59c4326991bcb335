//! Chunk storage backing the lexical index's file:line → chunk_id lookups.
//!
//! Filtered out of the retrieval pack alongside `shared/models/{node,edge}.rs`
//! (`features::lexical` already referenced `Chunk`/`ChunkStore`/
//! `SqliteChunkStore`/`InMemoryChunkStore` from here); rebuilt against
//! `layer-storage`'s `Chunk`/`StorageError`/`SqliteSnapshotStore` shapes,
//! scoped down to the single `file_path -> chunks` lookup the lexical index
//! actually needs rather than the full snapshot/repository/dependency model.

pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use domain::{Chunk, ChunkStoreError};
pub use infrastructure::{InMemoryChunkStore, SqliteChunkStore};
pub use ports::ChunkStore;
