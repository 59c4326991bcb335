pub mod chunk;
pub mod error;

pub use chunk::Chunk;
pub use error::{ChunkStoreError, ErrorKind, Result};
