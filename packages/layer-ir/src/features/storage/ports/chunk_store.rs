use crate::features::storage::domain::{Chunk, Result};

/// Storage boundary the lexical index uses to resolve search hits back to
/// source chunks. Synchronous — the SQLite backend is blocking and nothing
/// on the lexical hot path awaits it.
pub trait ChunkStore: Send + Sync {
    fn save_chunk(&self, chunk: &Chunk) -> Result<()>;

    fn save_chunks(&self, chunks: &[Chunk]) -> Result<()> {
        for chunk in chunks {
            self.save_chunk(chunk)?;
        }
        Ok(())
    }

    fn get_chunk(&self, chunk_id: &str) -> Result<Chunk>;

    fn get_chunks_for_file(&self, file_path: &str) -> Result<Vec<Chunk>>;

    fn delete_chunks_for_file(&self, file_path: &str) -> Result<usize>;
}
