//! In-memory `ChunkStore`, for tests and small single-process deployments.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::features::storage::domain::{Chunk, ChunkStoreError, Result};
use crate::features::storage::ports::ChunkStore;

#[derive(Default)]
pub struct InMemoryChunkStore {
    chunks: Mutex<HashMap<String, Chunk>>,
}

impl InMemoryChunkStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ChunkStore for InMemoryChunkStore {
    fn save_chunk(&self, chunk: &Chunk) -> Result<()> {
        self.chunks
            .lock()
            .unwrap()
            .insert(chunk.id.clone(), chunk.clone());
        Ok(())
    }

    fn get_chunk(&self, chunk_id: &str) -> Result<Chunk> {
        self.chunks
            .lock()
            .unwrap()
            .get(chunk_id)
            .cloned()
            .ok_or_else(|| ChunkStoreError::not_found(chunk_id))
    }

    fn get_chunks_for_file(&self, file_path: &str) -> Result<Vec<Chunk>> {
        let mut chunks: Vec<Chunk> = self
            .chunks
            .lock()
            .unwrap()
            .values()
            .filter(|c| c.file_path == file_path)
            .cloned()
            .collect();
        chunks.sort_by_key(|c| c.start_line);
        Ok(chunks)
    }

    fn delete_chunks_for_file(&self, file_path: &str) -> Result<usize> {
        let mut chunks = self.chunks.lock().unwrap();
        let before = chunks.len();
        chunks.retain(|_, c| c.file_path != file_path);
        Ok(before - chunks.len())
    }
}
