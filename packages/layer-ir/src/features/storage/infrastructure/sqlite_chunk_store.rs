//! `ChunkStore` implementation backed by bundled SQLite.

use rusqlite::{params, Connection, OptionalExtension};
use std::sync::Mutex;

use crate::features::storage::domain::{Chunk, ChunkStoreError, Result};
use crate::features::storage::ports::ChunkStore;

pub struct SqliteChunkStore {
    conn: Mutex<Connection>,
}

impl SqliteChunkStore {
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(ChunkStoreError::from)?;
        Self::migrate(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let conn = Connection::open(path).map_err(ChunkStoreError::from)?;
        Self::migrate(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn migrate(conn: &Connection) -> Result<()> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS chunks (
                id TEXT PRIMARY KEY,
                file_path TEXT NOT NULL,
                start_line INTEGER NOT NULL,
                end_line INTEGER NOT NULL,
                content TEXT NOT NULL,
                metadata TEXT NOT NULL
            )",
            [],
        )
        .map_err(ChunkStoreError::from)?;
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_chunks_file_path ON chunks (file_path)",
            [],
        )
        .map_err(ChunkStoreError::from)?;
        Ok(())
    }
}

fn row_to_chunk(row: &rusqlite::Row) -> rusqlite::Result<Chunk> {
    let metadata_json: String = row.get(5)?;
    let metadata = serde_json::from_str(&metadata_json).unwrap_or(serde_json::Value::Null);
    Ok(Chunk {
        id: row.get(0)?,
        file_path: row.get(1)?,
        start_line: row.get::<_, i64>(2)? as usize,
        end_line: row.get::<_, i64>(3)? as usize,
        content: row.get(4)?,
        metadata,
    })
}

impl ChunkStore for SqliteChunkStore {
    fn save_chunk(&self, chunk: &Chunk) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT OR REPLACE INTO chunks (id, file_path, start_line, end_line, content, metadata)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                chunk.id,
                chunk.file_path,
                chunk.start_line as i64,
                chunk.end_line as i64,
                chunk.content,
                chunk.metadata.to_string(),
            ],
        )
        .map_err(ChunkStoreError::from)?;
        Ok(())
    }

    fn get_chunk(&self, chunk_id: &str) -> Result<Chunk> {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            "SELECT id, file_path, start_line, end_line, content, metadata FROM chunks WHERE id = ?1",
            params![chunk_id],
            row_to_chunk,
        )
        .optional()
        .map_err(ChunkStoreError::from)?
        .ok_or_else(|| ChunkStoreError::not_found(chunk_id))
    }

    fn get_chunks_for_file(&self, file_path: &str) -> Result<Vec<Chunk>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn
            .prepare(
                "SELECT id, file_path, start_line, end_line, content, metadata FROM chunks
                 WHERE file_path = ?1 ORDER BY start_line ASC",
            )
            .map_err(ChunkStoreError::from)?;
        let rows = stmt
            .query_map(params![file_path], row_to_chunk)
            .map_err(ChunkStoreError::from)?;
        let mut chunks = Vec::new();
        for row in rows {
            chunks.push(row.map_err(ChunkStoreError::from)?);
        }
        Ok(chunks)
    }

    fn delete_chunks_for_file(&self, file_path: &str) -> Result<usize> {
        let conn = self.conn.lock().unwrap();
        let deleted = conn
            .execute("DELETE FROM chunks WHERE file_path = ?1", params![file_path])
            .map_err(ChunkStoreError::from)?;
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_get_chunk() {
        let store = SqliteChunkStore::in_memory().unwrap();
        let chunk = Chunk::new("chunk_1", "src/auth.py", 1, 50, "def login(): pass");
        store.save_chunk(&chunk).unwrap();

        let fetched = store.get_chunk("chunk_1").unwrap();
        assert_eq!(fetched.file_path, "src/auth.py");
        assert_eq!(fetched.content, "def login(): pass");
    }

    #[test]
    fn test_get_chunks_for_file_ordered() {
        let store = SqliteChunkStore::in_memory().unwrap();
        store
            .save_chunks(&[
                Chunk::new("c2", "a.py", 20, 30, "second"),
                Chunk::new("c1", "a.py", 1, 10, "first"),
            ])
            .unwrap();

        let chunks = store.get_chunks_for_file("a.py").unwrap();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].id, "c1");
        assert_eq!(chunks[1].id, "c2");
    }

    #[test]
    fn test_delete_chunks_for_file() {
        let store = SqliteChunkStore::in_memory().unwrap();
        store
            .save_chunks(&[
                Chunk::new("c1", "a.py", 1, 10, "x"),
                Chunk::new("c2", "b.py", 1, 10, "y"),
            ])
            .unwrap();

        let deleted = store.delete_chunks_for_file("a.py").unwrap();
        assert_eq!(deleted, 1);
        assert!(store.get_chunks_for_file("a.py").unwrap().is_empty());
        assert_eq!(store.get_chunks_for_file("b.py").unwrap().len(), 1);
    }

    #[test]
    fn test_get_chunk_not_found() {
        let store = SqliteChunkStore::in_memory().unwrap();
        let err = store.get_chunk("missing").unwrap_err();
        assert!(format!("{}", err).contains("chunk_not_found"));
    }
}
