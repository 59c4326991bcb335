//! `CodeSnapshotStore` implementation backed by bundled SQLite.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use super::migrations::apply_migrations;
use crate::domain::{Chunk, CodeSnapshotStore, Dependency, Repository, Snapshot};
use crate::error::StorageError;
use crate::Result;

pub struct SqliteSnapshotStore {
    conn: Mutex<Connection>,
}

impl SqliteSnapshotStore {
    pub fn new_in_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory().map_err(StorageError::from)?;
        apply_migrations(&mut conn).map_err(StorageError::from)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let mut conn = Connection::open(path).map_err(StorageError::from)?;
        apply_migrations(&mut conn).map_err(StorageError::from)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn save_repository(&self, repo: &Repository) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT OR REPLACE INTO repositories (id, name, url, created_at, metadata)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                repo.id,
                repo.name,
                repo.url,
                repo.created_at.to_rfc3339(),
                repo.metadata.to_string(),
            ],
        )
        .map_err(StorageError::from)?;
        Ok(())
    }
}

#[async_trait]
impl CodeSnapshotStore for SqliteSnapshotStore {
    async fn save_snapshot(&self, snapshot: &Snapshot) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO snapshots (id, repo_id, timestamp, metadata) VALUES (?1, ?2, ?3, ?4)",
            params![
                snapshot.id,
                snapshot.repo_id,
                snapshot.timestamp.to_rfc3339(),
                snapshot.metadata.to_string(),
            ],
        )
        .map_err(StorageError::from)?;
        Ok(())
    }

    async fn get_snapshot(&self, snapshot_id: &str) -> Result<Snapshot> {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            "SELECT id, repo_id, timestamp, metadata FROM snapshots WHERE id = ?1",
            params![snapshot_id],
            row_to_snapshot,
        )
        .optional()
        .map_err(StorageError::from)?
        .ok_or_else(|| StorageError::snapshot_not_found(snapshot_id))
    }

    async fn list_snapshots(&self, repo_id: &str, limit: Option<usize>) -> Result<Vec<Snapshot>> {
        let conn = self.conn.lock().unwrap();
        let limit = limit.unwrap_or(i64::MAX as usize) as i64;
        let mut stmt = conn
            .prepare(
                "SELECT id, repo_id, timestamp, metadata FROM snapshots
                 WHERE repo_id = ?1 ORDER BY timestamp DESC LIMIT ?2",
            )
            .map_err(StorageError::from)?;
        let rows = stmt
            .query_map(params![repo_id, limit], row_to_snapshot)
            .map_err(StorageError::from)?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(StorageError::from)
    }

    async fn save_chunk(&self, snapshot_id: &str, chunk: &Chunk) -> Result<()> {
        self.save_chunks(snapshot_id, std::slice::from_ref(chunk))
            .await
    }

    async fn save_chunks(&self, snapshot_id: &str, chunks: &[Chunk]) -> Result<()> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction().map_err(StorageError::from)?;
        for chunk in chunks {
            tx.execute(
                "INSERT OR REPLACE INTO chunks
                     (snapshot_id, id, file_path, start_line, end_line, content, metadata)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    snapshot_id,
                    chunk.id,
                    chunk.file_path,
                    chunk.start_line as i64,
                    chunk.end_line as i64,
                    chunk.content,
                    chunk.metadata.to_string(),
                ],
            )
            .map_err(StorageError::from)?;
        }
        tx.commit().map_err(StorageError::from)
    }

    async fn get_chunks(&self, snapshot_id: &str, file_path: &str) -> Result<Vec<Chunk>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn
            .prepare(
                "SELECT id, file_path, start_line, end_line, content, metadata
                 FROM chunks WHERE snapshot_id = ?1 AND file_path = ?2
                 ORDER BY start_line",
            )
            .map_err(StorageError::from)?;
        let rows = stmt
            .query_map(params![snapshot_id, file_path], row_to_chunk)
            .map_err(StorageError::from)?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(StorageError::from)
    }

    async fn get_chunk(&self, snapshot_id: &str, chunk_id: &str) -> Result<Chunk> {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            "SELECT id, file_path, start_line, end_line, content, metadata
             FROM chunks WHERE snapshot_id = ?1 AND id = ?2",
            params![snapshot_id, chunk_id],
            row_to_chunk,
        )
        .optional()
        .map_err(StorageError::from)?
        .ok_or_else(|| {
            StorageError::new(
                crate::error::ErrorKind::ChunkNotFound,
                format!("Chunk not found: {chunk_id}"),
            )
        })
    }

    async fn replace_file(
        &self,
        repo_id: &str,
        old_commit: &str,
        new_commit: &str,
        file_path: &str,
        chunks: Vec<Chunk>,
    ) -> Result<()> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction().map_err(StorageError::from)?;

        tx.execute(
            "INSERT OR IGNORE INTO snapshots (id, repo_id, timestamp, metadata)
             VALUES (?1, ?2, ?3, 'null')",
            params![new_commit, repo_id, Utc::now().to_rfc3339()],
        )
        .map_err(StorageError::from)?;

        tx.execute(
            "INSERT OR IGNORE INTO chunks
                 (snapshot_id, id, file_path, start_line, end_line, content, metadata)
             SELECT ?1, id, file_path, start_line, end_line, content, metadata
             FROM chunks WHERE snapshot_id = ?2 AND file_path != ?3",
            params![new_commit, old_commit, file_path],
        )
        .map_err(StorageError::from)?;

        tx.execute(
            "DELETE FROM chunks WHERE snapshot_id = ?1 AND file_path = ?2",
            params![new_commit, file_path],
        )
        .map_err(StorageError::from)?;

        for chunk in &chunks {
            tx.execute(
                "INSERT INTO chunks
                     (snapshot_id, id, file_path, start_line, end_line, content, metadata)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    new_commit,
                    chunk.id,
                    chunk.file_path,
                    chunk.start_line as i64,
                    chunk.end_line as i64,
                    chunk.content,
                    chunk.metadata.to_string(),
                ],
            )
            .map_err(StorageError::from)?;
        }

        tx.commit().map_err(StorageError::from)
    }

    async fn save_dependencies(
        &self,
        snapshot_id: &str,
        dependencies: &[Dependency],
    ) -> Result<()> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction().map_err(StorageError::from)?;
        for dep in dependencies {
            tx.execute(
                "INSERT INTO dependencies (snapshot_id, from_chunk_id, to_chunk_id, dep_type, metadata)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    snapshot_id,
                    dep.from_chunk_id,
                    dep.to_chunk_id,
                    dep.dep_type,
                    dep.metadata.to_string(),
                ],
            )
            .map_err(StorageError::from)?;
        }
        tx.commit().map_err(StorageError::from)
    }

    async fn get_dependencies(&self, snapshot_id: &str, chunk_id: &str) -> Result<Vec<Dependency>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn
            .prepare(
                "SELECT from_chunk_id, to_chunk_id, dep_type, metadata
                 FROM dependencies WHERE snapshot_id = ?1 AND from_chunk_id = ?2",
            )
            .map_err(StorageError::from)?;
        let rows = stmt
            .query_map(params![snapshot_id, chunk_id], |row| {
                Ok(Dependency {
                    from_chunk_id: row.get(0)?,
                    to_chunk_id: row.get(1)?,
                    dep_type: row.get(2)?,
                    metadata: parse_metadata(row.get::<_, String>(3)?),
                })
            })
            .map_err(StorageError::from)?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(StorageError::from)
    }
}

fn row_to_snapshot(row: &rusqlite::Row<'_>) -> rusqlite::Result<Snapshot> {
    let timestamp: String = row.get(2)?;
    Ok(Snapshot {
        id: row.get(0)?,
        repo_id: row.get(1)?,
        timestamp: DateTime::parse_from_rfc3339(&timestamp)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now()),
        metadata: parse_metadata(row.get(3)?),
    })
}

fn row_to_chunk(row: &rusqlite::Row<'_>) -> rusqlite::Result<Chunk> {
    Ok(Chunk {
        id: row.get(0)?,
        file_path: row.get(1)?,
        start_line: row.get::<_, i64>(2)? as usize,
        end_line: row.get::<_, i64>(3)? as usize,
        content: row.get(4)?,
        metadata: parse_metadata(row.get(5)?),
    })
}

fn parse_metadata(raw: String) -> serde_json::Value {
    serde_json::from_str(&raw).unwrap_or(serde_json::Value::Null)
}
