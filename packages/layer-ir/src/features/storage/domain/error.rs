//! Error type for the chunk store, in the same `kind` + `message` shape
//! `layer-storage`'s `StorageError` uses.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Database,
    Serialization,
    ChunkNotFound,
    IO,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Database => "database",
            ErrorKind::Serialization => "serialization",
            ErrorKind::ChunkNotFound => "chunk_not_found",
            ErrorKind::IO => "io",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("[{kind}] {message}")]
pub struct ChunkStoreError {
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
    pub kind: ErrorKind,
    pub message: String,
}

impl ChunkStoreError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    pub fn not_found(chunk_id: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::ChunkNotFound,
            format!("Chunk not found: {}", chunk_id.into()),
        )
    }
}

impl From<rusqlite::Error> for ChunkStoreError {
    fn from(err: rusqlite::Error) -> Self {
        ChunkStoreError::database(format!("SQLite error: {}", err)).with_source(err)
    }
}

pub type Result<T> = std::result::Result<T, ChunkStoreError>;
