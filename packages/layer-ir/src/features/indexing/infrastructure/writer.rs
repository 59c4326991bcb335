//! RFC-RUST-ENGINE Phase 2: PayloadWriter
//!
//! Implements framing protocol: [u32_le length][record_bytes]
//!
//! # Test-Driven Development
//!
//! This module is developed using TDD:
//! 1. Write failing tests
//! 2. Implement minimum code to pass
//! 3. Refactor
//!
//! # Performance Targets

//! - 10K records < 100ms
//! - Memory: Single-pass, streaming write
//! - Determinism: Sorted input → deterministic output

use byteorder::{LittleEndian, WriteBytesExt};
use std::io::Write;

use crate::features::indexing::domain::schema::{
    ChunkRecord, EdgeRecord, FileIndex, NodeRecord, PayloadLayout,
};

/// PayloadWriter with framing protocol
///
/// Writes IR records to a byte buffer with length-prefixed framing.
///
/// # Framing Protocol
///
/// Each record is written as:
/// ```text
/// [u32_le length: 4 bytes][msgpack record_bytes: length bytes]
/// ```
///
/// # Usage
///
/// ```rust,ignore
/// let mut writer = PayloadWriter::new();
/// writer.write_nodes(nodes)?;
/// writer.write_edges(edges)?;
/// let (payload, layout) = writer.finalize();
/// ```
pub struct PayloadWriter {
    buffer: Vec<u8>,
    layout: PayloadLayout,
    file_index: FileIndex,
}

impl PayloadWriter {
    /// Create new writer
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            layout: PayloadLayout::new(),
            file_index: FileIndex::new(),
        }
    }

    /// Write header section (metadata)
    ///
    /// Header contains:
    /// - Schema version
    /// - Timestamp
    /// - Record counts
    pub fn write_header(&mut self, metadata: &[u8]) -> Result<(), WriteError> {
        self.layout.header_offset = self.buffer.len() as u64;

        // Write length-prefixed metadata
        let len = metadata.len() as u32;
        self.buffer
            .write_u32::<LittleEndian>(len)
            .map_err(|e| WriteError::Io(e.to_string()))?;

        self.buffer
            .write_all(metadata)
            .map_err(|e| WriteError::Io(e.to_string()))?;

        self.layout.header_size = (self.buffer.len() as u64) - self.layout.header_offset;

        Ok(())
    }

    /// Write node section with framing
    ///
    /// Nodes MUST be pre-sorted by ordering key:
    /// (file_path, kind, start_byte, end_byte, local_seq)
    ///
    /// # Framing
    ///
    /// For each node:
    /// 1. Serialize to msgpack
    /// 2. Write u32 length prefix
    /// 3. Write msgpack bytes
    pub fn write_nodes(&mut self, nodes: Vec<NodeRecord>) -> Result<(), WriteError> {
        self.layout.nodes_offset = self.buffer.len() as u64;
        self.layout.nodes_count = nodes.len() as u32;

        for node in nodes.iter() {
            self.write_framed_record(node)?;
        }

        self.layout.nodes_size = (self.buffer.len() as u64) - self.layout.nodes_offset;

        Ok(())
    }

    /// Write edge section with framing
    ///
    /// Edges MUST be pre-sorted by ordering key:
    /// (src_ref, dst_ref, kind, local_seq)
    pub fn write_edges(&mut self, edges: Vec<EdgeRecord>) -> Result<(), WriteError> {
        self.layout.edges_offset = self.buffer.len() as u64;
        self.layout.edges_count = edges.len() as u32;

        for edge in edges.iter() {
            self.write_framed_record(edge)?;
        }

        self.layout.edges_size = (self.buffer.len() as u64) - self.layout.edges_offset;

        Ok(())
    }

    /// Write chunk section with framing
    ///
    /// Chunks MUST be pre-sorted by ordering key:
    /// (file_id, chunk_kind, anchor_hash, local_seq)
    pub fn write_chunks(&mut self, chunks: Vec<ChunkRecord>) -> Result<(), WriteError> {
        self.layout.chunks_offset = self.buffer.len() as u64;
        self.layout.chunks_count = chunks.len() as u32;

        for chunk in chunks.iter() {
            self.write_framed_record(chunk)?;
        }

        self.layout.chunks_size = (self.buffer.len() as u64) - self.layout.chunks_offset;

        Ok(())
    }

    /// Write a single record with length prefix
    ///
    /// # Framing Format
    ///
    /// ```text
    /// [u32_le length][msgpack bytes]
    /// ```
    fn write_framed_record<T: serde::Serialize>(&mut self, record: &T) -> Result<(), WriteError> {
        // Serialize to msgpack
        let record_bytes =
            rmp_serde::to_vec(record).map_err(|e| WriteError::Serialization(e.to_string()))?;

        let len = record_bytes.len() as u32;

        // Write length prefix (u32 little-endian)
        self.buffer
            .write_u32::<LittleEndian>(len)
            .map_err(|e| WriteError::Io(e.to_string()))?;

        // Write record bytes
        self.buffer
            .write_all(&record_bytes)
            .map_err(|e| WriteError::Io(e.to_string()))?;

        Ok(())
    }

    /// Finalize and return (payload, layout, file_index)
    pub fn finalize(mut self) -> (Vec<u8>, PayloadLayout, FileIndex) {
        self.layout.total_size = self.buffer.len() as u64;
        (self.buffer, self.layout, self.file_index)
    }
}

impl Default for PayloadWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Write errors
#[derive(Debug)]
pub enum WriteError {
    Io(String),
    Serialization(String),
}

impl std::fmt::Display for WriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WriteError::Io(msg) => write!(f, "IO error: {}", msg),
            WriteError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for WriteError {}

// ============================================================
// TDD: Tests First!
// ============================================================
