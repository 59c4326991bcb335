//! Language-Agnostic Core API
//!
//! This module provides pure Rust APIs that can be wrapped by any language binding.
//! All APIs are designed to be FFI-friendly and avoid language-specific types.
//!
//! Three surfaces, matching the three ways a caller drives the pipeline:
//! `build` (in-memory IR construction + provenance), `index`/`search`
//! (multi-index write path), and `graph_query` (read-only queries over an
//! already-built `GraphDocument`). `layer-orchestrator` builds the
//! incremental variant of `build` on top of `ChangeSetDetector`.

pub mod build;
pub mod graph_query;
pub mod index;

pub use build::{build, BuildConfig, BuildResult, SemanticTier};
pub use graph_query::{GraphQuery, GraphStats, QueryFilter};
pub use index::{IndexApi, IndexResult};
