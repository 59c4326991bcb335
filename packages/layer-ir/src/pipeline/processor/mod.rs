//! Refactored processor module
//!
//! This module provides the L1-L7 pipeline processing functionality,
//! extracted from the monolithic processor.rs (2,052 LOC).
//!
//! # Module Organization
//!
//! - `types`: Result and summary types (ProcessResult, PDGSummary, etc.)
//! - `language`: Language detection and plugin selection
//! - `helpers`: Shared utility functions
//! - `stages`: Pipeline stages (L1-L5)

pub mod helpers;
pub mod language;
mod main;
pub mod stages;
pub mod types;

// Re-export types for convenience
pub use types::ProcessResult;

// Re-export language detection
pub use language::get_plugin_for_file;

// Re-export helpers
pub use helpers::{find_body_node, find_containing_block, node_to_span};

// Re-export main entry points (SOTA implementation using stages)
pub use main::{generate_occurrences_pub, process_file, process_python_file};
