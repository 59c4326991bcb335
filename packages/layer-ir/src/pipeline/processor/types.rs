//! Process result types
//!
//! All type definitions for the per-file processor pipeline (L1-L5).
//! Whole-program analyses (taint fixpoint, symbol/call graph, SCCP) consume
//! the aggregated nodes/edges from every file's `ProcessResult` and run
//! separately — see `features::taint_analysis`, `features::cross_file`,
//! `features::constant_propagation`.

use crate::features::data_flow::infrastructure::dfg::DataFlowGraph;
use crate::features::flow_graph::infrastructure::{bfg::BasicFlowGraph, cfg::CFGEdge};
use crate::features::ssa::infrastructure::ssa::SSAGraph;
use crate::features::type_resolution::domain::TypeEntity;
use crate::shared::models::{Edge, Node, Occurrence};

/// Process result (L1-L5 complete pipeline)
///
/// Contains all analysis results from the per-file code analysis pipeline.
///
/// # Pipeline Stages
/// - **L1-L2**: IR generation (nodes, edges, occurrences)
/// - **L3**: Flow graphs + type resolution (BFG, CFG, types)
/// - **L4-L5**: Data flow + SSA (DFG, SSA graphs)
#[derive(Debug, Clone, Default)]
pub struct ProcessResult {
    // L1-L2: IR
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,

    // 🚀 SOTA: Occurrences generated in L1 (instead of Python L2)
    pub occurrences: Vec<Occurrence>,

    // L3: Flow + Types
    pub bfg_graphs: Vec<BasicFlowGraph>,
    pub cfg_edges: Vec<CFGEdge>,
    pub type_entities: Vec<TypeEntity>,

    // L4-L5: Data Flow + SSA
    pub dfg_graphs: Vec<DataFlowGraph>,
    pub ssa_graphs: Vec<SSAGraph>,

    pub errors: Vec<String>,
}

impl ProcessResult {
    /// Create empty result with errors (for early failure cases)
    ///
    /// Used when parsing or language detection fails before any analysis can run.
    ///
    /// # Arguments
    /// * `errors` - Error messages to include in result
    ///
    /// # Returns
    /// ProcessResult with all fields empty except errors
    pub fn empty_with_errors(errors: Vec<String>) -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            occurrences: Vec::new(),
            bfg_graphs: Vec::new(),
            cfg_edges: Vec::new(),
            type_entities: Vec::new(),
            dfg_graphs: Vec::new(),
            ssa_graphs: Vec::new(),
            errors,
        }
    }
}
