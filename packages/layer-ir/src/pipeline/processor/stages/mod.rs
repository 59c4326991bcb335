//! Pipeline stages (L1-L5)
//!
//! Each stage represents a layer in the analysis pipeline:
//! - L1-L2: IR generation and occurrences (ir_generation)
//! - L3: Flow graphs and type resolution (flow_types)
//! - L4-L5: Data flow and SSA (data_flow)
//!
//! Call-graph scale analyses (taint fixpoint, symbol graph) run once per
//! repository over the aggregated IR, not per-file here — see
//! `features::taint_analysis` and `features::cross_file`.

pub mod data_flow;
pub mod flow_types;
pub mod ir_generation;

// Re-export all IR generation functions
pub use ir_generation::{
    generate_occurrences, process_class, process_function, process_with_bfg, traverse_node,
};

// Re-export flow/type functions
pub use flow_types::{extract_bfg_graphs, extract_bfg_graphs_with_nodes};

// Re-export data flow functions
pub use data_flow::{build_dfg_graphs, build_ssa_graphs, build_ssa_graphs_with_extraction};
