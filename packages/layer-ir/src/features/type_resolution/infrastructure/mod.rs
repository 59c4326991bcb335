//! Type Resolution infrastructure
//!
//! Contains both the simple type resolver (currently used in pipeline)
//! and SOTA Hindley-Milner constraint solver for future integration.

pub mod type_resolver;

// SOTA: Constraint-based type inference (Hindley-Milner)
pub mod constraint_solver;
pub mod inference_engine;
pub mod signature_cache;
pub mod type_narrowing;

// Bottom-up return-type summaries over the function call graph
pub mod call_graph;
pub mod return_summary_solver;

pub use type_resolver::*;

// Re-export SOTA types for direct API access
pub use constraint_solver::{Constraint, ConstraintSolver, InferType, SolverError, Substitution};

pub use call_graph::CallGraph;
pub use return_summary_solver::CallGraphReturnSummarySolver;
