//! Data-Flow Graph construction (L5)

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::BuildDFGUseCase;
pub use domain::{DFNode, DFNodeKind, DataFlowGraph};
pub use ports::DFGAnalyzer;
