//! Basic & Control Flow Graphs (L2/L3)

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::{BuildFlowGraphsUseCase, FlowGraphResult};
pub use domain::{BasicFlowBlock, BasicFlowGraph, BlockKind, CFGBlock, CFGEdge, CFGEdgeKind};
pub use ports::FlowAnalyzer;
