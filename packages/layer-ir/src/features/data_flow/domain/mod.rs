pub mod dfg;

pub use dfg::{DFNode, DFNodeKind, DataFlowGraph};
