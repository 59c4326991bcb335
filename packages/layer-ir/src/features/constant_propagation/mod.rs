//! Sparse Conditional Constant Propagation (L4 dataflow).

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::RunSCCPUseCase;
pub use domain::{BinOp, ConstExpr, ConstantLattice, Literal, Reachability, SCCPProgram};
pub use infrastructure::SCCPSolver;
pub use ports::{ConstantPropagationAnalyzer, SCCPResult};
