pub mod sccp_analyzer;

pub use sccp_analyzer::{ConstantPropagationAnalyzer, SCCPResult};
