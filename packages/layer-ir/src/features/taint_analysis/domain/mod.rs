pub mod function_summary;

pub use function_summary::{FunctionSummaryCache, FunctionTaintSummary};
