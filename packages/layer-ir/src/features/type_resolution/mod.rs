//! Type Resolver & Summaries

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::{ResolveTypesUseCase, SummarizeReturnSummariesUseCase};
pub use domain::{
    ReturnSummary, SummarySource, TypeEntity, TypeFlavor, TypeResolutionConfig, TypeResolutionLevel,
};
pub use infrastructure::CallGraphReturnSummarySolver;
pub use ports::{ReturnSummaryAnalyzer, ReturnSummaryResult, TypeResolver};
