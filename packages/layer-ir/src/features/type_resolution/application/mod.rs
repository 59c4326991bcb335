pub mod resolve_types;
pub mod summarize_returns;

pub use resolve_types::ResolveTypesUseCase;
pub use summarize_returns::SummarizeReturnSummariesUseCase;
