pub mod rank_results;

pub use rank_results::{ChunkCandidate, RankQueryResultsUseCase, RankedChunk};
