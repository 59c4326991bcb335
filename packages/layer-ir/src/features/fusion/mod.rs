//! Fusion / query planner: combines each index's normalized per-source score
//! into one fused score with cross-source correlation adjustments, then a
//! priority score that folds in repo-structure importance, under a
//! versioned per-intent weight preset with A/B routing between versions.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::{ChunkCandidate, RankQueryResultsUseCase, RankedChunk};
pub use domain::{fused_score, priority_score, FusionConfig, FusionWeights, SourceScores};
pub use infrastructure::{ABRouter, StaticPresetStore};
pub use ports::{PresetStore, WeightPreset};
