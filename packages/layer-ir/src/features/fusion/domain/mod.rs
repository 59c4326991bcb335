pub mod models;

pub use models::{fused_score, priority_score, FusionConfig, FusionWeights, SourceScores};
