/*
 * Incremental pipeline orchestration for the codegraph analysis engine.
 *
 * Architecture:
 * - Job State Machine
 * - Checkpoint/Resume System (backed by layer-storage)
 * - Pipeline Stages (pluggable)
 * - Mode Manager (Fast/Balanced/Deep/Bootstrap/Repair)
 * - Cooperative cancellation
 */

// Public modules
pub mod change_set;
pub mod checkpoint;
pub mod dag;
pub mod dependency_graph;
pub mod error;
pub mod incremental;
pub mod job;
pub mod mode;
pub mod orchestrator;
pub mod pipeline;
pub mod stages;

// Re-exports
pub use change_set::{ChangeSet, ChangeSetDetector};
pub use checkpoint::{Checkpoint, CheckpointManager};
pub use dag::{CacheKeyManager, PipelineDAG, StageNode};
pub use dependency_graph::{compute_affected_files, FileId, ImportKey, ReverseDependencyIndex};
pub use error::{ErrorCategory, OrchestratorError, Result};
pub use incremental::{IncrementalOrchestrator, IncrementalResult};
pub use job::{Job, JobState, JobStateMachine, StageId};
pub use mode::{CancellationToken, IndexingMode, ModeSelectionConfig, ModeSignals, select_mode};
pub use orchestrator::{PipelineOrchestrator, PipelineResult};
pub use pipeline::{
    StageConfig, StageContext, StageHandler, StageInput, StageMetrics, StageOutput,
};
pub use stages::{
    ChunkResult, ChunkStage, IRResult, IRStage, ImportInfo, LexicalStage, VectorResult, VectorStage,
};

#[cfg(test)]
mod tests {
    #[test]
    fn it_works() {
        assert_eq!(2 + 2, 4);
    }
}
