use std::time::SystemTime;

use crate::features::delta_compaction::domain::DeltaIndex;

/// Decides, on each scheduler poll, whether a repo's delta is due for
/// compaction into its base.
pub trait CompactionPolicy: Send + Sync {
    fn should_compact(&self, delta: &DeltaIndex, now: SystemTime) -> bool;
}
