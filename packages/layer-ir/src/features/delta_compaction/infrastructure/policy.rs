use std::time::{Duration, SystemTime};

use crate::features::delta_compaction::domain::DeltaIndex;
use crate::features::delta_compaction::ports::CompactionPolicy;

/// Default poll interval a scheduler checks `should_compact` at, per-repo.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Compacts once the delta has grown past `max_pending` entries or has sat
/// unmerged longer than `max_age` — whichever trips first. Mirrors
/// `multi_index::config::wal`'s size-based WAL compaction trigger, applied
/// here to a per-repo delta index instead of the transaction log.
pub struct SizeOrAgeCompactionPolicy {
    max_pending: usize,
    max_age: Duration,
}

impl Default for SizeOrAgeCompactionPolicy {
    fn default() -> Self {
        Self::new(
            crate::features::multi_index::config::wal::DEFAULT_MAX_ENTRIES,
            DEFAULT_POLL_INTERVAL,
        )
    }
}

impl SizeOrAgeCompactionPolicy {
    pub fn new(max_pending: usize, max_age: Duration) -> Self {
        Self { max_pending, max_age }
    }
}

impl CompactionPolicy for SizeOrAgeCompactionPolicy {
    fn should_compact(&self, delta: &DeltaIndex, now: SystemTime) -> bool {
        if delta.is_empty() {
            return false;
        }
        delta.pending_len() >= self.max_pending || delta.age_since_last_compaction(now) >= self.max_age
    }
}
