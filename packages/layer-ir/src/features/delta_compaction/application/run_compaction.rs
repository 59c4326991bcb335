use std::time::SystemTime;

use crate::features::delta_compaction::domain::{CompactionStats, DeltaIndex};
use crate::features::delta_compaction::ports::CompactionPolicy;
use crate::features::query_engine::infrastructure::{Snapshot, TxnId};

/// One scheduler tick for one monitored repo: checks the policy, and if due,
/// runs the atomic merge-and-tombstone-delete. Safe to call on every poll
/// regardless of outcome — compaction is idempotent, so a call that finds
/// nothing to do, or a retried call after a crash mid-compaction, is a
/// no-op/no-op-equivalent rather than an error.
pub struct RunCompactionUseCase<P: CompactionPolicy> {
    policy: P,
}

impl<P: CompactionPolicy> RunCompactionUseCase<P> {
    pub fn new(policy: P) -> Self {
        Self { policy }
    }

    pub fn execute(
        &self,
        delta: &mut DeltaIndex,
        base: &mut Snapshot,
        next_txn_id: TxnId,
        now: SystemTime,
    ) -> Option<CompactionStats> {
        if !self.policy.should_compact(delta, now) {
            return None;
        }
        Some(delta.compact_into(base, next_txn_id, now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::delta_compaction::infrastructure::SizeOrAgeCompactionPolicy;
    use crate::features::query_engine::infrastructure::ChangeOp;
    use crate::shared::models::{Node, NodeKind, Span};
    use std::time::Duration;

    fn node(id: &str) -> Node {
        Node::new(id.to_string(), NodeKind::Function, id.to_string(), "a.py".to_string(), Span::zero())
    }

    #[test]
    fn test_does_not_compact_below_threshold() {
        let usecase = RunCompactionUseCase::new(SizeOrAgeCompactionPolicy::new(10, Duration::from_secs(3600)));
        let now = SystemTime::now();
        let mut delta = DeltaIndex::new(0, now);
        delta.record_change(ChangeOp::AddNode(node("n1")));
        let mut base = Snapshot::default();
        assert!(usecase.execute(&mut delta, &mut base, 1, now).is_none());
        assert!(!base.nodes.contains_key("n1"));
    }

    #[test]
    fn test_compacts_once_threshold_hit() {
        let usecase = RunCompactionUseCase::new(SizeOrAgeCompactionPolicy::new(1, Duration::from_secs(3600)));
        let now = SystemTime::now();
        let mut delta = DeltaIndex::new(0, now);
        delta.record_change(ChangeOp::AddNode(node("n1")));
        let mut base = Snapshot::default();
        let stats = usecase.execute(&mut delta, &mut base, 1, now).unwrap();
        assert_eq!(stats.merged_changes, 1);
        assert!(base.nodes.contains_key("n1"));
        assert!(delta.is_empty());
    }

    #[test]
    fn test_rerun_after_compaction_is_noop() {
        let usecase = RunCompactionUseCase::new(SizeOrAgeCompactionPolicy::new(1, Duration::from_secs(3600)));
        let now = SystemTime::now();
        let mut delta = DeltaIndex::new(0, now);
        delta.record_change(ChangeOp::AddNode(node("n1")));
        let mut base = Snapshot::default();
        usecase.execute(&mut delta, &mut base, 1, now);
        assert!(usecase.execute(&mut delta, &mut base, 2, now).is_none());
    }
}
