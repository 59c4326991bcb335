use std::collections::HashSet;
use std::time::{Duration, SystemTime};

use crate::features::query_engine::infrastructure::{ChangeOp, Snapshot, TxnId};

/// Result of one compaction run: how much of the delta was folded into base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompactionStats {
    pub merged_changes: usize,
    pub tombstones_removed: usize,
}

/// Append-only delta on top of a repo's base snapshot. The steady-state query
/// path unions `base` with `pending`; compaction folds `pending` into `base`
/// and clears it.
pub struct DeltaIndex {
    base_txn: TxnId,
    pending: Vec<ChangeOp>,
    tombstoned_nodes: HashSet<String>,
    last_compacted_at: SystemTime,
}

impl DeltaIndex {
    pub fn new(base_txn: TxnId, now: SystemTime) -> Self {
        Self {
            base_txn,
            pending: Vec::new(),
            tombstoned_nodes: HashSet::new(),
            last_compacted_at: now,
        }
    }

    pub fn base_txn(&self) -> TxnId {
        self.base_txn
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn age_since_last_compaction(&self, now: SystemTime) -> Duration {
        now.duration_since(self.last_compacted_at).unwrap_or_default()
    }

    pub fn record_change(&mut self, op: ChangeOp) {
        if let ChangeOp::RemoveNode(id) = &op {
            self.tombstoned_nodes.insert(id.clone());
        }
        self.pending.push(op);
    }

    pub fn is_tombstoned(&self, node_id: &str) -> bool {
        self.tombstoned_nodes.contains(node_id)
    }

    /// Applies every pending change onto a scratch copy of `base`, drops
    /// tombstoned rows, and only then swaps the result into `base` — a
    /// process aborted (panicked, killed) before the final swap leaves
    /// `base` exactly as it was and `pending` still intact, so a retried
    /// compaction replays from the same starting point.
    pub fn compact_into(&mut self, base: &mut Snapshot, txn_id: TxnId, now: SystemTime) -> CompactionStats {
        let mut merged = base.clone();
        merged.txn_id = txn_id;

        for change in &self.pending {
            match change {
                ChangeOp::AddNode(node) | ChangeOp::UpdateNode(node) => {
                    merged.nodes.insert(node.id.clone(), node.clone());
                }
                ChangeOp::RemoveNode(id) => {
                    merged.nodes.remove(id);
                }
                ChangeOp::AddEdge(edge) => {
                    merged.edges.push(edge.clone());
                }
                ChangeOp::RemoveEdge(src, tgt) => {
                    merged.edges.retain(|e| !(e.source_id == *src && e.target_id == *tgt));
                }
            }
        }

        let tombstones_removed = self
            .tombstoned_nodes
            .iter()
            .filter(|id| !merged.nodes.contains_key(id.as_str()))
            .count();

        let stats = CompactionStats {
            merged_changes: self.pending.len(),
            tombstones_removed,
        };

        *base = merged;
        self.base_txn = txn_id;
        self.pending.clear();
        self.tombstoned_nodes.clear();
        self.last_compacted_at = now;

        stats
    }
}
