//! Provenance artifact recorded once per build.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Canonical description of the total order applied to node and edge lists.
pub const SORT_KEY: &str = "(file_path, kind, start_line, end_line, local_seq)";

/// Identifies exactly which inputs, config, and dependency set produced a
/// build, plus the ordering scheme applied to its nodes/edges. Two runs over
/// equal inputs and equal config are byte-identical here except
/// `build_timestamp`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    pub input_fingerprint: String,
    pub config_fingerprint: String,
    pub dependency_fingerprint: String,
    pub builder_version: String,
    pub build_timestamp: DateTime<Utc>,
    /// Canonical description of the ordering key applied to node lists —
    /// `(file_path, kind, start_line, end_line, local_seq)`.
    pub node_sort_key: String,
    /// Same, for edge lists.
    pub edge_sort_key: String,
    pub parallel_seed: u64,
}

impl Provenance {
    pub fn new(
        input_fingerprint: impl Into<String>,
        config_fingerprint: impl Into<String>,
        dependency_fingerprint: impl Into<String>,
        builder_version: impl Into<String>,
        build_timestamp: DateTime<Utc>,
        parallel_seed: u64,
    ) -> Self {
        Self {
            input_fingerprint: input_fingerprint.into(),
            config_fingerprint: config_fingerprint.into(),
            dependency_fingerprint: dependency_fingerprint.into(),
            builder_version: builder_version.into(),
            build_timestamp,
            node_sort_key: SORT_KEY.to_string(),
            edge_sort_key: SORT_KEY.to_string(),
            parallel_seed,
        }
    }

    /// Equality ignoring `build_timestamp`, matching the determinism property:
    /// same inputs + same config ⟹ byte-identical provenance modulo timestamp.
    pub fn deterministically_equal(&self, other: &Self) -> bool {
        self.input_fingerprint == other.input_fingerprint
            && self.config_fingerprint == other.config_fingerprint
            && self.dependency_fingerprint == other.dependency_fingerprint
            && self.builder_version == other.builder_version
            && self.node_sort_key == other.node_sort_key
            && self.edge_sort_key == other.edge_sort_key
            && self.parallel_seed == other.parallel_seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_equality_ignores_timestamp() {
        let p1 = Provenance::new("in", "cfg", "dep", "1.0.0", Utc::now(), 42);
        let p2 = Provenance::new("in", "cfg", "dep", "1.0.0", Utc::now(), 42);
        assert_ne!(p1.build_timestamp, p2.build_timestamp);
        assert!(p1.deterministically_equal(&p2));
    }

    #[test]
    fn test_deterministic_equality_detects_drift() {
        let p1 = Provenance::new("in", "cfg", "dep", "1.0.0", Utc::now(), 42);
        let p2 = Provenance::new("in-other", "cfg", "dep", "1.0.0", Utc::now(), 42);
        assert!(!p1.deterministically_equal(&p2));
    }
}
