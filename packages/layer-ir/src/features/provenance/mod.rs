//! Provenance & determinism: input/config/dependency fingerprints and the
//! total ordering applied to node/edge lists, per the build-reproducibility
//! guarantee (same inputs + same config ⟹ byte-identical IR modulo a
//! timestamp).
//!
//! Distinct from `config::provenance::ConfigProvenance`, which tracks where
//! each *configuration value* came from (preset/env/yaml/builder) — a
//! different concept from the build provenance tracked here.

pub mod domain;
pub mod infrastructure;

pub use domain::{Provenance, SORT_KEY};
pub use infrastructure::{
    config_fingerprint, dependency_fingerprint, input_fingerprint, sort_edges, sort_nodes,
};
