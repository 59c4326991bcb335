//! Domain Models for RepoMap
//!
//! Pure business logic, no infrastructure dependencies.

pub mod context;
pub mod metrics;
pub mod models;

pub use context::{ContextItem, ContextProvider, ContextSet, ContextType};
pub use metrics::{ImportanceWeights, RepoMapMetrics};
pub use models::{NodeKind, RepoMapNode, RepoMapSnapshot};
