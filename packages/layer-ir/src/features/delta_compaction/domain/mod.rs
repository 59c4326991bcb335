pub mod models;

pub use models::{CompactionStats, DeltaIndex};
