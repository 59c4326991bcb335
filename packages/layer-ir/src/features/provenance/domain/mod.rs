pub mod models;

pub use models::{Provenance, SORT_KEY};
