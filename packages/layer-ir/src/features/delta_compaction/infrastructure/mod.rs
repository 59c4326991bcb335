pub mod policy;

pub use policy::{SizeOrAgeCompactionPolicy, DEFAULT_POLL_INTERVAL};
