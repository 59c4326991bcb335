pub mod outcome;

pub use outcome::{FailureKind, WriteFailure, WriteOutcome};
