pub mod writer;

pub use writer::{PayloadWriter, WriteError};
