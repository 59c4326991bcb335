pub mod schema;

pub use schema::{ChunkRecord, EdgeRecord, FileIndex, NodeRecord, PayloadLayout};
