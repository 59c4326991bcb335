//! SQLite adapter for CodeSnapshotStore (RFC-102)
//!
//! Schema is versioned (`schema_version` table) so that future RFCs can evolve
//! the on-disk layout without requiring callers to rebuild from scratch. The
//! migration set is linear and idempotent: each migration is applied inside
//! a transaction and recorded by its monotonically increasing version number.

mod migrations;
mod store;

pub use store::SqliteSnapshotStore;
