//! Schema migrations for the SQLite snapshot store.
//!
//! Migrations are plain SQL batches applied in order inside one transaction.
//! `schema_version` records the highest version applied; `apply_migrations`
//! is safe to call on every connection open since already-applied migrations
//! are skipped.

use rusqlite::{Connection, Transaction};

const MIGRATIONS: &[(i64, &str)] = &[
    (
        1,
        r#"
        CREATE TABLE repositories (
            id          TEXT PRIMARY KEY,
            name        TEXT NOT NULL,
            url         TEXT,
            created_at  TEXT NOT NULL,
            metadata    TEXT NOT NULL DEFAULT 'null'
        );

        CREATE TABLE snapshots (
            id          TEXT PRIMARY KEY,
            repo_id     TEXT NOT NULL,
            timestamp   TEXT NOT NULL,
            metadata    TEXT NOT NULL DEFAULT 'null'
        );
        CREATE INDEX idx_snapshots_repo ON snapshots(repo_id, timestamp DESC);

        CREATE TABLE chunks (
            snapshot_id TEXT NOT NULL,
            id          TEXT NOT NULL,
            file_path   TEXT NOT NULL,
            start_line  INTEGER NOT NULL,
            end_line    INTEGER NOT NULL,
            content     TEXT NOT NULL,
            metadata    TEXT NOT NULL DEFAULT 'null',
            PRIMARY KEY (snapshot_id, id)
        );
        CREATE INDEX idx_chunks_file ON chunks(snapshot_id, file_path, start_line);

        CREATE TABLE dependencies (
            snapshot_id   TEXT NOT NULL,
            from_chunk_id TEXT NOT NULL,
            to_chunk_id   TEXT NOT NULL,
            dep_type      TEXT NOT NULL,
            metadata      TEXT NOT NULL DEFAULT 'null'
        );
        CREATE INDEX idx_deps_from ON dependencies(snapshot_id, from_chunk_id);
        "#,
    ),
];

pub fn apply_migrations(conn: &mut Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version     INTEGER PRIMARY KEY,
            applied_at  TEXT NOT NULL
        );",
    )?;

    let current: i64 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )?;

    let tx = conn.transaction()?;
    for (version, sql) in MIGRATIONS {
        if *version > current {
            apply_one(&tx, *version, sql)?;
        }
    }
    tx.commit()
}

fn apply_one(tx: &Transaction<'_>, version: i64, sql: &str) -> rusqlite::Result<()> {
    tx.execute_batch(sql)?;
    tx.execute(
        "INSERT INTO schema_version (version, applied_at) VALUES (?1, datetime('now'))",
        [version],
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_idempotent() {
        let mut conn = Connection::open_in_memory().unwrap();
        apply_migrations(&mut conn).unwrap();
        apply_migrations(&mut conn).unwrap();

        let version: i64 = conn
            .query_row("SELECT MAX(version) FROM schema_version", [], |r| r.get(0))
            .unwrap();
        assert_eq!(version, 1);
    }

    #[test]
    fn creates_expected_tables() {
        let mut conn = Connection::open_in_memory().unwrap();
        apply_migrations(&mut conn).unwrap();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'chunks'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }
}
