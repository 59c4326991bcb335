//! Tracks which `(repo, snapshot, file, commit)` tuples are already indexed
//! so the orchestrator skips re-indexing unchanged files on every run.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, SystemTime};

use crate::features::lexical::FileToIndex;

pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdempotencyKey {
    pub repo_id: String,
    pub snapshot_id: String,
    pub file_path: String,
    pub head_sha: String,
}

impl IdempotencyKey {
    pub fn new(
        repo_id: impl Into<String>,
        snapshot_id: impl Into<String>,
        file_path: impl Into<String>,
        head_sha: impl Into<String>,
    ) -> Self {
        Self {
            repo_id: repo_id.into(),
            snapshot_id: snapshot_id.into(),
            file_path: file_path.into(),
            head_sha: head_sha.into(),
        }
    }
}

/// `(repo_id, snapshot_id, file_path, head_sha) -> indexed_at`, with a TTL
/// past which an entry is treated as stale and the file re-indexed.
pub struct IdempotencyStore {
    ttl: Duration,
    entries: Mutex<HashMap<IdempotencyKey, SystemTime>>,
}

impl Default for IdempotencyStore {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl IdempotencyStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn mark_indexed(&self, key: IdempotencyKey) {
        self.entries
            .lock()
            .expect("idempotency store mutex poisoned")
            .insert(key, SystemTime::now());
    }

    fn is_fresh(&self, key: &IdempotencyKey) -> bool {
        let entries = self.entries.lock().expect("idempotency store mutex poisoned");
        match entries.get(key) {
            Some(indexed_at) => indexed_at
                .elapsed()
                .map(|elapsed| elapsed < self.ttl)
                .unwrap_or(false),
            None => false,
        }
    }

    /// Splits `files` into `(needs_indexing, already_indexed)` in one pass,
    /// given the snapshot/commit context every file in the batch shares.
    pub fn partition(
        &self,
        repo_id: &str,
        snapshot_id: &str,
        head_sha: &str,
        files: Vec<FileToIndex>,
    ) -> (Vec<FileToIndex>, Vec<FileToIndex>) {
        let mut needs_indexing = Vec::new();
        let mut already_indexed = Vec::new();
        for file in files {
            let key = IdempotencyKey::new(repo_id, snapshot_id, file.file_path.clone(), head_sha);
            if self.is_fresh(&key) {
                already_indexed.push(file);
            } else {
                needs_indexing.push(file);
            }
        }
        (needs_indexing, already_indexed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(path: &str) -> FileToIndex {
        FileToIndex::new("repo", path, "content").unwrap()
    }

    #[test]
    fn test_unseen_file_needs_indexing() {
        let store = IdempotencyStore::default();
        let (needs, already) = store.partition("repo", "snap", "sha1", vec![file("a.py")]);
        assert_eq!(needs.len(), 1);
        assert!(already.is_empty());
    }

    #[test]
    fn test_marked_file_is_already_indexed() {
        let store = IdempotencyStore::default();
        store.mark_indexed(IdempotencyKey::new("repo", "snap", "a.py", "sha1"));
        let (needs, already) = store.partition("repo", "snap", "sha1", vec![file("a.py")]);
        assert!(needs.is_empty());
        assert_eq!(already.len(), 1);
    }

    #[test]
    fn test_different_head_sha_forces_reindex() {
        let store = IdempotencyStore::default();
        store.mark_indexed(IdempotencyKey::new("repo", "snap", "a.py", "sha1"));
        let (needs, already) = store.partition("repo", "snap", "sha2", vec![file("a.py")]);
        assert_eq!(needs.len(), 1);
        assert!(already.is_empty());
    }

    #[test]
    fn test_expired_entry_forces_reindex() {
        let store = IdempotencyStore::new(Duration::from_secs(0));
        store.mark_indexed(IdempotencyKey::new("repo", "snap", "a.py", "sha1"));
        std::thread::sleep(Duration::from_millis(2));
        let (needs, already) = store.partition("repo", "snap", "sha1", vec![file("a.py")]);
        assert_eq!(needs.len(), 1);
        assert!(already.is_empty());
    }

    #[test]
    fn test_partitions_mixed_batch() {
        let store = IdempotencyStore::default();
        store.mark_indexed(IdempotencyKey::new("repo", "snap", "cached.py", "sha1"));
        let (needs, already) = store.partition(
            "repo",
            "snap",
            "sha1",
            vec![file("fresh.py"), file("cached.py")],
        );
        assert_eq!(needs.len(), 1);
        assert_eq!(needs[0].file_path, "fresh.py");
        assert_eq!(already.len(), 1);
        assert_eq!(already[0].file_path, "cached.py");
    }
}
