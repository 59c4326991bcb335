//! RepoMap Storage Port - Dependency Inversion Principle (DIP)
//!
//! Abstracts persistence of `RepoMapSnapshot` so the tree builder and
//! PageRank engine stay storage-agnostic (JSON file, in-memory, SQLite).

use crate::features::repomap::domain::RepoMapSnapshot;
use crate::shared::models::Result;

/// Storage abstraction for RepoMap snapshots
pub trait RepoMapStorage: Send + Sync {
    /// Persist a snapshot, replacing any prior snapshot for the same repo
    fn save(&self, snapshot: &RepoMapSnapshot) -> Result<()>;

    /// Load the most recent snapshot for a repository, if any
    fn load(&self, repo_id: &str) -> Result<Option<RepoMapSnapshot>>;
}

#[cfg(test)]
pub struct InMemoryRepoMapStorage {
    inner: std::sync::Mutex<std::collections::HashMap<String, RepoMapSnapshot>>,
}

#[cfg(test)]
impl InMemoryRepoMapStorage {
    pub fn new() -> Self {
        Self {
            inner: std::sync::Mutex::new(std::collections::HashMap::new()),
        }
    }
}

#[cfg(test)]
impl RepoMapStorage for InMemoryRepoMapStorage {
    fn save(&self, snapshot: &RepoMapSnapshot) -> Result<()> {
        self.inner
            .lock()
            .unwrap()
            .insert(snapshot.repo_id.clone(), snapshot.clone());
        Ok(())
    }

    fn load(&self, repo_id: &str) -> Result<Option<RepoMapSnapshot>> {
        Ok(self.inner.lock().unwrap().get(repo_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_storage_roundtrip() {
        let storage = InMemoryRepoMapStorage::new();
        let snapshot = RepoMapSnapshot {
            repo_id: "repo".to_string(),
            snapshot_id: "v1".to_string(),
            nodes: std::collections::HashMap::new(),
            root_id: "root".to_string(),
            created_at: 0,
            total_metrics: Default::default(),
        };

        storage.save(&snapshot).unwrap();
        let loaded = storage.load("repo").unwrap();
        assert_eq!(loaded.unwrap().snapshot_id, "v1");
    }
}
