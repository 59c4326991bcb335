//! Git-status-derived change detection.
//!
//! Mirrors `layer-ir`'s `GitDifferentialAnalyzer` (commit-to-commit diffing
//! for differential taint analysis) but answers a different question: not
//! "what changed between two commits" but "what's dirty in the working tree
//! right now, relative to the index/HEAD" — the signal `IncrementalOrchestrator`
//! needs to decide which files to re-run through L1/L2/L3.

use std::path::{Path, PathBuf};

use git2::{Repository, Status, StatusOptions};

use crate::error::Result;

/// Files added, modified, or deleted in a repository's working tree,
/// relative to its current HEAD.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    pub added: Vec<PathBuf>,
    pub modified: Vec<PathBuf>,
    pub deleted: Vec<PathBuf>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.modified.is_empty() && self.deleted.is_empty()
    }

    pub fn len(&self) -> usize {
        self.added.len() + self.modified.len() + self.deleted.len()
    }

    /// Paths whose content should be (re-)read: everything but deletions.
    pub fn readable_paths(&self) -> impl Iterator<Item = &PathBuf> {
        self.added.iter().chain(self.modified.iter())
    }
}

/// Detects a `ChangeSet` from a repository's `git status`.
pub struct ChangeSetDetector {
    repo: Repository,
}

impl ChangeSetDetector {
    pub fn open(repo_path: impl AsRef<Path>) -> Result<Self> {
        let repo = Repository::open(repo_path.as_ref())?;
        Ok(Self { repo })
    }

    /// Compute the working-tree `ChangeSet` (staged and unstaged alike).
    pub fn detect(&self) -> Result<ChangeSet> {
        let mut opts = StatusOptions::new();
        opts.include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false);

        let statuses = self.repo.statuses(Some(&mut opts))?;

        let mut change_set = ChangeSet::default();
        for entry in statuses.iter() {
            let Some(path) = entry.path().map(PathBuf::from) else {
                continue;
            };
            let status = entry.status();

            if status.intersects(Status::INDEX_DELETED | Status::WT_DELETED) {
                change_set.deleted.push(path);
            } else if status.intersects(Status::INDEX_NEW | Status::WT_NEW) {
                change_set.added.push(path);
            } else if status.intersects(
                Status::INDEX_MODIFIED
                    | Status::WT_MODIFIED
                    | Status::INDEX_RENAMED
                    | Status::WT_RENAMED
                    | Status::INDEX_TYPECHANGE
                    | Status::WT_TYPECHANGE,
            ) {
                change_set.modified.push(path);
            }
        }

        Ok(change_set)
    }

    /// Repository working-directory root (`None` for a bare repository).
    pub fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::Command;

    fn init_repo() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        Command::new("git")
            .args(["init"])
            .current_dir(dir.path())
            .output()
            .unwrap();
        Command::new("git")
            .args(["config", "user.email", "test@test.com"])
            .current_dir(dir.path())
            .output()
            .unwrap();
        Command::new("git")
            .args(["config", "user.name", "Test"])
            .current_dir(dir.path())
            .output()
            .unwrap();
        dir
    }

    fn commit_all(dir: &Path, message: &str) {
        Command::new("git")
            .args(["add", "-A"])
            .current_dir(dir)
            .output()
            .unwrap();
        Command::new("git")
            .args(["commit", "-m", message])
            .current_dir(dir)
            .output()
            .unwrap();
    }

    #[test]
    fn test_detect_new_untracked_file() {
        let dir = init_repo();
        std::fs::write(dir.path().join("base.py"), "x = 1\n").unwrap();
        commit_all(dir.path(), "initial");

        std::fs::write(dir.path().join("new_module.py"), "y = 2\n").unwrap();

        let detector = ChangeSetDetector::open(dir.path()).unwrap();
        let change_set = detector.detect().unwrap();

        assert_eq!(change_set.added, vec![PathBuf::from("new_module.py")]);
        assert!(change_set.modified.is_empty());
        assert!(change_set.deleted.is_empty());
    }

    #[test]
    fn test_detect_modified_tracked_file() {
        let dir = init_repo();
        std::fs::write(dir.path().join("base.py"), "x = 1\n").unwrap();
        commit_all(dir.path(), "initial");

        std::fs::write(dir.path().join("base.py"), "x = 2\n").unwrap();

        let detector = ChangeSetDetector::open(dir.path()).unwrap();
        let change_set = detector.detect().unwrap();

        assert_eq!(change_set.modified, vec![PathBuf::from("base.py")]);
        assert!(change_set.added.is_empty());
    }

    #[test]
    fn test_detect_deleted_tracked_file() {
        let dir = init_repo();
        std::fs::write(dir.path().join("base.py"), "x = 1\n").unwrap();
        commit_all(dir.path(), "initial");

        std::fs::remove_file(dir.path().join("base.py")).unwrap();

        let detector = ChangeSetDetector::open(dir.path()).unwrap();
        let change_set = detector.detect().unwrap();

        assert_eq!(change_set.deleted, vec![PathBuf::from("base.py")]);
    }

    #[test]
    fn test_clean_worktree_yields_empty_change_set() {
        let dir = init_repo();
        std::fs::write(dir.path().join("base.py"), "x = 1\n").unwrap();
        commit_all(dir.path(), "initial");

        let detector = ChangeSetDetector::open(dir.path()).unwrap();
        let change_set = detector.detect().unwrap();

        assert!(change_set.is_empty());
    }

    #[test]
    fn test_readable_paths_excludes_deletions() {
        let change_set = ChangeSet {
            added: vec![PathBuf::from("a.py")],
            modified: vec![PathBuf::from("b.py")],
            deleted: vec![PathBuf::from("c.py")],
        };

        let readable: Vec<_> = change_set.readable_paths().collect();
        assert_eq!(readable.len(), 2);
        assert!(!readable.contains(&&PathBuf::from("c.py")));
    }

    #[test]
    fn test_open_rejects_non_repository() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ChangeSetDetector::open(dir.path()).is_err());
    }
}
