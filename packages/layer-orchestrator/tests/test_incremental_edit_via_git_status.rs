//! Incremental-edit integration test: one function body edit in one file,
//! run through the git-status-derived change set and Fast mode selection.

use layer_orchestrator::{
    select_mode, CheckpointManager, IncrementalOrchestrator, IndexingMode, ModeSelectionConfig,
    ModeSignals,
};
use std::process::Command;
use std::sync::Arc;
use tempfile::TempDir;
use uuid::Uuid;

fn init_repo() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for args in [
        vec!["init"],
        vec!["config", "user.email", "test@test.com"],
        vec!["config", "user.name", "Test"],
    ] {
        Command::new("git")
            .args(&args)
            .current_dir(dir.path())
            .output()
            .unwrap();
    }
    dir
}

fn commit_all(dir: &std::path::Path, message: &str) {
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

#[tokio::test]
async fn test_incremental_edit_only_touches_changed_file() {
    let dir = init_repo();

    std::fs::write(
        dir.path().join("base.py"),
        "def helper():\n    return \"original\"\n",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("main.py"),
        "from base import helper\n\ndef main():\n    return helper()\n",
    )
    .unwrap();
    commit_all(dir.path(), "initial");

    let checkpoint_mgr = Arc::new(CheckpointManager::new_in_memory());
    let mut orch = IncrementalOrchestrator::new(checkpoint_mgr.clone());

    // Full build establishes the cached global context the git-status path
    // needs to diff against.
    let full_result = orch
        .incremental_update_from_git_status(
            dir.path(),
            Uuid::new_v4(),
            "edit-repo",
            "snapshot-1",
            None,
        )
        .await
        .expect("full build via git status failed");
    assert_eq!(full_result.total_files, 2);

    // Edit one function's body.
    std::fs::write(
        dir.path().join("base.py"),
        "def helper():\n    return \"modified\"\n",
    )
    .unwrap();

    let cache_key = "global_context:edit-repo:snapshot-1".to_string();
    let existing_cache = checkpoint_mgr
        .load_checkpoint(&cache_key)
        .await
        .expect("load checkpoint failed")
        .expect("no cached global context");

    let incremental_result = orch
        .incremental_update_from_git_status(
            dir.path(),
            Uuid::new_v4(),
            "edit-repo",
            "snapshot-2",
            Some(existing_cache),
        )
        .await
        .expect("incremental update via git status failed");

    // Only base.py should have been picked up as changed by git status.
    assert_eq!(incremental_result.changed_files, vec!["base.py".to_string()]);
    assert_eq!(incremental_result.total_files, 2);
}

#[tokio::test]
async fn test_mode_selection_follows_change_volume() {
    let dir = init_repo();
    std::fs::write(dir.path().join("a.py"), "x = 1\n").unwrap();
    commit_all(dir.path(), "initial");

    // No prior snapshot at all -> Bootstrap, regardless of change volume.
    let bootstrap_signals = ModeSignals {
        has_prior_snapshot: false,
        changed_file_count: 0,
        idle_since_last_balanced: None,
    };
    assert_eq!(
        select_mode(bootstrap_signals, &ModeSelectionConfig::default()),
        IndexingMode::Bootstrap
    );

    // A single-file edit against an existing snapshot stays Fast.
    let single_file_signals = ModeSignals {
        has_prior_snapshot: true,
        changed_file_count: 1,
        idle_since_last_balanced: Some(std::time::Duration::from_secs(60)),
    };
    assert_eq!(
        select_mode(single_file_signals, &ModeSelectionConfig::default()),
        IndexingMode::Fast
    );

    // Past the change-count threshold promotes to Balanced.
    let large_changeset_signals = ModeSignals {
        has_prior_snapshot: true,
        changed_file_count: 200,
        idle_since_last_balanced: Some(std::time::Duration::from_secs(60)),
    };
    assert_eq!(
        select_mode(large_changeset_signals, &ModeSelectionConfig::default()),
        IndexingMode::Balanced
    );
}
