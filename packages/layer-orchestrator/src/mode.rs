//! Indexing mode selection and cooperative cancellation.
//!
//! Neither existed in the teacher's retrieval pack; added so the orchestrator
//! can pick a run profile up front and so a long-running job can be stopped
//! between stage boundaries without killing the process.

use crate::error::{OrchestratorError, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Run profile for a repository indexing job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum IndexingMode {
    /// CI/CD-friendly, minimal stage set, tightest time budget.
    Fast,
    /// Default development profile.
    Balanced,
    /// Full stage set, no time budget.
    Deep,
    /// First-ever index of a repository: full scan, no reverse-dependency
    /// index to consult yet.
    Bootstrap,
    /// Re-running after a detected inconsistency (checkpoint/cache mismatch),
    /// forces a full rebuild of the affected stages even though a cache
    /// exists.
    Repair,
}

impl IndexingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fast => "fast",
            Self::Balanced => "balanced",
            Self::Deep => "deep",
            Self::Bootstrap => "bootstrap",
            Self::Repair => "repair",
        }
    }

    /// Whether a cached global context from a prior run may be trusted.
    pub fn allows_incremental(&self) -> bool {
        !matches!(self, Self::Bootstrap | Self::Repair)
    }
}

impl std::fmt::Display for IndexingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Signals the mode selector consults. `Repair` is never auto-selected from
/// these — it's triggered out-of-band when a caller detects a checkpoint or
/// cache mismatch and re-runs the job with a fixed `IndexingMode::Repair`.
#[derive(Debug, Clone, Copy)]
pub struct ModeSignals {
    /// Whether a prior snapshot (and therefore a reverse-dependency index to
    /// incrementally build against) exists for this repository at all.
    pub has_prior_snapshot: bool,
    /// Number of files the change detector reports as added/modified/deleted
    /// since the prior snapshot.
    pub changed_file_count: usize,
    /// Time elapsed since the last `Balanced`-or-deeper run for this
    /// repository. `None` if no such run is on record.
    pub idle_since_last_balanced: Option<std::time::Duration>,
}

/// Thresholds the mode selector compares `ModeSignals` against.
#[derive(Debug, Clone, Copy)]
pub struct ModeSelectionConfig {
    /// Changed-file count at or above which a run is promoted to `Balanced`.
    pub change_count_threshold: usize,
    /// Idle duration since the last `Balanced` run at or above which a run
    /// is promoted to `Balanced`, even with few changes (picks up drift the
    /// incremental index may have missed).
    pub idle_threshold: std::time::Duration,
}

impl Default for ModeSelectionConfig {
    fn default() -> Self {
        Self {
            change_count_threshold: 50,
            idle_threshold: std::time::Duration::from_secs(24 * 60 * 60),
        }
    }
}

/// Auto-selects a run profile from signals: no prior snapshot means there's
/// nothing to incrementally build against (`Bootstrap`); a large changeset
/// or enough idle time since the last `Balanced` run means the cheap `Fast`
/// path risks drifting from ground truth (`Balanced`); otherwise `Fast`.
/// `Deep` and `Repair` are never returned here — both are operator-requested
/// overrides, not something inferred from ordinary change volume.
pub fn select_mode(signals: ModeSignals, config: &ModeSelectionConfig) -> IndexingMode {
    if !signals.has_prior_snapshot {
        return IndexingMode::Bootstrap;
    }

    if signals.changed_file_count >= config.change_count_threshold {
        return IndexingMode::Balanced;
    }

    if let Some(idle) = signals.idle_since_last_balanced {
        if idle >= config.idle_threshold {
            return IndexingMode::Balanced;
        }
    }

    IndexingMode::Fast
}

/// Cooperative cancellation signal shared between a job's caller and its
/// running stages. Checked at stage boundaries (see `job.rs`'s state
/// machine transitions) rather than threaded into per-file inner loops.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Returns `Err(OrchestratorError::Cancelled)` if cancellation has been
    /// requested; call at each stage boundary.
    pub fn check(&self, stage: &str) -> Result<()> {
        if self.is_cancelled() {
            Err(OrchestratorError::Cancelled(stage.to_string()))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indexing_mode_allows_incremental() {
        assert!(IndexingMode::Fast.allows_incremental());
        assert!(IndexingMode::Balanced.allows_incremental());
        assert!(IndexingMode::Deep.allows_incremental());
        assert!(!IndexingMode::Bootstrap.allows_incremental());
        assert!(!IndexingMode::Repair.allows_incremental());
    }

    #[test]
    fn test_cancellation_token() {
        let token = CancellationToken::new();
        assert!(token.check("L1_IR").is_ok());

        token.cancel();
        assert!(token.is_cancelled());
        assert!(token.check("L2_Chunk").is_err());
    }

    #[test]
    fn test_cancellation_token_shared_across_clones() {
        let token = CancellationToken::new();
        let clone = token.clone();

        clone.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_select_mode_bootstrap_without_prior_snapshot() {
        let signals = ModeSignals {
            has_prior_snapshot: false,
            changed_file_count: 0,
            idle_since_last_balanced: None,
        };
        assert_eq!(
            select_mode(signals, &ModeSelectionConfig::default()),
            IndexingMode::Bootstrap
        );
    }

    #[test]
    fn test_select_mode_balanced_on_large_changeset() {
        let config = ModeSelectionConfig::default();
        let signals = ModeSignals {
            has_prior_snapshot: true,
            changed_file_count: config.change_count_threshold,
            idle_since_last_balanced: Some(std::time::Duration::from_secs(60)),
        };
        assert_eq!(select_mode(signals, &config), IndexingMode::Balanced);
    }

    #[test]
    fn test_select_mode_balanced_on_stale_idle_duration() {
        let config = ModeSelectionConfig::default();
        let signals = ModeSignals {
            has_prior_snapshot: true,
            changed_file_count: 1,
            idle_since_last_balanced: Some(config.idle_threshold),
        };
        assert_eq!(select_mode(signals, &config), IndexingMode::Balanced);
    }

    #[test]
    fn test_select_mode_fast_for_small_recent_change() {
        let config = ModeSelectionConfig::default();
        let signals = ModeSignals {
            has_prior_snapshot: true,
            changed_file_count: 1,
            idle_since_last_balanced: Some(std::time::Duration::from_secs(60)),
        };
        assert_eq!(select_mode(signals, &config), IndexingMode::Fast);
    }

    #[test]
    fn test_select_mode_fast_with_no_idle_record() {
        let config = ModeSelectionConfig::default();
        let signals = ModeSignals {
            has_prior_snapshot: true,
            changed_file_count: 1,
            idle_since_last_balanced: None,
        };
        assert_eq!(select_mode(signals, &config), IndexingMode::Fast);
    }
}
