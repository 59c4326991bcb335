//! Build API: the in-memory entry point over the on-disk `IRIndexingOrchestrator`.
//!
//! Callers hand over file bytes directly (no repo checkout required); this
//! module stages them into a scratch directory so it can reuse the real
//! disk-based pipeline unchanged, then folds the result into `BuildResult`
//! together with a `Provenance` record computed from the `provenance`
//! feature's fingerprint helpers.

use std::collections::HashMap;
use std::path::PathBuf;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config::{PipelineConfig, Preset};
use crate::errors::{CodegraphError, Result};
use crate::features::ir_generation::domain::IRDocument;
use crate::features::provenance::{
    config_fingerprint, dependency_fingerprint, input_fingerprint, Provenance,
};
use crate::features::type_resolution::{
    CallGraphReturnSummarySolver, ReturnSummaryAnalyzer, ReturnSummaryResult, TypeResolutionConfig,
};
use crate::pipeline::{E2EPipelineConfig, IRIndexingOrchestrator, PipelineStats, RepoInfo};

/// Analysis depth, from cheapest (editor-time) to most complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SemanticTier {
    /// Parsing, chunking, lexical only — editor-latency budget.
    Editor,
    /// Adds cross-file resolution and flow graphs.
    Refactoring,
    /// Everything, including taint and repo-map.
    Analysis,
}

impl SemanticTier {
    fn preset(self) -> Preset {
        match self {
            SemanticTier::Editor => Preset::Fast,
            SemanticTier::Refactoring => Preset::Balanced,
            SemanticTier::Analysis => Preset::Thorough,
        }
    }
}

/// Layer flags and thresholds for one `build()` call.
///
/// Individually-named layers that map onto the same underlying pipeline
/// stage (`cfg`/`dfg`/`ssa`/`bfg` all ride on `flow_graphs`; `expressions`/
/// `generic_inference`/`heap_analysis` ride on `type_inference`) are kept as
/// separate fields here for call-site clarity but are OR'd together when
/// building the stage control — see `build()`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    pub tier: SemanticTier,
    pub cfg: bool,
    pub dfg: bool,
    pub ssa: bool,
    pub bfg: bool,
    pub expressions: bool,
    pub generic_inference: bool,
    pub heap_analysis: bool,
    pub taint_analysis: bool,
    pub occurrences: bool,
    pub lsp_enrichment: bool,
    pub cross_file: bool,
    pub retrieval_index: bool,
    pub diagnostics: bool,
    pub packages: bool,
    pub dfg_function_loc_threshold: usize,
    pub max_union_size: usize,
    pub complexity_threshold: usize,
    pub risk_threshold: f64,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            tier: SemanticTier::Refactoring,
            cfg: true,
            dfg: false,
            ssa: false,
            bfg: true,
            expressions: false,
            generic_inference: false,
            heap_analysis: false,
            taint_analysis: false,
            occurrences: true,
            lsp_enrichment: false,
            cross_file: true,
            retrieval_index: true,
            diagnostics: false,
            packages: false,
            dfg_function_loc_threshold: 500,
            max_union_size: 64,
            complexity_threshold: 10,
            risk_threshold: 0.7,
        }
    }
}

/// Output of `build()`: IR per file, the provenance artifact, and pipeline stats.
#[derive(Debug, Clone)]
pub struct BuildResult {
    pub ir_documents: HashMap<String, IRDocument>,
    /// Per-file bottom-up return-type summaries (L5 type resolution).
    pub return_summaries: HashMap<String, ReturnSummaryResult>,
    pub provenance: Provenance,
    pub stats: PipelineStats,
}

/// `builder_version` recorded in every `Provenance` this module produces.
pub const BUILDER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// The crates whose versions feed `dependency_fingerprint` — kept in sync
/// with `layer-ir`'s `Cargo.toml` parser/index dependencies by hand, since
/// there's no build-time access to the resolved lockfile here.
const TRACKED_DEPENDENCIES: &[(&str, &str)] = &[
    ("tree-sitter", "0.22"),
    ("tantivy", "0.22"),
];

/// Build IR for an in-memory set of files.
///
/// `files` are `(repo-relative path, content bytes)`. Non-UTF-8 files are
/// skipped (and logged) rather than failing the whole build, matching
/// `IRIndexingOrchestrator::read_files_parallel`'s `filter_map` behavior for
/// unreadable files.
pub fn build(files: &[(String, Vec<u8>)], config: &BuildConfig) -> Result<BuildResult> {
    let scratch = tempfile::tempdir().map_err(CodegraphError::Io)?;

    let mut decoded: Vec<(&str, &str)> = Vec::new();
    let mut owned_contents: Vec<(String, String)> = Vec::new();
    for (path, bytes) in files {
        match std::str::from_utf8(bytes) {
            Ok(content) => owned_contents.push((path.clone(), content.to_string())),
            Err(_) => {
                tracing::warn!("build(): skipping non-UTF-8 file {}", path);
            }
        }
    }

    let mut file_paths = Vec::with_capacity(owned_contents.len());
    for (path, content) in &owned_contents {
        let dest = scratch.path().join(path);
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent).map_err(CodegraphError::Io)?;
        }
        std::fs::write(&dest, content).map_err(CodegraphError::Io)?;
        file_paths.push(dest);
    }
    for (path, content) in &owned_contents {
        decoded.push((path.as_str(), content.as_str()));
    }

    let pipeline_config = PipelineConfig::preset(config.tier.preset())
        .stages(|mut stages| {
            stages.cross_file = config.cross_file;
            stages.flow_graphs = config.cfg || config.dfg || config.ssa || config.bfg;
            stages.type_inference =
                config.expressions || config.generic_inference || config.heap_analysis;
            stages.taint = config.taint_analysis;
            stages.lexical = config.retrieval_index;
            stages
        })
        .build()
        .map_err(|e| CodegraphError::config(e.to_string()))?;

    let e2e_config = E2EPipelineConfig {
        pipeline_config,
        repo_info: RepoInfo {
            repo_root: PathBuf::from(scratch.path()),
            repo_name: "in-memory-build".to_string(),
            file_paths: Some(file_paths),
            language_filter: None,
        },
        ..E2EPipelineConfig::default()
    };

    let orchestrator = IRIndexingOrchestrator::new(e2e_config);
    let result = orchestrator
        .execute()
        .map_err(|e| CodegraphError::Pipeline(e.to_string()))?;

    let config_json = serde_json::to_value(config)
        .map_err(|e| CodegraphError::Pipeline(format!("config serialization: {}", e)))?;

    let provenance = Provenance::new(
        input_fingerprint(decoded),
        config_fingerprint(&config_json),
        dependency_fingerprint(TRACKED_DEPENDENCIES.iter().copied()),
        BUILDER_VERSION,
        Utc::now(),
        0,
    );

    let summary_solver = CallGraphReturnSummarySolver::new(TypeResolutionConfig {
        max_union_size: config.max_union_size,
    });
    let return_summaries = result
        .ir_documents
        .iter()
        .map(|(path, doc)| (path.clone(), summary_solver.analyze(doc)))
        .collect();

    Ok(BuildResult {
        ir_documents: result.ir_documents,
        return_summaries,
        provenance,
        stats: result.stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_files() -> Vec<(String, Vec<u8>)> {
        vec![(
            "a.py".to_string(),
            b"def add(x, y):\n    return x + y\n".to_vec(),
        )]
    }

    #[test]
    fn test_build_produces_ir_document_per_file() {
        let result = build(&sample_files(), &BuildConfig::default()).unwrap();
        assert_eq!(result.stats.files_processed, 1);
        assert!(result.ir_documents.contains_key("a.py"));
    }

    #[test]
    fn test_build_is_deterministic_modulo_timestamp() {
        let files = sample_files();
        let config = BuildConfig::default();
        let r1 = build(&files, &config).unwrap();
        let r2 = build(&files, &config).unwrap();
        assert!(r1.provenance.deterministically_equal(&r2.provenance));
    }

    #[test]
    fn test_build_skips_non_utf8_file() {
        let files = vec![("bad.py".to_string(), vec![0xff, 0xfe, 0x00])];
        let result = build(&files, &BuildConfig::default()).unwrap();
        assert_eq!(result.stats.files_processed, 0);
    }

    #[test]
    fn test_build_computes_return_summary_per_file() {
        let result = build(&sample_files(), &BuildConfig::default()).unwrap();
        assert!(result.return_summaries.contains_key("a.py"));
    }
}
