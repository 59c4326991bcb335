//! IR Indexing Pipeline Orchestrator
//!
//! Orchestrates L1-L16 IR indexing stages across an entire repository.
//!
//! Performance optimizations:
//! - Rayon parallel processing (configurable workers)
//! - DashMap for lock-free cross-file resolution
//! - Single GIL release for entire repository
//! - Zero-copy data sharing between stages
//! - Batch processing for memory efficiency
//! - DAG-based stage execution with parallel L2-L5
//!
//! Architecture:
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                 IRIndexingOrchestrator.execute()                │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  1. Collect files (scan or incremental list)                   │
//! │  2. L1: IR Build (parallel per-file) ──────────┐               │
//! │  3. After L1 completes:                        │               │
//! │     ├── L2: Chunking ────────────────────────┐ │ (parallel!)   │
//! │     ├── L3: CrossFile ───────────────────────┤ │               │
//! │     ├── L4: Occurrences ─────────────────────┤ │               │
//! │     ├── L5: Symbols ─────────────────────────┤ │               │
//! │     └── L14: Taint Fixpoint ─────────────────┘ │               │
//! │  4. Aggregate results                                          │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use super::dag::{PipelineDAG, StageId};
use super::stages::TaintSummary;
use super::{E2EPipelineConfig, E2EPipelineResult, PipelineStats};
use crate::features::chunking::{
    BuildChunksInput, ChunkKind, ChunkingUseCase, ChunkingUseCaseImpl,
};
use crate::features::cross_file::{
    build_global_context, GlobalContextResult, IRDocument as CrossFileIRDocument,
};
use crate::features::lexical::{FileToIndex, IndexingMode, TantivyLexicalIndex};
use crate::features::query_engine::{QueryEngine, QueryEngineStats};
use crate::pipeline::processor::{process_file, process_python_file, ProcessResult};
use crate::shared::models::{CodegraphError, Edge, Node, Occurrence};

use crate::features::chunking::domain::Chunk as ChunkingChunk;
use crate::features::repomap::infrastructure::{
    GraphDocument, GraphEdge, GraphNode, PageRankEngine, PageRankSettings,
};
use crate::features::repomap::{
    ImportanceWeights, NodeKind as RepoMapNodeKind, RepoMapTreeBuilder,
};
use crate::pipeline::end_to_end_result::{RepoMapNodeSummary, RepoMapSnapshotSummary};

use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Instant;

/// Stage execution output
///
/// Contains all potential outputs from a pipeline stage.
/// Only the fields relevant to that stage will be populated.
#[derive(Default)]
struct StageOutput {
    pub chunks: Option<Vec<super::end_to_end_result::Chunk>>,
    pub symbols: Option<Vec<super::end_to_end_result::Symbol>>,
    pub taint_results: Option<Vec<super::stages::TaintSummary>>,
    pub repomap_snapshot: Option<RepoMapSnapshotSummary>,
    pub query_engine_stats: Option<QueryEngineStats>,
}

// ============================================================================
// UseCase Traits (SOLID D: Dependency Inversion)
// ============================================================================
use super::usecase_traits::{TaintAnalysisInput, TaintAnalysisUseCaseImpl, TaintUseCase};
use crate::config::stage_configs::{ChunkingConfig, TaintConfig};

/// IR Indexing Pipeline Orchestrator
///
/// This orchestrator executes the full IR indexing pipeline (L1-L16) for a repository
/// in a single Rust execution, releasing the GIL only once for maximum performance.
///
/// # SOLID Principles
/// - **S**: Single orchestration responsibility
/// - **O**: Open for extension via Builder pattern
/// - **L**: UseCase implementations are substitutable
/// - **I**: Small, focused UseCase traits
/// - **D**: Depends on abstractions (traits), not concretions
///
/// # Stages
/// - **L1**: IR Build - Parse files and generate IR (nodes, edges)
/// - **L2**: Chunking - Create searchable chunks from IR
/// - **L3**: CrossFile - Resolve imports and cross-file references
/// - **L4**: Occurrences - Generate SCIP occurrences
/// - **L5**: Symbols - Extract symbols for navigation
/// - **L14**: Taint - Monotone worklist taint fixpoint
/// - **L16**: RepoMap - Repository structure with PageRank importance
pub struct IRIndexingOrchestrator<T = TaintAnalysisUseCaseImpl>
where
    T: TaintUseCase,
{
    config: E2EPipelineConfig,

    /// Lexical search index (optional)
    lexical_index: Option<Arc<Mutex<TantivyLexicalIndex>>>,

    // ============================================================
    // UseCase Instances (DI - injected or defaulted)
    // ============================================================

    /// L2: Chunking UseCase
    chunking_usecase: ChunkingUseCaseImpl,

    /// L14: Taint Analysis UseCase (trait-based)
    taint_usecase: T,
}

/// Type alias for backward compatibility (default implementations)
pub type E2EOrchestrator = IRIndexingOrchestrator<TaintAnalysisUseCaseImpl>;

impl IRIndexingOrchestrator<TaintAnalysisUseCaseImpl> {
    /// Create new orchestrator with default UseCases
    ///
    /// For production use. Uses default implementations of all UseCases.
    ///
    /// # Example
    /// ```rust,ignore
    /// let orchestrator = IRIndexingOrchestrator::new(config);
    /// let result = orchestrator.execute()?;
    /// ```
    pub fn new(config: E2EPipelineConfig) -> Self {
        // Extract stage configs from RFC-001 ValidatedConfig
        let preset = config.pipeline_config.as_inner().preset;
        let chunking_config = config.pipeline_config.chunking()
            .unwrap_or_else(|| ChunkingConfig::from_preset(preset));
        let taint_config = config.pipeline_config.taint()
            .unwrap_or_else(|| TaintConfig::from_preset(preset));

        Self {
            config,
            lexical_index: None,
            chunking_usecase: ChunkingUseCaseImpl::with_config(chunking_config),
            taint_usecase: TaintAnalysisUseCaseImpl::new(taint_config),
        }
    }

    /// Create a builder for custom UseCase injection
    ///
    /// For testing or custom implementations.
    ///
    /// # Example
    /// ```rust,ignore
    /// let orchestrator = IRIndexingOrchestrator::builder(config)
    ///     .with_taint_usecase(MockTaintUseCase::new())
    ///     .build();
    /// ```
    pub fn builder(config: E2EPipelineConfig) -> OrchestratorBuilder {
        OrchestratorBuilder::new(config)
    }
}

impl<T> IRIndexingOrchestrator<T>
where
    T: TaintUseCase,
{
    /// Create orchestrator with custom UseCases (full DI)
    pub fn with_usecases(config: E2EPipelineConfig, taint_usecase: T) -> Self {
        let preset = config.pipeline_config.as_inner().preset;
        let chunking_config = config.pipeline_config.chunking()
            .unwrap_or_else(|| ChunkingConfig::from_preset(preset));

        Self {
            config,
            lexical_index: None,
            chunking_usecase: ChunkingUseCaseImpl::with_config(chunking_config),
            taint_usecase,
        }
    }
}

// ============================================================================
// Builder Pattern for Flexible DI
// ============================================================================

/// Builder for IRIndexingOrchestrator with custom UseCase injection
pub struct OrchestratorBuilder {
    config: E2EPipelineConfig,
    taint_usecase: Option<Box<dyn TaintUseCase>>,
}

impl OrchestratorBuilder {
    pub fn new(config: E2EPipelineConfig) -> Self {
        Self {
            config,
            taint_usecase: None,
        }
    }

    /// Inject custom Taint UseCase
    pub fn with_taint_usecase(mut self, usecase: impl TaintUseCase + 'static) -> Self {
        self.taint_usecase = Some(Box::new(usecase));
        self
    }

    /// Build orchestrator with boxed trait objects
    pub fn build(self) -> IRIndexingOrchestratorDyn {
        // Extract stage configs for default UseCases
        let preset = self.config.pipeline_config.as_inner().preset;
        let chunking_config = self.config.pipeline_config.chunking()
            .unwrap_or_else(|| ChunkingConfig::from_preset(preset));
        let taint_config = self.config.pipeline_config.taint()
            .unwrap_or_else(|| TaintConfig::from_preset(preset));

        IRIndexingOrchestratorDyn {
            config: self.config,
            lexical_index: None,
            chunking_usecase: ChunkingUseCaseImpl::with_config(chunking_config),
            taint_usecase: self.taint_usecase.unwrap_or_else(|| Box::new(TaintAnalysisUseCaseImpl::new(taint_config))),
        }
    }
}

/// Dynamic dispatch version for maximum flexibility (testing)
pub struct IRIndexingOrchestratorDyn {
    config: E2EPipelineConfig,
    lexical_index: Option<Arc<Mutex<TantivyLexicalIndex>>>,
    chunking_usecase: ChunkingUseCaseImpl,
    taint_usecase: Box<dyn TaintUseCase>,
}

// ============================================================================
// Main Implementation
// ============================================================================

impl<T> IRIndexingOrchestrator<T>
where
    T: TaintUseCase,
{
    /// Initialize orchestrator with lexical index
    ///
    /// # Example
    /// ```ignore
    /// let chunk_store = Arc::new(SqliteChunkStore::in_memory()?);
    /// let orchestrator = IRIndexingOrchestrator::new(config)
    ///     .with_lexical_index(
    ///         &PathBuf::from("./tantivy_index"),
    ///         chunk_store,
    ///         "my_repo".to_string(),
    ///     )?;
    /// ```
    // Temporarily disabled due to PostgresChunkStore dependency
    // pub fn with_lexical_index(
    //     mut self,
    //     index_dir: &Path,
    //     chunk_store: Arc<PostgresChunkStore>,
    //     repo_id: String,
    // ) -> Result<Self, CodegraphError> {
    //     let index = TantivyLexicalIndex::new(
    //         index_dir,
    //         chunk_store,
    //         repo_id,
    //         IndexingMode::Balanced,
    //     ).map_err(|e| CodegraphError::internal(
    //         format!("Failed to create lexical index: {:?}", e)
    //     ))?;

    //     self.lexical_index = Some(Arc::new(Mutex::new(index)));
    //     Ok(self)
    // }

    /// Execute the full pipeline
    ///
    /// This is the main entry point that orchestrates:
    /// 1. **L1: IR Build** - Parse files and generate IR (nodes, edges, types)
    /// 2. **L2: Chunking** - Create searchable chunks from IR
    /// 3. **L3: Cross-file** - Resolve imports and cross-file references
    /// 4. **L4: Occurrences** - Generate SCIP occurrences
    /// 5. **L5: Symbols** - Extract symbols for navigation
    ///
    /// # Performance characteristics
    /// - Parallel processing: Uses Rayon with configurable workers
    /// - Batch size: Configurable (default 100 files per batch)
    ///
    /// # Example
    /// ```ignore
    /// let config = E2EPipelineConfig::default();
    /// let orchestrator = IRIndexingOrchestrator::new(config);
    /// let result = orchestrator.execute()?;
    /// println!("Processed {} files in {:?}", result.stats.files_processed, result.stats.total_duration);
    /// ```
    pub fn execute(&self) -> Result<E2EPipelineResult, CodegraphError> {
        let total_start = Instant::now();
        let mut stats = PipelineStats::new();

        // Step 1: Collect files to process
        let files = self.collect_files()?;
        stats.files_processed = files.len();

        if files.is_empty() {
            stats.total_duration = total_start.elapsed();
            return Ok(E2EPipelineResult {
                stats,
                ..Default::default()
            });
        }

        // Step 2: Read file contents (parallel)
        let file_contents = self.read_files_parallel(&files)?;

        // Step 3: L1 - IR Build (parallel per-file)
        let l1_start = Instant::now();
        let ir_results = self.execute_l1_ir_build(&file_contents)?;
        let l1_duration = l1_start.elapsed();
        stats.record_stage("L1_IR_Build", l1_duration);

        // Aggregate L1 results
        let (all_nodes, all_edges, all_occurrences, file_ir_map) =
            self.aggregate_l1_results(&ir_results);
        stats.total_loc = file_contents.iter().map(|f| f.2.lines().count()).sum();

        // ═══════════════════════════════════════════════════════════════════
        // DAG-BASED PIPELINE EXECUTION (L2-L16)
        // ═══════════════════════════════════════════════════════════════════
        // Build DAG for all stages except L1 (already completed)
        let enabled_stages = self.get_enabled_stages();
        let mut dag = PipelineDAG::build(&enabled_stages);

        // Mark L1 as completed
        dag.process_completion(StageId::L1IrBuild, true, l1_duration);

        // Initialize result containers (will be populated by stage execution)
        let mut chunks = Vec::new();
        let mut symbols = Vec::new();
        let mut taint_results = Vec::new();
        let mut repomap_snapshot: Option<RepoMapSnapshotSummary> = None;
        let mut query_engine_stats = None;

        // Track completed stages for get_parallel_stages()
        let mut completed_stages = vec![StageId::L1IrBuild];

        // DAG execution loop: run until all stages complete
        while !dag.is_complete() {
            // Get stages that are ready to execute (dependencies satisfied)
            let ready_stages = dag.get_parallel_stages(&completed_stages);

            if ready_stages.is_empty() {
                // No more stages can execute - check for failures
                let failed_count = dag
                    .stages
                    .values()
                    .filter(|s| s.state == super::dag::StageState::Failed)
                    .count();
                if failed_count > 0 {
                    eprintln!("[DAG] Pipeline stopped: {} stages failed", failed_count);
                }
                break;
            }

            eprintln!(
                "[DAG] Executing {} stages in parallel: {:?}",
                ready_stages.len(),
                ready_stages
            );

            // Execute ready stages in parallel with Rayon
            let stage_results: Vec<_> = ready_stages
                .par_iter()
                .map(|&stage_id| {
                    let start = Instant::now();
                    let result = self.execute_stage(
                        stage_id,
                        &all_nodes,
                        &all_edges,
                        &file_contents,
                        &file_ir_map,
                        &chunks, // Pass chunks for L16RepoMap dependency
                    );
                    (stage_id, start.elapsed(), result)
                })
                .collect();

            // Process results and update DAG states
            for (stage_id, duration, result) in stage_results {
                match result {
                    Ok(stage_output) => {
                        // Extract outputs based on stage type
                        match stage_id {
                            StageId::L2Chunking => {
                                if let Some(c) = stage_output.chunks {
                                    chunks = c;
                                }
                            }
                            StageId::L5Symbols => {
                                if let Some(s) = stage_output.symbols {
                                    symbols = s;
                                }
                            }
                            StageId::L14TaintAnalysis => {
                                if let Some(t) = stage_output.taint_results {
                                    taint_results = t;
                                }
                            }
                            StageId::L16RepoMap => {
                                repomap_snapshot = stage_output.repomap_snapshot;
                            }
                            StageId::L37QueryEngine => {
                                query_engine_stats = stage_output.query_engine_stats;
                            }
                            _ => {
                                // Other stages (L2.5, L3, L4) don't have specific outputs
                            }
                        }

                        // Record timing and mark completed
                        stats.record_stage(stage_id.name(), duration);
                        dag.process_completion(stage_id, true, duration);
                        completed_stages.push(stage_id);

                        eprintln!("[DAG] ✅ {} completed in {:?}", stage_id.name(), duration);
                    }
                    Err(e) => {
                        // Stage failed - mark as failed in DAG
                        eprintln!("[DAG] ❌ {} failed: {}", stage_id.name(), e);
                        stats.record_stage(stage_id.name(), duration);
                        dag.process_completion(stage_id, false, duration);
                        // Don't add to completed_stages - stage failed
                    }
                }
            }
        }

        eprintln!(
            "[DAG] Pipeline execution complete: {} stages succeeded",
            dag.stages
                .values()
                .filter(|s| s.state == super::dag::StageState::Succeeded)
                .count()
        );

        // Finalize stats
        stats.total_duration = total_start.elapsed();
        stats.calculate_rate();
        stats.calculate_cache_hit_rate();

        // ===================================================================
        // AGGREGATE ANALYSIS RESULTS FROM ALL FILES
        // ===================================================================
        let mut all_cfg_edges = Vec::new();
        let mut all_bfg_graphs = Vec::new();
        let all_types = Vec::new();
        let mut all_dfg_graphs = Vec::new();
        let mut all_ssa_graphs = Vec::new();
        let mut ir_documents = HashMap::new();

        for (file_path, process_result) in &file_ir_map {
            // Aggregate BFG and CFG from ProcessResult
            all_bfg_graphs.extend(process_result.bfg_graphs.iter().map(|bfg| {
                super::end_to_end_result::BFGSummary {
                    function_id: bfg.function_id.clone(),
                    file_path: file_path.clone(),
                    block_count: bfg.blocks.len(),
                    edge_count: 0, // BFG doesn't store edges explicitly
                    entry_block: Some(bfg.entry_block_id.clone()),
                    exit_blocks: vec![bfg.exit_block_id.clone()],
                    cyclomatic_complexity: 1, // Simplified: 1 + decision nodes (not computed in BFG)
                }
            }));
            all_cfg_edges.extend(process_result.cfg_edges.iter().map(|edge| {
                // Infer function_id from block_id (format: "bfg:function_name:...")
                let function_id = edge
                    .source_block_id
                    .split(':')
                    .nth(1)
                    .unwrap_or("unknown")
                    .to_string();

                super::end_to_end_result::CFGEdgeSummary {
                    function_id,
                    source_block: edge.source_block_id.clone(),
                    target_block: edge.target_block_id.clone(),
                    kind: format!("{:?}", edge.edge_type),
                }
            }));

            // Aggregate flow analysis results from ProcessResult
            all_dfg_graphs.extend(process_result.dfg_graphs.iter().map(|dfg| {
                super::end_to_end_result::DFGSummary {
                    function_id: dfg.function_id.clone(),
                    file_path: file_path.clone(),
                    def_count: dfg.nodes.iter().filter(|n| n.is_definition).count(),
                    use_count: dfg.nodes.iter().filter(|n| !n.is_definition).count(),
                    def_use_edges: dfg.def_use_edges.len(),
                    variables: dfg
                        .nodes
                        .iter()
                        .map(|n| n.variable_name.clone())
                        .collect::<std::collections::HashSet<_>>()
                        .into_iter()
                        .collect(),
                }
            }));

            all_ssa_graphs.extend(process_result.ssa_graphs.iter().map(|ssa| {
                super::end_to_end_result::SSASummary {
                    function_id: ssa.function_id.clone(),
                    file_path: file_path.clone(),
                    version_count: ssa.variables.len(),
                    phi_node_count: ssa.phi_nodes.len(),
                    multi_def_variables: ssa
                        .phi_nodes
                        .iter()
                        .map(|phi| phi.variable.clone())
                        .collect(),
                }
            }));

            // Convert to IRDocument for cross-file context
            let ir_doc = CrossFileIRDocument {
                file_path: file_path.clone(),
                nodes: process_result.nodes.clone(),
                edges: process_result.edges.clone(),
                repo_id: Some(self.config.repo_info.repo_name.clone()),
            };
            ir_documents.insert(file_path.clone(), ir_doc);
        }
        let _cross_file_context = if self.config.pipeline_config.as_inner().stages.cross_file {
            let ir_docs: Vec<_> = ir_documents.values().cloned().collect();
            build_global_context(ir_docs)
        } else {
            GlobalContextResult::default()
        };

        Ok(E2EPipelineResult {
            nodes: all_nodes,
            edges: all_edges,
            chunks,
            symbols,
            occurrences: all_occurrences,
            cross_file_context: None, // TODO: Convert GlobalContextResult to CrossFileContext
            cfg_edges: all_cfg_edges,
            bfg_graphs: all_bfg_graphs,
            types: all_types,
            dfg_graphs: all_dfg_graphs,
            ssa_graphs: all_ssa_graphs,
            taint_results,
            ir_documents: ir_documents
                .iter()
                .map(|(file_path, doc)| {
                    (
                        file_path.clone(),
                        crate::features::ir_generation::domain::IRDocument {
                            file_path: doc.file_path.clone(),
                            nodes: doc.nodes.clone(),
                            edges: doc.edges.clone(),
                        },
                    )
                })
                .collect(),
            repomap_snapshot,    // L16 RepoMap result
            query_engine_stats,  // L37 Query Engine stats
            stats,
        })
    }

    /// Execute a single pipeline stage
    ///
    /// Dispatcher method that routes each StageId to its corresponding execute method.
    /// Returns a StageOutput containing all potential outputs for that stage.
    ///
    /// Note: Some stages (like L16RepoMap) depend on outputs from previous stages.
    /// The chunks parameter provides access to L2Chunking results.
    fn execute_stage(
        &self,
        stage_id: StageId,
        all_nodes: &[Node],
        _all_edges: &[Edge],
        file_contents: &[(String, String, String)],
        file_ir_map: &HashMap<String, &ProcessResult>,
        chunks: &[super::end_to_end_result::Chunk], // Needed for L16RepoMap
    ) -> Result<StageOutput, CodegraphError> {
        let mut output = StageOutput::default();

        match stage_id {
            StageId::L1IrBuild => {
                // L1 is executed separately before DAG loop
                // This should never be called
                return Err(CodegraphError::internal(
                    "L1IrBuild should not be executed via DAG loop",
                ));
            }
            StageId::L2Chunking => {
                let chunks = self.execute_l2_chunking(all_nodes, file_contents)?;
                output.chunks = Some(chunks);
            }
            StageId::L2_5Lexical => {
                self.execute_l2_5_lexical(file_contents)?;
                // No output - lexical index is updated in place
            }
            StageId::L3CrossFile => {
                self.execute_l3_cross_file(file_ir_map)?;
                // No output - cross-file resolution happens in place
            }
            StageId::L4Occurrences => {
                // Occurrences are generated in L1 (ProcessResult)
                // Nothing to do here
            }
            StageId::L5Symbols => {
                let symbols = self.execute_l5_symbols(all_nodes)?;
                output.symbols = Some(symbols);
            }
            StageId::L14TaintAnalysis => {
                // Execute repository-wide taint analysis
                let taint_summaries = self.execute_l14_taint_analysis(file_ir_map)?;
                output.taint_results = Some(taint_summaries);
                eprintln!(
                    "[L14 TaintAnalysis] Detected {} taint flows",
                    output.taint_results.as_ref().map(|t| t.len()).unwrap_or(0)
                );
            }
            StageId::L16RepoMap => {
                // Depends on L2Chunking output
                if !chunks.is_empty() {
                    let snapshot =
                        self.execute_l16_repomap(chunks, &self.config.repo_info.repo_name)?;
                    output.repomap_snapshot = Some(snapshot);
                } else {
                    eprintln!("[L16 RepoMap] Warning: No chunks available, skipping");
                }
            }
            StageId::L37QueryEngine => {
                let qe_stats = self.execute_l37_query_engine(file_ir_map)?;
                output.query_engine_stats = Some(qe_stats);
            }
        }

        Ok(output)
    }

    /// Get enabled stages based on configuration
    fn get_enabled_stages(&self) -> Vec<StageId> {
        let mut stages = vec![];
        let stage_config = &self.config.pipeline_config.as_inner().stages;

        // Phase 1: Foundation
        stages.push(StageId::L1IrBuild); // Always enabled

        // Phase 2: Basic Analysis (parallel after L1)
        if stage_config.chunking {
            stages.push(StageId::L2Chunking);
        }
        if stage_config.lexical {
            stages.push(StageId::L2_5Lexical);
        }
        if stage_config.cross_file {
            stages.push(StageId::L3CrossFile);
        }
        // FIXME: occurrences stage not in RFC-001, map to symbols for now
        if stage_config.symbols {
            stages.push(StageId::L4Occurrences);
        }
        if stage_config.symbols {
            stages.push(StageId::L5Symbols);
        }

        // Phase 3: Whole-program analysis (depends on Phase 2)
        if stage_config.taint {
            stages.push(StageId::L14TaintAnalysis);
        }
        if stage_config.repomap {
            stages.push(StageId::L16RepoMap);
        }
        // FIXME: query_engine stage not in RFC-001
        // if stage_config.query_engine {
        //     stages.push(StageId::L37QueryEngine);
        // }

        stages
    }

    /// Read files in parallel
    fn read_files_parallel(
        &self,
        files: &[PathBuf],
    ) -> Result<Vec<(String, String, String)>, CodegraphError> {
        // (file_path, module_path, content)
        let repo_root = &self.config.repo_info.repo_root;

        let results: Vec<_> = files
            .par_iter()
            .filter_map(|path| {
                let content = std::fs::read_to_string(path).ok()?;
                let file_path = path
                    .strip_prefix(repo_root)
                    .unwrap_or(path)
                    .to_string_lossy()
                    .to_string();
                let module_path = self.file_to_module_path(&file_path);
                Some((file_path, module_path, content))
            })
            .collect();

        Ok(results)
    }

    /// Convert file path to module path
    fn file_to_module_path(&self, file_path: &str) -> String {
        file_path
            .trim_end_matches(".py")
            .trim_end_matches(".rs")
            .trim_end_matches(".js")
            .trim_end_matches(".ts")
            .trim_end_matches(".kt")
            .trim_end_matches(".java")
            .trim_end_matches(".go")
            .replace(['/', '\\'], ".")
    }

    /// L1: IR Build - Parse and generate IR for all files
    ///
    /// Uses multi-language processing: automatically detects language from file extension
    /// and uses the appropriate LanguagePlugin for parsing.
    ///
    /// Supported: Python, Java, TypeScript, JavaScript, Kotlin, Rust, Go
    fn execute_l1_ir_build(
        &self,
        files: &[(String, String, String)],
    ) -> Result<Vec<(String, ProcessResult)>, CodegraphError> {
        let repo_id = &self.config.repo_info.repo_name;

        let results: Vec<_> = files
            .par_iter()
            .map(|(file_path, module_path, content)| {
                // Detect language and use appropriate processor
                // Python files get the optimized process_python_file path with per-function BFG
                let result = if file_path.ends_with(".py") {
                    process_python_file(content, repo_id, file_path, module_path)
                } else {
                    // Use multi-language process_file for other languages
                    process_file(content, repo_id, file_path, module_path)
                };
                (file_path.clone(), result)
            })
            .collect();

        Ok(results)
    }

    /// Aggregate L1 results from all files
    fn aggregate_l1_results<'a>(
        &self,
        ir_results: &'a [(String, ProcessResult)],
    ) -> (
        Vec<Node>,
        Vec<Edge>,
        Vec<Occurrence>,
        HashMap<String, &'a ProcessResult>,
    ) {
        let mut all_nodes = Vec::new();
        let mut all_edges = Vec::new();
        let mut all_occurrences = Vec::new();
        let mut file_ir_map = HashMap::new();

        for (file_path, result) in ir_results {
            // Access nodes/edges directly from ProcessResult
            all_nodes.extend(result.nodes.clone());
            all_edges.extend(result.edges.clone());
            all_occurrences.extend(result.occurrences.clone());
            file_ir_map.insert(file_path.clone(), result);
        }

        (all_nodes, all_edges, all_occurrences, file_ir_map)
    }

    /// L2: Chunking - Create searchable chunks from IR
    ///
    /// Uses ChunkingUseCase (application layer) for proper architecture.
    fn execute_l2_chunking(
        &self,
        nodes: &[Node],
        files: &[(String, String, String)],
    ) -> Result<Vec<super::end_to_end_result::Chunk>, CodegraphError> {
        let repo_id = &self.config.repo_info.repo_name;
        let mut all_chunks = Vec::new();

        // Use application layer (UseCase) - instance reused from orchestrator
        let chunking_usecase = &self.chunking_usecase;

        // Prepare files for batch processing
        let files_with_nodes: Vec<(&str, &str, Vec<Node>, Vec<String>)> = files
            .iter()
            .map(|(file_path, _module_path, content)| {
                // Detect language from file extension
                let language = if file_path.ends_with(".py") {
                    "python"
                } else if file_path.ends_with(".rs") {
                    "rust"
                } else if file_path.ends_with(".js") {
                    "javascript"
                } else if file_path.ends_with(".ts") {
                    "typescript"
                } else {
                    "unknown"
                };

                // Get file lines for content extraction
                let file_lines: Vec<String> = content.lines().map(|l| l.to_string()).collect();

                // Filter nodes for this file
                let file_nodes: Vec<Node> = nodes
                    .iter()
                    .filter(|n| &n.file_path == file_path)
                    .cloned()
                    .collect();

                (file_path.as_str(), language, file_nodes, file_lines)
            })
            .collect();

        // Process each file using UseCase
        let mut first_file = true;
        for (file_path, language, file_nodes, file_lines) in &files_with_nodes {
            let input = BuildChunksInput {
                repo_id,
                file_path,
                language,
                ir_nodes: file_nodes,
                file_text: file_lines,
                snapshot_id: None,
            };

            let output = chunking_usecase.build_chunks(input);

            // Convert domain chunks to result chunks
            // Skip repo/project chunks after first file to avoid duplicates
            for chunk in output.chunks {
                if !first_file && matches!(chunk.kind, ChunkKind::Repo | ChunkKind::Project) {
                    continue;
                }

                all_chunks.push(super::end_to_end_result::Chunk {
                    id: chunk.chunk_id,
                    file_path: chunk.file_path.unwrap_or_default(),
                    content: String::new(), // Content extracted on demand
                    start_line: chunk.start_line.unwrap_or(0) as usize,
                    end_line: chunk.end_line.unwrap_or(0) as usize,
                    chunk_type: format!("{:?}", chunk.kind),
                    symbol_id: chunk.symbol_id,
                });
            }

            first_file = false;
        }

        Ok(all_chunks)
    }

    /// L3: Cross-file resolution
    fn execute_l3_cross_file(
        &self,
        file_ir_map: &HashMap<String, &ProcessResult>,
    ) -> Result<HashMap<String, Vec<String>>, CodegraphError> {
        // Convert ProcessResult to CrossFileIRDocument format
        let ir_docs: Vec<CrossFileIRDocument> = file_ir_map
            .iter()
            .map(|(file_path, result)| {
                CrossFileIRDocument::new(
                    file_path.clone(),
                    result.nodes.clone(),
                    result.edges.clone(),
                )
            })
            .collect();

        // Build global context
        let context = build_global_context(ir_docs);

        // Convert file_dependencies to simple map for result
        Ok(context.file_dependencies)
    }

    /// L5: Symbol extraction for navigation
    fn execute_l5_symbols(
        &self,
        nodes: &[Node],
    ) -> Result<Vec<super::end_to_end_result::Symbol>, CodegraphError> {
        use crate::shared::models::NodeKind;

        let symbols: Vec<_> = nodes
            .iter()
            .filter(|n| {
                matches!(
                    n.kind,
                    NodeKind::Function
                        | NodeKind::Method
                        | NodeKind::Class
                        | NodeKind::Variable
                        | NodeKind::Constant
                )
            })
            .map(|n| super::end_to_end_result::Symbol {
                id: n.id.clone(),
                name: n.name.clone().unwrap_or_default(),
                kind: format!("{:?}", n.kind),
                file_path: n.file_path.clone(),
                definition: (n.span.start_line as usize, n.span.start_col as usize),
                documentation: n.docstring.clone(),
            })
            .collect();

        Ok(symbols)
    }

    /// Execute with progress callback
    ///
    /// Same as `execute()` but calls `progress_fn(current, total)` periodically
    /// to report progress.
    pub fn execute_with_progress<F>(
        &self,
        progress_fn: F,
    ) -> Result<E2EPipelineResult, CodegraphError>
    where
        F: Fn(usize, usize) + Send + Sync,
    {
        let files = self.collect_files()?;
        let total_files = files.len();

        // TODO (Phase 1.3): Integrate progress tracking into parallel execution
        // - Use atomic counter for processed files
        // - Call progress_fn after each batch

        let result = self.execute()?;

        // Report final progress
        progress_fn(total_files, total_files);

        Ok(result)
    }

    /// Collect files to process based on configuration
    ///
    /// Priority:
    /// 1. Use `config.repo_info.file_paths` if provided (incremental mode)
    /// 2. Otherwise, scan repository (full mode)
    fn collect_files(&self) -> Result<Vec<PathBuf>, CodegraphError> {
        if let Some(ref file_paths) = self.config.repo_info.file_paths {
            // Incremental mode: use provided file list
            Ok(file_paths.clone())
        } else {
            // Full mode: scan repository
            self.scan_repository()
        }
    }

    /// Scan repository for supported files
    ///
    /// Filters:
    /// - Supported extensions: .py, .rs, .js, .ts, .go, .java
    /// - Ignores: hidden dirs (.), node_modules, target, __pycache__
    fn scan_repository(&self) -> Result<Vec<PathBuf>, CodegraphError> {
        let mut files = Vec::new();
        let repo_root = &self.config.repo_info.repo_root;

        // Supported extensions (can be filtered by language_filter)
        let extensions = match &self.config.repo_info.language_filter {
            Some(langs) => langs.iter().map(|l| self.lang_to_ext(l)).collect(),
            None => vec!["py", "rs", "js", "ts", "go", "java", "kt"],
        };

        // Recursive directory walk
        self.walk_dir(repo_root, &extensions, &mut files)?;

        Ok(files)
    }

    /// Helper: Walk directory recursively
    fn walk_dir(
        &self,
        dir: &std::path::Path,
        extensions: &[&str],
        files: &mut Vec<PathBuf>,
    ) -> Result<(), CodegraphError> {
        if !dir.is_dir() {
            return Ok(());
        }

        for entry in std::fs::read_dir(dir).map_err(|e| {
            CodegraphError::internal(format!("Failed to read directory {}: {}", dir.display(), e))
        })? {
            let entry = entry
                .map_err(|e| CodegraphError::internal(format!("Failed to read entry: {}", e)))?;
            let path = entry.path();

            // Skip ignored directories
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                if name.starts_with('.')
                    || name == "node_modules"
                    || name == "target"
                    || name == "__pycache__"
                    || name == "venv"
                    || name == ".venv"
                {
                    continue;
                }
            }

            if path.is_dir() {
                self.walk_dir(&path, extensions, files)?;
            } else if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
                if extensions.contains(&ext) {
                    files.push(path);
                }
            }
        }

        Ok(())
    }

    /// Helper: Convert language name to file extension
    fn lang_to_ext(&self, lang: &str) -> &'static str {
        match lang.to_lowercase().as_str() {
            "python" => "py",
            "rust" => "rs",
            "javascript" => "js",
            "typescript" => "ts",
            "go" => "go",
            "java" => "java",
            "kotlin" => "kt",
            _ => "txt", // Fallback
        }
    }
}


impl<T> IRIndexingOrchestrator<T>
where
    T: TaintUseCase,
{
    /// L16: RepoMap - Repository structure visualization with importance scoring
    ///
    /// Depends on: L2 (Chunking)
    ///
    /// Builds hierarchical repository structure, computes importance scores using PageRank,
    /// and creates a snapshot summary for visualization and context-aware navigation.
    fn execute_l16_repomap(
        &self,
        chunks: &[super::end_to_end_result::Chunk],
        repo_id: &str,
    ) -> Result<RepoMapSnapshotSummary, CodegraphError> {
        // 1. Convert pipeline result chunks to chunking domain chunks
        // First pass: Create chunks
        let chunking_chunks: Vec<ChunkingChunk> = chunks
            .iter()
            .filter_map(|chunk| {
                // Parse chunk_type to determine ChunkKind
                let kind = match chunk.chunk_type.as_str() {
                    "Repo" => ChunkKind::Repo,
                    "Project" => ChunkKind::Project,
                    "Module" => ChunkKind::Module,
                    "File" => ChunkKind::File,
                    "Class" => ChunkKind::Class,
                    "Function" => ChunkKind::Function,
                    _ => ChunkKind::File, // Default fallback
                };

                // Create chunking Chunk (from domain)
                Some(ChunkingChunk {
                    chunk_id: chunk.id.clone(),
                    kind,
                    file_path: Some(chunk.file_path.clone()),
                    symbol_id: chunk.symbol_id.clone(),
                    start_line: Some(chunk.start_line as u32),
                    end_line: Some(chunk.end_line as u32),
                    parent_id: None, // Set below
                    ..Default::default()
                })
            })
            .collect();

        // Second pass: Infer parent_id from chunk hierarchy
        let chunking_chunks_with_parents: Vec<ChunkingChunk> = chunking_chunks
            .into_iter()
            .map(|mut chunk| {
                chunk.parent_id = Self::infer_parent_id(&chunk.chunk_id, chunks);
                chunk
            })
            .collect();

        // 2. Build RepoMap tree
        let snapshot_id = "v1".to_string(); // TODO: Use git commit hash
        let mut tree_builder = RepoMapTreeBuilder::new(repo_id.to_string(), snapshot_id.clone());

        // Build empty chunk-to-graph mapping (we don't have graph nodes for chunks yet)
        let chunk_to_graph: HashMap<String, HashSet<String>> = HashMap::new();

        let nodes = tree_builder.build_parallel(&chunking_chunks_with_parents, &chunk_to_graph);

        if nodes.is_empty() {
            return Err(CodegraphError::internal(
                "RepoMap tree builder returned no nodes",
            ));
        }

        // 3. Build graph for PageRank
        let graph_nodes: Vec<GraphNode> = nodes
            .iter()
            .map(|node| GraphNode {
                id: node.id.clone(),
                kind: format!("{:?}", node.kind),
            })
            .collect();

        // Build edges from parent-child relationships
        let mut graph_edges: Vec<GraphEdge> = Vec::new();
        for node in &nodes {
            if let Some(ref parent_id) = node.parent_id {
                // Child → Parent edge (dependency direction)
                graph_edges.push(GraphEdge {
                    source: node.id.clone(),
                    target: parent_id.clone(),
                    kind: "contains".to_string(),
                });
            }
        }

        let graph = GraphDocument {
            nodes: graph_nodes,
            edges: graph_edges,
        };

        // Debug: Print graph structure
        eprintln!(
            "[L16 RepoMap] Graph: {} nodes, {} edges",
            graph.nodes.len(),
            graph.edges.len()
        );
        if graph.edges.is_empty() {
            eprintln!("[L16 RepoMap] WARNING: No edges in graph! PageRank will not differentiate.");
        }

        // 4. Compute PageRank scores (OPTIMIZED - only once!)
        // Use runtime-configurable settings from config
        let pagerank_settings = self.config.pagerank();
        let engine = PageRankEngine::new(&pagerank_settings);

        let pagerank_scores = engine.compute_pagerank(&graph);

        // 5. Compute HITS scores (OPTIMIZED - only once!)
        let hits_results = engine.compute_hits(&graph);

        // 6. Get importance weights for combined score
        let weights = ImportanceWeights::default();

        // 7. Create snapshot summary (OPTIMIZED - reuse computed scores!)
        let node_summaries: Vec<RepoMapNodeSummary> = nodes
            .iter()
            .map(|node| {
                let pagerank = pagerank_scores.get(&node.id).copied().unwrap_or(0.0);
                // HITS returns (authorities, hubs) tuple
                let authority = hits_results.0.get(&node.id).copied().unwrap_or(0.0);
                let hub = hits_results.1.get(&node.id).copied().unwrap_or(0.0);

                // ✅ OPTIMIZED: Compute combined score directly (no re-computation!)
                // Before: compute_combined_importance() called PageRank + HITS again (3x slowdown!)
                // After: Reuse already-computed scores
                let combined_importance =
                    weights.pagerank * pagerank + weights.authority * authority;

                RepoMapNodeSummary {
                    id: node.id.clone(),
                    kind: format!("{:?}", node.kind),
                    name: node.name.clone(),
                    path: node.path.clone(),
                    parent_id: node.parent_id.clone(),
                    children_count: node.children_ids.len(),
                    depth: node.depth,
                    pagerank,
                    authority,
                    hub,
                    combined_importance,
                    loc: node.metrics.loc,
                    symbol_count: node.metrics.symbol_count,
                }
            })
            .collect();

        // Get total metrics
        let total_loc: usize = nodes.iter().map(|n| n.metrics.loc).sum();
        let total_symbols: usize = nodes.iter().map(|n| n.metrics.symbol_count).sum();
        let total_files: usize = nodes
            .iter()
            .filter(|n| matches!(n.kind, RepoMapNodeKind::File))
            .count();

        // Find root node
        let root_id = nodes
            .iter()
            .find(|n| matches!(n.kind, RepoMapNodeKind::Repository))
            .map(|n| n.id.clone())
            .or_else(|| nodes.first().map(|n| n.id.clone()))
            .ok_or_else(|| CodegraphError::internal("No nodes found in RepoMap"))?;

        let created_at = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or(std::time::Duration::from_secs(0))
            .as_secs();

        Ok(RepoMapSnapshotSummary {
            repo_id: repo_id.to_string(),
            snapshot_id, // Use the snapshot_id from tree_builder
            total_nodes: nodes.len(),
            root_id,
            nodes: node_summaries,
            total_loc,
            total_symbols,
            total_files,
            created_at,
        })
    }

    /// Infer parent_id from chunk hierarchy
    ///
    /// Chunk IDs follow pattern: chunk:<repo>:<type>:<path>
    /// - chunk:test:class:user.User → parent: chunk:test:file:user
    /// - chunk:test:file:user → parent: chunk:test:project:default
    /// - chunk:test:project:default → parent: chunk:test:repo:test
    fn infer_parent_id(
        chunk_id: &str,
        all_chunks: &[super::end_to_end_result::Chunk],
    ) -> Option<String> {
        // Map from chunk type to its parent type
        let type_hierarchy = [
            ("Function", "Class"),
            ("Function", "File"), // Functions can be in files without classes
            ("Class", "File"),
            ("File", "Module"),
            ("File", "Project"), // Files can be directly in project
            ("Module", "Project"),
            ("Project", "Repo"),
        ];

        // Find matching chunks by searching for potential parents
        for chunk in all_chunks {
            // Skip self
            if chunk.id == chunk_id {
                continue;
            }

            // Check if this could be a parent based on hierarchy
            // Simple heuristic: if chunk_id starts with parent's path and is one level deeper
            if chunk_id.starts_with(&chunk.id) && chunk_id != chunk.id {
                // This is a potential parent
                return Some(chunk.id.clone());
            }
        }

        // Fallback: Try to construct parent ID from chunk_id structure
        // chunk:<repo>:<type>:<path>
        let parts: Vec<&str> = chunk_id.split(':').collect();
        if parts.len() >= 3 {
            let chunk_type = parts[2];

            // Find parent type
            for (child_type, parent_type) in &type_hierarchy {
                if chunk_type.eq_ignore_ascii_case(child_type) {
                    // Try to find a parent chunk of that type
                    let parent_prefix =
                        format!("chunk:{}:{}:", parts[1], parent_type.to_lowercase());
                    for chunk in all_chunks {
                        if chunk.id.starts_with(&parent_prefix) && chunk.id != chunk_id {
                            // Additional check: make sure it's actually an ancestor
                            if chunk_id.len() > chunk.id.len() {
                                return Some(chunk.id.clone());
                            }
                        }
                    }
                }
            }
        }

        None
    }

    /// L2.5: Lexical Indexing - Tantivy full-text search
    ///
    /// Indexes all file contents using TantivyLexicalIndex for BM25-based full-text search.
    /// This stage runs in parallel with other Phase 2 stages (L2 Chunking, L3 CrossFile, etc.).
    ///
    /// # Example
    /// ```ignore
    /// // Enable lexical indexing in config
    /// config.stages.lexical = true;
    ///
    /// // Create orchestrator with lexical index
    /// let chunk_store = Arc::new(SqliteChunkStore::in_memory()?);
    /// let orchestrator = IRIndexingOrchestrator::new(config)
    ///     .with_lexical_index(
    ///         &PathBuf::from("./tantivy_index"),
    ///         chunk_store,
    ///         "my_repo".to_string(),
    ///     )?;
    ///
    /// // Execute pipeline - L2.5 runs automatically in Phase 2
    /// let result = orchestrator.execute()?;
    /// ```
    fn execute_l2_5_lexical(
        &self,
        file_contents: &[(String, String, String)], // (file_path, module_path, content)
    ) -> Result<(), CodegraphError> {
        if let Some(index_arc) = &self.lexical_index {
            let index = index_arc.lock().map_err(|e| {
                CodegraphError::internal(format!("Failed to lock lexical index: {}", e))
            })?;

            // Convert to FileToIndex format
            let files: Vec<FileToIndex> = file_contents
                .iter()
                .map(|(file_path, _module_path, content)| FileToIndex {
                    repo_id: self.config.repo_info.repo_name.clone(),
                    file_path: file_path.clone(),
                    content: content.clone(),
                })
                .collect();

            // Batch index all files
            let result = index.index_files_batch(&files, false).map_err(|e| {
                CodegraphError::internal(format!("Lexical indexing failed: {:?}", e))
            })?;

            eprintln!(
                "[L2.5 Lexical] Indexed {} files ({} failed)",
                result.success_count,
                result.failed_files.len()
            );

            Ok(())
        } else {
            // Lexical index not initialized, skip silently
            // This allows the pipeline to run without lexical indexing if not configured
            Ok(())
        }
    }

    /// L37: Query Engine - Initialize query engine for unified access
    ///
    /// Creates QueryEngine instances for all IR documents to enable:
    /// - Unified query interface across all analyses
    /// - Graph traversal (DFG, CFG)
    /// - Path finding between code elements
    /// - DSL-based queries (Q, E operators)
    ///
    /// Returns statistics about query engine initialization.
    fn execute_l37_query_engine(
        &self,
        file_ir_map: &HashMap<String, &ProcessResult>,
    ) -> Result<QueryEngineStats, CodegraphError> {
        let mut total_nodes = 0;
        let mut total_edges = 0;

        // Initialize query engines for all IR documents
        for (_file_path, process_result) in file_ir_map {
            total_nodes += process_result.nodes.len();
            total_edges += process_result.edges.len();

            // Create IRDocument from ProcessResult
            let ir_doc = crate::features::ir_generation::domain::ir_document::IRDocument {
                file_path: _file_path.clone(),
                nodes: process_result.nodes.clone(),
                edges: process_result.edges.clone(),
                ..Default::default()
            };

            // Initialize QueryEngine (validates graph structure)
            let _query_engine = QueryEngine::new(&ir_doc);

            // Note: QueryEngine is stateless and can be created on-demand
            // We don't store it in the result, but validate that it can be created
        }

        eprintln!(
            "[L37 Query Engine] Initialized for {} files ({} nodes, {} edges)",
            file_ir_map.len(),
            total_nodes,
            total_edges
        );

        Ok(QueryEngineStats {
            node_count: total_nodes,
            edge_count: total_edges,
        })
    }

    /// L14: Taint Analysis - Interprocedural monotone worklist taint fixpoint
    ///
    /// **DI Pattern**: Delegates to injected TaintUseCase
    fn execute_l14_taint_analysis(
        &self,
        file_ir_map: &HashMap<String, &ProcessResult>,
    ) -> Result<Vec<super::stages::TaintSummary>, CodegraphError> {
        eprintln!("[L14 Taint Analysis] Starting taint fixpoint (via TaintUseCase)...");

        // Collect all nodes and edges from all files
        let mut all_nodes = Vec::new();
        let mut all_edges = Vec::new();

        for (_file_path, process_result) in file_ir_map {
            all_nodes.extend(process_result.nodes.iter().cloned());
            all_edges.extend(process_result.edges.iter().cloned());
        }

        eprintln!(
            "[L14] Built call graph: {} nodes, {} edges",
            all_nodes.len(),
            all_edges.len()
        );

        // Delegate to TaintUseCase (DI pattern)
        let input = TaintAnalysisInput {
            nodes: all_nodes,
            edges: all_edges,
        };

        let taint_summaries = self.taint_usecase.analyze_taint(input);

        eprintln!(
            "[L14 Taint Analysis] Completed: {} taint flows detected",
            taint_summaries.len()
        );

        Ok(taint_summaries)
    }
}
