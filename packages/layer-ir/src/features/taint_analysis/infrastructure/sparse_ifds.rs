//! Sparse IFDS Implementation
//!
//! # Overview
//!
//! Sparse IFDS is an optimization of the standard IFDS algorithm that
//! only processes nodes where facts can change (definition/use sites),
//! skipping intermediate nodes where facts simply propagate unchanged.
//!
//! # Reference
//!
//! "Sparse Interprocedural Dataflow Analysis" by Ramalingam (1996)
//! "Efficient and Precise Taint Analysis for Android" by Arzt et al. (2014)
//!
//! # Key Concepts
//!
//! 1. **Sparse CFG**: A reduced CFG containing only relevant nodes
//! 2. **Def-Use Chains**: Direct connections from definitions to uses
//! 3. **Relevant Nodes**: Nodes that can generate, kill, or use facts
//!
//! # Performance
//!
//! - Time: O(E_sparse) vs O(E_full) where E_sparse << E_full
//! - Space: O(V_sparse) vs O(V_full)
//! - Typical speedup: 2-10x for large programs
//!
//! # Example
//!
//! ```text
//! // Original CFG (5 nodes)
//! a = taint()  // Gen taint fact
//! b = a + 1    // Identity for taint
//! c = b + 2    // Identity for taint
//! d = c + 3    // Identity for taint
//! sink(d)      // Use taint fact
//!
//! // Sparse CFG (2 nodes + direct edge)
//! a = taint()  // Gen taint fact
//!      |
//!      v (sparse edge)
//! sink(d)      // Use taint fact
//! ```

use super::ifds_framework::{DataflowFact, FlowFunction, IFDSProblem, PathEdge};
use super::ifds_solver::{CFGEdge, CFGEdgeKind, CFG};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;

/// Relevance type for a node in Sparse IFDS
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRelevance {
    /// Node generates new facts (source)
    Generator,
    /// Node kills existing facts (sanitizer)
    Killer,
    /// Node uses facts without modifying them (sink)
    User,
    /// Node is entry/exit of a procedure (for interprocedural analysis)
    Boundary,
    /// Node is irrelevant (identity transformation for all facts)
    Irrelevant,
}

/// Sparse CFG node metadata
#[derive(Debug, Clone)]
pub struct SparseNode {
    /// Original CFG node ID
    pub original_node: String,
    /// Type of relevance
    pub relevance: NodeRelevance,
    /// Facts that can be generated at this node
    pub generated_facts: Vec<String>,
    /// Facts that can be killed at this node
    pub killed_facts: Vec<String>,
}

/// Sparse CFG edge (direct connection between relevant nodes)
#[derive(Debug, Clone)]
pub struct SparseEdge {
    /// Source node
    pub from: String,
    /// Target node
    pub to: String,
    /// Number of intermediate nodes skipped
    pub skipped_nodes: usize,
    /// Edge kind (preserved from original CFG)
    pub kind: CFGEdgeKind,
}

/// Sparse CFG: reduced CFG containing only relevant nodes
///
/// # Algorithm
///
/// 1. Identify relevant nodes (generators, killers, users, boundaries)
/// 2. Compute direct edges between relevant nodes
/// 3. Skip intermediate irrelevant nodes
///
/// # Invariants
///
/// - Every node in sparse_nodes is relevant
/// - Every edge connects two relevant nodes directly
/// - No intermediate irrelevant nodes on any edge
#[derive(Debug, Clone)]
pub struct SparseCFG {
    /// Relevant nodes only
    pub nodes: FxHashMap<String, SparseNode>,
    /// Direct edges between relevant nodes
    pub edges: FxHashMap<String, Vec<SparseEdge>>,
    /// Reverse edges for backward analysis
    pub reverse_edges: FxHashMap<String, Vec<SparseEdge>>,
    /// Entry nodes
    pub entries: FxHashSet<String>,
    /// Exit nodes
    pub exits: FxHashSet<String>,
    /// Statistics
    pub stats: SparseCFGStats,
}

/// Sparse CFG construction statistics
#[derive(Debug, Clone, Default)]
pub struct SparseCFGStats {
    /// Original CFG node count
    pub original_nodes: usize,
    /// Sparse CFG node count (relevant only)
    pub sparse_nodes: usize,
    /// Original CFG edge count
    pub original_edges: usize,
    /// Sparse CFG edge count
    pub sparse_edges: usize,
    /// Total nodes skipped
    pub total_skipped_nodes: usize,
    /// Reduction ratio (1 - sparse/original)
    pub reduction_ratio: f64,
}

impl SparseCFG {
    /// Build sparse CFG from original CFG
    ///
    /// # Algorithm (O(V + E))
    ///
    /// 1. First pass: Identify relevant nodes
    /// 2. Second pass: Compute direct edges between relevant nodes
    /// 3. Handle interprocedural edges specially
    ///
    /// # Arguments
    /// * `cfg` - Original CFG
    /// * `relevance_fn` - Function to determine node relevance
    ///
    /// # Returns
    /// Sparse CFG with only relevant nodes and direct edges
    pub fn from_cfg<R>(cfg: &CFG, relevance_fn: R) -> Self
    where
        R: Fn(&str) -> NodeRelevance,
    {
        // Collect all unique nodes from successors keys and edge targets
        let mut all_nodes: FxHashSet<String> = FxHashSet::default();
        for (from, edges) in &cfg.successors {
            all_nodes.insert(from.clone());
            for edge in edges {
                all_nodes.insert(edge.to.clone());
            }
        }
        // Also include entries and exits
        for entry in &cfg.entries {
            all_nodes.insert(entry.clone());
        }
        for exit in &cfg.exits {
            all_nodes.insert(exit.clone());
        }

        let original_nodes = all_nodes.len();
        let original_edges = cfg.edges.len();

        // Step 1: Identify relevant nodes
        let mut nodes = FxHashMap::default();
        let mut relevant_set: FxHashSet<String> = FxHashSet::default();

        for node_id in &all_nodes {
            let relevance = relevance_fn(node_id);
            if relevance != NodeRelevance::Irrelevant {
                relevant_set.insert(node_id.clone());
                nodes.insert(
                    node_id.clone(),
                    SparseNode {
                        original_node: node_id.clone(),
                        relevance,
                        generated_facts: Vec::new(),
                        killed_facts: Vec::new(),
                    },
                );
            }
        }

        // Always include entries and exits as relevant
        for entry in &cfg.entries {
            if !relevant_set.contains(entry) {
                relevant_set.insert(entry.clone());
                nodes.insert(
                    entry.clone(),
                    SparseNode {
                        original_node: entry.clone(),
                        relevance: NodeRelevance::Boundary,
                        generated_facts: Vec::new(),
                        killed_facts: Vec::new(),
                    },
                );
            }
        }
        for exit in &cfg.exits {
            if !relevant_set.contains(exit) {
                relevant_set.insert(exit.clone());
                nodes.insert(
                    exit.clone(),
                    SparseNode {
                        original_node: exit.clone(),
                        relevance: NodeRelevance::Boundary,
                        generated_facts: Vec::new(),
                        killed_facts: Vec::new(),
                    },
                );
            }
        }

        // Step 2: Compute direct edges using BFS from each relevant node
        let mut edges: FxHashMap<String, Vec<SparseEdge>> = FxHashMap::default();
        let mut reverse_edges: FxHashMap<String, Vec<SparseEdge>> = FxHashMap::default();
        let mut total_skipped = 0;

        for from_node in &relevant_set {
            let sparse_edges = Self::find_next_relevant_nodes(cfg, from_node, &relevant_set);

            for (to_node, skipped, kind) in sparse_edges {
                total_skipped += skipped;

                let edge = SparseEdge {
                    from: from_node.clone(),
                    to: to_node.clone(),
                    skipped_nodes: skipped,
                    kind: kind.clone(),
                };

                edges
                    .entry(from_node.clone())
                    .or_insert_with(Vec::new)
                    .push(edge.clone());

                reverse_edges
                    .entry(to_node.clone())
                    .or_insert_with(Vec::new)
                    .push(SparseEdge {
                        from: to_node,
                        to: from_node.clone(),
                        skipped_nodes: skipped,
                        kind,
                    });
            }
        }

        let sparse_nodes_count = nodes.len();
        let sparse_edges_count = edges.values().map(|e| e.len()).sum::<usize>();

        let reduction_ratio = if original_nodes > 0 {
            1.0 - (sparse_nodes_count as f64 / original_nodes as f64)
        } else {
            0.0
        };

        SparseCFG {
            nodes,
            edges,
            reverse_edges,
            entries: cfg.entries.iter().cloned().collect(),
            exits: cfg.exits.iter().cloned().collect(),
            stats: SparseCFGStats {
                original_nodes,
                sparse_nodes: sparse_nodes_count,
                original_edges,
                sparse_edges: sparse_edges_count,
                total_skipped_nodes: total_skipped,
                reduction_ratio,
            },
        }
    }

    /// Find next relevant nodes reachable from a given node
    ///
    /// Uses BFS to find all directly-reachable relevant nodes,
    /// counting skipped irrelevant nodes along the way.
    fn find_next_relevant_nodes(
        cfg: &CFG,
        start: &str,
        relevant_set: &FxHashSet<String>,
    ) -> Vec<(String, usize, CFGEdgeKind)> {
        let mut results = Vec::new();
        let mut visited: FxHashSet<String> = FxHashSet::default();
        // (node, skipped_count, original_edge_kind)
        let mut queue: VecDeque<(String, usize, Option<CFGEdgeKind>)> = VecDeque::new();

        // Initialize with direct successors
        if let Some(successors) = cfg.successors.get(start) {
            for edge in successors {
                queue.push_back((edge.to.clone(), 0, Some(edge.kind.clone())));
            }
        }

        while let Some((node, skipped, edge_kind)) = queue.pop_front() {
            if visited.contains(&node) {
                continue;
            }
            visited.insert(node.clone());

            if relevant_set.contains(&node) && node != start {
                // Found a relevant node!
                let kind = edge_kind.unwrap_or(CFGEdgeKind::Normal);
                results.push((node, skipped, kind));
            } else if !relevant_set.contains(&node) {
                // Continue through irrelevant node
                if let Some(successors) = cfg.successors.get(&node) {
                    for edge in successors {
                        if !visited.contains(&edge.to) {
                            // Preserve original edge kind, increment skip count
                            queue.push_back((
                                edge.to.clone(),
                                skipped + 1,
                                edge_kind.clone().or(Some(edge.kind.clone())),
                            ));
                        }
                    }
                }
            }
        }

        results
    }

    /// Get sparse successors of a node
    pub fn successors(&self, node: &str) -> Vec<&SparseEdge> {
        self.edges
            .get(node)
            .map(|edges| edges.iter().collect())
            .unwrap_or_default()
    }

    /// Get sparse predecessors of a node
    pub fn predecessors(&self, node: &str) -> Vec<&SparseEdge> {
        self.reverse_edges
            .get(node)
            .map(|edges| edges.iter().collect())
            .unwrap_or_default()
    }

    /// Check if a node is in the sparse CFG
    pub fn contains(&self, node: &str) -> bool {
        self.nodes.contains_key(node)
    }

    /// Get node metadata
    pub fn get_node(&self, node: &str) -> Option<&SparseNode> {
        self.nodes.get(node)
    }

    /// Get statistics about the sparse CFG
    pub fn stats(&self) -> &SparseCFGStats {
        &self.stats
    }

    /// Get reduction ratio (0.0 to 1.0)
    ///
    /// Higher is better: 0.5 means 50% of nodes were eliminated.
    pub fn reduction_ratio(&self) -> f64 {
        self.stats.reduction_ratio
    }

    /// Get number of sparse nodes
    pub fn num_sparse_nodes(&self) -> usize {
        self.stats.sparse_nodes
    }

    /// Get total nodes skipped
    pub fn nodes_skipped(&self) -> usize {
        self.stats.total_skipped_nodes
    }
}

/// Sparse IFDS Solver
///
/// Extends standard IFDS with sparse CFG optimization.
///
/// # Performance
///
/// - Skips intermediate nodes with identity flow
/// - Direct edges between relevant nodes
/// - Same precision as standard IFDS
///
/// # Usage
///
/// ```ignore
/// let sparse_cfg = SparseCFG::from_cfg(&cfg, |node| {
///     if is_taint_source(node) { NodeRelevance::Generator }
///     else if is_sanitizer(node) { NodeRelevance::Killer }
///     else if is_sink(node) { NodeRelevance::User }
///     else { NodeRelevance::Irrelevant }
/// });
///
/// let solver = SparseIFDSSolver::new(problem, sparse_cfg);
/// let results = solver.solve();
/// ```
pub struct SparseIFDSSolver<F: DataflowFact> {
    /// IFDS problem specification
    problem: Box<dyn IFDSProblem<F>>,

    /// Sparse CFG
    sparse_cfg: SparseCFG,

    /// Path edges: (d1, n, d2) means fact d2 holds at node n given initial fact d1
    path_edges: FxHashMap<String, FxHashSet<PathEdge<F>>>,

    /// Summary edges: summarize function effects
    summary_edges: FxHashMap<(String, F), FxHashSet<F>>,

    /// Worklist for tabulation algorithm
    worklist: VecDeque<PathEdge<F>>,

    /// Statistics
    stats: SparseIFDSStats,
}

/// Sparse IFDS Statistics
#[derive(Debug, Clone, Default)]
pub struct SparseIFDSStats {
    /// Number of path edges processed
    pub path_edges_processed: usize,
    /// Number of summary edges created
    pub summary_edges_created: usize,
    /// Number of iterations
    pub iterations: usize,
    /// Nodes skipped due to sparsity
    pub nodes_skipped: usize,
    /// Analysis time in ms
    pub analysis_time_ms: u64,
}

impl<F: DataflowFact + 'static> SparseIFDSSolver<F> {
    /// Create new sparse IFDS solver
    pub fn new(problem: Box<dyn IFDSProblem<F>>, sparse_cfg: SparseCFG) -> Self {
        Self {
            problem,
            sparse_cfg,
            path_edges: FxHashMap::default(),
            summary_edges: FxHashMap::default(),
            worklist: VecDeque::new(),
            stats: SparseIFDSStats::default(),
        }
    }

    /// Solve the IFDS problem using sparse tabulation
    ///
    /// # Algorithm
    ///
    /// 1. Initialize with seeds at entry node
    /// 2. Process worklist (only sparse edges)
    /// 3. Apply flow functions at relevant nodes
    /// 4. Skip intermediate irrelevant nodes
    ///
    /// # Returns
    /// Mapping from nodes to sets of facts
    pub fn solve(&mut self) -> FxHashMap<String, FxHashSet<F>> {
        let start = std::time::Instant::now();

        // Initialize with seeds
        self.initialize();

        // Main worklist loop
        while let Some(edge) = self.worklist.pop_front() {
            self.stats.iterations += 1;
            self.process_edge(&edge);
        }

        self.stats.analysis_time_ms = start.elapsed().as_millis() as u64;

        // Collect results
        self.collect_results()
    }

    /// Initialize with problem seeds
    fn initialize(&mut self) {
        for (node, fact) in self.problem.initial_seeds() {
            // Only process if node is in sparse CFG
            if self.sparse_cfg.contains(&node) {
                let edge = PathEdge {
                    source_fact: F::zero(),
                    target_node: node,
                    target_fact: fact,
                };
                self.add_path_edge(edge);
            }
        }
    }

    /// Add path edge to worklist if new
    fn add_path_edge(&mut self, edge: PathEdge<F>) {
        let entry = self
            .path_edges
            .entry(edge.target_node.clone())
            .or_insert_with(FxHashSet::default);

        if entry.insert(edge.clone()) {
            self.stats.path_edges_processed += 1;
            self.worklist.push_back(edge);
        }
    }

    /// Process a path edge
    fn process_edge(&mut self, edge: &PathEdge<F>) {
        let node = edge.target_node.clone();
        let fact = edge.target_fact.clone();

        // Get sparse successors (collect to avoid borrow conflict)
        let successors: Vec<_> = self
            .sparse_cfg
            .successors(&node)
            .into_iter()
            .map(|e| (e.to.clone(), e.skipped_nodes, e.kind.clone()))
            .collect();

        for (to_node, skipped, kind) in successors {
            // Track skipped nodes for statistics
            self.stats.nodes_skipped += skipped;

            match &kind {
                CFGEdgeKind::Normal => {
                    self.process_normal_edge(&node, &to_node, &fact);
                }
                CFGEdgeKind::Call { callee_entry } => {
                    self.process_call_edge(&node, callee_entry, &fact);
                }
                CFGEdgeKind::Return { call_site } => {
                    self.process_return_edge(&node, &to_node, call_site, &fact);
                }
                CFGEdgeKind::CallToReturn => {
                    self.process_call_to_return_edge(&node, &to_node, &fact);
                }
            }
        }
    }

    /// Process normal (intra-procedural) edge in sparse CFG
    fn process_normal_edge(&mut self, from: &str, to: &str, fact: &F) {
        // Apply flow function at source node
        let flow_fn = self.problem.normal_flow(from, to);
        let target_facts = flow_fn.compute(fact);

        for target_fact in target_facts {
            let edge = PathEdge {
                source_fact: F::zero(),
                target_node: to.to_string(),
                target_fact,
            };
            self.add_path_edge(edge);
        }
    }

    /// Process call edge
    fn process_call_edge(&mut self, call_site: &str, callee_entry: &str, fact: &F) {
        // Check for existing summary
        let summary_key = (callee_entry.to_string(), fact.clone());
        if let Some(summaries) = self.summary_edges.get(&summary_key) {
            // Reuse existing summaries (clone to avoid borrow conflict)
            let summaries_clone: Vec<_> = summaries.iter().cloned().collect();
            for return_fact in summaries_clone {
                let edge = PathEdge {
                    source_fact: fact.clone(),
                    target_node: call_site.to_string(), // Return to call site
                    target_fact: return_fact,
                };
                self.add_path_edge(edge);
            }
            return;
        }

        // Apply call flow function
        let call_flow = self.problem.call_flow(call_site, callee_entry);
        let callee_facts = call_flow.compute(fact);

        for callee_fact in callee_facts {
            let edge = PathEdge {
                source_fact: fact.clone(),
                target_node: callee_entry.to_string(),
                target_fact: callee_fact,
            };
            self.add_path_edge(edge);
        }
    }

    /// Process return edge
    fn process_return_edge(
        &mut self,
        exit_node: &str,
        return_site: &str,
        call_site: &str,
        fact: &F,
    ) {
        // Apply return flow function
        let return_flow = self.problem.return_flow(exit_node, return_site, call_site);
        let return_facts = return_flow.compute(fact);

        for return_fact in return_facts {
            // Store summary edge for later reuse
            let summary_key = (exit_node.to_string(), fact.clone());
            self.summary_edges
                .entry(summary_key)
                .or_insert_with(FxHashSet::default)
                .insert(return_fact.clone());
            self.stats.summary_edges_created += 1;

            let edge = PathEdge {
                source_fact: F::zero(),
                target_node: return_site.to_string(),
                target_fact: return_fact,
            };
            self.add_path_edge(edge);
        }
    }

    /// Process call-to-return edge
    fn process_call_to_return_edge(&mut self, call_site: &str, return_site: &str, fact: &F) {
        let flow_fn = self.problem.call_to_return_flow(call_site, return_site);
        let target_facts = flow_fn.compute(fact);

        for target_fact in target_facts {
            let edge = PathEdge {
                source_fact: F::zero(),
                target_node: return_site.to_string(),
                target_fact,
            };
            self.add_path_edge(edge);
        }
    }

    /// Collect final results
    fn collect_results(&self) -> FxHashMap<String, FxHashSet<F>> {
        let mut results = FxHashMap::default();

        for (node, edges) in &self.path_edges {
            let facts: FxHashSet<F> = edges.iter().map(|e| e.target_fact.clone()).collect();
            results.insert(node.clone(), facts);
        }

        results
    }

    /// Get analysis statistics
    pub fn statistics(&self) -> &SparseIFDSStats {
        &self.stats
    }

    /// Get sparse CFG statistics
    pub fn sparse_cfg_stats(&self) -> &SparseCFGStats {
        &self.sparse_cfg.stats
    }
}

/// Helper: Create relevance function for taint analysis
///
/// # Example
///
/// ```ignore
/// let relevance = taint_relevance_function(
///     &["source1", "source2"],
///     &["sanitize"],
///     &["sink1", "sink2"]
/// );
/// let sparse_cfg = SparseCFG::from_cfg(&cfg, relevance);
/// ```
pub fn taint_relevance_function<'a>(
    sources: &'a [&'a str],
    sanitizers: &'a [&'a str],
    sinks: &'a [&'a str],
) -> impl Fn(&str) -> NodeRelevance + 'a {
    move |node: &str| {
        if sources.iter().any(|s| node.contains(s)) {
            NodeRelevance::Generator
        } else if sanitizers.iter().any(|s| node.contains(s)) {
            NodeRelevance::Killer
        } else if sinks.iter().any(|s| node.contains(s)) {
            NodeRelevance::User
        } else {
            NodeRelevance::Irrelevant
        }
    }
}
