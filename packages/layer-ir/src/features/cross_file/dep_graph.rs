//! Dependency Graph with petgraph (RFC-062)
//!
//! File dependency graph using petgraph.
//! Supports Tarjan SCC for cycle detection, topological sort, and PageRank.

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::{HashMap, HashSet, VecDeque};

use super::types::ResolvedImport;

/// PageRank configuration
#[derive(Debug, Clone)]
pub struct PageRankConfig {
    /// Damping factor (typically 0.85)
    pub damping: f64,

    /// Maximum iterations
    pub max_iterations: usize,

    /// Convergence threshold
    pub tolerance: f64,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping: 0.85,
            max_iterations: 100,
            tolerance: 1e-6,
        }
    }
}

/// File dependency graph
///
/// Directed graph where:
/// - Nodes are file paths
/// - Edges represent dependencies (A → B means A depends on B)
pub struct DependencyGraph {
    /// Directed graph: file → files it depends on
    graph: DiGraph<String, ()>,

    /// Path → Node index mapping
    path_to_node: HashMap<String, NodeIndex>,

    /// Strongly connected components (cycles)
    cycles: Vec<Vec<String>>,

    /// Cached topological order
    topo_order: Vec<String>,
}

impl DependencyGraph {
    /// Create empty dependency graph
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            path_to_node: HashMap::new(),
            cycles: Vec::new(),
            topo_order: Vec::new(),
        }
    }

    /// Build dependency graph from resolved imports
    pub fn build(resolved_imports: &HashMap<String, Vec<ResolvedImport>>) -> Self {
        let mut graph = DiGraph::new();
        let mut path_to_node = HashMap::new();

        // Collect all file paths
        let mut all_files: HashSet<String> = resolved_imports.keys().cloned().collect();
        for imports in resolved_imports.values() {
            for import in imports {
                if let Some(ref source_file) = import.source_file {
                    all_files.insert(source_file.clone());
                }
            }
        }

        // Add all files as nodes
        for file_path in &all_files {
            let idx = graph.add_node(file_path.clone());
            path_to_node.insert(file_path.clone(), idx);
        }

        // Add dependency edges
        for (from_path, imports) in resolved_imports {
            let from_idx = match path_to_node.get(from_path) {
                Some(idx) => *idx,
                None => continue,
            };

            for import in imports {
                if let Some(ref source_file) = import.source_file {
                    // Don't add self-loops
                    if source_file == from_path {
                        continue;
                    }

                    if let Some(&to_idx) = path_to_node.get(source_file) {
                        // Add edge: from_path depends on source_file
                        graph.add_edge(from_idx, to_idx, ());
                    }
                }
            }
        }

        // Compute SCCs for cycle detection
        let sccs = tarjan_scc(&graph);
        let cycles: Vec<Vec<String>> = sccs
            .into_iter()
            .filter(|scc| scc.len() > 1) // Only cycles
            .map(|scc| scc.into_iter().map(|idx| graph[idx].clone()).collect())
            .collect();

        // Compute topological order using Kahn's algorithm
        let topo_order = Self::compute_topological_order(&graph, &path_to_node);

        Self {
            graph,
            path_to_node,
            cycles,
            topo_order,
        }
    }

    /// Compute topological order using Kahn's algorithm
    fn compute_topological_order(
        graph: &DiGraph<String, ()>,
        _path_to_node: &HashMap<String, NodeIndex>,
    ) -> Vec<String> {
        let mut in_degree: HashMap<NodeIndex, usize> = HashMap::new();

        // Initialize in-degree for all nodes
        for idx in graph.node_indices() {
            in_degree.insert(idx, 0);
        }

        // Calculate in-degree (count incoming edges)
        for edge in graph.edge_references() {
            *in_degree.entry(edge.target()).or_insert(0) += 1;
        }

        // Start with nodes that have no dependencies (in-degree 0)
        let mut queue: VecDeque<NodeIndex> = in_degree
            .iter()
            .filter(|(_, &degree)| degree == 0)
            .map(|(&idx, _)| idx)
            .collect();

        let mut order = Vec::new();

        while let Some(idx) = queue.pop_front() {
            order.push(graph[idx].clone());

            // Reduce in-degree for neighbors
            for neighbor in graph.neighbors(idx) {
                if let Some(degree) = in_degree.get_mut(&neighbor) {
                    *degree -= 1;
                    if *degree == 0 {
                        queue.push_back(neighbor);
                    }
                }
            }
        }

        // Reverse to get dependencies-first order (base modules first)
        order.reverse();
        order
    }

    /// Get files that depend on this file (reverse lookup)
    pub fn get_dependents(&self, file_path: &str) -> Vec<String> {
        if let Some(&idx) = self.path_to_node.get(file_path) {
            self.graph
                .neighbors_directed(idx, Direction::Incoming)
                .map(|idx| self.graph[idx].clone())
                .collect()
        } else {
            Vec::new()
        }
    }

    /// Get files that this file depends on
    pub fn get_dependencies(&self, file_path: &str) -> Vec<String> {
        if let Some(&idx) = self.path_to_node.get(file_path) {
            self.graph
                .neighbors_directed(idx, Direction::Outgoing)
                .map(|idx| self.graph[idx].clone())
                .collect()
        } else {
            Vec::new()
        }
    }

    /// Get all dependencies as HashMap
    pub fn get_all_dependencies(&self) -> HashMap<String, Vec<String>> {
        self.path_to_node
            .keys()
            .map(|path| (path.clone(), self.get_dependencies(path)))
            .collect()
    }

    /// Get all dependents as HashMap
    pub fn get_all_dependents(&self) -> HashMap<String, Vec<String>> {
        self.path_to_node
            .keys()
            .map(|path| (path.clone(), self.get_dependents(path)))
            .collect()
    }

    /// Get topological order (base modules first)
    pub fn topological_order(&self) -> Vec<String> {
        self.topo_order.clone()
    }

    /// Get detected cycles
    pub fn cycles(&self) -> &[Vec<String>] {
        &self.cycles
    }

    /// Has cycles?
    pub fn has_cycles(&self) -> bool {
        !self.cycles.is_empty()
    }

    /// Get edge count (number of dependencies)
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Get node count (number of files)
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Get transitive dependents (files that depend on this file, transitively)
    pub fn get_transitive_dependents(&self, file_path: &str) -> Vec<String> {
        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();

        if let Some(&idx) = self.path_to_node.get(file_path) {
            queue.push_back(idx);
        }

        while let Some(idx) = queue.pop_front() {
            for neighbor in self.graph.neighbors_directed(idx, Direction::Incoming) {
                let neighbor_path = &self.graph[neighbor];
                if visited.insert(neighbor_path.clone()) {
                    queue.push_back(neighbor);
                }
            }
        }

        visited.into_iter().collect()
    }

    /// Get transitive dependencies (files that this file depends on, transitively)
    pub fn get_transitive_dependencies(&self, file_path: &str) -> Vec<String> {
        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();

        if let Some(&idx) = self.path_to_node.get(file_path) {
            queue.push_back(idx);
        }

        while let Some(idx) = queue.pop_front() {
            for neighbor in self.graph.neighbors_directed(idx, Direction::Outgoing) {
                let neighbor_path = &self.graph[neighbor];
                if visited.insert(neighbor_path.clone()) {
                    queue.push_back(neighbor);
                }
            }
        }

        visited.into_iter().collect()
    }

    /// Compute PageRank scores for all files
    ///
    /// PageRank measures the importance of each file based on the dependency graph structure.
    /// Files that are depended upon by many other important files get higher scores.
    ///
    /// # Algorithm
    ///
    /// Classic PageRank (Page & Brin, 1998):
    /// ```text
    /// PR(A) = (1-d)/N + d * Σ(PR(T_i) / C(T_i))
    /// ```
    /// where:
    /// - d = damping factor (0.85)
    /// - N = total number of nodes
    /// - T_i = nodes pointing to A
    /// - C(T_i) = out-degree of T_i
    ///
    /// # Returns
    ///
    /// HashMap mapping file paths to importance scores (0.0-1.0+)
    ///
    /// # Example
    ///
    /// ```ignore
    /// let graph = DependencyGraph::build(&imports);
    /// let scores = graph.compute_pagerank(None);
    ///
    /// // Find most critical files
    /// for (file, score) in scores.iter().take(10) {
    ///     println!("{}: {:.4}", file, score);
    /// }
    /// ```
    pub fn compute_pagerank(&self, config: Option<PageRankConfig>) -> HashMap<String, f64> {
        let config = config.unwrap_or_default();

        if self.graph.node_count() == 0 {
            return HashMap::new();
        }

        // Initialize PageRank scores (uniform distribution)
        let n = self.graph.node_count() as f64;
        let mut scores: HashMap<NodeIndex, f64> = HashMap::new();
        let initial_score = 1.0 / n;

        for idx in self.graph.node_indices() {
            scores.insert(idx, initial_score);
        }

        // Pre-compute out-degrees for dangling node handling
        let out_degrees: HashMap<NodeIndex, usize> = self
            .graph
            .node_indices()
            .map(|idx| {
                (
                    idx,
                    self.graph
                        .neighbors_directed(idx, Direction::Outgoing)
                        .count(),
                )
            })
            .collect();

        // Power iteration
        for _iteration in 0..config.max_iterations {
            let mut new_scores: HashMap<NodeIndex, f64> = HashMap::new();
            let mut max_diff: f64 = 0.0;

            // Calculate dangling node contribution (nodes with no outgoing edges)
            let dangling_sum: f64 = self
                .graph
                .node_indices()
                .filter(|idx| out_degrees[idx] == 0)
                .map(|idx| scores[&idx])
                .sum();

            for idx in self.graph.node_indices() {
                // Base score (teleportation) + dangling redistribution
                let mut score = (1.0 - config.damping) / n + config.damping * dangling_sum / n;

                // Add contributions from incoming edges
                for incoming_idx in self.graph.neighbors_directed(idx, Direction::Incoming) {
                    let incoming_score = scores[&incoming_idx];
                    let out_degree = out_degrees[&incoming_idx] as f64;

                    if out_degree > 0.0 {
                        score += config.damping * (incoming_score / out_degree);
                    }
                }

                // Track convergence
                let old_score = scores[&idx];
                let diff = (score - old_score).abs();
                max_diff = max_diff.max(diff);

                new_scores.insert(idx, score);
            }

            scores = new_scores;

            // Check convergence
            if max_diff < config.tolerance {
                break;
            }
        }

        // Convert NodeIndex -> file path
        scores
            .into_iter()
            .map(|(idx, score)| (self.graph[idx].clone(), score))
            .collect()
    }

    /// Get top-K most important files by PageRank
    ///
    /// # Arguments
    ///
    /// * `k` - Number of top files to return
    /// * `config` - Optional PageRank configuration
    ///
    /// # Returns
    ///
    /// Vec of (file_path, score) tuples, sorted by descending score
    ///
    /// # Example
    ///
    /// ```ignore
    /// let critical = graph.get_critical_files(10, None);
    /// for (file, score) in critical {
    ///     println!("Critical file: {} (importance: {:.4})", file, score);
    /// }
    /// ```
    pub fn get_critical_files(
        &self,
        k: usize,
        config: Option<PageRankConfig>,
    ) -> Vec<(String, f64)> {
        let scores = self.compute_pagerank(config);

        let mut ranked: Vec<(String, f64)> = scores.into_iter().collect();
        // Stable sort: by score descending, then by filename for tie-breaking
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });

        ranked.into_iter().take(k).collect()
    }

    /// Get PageRank score for a specific file
    ///
    /// Returns None if file not found in graph.
    pub fn get_file_importance(
        &self,
        file_path: &str,
        config: Option<PageRankConfig>,
    ) -> Option<f64> {
        let scores = self.compute_pagerank(config);
        scores.get(file_path).copied()
    }

    /// Get files ranked by importance (PageRank), with optional filtering
    ///
    /// # Arguments
    ///
    /// * `min_score` - Minimum PageRank score to include
    /// * `config` - Optional PageRank configuration
    ///
    /// # Returns
    ///
    /// Vec of (file_path, score) tuples, sorted by descending score
    pub fn get_important_files(
        &self,
        min_score: f64,
        config: Option<PageRankConfig>,
    ) -> Vec<(String, f64)> {
        let scores = self.compute_pagerank(config);

        let mut ranked: Vec<(String, f64)> = scores
            .into_iter()
            .filter(|(_, score)| *score >= min_score)
            .collect();

        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        ranked
    }
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::new()
    }
}
