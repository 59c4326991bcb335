// QueryEngine - Main facade for query execution
// Maps to Python: QueryEngine

use crate::features::ir_generation::domain::ir_document::IRDocument;
use crate::features::query_engine::domain::{PathQuery, PathResult};
use crate::features::query_engine::infrastructure::{GraphIndex, NodeMatcher, TraversalEngine};

/// Query Engine - Main entry point for query execution
///
/// Facade pattern over:
/// - GraphIndex: O(1) node/edge lookups
/// - NodeMatcher: Selector to node matching
/// - TraversalEngine: BFS graph traversal
///
/// Example:
/// ```no_run
/// use codegraph_ir::features::query_engine::{QueryEngine, Q, E};
/// use codegraph_ir::features::ir_generation::domain::ir_document::IRDocument;
///
/// let ir_doc = IRDocument::new("test.py".to_string());
/// let engine = QueryEngine::new(&ir_doc);
///
/// // Find: user -> execute
/// let query = (Q::var("user") >> Q::call("execute"))
///     .via(E::dfg())
///     .any_path()
///     .limit_paths(20);
///
/// let paths = engine.execute(query);
/// println!("Found {} paths", paths.len());
/// ```
pub struct QueryEngine<'a> {
    index: GraphIndex,
    _ir_doc: &'a IRDocument,
}

impl<'a> QueryEngine<'a> {
    /// Create new QueryEngine from IRDocument
    pub fn new(ir_doc: &'a IRDocument) -> Self {
        let index = GraphIndex::new(ir_doc);

        Self {
            index,
            _ir_doc: ir_doc,
        }
    }

    /// Execute query and find paths
    ///
    /// This is the main execution method that:
    /// 1. Matches source/target selectors to nodes
    /// 2. Runs BFS traversal
    /// 3. Applies path constraints
    /// 4. Returns results
    pub fn execute(&self, query: PathQuery) -> Vec<PathResult> {
        // Step 1: Match source nodes
        let matcher = NodeMatcher::new(&self.index);
        let source_nodes = matcher.match_nodes(&query.flow.source);

        if source_nodes.is_empty() {
            return Vec::new();
        }

        // Step 2: Match target nodes
        let target_nodes = matcher.match_nodes(&query.flow.target);

        if target_nodes.is_empty() {
            return Vec::new();
        }

        // Step 3: Extract edge type and direction
        let edge_type = query
            .flow
            .edge_type
            .as_ref()
            .map(|e| e.edge_type)
            .unwrap_or(crate::features::query_engine::domain::EdgeType::All);

        let direction = query.flow.direction;

        // Step 4: Extract constraints
        let (min_depth, max_depth) = query.flow.depth_range;
        let max_paths = query.max_paths;
        let timeout_ms = query.timeout_ms;

        // Step 5: Run BFS traversal
        let engine = TraversalEngine::new(&self.index);
        let mut paths = engine.find_paths(
            &source_nodes,
            &target_nodes,
            edge_type,
            direction,
            max_depth,
            max_paths,
            timeout_ms,
        );

        // Step 6: Apply path constraints
        paths.retain(|path| {
            // Min depth filter
            if path.node_ids.len() < min_depth {
                return false;
            }

            // Custom predicates
            for predicate in &query.path_constraints {
                if !predicate(path) {
                    return false;
                }
            }

            true
        });

        paths
    }

    /// Get graph statistics
    pub fn stats(&self) -> QueryEngineStats {
        QueryEngineStats {
            node_count: self.index.node_count(),
            edge_count: self.index.edge_count(),
        }
    }
}

/// Query engine statistics
#[derive(Debug, Clone)]
pub struct QueryEngineStats {
    pub node_count: usize,
    pub edge_count: usize,
}
