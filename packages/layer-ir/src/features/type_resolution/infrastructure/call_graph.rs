//! Function-level call graph, used to order return-type summary computation
//! bottom-up over strongly connected components.
//!
//! Same petgraph/Tarjan shape as `cross_file::dep_graph::DependencyGraph`,
//! generalized from file-level import edges to function-level call edges.

use std::collections::HashMap;

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::features::ir_generation::domain::IRDocument;
use crate::shared::models::{EdgeKind, NodeKind};

pub struct CallGraph {
    graph: DiGraph<String, ()>,
    id_to_node: HashMap<String, NodeIndex>,
}

impl CallGraph {
    pub fn build(ir: &IRDocument) -> Self {
        let mut graph = DiGraph::new();
        let mut id_to_node = HashMap::new();

        for node in &ir.nodes {
            if matches!(node.kind, NodeKind::Function | NodeKind::Method) {
                let idx = graph.add_node(node.id.clone());
                id_to_node.insert(node.id.clone(), idx);
            }
        }

        for edge in &ir.edges {
            if !matches!(edge.kind, EdgeKind::Call | EdgeKind::Calls | EdgeKind::Invokes) {
                continue;
            }
            if let (Some(&from), Some(&to)) =
                (id_to_node.get(&edge.source_id), id_to_node.get(&edge.target_id))
            {
                graph.add_edge(from, to, ());
            }
        }

        Self { graph, id_to_node }
    }

    /// Strongly connected components in the order Tarjan's algorithm returns
    /// them for this condensation, which is reverse-topological: callees
    /// (and self-recursive/mutually-recursive groups) come before their
    /// callers, matching the bottom-up order return summaries need.
    pub fn sccs_bottom_up(&self) -> Vec<Vec<String>> {
        tarjan_scc(&self.graph)
            .into_iter()
            .map(|scc| scc.into_iter().map(|idx| self.graph[idx].clone()).collect())
            .collect()
    }

    pub fn contains_function(&self, function_id: &str) -> bool {
        self.id_to_node.contains_key(function_id)
    }
}
