//! Bottom-up return-type summary solver.
//!
//! Mirrors `constant_propagation::infrastructure::sccp_solver`'s shape: a
//! pure analyzer over a program-shaped input, implementing a port so callers
//! depend on the trait rather than this solver directly.

use std::collections::HashMap;

use crate::features::ir_generation::domain::IRDocument;
use crate::features::type_resolution::domain::{
    dunder_return_rule, is_test_function, join_return_types, parse_annotation, ReturnSummary,
    SummarySource, Type, TypeResolutionConfig,
};
use crate::features::type_resolution::infrastructure::call_graph::CallGraph;
use crate::features::type_resolution::ports::{ReturnSummaryAnalyzer, ReturnSummaryResult};
use crate::shared::models::{EdgeKind, Node, NodeKind};

/// Caps the per-SCC worklist loop so a malformed/cyclic union of return
/// types can't spin forever; summaries are monotone so real programs
/// converge in a handful of iterations.
const MAX_FIXPOINT_ITERATIONS: usize = 64;

#[derive(Default)]
pub struct CallGraphReturnSummarySolver {
    config: TypeResolutionConfig,
}

impl CallGraphReturnSummarySolver {
    pub fn new(config: TypeResolutionConfig) -> Self {
        Self { config }
    }

    fn summarize(
        &self,
        function: &Node,
        ir: &IRDocument,
        summaries: &HashMap<String, ReturnSummary>,
    ) -> ReturnSummary {
        let name = function.name.as_deref().unwrap_or("");

        if let Some(raw) = &function.return_type {
            return ReturnSummary {
                function_id: function.id.clone(),
                return_type: parse_annotation(raw),
                source: SummarySource::ExplicitAnnotation,
            };
        }

        if let Some(return_type) = dunder_return_rule(name) {
            return ReturnSummary {
                function_id: function.id.clone(),
                return_type,
                source: SummarySource::DunderRule,
            };
        }

        if is_test_function(name) {
            return ReturnSummary {
                function_id: function.id.clone(),
                return_type: Type::none(),
                source: SummarySource::TestHeuristic,
            };
        }

        // A function with no `return` statements still joins to `None` under
        // rule (4) (falling off the end of the body is Python's implicit
        // return) — `SummarySource::Unknown` is reserved for call sites that
        // can't even enumerate a function's returns at all (not reachable
        // from this structural IR, where every function node can always be
        // asked for its `Return` children, even if there are zero).
        let observed = self.observed_return_types(function, ir, summaries);
        ReturnSummary {
            function_id: function.id.clone(),
            return_type: join_return_types(observed, &self.config),
            source: SummarySource::AllReturnsJoin,
        }
    }

    /// Rule (4): one type per `return` statement in the function body. A
    /// `return foo()` return resolves through `foo`'s own summary (already
    /// computed, since callees are visited before callers); anything else
    /// with a structural type annotation uses that; otherwise the return
    /// widens to `Any` rather than pretending to know it.
    fn observed_return_types(
        &self,
        function: &Node,
        ir: &IRDocument,
        summaries: &HashMap<String, ReturnSummary>,
    ) -> Vec<Type> {
        let mut types = Vec::new();

        for node in &ir.nodes {
            if node.kind != NodeKind::Return {
                continue;
            }
            if node.parent_id.as_deref() != Some(function.id.as_str()) {
                continue;
            }

            let called = ir.edges.iter().find(|edge| {
                edge.source_id == node.id
                    && matches!(edge.kind, EdgeKind::Call | EdgeKind::Calls | EdgeKind::Invokes)
            });

            let return_type = if let Some(edge) = called {
                summaries
                    .get(&edge.target_id)
                    .map(|summary| summary.return_type.clone())
                    .unwrap_or_else(Type::any)
            } else if let Some(annotation) = &node.type_annotation {
                parse_annotation(annotation)
            } else {
                Type::any()
            };

            types.push(return_type);
        }

        types
    }
}

impl ReturnSummaryAnalyzer for CallGraphReturnSummarySolver {
    fn analyze(&self, ir: &IRDocument) -> ReturnSummaryResult {
        let call_graph = CallGraph::build(ir);
        let functions: HashMap<&str, &Node> = ir
            .nodes
            .iter()
            .filter(|node| matches!(node.kind, NodeKind::Function | NodeKind::Method))
            .map(|node| (node.id.as_str(), node))
            .collect();

        let mut summaries: HashMap<String, ReturnSummary> = HashMap::new();

        for scc in call_graph.sccs_bottom_up() {
            let mut changed = true;
            let mut iterations = 0;
            while changed && iterations < MAX_FIXPOINT_ITERATIONS {
                changed = false;
                iterations += 1;
                for function_id in &scc {
                    let Some(function) = functions.get(function_id.as_str()) else {
                        continue;
                    };
                    let next = self.summarize(function, ir, &summaries);
                    let is_new = summaries
                        .get(function_id)
                        .map(|existing| existing.return_type != next.return_type)
                        .unwrap_or(true);
                    if is_new {
                        summaries.insert(function_id.clone(), next);
                        changed = true;
                    }
                }
            }
        }

        ReturnSummaryResult { summaries }
    }
}
