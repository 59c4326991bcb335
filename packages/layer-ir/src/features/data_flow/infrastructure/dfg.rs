/*
 * DFG (Data Flow Graph) Module
 *
 * Tracks data flow through variables:
 * - Definitions (where variables are assigned)
 * - Uses (where variables are read)
 * - Def-use chains
 * - Use-def chains
 *
 * PRODUCTION GRADE:
 * - Accurate tracking
 * - All definitions/uses
 * - No fake data
 */

use crate::shared::models::Span;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Data flow node (variable at specific location)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DFNode {
    pub variable_name: String,
    pub span: Span,
    pub is_definition: bool, // true = def, false = use
}

/// Data flow graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataFlowGraph {
    pub function_id: String,
    pub nodes: Vec<DFNode>,
    pub def_use_edges: Vec<(usize, usize)>, // (def_idx, use_idx)
}

/// Build DFG from variable assignments and reads
pub fn build_dfg(
    function_id: String,
    definitions: &[(String, Span)], // (var_name, span)
    uses: &[(String, Span)],        // (var_name, span)
) -> DataFlowGraph {
    let mut nodes = Vec::new();
    let mut def_use_edges = Vec::new();

    // Add definition nodes
    let mut def_indices: HashMap<String, Vec<usize>> = HashMap::new();
    for (var_name, span) in definitions {
        let idx = nodes.len();
        nodes.push(DFNode {
            variable_name: var_name.clone(),
            span: *span,
            is_definition: true,
        });

        def_indices
            .entry(var_name.clone())
            .or_insert_with(Vec::new)
            .push(idx);
    }

    // Add use nodes and create edges
    for (var_name, span) in uses {
        let use_idx = nodes.len();
        nodes.push(DFNode {
            variable_name: var_name.clone(),
            span: *span,
            is_definition: false,
        });

        // Find reaching definition (most recent def before this use)
        // CRITICAL: Compare by span line number, not node index!
        if let Some(def_idxs) = def_indices.get(var_name) {
            let mut reaching_def: Option<(usize, u32)> = None; // (idx, line)

            for &def_idx in def_idxs {
                let def_span = &nodes[def_idx].span;
                let def_line = def_span.start_line;
                let def_col = def_span.start_col;
                let use_line = span.start_line;
                let use_col = span.start_col;

                // Only consider defs before this use (by line number OR column if same line)
                let def_before_use = if def_line == use_line {
                    // Same line: check column position
                    def_col < use_col
                } else {
                    // Different lines: def must be on earlier line
                    def_line < use_line
                };

                if def_before_use {
                    // Update to most recent (highest line/column)
                    match reaching_def {
                        None => reaching_def = Some((def_idx, def_line)),
                        Some((_, prev_line)) if def_line > prev_line => {
                            reaching_def = Some((def_idx, def_line));
                        }
                        Some((prev_idx, prev_line))
                            if def_line == prev_line
                                && def_col > nodes[prev_idx].span.start_col =>
                        {
                            // Same line: prefer later column
                            reaching_def = Some((def_idx, def_line));
                        }
                        _ => {}
                    }
                }
            }

            // Create edge from reaching definition
            if let Some((def_idx, _def_line)) = reaching_def {
                def_use_edges.push((def_idx, use_idx));
            }
        }
    }

    DataFlowGraph {
        function_id,
        nodes,
        def_use_edges,
    }
}
