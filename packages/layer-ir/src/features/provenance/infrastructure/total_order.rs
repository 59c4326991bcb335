//! Deterministic total ordering of node/edge lists.
//!
//! `local_seq` is never materialized as a field on [`Node`]/[`Edge`] — both
//! types are constructed across the whole crate via positional/builder APIs
//! that would all need updating for one peripheral tie-breaker. Instead this
//! relies on `[T]::sort_by_key` being a stable sort: ties on
//! `(file_path, kind, start_line, end_line)` keep the nodes'/edges' original
//! insertion order, which is exactly what an explicit `local_seq` field would
//! encode.

use std::collections::HashMap;

use crate::shared::models::{Edge, Node};

/// Sorts `nodes` in place by `(file_path, kind, start_line, end_line)` and
/// returns a rebuilt `id -> position` index.
pub fn sort_nodes(nodes: &mut Vec<Node>) -> HashMap<String, usize> {
    nodes.sort_by(|a, b| {
        (a.file_path.as_str(), a.kind.as_str(), a.span.start_line, a.span.end_line).cmp(&(
            b.file_path.as_str(),
            b.kind.as_str(),
            b.span.start_line,
            b.span.end_line,
        ))
    });
    nodes
        .iter()
        .enumerate()
        .map(|(pos, node)| (node.id.clone(), pos))
        .collect()
}

/// Sorts `edges` in place by `(file_path, kind, start_line, end_line)`,
/// where `file_path` is the owning document's path (edges carry no
/// independent file identity — see [`Edge`]). Spanless edges sort before
/// spanned ones within the same kind. Returns a rebuilt adjacency index
/// (`source_id -> edge positions`) analogous to the spec's `_edge_index`.
pub fn sort_edges(file_path: &str, edges: &mut Vec<Edge>) -> HashMap<String, Vec<usize>> {
    edges.sort_by(|a, b| {
        let a_span = a.span.map(|s| (s.start_line, s.end_line)).unwrap_or((0, 0));
        let b_span = b.span.map(|s| (s.start_line, s.end_line)).unwrap_or((0, 0));
        (file_path, a.kind.as_str(), a.span.is_some(), a_span).cmp(&(
            file_path,
            b.kind.as_str(),
            b.span.is_some(),
            b_span,
        ))
    });

    let mut index: HashMap<String, Vec<usize>> = HashMap::new();
    for (pos, edge) in edges.iter().enumerate() {
        index.entry(edge.source_id.clone()).or_default().push(pos);
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::{EdgeKind, NodeKind, Span};

    fn node(id: &str, file: &str, kind: NodeKind, start: u32) -> Node {
        Node::new(
            id.to_string(),
            kind,
            format!("{}::{}", file, id),
            file.to_string(),
            Span::new(start, 0, start + 1, 0),
        )
    }

    #[test]
    fn test_sort_nodes_orders_by_file_then_kind_then_line() {
        let mut nodes = vec![
            node("n3", "b.py", NodeKind::Function, 1),
            node("n1", "a.py", NodeKind::Class, 10),
            node("n2", "a.py", NodeKind::Class, 1),
        ];
        let index = sort_nodes(&mut nodes);
        assert_eq!(nodes[0].id, "n2");
        assert_eq!(nodes[1].id, "n1");
        assert_eq!(nodes[2].id, "n3");
        assert_eq!(index["n2"], 0);
        assert_eq!(index["n1"], 1);
        assert_eq!(index["n3"], 2);
    }

    #[test]
    fn test_sort_nodes_stable_on_ties() {
        // Equal (file_path, kind, start_line, end_line): original order wins.
        let mut nodes = vec![
            node("first", "a.py", NodeKind::Variable, 1),
            node("second", "a.py", NodeKind::Variable, 1),
        ];
        sort_nodes(&mut nodes);
        assert_eq!(nodes[0].id, "first");
        assert_eq!(nodes[1].id, "second");
    }

    #[test]
    fn test_sort_edges_builds_adjacency_index() {
        let mut edges = vec![
            Edge::new("a", "b", EdgeKind::Calls).with_span(Span::new(5, 0, 5, 1)),
            Edge::new("a", "c", EdgeKind::Calls).with_span(Span::new(1, 0, 1, 1)),
        ];
        let index = sort_edges("f.py", &mut edges);
        assert_eq!(edges[0].target_id, "c");
        assert_eq!(edges[1].target_id, "b");
        assert_eq!(index["a"], vec![0, 1]);
    }

    #[test]
    fn test_determinism_reordering_input_yields_same_output() {
        let mut nodes_a = vec![
            node("n1", "a.py", NodeKind::Class, 10),
            node("n2", "a.py", NodeKind::Class, 1),
        ];
        let mut nodes_b = vec![
            node("n2", "a.py", NodeKind::Class, 1),
            node("n1", "a.py", NodeKind::Class, 10),
        ];
        sort_nodes(&mut nodes_a);
        sort_nodes(&mut nodes_b);
        let ids_a: Vec<_> = nodes_a.iter().map(|n| n.id.clone()).collect();
        let ids_b: Vec<_> = nodes_b.iter().map(|n| n.id.clone()).collect();
        assert_eq!(ids_a, ids_b);
    }
}
