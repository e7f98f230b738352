//! Views over a built graph for the rendering side
//!
//! A renderer hides internal ids and can focus a single node: the node and
//! the edges touching it are highlighted, everything else is de-emphasized.

use crate::graph::{Edge, Graph, Node, LABEL_EXTENDS, LABEL_ITEMS, LABEL_REF, LABEL_UNION};
use crate::label::is_root_marker;
use ahash::AHashSet;
use serde::Serialize;

fn is_renderable_id(id: &str) -> bool {
    !id.trim().is_empty() && !is_root_marker(id)
}

/// A graph with one node singled out
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FocusView {
    pub focus: Node,
    /// Ids directly connected to the focused node, in edge order
    pub neighbors: Vec<String>,
    /// Edges with the focused node at either end
    pub highlighted: Vec<Edge>,
    /// Remaining node ids
    pub dimmed: Vec<String>,
}

/// Node and edge totals, plus edge counts per label class
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    pub nodes: usize,
    pub edges: usize,
    pub refs: usize,
    pub unions: usize,
    pub extends: usize,
    pub properties: usize,
    pub items: usize,
}

impl Graph {
    /// Drop nodes with empty, blank or root-marker ids, and any edge
    /// touching such an id.
    pub fn renderable(&self) -> Graph {
        Graph {
            nodes: self
                .nodes
                .iter()
                .filter(|n| is_renderable_id(&n.id))
                .cloned()
                .collect(),
            edges: self
                .edges
                .iter()
                .filter(|e| is_renderable_id(&e.from) && is_renderable_id(&e.to))
                .cloned()
                .collect(),
        }
    }

    /// `None` when `id` is not a node of this graph
    pub fn focus(&self, id: &str) -> Option<FocusView> {
        let focus = self.node(id)?.clone();

        let highlighted: Vec<Edge> = self.edges.iter().filter(|e| e.touches(id)).cloned().collect();

        let mut seen = AHashSet::new();
        let mut neighbors = Vec::new();
        for edge in &highlighted {
            let other = if edge.from == id { &edge.to } else { &edge.from };
            if other != id && seen.insert(other.as_str()) {
                neighbors.push(other.clone());
            }
        }

        let dimmed = self
            .nodes
            .iter()
            .filter(|n| n.id != id && !seen.contains(n.id.as_str()))
            .map(|n| n.id.clone())
            .collect();

        Some(FocusView {
            focus,
            neighbors,
            highlighted,
            dimmed,
        })
    }

    pub fn stats(&self) -> GraphStats {
        let mut stats = GraphStats {
            nodes: self.nodes.len(),
            edges: self.edges.len(),
            ..GraphStats::default()
        };
        for edge in &self.edges {
            match edge.label.as_str() {
                LABEL_REF => stats.refs += 1,
                LABEL_UNION => stats.unions += 1,
                LABEL_EXTENDS => stats.extends += 1,
                LABEL_ITEMS => stats.items += 1,
                label if label.starts_with("item[") => stats.items += 1,
                label if label.starts_with("property: ") => stats.properties += 1,
                _ => {}
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph() -> Graph {
        Graph {
            nodes: vec![
                Node::new("#/root", "#/root"),
                Node::new("A", "A"),
                Node::new("", "allOf "),
                Node::new("string", "object"),
                Node::new("B", "B"),
            ],
            edges: vec![
                Edge::new("#/root", "A", "$ref"),
                Edge::new("A", "string", "property: name"),
                Edge::new("B", "A", "$ref"),
                Edge::new("", "A", "extends"),
                Edge::new("A-array", "string", "item[0]"),
            ],
        }
    }

    #[test]
    fn test_renderable_filters_internal_ids() {
        let view = graph().renderable();
        let ids: Vec<_> = view.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "string", "B"]);
        assert_eq!(view.edges.len(), 3);
        assert!(!view.edges.iter().any(|e| e.from.is_empty() || e.from == "#/root"));
    }

    #[test]
    fn test_blank_ids_filtered() {
        let g = Graph {
            nodes: vec![Node::new("  ", "blank"), Node::new("x", "x")],
            edges: vec![Edge::new("x", " ", "items")],
        };
        let view = g.renderable();
        assert_eq!(view.nodes, vec![Node::new("x", "x")]);
        assert!(view.edges.is_empty());
    }

    #[test]
    fn test_focus() {
        let view = graph().focus("A").unwrap();
        assert_eq!(view.focus.label, "A");
        assert_eq!(view.neighbors, vec!["#/root", "string", "B", ""]);
        assert_eq!(view.highlighted.len(), 4);
        assert_eq!(view.dimmed, Vec::<String>::new());

        let view = graph().focus("string").unwrap();
        assert_eq!(view.neighbors, vec!["A", "A-array"]);
        assert_eq!(view.dimmed, vec!["#/root", "", "B"]);

        assert!(graph().focus("missing").is_none());
    }

    #[test]
    fn test_stats() {
        let stats = graph().stats();
        assert_eq!(stats.nodes, 5);
        assert_eq!(stats.refs, 2);
        assert_eq!(stats.extends, 1);
        assert_eq!(stats.properties, 1);
        assert_eq!(stats.items, 1);
        assert_eq!(stats.unions, 0);
    }
}
