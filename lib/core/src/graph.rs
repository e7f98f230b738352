// Rendered schema graph - nodes and edges keyed by structural ids
use serde::{Deserialize, Serialize};

/// Edge label for a `$ref` relationship
pub const LABEL_REF: &str = "$ref";
/// Edge label for `anyOf` membership
pub const LABEL_UNION: &str = "union";
/// Edge label for `allOf` membership
pub const LABEL_EXTENDS: &str = "extends";
/// Edge label for a homogeneous array element
pub const LABEL_ITEMS: &str = "items";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub label: String,
}

impl Node {
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

impl Edge {
    #[inline]
    #[must_use]
    pub fn new(from: impl Into<String>, to: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            label: label.into(),
        }
    }

    /// Label for property membership: `property: <name>`
    #[must_use]
    pub fn property_label(name: &str) -> String {
        format!("property: {}", name)
    }

    /// Label for a tuple array element: `item[<index>]`
    #[must_use]
    pub fn item_label(index: usize) -> String {
        format!("item[{}]", index)
    }

    /// True if either endpoint is `id`
    #[inline]
    pub fn touches(&self, id: &str) -> bool {
        self.from == id || self.to == id
    }
}

/// The output of a build: nodes with unique ids, edges in emission order.
///
/// Edges may name ids that have no entry in `nodes`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    pub fn edges_from<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| e.from == id)
    }

    pub fn edges_to<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| e.to == id)
    }

    pub fn has_edge(&self, from: &str, to: &str, label: &str) -> bool {
        self.edges
            .iter()
            .any(|e| e.from == from && e.to == to && e.label == label)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}
