//! Schema-to-graph traversal
//!
//! Every fragment reduces to a single node id plus side effects on the graph
//! under construction. Composite shapes derive their id from their children:
//!
//! | shape        | returned id                         | edges                          |
//! |--------------|-------------------------------------|--------------------------------|
//! | `$ref`       | id of the referenced definition     | `current -> key` (`$ref`)      |
//! | `anyOf`      | child ids joined with `\|`          | `composite -> child` (`union`) |
//! | `allOf`      | child ids joined with `&`           | `composite -> child` (`extends`) |
//! | `properties` | sorted child ids joined with `&`    | `current -> child` (`property: name`) |
//! | array        | `<current>-array`                   | `array -> item` (`items` / `item[i]`) |
//! | `type`       | type name, or names joined with `\|` | none                          |
//!
//! Unresolvable references and unrecognized fragments get a fresh id from the
//! builder's [`IdGenerator`].

use crate::document::SchemaDocument;
use crate::fragment::{ArrayItems, Definitions, SchemaFragment};
use crate::graph::{Edge, Graph, Node, LABEL_EXTENDS, LABEL_ITEMS, LABEL_REF, LABEL_UNION};
use crate::ids::{IdGenerator, UuidIds};
use crate::label::{node_label_from_ref, resolve_ref_key, RefEncoding, ROOT_MARKER};
use crate::{Error, Result};
use ahash::AHashSet;
use tracing::debug;

const UNKNOWN_LABEL: &str = "unknown";
const OBJECT_LABEL: &str = "object";
const ARRAY_LABEL: &str = "Array of items";

/// Builder settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BuilderConfig {
    /// Encoding of definition keys, used when labeling nodes
    pub ref_encoding: RefEncoding,

    /// Maximum nesting depth of the walk; `None` means unbounded
    pub max_depth: Option<usize>,
}

impl BuilderConfig {
    pub fn with_ref_encoding(mut self, encoding: RefEncoding) -> Self {
        self.ref_encoding = encoding;
        self
    }

    pub fn with_max_depth(mut self, limit: usize) -> Self {
        self.max_depth = Some(limit);
        self
    }
}

/// Converts a definitions map into a [`Graph`].
///
/// Each call to [`build`](Self::build) starts from an empty graph; only the
/// id generator carries over between calls.
#[derive(Debug, Clone, Default)]
pub struct SchemaGraphBuilder<G: IdGenerator = UuidIds> {
    config: BuilderConfig,
    ids: G,
}

impl SchemaGraphBuilder<UuidIds> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<G: IdGenerator> SchemaGraphBuilder<G> {
    pub fn with_config(mut self, config: BuilderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_id_generator<H: IdGenerator>(self, ids: H) -> SchemaGraphBuilder<H> {
        SchemaGraphBuilder {
            config: self.config,
            ids,
        }
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Seed a walk from every definition, in declaration order.
    pub fn build(&mut self, definitions: &Definitions) -> Result<Graph> {
        debug!("Building schema graph from {} definitions", definitions.len());

        let mut ctx = BuildContext::new(definitions, &self.config, &mut self.ids);
        for (key, fragment) in definitions.iter() {
            ctx.seed(key, fragment)?;
        }
        Ok(ctx.finish())
    }

    /// Like [`build`](Self::build), then walks the document's root schema
    /// (if any) under the `#/root` identity.
    pub fn build_document(&mut self, document: &SchemaDocument) -> Result<Graph> {
        debug!(
            "Building schema graph from document ({} definitions, root: {})",
            document.definitions.len(),
            document.root.is_some()
        );

        let mut ctx = BuildContext::new(&document.definitions, &self.config, &mut self.ids);
        for (key, fragment) in document.definitions.iter() {
            ctx.seed(key, fragment)?;
        }
        if let Some(root) = &document.root {
            ctx.seed(ROOT_MARKER, root)?;
        }
        Ok(ctx.finish())
    }
}

/// Build a graph with default settings and random placeholder ids
pub fn to_graph(definitions: &Definitions) -> Result<Graph> {
    SchemaGraphBuilder::new().build(definitions)
}

/// State of one build, borrowed by the whole recursive walk
struct BuildContext<'a, G: IdGenerator> {
    definitions: &'a Definitions,
    config: &'a BuilderConfig,
    ids: &'a mut G,
    graph: Graph,
    registered: AHashSet<String>,
    visited: AHashSet<String>,
    depth: usize,
    placeholders: usize,
}

impl<'a, G: IdGenerator> BuildContext<'a, G> {
    fn new(definitions: &'a Definitions, config: &'a BuilderConfig, ids: &'a mut G) -> Self {
        Self {
            definitions,
            config,
            ids,
            graph: Graph::new(),
            registered: AHashSet::new(),
            visited: AHashSet::new(),
            depth: 0,
            placeholders: 0,
        }
    }

    fn finish(self) -> Graph {
        debug!(
            "Schema graph built: {} nodes, {} edges, {} placeholders",
            self.graph.nodes.len(),
            self.graph.edges.len(),
            self.placeholders
        );
        self.graph
    }

    // First registration of an id wins
    fn add_node(&mut self, id: &str, label: impl Into<String>) {
        if self.registered.insert(id.to_string()) {
            self.graph.nodes.push(Node::new(id, label));
        }
    }

    fn add_edge(&mut self, from: &str, to: &str, label: impl Into<String>) {
        self.graph.edges.push(Edge::new(from, to, label));
    }

    fn label_for(&self, key: &str) -> Result<String> {
        node_label_from_ref(key, self.config.ref_encoding)
    }

    /// Seed calls always run the full dispatch, even for keys reached earlier.
    fn seed(&mut self, key: &str, fragment: &SchemaFragment) -> Result<()> {
        let label = self.label_for(key)?;
        self.add_node(key, label);
        self.visited.insert(key.to_string());
        self.walk(fragment, key)?;
        Ok(())
    }

    fn walk(&mut self, fragment: &SchemaFragment, current: &str) -> Result<String> {
        if let Some(limit) = self.config.max_depth {
            if self.depth >= limit {
                return Err(Error::DepthExceeded {
                    limit,
                    identity: current.to_string(),
                });
            }
        }

        self.depth += 1;
        let result = self.dispatch(fragment, current);
        self.depth -= 1;
        result
    }

    fn dispatch(&mut self, fragment: &SchemaFragment, current: &str) -> Result<String> {
        match fragment {
            SchemaFragment::Ref { reference, title } => {
                self.walk_ref(reference, title.as_deref(), current)
            }
            SchemaFragment::AnyOf { variants, title } => {
                self.walk_any_of(variants, title.as_deref(), current)
            }
            SchemaFragment::AllOf { parts, title } => {
                self.walk_all_of(parts, title.as_deref(), current)
            }
            SchemaFragment::Properties { properties, title } => {
                self.walk_properties(properties, title.as_deref(), current)
            }
            SchemaFragment::Array { items, .. } => self.walk_array(items, current),
            SchemaFragment::Type { types, title } => {
                let id = types.join("|");
                self.add_node(&id, title.as_deref().unwrap_or(OBJECT_LABEL));
                Ok(id)
            }
            SchemaFragment::Unknown { title } => {
                let id = self.ids.fresh();
                self.add_node(&id, title.as_deref().unwrap_or(UNKNOWN_LABEL));
                Ok(id)
            }
        }
    }

    fn walk_ref(&mut self, reference: &str, title: Option<&str>, current: &str) -> Result<String> {
        let key = resolve_ref_key(reference);
        if key == current {
            return Ok(current.to_string());
        }

        let label = self.label_for(reference)?;
        self.add_node(current, label);
        self.add_edge(current, key, LABEL_REF);

        let definitions = self.definitions;
        match definitions.get(key) {
            Some(target) => self.follow(key, target),
            None => {
                let id = self.ids.fresh();
                debug!("Unresolved reference {} from {}, placeholder {}", reference, current, id);
                self.placeholders += 1;
                self.add_node(&id, title.unwrap_or(UNKNOWN_LABEL));
                Ok(id)
            }
        }
    }

    // Cycle guard: a definition already entered in this build is not re-entered
    fn follow(&mut self, key: &str, target: &SchemaFragment) -> Result<String> {
        if !self.visited.insert(key.to_string()) {
            return Ok(key.to_string());
        }
        self.walk(target, key)
    }

    fn walk_any_of(
        &mut self,
        variants: &[SchemaFragment],
        title: Option<&str>,
        current: &str,
    ) -> Result<String> {
        let children = variants
            .iter()
            .map(|variant| self.walk(variant, current))
            .collect::<Result<Vec<_>>>()?;

        let id = children.join("|");
        let label = match title {
            Some(title) => title.to_string(),
            None => format!("anyOf {}", id),
        };
        self.add_node(&id, label);
        for child in &children {
            self.add_edge(&id, child, LABEL_UNION);
        }
        Ok(id)
    }

    fn walk_all_of(
        &mut self,
        parts: &[SchemaFragment],
        title: Option<&str>,
        current: &str,
    ) -> Result<String> {
        let mut children = Vec::with_capacity(parts.len());
        for part in parts {
            let child = self.walk(part, current)?;
            if child != current {
                children.push(child);
            }
        }

        // All parts pointing back at `current` leaves the empty id; kept as-is.
        let id = children.join("&");
        let label = match title {
            Some(title) => title.to_string(),
            None => format!("allOf {}", id),
        };
        self.add_node(&id, label);
        for child in &children {
            self.add_edge(&id, child, LABEL_EXTENDS);
        }
        Ok(id)
    }

    fn walk_properties(
        &mut self,
        properties: &[(String, SchemaFragment)],
        title: Option<&str>,
        current: &str,
    ) -> Result<String> {
        let mut members = Vec::with_capacity(properties.len());
        for (name, schema) in properties {
            let child = self.walk(schema, current)?;
            members.push((child, Edge::property_label(name)));
        }
        // sort_by is stable: equal ids keep declaration order
        members.sort_by(|a, b| a.0.cmp(&b.0));

        let id = members
            .iter()
            .map(|(child, _)| child.as_str())
            .collect::<Vec<_>>()
            .join("&");

        for (child, label) in &members {
            if child != current {
                self.add_edge(current, child, label.as_str());
            }
        }
        self.add_node(&id, title.unwrap_or(OBJECT_LABEL));
        Ok(id)
    }

    fn walk_array(&mut self, items: &ArrayItems, current: &str) -> Result<String> {
        let array_id = format!("{}-array", current);
        self.add_node(&array_id, ARRAY_LABEL);

        match items {
            ArrayItems::Tuple(elements) => {
                for (index, element) in elements.iter().enumerate() {
                    let identity = format!("{}-item-{}", array_id, index);
                    let item_id = self.walk(element, &identity)?;
                    if item_id != array_id {
                        self.add_edge(&array_id, &item_id, Edge::item_label(index));
                    }
                }
            }
            ArrayItems::Single(element) => {
                let identity = format!("{}-item", array_id);
                let item_id = self.walk(element, &identity)?;
                if item_id != array_id {
                    self.add_edge(&array_id, &item_id, LABEL_ITEMS);
                }
            }
        }

        Ok(array_id)
    }
}
