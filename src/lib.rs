//! # schemagraph
//!
//! Turns the `definitions` of a JSON Schema into a labeled graph of nodes and
//! edges, ready to be handed to a graph renderer.
//!
//! ## Quick Start
//!
//! ### From the command line
//!
//! ```bash
//! schemagraph build schema.json -o graph.json
//! schemagraph serve --http-port 6340
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use schemagraph::prelude::*;
//!
//! let document = SchemaDocument::from_json_str(r##"{
//!     "definitions": {
//!         "T3JkZXI=": {"properties": {"lines": {"type": "array", "items": {"$ref": "#/definitions/TGluZQ=="}}}},
//!         "TGluZQ==": {"type": "object", "title": "Line"}
//!     }
//! }"##).unwrap();
//!
//! let graph = SchemaGraphBuilder::new().build_document(&document).unwrap();
//! assert_eq!(graph.node("T3JkZXI=").unwrap().label, "Order");
//! ```
//!
//! ## Crate Structure
//!
//! - [`schemagraph-core`](https://docs.rs/schemagraph-core) - fragments, label decoding, the graph builder
//! - [`schemagraph-storage`](https://docs.rs/schemagraph-storage) - document loading, stored graph records
//! - [`schemagraph-api`](https://docs.rs/schemagraph-api) - REST API
//!
//! ## Edge Labels
//!
//! - `$ref` - a fragment references a definition
//! - `union` / `extends` - `anyOf` / `allOf` membership
//! - `property: <name>` - object property
//! - `items` / `item[<index>]` - array element

// Re-export core types
pub use schemagraph_core::{
    to_graph, BuilderConfig, Definitions, Edge, Error, FocusView, Graph, GraphStats, IdGenerator,
    Node, RefEncoding, Result, SchemaDocument, SchemaFragment, SchemaGraphBuilder, SequentialIds,
    UuidIds,
};

// Re-export storage
pub use schemagraph_storage::{load_document, write_graph, GraphRecord, GraphStore};

// Re-export API
pub use schemagraph_api::RestApi;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        BuilderConfig, Definitions, Edge, Error, Graph, GraphStore, Node, RefEncoding, Result,
        SchemaDocument, SchemaFragment, SchemaGraphBuilder, SequentialIds,
    };
}

/// Reference label decoding
pub mod label {
    pub use schemagraph_core::label::{
        node_label_from_ref, resolve_ref_key, DEFINITIONS_PREFIX, ROOT_MARKER,
    };
}
