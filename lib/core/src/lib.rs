//! # schemagraph Core
//!
//! Core library for schemagraph.
//!
//! This crate turns the `definitions` map of a JSON Schema into a labeled
//! graph for rendering:
//!
//! - [`SchemaFragment`] - a schema object classified into one shape
//! - [`Definitions`] - named fragments in declaration order
//! - [`SchemaGraphBuilder`] - the traversal producing a [`Graph`]
//! - [`Node`] / [`Edge`] - the output elements
//! - [`label`] - base64 definition-key decoding for node labels
//!
//! ## Example
//!
//! ```rust
//! use schemagraph_core::{Definitions, SchemaGraphBuilder, SequentialIds};
//! use serde_json::json;
//!
//! // "UGV0" is base64 for "Pet"
//! let definitions = Definitions::from_value(&json!({
//!     "UGV0": {
//!         "properties": {
//!             "name": {"type": "string"},
//!             "tags": {"type": "array", "items": {"type": "string"}}
//!         }
//!     }
//! })).unwrap();
//!
//! let mut builder = SchemaGraphBuilder::new().with_id_generator(SequentialIds::default());
//! let graph = builder.build(&definitions).unwrap();
//!
//! assert_eq!(graph.node("UGV0").unwrap().label, "Pet");
//! assert!(graph.has_edge("UGV0", "UGV0-array", "property: tags"));
//! ```

pub mod builder;
pub mod document;
pub mod error;
pub mod fragment;
pub mod graph;
pub mod ids;
pub mod label;
pub mod view;

pub use builder::{to_graph, BuilderConfig, SchemaGraphBuilder};
pub use document::SchemaDocument;
pub use error::{Error, Result};
pub use fragment::{ArrayItems, Definitions, SchemaFragment};
pub use graph::{Edge, Graph, Node};
pub use ids::{IdGenerator, SequentialIds, UuidIds};
pub use label::{node_label_from_ref, RefEncoding};
pub use view::{FocusView, GraphStats};
