// Integration tests for schemagraph
use schemagraph_core::{
    label::node_label_from_ref, BuilderConfig, Definitions, Error, RefEncoding, SchemaDocument,
    SchemaGraphBuilder, SequentialIds,
};
use schemagraph_storage::{load_document, write_graph, GraphRecord, GraphStore};
use serde_json::json;
use std::collections::HashSet;

fn deterministic() -> SchemaGraphBuilder<SequentialIds> {
    SchemaGraphBuilder::new().with_id_generator(SequentialIds::default())
}

// Keys are base64: "UGV0"=Pet, "T3duZXI="=Owner, "VGFn"=Tag, "Q2F0"=Cat
fn petstore() -> serde_json::Value {
    json!({
        "definitions": {
            "UGV0": {
                "title": "Pet",
                "properties": {
                    "name": {"type": "string"},
                    "owner": {"$ref": "#/definitions/T3duZXI="},
                    "tags": {"type": "array", "items": {"$ref": "#/definitions/VGFn"}},
                    "status": {"anyOf": [{"type": "string"}, {"type": "null"}]}
                }
            },
            "T3duZXI=": {
                "properties": {
                    "pets": {"type": "array", "items": {"$ref": "#/definitions/UGV0"}}
                }
            },
            "VGFn": {"type": "object", "title": "Tag"},
            "Q2F0": {
                "allOf": [
                    {"$ref": "#/definitions/UGV0"},
                    {"properties": {"indoor": {"type": "boolean"}}}
                ]
            }
        }
    })
}

#[test]
fn test_petstore_graph() {
    let document = SchemaDocument::from_value(&petstore()).unwrap();
    let graph = deterministic().build_document(&document).unwrap();

    assert_eq!(graph.node("UGV0").unwrap().label, "Pet");
    assert_eq!(graph.node("T3duZXI=").unwrap().label, "Owner");
    assert_eq!(graph.node("Q2F0").unwrap().label, "Cat");

    assert!(graph.has_edge("UGV0", "T3duZXI=", "$ref"));
    assert!(graph.has_edge("UGV0", "UGV0-array", "property: tags"));
    assert!(graph.has_edge("UGV0", "string|null", "property: status"));
    assert!(graph.has_edge("string|null", "null", "union"));
    assert!(graph.has_edge("Q2F0", "UGV0", "$ref"));
    assert!(graph.has_edge("Q2F0", "boolean", "property: indoor"));

    // the cycle Pet -> Owner -> Pet is cut by the visited set
    assert!(graph.has_edge("T3duZXI=-array-item", "UGV0", "$ref"));
}

#[test]
fn test_node_ids_unique() {
    let document = SchemaDocument::from_value(&petstore()).unwrap();
    let graph = deterministic().build_document(&document).unwrap();

    let mut seen = HashSet::new();
    for node in &graph.nodes {
        assert!(seen.insert(node.id.clone()), "duplicate node id {}", node.id);
    }
}

#[test]
fn test_repeated_builds_identical() {
    let document = SchemaDocument::from_value(&petstore()).unwrap();
    let first = deterministic().build_document(&document).unwrap();
    let second = deterministic().build_document(&document).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_random_ids_consistent_within_build() {
    let definitions = Definitions::from_value(&json!({
        "QQ==": {"properties": {"ghost": {"$ref": "#/definitions/R2hvc3Q="}}}
    }))
    .unwrap();
    let graph = SchemaGraphBuilder::new().build(&definitions).unwrap();

    // the property edge points at the placeholder node that was registered
    let edge = graph
        .edges
        .iter()
        .find(|e| e.label == "property: ghost")
        .unwrap();
    assert_eq!(graph.node(&edge.to).unwrap().label, "unknown");
    assert!(graph.has_edge("QQ==", "R2hvc3Q=", "$ref"));
    assert!(!graph.contains_node("R2hvc3Q="));
}

#[test]
fn test_plain_cycle_terminates() {
    let definitions = Definitions::from_value(&json!({
        "A": {"$ref": "#/definitions/B"},
        "B": {"$ref": "#/definitions/A"}
    }))
    .unwrap();
    let mut builder = deterministic()
        .with_config(BuilderConfig::default().with_ref_encoding(RefEncoding::Plain));
    let graph = builder.build(&definitions).unwrap();

    assert!(graph.contains_node("A"));
    assert!(graph.contains_node("B"));
    assert!(graph.edges.iter().any(|e| e.label == "$ref"));
    assert!(!graph.edges.iter().any(|e| e.from == e.to));
}

#[test]
fn test_malformed_encoding_fails_build() {
    let definitions = Definitions::from_value(&json!({
        "QQ==": {"$ref": "#/definitions/%%%"}
    }))
    .unwrap();
    let err = deterministic().build(&definitions).unwrap_err();
    assert!(matches!(err, Error::MalformedReference { .. }));
}

#[test]
fn test_label_round_trip() {
    assert_eq!(node_label_from_ref("#/definitions/Rm9v", RefEncoding::Base64).unwrap(), "Foo");
    assert_eq!(
        node_label_from_ref("#/definitions/Rm9v@v2", RefEncoding::Base64).unwrap(),
        "Foo@v2"
    );
    assert_eq!(
        node_label_from_ref("#/root/anything", RefEncoding::Base64).unwrap(),
        "#/root/anything"
    );
}

#[test]
fn test_file_round_trip_and_store() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("petstore.json");
    std::fs::write(&input, serde_json::to_vec(&petstore()).unwrap()).unwrap();

    let document = load_document(&input).unwrap();
    let graph = deterministic().build_document(&document).unwrap();

    let output = dir.path().join("graph.json");
    write_graph(&output, &graph).unwrap();
    let written: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&output).unwrap()).unwrap();
    assert_eq!(written["nodes"].as_array().unwrap().len(), graph.nodes.len());
    assert_eq!(written["edges"].as_array().unwrap().len(), graph.edges.len());

    let store = GraphStore::open(dir.path().join("store")).unwrap();
    let source = std::fs::read(&input).unwrap();
    store.save(GraphRecord::new("petstore", &source, graph.clone())).unwrap();

    let reopened = GraphStore::open(dir.path().join("store")).unwrap();
    assert_eq!(reopened.get("petstore").unwrap().graph, graph);
}
