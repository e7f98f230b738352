// Graph building benchmarks over synthetic definition sets
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use schemagraph_core::{
    BuilderConfig, Definitions, RefEncoding, SchemaDocument, SchemaGraphBuilder, SequentialIds,
};
use serde_json::{json, Map, Value};

/// `size` definitions, each with a handful of properties referencing neighbors
fn generate_document(size: usize) -> Value {
    let mut defs = Map::new();
    for i in 0..size {
        let next = (i + 1) % size;
        let prev = (i + size - 1) % size;
        defs.insert(
            format!("Def{}", i),
            json!({
                "title": format!("Definition {}", i),
                "properties": {
                    "id": {"type": "integer"},
                    "name": {"type": ["string", "null"]},
                    "next": {"$ref": format!("#/definitions/Def{}", next)},
                    "history": {"type": "array", "items": {"$ref": format!("#/definitions/Def{}", prev)}},
                    "variant": {"anyOf": [
                        {"$ref": format!("#/definitions/Def{}", next)},
                        {"allOf": [{"type": "object"}, {"properties": {"flag": {"type": "boolean"}}}]}
                    ]}
                }
            }),
        );
    }
    json!({ "definitions": Value::Object(defs) })
}

fn generate_definitions(size: usize) -> Definitions {
    Definitions::from_value(&generate_document(size)["definitions"]).unwrap()
}

fn benchmark_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    for size in [10, 100, 500].iter() {
        let definitions = generate_definitions(*size);
        group.bench_with_input(BenchmarkId::new("schemagraph", size), &definitions, |b, defs| {
            b.iter(|| {
                let mut builder = SchemaGraphBuilder::new()
                    .with_config(BuilderConfig::default().with_ref_encoding(RefEncoding::Plain))
                    .with_id_generator(SequentialIds::default());
                black_box(builder.build(defs).unwrap())
            });
        });
    }

    group.finish();
}

fn benchmark_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for size in [100, 500].iter() {
        let input = generate_document(*size).to_string();
        group.bench_with_input(BenchmarkId::new("document", size), &input, |b, input| {
            b.iter(|| black_box(SchemaDocument::from_json_str(input).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_build, benchmark_parse);
criterion_main!(benches);
