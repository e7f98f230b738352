// Reading schema documents and writing graph output
use atomicwrites::{AtomicFile, OverwriteBehavior};
use schemagraph_core::{Error, Graph, Result, SchemaDocument};
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Read and parse a schema document from a JSON file
pub fn load_document<P: AsRef<Path>>(path: P) -> Result<SchemaDocument> {
    let path = path.as_ref();
    let input = std::fs::read_to_string(path)?;
    debug!("Loaded {} bytes from {:?}", input.len(), path);
    SchemaDocument::from_json_str(&input)
}

/// Write a graph as pretty JSON, replacing `path` atomically
pub fn write_graph<P: AsRef<Path>>(path: P, graph: &Graph) -> Result<()> {
    write_json(path.as_ref(), graph)
}

pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let data = serde_json::to_vec_pretty(value)?;
    AtomicFile::new(path, OverwriteBehavior::AllowOverwrite)
        .write(|f| f.write_all(&data))
        .map_err(|e| Error::Storage(format!("failed to write {:?}: {}", path, e)))?;
    debug!("Wrote {} bytes to {:?}", data.len(), path);
    Ok(())
}
