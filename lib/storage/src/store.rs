use crate::files::write_json;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use schemagraph_core::{Error, Graph, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

const RECORD_EXTENSION: &str = "json";

/// A built graph as kept on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphRecord {
    pub name: String,
    /// SHA-256 of the input document the graph was built from
    pub source_digest: String,
    pub created_at: DateTime<Utc>,
    pub graph: Graph,
}

impl GraphRecord {
    pub fn new(name: impl Into<String>, source: &[u8], graph: Graph) -> Self {
        Self {
            name: name.into(),
            source_digest: format!("{:x}", Sha256::digest(source)),
            created_at: Utc::now(),
            graph,
        }
    }
}

/// Named graph records, one JSON file per record, cached in memory
pub struct GraphStore {
    records: Arc<RwLock<HashMap<String, Arc<GraphRecord>>>>,
    data_dir: PathBuf,
}

impl GraphStore {
    /// Open (or create) a store directory and load the records in it
    pub fn open<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&data_dir)?;

        let mut records = HashMap::new();
        for entry in std::fs::read_dir(&data_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(RECORD_EXTENSION) {
                continue;
            }
            match Self::read_record(&path) {
                Ok(record) => {
                    records.insert(record.name.clone(), Arc::new(record));
                }
                Err(e) => warn!("Skipping unreadable graph record {:?}: {}", path, e),
            }
        }

        info!("Graph store opened at {:?} with {} records", data_dir, records.len());

        Ok(Self {
            records: Arc::new(RwLock::new(records)),
            data_dir,
        })
    }

    fn read_record(path: &Path) -> Result<GraphRecord> {
        let data = std::fs::read(path)?;
        Ok(serde_json::from_slice(&data)?)
    }

    fn record_path(&self, name: &str) -> PathBuf {
        self.data_dir.join(format!("{}.{}", name, RECORD_EXTENSION))
    }

    /// Write a record, replacing any record with the same name
    pub fn save(&self, record: GraphRecord) -> Result<Arc<GraphRecord>> {
        validate_name(&record.name)?;

        // Write lock spans the file write and the cache insert
        let mut records = self.records.write();
        let path = self.record_path(&record.name);
        write_json(&path, &record)?;

        let record = Arc::new(record);
        records.insert(record.name.clone(), record.clone());
        drop(records);
        info!(
            "Stored graph '{}' ({} nodes, {} edges)",
            record.name,
            record.graph.nodes.len(),
            record.graph.edges.len()
        );
        Ok(record)
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<Arc<GraphRecord>> {
        self.records.read().get(name).cloned()
    }

    /// Returns `false` if no record had that name
    pub fn delete(&self, name: &str) -> Result<bool> {
        let mut records = self.records.write();
        if records.remove(name).is_none() {
            return Ok(false);
        }
        let path = self.record_path(name);
        if path.exists() {
            std::fs::remove_file(&path)?;
        }
        Ok(true)
    }

    /// Record names, sorted
    #[must_use]
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<_> = self.records.read().keys().cloned().collect();
        names.sort();
        names
    }

    #[inline]
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

// Names become file names, so keep them to a safe alphabet
fn validate_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidName(name.to_string()))
    }
}
