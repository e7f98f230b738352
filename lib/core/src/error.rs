use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Malformed reference encoding in '{key}': {reason}")]
    MalformedReference { key: String, reason: String },

    #[error("Document has neither a 'definitions' nor a 'schema' field")]
    MissingDefinitions,

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Schema nesting exceeds depth limit {limit} under '{identity}'")]
    DepthExceeded { limit: usize, identity: String },

    #[error("Graph not found: {0}")]
    GraphNotFound(String),

    #[error("Invalid graph name: {0}")]
    InvalidName(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
