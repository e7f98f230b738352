pub mod files;
pub mod store;

pub use files::{load_document, write_graph};
pub use store::{GraphRecord, GraphStore};
