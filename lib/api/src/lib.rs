//! HTTP surface for schemagraph
pub mod rest;

pub use rest::{configure, ApiState, RestApi};
