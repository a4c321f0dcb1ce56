//! Defines the error types for the DAG engine.
//!
//! Every variant is a precondition violation: the caller asked for a layer
//! the engine cannot accept. The engine is left unchanged when one is returned.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DagError {
    #[error("Cannot add layer '{0}': leaf operations have already been executed")]
    Finalized(String),
    #[error("Layer '{0}' has no bins")]
    EmptyLayer(String),
    #[error("Layer '{0}' already exists")]
    DuplicateLayer(String),
    #[error("Layer '{layer}' would reuse node id '{id}'")]
    IdCollision { layer: String, id: String },
    #[error("Invalid layer name '{name}': {reason}")]
    InvalidLayerName { name: String, reason: &'static str },
}
