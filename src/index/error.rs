//! Defines the error types for the histos index.
use crate::graph::DagError;
use crate::store::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error(transparent)]
    Dag(#[from] DagError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Malformed histos name '{0}'")]
    MalformedName(String),
    /// A persisted container names a vertex the rebuilt DAG does not have.
    #[error("Mismatch of node '{token}' between histos '{name}' and binsets")]
    UnknownNode { name: String, token: String },
    #[error("Histos '{0}' does not select exactly one bin of every layer")]
    IncompletePath(String),
    #[error("Unknown layer '{0}'")]
    UnknownLayer(String),
    #[error("Bin {bin} is out of range for layer '{layer}'")]
    BinOutOfRange { layer: String, bin: usize },
}
