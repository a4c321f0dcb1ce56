//! The layered bin DAG: one layer per binning scheme, fully connected
//! between consecutive layers, with a single root and a single leaf.
pub mod dag;
pub mod error;
pub mod node;
pub mod path;

// Re-export key types for convenient access
pub use dag::{BinDag, Layer, LeafOp, Phase};
pub use error::DagError;
pub use node::{Node, NodeId, NodeKind, LEAF_ID, ROOT_ID};
pub use path::{BinKey, NodePath};
