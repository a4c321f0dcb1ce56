//! Defines the `Node` and its associated types, representing one vertex of
//! the bin DAG.

use petgraph::graph::NodeIndex;

/// A unique, stable identifier for a node within the graph.
///
/// This is a type alias for `petgraph::graph::NodeIndex` to abstract the
/// underlying graph implementation. Indices are handed out in insertion
/// order, so bin vertices of earlier layers always have smaller indices.
pub type NodeId = NodeIndex;

pub const ROOT_ID: &str = "root";
pub const LEAF_ID: &str = "leaf";

/// What a vertex stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// The shared entry vertex, connected to every bin of the first layer.
    Root,
    /// The shared exit vertex, connected from every bin of the last layer.
    Leaf,
    /// Bin `bin` of layer `layer` (both indices in insertion order).
    Bin { layer: usize, bin: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// String identifier, unique within the DAG. This is what persisted
    /// histos names are made of.
    pub id: String,
    pub kind: NodeKind,
}

impl Node {
    pub fn root() -> Self { Self { id: ROOT_ID.to_string(), kind: NodeKind::Root } }
    pub fn leaf() -> Self { Self { id: LEAF_ID.to_string(), kind: NodeKind::Leaf } }

    pub fn bin(layer_name: &str, layer: usize, bin: usize) -> Self {
        Self { id: bin_node_id(layer_name, bin), kind: NodeKind::Bin { layer, bin } }
    }

    pub fn is_sentinel(&self) -> bool { !matches!(self.kind, NodeKind::Bin { .. }) }

    pub fn layer(&self) -> Option<usize> {
        match self.kind {
            NodeKind::Bin { layer, .. } => Some(layer),
            _ => None,
        }
    }
}

/// Identifier of bin `bin` in layer `layer_name`, e.g. `pt0`.
///
/// Ids are not parsed back; `BinDag::add_layer` rejects a layer whose ids
/// clash with ones already in the DAG (`q` bin 10 vs `q1` bin 0).
pub fn bin_node_id(layer_name: &str, bin: usize) -> String {
    format!("{}{}", layer_name, bin)
}

/// Checks that `name` can prefix bin node ids and survive the `__`-joined
/// histos naming scheme.
pub(crate) fn validate_layer_name(name: &str) -> Result<(), &'static str> {
    if name.is_empty() {
        return Err("name is empty");
    }
    if name.contains("__") {
        return Err("name contains the '__' separator");
    }
    if name.starts_with('_') || name.ends_with('_') {
        return Err("name starts or ends with '_', which would merge with the '__' separator");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("pt")]
    #[case("eta")]
    #[case("q_2")]
    #[case("x_bj")]
    #[case("q2")]
    #[case("x1")]
    fn test_valid_layer_names(#[case] name: &str) {
        assert!(validate_layer_name(name).is_ok());
    }

    #[rstest]
    #[case("")]
    #[case("p__t")]
    #[case("pt_")]
    #[case("_pt")]
    fn test_invalid_layer_names(#[case] name: &str) {
        assert!(validate_layer_name(name).is_err());
    }

    #[test]
    fn test_bin_node() {
        let node = Node::bin("pt", 2, 7);
        assert_eq!(node.id, "pt7");
        assert_eq!(node.layer(), Some(2));
        assert!(!node.is_sentinel());
        assert!(Node::root().is_sentinel());
        assert_eq!(Node::leaf().layer(), None);
    }
}
