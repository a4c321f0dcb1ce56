//! path.rs
//! A root-to-leaf selection of one bin per layer.

use super::dag::BinDag;
use super::node::{NodeId, LEAF_ID, ROOT_ID};
use smallvec::SmallVec;
use std::collections::BTreeSet;

/// The bin vertices of a path, sentinels excluded, in layer order.
///
/// This is the key under which a histos container is indexed. Two paths
/// through the same DAG are the same combination exactly when their keys
/// are equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BinKey(SmallVec<[NodeId; 8]>);

impl BinKey {
    pub fn as_slice(&self) -> &[NodeId] { &self.0 }
    pub fn len(&self) -> usize { self.0.len() }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ { self.0.iter().copied() }
}

/// A set of DAG vertices describing one traversal: the root, the leaf, and
/// one bin vertex per layer.
///
/// Paths are transient. They are produced by enumeration or assembled by
/// callers (and by name decoding) to query a combination.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodePath {
    nodes: BTreeSet<NodeId>,
}

impl NodePath {
    pub fn new() -> Self { Self::default() }

    pub fn from_nodes(nodes: impl IntoIterator<Item = NodeId>) -> Self {
        Self { nodes: nodes.into_iter().collect() }
    }

    pub fn insert(&mut self, node: NodeId) -> bool { self.nodes.insert(node) }
    pub fn contains(&self, node: NodeId) -> bool { self.nodes.contains(&node) }
    pub fn len(&self) -> usize { self.nodes.len() }
    pub fn is_empty(&self) -> bool { self.nodes.is_empty() }
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ { self.nodes.iter().copied() }

    /// The path's bin vertices in layer-insertion order.
    pub fn bin_nodes(&self, dag: &BinDag) -> BinKey {
        // NodeIds are allocated layer by layer, so set order is layer order.
        BinKey(self.nodes.iter().copied().filter(|&n| n != dag.root() && n != dag.leaf()).collect())
    }

    /// True if the path holds both sentinels and exactly one bin of every layer.
    pub fn is_complete(&self, dag: &BinDag) -> bool {
        if !self.contains(dag.root()) || !self.contains(dag.leaf()) {
            return false;
        }
        let mut seen = vec![false; dag.layers().len()];
        for node in self.bin_nodes(dag).iter() {
            match dag.node(node).and_then(|n| n.layer()) {
                Some(layer) if seen.get(layer) == Some(&false) => seen[layer] = true,
                _ => return false,
            }
        }
        seen.into_iter().all(|s| s)
    }

    /// Display form, e.g. `root -> eta0 -> pt2 -> leaf`.
    pub fn path_string(&self, dag: &BinDag) -> String {
        let mut parts = Vec::with_capacity(self.nodes.len());
        if self.contains(dag.root()) {
            parts.push(ROOT_ID.to_string());
        }
        for node in self.bin_nodes(dag).iter() {
            parts.push(dag.node(node).map_or_else(|| format!("<{}>", node.index()), |n| n.id.clone()));
        }
        if self.contains(dag.leaf()) {
            parts.push(LEAF_ID.to_string());
        }
        parts.join(" -> ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binning::BinScheme;

    fn scheme(name: &str, nbins: usize) -> BinScheme {
        let mut s = BinScheme::new(name, name);
        for i in 0..nbins {
            s.add_custom_bin(format!("{} bin {}", name, i));
        }
        s
    }

    fn two_layer_dag() -> BinDag {
        let mut dag = BinDag::new();
        dag.add_layer("eta", &scheme("eta", 2)).unwrap();
        dag.add_layer("pt", &scheme("pt", 3)).unwrap();
        dag
    }

    #[test]
    fn test_bin_nodes_exclude_sentinels_and_follow_layer_order() {
        let dag = two_layer_dag();
        let pt1 = dag.get_node("pt1").unwrap();
        let eta0 = dag.get_node("eta0").unwrap();
        // insertion order of the path does not matter
        let path = NodePath::from_nodes([dag.leaf(), pt1, eta0, dag.root()]);
        assert_eq!(path.bin_nodes(&dag).as_slice(), &[eta0, pt1]);
        assert_eq!(path.path_string(&dag), "root -> eta0 -> pt1 -> leaf");
        assert!(path.is_complete(&dag));
    }

    #[test]
    fn test_incomplete_paths() {
        let dag = two_layer_dag();
        let pt0 = dag.get_node("pt0").unwrap();
        let pt1 = dag.get_node("pt1").unwrap();
        let eta0 = dag.get_node("eta0").unwrap();

        let missing_layer = NodePath::from_nodes([dag.root(), pt0, dag.leaf()]);
        assert!(!missing_layer.is_complete(&dag));

        let two_from_one_layer = NodePath::from_nodes([dag.root(), pt0, pt1, eta0, dag.leaf()]);
        assert!(!two_from_one_layer.is_complete(&dag));

        let no_sentinels = NodePath::from_nodes([pt0, eta0]);
        assert!(!no_sentinels.is_complete(&dag));
        assert_eq!(no_sentinels.bin_nodes(&dag).len(), 2);
    }
}
