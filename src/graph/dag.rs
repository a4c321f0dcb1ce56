//! dag.rs
//! The layered bin DAG and its leaf-operation execution model.
//!
//! Layers are appended one binning scheme at a time. Every vertex of the
//! previous frontier (initially the root) is connected to every vertex of the
//! new layer, and the new layer becomes the frontier, which is always wired
//! to the leaf. The number of root-to-leaf paths is therefore the product of
//! the layer sizes.

use super::error::DagError;
use super::node::{validate_layer_name, Node, NodeId, NodeKind};
use super::path::NodePath;
use crate::binning::{Bin, BinScheme};
use petgraph::graph::DiGraph;
use petgraph::Direction;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::fmt;

/// A callback run once per enumerated root-to-leaf path.
pub type LeafOp = Box<dyn FnMut(&BinDag, &NodePath)>;

/// Lifecycle of a `BinDag`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Only the root and leaf exist.
    Empty,
    /// At least one layer has been added; more may follow.
    Building,
    /// Leaf operations have run. The layer structure is frozen.
    Finalized,
}

/// The bin vertices derived from one binning scheme.
#[derive(Debug, Clone)]
pub struct Layer {
    name: String,
    scheme: BinScheme,
    nodes: Vec<NodeId>,
}

impl Layer {
    pub fn name(&self) -> &str { &self.name }
    pub fn scheme(&self) -> &BinScheme { &self.scheme }
    /// Bin vertices in the scheme's bin order.
    pub fn nodes(&self) -> &[NodeId] { &self.nodes }
    pub fn node(&self, bin: usize) -> Option<NodeId> { self.nodes.get(bin).copied() }
    pub fn len(&self) -> usize { self.nodes.len() }
    pub fn is_empty(&self) -> bool { self.nodes.is_empty() }
}

pub struct BinDag {
    graph: DiGraph<Node, ()>,
    root: NodeId,
    leaf: NodeId,
    layers: Vec<Layer>,
    ids: HashMap<String, NodeId>,
    /// Vertices the next layer will be connected from.
    frontier: Vec<NodeId>,
    phase: Phase,
    ops: Vec<LeafOp>,
}

impl Default for BinDag {
    fn default() -> Self { Self::new() }
}

impl fmt::Debug for BinDag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinDag")
            .field("layers", &self.layers.iter().map(|l| l.name.as_str()).collect::<Vec<_>>())
            .field("node_count", &self.graph.node_count())
            .field("phase", &self.phase)
            .field("queued_ops", &self.ops.len())
            .finish()
    }
}

impl BinDag {
    pub fn new() -> Self {
        let mut graph = DiGraph::new();
        let root = graph.add_node(Node::root());
        let leaf = graph.add_node(Node::leaf());
        let ids = HashMap::from([(Node::root().id, root), (Node::leaf().id, leaf)]);
        Self { graph, root, leaf, layers: Vec::new(), ids, frontier: vec![root], phase: Phase::Empty, ops: Vec::new() }
    }

    /// Drops every layer and queued operation, returning to the empty phase.
    pub fn reset(&mut self) { *self = Self::new(); }

    /// Appends a layer with one bin vertex per bin of `scheme`.
    ///
    /// The scheme is copied into the layer. Fails without modifying the DAG if
    /// leaf operations have already run, if `name` is taken or unusable as an
    /// id prefix, if one of the new ids already exists, or if `scheme` has no
    /// bins.
    pub fn add_layer(&mut self, name: &str, scheme: &BinScheme) -> Result<usize, DagError> {
        if self.phase == Phase::Finalized {
            return Err(DagError::Finalized(name.to_string()));
        }
        validate_layer_name(name).map_err(|reason| DagError::InvalidLayerName { name: name.to_string(), reason })?;
        if self.layers.iter().any(|l| l.name == name) {
            return Err(DagError::DuplicateLayer(name.to_string()));
        }
        if scheme.is_empty() {
            return Err(DagError::EmptyLayer(name.to_string()));
        }

        let layer_idx = self.layers.len();
        let new_nodes: Vec<Node> = (0..scheme.num_bins()).map(|bin| Node::bin(name, layer_idx, bin)).collect();
        if let Some(clash) = new_nodes.iter().find(|n| self.ids.contains_key(&n.id)) {
            return Err(DagError::IdCollision { layer: name.to_string(), id: clash.id.clone() });
        }

        let nodes: Vec<NodeId> = new_nodes
            .into_iter()
            .map(|node| {
                let id = node.id.clone();
                let idx = self.graph.add_node(node);
                self.ids.insert(id, idx);
                idx
            })
            .collect();

        // 1. Detach the old frontier from the leaf
        for &prev in &self.frontier {
            if let Some(edge) = self.graph.find_edge(prev, self.leaf) {
                self.graph.remove_edge(edge);
            }
        }

        // 2. Full connectivity frontier -> new layer -> leaf
        for &prev in &self.frontier {
            for &next in &nodes {
                self.graph.add_edge(prev, next, ());
            }
        }
        for &next in &nodes {
            self.graph.add_edge(next, self.leaf, ());
        }

        self.frontier = nodes.clone();
        self.layers.push(Layer { name: name.to_string(), scheme: scheme.clone(), nodes });
        self.phase = Phase::Building;
        Ok(layer_idx)
    }

    // --- Leaf Operations ---

    /// Queues `op` to run once per path on the next `execute_and_clear`.
    pub fn register_leaf_op(&mut self, op: impl FnMut(&BinDag, &NodePath) + 'static) {
        self.ops.push(Box::new(op));
    }

    /// Runs every queued operation once per root-to-leaf path, then clears the
    /// queue. Returns the number of paths visited, which is zero when nothing
    /// was queued (calling this twice in a row does the work once).
    pub fn execute_and_clear(&mut self) -> usize {
        if self.ops.is_empty() {
            return 0;
        }
        let mut ops = std::mem::take(&mut self.ops);
        self.phase = Phase::Finalized;

        let this = &*self;
        this.walk_paths(|path| {
            for op in ops.iter_mut() {
                op(this, path);
            }
        })
    }

    /// Registers, executes and clears `op` in one step. Unlike
    /// `register_leaf_op`, the closure may borrow from the caller.
    pub fn run_once_per_leaf(&mut self, mut op: impl FnMut(&BinDag, &NodePath)) -> usize {
        self.phase = Phase::Finalized;
        let this = &*self;
        this.walk_paths(|path| op(this, path))
    }

    // --- Graph Algorithms ---

    /// Depth-first enumeration of every root-to-leaf path. Bins are visited in
    /// insertion order, so the last-added layer varies fastest.
    pub fn walk_paths(&self, mut visit: impl FnMut(&NodePath)) -> usize {
        if self.layers.is_empty() {
            return 0;
        }
        let mut stack = Vec::with_capacity(self.layers.len() + 2);
        let mut count = 0;
        self.descend(self.root, &mut stack, &mut visit, &mut count);
        count
    }

    fn descend<F: FnMut(&NodePath)>(&self, node: NodeId, stack: &mut Vec<NodeId>, visit: &mut F, count: &mut usize) {
        stack.push(node);
        if node == self.leaf {
            visit(&NodePath::from_nodes(stack.iter().copied()));
            *count += 1;
        } else {
            for child in self.children(node) {
                self.descend(child, stack, visit, count);
            }
        }
        stack.pop();
    }

    /// Outgoing neighbours sorted by index. petgraph yields them most recent
    /// edge first, which would reverse the bin order.
    fn children(&self, node: NodeId) -> SmallVec<[NodeId; 16]> {
        let mut children: SmallVec<[NodeId; 16]> = self.graph.neighbors_directed(node, Direction::Outgoing).collect();
        children.sort_unstable();
        children
    }

    /// Collects every root-to-leaf path in enumeration order.
    pub fn paths(&self) -> Vec<NodePath> {
        let mut paths = Vec::with_capacity(self.path_count());
        self.walk_paths(|p| paths.push(p.clone()));
        paths
    }

    /// Product of the layer sizes, or zero for a DAG without layers.
    pub fn path_count(&self) -> usize {
        if self.layers.is_empty() { 0 } else { self.layers.iter().map(Layer::len).product() }
    }

    // --- Accessors ---
    pub fn root(&self) -> NodeId { self.root }
    pub fn leaf(&self) -> NodeId { self.leaf }
    pub fn phase(&self) -> Phase { self.phase }
    pub fn layers(&self) -> &[Layer] { &self.layers }
    pub fn node_count(&self) -> usize { self.graph.node_count() }
    pub fn edge_count(&self) -> usize { self.graph.edge_count() }

    pub fn layer_by_name(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name == name)
    }

    /// Looks up a vertex by its string id (`root`, `leaf`, `pt0`, ...).
    pub fn get_node(&self, id: &str) -> Option<NodeId> { self.ids.get(id).copied() }

    pub fn node(&self, id: NodeId) -> Option<&Node> { self.graph.node_weight(id) }

    /// The bin a vertex wraps; `None` for sentinels and unknown ids.
    pub fn bin(&self, id: NodeId) -> Option<&Bin> {
        match self.node(id)?.kind {
            NodeKind::Bin { layer, bin } => self.layers.get(layer)?.scheme.bin_at(bin),
            _ => None,
        }
    }
}
