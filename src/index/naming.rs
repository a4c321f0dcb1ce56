//! naming.rs
//! Canonical record names.
//!
//! A container is persisted as `histos__<id1>__<id2>__...` with its bin
//! vertex ids in layer order; a layer scheme as `binset__<layer>`. Both
//! prefixes and the `__` separator are the on-disk contract. Decoding turns a
//! name straight back into a `NodePath`; raw names go no further.

use super::error::IndexError;
use crate::graph::{BinDag, NodePath};

pub const HISTOS_PREFIX: &str = "histos";
pub const BINSET_PREFIX: &str = "binset";
pub const SEPARATOR: &str = "__";
pub const TITLE_SEPARATOR: &str = ", ";

pub fn binset_key(layer: &str) -> String {
    format!("{}{}{}", BINSET_PREFIX, SEPARATOR, layer)
}

/// The layer name of a `binset__<layer>` key.
pub fn layer_of_binset_key(key: &str) -> Option<&str> {
    key.strip_prefix(BINSET_PREFIX)?.strip_prefix(SEPARATOR)
}

pub fn is_histos_key(key: &str) -> bool {
    key.strip_prefix(HISTOS_PREFIX).is_some_and(|rest| rest.starts_with(SEPARATOR))
}

/// Canonical container name for `path`.
pub fn histos_name(dag: &BinDag, path: &NodePath) -> String {
    let mut name = HISTOS_PREFIX.to_string();
    for node in path.bin_nodes(dag).iter() {
        if let Some(n) = dag.node(node) {
            name.push_str(SEPARATOR);
            name.push_str(&n.id);
        }
    }
    name
}

/// Canonical container title: the chosen bins' titles, in layer order.
pub fn histos_title(dag: &BinDag, path: &NodePath) -> String {
    path.bin_nodes(dag)
        .iter()
        .filter_map(|node| dag.bin(node))
        .map(|bin| bin.title())
        .collect::<Vec<_>>()
        .join(TITLE_SEPARATOR)
}

/// Rebuilds the path a canonical container name encodes.
///
/// Every token after the prefix must be a vertex id of `dag`, together they
/// must pick exactly one bin per layer, and `name` must be the canonical name
/// of the resulting path.
pub fn decode(dag: &BinDag, name: &str) -> Result<NodePath, IndexError> {
    let mut tokens = name.split(SEPARATOR);
    if tokens.next() != Some(HISTOS_PREFIX) {
        return Err(IndexError::MalformedName(name.to_string()));
    }

    let mut path = NodePath::from_nodes([dag.root(), dag.leaf()]);
    for token in tokens {
        let node = dag.get_node(token).ok_or_else(|| IndexError::UnknownNode {
            name: name.to_string(),
            token: token.to_string(),
        })?;
        path.insert(node);
    }

    if !path.is_complete(dag) {
        return Err(IndexError::IncompletePath(name.to_string()));
    }
    // reordered tokens or spelled-out sentinels would alias a canonical name
    if histos_name(dag, &path) != name {
        return Err(IndexError::MalformedName(name.to_string()));
    }
    Ok(path)
}
