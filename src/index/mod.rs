//! The histos index: one result container per combination of bins.
//!
//! `HistosDag` drives a `BinDag` built from a set of named binning schemes,
//! creates a `Histos` for every root-to-leaf path, and keeps them keyed by the
//! path's bin-vertex set. The same state can be rebuilt from a record store
//! holding the layer schemes and the previously created containers.

pub mod error;
pub mod histos;
pub mod naming;

pub use error::IndexError;
pub use histos::Histos;

use crate::binning::BinScheme;
use crate::graph::{BinDag, BinKey, NodeId, NodePath};
use crate::store::{Record, RecordStore};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, error, warn};

/// Runtime options for a `HistosDag`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Emit per-layer and per-path diagnostics while building.
    pub debug: bool,
}

impl IndexConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[derive(Debug, Default)]
pub struct HistosDag {
    config: IndexConfig,
    dag: BinDag,
    histos: HashMap<BinKey, Histos>,
}

impl HistosDag {
    pub fn new() -> Self { Self::default() }

    pub fn with_config(config: IndexConfig) -> Self {
        Self { config, ..Self::default() }
    }

    pub fn config(&self) -> &IndexConfig { &self.config }

    /// Builds one layer per non-empty scheme and one container per path.
    ///
    /// Layers are added in key order of `schemes`, i.e. lexicographically by
    /// name, which fixes the token order of every container name. Any
    /// previous state is replaced; on error it is kept instead.
    pub fn build(&mut self, schemes: &BTreeMap<String, BinScheme>) -> Result<(), IndexError> {
        let mut dag = BinDag::new();
        for (name, scheme) in schemes {
            if scheme.is_empty() {
                if self.config.debug {
                    debug!(layer = %name, "skip BinSet without bins");
                }
                continue;
            }
            if self.config.debug {
                debug!(layer = %name, bins = scheme.num_bins(), "add BinSet to HistosDAG");
            }
            dag.add_layer(name, scheme)?;
        }

        if self.config.debug {
            debug!(count = dag.path_count(), "begin Histos instantiation");
        }
        let verbose = self.config.debug;
        let mut histos = HashMap::with_capacity(dag.path_count());
        dag.run_once_per_leaf(|dag, path| {
            let name = naming::histos_name(dag, path);
            if verbose {
                debug!(path = %path.path_string(dag), histos = %name, "create Histos");
            }
            let mut h = Histos::new(name, naming::histos_title(dag, path));
            let key = path.bin_nodes(dag);
            for node in key.iter() {
                if let Some(bin) = dag.bin(node) {
                    h.add_cut(bin.clone());
                }
            }
            histos.insert(key, h);
        });

        self.dag = dag;
        self.histos = histos;
        Ok(())
    }

    /// Rebuilds the index from `store` without creating any container.
    ///
    /// Every `binset__<layer>` record becomes a layer, in key order. Every
    /// `histos__...` record is then decoded against the rebuilt DAG and the
    /// stored container is indexed under the decoded path. A name that does not
    /// decode to its own canonical name aborts the rebuild; the previous state
    /// is kept and the error is returned.
    pub fn build_from_store(&mut self, store: &impl RecordStore) -> Result<(), IndexError> {
        let keys = store.keys();

        let mut dag = BinDag::new();
        for key in &keys {
            let Some(layer) = naming::layer_of_binset_key(key) else { continue };
            if self.config.debug {
                debug!(record = %key, "read layer");
            }
            let scheme = store.read_binset(key)?;
            if scheme.is_empty() {
                continue;
            }
            dag.add_layer(layer, &scheme)?;
        }

        let mut histos = HashMap::new();
        for key in keys.iter().filter(|k| naming::is_histos_key(k)) {
            if self.config.debug {
                debug!(record = %key, "read histos");
            }
            let path = naming::decode(&dag, key).map_err(|e| {
                error!("{}", e);
                e
            })?;
            if self.config.debug {
                debug!(path = %path.path_string(&dag), "decoded");
            }
            // canonical names are unique per bin set, so no record overwrites another
            histos.insert(path.bin_nodes(&dag), store.read_histos(key)?);
        }

        self.dag = dag;
        self.histos = histos;
        Ok(())
    }

    /// Writes every layer scheme and container to `store`, the inverse of
    /// `build_from_store`.
    pub fn write_to(&self, store: &mut impl RecordStore) -> Result<(), IndexError> {
        for layer in self.dag.layers() {
            store.put(&naming::binset_key(layer.name()), Record::BinSet(layer.scheme().clone()))?;
        }
        for h in self.histos.values() {
            store.put(h.name(), Record::Histos(h.clone()))?;
        }
        Ok(())
    }

    /// The container created for `path`, or `None` (with a warning) if the
    /// path's bin set was never indexed.
    pub fn get_histos(&self, path: &NodePath) -> Option<&Histos> {
        let found = self.histos.get(&path.bin_nodes(&self.dag));
        if found.is_none() {
            warn!("no Histos associated with NodePath {}", path.path_string(&self.dag));
        }
        found
    }

    pub fn get_histos_mut(&mut self, path: &NodePath) -> Option<&mut Histos> {
        let key = path.bin_nodes(&self.dag);
        if !self.histos.contains_key(&key) {
            warn!("no Histos associated with NodePath {}", path.path_string(&self.dag));
        }
        self.histos.get_mut(&key)
    }

    /// Assembles the path choosing bin `bin` of each named layer.
    pub fn path_for(&self, selection: &[(&str, usize)]) -> Result<NodePath, IndexError> {
        let mut path = NodePath::from_nodes([self.dag.root(), self.dag.leaf()]);
        for &(layer_name, bin) in selection {
            let layer = self.dag.layer_by_name(layer_name).ok_or_else(|| IndexError::UnknownLayer(layer_name.to_string()))?;
            let node = layer.node(bin).ok_or_else(|| IndexError::BinOutOfRange { layer: layer_name.to_string(), bin })?;
            path.insert(node);
        }
        Ok(path)
    }

    /// Shorthand for `path_for` followed by `get_histos`.
    pub fn histos_for(&self, selection: &[(&str, usize)]) -> Result<Option<&Histos>, IndexError> {
        Ok(self.get_histos(&self.path_for(selection)?))
    }

    /// Indexed containers, sorted by name.
    pub fn histos(&self) -> Vec<&Histos> {
        let mut all: Vec<&Histos> = self.histos.values().collect();
        all.sort_by(|a, b| a.name().cmp(b.name()));
        all
    }

    pub fn len(&self) -> usize { self.histos.len() }
    pub fn is_empty(&self) -> bool { self.histos.is_empty() }
    pub fn keys(&self) -> impl Iterator<Item = &BinKey> { self.histos.keys() }

    // --- DAG introspection ---
    pub fn dag(&self) -> &BinDag { &self.dag }
    pub fn root_node(&self) -> NodeId { self.dag.root() }
    pub fn leaf_node(&self) -> NodeId { self.dag.leaf() }
    pub fn get_node(&self, id: &str) -> Option<NodeId> { self.dag.get_node(id) }
}
