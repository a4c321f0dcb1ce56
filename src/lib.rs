//! Multi-dimensional binning for physics-style analyses.
//!
//! Each analysis variable gets a `BinScheme`. The schemes become the layers
//! of a `BinDag`, every root-to-leaf path of which is one combination of bins,
//! and a `HistosDag` creates one `Histos` container per combination. Indices
//! round-trip through a `RecordStore` under `binset__`/`histos__` names.

pub mod binning;
pub mod graph;
pub mod index;
pub mod store;

pub use binning::{Axis, Bin, BinScheme, BinningError, Cut};
pub use graph::{BinDag, BinKey, DagError, NodeId, NodePath};
pub use index::{naming, Histos, HistosDag, IndexConfig, IndexError};
pub use store::{JsonFileStore, MemoryStore, Record, RecordStore, StoreError};

#[cfg(feature = "python")]
mod bindings {
    pub mod python;
}

#[cfg(feature = "python")]
use pyo3::prelude::*;

// --- Module Definition ---
/// This function defines the `histos_dag._core` Python module.
#[cfg(feature = "python")]
#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<bindings::python::PyHistosIndex>()?;
    Ok(())
}
