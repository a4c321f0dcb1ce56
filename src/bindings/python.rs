use crate::binning::{Axis, BinScheme};
use crate::index::{HistosDag, IndexConfig};
use crate::store::JsonFileStore;
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use std::collections::BTreeMap;
use std::path::PathBuf;

fn to_py_err(e: impl std::fmt::Display) -> PyErr {
    PyValueError::new_err(e.to_string())
}

#[pyclass(name = "HistosIndex", unsendable)]
#[derive(Debug, Default)]
pub struct PyHistosIndex {
    inner: HistosDag,
}

#[pymethods]
impl PyHistosIndex {
    #[new]
    #[pyo3(signature = (debug = false))]
    pub fn new(debug: bool) -> Self {
        Self { inner: HistosDag::with_config(IndexConfig { debug }) }
    }

    /// `schemes` maps a scheme name to `(nbins, min, max, log)`.
    pub fn build_uniform(&mut self, schemes: BTreeMap<String, (usize, f64, f64, bool)>) -> PyResult<()> {
        let mut built = BTreeMap::new();
        for (name, (nbins, min, max, log)) in schemes {
            let mut scheme = BinScheme::new(name.clone(), name.clone());
            scheme.build_bins(nbins, min, max, log).map_err(to_py_err)?;
            built.insert(name, scheme);
        }
        self.inner.build(&built).map_err(to_py_err)
    }

    /// `schemes` maps a scheme name to its bin edges.
    pub fn build_from_edges(&mut self, schemes: BTreeMap<String, Vec<f64>>) -> PyResult<()> {
        let mut built = BTreeMap::new();
        for (name, edges) in schemes {
            let mut axis = Axis::from_edges(edges).map_err(to_py_err)?;
            let mut scheme = BinScheme::new(name.clone(), name.clone());
            scheme.build_bins_from_axis(&mut axis, false).map_err(to_py_err)?;
            built.insert(name, scheme);
        }
        self.inner.build(&built).map_err(to_py_err)
    }

    pub fn load(&mut self, path: PathBuf) -> PyResult<()> {
        let store = JsonFileStore::open(&path).map_err(|e| PyRuntimeError::new_err(e.to_string()))?;
        self.inner.build_from_store(&store).map_err(to_py_err)
    }

    pub fn save(&self, path: PathBuf) -> PyResult<()> {
        let mut store = JsonFileStore::open(&path).map_err(|e| PyRuntimeError::new_err(e.to_string()))?;
        self.inner.write_to(&mut store).map_err(to_py_err)?;
        store.flush().map_err(|e| PyRuntimeError::new_err(e.to_string()))
    }

    pub fn histos_names(&self) -> Vec<String> {
        self.inner.histos().iter().map(|h| h.name().to_string()).collect()
    }

    /// Returns `(name, title)` of the container selected by `{scheme: bin}`,
    /// or `None` if that combination was never indexed.
    pub fn lookup(&self, selection: BTreeMap<String, usize>) -> PyResult<Option<(String, String)>> {
        let selection: Vec<(&str, usize)> = selection.iter().map(|(k, &v)| (k.as_str(), v)).collect();
        let found = self.inner.histos_for(&selection).map_err(to_py_err)?;
        Ok(found.map(|h| (h.name().to_string(), h.title().to_string())))
    }

    pub fn __len__(&self) -> usize { self.inner.len() }
}
