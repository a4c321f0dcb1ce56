//! Named-record persistence for histos indices.
//!
//! A store is a flat get/put-by-name collection of records. Layer schemes are
//! kept under `binset__<layer>` and containers under their canonical
//! `histos__...` names; see `index::naming`.
pub mod file;
pub mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use crate::binning::BinScheme;
use crate::index::Histos;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One persisted object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data")]
pub enum Record {
    BinSet(BinScheme),
    Histos(Histos),
}

impl Record {
    fn kind(&self) -> &'static str {
        match self {
            Record::BinSet(_) => "BinSet",
            Record::Histos(_) => "Histos",
        }
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("No record named '{0}'")]
    Missing(String),
    #[error("Record '{key}' holds a {found}, expected a {expected}")]
    WrongKind { key: String, expected: &'static str, found: &'static str },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed store document: {0}")]
    Json(#[from] serde_json::Error),
}

pub trait RecordStore {
    /// Every record name, in the store's enumeration order.
    fn keys(&self) -> Vec<String>;
    fn get(&self, key: &str) -> Result<Option<Record>, StoreError>;
    fn put(&mut self, key: &str, record: Record) -> Result<(), StoreError>;

    fn read_binset(&self, key: &str) -> Result<BinScheme, StoreError> {
        match self.get(key)? {
            Some(Record::BinSet(scheme)) => Ok(scheme),
            Some(other) => Err(StoreError::WrongKind { key: key.to_string(), expected: "BinSet", found: other.kind() }),
            None => Err(StoreError::Missing(key.to_string())),
        }
    }

    fn read_histos(&self, key: &str) -> Result<Histos, StoreError> {
        match self.get(key)? {
            Some(Record::Histos(histos)) => Ok(histos),
            Some(other) => Err(StoreError::WrongKind { key: key.to_string(), expected: "Histos", found: other.kind() }),
            None => Err(StoreError::Missing(key.to_string())),
        }
    }
}
