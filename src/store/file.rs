//! file.rs
//! A record store persisted as a single JSON document.

use super::memory::MemoryStore;
use super::{Record, RecordStore, StoreError};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    records: MemoryStore,
}

impl JsonFileStore {
    /// Opens the store at `path`, loading its records if the file exists.
    /// Nothing is written until `flush`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let records: MemoryStore = if path.exists() {
            serde_json::from_str(&fs::read_to_string(&path)?)?
        } else {
            MemoryStore::new()
        };
        Ok(Self { path, records })
    }

    pub fn path(&self) -> &Path { &self.path }

    pub fn flush(&self) -> Result<(), StoreError> {
        fs::write(&self.path, serde_json::to_string_pretty(&self.records)?)?;
        Ok(())
    }
}

impl RecordStore for JsonFileStore {
    fn keys(&self) -> Vec<String> { self.records.keys() }
    fn get(&self, key: &str) -> Result<Option<Record>, StoreError> { self.records.get(key) }
    fn put(&mut self, key: &str, record: Record) -> Result<(), StoreError> { self.records.put(key, record) }
}
