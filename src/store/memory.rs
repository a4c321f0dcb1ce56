use super::{Record, RecordStore, StoreError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// In-memory record store. Keys enumerate in lexicographic order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryStore {
    records: BTreeMap<String, Record>,
}

impl MemoryStore {
    pub fn new() -> Self { Self::default() }
    pub fn len(&self) -> usize { self.records.len() }
    pub fn is_empty(&self) -> bool { self.records.is_empty() }
    pub fn remove(&mut self, key: &str) -> Option<Record> { self.records.remove(key) }
}

impl RecordStore for MemoryStore {
    fn keys(&self) -> Vec<String> { self.records.keys().cloned().collect() }

    fn get(&self, key: &str) -> Result<Option<Record>, StoreError> {
        Ok(self.records.get(key).cloned())
    }

    fn put(&mut self, key: &str, record: Record) -> Result<(), StoreError> {
        self.records.insert(key.to_string(), record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binning::BinScheme;
    use crate::index::Histos;

    #[test]
    fn test_typed_reads() {
        let mut store = MemoryStore::new();
        store.put("binset__pt", Record::BinSet(BinScheme::new("pt", "p_T"))).unwrap();
        store.put("histos__pt0", Record::Histos(Histos::new("histos__pt0", "title"))).unwrap();

        assert_eq!(store.read_binset("binset__pt").unwrap().var_title(), "p_T");
        assert_eq!(store.read_histos("histos__pt0").unwrap().title(), "title");
        assert!(matches!(store.read_histos("binset__pt"), Err(StoreError::WrongKind { found: "BinSet", .. })));
        assert!(matches!(store.read_binset("binset__eta"), Err(StoreError::Missing(_))));
    }

    #[test]
    fn test_keys_enumerate_sorted() {
        let mut store = MemoryStore::new();
        for key in ["histos__b", "binset__z", "binset__a"] {
            store.put(key, Record::Histos(Histos::new(key, ""))).unwrap();
        }
        assert_eq!(store.keys(), vec!["binset__a", "binset__z", "histos__b"]);
        assert!(store.remove("binset__z").is_some());
        assert_eq!(store.len(), 2);
    }
}
