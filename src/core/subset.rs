use crate::core::store::RecordStore;
use crate::domain::model::Record;
use std::collections::HashSet;
use std::sync::Arc;

/// The user's own collection: names that are known to exist in the bound store.
#[derive(Debug)]
pub struct UserSubset {
    names: HashSet<String>,
    store: Arc<RecordStore>,
}

impl UserSubset {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self {
            names: HashSet::new(),
            store,
        }
    }

    /// Adds `name` if it exists in the store and is not yet in the collection.
    pub fn add(&mut self, name: &str) -> bool {
        if !self.store.contains(name) {
            return false;
        }

        if self.names.contains(name) {
            return false;
        }

        self.names.insert(name.to_string())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Collection records sorted by primary type, then by name.
    pub fn sorted_by_primary_category(&self) -> Vec<&Record> {
        let mut records: Vec<&Record> = self
            .names
            .iter()
            .filter_map(|name| self.store.get(name))
            .collect();
        records.sort_by(|a, b| a.type1.cmp(&b.type1).then_with(|| a.name.cmp(&b.name)));
        records
    }

    pub fn size(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }
}
