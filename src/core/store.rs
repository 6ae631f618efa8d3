use crate::core::backing::{BackingMap, MapType};
use crate::domain::model::Record;

/// Canonical name → record collection.
pub struct RecordStore {
    records: Box<dyn BackingMap>,
    map_type: MapType,
}

impl RecordStore {
    pub fn new(map_type: MapType) -> Self {
        Self {
            records: map_type.create_map(),
            map_type,
        }
    }

    /// 以名稱為鍵存入，同名則覆蓋
    pub fn insert(&mut self, record: Record) {
        if let Some(previous) = self.records.insert(record) {
            tracing::debug!("Replaced existing record '{}'", previous.name);
        }
    }

    pub fn get(&self, name: &str) -> Option<&Record> {
        self.records.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    /// All records in the backing container's iteration order.
    pub fn all(&self) -> Vec<&Record> {
        self.records.values().collect()
    }

    /// All records, stably sorted by primary type. Records sharing a type keep
    /// the order of [`RecordStore::all`].
    pub fn all_sorted_by_primary_category(&self) -> Vec<&Record> {
        let mut records = self.all();
        records.sort_by(|a, b| a.type1.cmp(&b.type1));
        records
    }

    /// Records whose ability list contains `ability`, ignoring case.
    pub fn by_capability(&self, ability: &str) -> Vec<&Record> {
        self.records
            .values()
            .filter(|record| record.has_ability(ability))
            .collect()
    }

    pub fn size(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn map_type(&self) -> MapType {
        self.map_type
    }
}

impl Extend<Record> for RecordStore {
    fn extend<I: IntoIterator<Item = Record>>(&mut self, iter: I) {
        for record in iter {
            self.insert(record);
        }
    }
}

impl std::fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStore")
            .field("map_type", &self.map_type)
            .field("size", &self.size())
            .finish()
    }
}
