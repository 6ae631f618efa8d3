//! Backing containers for the record store.
//!
//! The store is keyed by record name; the three containers differ only in the
//! order `values()` yields records.

use crate::domain::model::Record;
use crate::utils::error::DexError;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

/// Container strategy chosen once when a store is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "MapTypeRepr")]
pub enum MapType {
    /// Hash table: unordered iteration.
    #[default]
    Hash,
    /// Ordered tree: iteration sorted by name.
    Sorted,
    /// Hash table plus insertion sequence: iteration in first-insertion order.
    InsertionOrdered,
}

impl MapType {
    pub const ALL: [MapType; 3] = [MapType::Hash, MapType::Sorted, MapType::InsertionOrdered];

    /// 選單上的編號 (1-3)
    pub fn value(self) -> u8 {
        match self {
            MapType::Hash => 1,
            MapType::Sorted => 2,
            MapType::InsertionOrdered => 3,
        }
    }

    pub fn from_value(value: u8) -> Result<Self, DexError> {
        Self::ALL
            .into_iter()
            .find(|t| t.value() == value)
            .ok_or_else(|| DexError::InvalidMapType {
                value: value.to_string(),
            })
    }

    pub fn name(self) -> &'static str {
        match self {
            MapType::Hash => "HashMap",
            MapType::Sorted => "TreeMap",
            MapType::InsertionOrdered => "LinkedHashMap",
        }
    }

    pub fn create_map(self) -> Box<dyn BackingMap> {
        match self {
            MapType::Hash => Box::new(HashMap::<String, Record>::new()),
            MapType::Sorted => Box::new(BTreeMap::<String, Record>::new()),
            MapType::InsertionOrdered => Box::new(InsertionOrderedMap::default()),
        }
    }
}

impl fmt::Display for MapType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MapType {
    type Err = DexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        if let Ok(value) = key.parse::<u8>() {
            return Self::from_value(value);
        }
        match key.as_str() {
            "hash" | "hashmap" => Ok(MapType::Hash),
            "sorted" | "tree" | "treemap" => Ok(MapType::Sorted),
            "insertion" | "linked" | "linkedhashmap" => Ok(MapType::InsertionOrdered),
            _ => Err(DexError::InvalidMapType {
                value: s.to_string(),
            }),
        }
    }
}

/// 設定檔可寫 `map_type = 2` 或 `map_type = "sorted"`
#[derive(Deserialize)]
#[serde(untagged)]
enum MapTypeRepr {
    Value(i64),
    Name(String),
}

impl TryFrom<MapTypeRepr> for MapType {
    type Error = DexError;

    fn try_from(repr: MapTypeRepr) -> Result<Self, Self::Error> {
        match repr {
            MapTypeRepr::Value(value) => u8::try_from(value)
                .map_err(|_| DexError::InvalidMapType {
                    value: value.to_string(),
                })
                .and_then(Self::from_value),
            MapTypeRepr::Name(name) => name.parse(),
        }
    }
}

/// Name-keyed record container.
pub trait BackingMap: Send + Sync {
    /// Inserts or replaces, returning the replaced record.
    fn insert(&mut self, record: Record) -> Option<Record>;
    fn get(&self, name: &str) -> Option<&Record>;
    fn contains_key(&self, name: &str) -> bool;
    fn values(&self) -> Box<dyn Iterator<Item = &Record> + '_>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl BackingMap for HashMap<String, Record> {
    fn insert(&mut self, record: Record) -> Option<Record> {
        HashMap::insert(self, record.name.clone(), record)
    }

    fn get(&self, name: &str) -> Option<&Record> {
        HashMap::get(self, name)
    }

    fn contains_key(&self, name: &str) -> bool {
        HashMap::contains_key(self, name)
    }

    fn values(&self) -> Box<dyn Iterator<Item = &Record> + '_> {
        Box::new(HashMap::values(self))
    }

    fn len(&self) -> usize {
        HashMap::len(self)
    }
}

impl BackingMap for BTreeMap<String, Record> {
    fn insert(&mut self, record: Record) -> Option<Record> {
        BTreeMap::insert(self, record.name.clone(), record)
    }

    fn get(&self, name: &str) -> Option<&Record> {
        BTreeMap::get(self, name)
    }

    fn contains_key(&self, name: &str) -> bool {
        BTreeMap::contains_key(self, name)
    }

    fn values(&self) -> Box<dyn Iterator<Item = &Record> + '_> {
        Box::new(BTreeMap::values(self))
    }

    fn len(&self) -> usize {
        BTreeMap::len(self)
    }
}

/// Records in first-insertion order; overwriting keeps the original slot.
#[derive(Debug, Default)]
pub struct InsertionOrderedMap {
    index: HashMap<String, usize>,
    entries: Vec<Record>,
}

impl BackingMap for InsertionOrderedMap {
    fn insert(&mut self, record: Record) -> Option<Record> {
        match self.index.get(&record.name) {
            Some(&slot) => Some(std::mem::replace(&mut self.entries[slot], record)),
            None => {
                self.index.insert(record.name.clone(), self.entries.len());
                self.entries.push(record);
                None
            }
        }
    }

    fn get(&self, name: &str) -> Option<&Record> {
        self.index.get(name).map(|&slot| &self.entries[slot])
    }

    fn contains_key(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    fn values(&self) -> Box<dyn Iterator<Item = &Record> + '_> {
        Box::new(self.entries.iter())
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
