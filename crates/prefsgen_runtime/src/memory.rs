//! In-memory store backend.
//!
//! Every store opened from the same [`MemoryContext`] with the same file key shares one committed map. Writes are
//! staged per handle and only become visible to other handles on [`PrefStore::commit`].

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, PoisonError};

use crate::store::{PrefStore, StoreContext};

/// A value held by [`MemoryStore`].
#[derive(Debug, Clone, PartialEq)]
pub enum StoredValue {
    String(String),
    Int(i32),
    Bool(bool),
    Float(f32),
    Double(f64),
    Long(i64),
}

type Shared = Arc<Mutex<BTreeMap<String, StoredValue>>>;

#[derive(Debug, Clone)]
enum Edit {
    Put(StoredValue),
    Remove,
}

/// Store handle backed by a shared in-memory map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    committed: Shared,
    staged: Vec<(String, Edit)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Committed entries, ordered by key.
    pub fn snapshot(&self) -> BTreeMap<String, StoredValue> {
        self.committed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of edits waiting for a commit.
    pub fn pending(&self) -> usize {
        self.staged.len()
    }

    fn read(&self, key: &str) -> Option<StoredValue> {
        self.committed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn stage(&mut self, key: &str, edit: Edit) {
        self.staged.push((key.to_string(), edit));
    }
}

// A stored value of another type reads as the default.
macro_rules! typed_get {
    ($name:ident, $ty:ty, $variant:ident) => {
        fn $name(&self, key: &str, default: $ty) -> $ty {
            match self.read(key) {
                Some(StoredValue::$variant(value)) => value,
                _ => default,
            }
        }
    };
}

impl PrefStore for MemoryStore {
    fn get_string(&self, key: &str, default: &str) -> String {
        match self.read(key) {
            Some(StoredValue::String(value)) => value,
            _ => default.to_string(),
        }
    }

    typed_get!(get_int, i32, Int);
    typed_get!(get_bool, bool, Bool);
    typed_get!(get_float, f32, Float);
    typed_get!(get_double, f64, Double);
    typed_get!(get_long, i64, Long);

    fn put_string(&mut self, key: &str, value: String) {
        self.stage(key, Edit::Put(StoredValue::String(value)));
    }

    fn put_int(&mut self, key: &str, value: i32) {
        self.stage(key, Edit::Put(StoredValue::Int(value)));
    }

    fn put_bool(&mut self, key: &str, value: bool) {
        self.stage(key, Edit::Put(StoredValue::Bool(value)));
    }

    fn put_float(&mut self, key: &str, value: f32) {
        self.stage(key, Edit::Put(StoredValue::Float(value)));
    }

    fn put_long(&mut self, key: &str, value: i64) {
        self.stage(key, Edit::Put(StoredValue::Long(value)));
    }

    fn remove(&mut self, key: &str) {
        self.stage(key, Edit::Remove);
    }

    fn commit(&mut self) {
        let mut committed = self.committed.lock().unwrap_or_else(PoisonError::into_inner);
        for (key, edit) in self.staged.drain(..) {
            match edit {
                Edit::Put(value) => {
                    committed.insert(key, value);
                }
                Edit::Remove => {
                    committed.remove(&key);
                }
            }
        }
    }
}

/// Context that hands out [`MemoryStore`] handles, one shared map per file key.
#[derive(Debug, Clone, Default)]
pub struct MemoryContext {
    files: Arc<Mutex<HashMap<String, Shared>>>,
}

impl MemoryContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a concrete handle; [`StoreContext::open_store`] boxes the same thing.
    pub fn open(&self, file_key: &str) -> MemoryStore {
        let mut files = self.files.lock().unwrap_or_else(PoisonError::into_inner);
        let committed = files.entry(file_key.to_string()).or_default().clone();
        MemoryStore {
            committed,
            staged: Vec::new(),
        }
    }

    /// File keys opened so far, sorted.
    pub fn file_keys(&self) -> Vec<String> {
        let files = self.files.lock().unwrap_or_else(PoisonError::into_inner);
        let mut keys: Vec<String> = files.keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl StoreContext for MemoryContext {
    fn open_store(&self, file_key: &str) -> Box<dyn PrefStore> {
        Box::new(self.open(file_key))
    }
}
