//! In-memory map owned by the store worker

use siphasher::sip::SipHasher13;
use std::collections::HashMap;
use std::hash::{BuildHasherDefault, Hash};

/// Hash map type used by the store and handed out as snapshots
pub type StoreMap<K, V> = HashMap<K, V, BuildHasherDefault<SipHasher13>>;

/// Plain, single-threaded key-value map
///
/// Not synchronized. Only the worker thread ever holds one.
pub struct MemoryStore<K, V> {
    /// The main storage map
    store: StoreMap<K, V>,
}

impl<K, V> MemoryStore<K, V>
where
    K: Eq + Hash + Clone,
    V: Default + Clone,
{
    /// Create a new empty memory store
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a new memory store with specified initial capacity
    pub fn with_capacity(capacity: usize) -> Self {
        MemoryStore {
            store: HashMap::with_capacity_and_hasher(
                capacity,
                BuildHasherDefault::<SipHasher13>::default(),
            ),
        }
    }

    /// Insert or overwrite a value, returns true if the key was new
    pub fn set(&mut self, key: K, value: V) -> bool {
        self.store.insert(key, value).is_none()
    }

    /// Get a copy of the value, or the default value when the key is absent
    pub fn get(&self, key: &K) -> V {
        self.store.get(key).cloned().unwrap_or_default()
    }

    /// Delete a key, returns true if the key existed
    pub fn delete(&mut self, key: &K) -> bool {
        self.store.remove(key).is_some()
    }

    /// Check if a key exists
    pub fn exists(&self, key: &K) -> bool {
        self.store.contains_key(key)
    }

    /// Get the number of entries
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Remove every entry, returns how many were removed
    pub fn clear(&mut self) -> usize {
        let removed = self.store.len();
        self.store.clear();
        removed
    }

    /// Independent copy of the whole map
    pub fn snapshot(&self) -> StoreMap<K, V> {
        self.store.clone()
    }
}

impl<K, V> Default for MemoryStore<K, V>
where
    K: Eq + Hash + Clone,
    V: Default + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_set_get() {
        let mut store = MemoryStore::new();
        assert!(store.set("key1".to_string(), 7));
        assert_eq!(store.get(&"key1".to_string()), 7);
    }

    #[test]
    fn test_overwrite_is_not_new() {
        let mut store = MemoryStore::new();
        assert!(store.set("key1", 1));
        assert!(!store.set("key1", 2));
        assert_eq!(store.get(&"key1"), 2);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_missing_key_is_default() {
        let store: MemoryStore<&str, String> = MemoryStore::new();
        assert_eq!(store.get(&"nope"), String::new());
        assert!(!store.exists(&"nope"));
    }

    #[test]
    fn test_delete() {
        let mut store = MemoryStore::new();
        store.set(1u32, 10u64);

        assert!(store.delete(&1));
        assert!(!store.exists(&1));
        assert!(!store.delete(&1));
        assert!(store.is_empty());
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut store = MemoryStore::new();
        store.set("a", 1);

        let mut copy = store.snapshot();
        copy.insert("b", 2);
        store.set("a", 3);

        assert_eq!(copy.get("a"), Some(&1));
        assert!(!store.exists(&"b"));
    }

    #[test]
    fn test_clear() {
        let mut store = MemoryStore::new();
        store.set("a", 1);
        store.set("b", 2);

        assert_eq!(store.clear(), 2);
        assert_eq!(store.len(), 0);
    }
}
