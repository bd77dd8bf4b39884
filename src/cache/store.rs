//! Cache Store Module
//!
//! The unsynchronized cache engine: a hashed key index over the recency
//! list, plus the combined LRU+TTL policy applied on every read and write.

use std::collections::HashMap;
use std::hash::Hash;

use ahash::RandomState;
use tracing::{debug, trace};

use crate::cache::lru::RecencyList;
use crate::cache::snapshot::CacheSnapshot;
use crate::cache::{DEFAULT_CAPACITY, DEFAULT_TTL};
use crate::error::{CacheError, Result};

// == Cache Store ==
/// Single-threaded cache core with LRU eviction and read-count TTL.
///
/// The index maps each key to its arena handle in the recency list; the
/// two structures are kept in bijection by every operation. For
/// concurrent use, wrap it in [`Cache`](crate::cache::Cache), which
/// holds one exclusive lock across each call.
#[derive(Debug)]
pub struct CacheStore<K, V> {
    /// Key -> arena handle
    index: HashMap<K, usize, RandomState>,
    /// Recency ordering of all live entries
    list: RecencyList<K, V>,
    /// Maximum number of simultaneous live entries
    capacity: usize,
    /// TTL (in reads) for writes that do not specify one
    default_ttl: u32,
}

impl<K, V> CacheStore<K, V>
where
    K: Hash + Eq + Clone,
{
    // == Constructor ==
    /// Creates a new store with the given capacity and default TTL.
    ///
    /// Both values must be at least 1; zero is rejected with
    /// [`CacheError::InvalidArgument`]. No entries are allocated.
    pub fn new(capacity: usize, default_ttl: u32) -> Result<Self> {
        if capacity < 1 {
            return Err(CacheError::InvalidArgument(
                "capacity must be a positive integer".to_string(),
            ));
        }
        if default_ttl < 1 {
            return Err(CacheError::InvalidArgument(
                "ttl must be a positive integer".to_string(),
            ));
        }
        Ok(Self::with_config(capacity, default_ttl))
    }

    /// Infallible constructor for already-validated configuration.
    fn with_config(capacity: usize, default_ttl: u32) -> Self {
        Self {
            index: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
            list: RecencyList::new(capacity),
            capacity,
            default_ttl,
        }
    }

    // == Get ==
    /// Reads the value for `key`, returning `None` if absent.
    ///
    /// A hit is a combined TTL-decrement-and-touch: the entry loses one
    /// read of TTL and becomes the most recently used. A hit on an
    /// entry whose TTL is already down to 1 still yields the value, but
    /// removes the entry in the same call; the next read on that key
    /// misses.
    pub fn get(&mut self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        let Some(&idx) = self.index.get(key) else {
            trace!("cache miss");
            return None;
        };

        if self.list.entry(idx).expires_on_read() {
            // Final read: hand the value back and drop the entry
            self.index.remove(key);
            let value = self.list.remove(idx);
            debug!(len = self.index.len(), "entry expired on read");
            return value;
        }

        let entry = self.list.entry_mut(idx);
        entry.remaining_ttl -= 1;
        let value = entry.value.clone();
        self.list.move_to_front(idx);
        trace!("cache hit");
        value
    }

    // == Set ==
    /// Writes `value` under `key`.
    ///
    /// `ttl` counts future reads; `None` or `Some(0)` resolves to the
    /// store's default TTL. An existing key is updated in place (value
    /// and TTL overwritten, entry moved to the front, size unchanged).
    /// A new key at capacity first evicts the least recently used entry
    /// unconditionally, regardless of that entry's remaining TTL.
    pub fn set(&mut self, key: K, value: V, ttl: Option<u32>) {
        let ttl = match ttl {
            Some(t) if t > 0 => t,
            _ => self.default_ttl,
        };

        if let Some(&idx) = self.index.get(&key) {
            self.list.entry_mut(idx).reset(value, ttl);
            self.list.move_to_front(idx);
            return;
        }

        if self.index.len() == self.capacity {
            if let Some((evicted_key, _)) = self.list.pop_back() {
                self.index.remove(&evicted_key);
                debug!(capacity = self.capacity, "evicted least recently used entry");
            }
        }

        let idx = self.list.push_front(key.clone(), value, ttl);
        self.index.insert(key, idx);
    }

    // == Remove ==
    /// Deletes an entry outright, returning its value if present.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let idx = self.index.remove(key)?;
        self.list.remove(idx)
    }

    // == Peek ==
    /// Reads without touching: no TTL decrement, no reordering.
    pub fn peek(&self, key: &K) -> Option<&V> {
        let &idx = self.index.get(key)?;
        self.list.entry(idx).value.as_ref()
    }

    /// Presence test with no side effects.
    pub fn contains_key(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Remaining TTL (in reads) of a live entry, without touching it.
    pub fn remaining_ttl(&self, key: &K) -> Option<u32> {
        let &idx = self.index.get(key)?;
        Some(self.list.entry(idx).remaining_ttl)
    }

    // == Clear ==
    /// Drops all entries; capacity and default TTL are retained.
    pub fn clear(&mut self) {
        self.index.clear();
        self.list.clear();
    }

    // == Diagnostics ==
    /// Current number of live entries.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Maximum number of simultaneous live entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// TTL assigned to writes that do not specify one.
    pub fn default_ttl(&self) -> u32 {
        self.default_ttl
    }

    /// Key of the most recently used entry.
    pub fn head_key(&self) -> Option<&K> {
        self.list.front().map(|e| &e.key)
    }

    /// Key of the least recently used entry.
    pub fn tail_key(&self) -> Option<&K> {
        self.list.back().map(|e| &e.key)
    }

    /// One consistent read-only view of the store's state.
    pub fn snapshot(&self) -> CacheSnapshot<K> {
        CacheSnapshot {
            len: self.len(),
            capacity: self.capacity,
            default_ttl: self.default_ttl,
            head_key: self.head_key().cloned(),
            tail_key: self.tail_key().cloned(),
        }
    }

    /// Keys ordered from most to least recently used.
    pub(crate) fn keys_by_recency(&self) -> Vec<K> {
        self.list.iter().map(|e| e.key.clone()).collect()
    }
}

impl<K, V> Default for CacheStore<K, V>
where
    K: Hash + Eq + Clone,
{
    /// A store with the process-wide defaults: capacity 1, TTL 1.
    fn default() -> Self {
        Self::with_config(DEFAULT_CAPACITY, DEFAULT_TTL)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_new() {
        let store: CacheStore<&str, i32> = CacheStore::new(100, 300).unwrap();
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert_eq!(store.capacity(), 100);
        assert_eq!(store.default_ttl(), 300);
    }

    #[test]
    fn test_store_default_config() {
        let store: CacheStore<&str, i32> = CacheStore::default();
        assert_eq!(store.capacity(), 1);
        assert_eq!(store.default_ttl(), 1);
    }

    #[test]
    fn test_store_rejects_zero_capacity() {
        let result: Result<CacheStore<&str, i32>> = CacheStore::new(0, 1);
        assert!(matches!(result, Err(CacheError::InvalidArgument(_))));
    }

    #[test]
    fn test_store_rejects_zero_ttl() {
        let result: Result<CacheStore<&str, i32>> = CacheStore::new(1, 0);
        assert!(matches!(result, Err(CacheError::InvalidArgument(_))));
    }

    #[test]
    fn test_store_set_and_get() {
        let mut store = CacheStore::new(5, 3).unwrap();
        store.set(1, 10, Some(2));

        assert_eq!(store.len(), 1);
        assert_eq!(store.head_key(), Some(&1));
        assert_eq!(store.tail_key(), Some(&1));
        assert_eq!(store.remaining_ttl(&1), Some(2));
        assert_eq!(store.get(&1), Some(10));
    }

    #[test]
    fn test_store_get_absent_has_no_side_effects() {
        let mut store = CacheStore::new(5, 3).unwrap();
        store.set(1, 10, None);

        assert_eq!(store.get(&2), None);
        assert_eq!(store.len(), 1);
        assert_eq!(store.head_key(), Some(&1));
        assert_eq!(store.tail_key(), Some(&1));
        assert_eq!(store.remaining_ttl(&1), Some(3));
    }

    #[test]
    fn test_store_set_uses_default_ttl() {
        let mut store = CacheStore::new(5, 3).unwrap();
        store.set(1, 10, None);
        assert_eq!(store.remaining_ttl(&1), Some(3));
    }

    #[test]
    fn test_store_set_zero_ttl_uses_default() {
        let mut store = CacheStore::new(5, 3).unwrap();
        store.set(1, 10, Some(0));
        assert_eq!(store.remaining_ttl(&1), Some(3));
    }

    #[test]
    fn test_store_get_decrements_ttl_and_touches() {
        let mut store = CacheStore::new(5, 3).unwrap();
        store.set(1, 10, Some(2));
        store.set(2, 20, None);

        // key 1 sits at the tail; reading it promotes it and costs one read
        assert_eq!(store.get(&1), Some(10));
        assert_eq!(store.head_key(), Some(&1));
        assert_eq!(store.tail_key(), Some(&2));
        assert_eq!(store.remaining_ttl(&1), Some(1));
    }

    #[test]
    fn test_store_final_read_returns_value_then_misses() {
        let mut store = CacheStore::new(5, 3).unwrap();
        store.set(1, 10, Some(1));

        assert_eq!(store.get(&1), Some(10));
        assert_eq!(store.get(&1), None);
        assert_eq!(store.len(), 0);
        assert_eq!(store.head_key(), None);
        assert_eq!(store.tail_key(), None);
    }

    #[test]
    fn test_store_update_in_place() {
        let mut store = CacheStore::new(5, 3).unwrap();
        store.set(1, 10, None);
        store.set(2, 20, None);
        store.set(1, 30, Some(5));

        assert_eq!(store.len(), 2);
        assert_eq!(store.head_key(), Some(&1));
        assert_eq!(store.tail_key(), Some(&2));
        assert_eq!(store.peek(&1), Some(&30));
        assert_eq!(store.remaining_ttl(&1), Some(5));
    }

    #[test]
    fn test_store_lru_eviction() {
        let mut store = CacheStore::new(5, 3).unwrap();
        for i in 1..=6 {
            store.set(i, 10 * i, None);
        }

        // keys 1..=6 inserted with no reads: key 1 is gone, key 2 is the tail
        assert_eq!(store.len(), 5);
        assert_eq!(store.get(&1), None);
        assert_eq!(store.tail_key(), Some(&2));
        assert_eq!(store.head_key(), Some(&6));
    }

    #[test]
    fn test_store_capacity_eviction_ignores_ttl() {
        let mut store = CacheStore::new(2, 3).unwrap();
        store.set(1, 10, Some(100));
        store.set(2, 20, Some(1));

        // key 1 has plenty of TTL left but is the LRU entry
        store.set(3, 30, None);
        assert!(!store.contains_key(&1));
        assert!(store.contains_key(&2));
        assert!(store.contains_key(&3));
    }

    #[test]
    fn test_store_read_reorders_without_disturbing_rest() {
        let mut store = CacheStore::new(5, 3).unwrap();
        store.set(1, 10, None);
        store.set(2, 20, None);
        store.set(3, 30, None);

        // order 3 -> 2 -> 1; reading 1 yields 1 -> 3 -> 2
        assert_eq!(store.get(&1), Some(10));
        assert_eq!(store.keys_by_recency(), vec![1, 3, 2]);
    }

    #[test]
    fn test_store_ttl_eviction_mid_list() {
        let mut store = CacheStore::new(5, 3).unwrap();
        store.set(1, 10, Some(1));
        store.set(2, 20, Some(1));
        for i in 3..=5 {
            store.set(i, 10 * i, None);
        }

        // list 5 -> 4 -> 3 -> 2 -> 1; the expiring read removes key 2
        // from the middle without disturbing its neighbors
        assert_eq!(store.get(&2), Some(20));
        assert_eq!(store.keys_by_recency(), vec![5, 4, 3, 1]);
        assert_eq!(store.get(&2), None);

        // tail expiry
        assert_eq!(store.get(&1), Some(10));
        assert_eq!(store.keys_by_recency(), vec![5, 4, 3]);
        assert_eq!(store.get(&1), None);

        // default ttl 3: key 4 survives exactly three reads
        let mut last = None;
        for _ in 0..3 {
            last = store.get(&4);
        }
        assert_eq!(last, Some(40));
        assert_eq!(store.get(&4), None);
        assert_eq!(store.keys_by_recency(), vec![5, 3]);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_store_remove() {
        let mut store = CacheStore::new(5, 3).unwrap();
        store.set(1, 10, None);
        store.set(2, 20, None);

        assert_eq!(store.remove(&1), Some(10));
        assert_eq!(store.remove(&1), None);
        assert_eq!(store.len(), 1);
        assert_eq!(store.keys_by_recency(), vec![2]);
    }

    #[test]
    fn test_store_peek_has_no_side_effects() {
        let mut store = CacheStore::new(5, 3).unwrap();
        store.set(1, 10, Some(2));
        store.set(2, 20, None);

        assert_eq!(store.peek(&1), Some(&10));
        assert_eq!(store.remaining_ttl(&1), Some(2));
        assert_eq!(store.head_key(), Some(&2));
    }

    #[test]
    fn test_store_clear() {
        let mut store = CacheStore::new(5, 3).unwrap();
        store.set(1, 10, None);
        store.set(2, 20, None);

        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.head_key(), None);
        assert_eq!(store.capacity(), 5);
        assert_eq!(store.default_ttl(), 3);

        // still usable after clearing
        store.set(3, 30, None);
        assert_eq!(store.get(&3), Some(30));
    }

    #[test]
    fn test_store_snapshot() {
        let mut store = CacheStore::new(5, 3).unwrap();
        store.set(1, 10, None);
        store.set(2, 20, None);

        let snapshot = store.snapshot();
        assert_eq!(snapshot.len, 2);
        assert_eq!(snapshot.capacity, 5);
        assert_eq!(snapshot.default_ttl, 3);
        assert_eq!(snapshot.head_key, Some(2));
        assert_eq!(snapshot.tail_key, Some(1));
    }

    #[test]
    fn test_store_capacity_one_churn() {
        let mut store = CacheStore::new(1, 1).unwrap();
        store.set(1, 10, None);
        store.set(2, 20, None);

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&1), None);
        assert_eq!(store.get(&2), Some(20));
        // ttl 1: that read was the entry's last
        assert_eq!(store.get(&2), None);
    }
}
