//! Thread-Safe Cache Module
//!
//! Public facade wrapping the cache engine in a single exclusive lock.

use std::hash::Hash;

use parking_lot::Mutex;

use crate::cache::snapshot::CacheSnapshot;
use crate::cache::store::CacheStore;
use crate::error::Result;

// == Cache ==
/// Concurrent LRU+TTL cache.
///
/// Every operation acquires one exclusive lock for its full duration,
/// so concurrent calls on the same key serialize completely; no partial
/// state is ever observable. Reads mutate TTL and recency ordering,
/// which is why there is no reader/writer split. The lock only ever
/// covers hash lookups and link updates, never blocking work.
///
/// Values cross the API by clone or move; internal entries are never
/// handed out by reference.
///
/// # Example
/// ```
/// use memocache::Cache;
///
/// let cache = Cache::new(2, 3).unwrap();
/// cache.set("a", 1, None);
/// assert_eq!(cache.get(&"a"), Some(1));
/// ```
#[derive(Debug)]
pub struct Cache<K, V> {
    store: Mutex<CacheStore<K, V>>,
}

impl<K, V> Cache<K, V>
where
    K: Hash + Eq + Clone,
{
    // == Constructor ==
    /// Creates a cache with the given capacity and default TTL (both in
    /// effect for the cache's whole lifetime).
    ///
    /// # Errors
    /// Returns [`CacheError::InvalidArgument`](crate::error::CacheError)
    /// if either value is zero.
    pub fn new(capacity: usize, default_ttl: u32) -> Result<Self> {
        Ok(Self {
            store: Mutex::new(CacheStore::new(capacity, default_ttl)?),
        })
    }

    // == Get ==
    /// Reads the value for `key`, touching the entry and spending one
    /// read of its TTL. The read that exhausts an entry's TTL still
    /// returns the value; the entry is gone afterwards.
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.store.lock().get(key)
    }

    // == Set ==
    /// Writes `value` under `key`. `None` or `Some(0)` for `ttl` means
    /// the cache's default. Evicts the least recently used entry if a
    /// new key would exceed capacity. Never fails.
    pub fn set(&self, key: K, value: V, ttl: Option<u32>) {
        self.store.lock().set(key, value, ttl);
    }

    // == Remove ==
    /// Deletes an entry outright, returning its value if present.
    pub fn remove(&self, key: &K) -> Option<V> {
        self.store.lock().remove(key)
    }

    // == Peek ==
    /// Reads without touching: no TTL decrement, no reordering.
    pub fn peek(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.store.lock().peek(key).cloned()
    }

    /// Presence test with no side effects.
    pub fn contains_key(&self, key: &K) -> bool {
        self.store.lock().contains_key(key)
    }

    /// Remaining TTL (in reads) of a live entry, without touching it.
    pub fn remaining_ttl(&self, key: &K) -> Option<u32> {
        self.store.lock().remaining_ttl(key)
    }

    // == Clear ==
    /// Drops all entries; configuration is retained.
    pub fn clear(&self) {
        self.store.lock().clear();
    }

    // == Diagnostics ==
    /// Current number of live entries.
    pub fn len(&self) -> usize {
        self.store.lock().len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.store.lock().is_empty()
    }

    /// Maximum number of simultaneous live entries.
    pub fn capacity(&self) -> usize {
        self.store.lock().capacity()
    }

    /// TTL assigned to writes that do not specify one.
    pub fn default_ttl(&self) -> u32 {
        self.store.lock().default_ttl()
    }

    /// Key of the most recently used entry.
    pub fn head_key(&self) -> Option<K> {
        self.store.lock().head_key().cloned()
    }

    /// Key of the least recently used entry.
    pub fn tail_key(&self) -> Option<K> {
        self.store.lock().tail_key().cloned()
    }

    /// One consistent view of size, configuration and ordering
    /// endpoints, taken under the lock.
    pub fn snapshot(&self) -> CacheSnapshot<K> {
        self.store.lock().snapshot()
    }
}

impl<K, V> Default for Cache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// A cache with the process-wide defaults: capacity 1, TTL 1.
    fn default() -> Self {
        Self {
            store: Mutex::new(CacheStore::default()),
        }
    }
}
