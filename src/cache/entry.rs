//! Cache Entry Module
//!
//! Defines the arena node for individual cache entries with read-count TTL.

/// Sentinel handle meaning "no neighbor" in the recency list.
pub const NIL: usize = usize::MAX;

// == Cache Entry ==
/// A single cache entry, stored in the recency list's arena.
///
/// `prev` and `next` are arena indices, not references, so the entry
/// carries no ownership of its neighbors. The value is wrapped in
/// `Option` so removal can take it out of the arena without cloning;
/// it is `Some` for every live entry.
#[derive(Debug)]
pub struct CacheEntry<K, V> {
    /// The key, mirrored from the index
    pub key: K,
    /// The stored value; `None` only for freed slots
    pub value: Option<V>,
    /// Number of future successful reads this entry survives
    pub remaining_ttl: u32,
    /// Handle of the more recently used neighbor
    pub prev: usize,
    /// Handle of the less recently used neighbor
    pub next: usize,
}

impl<K, V> CacheEntry<K, V> {
    // == Constructor ==
    /// Creates an unlinked entry. The TTL is clamped up to 1, so an
    /// entry always survives at least its next read.
    pub fn new(key: K, value: V, ttl: u32) -> Self {
        Self {
            key,
            value: Some(value),
            remaining_ttl: ttl.max(1),
            prev: NIL,
            next: NIL,
        }
    }

    // == Reset ==
    /// Overwrites value and TTL in place, preserving entry identity.
    /// Used when `set` hits an existing key.
    pub fn reset(&mut self, value: V, ttl: u32) {
        self.value = Some(value);
        self.remaining_ttl = ttl.max(1);
    }

    // == Expires On Read ==
    /// Returns true if the next successful read is this entry's last:
    /// the read still yields the value, but the entry is removed as a
    /// side effect of that same call.
    pub fn expires_on_read(&self) -> bool {
        self.remaining_ttl <= 1
    }
}
