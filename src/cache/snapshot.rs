//! Cache Snapshot Module
//!
//! Read-only diagnostic view of a cache, taken in one consistent moment.

use serde::Serialize;

// == Cache Snapshot ==
/// Point-in-time view of a cache's configuration and recency ordering
/// endpoints. Intended for diagnostics and tests; holds copies only, so
/// it stays valid after the cache moves on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheSnapshot<K> {
    /// Number of live entries
    pub len: usize,
    /// Maximum number of simultaneous live entries
    pub capacity: usize,
    /// TTL (in reads) assigned to writes that do not specify one
    pub default_ttl: u32,
    /// Key of the most recently used entry
    pub head_key: Option<K>,
    /// Key of the least recently used entry
    pub tail_key: Option<K>,
}
