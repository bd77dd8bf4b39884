//! Cache Module
//!
//! Provides in-memory caching with read-count TTL expiration and LRU eviction.

mod entry;
mod lru;
mod snapshot;
mod store;
mod sync;


// Re-export public types
pub use snapshot::CacheSnapshot;
pub use store::CacheStore;
pub use sync::Cache;

// == Public Constants ==
/// Capacity used when a cache is constructed with defaults
pub const DEFAULT_CAPACITY: usize = 1;

/// TTL (in reads) used when a cache is constructed with defaults
pub const DEFAULT_TTL: u32 = 1;
