//! Memocache - a bounded, self-cleaning in-memory lookup table
//!
//! Combines LRU capacity eviction with a per-entry read-count TTL,
//! behind a single exclusive lock for concurrent callers.

pub mod cache;
pub mod error;

pub use cache::{Cache, CacheSnapshot, CacheStore, DEFAULT_CAPACITY, DEFAULT_TTL};
pub use error::{CacheError, Result};
