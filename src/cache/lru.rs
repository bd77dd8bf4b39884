//! Recency List Module
//!
//! Implements the doubly linked recency ordering used for LRU eviction.
//!
//! Entries live in a `Vec` arena and link to each other through `usize`
//! handles with a `NIL` sentinel, so the list has O(1) splice operations
//! without any ownership cycles or raw pointers. Freed slots are chained
//! into a free list (through `next`) and reused by later insertions.

use crate::cache::entry::{CacheEntry, NIL};

// == Recency List ==
/// Arena-backed doubly linked list ordered from most recently used
/// (front) to least recently used (back).
#[derive(Debug)]
pub struct RecencyList<K, V> {
    /// Arena of entries; live and freed slots mixed
    arena: Vec<CacheEntry<K, V>>,
    /// Handle of the most recently used entry
    front: usize,
    /// Handle of the least recently used entry
    back: usize,
    /// Head of the free-slot chain
    free: usize,
}

impl<K, V> RecencyList<K, V> {
    // == Constructor ==
    /// Creates an empty list with arena space reserved for `capacity`
    /// entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            arena: Vec::with_capacity(capacity),
            front: NIL,
            back: NIL,
            free: NIL,
        }
    }

    // == Push Front ==
    /// Allocates a new entry and links it at the front (most recently
    /// used). Returns the entry's handle.
    pub fn push_front(&mut self, key: K, value: V, ttl: u32) -> usize {
        let idx = self.alloc(CacheEntry::new(key, value, ttl));
        self.link_front(idx);
        idx
    }

    // == Move To Front ==
    /// Marks an existing entry as most recently used.
    pub fn move_to_front(&mut self, idx: usize) {
        if self.front == idx {
            return;
        }
        self.unlink(idx);
        self.link_front(idx);
    }

    // == Pop Back ==
    /// Removes the least recently used entry and returns its key and
    /// value. Returns `None` if the list is empty.
    pub fn pop_back(&mut self) -> Option<(K, V)>
    where
        K: Clone,
    {
        if self.back == NIL {
            return None;
        }
        let idx = self.back;
        let key = self.arena[idx].key.clone();
        let value = self.remove(idx)?;
        Some((key, value))
    }

    // == Remove ==
    /// Unlinks the entry at `idx`, takes its value out of the arena and
    /// releases the slot for reuse.
    pub fn remove(&mut self, idx: usize) -> Option<V> {
        self.unlink(idx);
        let value = self.arena[idx].value.take();
        self.release(idx);
        value
    }

    // == Accessors ==
    pub fn entry(&self, idx: usize) -> &CacheEntry<K, V> {
        &self.arena[idx]
    }

    pub fn entry_mut(&mut self, idx: usize) -> &mut CacheEntry<K, V> {
        &mut self.arena[idx]
    }

    /// Most recently used entry, if any.
    pub fn front(&self) -> Option<&CacheEntry<K, V>> {
        (self.front != NIL).then(|| &self.arena[self.front])
    }

    /// Least recently used entry, if any.
    pub fn back(&self) -> Option<&CacheEntry<K, V>> {
        (self.back != NIL).then(|| &self.arena[self.back])
    }

    /// Drops all entries and resets the arena.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.front = NIL;
        self.back = NIL;
        self.free = NIL;
    }

    /// Iterates live entries from most to least recently used.
    pub fn iter(&self) -> RecencyIter<'_, K, V> {
        RecencyIter {
            arena: &self.arena,
            current: self.front,
        }
    }

    // == Internal List Operations ==

    /// Reuses a freed slot if one is chained, otherwise grows the arena.
    fn alloc(&mut self, entry: CacheEntry<K, V>) -> usize {
        if self.free != NIL {
            let idx = self.free;
            self.free = self.arena[idx].next;
            self.arena[idx] = entry;
            idx
        } else {
            self.arena.push(entry);
            self.arena.len() - 1
        }
    }

    /// Chains a slot into the free list. The slot's value must already
    /// have been taken.
    fn release(&mut self, idx: usize) {
        self.arena[idx].next = self.free;
        self.free = idx;
    }

    /// Splices the entry out of the list, connecting its neighbors.
    /// An entry with no left neighbor was the front; one with no right
    /// neighbor was the back.
    fn unlink(&mut self, idx: usize) {
        let prev = self.arena[idx].prev;
        let next = self.arena[idx].next;

        if next != NIL {
            self.arena[next].prev = prev;
        } else {
            self.back = prev;
        }
        if prev != NIL {
            self.arena[prev].next = next;
        } else {
            self.front = next;
        }

        self.arena[idx].prev = NIL;
        self.arena[idx].next = NIL;
    }

    /// Inserts an unlinked entry before the current front; an insert
    /// into an empty list also makes it the back.
    fn link_front(&mut self, idx: usize) {
        self.arena[idx].prev = NIL;
        self.arena[idx].next = self.front;

        if self.front != NIL {
            self.arena[self.front].prev = idx;
        } else {
            self.back = idx;
        }
        self.front = idx;
    }
}

// == Recency Iterator ==
/// Iterator over live entries from most to least recently used.
pub struct RecencyIter<'a, K, V> {
    arena: &'a [CacheEntry<K, V>],
    current: usize,
}

impl<'a, K, V> Iterator for RecencyIter<'a, K, V> {
    type Item = &'a CacheEntry<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current == NIL {
            return None;
        }
        let entry = &self.arena[self.current];
        self.current = entry.next;
        Some(entry)
    }
}
