//! LRU (Least Recently Used) cache implementation
//!
//! Entries live in an arena of slots addressed by index. The recency list is
//! threaded through the arena with `prev`/`next` slot indices and bracketed by
//! two sentinel slots, so splicing never has to special-case an empty list or
//! the first and last entry.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::{BuildHasher, Hash};

use ahash::RandomState;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::iter::Iter;

/// Slot of the head sentinel. `slots[HEAD].next` is the most recently used entry.
pub(crate) const HEAD: usize = 0;

/// Slot of the tail sentinel. `slots[TAIL].prev` is the least recently used entry.
pub(crate) const TAIL: usize = 1;

/// Upper bound on slots reserved up front; larger caches grow on demand.
const MAX_PREALLOC: usize = 4096;

/// Arena slot. Sentinels and free slots carry no entry.
pub(crate) struct Slot<K, V> {
    pub(crate) entry: Option<(K, V)>,
    pub(crate) prev: usize,
    pub(crate) next: usize,
}

impl<K, V> Slot<K, V> {
    fn sentinel() -> Self {
        Self {
            entry: None,
            prev: HEAD,
            next: TAIL,
        }
    }
}

/// LRU cache with fixed capacity
///
/// `get` and `put` promote the touched entry to the most-recently-used
/// position. Inserting a new key into a full cache evicts the
/// least-recently-used entry before `put` returns.
pub struct LruCache<K, V, S = RandomState> {
    map: HashMap<K, usize, S>,
    slots: Vec<Slot<K, V>>,
    free_list: Vec<usize>,
    capacity: usize,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create a new LRU cache holding at most `capacity` entries.
    ///
    /// # Errors
    /// Returns [`Error::InvalidCapacity`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_hasher(capacity, RandomState::new())
    }
}

impl<K, V, S> LruCache<K, V, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher,
{
    /// Create a new LRU cache using `hasher` for the key index.
    ///
    /// # Errors
    /// Returns [`Error::InvalidCapacity`] if `capacity` is zero.
    pub fn with_hasher(capacity: usize, hasher: S) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity(capacity));
        }

        // One extra entry slot: a new key is linked in before the tail is evicted.
        let prealloc = capacity.min(MAX_PREALLOC) + 1;
        let mut slots = Vec::with_capacity(prealloc + 2);
        slots.push(Slot::sentinel());
        slots.push(Slot::sentinel());

        debug!(capacity, "created LRU cache");

        Ok(Self {
            map: HashMap::with_capacity_and_hasher(prealloc, hasher),
            slots,
            free_list: Vec::new(),
            capacity,
        })
    }

    /// Get a value from the cache, marking it most recently used.
    ///
    /// A miss returns `None` and leaves the recency order untouched.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = *self.map.get(key)?;
        self.promote(idx);
        self.slots[idx].entry.as_ref().map(|(_, value)| value)
    }

    /// Mutable variant of [`get`](Self::get). Promotes on hit.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = *self.map.get(key)?;
        self.promote(idx);
        self.slots[idx].entry.as_mut().map(|(_, value)| value)
    }

    /// Read a value without touching the recency order.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = *self.map.get(key)?;
        self.slots[idx].entry.as_ref().map(|(_, value)| value)
    }

    /// Check for a key without touching the recency order.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_key(key)
    }

    /// Insert a key-value pair into the cache
    ///
    /// An existing key has its value replaced and is promoted; nothing is
    /// evicted. A new key goes to the head, and if that pushes the cache past
    /// capacity the tail entry is evicted.
    pub fn put(&mut self, key: K, value: V) {
        if let Some(&idx) = self.map.get(&key) {
            if let Some((_, old)) = &mut self.slots[idx].entry {
                *old = value;
            }
            self.promote(idx);
            return;
        }

        let idx = self.alloc_slot(key.clone(), value);
        self.link_front(idx);
        self.map.insert(key, idx);

        if self.map.len() > self.capacity {
            self.evict();
        }
    }

    /// Remove a key from the cache, returning its value
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.map.remove(key)?;
        self.release(idx).map(|(_, value)| value)
    }

    /// Drop every entry. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.map.clear();
        self.slots.truncate(2);
        self.slots[HEAD] = Slot::sentinel();
        self.slots[TAIL] = Slot::sentinel();
        self.free_list.clear();
    }

    fn evict(&mut self) {
        let idx = self.slots[TAIL].prev;
        if idx == HEAD {
            return;
        }

        if let Some((key, _)) = self.release(idx) {
            self.map.remove(&key);
            trace!(
                len = self.map.len(),
                capacity = self.capacity,
                "evicted least recently used entry"
            );
        }
    }
}

impl<K, V, S> LruCache<K, V, S> {
    /// Get the current number of resident entries
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Maximum number of resident entries, fixed at construction
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The entry the next overflowing insert would evict.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        let idx = self.slots[TAIL].prev;
        if idx == HEAD {
            return None;
        }
        self.slots[idx].entry.as_ref().map(|(key, value)| (key, value))
    }

    /// Iterate entries from most to least recently used without promoting any.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.slots, self.map.len())
    }

    fn alloc_slot(&mut self, key: K, value: V) -> usize {
        let slot = Slot {
            entry: Some((key, value)),
            prev: HEAD,
            next: TAIL,
        };

        if let Some(idx) = self.free_list.pop() {
            self.slots[idx] = slot;
            idx
        } else {
            self.slots.push(slot);
            self.slots.len() - 1
        }
    }

    /// Unlink a slot and return it to the free list. The index entry is the
    /// caller's responsibility.
    fn release(&mut self, idx: usize) -> Option<(K, V)> {
        self.unlink(idx);
        self.free_list.push(idx);
        self.slots[idx].entry.take()
    }

    fn promote(&mut self, idx: usize) {
        if self.slots[HEAD].next == idx {
            return;
        }
        self.unlink(idx);
        self.link_front(idx);
    }

    fn link_front(&mut self, idx: usize) {
        let first = self.slots[HEAD].next;

        self.slots[idx].prev = HEAD;
        self.slots[idx].next = first;
        self.slots[first].prev = idx;
        self.slots[HEAD].next = idx;
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = (self.slots[idx].prev, self.slots[idx].next);

        self.slots[prev].next = next;
        self.slots[next].prev = prev;
    }
}

impl<K, V, S> LruCache<K, V, S>
where
    K: Clone,
    V: Clone,
{
    /// Owned copy of the contents, most recently used first.
    pub fn snapshot(&self) -> Vec<(K, V)> {
        self.iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

impl<K, V, S> fmt::Display for LruCache<K, V, S>
where
    K: fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LruCache([")?;
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}:{}", key, value)?;
        }
        write!(f, "])")
    }
}

impl<K, V, S> fmt::Debug for LruCache<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K, V, S> IntoIterator for &'a LruCache<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
impl<K, V, S> LruCache<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Panics unless index, recency list and arena agree.
    pub(crate) fn check_invariants(&self) {
        let len = self.map.len();
        assert!(len <= self.capacity, "len {} over capacity {}", len, self.capacity);
        assert_eq!(self.slots.len(), 2 + len + self.free_list.len());
        assert!(self.slots[HEAD].entry.is_none());
        assert!(self.slots[TAIL].entry.is_none());

        let mut steps = 0;
        let mut prev = HEAD;
        let mut cur = self.slots[HEAD].next;
        while cur != TAIL {
            assert!(steps < len, "forward walk longer than index");
            assert_eq!(self.slots[cur].prev, prev, "broken prev link at slot {}", cur);
            let (key, _) = self.slots[cur]
                .entry
                .as_ref()
                .expect("linked slot without entry");
            assert_eq!(self.map.get(key), Some(&cur), "index disagrees with list");
            prev = cur;
            cur = self.slots[cur].next;
            steps += 1;
        }
        assert_eq!(steps, len, "forward walk shorter than index");
        assert_eq!(self.slots[TAIL].prev, prev);

        let mut back_steps = 0;
        let mut cur = self.slots[TAIL].prev;
        while cur != HEAD {
            assert!(back_steps < len, "backward walk longer than index");
            cur = self.slots[cur].prev;
            back_steps += 1;
        }
        assert_eq!(back_steps, len);

        for &idx in &self.free_list {
            assert!(idx > TAIL && self.slots[idx].entry.is_none());
        }
    }
}
