//! Ordered iteration over cache entries

use std::iter::FusedIterator;

use crate::lru::{Slot, HEAD, TAIL};

/// Iterator over `(key, value)` pairs from most to least recently used.
///
/// Created by [`LruCache::iter`](crate::LruCache::iter). Walking the list
/// does not promote anything. Iterating from the back yields entries from
/// least to most recently used.
pub struct Iter<'a, K, V> {
    slots: &'a [Slot<K, V>],
    front: usize,
    back: usize,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(slots: &'a [Slot<K, V>], len: usize) -> Self {
        Self {
            slots,
            front: slots[HEAD].next,
            back: slots[TAIL].prev,
            remaining: len,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let slot = &self.slots[self.front];
        self.front = slot.next;
        self.remaining -= 1;
        slot.entry.as_ref().map(|(key, value)| (key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let slot = &self.slots[self.back];
        self.back = slot.prev;
        self.remaining -= 1;
        slot.entry.as_ref().map(|(key, value)| (key, value))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::LruCache;

    #[test]
    fn test_iter_order() {
        let mut cache = LruCache::new(3).unwrap();
        cache.put(1, 'a');
        cache.put(2, 'b');
        cache.put(3, 'c');
        cache.get(&1);

        let forward: Vec<_> = cache.iter().map(|(k, _)| *k).collect();
        let backward: Vec<_> = cache.iter().rev().map(|(k, _)| *k).collect();

        assert_eq!(forward, vec![1, 3, 2]);
        assert_eq!(backward, vec![2, 3, 1]);
    }

    #[test]
    fn test_iter_does_not_promote() {
        let mut cache = LruCache::new(2).unwrap();
        cache.put(1, 'a');
        cache.put(2, 'b');

        for _ in cache.iter() {}
        cache.put(3, 'c');

        assert!(!cache.contains_key(&1));
    }

    #[test]
    fn test_iter_exact_size_and_meeting_ends() {
        let mut cache = LruCache::new(4).unwrap();
        for k in 0..4 {
            cache.put(k, k);
        }

        let mut iter = cache.iter();
        assert_eq!(iter.len(), 4);
        assert_eq!(iter.next(), Some((&3, &3)));
        assert_eq!(iter.next_back(), Some((&0, &0)));
        assert_eq!(iter.next(), Some((&2, &2)));
        assert_eq!(iter.next_back(), Some((&1, &1)));
        assert_eq!(iter.len(), 0);
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn test_iter_empty() {
        let cache = LruCache::<u8, u8>::new(1).unwrap();
        assert_eq!(cache.iter().count(), 0);
        assert_eq!((&cache).into_iter().next(), None);
    }
}
