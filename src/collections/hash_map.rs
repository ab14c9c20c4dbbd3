//! Separate-chaining hash map with slab-based entry storage.
//!
//! ## Architecture
//!
//! - **Table**: `Vec<Option<usize>>` of chain heads, length always a power
//!   of two
//! - **Slab**: entry storage; each entry carries its key, value, spread hash
//!   and the slab key of the next entry in its chain
//!
//! ```text
//! table[0] -> None
//! table[1] -> entry(k3) -> entry(k1) -> None
//! table[2] -> entry(k2) -> None
//! ```
//!
//! ## Hashing
//!
//! The raw hash is spread with `h ^ (h >> 16)` so high bits influence the
//! bucket, then masked with `capacity - 1`. The spread hash is stored in the
//! entry and reused when the table grows.
//!
//! ## Growth
//!
//! After an insert, if `len() > threshold` (`capacity * 0.75`) the table
//! doubles. Entries are relinked by prepending, so chain order is not
//! preserved across a resize. The table never shrinks.
//!
//! ## Determinism
//!
//! The default hasher is SipHash with fixed keys
//! ([`DeterministicState`]), so bucket layout is identical across runs.

use std::borrow::Borrow;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{BuildHasher, BuildHasherDefault, Hash};
use std::iter::FusedIterator;
use std::mem;

use slab::Slab;

/// Initial number of buckets
pub const DEFAULT_CAPACITY: usize = 16;

/// Ratio of entries to buckets that triggers a resize, as a fraction
pub const LOAD_FACTOR: (usize, usize) = (3, 4);

/// Fixed-key hasher builder used by default
pub type DeterministicState = BuildHasherDefault<DefaultHasher>;

/// A single key-value pair in a chain
#[derive(Debug, Clone)]
struct Entry<K, V> {
    key: K,
    value: V,

    /// Spread hash of `key`
    hash: u64,

    /// Next entry in the same bucket (slab key)
    next: Option<usize>,
}

/// Hash map using separate chaining.
///
/// ## Example
///
/// ```
/// use amis::collections::ChainedHashMap;
///
/// let mut stock = ChainedHashMap::new();
/// assert_eq!(stock.put("PCM-500".to_string(), 40), None);
/// assert_eq!(stock.put("PCM-500".to_string(), 35), Some(40));
///
/// assert_eq!(stock.get("PCM-500"), Some(&35));
/// assert_eq!(stock.remove("PCM-500"), Some(35));
/// assert!(stock.is_empty());
/// ```
#[derive(Clone)]
pub struct ChainedHashMap<K, V, S = DeterministicState> {
    /// Entry storage
    entries: Slab<Entry<K, V>>,

    /// Chain heads (slab keys)
    table: Vec<Option<usize>>,

    /// Resize once `len()` exceeds this
    threshold: usize,

    hash_builder: S,
}

/// Mix the high bits of a raw hash into the low bits used for indexing
#[inline]
fn spread(raw: u64) -> u64 {
    raw ^ (raw >> 16)
}

#[inline]
fn threshold_for(capacity: usize) -> usize {
    let (num, den) = LOAD_FACTOR;
    capacity / den * num
}

impl<K, V> Default for ChainedHashMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> ChainedHashMap<K, V> {
    /// Create an empty map with [`DEFAULT_CAPACITY`] buckets
    pub fn new() -> Self {
        Self::with_capacity_and_hasher(DEFAULT_CAPACITY, DeterministicState::default())
    }

    /// Create an empty map with at least `capacity` buckets
    ///
    /// The bucket count is rounded up to a power of two.
    ///
    /// ```
    /// use amis::collections::ChainedHashMap;
    ///
    /// let map: ChainedHashMap<u32, u32> = ChainedHashMap::with_capacity(20);
    /// assert_eq!(map.capacity(), 32);
    /// assert_eq!(map.threshold(), 24);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, DeterministicState::default())
    }
}

impl<K, V, S> ChainedHashMap<K, V, S> {
    /// Create an empty map using `hash_builder`
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_capacity_and_hasher(DEFAULT_CAPACITY, hash_builder)
    }

    /// Create an empty map with at least `capacity` buckets using `hash_builder`
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        let capacity = capacity.max(1).next_power_of_two();
        Self {
            entries: Slab::new(),
            table: vec![None; capacity],
            threshold: threshold_for(capacity),
            hash_builder,
        }
    }

    // ========================================================================
    // Capacity and Size
    // ========================================================================

    /// Number of key-value pairs
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of buckets
    #[inline]
    pub fn capacity(&self) -> usize {
        self.table.len()
    }

    /// Entry count above which the next insert doubles the table
    #[inline]
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Remove every entry; the bucket count is kept
    pub fn clear(&mut self) {
        self.entries.clear();
        self.table.fill(None);
    }

    // ========================================================================
    // Traversal
    // ========================================================================

    /// Borrowing iterator over `(key, value)` in bucket order
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            entries: &self.entries,
            table: &self.table,
            bucket: 0,
            current: None,
            remaining: self.len(),
        }
    }

    /// Snapshot of the keys, in unspecified order
    pub fn keys(&self) -> Vec<&K> {
        self.iter().map(|(k, _)| k).collect()
    }

    /// Snapshot of the values, in unspecified order
    pub fn values(&self) -> Vec<&V> {
        self.iter().map(|(_, v)| v).collect()
    }

    /// Snapshot of the key-value pairs, in unspecified order
    pub fn entries(&self) -> Vec<(&K, &V)> {
        self.iter().collect()
    }

    /// Check if any entry holds `value` (full scan)
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.iter().any(|(_, v)| v == value)
    }

    #[inline]
    fn bucket_index(&self, hash: u64) -> usize {
        (hash as usize) & (self.table.len() - 1)
    }

    /// Double the table and relink every entry using its stored hash
    fn resize(&mut self) {
        let new_capacity = self.table.len() << 1;
        let old_table = mem::replace(&mut self.table, vec![None; new_capacity]);
        self.threshold = threshold_for(new_capacity);

        for head in old_table {
            let mut current = head;
            while let Some(key) = current {
                let entry = &mut self.entries[key];
                current = entry.next;

                let index = (entry.hash as usize) & (new_capacity - 1);
                entry.next = self.table[index];
                self.table[index] = Some(key);
            }
        }
    }
}

impl<K, V, S> ChainedHashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    #[inline]
    fn hash_of<Q: Hash + ?Sized>(&self, key: &Q) -> u64 {
        spread(self.hash_builder.hash_one(key))
    }

    /// Locate the slab key of the entry for `key`
    fn find<Q>(&self, hash: u64, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        let mut current = self.table[self.bucket_index(hash)];
        while let Some(slot) = current {
            let entry = &self.entries[slot];
            if entry.hash == hash && entry.key.borrow() == key {
                return Some(slot);
            }
            current = entry.next;
        }
        None
    }

    /// Insert or replace the value for `key`
    ///
    /// # Returns
    ///
    /// The previous value if the key was already present
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let hash = self.hash_of(&key);

        if let Some(slot) = self.find(hash, &key) {
            return Some(mem::replace(&mut self.entries[slot].value, value));
        }

        // New entries are prepended to their chain
        let index = self.bucket_index(hash);
        let slot = self.entries.insert(Entry {
            key,
            value,
            hash,
            next: self.table[index],
        });
        self.table[index] = Some(slot);

        if self.len() > self.threshold {
            self.resize();
        }

        None
    }

    /// Borrow the value for `key`
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = self.find(self.hash_of(key), key)?;
        Some(&self.entries[slot].value)
    }

    /// Mutably borrow the value for `key`
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = self.find(self.hash_of(key), key)?;
        Some(&mut self.entries[slot].value)
    }

    /// Check if `key` has an entry
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(self.hash_of(key), key).is_some()
    }

    /// Remove the entry for `key`, returning its value
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash_of(key);
        let index = self.bucket_index(hash);

        let mut prev: Option<usize> = None;
        let mut current = self.table[index];
        while let Some(slot) = current {
            let entry = &self.entries[slot];
            if entry.hash == hash && entry.key.borrow() == key {
                let next = entry.next;
                match prev {
                    Some(p) => self.entries[p].next = next,
                    None => self.table[index] = next,
                }
                return Some(self.entries.remove(slot).value);
            }
            prev = Some(slot);
            current = entry.next;
        }
        None
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for ChainedHashMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S> FromIterator<(K, V)> for ChainedHashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::with_hasher(S::default());
        map.extend(iter);
        map
    }
}

impl<K, V, S> Extend<(K, V)> for ChainedHashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a ChainedHashMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Borrowing iterator over a [`ChainedHashMap`]
pub struct Iter<'a, K, V> {
    entries: &'a Slab<Entry<K, V>>,
    table: &'a [Option<usize>],
    bucket: usize,
    current: Option<usize>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(slot) = self.current {
                let entries: &'a Slab<Entry<K, V>> = self.entries;
                let entry = &entries[slot];
                self.current = entry.next;
                self.remaining -= 1;
                return Some((&entry.key, &entry.value));
            }

            if self.bucket >= self.table.len() {
                return None;
            }
            self.current = self.table[self.bucket];
            self.bucket += 1;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::hash::Hasher;

    /// Hasher that sends every key to bucket 0
    #[derive(Default, Clone)]
    struct Collide;

    impl Hasher for Collide {
        fn finish(&self) -> u64 {
            0
        }
        fn write(&mut self, _bytes: &[u8]) {}
    }

    type CollideState = BuildHasherDefault<Collide>;

    fn chain_len<K, V, S>(map: &ChainedHashMap<K, V, S>, bucket: usize) -> usize {
        let mut count = 0;
        let mut current = map.table[bucket];
        while let Some(slot) = current {
            count += 1;
            current = map.entries[slot].next;
        }
        count
    }

    #[test]
    fn test_map_new() {
        let map: ChainedHashMap<String, u32> = ChainedHashMap::new();

        assert!(map.is_empty());
        assert_eq!(map.capacity(), DEFAULT_CAPACITY);
        assert_eq!(map.threshold(), 12);
    }

    #[test]
    fn test_map_put_get_replace() {
        let mut map = ChainedHashMap::new();

        assert_eq!(map.put("a".to_string(), 1), None);
        assert_eq!(map.put("b".to_string(), 2), None);
        assert_eq!(map.put("a".to_string(), 10), Some(1));

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("a"), Some(&10));
        assert_eq!(map.get("b"), Some(&2));
        assert_eq!(map.get("c"), None);
    }

    #[test]
    fn test_map_get_mut() {
        let mut map = ChainedHashMap::new();
        map.put(1u32, vec![1]);

        map.get_mut(&1).unwrap().push(2);
        assert_eq!(map.get(&1), Some(&vec![1, 2]));
        assert!(map.get_mut(&2).is_none());
    }

    #[test]
    fn test_map_remove() {
        let mut map = ChainedHashMap::new();
        map.put(1u32, "one");
        map.put(2u32, "two");

        assert_eq!(map.remove(&1), Some("one"));
        assert_eq!(map.remove(&1), None);
        assert_eq!(map.len(), 1);
        assert!(!map.contains_key(&1));
        assert!(map.contains_key(&2));
    }

    #[test]
    fn test_map_resize_at_threshold() {
        let mut map = ChainedHashMap::new();
        for i in 0..12u32 {
            map.put(i, i * 10);
        }
        assert_eq!(map.capacity(), 16);

        // threshold + 1 entries triggers doubling
        map.put(12, 120);
        assert_eq!(map.capacity(), 32);
        assert_eq!(map.threshold(), 24);

        for i in 0..13u32 {
            assert_eq!(map.get(&i), Some(&(i * 10)));
        }
    }

    #[test]
    fn test_map_resize_keeps_last_written_values() {
        let mut map = ChainedHashMap::new();
        for i in 0..100u32 {
            map.put(i, i);
        }
        for i in 0..100u32 {
            map.put(i, i + 1000);
        }

        assert_eq!(map.len(), 100);
        assert_eq!(map.capacity(), 256);
        for i in 0..100u32 {
            assert_eq!(map.get(&i), Some(&(i + 1000)));
        }
    }

    #[test]
    fn test_map_clear_keeps_capacity() {
        let mut map = ChainedHashMap::new();
        for i in 0..20u32 {
            map.put(i, ());
        }
        let capacity = map.capacity();

        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.capacity(), capacity);
        assert!(map.get(&3).is_none());

        map.put(3, ());
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_map_no_shrink_on_remove() {
        let mut map = ChainedHashMap::new();
        for i in 0..40u32 {
            map.put(i, ());
        }
        for i in 0..40u32 {
            map.remove(&i);
        }

        assert!(map.is_empty());
        assert_eq!(map.capacity(), 64);
    }

    #[test]
    fn test_map_collisions_chain() {
        let mut map: ChainedHashMap<u32, u32, CollideState> =
            ChainedHashMap::with_hasher(CollideState::default());
        for i in 0..5 {
            map.put(i, i);
        }

        assert_eq!(chain_len(&map, 0), 5);
        for i in 0..5 {
            assert_eq!(map.get(&i), Some(&i));
        }
    }

    #[test]
    fn test_map_remove_from_chain_positions() {
        let mut map: ChainedHashMap<u32, u32, CollideState> =
            ChainedHashMap::with_hasher(CollideState::default());
        for i in 0..5 {
            map.put(i, i);
        }

        // Chain is 4 -> 3 -> 2 -> 1 -> 0 (prepend order)
        assert_eq!(map.remove(&4), Some(4)); // head
        assert_eq!(map.remove(&2), Some(2)); // middle
        assert_eq!(map.remove(&0), Some(0)); // tail

        assert_eq!(chain_len(&map, 0), 2);
        assert_eq!(map.get(&3), Some(&3));
        assert_eq!(map.get(&1), Some(&1));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_map_collisions_survive_resize() {
        let mut map: ChainedHashMap<u32, u32, CollideState> =
            ChainedHashMap::with_hasher(CollideState::default());
        for i in 0..30 {
            map.put(i, i * 2);
        }

        assert_eq!(map.capacity(), 64);
        assert_eq!(chain_len(&map, 0), 30);
        for i in 0..30 {
            assert_eq!(map.get(&i), Some(&(i * 2)));
        }
    }

    #[test]
    fn test_map_snapshots() {
        let mut map = ChainedHashMap::new();
        map.put("x", 1);
        map.put("y", 2);
        map.put("z", 3);

        let mut keys: Vec<&str> = map.keys().into_iter().copied().collect();
        keys.sort();
        assert_eq!(keys, vec!["x", "y", "z"]);

        let mut values: Vec<i32> = map.values().into_iter().copied().collect();
        values.sort();
        assert_eq!(values, vec![1, 2, 3]);

        assert_eq!(map.entries().len(), 3);
        assert_eq!(map.iter().len(), 3);
    }

    #[test]
    fn test_map_contains_value() {
        let mut map = ChainedHashMap::new();
        map.put(1u8, "a");
        map.put(2u8, "b");

        assert!(map.contains_value(&"b"));
        assert!(!map.contains_value(&"c"));
    }

    #[test]
    fn test_map_threshold_exact_for_large_capacities() {
        assert_eq!(threshold_for(16), 12);
        assert_eq!(threshold_for(1 << 25), 3 << 23);
        assert_eq!(threshold_for((1 << 25) + 4), ((1 << 25) + 4) / 4 * 3);
    }

    #[test]
    fn test_map_spread() {
        assert_eq!(spread(0), 0);
        assert_eq!(spread(0x1_0000), 0x1_0001);
        assert_eq!(spread(0xFFFF), 0xFFFF);
    }

    #[test]
    fn test_map_with_capacity_rounds_up() {
        let map: ChainedHashMap<u8, u8> = ChainedHashMap::with_capacity(0);
        assert_eq!(map.capacity(), 1);

        let map: ChainedHashMap<u8, u8> = ChainedHashMap::with_capacity(100);
        assert_eq!(map.capacity(), 128);
        assert_eq!(map.threshold(), 96);
    }

    #[test]
    fn test_map_from_iter() {
        let map: ChainedHashMap<u32, char> = vec![(1, 'a'), (2, 'b'), (1, 'c')].into_iter().collect();

        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&1), Some(&'c'));
    }
}
