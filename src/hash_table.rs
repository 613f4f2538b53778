//! Separate-chaining hash table with a fixed number of buckets
//!
//! Each bucket is a chain of `(key, value)` entries kept in insertion order.
//! A key's bucket is `hash(key) % capacity`. The bucket count is chosen at
//! construction and never changes: there is no rehashing, so chains grow
//! without bound as the table fills. Lookups cost O(chain length).
//!
//! # Example
//!
//! ```rust
//! use classic_heaps::hash_table::HashTable;
//!
//! let mut table = HashTable::with_capacity(8);
//! table.put("apple", 3);
//! table.put("pear", 5);
//! table.put("apple", 4);
//!
//! assert_eq!(table.get("apple"), Some(&4));
//! assert_eq!(table.len(), 2);
//! assert!(table.remove("pear"));
//! assert_eq!(table.get("pear"), None);
//! ```

use std::borrow::Borrow;
use std::collections::hash_map::RandomState;
use std::fmt;
use std::hash::{BuildHasher, Hash};
use tracing::debug;

/// Bucket count used by [`HashTable::new`] and [`Default`]
pub const DEFAULT_CAPACITY: usize = 16;

/// Error type for hash table construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableError {
    /// A table needs at least one bucket
    ZeroCapacity,
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::ZeroCapacity => write!(f, "hash table capacity must be at least 1"),
        }
    }
}

impl std::error::Error for TableError {}

/// Fixed-capacity separate-chaining hash table
pub struct HashTable<K, V, S = RandomState> {
    buckets: Vec<Vec<(K, V)>>,
    hash_builder: S,
    len: usize,
}

impl<K, V> HashTable<K, V, RandomState> {
    /// Creates a table with [`DEFAULT_CAPACITY`] buckets
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table with `capacity` buckets
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0. Use [`HashTable::try_with_capacity`] to
    /// handle that case.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, RandomState::new())
    }

    /// Creates a table with `capacity` buckets, rejecting a zero capacity
    pub fn try_with_capacity(capacity: usize) -> Result<Self, TableError> {
        Self::try_with_capacity_and_hasher(capacity, RandomState::new())
    }
}

impl<K, V, S> HashTable<K, V, S> {
    /// Creates a table with [`DEFAULT_CAPACITY`] buckets and the given hasher
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_capacity_and_hasher(DEFAULT_CAPACITY, hash_builder)
    }

    /// Creates a table with `capacity` buckets and the given hasher
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        assert!(capacity > 0, "{}", TableError::ZeroCapacity);
        Self::build(capacity, hash_builder)
    }

    /// Creates a table with `capacity` buckets and the given hasher,
    /// rejecting a zero capacity
    pub fn try_with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Result<Self, TableError> {
        if capacity == 0 {
            return Err(TableError::ZeroCapacity);
        }
        Ok(Self::build(capacity, hash_builder))
    }

    fn build(capacity: usize, hash_builder: S) -> Self {
        debug!(capacity, "creating hash table");
        let mut buckets = Vec::with_capacity(capacity);
        buckets.resize_with(capacity, Vec::new);
        Self {
            buckets,
            hash_builder,
            len: 0,
        }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of buckets, fixed at construction
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Removes every entry, keeping the buckets
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.len = 0;
    }

    /// Iterates over all entries, bucket by bucket, in chain order
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.buckets
            .iter()
            .flat_map(|bucket| bucket.iter().map(|(k, v)| (k, v)))
    }

    /// Length of the longest chain
    pub fn longest_chain(&self) -> usize {
        self.buckets.iter().map(Vec::len).max().unwrap_or(0)
    }
}

impl<K, V, S> HashTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Bucket index of a key: hash, then reduce modulo the bucket count
    fn index<Q>(&self, key: &Q) -> usize
    where
        Q: Hash + ?Sized,
    {
        (self.hash_builder.hash_one(key) % self.buckets.len() as u64) as usize
    }

    /// Stores `value` under `key`
    ///
    /// An existing entry with an equal key has its value overwritten and the
    /// old value is returned; otherwise the entry is appended to its chain.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let index = self.index(&key);
        let bucket = &mut self.buckets[index];

        if let Some((_, slot)) = bucket.iter_mut().find(|(k, _)| *k == key) {
            return Some(std::mem::replace(slot, value));
        }

        bucket.push((key, value));
        self.len += 1;
        None
    }

    /// Returns the value stored under `key`, or `None`
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.buckets[self.index(key)]
            .iter()
            .find(|(k, _)| key == k.borrow())
            .map(|(_, v)| v)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.index(key);
        self.buckets[index]
            .iter_mut()
            .find(|(k, _)| key == k.borrow())
            .map(|(_, v)| v)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Removes the entry for `key`; returns whether one was removed
    ///
    /// The remaining entries of the chain keep their order.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.index(key);
        let bucket = &mut self.buckets[index];

        match bucket.iter().position(|(k, _)| key == k.borrow()) {
            Some(position) => {
                bucket.remove(position);
                self.len -= 1;
                true
            }
            None => false,
        }
    }
}

impl<K, V> Default for HashTable<K, V, RandomState> {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl<K, V, S> Extend<(K, V)> for HashTable<K, V, S>
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

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for HashTable<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
