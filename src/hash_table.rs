//! HashTable: key to value mapping over the chaining engine.

use crate::chained_table::ChainedTable;
use crate::error::ContainerError;
use crate::poly_hash::PolynomialState;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use log::debug;

pub use crate::chained_table::{Chain, Iter, IterMut};

/// Open-chaining hash table with unique keys.
///
/// `push` inserts or overwrites; the bucket array doubles when the load
/// factor is above 0.75 ahead of inserting a new key. Removal never
/// shrinks the bucket array.
///
/// Hashing is pluggable through `S` (default: the polynomial byte hash);
/// equality is the key's `Eq`.
pub struct HashTable<K, V, S = PolynomialState> {
    inner: ChainedTable<K, V, S>,
}

impl<K, V> HashTable<K, V>
where
    K: Eq + Hash,
{
    /// Create a table with `capacity` buckets. `capacity` must be non-zero.
    pub fn with_capacity(capacity: usize) -> Result<Self, ContainerError> {
        Ok(Self {
            inner: ChainedTable::with_capacity(capacity)?,
        })
    }
}

impl<K, V, S> HashTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Result<Self, ContainerError> {
        Ok(Self {
            inner: ChainedTable::with_capacity_and_hasher(capacity, hasher)?,
        })
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Number of buckets.
    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    pub fn load_factor(&self) -> f64 {
        self.inner.load_factor()
    }

    pub fn hasher(&self) -> &S {
        self.inner.hasher()
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.get(key)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.get_mut(key)
    }

    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.get_key_value(key)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.contains_key(key)
    }

    /// Insert `key -> value`, or overwrite the value of an existing key and
    /// return the old one.
    pub fn push(&mut self, key: K, value: V) -> Result<Option<V>, ContainerError> {
        self.inner.insert(key, value)
    }

    /// Remove `key` and return its value. Absent keys are a no-op.
    pub fn pop<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.remove(key).map(|(_, v)| v)
    }

    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.remove(key)
    }

    /// Bucket index `key` maps to under the current capacity.
    pub fn bucket_of<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash,
    {
        self.inner.bucket_of(key)
    }

    /// Rehash every entry into `new_capacity` buckets.
    pub fn resize(&mut self, new_capacity: usize) -> Result<(), ContainerError> {
        self.inner.resize(new_capacity)
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Drop all entries and the bucket array.
    pub fn destroy(self) {
        debug!(
            "hash_table: destroyed ({} entries, {} buckets)",
            self.inner.len(),
            self.inner.capacity()
        );
    }
}

impl<K, V, S> HashTable<K, V, S> {
    /// Keys chained in bucket `index`, most recently linked first.
    pub fn bucket_keys(&self, index: usize) -> Chain<'_, K, V> {
        self.inner.bucket_keys(index)
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        self.inner.iter()
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        self.inner.iter_mut()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.inner.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.inner.iter().map(|(_, v)| v)
    }
}

impl<'a, K, V, S> IntoIterator for &'a HashTable<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

impl<K, V, S> fmt::Debug for HashTable<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.inner, f)
    }
}
