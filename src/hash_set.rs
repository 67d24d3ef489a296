//! HashSet: the chaining engine with no associated values.

use crate::chained_table::{self, ChainedTable};
use crate::error::ContainerError;
use crate::poly_hash::PolynomialState;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use log::debug;

/// Open-chaining hash set. Same bucket, growth and hashing rules as
/// `HashTable`; `push` of an element already present is a no-op.
pub struct HashSet<T, S = PolynomialState> {
    inner: ChainedTable<T, (), S>,
}

impl<T> HashSet<T>
where
    T: Eq + Hash,
{
    pub fn with_capacity(capacity: usize) -> Result<Self, ContainerError> {
        Ok(Self {
            inner: ChainedTable::with_capacity(capacity)?,
        })
    }
}

impl<T, S> HashSet<T, S>
where
    T: Eq + Hash,
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

    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    pub fn load_factor(&self) -> f64 {
        self.inner.load_factor()
    }

    pub fn hasher(&self) -> &S {
        self.inner.hasher()
    }

    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.contains_key(value)
    }

    /// The stored element equal to `value`.
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.get_key_value(value).map(|(k, _)| k)
    }

    /// Insert `value` if absent. Returns `true` when it was newly added;
    /// a duplicate leaves the stored element in place.
    pub fn push(&mut self, value: T) -> Result<bool, ContainerError> {
        Ok(self.inner.insert(value, ())?.is_none())
    }

    /// Remove the element equal to `value`. Returns whether it was present.
    pub fn pop<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.remove(value).is_some()
    }

    /// Remove and return the stored element equal to `value`.
    pub fn take<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.remove(value).map(|(k, ())| k)
    }

    /// Bucket index `value` maps to under the current capacity.
    pub fn bucket_of<Q>(&self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash,
    {
        self.inner.bucket_of(value)
    }

    pub fn resize(&mut self, new_capacity: usize) -> Result<(), ContainerError> {
        self.inner.resize(new_capacity)
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    pub fn destroy(self) {
        debug!(
            "hash_set: destroyed ({} elements, {} buckets)",
            self.inner.len(),
            self.inner.capacity()
        );
    }
}

impl<T, S> HashSet<T, S> {
    /// Elements chained in bucket `index`, most recently linked first.
    pub fn bucket_elements(&self, index: usize) -> impl Iterator<Item = &T> + '_ {
        self.inner.bucket_keys(index)
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            it: self.inner.iter(),
        }
    }
}

pub struct Iter<'a, T> {
    it: chained_table::Iter<'a, T, ()>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<'a, T, S> IntoIterator for &'a HashSet<T, S> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug, S> fmt::Debug for HashSet<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Invariant: pushing a present element is a no-op returning `false`.
    #[test]
    fn push_is_idempotent() {
        let mut s: HashSet<u32> = HashSet::with_capacity(2).unwrap();
        assert!(s.push(5).unwrap());
        assert!(!s.push(5).unwrap());
        assert_eq!(s.len(), 1);
    }

    /// Invariant: a duplicate push keeps the originally stored element.
    #[test]
    fn duplicate_keeps_original_element() {
        #[derive(Debug)]
        struct Tagged(&'static str, u8);
        impl PartialEq for Tagged {
            fn eq(&self, other: &Self) -> bool {
                self.0 == other.0
            }
        }
        impl Eq for Tagged {}
        impl Hash for Tagged {
            fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
                self.0.hash(state);
            }
        }

        let mut s = HashSet::with_capacity(4).unwrap();
        s.push(Tagged("a", 1)).unwrap();
        s.push(Tagged("a", 2)).unwrap();
        assert_eq!(s.get(&Tagged("a", 0)).map(|t| t.1), Some(1));
    }

    /// Invariant: pop/take remove exactly once.
    #[test]
    fn pop_and_take() {
        let mut s: HashSet<String> = HashSet::with_capacity(2).unwrap();
        s.push("x".to_string()).unwrap();
        s.push("y".to_string()).unwrap();
        assert!(s.pop("x"));
        assert!(!s.pop("x"));
        assert_eq!(s.take("y"), Some("y".to_string()));
        assert_eq!(s.take("y"), None);
        assert!(s.is_empty());
    }

    /// Invariant: iteration visits each element once.
    #[test]
    fn iter_visits_all() {
        let mut s: HashSet<u16> = HashSet::with_capacity(1).unwrap();
        for i in 0..50 {
            s.push(i).unwrap();
        }
        let mut seen: Vec<u16> = s.iter().copied().collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..50).collect::<Vec<_>>());
        assert_eq!((&s).into_iter().count(), 50);
    }
}
