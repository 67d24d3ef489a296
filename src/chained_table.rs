//! ChainedTable: the open-chaining engine behind `HashTable` and `HashSet`.
//!
//! Layout
//! - `buckets`: one optional chain head per bucket.
//! - `nodes`: a slotmap arena holding every entry together with its cached
//!   hash and the key of the next node in its chain.
//!
//! Invariants
//! - Every live node is reachable from exactly one chain, the one at
//!   `hash % capacity`.
//! - `len()` equals the number of reachable nodes.
//! - Keys are unique under `Eq`.
//! - The cached hash is the only hash ever used after insertion, so
//!   relinking during `resize` never calls back into user code.

use crate::config::LOAD_FACTOR;
use crate::error::ContainerError;
use crate::poly_hash::PolynomialState;
use crate::reentrancy::AccessTracker;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use log::{debug, trace};
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    struct NodeKey;
}

#[derive(Debug)]
struct Node<K, V> {
    key: K,
    value: V,
    hash: u64,
    next: Option<NodeKey>,
}

/// Result of walking one chain: where the key lives, and who links to it.
struct Probe {
    slot: usize,
    prev: Option<NodeKey>,
    found: Option<NodeKey>,
}

pub struct ChainedTable<K, V, S = PolynomialState> {
    hasher: S,
    buckets: Vec<Option<NodeKey>>,
    nodes: SlotMap<NodeKey, Node<K, V>>,
    access: AccessTracker,
}

fn alloc_buckets(capacity: usize) -> Result<Vec<Option<NodeKey>>, ContainerError> {
    if capacity == 0 {
        return Err(ContainerError::ZeroCapacity);
    }
    let mut buckets = Vec::new();
    buckets
        .try_reserve_exact(capacity)
        .map_err(|_| ContainerError::out_of_memory(capacity))?;
    buckets.resize(capacity, None);
    Ok(buckets)
}

impl<K, V> ChainedTable<K, V>
where
    K: Eq + Hash,
{
    pub fn with_capacity(capacity: usize) -> Result<Self, ContainerError> {
        Self::with_capacity_and_hasher(capacity, PolynomialState)
    }
}

impl<K, V, S> ChainedTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Result<Self, ContainerError> {
        Ok(Self {
            hasher,
            buckets: alloc_buckets(capacity)?,
            nodes: SlotMap::with_key(),
            access: AccessTracker::new(),
        })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn load_factor(&self) -> f64 {
        self.nodes.len() as f64 / self.buckets.len() as f64
    }

    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    #[inline]
    fn slot_in(hash: u64, capacity: usize) -> usize {
        (hash % capacity as u64) as usize
    }

    // Runs user Hash/Eq, so the whole walk sits under the access guard.
    fn probe<Q>(&self, q: &Q) -> (u64, Probe)
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.access.enter();
        let hash = self.hasher.hash_one(q);
        let slot = Self::slot_in(hash, self.buckets.len());
        let mut prev = None;
        let mut cursor = self.buckets[slot];
        while let Some(k) = cursor {
            let Some(node) = self.nodes.get(k) else {
                break;
            };
            if node.hash == hash && node.key.borrow() == q {
                return (
                    hash,
                    Probe {
                        slot,
                        prev,
                        found: Some(k),
                    },
                );
            }
            prev = Some(k);
            cursor = node.next;
        }
        (
            hash,
            Probe {
                slot,
                prev: None,
                found: None,
            },
        )
    }

    pub fn contains_key<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.probe(q).1.found.is_some()
    }

    pub fn get<Q>(&self, q: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get_key_value(q).map(|(_, v)| v)
    }

    pub fn get_key_value<Q>(&self, q: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let k = self.probe(q).1.found?;
        self.nodes.get(k).map(|n| (&n.key, &n.value))
    }

    pub fn get_mut<Q>(&mut self, q: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let k = self.probe(q).1.found?;
        self.nodes.get_mut(k).map(|n| &mut n.value)
    }

    /// Bucket index `q` hashes to under the current capacity.
    pub fn bucket_of<Q>(&self, q: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash,
    {
        let _g = self.access.enter();
        Self::slot_in(self.hasher.hash_one(q), self.buckets.len())
    }

    fn exceeds_load_factor(&self) -> bool {
        self.load_factor() > LOAD_FACTOR
    }

    /// Insert-or-update. An existing key keeps its stored key and node and
    /// gets `value`; the previous value is returned. A new key first grows
    /// the table when the current load factor is above the threshold, then
    /// becomes the head of its chain.
    pub fn insert(&mut self, key: K, value: V) -> Result<Option<V>, ContainerError> {
        let (hash, probe) = self.probe(&key);
        if let Some(k) = probe.found {
            if let Some(node) = self.nodes.get_mut(k) {
                return Ok(Some(core::mem::replace(&mut node.value, value)));
            }
        }

        if self.exceeds_load_factor() {
            let doubled = self
                .buckets
                .len()
                .checked_mul(2)
                .ok_or(ContainerError::out_of_memory(usize::MAX))?;
            self.resize(doubled)?;
        }

        let slot = Self::slot_in(hash, self.buckets.len());
        let head = self.buckets[slot];
        let k = self.nodes.insert(Node {
            key,
            value,
            hash,
            next: head,
        });
        self.buckets[slot] = Some(k);
        trace!("chained_table: insert into bucket {} (len {})", slot, self.nodes.len());
        Ok(None)
    }

    /// Unlink and return the entry for `q`. Absent keys are a no-op.
    pub fn remove<Q>(&mut self, q: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let (_, probe) = self.probe(q);
        let target = probe.found?;
        let node = self.nodes.remove(target)?;
        match probe.prev {
            None => self.buckets[probe.slot] = node.next,
            Some(p) => {
                if let Some(pred) = self.nodes.get_mut(p) {
                    pred.next = node.next;
                }
            }
        }
        trace!("chained_table: remove from bucket {} (len {})", probe.slot, self.nodes.len());
        Some((node.key, node.value))
    }

    /// Rebuild the bucket array with `new_capacity` heads and relink every
    /// node into `hash % new_capacity`. The new array is allocated before
    /// any node is touched, so a failure leaves the table unchanged.
    pub fn resize(&mut self, new_capacity: usize) -> Result<(), ContainerError> {
        let _g = self.access.enter();
        let mut fresh = alloc_buckets(new_capacity)?;
        for head in self.buckets.iter() {
            let mut cursor = *head;
            while let Some(k) = cursor {
                let Some(node) = self.nodes.get_mut(k) else {
                    break;
                };
                cursor = node.next;
                let slot = Self::slot_in(node.hash, new_capacity);
                node.next = fresh[slot];
                fresh[slot] = Some(k);
            }
        }
        debug!(
            "chained_table: resized {} -> {} buckets ({} entries)",
            self.buckets.len(),
            new_capacity,
            self.nodes.len()
        );
        self.buckets = fresh;
        Ok(())
    }

    /// Drop every entry; the bucket count is kept.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.buckets.fill(None);
    }
}

impl<K, V, S> ChainedTable<K, V, S> {
    /// Keys of the chain at `bucket`, head first. Out-of-range buckets are empty.
    pub fn bucket_keys(&self, bucket: usize) -> Chain<'_, K, V> {
        Chain {
            nodes: &self.nodes,
            cursor: self.buckets.get(bucket).copied().flatten(),
        }
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            it: self.nodes.values(),
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            it: self.nodes.values_mut(),
        }
    }
}

impl<K, V, S> fmt::Debug for ChainedTable<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Walk of a single bucket's chain.
pub struct Chain<'a, K, V> {
    nodes: &'a SlotMap<NodeKey, Node<K, V>>,
    cursor: Option<NodeKey>,
}

impl<'a, K, V> Iterator for Chain<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes.get(self.cursor?)?;
        self.cursor = node.next;
        Some(&node.key)
    }
}

/// Iterator over entries in arena order (unspecified, not insertion order).
pub struct Iter<'a, K, V> {
    it: slotmap::basic::Values<'a, NodeKey, Node<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|n| (&n.key, &n.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

pub struct IterMut<'a, K, V> {
    it: slotmap::basic::ValuesMut<'a, NodeKey, Node<K, V>>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|n| (&n.key, &mut n.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

#[cfg(test)]
impl<K, V, S> ChainedTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Walk every chain and check placement and count against the arena.
    pub(crate) fn assert_structure(&self) {
        let mut reachable = 0;
        for (slot, head) in self.buckets.iter().enumerate() {
            let mut cursor = *head;
            while let Some(k) = cursor {
                let node = self.nodes.get(k).expect("chain points at a live node");
                assert_eq!(Self::slot_in(node.hash, self.buckets.len()), slot);
                assert_eq!(self.hasher.hash_one(&node.key), node.hash);
                reachable += 1;
                cursor = node.next;
            }
        }
        assert_eq!(reachable, self.nodes.len(), "every node sits on exactly one chain");
    }
}
