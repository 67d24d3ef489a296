//! reservoir: a growable array, an open-chaining hash table and a hash set
//! with explicit, deterministic capacity policies.
//!
//! Internal Design:
//!
//! Summary
//! - `DynamicArray<T>`: contiguous storage; grows by the golden ratio
//!   (`floor(capacity * φ) + 1`) when full and halves once fewer than a
//!   quarter of the slots are used.
//! - `ChainedTable<K, V, S>`: one open-chaining engine shared by both hash
//!   containers. Bucket heads index into a slotmap arena of chain nodes;
//!   a node carries its key, value, cached hash and the next node's key.
//! - `HashTable<K, V, S>`: the engine as a key to value map (insert or
//!   overwrite).
//! - `HashSet<T, S>`: the engine with `V = ()` (insert if absent).
//!
//! Capacity policy
//! - Hash containers double their bucket count when `len / capacity`
//!   exceeds 0.75 just before a new key goes in. Overwriting an existing
//!   key never resizes. Removal never shrinks.
//! - Every reallocation is allocate-then-swap: the new buffer or bucket
//!   array is reserved before the old one is touched, so `OutOfMemory`
//!   leaves the container as it was.
//!
//! Hashing and equality
//! - Hashing is a `BuildHasher` parameter. The default, `PolynomialState`,
//!   folds every byte the key's `Hash` impl writes as `hash * 31 + byte`
//!   in 32-bit wrapping arithmetic, which makes bucket placement
//!   reproducible across runs on one platform. Length prefixes written by
//!   `Hash` for arrays and slices are `usize`, so placement of such keys
//!   differs between 32-bit and 64-bit targets.
//! - Equality is the key's `Eq`; wrap the key in a newtype to change it.
//! - The hash is cached per node at insertion; rehashing never runs user
//!   code.
//!
//! Threading
//! - Containers are `Send` but not `Sync`. Share one across threads through
//!   `threads::Mutex`, which serializes whole operations.
//! - A debug-only guard panics if a key's `Hash`/`Eq` re-enters the
//!   container it is being probed in.
//!
//! Also provided
//! - `safe::copy_bounded`: truncating, always-terminated copy into a byte
//!   buffer.
//! - `files`: whole-file text load and save.
//! - `threads`: named thread spawn/join and the mutex above.

mod config;
mod error;
mod reentrancy;

#[cfg(feature = "bench_internal")]
pub mod chained_table;
#[cfg(not(feature = "bench_internal"))]
mod chained_table;
mod chained_table_proptest;

pub mod dynamic_array;
pub mod files;
pub mod hash_set;
pub mod hash_table;
pub mod poly_hash;
pub mod safe;
pub mod threads;

// Public surface
pub use config::{GOLDEN_RATIO, LOAD_FACTOR, SHRINK_DIVISOR};
pub use dynamic_array::DynamicArray;
pub use error::ContainerError;
pub use hash_set::HashSet;
pub use hash_table::HashTable;
pub use poly_hash::{PolynomialHasher, PolynomialState};
