//! Default hashing strategy for the hash containers.
//!
//! Classic polynomial rolling hash over every byte written by the key's
//! `Hash` impl: `hash = hash * 31 + byte`, seeded at 0, with 32-bit
//! wraparound. It is deterministic across runs and processes, which keeps
//! bucket placement reproducible on a given platform.
//!
//! The input is whatever the key's `Hash` impl feeds the hasher, not just
//! the key's own bytes. `str` appends a `0xff` terminator, and arrays and
//! slices are prefixed with their length as a native-endian `usize`. Bucket
//! indices for such keys therefore differ from `polynomial_hash` over the
//! raw bytes, and for length-prefixed keys they differ between 32-bit and
//! 64-bit targets. Hash the raw bytes in a custom `Hash` impl when exact
//! placement matters.

use core::hash::{BuildHasher, Hasher};

const MULTIPLIER: u32 = 31;

/// Hash a raw byte slice with the polynomial rolling hash.
#[inline]
pub fn polynomial_hash(bytes: &[u8]) -> u32 {
    let mut h = PolynomialHasher::default();
    h.write(bytes);
    h.state
}

#[derive(Clone, Copy, Debug, Default)]
pub struct PolynomialHasher {
    state: u32,
}

impl Hasher for PolynomialHasher {
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.state = self
                .state
                .wrapping_mul(MULTIPLIER)
                .wrapping_add(u32::from(b));
        }
    }

    #[inline]
    fn finish(&self) -> u64 {
        u64::from(self.state)
    }
}

/// `BuildHasher` producing fresh `PolynomialHasher`s. Stateless, so every
/// table built with it places the same key in the same bucket.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PolynomialState;

impl BuildHasher for PolynomialState {
    type Hasher = PolynomialHasher;

    #[inline]
    fn build_hasher(&self) -> Self::Hasher {
        PolynomialHasher::default()
    }
}
