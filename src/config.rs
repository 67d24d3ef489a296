//! Capacity policy constants shared by the containers.

/// Growth multiplier for `DynamicArray`: `new = floor(capacity * φ) + 1`.
pub const GOLDEN_RATIO: f64 = 1.618_033_988_749_895;

/// Hash containers double their bucket count once `len / capacity` exceeds
/// this ratio ahead of a fresh insert.
pub const LOAD_FACTOR: f64 = 0.75;

/// `DynamicArray` halves its capacity when `len < capacity / SHRINK_DIVISOR`.
pub const SHRINK_DIVISOR: usize = 4;
