//! DynamicArray: contiguous growable array with an explicit capacity policy.
//!
//! Growth: when full, capacity becomes `floor(capacity * φ) + 1`.
//! Shrink: after a pop leaves `len < capacity / 4`, capacity halves.
//!
//! Both reallocations reserve a fresh buffer first and only then move the
//! elements over, so an allocation failure leaves the array untouched.

use crate::config::{GOLDEN_RATIO, SHRINK_DIVISOR};
use crate::error::ContainerError;
use core::fmt;
use log::{debug, warn};

pub struct DynamicArray<T> {
    items: Vec<T>,
    // Logical capacity. The backing Vec may hold more if the allocator
    // rounds up; only this value drives growth and shrink.
    capacity: usize,
}

/// Capacity after one growth step from `capacity`.
#[inline]
pub fn grown_capacity(capacity: usize) -> usize {
    let scaled = (capacity as f64 * GOLDEN_RATIO).floor() as usize;
    scaled.saturating_add(1).max(capacity.saturating_add(1))
}

impl<T> DynamicArray<T> {
    pub fn with_capacity(capacity: usize) -> Result<Self, ContainerError> {
        let mut items = Vec::new();
        items
            .try_reserve_exact(capacity)
            .map_err(|_| ContainerError::out_of_memory(capacity))?;
        Ok(Self { items, capacity })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Element at `index`, or `None` when `index >= len`.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Append `value`, growing first if the array is full. On
    /// `OutOfMemory` the array is unchanged and `value` is dropped.
    pub fn push(&mut self, value: T) -> Result<(), ContainerError> {
        if self.items.len() >= self.capacity {
            let grown = grown_capacity(self.capacity);
            self.reallocate(grown)?;
            debug!("dynamic_array: grew to {} slots", grown);
        }
        self.items.push(value);
        Ok(())
    }

    /// Remove and return the last element. Empty arrays return `None`.
    pub fn pop(&mut self) -> Option<T> {
        let value = self.items.pop()?;
        if self.items.len() < self.capacity / SHRINK_DIVISOR {
            let halved = self.capacity / 2;
            match self.reallocate(halved) {
                Ok(()) => debug!("dynamic_array: shrank to {} slots", halved),
                Err(e) => warn!("dynamic_array: keeping {} slots, shrink failed: {}", self.capacity, e),
            }
        }
        Some(value)
    }

    fn reallocate(&mut self, new_capacity: usize) -> Result<(), ContainerError> {
        debug_assert!(new_capacity >= self.items.len());
        let mut fresh = Vec::new();
        fresh
            .try_reserve_exact(new_capacity)
            .map_err(|_| ContainerError::out_of_memory(new_capacity))?;
        fresh.append(&mut self.items);
        self.items = fresh;
        self.capacity = new_capacity;
        Ok(())
    }

    /// Release the buffer. Taking `self` rules out any later use.
    pub fn destroy(self) {
        debug!(
            "dynamic_array: destroyed ({} elements, {} slots)",
            self.items.len(),
            self.capacity
        );
    }
}

impl<'a, T> IntoIterator for &'a DynamicArray<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for DynamicArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicArray")
            .field("items", &self.items)
            .field("capacity", &self.capacity)
            .finish()
    }
}
