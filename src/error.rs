//! Errors surfaced by the containers.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContainerError {
    /// The allocator refused a buffer of `slots` elements. The container is
    /// left exactly as it was before the failed call.
    #[error("out of memory: could not allocate {slots} slots")]
    OutOfMemory { slots: usize },
    /// Hash containers need at least one bucket.
    #[error("hash container capacity must be greater than zero")]
    ZeroCapacity,
}

impl ContainerError {
    pub(crate) fn out_of_memory(slots: usize) -> Self {
        ContainerError::OutOfMemory { slots }
    }
}
