//! Debug-only reentrancy detection for the hash containers.
//!
//! While a chain is being walked or relinked, the only user code that runs
//! is the key's `Hash`/`Eq`. If one of those reaches back into the same
//! container, the bucket structure may be observed half-updated. Debug
//! builds panic on such nesting; release builds carry no state at all.
//!
//! The tracker uses a `Cell`, so a container embedding it is `Send` but not
//! `Sync`: moving a container to another thread is fine, sharing one
//! requires an external lock such as `threads::Mutex`.

#[cfg(debug_assertions)]
use core::cell::Cell;
use core::marker::PhantomData;

#[derive(Debug, Default)]
pub(crate) struct AccessTracker {
    #[cfg(debug_assertions)]
    active: Cell<bool>,
    #[cfg(not(debug_assertions))]
    _unsync: PhantomData<core::cell::Cell<()>>,
}

impl AccessTracker {
    pub(crate) const fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            active: Cell::new(false),
            #[cfg(not(debug_assertions))]
            _unsync: PhantomData,
        }
    }

    /// Mark the container busy until the returned guard drops.
    #[inline]
    pub(crate) fn enter(&self) -> AccessGuard<'_> {
        #[cfg(debug_assertions)]
        {
            assert!(
                !self.active.replace(true),
                "reentrant access: container used from within its own key Hash/Eq"
            );
            return AccessGuard {
                tracker: self,
                _lt: PhantomData,
            };
        }

        #[cfg(not(debug_assertions))]
        {
            return AccessGuard { _lt: PhantomData };
        }
    }
}

pub(crate) struct AccessGuard<'a> {
    #[cfg(debug_assertions)]
    tracker: &'a AccessTracker,
    _lt: PhantomData<&'a ()>,
}

impl Drop for AccessGuard<'_> {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        self.tracker.active.set(false);
    }
}
