//! Named OS threads and a mutex for serializing access to the containers.
//!
//! The containers are `Send` but not `Sync`; sharing one between threads
//! goes through `Mutex`, which locks around whole operations.

use log::{debug, warn};
use parking_lot::MutexGuard;
use std::any::Any;
use std::io;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ThreadError {
    #[error("failed to spawn thread {name:?}: {source}")]
    Spawn {
        name: String,
        #[source]
        source: io::Error,
    },
    #[error("thread {name:?} panicked: {message}")]
    Panicked { name: String, message: String },
    #[error("lock not acquired within {0:?}")]
    LockTimeout(Duration),
}

/// Handle to a spawned thread; `join` yields the closure's return value.
pub struct Thread<T> {
    name: String,
    handle: JoinHandle<T>,
}

/// Start `f` on a new OS thread called `name`.
pub fn spawn<F, T>(name: impl Into<String>, f: F) -> Result<Thread<T>, ThreadError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let name = name.into();
    let handle = thread::Builder::new()
        .name(name.clone())
        .spawn(f)
        .map_err(|source| ThreadError::Spawn {
            name: name.clone(),
            source,
        })?;
    debug!("spawned thread {:?}", name);
    Ok(Thread { name, handle })
}

impl<T> Thread<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the thread to finish. A panic inside the thread comes back
    /// as `ThreadError::Panicked` with the panic message.
    pub fn join(self) -> Result<T, ThreadError> {
        let Thread { name, handle } = self;
        match handle.join() {
            Ok(value) => {
                debug!("joined thread {:?}", name);
                Ok(value)
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                warn!("thread {:?} panicked: {}", name, message);
                Err(ThreadError::Panicked { name, message })
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "<non-string panic payload>".to_string()
    }
}

/// Mutual exclusion around a value. Unlocking is dropping the guard;
/// destroying the mutex is dropping it.
#[derive(Debug, Default)]
pub struct Mutex<T> {
    inner: parking_lot::Mutex<T>,
}

impl<T> Mutex<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: parking_lot::Mutex::new(value),
        }
    }

    /// Block until the lock is held.
    pub fn lock(&self) -> MutexGuard<'_, T> {
        self.inner.lock()
    }

    pub fn try_lock(&self) -> Option<MutexGuard<'_, T>> {
        self.inner.try_lock()
    }

    pub fn try_lock_for(&self, timeout: Duration) -> Result<MutexGuard<'_, T>, ThreadError> {
        self.inner
            .try_lock_for(timeout)
            .ok_or(ThreadError::LockTimeout(timeout))
    }

    pub fn get_mut(&mut self) -> &mut T {
        self.inner.get_mut()
    }

    pub fn into_inner(self) -> T {
        self.inner.into_inner()
    }
}
