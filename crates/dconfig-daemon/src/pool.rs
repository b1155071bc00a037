//! Reusable object pool for connection handlers.
//!
//! Handlers are expensive to set up, so the daemon recycles them instead of
//! building one per connection.
//!
//! # Lifecycle
//!
//! ```text
//!            pull()                push()
//!   Free ───────────► InUse ───────────► Free
//!    │
//!    └── pool dropped ──► Destroyed
//! ```
//!
//! `ObjectPool` itself is not synchronized. Share it through
//! [`SharedObjectPool`], or own it from a single task.
//!
//! # Example
//!
//! ```ignore
//! let mut pool: ObjectPool<Handler> = ObjectPool::new();
//! pool.set_init_func(|h| h.attach_bus());
//!
//! let handler = pool.pull();   // built and initialized
//! pool.push(handler);
//! let again = pool.pull();     // same instance, init hook not re-run
//! ```

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};
use tracing::{debug, warn};

/// Hook run once on every brand-new pool entry.
pub type InitFunc<T> = Box<dyn Fn(&mut T) + Send + Sync>;

/// FIFO pool of heap-allocated `T`s.
pub struct ObjectPool<T> {
    free: VecDeque<Box<T>>,
    init: Option<InitFunc<T>>,
    checked_out: usize,
}

impl<T: Default> ObjectPool<T> {
    /// Create an empty pool with no init hook.
    pub fn new() -> Self {
        Self {
            free: VecDeque::new(),
            init: None,
            checked_out: 0,
        }
    }

    /// Create an empty pool with an init hook installed.
    pub fn with_init_func(init: impl Fn(&mut T) + Send + Sync + 'static) -> Self {
        let mut pool = Self::new();
        pool.set_init_func(init);
        pool
    }

    /// Install the hook run on newly constructed entries.
    ///
    /// Entries that already exist, free or checked out, are not touched.
    pub fn set_init_func(&mut self, init: impl Fn(&mut T) + Send + Sync + 'static) {
        self.init = Some(Box::new(init));
    }

    /// Take an entry out of the pool.
    ///
    /// Reuses the entry that has been free the longest. When the pool is
    /// empty a new `T::default()` is built and the init hook runs on it.
    pub fn pull(&mut self) -> Box<T> {
        let item = match self.free.pop_front() {
            Some(item) => item,
            None => self.construct(),
        };
        self.checked_out += 1;
        item
    }

    /// Return an entry to the tail of the pool.
    ///
    /// The entry must have come from [`ObjectPool::pull`] on this pool.
    /// Returning more entries than were pulled is a caller bug; it panics in
    /// debug builds and is only logged in release builds.
    pub fn push(&mut self, item: Box<T>) {
        debug_assert!(
            self.checked_out > 0,
            "ObjectPool::push called with no entries checked out"
        );
        if self.checked_out == 0 {
            warn!("object pool received an entry it never handed out");
        }
        self.checked_out = self.checked_out.saturating_sub(1);
        self.free.push_back(item);
    }

    /// Build `count` initialized entries ahead of demand.
    pub fn prefill(&mut self, count: usize) {
        for _ in 0..count {
            let item = self.construct();
            self.free.push_back(item);
        }
    }

    fn construct(&self) -> Box<T> {
        let mut item = Box::<T>::default();
        if let Some(init) = &self.init {
            init(&mut *item);
        }
        item
    }
}

impl<T> ObjectPool<T> {
    /// Number of free entries.
    pub fn len(&self) -> usize {
        self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.free.is_empty()
    }

    /// Entries pulled and not yet pushed back.
    pub fn checked_out(&self) -> usize {
        self.checked_out
    }
}

impl<T: Default> Default for ObjectPool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ObjectPool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectPool")
            .field("free", &self.free.len())
            .field("checked_out", &self.checked_out)
            .field("has_init", &self.init.is_some())
            .finish()
    }
}

impl<T> Drop for ObjectPool<T> {
    fn drop(&mut self) {
        // Checked-out entries belong to their holders; the pool cannot reach them.
        if self.checked_out > 0 {
            debug!(
                free = self.free.len(),
                checked_out = self.checked_out,
                "object pool dropped with entries still checked out"
            );
        }
    }
}

/// Handle to an [`ObjectPool`] shared between threads.
///
/// Every `pull`/`push` takes the lock, which is exactly the serialization
/// the bare pool requires of its callers.
pub struct SharedObjectPool<T>(Arc<Mutex<ObjectPool<T>>>);

impl<T: Default> SharedObjectPool<T> {
    pub fn new(pool: ObjectPool<T>) -> Self {
        Self(Arc::new(Mutex::new(pool)))
    }

    pub fn pull(&self) -> Box<T> {
        self.0.lock().pull()
    }

    pub fn push(&self, item: Box<T>) {
        self.0.lock().push(item);
    }

    /// Lock the pool for a sequence of operations.
    pub fn lock(&self) -> MutexGuard<'_, ObjectPool<T>> {
        self.0.lock()
    }
}

impl<T> Clone for SharedObjectPool<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T: Default> Default for SharedObjectPool<T> {
    fn default() -> Self {
        Self::new(ObjectPool::new())
    }
}

// ============================================================================
// Tests
// ============================================================================
