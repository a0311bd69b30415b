use std::any::type_name;
use std::fmt;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::{CreateError, Handle, Iter, SlotPool, SlotPoolBuilder, View, ViewMut};

/// A thread-safe variant of [`SlotPool`], sharing one pool between any number of threads.
///
/// The pool is guarded by a single reader/writer lock:
///
/// * Creating and destroying objects, as well as [`get_mut()`][1], take the lock exclusively.
/// * Looking up objects via [`get()`][2], checking handles and querying the pool's occupancy
///   take the lock in shared mode and run concurrently with each other.
///
/// Operations block the calling thread until the lock is available. There is no timeout.
///
/// # Views
///
/// [`get()`][2] does not return a bare reference but a [`View`], which keeps holding the shared
/// lock until it is dropped. While any view is alive, no object in the pool can be destroyed, so
/// a view can never observe its object being destroyed underneath it. A [`destroy()`][3] issued
/// meanwhile from another thread waits for the views to be dropped rather than failing.
///
/// The lock is fair toward exclusive operations: once one is waiting, new views wait behind it.
/// Threads that keep taking overlapping views therefore cannot hold off a [`destroy()`][3]
/// indefinitely.
///
/// # Deadlocks
///
/// The following deadlock:
///
/// * Calling [`create()`][4], [`destroy()`][3] or [`get_mut()`][1] on a thread that holds a
///   [`View`] or [`ViewMut`] of the same pool.
/// * Calling any locking operation of the pool, including [`get()`][2] and [`is_valid()`][6], on a
///   thread that holds a [`ViewMut`] of the same pool.
/// * Taking a second view via [`get()`][2] or [`with_iter()`][7] on a thread that already holds a
///   [`View`], if another thread is meanwhile waiting for an exclusive operation.
/// * Accessing the pool from within a constructor passed to [`create_with()`][5].
///
/// Queries that return no guard ([`is_valid()`][6], [`len()`][8] and the like) may be called
/// while holding a [`View`].
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::thread;
///
/// use handle_pool::SyncSlotPool;
///
/// let pool = Arc::new(SyncSlotPool::<String, 16>::new());
///
/// let handle = pool.create("shared".to_string());
///
/// let reader = thread::spawn({
///     let pool = Arc::clone(&pool);
///     move || pool.get(handle).map(|view| view.len())
/// });
///
/// assert_eq!(reader.join().unwrap(), Some(6));
///
/// assert!(pool.destroy(handle));
/// assert!(pool.get(handle).is_none());
/// ```
///
/// [1]: Self::get_mut
/// [2]: Self::get
/// [3]: Self::destroy
/// [4]: Self::create
/// [5]: Self::create_with
/// [6]: Self::is_valid
/// [7]: Self::with_iter
/// [8]: Self::len
pub struct SyncSlotPool<T, const CAPACITY: usize> {
    inner: RwLock<SlotPool<T, CAPACITY>>,
}

impl<T, const CAPACITY: usize> SyncSlotPool<T, CAPACITY> {
    /// Creates a new pool with the default configuration, with all `CAPACITY` slots free.
    ///
    /// # Panics
    ///
    /// Panics if `CAPACITY` is zero or not less than `u32::MAX`.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build_sync()
    }

    /// Starts building a new pool.
    ///
    /// Use this when you want to customize the pool configuration beyond the defaults.
    pub fn builder() -> SlotPoolBuilder<T, CAPACITY> {
        SlotPoolBuilder::new()
    }

    /// The fixed number of objects the pool can hold. Does not lock.
    #[must_use]
    #[inline]
    pub fn capacity(&self) -> usize {
        CAPACITY
    }

    /// The number of objects currently in the pool.
    ///
    /// By the time the caller looks at the result, other threads may already have changed it.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read_recursive().len()
    }

    /// The number of unoccupied slots.
    ///
    /// By the time the caller looks at the result, other threads may already have changed it.
    #[must_use]
    pub fn free_count(&self) -> usize {
        self.inner.read_recursive().free_count()
    }

    /// Whether the pool contains zero objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read_recursive().is_empty()
    }

    /// Whether every slot of the pool is occupied.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.inner.read_recursive().is_full()
    }

    /// Whether the handle currently resolves to an object in this pool.
    ///
    /// Another thread may destroy the object right after this returns `true`. To access the
    /// object, use [`get()`][1], which keeps the object alive for as long as the returned view
    /// exists.
    ///
    /// [1]: Self::get
    #[must_use]
    pub fn is_valid(&self, handle: Handle) -> bool {
        self.inner.read_recursive().is_valid(handle)
    }

    /// Moves `value` into a free slot of the pool and returns a handle to it.
    ///
    /// If the pool is full, returns [`Handle::invalid()`] and drops `value`.
    #[must_use]
    pub fn create(&self, value: T) -> Handle {
        self.inner.write().create(value)
    }

    /// Reserves a free slot, then calls `f` to construct the object to store in it.
    ///
    /// If the pool is full, returns [`Handle::invalid()`] without calling `f`. The pool is locked
    /// exclusively while `f` runs.
    ///
    /// # Panics
    ///
    /// If `f` panics, the reservation is released before the panic propagates.
    #[must_use]
    pub fn create_with<F>(&self, f: F) -> Handle
    where
        F: FnOnce() -> T,
    {
        self.inner.write().create_with(f)
    }

    /// Reserves a free slot, then calls the fallible constructor `f` to produce the object to
    /// store in it. The pool is locked exclusively while `f` runs.
    ///
    /// # Errors
    ///
    /// Returns [`CreateError::PoolFull`] without calling `f` if every slot is occupied.
    ///
    /// Returns [`CreateError::Construction`] with the error from `f` if the constructor fails.
    /// The reserved slot is released again, leaving the pool exactly as it was before the call.
    pub fn try_create_with<F, E>(&self, f: F) -> Result<Handle, CreateError<E>>
    where
        F: FnOnce() -> Result<T, E>,
    {
        self.inner.write().try_create_with(f)
    }

    /// Destroys the object the handle refers to and frees its slot.
    ///
    /// Blocks while any [`View`] of this pool is alive. Returns `false` without doing anything if
    /// the handle does not resolve in this pool, including when another thread destroyed the
    /// object first.
    pub fn destroy(&self, handle: Handle) -> bool {
        self.inner.write().destroy(handle)
    }

    /// Returns a view of the object the handle refers to, or `None` if the handle does not
    /// resolve in this pool.
    ///
    /// The view holds a shared lock on the pool, preventing the object from being destroyed
    /// until the view is dropped. If an exclusive operation is waiting for the lock, this waits
    /// until that operation has completed.
    ///
    /// # Examples
    ///
    /// ```
    /// use handle_pool::SyncSlotPool;
    ///
    /// let pool = SyncSlotPool::<u64, 4>::new();
    /// let handle = pool.create(7);
    ///
    /// {
    ///     let first = pool.get(handle).unwrap();
    ///     let second = pool.get(handle).unwrap();
    ///     assert_eq!(*first + *second, 14);
    /// }
    ///
    /// // Views dropped, destruction may proceed.
    /// assert!(pool.destroy(handle));
    /// ```
    #[must_use]
    pub fn get(&self, handle: Handle) -> Option<View<'_, T>> {
        RwLockReadGuard::try_map(self.inner.read(), |pool| pool.get(handle))
            .ok()
            .map(View::new)
    }

    /// Returns an exclusive view of the object the handle refers to, or `None` if the handle does
    /// not resolve in this pool.
    ///
    /// The view holds the exclusive lock on the pool, blocking every other operation on the pool
    /// until the view is dropped.
    #[must_use]
    pub fn get_mut(&self, handle: Handle) -> Option<ViewMut<'_, T>> {
        RwLockWriteGuard::try_map(self.inner.write(), |pool| pool.get_mut(handle))
            .ok()
            .map(ViewMut::new)
    }

    /// Calls a closure with an iterator over all objects in the pool and their handles.
    ///
    /// The pool is locked in shared mode for the entire duration of the closure, so no object
    /// can be destroyed while iteration is in progress.
    ///
    /// # Examples
    ///
    /// ```
    /// use handle_pool::SyncSlotPool;
    ///
    /// let pool = SyncSlotPool::<u32, 8>::new();
    /// _ = pool.create(1);
    /// _ = pool.create(2);
    ///
    /// let total: u32 = pool.with_iter(|iter| iter.map(|(_, value)| *value).sum());
    /// assert_eq!(total, 3);
    /// ```
    pub fn with_iter<F, R>(&self, f: F) -> R
    where
        F: FnOnce(Iter<'_, T>) -> R,
    {
        let pool = self.inner.read();
        f(pool.iter())
    }

    /// Unwraps the pool into its single-threaded form.
    ///
    /// Every handle issued by this pool remains valid in the returned pool.
    #[must_use]
    pub fn into_inner(self) -> SlotPool<T, CAPACITY> {
        self.inner.into_inner()
    }
}

impl<T, const CAPACITY: usize> From<SlotPool<T, CAPACITY>> for SyncSlotPool<T, CAPACITY> {
    /// Wraps a single-threaded pool for sharing between threads. Every handle issued by the
    /// original pool remains valid in the new one.
    fn from(pool: SlotPool<T, CAPACITY>) -> Self {
        Self {
            inner: RwLock::new(pool),
        }
    }
}

impl<T, const CAPACITY: usize> Default for SyncSlotPool<T, CAPACITY> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const CAPACITY: usize> fmt::Debug for SyncSlotPool<T, CAPACITY> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("SyncSlotPool");
        s.field("item_type", &format_args!("{}", type_name::<T>()))
            .field("capacity", &CAPACITY);

        // Formatting must not block, e.g. when logging from a thread that holds the write lock.
        match self.inner.try_read_recursive() {
            Some(pool) => s.field("len", &pool.len()),
            None => s.field("len", &format_args!("<locked>")),
        };

        s.finish_non_exhaustive()
    }
}
