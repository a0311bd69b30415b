use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;

use crate::{DropPolicy, SlotPool, SyncSlotPool};

/// Builder for creating an instance of [`SlotPool`] or [`SyncSlotPool`].
///
/// You only need to use this builder if you want to customize the pool configuration.
/// The default configuration used by [`SlotPool::new()`][1] and [`SyncSlotPool::new()`][2]
/// is sufficient for most use cases.
///
/// # Examples
///
/// ```
/// use handle_pool::{DropPolicy, SlotPool, SyncSlotPool};
///
/// let pool = SlotPool::<u32, 8>::builder()
///     .drop_policy(DropPolicy::MayDropObjects)
///     .build();
///
/// let shared = SyncSlotPool::<u32, 8>::builder()
///     .drop_policy(DropPolicy::MustNotDropObjects)
///     .build_sync();
/// # drop(pool);
/// # drop(shared);
/// ```
///
/// [1]: SlotPool::new
/// [2]: SyncSlotPool::new
#[must_use]
pub struct SlotPoolBuilder<T, const CAPACITY: usize> {
    drop_policy: DropPolicy,

    _item: PhantomData<T>,
}

impl<T, const CAPACITY: usize> fmt::Debug for SlotPoolBuilder<T, CAPACITY> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlotPoolBuilder")
            .field("item_type", &format_args!("{}", type_name::<T>()))
            .field("capacity", &CAPACITY)
            .field("drop_policy", &self.drop_policy)
            .finish()
    }
}

impl<T, const CAPACITY: usize> SlotPoolBuilder<T, CAPACITY> {
    pub(crate) fn new() -> Self {
        Self {
            drop_policy: DropPolicy::default(),
            _item: PhantomData,
        }
    }

    /// Sets the [drop policy][DropPolicy] for the pool. This governs how
    /// to treat remaining objects in the pool when the pool is dropped.
    pub fn drop_policy(mut self, policy: DropPolicy) -> Self {
        self.drop_policy = policy;
        self
    }

    /// Builds a single-threaded pool with the specified configuration.
    ///
    /// # Panics
    ///
    /// Panics if `CAPACITY` is zero or not less than `u32::MAX`.
    #[must_use]
    pub fn build(self) -> SlotPool<T, CAPACITY> {
        SlotPool::new_inner(self.drop_policy)
    }

    /// Builds a thread-safe pool with the specified configuration.
    ///
    /// # Panics
    ///
    /// Panics if `CAPACITY` is zero or not less than `u32::MAX`.
    #[must_use]
    pub fn build_sync(self) -> SyncSlotPool<T, CAPACITY> {
        SyncSlotPool::from(self.build())
    }
}
