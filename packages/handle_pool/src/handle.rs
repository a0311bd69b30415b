use std::fmt;

/// A lightweight, copyable reference to an object stored in a [`SlotPool`][1] or
/// [`SyncSlotPool`][2].
///
/// A handle is an `(index, generation)` pair. The index identifies the slot that holds the object
/// and the generation identifies which occupant of that slot the handle was issued for. When the
/// object is destroyed, the slot's generation advances, so every handle issued for the previous
/// occupant stops resolving, even after the slot is reused for a new object.
///
/// A handle is only meaningful relative to the pool that produced it. Passing it to another pool
/// is not unsafe but the result is unspecified: it may resolve to an unrelated object there.
///
/// # Examples
///
/// ```
/// use handle_pool::{Handle, SlotPool};
///
/// let mut pool = SlotPool::<u32, 4>::new();
///
/// let handle = pool.create(42);
/// assert!(handle.is_valid());
///
/// // Handles are plain values, freely copied and compared.
/// let copy = handle;
/// assert_eq!(copy, handle);
///
/// pool.destroy(handle);
///
/// // The handle still has a valid shape but no longer resolves.
/// assert!(handle.is_valid());
/// assert!(pool.get(handle).is_none());
/// ```
///
/// [1]: crate::SlotPool
/// [2]: crate::SyncSlotPool
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Handle {
    index: u32,
    generation: u32,
}

impl Handle {
    /// The slot index that no pool ever assigns. A handle with this index is the invalid handle.
    pub(crate) const SENTINEL_INDEX: u32 = u32::MAX;

    /// Returns the invalid handle.
    ///
    /// Creation operations return this handle when the pool has no free slot.
    /// It is also the [`Default`] value of the type.
    #[must_use]
    #[inline]
    pub const fn invalid() -> Self {
        Self {
            index: Self::SENTINEL_INDEX,
            generation: 0,
        }
    }

    /// Reassembles a handle from the parts previously obtained via [`index()`][1] and
    /// [`generation()`][2].
    ///
    /// The result is only as meaningful as the parts: a handle assembled from arbitrary values is
    /// simply treated as invalid or stale by the pool, never dereferenced.
    ///
    /// [1]: Self::index
    /// [2]: Self::generation
    #[must_use]
    #[inline]
    pub const fn from_raw_parts(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Whether this handle has the shape of a real handle, i.e. it is not the invalid handle.
    ///
    /// This does not consult any pool. A handle whose object has been destroyed still reports
    /// `true` here; use [`SlotPool::is_valid()`][1] to check whether it still resolves.
    ///
    /// [1]: crate::SlotPool::is_valid
    #[must_use]
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.index != Self::SENTINEL_INDEX
    }

    /// The index of the slot this handle refers to.
    #[must_use]
    #[inline]
    pub const fn index(self) -> u32 {
        self.index
    }

    /// The generation of the slot at the time the handle was issued.
    #[must_use]
    #[inline]
    pub const fn generation(self) -> u32 {
        self.generation
    }

    /// The slot index as a `usize`, for addressing slot storage.
    #[must_use]
    #[inline]
    pub(crate) fn slot_index(self) -> usize {
        // u32 always fits into usize on the platforms we support.
        self.index as usize
    }
}

impl Default for Handle {
    #[inline]
    fn default() -> Self {
        Self::invalid()
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle {{ idx: {}, gen: {} }}", self.index, self.generation)
    }
}
