use thiserror::Error;

/// Errors that can occur when creating an object in a pool via a fallible constructor.
///
/// Returned by [`SlotPool::try_create_with()`][1] and [`SyncSlotPool::try_create_with()`][2].
/// In both cases the pool is left exactly as it was before the call.
///
/// Callers that prefer the invalid-handle convention of [`SlotPool::create()`][3] can collapse
/// the error via `unwrap_or_default()`, as the default [`Handle`][4] is the invalid handle.
///
/// [1]: crate::SlotPool::try_create_with
/// [2]: crate::SyncSlotPool::try_create_with
/// [3]: crate::SlotPool::create
/// [4]: crate::Handle
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CreateError<E> {
    /// Every slot of the pool is occupied. The constructor was not called.
    #[error("no free slot in pool of capacity {capacity}")]
    PoolFull {
        /// The fixed capacity of the pool that was full.
        capacity: usize,
    },

    /// The constructor returned an error. The reserved slot has been released again.
    #[error("object constructor failed")]
    Construction(#[source] E),
}
