/// Determines what happens when a pool is dropped while it still contains objects.
///
/// # Examples
///
/// ```
/// use handle_pool::{DropPolicy, SlotPool};
///
/// let pool = SlotPool::<u32, 16>::builder()
///     .drop_policy(DropPolicy::MustNotDropObjects)
///     .build();
///
/// assert!(pool.is_empty());
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[non_exhaustive]
pub enum DropPolicy {
    /// The pool drops any objects within when the pool is dropped. This is the default.
    #[default]
    MayDropObjects,

    /// The pool panics if it still contains objects when it is dropped.
    ///
    /// This may be valuable if every object is expected to be explicitly destroyed through its
    /// handle, e.g. because destruction has side effects the owner must sequence itself. A pool
    /// dropped with remaining objects then signals a leak of handles.
    MustNotDropObjects,
}
