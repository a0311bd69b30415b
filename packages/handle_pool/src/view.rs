use std::fmt;
use std::ops::{Deref, DerefMut};

use parking_lot::{MappedRwLockReadGuard, MappedRwLockWriteGuard};

/// Shared access to an object in a [`SyncSlotPool`][1], returned by
/// [`SyncSlotPool::get()`][2].
///
/// A view bundles the reference to the object with a shared lock on the pool. While any view
/// exists, no object in the pool can be destroyed: [`destroy()`][3] blocks until every
/// outstanding view has been dropped. The handle check that admitted the view therefore stays
/// true for as long as the view is alive.
///
/// Views cannot be cloned. Drop the view as soon as you are done with the object, to let
/// exclusive operations on the pool proceed.
///
/// [1]: crate::SyncSlotPool
/// [2]: crate::SyncSlotPool::get
/// [3]: crate::SyncSlotPool::destroy
pub struct View<'a, T> {
    guard: MappedRwLockReadGuard<'a, T>,
}

impl<'a, T> View<'a, T> {
    #[must_use]
    pub(crate) fn new(guard: MappedRwLockReadGuard<'a, T>) -> Self {
        Self { guard }
    }
}

impl<T> Deref for View<'_, T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}

impl<T> AsRef<T> for View<'_, T> {
    #[inline]
    fn as_ref(&self) -> &T {
        self
    }
}

impl<T: fmt::Debug> fmt::Debug for View<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("View").field(&**self).finish()
    }
}

/// Exclusive access to an object in a [`SyncSlotPool`][1], returned by
/// [`SyncSlotPool::get_mut()`][2].
///
/// This view holds the exclusive lock of the pool, so every other operation on the pool, from
/// any thread, waits until the view is dropped. Keep it short-lived.
///
/// [1]: crate::SyncSlotPool
/// [2]: crate::SyncSlotPool::get_mut
pub struct ViewMut<'a, T> {
    guard: MappedRwLockWriteGuard<'a, T>,
}

impl<'a, T> ViewMut<'a, T> {
    #[must_use]
    pub(crate) fn new(guard: MappedRwLockWriteGuard<'a, T>) -> Self {
        Self { guard }
    }
}

impl<T> Deref for ViewMut<'_, T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}

impl<T> DerefMut for ViewMut<'_, T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.guard
    }
}

impl<T> AsRef<T> for ViewMut<'_, T> {
    #[inline]
    fn as_ref(&self) -> &T {
        self
    }
}

impl<T> AsMut<T> for ViewMut<'_, T> {
    #[inline]
    fn as_mut(&mut self) -> &mut T {
        self
    }
}

impl<T: fmt::Debug> fmt::Debug for ViewMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ViewMut").field(&**self).finish()
    }
}
