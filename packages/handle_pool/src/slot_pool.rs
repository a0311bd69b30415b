use std::any::type_name;
use std::convert::Infallible;
use std::iter::{self, Enumerate, FusedIterator};
use std::{fmt, slice, thread};

use scopeguard::ScopeGuard;
use tracing::{debug, trace};

use crate::{CreateError, DropPolicy, Handle, Slot, SlotPoolBuilder};

/// A fixed-capacity object pool that hands out generation-checked [`Handle`]s.
///
/// The pool owns `CAPACITY` slots, allocated once when the pool is created. Each slot holds at
/// most one object of type `T`. Creating an object places it in a free slot and returns a
/// handle; the handle is then used to access or destroy the object.
///
/// Every slot carries a generation counter that advances whenever its object is destroyed. A
/// handle remembers the generation it was issued for, so a handle to a destroyed object never
/// resolves again, even after its slot has been reused for a new object.
///
/// Running out of slots is a normal outcome: [`create()`][1] returns [`Handle::invalid()`]
/// instead of growing the pool. Stale, foreign and invalid handles are likewise normal inputs:
/// [`get()`][2] returns `None` and [`destroy()`][3] returns `false` for them.
///
/// This type performs no synchronization. For a pool that can be shared between threads, see
/// [`SyncSlotPool`][4].
///
/// # Slot reuse
///
/// Free slots are reused most-recently-freed first, so a create that follows a destroy lands in
/// the slot that was just vacated.
///
/// # Generation wraparound
///
/// Generations are 32-bit and wrap around. A handle kept across exactly 2^32 reuses of its slot
/// would resolve again, to whatever object then occupies the slot. This is not a memory safety
/// concern but is a logic hazard for programs that hold handles for that long.
///
/// # Examples
///
/// ```
/// use handle_pool::{Handle, SlotPool};
///
/// let mut pool = SlotPool::<String, 2>::new();
///
/// let alice = pool.create("Alice".to_string());
/// let bob = pool.create("Bob".to_string());
///
/// // The pool is now full.
/// assert_eq!(pool.create("Charlie".to_string()), Handle::invalid());
///
/// pool.get_mut(alice).unwrap().push_str(" Smith");
/// assert_eq!(pool.get(alice).unwrap(), "Alice Smith");
///
/// assert!(pool.destroy(bob));
/// assert!(pool.get(bob).is_none());
///
/// // Bob's slot is reused, under a new generation.
/// let charlie = pool.create("Charlie".to_string());
/// assert_eq!(charlie.index(), bob.index());
/// assert_ne!(charlie.generation(), bob.generation());
/// ```
///
/// [1]: Self::create
/// [2]: Self::get
/// [3]: Self::destroy
/// [4]: crate::SyncSlotPool
pub struct SlotPool<T, const CAPACITY: usize> {
    /// Exactly `CAPACITY` slots, never reallocated.
    slots: Box<[Slot<T>]>,

    /// Stack of the indices of vacant slots, with the next one to hand out on top. An index is on
    /// this stack if and only if its slot is vacant.
    free_list: Vec<u32>,

    drop_policy: DropPolicy,
}

impl<T, const CAPACITY: usize> SlotPool<T, CAPACITY> {
    /// # Panics
    ///
    /// Panics if `CAPACITY` is zero or not less than `u32::MAX`.
    #[must_use]
    pub(crate) fn new_inner(drop_policy: DropPolicy) -> Self {
        assert!(CAPACITY > 0, "SlotPool must have non-zero capacity");
        assert!(
            CAPACITY < Handle::SENTINEL_INDEX as usize,
            "SlotPool capacity must be less than u32::MAX"
        );

        let slots = iter::repeat_with(Slot::vacant).take(CAPACITY).collect();

        // Reversed so that index 0 is on top of the stack and gets handed out first.
        let free_list = (0..CAPACITY)
            .rev()
            .map(|index| u32::try_from(index).expect("guarded by capacity < u32::MAX above"))
            .collect();

        Self {
            slots,
            free_list,
            drop_policy,
        }
    }

    /// Creates a new pool with the default configuration, with all `CAPACITY` slots free.
    ///
    /// # Panics
    ///
    /// Panics if `CAPACITY` is zero or not less than `u32::MAX`.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Starts building a new pool.
    ///
    /// Use this when you want to customize the pool configuration beyond the defaults.
    pub fn builder() -> SlotPoolBuilder<T, CAPACITY> {
        SlotPoolBuilder::new()
    }

    /// The fixed number of objects the pool can hold.
    #[must_use]
    #[inline]
    pub fn capacity(&self) -> usize {
        CAPACITY
    }

    /// The number of objects currently in the pool.
    #[must_use]
    pub fn len(&self) -> usize {
        CAPACITY
            .checked_sub(self.free_list.len())
            .expect("free list never holds more indices than there are slots")
    }

    /// The number of unoccupied slots.
    #[must_use]
    pub fn free_count(&self) -> usize {
        self.free_list.len()
    }

    /// Whether the pool contains zero objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.free_list.len() == CAPACITY
    }

    /// Whether every slot of the pool is occupied.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.free_list.is_empty()
    }

    /// Whether the handle currently resolves to an object in this pool.
    ///
    /// This is true if and only if the handle is not the invalid handle, its index is within the
    /// capacity of the pool, the slot at that index is occupied and the slot's generation equals
    /// the handle's generation.
    #[must_use]
    pub fn is_valid(&self, handle: Handle) -> bool {
        self.live_slot(handle).is_some()
    }

    /// Moves `value` into a free slot of the pool and returns a handle to it.
    ///
    /// If the pool is full, returns [`Handle::invalid()`] and drops `value`. The pool is not
    /// modified in that case.
    #[must_use]
    pub fn create(&mut self, value: T) -> Handle {
        self.create_with(|| value)
    }

    /// Reserves a free slot, then calls `f` to construct the object to store in it.
    ///
    /// If the pool is full, returns [`Handle::invalid()`] without calling `f`.
    ///
    /// # Panics
    ///
    /// If `f` panics, the reservation is released before the panic propagates, leaving the pool
    /// exactly as it was before the call.
    #[must_use]
    pub fn create_with<F>(&mut self, f: F) -> Handle
    where
        F: FnOnce() -> T,
    {
        match self.try_create_with(|| Ok::<T, Infallible>(f())) {
            Ok(handle) => handle,
            Err(CreateError::PoolFull { .. }) => Handle::invalid(),
            Err(CreateError::Construction(never)) => match never {},
        }
    }

    /// Reserves a free slot, then calls the fallible constructor `f` to produce the object to
    /// store in it.
    ///
    /// # Errors
    ///
    /// Returns [`CreateError::PoolFull`] without calling `f` if every slot is occupied.
    ///
    /// Returns [`CreateError::Construction`] with the error from `f` if the constructor fails.
    /// The reserved slot is released again, leaving the pool exactly as it was before the call.
    ///
    /// # Panics
    ///
    /// If `f` panics, the reservation is released before the panic propagates.
    ///
    /// # Examples
    ///
    /// ```
    /// use handle_pool::{CreateError, SlotPool};
    ///
    /// let mut pool = SlotPool::<u16, 4>::new();
    ///
    /// let handle = pool.try_create_with(|| "42".parse::<u16>()).unwrap();
    /// assert_eq!(pool.get(handle), Some(&42));
    ///
    /// let result = pool.try_create_with(|| "-1".parse::<u16>());
    /// assert!(matches!(result, Err(CreateError::Construction(_))));
    ///
    /// // The failed attempt did not consume a slot.
    /// assert_eq!(pool.free_count(), 3);
    /// ```
    pub fn try_create_with<F, E>(&mut self, f: F) -> Result<Handle, CreateError<E>>
    where
        F: FnOnce() -> Result<T, E>,
    {
        #[cfg(debug_assertions)]
        self.integrity_check();

        let Some(index) = self.free_list.pop() else {
            debug!(
                item_type = type_name::<T>(),
                capacity = CAPACITY,
                "pool is full"
            );
            return Err(CreateError::PoolFull { capacity: CAPACITY });
        };

        // Until the object is stored, the slot is merely reserved. Leaving this scope early,
        // by error or by unwinding, puts the index back on top of the free list.
        let reservation =
            scopeguard::guard(&mut self.free_list, |free_list| free_list.push(index));

        let value = f().map_err(CreateError::Construction)?;

        _ = ScopeGuard::into_inner(reservation);

        let slot = self
            .slots
            .get_mut(index as usize)
            .expect("free list only holds in-bounds slot indices");

        slot.fill(value);

        let handle = Handle::from_raw_parts(index, slot.generation());

        trace!(
            index,
            generation = handle.generation(),
            item_type = type_name::<T>(),
            "created object"
        );

        Ok(handle)
    }

    /// Destroys the object the handle refers to and frees its slot.
    ///
    /// Returns `false` without doing anything if the handle does not resolve in this pool, e.g.
    /// because the object has already been destroyed. Destroying the same handle twice is
    /// therefore harmless.
    ///
    /// On success, the slot's generation advances, so neither this handle nor any copy of it
    /// will resolve again.
    pub fn destroy(&mut self, handle: Handle) -> bool {
        let Some(slot) = self.live_slot_mut(handle) else {
            trace!(%handle, item_type = type_name::<T>(), "ignored destroy of unresolvable handle");
            return false;
        };

        let value = slot.take();
        self.free_list.push(handle.index());

        trace!(
            index = handle.index(),
            generation = handle.generation(),
            item_type = type_name::<T>(),
            "destroyed object"
        );

        // The pool is consistent by now, so a panicking destructor cannot corrupt it.
        drop(value);

        true
    }

    /// Returns a shared reference to the object the handle refers to, or `None` if the handle
    /// does not resolve in this pool.
    #[must_use]
    pub fn get(&self, handle: Handle) -> Option<&T> {
        self.live_slot(handle).and_then(Slot::value)
    }

    /// Returns an exclusive reference to the object the handle refers to, or `None` if the handle
    /// does not resolve in this pool.
    #[must_use]
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        self.live_slot_mut(handle).and_then(Slot::value_mut)
    }

    /// Iterates over all objects in the pool together with their handles, in slot order.
    ///
    /// # Examples
    ///
    /// ```
    /// use handle_pool::SlotPool;
    ///
    /// let mut pool = SlotPool::<u32, 4>::new();
    /// let a = pool.create(1);
    /// let b = pool.create(2);
    ///
    /// let total: u32 = pool.iter().map(|(_, value)| *value).sum();
    /// assert_eq!(total, 3);
    ///
    /// let handles: Vec<_> = pool.iter().map(|(handle, _)| handle).collect();
    /// assert_eq!(handles, vec![a, b]);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            slots: self.slots.iter().enumerate(),
        }
    }

    fn live_slot(&self, handle: Handle) -> Option<&Slot<T>> {
        if !handle.is_valid() {
            return None;
        }

        self.slots
            .get(handle.slot_index())
            .filter(|slot| slot.is_live(handle.generation()))
    }

    fn live_slot_mut(&mut self, handle: Handle) -> Option<&mut Slot<T>> {
        if !handle.is_valid() {
            return None;
        }

        self.slots
            .get_mut(handle.slot_index())
            .filter(|slot| slot.is_live(handle.generation()))
    }

    #[cfg_attr(test, mutants::skip)] // Consistency check for tests, mutating it proves nothing.
    #[cfg(debug_assertions)]
    pub(crate) fn integrity_check(&self) {
        assert_eq!(
            self.slots.len(),
            CAPACITY,
            "slot count does not match capacity in pool of {}",
            type_name::<T>()
        );

        let mut listed_as_free = vec![false; CAPACITY];

        for &index in &self.free_list {
            let listed = listed_as_free.get_mut(index as usize).unwrap_or_else(|| {
                panic!(
                    "free list holds out-of-bounds index {index} in pool of {}",
                    type_name::<T>()
                )
            });

            assert!(
                !*listed,
                "free list holds index {index} more than once in pool of {}",
                type_name::<T>()
            );

            *listed = true;
        }

        for (index, (slot, listed)) in self.slots.iter().zip(&listed_as_free).enumerate() {
            assert!(
                slot.is_occupied() != *listed,
                "slot {index} (occupied: {}) disagrees with the free list (listed: {listed}) in pool of {}",
                slot.is_occupied(),
                type_name::<T>()
            );
        }
    }
}

impl<T, const CAPACITY: usize> Default for SlotPool<T, CAPACITY> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const CAPACITY: usize> Drop for SlotPool<T, CAPACITY> {
    fn drop(&mut self) {
        let remaining = self.len();

        trace!(remaining, item_type = type_name::<T>(), "dropping pool");

        // The slots drop their occupants after this returns. A second panic while unwinding
        // would abort and hide the first one.
        if self.drop_policy == DropPolicy::MustNotDropObjects && !thread::panicking() {
            assert!(
                remaining == 0,
                "dropped a pool of {} with {remaining} remaining objects under a policy that says it must be empty when dropped",
                type_name::<T>()
            );
        }
    }
}

impl<T, const CAPACITY: usize> fmt::Debug for SlotPool<T, CAPACITY> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlotPool")
            .field("item_type", &format_args!("{}", type_name::<T>()))
            .field("capacity", &CAPACITY)
            .field("len", &self.len())
            .field("drop_policy", &self.drop_policy)
            .finish_non_exhaustive()
    }
}

impl<'a, T, const CAPACITY: usize> IntoIterator for &'a SlotPool<T, CAPACITY> {
    type Item = (Handle, &'a T);
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the objects of a pool and their handles, in slot order.
///
/// Returned by [`SlotPool::iter()`] and handed to the closure of
/// [`SyncSlotPool::with_iter()`][1].
///
/// [1]: crate::SyncSlotPool::with_iter
#[derive(Debug)]
pub struct Iter<'a, T> {
    slots: Enumerate<slice::Iter<'a, Slot<T>>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (Handle, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        self.slots.find_map(|(index, slot)| {
            let value = slot.value()?;
            let index =
                u32::try_from(index).expect("guarded by capacity < u32::MAX in pool ctor");

            Some((Handle::from_raw_parts(index, slot.generation()), value))
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.slots.size_hint().1)
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::panic::{self, AssertUnwindSafe};
    use std::rc::Rc;

    use static_assertions::{assert_impl_all, assert_not_impl_any};

    use super::*;

    assert_impl_all!(SlotPool<u32, 4>: Send, Sync);
    assert_impl_all!(SlotPool<Cell<u32>, 4>: Send);
    assert_not_impl_any!(SlotPool<Cell<u32>, 4>: Sync);
    assert_not_impl_any!(SlotPool<Rc<u32>, 4>: Send, Sync);

    #[derive(Debug, PartialEq)]
    struct TestObject {
        elem: i32,
    }

    impl TestObject {
        fn new(elem: i32) -> Self {
            Self { elem }
        }
    }

    struct Droppable {
        drops: Rc<Cell<usize>>,
    }

    impl Drop for Droppable {
        fn drop(&mut self) {
            self.drops.set(self.drops.get() + 1);
        }
    }

    #[test]
    fn smoke_test() {
        let mut pool = SlotPool::<u32, 3>::new();

        let a = pool.create(42);
        let b = pool.create(43);
        let c = pool.create(44);

        assert_eq!(pool.get(a), Some(&42));
        assert_eq!(pool.get(b), Some(&43));
        assert_eq!(pool.get(c), Some(&44));

        assert_eq!(pool.len(), 3);
        assert!(pool.is_full());

        assert!(pool.destroy(b));

        assert_eq!(pool.len(), 2);

        let d = pool.create(45);

        assert_eq!(pool.get(a), Some(&42));
        assert_eq!(pool.get(c), Some(&44));
        assert_eq!(pool.get(d), Some(&45));

        pool.integrity_check();
    }

    #[test]
    fn fresh_pool_is_empty() {
        let pool = SlotPool::<TestObject, 5>::new();

        assert_eq!(pool.capacity(), 5);
        assert_eq!(pool.free_count(), 5);
        assert_eq!(pool.len(), 0);
        assert!(pool.is_empty());
        assert!(!pool.is_full());
    }

    #[test]
    fn round_trip_yields_equal_object() {
        let mut pool = SlotPool::<TestObject, 1>::new();

        let handle = pool.create(TestObject::new(10));

        assert!(pool.is_valid(handle));
        assert_eq!(pool.get(handle), Some(&TestObject::new(10)));
        assert!(!pool.is_empty());
        assert_eq!(pool.free_count(), 0);

        assert!(pool.destroy(handle));
        assert!(pool.get(handle).is_none());
        assert_eq!(pool.free_count(), 1);
        assert!(pool.is_empty());
    }

    #[test]
    fn hands_out_indices_in_ascending_order() {
        let mut pool = SlotPool::<u8, 3>::new();

        assert_eq!(pool.create(1).index(), 0);
        assert_eq!(pool.create(2).index(), 1);
        assert_eq!(pool.create(3).index(), 2);
    }

    #[test]
    fn get_mut_modifies_object() {
        let mut pool = SlotPool::<TestObject, 1>::new();
        let handle = pool.create(TestObject::new(10));

        pool.get_mut(handle).unwrap().elem = 999;

        assert_eq!(pool.get(handle).unwrap().elem, 999);
    }

    #[test]
    fn destroyed_handle_stays_invalid() {
        let mut pool = SlotPool::<TestObject, 1>::new();
        let handle = pool.create(TestObject::new(10));

        assert!(pool.destroy(handle));

        for _ in 0..3 {
            assert!(!pool.is_valid(handle));
            assert!(pool.get(handle).is_none());
        }

        // Even after the slot is reused.
        let other = pool.create(TestObject::new(20));
        assert_eq!(other.index(), handle.index());
        assert!(!pool.is_valid(handle));
        assert!(pool.get(handle).is_none());
        assert!(pool.get_mut(handle).is_none());
    }

    #[test]
    fn double_destroy_is_noop() {
        let mut pool = SlotPool::<TestObject, 2>::new();
        let handle = pool.create(TestObject::new(10));

        assert!(pool.destroy(handle));
        assert!(!pool.destroy(handle));

        assert_eq!(pool.free_count(), 2);

        // The generation advanced exactly once.
        let reused = pool.create(TestObject::new(11));
        assert_eq!(reused.index(), handle.index());
        assert_eq!(reused.generation(), handle.generation() + 1);

        pool.integrity_check();
    }

    #[test]
    fn reuse_changes_generation_not_index() {
        let mut pool = SlotPool::<TestObject, 2>::new();

        let h1 = pool.create(TestObject::new(10));
        let h2 = pool.create(TestObject::new(20));

        assert!(pool.destroy(h1));
        let h3 = pool.create(TestObject::new(30));

        assert_eq!(h1.index(), h3.index());
        assert_ne!(h1.generation(), h3.generation());
        assert_eq!(pool.get(h3).unwrap().elem, 30);
        assert_eq!(pool.get(h2).unwrap().elem, 20);
        assert!(pool.get(h1).is_none());
    }

    #[test]
    fn capacity_exhaustion_returns_invalid_handle() {
        const CAPACITY: usize = 8;

        let mut pool = SlotPool::<usize, CAPACITY>::new();

        let handles = (0..CAPACITY).map(|i| pool.create(i)).collect::<Vec<_>>();
        assert!(handles.iter().all(|h| pool.is_valid(*h)));

        assert_eq!(pool.free_count(), 0);
        assert_eq!(pool.create(CAPACITY), Handle::invalid());
        assert_eq!(pool.len(), CAPACITY);

        pool.integrity_check();
    }

    #[test]
    fn end_to_end_scenario() {
        let mut pool = SlotPool::<TestObject, 2>::new();

        let h1 = pool.create(TestObject::new(10));
        let h2 = pool.create(TestObject::new(20));
        assert_eq!(pool.free_count(), 0);

        assert_eq!(pool.create(TestObject::new(30)), Handle::invalid());

        assert!(pool.destroy(h1));
        assert!(!pool.is_valid(h1));

        let h3 = pool.create(TestObject::new(30));
        assert_eq!(h3.index(), h1.index());
        assert_eq!(h3.generation(), h1.generation() + 1);

        assert_eq!(pool.get(h2).unwrap().elem, 20);
        assert!(pool.get(h1).is_none());
    }

    #[test]
    fn foreign_and_out_of_range_handles_are_invalid() {
        let mut pool = SlotPool::<u32, 4>::new();
        let handle = pool.create(1);

        let out_of_range = Handle::from_raw_parts(4, 0);
        let far_out_of_range = Handle::from_raw_parts(u32::MAX - 1, 0);
        let wrong_generation = Handle::from_raw_parts(handle.index(), handle.generation() + 1);
        let vacant_slot = Handle::from_raw_parts(2, 0);

        for bogus in [
            Handle::invalid(),
            out_of_range,
            far_out_of_range,
            wrong_generation,
            vacant_slot,
        ] {
            assert!(!pool.is_valid(bogus));
            assert!(pool.get(bogus).is_none());
            assert!(pool.get_mut(bogus).is_none());
            assert!(!pool.destroy(bogus));
        }

        assert_eq!(pool.get(handle), Some(&1));
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn full_pool_drops_rejected_value() {
        let drops = Rc::new(Cell::new(0));
        let mut pool = SlotPool::<Droppable, 1>::new();

        let _kept = pool.create(Droppable {
            drops: Rc::clone(&drops),
        });
        let rejected = pool.create(Droppable {
            drops: Rc::clone(&drops),
        });

        assert!(!rejected.is_valid());
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn full_pool_does_not_call_constructor() {
        let mut pool = SlotPool::<u32, 1>::new();
        _ = pool.create(1);

        let handle = pool.create_with(|| panic!("constructor must not be called"));

        assert_eq!(handle, Handle::invalid());
    }

    #[test]
    fn try_create_when_full_reports_pool_full() {
        let mut pool = SlotPool::<u32, 1>::new();
        _ = pool.create(1);

        let result = pool.try_create_with(|| Ok::<_, String>(2));

        assert!(matches!(result, Err(CreateError::PoolFull { capacity: 1 })));
    }

    #[test]
    fn constructor_error_leaves_pool_unchanged() {
        let mut pool = SlotPool::<u32, 3>::new();
        let first = pool.create(1);

        let result = pool.try_create_with(|| Err::<u32, _>("nope"));

        match result {
            Err(CreateError::Construction(message)) => assert_eq!(message, "nope"),
            other => panic!("unexpected result: {other:?}"),
        }

        assert_eq!(pool.free_count(), 2);
        assert!(pool.is_valid(first));
        pool.integrity_check();

        // The slot that was briefly reserved is the next one handed out, at its old generation.
        let second = pool.create(2);
        assert_eq!(second, Handle::from_raw_parts(1, 0));
    }

    #[test]
    fn constructor_error_collapses_to_invalid_handle() {
        let mut pool = SlotPool::<u32, 3>::new();

        let handle = pool
            .try_create_with(|| Err::<u32, _>("nope"))
            .unwrap_or_default();

        assert_eq!(handle, Handle::invalid());
    }

    #[test]
    fn constructor_panic_leaves_pool_unchanged() {
        let mut pool = SlotPool::<u32, 3>::new();
        let first = pool.create(1);

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            _ = pool.create_with(|| panic!("constructor failed"));
        }));

        assert!(result.is_err());
        assert_eq!(pool.free_count(), 2);
        assert!(pool.is_valid(first));
        pool.integrity_check();

        assert_eq!(pool.create(2), Handle::from_raw_parts(1, 0));
    }

    #[test]
    fn calls_drop_on_destroy() {
        let drops = Rc::new(Cell::new(0));
        let mut pool = SlotPool::<Droppable, 3>::new();

        let handle = pool.create(Droppable {
            drops: Rc::clone(&drops),
        });
        assert_eq!(drops.get(), 0);

        assert!(pool.destroy(handle));
        assert_eq!(drops.get(), 1);

        assert!(!pool.destroy(handle));
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn dropping_pool_drops_remaining_objects_once() {
        let drops = Rc::new(Cell::new(0));
        let mut pool = SlotPool::<Droppable, 4>::new();

        for _ in 0..3 {
            _ = pool.create(Droppable {
                drops: Rc::clone(&drops),
            });
        }

        let destroyed = pool.create(Droppable {
            drops: Rc::clone(&drops),
        });
        assert!(pool.destroy(destroyed));
        assert_eq!(drops.get(), 1);

        drop(pool);
        assert_eq!(drops.get(), 4);
    }

    #[test]
    fn panicking_destructor_leaves_pool_consistent() {
        struct PanicOnDrop;

        impl Drop for PanicOnDrop {
            fn drop(&mut self) {
                panic!("destructor failed");
            }
        }

        let mut pool = SlotPool::<PanicOnDrop, 2>::new();
        let handle = pool.create(PanicOnDrop);

        let result = panic::catch_unwind(AssertUnwindSafe(|| pool.destroy(handle)));

        assert!(result.is_err());
        assert!(!pool.is_valid(handle));
        assert!(pool.is_empty());
        pool.integrity_check();
    }

    #[test]
    fn iter_yields_live_objects_in_slot_order() {
        let mut pool = SlotPool::<u32, 4>::new();

        let a = pool.create(10);
        let b = pool.create(20);
        let c = pool.create(30);
        assert!(pool.destroy(b));

        let items = pool.iter().collect::<Vec<_>>();
        assert_eq!(items, vec![(a, &10), (c, &30)]);

        let mut count = 0;
        for (handle, value) in &pool {
            assert_eq!(pool.get(handle), Some(value));
            count += 1;
        }
        assert_eq!(count, 2);
    }

    #[test]
    fn iter_over_empty_pool_is_empty() {
        let pool = SlotPool::<u32, 4>::new();

        assert!(pool.iter().next().is_none());
    }

    #[test]
    fn default_works_fine() {
        let mut pool = SlotPool::<String, 2>::default();

        let handle = pool.create("hello".to_string());

        assert_eq!(pool.get(handle).map(String::as_str), Some("hello"));
    }

    #[test]
    fn debug_output_describes_pool() {
        let mut pool = SlotPool::<u32, 4>::new();
        _ = pool.create(1);

        let text = format!("{pool:?}");

        assert!(text.contains("capacity: 4"));
        assert!(text.contains("len: 1"));
    }

    #[test]
    #[should_panic]
    fn drop_object_with_forbidden_to_drop_policy_panics() {
        let mut pool = SlotPool::<u32, 3>::builder()
            .drop_policy(DropPolicy::MustNotDropObjects)
            .build();

        _ = pool.create(123);
    }

    #[test]
    fn drop_objectless_with_forbidden_to_drop_policy_ok() {
        let mut pool = SlotPool::<u32, 3>::builder()
            .drop_policy(DropPolicy::MustNotDropObjects)
            .build();

        let handle = pool.create(123);
        assert!(pool.destroy(handle));

        drop(pool);
    }

    #[test]
    #[should_panic]
    fn zero_capacity_is_panic() {
        drop(SlotPool::<u32, 0>::new());
    }

    #[test]
    fn zero_sized_objects_are_supported() {
        let mut pool = SlotPool::<(), 2>::new();

        let a = pool.create(());
        let b = pool.create(());

        assert!(pool.is_full());
        assert!(pool.destroy(a));
        assert_eq!(pool.get(b), Some(&()));
    }
}
