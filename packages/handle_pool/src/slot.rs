use std::any::type_name;
use std::fmt;
use std::mem::MaybeUninit;

/// One storage location of a pool, cycling between vacant and occupied.
///
/// The storage holds an initialized `T` if and only if `in_use` is set. The generation advances
/// by one (wrapping) each time the slot goes from occupied to vacant and never moves otherwise.
pub(crate) struct Slot<T> {
    value: MaybeUninit<T>,
    generation: u32,
    in_use: bool,
}

impl<T> Slot<T> {
    #[must_use]
    pub(crate) const fn vacant() -> Self {
        Self {
            value: MaybeUninit::uninit(),
            generation: 0,
            in_use: false,
        }
    }

    #[must_use]
    pub(crate) fn generation(&self) -> u32 {
        self.generation
    }

    #[must_use]
    pub(crate) fn is_occupied(&self) -> bool {
        self.in_use
    }

    /// Whether the slot currently holds the occupant that was issued `generation`.
    #[must_use]
    pub(crate) fn is_live(&self, generation: u32) -> bool {
        self.in_use && self.generation == generation
    }

    /// # Panics
    ///
    /// Panics if the slot is already occupied.
    pub(crate) fn fill(&mut self, value: T) {
        assert!(
            !self.in_use,
            "attempted to fill an occupied slot holding {}",
            type_name::<T>()
        );

        self.value.write(value);
        self.in_use = true;
    }

    /// Moves the occupant out of the slot, leaving it vacant with the next generation.
    ///
    /// The slot is fully updated before the value is handed back, so the caller may drop the
    /// value at its leisure without the slot ever observing a half-dropped object.
    ///
    /// # Panics
    ///
    /// Panics if the slot is vacant.
    #[must_use]
    pub(crate) fn take(&mut self) -> T {
        assert!(
            self.in_use,
            "attempted to take from a vacant slot for {}",
            type_name::<T>()
        );

        self.in_use = false;
        self.generation = self.generation.wrapping_add(1);

        // SAFETY: `in_use` was set, so the value is initialized. We have cleared the flag above,
        // so the storage will not be read again until it is refilled.
        unsafe { self.value.assume_init_read() }
    }

    #[must_use]
    pub(crate) fn value(&self) -> Option<&T> {
        if !self.in_use {
            return None;
        }

        // SAFETY: `in_use` is set, so the value is initialized.
        Some(unsafe { self.value.assume_init_ref() })
    }

    #[must_use]
    pub(crate) fn value_mut(&mut self) -> Option<&mut T> {
        if !self.in_use {
            return None;
        }

        // SAFETY: `in_use` is set, so the value is initialized.
        Some(unsafe { self.value.assume_init_mut() })
    }
}

impl<T> Drop for Slot<T> {
    fn drop(&mut self) {
        if self.in_use {
            self.in_use = false;

            // SAFETY: `in_use` was set, so the value is initialized, and we cleared the flag so
            // this is the only time it gets dropped.
            unsafe {
                self.value.assume_init_drop();
            }
        }
    }
}

impl<T> fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slot")
            .field("generation", &self.generation)
            .field("in_use", &self.in_use)
            .finish_non_exhaustive()
    }
}
