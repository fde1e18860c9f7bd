//! Growable slot storage shared by every container.
//!
//! A [`Store`] is one heap buffer of fixed-width slots plus a small header
//! (kind, length, capacity). Capacity only ever doubles; removing slots shifts
//! the tail down without handing memory back, so a store that grew once stays
//! provisioned until it is dropped.
//!
//! Finalizing a store trims the buffer to its length and freezes it. Any later
//! request for room fails with [`StoreError::Finalized`] instead of quietly
//! reallocating.

use alloc::vec::Vec;
use core::fmt;

use crate::StoreError;

/// Bytes reserved by a freshly created store.
const INITIAL_BYTES: usize = 32;

/// What kind of container a store backs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKind {
    Array,
    Object,
    Stream,
}

/// A fixed-width record a [`Store`] can hold.
pub trait Slot {
    /// The container kind this slot belongs to.
    const KIND: StoreKind;

    /// Nominal width of one slot in bytes.
    ///
    /// Array slots are a value plus its type tag, object slots add a key
    /// pointer, stream slots are single bytes.
    const WIDTH: usize;
}

impl Slot for u8 {
    const KIND: StoreKind = StoreKind::Stream;
    const WIDTH: usize = 1;
}

/// One growable buffer of `T` slots with an explicit capacity.
pub struct Store<T> {
    slots: Vec<T>,
    capacity: usize,
    frozen: bool,
}

impl<T: Slot> Store<T> {
    /// Creates an empty store with the initial reservation for its kind.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::OutOfMemory`] if the buffer cannot be reserved.
    pub fn new() -> Result<Self, StoreError> {
        Self::with_capacity(Self::initial_capacity())
    }

    /// Number of slots a new store of this kind reserves up front.
    #[must_use]
    pub fn initial_capacity() -> usize {
        (INITIAL_BYTES / T::WIDTH).max(1)
    }

    /// Creates an empty store holding exactly `capacity` slots.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::OutOfMemory`] if the buffer cannot be reserved.
    pub fn with_capacity(capacity: usize) -> Result<Self, StoreError> {
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(capacity)
            .map_err(|_| StoreError::OutOfMemory {
                requested: capacity,
            })?;
        Ok(Self {
            slots,
            capacity,
            frozen: false,
        })
    }

    /// Adopts an already filled buffer.
    pub(crate) fn from_vec(slots: Vec<T>) -> Self {
        let capacity = slots.capacity().max(slots.len());
        Self {
            slots,
            capacity,
            frozen: false,
        }
    }

    #[must_use]
    pub fn kind(&self) -> StoreKind {
        T::KIND
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slots the store can hold before it has to grow again.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Size in bytes, always a multiple of [`Slot::WIDTH`].
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.slots.len() * T::WIDTH
    }

    #[must_use]
    pub fn byte_capacity(&self) -> usize {
        self.capacity * T::WIDTH
    }

    #[must_use]
    pub fn is_finalized(&self) -> bool {
        self.frozen
    }

    /// Makes room for `extra` more slots, doubling capacity until it fits.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Finalized`] if more room is needed after [`finalize`].
    /// - [`StoreError::CapacityOverflow`] if the doubled capacity overflows.
    /// - [`StoreError::OutOfMemory`] if the allocator refuses.
    ///
    /// [`finalize`]: Store::finalize
    pub fn grow(&mut self, extra: usize) -> Result<(), StoreError> {
        let required = self
            .slots
            .len()
            .checked_add(extra)
            .ok_or(StoreError::CapacityOverflow)?;
        if required <= self.capacity {
            return Ok(());
        }
        if self.frozen {
            return Err(StoreError::Finalized);
        }

        let mut capacity = self.capacity.max(1);
        while capacity < required {
            capacity = capacity
                .checked_mul(2)
                .ok_or(StoreError::CapacityOverflow)?;
        }

        self.slots
            .try_reserve_exact(capacity - self.slots.len())
            .map_err(|_| StoreError::OutOfMemory {
                requested: capacity,
            })?;
        trace!(
            "{:?} store grew from {} to {} slots",
            T::KIND,
            self.capacity,
            capacity
        );
        self.capacity = capacity;
        Ok(())
    }

    /// Appends one slot.
    ///
    /// # Errors
    ///
    /// Fails like [`grow`](Store::grow).
    pub fn push(&mut self, slot: T) -> Result<(), StoreError> {
        self.grow(1)?;
        self.slots.push(slot);
        Ok(())
    }

    /// Appends a run of slots in one growth step.
    ///
    /// # Errors
    ///
    /// Fails like [`grow`](Store::grow).
    pub fn extend_from_slice(&mut self, slots: &[T]) -> Result<(), StoreError>
    where
        T: Clone,
    {
        self.grow(slots.len())?;
        self.slots.extend_from_slice(slots);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots.get_mut(index)
    }

    /// Overwrites the slot at `index`, handing back what was there.
    ///
    /// # Errors
    ///
    /// [`StoreError::OutOfBounds`] if `index >= len`.
    pub fn replace(&mut self, index: usize, slot: T) -> Result<T, StoreError> {
        let len = self.slots.len();
        let current = self
            .slots
            .get_mut(index)
            .ok_or(StoreError::OutOfBounds { index, len })?;
        Ok(core::mem::replace(current, slot))
    }

    /// Inserts a slot at `index`, shifting everything after it up by one.
    ///
    /// # Errors
    ///
    /// [`StoreError::OutOfBounds`] if `index > len`, otherwise fails like
    /// [`grow`](Store::grow).
    pub fn insert(&mut self, index: usize, slot: T) -> Result<(), StoreError> {
        let len = self.slots.len();
        if index > len {
            return Err(StoreError::OutOfBounds { index, len });
        }
        self.push(slot)?;
        self.move_region(len, index, 1)
    }

    /// Removes the slot at `index` and shifts the tail down. Capacity is kept.
    ///
    /// # Errors
    ///
    /// [`StoreError::OutOfBounds`] if `index >= len`.
    pub fn remove(&mut self, index: usize) -> Result<T, StoreError> {
        let len = self.slots.len();
        if index >= len {
            return Err(StoreError::OutOfBounds { index, len });
        }
        self.move_region(index, len - 1, 1)?;
        self.slots
            .pop()
            .ok_or(StoreError::OutOfBounds { index, len })
    }

    /// Moves the `count` slots starting at `src` so they start at `dst`.
    ///
    /// The slots displaced by the move fill the gap left behind, so nothing
    /// is duplicated or lost.
    ///
    /// # Errors
    ///
    /// [`StoreError::OutOfBounds`] if either region runs past `len`.
    pub fn move_region(&mut self, src: usize, dst: usize, count: usize) -> Result<(), StoreError> {
        let len = self.slots.len();
        for start in [src, dst] {
            if start.checked_add(count).is_none_or(|end| end > len) {
                return Err(StoreError::OutOfBounds { index: start, len });
            }
        }

        if dst < src {
            self.slots[dst..src + count].rotate_right(count);
        } else if dst > src {
            self.slots[src..dst + count].rotate_left(count);
        }
        Ok(())
    }

    /// Drops the last `count` slots. Capacity is left untouched.
    ///
    /// # Errors
    ///
    /// [`StoreError::OutOfBounds`] if `count > len`.
    pub fn shrink_logical(&mut self, count: usize) -> Result<(), StoreError> {
        let len = self.slots.len();
        let keep = len
            .checked_sub(count)
            .ok_or(StoreError::OutOfBounds { index: count, len })?;
        self.slots.truncate(keep);
        Ok(())
    }

    /// Trims the buffer to its length and refuses any further growth.
    pub fn finalize(&mut self) {
        self.slots.shrink_to_fit();
        self.capacity = self.slots.len();
        self.frozen = true;
        trace!("{:?} store finalized at {} slots", T::KIND, self.capacity);
    }

    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.slots
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.slots
    }

    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.slots.iter()
    }
}

impl<T: Slot + Clone> Clone for Store<T> {
    fn clone(&self) -> Self {
        let mut slots = Vec::with_capacity(self.capacity);
        slots.extend_from_slice(&self.slots);
        Self {
            slots,
            capacity: self.capacity,
            frozen: self.frozen,
        }
    }
}

impl<T: PartialEq> PartialEq for Store<T> {
    fn eq(&self, other: &Self) -> bool {
        self.slots == other.slots
    }
}

impl<T: Slot + fmt::Debug> fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("kind", &T::KIND)
            .field("len", &self.slots.len())
            .field("capacity", &self.capacity)
            .field("slots", &self.slots)
            .finish()
    }
}

impl<'s, T> IntoIterator for &'s Store<T> {
    type Item = &'s T;
    type IntoIter = core::slice::Iter<'s, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter()
    }
}
