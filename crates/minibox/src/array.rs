use core::fmt;

use crate::{Slot, Store, StoreError, StoreKind, Value};

impl Slot for Value<'_> {
    const KIND: StoreKind = StoreKind::Array;
    const WIDTH: usize = 16;
}

/// An ordered, index-addressed sequence of values.
///
/// Overwriting or removing a slot releases whatever that slot owned; borrowed
/// payloads are left alone.
///
/// ```rust
/// use minibox::{Array, Value};
///
/// let mut a = Array::new()?;
/// a.add(1)?;
/// a.add(3)?;
/// a.insert(1, 2)?;
/// assert_eq!(a.len(), 3);
/// assert_eq!(a.get(1), Some(&Value::Number(2.0)));
///
/// a.remove(0)?;
/// assert_eq!(a.get(0), Some(&Value::Number(2.0)));
/// assert_eq!(a.get(5), None);
/// # Ok::<(), minibox::StoreError>(())
/// ```
#[derive(Clone, PartialEq)]
pub struct Array<'a> {
    store: Store<Value<'a>>,
}

impl<'a> Array<'a> {
    /// # Errors
    ///
    /// [`StoreError::OutOfMemory`] if the initial buffer cannot be reserved.
    pub fn new() -> Result<Self, StoreError> {
        Ok(Self {
            store: Store::new()?,
        })
    }

    /// Number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Value<'a>> {
        self.store.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Value<'a>> {
        self.store.get_mut(index)
    }

    /// Overwrites the value at `index`, releasing the previous one if owned.
    ///
    /// # Errors
    ///
    /// [`StoreError::OutOfBounds`] if `index >= len`.
    pub fn set(&mut self, index: usize, value: impl Into<Value<'a>>) -> Result<(), StoreError> {
        self.store.replace(index, value.into()).map(drop)
    }

    /// Appends a value.
    ///
    /// # Errors
    ///
    /// Fails if the store cannot grow.
    pub fn add(&mut self, value: impl Into<Value<'a>>) -> Result<(), StoreError> {
        self.store.push(value.into())
    }

    /// Inserts a value at `index`, shifting later values right by one.
    ///
    /// # Errors
    ///
    /// [`StoreError::OutOfBounds`] if `index > len`, or a growth failure.
    pub fn insert(&mut self, index: usize, value: impl Into<Value<'a>>) -> Result<(), StoreError> {
        self.store.insert(index, value.into())
    }

    /// Removes the value at `index`, shifting later values left by one.
    ///
    /// The removed value is handed back; dropping it releases anything it
    /// owned.
    ///
    /// # Errors
    ///
    /// [`StoreError::OutOfBounds`] if `index >= len`.
    pub fn remove(&mut self, index: usize) -> Result<Value<'a>, StoreError> {
        self.store.remove(index)
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Value<'a>> {
        self.store.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Value<'a>] {
        self.store.as_slice()
    }

    /// Releases the array and every owned value in it.
    pub fn free(self) {
        trace!("freeing array of {} values", self.len());
        drop(self);
    }
}

impl fmt::Debug for Array<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.store.iter()).finish()
    }
}

impl<'s, 'a> IntoIterator for &'s Array<'a> {
    type Item = &'s Value<'a>;
    type IntoIter = core::slice::Iter<'s, Value<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.store.iter()
    }
}
