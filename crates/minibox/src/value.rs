//! Value types and ownership.
//!
//! A [`Value`] is one slot payload. Strings and containers additionally carry
//! an [`Ownership`]: an owned payload is released together with the slot that
//! holds it, a borrowed one belongs to the caller and outlives the container.

use alloc::{borrow::Cow, boxed::Box, string::String};
use core::{fmt, ops::Deref};

use crate::{Array, Object};

/// Who is responsible for releasing a slot's payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ownership {
    /// The slot releases the payload when it is overwritten, removed or dropped.
    Owned,
    /// The caller keeps the payload alive; the container never releases it.
    Borrowed,
}

/// The type tag of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

/// A nested container held by a slot, either owned or borrowed.
pub enum Handle<'a, T> {
    Owned(Box<T>),
    Borrowed(&'a T),
}

impl<T> Handle<'_, T> {
    #[must_use]
    pub fn ownership(&self) -> Ownership {
        match self {
            Handle::Owned(_) => Ownership::Owned,
            Handle::Borrowed(_) => Ownership::Borrowed,
        }
    }

    /// Mutable access, only granted for owned containers.
    pub fn get_mut(&mut self) -> Option<&mut T> {
        match self {
            Handle::Owned(inner) => Some(&mut **inner),
            Handle::Borrowed(_) => None,
        }
    }
}

impl<T> Deref for Handle<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        match self {
            Handle::Owned(inner) => inner.as_ref(),
            Handle::Borrowed(inner) => *inner,
        }
    }
}

impl<T: Clone> Clone for Handle<'_, T> {
    fn clone(&self) -> Self {
        match self {
            Handle::Owned(inner) => Handle::Owned(inner.clone()),
            Handle::Borrowed(inner) => Handle::Borrowed(*inner),
        }
    }
}

impl<T: PartialEq> PartialEq for Handle<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl<T: fmt::Debug> fmt::Debug for Handle<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (**self).fmt(f)
    }
}

/// A single value stored in an [`Array`] or [`Object`] slot.
///
/// Conversions pick the ownership for you: `&str`, `&Array` and `&Object`
/// become borrowed slots, `String`, `Array` and `Object` become owned ones.
///
/// ```rust
/// use minibox::{Array, Ownership, Value, ValueType};
///
/// let owned = Value::from(String::from("x"));
/// let borrowed = Value::from("x");
/// assert_eq!(owned, borrowed);
/// assert_eq!(owned.ownership(), Some(Ownership::Owned));
/// assert_eq!(borrowed.ownership(), Some(Ownership::Borrowed));
///
/// let list = Array::new()?;
/// assert_eq!(Value::from(&list).value_type(), ValueType::Array);
/// assert_eq!(Value::from(1.5).ownership(), None);
/// # Ok::<(), minibox::StoreError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value<'a> {
    #[default]
    Null,
    Boolean(bool),
    Number(f64),
    String(Cow<'a, str>),
    Array(Handle<'a, Array<'a>>),
    Object(Handle<'a, Object<'a>>),
}

impl<'a> Value<'a> {
    #[must_use]
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Null => ValueType::Null,
            Value::Boolean(_) => ValueType::Boolean,
            Value::Number(_) => ValueType::Number,
            Value::String(_) => ValueType::String,
            Value::Array(_) => ValueType::Array,
            Value::Object(_) => ValueType::Object,
        }
    }

    /// Ownership of the payload, or `None` for scalars which have nothing to
    /// release.
    #[must_use]
    pub fn ownership(&self) -> Option<Ownership> {
        match self {
            Value::Null | Value::Boolean(_) | Value::Number(_) => None,
            Value::String(Cow::Owned(_)) => Some(Ownership::Owned),
            Value::String(Cow::Borrowed(_)) => Some(Ownership::Borrowed),
            Value::Array(handle) => Some(handle.ownership()),
            Value::Object(handle) => Some(handle.ownership()),
        }
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(&**s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&Array<'a>> {
        match self {
            Value::Array(handle) => Some(&**handle),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&Object<'a>> {
        match self {
            Value::Object(handle) => Some(&**handle),
            _ => None,
        }
    }

    /// The nested array, if this slot owns one.
    pub fn as_array_mut(&mut self) -> Option<&mut Array<'a>> {
        match self {
            Value::Array(handle) => handle.get_mut(),
            _ => None,
        }
    }

    /// The nested object, if this slot owns one.
    pub fn as_object_mut(&mut self) -> Option<&mut Object<'a>> {
        match self {
            Value::Object(handle) => handle.get_mut(),
            _ => None,
        }
    }
}

impl From<bool> for Value<'_> {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<f64> for Value<'_> {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<i32> for Value<'_> {
    fn from(v: i32) -> Self {
        Self::Number(f64::from(v))
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(v: &'a str) -> Self {
        Self::String(Cow::Borrowed(v))
    }
}

impl From<String> for Value<'_> {
    fn from(v: String) -> Self {
        Self::String(Cow::Owned(v))
    }
}

impl<'a> From<Cow<'a, str>> for Value<'a> {
    fn from(v: Cow<'a, str>) -> Self {
        Self::String(v)
    }
}

impl<'a> From<Array<'a>> for Value<'a> {
    fn from(v: Array<'a>) -> Self {
        Self::Array(Handle::Owned(Box::new(v)))
    }
}

impl<'a, 'b: 'a> From<&'a Array<'b>> for Value<'a> {
    fn from(v: &'a Array<'b>) -> Self {
        Self::Array(Handle::Borrowed(v))
    }
}

impl<'a> From<Object<'a>> for Value<'a> {
    fn from(v: Object<'a>) -> Self {
        Self::Object(Handle::Owned(Box::new(v)))
    }
}

impl<'a, 'b: 'a> From<&'a Object<'b>> for Value<'a> {
    fn from(v: &'a Object<'b>) -> Self {
        Self::Object(Handle::Borrowed(v))
    }
}
