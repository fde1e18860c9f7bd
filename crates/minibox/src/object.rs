use alloc::string::String;
use core::fmt;

use crate::{Slot, Store, StoreError, StoreKind, Value};

/// One key/value entry of an [`Object`]. The key is always owned.
#[derive(Clone, Debug, PartialEq)]
pub struct Member<'a> {
    pub value: Value<'a>,
    /// Always an owned copy, released with the member.
    pub key: String,
}

impl Slot for Member<'_> {
    const KIND: StoreKind = StoreKind::Object;
    const WIDTH: usize = 24;
}

/// An insertion-ordered map from string keys to values.
///
/// Lookups scan linearly and compare keys byte for byte. Keys are unique:
/// [`put`](Object::put) replaces the value of an existing key in place and
/// keeps its position.
///
/// ```rust
/// use minibox::{Object, Value};
///
/// let mut o = Object::new()?;
/// o.put("a", 1)?;
/// o.put("b", 2)?;
/// o.put("a", 3)?;
/// assert_eq!(o.len(), 2);
/// assert_eq!(o.get("a"), Some(&Value::Number(3.0)));
/// assert_eq!(o.keys().collect::<Vec<_>>(), ["a", "b"]);
/// assert!(!o.set("c", 4));
/// # Ok::<(), minibox::StoreError>(())
/// ```
#[derive(Clone, PartialEq)]
pub struct Object<'a> {
    store: Store<Member<'a>>,
}

impl<'a> Object<'a> {
    /// # Errors
    ///
    /// [`StoreError::OutOfMemory`] if the initial buffer cannot be reserved.
    pub fn new() -> Result<Self, StoreError> {
        Ok(Self {
            store: Store::new()?,
        })
    }

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

    fn position(&self, key: &str) -> Option<usize> {
        self.store
            .iter()
            .position(|member| member.key.as_bytes() == key.as_bytes())
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value<'a>> {
        let index = self.position(key)?;
        self.store.get(index).map(|member| &member.value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value<'a>> {
        let index = self.position(key)?;
        self.store.get_mut(index).map(|member| &mut member.value)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Inserts `value` under `key`, or replaces the value already stored there.
    ///
    /// A `&str` key is copied, a `String` key is moved in. On replacement the
    /// previous value is released if the slot owned it.
    ///
    /// # Errors
    ///
    /// Fails if a new entry is needed and the store cannot grow.
    pub fn put(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value<'a>>,
    ) -> Result<(), StoreError> {
        let key = key.into();
        let value = value.into();
        match self.position(&key) {
            Some(index) => {
                if let Some(member) = self.store.get_mut(index) {
                    member.value = value;
                }
                Ok(())
            }
            None => self.store.push(Member { value, key }),
        }
    }

    /// Replaces the value of an existing key. Returns `false`, leaving the
    /// object untouched, when the key is absent.
    pub fn set(&mut self, key: &str, value: impl Into<Value<'a>>) -> bool {
        match self.get_mut(key) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    /// Removes `key` and returns its value, shifting later entries down.
    pub fn remove(&mut self, key: &str) -> Option<Value<'a>> {
        let index = self.position(key)?;
        self.store.remove(index).ok().map(|member| member.value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value<'a>)> {
        self.store
            .iter()
            .map(|member| (member.key.as_str(), &member.value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.store.iter().map(|member| member.key.as_str())
    }

    pub fn members(&self) -> core::slice::Iter<'_, Member<'a>> {
        self.store.iter()
    }

    /// Releases the object, its keys and every owned value in it.
    pub fn free(self) {
        trace!("freeing object of {} members", self.len());
        drop(self);
    }
}

impl fmt::Debug for Object<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::{string::ToString, vec::Vec};

    use super::*;
    use crate::{Array, Ownership};

    #[test]
    fn put_appends_then_updates_in_place() {
        let mut o = Object::new().unwrap();
        o.put("x", 1).unwrap();
        o.put("y", "two").unwrap();
        o.put("x", true).unwrap();
        assert_eq!(o.keys().collect::<Vec<_>>(), ["x", "y"]);
        assert_eq!(o.get("x"), Some(&Value::Boolean(true)));
    }

    #[test]
    fn keys_compare_bytewise() {
        let mut o = Object::new().unwrap();
        o.put("Key", 1).unwrap();
        assert!(o.get("key").is_none());
        assert!(o.get("Key ").is_none());
        assert!(o.contains_key("Key"));
    }

    #[test]
    fn set_only_touches_existing_keys() {
        let mut o = Object::new().unwrap();
        assert!(!o.set("missing", 1));
        assert!(o.is_empty());
        o.put("k", 1).unwrap();
        assert!(o.set("k", 2));
        assert_eq!(o.get("k").and_then(Value::as_f64), Some(2.0));
    }

    #[test]
    fn remove_shifts_later_entries() {
        let mut o = Object::new().unwrap();
        for k in ["a", "b", "c"] {
            o.put(k, k.to_string()).unwrap();
        }
        assert_eq!(o.remove("a").as_ref().and_then(Value::as_str), Some("a"));
        assert_eq!(o.remove("a"), None);
        assert_eq!(o.keys().collect::<Vec<_>>(), ["b", "c"]);
    }

    #[test]
    fn borrowed_children_outlive_their_parent() {
        let mut shared = Array::new().unwrap();
        shared.add(1).unwrap();
        {
            let mut o = Object::new().unwrap();
            o.put("list", &shared).unwrap();
            assert_eq!(
                o.get("list").and_then(Value::ownership),
                Some(Ownership::Borrowed)
            );
            o.free();
        }
        shared.add(2).unwrap();
        assert_eq!(shared.len(), 2);
    }

    #[test]
    fn nested_owned_values_are_mutable_through_parent() {
        let mut o = Object::new().unwrap();
        o.put("inner", Object::new().unwrap()).unwrap();
        o.get_mut("inner")
            .and_then(Value::as_object_mut)
            .unwrap()
            .put("deep", 1)
            .unwrap();
        let inner = o.get("inner").and_then(Value::as_object).unwrap();
        assert_eq!(inner.get("deep"), Some(&Value::Number(1.0)));
    }
}
