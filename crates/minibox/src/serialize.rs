//! `serde::Serialize` for value trees, so they can be handed to any serde
//! format. Objects serialize as maps in insertion order, integral numbers as
//! integers.

use serde::{
    Serialize, Serializer,
    ser::{SerializeMap, SerializeSeq},
};

use crate::{Array, Object, Value};

impl Serialize for Value<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Number(n) => serialize_number(*n, serializer),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(array) => (**array).serialize(serializer),
            Value::Object(object) => (**object).serialize(serializer),
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn serialize_number<S>(n: f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let int = n as i64;
    if n.is_finite() && int as f64 == n && int != i64::MAX && int != i64::MIN {
        serializer.serialize_i64(int)
    } else {
        serializer.serialize_f64(n)
    }
}

impl Serialize for Array<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for value in self {
            seq.serialize_element(value)?;
        }
        seq.end()
    }
}

impl Serialize for Object<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{Array, Object, Value};

    #[test]
    fn matches_serde_json() {
        let mut list = Array::new().unwrap();
        list.add(true).unwrap();
        list.add(Value::Null).unwrap();
        list.add("s").unwrap();
        list.add(2.5).unwrap();
        let mut root = Object::new().unwrap();
        root.put("a", 1).unwrap();
        root.put("b", list).unwrap();

        let value = serde_json::to_value(&root).unwrap();
        assert_eq!(value, json!({"a": 1, "b": [true, null, "s", 2.5]}));
    }

    #[test]
    fn decoded_trees_agree_with_serde_json() {
        let input = br#"{"name": "box", "size": [3, -4.25], "nested": {"ok": false}}"#;
        let ours = serde_json::to_value(crate::json::decode(input).unwrap()).unwrap();
        let theirs: serde_json::Value = serde_json::from_slice(input).unwrap();
        assert_eq!(ours, theirs);
    }
}
