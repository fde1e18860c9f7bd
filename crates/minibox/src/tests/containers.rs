use alloc::{string::String, vec::Vec};

use rstest::rstest;

use crate::{Array, ByteStream, Object, Ownership, StoreError, Value, ValueType};

#[rstest]
#[case(0, 2)]
#[case(2, 2)]
#[case(3, 4)]
#[case(5, 8)]
#[case(17, 32)]
fn array_capacity_doubles(#[case] items: i32, #[case] capacity: usize) {
    let mut array = Array::new().unwrap();
    for n in 0..items {
        array.add(n).unwrap();
    }
    assert_eq!(array.capacity(), capacity);
}

#[test]
fn removal_keeps_capacity() {
    let mut array = Array::new().unwrap();
    for n in 0..9 {
        array.add(n).unwrap();
    }
    let capacity = array.capacity();
    while !array.is_empty() {
        array.remove(0).unwrap();
    }
    assert_eq!(array.capacity(), capacity);
}

#[rstest]
#[case(0, Some(StoreError::OutOfBounds { index: 0, len: 0 }))]
#[case(3, Some(StoreError::OutOfBounds { index: 3, len: 3 }))]
#[case(2, None)]
fn remove_bounds(#[case] index: usize, #[case] expected: Option<StoreError>) {
    let mut array = Array::new().unwrap();
    if index > 0 {
        for n in 0..3 {
            array.add(n).unwrap();
        }
    }
    assert_eq!(array.remove(index).err(), expected);
}

#[test]
fn insert_at_either_end() {
    let mut array = Array::new().unwrap();
    array.insert(0, "b").unwrap();
    array.insert(0, "a").unwrap();
    array.insert(2, "c").unwrap();
    assert_eq!(
        array.insert(4, "x"),
        Err(StoreError::OutOfBounds { index: 4, len: 3 })
    );
    let items: Vec<_> = array.iter().filter_map(Value::as_str).collect();
    assert_eq!(items, ["a", "b", "c"]);
}

#[test]
fn set_replaces_and_reports_out_of_range() {
    let mut array = Array::new().unwrap();
    array.add(String::from("owned")).unwrap();
    array.set(0, Value::Null).unwrap();
    assert!(array.get(0).is_some_and(Value::is_null));
    assert_eq!(
        array.set(1, 1),
        Err(StoreError::OutOfBounds { index: 1, len: 1 })
    );
}

#[test]
fn mixed_ownership_in_one_tree() {
    let label = String::from("shared");
    let mut shared = Object::new().unwrap();
    shared.put("n", 1).unwrap();

    let mut list = Array::new().unwrap();
    list.add(label.as_str()).unwrap();
    list.add(String::from("mine")).unwrap();
    list.add(&shared).unwrap();
    list.add(Object::new().unwrap()).unwrap();

    let ownership: Vec<_> = list.iter().map(Value::ownership).collect();
    assert_eq!(
        ownership,
        [
            Some(Ownership::Borrowed),
            Some(Ownership::Owned),
            Some(Ownership::Borrowed),
            Some(Ownership::Owned),
        ]
    );

    // Borrowed containers are read-only through the slot.
    assert!(list.get_mut(2).and_then(Value::as_object_mut).is_none());
    assert!(list.get_mut(3).and_then(Value::as_object_mut).is_some());

    list.free();
    assert_eq!(label, "shared");
    assert_eq!(shared.get("n"), Some(&Value::Number(1.0)));
}

#[test]
fn value_types() {
    let array = Array::new().unwrap();
    let object = Object::new().unwrap();
    let types: Vec<_> = [
        Value::Null,
        Value::from(false),
        Value::from(0.5),
        Value::from("s"),
        Value::from(&array),
        Value::from(&object),
    ]
    .iter()
    .map(Value::value_type)
    .collect();
    assert_eq!(
        types,
        [
            ValueType::Null,
            ValueType::Boolean,
            ValueType::Number,
            ValueType::String,
            ValueType::Array,
            ValueType::Object,
        ]
    );
}

#[test]
fn stream_refuses_appends_after_finalize() {
    let mut stream = ByteStream::new().unwrap();
    stream.append_str("{").unwrap();
    stream.finalize().unwrap();
    assert_eq!(stream.append_byte(b'}'), Err(StoreError::Finalized));
    assert_eq!(stream.as_bytes(), b"{");
}
