#![allow(missing_docs)]

use std::{fs, path::PathBuf};

use minibox::{Array, ByteStream, Error, Object, Value, json, xml};

fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("minibox-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir.join(name)
}

fn sample() -> Object<'static> {
    let mut list = Array::new().unwrap();
    list.add("alpha").unwrap();
    list.add(2.5).unwrap();
    let mut root = Object::new().unwrap();
    root.put("list", list).unwrap();
    root.put("done", false).unwrap();
    root
}

#[test]
fn stream_load_save_round_trip() {
    let path = scratch("stream.txt");
    let mut out = ByteStream::new().unwrap();
    out.append_str("line one\nline two").unwrap();
    out.finalize().unwrap();
    out.save(&path).unwrap();

    // The terminator stays in memory only.
    assert_eq!(fs::read(&path).unwrap(), b"line one\nline two");

    let loaded = ByteStream::load(&path).unwrap();
    assert!(loaded.is_finalized());
    assert_eq!(loaded.as_bytes(), out.as_bytes());
    assert_eq!(loaded.as_c_str().unwrap().to_bytes(), b"line one\nline two");
}

#[test]
fn json_file_round_trip() {
    let path = scratch("doc.json");
    let root = sample();
    json::to_file(&root, &path).unwrap();
    assert_eq!(json::from_file(&path).unwrap(), root);
}

#[test]
fn xml_file_round_trip() {
    let path = scratch("doc.xml");
    let root = sample();
    xml::to_file(&root, &path).unwrap();
    let back = xml::from_file(&path).unwrap();
    assert_eq!(back.get("done"), Some(&Value::Boolean(false)));
    assert_eq!(back, root);
}

#[test]
fn missing_file_is_an_io_error() {
    let path = scratch("does-not-exist.json");
    let err = json::from_file(&path).unwrap_err();
    assert!(matches!(err, Error::Io(_)), "{err:?}");
}

#[test]
fn malformed_file_is_a_decode_error() {
    let path = scratch("bad.json");
    fs::write(&path, "[1, 2]").unwrap();
    let err = json::from_file(&path).unwrap_err();
    assert!(matches!(err, Error::Decode(_)), "{err:?}");
}
