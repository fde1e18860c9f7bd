//! A small JSON codec.
//!
//! # Decoding
//!
//! The decoder is a single forward pass that reacts to structural bytes and
//! skips everything else. It is lenient in ways a conforming parser is not:
//!
//! - strings run verbatim to the next `"`; backslash escapes are kept as-is,
//!   so an embedded `\"` ends the string early;
//! - `t`, `f` and `n` words decode by their first letter (`tru` is `true`)
//!   unless [`DecodeOptions::strict_literals`] is set;
//! - inside arrays, only the first number or literal after `[` or `,` is
//!   taken; strings and nested containers are always taken;
//! - bytes after the root container closes are ignored.
//!
//! # Encoding
//!
//! Objects put one member per line and write `"key" : value`; arrays keep
//! their items on one line separated by `, `. Indentation is one tab per
//! level. Strings are written without escaping.
//!
//! ```rust
//! use minibox::{Array, Object, json};
//!
//! let mut list = Array::new()?;
//! list.add(1)?;
//! list.add(2.5)?;
//! let mut root = Object::new()?;
//! root.put("id", 7)?;
//! root.put("list", list)?;
//!
//! let text = json::encode(&root)?;
//! assert_eq!(
//!     text.to_str()?,
//!     "{\n\t\"id\" : 7,\n\t\"list\" : [\n\t\t1, 2.5\n\t]\n}"
//! );
//! # Ok::<(), Box<dyn core::error::Error>>(())
//! ```

mod decoder;
mod encoder;

use decoder::Decoder;
use encoder::Encoder;

use crate::{ByteStream, DecodeError, DecodeOptions, Object, StoreError, Value};

/// Decodes a document whose root is an object.
///
/// # Errors
///
/// A [`DecodeError`] pointing at the offending byte; the root must be an
/// object, anything else fails with
/// [`SyntaxError::UnexpectedRoot`](crate::SyntaxError::UnexpectedRoot).
pub fn decode(input: &[u8]) -> Result<Object<'static>, DecodeError> {
    decode_with(input, DecodeOptions::default())
}

/// [`decode`] with explicit options.
///
/// # Errors
///
/// See [`decode`].
pub fn decode_with(
    input: &[u8],
    options: DecodeOptions,
) -> Result<Object<'static>, DecodeError> {
    Decoder::new(input, options).decode_object()
}

/// Decodes a document whose root is an object or an array.
///
/// # Errors
///
/// See [`decode`].
pub fn decode_value(input: &[u8]) -> Result<Value<'static>, DecodeError> {
    decode_value_with(input, DecodeOptions::default())
}

/// [`decode_value`] with explicit options.
///
/// # Errors
///
/// See [`decode`].
pub fn decode_value_with(
    input: &[u8],
    options: DecodeOptions,
) -> Result<Value<'static>, DecodeError> {
    Decoder::new(input, options).decode_value()
}

/// Encodes an object into a finalized stream.
///
/// # Errors
///
/// Only allocation failures.
pub fn encode(object: &Object<'_>) -> Result<ByteStream, StoreError> {
    let mut encoder = Encoder::new()?;
    encoder.object(object)?;
    encoder.finish()
}

/// Encodes any value into a finalized stream. Scalars encode on their own.
///
/// # Errors
///
/// Only allocation failures.
pub fn encode_value(value: &Value<'_>) -> Result<ByteStream, StoreError> {
    let mut encoder = Encoder::new()?;
    encoder.value(value)?;
    encoder.finish()
}

/// Loads and decodes a JSON file.
///
/// # Errors
///
/// I/O failures, and anything [`decode`] reports.
#[cfg(feature = "std")]
pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Object<'static>, crate::Error> {
    let stream = ByteStream::load(path)?;
    Ok(decode(stream.as_bytes())?)
}

/// Encodes `object` and writes it to `path`.
///
/// # Errors
///
/// I/O and allocation failures.
#[cfg(feature = "std")]
pub fn to_file(
    object: &Object<'_>,
    path: impl AsRef<std::path::Path>,
) -> Result<(), crate::Error> {
    encode(object)?.save(path)
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use super::*;
    use crate::{Array, SyntaxError};

    fn text(stream: &ByteStream) -> &str {
        stream.to_str().unwrap()
    }

    #[test]
    fn encodes_numbers_like_the_shared_formatter() {
        let mut root = Object::new().unwrap();
        root.put("a", 1.0).unwrap();
        root.put("b", 3.9).unwrap();
        root.put("c", -2).unwrap();
        let out = encode(&root).unwrap();
        assert_eq!(
            text(&out),
            "{\n\t\"a\" : 1,\n\t\"b\" : 3.9,\n\t\"c\" : -2\n}"
        );
    }

    #[test]
    fn empty_object_still_opens_a_line() {
        let root = Object::new().unwrap();
        let out = encode(&root).unwrap();
        assert_eq!(text(&out), "{\n\t\n}");
        assert_eq!(decode(out.as_bytes()).unwrap(), root);
    }

    #[test]
    fn nested_containers_indent_per_level() {
        let mut inner = Object::new().unwrap();
        inner.put("x", true).unwrap();
        let mut list = Array::new().unwrap();
        list.add(inner).unwrap();
        list.add("s").unwrap();
        let mut root = Object::new().unwrap();
        root.put("list", list).unwrap();

        let out = encode(&root).unwrap();
        assert_eq!(
            text(&out),
            "{\n\t\"list\" : [\n\t\t{\n\t\t\t\"x\" : true\n\t\t}, \"s\"\n\t]\n}"
        );
        assert_eq!(decode(out.as_bytes()).unwrap(), root);
    }

    #[test]
    fn value_roots() {
        let array = decode_value(b"  [1, \"two\", null]").unwrap();
        let items = array.as_array().unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items.get(2), Some(&Value::Null));

        let out = encode_value(&array).unwrap();
        assert_eq!(text(&out), "[\n\t1, \"two\", null\n]");
        assert_eq!(text(&encode_value(&Value::from(0.5)).unwrap()), "0.5");
    }

    #[test]
    fn object_root_required() {
        let err = decode(b"[1]").unwrap_err();
        assert_eq!(err.syntax(), Some(&SyntaxError::UnexpectedRoot));
        let err = decode(b"x{}").unwrap_err();
        assert_eq!(err.syntax(), Some(&SyntaxError::UnexpectedRoot));
        let err = decode(b"  ").unwrap_err();
        assert_eq!(err.syntax(), Some(&SyntaxError::UnexpectedEndOfInput));
    }

    #[test]
    fn trailing_bytes_are_ignored() {
        let root = decode(b"{\"a\" : 1} trailing garbage").unwrap();
        assert_eq!(root.get("a"), Some(&Value::Number(1.0)));
    }

    #[test]
    fn escapes_are_not_decoded() {
        let root = decode(br#"{"path": "C:\dir"}"#).unwrap();
        assert_eq!(root.get("path").and_then(Value::as_str), Some(r"C:\dir"));
    }

    #[test]
    fn truncated_input_fails() {
        let mut input = String::from("{\"a\" : [1, 2");
        assert!(decode(input.as_bytes()).is_err());
        input.push(']');
        let err = decode(input.as_bytes()).unwrap_err();
        assert_eq!(err.syntax(), Some(&SyntaxError::UnexpectedEndOfInput));
        input.push('}');
        assert!(decode(input.as_bytes()).is_ok());
    }
}
