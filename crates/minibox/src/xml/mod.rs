//! A small XML codec with array inference.
//!
//! XML has no array syntax, so the decoder guesses: when the first two child
//! elements of an element share a name, all of its children become an
//! [`Array`](crate::Array) and the item tags are dropped; otherwise each child
//! becomes an object member under its tag name. The guess is lossy. Arrays
//! with fewer than two items come back as objects, and mixed content
//! flattens.
//!
//! Further rules:
//!
//! - the root element's name is dropped and its content fills the returned
//!   object; several root elements merge into it;
//! - attributes become string members of the element's object, and an
//!   inferred array next to attributes is stored under the plural of the item
//!   name (`item` becomes `items`, names already ending in `s` stay as they
//!   are);
//! - text with no element of its own goes under `#text`;
//! - text is typed as a number, then as `false` by prefix (`falsey` is
//!   `false`), then as exactly `true` or `null`, otherwise kept as a string;
//! - declarations, doctypes and comments are skipped, entities and CDATA are
//!   not interpreted.
//!
//! The encoder writes a declaration, a fixed comment and an `<object>` root,
//! wraps array items in `<item>` and writes strings unescaped.
//!
//! ```rust
//! use minibox::{Value, xml};
//!
//! let doc = xml::decode(b"<root>
//!     <list><item>1</item><item>2</item></list>
//!     <person><name>Ann</name><age>5</age></person>
//! </root>")?;
//!
//! let list = doc.get("list").and_then(Value::as_array).unwrap();
//! assert_eq!(list.as_slice(), &[Value::Number(1.0), Value::Number(2.0)]);
//!
//! let person = doc.get("person").and_then(Value::as_object).unwrap();
//! assert_eq!(person.get("name").and_then(Value::as_str), Some("Ann"));
//! assert_eq!(person.get("age"), Some(&Value::Number(5.0)));
//! # Ok::<(), minibox::DecodeError>(())
//! ```

mod decoder;
mod encoder;
mod tokenizer;

use decoder::Decoder;
use encoder::Encoder;

use crate::{ByteStream, DecodeError, DecodeOptions, Object, StoreError};

/// Decodes an XML document into an object.
///
/// # Errors
///
/// A [`DecodeError`] for malformed or truncated markup, mismatched close
/// tags, or text outside any element.
pub fn decode(input: &[u8]) -> Result<Object<'static>, DecodeError> {
    decode_with(input, DecodeOptions::default())
}

/// [`decode`] with explicit options. Only
/// [`max_depth`](DecodeOptions::max_depth) applies to XML.
///
/// # Errors
///
/// See [`decode`].
pub fn decode_with(
    input: &[u8],
    options: DecodeOptions,
) -> Result<Object<'static>, DecodeError> {
    Decoder::new(input, options).decode()
}

/// Encodes an object as a finalized XML document.
///
/// # Errors
///
/// Only allocation failures.
pub fn encode(object: &Object<'_>) -> Result<ByteStream, StoreError> {
    Encoder::new()?.document(object)
}

/// Loads and decodes an XML file.
///
/// # Errors
///
/// I/O failures, and anything [`decode`] reports.
#[cfg(feature = "std")]
pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Object<'static>, crate::Error> {
    let stream = ByteStream::load(path)?;
    Ok(decode(stream.as_bytes())?)
}

/// Encodes `object` as XML and writes it to `path`.
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
