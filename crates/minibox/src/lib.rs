//! Packed containers for semi-structured data, with JSON and XML codecs.
//!
//! Every container ([`Array`], [`Object`], [`ByteStream`]) sits on a single
//! growable [`Store`] whose capacity doubles on demand and never shrinks. Slots
//! record whether they own their payload ([`Ownership::Owned`]) or merely refer
//! to something the caller keeps alive ([`Ownership::Borrowed`]); dropping a
//! container releases exactly the owned part of its tree.
//!
//! ```rust
//! use minibox::{Array, Object, json};
//!
//! let mut tags = Array::new()?;
//! tags.add("embedded")?;
//! tags.add("no_std")?;
//!
//! let mut root = Object::new()?;
//! root.put("name", "minibox")?;
//! root.put("tags", tags)?;
//!
//! let text = json::encode(&root)?;
//! let back = json::decode(text.as_bytes())?;
//! assert_eq!(back, root);
//! # Ok::<(), Box<dyn core::error::Error>>(())
//! ```
//!
//! The codecs are deliberately small: no escape decoding, no entity handling,
//! and the XML decoder guesses arrays from repeated sibling names. See the
//! [`json`] and [`xml`] module docs for the exact rules.

#![no_std]
#![allow(missing_docs)]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

#[macro_use]
mod tracing_macros;

mod array;
mod error;
mod number;
mod object;
mod options;
mod store;
mod stream;
mod value;

pub mod json;
pub mod xml;

#[cfg(any(test, feature = "serde"))]
mod serialize;

#[cfg(test)]
mod tests;

pub use array::Array;
#[cfg(feature = "std")]
pub use error::Error;
pub use error::{DecodeError, ErrorSource, StoreError, SyntaxError};
pub use object::{Member, Object};
pub use options::DecodeOptions;
pub use store::{Slot, Store, StoreKind};
pub use stream::ByteStream;
pub use value::{Handle, Ownership, Value, ValueType};
