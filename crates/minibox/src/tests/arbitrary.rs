use alloc::string::String;

use quickcheck::{Arbitrary, Gen};

use crate::{Array, Object, Value};

const TEXT: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789 _.-";
const ALNUM: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const NAME: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

/// A document the JSON codec reproduces exactly.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct JsonDoc(pub(crate) Object<'static>);

/// A document the XML codec reproduces exactly: strings that cannot be
/// mistaken for numbers or literals, arrays of at least two items, tag-safe
/// keys.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct XmlDoc(pub(crate) Object<'static>);

#[derive(Clone, Copy)]
enum Flavor {
    Json,
    Xml,
}

fn pick(g: &mut Gen, alphabet: &[u8], min: usize, max: usize) -> String {
    let len = min + usize::arbitrary(g) % (max - min + 1);
    (0..len)
        .map(|_| char::from(alphabet[usize::arbitrary(g) % alphabet.len()]))
        .collect()
}

/// Integers and quarter steps, both exact in the six-digit output.
fn number(g: &mut Gen) -> f64 {
    let n = i32::arbitrary(g) % 4000;
    if bool::arbitrary(g) {
        f64::from(n)
    } else {
        f64::from(n) / 4.0
    }
}

fn text(g: &mut Gen, flavor: Flavor) -> String {
    match flavor {
        Flavor::Json => pick(g, TEXT, 0, 8),
        Flavor::Xml => {
            let mut s = String::from("x");
            s.push_str(&pick(g, ALNUM, 0, 6));
            s
        }
    }
}

fn key(g: &mut Gen, flavor: Flavor) -> String {
    match flavor {
        Flavor::Json => pick(g, TEXT, 0, 5),
        Flavor::Xml => pick(g, NAME, 1, 5),
    }
}

fn gen_val(g: &mut Gen, depth: usize, flavor: Flavor) -> Value<'static> {
    let choices = if depth == 0 { 4 } else { 6 };
    match usize::arbitrary(g) % choices {
        0 => Value::Null,
        1 => Value::Boolean(bool::arbitrary(g)),
        2 => Value::Number(number(g)),
        3 => Value::String(text(g, flavor).into()),
        4 => {
            let len = match flavor {
                Flavor::Json => usize::arbitrary(g) % 4,
                Flavor::Xml => 2 + usize::arbitrary(g) % 3,
            };
            let mut array = Array::new().unwrap();
            for _ in 0..len {
                array.add(gen_val(g, depth - 1, flavor)).unwrap();
            }
            Value::from(array)
        }
        _ => Value::from(gen_obj(g, depth - 1, flavor)),
    }
}

fn gen_obj(g: &mut Gen, depth: usize, flavor: Flavor) -> Object<'static> {
    let len = usize::arbitrary(g) % 4;
    let mut object = Object::new().unwrap();
    for _ in 0..len {
        let key = key(g, flavor);
        let value = gen_val(g, depth, flavor);
        object.put(key, value).unwrap();
    }
    object
}

impl Arbitrary for JsonDoc {
    fn arbitrary(g: &mut Gen) -> Self {
        let depth = usize::arbitrary(g) % 4;
        Self(gen_obj(g, depth, Flavor::Json))
    }
}

impl Arbitrary for XmlDoc {
    fn arbitrary(g: &mut Gen) -> Self {
        let depth = usize::arbitrary(g) % 4;
        Self(gen_obj(g, depth, Flavor::Xml))
    }
}
