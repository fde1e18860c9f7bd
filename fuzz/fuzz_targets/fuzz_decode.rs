#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use minibox::{DecodeOptions, json, xml};

#[derive(Arbitrary, Debug)]
enum Codec {
    Json,
    Xml,
}

#[derive(Arbitrary, Debug)]
struct Input<'a> {
    codec: Codec,
    strict_literals: bool,
    max_depth: u8,
    data: &'a [u8],
}

fuzz_target!(|input: Input<'_>| {
    let options = DecodeOptions {
        max_depth: usize::from(input.max_depth),
        strict_literals: input.strict_literals,
    };
    match input.codec {
        Codec::Json => {
            // Whatever decodes must encode, and the encoding must decode again.
            if let Ok(doc) = json::decode_with(input.data, options) {
                let text = json::encode(&doc).expect("encode");
                json::decode_with(text.as_bytes(), options).expect("re-decode");
            }
        }
        Codec::Xml => {
            if let Ok(doc) = xml::decode_with(input.data, options) {
                let text = xml::encode(&doc).expect("encode");
                let _ = xml::decode_with(text.as_bytes(), options);
            }
        }
    }
});
