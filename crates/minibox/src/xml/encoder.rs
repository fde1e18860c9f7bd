use crate::{Array, ByteStream, Object, StoreError, Value};

const PREAMBLE: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";
const COMMENT: &str = "<!-- XML document created with minibox -->\n";
const ROOT: &str = "object";
const ITEM: &str = "item";

pub(crate) struct Encoder {
    out: ByteStream,
    level: usize,
}

impl Encoder {
    pub(crate) fn new() -> Result<Self, StoreError> {
        Ok(Self {
            out: ByteStream::new()?,
            level: 0,
        })
    }

    /// Preamble, comment and the `<object>` root around the members.
    pub(crate) fn document(mut self, root: &Object<'_>) -> Result<ByteStream, StoreError> {
        self.out.append_str(PREAMBLE)?;
        self.out.append_str(COMMENT)?;
        self.open(ROOT)?;
        self.object(root)?;
        self.close(ROOT)?;
        self.out.finalize()?;
        Ok(self.out)
    }

    fn open(&mut self, name: &str) -> Result<(), StoreError> {
        self.out.append_byte(b'<')?;
        self.out.append_str(name)?;
        self.out.append_byte(b'>')
    }

    fn close(&mut self, name: &str) -> Result<(), StoreError> {
        self.out.append_str("</")?;
        self.out.append_str(name)?;
        self.out.append_byte(b'>')
    }

    fn element(&mut self, name: &str, value: &Value<'_>) -> Result<(), StoreError> {
        self.out.paragraph(self.level)?;
        self.open(name)?;
        self.value(value)?;
        self.close(name)
    }

    fn value(&mut self, value: &Value<'_>) -> Result<(), StoreError> {
        match value {
            Value::Null => self.out.append_str("null"),
            Value::Boolean(true) => self.out.append_str("true"),
            Value::Boolean(false) => self.out.append_str("false"),
            Value::Number(n) => self.out.append_number(*n),
            Value::String(s) => self.out.append_str(s),
            Value::Array(array) => self.array(array),
            Value::Object(object) => self.object(object),
        }
    }

    fn object(&mut self, object: &Object<'_>) -> Result<(), StoreError> {
        self.level += 1;
        for (key, value) in object.iter() {
            self.element(key, value)?;
        }
        self.level -= 1;
        self.out.paragraph(self.level)
    }

    fn array(&mut self, array: &Array<'_>) -> Result<(), StoreError> {
        self.level += 1;
        for value in array {
            self.element(ITEM, value)?;
        }
        self.level -= 1;
        self.out.paragraph(self.level)
    }
}
