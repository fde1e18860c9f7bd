use crate::{Array, ByteStream, Object, StoreError, Value};

/// Tree walk that writes indented JSON text.
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

    pub(crate) fn finish(mut self) -> Result<ByteStream, StoreError> {
        self.out.finalize()?;
        Ok(self.out)
    }

    pub(crate) fn value(&mut self, value: &Value<'_>) -> Result<(), StoreError> {
        match value {
            Value::Null => self.out.append_str("null"),
            Value::Boolean(true) => self.out.append_str("true"),
            Value::Boolean(false) => self.out.append_str("false"),
            Value::Number(n) => self.out.append_number(*n),
            Value::String(s) => self.out.append_quoted(s, b'"'),
            Value::Array(array) => self.array(array),
            Value::Object(object) => self.object(object),
        }
    }

    /// One member per line, `"key" : value`.
    pub(crate) fn object(&mut self, object: &Object<'_>) -> Result<(), StoreError> {
        self.level += 1;
        self.out.open_hierarchy(b'{', self.level)?;
        for (i, (key, value)) in object.iter().enumerate() {
            if i != 0 {
                self.out.open_hierarchy(b',', self.level)?;
            }
            self.out.append_quoted(key, b'"')?;
            self.out.append_str(" : ")?;
            self.value(value)?;
        }
        self.level -= 1;
        self.out.close_hierarchy(b'}', self.level)
    }

    /// All items on one line, separated by `, `.
    pub(crate) fn array(&mut self, array: &Array<'_>) -> Result<(), StoreError> {
        self.level += 1;
        self.out.open_hierarchy(b'[', self.level)?;
        for (i, value) in array.iter().enumerate() {
            if i != 0 {
                self.out.append_str(", ")?;
            }
            self.value(value)?;
        }
        self.level -= 1;
        self.out.close_hierarchy(b']', self.level)
    }
}
