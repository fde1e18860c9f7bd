use alloc::string::String;

use bstr::ByteSlice;

use crate::{
    Array, DecodeError, DecodeOptions, ErrorSource, Object, StoreError, SyntaxError, Value,
};

/// Single-cursor recursive descent over a JSON byte buffer.
///
/// Structural bytes drive the walk; anything the grammar below does not name
/// (whitespace, stray separators, unknown bytes) is skipped.
pub(crate) struct Decoder<'i> {
    input: &'i [u8],
    pos: usize,
    depth: usize,
    options: DecodeOptions,
}

impl<'i> Decoder<'i> {
    pub(crate) fn new(input: &'i [u8], options: DecodeOptions) -> Self {
        Self {
            input,
            pos: 0,
            depth: 0,
            options,
        }
    }

    fn error_at(&self, source: impl Into<ErrorSource>, offset: usize) -> DecodeError {
        DecodeError::new(source, self.input, offset)
    }

    fn store_error(&self, err: StoreError) -> DecodeError {
        self.error_at(err, self.pos)
    }

    fn bump(&mut self) -> Option<u8> {
        let byte = *self.input.get(self.pos)?;
        self.pos += 1;
        Some(byte)
    }

    fn skip_whitespace(&mut self) {
        while self
            .input
            .get(self.pos)
            .is_some_and(u8::is_ascii_whitespace)
        {
            self.pos += 1;
        }
    }

    /// Consumes the opening byte of the root container.
    fn open_root(&mut self) -> Result<u8, DecodeError> {
        self.skip_whitespace();
        match self.bump() {
            Some(byte @ (b'{' | b'[')) => Ok(byte),
            Some(_) => Err(self.error_at(SyntaxError::UnexpectedRoot, self.pos - 1)),
            None => Err(self.error_at(SyntaxError::UnexpectedEndOfInput, self.pos)),
        }
    }

    pub(crate) fn decode_object(mut self) -> Result<Object<'static>, DecodeError> {
        match self.open_root()? {
            b'{' => {
                let object = self.object()?;
                debug!("decoded JSON object with {} members", object.len());
                Ok(object)
            }
            _ => Err(self.error_at(SyntaxError::UnexpectedRoot, self.pos - 1)),
        }
    }

    pub(crate) fn decode_value(mut self) -> Result<Value<'static>, DecodeError> {
        if self.open_root()? == b'{' {
            let object = self.object()?;
            debug!("decoded JSON object with {} members", object.len());
            Ok(Value::from(object))
        } else {
            let array = self.array()?;
            debug!("decoded JSON array with {} values", array.len());
            Ok(Value::from(array))
        }
    }

    fn enter(&mut self) -> Result<(), DecodeError> {
        self.depth += 1;
        if self.depth > self.options.max_depth {
            return Err(self.error_at(
                SyntaxError::DepthLimitExceeded(self.options.max_depth),
                self.pos.saturating_sub(1),
            ));
        }
        Ok(())
    }

    /// Parses object members up to the matching `}`. The `{` is already
    /// consumed.
    ///
    /// A string is a key until a `:` has been seen, then it is the value.
    /// Numbers and literals only count after a `:`.
    fn object(&mut self) -> Result<Object<'static>, DecodeError> {
        self.enter()?;
        let mut object = Object::new().map_err(|e| self.store_error(e))?;
        let mut key: Option<String> = None;
        let mut after_colon = false;

        loop {
            let start = self.pos;
            let Some(byte) = self.bump() else {
                return Err(self.error_at(SyntaxError::UnexpectedEndOfInput, self.pos));
            };
            let value = match byte {
                b'}' => break,
                b':' => {
                    after_colon = true;
                    continue;
                }
                b'{' | b'[' if key.is_none() => {
                    return Err(self.error_at(SyntaxError::MissingKey, start));
                }
                b'{' => Value::from(self.object()?),
                b'[' => Value::from(self.array()?),
                b'"' => {
                    let text = self.string()?;
                    if !after_colon {
                        key = Some(text);
                        continue;
                    }
                    Value::from(text)
                }
                b'-' | b'0'..=b'9' if after_colon => self.number(start)?,
                b't' | b'f' | b'n' if after_colon => self.literal(start)?,
                _ => continue,
            };

            let Some(name) = key.take() else {
                return Err(self.error_at(SyntaxError::MissingKey, start));
            };
            object.put(name, value).map_err(|e| self.store_error(e))?;
            after_colon = false;
        }

        self.depth -= 1;
        Ok(object)
    }

    /// Parses array items up to the matching `]`. The `[` is already consumed.
    ///
    /// Strings and containers are always taken. A number or literal is only
    /// taken as the first scalar after `[` or a `,`.
    fn array(&mut self) -> Result<Array<'static>, DecodeError> {
        self.enter()?;
        let mut array = Array::new().map_err(|e| self.store_error(e))?;
        let mut expecting = true;

        loop {
            let start = self.pos;
            let Some(byte) = self.bump() else {
                return Err(self.error_at(SyntaxError::UnexpectedEndOfInput, self.pos));
            };
            let value = match byte {
                b']' => break,
                b',' => {
                    expecting = true;
                    continue;
                }
                b'{' => Value::from(self.object()?),
                b'[' => Value::from(self.array()?),
                b'"' => Value::from(self.string()?),
                b'-' | b'0'..=b'9' | b't' | b'f' | b'n' if !expecting => continue,
                b'-' | b'0'..=b'9' => {
                    expecting = false;
                    self.number(start)?
                }
                b't' | b'f' | b'n' => {
                    expecting = false;
                    self.literal(start)?
                }
                _ => continue,
            };
            array.add(value).map_err(|e| self.store_error(e))?;
        }

        self.depth -= 1;
        Ok(array)
    }

    /// Reads raw bytes up to the next `"`. Escapes are not interpreted.
    fn string(&mut self) -> Result<String, DecodeError> {
        let start = self.pos;
        let Some(len) = self.input[start..].find_byte(b'"') else {
            return Err(self.error_at(SyntaxError::UnexpectedEndOfInput, self.input.len()));
        };
        self.pos = start + len + 1;
        let text = core::str::from_utf8(&self.input[start..start + len])
            .map_err(|_| self.error_at(SyntaxError::InvalidUtf8, start))?;
        Ok(String::from(text))
    }

    fn digits(&mut self) -> usize {
        let start = self.pos;
        while self.input.get(self.pos).is_some_and(u8::is_ascii_digit) {
            self.pos += 1;
        }
        self.pos - start
    }

    /// Scans `-? digits (. digits)? ([eE] [+-]? digits)?` from `start`.
    /// Magnitudes beyond `f64` are rejected rather than read as infinity.
    fn number(&mut self, start: usize) -> Result<Value<'static>, DecodeError> {
        self.pos = start;
        if self.input.get(self.pos) == Some(&b'-') {
            self.pos += 1;
        }
        self.digits();
        if self.input.get(self.pos) == Some(&b'.') {
            self.pos += 1;
            self.digits();
        }
        if matches!(self.input.get(self.pos), Some(b'e' | b'E')) {
            let mark = self.pos;
            self.pos += 1;
            if matches!(self.input.get(self.pos), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            if self.digits() == 0 {
                self.pos = mark;
            }
        }

        core::str::from_utf8(&self.input[start..self.pos])
            .ok()
            .and_then(|text| text.parse::<f64>().ok())
            .filter(|n| n.is_finite())
            .map(Value::Number)
            .ok_or_else(|| self.error_at(SyntaxError::InvalidNumber, start))
    }

    /// Reads a bare word starting with `t`, `f` or `n`.
    ///
    /// Only the first letter decides the value unless strict literals are on.
    fn literal(&mut self, start: usize) -> Result<Value<'static>, DecodeError> {
        self.pos = start;
        while self
            .input
            .get(self.pos)
            .is_some_and(u8::is_ascii_alphabetic)
        {
            self.pos += 1;
        }
        let word = &self.input[start..self.pos];

        let value = match word.first() {
            Some(b't') => Value::Boolean(true),
            Some(b'f') => Value::Boolean(false),
            _ => Value::Null,
        };
        if self.options.strict_literals && !matches!(word, b"true" | b"false" | b"null") {
            return Err(self.error_at(SyntaxError::InvalidLiteral, start));
        }
        Ok(value)
    }
}
