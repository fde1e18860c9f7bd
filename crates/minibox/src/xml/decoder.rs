use alloc::string::String;

use bstr::ByteSlice;

use super::tokenizer::{Token, TokenKind, Tokenizer};
use crate::{
    Array, DecodeError, DecodeOptions, ErrorSource, Object, StoreError, SyntaxError, Value,
};

/// Key for text that has no element of its own to live under.
pub(crate) const TEXT_KEY: &str = "#text";

/// How the children of an element will be stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape<'i> {
    /// The first two children share this name.
    Array(&'i [u8]),
    Fields,
}

pub(crate) struct Decoder<'i> {
    tokens: Tokenizer<'i>,
    depth: usize,
    options: DecodeOptions,
}

impl<'i> Decoder<'i> {
    pub(crate) fn new(input: &'i [u8], options: DecodeOptions) -> Self {
        Self {
            tokens: Tokenizer::new(input),
            depth: 0,
            options,
        }
    }

    fn error_at(&self, source: impl Into<ErrorSource>, offset: usize) -> DecodeError {
        DecodeError::new(source, self.tokens.input(), offset)
    }

    fn store_error(&self, err: StoreError) -> DecodeError {
        self.error_at(err, self.tokens.pos())
    }

    fn str(&self, bytes: &'i [u8], offset: usize) -> Result<&'i str, DecodeError> {
        bytes
            .to_str()
            .map_err(|_| self.error_at(SyntaxError::InvalidUtf8, offset))
    }

    /// Decodes every top-level element into one object.
    ///
    /// The root element's own name is dropped and its content becomes the
    /// object. Further top-level elements merge into the same object.
    pub(crate) fn decode(mut self) -> Result<Object<'static>, DecodeError> {
        let mut root = Object::new().map_err(|e| self.store_error(e))?;
        loop {
            self.tokens.skip_trivia()?;
            match self.tokens.peek() {
                None => break,
                Some(b'<') => {}
                Some(b) => {
                    let offset = self.tokens.pos();
                    let err = SyntaxError::UnexpectedCharacter(char::from(b));
                    return Err(self.error_at(err, offset));
                }
            }

            let token = self.tokens.next_token()?;
            match token.kind {
                TokenKind::AttributeClose => self.attributes(&token, &mut root)?,
                TokenKind::AttributeOpen => {
                    self.attributes(&token, &mut root)?;
                    self.content(&token, &mut root)?;
                }
                TokenKind::Label | TokenKind::Object => self.content(&token, &mut root)?,
                TokenKind::Value | TokenKind::Close => {
                    return Err(self.error_at(SyntaxError::UnbalancedClose, token.offset));
                }
            }
        }
        debug!("decoded XML document with {} members", root.len());
        Ok(root)
    }

    /// Fills `object` with the children of the element `tag` opened, either
    /// as fields or as an array under the plural of the repeated name.
    fn content(
        &mut self,
        tag: &Token<'i>,
        object: &mut Object<'static>,
    ) -> Result<(), DecodeError> {
        match self.shape()? {
            Shape::Array(item) => {
                let key = plural(self.str(item, tag.offset)?);
                let array = self.items(tag)?;
                object.put(key, array).map_err(|e| self.store_error(e))
            }
            Shape::Fields => self.fields(tag, object),
        }
    }

    /// Peeks at the children of the element just opened.
    ///
    /// The copy of the tokenizer walks forward until it has seen two direct
    /// children or the element closes; the real cursor stays where it is.
    fn shape(&self) -> Result<Shape<'i>, DecodeError> {
        let mut ahead = self.tokens;
        let level = ahead.depth();
        let mut first: Option<&'i [u8]> = None;

        while ahead.depth() >= level {
            let token = ahead.next_token()?;
            let child = match token.kind {
                TokenKind::AttributeClose => ahead.depth() == level,
                TokenKind::AttributeOpen | TokenKind::Object | TokenKind::Label => {
                    ahead.depth() == level + 1
                }
                TokenKind::Value | TokenKind::Close => false,
            };
            if !child {
                continue;
            }
            match first {
                Some(name) => {
                    let shape = if name == token.name {
                        Shape::Array(name)
                    } else {
                        Shape::Fields
                    };
                    trace!(
                        "children {:?} and {:?} make {:?}",
                        name.as_bstr(),
                        token.name.as_bstr(),
                        shape
                    );
                    return Ok(shape);
                }
                None => first = Some(token.name),
            }
        }
        Ok(Shape::Fields)
    }

    fn enter(&mut self, offset: usize) -> Result<(), DecodeError> {
        self.depth += 1;
        if self.depth > self.options.max_depth {
            return Err(self.error_at(
                SyntaxError::DepthLimitExceeded(self.options.max_depth),
                offset,
            ));
        }
        Ok(())
    }

    /// Checks that `close` names the element it ends.
    fn closes(&self, expected: &'i [u8], close: &Token<'i>) -> Result<(), DecodeError> {
        if expected == close.name {
            return Ok(());
        }
        Err(self.error_at(
            SyntaxError::MismatchedClose {
                expected: String::from(self.str(expected, close.offset)?),
                found: String::from(self.str(close.name, close.offset)?),
            },
            close.offset,
        ))
    }

    /// Decodes children as object members until `tag` closes.
    ///
    /// A label sets the key for the text that follows it. Text with no key
    /// goes under `#text`.
    fn fields(
        &mut self,
        tag: &Token<'i>,
        object: &mut Object<'static>,
    ) -> Result<(), DecodeError> {
        self.enter(tag.offset)?;
        let level = self.tokens.depth();
        let mut key: Option<&'i [u8]> = None;

        loop {
            let token = self.tokens.next_token()?;
            match token.kind {
                TokenKind::Value => {
                    let name = match key {
                        Some(name) => self.str(name, token.offset)?,
                        None => TEXT_KEY,
                    };
                    let value = self.value(&token)?;
                    object.put(name, value).map_err(|e| self.store_error(e))?;
                }
                TokenKind::Label => key = Some(token.name),
                TokenKind::Close if self.tokens.depth() < level => {
                    self.closes(tag.name, &token)?;
                    break;
                }
                TokenKind::Close => {
                    if let Some(name) = key.take() {
                        self.closes(name, &token)?;
                    }
                }
                TokenKind::Object | TokenKind::AttributeOpen | TokenKind::AttributeClose => {
                    let name = self.str(token.name, token.offset)?;
                    let value = self.element(&token)?;
                    object.put(name, value).map_err(|e| self.store_error(e))?;
                }
            }
        }

        self.depth -= 1;
        Ok(())
    }

    /// Decodes children as array items until `tag` closes. The item tags
    /// themselves are not kept, but each must close under its own name.
    fn items(&mut self, tag: &Token<'i>) -> Result<Array<'static>, DecodeError> {
        self.enter(tag.offset)?;
        let level = self.tokens.depth();
        let mut array = Array::new().map_err(|e| self.store_error(e))?;
        let mut label: Option<&'i [u8]> = None;

        loop {
            let token = self.tokens.next_token()?;
            let value = match token.kind {
                TokenKind::Value => self.value(&token)?,
                TokenKind::Label => {
                    label = Some(token.name);
                    continue;
                }
                TokenKind::Close if self.tokens.depth() < level => {
                    self.closes(tag.name, &token)?;
                    break;
                }
                TokenKind::Close => {
                    if let Some(name) = label.take() {
                        self.closes(name, &token)?;
                    }
                    continue;
                }
                TokenKind::Object | TokenKind::AttributeOpen | TokenKind::AttributeClose => {
                    self.element(&token)?
                }
            };
            array.add(value).map_err(|e| self.store_error(e))?;
        }

        self.depth -= 1;
        Ok(array)
    }

    /// Decodes a nested element whose open tag was just read.
    fn element(&mut self, tag: &Token<'i>) -> Result<Value<'static>, DecodeError> {
        match tag.kind {
            TokenKind::AttributeClose => {
                let mut object = Object::new().map_err(|e| self.store_error(e))?;
                self.attributes(tag, &mut object)?;
                Ok(Value::from(object))
            }
            TokenKind::AttributeOpen => {
                let mut object = Object::new().map_err(|e| self.store_error(e))?;
                self.attributes(tag, &mut object)?;
                self.content(tag, &mut object)?;
                Ok(Value::from(object))
            }
            _ => match self.shape()? {
                Shape::Array(_) => Ok(Value::from(self.items(tag)?)),
                Shape::Fields => {
                    let mut object = Object::new().map_err(|e| self.store_error(e))?;
                    self.fields(tag, &mut object)?;
                    Ok(Value::from(object))
                }
            },
        }
    }

    /// Parses `name="value"` pairs from a tag body. Values stay strings.
    fn attributes(
        &self,
        tag: &Token<'i>,
        object: &mut Object<'static>,
    ) -> Result<(), DecodeError> {
        let body = tag.body;
        let mut pos = 0;
        let malformed =
            |at: usize| self.error_at(SyntaxError::MalformedAttribute, tag.body_offset + at);
        let skip_whitespace = |mut at: usize| {
            while body.get(at).is_some_and(u8::is_ascii_whitespace) {
                at += 1;
            }
            at
        };

        loop {
            pos = skip_whitespace(pos);
            if pos >= body.len() {
                return Ok(());
            }

            let name_start = pos;
            while body
                .get(pos)
                .is_some_and(|&b| b != b'=' && !b.is_ascii_whitespace())
            {
                pos += 1;
            }
            let name = &body[name_start..pos];
            pos = skip_whitespace(pos);
            if name.is_empty() || body.get(pos) != Some(&b'=') {
                return Err(malformed(name_start));
            }
            pos = skip_whitespace(pos + 1);

            let quote = match body.get(pos) {
                Some(&q @ (b'"' | b'\'')) => q,
                _ => return Err(malformed(pos)),
            };
            let value_start = pos + 1;
            let len = body[value_start..]
                .find_byte(quote)
                .ok_or_else(|| malformed(pos))?;
            pos = value_start + len + 1;

            let name = self.str(name, tag.body_offset + name_start)?;
            let value = self.str(
                &body[value_start..value_start + len],
                tag.body_offset + value_start,
            )?;
            object
                .put(name, String::from(value))
                .map_err(|e| self.store_error(e))?;
        }
    }

    fn value(&self, token: &Token<'i>) -> Result<Value<'static>, DecodeError> {
        let text = self.str(token.body, token.body_offset)?;
        Ok(typed(text))
    }
}

/// Naive plural used as the key of an inferred array.
pub(crate) fn plural(name: &str) -> String {
    let mut key = String::from(name);
    if !key.ends_with('s') {
        key.push('s');
    }
    key
}

/// Types element text.
///
/// Digits with an optional leading `-` and at most one `.` (not in first
/// place) make a number. Text starting with `false` is `false`, so
/// `falsehood` is `false` too, while `true` and `null` must match exactly.
/// Everything else is a string.
pub(crate) fn typed(text: &str) -> Value<'static> {
    if looks_numeric(text) {
        if let Some(n) = text.parse::<f64>().ok().filter(|n| n.is_finite()) {
            return Value::Number(n);
        }
    }
    if text.starts_with("false") {
        Value::Boolean(false)
    } else if text == "true" {
        Value::Boolean(true)
    } else if text == "null" {
        Value::Null
    } else {
        Value::from(String::from(text))
    }
}

fn looks_numeric(text: &str) -> bool {
    let mut digits = 0;
    let mut dots = 0;
    for (i, b) in text.bytes().enumerate() {
        match b {
            b'0'..=b'9' => digits += 1,
            b'-' if i == 0 => {}
            b'.' if i > 0 && dots == 0 => dots += 1,
            _ => return false,
        }
    }
    digits > 0
}
