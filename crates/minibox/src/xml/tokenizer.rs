use bstr::ByteSlice;

use crate::{DecodeError, SyntaxError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
    /// Text between tags, trimmed.
    Value,
    /// `<name>` followed by text.
    Label,
    /// `<name>` followed by another tag.
    Object,
    /// `<name attr="..">`.
    AttributeOpen,
    /// `<name/>` or `<name attr=".."/>`.
    AttributeClose,
    /// `</name>`.
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token<'i> {
    pub(crate) kind: TokenKind,
    /// Tag name; empty for values.
    pub(crate) name: &'i [u8],
    /// Attribute text of a tag, or the text of a value.
    pub(crate) body: &'i [u8],
    pub(crate) offset: usize,
    pub(crate) body_offset: usize,
}

/// Cursor over an XML byte buffer.
///
/// Copying the tokenizer snapshots its position and depth, which is how the
/// decoder looks ahead without disturbing the real cursor.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Tokenizer<'i> {
    input: &'i [u8],
    pos: usize,
    depth: usize,
}

impl<'i> Tokenizer<'i> {
    pub(crate) fn new(input: &'i [u8]) -> Self {
        Self {
            input,
            pos: 0,
            depth: 0,
        }
    }

    /// Open elements around the cursor.
    pub(crate) fn depth(&self) -> usize {
        self.depth
    }

    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    pub(crate) fn input(&self) -> &'i [u8] {
        self.input
    }

    pub(crate) fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn rest(&self) -> &'i [u8] {
        &self.input[self.pos..]
    }

    fn error(&self, err: SyntaxError, offset: usize) -> DecodeError {
        DecodeError::new(err, self.input, offset)
    }

    fn end_of_input(&self) -> DecodeError {
        self.error(SyntaxError::UnexpectedEndOfInput, self.input.len())
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    /// Moves the cursor just past the next `needle`.
    fn skip_past(&mut self, needle: &[u8]) -> Result<(), DecodeError> {
        let found = self.rest().find(needle).ok_or_else(|| self.end_of_input())?;
        self.pos += found + needle.len();
        Ok(())
    }

    /// Skips whitespace, declarations, doctypes and comments.
    pub(crate) fn skip_trivia(&mut self) -> Result<(), DecodeError> {
        loop {
            self.skip_whitespace();
            let rest = self.rest();
            if rest.starts_with(b"<?") {
                self.skip_past(b"?>")?;
            } else if rest.starts_with(b"<!--") {
                self.pos += 4;
                self.skip_past(b"-->")?;
            } else if rest.starts_with(b"<!") {
                self.skip_past(b">")?;
            } else {
                return Ok(());
            }
        }
    }

    pub(crate) fn next_token(&mut self) -> Result<Token<'i>, DecodeError> {
        self.skip_trivia()?;
        match self.peek() {
            None => Err(self.end_of_input()),
            Some(b'<') if self.rest().get(1) == Some(&b'/') => self.close_tag(),
            Some(b'<') => self.open_tag(),
            Some(_) => self.text(),
        }
    }

    fn text(&mut self) -> Result<Token<'i>, DecodeError> {
        let start = self.pos;
        let len = self.rest().find_byte(b'<').ok_or_else(|| self.end_of_input())?;
        self.pos += len;
        let raw = &self.input[start..self.pos];
        let leading = raw.len() - raw.trim_ascii_start().len();
        Ok(Token {
            kind: TokenKind::Value,
            name: b"",
            body: raw.trim_ascii(),
            offset: start,
            body_offset: start + leading,
        })
    }

    fn close_tag(&mut self) -> Result<Token<'i>, DecodeError> {
        let start = self.pos;
        self.pos += 2;
        let len = self.rest().find_byte(b'>').ok_or_else(|| self.end_of_input())?;
        let name = self.input[self.pos..self.pos + len].trim_ascii();
        self.pos += len + 1;

        self.depth = self
            .depth
            .checked_sub(1)
            .ok_or_else(|| self.error(SyntaxError::UnbalancedClose, start))?;
        Ok(Token {
            kind: TokenKind::Close,
            name,
            body: b"",
            offset: start,
            body_offset: self.pos,
        })
    }

    fn open_tag(&mut self) -> Result<Token<'i>, DecodeError> {
        let start = self.pos;
        self.pos += 1;

        let name_start = self.pos;
        while self
            .peek()
            .is_some_and(|b| !b.is_ascii_whitespace() && b != b'>' && b != b'/')
        {
            self.pos += 1;
        }
        let name = &self.input[name_start..self.pos];
        if name.is_empty() {
            return Err(match self.peek() {
                Some(b) => self.error(SyntaxError::UnexpectedCharacter(char::from(b)), self.pos),
                None => self.end_of_input(),
            });
        }

        // Attribute values may hold `>` inside quotes.
        let body_start = self.pos;
        let mut quote = None;
        loop {
            let Some(b) = self.peek() else {
                return Err(self.end_of_input());
            };
            self.pos += 1;
            match (quote, b) {
                (None, b'>') => break,
                (None, b'"' | b'\'') => quote = Some(b),
                (Some(q), _) if q == b => quote = None,
                _ => {}
            }
        }
        let body = self.input[body_start..self.pos - 1].trim_ascii_end();

        let (kind, body) = match body.strip_suffix(b"/") {
            Some(attributes) => (TokenKind::AttributeClose, attributes),
            None if !body.trim_ascii().is_empty() => {
                self.depth += 1;
                (TokenKind::AttributeOpen, body)
            }
            None => {
                self.depth += 1;
                let mut ahead = *self;
                ahead.skip_trivia()?;
                match ahead.peek() {
                    Some(b'<') => (TokenKind::Object, body),
                    _ => (TokenKind::Label, body),
                }
            }
        };

        Ok(Token {
            kind,
            name,
            body,
            offset: start,
            body_offset: body_start,
        })
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use rstest::rstest;

    use super::*;

    fn kinds(input: &str) -> Vec<(TokenKind, &str, usize)> {
        let mut tokenizer = Tokenizer::new(input.as_bytes());
        let mut out = Vec::new();
        loop {
            match tokenizer.next_token() {
                Ok(token) => {
                    let text = if token.kind == TokenKind::Value {
                        token.body
                    } else {
                        token.name
                    };
                    let text = core::str::from_utf8(text).unwrap();
                    out.push((token.kind, text, tokenizer.depth()));
                }
                Err(_) => return out,
            }
        }
    }

    #[test]
    fn label_value_close() {
        use TokenKind::{Close, Label, Value};
        assert_eq!(
            kinds("<a> 1 </a>"),
            [(Label, "a", 1), (Value, "1", 1), (Close, "a", 0)]
        );
    }

    #[test]
    fn object_when_a_tag_follows() {
        use TokenKind::{Close, Label, Object, Value};
        assert_eq!(
            kinds("<list>\n\t<item>x y</item>\n</list>"),
            [
                (Object, "list", 1),
                (Label, "item", 2),
                (Value, "x y", 2),
                (Close, "item", 1),
                (Close, "list", 0)
            ]
        );
    }

    #[rstest]
    #[case("<a/>", TokenKind::AttributeClose, 0)]
    #[case("<a x=\"1\"/>", TokenKind::AttributeClose, 0)]
    #[case("<a x='1' />", TokenKind::AttributeClose, 0)]
    #[case("<a x=\"1\">", TokenKind::AttributeOpen, 1)]
    #[case("<a x=\"1>2\">", TokenKind::AttributeOpen, 1)]
    fn attribute_tags(#[case] input: &str, #[case] kind: TokenKind, #[case] depth: usize) {
        let mut tokenizer = Tokenizer::new(input.as_bytes());
        let token = tokenizer.next_token().unwrap();
        assert_eq!(token.kind, kind);
        assert_eq!(token.name, b"a");
        assert_eq!(tokenizer.depth(), depth);
        assert_eq!(tokenizer.pos(), input.len());
    }

    #[test]
    fn ascii_whitespace_is_trimmed() {
        let input = b"<a x=\"1\"\t >\n\t text \r\n</ a >";
        let mut tokenizer = Tokenizer::new(input);
        let open = tokenizer.next_token().unwrap();
        assert_eq!(open.body, b" x=\"1\"");
        let text = tokenizer.next_token().unwrap();
        assert_eq!(text.body, b"text");
        assert_eq!(&input[text.body_offset..text.body_offset + 4], b"text");
        let close = tokenizer.next_token().unwrap();
        assert_eq!((close.kind, close.name), (TokenKind::Close, &b"a"[..]));
    }

    #[test]
    fn quoted_gt_stays_in_body() {
        let mut tokenizer = Tokenizer::new(br#"<a x="1>2" y='z'>"#);
        let token = tokenizer.next_token().unwrap();
        assert_eq!(token.body, br#" x="1>2" y='z'"#);
    }

    #[test]
    fn trivia_is_skipped_everywhere() {
        use TokenKind::{Close, Label, Value};
        assert_eq!(
            kinds("<?xml version=\"1.0\"?>\n<!DOCTYPE a>\n<!-- <b> -->\n<a><!-- c -->1</a>"),
            [(Label, "a", 1), (Value, "1", 1), (Close, "a", 0)]
        );
    }

    #[test]
    fn unbalanced_close() {
        let err = Tokenizer::new(b"</a>").next_token().unwrap_err();
        assert_eq!(err.syntax(), Some(&SyntaxError::UnbalancedClose));
    }

    #[rstest]
    #[case("<a")]
    #[case("<a x=\"1")]
    #[case("<a>text")]
    #[case("</a")]
    #[case("<!-- open")]
    fn truncated_input(#[case] input: &str) {
        let mut tokenizer = Tokenizer::new(input.as_bytes());
        let err = loop {
            if let Err(err) = tokenizer.next_token() {
                break err;
            }
        };
        assert_eq!(err.syntax(), Some(&SyntaxError::UnexpectedEndOfInput));
    }

    #[test]
    fn snapshot_copy_does_not_move_the_original() {
        let mut tokenizer = Tokenizer::new(b"<a><b>1</b></a>");
        tokenizer.next_token().unwrap();
        let mut ahead = tokenizer;
        ahead.next_token().unwrap();
        ahead.next_token().unwrap();
        assert_eq!(tokenizer.depth(), 1);
        assert_eq!(tokenizer.next_token().unwrap().name, b"b");
    }
}
