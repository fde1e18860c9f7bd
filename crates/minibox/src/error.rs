use alloc::string::String;

use thiserror::Error;

/// Failure reported by a [`Store`](crate::Store) or a container built on one.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    #[error("could not reserve room for {requested} slots")]
    OutOfMemory { requested: usize },
    #[error("store is finalized and cannot grow")]
    Finalized,
    #[error("capacity overflow")]
    CapacityOverflow,
    #[error("index {index} out of bounds for length {len}")]
    OutOfBounds { index: usize, len: usize },
}

/// A decode that could not complete.
///
/// `line` and `column` are 1-based; `offset` is the byte position in the input
/// where the decoder gave up.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{source} at {line}:{column}")]
pub struct DecodeError {
    pub(crate) source: ErrorSource,
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl DecodeError {
    pub(crate) fn new(source: impl Into<ErrorSource>, input: &[u8], offset: usize) -> Self {
        let offset = offset.min(input.len());
        let consumed = &input[..offset];
        let line = 1 + consumed.iter().filter(|&&b| b == b'\n').count();
        let column = 1 + consumed
            .iter()
            .rev()
            .take_while(|&&b| b != b'\n')
            .count();
        Self {
            source: source.into(),
            line,
            column,
            offset,
        }
    }

    /// What went wrong, without the position.
    #[must_use]
    pub fn kind(&self) -> &ErrorSource {
        &self.source
    }

    /// The syntax error, if this failure was not an allocation failure.
    #[must_use]
    pub fn syntax(&self) -> Option<&SyntaxError> {
        match &self.source {
            ErrorSource::Syntax(e) => Some(e),
            ErrorSource::Store(_) => None,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorSource {
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    #[error("invalid character '{0}'")]
    UnexpectedCharacter(char),
    #[error("invalid number")]
    InvalidNumber,
    #[error("invalid literal")]
    InvalidLiteral,
    #[error("invalid UTF-8")]
    InvalidUtf8,
    #[error("value has no key")]
    MissingKey,
    #[error("nesting deeper than {0} levels")]
    DepthLimitExceeded(usize),
    #[error("close tag without a matching open tag")]
    UnbalancedClose,
    #[error("expected </{expected}>, found </{found}>")]
    MismatchedClose { expected: String, found: String },
    #[error("malformed attribute")]
    MalformedAttribute,
    #[error("document does not start with a container")]
    UnexpectedRoot,
}

/// Failure of a file-level operation.
#[cfg(feature = "std")]
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
