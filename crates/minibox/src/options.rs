/// Knobs shared by the JSON and XML decoders.
///
/// # Examples
///
/// ```rust
/// use minibox::{DecodeOptions, json};
///
/// let options = DecodeOptions {
///     strict_literals: true,
///     ..Default::default()
/// };
/// assert!(json::decode_with(br#"{"a": tru}"#, options).is_err());
/// assert!(json::decode(br#"{"a": tru}"#).is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Deepest container nesting accepted before the decoder gives up with
    /// [`SyntaxError::DepthLimitExceeded`](crate::SyntaxError::DepthLimitExceeded).
    ///
    /// The root container counts as depth 1.
    ///
    /// # Default
    ///
    /// `128`
    pub max_depth: usize,

    /// Whether `true`, `false` and `null` must be spelled out in full.
    ///
    /// By default only the first letter of a bare word is looked at, so
    /// `tru` and `nope` decode as `true` and `null`. Strict mode rejects any
    /// other spelling with
    /// [`SyntaxError::InvalidLiteral`](crate::SyntaxError::InvalidLiteral).
    /// The XML decoder ignores this option.
    ///
    /// # Default
    ///
    /// `false`
    pub strict_literals: bool,
}

impl DecodeOptions {
    pub const DEFAULT_MAX_DEPTH: usize = 128;
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            strict_literals: false,
        }
    }
}
