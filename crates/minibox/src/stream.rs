use alloc::string::String;
use core::{ffi::CStr, fmt};

use bstr::{BStr, ByteSlice};

use crate::{Store, StoreError, number};

/// An append-only byte accumulator.
///
/// Both encoders write into a `ByteStream`, and [`ByteStream::load`] reads a
/// whole file into one. Once [`finalize`](ByteStream::finalize)d the stream
/// carries a trailing NUL, its capacity equals its size and every append fails
/// with [`StoreError::Finalized`].
///
/// ```rust
/// use minibox::{ByteStream, StoreError};
///
/// let mut s = ByteStream::new()?;
/// s.open_hierarchy(b'{', 1)?;
/// s.append_quoted("k", b'"')?;
/// s.append_str(" : ")?;
/// s.append_number(2.5)?;
/// s.close_hierarchy(b'}', 0)?;
/// s.finalize()?;
///
/// assert_eq!(s.as_bytes(), b"{\n\t\"k\" : 2.5\n}");
/// assert_eq!(s.append_byte(b'x'), Err(StoreError::Finalized));
/// # Ok::<(), StoreError>(())
/// ```
#[derive(Clone, PartialEq)]
pub struct ByteStream {
    store: Store<u8>,
}

impl ByteStream {
    /// # Errors
    ///
    /// [`StoreError::OutOfMemory`] if the initial buffer cannot be reserved.
    pub fn new() -> Result<Self, StoreError> {
        Ok(Self {
            store: Store::new()?,
        })
    }

    /// Number of content bytes, not counting the terminator added by
    /// [`finalize`](ByteStream::finalize).
    #[must_use]
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    #[must_use]
    pub fn is_finalized(&self) -> bool {
        self.store.is_finalized()
    }

    /// Reserves room for `extra` bytes in a single growth step.
    fn reserve(&mut self, extra: usize) -> Result<(), StoreError> {
        if self.store.is_finalized() {
            return Err(StoreError::Finalized);
        }
        self.store.grow(extra)
    }

    fn push_repeated(&mut self, byte: u8, count: usize) -> Result<(), StoreError> {
        for _ in 0..count {
            self.store.push(byte)?;
        }
        Ok(())
    }

    /// # Errors
    ///
    /// [`StoreError::Finalized`] after [`finalize`](ByteStream::finalize), or a
    /// growth failure.
    pub fn append(&mut self, bytes: &[u8]) -> Result<(), StoreError> {
        self.reserve(bytes.len())?;
        self.store.extend_from_slice(bytes)
    }

    /// # Errors
    ///
    /// See [`append`](ByteStream::append).
    pub fn append_str(&mut self, text: &str) -> Result<(), StoreError> {
        self.append(text.as_bytes())
    }

    /// # Errors
    ///
    /// See [`append`](ByteStream::append).
    pub fn append_byte(&mut self, byte: u8) -> Result<(), StoreError> {
        self.reserve(1)?;
        self.store.push(byte)
    }

    /// Appends a number in the shared codec notation: integral values without
    /// a fraction, others with up to six decimals and trailing zeros dropped.
    ///
    /// # Errors
    ///
    /// See [`append`](ByteStream::append).
    pub fn append_number(&mut self, value: f64) -> Result<(), StoreError> {
        let mut text = String::new();
        number::format(value, &mut text);
        self.append_str(&text)
    }

    /// Appends `text` between two `quote` bytes. Nothing inside is escaped.
    ///
    /// # Errors
    ///
    /// See [`append`](ByteStream::append).
    pub fn append_quoted(&mut self, text: &str, quote: u8) -> Result<(), StoreError> {
        self.reserve(text.len() + 2)?;
        self.store.push(quote)?;
        self.store.extend_from_slice(text.as_bytes())?;
        self.store.push(quote)
    }

    /// Appends a newline followed by `level` tabs.
    ///
    /// # Errors
    ///
    /// See [`append`](ByteStream::append).
    pub fn paragraph(&mut self, level: usize) -> Result<(), StoreError> {
        self.reserve(level + 1)?;
        self.store.push(b'\n')?;
        self.push_repeated(b'\t', level)
    }

    /// Appends `symbol`, then a newline and `level` tabs.
    ///
    /// # Errors
    ///
    /// See [`append`](ByteStream::append).
    pub fn open_hierarchy(&mut self, symbol: u8, level: usize) -> Result<(), StoreError> {
        self.reserve(level + 2)?;
        self.store.push(symbol)?;
        self.store.push(b'\n')?;
        self.push_repeated(b'\t', level)
    }

    /// Appends a newline and `level` tabs, then `symbol`.
    ///
    /// # Errors
    ///
    /// See [`append`](ByteStream::append).
    pub fn close_hierarchy(&mut self, symbol: u8, level: usize) -> Result<(), StoreError> {
        self.reserve(level + 2)?;
        self.store.push(b'\n')?;
        self.push_repeated(b'\t', level)?;
        self.store.push(symbol)
    }

    /// Writes the NUL terminator and freezes the capacity at the new size.
    ///
    /// Finalizing twice is a no-op.
    ///
    /// # Errors
    ///
    /// Fails only if there is no room for the terminator and the buffer cannot
    /// grow.
    pub fn finalize(&mut self) -> Result<(), StoreError> {
        if self.store.is_finalized() {
            return Ok(());
        }
        self.store.push(0)?;
        self.store.finalize();
        Ok(())
    }

    /// The content, without the terminator.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        let bytes = self.store.as_slice();
        match bytes.split_last() {
            Some((&0, content)) if self.store.is_finalized() => content,
            _ => bytes,
        }
    }

    #[must_use]
    pub fn as_bstr(&self) -> &BStr {
        self.as_bytes().as_bstr()
    }

    /// The content as text.
    ///
    /// # Errors
    ///
    /// Fails if the content is not valid UTF-8.
    pub fn to_str(&self) -> Result<&str, core::str::Utf8Error> {
        core::str::from_utf8(self.as_bytes())
    }

    /// The NUL-terminated content. `None` before
    /// [`finalize`](ByteStream::finalize) or when the content itself holds a
    /// NUL byte.
    #[must_use]
    pub fn as_c_str(&self) -> Option<&CStr> {
        if !self.store.is_finalized() {
            return None;
        }
        CStr::from_bytes_with_nul(self.store.as_slice()).ok()
    }
}

#[cfg(feature = "std")]
impl ByteStream {
    /// Reads a whole file into a finalized stream.
    ///
    /// The buffer is sized to the file length plus the terminator, so loading
    /// allocates once.
    ///
    /// # Errors
    ///
    /// [`Error::Io`](crate::Error::Io) if the file cannot be opened or read,
    /// [`Error::Store`](crate::Error::Store) if the buffer cannot be reserved.
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, crate::Error> {
        use std::io::Read;

        let path = path.as_ref();
        let mut file = std::fs::File::open(path)?;
        let size = usize::try_from(file.metadata()?.len())
            .map_err(|_| StoreError::CapacityOverflow)?;
        let reserve = size.checked_add(1).ok_or(StoreError::CapacityOverflow)?;

        let mut bytes = alloc::vec::Vec::new();
        bytes
            .try_reserve_exact(reserve)
            .map_err(|_| StoreError::OutOfMemory { requested: reserve })?;
        file.read_to_end(&mut bytes)?;

        let mut stream = Self {
            store: Store::from_vec(bytes),
        };
        stream.finalize()?;
        debug!("loaded {} bytes from {}", stream.len(), path.display());
        Ok(stream)
    }

    /// Writes the content, without the terminator, to `path`, creating or
    /// truncating the file.
    ///
    /// # Errors
    ///
    /// [`Error::Io`](crate::Error::Io) if the file cannot be created or
    /// written.
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> Result<(), crate::Error> {
        let path = path.as_ref();
        std::fs::write(path, self.as_bytes())?;
        debug!("saved {} bytes to {}", self.len(), path.display());
        Ok(())
    }
}

impl fmt::Display for ByteStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_bstr(), f)
    }
}

impl fmt::Debug for ByteStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_bstr(), f)
    }
}

impl AsRef<[u8]> for ByteStream {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}
