//! Byte sinks for the write pass of encoding
//!
//! [`Target`] plays the role of [`std::io::Write`] for encoders, with the
//! difference that every push is infallible and total: the returned `usize`
//! is book-keeping for the caller, never a signal of partial success.
//!
//! Two implementors are provided. `Vec<u8>` is the ordinary destination, and
//! [`ByteCounter`] discards everything it is given, which makes it possible
//! to run a write procedure purely to count bytes and compare the result
//! against the corresponding size expression.

/// Append-only byte buffer targeted by encoders
pub trait Target {
    /// Returns a fresh object of the `Self` type with an initially empty buffer.
    fn create() -> Self;

    /// Reserves room for at least `extra` more bytes.
    ///
    /// Called once with the exact size computed by the size pass, before any
    /// byte is written. Implementors without a notion of capacity may ignore it.
    fn anticipate(&mut self, extra: usize);

    /// Appends a single byte. The return value must be `1`.
    fn push_one(&mut self, b: u8) -> usize;

    /// Appends every byte of `buf` in order, returning `buf.len()`.
    fn push_all(&mut self, buf: &[u8]) -> usize;
}

/// Alias for `std::io::Sink` used as a zero-allocation [`Target`] that only
/// counts the bytes written to it.
pub type ByteCounter = std::io::Sink;

impl Target for ByteCounter {
    #[inline]
    fn create() -> Self {
        std::io::sink()
    }

    #[inline(always)]
    fn anticipate(&mut self, _: usize) {}

    #[inline(always)]
    fn push_one(&mut self, _: u8) -> usize {
        1
    }

    #[inline(always)]
    fn push_all(&mut self, buf: &[u8]) -> usize {
        buf.len()
    }
}

impl Target for Vec<u8> {
    #[inline]
    #[must_use]
    fn create() -> Self {
        Self::new()
    }

    #[inline]
    fn anticipate(&mut self, extra: usize) {
        self.reserve(extra)
    }

    #[inline]
    fn push_one(&mut self, b: u8) -> usize {
        self.push(b);
        1
    }

    #[inline]
    fn push_all(&mut self, buf: &[u8]) -> usize {
        self.extend_from_slice(buf);
        buf.len()
    }
}
