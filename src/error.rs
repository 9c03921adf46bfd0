//! Runtime error types
//!
//! This module contains the two error types that the encode/decode runtime
//! can produce, and that generated routines pass back to their callers:
//!
//!   * [`DecodeError`] covers every way an input byte-sequence can fail to be
//!     a canonical RLP encoding of the expected shape.
//!   * [`EncodeError`] covers the (rare) values that have no RLP encoding at all.
//!
//! Neither type carries borrowed data, so both can cross thread boundaries
//! freely.

use std::error::Error;
use std::fmt::{Display, Formatter, Result};

/// The two kinds of RLP item, as distinguished by the first byte of their header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Byte-string item (header byte below `0xc0`)
    String,
    /// List item (header byte at or above `0xc0`)
    List,
}

impl Display for Kind {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Kind::String => f.write_str("string"),
            Kind::List => f.write_str("list"),
        }
    }
}

/// Enumeration over every structural failure that can occur when decoding
/// an RLP byte-sequence into a typed value.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    /// Attempted to read past the end of the input or the innermost open list.
    Overrun {
        offset: usize,
        requested: usize,
        limit: usize,
    },
    /// Found an item of one kind where the other kind was required.
    UnexpectedKind { expected: Kind, found: Kind },
    /// A header whose length could have been written in a shorter form.
    NonCanonicalSize,
    /// A single byte below `0x80` wrapped in a one-byte string header.
    NonCanonicalSingleByte(u8),
    /// An integer encoding with leading zero bytes.
    LeadingZero,
    /// An integer that does not fit in the target width.
    Overflow { bits: u32 },
    /// A fixed-length value whose encoded length does not match.
    WrongLength { exact: usize, actual: usize },
    /// A boolean encoding other than `0x80` or `0x01`.
    InvalidBoolean(u8),
    /// A string item that is not valid UTF-8.
    InvalidUtf8,
    /// A declared length that does not fit in a `usize`.
    LengthOverflow,
    /// A list closed with bytes of its payload left unread.
    TrailingBytes { residual: usize },
    /// Input left over after the outermost item was decoded.
    LeftoverInput { residual: usize },
    /// Closing a list when no list is open.
    NoOpenList,
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            DecodeError::Overrun {
                offset,
                requested,
                limit,
            } => write!(
                f,
                "cannot read {requested} bytes at offset {offset} (limit is {limit})"
            ),
            DecodeError::UnexpectedKind { expected, found } => {
                write!(f, "expected {expected} item, found {found}")
            }
            DecodeError::NonCanonicalSize => write!(f, "non-canonical size information"),
            DecodeError::NonCanonicalSingleByte(b) => {
                write!(f, "byte 0x{b:02x} must be encoded as itself, not as a string")
            }
            DecodeError::LeadingZero => write!(f, "integer encoding has leading zero bytes"),
            DecodeError::Overflow { bits } => {
                write!(f, "integer does not fit in {bits} bits")
            }
            DecodeError::WrongLength { exact, actual } => {
                write!(f, "expected exactly {exact} elements or bytes, found {actual}")
            }
            DecodeError::InvalidBoolean(b) => {
                write!(f, "expected boolean := (0x80 | 0x01), got 0x{b:02x}")
            }
            DecodeError::InvalidUtf8 => write!(f, "string item is not valid UTF-8"),
            DecodeError::LengthOverflow => write!(f, "declared length overflows usize"),
            DecodeError::TrailingBytes { residual } => {
                write!(f, "list closed with {residual} unread payload bytes")
            }
            DecodeError::LeftoverInput { residual } => {
                write!(f, "{residual} bytes of input left after the value")
            }
            DecodeError::NoOpenList => write!(f, "no open list to close"),
        }
    }
}

impl Error for DecodeError {}

/// Type alias for results of decoding operations
pub type DecodeResult<T> = std::result::Result<T, DecodeError>;

/// Errors produced when a value has no RLP encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EncodeError {
    /// Arbitrary-precision integers must be non-negative.
    NegativeInteger,
    /// A dynamic value did not match the shape of the IR node encoding it.
    ShapeMismatch { expected: &'static str },
    /// A dynamic integer exceeded the declared width of its IR node.
    Overflow { bits: u32 },
    /// A dynamic byte-array or list value had the wrong fixed length.
    WrongLength { exact: usize, actual: usize },
}

impl Display for EncodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            EncodeError::NegativeInteger => {
                write!(f, "cannot encode negative big integer")
            }
            EncodeError::ShapeMismatch { expected } => {
                write!(f, "value does not match IR node (expected {expected})")
            }
            EncodeError::Overflow { bits } => {
                write!(f, "integer value does not fit in {bits} bits")
            }
            EncodeError::WrongLength { exact, actual } => {
                write!(f, "expected exactly {exact} elements or bytes, found {actual}")
            }
        }
    }
}

impl Error for EncodeError {}

/// Type alias for results of encoding operations
pub type EncodeResult<T> = std::result::Result<T, EncodeError>;
