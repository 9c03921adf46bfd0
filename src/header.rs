//! RLP item headers
//!
//! Every RLP item except a lone byte below `0x80` starts with a header that
//! records its kind and payload length:
//!
//! | payload            | string header              | list header                |
//! |--------------------|----------------------------|----------------------------|
//! | `0..=55` bytes     | `0x80 + len`               | `0xc0 + len`               |
//! | `56..` bytes       | `0xb7 + lenlen`, `len` (BE)| `0xf7 + lenlen`, `len` (BE)|
//!
//! where `len` is written in its minimal big-endian form and `lenlen` is the
//! number of bytes that form occupies. Reading headers back, with the
//! matching canonical-form checks, is the job of
//! [`ByteParser::take_header`](crate::parse::ByteParser::take_header).

use crate::error::Kind;
use crate::target::Target;

/// Header byte of the empty byte-string, also the encoding of integer zero
pub const EMPTY_STRING_CODE: u8 = 0x80;

/// Header byte of the empty list
pub const EMPTY_LIST_CODE: u8 = 0xc0;

/// Largest payload length that fits in a single-byte header
pub const SHORT_LIMIT: usize = 55;

/// Offset of long-form string headers (`0xb7 + lenlen`)
pub(crate) const LONG_STRING_OFFSET: u8 = 0xb7;

/// Offset of long-form list headers (`0xf7 + lenlen`)
pub(crate) const LONG_LIST_OFFSET: u8 = 0xf7;

/// Decoded or to-be-written header of one RLP item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// `true` for lists, `false` for byte-strings
    pub list: bool,
    /// Number of payload bytes following the header
    pub payload_len: usize,
}

impl Header {
    #[must_use]
    pub const fn string(payload_len: usize) -> Self {
        Self {
            list: false,
            payload_len,
        }
    }

    #[must_use]
    pub const fn list(payload_len: usize) -> Self {
        Self {
            list: true,
            payload_len,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> Kind {
        if self.list {
            Kind::List
        } else {
            Kind::String
        }
    }

    /// Number of bytes this header occupies on the wire.
    #[must_use]
    pub const fn len(&self) -> usize {
        if self.payload_len <= SHORT_LIMIT {
            1
        } else {
            1 + length_of_length(self.payload_len)
        }
    }

    /// Headers are never zero-width; provided for symmetry with [`len`](Self::len).
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Writes this header, returning the number of bytes written.
    pub fn write_to<U: Target>(&self, buf: &mut U) -> usize {
        let (short, long) = if self.list {
            (EMPTY_LIST_CODE, LONG_LIST_OFFSET)
        } else {
            (EMPTY_STRING_CODE, LONG_STRING_OFFSET)
        };
        if self.payload_len <= SHORT_LIMIT {
            buf.push_one(short + self.payload_len as u8)
        } else {
            let be = self.payload_len.to_be_bytes();
            let lenlen = length_of_length(self.payload_len);
            buf.push_one(long + lenlen as u8) + buf.push_all(&be[be.len() - lenlen..])
        }
    }
}

/// Number of bytes in the minimal big-endian form of `n`.
///
/// Zero has an empty minimal form.
#[must_use]
pub const fn length_of_length(n: usize) -> usize {
    std::mem::size_of::<usize>() - (n.leading_zeros() / 8) as usize
}

/// Full encoded length of a list whose payload is `payload_len` bytes.
#[must_use]
pub const fn list_len(payload_len: usize) -> usize {
    Header::list(payload_len).len() + payload_len
}

/// Full encoded length of a byte-string item with `payload_len` bytes of
/// content, for contents other than a lone byte below `0x80`.
#[must_use]
pub const fn string_len(payload_len: usize) -> usize {
    Header::string(payload_len).len() + payload_len
}

/// Payload lengths of the nested lists of one value
///
/// A sizing pass records them in the order their headers are written, and
/// the write pass reads them back in that same order, so that every nested
/// payload is measured once.
#[derive(Debug, Clone, Default)]
pub struct ListSizes {
    lens: Vec<usize>,
    read: usize,
}

impl ListSizes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves the slot of a list whose payload is still being measured.
    pub fn reserve(&mut self) -> usize {
        self.lens.push(0);
        self.lens.len() - 1
    }

    pub fn fill(&mut self, slot: usize, payload_len: usize) {
        self.lens[slot] = payload_len;
    }

    /// Returns the next recorded payload length.
    ///
    /// # Panics
    ///
    /// When more lengths are read than were reserved.
    pub fn next_len(&mut self) -> usize {
        let len = self.lens[self.read];
        self.read += 1;
        len
    }
}
