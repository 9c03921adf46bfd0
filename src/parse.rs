//! Non-backtracking RLP parser with context windows
//!
//! [`ByteParser`] walks an immutable byte slice from front to back. A byte
//! can only be looked at by consuming it (the single exception being
//! [`peek_byte`](ByteParser::peek_byte), which RLP needs to tell a lone byte
//! from a header), and once consumed it is never seen again.
//!
//! # Context windows
//!
//! Decoding a list opens a *context window*: a temporary limit on the offset,
//! set to the end of the list payload as declared by its header. While the
//! window is open, no read may cross that limit, and the window can only be
//! closed once every byte inside it has been consumed. Windows nest exactly
//! like RLP lists do, so a decoder that reads the fields of a record between
//! [`open_list`](ByteParser::open_list) and
//! [`close_list`](ByteParser::close_list) gets length-consistency and
//! trailing-byte detection for free.

use num_bigint::{BigInt, BigUint};

use crate::error::{DecodeError, DecodeResult, Kind};
use crate::header::{
    Header, EMPTY_LIST_CODE, EMPTY_STRING_CODE, LONG_LIST_OFFSET, LONG_STRING_OFFSET, SHORT_LIMIT,
};

/// Cursor over an RLP-encoded byte slice
#[derive(Debug, Clone)]
pub struct ByteParser<'a> {
    buf: &'a [u8],
    offset: usize,
    windows: Vec<usize>,
}

impl<'a> ByteParser<'a> {
    #[must_use]
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            offset: 0,
            windows: Vec::new(),
        }
    }

    /// Number of bytes consumed so far.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    fn limit(&self) -> usize {
        self.windows.last().copied().unwrap_or(self.buf.len())
    }

    /// Number of bytes that can still be consumed in the current window.
    #[must_use]
    pub fn remainder(&self) -> usize {
        self.limit() - self.offset
    }

    /// Returns `true` when the innermost window (or the whole input, if no
    /// window is open) has been fully consumed.
    #[must_use]
    pub fn at_window_end(&self) -> bool {
        self.remainder() == 0
    }

    /// Returns the next byte without consuming it.
    pub fn peek_byte(&self) -> DecodeResult<u8> {
        if self.remainder() == 0 {
            return Err(self.overrun(1));
        }
        Ok(self.buf[self.offset])
    }

    /// Consumes and returns exactly `nbytes` bytes.
    pub fn consume(&mut self, nbytes: usize) -> DecodeResult<&'a [u8]> {
        if nbytes > self.remainder() {
            return Err(self.overrun(nbytes));
        }
        let start = self.offset;
        self.offset += nbytes;
        Ok(&self.buf[start..self.offset])
    }

    /// Consumes and returns a single byte.
    pub fn consume_byte(&mut self) -> DecodeResult<u8> {
        let b = self.peek_byte()?;
        self.offset += 1;
        Ok(b)
    }

    fn overrun(&self, requested: usize) -> DecodeError {
        DecodeError::Overrun {
            offset: self.offset,
            requested,
            limit: self.limit(),
        }
    }

    fn set_fit(&mut self, n: usize) -> DecodeResult<()> {
        if n > self.remainder() {
            return Err(self.overrun(n));
        }
        self.windows.push(self.offset + n);
        Ok(())
    }

    fn enforce_target(&mut self) -> DecodeResult<()> {
        if self.windows.is_empty() {
            return Err(DecodeError::NoOpenList);
        }
        let residual = self.remainder();
        if residual != 0 {
            return Err(DecodeError::TrailingBytes { residual });
        }
        self.windows.pop();
        Ok(())
    }

    /// Reads the header of the next item, enforcing canonical form.
    ///
    /// A lone byte below `0x80` is its own encoding; in that case a string
    /// header with a one-byte payload is returned and nothing is consumed, so
    /// that the byte is read back as the payload.
    pub fn take_header(&mut self) -> DecodeResult<Header> {
        let b = self.peek_byte()?;
        if b < EMPTY_STRING_CODE {
            return Ok(Header::string(1));
        }
        self.offset += 1;
        let header = match b {
            0x80..=0xb7 => {
                let len = usize::from(b - EMPTY_STRING_CODE);
                if len == 1 {
                    let next = self.peek_byte()?;
                    if next < EMPTY_STRING_CODE {
                        return Err(DecodeError::NonCanonicalSingleByte(next));
                    }
                }
                Header::string(len)
            }
            0xb8..=0xbf => Header::string(self.take_long_size(b - LONG_STRING_OFFSET)?),
            0xc0..=0xf7 => Header::list(usize::from(b - EMPTY_LIST_CODE)),
            0xf8..=0xff => Header::list(self.take_long_size(b - LONG_LIST_OFFSET)?),
            _ => unreachable!("bytes below 0x80 are handled above"),
        };
        Ok(header)
    }

    fn take_long_size(&mut self, lenlen: u8) -> DecodeResult<usize> {
        let lenlen = usize::from(lenlen);
        let bytes = self.consume(lenlen)?;
        if bytes[0] == 0 {
            return Err(DecodeError::NonCanonicalSize);
        }
        if lenlen > std::mem::size_of::<usize>() {
            return Err(DecodeError::LengthOverflow);
        }
        let len = bytes
            .iter()
            .fold(0usize, |acc, &b| (acc << 8) | usize::from(b));
        if len <= SHORT_LIMIT {
            return Err(DecodeError::NonCanonicalSize);
        }
        Ok(len)
    }

    fn expect_kind(header: Header, expected: Kind) -> DecodeResult<Header> {
        if header.kind() != expected {
            return Err(DecodeError::UnexpectedKind {
                expected,
                found: header.kind(),
            });
        }
        Ok(header)
    }

    /// Reads one byte-string item and returns its contents.
    pub fn take_bytes(&mut self) -> DecodeResult<&'a [u8]> {
        let header = Self::expect_kind(self.take_header()?, Kind::String)?;
        self.consume(header.payload_len)
    }

    /// Reads one byte-string item of exactly `N` bytes.
    pub fn take_array<const N: usize>(&mut self) -> DecodeResult<[u8; N]> {
        let bytes = self.take_bytes()?;
        <[u8; N]>::try_from(bytes).map_err(|_| DecodeError::WrongLength {
            exact: N,
            actual: bytes.len(),
        })
    }

    /// Reads one byte-string item holding UTF-8 text.
    pub fn take_string(&mut self) -> DecodeResult<String> {
        let bytes = self.take_bytes()?;
        String::from_utf8(bytes.to_vec()).map_err(|_| DecodeError::InvalidUtf8)
    }

    /// Reads the minimal big-endian contents of an integer item, rejecting
    /// leading zeros and contents longer than `max_bytes`.
    fn take_int_bytes(&mut self, max_bytes: usize) -> DecodeResult<&'a [u8]> {
        let bytes = self.take_bytes()?;
        if bytes.first() == Some(&0) {
            return Err(DecodeError::LeadingZero);
        }
        if bytes.len() > max_bytes {
            return Err(DecodeError::Overflow {
                bits: (max_bytes * 8) as u32,
            });
        }
        Ok(bytes)
    }

    /// Reads a canonical unsigned integer that must fit in `T`.
    ///
    /// `T` is expected to be one of the primitive unsigned integer types.
    pub fn take_uint<T: TryFrom<u128>>(&mut self) -> DecodeResult<T> {
        let width = std::mem::size_of::<T>().min(16);
        let bytes = self.take_int_bytes(width)?;
        let value = bytes
            .iter()
            .fold(0u128, |acc, &b| (acc << 8) | u128::from(b));
        T::try_from(value).map_err(|_| DecodeError::Overflow {
            bits: (width * 8) as u32,
        })
    }

    /// Reads a boolean, encoded as the integer `0` (`0x80`) or `1` (`0x01`).
    pub fn take_bool(&mut self) -> DecodeResult<bool> {
        match self.peek_byte()? {
            EMPTY_STRING_CODE => {
                self.offset += 1;
                Ok(false)
            }
            0x01 => {
                self.offset += 1;
                Ok(true)
            }
            other => Err(DecodeError::InvalidBoolean(other)),
        }
    }

    /// Reads a canonical arbitrary-precision unsigned integer.
    pub fn take_biguint(&mut self) -> DecodeResult<BigUint> {
        let bytes = self.take_int_bytes(usize::MAX)?;
        Ok(BigUint::from_bytes_be(bytes))
    }

    /// Reads a canonical arbitrary-precision integer; the wire format only
    /// carries non-negative values.
    pub fn take_bigint(&mut self) -> DecodeResult<BigInt> {
        self.take_biguint().map(BigInt::from)
    }

    /// Reads one complete item, header included, without interpreting it.
    pub fn take_raw(&mut self) -> DecodeResult<&'a [u8]> {
        let start = self.offset;
        let header = self.take_header()?;
        self.consume(header.payload_len)?;
        Ok(&self.buf[start..self.offset])
    }

    /// Consumes the next item if it is the empty item of the given kind
    /// (`0x80` or `0xc0`), returning whether it did.
    pub fn take_empty(&mut self, kind: Kind) -> DecodeResult<bool> {
        let empty = match kind {
            Kind::String => EMPTY_STRING_CODE,
            Kind::List => EMPTY_LIST_CODE,
        };
        if self.peek_byte()? == empty {
            self.offset += 1;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Reads a list header and opens a context window over its payload,
    /// returning the payload length.
    pub fn open_list(&mut self) -> DecodeResult<usize> {
        let header = Self::expect_kind(self.take_header()?, Kind::List)?;
        self.set_fit(header.payload_len)?;
        Ok(header.payload_len)
    }

    /// Closes the innermost list, failing if any of its payload is unread.
    pub fn close_list(&mut self) -> DecodeResult<()> {
        self.enforce_target()
    }

    /// Checks that the whole input has been consumed.
    pub fn finish(&self) -> DecodeResult<()> {
        if !self.windows.is_empty() {
            return Err(DecodeError::TrailingBytes {
                residual: self.remainder(),
            });
        }
        match self.remainder() {
            0 => Ok(()),
            residual => Err(DecodeError::LeftoverInput { residual }),
        }
    }
}
