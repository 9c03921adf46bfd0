//! Size and write primitives for the scalar kinds
//!
//! Each scalar kind supported by the generator has a pair of functions here:
//! a `*_len` function computing the full encoded length of a value (header
//! included), and a `write_*` function appending that exact number of bytes
//! to a [`Target`]. Generated encoders are sequences of calls to these
//! pairs, and the IR interpreter in [`crate::gen::eval`] calls the same ones,
//! so the wire format of each scalar is defined exactly once.
//!
//! Integers, fixed-width or not, use the minimal big-endian form: no leading
//! zero bytes, with zero itself being the empty string `0x80`.

use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;

use crate::error::{EncodeError, EncodeResult, Kind};
use crate::header::{string_len, Header, EMPTY_LIST_CODE, EMPTY_STRING_CODE};
use crate::target::Target;

#[inline]
fn int_len(bits: u64) -> usize {
    if bits <= 7 {
        1
    } else {
        string_len(Integer::div_ceil(&bits, &8) as usize)
    }
}

/// Encoded length of an unsigned integer of any primitive width.
#[inline]
#[must_use]
pub fn uint_len(v: u128) -> usize {
    int_len(u64::from(128 - v.leading_zeros()))
}

/// Writes an unsigned integer in minimal big-endian form.
pub fn write_uint<U: Target>(buf: &mut U, v: u128) -> usize {
    match v {
        0 => buf.push_one(EMPTY_STRING_CODE),
        1..=0x7f => buf.push_one(v as u8),
        _ => {
            let be = v.to_be_bytes();
            let skip = (v.leading_zeros() / 8) as usize;
            let contents = &be[skip..];
            Header::string(contents.len()).write_to(buf) + buf.push_all(contents)
        }
    }
}

/// Booleans are the integers `0` and `1`, so always one byte.
#[inline]
#[must_use]
pub const fn bool_len(_: bool) -> usize {
    1
}

pub fn write_bool<U: Target>(buf: &mut U, b: bool) -> usize {
    buf.push_one(if b { 0x01 } else { EMPTY_STRING_CODE })
}

/// Encoded length of a byte-string item.
#[inline]
#[must_use]
pub fn bytes_len(b: &[u8]) -> usize {
    match b {
        [single] if *single < EMPTY_STRING_CODE => 1,
        _ => string_len(b.len()),
    }
}

/// Writes a byte-string item; a lone byte below `0x80` is written as itself.
pub fn write_bytes<U: Target>(buf: &mut U, b: &[u8]) -> usize {
    match b {
        [single] if *single < EMPTY_STRING_CODE => buf.push_one(*single),
        _ => Header::string(b.len()).write_to(buf) + buf.push_all(b),
    }
}

#[inline]
#[must_use]
pub fn str_len(s: &str) -> usize {
    bytes_len(s.as_bytes())
}

pub fn write_str<U: Target>(buf: &mut U, s: &str) -> usize {
    write_bytes(buf, s.as_bytes())
}

#[inline]
#[must_use]
pub fn big_len(v: &BigUint) -> usize {
    int_len(v.bits())
}

pub fn write_big<U: Target>(buf: &mut U, v: &BigUint) -> usize {
    if v.bits() == 0 {
        return buf.push_one(EMPTY_STRING_CODE);
    }
    // `to_bytes_be` is minimal for every non-zero value
    write_bytes(buf, &v.to_bytes_be())
}

/// Encoded length of the magnitude of a signed big integer; negative values
/// are rejected by [`write_signed_big`], not here.
#[inline]
#[must_use]
pub fn signed_big_len(v: &BigInt) -> usize {
    big_len(v.magnitude())
}

pub fn write_signed_big<U: Target>(buf: &mut U, v: &BigInt) -> EncodeResult<usize> {
    if v.sign() == Sign::Minus {
        return Err(EncodeError::NegativeInteger);
    }
    Ok(write_big(buf, v.magnitude()))
}

/// Writes the empty item of the given kind (`0x80` or `0xc0`).
pub fn write_empty<U: Target>(buf: &mut U, kind: Kind) -> usize {
    match kind {
        Kind::String => buf.push_one(EMPTY_STRING_CODE),
        Kind::List => buf.push_one(EMPTY_LIST_CODE),
    }
}
