//! The encode/decode contract
//!
//! This module defines the two traits that every generated routine
//! implements, and that hand-written types implement to be treated as
//! opaque `RawValue` fields by the generator:
//!
//!   * [`Encode`] is split into a size pass ([`Encode::encoded_len`]) and a
//!     write pass ([`Encode::write_to`]). RLP list headers are length-prefixed,
//!     so the size of everything nested below a list must be known before the
//!     first byte of that list is written; [`Encode::to_rlp`] uses the size
//!     pass to allocate the output buffer exactly once.
//!   * [`Decode`] reads exactly one item from a [`ByteParser`], failing fast
//!     on the first structural error.
//!
//! Implementations are provided for the scalar kinds the generator knows
//! about, so that hand-written implementations can be composed from them.

use num_bigint::{BigInt, BigUint};

use crate::error::{DecodeResult, EncodeResult};
use crate::parse::ByteParser;
use crate::prim;
use crate::target::Target;

/// Types with a canonical RLP encoding
///
/// `encoded_len` must return exactly the number of bytes `write_to` appends,
/// header included. Generated implementations guarantee this by construction;
/// hand-written ones can check it against [`ByteCounter`](crate::ByteCounter).
pub trait Encode {
    /// Computes, without allocating, the full encoded length of `self`.
    fn encoded_len(&self) -> usize;

    /// Appends the encoding of `self` to `buf`.
    ///
    /// # Errors
    ///
    /// Fails only for values with no RLP encoding, such as negative big
    /// integers. Nothing useful can be assumed about the contents of `buf`
    /// after a failure.
    fn write_to<U: Target>(&self, buf: &mut U) -> EncodeResult<()>;

    /// Encodes `self` into a freshly allocated vector of exactly
    /// [`encoded_len`](Encode::encoded_len) bytes.
    fn to_rlp(&self) -> EncodeResult<Vec<u8>> {
        let len = self.encoded_len();
        let mut buf: Vec<u8> = Vec::create();
        buf.anticipate(len);
        self.write_to(&mut buf)?;
        debug_assert_eq!(buf.len(), len, "size pass disagrees with write pass");
        Ok(buf)
    }
}

/// Types that can be read back from their canonical RLP encoding
pub trait Decode: Sized {
    /// Consumes exactly one item from `p` and interprets it as `Self`.
    fn parse(p: &mut ByteParser<'_>) -> DecodeResult<Self>;

    /// Decodes a value from a complete input, rejecting leftover bytes.
    fn decode(bytes: &[u8]) -> DecodeResult<Self> {
        let mut p = ByteParser::new(bytes);
        let ret = Self::parse(&mut p)?;
        p.finish()?;
        Ok(ret)
    }
}

macro_rules! impl_uint {
    ( $( $t:ty ),+ ) => {
        $(
            impl Encode for $t {
                #[inline]
                fn encoded_len(&self) -> usize {
                    prim::uint_len(u128::from(*self))
                }

                fn write_to<U: Target>(&self, buf: &mut U) -> EncodeResult<()> {
                    prim::write_uint(buf, u128::from(*self));
                    Ok(())
                }
            }

            impl Decode for $t {
                #[inline]
                fn parse(p: &mut ByteParser<'_>) -> DecodeResult<Self> {
                    p.take_uint::<$t>()
                }
            }
        )+
    };
}

impl_uint!(u8, u16, u32, u64, u128);

impl Encode for bool {
    fn encoded_len(&self) -> usize {
        prim::bool_len(*self)
    }

    fn write_to<U: Target>(&self, buf: &mut U) -> EncodeResult<()> {
        prim::write_bool(buf, *self);
        Ok(())
    }
}

impl Decode for bool {
    fn parse(p: &mut ByteParser<'_>) -> DecodeResult<Self> {
        p.take_bool()
    }
}

impl Encode for Vec<u8> {
    fn encoded_len(&self) -> usize {
        prim::bytes_len(self)
    }

    fn write_to<U: Target>(&self, buf: &mut U) -> EncodeResult<()> {
        prim::write_bytes(buf, self);
        Ok(())
    }
}

impl Decode for Vec<u8> {
    fn parse(p: &mut ByteParser<'_>) -> DecodeResult<Self> {
        p.take_bytes().map(<[u8]>::to_vec)
    }
}

impl<const N: usize> Encode for [u8; N] {
    fn encoded_len(&self) -> usize {
        prim::bytes_len(self)
    }

    fn write_to<U: Target>(&self, buf: &mut U) -> EncodeResult<()> {
        prim::write_bytes(buf, self);
        Ok(())
    }
}

impl<const N: usize> Decode for [u8; N] {
    fn parse(p: &mut ByteParser<'_>) -> DecodeResult<Self> {
        p.take_array::<N>()
    }
}

impl Encode for String {
    fn encoded_len(&self) -> usize {
        prim::str_len(self)
    }

    fn write_to<U: Target>(&self, buf: &mut U) -> EncodeResult<()> {
        prim::write_str(buf, self);
        Ok(())
    }
}

impl Decode for String {
    fn parse(p: &mut ByteParser<'_>) -> DecodeResult<Self> {
        p.take_string()
    }
}

impl Encode for BigUint {
    fn encoded_len(&self) -> usize {
        prim::big_len(self)
    }

    fn write_to<U: Target>(&self, buf: &mut U) -> EncodeResult<()> {
        prim::write_big(buf, self);
        Ok(())
    }
}

impl Decode for BigUint {
    fn parse(p: &mut ByteParser<'_>) -> DecodeResult<Self> {
        p.take_biguint()
    }
}

impl Encode for BigInt {
    fn encoded_len(&self) -> usize {
        prim::signed_big_len(self)
    }

    fn write_to<U: Target>(&self, buf: &mut U) -> EncodeResult<()> {
        prim::write_signed_big(buf, self).map(|_| ())
    }
}

impl Decode for BigInt {
    fn parse(p: &mut ByteParser<'_>) -> DecodeResult<Self> {
        p.take_bigint()
    }
}
