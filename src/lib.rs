//! Schema-driven RLP encoders and decoders
//!
//! # Overview
//!
//! This crate has two halves. The [`gen`] module is a code generator: given a
//! record type declared in a directory of plain Rust sources, it produces the
//! source of routines that serialize values of that type to, and parse them
//! from, Recursive Length Prefix (RLP) bytes. Everything else is the small
//! runtime those routines are written against.
//!
//! The high-level traits [`Encode`] and [`Decode`] are the keystones of the
//! runtime. Generated code implements them for records; the runtime itself
//! implements them for the scalar kinds, so that hand-written types can take
//! part in a generated record as opaque, pre-encoded items.
//!
//! # Background
//!
//! RLP encodes exactly two kinds of item, byte strings and lists of items,
//! each preceded by a header carrying its kind and payload length:
//!
//!   * a single byte below `0x80` is its own encoding;
//!   * strings of up to 55 bytes take a one-byte header `0x80 + len`;
//!     longer ones take `0xb7 + len(len)` followed by the big-endian length;
//!   * lists are laid out identically with base `0xc0` and `0xf7`.
//!
//! Integers are minimal big-endian byte strings (zero is the empty string),
//! and records are lists of their fields in declaration order. Decoding is
//! strict: every non-canonical form is rejected, as are unread bytes within
//! a list and after the top-level item.
//!
//! Encoding is two-pass. The size of the whole output is computed first, so
//! the destination is allocated once and every header is written before its
//! payload. See [`target`] for the destination side and [`parse`] for the
//! decoding side.

pub mod conv;
pub mod error;
pub mod gen;
pub mod header;
pub mod parse;
pub mod prim;
pub mod target;

pub use conv::{Decode, Encode};
pub use error::{DecodeError, DecodeResult, EncodeError, EncodeResult, Kind};
pub use header::{Header, EMPTY_LIST_CODE, EMPTY_STRING_CODE};
pub use parse::ByteParser;
pub use target::{ByteCounter, Target};
