//! IR interpreter
//!
//! Runs an IR tree directly against dynamic [`Value`]s instead of emitting
//! code for it. The interpreter goes through the same runtime primitives as
//! generated routines (the [`prim`] size/write pairs on the way out, the
//! [`ByteParser`] on the way in) and follows the same two-pass discipline,
//! so its output is byte-for-byte what generated code would produce for the
//! same record.

use num_bigint::BigInt;

use super::ir::{Op, StructOp};
use crate::error::{DecodeError, DecodeResult, EncodeError, EncodeResult};
use crate::header::{list_len, Header};
use crate::parse::ByteParser;
use crate::prim;
use crate::target::Target;

/// Dynamic counterpart of a value of some IR node kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Bool(bool),
    /// Any fixed-width unsigned integer
    Uint(u128),
    Big(BigInt),
    /// Contents of a `ByteSlice` or `ByteArray`
    Bytes(Vec<u8>),
    Str(String),
    List(Vec<Value>),
    /// Values of the wire fields of a struct, in declaration order
    Record(Vec<Value>),
    /// A missing optional value
    Absent,
    /// One complete encoded item standing in for a `RawValue`
    Raw(Vec<u8>),
}

fn mismatch(op: &Op) -> EncodeError {
    EncodeError::ShapeMismatch {
        expected: op.name(),
    }
}

fn check_width(bits: u32, n: u128) -> EncodeResult<()> {
    if bits < 128 && n >> bits != 0 {
        return Err(EncodeError::Overflow { bits });
    }
    Ok(())
}

fn check_len(exact: usize, actual: usize) -> EncodeResult<()> {
    if exact != actual {
        return Err(EncodeError::WrongLength { exact, actual });
    }
    Ok(())
}

fn size(op: &Op, v: &Value) -> EncodeResult<usize> {
    let len = match (op, v) {
        (Op::Raw { .. }, Value::Raw(bytes)) => {
            let mut p = ByteParser::new(bytes);
            p.take_raw()
                .and_then(|_| p.finish())
                .map_err(|_| mismatch(op))?;
            bytes.len()
        }
        (Op::Uint { bits }, Value::Uint(n)) => {
            check_width(*bits, *n)?;
            prim::uint_len(*n)
        }
        (Op::Bool, Value::Bool(b)) => prim::bool_len(*b),
        (Op::Big { .. }, Value::Big(n)) => prim::signed_big_len(n),
        (Op::Bytes, Value::Bytes(b)) => prim::bytes_len(b),
        (Op::ByteArray { len }, Value::Bytes(b)) => {
            check_len(*len, b.len())?;
            prim::bytes_len(b)
        }
        (Op::Str, Value::Str(s)) => prim::str_len(s),
        (Op::List { elem, len, .. }, Value::List(items)) => {
            list_len(list_payload(elem, *len, items)?)
        }
        (Op::Struct(s), Value::Record(values)) => list_len(record_payload(s, values)?),
        (Op::Pointer { .. }, Value::Absent) => 1,
        (Op::Pointer { inner, .. }, v) => size(inner, v)?,
        _ => return Err(mismatch(op)),
    };
    Ok(len)
}

fn list_payload(elem: &Op, len: Option<usize>, items: &[Value]) -> EncodeResult<usize> {
    if let Some(n) = len {
        check_len(n, items.len())?;
    }
    items.iter().map(|item| size(elem, item)).sum()
}

fn record_payload(s: &StructOp, values: &[Value]) -> EncodeResult<usize> {
    let expected = s.wire_fields().count();
    if expected != values.len() {
        return Err(EncodeError::WrongLength {
            exact: expected,
            actual: values.len(),
        });
    }
    s.wire_fields()
        .zip(values)
        .map(|((_, op), v)| size(op, v))
        .sum()
}

/// Write pass; every shape check has already been made by [`size`].
fn write<U: Target>(op: &Op, v: &Value, buf: &mut U) -> EncodeResult<()> {
    match (op, v) {
        (Op::Raw { .. }, Value::Raw(bytes)) => {
            buf.push_all(bytes);
        }
        (Op::Uint { .. }, Value::Uint(n)) => {
            prim::write_uint(buf, *n);
        }
        (Op::Bool, Value::Bool(b)) => {
            prim::write_bool(buf, *b);
        }
        (Op::Big { .. }, Value::Big(n)) => {
            prim::write_signed_big(buf, n)?;
        }
        (Op::Bytes | Op::ByteArray { .. }, Value::Bytes(b)) => {
            prim::write_bytes(buf, b);
        }
        (Op::Str, Value::Str(s)) => {
            prim::write_str(buf, s);
        }
        (Op::List { elem, len, .. }, Value::List(items)) => {
            Header::list(list_payload(elem, *len, items)?).write_to(buf);
            for item in items {
                write(elem, item, buf)?;
            }
        }
        (Op::Struct(s), Value::Record(values)) => write_record(s, values, buf)?,
        (Op::Pointer { inner, .. }, Value::Absent) => {
            prim::write_empty(buf, inner.kind());
        }
        (Op::Pointer { inner, .. }, v) => write(inner, v, buf)?,
        _ => return Err(mismatch(op)),
    }
    Ok(())
}

fn write_record<U: Target>(s: &StructOp, values: &[Value], buf: &mut U) -> EncodeResult<()> {
    Header::list(record_payload(s, values)?).write_to(buf);
    for ((_, op), v) in s.wire_fields().zip(values) {
        write(op, v, buf)?;
    }
    Ok(())
}

/// Encodes `v` as a value of `op`, allocating the output exactly once.
///
/// # Errors
///
/// `ShapeMismatch` when `v` does not have the shape `op` describes, and
/// the encode errors of the scalar kinds (out-of-range integers, negative
/// big integers, wrong fixed lengths).
pub fn encode_value(op: &Op, v: &Value) -> EncodeResult<Vec<u8>> {
    let len = size(op, v)?;
    let mut buf: Vec<u8> = Vec::create();
    buf.anticipate(len);
    write(op, v, &mut buf)?;
    debug_assert_eq!(buf.len(), len, "size pass disagrees with write pass");
    Ok(buf)
}

/// Encodes a whole record given the values of its wire fields.
pub fn encode_record(root: &StructOp, values: &[Value]) -> EncodeResult<Vec<u8>> {
    let len = list_len(record_payload(root, values)?);
    let mut buf: Vec<u8> = Vec::create();
    buf.anticipate(len);
    write_record(root, values, &mut buf)?;
    debug_assert_eq!(buf.len(), len, "size pass disagrees with write pass");
    Ok(buf)
}

fn read(op: &Op, p: &mut ByteParser<'_>) -> DecodeResult<Value> {
    let value = match op {
        Op::Raw { .. } => Value::Raw(p.take_raw()?.to_vec()),
        Op::Uint { bits } => {
            let n = p.take_uint::<u128>().map_err(|e| match e {
                DecodeError::Overflow { .. } => DecodeError::Overflow { bits: *bits },
                other => other,
            })?;
            if *bits < 128 && n >> *bits != 0 {
                return Err(DecodeError::Overflow { bits: *bits });
            }
            Value::Uint(n)
        }
        Op::Bool => Value::Bool(p.take_bool()?),
        Op::Big { signed: false } => Value::Big(BigInt::from(p.take_biguint()?)),
        Op::Big { signed: true } => Value::Big(p.take_bigint()?),
        Op::Bytes => Value::Bytes(p.take_bytes()?.to_vec()),
        Op::ByteArray { len } => {
            let bytes = p.take_bytes()?;
            if bytes.len() != *len {
                return Err(DecodeError::WrongLength {
                    exact: *len,
                    actual: bytes.len(),
                });
            }
            Value::Bytes(bytes.to_vec())
        }
        Op::Str => Value::Str(p.take_string()?),
        Op::List { elem, len, .. } => {
            p.open_list()?;
            let mut items = Vec::new();
            while !p.at_window_end() {
                items.push(read(elem, p)?);
            }
            p.close_list()?;
            match len {
                Some(n) if *n != items.len() => {
                    return Err(DecodeError::WrongLength {
                        exact: *n,
                        actual: items.len(),
                    })
                }
                _ => Value::List(items),
            }
        }
        Op::Struct(s) => Value::Record(read_record(s, p)?),
        Op::Pointer { inner, .. } => {
            if p.take_empty(inner.kind())? {
                Value::Absent
            } else {
                read(inner, p)?
            }
        }
    };
    Ok(value)
}

fn read_record(s: &StructOp, p: &mut ByteParser<'_>) -> DecodeResult<Vec<Value>> {
    p.open_list()?;
    let values = s
        .wire_fields()
        .map(|(_, op)| read(op, p))
        .collect::<DecodeResult<Vec<_>>>()?;
    p.close_list()?;
    Ok(values)
}

/// Decodes a complete input as one value of `op`.
pub fn decode_value(op: &Op, bytes: &[u8]) -> DecodeResult<Value> {
    let mut p = ByteParser::new(bytes);
    let value = read(op, &mut p)?;
    p.finish()?;
    Ok(value)
}

/// Decodes a complete input as a record, returning its wire field values.
pub fn decode_record(root: &StructOp, bytes: &[u8]) -> DecodeResult<Vec<Value>> {
    let mut p = ByteParser::new(bytes);
    let values = read_record(root, &mut p)?;
    p.finish()?;
    Ok(values)
}
