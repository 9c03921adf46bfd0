//! Encoder/decoder intermediate representation
//!
//! The IR is a closed tree of [`Op`] nodes, one per field (or element) of the
//! record being generated for. [`Builder`] produces it from a resolved
//! [`TypeSchema`] by classifying every declared type into exactly one node
//! kind; types with no node kind are rejected, never defaulted.
//!
//! Classification precedence:
//!
//!  1. a type declaring its own contract becomes [`Op::Raw`]
//!  2. `[u8; N]` becomes [`Op::ByteArray`]
//!  3. `Vec<u8>` becomes [`Op::Bytes`], `String` becomes [`Op::Str`]
//!  4. `BigUint` and `BigInt` become [`Op::Big`]
//!  5. `u8` to `u128` become [`Op::Uint`], `bool` becomes [`Op::Bool`]
//!  6. `Vec<T>` and `[T; N]` become [`Op::List`]
//!  7. namespace structs become [`Op::Struct`], expanded inline
//!  8. `Option<T>` and `Option<Box<T>>` become [`Op::Pointer`]
//!
//! A name declared in the namespace shadows the built-in meaning of the same
//! name, as it would in Rust.

use std::collections::HashMap;

use lazy_static::lazy_static;
use tracing::{debug, trace};

use super::error::{GenError, GenResult};
use super::resolve::{Resolver, TypeSchema};
use super::schema::{Decl, StructDecl, TypeExpr, TypePath};
use super::GenOptions;
use crate::error::Kind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    /// Delegates to the type's own `Encode`/`Decode` implementation; `kind`
    /// is the item kind its empty value uses when wrapped in a pointer.
    Raw { ty: String, kind: Kind },
    Uint { bits: u32 },
    Bool,
    Big { signed: bool },
    /// Variable-length byte string
    Bytes,
    /// Fixed-length byte string
    ByteArray { len: usize },
    /// UTF-8 text
    Str,
    /// Homogeneous list, with an exact element count when `len` is set
    List {
        elem: Box<Op>,
        elem_ty: String,
        len: Option<usize>,
    },
    Struct(StructOp),
    /// Optional value; absent is the empty item of the inner op's kind
    Pointer { inner: Box<Op>, boxed: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructOp {
    /// Path used to construct the value when decoding
    pub path: String,
    pub tuple: bool,
    pub fields: Vec<FieldOp>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldOp {
    pub member: String,
    /// `None` for fields excluded from the wire format
    pub op: Option<Op>,
}

impl StructOp {
    /// Fields that appear on the wire, in declaration order.
    pub fn wire_fields(&self) -> impl Iterator<Item = (&str, &Op)> + '_ {
        self.fields
            .iter()
            .filter_map(|f| f.op.as_ref().map(|op| (f.member.as_str(), op)))
    }
}

impl Op {
    /// Kind of RLP item this op reads and writes.
    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            Op::Raw { kind, .. } => *kind,
            Op::List { .. } | Op::Struct(_) => Kind::List,
            Op::Pointer { inner, .. } => inner.kind(),
            Op::Uint { .. } | Op::Bool | Op::Big { .. } | Op::Bytes | Op::ByteArray { .. } | Op::Str => {
                Kind::String
            }
        }
    }

    /// Whether writing this op emits a list header of its own.
    #[must_use]
    pub fn nests_lists(&self) -> bool {
        match self {
            Op::List { .. } | Op::Struct(_) => true,
            Op::Pointer { inner, .. } => inner.nests_lists(),
            _ => false,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Op::Raw { .. } => "RawValue",
            Op::Uint { .. } => "Uint",
            Op::Bool => "Bool",
            Op::Big { .. } => "BigInt",
            Op::Bytes => "ByteSlice",
            Op::ByteArray { .. } => "ByteArray",
            Op::Str => "Str",
            Op::List { .. } => "List",
            Op::Struct(_) => "Struct",
            Op::Pointer { .. } => "Pointer",
        }
    }
}

lazy_static! {
    static ref SCALARS: HashMap<&'static str, Op> = {
        let mut m = HashMap::new();
        for bits in [8, 16, 32, 64, 128] {
            let name: &'static str = match bits {
                8 => "u8",
                16 => "u16",
                32 => "u32",
                64 => "u64",
                _ => "u128",
            };
            m.insert(name, Op::Uint { bits });
        }
        m.insert("bool", Op::Bool);
        m.insert("String", Op::Str);
        m.insert("BigUint", Op::Big { signed: false });
        m.insert("BigInt", Op::Big { signed: true });
        m
    };

    static ref UNMAPPED: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        for signed in ["i8", "i16", "i32", "i64", "i128", "isize"] {
            m.insert(signed, "signed integers have no RLP encoding");
        }
        m.insert("usize", "`usize` has a platform-dependent width; use a fixed-width integer");
        for float in ["f32", "f64"] {
            m.insert(float, "floating-point numbers have no RLP encoding");
        }
        m.insert("char", "`char` has no RLP encoding; use `String` or `u32`");
        m.insert("str", "unsized `str`; use `String`");
        for map in ["HashMap", "BTreeMap", "HashSet", "BTreeSet"] {
            m.insert(map, "maps and sets have no RLP encoding");
        }
        m.insert("Box", "`Box` is only supported as `Option<Box<T>>`");
        for shared in ["Rc", "Arc", "Cell", "RefCell"] {
            m.insert(shared, "shared and interior-mutable pointers are not supported");
        }
        m
    };
}

fn describe_opaque(text: &str) -> &'static str {
    match text.chars().next() {
        Some('(') => "tuples are not supported; use a struct",
        Some('&') => "references are not supported; use an owned type",
        Some('[') if text.contains(';') => "array lengths must be integer literals",
        Some('[') => "unsized slices are not supported; use `Vec`",
        Some('*') => "raw pointers are not supported",
        _ if text.starts_with("dyn ") || text.starts_with("impl ") => {
            "trait objects have no RLP mapping"
        }
        _ if text.contains("fn(") || text.contains("fn (") => "function pointers have no RLP mapping",
        _ => "type has no RLP mapping",
    }
}

fn unsupported(owner: &str, field: &str, ty: &TypeExpr, detail: &str) -> GenError {
    GenError::UnsupportedType {
        owner: owner.to_owned(),
        field: field.to_owned(),
        ty: ty.to_string(),
        detail: detail.to_owned(),
    }
}

/// Builds the IR of one record
pub struct Builder<'a> {
    resolver: &'a Resolver<'a>,
    opts: &'a GenOptions,
    root: String,
    /// Structs currently being expanded, outermost first
    stack: Vec<String>,
}

impl<'a> Builder<'a> {
    #[must_use]
    pub fn new(resolver: &'a Resolver<'a>, opts: &'a GenOptions) -> Self {
        Self {
            resolver,
            opts,
            root: String::new(),
            stack: Vec::new(),
        }
    }

    /// Builds the IR for the record described by `schema`.
    ///
    /// # Errors
    ///
    /// `UnsupportedType` for the first field whose type has no IR mapping,
    /// `RecursiveSchema` for a struct that contains itself other than through
    /// a pointer back to the root, and `NonTrailingOptional` for a required
    /// field declared after an optional one.
    pub fn build(mut self, schema: &TypeSchema) -> GenResult<StructOp> {
        self.root = schema.name.clone();
        let op = self.build_struct(schema, "Self".to_owned(), false)?;
        debug!(
            root = %schema.name,
            fields = op.fields.len(),
            wire_fields = op.wire_fields().count(),
            "built IR"
        );
        Ok(op)
    }

    fn build_struct(
        &mut self,
        schema: &TypeSchema,
        path: String,
        via_pointer: bool,
    ) -> GenResult<StructOp> {
        self.stack.push(schema.name.clone());
        let mut fields = Vec::with_capacity(schema.fields.len());
        let mut first_optional: Option<&str> = None;
        for f in &schema.fields {
            if f.skip {
                trace!(owner = %schema.name, field = %f.member, "skipped");
                fields.push(FieldOp {
                    member: f.member.clone(),
                    op: None,
                });
                continue;
            }
            if f.optional {
                first_optional.get_or_insert(f.member.as_str());
            } else if let Some(after) = first_optional {
                return Err(GenError::NonTrailingOptional {
                    owner: schema.name.clone(),
                    field: f.member.clone(),
                    after: after.to_owned(),
                });
            }
            let op = self.classify(&schema.name, &f.member, &f.ty, via_pointer)?;
            fields.push(FieldOp {
                member: f.member.clone(),
                op: Some(op),
            });
        }
        self.stack.pop();
        Ok(StructOp {
            path,
            tuple: schema.tuple,
            fields,
        })
    }

    fn classify(
        &mut self,
        owner: &str,
        member: &str,
        ty: &TypeExpr,
        via_pointer: bool,
    ) -> GenResult<Op> {
        let op = match ty {
            TypeExpr::Opaque(text) => {
                return Err(unsupported(owner, member, ty, describe_opaque(text)))
            }
            TypeExpr::Array(elem, len) if elem.is_u8() => Op::ByteArray { len: *len },
            TypeExpr::Array(elem, len) => Op::List {
                elem: Box::new(self.classify(owner, member, elem, via_pointer)?),
                elem_ty: elem.to_string(),
                len: Some(*len),
            },
            TypeExpr::Path(path) => self.classify_path(owner, member, ty, path, via_pointer)?,
        };
        trace!(owner, field = member, ty = %ty, op = op.name(), "classified");
        Ok(op)
    }

    fn classify_path(
        &mut self,
        owner: &str,
        member: &str,
        ty: &TypeExpr,
        path: &TypePath,
        via_pointer: bool,
    ) -> GenResult<Op> {
        let ident = path.ident();

        let contract = self.resolver.contract(ident);
        if contract.is_declared() && path.args.is_empty() {
            for (required, has, half) in [
                (self.opts.encoder, contract.encode, "Encode"),
                (self.opts.decoder, contract.decode, "Decode"),
            ] {
                if required && !has {
                    let detail = format!("`{ident}` does not implement {half}");
                    return Err(unsupported(owner, member, ty, &detail));
                }
            }
            let kind = match self.resolver.lookup(ident) {
                Some(Decl::Struct(_)) => Kind::List,
                _ => Kind::String,
            };
            return Ok(Op::Raw {
                ty: ty.to_string(),
                kind,
            });
        }

        if let Some(decl) = path.local_name().and_then(|name| self.resolver.lookup(name)) {
            if !path.args.is_empty() {
                return Err(unsupported(owner, member, ty, "generic types are not supported"));
            }
            return match decl {
                Decl::Alias(_) => {
                    let target = self.resolver.follow_aliases(ty)?;
                    self.classify(owner, member, &target, via_pointer)
                }
                Decl::Struct(s) if s.generic => Err(unsupported(
                    owner,
                    member,
                    ty,
                    "generic types are not supported",
                )),
                Decl::Struct(s) => self.nested_struct(ty, s, via_pointer),
                Decl::Other(kind) => {
                    let detail = format!("{kind} types have no RLP mapping");
                    Err(unsupported(owner, member, ty, &detail))
                }
            };
        }

        if path.args.is_empty() {
            if let Some(op) = SCALARS.get(ident) {
                return Ok(op.clone());
            }
        }

        if let Some(elem) = ty.single_arg("Vec") {
            if elem.is_u8() {
                return Ok(Op::Bytes);
            }
            return Ok(Op::List {
                elem: Box::new(self.classify(owner, member, elem, via_pointer)?),
                elem_ty: elem.to_string(),
                len: None,
            });
        }

        if let Some(inner) = ty.single_arg("Option") {
            let (inner, boxed) = match inner.single_arg("Box") {
                Some(unboxed) => (unboxed, true),
                None => (inner, false),
            };
            let inner = self.classify(owner, member, inner, true)?;
            if matches!(inner, Op::Pointer { .. }) {
                return Err(unsupported(
                    owner,
                    member,
                    ty,
                    "nested options cannot be told apart on the wire",
                ));
            }
            return Ok(Op::Pointer {
                inner: Box::new(inner),
                boxed,
            });
        }

        let detail = UNMAPPED.get(ident).copied().unwrap_or("unknown type");
        Err(unsupported(owner, member, ty, detail))
    }

    fn nested_struct(
        &mut self,
        ty: &TypeExpr,
        decl: &StructDecl,
        via_pointer: bool,
    ) -> GenResult<Op> {
        if self.stack.iter().any(|n| *n == decl.name) {
            if via_pointer && decl.name == self.root {
                return Ok(Op::Raw {
                    ty: decl.name.clone(),
                    kind: Kind::List,
                });
            }
            let mut path = self.stack.clone();
            path.push(decl.name.clone());
            return Err(GenError::RecursiveSchema { path });
        }
        let schema = self.resolver.schema_of(decl)?;
        let op = self.build_struct(&schema, ty.to_string(), via_pointer)?;
        Ok(Op::Struct(op))
    }
}
