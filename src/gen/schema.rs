//! Namespace loading
//!
//! A namespace is the set of type declarations visible to the generator: the
//! Rust source files directly inside one directory, parsed with `syn` and
//! reduced to the little the resolver needs to know about each item. Inline
//! `mod` blocks are flattened into the same namespace.
//!
//! Besides declarations, the namespace records which types carry their own
//! encode/decode contract, either because an `impl ...::Encode for T` (or
//! `Decode`) block is visible, because the struct is marked `#[rlp(raw)]`, or
//! because the caller declared it explicitly (see
//! [`Namespace::declare_contract`]).
//!
//! `rlp` attributes are also recognised inside `cfg_attr`, so that schema
//! files can be compiled as-is: `#[cfg_attr(rlpgen, rlp(skip))]`.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use quote::ToTokens;
use syn::punctuated::Punctuated;
use syn::{Attribute, Fields, GenericArgument, Item, Meta, PathArguments, Token, Type};
use tracing::{debug, trace};

use super::config::GENERATED_MARKER;
use super::error::{GenError, GenResult};

/// Structural view of a type as written in a field or alias declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// Path types such as `u64`, `Vec<u8>` or `num_bigint::BigUint`
    Path(TypePath),
    /// `[T; N]` with an integer-literal length
    Array(Box<TypeExpr>, usize),
    /// Any other type, kept only as rendered text
    Opaque(String),
}

/// A path type; generic arguments are only kept for the final segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypePath {
    pub segments: Vec<String>,
    pub args: Vec<TypeExpr>,
}

impl TypePath {
    /// Final segment of the path, which names the type itself.
    #[must_use]
    pub fn ident(&self) -> &str {
        self.segments.last().map_or("", String::as_str)
    }

    /// Name this path would be declared under in the namespace, if it can
    /// refer to a namespace item at all.
    #[must_use]
    pub fn local_name(&self) -> Option<&str> {
        match self.segments.as_slice() {
            [name] => Some(name),
            [root, name] if matches!(root.as_str(), "crate" | "self" | "super") => Some(name),
            _ => None,
        }
    }
}

impl TypeExpr {
    #[must_use]
    pub fn from_syn(ty: &Type) -> Self {
        match ty {
            Type::Paren(inner) => Self::from_syn(&inner.elem),
            Type::Group(inner) => Self::from_syn(&inner.elem),
            Type::Path(tp) if tp.qself.is_none() => {
                Self::from_path(&tp.path).unwrap_or_else(|| Self::Opaque(render(ty)))
            }
            Type::Array(arr) => match array_len(&arr.len) {
                Some(len) => Self::Array(Box::new(Self::from_syn(&arr.elem)), len),
                None => Self::Opaque(render(ty)),
            },
            other => Self::Opaque(render(other)),
        }
    }

    fn from_path(path: &syn::Path) -> Option<Self> {
        let last = path.segments.len().saturating_sub(1);
        let mut segments = Vec::with_capacity(path.segments.len());
        let mut args = Vec::new();
        for (i, seg) in path.segments.iter().enumerate() {
            match &seg.arguments {
                PathArguments::None => {}
                PathArguments::AngleBracketed(ab) if i == last => {
                    for arg in &ab.args {
                        match arg {
                            GenericArgument::Type(t) => args.push(Self::from_syn(t)),
                            _ => return None,
                        }
                    }
                }
                _ => return None,
            }
            segments.push(seg.ident.to_string());
        }
        Some(Self::Path(TypePath { segments, args }))
    }

    /// Returns the path if this is a path type.
    #[must_use]
    pub fn as_path(&self) -> Option<&TypePath> {
        match self {
            Self::Path(p) => Some(p),
            _ => None,
        }
    }

    /// Returns the only generic argument of a path type whose final segment
    /// is `ident`, as in `Vec<T>` or `std::option::Option<T>`.
    #[must_use]
    pub fn single_arg(&self, ident: &str) -> Option<&TypeExpr> {
        match self.as_path()? {
            p if p.ident() == ident && p.args.len() == 1 => p.args.first(),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_u8(&self) -> bool {
        matches!(self.as_path(), Some(p) if p.ident() == "u8" && p.args.is_empty())
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(p) => {
                write!(f, "{}", p.segments.join("::"))?;
                if let Some((first, rest)) = p.args.split_first() {
                    write!(f, "<{first}")?;
                    for arg in rest {
                        write!(f, ", {arg}")?;
                    }
                    write!(f, ">")?;
                }
                Ok(())
            }
            Self::Array(elem, len) => write!(f, "[{elem}; {len}]"),
            Self::Opaque(text) => f.write_str(text),
        }
    }
}

fn array_len(expr: &syn::Expr) -> Option<usize> {
    match expr {
        syn::Expr::Lit(syn::ExprLit {
            lit: syn::Lit::Int(n),
            ..
        }) => n.base10_parse().ok(),
        syn::Expr::Group(g) => array_len(&g.expr),
        _ => None,
    }
}

/// Renders a token tree the way it would be written by hand, closely enough
/// for diagnostics.
pub(crate) fn render<T: ToTokens>(tokens: &T) -> String {
    const TIGHTEN: [(&str, &str); 11] = [
        (" :: ", "::"),
        (":: ", "::"),
        (" < ", "<"),
        ("< ", "<"),
        (" <", "<"),
        (" >", ">"),
        (" ,", ","),
        (" ;", ";"),
        ("& ", "&"),
        ("( ", "("),
        (" )", ")"),
    ];
    let mut text = tokens.to_token_stream().to_string();
    for (from, to) in TIGHTEN {
        text = text.replace(from, to);
    }
    text.replace("[ ", "[").replace(" ]", "]")
}

/// A record declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDecl {
    pub name: String,
    /// Declared with positional fields
    pub tuple: bool,
    /// Declared with type, lifetime or const parameters
    pub generic: bool,
    pub fields: Vec<FieldDecl>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    /// Field name, or its index for positional fields
    pub member: String,
    pub ty: TypeExpr,
    /// Marked `#[rlp(skip)]`
    pub skip: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decl {
    Struct(StructDecl),
    Alias(TypeExpr),
    /// Nameable items that can never be records: enums, unions, traits and
    /// generic aliases
    Other(&'static str),
}

impl Decl {
    #[must_use]
    pub fn describe(&self) -> &'static str {
        match self {
            Decl::Struct(_) => "struct",
            Decl::Alias(_) => "type alias",
            Decl::Other(kind) => kind,
        }
    }
}

/// Which halves of the encode/decode contract a type provides on its own
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Contract {
    pub encode: bool,
    pub decode: bool,
}

impl Contract {
    pub const BOTH: Self = Self {
        encode: true,
        decode: true,
    };

    #[must_use]
    pub fn is_declared(self) -> bool {
        self.encode || self.decode
    }
}

/// Read-only (once loaded) table of declarations and contracts
#[derive(Debug, Clone, Default)]
pub struct Namespace {
    decls: HashMap<String, (Decl, PathBuf)>,
    contracts: HashMap<String, Contract>,
}

fn load_error(path: &Path, reason: impl ToString) -> GenError {
    GenError::NamespaceLoad {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

impl Namespace {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every `*.rs` file directly inside `dir`.
    ///
    /// Files are read in lexicographic order so that duplicate-declaration
    /// errors are reported deterministically.
    pub fn load(dir: &Path) -> GenResult<Self> {
        let entries = fs::read_dir(dir).map_err(|e| load_error(dir, e))?;
        let mut files = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| load_error(dir, e))?.path();
            if path.is_file() && path.extension().map_or(false, |ext| ext == "rs") {
                files.push(path);
            }
        }
        if files.is_empty() {
            return Err(load_error(dir, "no Rust source files"));
        }
        files.sort();

        let mut ns = Self::new();
        for path in &files {
            let src = fs::read_to_string(path).map_err(|e| load_error(path, e))?;
            ns.add_source(path, &src)?;
        }
        debug!(
            dir = %dir.display(),
            files = files.len(),
            decls = ns.decls.len(),
            contracts = ns.contracts.len(),
            "loaded namespace"
        );
        Ok(ns)
    }

    /// Builds a namespace from a single in-memory source file.
    pub fn parse_str(src: &str) -> GenResult<Self> {
        let mut ns = Self::new();
        ns.add_source(Path::new("<memory>"), src)?;
        Ok(ns)
    }

    /// Adds the declarations of one source file, attributing errors to `path`.
    ///
    /// Output of a previous generator run is recognised by its marker line
    /// and ignored.
    pub fn add_source(&mut self, path: &Path, src: &str) -> GenResult<()> {
        if src.lines().next().map(str::trim_end) == Some(GENERATED_MARKER) {
            debug!(path = %path.display(), "skipping generated file");
            return Ok(());
        }
        let file = syn::parse_file(src).map_err(|e| load_error(path, e))?;
        self.add_items(path, &file.items)
    }

    fn add_items(&mut self, path: &Path, items: &[Item]) -> GenResult<()> {
        for item in items {
            match item {
                Item::Struct(s) => {
                    let (decl, raw) = struct_decl(path, s)?;
                    if raw {
                        self.declare_contract(&decl.name, Contract::BOTH);
                    }
                    self.declare(path, decl.name.clone(), Decl::Struct(decl))?;
                }
                Item::Type(t) => {
                    let decl = if t.generics.params.is_empty() {
                        Decl::Alias(TypeExpr::from_syn(&t.ty))
                    } else {
                        Decl::Other("generic type alias")
                    };
                    self.declare(path, t.ident.to_string(), decl)?;
                }
                Item::Enum(e) => self.declare(path, e.ident.to_string(), Decl::Other("enum"))?,
                Item::Union(u) => self.declare(path, u.ident.to_string(), Decl::Other("union"))?,
                Item::Trait(t) => self.declare(path, t.ident.to_string(), Decl::Other("trait"))?,
                Item::Impl(imp) => self.register_impl(imp),
                Item::Mod(m) => {
                    if let Some((_, items)) = &m.content {
                        self.add_items(path, items)?;
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn declare(&mut self, path: &Path, name: String, decl: Decl) -> GenResult<()> {
        if let Some((_, first)) = self.decls.get(&name) {
            return Err(load_error(
                path,
                format!(
                    "duplicate declaration of `{name}` (first declared in {})",
                    first.display()
                ),
            ));
        }
        trace!(%name, kind = decl.describe(), "declared");
        self.decls.insert(name, (decl, path.to_path_buf()));
        Ok(())
    }

    fn register_impl(&mut self, imp: &syn::ItemImpl) {
        let Some((None, trait_path, _)) = &imp.trait_ else {
            return;
        };
        let half = match trait_path.segments.last() {
            Some(seg) if seg.ident == "Encode" => Contract {
                encode: true,
                decode: false,
            },
            Some(seg) if seg.ident == "Decode" => Contract {
                encode: false,
                decode: true,
            },
            _ => return,
        };
        let Type::Path(self_ty) = &*imp.self_ty else {
            return;
        };
        if let Some(seg) = self_ty.path.segments.last() {
            self.declare_contract(&seg.ident.to_string(), half);
        }
    }

    /// Records that `name` provides (at least) the given contract halves.
    ///
    /// This is how the secondary namespace is supplied: types whose
    /// implementations live outside the loaded directory.
    pub fn declare_contract(&mut self, name: &str, contract: Contract) {
        let entry = self.contracts.entry(name.to_owned()).or_default();
        entry.encode |= contract.encode;
        entry.decode |= contract.decode;
        trace!(%name, encode = entry.encode, decode = entry.decode, "contract");
    }

    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Decl> {
        self.decls.get(name).map(|(decl, _)| decl)
    }

    #[must_use]
    pub fn contract(&self, name: &str) -> Contract {
        self.contracts.get(name).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.decls.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }
}

/// Collects the keys of every `rlp(...)` attribute, including those nested
/// in `cfg_attr`.
fn rlp_keys(attrs: &[Attribute]) -> syn::Result<Vec<String>> {
    let mut keys = Vec::new();
    let mut push_key = |meta: syn::meta::ParseNestedMeta<'_>| -> syn::Result<()> {
        keys.push(render(&meta.path));
        Ok(())
    };
    for attr in attrs {
        if attr.path().is_ident("rlp") {
            attr.parse_nested_meta(&mut push_key)?;
        } else if attr.path().is_ident("cfg_attr") {
            let nested = attr.parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)?;
            for meta in nested.iter().skip(1) {
                if let Meta::List(list) = meta {
                    if list.path.is_ident("rlp") {
                        list.parse_nested_meta(&mut push_key)?;
                    }
                }
            }
        }
    }
    Ok(keys)
}

fn struct_decl(path: &Path, s: &syn::ItemStruct) -> GenResult<(StructDecl, bool)> {
    let name = s.ident.to_string();
    let bad_attr = |e: syn::Error| load_error(path, format!("in `{name}`: {e}"));

    let mut raw = false;
    for key in rlp_keys(&s.attrs).map_err(bad_attr)? {
        match key.as_str() {
            "raw" => raw = true,
            other => {
                return Err(load_error(
                    path,
                    format!("unknown attribute `rlp({other})` on struct `{name}`"),
                ))
            }
        }
    }

    let mut fields = Vec::with_capacity(s.fields.len());
    for (i, field) in s.fields.iter().enumerate() {
        let member = field
            .ident
            .as_ref()
            .map_or_else(|| i.to_string(), ToString::to_string);
        let mut skip = false;
        for key in rlp_keys(&field.attrs).map_err(bad_attr)? {
            match key.as_str() {
                "skip" => skip = true,
                other => {
                    return Err(load_error(
                        path,
                        format!("unknown attribute `rlp({other})` on field `{name}.{member}`"),
                    ))
                }
            }
        }
        fields.push(FieldDecl {
            member,
            ty: TypeExpr::from_syn(&field.ty),
            skip,
        });
    }

    let decl = StructDecl {
        name,
        tuple: matches!(s.fields, Fields::Unnamed(_)),
        generic: !s.generics.params.is_empty(),
        fields,
    };
    Ok((decl, raw))
}
