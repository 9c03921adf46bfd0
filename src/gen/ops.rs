//! Op library
//!
//! For every IR node kind, this module knows three code fragments:
//!
//!   * the *size expression*, evaluating to the full encoded length of the
//!     value (header included) without writing anything;
//!   * the *write procedure*, statements appending the value's canonical
//!     bytes to `buf`, preceded for list-kind values by a *record procedure*
//!     that measures every nested list payload once into `sizes`;
//!   * the *read procedure*, an expression consuming one item from the
//!     parser `p` and evaluating to the typed value, propagating any
//!     `DecodeError` with `?`.
//!
//! Nested ops are composed by substitution: a list's size expression maps
//! its element's size expression over the elements, a struct's sums the size
//! expressions of its fields, and both wrap the sum in a list header. The
//! emitter never formats wire-level details itself.

use super::ir::{Op, StructOp};
use crate::error::Kind;

const INDENT: &str = "    ";

/// Location of the value a fragment operates on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Place {
    /// A place expression of the op's type, such as `self.nonce`
    Owned(String),
    /// A variable bound to a reference to a value of the op's type
    Borrowed(String),
}

impl Place {
    fn by_ref(&self) -> String {
        match self {
            Place::Owned(p) => format!("&{p}"),
            Place::Borrowed(v) => v.clone(),
        }
    }

    fn by_val(&self) -> String {
        match self {
            Place::Owned(p) => p.clone(),
            Place::Borrowed(v) => format!("*{v}"),
        }
    }

    /// Expression suitable as a method receiver or field base.
    fn recv(&self) -> String {
        match self {
            Place::Owned(p) if p.starts_with('*') => format!("({p})"),
            Place::Owned(p) | Place::Borrowed(p) => p.clone(),
        }
    }

    pub fn field(&self, member: &str) -> Place {
        Place::Owned(format!("{}.{member}", self.recv()))
    }
}

/// Place of the value inside `Some(var)` when matching on a reference to an
/// option.
fn unwrapped(var: &str, boxed: bool) -> Place {
    if boxed {
        Place::Owned(format!("**{var}"))
    } else {
        Place::Borrowed(var.to_owned())
    }
}

/// Indents every line of `text` but the first by one level.
fn nest(text: &str) -> String {
    text.replace('\n', &format!("\n{INDENT}"))
}

fn kind_variant(kind: Kind) -> &'static str {
    match kind {
        Kind::String => "String",
        Kind::List => "List",
    }
}

/// Name of the local variable holding a decoded field.
///
/// Every field is bound under the same reserved prefix, so that no binding
/// can shadow the parser `p` or the binding of another field.
pub(crate) fn binding(member: &str) -> String {
    format!("__rlp_{}", member.trim_start_matches("r#"))
}

/// Line-oriented source buffer with block indentation
#[derive(Debug, Default)]
pub struct CodeWriter {
    out: String,
    depth: usize,
}

impl CodeWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `text` at the current depth; every line of a multi-line
    /// fragment is shifted by the same amount.
    pub fn line(&mut self, text: impl AsRef<str>) {
        for l in text.as_ref().lines() {
            if !l.is_empty() {
                for _ in 0..self.depth {
                    self.out.push_str(INDENT);
                }
                self.out.push_str(l);
            }
            self.out.push('\n');
        }
    }

    pub fn blank(&mut self) {
        self.out.push('\n');
    }

    /// Appends `text` and indents what follows by one level.
    pub fn open(&mut self, text: impl AsRef<str>) {
        self.line(text);
        self.depth += 1;
    }

    /// Dedents by one level and appends `text`.
    pub fn close(&mut self, text: impl AsRef<str>) {
        self.depth = self.depth.saturating_sub(1);
        self.line(text);
    }

    #[must_use]
    pub fn finish(self) -> String {
        self.out
    }

    /// Returns the buffer as an expression, without its final newline.
    #[must_use]
    pub fn into_expr(self) -> String {
        self.out.trim_end().to_owned()
    }
}

/// Per-routine fragment state: the runtime crate path and a counter for the
/// temporaries introduced by closures, loops and matches.
#[derive(Debug)]
pub struct GenContext<'a> {
    rt: &'a str,
    temps: usize,
}

impl<'a> GenContext<'a> {
    #[must_use]
    pub fn new(runtime_path: &'a str) -> Self {
        Self {
            rt: runtime_path,
            temps: 0,
        }
    }

    fn temp(&mut self, prefix: &str) -> String {
        let n = self.temps;
        self.temps += 1;
        format!("_{prefix}{n}")
    }

    /// Expression for the full encoded length of the value at `v`.
    pub fn size_expr(&mut self, op: &Op, v: &Place) -> String {
        let rt = self.rt;
        match op {
            Op::Raw { .. } => format!("{rt}::Encode::encoded_len({})", v.by_ref()),
            Op::Uint { .. } => format!("{rt}::prim::uint_len(u128::from({}))", v.by_val()),
            Op::Bool => "1".to_owned(),
            Op::Big { signed: false } => format!("{rt}::prim::big_len({})", v.by_ref()),
            Op::Big { signed: true } => format!("{rt}::prim::signed_big_len({})", v.by_ref()),
            Op::Bytes | Op::ByteArray { .. } => format!("{rt}::prim::bytes_len({})", v.by_ref()),
            Op::Str => format!("{rt}::prim::str_len({})", v.by_ref()),
            Op::List { .. } | Op::Struct(_) => {
                format!("{rt}::header::list_len({})", self.payload_expr(op, v))
            }
            Op::Pointer { inner, boxed } => {
                let var = self.temp("p");
                let some = self.size_expr(inner, &unwrapped(&var, *boxed));
                let mut w = CodeWriter::new();
                w.open(format!("match {} {{", v.by_ref()));
                w.line(format!("Some({var}) => {},", nest(&some)));
                w.line("None => 1,");
                w.close("}");
                w.into_expr()
            }
        }
    }

    /// Expression for the payload length of a list-kind value at `v`.
    ///
    /// # Panics
    ///
    /// When `op` is not a `List` or `Struct` node.
    pub fn payload_expr(&mut self, op: &Op, v: &Place) -> String {
        match op {
            Op::List { elem, .. } => {
                let var = self.temp("e");
                let each = self.size_expr(elem, &Place::Borrowed(var.clone()));
                format!(
                    "{}.iter().map(|{var}| {}).sum::<usize>()",
                    v.recv(),
                    nest(&each)
                )
            }
            Op::Struct(s) => self.fields_payload_expr(s, v),
            other => unreachable!("{} nodes have no list payload", other.name()),
        }
    }

    /// Sum of the size expressions of the wire fields of `s` stored at `v`.
    pub fn fields_payload_expr(&mut self, s: &StructOp, v: &Place) -> String {
        let terms: Vec<String> = s
            .wire_fields()
            .map(|(member, op)| self.size_expr(op, &v.field(member)))
            .collect();
        if terms.is_empty() {
            "0".to_owned()
        } else {
            terms.join(" + ")
        }
    }

    /// Statements adding the encoded length of the value at `v` to `acc`.
    ///
    /// The payload length of every list at or below `v` is recorded in
    /// `sizes`, in the order [`write_stmts`](Self::write_stmts) writes their
    /// headers.
    pub fn record_stmts(&mut self, op: &Op, v: &Place, acc: &str, w: &mut CodeWriter) {
        if !op.nests_lists() {
            let size = self.size_expr(op, v);
            w.line(format!("{acc} += {size};"));
            return;
        }
        match op {
            Op::List { elem, .. } => {
                let (slot, n) = self.open_slot(true, w);
                let var = self.temp("e");
                w.open(format!("for {var} in {} {{", v.by_ref()));
                self.record_stmts(elem, &Place::Borrowed(var), &n, w);
                w.close("}");
                self.close_slot(&slot, &n, acc, w);
            }
            Op::Struct(s) => {
                let (slot, n) = self.open_slot(s.wire_fields().next().is_some(), w);
                for (member, field) in s.wire_fields() {
                    self.record_stmts(field, &v.field(member), &n, w);
                }
                self.close_slot(&slot, &n, acc, w);
            }
            Op::Pointer { inner, boxed } => {
                let var = self.temp("p");
                w.open(format!("match {} {{", v.by_ref()));
                w.open(format!("Some({var}) => {{"));
                self.record_stmts(inner, &unwrapped(&var, *boxed), acc, w);
                w.close("}");
                w.line(format!("None => {acc} += 1,"));
                w.close("}");
            }
            other => unreachable!("{} nodes have no list header", other.name()),
        }
    }

    fn open_slot(&mut self, mutated: bool, w: &mut CodeWriter) -> (String, String) {
        let slot = self.temp("s");
        let n = self.temp("n");
        w.line(format!("let {slot} = sizes.reserve();"));
        if mutated {
            w.line(format!("let mut {n} = 0;"));
        } else {
            w.line(format!("let {n} = 0;"));
        }
        (slot, n)
    }

    fn close_slot(&self, slot: &str, n: &str, acc: &str, w: &mut CodeWriter) {
        w.line(format!("sizes.fill({slot}, {n});"));
        w.line(format!("{acc} += {}::header::list_len({n});", self.rt));
    }

    /// Statements writing the value at `v` to `buf`.
    ///
    /// List headers take their payload lengths from `sizes`, as recorded by
    /// [`record_stmts`](Self::record_stmts) for the same value.
    pub fn write_stmts(&mut self, op: &Op, v: &Place, w: &mut CodeWriter) {
        let rt = self.rt;
        match op {
            Op::Raw { .. } => w.line(format!("{rt}::Encode::write_to({}, buf)?;", v.by_ref())),
            Op::Uint { .. } => w.line(format!(
                "{rt}::prim::write_uint(buf, u128::from({}));",
                v.by_val()
            )),
            Op::Bool => w.line(format!("{rt}::prim::write_bool(buf, {});", v.by_val())),
            Op::Big { signed: false } => {
                w.line(format!("{rt}::prim::write_big(buf, {});", v.by_ref()))
            }
            Op::Big { signed: true } => {
                w.line(format!("{rt}::prim::write_signed_big(buf, {})?;", v.by_ref()))
            }
            Op::Bytes | Op::ByteArray { .. } => {
                w.line(format!("{rt}::prim::write_bytes(buf, {});", v.by_ref()))
            }
            Op::Str => w.line(format!("{rt}::prim::write_str(buf, {});", v.by_ref())),
            Op::List { elem, .. } => {
                w.line(format!("{rt}::Header::list(sizes.next_len()).write_to(buf);"));
                let var = self.temp("e");
                w.open(format!("for {var} in {} {{", v.by_ref()));
                self.write_stmts(elem, &Place::Borrowed(var), w);
                w.close("}");
            }
            Op::Struct(s) => {
                w.line(format!("{rt}::Header::list(sizes.next_len()).write_to(buf);"));
                for (member, field) in s.wire_fields() {
                    self.write_stmts(field, &v.field(member), w);
                }
            }
            Op::Pointer { inner, boxed } => {
                let var = self.temp("p");
                w.open(format!("match {} {{", v.by_ref()));
                w.open(format!("Some({var}) => {{"));
                self.write_stmts(inner, &unwrapped(&var, *boxed), w);
                w.close("}");
                w.open("None => {");
                w.line(format!(
                    "{rt}::prim::write_empty(buf, {rt}::Kind::{});",
                    kind_variant(inner.kind())
                ));
                w.close("}");
                w.close("}");
            }
        }
    }

    /// Expression reading one value of `op` from the parser `p`.
    pub fn read_expr(&mut self, op: &Op) -> String {
        let rt = self.rt;
        match op {
            Op::Raw { ty, .. } => format!("<{ty} as {rt}::Decode>::parse(p)?"),
            Op::Uint { bits } => format!("p.take_uint::<u{bits}>()?"),
            Op::Bool => "p.take_bool()?".to_owned(),
            Op::Big { signed: false } => "p.take_biguint()?".to_owned(),
            Op::Big { signed: true } => "p.take_bigint()?".to_owned(),
            Op::Bytes => "p.take_bytes()?.to_vec()".to_owned(),
            Op::ByteArray { len } => format!("p.take_array::<{len}>()?"),
            Op::Str => "p.take_string()?".to_owned(),
            Op::List { elem, elem_ty, len } => {
                let var = self.temp("v");
                let item = self.read_expr(elem);
                let mut w = CodeWriter::new();
                w.open("{");
                w.line("p.open_list()?;");
                w.line(format!("let mut {var} = Vec::new();"));
                w.open("while !p.at_window_end() {");
                w.line(format!("{var}.push({item});"));
                w.close("}");
                w.line("p.close_list()?;");
                match len {
                    None => w.line(&var),
                    Some(n) => w.line(format!(
                        "<[{elem_ty}; {n}]>::try_from({var}).map_err(|rest| {rt}::DecodeError::WrongLength {{ exact: {n}, actual: rest.len() }})?"
                    )),
                }
                w.close("}");
                w.into_expr()
            }
            Op::Struct(s) => {
                let mut w = CodeWriter::new();
                w.open("{");
                let value = self.read_fields(s, &mut w);
                w.line(value);
                w.close("}");
                w.into_expr()
            }
            Op::Pointer { inner, boxed } => {
                let item = self.read_expr(inner);
                let item = if *boxed {
                    format!("Box::new({item})")
                } else {
                    item
                };
                let mut w = CodeWriter::new();
                w.open(format!(
                    "if p.take_empty({rt}::Kind::{})? {{",
                    kind_variant(inner.kind())
                ));
                w.line("None");
                w.close("} else {");
                w.depth += 1;
                w.line(format!("Some({item})"));
                w.close("}");
                w.into_expr()
            }
        }
    }

    /// Writes the statements reading the fields of `s` inside its list
    /// window, returning the expression that constructs the value.
    pub fn read_fields(&mut self, s: &StructOp, w: &mut CodeWriter) -> String {
        w.line("p.open_list()?;");
        for (member, op) in s.wire_fields() {
            let value = self.read_expr(op);
            w.line(format!("let {} = {value};", binding(member)));
        }
        w.line("p.close_list()?;");

        let parts: Vec<String> = s
            .fields
            .iter()
            .map(|f| {
                let value = match f.op {
                    Some(_) => binding(&f.member),
                    None => "Default::default()".to_owned(),
                };
                if s.tuple {
                    value
                } else {
                    format!("{}: {value}", f.member)
                }
            })
            .collect();
        if s.tuple {
            format!("{}({})", s.path, parts.join(", "))
        } else if parts.is_empty() {
            format!("{} {{}}", s.path)
        } else {
            format!("{} {{ {} }}", s.path, parts.join(", "))
        }
    }
}
