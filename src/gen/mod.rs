//! RLP encoder/decoder generator
//!
//! # Overview
//!
//! Given a record type declared in a directory of Rust sources, the generator
//! produces the source of an [`Encode`](crate::Encode) and/or
//! [`Decode`](crate::Decode) implementation for it. The pipeline is a straight
//! line, each stage consuming only the output of the previous one:
//!
//! ```text
//! Namespace --(resolve)--> TypeSchema --(ir)--> StructOp --(emit + ops)--> source text
//! ```
//!
//!   * [`schema`] loads a [`Namespace`] from source files;
//!   * [`resolve`] looks the requested record up and follows aliases;
//!   * [`ir`] classifies every field into an [`Op`](ir::Op) node;
//!   * [`ops`] knows the size, write and read fragments of every node kind;
//!   * [`emit`] lays the fragments out into the generated routines.
//!
//! Generation either produces the complete source or fails with a
//! [`GenError`] naming the offending type and field; there is no partial
//! output.
//!
//! The [`eval`] module interprets the same IR directly over dynamic values,
//! which makes the wire format of every node kind testable without compiling
//! generated code.
//!
//! [`config`] wraps the pipeline into the file-level driver used by the
//! `rlpgen` binary.

pub mod config;
pub mod emit;
pub mod error;
pub mod eval;
pub mod ir;
pub mod ops;
pub mod resolve;
pub mod schema;

pub use config::{Config, GENERATED_MARKER};
pub use error::{GenError, GenResult};
pub use schema::Namespace;

use ir::{Builder, StructOp};
use resolve::Resolver;

/// Options of one generation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenOptions {
    /// Emit the size helper and the `Encode` implementation
    pub encoder: bool,
    /// Emit the `Decode` implementation
    pub decoder: bool,
    /// Path of the runtime crate in the generated code
    pub runtime_path: String,
}

impl Default for GenOptions {
    fn default() -> Self {
        Self {
            encoder: true,
            decoder: false,
            runtime_path: String::from("rlpgen"),
        }
    }
}

/// Resolves `type_name` in `ns` and builds its IR, returning the name of the
/// resolved record alongside it.
pub fn build_ir(ns: &Namespace, type_name: &str, opts: &GenOptions) -> GenResult<(String, StructOp)> {
    let resolver = Resolver::new(ns);
    let schema = resolver.resolve(type_name)?;
    let root = Builder::new(&resolver, opts).build(&schema)?;
    Ok((schema.name, root))
}

/// Generates the routines requested by `opts` for the record `type_name`.
///
/// # Errors
///
/// Any resolution or classification failure, and `InvalidConfig` when
/// neither routine is requested.
pub fn generate(ns: &Namespace, type_name: &str, opts: &GenOptions) -> GenResult<String> {
    if !opts.encoder && !opts.decoder {
        return Err(GenError::InvalidConfig(
            "at least one of encoder and decoder must be generated".to_owned(),
        ));
    }
    let (name, root) = build_ir(ns, type_name, opts)?;
    Ok(emit::emit(&name, &root, opts))
}
