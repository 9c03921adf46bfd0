//! File-level driver of the generator
//!
//! A [`Config`] names a schema directory and a record type in it, and says
//! which routines to produce. [`Config::process`] runs the whole pipeline and
//! returns the complete contents of the generated file.

use std::path::PathBuf;

use tracing::info;

use super::error::{GenError, GenResult};
use super::schema::{Contract, Namespace};
use super::{generate, GenOptions};

/// First line of every generated file.
///
/// Files starting with it are skipped when loading a schema directory, so
/// that a generated file may live next to its schema.
pub const GENERATED_MARKER: &str = "// Code generated by rlpgen. DO NOT EDIT.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding the schema sources
    pub dir: PathBuf,
    /// Name of the record to generate routines for
    pub type_name: String,
    pub generate_encoder: bool,
    pub generate_decoder: bool,
    /// Additional types treated as opaque, pre-encoded items
    pub raw_types: Vec<String>,
    /// Path of the runtime crate in the generated code
    pub runtime_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            type_name: String::new(),
            generate_encoder: true,
            generate_decoder: false,
            raw_types: Vec::new(),
            runtime_path: String::from("rlpgen"),
        }
    }
}

impl Config {
    #[must_use]
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> GenResult<()> {
        let invalid = |msg: String| Err(GenError::InvalidConfig(msg));
        if self.type_name.trim().is_empty() {
            return invalid("no type name given".to_owned());
        }
        if !self.generate_encoder && !self.generate_decoder {
            return invalid("at least one of encoder and decoder must be generated".to_owned());
        }
        if syn::parse_str::<syn::Path>(&self.runtime_path).is_err() {
            return invalid(format!("`{}` is not a valid crate path", self.runtime_path));
        }
        if self.raw_types.iter().any(|name| name.trim().is_empty()) {
            return invalid("empty raw type name".to_owned());
        }
        Ok(())
    }

    #[must_use]
    pub fn options(&self) -> GenOptions {
        GenOptions {
            encoder: self.generate_encoder,
            decoder: self.generate_decoder,
            runtime_path: self.runtime_path.clone(),
        }
    }

    /// Loads the schema directory and generates the requested routines,
    /// returning the full text of the output file.
    pub fn process(&self) -> GenResult<String> {
        self.validate()?;
        let mut ns = Namespace::load(&self.dir)?;
        for name in &self.raw_types {
            ns.declare_contract(name.trim(), Contract::BOTH);
        }
        let code = generate(&ns, self.type_name.trim(), &self.options())?;
        info!(
            record = %self.type_name,
            dir = %self.dir.display(),
            "generated"
        );
        Ok(format!("{GENERATED_MARKER}\n\n{code}"))
    }
}
