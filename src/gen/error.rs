use std::path::PathBuf;

use thiserror::Error;

/// Failure of one generation request
///
/// Generation is all-or-nothing: any of these aborts the request before a
/// single line of output is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenError {
    #[error("unknown type `{name}`")]
    UnknownType { name: String },

    #[error("type `{name}` is not a struct ({found})")]
    NotAStruct { name: String, found: String },

    #[error("field `{owner}.{field}` has unsupported type `{ty}`: {detail}")]
    UnsupportedType {
        owner: String,
        field: String,
        ty: String,
        detail: String,
    },

    #[error("recursive schema: {}", .path.join(" -> "))]
    RecursiveSchema { path: Vec<String> },

    #[error("field `{owner}.{field}` is required but follows optional field `{after}`")]
    NonTrailingOptional {
        owner: String,
        field: String,
        after: String,
    },

    #[error("cannot load namespace at {}: {reason}", .path.display())]
    NamespaceLoad { path: PathBuf, reason: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type GenResult<T> = Result<T, GenError>;
