use thiserror::Error;

use crate::codec::ObjectFormat;
use crate::resolution::path::FieldPath;
use crate::types::{ObjectIdentity, ObjectType};

/// A reference slot names an object that is absent from the reference
/// universe, or present only under another kind or version.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{expected} '{name}' referenced at '{field_path}' does not exist")]
pub struct ReferenceNotFound {
    /// Version and kind the reference should resolve to.
    pub expected: ObjectType,
    /// Path from the top-level object to the broken reference field.
    pub field_path: FieldPath,
    /// The unresolved name.
    pub name: String,
}

impl ReferenceNotFound {
    pub fn new(expected: ObjectType, field_path: FieldPath, name: impl Into<String>) -> Self {
        Self {
            expected,
            field_path,
            name: name.into(),
        }
    }
}

/// Errors that can occur while decoding, validating or resolving objects.
#[derive(Error, Debug)]
pub enum OpenSloError {
    #[error("failed to inline {object}: {source}")]
    Inline {
        object: ObjectIdentity,
        #[source]
        source: ReferenceNotFound,
    },

    #[error("decode error: {message} (format: {format})")]
    Decode { message: String, format: ObjectFormat },

    #[error("encode error: {message} (format: {format})")]
    Encode { message: String, format: ObjectFormat },

    #[error("validation error: {object}: {message}")]
    Validation { object: ObjectIdentity, message: String },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("input error: {message} (path: {path})")]
    Input { message: String, path: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Convenience alias for results using `OpenSloError`.
pub type Result<T> = std::result::Result<T, OpenSloError>;
