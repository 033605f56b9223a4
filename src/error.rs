//! Error types for the descriptor-proto-gen crate.

use std::path::PathBuf;

/// Errors that can occur while generating a schema document.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The supplied package name is not a dot-separated identifier sequence.
    #[error("invalid package name '{0}': expected dot-separated identifiers")]
    InvalidPackageName(String),

    /// A CLI `--option` argument was not of the form `KEY=VALUE`.
    #[error("invalid option '{0}': expected KEY=VALUE")]
    InvalidOption(String),

    /// A collected declaration is neither message- nor enum-shaped.
    #[error("type '{serial_name}' of kind {kind} cannot appear as a top-level schema declaration")]
    UnsupportedDeclaration {
        serial_name: String,
        kind: &'static str,
    },

    /// A map key type is not a legal protobuf map key (floating-point,
    /// byte-string, or any non-scalar type).
    #[error("type '{serial_name}' of kind {kind} is not a valid protobuf map key")]
    InvalidMapKey {
        serial_name: String,
        kind: &'static str,
    },

    /// A list element or map value is itself a list or map.
    #[error("protobuf does not support nested collections: {context} '{serial_name}' is a {kind}")]
    NestedCollection {
        context: &'static str,
        serial_name: String,
        kind: &'static str,
    },

    /// A type cannot be referenced by name from a field position.
    #[error("type '{serial_name}' of kind {kind} is not a named protobuf type")]
    NotNamedType {
        serial_name: String,
        kind: &'static str,
    },

    /// A named type was referenced but never collected as a declaration.
    #[error("no schema declaration was collected for type '{serial_name}'")]
    Unresolved { serial_name: String },

    /// A schema-constraint violation, attributed to the owning message field.
    /// The underlying violation is carried as the error source.
    #[error("field '{field}' of message '{identifier}' (serial name '{serial_name}')")]
    Field {
        identifier: String,
        serial_name: String,
        field: String,
        source: Box<Error>,
    },

    /// Any non-constraint error raised while resolving a single field;
    /// distinguishes internal bugs from predictable schema-shape problems.
    #[error(
        "unexpected error in field '{field}' of message '{identifier}' (serial name '{serial_name}')"
    )]
    Unexpected {
        identifier: String,
        serial_name: String,
        field: String,
        source: Box<Error>,
    },

    /// Failed to read a descriptor file from disk.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write the generated schema.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Descriptor JSON parse error.
    #[error("failed to parse descriptor JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error is a predictable schema-constraint violation, as
    /// opposed to an internal or I/O failure.
    pub fn is_schema_violation(&self) -> bool {
        matches!(
            self,
            Error::InvalidPackageName(_)
                | Error::UnsupportedDeclaration { .. }
                | Error::InvalidMapKey { .. }
                | Error::NestedCollection { .. }
                | Error::NotNamedType { .. }
                | Error::Unresolved { .. }
        )
    }
}

/// Convenience alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
