//! The structural type-descriptor model and JSON loading.
//!
//! A [`TypeDescriptor`] describes the shape of one serializable value. The
//! set of shapes is closed: every dispatch in the generator matches on it
//! exhaustively, so adding a kind is a compile-time obligation rather than a
//! runtime "unrecognized kind" failure.
//!
//! Descriptors are identified by their `serialName` (a dotted,
//! framework-qualified name). The model is an owned tree, so a recursive type
//! is represented by re-stating a node with the same serial name (a stub is
//! enough); the collector deduplicates by serial name and keeps the
//! first-seen shape.

use std::num::NonZeroU32;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// The shape of one serializable type.
///
/// Loaded from JSON as an internally tagged enum, e.g.
/// `{"kind": "record", "serialName": "com.example.Order", "fields": [...]}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum TypeDescriptor {
    /// A primitive value (integer, float, boolean, character, or text).
    Scalar {
        serial_name: String,
        scalar: ScalarType,
    },

    /// An ordered collection of one element type.
    ///
    /// A list of [`ScalarType::Byte`] is a byte string: it renders as the
    /// protobuf scalar `bytes` and is never collected as a named type.
    List {
        serial_name: String,
        element: Box<TypeDescriptor>,
    },

    /// A key/value mapping. Keys are always scalar in practice; the emitter
    /// validates this and rejects floating-point and byte-string keys.
    Map {
        serial_name: String,
        key: Box<TypeDescriptor>,
        value: Box<TypeDescriptor>,
    },

    /// A fixed-field record; becomes a protobuf `message`.
    Record {
        serial_name: String,
        fields: Vec<FieldDescriptor>,
    },

    /// An enumeration; becomes a protobuf `enum` with zero-based ordinals.
    Enum {
        serial_name: String,
        variants: Vec<EnumVariant>,
    },

    /// A closed family of concrete types, all known up front.
    Sealed {
        serial_name: String,
        variants: Vec<TypeDescriptor>,
    },

    /// An open family of concrete types, resolved outside generation time.
    Open { serial_name: String },

    /// A type whose encoding is resolved externally; rendered as opaque
    /// `bytes` and never collected.
    Contextual { serial_name: String },
}

impl TypeDescriptor {
    /// The framework-qualified serial name of this type.
    pub fn serial_name(&self) -> &str {
        match self {
            Self::Scalar { serial_name, .. }
            | Self::List { serial_name, .. }
            | Self::Map { serial_name, .. }
            | Self::Record { serial_name, .. }
            | Self::Enum { serial_name, .. }
            | Self::Sealed { serial_name, .. }
            | Self::Open { serial_name }
            | Self::Contextual { serial_name } => serial_name,
        }
    }

    /// Human-readable kind label used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Scalar { .. } => "scalar",
            Self::List { .. } => "list",
            Self::Map { .. } => "map",
            Self::Record { .. } => "record",
            Self::Enum { .. } => "enum",
            Self::Sealed { .. } => "sealed polymorphic",
            Self::Open { .. } => "open polymorphic",
            Self::Contextual { .. } => "contextual",
        }
    }

    /// Whether this descriptor is a list of bytes, which renders as the
    /// protobuf scalar `bytes` rather than a repeated field.
    pub fn is_byte_string(&self) -> bool {
        matches!(
            self,
            Self::List { element, .. } if matches!(
                element.as_ref(),
                Self::Scalar { scalar: ScalarType::Byte, .. }
            )
        )
    }
}

/// The closed set of primitive value types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarType {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Char,
    String,
}

/// Wire representation override for 32/64-bit integer fields.
///
/// Only affects integer scalars; `Signed` selects the zig-zag `sint*` tokens
/// and `Fixed` the fixed-width `fixed*` tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegerKind {
    #[default]
    Default,
    Signed,
    Fixed,
}

/// One element of a record or polymorphic descriptor.
///
/// Per-field metadata is resolved into typed attributes at the interface
/// boundary: `number` is the explicit field-number override and
/// `integer_kind` the integer-representation override.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    /// Declared field name; sanitized before emission.
    pub name: String,

    /// The field's own type descriptor.
    #[serde(rename = "type")]
    pub descriptor: TypeDescriptor,

    /// Whether the field is optional with a default value. Proto2 cannot
    /// express the default itself; the emitter attaches an advisory comment.
    #[serde(default)]
    pub optional: bool,

    /// Explicit field-number override. Absent, fields number `1 + index`.
    #[serde(default)]
    pub number: Option<NonZeroU32>,

    /// Integer wire-representation override.
    #[serde(default)]
    pub integer_kind: IntegerKind,
}

impl FieldDescriptor {
    /// A required field with no metadata overrides.
    pub fn new(name: impl Into<String>, descriptor: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            descriptor,
            optional: false,
            number: None,
            integer_kind: IntegerKind::Default,
        }
    }
}

/// One variant of an enumeration descriptor.
///
/// The emitted variant identifier is the sanitized last dot-segment of the
/// serial name; the ordinal is the variant's position.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumVariant {
    pub serial_name: String,
}

/// Load a descriptor set from a JSON file containing an array of descriptors.
pub fn load_descriptors(path: &Path) -> Result<Vec<TypeDescriptor>> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    let descriptors: Vec<TypeDescriptor> = serde_json::from_str(&content)?;
    Ok(descriptors)
}
