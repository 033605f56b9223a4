//! Identifier sanitization and protobuf type-name utilities.
//!
//! # Scalar Mapping Table
//!
//! | Scalar | Default | Signed (zig-zag) | Fixed |
//! |--------|---------|------------------|-------|
//! | `boolean` | `bool` | — | — |
//! | `byte`, `short`, `int`, `char` | `int32` | `sint32` | `fixed32` |
//! | `long` | `int64` | `sint64` | `fixed64` |
//! | `float` | `float` | — | — |
//! | `double` | `double` | — | — |
//! | `string` | `string` | — | — |
//!
//! The integer-representation override only changes the token for 32- and
//! 64-bit integers; it is ignored for every other scalar.

use crate::descriptor::{IntegerKind, ScalarType};

/// Map a scalar type to its protobuf type token, honoring the
/// integer-representation override for 32/64-bit integers.
pub fn scalar_type_name(scalar: ScalarType, integer_kind: IntegerKind) -> &'static str {
    match scalar {
        ScalarType::Boolean => "bool",
        ScalarType::Byte | ScalarType::Short | ScalarType::Int | ScalarType::Char => {
            match integer_kind {
                IntegerKind::Default => "int32",
                IntegerKind::Signed => "sint32",
                IntegerKind::Fixed => "fixed32",
            }
        }
        ScalarType::Long => match integer_kind {
            IntegerKind::Default => "int64",
            IntegerKind::Signed => "sint64",
            IntegerKind::Fixed => "fixed64",
        },
        ScalarType::Float => "float",
        ScalarType::Double => "double",
        ScalarType::String => "string",
    }
}

/// Sanitize an arbitrary name into a legal protobuf identifier.
///
/// Characters outside `[A-Za-z0-9_]` become `_`; if the result still does not
/// match `[A-Za-z][A-Za-z0-9_]*` (empty, or starting with a digit or
/// underscore), it is prefixed with `a`.
///
/// - `"my-field"` → `"my_field"`
/// - `"123abc"` → `"a123abc"`
/// - `"_tmp"` → `"a_tmp"`
pub fn sanitize_identifier(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if is_identifier(&sanitized) {
        sanitized
    } else {
        format!("a{sanitized}")
    }
}

/// The last dot-separated segment of a serial name, used as the basis for
/// declaration identifiers.
///
/// `"com.example.Order"` → `"Order"`.
pub fn last_segment(serial_name: &str) -> &str {
    serial_name.rsplit('.').next().unwrap_or(serial_name)
}

/// Check a package name against the protobuf "full identifier" grammar:
/// one or more legal identifiers separated by dots.
pub fn is_valid_package_name(name: &str) -> bool {
    !name.is_empty() && name.split('.').all(is_identifier)
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_mapping() {
        assert_eq!(scalar_type_name(ScalarType::Boolean, IntegerKind::Default), "bool");
        assert_eq!(scalar_type_name(ScalarType::Float, IntegerKind::Default), "float");
        assert_eq!(scalar_type_name(ScalarType::Double, IntegerKind::Default), "double");
        assert_eq!(scalar_type_name(ScalarType::String, IntegerKind::Default), "string");
    }

    #[test]
    fn integer_representation_selection() {
        assert_eq!(scalar_type_name(ScalarType::Int, IntegerKind::Default), "int32");
        assert_eq!(scalar_type_name(ScalarType::Int, IntegerKind::Signed), "sint32");
        assert_eq!(scalar_type_name(ScalarType::Int, IntegerKind::Fixed), "fixed32");
        assert_eq!(scalar_type_name(ScalarType::Long, IntegerKind::Default), "int64");
        assert_eq!(scalar_type_name(ScalarType::Long, IntegerKind::Signed), "sint64");
        assert_eq!(scalar_type_name(ScalarType::Long, IntegerKind::Fixed), "fixed64");
    }

    #[test]
    fn narrow_integers_share_the_int32_family() {
        for scalar in [ScalarType::Byte, ScalarType::Short, ScalarType::Char] {
            assert_eq!(scalar_type_name(scalar, IntegerKind::Default), "int32");
            assert_eq!(scalar_type_name(scalar, IntegerKind::Signed), "sint32");
        }
    }

    #[test]
    fn representation_override_ignored_for_non_integers() {
        assert_eq!(scalar_type_name(ScalarType::String, IntegerKind::Fixed), "string");
        assert_eq!(scalar_type_name(ScalarType::Double, IntegerKind::Signed), "double");
    }

    #[test]
    fn sanitize_replaces_illegal_characters() {
        assert_eq!(sanitize_identifier("my-field"), "my_field");
        assert_eq!(sanitize_identifier("Order"), "Order");
        assert_eq!(sanitize_identifier("weird name!"), "weird_name_");
        assert_eq!(sanitize_identifier("caf\u{e9}"), "caf_");
    }

    #[test]
    fn sanitize_prefixes_illegal_starts() {
        assert_eq!(sanitize_identifier("123abc"), "a123abc");
        assert_eq!(sanitize_identifier("_tmp"), "a_tmp");
        assert_eq!(sanitize_identifier(""), "a");
        assert_eq!(sanitize_identifier("!"), "a_");
    }

    #[test]
    fn last_segment_of_serial_name() {
        assert_eq!(last_segment("com.example.Order"), "Order");
        assert_eq!(last_segment("Order"), "Order");
        assert_eq!(last_segment("a.b.c."), "");
    }

    #[test]
    fn package_name_validation() {
        assert!(is_valid_package_name("my.pkg"));
        assert!(is_valid_package_name("a"));
        assert!(is_valid_package_name("a1.b_2.c"));
        assert!(!is_valid_package_name(""));
        assert!(!is_valid_package_name("1bad"));
        assert!(!is_valid_package_name("a..b"));
        assert!(!is_valid_package_name("a.b-c"));
        assert!(!is_valid_package_name(".a"));
        assert!(!is_valid_package_name("_a.b"));
    }
}
