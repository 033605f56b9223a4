//! Proto2 schema-document generation from collected type declarations.
//!
//! Renders a complete schema document: header (syntax, package, options)
//! followed by one message or enum block per collected type, in discovery
//! order. The output is deterministic: identical input always produces
//! byte-identical output.
//!
//! The generator only emits schemas that satisfy protobuf's own constraints:
//! illegal map keys, nested collections, and unresolvable named types abort
//! generation with a field-attributed error. The one advisory that does not
//! abort is a field carrying a default value, which proto2 syntax cannot
//! express; it is reported as a schema comment plus a stderr warning.

use std::collections::HashMap;
use std::fmt::Write;

use indexmap::IndexMap;

use crate::collect::{collect, CustomTypeDeclaration};
use crate::descriptor::{EnumVariant, FieldDescriptor, ScalarType, TypeDescriptor};
use crate::error::{Error, Result};
use crate::ident::{is_valid_package_name, last_segment, sanitize_identifier, scalar_type_name};

/// Statistics collected during generation for reporting.
#[derive(Debug, Default)]
pub struct GenerationStats {
    pub messages_generated: usize,
    pub enums_generated: usize,
    pub fields_renamed: usize,
    pub default_value_advisories: usize,
}

/// Generate a proto2 schema document for the given descriptor set.
///
/// `package` must satisfy the protobuf full-identifier grammar (dot-separated
/// identifiers) when present; the call fails before any traversal otherwise.
/// `options` are rendered verbatim as `option <key> = "<value>";` lines in
/// iteration order, with no escaping beyond the surrounding quotes.
pub fn generate(
    descriptors: &[TypeDescriptor],
    package: Option<&str>,
    options: &IndexMap<String, String>,
) -> Result<String> {
    let mut stats = GenerationStats::default();
    generate_with_stats(descriptors, package, options, &mut stats)
}

/// Like [`generate`], additionally accumulating [`GenerationStats`].
pub fn generate_with_stats(
    descriptors: &[TypeDescriptor],
    package: Option<&str>,
    options: &IndexMap<String, String>,
    stats: &mut GenerationStats,
) -> Result<String> {
    validate_package(package)?;
    let declarations = collect(descriptors);
    emit(&declarations, package, options, stats)
}

/// Render already-collected declarations into a schema document.
///
/// The package name is validated before anything is rendered.
pub fn emit(
    declarations: &[CustomTypeDeclaration<'_>],
    package: Option<&str>,
    options: &IndexMap<String, String>,
    stats: &mut GenerationStats,
) -> Result<String> {
    validate_package(package)?;

    let idents: HashMap<&str, &str> = declarations
        .iter()
        .map(|d| (d.descriptor.serial_name(), d.identifier.as_str()))
        .collect();

    let mut out = String::new();
    writeln!(out, "syntax = \"proto2\";").unwrap();

    if let Some(pkg) = package {
        writeln!(out).unwrap();
        writeln!(out, "package {pkg};").unwrap();
    }

    if !options.is_empty() {
        writeln!(out).unwrap();
        for (key, value) in options {
            writeln!(out, "option {key} = \"{value}\";").unwrap();
        }
    }

    for decl in declarations {
        writeln!(out).unwrap();
        writeln!(
            out,
            "// serial name '{}'",
            one_line(decl.descriptor.serial_name())
        )
        .unwrap();

        match decl.descriptor {
            TypeDescriptor::Record {
                serial_name,
                fields,
            } => write_message(&mut out, &decl.identifier, serial_name, fields, &idents, stats)?,
            TypeDescriptor::Enum { variants, .. } => {
                write_enum(&mut out, &decl.identifier, variants, stats);
            }
            TypeDescriptor::Sealed { variants, .. } => {
                write_polymorphic_message(&mut out, &decl.identifier, Some(variants.as_slice()), stats);
            }
            TypeDescriptor::Open { .. } => {
                write_polymorphic_message(&mut out, &decl.identifier, None, stats);
            }
            other => {
                return Err(Error::UnsupportedDeclaration {
                    serial_name: other.serial_name().to_string(),
                    kind: other.kind_name(),
                });
            }
        }
    }

    Ok(out)
}

fn validate_package(package: Option<&str>) -> Result<()> {
    match package {
        Some(pkg) if !is_valid_package_name(pkg) => Err(Error::InvalidPackageName(pkg.to_string())),
        _ => Ok(()),
    }
}

// ── Message generation ─────────────────────────────────────────────────

fn write_message(
    out: &mut String,
    identifier: &str,
    serial_name: &str,
    fields: &[FieldDescriptor],
    idents: &HashMap<&str, &str>,
    stats: &mut GenerationStats,
) -> Result<()> {
    writeln!(out, "message {identifier} {{").unwrap();
    for (index, field) in fields.iter().enumerate() {
        write_field(out, identifier, serial_name, field, index, idents, stats)?;
    }
    writeln!(out, "}}").unwrap();
    stats.messages_generated += 1;
    Ok(())
}

fn write_field(
    out: &mut String,
    message_ident: &str,
    message_serial: &str,
    field: &FieldDescriptor,
    index: usize,
    idents: &HashMap<&str, &str>,
    stats: &mut GenerationStats,
) -> Result<()> {
    let field_ident = sanitize_identifier(&field.name);
    if field_ident != field.name {
        writeln!(out, "  // original field name '{}'", one_line(&field.name)).unwrap();
        stats.fields_renamed += 1;
    }

    if field.optional {
        writeln!(
            out,
            "  // WARNING: a default value is applied when this field is missing from the input"
        )
        .unwrap();
        eprintln!(
            "warning: field '{field_ident}' of '{message_serial}' has a default value that proto2 cannot express"
        );
        stats.default_value_advisories += 1;
    }

    match &field.descriptor {
        TypeDescriptor::Contextual { .. } => {
            writeln!(out, "  // contextual type, encoded as opaque bytes").unwrap();
        }
        TypeDescriptor::Sealed { variants, .. } => {
            writeln!(out, "  // polymorphic value; known concrete types:").unwrap();
            for variant in variants {
                writeln!(out, "  //   '{}'", one_line(variant.serial_name())).unwrap();
            }
        }
        _ => {}
    }

    let body = render_field_body(field, idents).map_err(|e| {
        if e.is_schema_violation() {
            Error::Field {
                identifier: message_ident.to_string(),
                serial_name: message_serial.to_string(),
                field: field_ident.clone(),
                source: Box::new(e),
            }
        } else {
            Error::Unexpected {
                identifier: message_ident.to_string(),
                serial_name: message_serial.to_string(),
                field: field_ident.clone(),
                source: Box::new(e),
            }
        }
    })?;

    let number = field.number.map(|n| n.get()).unwrap_or(index as u32 + 1);
    writeln!(out, "  {body} {field_ident} = {number};").unwrap();
    Ok(())
}

/// Render everything before the field identifier: the `required`/`optional`
/// label plus type, `repeated <type>`, or `map<K, V>`.
fn render_field_body(field: &FieldDescriptor, idents: &HashMap<&str, &str>) -> Result<String> {
    let label = if field.optional { "optional" } else { "required" };

    match &field.descriptor {
        desc if desc.is_byte_string() => Ok(format!("{label} bytes")),

        TypeDescriptor::List { element, .. } => {
            let element = element.as_ref();
            if element.is_byte_string() {
                return Ok("repeated bytes".to_string());
            }
            match element {
                TypeDescriptor::List { .. } | TypeDescriptor::Map { .. } => {
                    Err(Error::NestedCollection {
                        context: "list element",
                        serial_name: element.serial_name().to_string(),
                        kind: element.kind_name(),
                    })
                }
                _ => Ok(format!("repeated {}", type_name(element, field, idents)?)),
            }
        }

        TypeDescriptor::Map { key, value, .. } => {
            let key_name = map_key_type_name(key, field)?;
            let value = value.as_ref();
            let value_name = if value.is_byte_string() {
                "bytes".to_string()
            } else {
                match value {
                    TypeDescriptor::List { .. } | TypeDescriptor::Map { .. } => {
                        return Err(Error::NestedCollection {
                            context: "map value",
                            serial_name: value.serial_name().to_string(),
                            kind: value.kind_name(),
                        });
                    }
                    _ => type_name(value, field, idents)?,
                }
            };
            Ok(format!("map<{key_name}, {value_name}>"))
        }

        desc => Ok(format!("{label} {}", type_name(desc, field, idents)?)),
    }
}

/// Resolve the protobuf type token for a scalar, contextual, or named type.
fn type_name(
    descriptor: &TypeDescriptor,
    field: &FieldDescriptor,
    idents: &HashMap<&str, &str>,
) -> Result<String> {
    match descriptor {
        desc if desc.is_byte_string() => Ok("bytes".to_string()),
        TypeDescriptor::Scalar { scalar, .. } => {
            Ok(scalar_type_name(*scalar, field.integer_kind).to_string())
        }
        TypeDescriptor::Contextual { .. } => Ok("bytes".to_string()),
        TypeDescriptor::Record { .. }
        | TypeDescriptor::Enum { .. }
        | TypeDescriptor::Sealed { .. }
        | TypeDescriptor::Open { .. } => idents
            .get(descriptor.serial_name())
            .map(|ident| ident.to_string())
            .ok_or_else(|| Error::Unresolved {
                serial_name: descriptor.serial_name().to_string(),
            }),
        TypeDescriptor::List { .. } | TypeDescriptor::Map { .. } => Err(Error::NotNamedType {
            serial_name: descriptor.serial_name().to_string(),
            kind: descriptor.kind_name(),
        }),
    }
}

/// Resolve a map key type, which must be an integral, boolean, or string
/// scalar. Floating-point scalars, byte strings, and non-scalar types are
/// rejected.
fn map_key_type_name(key: &TypeDescriptor, field: &FieldDescriptor) -> Result<&'static str> {
    match key {
        k if k.is_byte_string() => Err(Error::InvalidMapKey {
            serial_name: k.serial_name().to_string(),
            kind: "byte string",
        }),
        TypeDescriptor::Scalar {
            serial_name,
            scalar: ScalarType::Float | ScalarType::Double,
        } => Err(Error::InvalidMapKey {
            serial_name: serial_name.clone(),
            kind: "floating-point scalar",
        }),
        TypeDescriptor::Scalar { scalar, .. } => Ok(scalar_type_name(*scalar, field.integer_kind)),
        other => Err(Error::InvalidMapKey {
            serial_name: other.serial_name().to_string(),
            kind: other.kind_name(),
        }),
    }
}

// ── Enum generation ────────────────────────────────────────────────────

/// Write an enum block with zero-based ordinals.
///
/// Variant identifiers are sanitized independently and are not deduplicated
/// against each other within the enum; two variants whose sanitized names
/// collide produce duplicate identifiers (known gap, kept as observed).
fn write_enum(
    out: &mut String,
    identifier: &str,
    variants: &[EnumVariant],
    stats: &mut GenerationStats,
) {
    writeln!(out, "enum {identifier} {{").unwrap();
    for (ordinal, variant) in variants.iter().enumerate() {
        let variant_ident = sanitize_identifier(last_segment(&variant.serial_name));
        writeln!(out, "  {variant_ident} = {ordinal};").unwrap();
    }
    writeln!(out, "}}").unwrap();
    stats.enums_generated += 1;
}

// ── Polymorphic placeholder generation ─────────────────────────────────

/// Write the synthetic message for a polymorphic type: a discriminator plus
/// an opaque payload. Sealed types document their known concrete variants;
/// open types note that resolution happens at runtime.
fn write_polymorphic_message(
    out: &mut String,
    identifier: &str,
    variants: Option<&[TypeDescriptor]>,
    stats: &mut GenerationStats,
) {
    writeln!(out, "message {identifier} {{").unwrap();
    writeln!(out, "  required string type = 1;").unwrap();
    match variants {
        Some(variants) => {
            writeln!(out, "  // payload is one of the following concrete types:").unwrap();
            for variant in variants {
                writeln!(out, "  //   '{}'", one_line(variant.serial_name())).unwrap();
            }
        }
        None => writeln!(out, "  // payload type is resolved at runtime").unwrap(),
    }
    writeln!(out, "  required bytes value = 2;").unwrap();
    writeln!(out, "}}").unwrap();
    stats.messages_generated += 1;
}

/// Collapse a serial name onto one line for use inside comments.
fn one_line(s: &str) -> String {
    s.replace(['\n', '\r'], " ")
}
