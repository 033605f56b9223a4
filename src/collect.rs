//! Discovery and deduplication of named types reachable from a descriptor set.
//!
//! The collector walks the descriptor graph with an explicit work list and an
//! insertion-ordered visited map keyed by serial name. Each distinct custom
//! type is collected exactly once, in first-seen order; re-encountering a
//! serial name is a no-op, which both deduplicates shared types and
//! terminates recursive ones.

use std::collections::{HashSet, VecDeque};

use indexmap::IndexMap;

use crate::descriptor::TypeDescriptor;
use crate::ident::{last_segment, sanitize_identifier};

/// A collected custom type paired with its unique schema identifier.
///
/// The identifier is the sanitized last dot-segment of the serial name,
/// suffixed with `_2`, `_3`, … when it collides with an earlier declaration.
/// Created once per distinct serial name and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomTypeDeclaration<'a> {
    pub identifier: String,
    pub descriptor: &'a TypeDescriptor,
}

/// Collect every distinct custom type reachable from `roots`, in first-seen
/// order.
///
/// Scalars, byte strings, and contextual types are never collected. Lists and
/// maps are transparent: the walk continues into their element and value
/// types (map keys are always scalar and need no collection). Sealed
/// polymorphic types contribute their concrete variants; open polymorphic
/// types are collected as a single placeholder without recursing, since their
/// variants are resolved outside generation time.
pub fn collect(roots: &[TypeDescriptor]) -> Vec<CustomTypeDeclaration<'_>> {
    let mut seen: IndexMap<&str, &TypeDescriptor> = IndexMap::new();
    let mut queue: VecDeque<&TypeDescriptor> = roots.iter().collect();

    while let Some(descriptor) = queue.pop_front() {
        match descriptor {
            desc if desc.is_byte_string() => {}

            TypeDescriptor::Scalar { .. } | TypeDescriptor::Contextual { .. } => {}

            TypeDescriptor::List { element, .. } => queue.push_back(element),

            TypeDescriptor::Map { value, .. } => queue.push_back(value),

            TypeDescriptor::Record { serial_name, fields } => {
                if !seen.contains_key(serial_name.as_str()) {
                    seen.insert(serial_name, descriptor);
                    for field in fields {
                        queue.push_back(&field.descriptor);
                    }
                }
            }

            TypeDescriptor::Enum { serial_name, .. } | TypeDescriptor::Open { serial_name } => {
                seen.entry(serial_name).or_insert(descriptor);
            }

            TypeDescriptor::Sealed { serial_name, variants } => {
                if !seen.contains_key(serial_name.as_str()) {
                    seen.insert(serial_name, descriptor);
                    for variant in variants {
                        queue.push_back(variant);
                    }
                }
            }
        }
    }

    assign_identifiers(seen)
}

/// Derive a unique schema identifier for each collected descriptor.
fn assign_identifiers<'a>(
    seen: IndexMap<&str, &'a TypeDescriptor>,
) -> Vec<CustomTypeDeclaration<'a>> {
    let mut used: HashSet<String> = HashSet::new();
    let mut declarations = Vec::with_capacity(seen.len());

    for (serial_name, descriptor) in seen {
        let base = sanitize_identifier(last_segment(serial_name));
        let mut identifier = base.clone();
        let mut suffix = 1u32;
        while !used.insert(identifier.clone()) {
            suffix += 1;
            identifier = format!("{base}_{suffix}");
        }
        declarations.push(CustomTypeDeclaration {
            identifier,
            descriptor,
        });
    }

    declarations
}
