//! Generate proto2 schema documents from structural type descriptors.
//!
//! `descriptor-proto-gen` turns a set of in-memory type descriptors — each
//! describing the shape of a serializable value — into a textual schema
//! compatible with the Protocol Buffers IDL (proto2 dialect), for
//! serialization frameworks whose wire encoding already follows protobuf
//! conventions.
//!
//! # Features
//!
//! - Collects every distinct named type reachable from the input descriptors,
//!   exactly once, in first-seen order
//! - Emits messages for records, enums for enumerations, and synthetic
//!   placeholder messages for polymorphic hierarchies
//! - Sanitizes arbitrary serial names into legal, collision-free identifiers
//! - Honors per-field metadata: field-number overrides and integer
//!   wire-representation overrides (`sint*`/`fixed*`)
//! - Rejects schemas protobuf itself would reject (illegal map keys, nested
//!   collections) with field-attributed errors
//! - Deterministic output: byte-identical across runs
//!
//! # Usage
//!
//! ```
//! use descriptor_proto_gen::codegen;
//! use descriptor_proto_gen::descriptor::{FieldDescriptor, ScalarType, TypeDescriptor};
//! use indexmap::IndexMap;
//!
//! let order = TypeDescriptor::Record {
//!     serial_name: "com.example.Order".to_string(),
//!     fields: vec![FieldDescriptor::new(
//!         "id",
//!         TypeDescriptor::Scalar {
//!             serial_name: "Long".to_string(),
//!             scalar: ScalarType::Long,
//!         },
//!     )],
//! };
//!
//! let schema = codegen::generate(&[order], Some("com.example"), &IndexMap::new())?;
//! assert!(schema.starts_with("syntax = \"proto2\";"));
//! assert!(schema.contains("required int64 id = 1;"));
//! # Ok::<(), descriptor_proto_gen::error::Error>(())
//! ```

pub mod codegen;
pub mod collect;
pub mod descriptor;
pub mod error;
pub mod ident;
