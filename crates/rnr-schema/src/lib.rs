//! # rnr-schema: Configuration Schema Validation
//!
//! Validates Rune & Rust game configuration files against their JSON
//! Schema (Draft-07) definitions.
//!
//! ## Runtime Validation (`validate`)
//!
//! [`SchemaValidator`] loads every `*.schema.json` file from `schemas/`,
//! compiles validators on demand with Draft-07 forced, and validates JSON
//! or YAML documents. [`SchemaValidator::validate_config_dir`] runs every
//! domain's config files through its schema and returns a report.
//!
//! ## Structure Audit (`structure`)
//!
//! [`check_schema_structure`] verifies a domain schema declares Draft-07,
//! the expected title, root type, and definitions, and that its local
//! `$ref`s resolve. [`audit_additional_properties`] lists object schemas
//! that accept unknown keys.
//!
//! ## Crate Policy
//!
//! - Depends only on `rnr-core` internally.
//! - Schema validation is a trust boundary: invalid documents are rejected
//!   with every violation's instance path, schema path, and message.

pub mod structure;
pub mod validate;

pub use structure::{
    audit_additional_properties, check_schema_structure, AdditionalPropertiesFinding,
    StructureFinding, DRAFT_07_URI,
};
pub use validate::{
    domain_config_paths, load_document, ConfigFailure, ConfigValidationReport, MissingConfig,
    SchemaValidationError, SchemaValidator, ValidationViolations, Violation, SCHEMA_URI_PREFIX,
};
