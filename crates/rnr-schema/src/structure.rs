//! # Schema Structure Audit
//!
//! Checks that each domain schema is shaped the way the rest of the tooling
//! expects before any document is validated against it:
//!
//! - `$schema` declares Draft-07.
//! - `title` matches [`ConfigDomain::schema_title`].
//! - The root `type` matches [`ConfigDomain::root_type`].
//! - Every name in [`ConfigDomain::required_definitions`] exists under
//!   `definitions`.
//! - Every local `$ref` (`#/definitions/<name>`) points at a definition
//!   that exists.
//!
//! The second half of this module audits `additionalProperties`: object
//! schemas that leave it open accept misspelled keys silently, which is the
//! most common authoring mistake in hand-edited configs.

use std::fmt;

use rnr_core::ConfigDomain;
use serde_json::Value;

/// The `$schema` URI every config schema must declare.
pub const DRAFT_07_URI: &str = "http://json-schema.org/draft-07/schema#";

/// A structural problem found in a domain schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructureFinding {
    /// `$schema` is missing or names another draft.
    WrongDraft {
        /// The declared `$schema`, if any.
        found: Option<String>,
    },
    /// `title` is missing or does not match the domain.
    WrongTitle {
        /// Title the domain requires.
        expected: &'static str,
        /// Declared title, if any.
        found: Option<String>,
    },
    /// Root `type` is not the one the domain's documents use.
    WrongRootType {
        /// Root type the domain requires.
        expected: &'static str,
        /// Declared root type, if any.
        found: Option<String>,
    },
    /// A required definition is absent.
    MissingDefinition(&'static str),
    /// A `$ref` points at a definition that does not exist.
    DanglingRef {
        /// JSON Pointer to the `$ref` keyword.
        at: String,
        /// The reference target.
        target: String,
    },
}

impl fmt::Display for StructureFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongDraft { found } => write!(
                f,
                "$schema is {}, expected {DRAFT_07_URI}",
                found.as_deref().unwrap_or("(absent)")
            ),
            Self::WrongTitle { expected, found } => write!(
                f,
                "title is {:?}, expected {expected:?}",
                found.as_deref().unwrap_or("(absent)")
            ),
            Self::WrongRootType { expected, found } => write!(
                f,
                "root type is {}, expected {expected:?}",
                found.as_deref().unwrap_or("(absent)")
            ),
            Self::MissingDefinition(name) => write!(f, "missing definition {name:?}"),
            Self::DanglingRef { at, target } => write!(f, "{at}: $ref {target:?} does not resolve"),
        }
    }
}

/// Check a domain schema's structure.
///
/// Returns an empty vector when the schema is well-formed.
pub fn check_schema_structure(domain: ConfigDomain, schema: &Value) -> Vec<StructureFinding> {
    let mut findings = Vec::new();

    let draft = schema.get("$schema").and_then(Value::as_str);
    if draft != Some(DRAFT_07_URI) {
        findings.push(StructureFinding::WrongDraft {
            found: draft.map(str::to_string),
        });
    }

    let title = schema.get("title").and_then(Value::as_str);
    if title != Some(domain.schema_title()) {
        findings.push(StructureFinding::WrongTitle {
            expected: domain.schema_title(),
            found: title.map(str::to_string),
        });
    }

    let root_type = schema.get("type").and_then(Value::as_str);
    if root_type != Some(domain.root_type()) {
        findings.push(StructureFinding::WrongRootType {
            expected: domain.root_type(),
            found: root_type.map(str::to_string),
        });
    }

    let definitions = schema.get("definitions").and_then(Value::as_object);
    for name in domain.required_definitions() {
        if !definitions.is_some_and(|d| d.contains_key(*name)) {
            findings.push(StructureFinding::MissingDefinition(*name));
        }
    }

    let mut refs = Vec::new();
    collect_local_refs(schema, String::new(), &mut refs);
    for (at, target) in refs {
        if schema.pointer(&target[1..]).is_none() {
            findings.push(StructureFinding::DanglingRef { at, target });
        }
    }

    findings
}

/// Collect every `$ref` starting with `#/` as `(pointer-to-ref, target)`.
fn collect_local_refs(node: &Value, path: String, acc: &mut Vec<(String, String)>) {
    match node {
        Value::Object(map) => {
            for (key, child) in map {
                let child_path = format!("{path}/{}", escape_pointer(key));
                if key == "$ref" {
                    if let Some(target) = child.as_str().filter(|t| t.starts_with("#/")) {
                        acc.push((child_path, target.to_string()));
                    }
                } else {
                    collect_local_refs(child, child_path, acc);
                }
            }
        }
        Value::Array(items) => {
            for (i, child) in items.iter().enumerate() {
                collect_local_refs(child, format!("{path}/{i}"), acc);
            }
        }
        _ => {}
    }
}

fn escape_pointer(key: &str) -> String {
    key.replace('~', "~0").replace('/', "~1")
}

/// Audit the `additionalProperties` setting in a parsed schema value.
///
/// Checks the root schema and every entry under `definitions`. An object
/// schema (one declaring `type: "object"` or `properties`) is reported when
/// `additionalProperties` is `true` or absent, which defaults to `true`.
/// A schema-valued `additionalProperties` restricts extra keys and is fine.
pub fn audit_additional_properties(schema: &Value) -> Vec<AdditionalPropertiesFinding> {
    let mut findings = Vec::new();

    check_object_additional_properties(schema, "", &mut findings);

    if let Some(definitions) = schema.get("definitions").and_then(Value::as_object) {
        let mut names: Vec<&String> = definitions.keys().collect();
        names.sort();
        for name in names {
            let path = format!("/definitions/{}", escape_pointer(name));
            check_object_additional_properties(&definitions[name], &path, &mut findings);
        }
    }

    findings
}

/// Check a single object schema for additionalProperties.
fn check_object_additional_properties(
    schema: &Value,
    path: &str,
    findings: &mut Vec<AdditionalPropertiesFinding>,
) {
    let is_object_schema = schema.get("type") == Some(&Value::String("object".to_string()))
        || schema.get("properties").is_some();
    if !is_object_schema {
        return;
    }

    let current_value = match schema.get("additionalProperties") {
        Some(Value::Bool(false)) | Some(Value::Object(_)) => return,
        Some(Value::Bool(true)) => "true".to_string(),
        None => "(absent, defaults to true)".to_string(),
        Some(other) => other.to_string(),
    };

    findings.push(AdditionalPropertiesFinding {
        json_path: format!("{path}/additionalProperties"),
        current_value,
        recommendation: "Set to false so misspelled keys are rejected".to_string(),
    });
}

/// A finding about `additionalProperties` configuration.
#[derive(Debug, Clone)]
pub struct AdditionalPropertiesFinding {
    /// JSON Pointer path to the `additionalProperties` field.
    pub json_path: String,
    /// Current value of `additionalProperties`.
    pub current_value: String,
    /// Recommended action.
    pub recommendation: String,
}

impl fmt::Display for AdditionalPropertiesFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "  {}: {} -> {}",
            self.json_path, self.current_value, self.recommendation
        )
    }
}
