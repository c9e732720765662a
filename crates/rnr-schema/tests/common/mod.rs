//! Shared helpers for the schema integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use rnr_core::ConfigDomain;
use rnr_schema::{SchemaValidator, ValidationViolations};
use serde::Deserialize;
use serde_json::Value;

/// Find the repository root.
pub fn repo_root() -> PathBuf {
    let mut dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    dir.pop(); // crates/
    dir.pop(); // repo root
    dir
}

pub fn validator() -> SchemaValidator {
    SchemaValidator::new(repo_root().join("schemas")).expect("Failed to load schemas")
}

/// The production config document for a domain. Multi-file domains return
/// their first file.
pub fn production_config(domain: ConfigDomain) -> Value {
    let path = repo_root().join("config").join(domain.config_file_name());
    rnr_schema::load_document(&path).expect("Failed to load config")
}

/// Every production config file of a domain with its parsed document.
pub fn production_configs(domain: ConfigDomain) -> Vec<(PathBuf, Value)> {
    rnr_schema::domain_config_paths(&repo_root().join("config"), domain)
        .into_iter()
        .map(|path| {
            let doc = rnr_schema::load_document(&path)
                .unwrap_or_else(|e| panic!("{}: {e}", path.display()));
            (path, doc)
        })
        .collect()
}

pub fn assert_production_configs_valid(validator: &SchemaValidator, domain: ConfigDomain) {
    let configs = production_configs(domain);
    assert_eq!(configs.len(), domain.config_files().len());
    for (path, doc) in configs {
        if let Err(e) = validator.validate_domain(&doc, domain) {
            panic!("{} failed {domain}:\n{e}", path.display());
        }
    }
}

/// One accept/reject case from `tests/fixtures/<domain>.json`.
#[derive(Debug, Deserialize)]
pub struct FixtureCase {
    pub name: String,
    pub valid: bool,
    pub document: Value,
}

pub fn fixture_cases(domain: ConfigDomain) -> Vec<FixtureCase> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(format!("{domain}.json"));
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("{}: {e}", path.display()));
    serde_json::from_str(&text).unwrap_or_else(|e| panic!("{}: {e}", path.display()))
}

/// Run every fixture case for a domain and fail with the list of cases whose
/// outcome disagrees with the fixture.
pub fn assert_fixture_table(validator: &SchemaValidator, domain: ConfigDomain) {
    let cases = fixture_cases(domain);
    assert!(!cases.is_empty(), "no fixture cases for {domain}");

    let mut mismatches = Vec::new();
    for case in &cases {
        let result = validator.validate_domain(&case.document, domain);
        match (case.valid, result) {
            (true, Err(e)) => mismatches.push(format!("{}: expected valid, got {e}", case.name)),
            (false, Ok(())) => mismatches.push(format!("{}: expected rejection", case.name)),
            _ => {}
        }
    }

    let accepted = cases.iter().filter(|c| c.valid).count();
    eprintln!(
        "{domain}: {} fixture cases ({accepted} accepted, {} rejected), {} mismatched",
        cases.len(),
        cases.len() - accepted,
        mismatches.len()
    );
    assert!(mismatches.is_empty(), "{domain} fixture mismatches:\n{}", mismatches.join("\n"));
}

pub fn assert_valid(validator: &SchemaValidator, domain: ConfigDomain, doc: &Value) {
    if let Err(e) = validator.validate_domain(doc, domain) {
        panic!("expected {domain} document to validate:\n{e}");
    }
}

/// Assert the document is rejected and return the violations.
pub fn assert_invalid(
    validator: &SchemaValidator,
    domain: ConfigDomain,
    doc: &Value,
) -> ValidationViolations {
    match validator.validate_domain(doc, domain) {
        Ok(()) => panic!("expected {domain} document to be rejected:\n{doc:#}"),
        Err(e) => e
            .violations()
            .cloned()
            .unwrap_or_else(|| panic!("expected violations, got: {e}")),
    }
}

/// Names under the schema's `definitions`.
pub fn definition_names(validator: &SchemaValidator, domain: ConfigDomain) -> Vec<String> {
    validator
        .domain_schema(domain)
        .and_then(|s| s.get("definitions"))
        .and_then(Value::as_object)
        .map(|d| d.keys().cloned().collect())
        .unwrap_or_default()
}

/// Insert or replace the value at `pointer`. The parent must exist.
pub fn set_at(doc: &mut Value, pointer: &str, value: Value) {
    let (parent, key) = pointer.rsplit_once('/').expect("pointer has a parent");
    match doc.pointer_mut(parent) {
        Some(Value::Object(map)) => {
            map.insert(key.replace("~1", "/").replace("~0", "~"), value);
        }
        Some(Value::Array(items)) => {
            let index: usize = key.parse().expect("array index");
            items[index] = value;
        }
        other => panic!("no container at {parent}: {other:?}"),
    }
}

/// Remove the object member at `pointer`.
pub fn remove_at(doc: &mut Value, pointer: &str) {
    let (parent, key) = pointer.rsplit_once('/').expect("pointer has a parent");
    let removed = doc
        .pointer_mut(parent)
        .and_then(Value::as_object_mut)
        .and_then(|map| map.remove(key));
    assert!(removed.is_some(), "nothing to remove at {pointer}");
}
