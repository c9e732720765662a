//! Schema tests for `psychological-descriptors.schema.json`.
//!
//! Pool entries are matched against any of the five descriptor shapes, so a
//! bad field inside an entry surfaces as an `anyOf` failure on the entry.

mod common;

use rnr_core::ConfigDomain;
use serde_json::{json, Value};

const DOMAIN: ConfigDomain = ConfigDomain::PsychologicalDescriptors;

const ENTRY: &str = "/pools/mounting_physical/0";

fn minimal() -> Value {
    json!({
        "version": "1.0.0",
        "category": "stress",
        "pools": {
            "mounting_physical": [{
                "id": "mounting_physical_001",
                "text": "Your hands will not stop shaking.",
                "threshold": "Mounting",
                "manifestation": "Physical",
                "intensity": "Subtle"
            }]
        }
    })
}

#[test]
fn test_schema_shape() {
    let validator = common::validator();
    let schema = validator.domain_schema(DOMAIN).unwrap();
    assert_eq!(schema["title"], DOMAIN.schema_title());
    let names = common::definition_names(&validator, DOMAIN);
    for required in DOMAIN.required_definitions() {
        assert!(names.iter().any(|n| n == required), "missing {required}");
    }
    let categories = schema["properties"]["category"]["enum"].as_array().unwrap();
    assert_eq!(categories.len(), 5);
}

#[test]
fn test_production_configs_validate() {
    let validator = common::validator();
    common::assert_production_configs_valid(&validator, DOMAIN);
}

#[test]
fn test_fixture_cases() {
    common::assert_fixture_table(&common::validator(), DOMAIN);
}

#[test]
fn test_descriptor_shapes_validate() {
    let validator = common::validator();
    common::assert_valid(&validator, DOMAIN, &minimal());

    let mut doc = minimal();
    common::set_at(&mut doc, &format!("{ENTRY}/intensity"), Value::Null);
    common::assert_valid(&validator, DOMAIN, &doc);

    let mut doc = minimal();
    common::set_at(&mut doc, "/category", json!("trauma"));
    common::set_at(
        &mut doc,
        "/pools/mounting_physical",
        json!([{
            "id": "flashback_001",
            "text": "The smell of ash drags you back.",
            "traumaType": "Flashback",
            "intensity": "Severe"
        }]),
    );
    common::assert_valid(&validator, DOMAIN, &doc);
}

#[test]
fn test_document_constraints() {
    let validator = common::validator();
    let cases = [
        ("/category", json!("dread"), "enum"),
        ("/version", json!("1.0"), "pattern"),
        ("/pools", json!({}), "minProperties"),
        ("/pools/mounting_physical", json!([]), "minItems"),
    ];
    for (pointer, value, keyword) in cases {
        let mut doc = minimal();
        common::set_at(&mut doc, pointer, value);
        let violations = common::assert_invalid(&validator, DOMAIN, &doc);
        assert!(violations.has_keyword(keyword), "{pointer}: {violations}");
        assert!(violations.touches(pointer), "{pointer}: {violations}");
    }
}

#[test]
fn test_entry_fields_are_checked() {
    let validator = common::validator();
    for (field, value) in [
        ("threshold", json!("Extreme")),
        ("weight", json!(0)),
        ("intensity", json!("Loud")),
    ] {
        let mut doc = minimal();
        common::set_at(&mut doc, &format!("{ENTRY}/{field}"), value);
        let violations = common::assert_invalid(&validator, DOMAIN, &doc);
        assert!(violations.has_keyword("anyOf"), "{field}: {violations}");
        assert!(violations.touches(ENTRY), "{field}: {violations}");
    }
}
