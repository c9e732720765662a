//! Schema tests for `ability-descriptors.schema.json`.

mod common;

use rnr_core::ConfigDomain;
use serde_json::{json, Value};

const DOMAIN: ConfigDomain = ConfigDomain::AbilityDescriptors;

const MISCAST: &str = "/pools/fehu_backlash/0";

fn minimal() -> Value {
    json!({
        "version": "1.0.0",
        "category": "galdr-miscasts",
        "pools": {
            "fehu_backlash": [{
                "id": "fehu_backlash_001",
                "text": "The flame turns inward.",
                "miscastType": "Backlash",
                "severity": "Moderate",
                "runeSchool": "Fehu",
                "mechanicalEffect": { "damage": 4, "target": "Self" }
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
    let runes = schema["definitions"]["RuneSchool"]["enum"].as_array().unwrap();
    assert_eq!(runes.len(), 24);
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
fn test_miscast_validates_with_or_without_rune() {
    let validator = common::validator();
    let mut doc = minimal();
    common::assert_valid(&validator, DOMAIN, &doc);
    common::set_at(&mut doc, &format!("{MISCAST}/runeSchool"), Value::Null);
    common::assert_valid(&validator, DOMAIN, &doc);
}

#[test]
fn test_miscast_fields_are_checked() {
    let validator = common::validator();
    for (pointer, value) in [
        ("/runeSchool", json!("Thor")),
        ("/severity", json!("Apocalyptic")),
        ("/mechanicalEffect/target", json!("Everyone")),
        ("/mechanicalEffect/damage", json!(-1)),
    ] {
        let mut doc = minimal();
        common::set_at(&mut doc, &format!("{MISCAST}{pointer}"), value);
        let violations = common::assert_invalid(&validator, DOMAIN, &doc);
        assert!(violations.has_keyword("anyOf"), "{pointer}: {violations}");
        assert!(violations.touches(MISCAST), "{pointer}: {violations}");
    }
}

#[test]
fn test_category_and_empty_pool() {
    let validator = common::validator();

    let mut doc = minimal();
    common::set_at(&mut doc, "/category", json!("galdr-chants"));
    assert!(common::assert_invalid(&validator, DOMAIN, &doc).has_keyword("enum"));

    let mut doc = minimal();
    common::set_at(&mut doc, "/pools/fehu_backlash", json!([]));
    let violations = common::assert_invalid(&validator, DOMAIN, &doc);
    assert!(violations.has_keyword("minItems"));
    assert!(violations.touches("/pools/fehu_backlash"));
}
