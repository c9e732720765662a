//! Schema tests for `npc-descriptors.schema.json`.

mod common;

use rnr_core::ConfigDomain;
use serde_json::{json, Value};

const DOMAIN: ConfigDomain = ConfigDomain::NpcDescriptors;

const BARK: &str = "/pools/dvergr_work/0";

fn bark() -> Value {
    json!({
        "id": "dvergr_work_001",
        "text": "Hand me that spanner.",
        "archetype": "Dvergr",
        "subtype": "Tinkerer",
        "barkType": "AtWork"
    })
}

fn minimal() -> Value {
    json!({
        "version": "1.0.0",
        "category": "npc-barks",
        "pools": { "dvergr_work": [bark()] }
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
    let archetypes = schema["definitions"]["NPCArchetype"]["enum"].as_array().unwrap();
    assert_eq!(archetypes.len(), 8);
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
fn test_optional_bark_context_validates() {
    let validator = common::validator();
    let mut doc = minimal();
    common::set_at(&mut doc, &format!("{BARK}/dispositionContext"), Value::Null);
    common::set_at(&mut doc, &format!("{BARK}/triggerEvent"), json!("PlayerApproaches"));
    common::set_at(&mut doc, &format!("{BARK}/biome"), Value::Null);
    common::assert_valid(&validator, DOMAIN, &doc);
}

#[test]
fn test_bark_fields_are_checked() {
    let validator = common::validator();
    for (field, value) in [
        ("archetype", json!("Wizard")),
        ("barkType", json!("Mumble")),
        ("biome", json!("Asgard")),
        ("subtype", json!("")),
    ] {
        let mut doc = minimal();
        common::set_at(&mut doc, &format!("{BARK}/{field}"), value);
        let violations = common::assert_invalid(&validator, DOMAIN, &doc);
        assert!(violations.has_keyword("anyOf"), "{field}: {violations}");
        assert!(violations.touches(BARK), "{field}: {violations}");
    }
}

#[test]
fn test_category_and_pool_names() {
    let validator = common::validator();

    let mut doc = minimal();
    common::set_at(&mut doc, "/category", json!("npc-quests"));
    let violations = common::assert_invalid(&validator, DOMAIN, &doc);
    assert!(violations.has_keyword("enum"));
    assert!(violations.touches("/category"));

    let mut doc = minimal();
    common::set_at(&mut doc, "/pools/DvergrWork", json!([bark()]));
    assert!(common::assert_invalid(&validator, DOMAIN, &doc).touches("/pools"));
}
