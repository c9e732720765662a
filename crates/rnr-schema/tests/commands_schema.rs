//! Schema tests for `commands.schema.json`.

mod common;

use rnr_core::ConfigDomain;
use serde_json::{json, Value};

const DOMAIN: ConfigDomain = ConfigDomain::Commands;

fn minimal() -> Value {
    json!({
        "version": "1.0.0",
        "commands": [{
            "id": "look",
            "name": "look",
            "category": "Information",
            "description": "Look around.",
            "aliases": ["l"],
            "contexts": ["Exploration", "Combat"]
        }]
    })
}

#[test]
fn test_schema_shape() {
    let validator = common::validator();
    let schema = validator.domain_schema(DOMAIN).unwrap();
    assert_eq!(schema["title"], "Command Configuration Schema");
    let names = common::definition_names(&validator, DOMAIN);
    for required in DOMAIN.required_definitions() {
        assert!(names.iter().any(|n| n == required), "missing {required}");
    }
    // Category, argument type, and context are shared string enums.
    for name in ["CommandCategory", "ArgumentType", "CommandContext"] {
        assert_eq!(schema["definitions"][name]["type"], "string", "{name}");
    }
}

#[test]
fn test_production_config_validates() {
    let validator = common::validator();
    common::assert_valid(&validator, DOMAIN, &common::production_config(DOMAIN));
}

#[test]
fn test_fixture_cases() {
    common::assert_fixture_table(&common::validator(), DOMAIN);
}

#[test]
fn test_minimal_and_full_documents_validate() {
    let validator = common::validator();
    let mut doc = minimal();
    common::assert_valid(&validator, DOMAIN, &doc);

    doc["commands"][0]["arguments"] = json!([
        { "name": "target", "type": "Target", "isRequired": false, "defaultValue": "room" }
    ]);
    doc["commands"][0]["help"] = json!({
        "usage": "look [target]",
        "examples": [{ "input": "look altar", "description": "Examine the altar." }],
        "notes": "Looking costs no time.",
        "seeAlso": ["search"]
    });
    doc["commands"].as_array_mut().unwrap().push(json!({
        "id": "talk", "name": "talk", "category": "Social", "description": "Talk.",
        "arguments": [{ "name": "npc", "type": "NPC", "isRequired": true }],
        "contexts": ["Exploration"]
    }));
    doc["globalAliases"] = json!({ "x": "look" });
    doc["ignoredWords"] = json!(["the", "at"]);
    doc["categories"] = json!([{ "id": "Information", "name": "Information", "sortOrder": 0 }]);
    common::assert_valid(&validator, DOMAIN, &doc);
}

#[test]
fn test_names_and_aliases_are_single_words() {
    let validator = common::validator();

    let mut doc = minimal();
    doc["commands"][0]["name"] = json!("look around");
    let violations = common::assert_invalid(&validator, DOMAIN, &doc);
    assert!(violations.has_keyword("pattern"));
    assert!(violations.touches("/commands/0/name"));

    let mut doc = minimal();
    doc["commands"][0]["aliases"] = json!(["look at"]);
    assert!(common::assert_invalid(&validator, DOMAIN, &doc).touches("/commands/0/aliases/0"));

    let mut doc = minimal();
    doc["commands"][0]["aliases"] = json!(["l", "l"]);
    assert!(common::assert_invalid(&validator, DOMAIN, &doc).has_keyword("uniqueItems"));

    let mut doc = minimal();
    doc["globalAliases"] = json!({ "go n": "go north" });
    assert!(common::assert_invalid(&validator, DOMAIN, &doc).touches("/globalAliases"));
}

#[test]
fn test_contexts() {
    let validator = common::validator();

    let mut doc = minimal();
    doc["commands"][0]["contexts"] = json!([]);
    assert!(common::assert_invalid(&validator, DOMAIN, &doc).has_keyword("minItems"));

    let mut doc = minimal();
    doc["commands"][0]["contexts"] = json!(["Sleeping"]);
    let violations = common::assert_invalid(&validator, DOMAIN, &doc);
    assert!(violations.has_keyword("enum"));
    assert!(violations.touches("/commands/0/contexts/0"));
}

#[test]
fn test_arguments() {
    let validator = common::validator();

    let mut doc = minimal();
    doc["commands"][0]["arguments"] = json!([{ "name": "Target", "type": "Target" }]);
    assert!(common::assert_invalid(&validator, DOMAIN, &doc).touches("/commands/0/arguments/0/name"));

    let mut doc = minimal();
    doc["commands"][0]["arguments"] = json!([{ "name": "target", "type": "Creature" }]);
    let violations = common::assert_invalid(&validator, DOMAIN, &doc);
    assert!(violations.has_keyword("enum"));
    assert!(violations.touches("/commands/0/arguments/0/type"));
}

#[test]
fn test_help_requires_usage_and_complete_examples() {
    let validator = common::validator();

    let mut doc = minimal();
    doc["commands"][0]["help"] = json!({ "examples": [] });
    assert!(common::assert_invalid(&validator, DOMAIN, &doc).has_keyword("required"));

    let mut doc = minimal();
    doc["commands"][0]["help"] = json!({ "usage": "look", "examples": [{ "input": "look" }] });
    let violations = common::assert_invalid(&validator, DOMAIN, &doc);
    assert!(violations.has_keyword("required"));
    assert!(violations.touches("/commands/0/help/examples/0"));
}

#[test]
fn test_help_notes_are_a_single_string() {
    let validator = common::validator();

    let mut doc = minimal();
    doc["commands"][0]["help"] = json!({
        "usage": "look [target]",
        "notes": "Looking costs no time."
    });
    common::assert_valid(&validator, DOMAIN, &doc);

    doc["commands"][0]["help"]["notes"] = json!(["Looking costs no time."]);
    let violations = common::assert_invalid(&validator, DOMAIN, &doc);
    assert!(violations.has_keyword("type"));
    assert!(violations.touches("/commands/0/help/notes"));
}

#[test]
fn test_top_level_collections() {
    let validator = common::validator();

    let mut doc = minimal();
    doc["commands"] = json!([]);
    assert!(common::assert_invalid(&validator, DOMAIN, &doc).has_keyword("minItems"));

    let mut doc = minimal();
    doc["ignoredWords"] = json!(["the", "the"]);
    assert!(common::assert_invalid(&validator, DOMAIN, &doc).has_keyword("uniqueItems"));

    let mut doc = minimal();
    doc["commands"][0]["category"] = json!("Magic");
    assert!(common::assert_invalid(&validator, DOMAIN, &doc).touches("/commands/0/category"));

    let mut doc = minimal();
    doc["categories"] = json!([{ "id": "Magic", "name": "Magic" }]);
    assert!(common::assert_invalid(&validator, DOMAIN, &doc).touches("/categories/0/id"));
}
