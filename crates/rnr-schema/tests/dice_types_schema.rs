//! Schema tests for `dice-types.schema.json`.

mod common;

use rnr_core::{ConfigDomain, DiceExpression};
use serde_json::{json, Value};

const DOMAIN: ConfigDomain = ConfigDomain::DiceTypes;

fn minimal() -> Value {
    json!({ "dieTypes": [{ "id": "d6", "name": "Six-sided Die", "faces": 6 }] })
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
}

#[test]
fn test_production_config_validates() {
    let validator = common::validator();
    common::assert_production_configs_valid(&validator, DOMAIN);
}

#[test]
fn test_fixture_cases() {
    common::assert_fixture_table(&common::validator(), DOMAIN);
}

#[test]
fn test_expression_pattern_and_presets_validate() {
    let validator = common::validator();
    let mut doc = minimal();
    common::set_at(
        &mut doc,
        "/expressionPattern",
        json!({
            "pattern": "^(\\d+)d(\\d+)([+-]\\d+)?$",
            "captureGroups": { "1": "count", "2": "faces" },
            "examples": ["1d6", "2d6+3", "1d20-1"]
        }),
    );
    common::set_at(&mut doc, "/commonExpressions", json!(["1d6", "2d8"]));
    common::assert_valid(&validator, DOMAIN, &doc);
}

#[test]
fn test_die_type_constraints() {
    let validator = common::validator();
    let cases = [
        ("/dieTypes/0/id", json!("D6"), "pattern", "/dieTypes/0/id"),
        ("/dieTypes/0/faces", json!(1), "minimum", "/dieTypes/0/faces"),
        ("/dieTypes/0/color", json!("blue"), "pattern", "/dieTypes/0/color"),
        ("/dieTypes", json!([]), "minItems", "/dieTypes"),
        ("/commonExpressions", json!(["1d6", "1d6"]), "uniqueItems", "/commonExpressions"),
        ("/commonExpressions", json!(["d6"]), "pattern", "/commonExpressions/0"),
        (
            "/expressionPattern",
            json!({ "pattern": "x", "examples": ["2d"] }),
            "pattern",
            "/expressionPattern/examples/0",
        ),
        ("/expressionPattern", json!({ "examples": ["2d6"] }), "required", "/expressionPattern"),
    ];
    for (pointer, value, keyword, path) in cases {
        let mut doc = minimal();
        common::set_at(&mut doc, pointer, value);
        let violations = common::assert_invalid(&validator, DOMAIN, &doc);
        assert!(violations.has_keyword(keyword), "{pointer}: {violations}");
        assert!(violations.touches(path), "{pointer}: {violations}");
    }
}

#[test]
fn test_shipped_presets_parse_as_dice() {
    for (path, doc) in common::production_configs(DOMAIN) {
        let presets = doc["commonExpressions"].as_array().cloned().unwrap_or_default();
        for preset in presets {
            let text = preset.as_str().unwrap();
            assert!(
                text.parse::<DiceExpression>().is_ok(),
                "{}: {text} is not a dice expression",
                path.display()
            );
        }
    }
}
