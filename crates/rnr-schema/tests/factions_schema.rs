//! Schema tests for `factions.schema.json`.

mod common;

use rnr_core::ConfigDomain;
use serde_json::{json, Value};

const DOMAIN: ConfigDomain = ConfigDomain::Factions;

const BANDS: [&str; 6] = ["hostile", "unfriendly", "neutral", "friendly", "allied", "exalted"];

fn minimal() -> Value {
    json!({
        "version": "1.0.0",
        "factions": [{
            "id": "rust-clans",
            "name": "Rust Clans",
            "description": "Scavenger clans of the iron wastes."
        }]
    })
}

fn thresholds() -> Value {
    let mut bands = serde_json::Map::new();
    for (i, band) in BANDS.iter().enumerate() {
        let min = i as i64 * 100;
        bands.insert(
            band.to_string(),
            json!({ "min": min, "max": min + 99, "label": band.to_uppercase() }),
        );
    }
    Value::Object(bands)
}

fn perk(required_threshold: &str) -> Value {
    json!({
        "id": "clan-discount",
        "name": "Clan Discount",
        "description": "Cheaper salvage.",
        "requiredThreshold": required_threshold,
        "effect": { "type": "PriceModifier", "target": "salvage", "value": 0.9 }
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
    let bands = schema["definitions"]["ReputationThresholds"]["required"]
        .as_array()
        .unwrap();
    assert_eq!(bands.len(), BANDS.len());
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
fn test_thresholds_relationships_and_perks_validate() {
    let validator = common::validator();
    let mut doc = minimal();
    common::set_at(&mut doc, "/defaultThresholds", thresholds());
    common::set_at(
        &mut doc,
        "/factions/0/relationships",
        json!([{ "factionId": "iron-banes", "relationship": "AtWar", "reputationLink": -50 }]),
    );
    common::set_at(&mut doc, "/factions/0/perks", json!([perk("friendly")]));
    common::assert_valid(&validator, DOMAIN, &doc);
}

#[test]
fn test_faction_field_constraints() {
    let validator = common::validator();
    let cases = [
        ("/factions/0/id", json!("Rust Clans"), "pattern"),
        ("/factions/0/description", json!("Short"), "minLength"),
        ("/factions/0/color", json!("red"), "pattern"),
        ("/factions", json!([]), "minItems"),
        (
            "/factions/0/relationships",
            json!([{ "factionId": "iron-banes", "relationship": "Rivals" }]),
            "enum",
        ),
        (
            "/factions/0/relationships",
            json!([{ "factionId": "iron-banes", "relationship": "Allied", "reputationLink": 150 }]),
            "maximum",
        ),
        ("/factions/0/perks", json!([perk("neutral")]), "enum"),
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
fn test_thresholds_need_every_band() {
    let validator = common::validator();
    let mut partial = thresholds();
    common::remove_at(&mut partial, "/exalted");
    let mut doc = minimal();
    common::set_at(&mut doc, "/defaultThresholds", partial);
    let violations = common::assert_invalid(&validator, DOMAIN, &doc);
    assert!(violations.has_keyword("required"));
    assert!(violations.touches("/defaultThresholds"));
}

#[test]
fn test_reputation_modifiers() {
    let validator = common::validator();
    let mut doc = minimal();
    common::set_at(
        &mut doc,
        "/factions/0/reputationModifiers",
        json!([{ "action": "KillMember", "amount": -25, "description": "Killing a clansman." }]),
    );
    common::assert_valid(&validator, DOMAIN, &doc);

    common::set_at(&mut doc, "/factions/0/reputationModifiers/0/action", json!("Murder"));
    assert!(common::assert_invalid(&validator, DOMAIN, &doc)
        .touches("/factions/0/reputationModifiers/0/action"));

    let mut doc = minimal();
    common::set_at(
        &mut doc,
        "/factions/0/reputationModifiers",
        json!([{ "action": "Gift", "description": "A gift." }]),
    );
    assert!(common::assert_invalid(&validator, DOMAIN, &doc).has_keyword("required"));
}
