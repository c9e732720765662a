//! Schema tests for `room-types.schema.json`.

mod common;

use rnr_core::ConfigDomain;
use serde_json::{json, Value};

const DOMAIN: ConfigDomain = ConfigDomain::RoomTypes;

fn minimal() -> Value {
    json!({ "roomTypes": { "standard": { "id": "standard", "name": "Standard Room" } } })
}

#[test]
fn test_schema_shape() {
    let validator = common::validator();
    assert_eq!(
        validator.domain_schema(DOMAIN).unwrap()["title"],
        "Room Type Configuration"
    );
    let names = common::definition_names(&validator, DOMAIN);
    for required in DOMAIN.required_definitions() {
        assert!(names.iter().any(|n| n == required), "missing {required}");
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
fn test_minimal_and_full_room_types_validate() {
    let validator = common::validator();
    let mut doc = minimal();
    common::assert_valid(&validator, DOMAIN, &doc);

    doc["roomTypes"]["shrine"] = json!({
        "id": "shrine",
        "name": "Shrine",
        "lightingOverride": "dim",
        "isSafeZone": true,
        "monsterSpawnMultiplier": 0,
        "connectionRules": { "minConnections": 1, "maxConnections": 2, "allowDeadEnd": true },
        "featureSpawnRules": [{
            "featureId": "altar",
            "spawnChance": 1.0,
            "maxCount": 1,
            "conditions": { "minDepth": 2, "maxDepth": 8, "excludedBiomes": ["frozen-halls"] }
        }],
        "descriptorTags": ["holy"]
    });
    common::assert_valid(&validator, DOMAIN, &doc);
}

#[test]
fn test_room_type_keys() {
    let validator = common::validator();

    let mut doc = minimal();
    doc["roomTypes"]["Big Hall"] = json!({ "id": "big-hall", "name": "Big Hall" });
    assert!(common::assert_invalid(&validator, DOMAIN, &doc).touches("/roomTypes"));

    let doc = json!({ "roomTypes": {} });
    assert!(common::assert_invalid(&validator, DOMAIN, &doc).has_keyword("minProperties"));
}

#[test]
fn test_room_type_constraints() {
    let validator = common::validator();
    let cases = [
        ("lightingOverride", json!("pitch-black"), "/roomTypes/standard/lightingOverride"),
        (
            "connectionRules",
            json!({ "maxConnections": 0 }),
            "/roomTypes/standard/connectionRules/maxConnections",
        ),
        (
            "connectionRules",
            json!({ "secretPassageChance": 1.2 }),
            "/roomTypes/standard/connectionRules/secretPassageChance",
        ),
        (
            "featureSpawnRules",
            json!([{ "featureId": "altar" }]),
            "/roomTypes/standard/featureSpawnRules/0",
        ),
        (
            "featureSpawnRules",
            json!([{ "featureId": "altar", "spawnChance": 0.5, "conditions": { "minDepth": -1 } }]),
            "/roomTypes/standard/featureSpawnRules/0/conditions/minDepth",
        ),
        (
            "featureSpawnRules",
            json!([{
                "featureId": "altar",
                "spawnChance": 0.5,
                "conditions": { "requiredBiomes": ["Rust Wastes"] }
            }]),
            "/roomTypes/standard/featureSpawnRules/0/conditions/requiredBiomes/0",
        ),
        ("lootMultiplier", json!(-0.5), "/roomTypes/standard/lootMultiplier"),
    ];
    for (field, value, path) in cases {
        let mut doc = minimal();
        doc["roomTypes"]["standard"][field] = value;
        let violations = common::assert_invalid(&validator, DOMAIN, &doc);
        assert!(violations.touches(path), "{path}: {violations}");
    }
}
