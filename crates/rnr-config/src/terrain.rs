//! # Terrain
//!
//! Typed view of `config/terrain.json`. Hazard damage is parsed into a
//! [`DiceExpression`] at load time, so a malformed roll is a load error
//! rather than a surprise mid-combat.

use std::fmt;

use rnr_core::{Attribute, ConfigDomain, ContentId, DiceExpression};
use serde::{Deserialize, Serialize};

use crate::provider::DomainConfig;
use crate::references::{duplicate_ids, ReferenceIssue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerrainType {
    Normal,
    Difficult,
    Hazardous,
    Impassable,
    Water,
    Elevated,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CoverLevel {
    #[default]
    None,
    Partial,
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerType {
    OnEntry,
    OnTurnStart,
    OnTurnEnd,
    OnExit,
    Continuous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageType {
    Physical,
    Fire,
    Cold,
    Lightning,
    Poison,
    Acid,
    Psychic,
    Aetheric,
}

impl fmt::Display for DamageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingThrow {
    pub attribute: Attribute,
    pub dc: u32,
    #[serde(default)]
    pub half_damage_on_success: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HazardEffect {
    pub trigger_type: TriggerType,
    pub damage: DiceExpression,
    pub damage_type: DamageType,
    #[serde(default)]
    pub saving_throw: Option<SavingThrow>,
    #[serde(default)]
    pub message: Option<String>,
}

impl HazardEffect {
    /// Damage taken for a given roll and save outcome.
    ///
    /// A successful save negates the damage unless the save only halves it,
    /// in which case the result rounds down.
    pub fn damage_after_save(&self, rolled: u32, saved: bool) -> u32 {
        match (&self.saving_throw, saved) {
            (Some(save), true) if save.half_damage_on_success => rolled / 2,
            (Some(_), true) => 0,
            _ => rolled,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TerrainDefinition {
    pub id: ContentId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: TerrainType,
    #[serde(default = "default_movement_cost")]
    pub movement_cost_multiplier: f64,
    #[serde(default)]
    pub is_passable: Option<bool>,
    #[serde(default)]
    pub cover_level: CoverLevel,
    #[serde(default = "default_visibility")]
    pub visibility_modifier: f64,
    #[serde(default)]
    pub hazard_effect: Option<HazardEffect>,
    #[serde(default)]
    pub applies_status_effect: Option<ContentId>,
    #[serde(default)]
    pub status_effect_chance: Option<f64>,
    #[serde(default)]
    pub display_char: Option<char>,
    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_movement_cost() -> f64 {
    1.0
}

fn default_visibility() -> f64 {
    1.0
}

impl TerrainDefinition {
    /// `isPassable` when given, otherwise everything but `Impassable`.
    pub fn passable(&self) -> bool {
        self.is_passable
            .unwrap_or(self.kind != TerrainType::Impassable)
    }

    pub fn is_hazardous(&self) -> bool {
        self.hazard_effect.is_some()
    }
}

/// Root of `terrain.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TerrainConfiguration {
    #[serde(default)]
    pub version: Option<String>,
    pub terrain_definitions: Vec<TerrainDefinition>,
}

impl TerrainConfiguration {
    /// Look up a terrain by id.
    pub fn terrain(&self, id: &str) -> Option<&TerrainDefinition> {
        self.terrain_definitions.iter().find(|t| t.id.as_str() == id)
    }

    /// Look up a terrain by its map glyph.
    pub fn by_display_char(&self, glyph: char) -> Option<&TerrainDefinition> {
        self.terrain_definitions
            .iter()
            .find(|t| t.display_char == Some(glyph))
    }

    /// Terrain with a hazard effect.
    pub fn hazards(&self) -> impl Iterator<Item = &TerrainDefinition> {
        self.terrain_definitions.iter().filter(|t| t.is_hazardous())
    }
}

impl DomainConfig for TerrainConfiguration {
    const DOMAIN: ConfigDomain = ConfigDomain::Terrain;

    fn entry_count(&self) -> usize {
        self.terrain_definitions.len()
    }

    fn reference_issues(&self) -> Vec<ReferenceIssue> {
        let mut issues = duplicate_ids(self.terrain_definitions.iter().map(|t| t.id.as_str()), |i| {
            format!("/terrainDefinitions/{i}/id")
        });

        for (i, terrain) in self.terrain_definitions.iter().enumerate() {
            let at = format!("/terrainDefinitions/{i}");
            if terrain.status_effect_chance.is_some() && terrain.applies_status_effect.is_none() {
                issues.push(ReferenceIssue::new(
                    format!("{at}/statusEffectChance"),
                    "chance given without appliesStatusEffect",
                ));
            }
            if terrain.kind == TerrainType::Hazardous && terrain.hazard_effect.is_none() {
                issues.push(ReferenceIssue::new(
                    format!("{at}/hazardEffect"),
                    "Hazardous terrain has no hazardEffect",
                ));
            }
            if terrain.kind == TerrainType::Impassable && terrain.is_passable == Some(true) {
                issues.push(ReferenceIssue::new(
                    format!("{at}/isPassable"),
                    "Impassable terrain marked passable",
                ));
            }
            if let Some(glyph) = terrain.display_char {
                let earlier = self.terrain_definitions[..i]
                    .iter()
                    .find(|t| t.display_char == Some(glyph));
                if let Some(other) = earlier {
                    issues.push(ReferenceIssue::new(
                        format!("{at}/displayChar"),
                        format!("{glyph:?} is already used by {:?}", other.id.as_str()),
                    ));
                }
            }
        }

        issues
    }
}
