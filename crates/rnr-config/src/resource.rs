//! # Resources
//!
//! Typed view of `config/resources.json`: the pools characters spend
//! (health, stamina, aether, and class-specific resources such as rage).

use std::collections::HashSet;

use rnr_core::{Attribute, ConfigDomain, ContentId};
use serde::{Deserialize, Serialize};

use crate::provider::DomainConfig;
use crate::references::{duplicate_ids, ReferenceIssue};

/// Where a resource pool starts when a character is created or rests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StartsAt {
    #[default]
    Max,
    Zero,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttributeScaling {
    pub attribute: Attribute,
    pub multiplier: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaxCalculation {
    pub base_value: u32,
    #[serde(default)]
    pub attribute_scaling: Option<AttributeScaling>,
    #[serde(default)]
    pub per_level: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepletionEffect {
    pub status_effect_id: ContentId,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDefinition {
    pub id: ContentId,
    pub display_name: String,
    pub abbreviation: String,
    pub description: String,
    pub color: String,
    pub default_max: u32,
    pub sort_order: u32,
    #[serde(default)]
    pub starts_at: StartsAt,
    #[serde(default)]
    pub max_calculation: Option<MaxCalculation>,
    #[serde(default)]
    pub regen_per_turn: u32,
    #[serde(default)]
    pub regen_out_of_combat: u32,
    #[serde(default)]
    pub decay_per_turn: u32,
    #[serde(default)]
    pub build_on_damage_dealt: Option<u32>,
    #[serde(default)]
    pub build_on_damage_taken: Option<u32>,
    #[serde(default)]
    pub depletion_effect: Option<DepletionEffect>,
    /// Classes that use this resource. Empty means every class.
    #[serde(default)]
    pub class_ids: Vec<ContentId>,
}

impl ResourceDefinition {
    /// Maximum pool size.
    ///
    /// `attribute_value` is the character's score in the scaling attribute.
    /// With a calculation the result is
    /// `base + floor(attribute_value * multiplier) + perLevel * (level - 1)`;
    /// without one it is `defaultMax`.
    pub fn max_for(&self, attribute_value: u32, level: u32) -> u32 {
        let Some(calc) = &self.max_calculation else {
            return self.default_max;
        };
        let scaled = calc
            .attribute_scaling
            .map(|s| (f64::from(attribute_value) * s.multiplier).floor() as u32)
            .unwrap_or(0);
        calc.base_value
            .saturating_add(scaled)
            .saturating_add(calc.per_level.saturating_mul(level.saturating_sub(1)))
    }

    /// The attribute `max_for` expects a score in, if any.
    pub fn scaling_attribute(&self) -> Option<Attribute> {
        self.max_calculation
            .and_then(|c| c.attribute_scaling)
            .map(|s| s.attribute)
    }

    /// Starting value for a pool with maximum `max`.
    pub fn starting_value(&self, max: u32) -> u32 {
        match self.starts_at {
            StartsAt::Max => max,
            StartsAt::Zero => 0,
        }
    }

    /// True if `class_id` uses this resource.
    pub fn used_by(&self, class_id: &str) -> bool {
        self.class_ids.is_empty() || self.class_ids.iter().any(|c| c.as_str() == class_id)
    }
}

/// Root of `resources.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceConfiguration {
    #[serde(default)]
    pub version: Option<String>,
    pub resource_types: Vec<ResourceDefinition>,
}

impl ResourceConfiguration {
    /// Look up a resource by id.
    pub fn resource(&self, id: &str) -> Option<&ResourceDefinition> {
        self.resource_types.iter().find(|r| r.id.as_str() == id)
    }

    /// Resources in display order.
    pub fn sorted(&self) -> Vec<&ResourceDefinition> {
        let mut resources: Vec<&ResourceDefinition> = self.resource_types.iter().collect();
        resources.sort_by_key(|r| r.sort_order);
        resources
    }

    /// Resources available to `class_id`, in display order.
    pub fn for_class(&self, class_id: &str) -> Vec<&ResourceDefinition> {
        self.sorted()
            .into_iter()
            .filter(|r| r.used_by(class_id))
            .collect()
    }
}

impl DomainConfig for ResourceConfiguration {
    const DOMAIN: ConfigDomain = ConfigDomain::Resources;

    fn entry_count(&self) -> usize {
        self.resource_types.len()
    }

    fn reference_issues(&self) -> Vec<ReferenceIssue> {
        let mut issues = duplicate_ids(self.resource_types.iter().map(|r| r.id.as_str()), |i| {
            format!("/resourceTypes/{i}/id")
        });

        let mut abbreviations = HashSet::new();
        for (i, resource) in self.resource_types.iter().enumerate() {
            if !abbreviations.insert(resource.abbreviation.to_uppercase()) {
                issues.push(ReferenceIssue::new(
                    format!("/resourceTypes/{i}/abbreviation"),
                    format!("duplicate abbreviation {:?}", resource.abbreviation),
                ));
            }
        }

        issues
    }
}
