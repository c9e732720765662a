//! # Combat Stances
//!
//! Typed view of `config/stances.json`. Besides lookups, this module answers
//! the two questions combat asks of stance data: what a stance does to a
//! stat, and which switching rule applies when leaving it.

use std::collections::HashSet;

use rnr_core::{ConfigDomain, ContentId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::provider::DomainConfig;
use crate::references::{duplicate_ids, ReferenceIssue};

/// Stats a stance can modify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Stat {
    Attack,
    Defense,
    Speed,
    Accuracy,
    Evasion,
    CriticalChance,
    CriticalDamage,
    DamageReduction,
}

/// How a modifier's value is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModifierKind {
    Flat,
    Percentage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatModifier {
    pub stat: Stat,
    /// Negative values are penalties.
    pub value: f64,
    #[serde(rename = "type")]
    pub kind: ModifierKind,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RestrictionKind {
    Category,
    Specific,
    Tag,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbilityRestriction {
    #[serde(rename = "type")]
    pub kind: RestrictionKind,
    /// Category name, ability id, or tag, depending on `kind`.
    pub target: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Action economy cost of switching stance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ActionCost {
    Free,
    Swift,
    Standard,
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwitchConditionKind {
    HealthAbove,
    HealthBelow,
    HasStatus,
    NotHasStatus,
    InCombat,
    OutOfCombat,
    TurnNumber,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchCondition {
    #[serde(rename = "type")]
    pub kind: SwitchConditionKind,
    #[serde(default)]
    pub value: Option<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerEffectKind {
    Heal,
    Damage,
    ApplyStatus,
    RemoveStatus,
    Buff,
    Debuff,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectTarget {
    #[serde(rename = "Self")]
    Caster,
    Enemy,
    Ally,
    AllEnemies,
    AllAllies,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerEffect {
    #[serde(rename = "type")]
    pub kind: TriggerEffectKind,
    #[serde(default)]
    pub target: Option<EffectTarget>,
    #[serde(default)]
    pub value: Option<Value>,
    #[serde(default)]
    pub duration: Option<u32>,
}

/// Rules governing a switch out of a stance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchingRule {
    #[serde(default)]
    pub action_cost: Option<ActionCost>,
    #[serde(default)]
    pub cooldown: Option<u32>,
    #[serde(default)]
    pub can_switch_during_enemy_turn: Option<bool>,
    #[serde(default)]
    pub conditions: Vec<SwitchCondition>,
    #[serde(default)]
    pub trigger_effects: Vec<TriggerEffect>,
}

impl SwitchingRule {
    /// Fill unset fields of `self` from `fallback`.
    ///
    /// Lists are taken from `self` when non-empty, otherwise from `fallback`.
    pub fn merged_over(&self, fallback: &SwitchingRule) -> SwitchingRule {
        SwitchingRule {
            action_cost: self.action_cost.or(fallback.action_cost),
            cooldown: self.cooldown.or(fallback.cooldown),
            can_switch_during_enemy_turn: self
                .can_switch_during_enemy_turn
                .or(fallback.can_switch_during_enemy_turn),
            conditions: if self.conditions.is_empty() {
                fallback.conditions.clone()
            } else {
                self.conditions.clone()
            },
            trigger_effects: if self.trigger_effects.is_empty() {
                fallback.trigger_effects.clone()
            } else {
                self.trigger_effects.clone()
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiConditionKind {
    HealthBelow,
    HealthAbove,
    EnemyCount,
    AllyCount,
    StatusActive,
    TargetWeak,
    OutNumbered,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiCondition {
    #[serde(rename = "type")]
    pub kind: AiConditionKind,
    #[serde(default)]
    pub value: Option<Value>,
    #[serde(default)]
    pub weight: Option<f64>,
}

/// Hints for the enemy AI on when to use a stance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiBehavior {
    #[serde(default)]
    pub priority: Option<u32>,
    pub use_when: Vec<AiCondition>,
    #[serde(default)]
    pub avoid_when: Vec<AiCondition>,
    #[serde(default)]
    pub stickiness: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnlockKind {
    Level,
    Quest,
    Skill,
    Item,
    Achievement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnlockCondition {
    #[serde(rename = "type")]
    pub kind: UnlockKind,
    pub value: Value,
    #[serde(default)]
    pub description: Option<String>,
}

/// A single combat stance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatStance {
    pub id: ContentId,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub stat_modifiers: Vec<StatModifier>,
    #[serde(default)]
    pub ability_restrictions: Vec<AbilityRestriction>,
    #[serde(default)]
    pub ability_grants: Vec<ContentId>,
    #[serde(default)]
    pub switching_rule: Option<SwitchingRule>,
    #[serde(default)]
    pub incompatible_stances: Vec<ContentId>,
    #[serde(default)]
    pub ai_behavior: Option<AiBehavior>,
    #[serde(default)]
    pub unlock_condition: Option<UnlockCondition>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub icon_id: Option<String>,
    #[serde(default)]
    pub visual_effect_id: Option<String>,
    #[serde(default)]
    pub sound_effect_id: Option<String>,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub requires_unlock: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub sort_order: Option<u32>,
}

impl CombatStance {
    /// Sum of every modifier of `kind` applied to `stat`.
    pub fn modifier_total(&self, stat: Stat, kind: ModifierKind) -> f64 {
        self.stat_modifiers
            .iter()
            .filter(|m| m.stat == stat && m.kind == kind)
            .map(|m| m.value)
            .sum()
    }

    /// Apply this stance's modifiers to a base stat value.
    ///
    /// Flat modifiers are added first, then percentage modifiers scale the
    /// result.
    pub fn apply(&self, stat: Stat, base: f64) -> f64 {
        let flat = base + self.modifier_total(stat, ModifierKind::Flat);
        flat * (1.0 + self.modifier_total(stat, ModifierKind::Percentage) / 100.0)
    }

    /// Whether this stance blocks an ability with the given id, category
    /// and tags.
    pub fn restricts(&self, ability_id: &str, category: &str, tags: &[&str]) -> bool {
        self.ability_restrictions.iter().any(|r| match r.kind {
            RestrictionKind::Specific => r.target == ability_id,
            RestrictionKind::Category => r.target.eq_ignore_ascii_case(category),
            RestrictionKind::Tag => tags.iter().any(|t| t.eq_ignore_ascii_case(&r.target)),
        })
    }
}

/// Root of `stances.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StanceConfiguration {
    pub version: String,
    pub default_stance: ContentId,
    pub stances: Vec<CombatStance>,
    #[serde(default)]
    pub global_switching_rules: Option<SwitchingRule>,
}

impl StanceConfiguration {
    /// Look up a stance by id.
    pub fn stance(&self, id: &str) -> Option<&CombatStance> {
        self.stances.iter().find(|s| s.id.as_str() == id)
    }

    /// The stance named by `defaultStance`.
    pub fn default_stance(&self) -> Option<&CombatStance> {
        self.stance(self.default_stance.as_str())
    }

    /// Stances in display order (`sortOrder`, then declaration order).
    pub fn sorted(&self) -> Vec<&CombatStance> {
        let mut stances: Vec<&CombatStance> = self.stances.iter().collect();
        stances.sort_by_key(|s| s.sort_order.unwrap_or(u32::MAX));
        stances
    }

    /// True unless either stance lists the other as incompatible.
    pub fn are_compatible(&self, a: &str, b: &str) -> bool {
        let lists = |from: &str, to: &str| {
            self.stance(from)
                .is_some_and(|s| s.incompatible_stances.iter().any(|i| i.as_str() == to))
        };
        !lists(a, b) && !lists(b, a)
    }

    /// Switching rule for leaving `id`: the stance's own rule layered over
    /// the global one.
    pub fn switching_rule_for(&self, id: &str) -> Option<SwitchingRule> {
        let stance = self.stance(id)?;
        let global = self.global_switching_rules.clone().unwrap_or_default();
        Some(match &stance.switching_rule {
            Some(own) => own.merged_over(&global),
            None => global,
        })
    }
}

impl DomainConfig for StanceConfiguration {
    const DOMAIN: ConfigDomain = ConfigDomain::Stances;

    fn entry_count(&self) -> usize {
        self.stances.len()
    }

    fn reference_issues(&self) -> Vec<ReferenceIssue> {
        let mut issues = duplicate_ids(self.stances.iter().map(|s| s.id.as_str()), |i| {
            format!("/stances/{i}/id")
        });
        let known: HashSet<&str> = self.stances.iter().map(|s| s.id.as_str()).collect();

        if !known.contains(self.default_stance.as_str()) {
            issues.push(ReferenceIssue::new(
                "/defaultStance",
                format!("unknown stance {:?}", self.default_stance.as_str()),
            ));
        }

        for (i, stance) in self.stances.iter().enumerate() {
            for (j, other) in stance.incompatible_stances.iter().enumerate() {
                if !known.contains(other.as_str()) {
                    issues.push(ReferenceIssue::new(
                        format!("/stances/{i}/incompatibleStances/{j}"),
                        format!("unknown stance {:?}", other.as_str()),
                    ));
                } else if other == &stance.id {
                    issues.push(ReferenceIssue::new(
                        format!("/stances/{i}/incompatibleStances/{j}"),
                        "stance lists itself as incompatible",
                    ));
                }
            }
            if stance.is_default && stance.id != self.default_stance {
                issues.push(ReferenceIssue::new(
                    format!("/stances/{i}/isDefault"),
                    format!(
                        "marked default but defaultStance is {:?}",
                        self.default_stance.as_str()
                    ),
                ));
            }
        }

        issues
    }
}
