//! # Stress Sources
//!
//! Typed view of `config/stress-sources.json`: psychic stress sources
//! grouped by category, the recovery formula for each kind of rest, and
//! the stress a character is reset to after a trauma check.

use std::collections::BTreeMap;

use rnr_core::{ConfigDomain, ContentId};
use serde::{Deserialize, Serialize};

use crate::provider::DomainConfig;
use crate::references::{duplicate_ids, ReferenceIssue};

/// Category a stress source belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StressCategory {
    Combat,
    Exploration,
    Narrative,
    Heretical,
    Environmental,
    Corruption,
}

impl StressCategory {
    /// Lowercase key used in the config file.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Combat => "combat",
            Self::Exploration => "exploration",
            Self::Narrative => "narrative",
            Self::Heretical => "heretical",
            Self::Environmental => "environmental",
            Self::Corruption => "corruption",
        }
    }
}

/// One thing that inflicts stress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StressSource {
    pub id: ContentId,
    /// Stress applied when the resist check fails.
    pub base_stress: u32,
    /// Successes needed on the WILL resist roll.
    #[serde(default)]
    pub resist_dc: u32,
    #[serde(default)]
    pub description: Option<String>,
}

/// Parsed form of a recovery formula string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryFormula {
    /// `WILL × n`: recover `will * n` stress.
    WillMultiple(u32),
    /// `FULL_RESET`: clear all stress.
    FullReset,
    /// A bare number: recover that much stress.
    Flat(u32),
}

impl RecoveryFormula {
    /// Parse the formula text used in config files.
    ///
    /// Accepts `×`, `x`, or `*` as the multiplication sign. Returns `None`
    /// for anything else.
    pub fn parse(formula: &str) -> Option<Self> {
        let formula = formula.trim();
        if formula == "FULL_RESET" {
            return Some(Self::FullReset);
        }
        if let Ok(n) = formula.parse() {
            return Some(Self::Flat(n));
        }
        let rest = formula.strip_prefix("WILL")?.trim_start();
        let rest = ['×', 'x', '*']
            .iter()
            .find_map(|sign| rest.strip_prefix(*sign))?;
        rest.trim().parse().ok().map(Self::WillMultiple)
    }

    /// Stress remaining after recovery from `current` for a character with `will`.
    pub fn apply(&self, current: u32, will: u32) -> u32 {
        match *self {
            Self::FullReset => 0,
            Self::Flat(n) => current.saturating_sub(n),
            Self::WillMultiple(factor) => current.saturating_sub(will.saturating_mul(factor)),
        }
    }
}

/// Recovery formula for one kind of rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecoveryRate {
    pub formula: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl RecoveryRate {
    /// The parsed formula, if it is one the engine understands.
    pub fn parsed(&self) -> Option<RecoveryFormula> {
        RecoveryFormula::parse(&self.formula)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecoveryRates {
    pub short_rest: RecoveryRate,
    pub long_rest: RecoveryRate,
    pub sanctuary: RecoveryRate,
    pub milestone: RecoveryRate,
}

impl RecoveryRates {
    fn named(&self) -> [(&'static str, &RecoveryRate); 4] {
        [
            ("shortRest", &self.short_rest),
            ("longRest", &self.long_rest),
            ("sanctuary", &self.sanctuary),
            ("milestone", &self.milestone),
        ]
    }
}

/// Stress level after a trauma check, by outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraumaCheckReset {
    pub passed: u32,
    pub failed: u32,
}

/// Root of `stress-sources.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StressConfiguration {
    pub version: String,
    pub stress_sources: BTreeMap<StressCategory, Vec<StressSource>>,
    pub recovery_rates: RecoveryRates,
    pub trauma_check_reset: TraumaCheckReset,
}

impl StressConfiguration {
    /// Find a source by id in any category.
    pub fn source(&self, id: &str) -> Option<(StressCategory, &StressSource)> {
        self.stress_sources.iter().find_map(|(category, sources)| {
            sources
                .iter()
                .find(|s| s.id.as_str() == id)
                .map(|s| (*category, s))
        })
    }

    /// Sources in one category; empty when the category is absent.
    pub fn sources_in(&self, category: StressCategory) -> &[StressSource] {
        self.stress_sources
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Total number of sources across categories.
    pub fn source_count(&self) -> usize {
        self.stress_sources.values().map(Vec::len).sum()
    }
}

impl DomainConfig for StressConfiguration {
    const DOMAIN: ConfigDomain = ConfigDomain::StressSources;

    fn entry_count(&self) -> usize {
        self.source_count()
    }

    fn reference_issues(&self) -> Vec<ReferenceIssue> {
        let mut locations = Vec::new();
        let mut ids = Vec::new();
        for (category, sources) in &self.stress_sources {
            for (i, source) in sources.iter().enumerate() {
                locations.push(format!("/stressSources/{}/{i}/id", category.as_str()));
                ids.push(source.id.as_str());
            }
        }
        let mut issues = duplicate_ids(ids, |i| locations[i].clone());

        for (name, rate) in self.recovery_rates.named() {
            if rate.parsed().is_none() {
                issues.push(ReferenceIssue::new(
                    format!("/recoveryRates/{name}/formula"),
                    format!("unrecognised recovery formula {:?}", rate.formula),
                ));
            }
        }

        issues
    }
}
