//! # Core Attributes
//!
//! The five character attributes that saving throws and resource scaling
//! refer to. Config files spell them in lowercase.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::RnrError;

/// A core character attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attribute {
    /// Raw strength.
    Might,
    /// Agility and precision.
    Finesse,
    /// Perception and reasoning.
    Wits,
    /// Resolve. Drives stress recovery.
    Will,
    /// Endurance and constitution.
    Sturdiness,
}

impl Attribute {
    /// All attributes in canonical order.
    pub fn all() -> &'static [Attribute] {
        &[
            Self::Might,
            Self::Finesse,
            Self::Wits,
            Self::Will,
            Self::Sturdiness,
        ]
    }

    /// Lowercase name as written in config files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Might => "might",
            Self::Finesse => "finesse",
            Self::Wits => "wits",
            Self::Will => "will",
            Self::Sturdiness => "sturdiness",
        }
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Attribute {
    type Err = RnrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| RnrError::UnknownAttribute(s.to_string()))
    }
}
