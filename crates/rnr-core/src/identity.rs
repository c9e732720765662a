//! # Content Identifiers
//!
//! Every piece of authored content (stances, quests, vendors, terrain,
//! commands) is keyed by a kebab-case id: a lowercase ASCII letter
//! followed by lowercase letters, digits, or hyphens. The schemas enforce
//! this with `^[a-z][a-z0-9-]*$`; `ContentId` enforces it again at the
//! type level once a document has been deserialized.

use serde::{Deserialize, Serialize};

use crate::error::RnrError;

/// Kebab-case identifier for authored content.
///
/// Constructed only through [`ContentId::new`] (or deserialization, which
/// routes through the same check), so holding a `ContentId` means the
/// value matches `^[a-z][a-z0-9-]*$`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContentId(String);

impl ContentId {
    /// Validate and wrap an identifier.
    pub fn new(value: impl Into<String>) -> Result<Self, RnrError> {
        let value = value.into();
        if value.is_empty() {
            return Err(RnrError::InvalidIdentifier {
                value,
                reason: "identifier is empty",
            });
        }
        if !is_kebab_case(&value) {
            return Err(RnrError::InvalidIdentifier {
                value,
                reason: "must start with a-z and contain only a-z, 0-9, '-'",
            });
        }
        Ok(Self(value))
    }

    /// Access the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ContentId {
    type Error = RnrError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ContentId> for String {
    fn from(id: ContentId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ContentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ContentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Returns true if `s` matches `^[a-z][a-z0-9-]*$`.
pub fn is_kebab_case(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}
