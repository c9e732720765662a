//! # Cross-Reference Checks
//!
//! JSON Schema validates each value in isolation. It cannot say that
//! `defaultStance` names a stance that exists, or that a quest branch jumps
//! to a real stage. Each typed configuration reports those problems as
//! [`ReferenceIssue`]s after deserialization.

use std::collections::HashSet;
use std::fmt;

/// A broken or duplicated reference inside a configuration document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceIssue {
    /// JSON Pointer-like location of the offending value.
    pub location: String,
    /// What is wrong.
    pub message: String,
}

impl ReferenceIssue {
    /// Create an issue at `location`.
    pub fn new(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ReferenceIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.message)
    }
}

/// Report every id that appears more than once, in first-repeat order.
///
/// `location` renders the pointer for the index of the repeated entry.
pub(crate) fn duplicate_ids<'a>(
    ids: impl IntoIterator<Item = &'a str>,
    location: impl Fn(usize) -> String,
) -> Vec<ReferenceIssue> {
    let mut seen = HashSet::new();
    ids.into_iter()
        .enumerate()
        .filter(|(_, id)| !seen.insert(*id))
        .map(|(i, id)| ReferenceIssue::new(location(i), format!("duplicate id {id:?}")))
        .collect()
}
