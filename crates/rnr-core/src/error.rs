//! # Error Types
//!
//! The shared error type for the foundational crate. Parsing failures carry
//! the offending input so callers can report it without re-threading context.

use thiserror::Error;

/// Top-level error type for `rnr-core`.
#[derive(Error, Debug)]
pub enum RnrError {
    /// A configuration domain name did not match any known domain.
    #[error("unknown configuration domain: {0:?}")]
    UnknownDomain(String),

    /// An attribute name did not match any core attribute.
    #[error("unknown attribute: {0:?}")]
    UnknownAttribute(String),

    /// A content identifier was not kebab-case.
    #[error("invalid content id {value:?}: {reason}")]
    InvalidIdentifier {
        /// The rejected input.
        value: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// A dice expression could not be parsed.
    #[error("invalid dice expression {value:?}: {reason}")]
    InvalidDice {
        /// The rejected input.
        value: String,
        /// Why it was rejected.
        reason: &'static str,
    },
}
