//! # Configuration Errors

use rnr_core::ConfigDomain;
use rnr_schema::SchemaValidationError;
use thiserror::Error;

use crate::references::ReferenceIssue;

/// Error loading a typed configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read, parsed, or failed schema validation.
    #[error(transparent)]
    Schema(#[from] SchemaValidationError),

    /// The document passed its schema but did not deserialize into the model.
    #[error("{domain} config does not match its model: {reason}")]
    Model {
        /// Domain being loaded.
        domain: ConfigDomain,
        /// Deserializer message.
        reason: String,
    },

    /// The document references ids that do not exist, or repeats ids.
    #[error("{domain} config failed reference checks:\n{}", format_issues(.issues))]
    References {
        /// Domain being loaded.
        domain: ConfigDomain,
        /// Every broken reference found.
        issues: Vec<ReferenceIssue>,
    },
}

fn format_issues(issues: &[ReferenceIssue]) -> String {
    issues
        .iter()
        .map(|i| format!("  {i}"))
        .collect::<Vec<_>>()
        .join("\n")
}
