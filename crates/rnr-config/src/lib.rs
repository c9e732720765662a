//! # rnr-config: Typed Game Configuration
//!
//! Serde models for the configuration domains game systems read directly,
//! and [`GameConfigProvider`], which hands them out only after the file has
//! passed its JSON Schema and the model's cross-reference checks.
//!
//! ## Typed Domains
//!
//! | Domain            | Model                      |
//! |-------------------|----------------------------|
//! | `stress-sources`  | [`StressConfiguration`]    |
//! | `stances`         | [`StanceConfiguration`]    |
//! | `commands`        | [`CommandConfiguration`]   |
//! | `quests`          | [`QuestConfiguration`]     |
//! | `resources`       | [`ResourceConfiguration`]  |
//! | `terrain`         | [`TerrainConfiguration`]   |
//!
//! The remaining domains are validated by `rnr-schema` but have no typed
//! model yet; their consumers read the validated `serde_json::Value`.

pub mod command;
pub mod error;
pub mod provider;
pub mod quest;
pub mod references;
pub mod resource;
pub mod stance;
pub mod stress;
pub mod terrain;

pub use command::{CommandConfiguration, CommandContext, ParsedInput};
pub use error::ConfigError;
pub use provider::{load_config, DomainConfig, GameConfigProvider, TYPED_DOMAINS};
pub use quest::QuestConfiguration;
pub use references::ReferenceIssue;
pub use resource::ResourceConfiguration;
pub use stance::StanceConfiguration;
pub use stress::{RecoveryFormula, StressCategory, StressConfiguration};
pub use terrain::TerrainConfiguration;
