//! # Configuration Provider
//!
//! [`GameConfigProvider`] is the single entry point game systems use to read
//! configuration. Every domain goes through the same pipeline on first
//! access:
//!
//! 1. Read `config/<domain>.json` (or `.yaml`).
//! 2. Validate against the domain schema.
//! 3. Deserialize into the typed model.
//! 4. Run the model's cross-reference checks.
//!
//! The result is cached for the life of the provider. A failed load is not
//! cached, so fixing the file and asking again works.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use rnr_core::ConfigDomain;
use rnr_schema::{load_document, SchemaValidator};
use serde::de::DeserializeOwned;

use crate::command::CommandConfiguration;
use crate::error::ConfigError;
use crate::quest::QuestConfiguration;
use crate::references::ReferenceIssue;
use crate::resource::ResourceConfiguration;
use crate::stance::StanceConfiguration;
use crate::stress::StressConfiguration;
use crate::terrain::TerrainConfiguration;

/// A typed configuration document for one domain.
pub trait DomainConfig: DeserializeOwned {
    /// The domain this model reads.
    const DOMAIN: ConfigDomain;

    /// Number of top-level entries, for logging.
    fn entry_count(&self) -> usize;

    /// Broken or duplicated references the schema cannot catch.
    fn reference_issues(&self) -> Vec<ReferenceIssue>;
}

/// Load, validate, and check a domain config file without caching.
///
/// Looks for `<domain>.json` first, then `<domain>.yaml`.
pub fn load_config<T: DomainConfig>(
    config_dir: &Path,
    schemas: &SchemaValidator,
) -> Result<T, ConfigError> {
    let domain = T::DOMAIN;
    let path = config_path(config_dir, domain);
    tracing::debug!(%domain, path = %path.display(), "loading configuration");

    let document = load_document(&path)?;
    schemas.validate_domain(&document, domain)?;

    let config: T = serde_json::from_value(document).map_err(|e| ConfigError::Model {
        domain,
        reason: e.to_string(),
    })?;

    let issues = config.reference_issues();
    if !issues.is_empty() {
        tracing::warn!(%domain, issues = issues.len(), "configuration has broken references");
        return Err(ConfigError::References { domain, issues });
    }

    tracing::info!(%domain, entries = config.entry_count(), "loaded configuration");
    Ok(config)
}

fn config_path(config_dir: &Path, domain: ConfigDomain) -> PathBuf {
    let json = config_dir.join(domain.config_file_name());
    if json.is_file() {
        return json;
    }
    let yaml = json.with_extension("yaml");
    if yaml.is_file() {
        yaml
    } else {
        json
    }
}

/// Lazily loaded, cached access to the typed configuration domains.
#[derive(Debug)]
pub struct GameConfigProvider {
    config_dir: PathBuf,
    schemas: SchemaValidator,
    stress: OnceLock<StressConfiguration>,
    stances: OnceLock<StanceConfiguration>,
    commands: OnceLock<CommandConfiguration>,
    quests: OnceLock<QuestConfiguration>,
    resources: OnceLock<ResourceConfiguration>,
    terrain: OnceLock<TerrainConfiguration>,
}

impl GameConfigProvider {
    /// Create a provider reading from `config_dir`, validating with `schemas`.
    pub fn new(config_dir: impl Into<PathBuf>, schemas: SchemaValidator) -> Self {
        Self {
            config_dir: config_dir.into(),
            schemas,
            stress: OnceLock::new(),
            stances: OnceLock::new(),
            commands: OnceLock::new(),
            quests: OnceLock::new(),
            resources: OnceLock::new(),
            terrain: OnceLock::new(),
        }
    }

    /// Create a provider for a repository laid out with `schemas/` and
    /// `config/` at its root.
    pub fn from_repo_root(root: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let root = root.as_ref();
        let schemas = SchemaValidator::new(root.join("schemas"))?;
        Ok(Self::new(root.join("config"), schemas))
    }

    /// Directory config files are read from.
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// The schema registry used for validation.
    pub fn schemas(&self) -> &SchemaValidator {
        &self.schemas
    }

    fn cached<'a, T: DomainConfig>(&self, cell: &'a OnceLock<T>) -> Result<&'a T, ConfigError> {
        if let Some(config) = cell.get() {
            return Ok(config);
        }
        let loaded = load_config::<T>(&self.config_dir, &self.schemas)?;
        Ok(cell.get_or_init(|| loaded))
    }

    /// Stress sources and recovery rates. Loaded once, then cached.
    pub fn stress_sources(&self) -> Result<&StressConfiguration, ConfigError> {
        self.cached(&self.stress)
    }

    /// Combat stances. Loaded once, then cached.
    pub fn stances(&self) -> Result<&StanceConfiguration, ConfigError> {
        self.cached(&self.stances)
    }

    /// Player commands. Loaded once, then cached.
    pub fn commands(&self) -> Result<&CommandConfiguration, ConfigError> {
        self.cached(&self.commands)
    }

    /// Quest chains. Loaded once, then cached.
    pub fn quests(&self) -> Result<&QuestConfiguration, ConfigError> {
        self.cached(&self.quests)
    }

    /// Character resource pools. Loaded once, then cached.
    pub fn resources(&self) -> Result<&ResourceConfiguration, ConfigError> {
        self.cached(&self.resources)
    }

    /// Terrain definitions. Loaded once, then cached.
    pub fn terrain(&self) -> Result<&TerrainConfiguration, ConfigError> {
        self.cached(&self.terrain)
    }

    /// Load every typed domain, returning each domain's outcome in a fixed
    /// order. One failing domain does not stop the others from loading.
    pub fn check_all(&self) -> Vec<(ConfigDomain, Result<usize, ConfigError>)> {
        vec![
            check(self.stress_sources()),
            check(self.stances()),
            check(self.commands()),
            check(self.quests()),
            check(self.resources()),
            check(self.terrain()),
        ]
    }
}

fn check<T: DomainConfig>(result: Result<&T, ConfigError>) -> (ConfigDomain, Result<usize, ConfigError>) {
    (T::DOMAIN, result.map(DomainConfig::entry_count))
}

/// Domains with a typed model in this crate.
pub const TYPED_DOMAINS: [ConfigDomain; 6] = [
    ConfigDomain::StressSources,
    ConfigDomain::Stances,
    ConfigDomain::Commands,
    ConfigDomain::Quests,
    ConfigDomain::Resources,
    ConfigDomain::Terrain,
];
