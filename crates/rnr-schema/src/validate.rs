//! # Schema Validation
//!
//! Runtime validation of game configuration documents against JSON Schema
//! definitions (Draft-07).
//!
//! ## Trust Boundary
//!
//! Configuration files are authored by designers and edited by hand.
//! Nothing downstream reads a config until it has passed validation here.
//! Failures carry the instance path, the schema path, and the validator's
//! message for every violation, not just the first.
//!
//! ## Schema Resolution
//!
//! Schemas carry `$id` URIs of the form
//!   `https://schemas.runeandrust.dev/config/<filename>`
//!
//! Every loaded schema is registered under that URI, its own `$id`, and its
//! bare filename. Internal `#/definitions/<name>` references are resolved by
//! the jsonschema crate natively. Nothing is ever fetched over the network.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use jsonschema::{Draft, Retrieve, Uri, ValidationOptions, Validator};
use rnr_core::ConfigDomain;
use serde_json::Value;
use thiserror::Error;

/// URI prefix used by `$id` in the schemas under `schemas/`.
pub const SCHEMA_URI_PREFIX: &str = "https://schemas.runeandrust.dev/config/";

/// Local retriever that resolves `$ref` URIs to schemas loaded in memory.
struct LocalSchemaRetriever {
    /// Map from URI string to schema value.
    schemas_by_uri: HashMap<String, Value>,
}

impl Retrieve for LocalSchemaRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let uri_str = uri.as_str();

        if let Some(value) = self.schemas_by_uri.get(uri_str) {
            return Ok(value.clone());
        }

        let filename = uri_str.rsplit('/').next().unwrap_or(uri_str);
        if let Some(value) = self
            .schemas_by_uri
            .get(&format!("{SCHEMA_URI_PREFIX}{filename}"))
            .or_else(|| self.schemas_by_uri.get(filename))
        {
            return Ok(value.clone());
        }

        // Unknown URIs resolve to the permissive schema instead of a fetch.
        tracing::warn!(uri = uri_str, "unresolved $ref; treating as permissive schema");
        Ok(serde_json::json!({}))
    }
}

/// Error during schema validation.
#[derive(Error, Debug)]
pub enum SchemaValidationError {
    /// The document did not conform to the schema.
    #[error("validation failed against schema '{schema_name}':\n{violations}")]
    ValidationFailed {
        /// Name of the schema that was validated against.
        schema_name: String,
        /// Structured list of individual violations.
        violations: ValidationViolations,
    },

    /// The schema file could not be loaded.
    #[error("schema load error for '{schema_name}': {reason}")]
    SchemaLoadError {
        /// Schema filename or identifier.
        schema_name: String,
        /// Reason the schema could not be loaded.
        reason: String,
    },

    /// The document could not be read or parsed.
    #[error("document load error for '{path}': {reason}")]
    DocumentLoadError {
        /// Path (or label) of the document that failed to load.
        path: String,
        /// Reason the document could not be loaded.
        reason: String,
    },

    /// The compiled validator could not be built (e.g., invalid schema).
    #[error("validator build error for schema '{schema_name}': {reason}")]
    ValidatorBuildError {
        /// Schema filename or identifier.
        schema_name: String,
        /// Reason the validator could not be built.
        reason: String,
    },

    /// IO error reading schema or document.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl SchemaValidationError {
    /// The violations, if this is a `ValidationFailed` error.
    pub fn violations(&self) -> Option<&ValidationViolations> {
        match self {
            Self::ValidationFailed { violations, .. } => Some(violations),
            _ => None,
        }
    }
}

/// A single validation violation with structured context.
#[derive(Debug, Clone)]
pub struct Violation {
    /// JSON Pointer path to the violating field in the instance.
    pub instance_path: String,
    /// JSON Pointer path within the schema that triggered the error.
    pub schema_path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl Violation {
    /// The schema keyword that failed (`enum`, `minimum`, `pattern`, ...).
    pub fn keyword(&self) -> &str {
        self.schema_path.rsplit('/').next().unwrap_or("")
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "  (root): {}", self.message)
        } else {
            write!(f, "  {}: {}", self.instance_path, self.message)
        }
    }
}

/// Collection of validation violations.
#[derive(Debug, Clone)]
pub struct ValidationViolations {
    violations: Vec<Violation>,
}

impl ValidationViolations {
    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// True if any violation was raised by `keyword` (e.g. `"enum"`).
    pub fn has_keyword(&self, keyword: &str) -> bool {
        self.violations.iter().any(|v| v.keyword() == keyword)
    }

    /// True if any violation points at or below `instance_path`.
    pub fn touches(&self, instance_path: &str) -> bool {
        self.violations
            .iter()
            .any(|v| v.instance_path.starts_with(instance_path))
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
    }
}

impl fmt::Display for ValidationViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// A schema validator backed by the `jsonschema` crate.
///
/// Loads every JSON schema from the `schemas/` directory at construction
/// time and validates documents against them by filename or by
/// [`ConfigDomain`]. Compiled validators are cached per schema, so the
/// cost of compiling a schema is paid once per `SchemaValidator`.
///
/// ## Thread Safety
///
/// `SchemaValidator` is `Send + Sync`; the validator cache sits behind an
/// `RwLock` and hands out `Arc<Validator>`.
pub struct SchemaValidator {
    /// Root directory containing JSON schema files.
    schema_dir: PathBuf,
    /// Map from schema filename (e.g., "stances.schema.json") to parsed JSON value.
    schemas: HashMap<String, Value>,
    /// Compiled validators keyed by schema filename.
    compiled: RwLock<HashMap<String, Arc<Validator>>>,
}

impl fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaValidator")
            .field("schema_dir", &self.schema_dir)
            .field("schemas", &self.schema_names())
            .finish_non_exhaustive()
    }
}

impl SchemaValidator {
    /// Create a new validator by loading all schemas from the given directory.
    ///
    /// Reads every `*.schema.json` file in `schema_dir`, parses it as JSON,
    /// and indexes it by filename.
    ///
    /// # Errors
    ///
    /// Returns `SchemaValidationError::SchemaLoadError` if the directory or
    /// any schema file cannot be read or parsed as JSON.
    pub fn new(schema_dir: impl AsRef<Path>) -> Result<Self, SchemaValidationError> {
        let schema_dir = schema_dir.as_ref().to_path_buf();
        let mut schemas = HashMap::new();

        let entries = std::fs::read_dir(&schema_dir).map_err(|e| {
            SchemaValidationError::SchemaLoadError {
                schema_name: schema_dir.display().to_string(),
                reason: format!("cannot read schema directory: {e}"),
            }
        })?;

        for entry in entries {
            let path = entry?.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !name.ends_with(".schema.json") {
                continue;
            }
            let content = std::fs::read_to_string(&path).map_err(|e| {
                SchemaValidationError::SchemaLoadError {
                    schema_name: name.to_string(),
                    reason: format!("cannot read file: {e}"),
                }
            })?;
            let value: Value = serde_json::from_str(&content).map_err(|e| {
                SchemaValidationError::SchemaLoadError {
                    schema_name: name.to_string(),
                    reason: format!("invalid JSON: {e}"),
                }
            })?;
            tracing::debug!(schema = name, "loaded schema");
            schemas.insert(name.to_string(), value);
        }

        Ok(Self {
            schema_dir,
            schemas,
            compiled: RwLock::new(HashMap::new()),
        })
    }

    /// Returns the schema directory path.
    pub fn schema_dir(&self) -> &Path {
        &self.schema_dir
    }

    /// Returns the number of loaded schemas.
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }

    /// Returns the names of all loaded schemas, sorted alphabetically.
    pub fn schema_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.schemas.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }

    /// Look up a loaded schema by filename.
    pub fn get_schema(&self, name: &str) -> Option<&Value> {
        self.schemas.get(name)
    }

    /// Look up the schema for a configuration domain.
    pub fn domain_schema(&self, domain: ConfigDomain) -> Option<&Value> {
        self.schemas.get(&domain.schema_file_name())
    }

    /// Build `ValidationOptions` forcing Draft-07 with every loaded schema
    /// reachable through the local retriever.
    fn build_options(&self) -> ValidationOptions {
        let mut opts = jsonschema::options();
        opts.with_draft(Draft::Draft7);

        let mut schemas_by_uri: HashMap<String, Value> = HashMap::new();
        for (filename, value) in &self.schemas {
            schemas_by_uri.insert(format!("{SCHEMA_URI_PREFIX}{filename}"), value.clone());
            if let Some(id_str) = value.get("$id").and_then(|v| v.as_str()) {
                schemas_by_uri.insert(id_str.to_string(), value.clone());
            }
            schemas_by_uri.insert(filename.clone(), value.clone());
        }

        opts.with_retriever(LocalSchemaRetriever { schemas_by_uri });
        opts
    }

    /// Return the compiled `Validator` for a schema, compiling it on first use.
    ///
    /// # Errors
    ///
    /// Returns `SchemaValidationError::SchemaLoadError` if the schema is not found.
    /// Returns `SchemaValidationError::ValidatorBuildError` if the validator cannot be compiled.
    pub fn build_validator(&self, schema_name: &str) -> Result<Arc<Validator>, SchemaValidationError> {
        if let Some(v) = self
            .compiled
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(schema_name)
        {
            return Ok(Arc::clone(v));
        }

        let schema_value = self.schemas.get(schema_name).ok_or_else(|| {
            SchemaValidationError::SchemaLoadError {
                schema_name: schema_name.to_string(),
                reason: format!("schema not found in {}", self.schema_dir.display()),
            }
        })?;

        let validator = self
            .build_options()
            .build(schema_value)
            .map(Arc::new)
            .map_err(|e| SchemaValidationError::ValidatorBuildError {
                schema_name: schema_name.to_string(),
                reason: e.to_string(),
            })?;
        tracing::debug!(schema = schema_name, "compiled schema validator");

        self.compiled
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(schema_name.to_string(), Arc::clone(&validator));
        Ok(validator)
    }

    /// Validate a parsed JSON value against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaValidationError::ValidationFailed` with every
    /// violation if the document is invalid.
    pub fn validate_document(
        &self,
        instance: &Value,
        schema_name: &str,
    ) -> Result<(), SchemaValidationError> {
        let validator = self.build_validator(schema_name)?;

        let errors: Vec<Violation> = validator
            .iter_errors(instance)
            .map(|e| Violation {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaValidationError::ValidationFailed {
                schema_name: schema_name.to_string(),
                violations: ValidationViolations { violations: errors },
            })
        }
    }

    /// Validate a parsed JSON value against a domain's schema.
    pub fn validate_domain(
        &self,
        instance: &Value,
        domain: ConfigDomain,
    ) -> Result<(), SchemaValidationError> {
        self.validate_document(instance, &domain.schema_file_name())
    }

    /// Boolean shortcut for [`validate_document`](Self::validate_document).
    ///
    /// Errors only when the schema itself is missing or does not compile.
    pub fn is_valid(&self, instance: &Value, schema_name: &str) -> Result<bool, SchemaValidationError> {
        Ok(self.build_validator(schema_name)?.is_valid(instance))
    }

    /// Parse JSON text and validate it against a named schema.
    pub fn validate_str(&self, json: &str, schema_name: &str) -> Result<(), SchemaValidationError> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| SchemaValidationError::DocumentLoadError {
                path: "<inline>".to_string(),
                reason: format!("invalid JSON: {e}"),
            })?;
        self.validate_document(&value, schema_name)
    }

    /// Validate a YAML or JSON document against a schema, loading from a file path.
    ///
    /// `.yaml`/`.yml` files are read as YAML; everything else as JSON.
    pub fn validate_file(
        &self,
        document_path: &Path,
        schema_name: &str,
    ) -> Result<(), SchemaValidationError> {
        let value = load_document(document_path)?;
        self.validate_document(&value, schema_name)
    }

    /// Validate every domain's config files under `config_dir`.
    ///
    /// Each file listed by [`ConfigDomain::config_files`] is checked, plus
    /// any other JSON or YAML file in a directory the domain owns. A file
    /// shared by two domains is checked once per domain. Listed files that
    /// are absent go to [`ConfigValidationReport::missing`] and do not count
    /// toward `total`.
    pub fn validate_config_dir(&self, config_dir: &Path) -> ConfigValidationReport {
        let mut report = ConfigValidationReport::default();

        for &domain in ConfigDomain::all_domains() {
            for path in domain_config_paths(config_dir, domain) {
                if !path.is_file() {
                    tracing::debug!(%domain, path = %path.display(), "config file not present");
                    report.missing.push(MissingConfig { domain, path });
                    continue;
                }

                report.total += 1;
                match self.validate_file(&path, &domain.schema_file_name()) {
                    Ok(()) => report.passed += 1,
                    Err(error) => report.failures.push(ConfigFailure { domain, path, error }),
                }
            }
        }

        report.failed = report.failures.len();
        report
    }
}

/// The listed config files of `domain` under `config_dir`, followed by any
/// extra `.json`/`.yaml`/`.yml` files in the domain's own directory.
pub fn domain_config_paths(config_dir: &Path, domain: ConfigDomain) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = domain
        .config_files()
        .iter()
        .map(|file| config_dir.join(file))
        .collect();

    let Some(dir) = domain.config_dir() else {
        return paths;
    };
    let Ok(entries) = std::fs::read_dir(config_dir.join(dir)) else {
        return paths;
    };
    let mut extra: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            matches!(
                path.extension().and_then(|e| e.to_str()),
                Some("json" | "yaml" | "yml")
            )
        })
        .filter(|path| !paths.contains(path))
        .collect();
    extra.sort();
    paths.extend(extra);
    paths
}

/// Read a JSON or YAML document from disk into a `serde_json::Value`.
pub fn load_document(path: &Path) -> Result<Value, SchemaValidationError> {
    let load_error = |reason: String| SchemaValidationError::DocumentLoadError {
        path: path.display().to_string(),
        reason,
    };

    let content =
        std::fs::read_to_string(path).map_err(|e| load_error(format!("cannot read file: {e}")))?;

    match path.extension().and_then(|e| e.to_str()).unwrap_or("") {
        "yaml" | "yml" => {
            let yaml: serde_yaml::Value = serde_yaml::from_str(&content)
                .map_err(|e| load_error(format!("invalid YAML: {e}")))?;
            yaml_to_json_value(&yaml)
                .map_err(|e| load_error(format!("YAML-to-JSON conversion failed: {e}")))
        }
        _ => serde_json::from_str(&content).map_err(|e| load_error(format!("invalid JSON: {e}"))),
    }
}

/// Convert a `serde_yaml::Value` to a `serde_json::Value`.
///
/// Config files only use the JSON-compatible subset of YAML; tags are
/// dropped and non-string keys are stringified.
fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value, String> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::from(i))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::from(u))
            } else if let Some(f) = n.as_f64() {
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| format!("cannot represent float {f} in JSON"))
            } else {
                Err(format!("unsupported YAML number: {n:?}"))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => seq
            .iter()
            .map(yaml_to_json_value)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        serde_yaml::Value::Mapping(map) => {
            let mut json_map = serde_json::Map::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    other => return Err(format!("unsupported YAML map key type: {other:?}")),
                };
                json_map.insert(key, yaml_to_json_value(v)?);
            }
            Ok(Value::Object(json_map))
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json_value(&tagged.value),
    }
}

// ---------------------------------------------------------------------------
// Validation report types
// ---------------------------------------------------------------------------

/// Result of validating every domain's config file in a directory.
#[derive(Debug, Default)]
pub struct ConfigValidationReport {
    /// Number of config files found and validated.
    pub total: usize,
    /// Number that passed validation.
    pub passed: usize,
    /// Number that failed validation.
    pub failed: usize,
    /// Listed config files absent from the directory.
    pub missing: Vec<MissingConfig>,
    /// Details of each failure.
    pub failures: Vec<ConfigFailure>,
}

impl ConfigValidationReport {
    /// True when every config file found passed.
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}

/// A listed config file that was not found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingConfig {
    /// Domain the file belongs to.
    pub domain: ConfigDomain,
    /// Where the file was expected.
    pub path: PathBuf,
}

/// A single config file that failed validation.
#[derive(Debug)]
pub struct ConfigFailure {
    /// Domain whose schema was applied.
    pub domain: ConfigDomain,
    /// Path to the config file.
    pub path: PathBuf,
    /// The validation error.
    pub error: SchemaValidationError,
}
