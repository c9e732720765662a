//! # Validate Subcommand
//!
//! Validates game configuration files against their domain schemas.
//!
//! - `rnr validate --all` checks every domain's config files.
//! - `rnr validate --domain <d>` checks one domain's config files.
//! - `rnr validate PATH` checks a single file; the domain comes from
//!   `--domain` or, failing that, from the file's name and directory.
//!   A shared descriptor file is checked against every schema that reads it.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use rnr_core::ConfigDomain;
use rnr_schema::{domain_config_paths, SchemaValidator};

/// Arguments for the `rnr validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Validate every domain's config file under config/.
    #[arg(long)]
    pub all: bool,

    /// Domain to validate, or the schema to apply to PATH.
    #[arg(long, value_name = "DOMAIN")]
    pub domain: Option<ConfigDomain>,

    /// Validate a specific config file (JSON or YAML).
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 when everything validated, 1 otherwise.
pub fn run_validate(args: &ValidateArgs, repo_root: &Path) -> Result<u8> {
    if !args.all && args.domain.is_none() && args.path.is_none() {
        println!("Usage: rnr validate [--all] [--domain <DOMAIN>] [PATH]");
        return Ok(1);
    }

    let schema_dir = repo_root.join("schemas");
    let validator = SchemaValidator::new(&schema_dir).context("failed to load JSON schemas")?;

    tracing::info!(
        schema_count = validator.schema_count(),
        "loaded schema registry"
    );

    let config_dir = repo_root.join("config");
    let mut had_failures = false;

    if args.all {
        had_failures |= validate_all_domains(&validator, &config_dir, repo_root);
    }

    match (&args.path, args.domain) {
        (Some(path), domain) => {
            let resolved = crate::resolve_path(path, repo_root);
            had_failures |= validate_single_path(&validator, &resolved, domain);
        }
        (None, Some(domain)) if !args.all => {
            had_failures |= validate_domain(&validator, &config_dir, domain);
        }
        _ => {}
    }

    Ok(u8::from(had_failures))
}

/// Validate every domain's config file under `config_dir`.
fn validate_all_domains(validator: &SchemaValidator, config_dir: &Path, repo_root: &Path) -> bool {
    if !config_dir.is_dir() {
        println!(
            "WARN: config/ directory not found at {}",
            config_dir.display()
        );
        return false;
    }

    let report = validator.validate_config_dir(config_dir);

    println!("Configs: {}/{} passed", report.passed, report.total);

    for missing in &report.missing {
        let rel = missing
            .path
            .strip_prefix(repo_root)
            .unwrap_or(&missing.path);
        println!("  MISSING: {} ({})", rel.display(), missing.domain);
    }

    for failure in &report.failures {
        let rel = failure
            .path
            .strip_prefix(repo_root)
            .unwrap_or(&failure.path);
        println!("  FAIL: {}: {}", rel.display(), failure.error);
    }

    if report.failed > 0 {
        println!(
            "\n{} config(s) failed validation out of {} total.",
            report.failed, report.total
        );
    }

    !report.is_clean() || !report.missing.is_empty()
}

/// Validate one domain's config files, accepting `.json` or `.yaml`.
fn validate_domain(validator: &SchemaValidator, config_dir: &Path, domain: ConfigDomain) -> bool {
    let paths = find_config_files(config_dir, domain);
    if paths.is_empty() {
        println!(
            "ERROR: no config file for {domain} under {}",
            config_dir.display()
        );
        return true;
    }

    let failed = paths
        .iter()
        .filter(|path| report_file(validator, path, domain))
        .count();
    println!("{domain}: {}/{} passed", paths.len() - failed, paths.len());
    failed > 0
}

/// Validate a single file, inferring its domains when not given.
fn validate_single_path(
    validator: &SchemaValidator,
    path: &Path,
    domain: Option<ConfigDomain>,
) -> bool {
    if !path.is_file() {
        println!("ERROR: path does not exist: {}", path.display());
        return true;
    }

    let domains = match domain {
        Some(domain) => vec![domain],
        None => ConfigDomain::domains_for_path(path),
    };
    if domains.is_empty() {
        println!(
            "ERROR: cannot determine configuration domain for {}; pass --domain",
            path.display()
        );
        return true;
    }

    domains
        .into_iter()
        .fold(false, |failed, domain| report_file(validator, path, domain) | failed)
}

fn report_file(validator: &SchemaValidator, path: &Path, domain: ConfigDomain) -> bool {
    tracing::debug!(%domain, path = %path.display(), "validating config file");
    match validator.validate_file(path, &domain.schema_file_name()) {
        Ok(()) => {
            println!("OK: {} ({domain})", path.display());
            false
        }
        Err(e) => {
            println!("FAIL: {} ({domain}): {}", path.display(), e);
            true
        }
    }
}

/// Locate each of the domain's config files, preferring `.json` over
/// `.yaml` and `.yml`, then any extra files in the domain's own directory.
fn find_config_files(config_dir: &Path, domain: ConfigDomain) -> Vec<PathBuf> {
    let mut found: Vec<PathBuf> = Vec::new();
    for listed in domain.config_files() {
        let json = config_dir.join(listed);
        if let Some(path) = ["json", "yaml", "yml"]
            .iter()
            .map(|ext| json.with_extension(ext))
            .find(|p| p.is_file())
        {
            found.push(path);
        }
    }

    let listed = domain.config_files().len();
    for extra in domain_config_paths(config_dir, domain).into_iter().skip(listed) {
        let twin = found
            .iter()
            .any(|p| p.with_extension("") == extra.with_extension(""));
        if !twin {
            found.push(extra);
        }
    }
    found
}
