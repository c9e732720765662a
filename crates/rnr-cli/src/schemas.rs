//! # Schemas Subcommand
//!
//! Lists the schema registry and checks each domain schema: it must be
//! present, compile under Draft-07, and pass the structure check. With
//! `--audit`, object schemas that accept unknown keys are reported too.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;

use rnr_core::ConfigDomain;
use rnr_schema::{audit_additional_properties, check_schema_structure, SchemaValidator};

/// Arguments for the `rnr schemas` subcommand.
#[derive(Args, Debug)]
pub struct SchemasArgs {
    /// Also report object schemas whose `additionalProperties` is not false.
    #[arg(long)]
    pub audit: bool,
}

/// Execute the schemas subcommand.
///
/// Returns exit code: 0 when every domain schema is sound, 1 otherwise.
pub fn run_schemas(args: &SchemasArgs, repo_root: &Path) -> Result<u8> {
    let schema_dir = repo_root.join("schemas");
    let validator = SchemaValidator::new(&schema_dir).context("failed to load JSON schemas")?;

    let domains = ConfigDomain::all_domains();
    let mut passed = 0usize;

    for &domain in domains {
        let problems = schema_problems(&validator, domain, args.audit);
        if problems.is_empty() {
            passed += 1;
            println!("  OK:   {domain} ({})", domain.schema_file_name());
        } else {
            println!("  FAIL: {domain} ({})", domain.schema_file_name());
            for problem in &problems {
                println!("        {problem}");
            }
        }
    }

    println!("Schemas: {passed}/{} passed", domains.len());

    let extra: Vec<&str> = validator
        .schema_names()
        .into_iter()
        .filter(|name| !domains.iter().any(|d| d.schema_file_name() == *name))
        .collect();
    if !extra.is_empty() {
        tracing::info!(count = extra.len(), "schemas with no configuration domain");
        for name in extra {
            println!("  EXTRA: {name}");
        }
    }

    Ok(u8::from(passed != domains.len()))
}

fn schema_problems(validator: &SchemaValidator, domain: ConfigDomain, audit: bool) -> Vec<String> {
    let Some(schema) = validator.domain_schema(domain) else {
        return vec![format!("{} not found", domain.schema_file_name())];
    };

    let mut problems: Vec<String> = check_schema_structure(domain, schema)
        .iter()
        .map(ToString::to_string)
        .collect();

    if let Err(e) = validator.build_validator(&domain.schema_file_name()) {
        problems.push(e.to_string());
    }

    if audit {
        problems.extend(
            audit_additional_properties(schema)
                .iter()
                .map(|f| format!("{}: {} ({})", f.json_path, f.current_value, f.recommendation)),
        );
    }

    problems
}
