//! # Check Subcommand
//!
//! Loads every typed configuration the game reads through
//! [`GameConfigProvider`]: schema validation, deserialization into the
//! model, and cross-reference checks. Catches problems `validate` cannot,
//! such as a `defaultStance` naming a stance that does not exist.

use std::path::Path;

use anyhow::{Context, Result};

use rnr_config::GameConfigProvider;

/// Execute the check subcommand.
///
/// Returns exit code: 0 when every typed domain loads, 1 otherwise.
pub fn run_check(repo_root: &Path) -> Result<u8> {
    let provider =
        GameConfigProvider::from_repo_root(repo_root).context("failed to load JSON schemas")?;

    let results = provider.check_all();
    let total = results.len();
    let mut failures = Vec::new();

    for (domain, result) in results {
        match result {
            Ok(entries) => println!("  OK:   {domain} ({entries} entries)"),
            Err(e) => {
                println!("  FAIL: {domain}");
                failures.push((domain, e));
            }
        }
    }

    println!("Typed configs: {}/{} loaded", total - failures.len(), total);

    for (domain, error) in &failures {
        println!("\n{domain}:\n{error}");
    }

    Ok(u8::from(!failures.is_empty()))
}
