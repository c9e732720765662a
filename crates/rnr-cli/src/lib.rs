//! # rnr-cli: Configuration Tooling for Rune & Rust
//!
//! Provides the `rnr` command-line interface used by content authors and CI
//! to keep `config/` in line with `schemas/`.
//!
//! ## Subcommands
//!
//! - `rnr validate`: Schema validation of config files.
//! - `rnr schemas`: Schema registry listing and structure audit.
//! - `rnr check`: Full typed load (schema, model, references) of every
//!   domain the game reads through `GameConfigProvider`.
//!
//! ```bash
//! rnr validate --all
//! rnr validate --domain quests
//! rnr validate config/terrain.json
//! rnr schemas --audit
//! rnr check
//! ```

pub mod check;
pub mod schemas;
pub mod validate;

use std::path::{Path, PathBuf};

/// Resolve a path that may be relative to the repository root.
///
/// Absolute paths are returned as-is. A relative path is taken from the
/// repository root when it exists there, otherwise from the current
/// directory.
pub fn resolve_path(path: &Path, repo_root: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    let repo_relative = repo_root.join(path);
    if repo_relative.exists() {
        repo_relative
    } else {
        path.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_path_prefers_repo_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("config")).unwrap();
        let resolved = resolve_path(Path::new("config"), dir.path());
        assert_eq!(resolved, dir.path().join("config"));
    }

    #[test]
    fn test_resolve_path_falls_back_to_cwd_relative() {
        let dir = tempfile::tempdir().unwrap();
        let resolved = resolve_path(Path::new("nowhere.json"), dir.path());
        assert_eq!(resolved, PathBuf::from("nowhere.json"));
    }

    #[test]
    fn test_resolve_path_keeps_absolute() {
        let dir = tempfile::tempdir().unwrap();
        let absolute = dir.path().join("quests.json");
        assert_eq!(resolve_path(&absolute, Path::new("/elsewhere")), absolute);
    }
}
