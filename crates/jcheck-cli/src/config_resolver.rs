//! Configuration file resolution with global fallback.
//!
//! Resolution order:
//!
//! 1. `--config` flag (explicit path)
//! 2. `jcheck.toml` or `.jcheck.toml` in the checked directory or the
//!    nearest ancestor, not looking past the repository root (a directory
//!    holding `.git`)
//! 3. `~/.jcheck/config.toml` (global fallback)
//! 4. No config found → defaults

use std::path::{Path, PathBuf};

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly specified via `--config` flag.
    Explicit(PathBuf),
    /// Found in the checked directory or one of its ancestors.
    Project(PathBuf),
    /// Loaded from the global config directory (`~/.jcheck/`).
    Global(PathBuf),
    /// No config found; defaults will be used.
    Default,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Returns `true` if the config was loaded from the global directory.
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global(_))
    }
}

/// Project-level config file names, checked in order within a directory.
const PROJECT_CONFIG_NAMES: &[&str] = &["jcheck.toml", ".jcheck.toml"];

/// Config file name within the global config directory.
const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Resolves the configuration for checking `target`, a directory or a
/// single source file.
#[must_use]
pub fn resolve(target: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_inner(target, explicit, global_config_dir())
}

/// Core of [`resolve`] with the global directory passed in, so tests do
/// not depend on the environment.
fn resolve_inner(
    target: &Path,
    explicit: Option<&Path>,
    global_dir: Option<PathBuf>,
) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    let start = if target.is_file() {
        target.parent().unwrap_or(target)
    } else {
        target
    };
    if let Some(found) = find_project_config(start) {
        tracing::debug!("Found project config: {}", found.display());
        return ConfigSource::Project(found);
    }

    global_dir
        .map(|dir| dir.join(GLOBAL_CONFIG_NAME))
        .filter(|candidate| candidate.exists())
        .map_or(ConfigSource::Default, |candidate| {
            tracing::debug!("Found global config: {}", candidate.display());
            ConfigSource::Global(candidate)
        })
}

/// Walks from `start` towards the filesystem root, stopping after the
/// first directory that contains `.git`.
fn find_project_config(start: &Path) -> Option<PathBuf> {
    let start = std::fs::canonicalize(start).unwrap_or_else(|_| start.to_path_buf());
    for dir in start.ancestors() {
        let found = PROJECT_CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file());
        if found.is_some() {
            return found;
        }
        if dir.join(".git").exists() {
            break;
        }
    }
    None
}

/// Returns the global config directory path.
///
/// Resolution: `$JCHECK_CONFIG_DIR` > `~/.jcheck/`
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("JCHECK_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".jcheck"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// A fake repository root so the upward search stops inside the temp dir.
    fn repo() -> TempDir {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join(".git")).unwrap();
        tmp
    }

    fn canonical(p: &Path) -> PathBuf {
        fs::canonicalize(p).unwrap()
    }

    #[test]
    fn explicit_wins_without_existence_check() {
        let tmp = repo();
        fs::write(tmp.path().join("jcheck.toml"), "").unwrap();

        let explicit = Path::new("/nonexistent/custom.toml");
        let result = resolve_inner(tmp.path(), Some(explicit), None);
        assert_eq!(result, ConfigSource::Explicit(explicit.to_path_buf()));
    }

    #[test]
    fn plain_name_preferred_over_dot_prefix() {
        let tmp = repo();
        fs::write(tmp.path().join("jcheck.toml"), "").unwrap();
        fs::write(tmp.path().join(".jcheck.toml"), "").unwrap();

        let result = resolve_inner(tmp.path(), None, None);
        assert_eq!(
            result,
            ConfigSource::Project(canonical(tmp.path()).join("jcheck.toml"))
        );
    }

    #[test]
    fn found_in_ancestor_of_source_dir() {
        let tmp = repo();
        fs::write(tmp.path().join(".jcheck.toml"), "").unwrap();
        let sources = tmp.path().join("src/main/java");
        fs::create_dir_all(&sources).unwrap();
        let file = sources.join("Foo.java");
        fs::write(&file, "class Foo {}").unwrap();

        let expected = ConfigSource::Project(canonical(tmp.path()).join(".jcheck.toml"));
        assert_eq!(resolve_inner(&sources, None, None), expected);
        assert_eq!(resolve_inner(&file, None, None), expected);
    }

    #[test]
    fn search_stops_at_repository_root() {
        let outer = TempDir::new().unwrap();
        fs::write(outer.path().join("jcheck.toml"), "").unwrap();
        let project = outer.path().join("project");
        fs::create_dir_all(project.join(".git")).unwrap();

        let result = resolve_inner(&project, None, None);
        assert_eq!(result, ConfigSource::Default);
    }

    #[test]
    fn global_fallback_when_no_project_config() {
        let project = repo();
        let global = TempDir::new().unwrap();
        fs::write(global.path().join("config.toml"), "").unwrap();

        let result = resolve_inner(project.path(), None, Some(global.path().to_path_buf()));
        assert_eq!(
            result,
            ConfigSource::Global(global.path().join("config.toml"))
        );
        assert!(result.is_global());
    }

    #[test]
    fn global_skipped_when_project_config_exists() {
        let project = repo();
        fs::write(project.path().join("jcheck.toml"), "").unwrap();
        let global = TempDir::new().unwrap();
        fs::write(global.path().join("config.toml"), "").unwrap();

        let result = resolve_inner(project.path(), None, Some(global.path().to_path_buf()));
        assert!(matches!(result, ConfigSource::Project(_)));
    }

    #[test]
    fn defaults_when_nothing_found() {
        let project = repo();
        let global = TempDir::new().unwrap();

        let result = resolve_inner(project.path(), None, Some(global.path().to_path_buf()));
        assert_eq!(result, ConfigSource::Default);
        assert!(result.path().is_none());
    }
}
