//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# jcheck configuration

# Rule preset: minimal | recommended | strict | all
preset = "recommended"

# Lowest severity that makes `jcheck check` exit with status 1
# fail_on = "error"

[analyzer]
# Root directory to analyze (default: current directory)
# root = "./src/main/java"

# Glob patterns to exclude from analysis
exclude = [
    "**/build/**",
    "**/target/**",
    "**/generated/**",
]

# Respect .gitignore files
respect_gitignore = true

# Skip sources under src/test/ and *Test.java
skip_tests = false

# Rule configurations
# A [rules.<name>] table enables the rule even outside the preset.
# Every rule accepts `enabled`, `severity` and `doc_ref` (a link shown in
# the help line of each violation). Tables may also be keyed by code.

# [rules.JC003]
# doc_ref = "docs/STYLE.md#exceptions"

# [rules.numeric-literal-needs-underscore]
# min_decimal_symbol_length = 7
# max_decimal_symbols_until_underscore = 3
# ignore_field_name_pattern = "serialVersionUID"

# [rules.forbid-certain-imports]
# package_name_regexp = "com\\.acme\\.domain\\..*"
# forbidden_imports_regexp = "org\\.springframework\\..*"

# [rules.redundant-return]
# allow_return_in_empty_methods_and_constructors = true

# [rules.forbid-instantiation]
# forbidden_classes = ["java.lang.NullPointerException"]
"#;

/// Name of the file written by `jcheck init`.
const CONFIG_FILE: &str = "jcheck.toml";

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    write_config(Path::new(CONFIG_FILE), force)?;

    println!("Created {CONFIG_FILE}");
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE} to configure rules");
    println!("  2. Run: jcheck check");

    Ok(())
}

fn write_config(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }
    std::fs::write(config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jcheck_core::Config;
    use tempfile::TempDir;

    #[test]
    fn default_config_parses() {
        let config = Config::parse(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.preset.as_deref(), Some("recommended"));
        assert!(config.rules.is_empty());
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        std::fs::write(&path, "preset = \"all\"\n").unwrap();

        assert!(write_config(&path, false).is_err());
        write_config(&path, true).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("preset = \"recommended\""));
    }
}
