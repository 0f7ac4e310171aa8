//! Check command implementation.

use anyhow::{bail, Context, Result};
use jcheck_core::{Analyzer, Config, RuleBox};
use jcheck_rules::{rule_from_config, rules_for_config, Preset};
use std::path::Path;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Command-line options of `jcheck check`.
#[derive(Debug, Default)]
pub struct CheckOptions {
    /// Output format.
    pub format: OutputFormat,
    /// Comma-separated rule names or codes replacing the preset.
    pub rules: Option<String>,
    /// Extra exclude globs.
    pub exclude: Vec<String>,
    /// Preset overriding the configuration file.
    pub preset: Option<String>,
}

/// Runs the check command.
///
/// Returns `true` when the run found violations at or above the
/// configured failure threshold.
pub fn run(path: &Path, options: &CheckOptions, source: &ConfigSource) -> Result<bool> {
    let mut config = load_config(source)?;
    if let Some(preset) = &options.preset {
        let preset: Preset = preset.parse().map_err(anyhow::Error::msg)?;
        config.preset = Some(preset.as_str().to_string());
    }

    let rules = match &options.rules {
        Some(filter) => filter_rules(filter, &config)?,
        None => rules_for_config(&config),
    };
    let fail_threshold = config.fail_threshold();

    let analyzer = Analyzer::builder()
        .root(path)
        .config(config)
        .excludes(options.exclude.iter().cloned())
        .rules(rules)
        .build()
        .context("Failed to build analyzer")?;

    tracing::info!(
        "Analyzing {} with {} rules",
        path.display(),
        analyzer.rule_count()
    );

    let result = analyzer.analyze().context("Analysis failed")?;

    super::output::print(&result, options.format, analyzer.root())?;

    Ok(result.has_violations_at(fail_threshold))
}

fn load_config(source: &ConfigSource) -> Result<Config> {
    let Some(path) = source.path() else {
        return Ok(Config::default());
    };
    if source.is_global() {
        tracing::info!("Using global config: {}", path.display());
    }
    Config::from_file(path).with_context(|| format!("Failed to load config: {}", path.display()))
}

/// Builds the rules named in a `--rules` list, with their configured options.
fn filter_rules(filter: &str, config: &Config) -> Result<Vec<RuleBox>> {
    let mut rules = Vec::new();
    for name in filter.split(',').map(str::trim).filter(|n| !n.is_empty()) {
        match rule_from_config(name, config.rule(name)) {
            Some(rule) => rules.push(rule),
            None => tracing::warn!("Unknown rule: {}", name),
        }
    }
    if rules.is_empty() {
        bail!("No known rule in --rules '{filter}'; see `jcheck list-rules`");
    }
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn filter_accepts_names_and_codes() {
        let rules = filter_rules("redundant-return, JC003,unknown", &Config::default()).unwrap();
        let names: Vec<&str> = rules.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["redundant-return", "useless-single-catch"]);
    }

    #[test]
    fn filter_without_known_rules_fails() {
        assert!(filter_rules("nope", &Config::default()).is_err());
    }

    #[test]
    fn run_reports_threshold() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("Foo.java"),
            "class Foo {\n    int f() {\n        try { return 1; } finally { return 2; }\n    }\n}\n",
        )
        .unwrap();

        let options = CheckOptions {
            format: OutputFormat::Compact,
            rules: Some("forbid-return-in-finally-block".to_string()),
            ..CheckOptions::default()
        };
        let failed = run(tmp.path(), &options, &ConfigSource::Default).unwrap();
        assert!(failed);
    }

    #[test]
    fn unknown_preset_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let options = CheckOptions {
            preset: Some("lenient".to_string()),
            ..CheckOptions::default()
        };
        assert!(run(tmp.path(), &options, &ConfigSource::Default).is_err());
    }
}
