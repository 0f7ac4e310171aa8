//! Configuration types for jcheck.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::types::Severity;

/// Rule option naming a documentation anchor appended to help text.
pub const DOC_REF_OPTION: &str = "doc_ref";

/// Top-level configuration for jcheck.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Preset to use (e.g., "recommended", "strict", "minimal", "all").
    #[serde(default)]
    pub preset: Option<String>,

    /// Severity threshold for a failing exit status (default: "error").
    #[serde(default)]
    pub fail_on: Option<Severity>,

    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Per-rule configurations, keyed by rule name.
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or a rule option shared by
    /// every rule has the wrong type.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (rule, table) in &self.rules {
            if let Some(value) = table.options.get(DOC_REF_OPTION) {
                if !value.is_str() {
                    return Err(ConfigError::InvalidOption {
                        rule: rule.clone(),
                        option: DOC_REF_OPTION.to_string(),
                        message: format!("expected a string, found {}", value.type_str()),
                    });
                }
            }
        }
        Ok(())
    }

    /// Gets the configuration block of a rule.
    #[must_use]
    pub fn rule(&self, rule_name: &str) -> Option<&RuleConfig> {
        self.rules.get(rule_name)
    }

    /// The effective failure threshold.
    #[must_use]
    pub fn fail_threshold(&self) -> Severity {
        self.fail_on.unwrap_or(Severity::Error)
    }
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Root directory to analyze (default: current directory).
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Glob patterns to exclude from analysis.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Glob patterns to include (if empty, all `*.java` files).
    #[serde(default)]
    pub include: Vec<String>,

    /// Whether to respect .gitignore files.
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,

    /// Skip files detected as test sources.
    #[serde(default)]
    pub skip_tests: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            exclude: vec!["**/build/**".to_string(), "**/target/**".to_string()],
            include: Vec::new(),
            respect_gitignore: true,
            skip_tests: false,
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_true() -> bool {
    true
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Severity override for this rule.
    #[serde(default)]
    pub severity: Option<Severity>,

    /// Rule-specific options as key-value pairs.
    #[serde(flatten)]
    pub options: HashMap<String, toml::Value>,
}

impl RuleConfig {
    /// Gets an option value as a specific type.
    #[must_use]
    pub fn get_option<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.options
            .get(key)
            .and_then(|v| v.clone().try_into().ok())
    }

    /// Gets a boolean option with a default value.
    #[must_use]
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.options
            .get(key)
            .and_then(toml::Value::as_bool)
            .unwrap_or(default)
    }

    /// Gets a non-negative integer option with a default value.
    #[must_use]
    pub fn get_usize(&self, key: &str, default: usize) -> usize {
        self.options
            .get(key)
            .and_then(toml::Value::as_integer)
            .and_then(|v| usize::try_from(v).ok())
            .unwrap_or(default)
    }

    /// Gets a string option with a default value.
    #[must_use]
    pub fn get_str<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.options
            .get(key)
            .and_then(|v| v.as_str())
            .unwrap_or(default)
    }

    /// Gets a string list option. Accepts a TOML array or a comma-separated
    /// string; `None` when the key is absent.
    #[must_use]
    pub fn get_str_list(&self, key: &str) -> Option<Vec<String>> {
        match self.options.get(key)? {
            toml::Value::Array(arr) => Some(
                arr.iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .collect(),
            ),
            toml::Value::String(s) => Some(
                s.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect(),
            ),
            _ => None,
        }
    }

    /// Gets a string list option, empty when absent.
    #[must_use]
    pub fn get_str_array(&self, key: &str) -> Vec<String> {
        self.get_str_list(key).unwrap_or_default()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// A rule option has an unusable value.
    #[error("Invalid value for {rule}.{option}: {message}")]
    InvalidOption {
        /// Rule name.
        rule: String,
        /// Option key.
        option: String,
        /// What went wrong.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.analyzer.respect_gitignore);
        assert!(!config.analyzer.skip_tests);
        assert!(config.rules.is_empty());
        assert_eq!(config.fail_threshold(), Severity::Error);
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
preset = "strict"
fail_on = "warning"

[analyzer]
root = "./src/main/java"
exclude = ["**/generated/**"]

[rules.numeric-literal-needs-underscore]
severity = "error"
min_decimal_symbol_length = 5

[rules.redundant-return]
enabled = false

[rules.no-null-for-collection-return]
collection_list = "List, Set"
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.preset.as_deref(), Some("strict"));
        assert_eq!(config.fail_threshold(), Severity::Warning);
        assert_eq!(config.analyzer.root, PathBuf::from("./src/main/java"));
        assert_eq!(config.rule("redundant-return").unwrap().enabled, Some(false));
        assert!(config.rule("never-configured").is_none());

        let rule = config.rule("numeric-literal-needs-underscore").unwrap();
        assert_eq!(rule.enabled, None);
        assert_eq!(rule.severity, Some(Severity::Error));
        assert_eq!(rule.get_usize("min_decimal_symbol_length", 7), 5);
        assert_eq!(rule.get_usize("max_decimal_symbols_until_underscore", 3), 3);

        let list = config
            .rule("no-null-for-collection-return")
            .unwrap()
            .get_str_array("collection_list");
        assert_eq!(list, vec!["List", "Set"]);
    }

    #[test]
    fn doc_ref_must_be_a_string() {
        let err = Config::parse("[rules.JC003]\ndoc_ref = 3\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidOption { ref rule, ref option, .. }
                if rule == "JC003" && option == "doc_ref"
        ));
        assert!(Config::parse("[rules.JC003]\ndoc_ref = \"STYLE.md\"\n").is_ok());
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err = Config::parse("preset = [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
