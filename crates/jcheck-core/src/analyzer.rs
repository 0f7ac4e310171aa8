//! Core analyzer for orchestrating check execution.

use crate::config::{Config, RuleConfig, DOC_REF_OPTION};
use crate::context::FileContext;
use crate::parser::{self, ParseError};
use crate::rule::{Rule, RuleBox};
use crate::types::{LintResult, Severity, Suggestion, Violation};
use crate::utils::allowance::AllowIndex;
use crate::walker::Dispatcher;

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error reading files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing a Java source file.
    #[error("Parse error in {path}: {message}")]
    Parse {
        /// Path to the file that failed to parse.
        path: PathBuf,
        /// Parse error message.
        message: String,
    },

    /// Directory walk error.
    #[error("File discovery failed: {0}")]
    Walk(#[from] ignore::Error),

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    rules: Vec<RuleBox>,
    exclude_patterns: Vec<String>,
    include_patterns: Vec<String>,
    config: Option<Config>,
    fail_on_parse_error: bool,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Adds a rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the analyzer.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds several boxed rules to the analyzer.
    #[must_use]
    pub fn rules<I>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = RuleBox>,
    {
        self.rules.extend(rules);
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Adds an include glob pattern.
    #[must_use]
    pub fn include(mut self, pattern: impl Into<String>) -> Self {
        self.include_patterns.push(pattern.into());
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets whether to fail on parse errors (default: false).
    #[must_use]
    pub fn fail_on_parse_error(mut self, fail: bool) -> Self {
        self.fail_on_parse_error = fail;
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory cannot be determined or a
    /// glob pattern is invalid.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let config = self.config.unwrap_or_default();

        let root = self
            .root
            .unwrap_or_else(|| config.analyzer.root.clone());
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        let mut exclude_patterns = self.exclude_patterns;
        exclude_patterns.extend(config.analyzer.exclude.iter().cloned());

        let mut include_patterns = self.include_patterns;
        include_patterns.extend(config.analyzer.include.iter().cloned());

        let exclude = compile_patterns(&exclude_patterns)?;
        let include = compile_patterns(&include_patterns)?;

        Ok(Analyzer {
            root,
            rules: self.rules,
            exclude_patterns,
            exclude,
            include,
            config,
            fail_on_parse_error: self.fail_on_parse_error,
        })
    }
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<glob::Pattern>, AnalyzerError> {
    patterns
        .iter()
        .map(|p| glob::Pattern::new(p).map_err(AnalyzerError::from))
        .collect()
}

/// The main analyzer that orchestrates check execution.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    rules: Vec<RuleBox>,
    exclude_patterns: Vec<String>,
    exclude: Vec<glob::Pattern>,
    include: Vec<glob::Pattern>,
    config: Config,
    fail_on_parse_error: bool,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the root directory being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Analyzes all files and returns the results.
    ///
    /// # Errors
    ///
    /// Returns an error if file discovery or reading fails, or if a file
    /// cannot be parsed while `fail_on_parse_error` is set.
    pub fn analyze(&self) -> Result<LintResult, AnalyzerError> {
        info!("Starting analysis at {:?}", self.root);

        let mut result = LintResult::new();
        let files = self.discover_files()?;

        info!("Found {} files to analyze", files.len());

        for file_path in &files {
            let content = std::fs::read_to_string(file_path)?;
            match self.analyze_source(file_path, &content) {
                Ok(Some(violations)) => {
                    result.violations.extend(violations);
                    result.files_checked += 1;
                }
                Ok(None) => {}
                Err(AnalyzerError::Parse { path, message }) => {
                    warn!("Failed to parse {}: {}", path.display(), message);
                    if self.fail_on_parse_error {
                        return Err(AnalyzerError::Parse { path, message });
                    }
                    result.parse_errors.push(path);
                }
                Err(e) => return Err(e),
            }
        }

        result.sort();

        info!(
            "Analysis complete: {} violations in {} files",
            result.violations.len(),
            result.files_checked
        );

        Ok(result)
    }

    /// Analyzes one compilation unit given its path and contents.
    ///
    /// Returns `Ok(None)` when the file is skipped (test sources with
    /// `skip_tests` set).
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::Parse`] when the source does not parse
    /// cleanly.
    pub fn analyze_source(
        &self,
        path: &Path,
        content: &str,
    ) -> Result<Option<Vec<Violation>>, AnalyzerError> {
        debug!("Analyzing: {}", path.display());

        let parse_error = |message: String| AnalyzerError::Parse {
            path: path.to_path_buf(),
            message,
        };

        let tree = parser::parse(content).map_err(|e: ParseError| parse_error(e.to_string()))?;
        let root = tree.root_node();
        if root.has_error() {
            let at = first_error_position(root);
            return Err(parse_error(format!(
                "syntax error near line {}, column {}",
                at.0, at.1
            )));
        }

        let ctx = FileContext::new(path, content, &self.root)
            .with_package(parser::package_name(&tree, content));

        if ctx.is_test && self.config.analyzer.skip_tests {
            debug!("Skipping test source: {}", path.display());
            return Ok(None);
        }

        let enabled = self.rules.iter().filter(|rule| {
            let enabled = self
                .rule_table(rule.name(), rule.code())
                .map_or(true, |table| table.enabled.unwrap_or(true));
            if !enabled {
                debug!("Skipping disabled rule: {}", rule.name());
            }
            enabled
        });
        let dispatcher = Dispatcher::new(enabled.map(|rule| &**rule));

        let allows = AllowIndex::parse(content);
        if !allows.is_empty() {
            debug!("{} allow directive(s) in {}", allows.len(), path.display());
        }
        let mut violations = Vec::new();
        for violation in dispatcher.walk(&ctx, root) {
            let violation = self.apply_rule_config(violation);
            violations.extend(apply_allowance(&allows, violation));
        }

        Ok(Some(violations))
    }

    /// Applies the rule's configuration table, keyed by rule name or code:
    /// a severity override and a `doc_ref` pointing at the team's style
    /// guide.
    fn apply_rule_config(&self, mut violation: Violation) -> Violation {
        let Some(table) = self.rule_table(&violation.rule, &violation.code) else {
            return violation;
        };
        if let Some(severity) = table.severity {
            violation.severity = severity;
        }
        if let Some(doc_ref) = table.get_option::<String>(DOC_REF_OPTION) {
            violation.doc_ref = Some(doc_ref);
        }
        violation
    }

    /// Discovers all Java source files to analyze.
    fn discover_files(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        let mut builder = ignore::WalkBuilder::new(&self.root);
        builder
            .hidden(false)
            .git_ignore(self.config.analyzer.respect_gitignore)
            .git_exclude(self.config.analyzer.respect_gitignore)
            .require_git(false);

        let mut files = Vec::new();
        for entry in builder.build() {
            let entry = entry?;
            let path = entry.path();

            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("java") {
                continue;
            }

            if self.should_exclude(path) {
                debug!("Excluding: {}", path.display());
                continue;
            }

            files.push(path.to_path_buf());
        }

        files.sort();
        Ok(files)
    }

    /// Checks if a path should be excluded.
    fn should_exclude(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        let relative = path
            .strip_prefix(&self.root)
            .map_or_else(|_| path_str.to_string(), |p| p.to_string_lossy().into_owned());

        if !self.include.is_empty()
            && !self
                .include
                .iter()
                .any(|p| p.matches(&relative) || p.matches(&path_str))
        {
            return true;
        }

        if self
            .exclude
            .iter()
            .any(|p| p.matches(&relative) || p.matches(&path_str))
        {
            return true;
        }

        // Directory-style patterns like "**/build/**" also match by substring
        self.exclude_patterns.iter().any(|pattern| {
            let normalized = pattern.replace("**", "");
            normalized.len() > 1 && normalized.contains('/') && path_str.contains(&normalized)
        })
    }

    /// Gets the configuration table of a rule, keyed by its name or, when
    /// no such table exists, by its code.
    #[must_use]
    pub fn rule_table(&self, name: &str, code: &str) -> Option<&RuleConfig> {
        self.config.rule(name).or_else(|| self.config.rule(code))
    }
}

/// Drops violations covered by an allow directive. An error-level
/// allowance without a reason is replaced by a warning.
fn apply_allowance(allows: &AllowIndex, violation: Violation) -> Option<Violation> {
    let check = allows.check(
        violation.location.line,
        &[violation.rule.as_str(), violation.code.as_str()],
    );
    if !check.is_allowed() {
        return Some(violation);
    }
    if violation.severity == Severity::Error && check.reason().is_none() {
        let message = format!(
            "Allow directive for '{}' is missing required reason",
            violation.rule
        );
        return Some(
            Violation::new(
                violation.code,
                violation.rule,
                Severity::Warning,
                violation.location,
                message,
            )
            .with_suggestion(Suggestion::new(
                "Add reason=\"...\" to explain why this exception is necessary",
            )),
        );
    }
    None
}

/// Position (1-based line, column) of the first ERROR or MISSING node.
fn first_error_position(root: tree_sitter::Node<'_>) -> (usize, usize) {
    crate::ast::descendants(root)
        .find(|n| n.is_error() || n.is_missing())
        .map_or((1, 1), |n| {
            let p = n.start_position();
            (p.row + 1, p.column + 1)
        })
}
