//! Rule to forbid selected imports in selected packages.
//!
//! # Rationale
//!
//! Layered code often needs "package X must not depend on Y": the domain
//! layer must not import the web framework, API modules must not import
//! implementation packages, and so on.
//!
//! # Detected Patterns
//!
//! ```toml
//! [rules.forbid-certain-imports]
//! package_name_regexp = "com\\.acme\\.domain(\\..*)?"
//! forbidden_imports_regexp = "org\\.springframework\\..*"
//! forbidden_imports_excludes_regexp = "org\\.springframework\\.lang\\..*"
//! ```
//!
//! ```java
//! package com.acme.domain.order;
//!
//! import org.springframework.web.bind.annotation.RestController;  // BAD
//! import org.springframework.lang.Nullable;                      // GOOD: excluded
//! ```
//!
//! # Configuration
//!
//! All three patterns must match the whole name. Without
//! `forbidden_imports_regexp` the rule reports nothing. Without
//! `package_name_regexp` every package is checked. A file without a
//! `package` declaration has the empty package name.

use jcheck_core::{ast, FileContext, Node, Rule, RuleConfig, Severity, Violation};
use regex::Regex;
use tracing::warn;

/// Rule code for forbid-certain-imports.
pub const CODE: &str = "JC017";

/// Rule name for forbid-certain-imports.
pub const NAME: &str = "forbid-certain-imports";

/// Forbids imports matching a pattern in packages matching another.
#[derive(Debug, Clone)]
pub struct ForbidCertainImports {
    /// Custom severity.
    pub severity: Severity,
    /// Packages the rule applies to; `None` means all.
    pub package_name: Option<Regex>,
    /// Imports that are forbidden; `None` disables the rule.
    pub forbidden_imports: Option<Regex>,
    /// Imports exempt from `forbidden_imports`.
    pub forbidden_imports_excludes: Option<Regex>,
}

impl Default for ForbidCertainImports {
    fn default() -> Self {
        Self::new()
    }
}

impl ForbidCertainImports {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Warning,
            package_name: None,
            forbidden_imports: None,
            forbidden_imports_excludes: None,
        }
    }

    /// Creates the rule from its configuration block.
    #[must_use]
    pub fn from_config(config: &RuleConfig) -> Self {
        let pattern = |key: &str| {
            let source = config.get_option::<String>(key)?;
            match whole_match(&source) {
                Ok(re) => Some(re),
                Err(e) => {
                    warn!(rule = NAME, option = key, error = %e, "Invalid regex, option ignored");
                    None
                }
            }
        };
        Self {
            package_name: pattern("package_name_regexp"),
            forbidden_imports: pattern("forbidden_imports_regexp"),
            forbidden_imports_excludes: pattern("forbidden_imports_excludes_regexp"),
            ..Self::new()
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Restricts the rule to packages matching `pattern`.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is not a valid regex.
    pub fn package_name(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.package_name = Some(whole_match(pattern)?);
        Ok(self)
    }

    /// Forbids imports matching `pattern`.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is not a valid regex.
    pub fn forbidden_imports(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.forbidden_imports = Some(whole_match(pattern)?);
        Ok(self)
    }

    /// Exempts imports matching `pattern`.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is not a valid regex.
    pub fn forbidden_imports_excludes(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.forbidden_imports_excludes = Some(whole_match(pattern)?);
        Ok(self)
    }
}

fn whole_match(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("^(?:{pattern})$"))
}

impl Rule for ForbidCertainImports {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids configured imports in configured packages"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn node_kinds(&self) -> &'static [&'static str] {
        &["import_declaration"]
    }

    fn visit(&self, ctx: &FileContext, node: Node<'_>) -> Vec<Violation> {
        let Some(forbidden) = &self.forbidden_imports else {
            return Vec::new();
        };
        let package = ctx.package.as_deref().unwrap_or("");
        if self
            .package_name
            .as_ref()
            .is_some_and(|re| !re.is_match(package))
        {
            return Vec::new();
        }

        let import = imported_name(node, ctx.content);
        if !forbidden.is_match(&import)
            || self
                .forbidden_imports_excludes
                .as_ref()
                .is_some_and(|re| re.is_match(&import))
        {
            return Vec::new();
        }

        vec![Violation::new(
            CODE,
            NAME,
            self.severity,
            ctx.location(node),
            format!("Import '{import}' is forbidden in package '{package}'"),
        )]
    }
}

/// Dotted name of an import, with `.*` for on-demand imports.
fn imported_name(import: Node<'_>, source: &str) -> String {
    let mut name = ast::named_children(import)
        .into_iter()
        .find(|c| matches!(c.kind(), "identifier" | "scoped_identifier"))
        .map(|n| ast::text(n, source).split_whitespace().collect::<String>())
        .unwrap_or_default();
    if ast::first_child_of_kind(import, "asterisk").is_some() {
        name.push_str(".*");
    }
    name
}
