//! Rule to forbid C-style block comments inside method bodies.
//!
//! # Rationale
//!
//! `/* ... */` comments inside code are commonly used to disable
//! statements, and the dead code they leave behind rots. Explanatory
//! comments inside a body should use `//`.
//!
//! # Detected Patterns
//!
//! ```java
//! void save() {
//!     /* validate(); */   // BAD
//!     // flush first       // GOOD
//!     flush();
//! }
//!
//! /* GOOD: outside any body */
//! void load() { }
//! ```
//!
//! Javadoc comments (`/** ... */`) are never reported.

use jcheck_core::{ast, FileContext, Node, Rule, RuleConfig, Severity, Suggestion, Violation};

/// Rule code for forbid-c-comments-in-methods.
pub const CODE: &str = "JC007";

/// Rule name for forbid-c-comments-in-methods.
pub const NAME: &str = "forbid-c-comments-in-methods";

/// Forbids `/* */` comments inside method and constructor bodies.
#[derive(Debug, Clone)]
pub struct ForbidCCommentsInMethods {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for ForbidCCommentsInMethods {
    fn default() -> Self {
        Self::new()
    }
}

impl ForbidCCommentsInMethods {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Warning,
        }
    }

    /// Creates the rule from its configuration block.
    #[must_use]
    pub fn from_config(_config: &RuleConfig) -> Self {
        Self::new()
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for ForbidCCommentsInMethods {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids C-style block comments inside method bodies"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn node_kinds(&self) -> &'static [&'static str] {
        &["block_comment"]
    }

    fn visit(&self, ctx: &FileContext, node: Node<'_>) -> Vec<Violation> {
        if is_javadoc(ctx.text(node)) {
            return Vec::new();
        }

        let in_body = ast::ancestors(node)
            .filter(|a| ast::CALLABLE_KINDS.contains(&a.kind()))
            .filter_map(|callable| callable.child_by_field_name("body"))
            .any(|body| ast::range_contains(body, node));
        if !in_body {
            return Vec::new();
        }

        vec![Violation::new(
            CODE,
            NAME,
            self.severity,
            ctx.location(node),
            "C-style comments (/* ... */) are not allowed inside methods",
        )
        .with_suggestion(Suggestion::new("Use `//` comments inside method bodies"))]
    }
}

/// `/**/` is an empty C comment, not Javadoc.
fn is_javadoc(comment: &str) -> bool {
    comment.starts_with("/**") && comment != "/**/"
}
