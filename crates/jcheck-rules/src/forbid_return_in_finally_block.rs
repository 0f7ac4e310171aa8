//! Rule to forbid `return` inside `finally`.
//!
//! # Rationale
//!
//! A `return` in a `finally` block silently discards any exception thrown
//! from the `try` or `catch` blocks, and overrides their return value.
//!
//! # Detected Patterns
//!
//! ```java
//! // BAD
//! try {
//!     return compute();
//! } finally {
//!     return DEFAULT;
//! }
//!
//! // GOOD: the return belongs to the lambda, not the enclosing method
//! try {
//!     run();
//! } finally {
//!     executor.submit(() -> { return flush(); });
//! }
//! ```

use jcheck_core::{ast, FileContext, Node, Rule, RuleConfig, Severity, Violation};

/// Rule code for forbid-return-in-finally-block.
pub const CODE: &str = "JC004";

/// Rule name for forbid-return-in-finally-block.
pub const NAME: &str = "forbid-return-in-finally-block";

/// Forbids `return` statements that leave a method from a `finally` block.
#[derive(Debug, Clone)]
pub struct ForbidReturnInFinallyBlock {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for ForbidReturnInFinallyBlock {
    fn default() -> Self {
        Self::new()
    }
}

impl ForbidReturnInFinallyBlock {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Error,
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

impl Rule for ForbidReturnInFinallyBlock {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids return statements inside finally blocks"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn node_kinds(&self) -> &'static [&'static str] {
        &["return_statement"]
    }

    fn visit(&self, ctx: &FileContext, node: Node<'_>) -> Vec<Violation> {
        if ast::find_ancestor_until(node, &["finally_clause"], ast::SCOPE_BOUNDARY_KINDS).is_none()
        {
            return Vec::new();
        }

        vec![Violation::new(
            CODE,
            NAME,
            self.severity,
            ctx.location(node),
            "Return statement inside a finally block discards exceptions and earlier results",
        )]
    }
}
