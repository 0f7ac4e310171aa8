//! Rule to forbid catch blocks that only rethrow.
//!
//! # Rationale
//!
//! A `try` whose only `catch` immediately rethrows the caught exception
//! behaves exactly like code without the `catch`. The block is noise at
//! best and hides the real intent at worst.
//!
//! # Detected Patterns
//!
//! ```java
//! // BAD
//! try {
//!     load();
//! } catch (IOException e) {
//!     throw e;
//! }
//!
//! // GOOD: several catch blocks, the rethrow keeps IOException out of
//! // the broader handler below
//! try {
//!     load();
//! } catch (IOException e) {
//!     throw e;
//! } catch (Exception e) {
//!     log(e);
//! }
//! ```

use jcheck_core::{ast, FileContext, Node, Rule, RuleConfig, Severity, Suggestion, Violation};

/// Rule code for useless-single-catch.
pub const CODE: &str = "JC003";

/// Rule name for useless-single-catch.
pub const NAME: &str = "useless-single-catch";

/// Forbids a lone catch block that only rethrows the caught exception.
#[derive(Debug, Clone)]
pub struct UselessSingleCatch {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for UselessSingleCatch {
    fn default() -> Self {
        Self::new()
    }
}

impl UselessSingleCatch {
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

impl Rule for UselessSingleCatch {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids a single catch block that only rethrows the caught exception"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn node_kinds(&self) -> &'static [&'static str] {
        &["try_statement", "try_with_resources_statement"]
    }

    fn visit(&self, ctx: &FileContext, node: Node<'_>) -> Vec<Violation> {
        let catches = ast::children_of_kind(node, "catch_clause");
        let [catch] = catches.as_slice() else {
            return Vec::new();
        };

        if !is_rethrow_only(*catch, ctx.content) {
            return Vec::new();
        }

        vec![Violation::new(
            CODE,
            NAME,
            self.severity,
            ctx.location(*catch),
            "Useless single catch block: it only rethrows the caught exception",
        )
        .with_suggestion(Suggestion::new(
            "Remove the catch block and let the exception propagate",
        ))]
    }
}

/// Whether the catch body is exactly `throw <caught parameter>;`.
fn is_rethrow_only(catch: Node<'_>, source: &str) -> bool {
    let Some(param) = ast::first_child_of_kind(catch, "catch_formal_parameter")
        .and_then(|p| ast::name_of(p, source))
    else {
        return false;
    };
    let Some(body) = catch.child_by_field_name("body") else {
        return false;
    };

    let statements = ast::block_statements(body);
    let [statement] = statements.as_slice() else {
        return false;
    };
    if statement.kind() != "throw_statement" {
        return false;
    }

    ast::named_children(*statement)
        .into_iter()
        .next()
        .map(ast::unwrap_parens)
        .is_some_and(|thrown| thrown.kind() == "identifier" && ast::text(thrown, source) == param)
}
