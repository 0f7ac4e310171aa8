//! Rule to forbid ternaries with a boolean literal branch.
//!
//! # Rationale
//!
//! A conditional expression whose branch is `true` or `false` can always
//! be written with plain boolean operators, which read better:
//!
//! ```java
//! return ready ? true : retry();    // BAD, same as: ready || retry()
//! return ready ? false : true;      // BAD, same as: !ready
//! return ready ? count : 0;         // GOOD
//! ```
//!
//! # Detected Patterns
//!
//! Any `?:` expression whose second or third operand, ignoring
//! parentheses, is a `true` or `false` literal.

use jcheck_core::{
    ast, FileContext, Label, Node, Rule, RuleConfig, Severity, Suggestion, Violation,
};

/// Rule code for return-boolean-from-ternary.
pub const CODE: &str = "JC012";

/// Rule name for return-boolean-from-ternary.
pub const NAME: &str = "return-boolean-from-ternary";

/// Forbids ternary expressions with a boolean literal branch.
#[derive(Debug, Clone)]
pub struct ReturnBooleanFromTernary {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for ReturnBooleanFromTernary {
    fn default() -> Self {
        Self::new()
    }
}

impl ReturnBooleanFromTernary {
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

impl Rule for ReturnBooleanFromTernary {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids ternary expressions with a true or false branch"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn node_kinds(&self) -> &'static [&'static str] {
        &["ternary_expression"]
    }

    fn visit(&self, ctx: &FileContext, node: Node<'_>) -> Vec<Violation> {
        let literals: Vec<Node<'_>> = ["consequence", "alternative"]
            .into_iter()
            .filter_map(|field| node.child_by_field_name(field))
            .map(ast::unwrap_parens)
            .filter(|branch| matches!(branch.kind(), "true" | "false"))
            .collect();
        if literals.is_empty() {
            return Vec::new();
        }

        let mut violation = Violation::new(
            CODE,
            NAME,
            self.severity,
            ctx.location(node),
            "Ternary expression with a boolean literal branch can be simplified",
        )
        .with_suggestion(Suggestion::new(
            "Rewrite the condition with &&, || and ! instead of ?:",
        ));
        for literal in literals {
            violation = violation.with_label(Label::new(ctx.location(literal), "boolean literal"));
        }
        vec![violation]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::check;

    fn check_code(code: &str) -> Vec<Violation> {
        check(&ReturnBooleanFromTernary::new(), code)
    }

    #[test]
    fn detects_literal_branches() {
        let violations = check_code(
            r"
class Foo {
    boolean f(boolean ready) {
        boolean a = ready ? true : retry();
        boolean b = ready ? check() : (false);
        return ready ? false : true;
    }
}
",
        );
        assert_eq!(violations.len(), 3);
        assert_eq!(violations[2].labels.len(), 2);
    }

    #[test]
    fn allows_non_literal_branches() {
        let violations = check_code(
            r#"
class Foo {
    int f(boolean ready) {
        String s = ready ? "true" : "false";
        boolean t = ready ? isTrue() : isFalse(true);
        return ready ? 1 : 0;
    }
}
"#,
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn literal_in_condition_is_fine() {
        let violations = check_code(
            r"
class Foo {
    int f() {
        return true ? 1 : 2;
    }
}
",
        );
        assert!(violations.is_empty());
    }
}
