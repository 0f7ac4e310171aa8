//! Rule to forbid `return null;` from methods returning `Boolean`.
//!
//! # Rationale
//!
//! Callers of a `Boolean` method routinely unbox the result in an `if`,
//! which throws `NullPointerException` on `null`. A third "unknown" state
//! deserves a proper type, such as `Optional<Boolean>` or an enum.
//!
//! # Detected Patterns
//!
//! ```java
//! Boolean isEnabled() {
//!     if (config == null) {
//!         return null;          // BAD
//!     }
//!     return config.enabled();
//! }
//! ```
//!
//! Returns inside lambdas and anonymous classes are judged against their
//! own signature and never reported.

use jcheck_core::{ast, FileContext, Node, Rule, RuleConfig, Severity, Violation};

/// Rule code for return-null-instead-of-boolean.
pub const CODE: &str = "JC021";

/// Rule name for return-null-instead-of-boolean.
pub const NAME: &str = "return-null-instead-of-boolean";

/// Forbids returning `null` from `Boolean` methods.
#[derive(Debug, Clone)]
pub struct ReturnNullInsteadOfBoolean {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for ReturnNullInsteadOfBoolean {
    fn default() -> Self {
        Self::new()
    }
}

impl ReturnNullInsteadOfBoolean {
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

impl Rule for ReturnNullInsteadOfBoolean {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids returning null from methods declared to return Boolean"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn node_kinds(&self) -> &'static [&'static str] {
        &["return_statement"]
    }

    fn visit(&self, ctx: &FileContext, node: Node<'_>) -> Vec<Violation> {
        let returns_null = ast::named_children(node)
            .into_iter()
            .next()
            .map(ast::unwrap_parens)
            .is_some_and(|value| value.kind() == "null_literal");
        if !returns_null {
            return Vec::new();
        }

        let returns_boolean = ast::enclosing_callable(node)
            .filter(|callable| callable.kind() == "method_declaration")
            .and_then(|method| method.child_by_field_name("type"))
            .is_some_and(|ty| ast::type_simple_name(ty, ctx.content) == "Boolean");
        if !returns_boolean {
            return Vec::new();
        }

        vec![Violation::new(
            CODE,
            NAME,
            self.severity,
            ctx.location(node),
            "Method returning Boolean must not return null",
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::check;

    fn check_code(code: &str) -> Vec<Violation> {
        check(&ReturnNullInsteadOfBoolean::new(), code)
    }

    #[test]
    fn detects_null_from_boolean_method() {
        let violations = check_code(
            r"
class Foo {
    Boolean isEnabled() {
        if (config == null) {
            return null;
        }
        return config.enabled();
    }

    public java.lang.Boolean cached() {
        return (null);
    }
}
",
        );
        let lines: Vec<usize> = violations.iter().map(|v| v.location.line).collect();
        assert_eq!(lines, vec![5, 11]);
    }

    #[test]
    fn allows_other_return_types_and_values() {
        let violations = check_code(
            r"
class Foo {
    String name() { return null; }
    boolean ready() { return false; }
    Boolean flag() { return Boolean.TRUE; }
}
",
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn lambdas_and_anonymous_classes_are_skipped() {
        let violations = check_code(
            r"
class Foo {
    Boolean f() {
        Supplier<String> s = () -> { return null; };
        Object o = new Object() {
            String g() { return null; }
        };
        return true;
    }
}
",
        );
        assert!(violations.is_empty());
    }
}
