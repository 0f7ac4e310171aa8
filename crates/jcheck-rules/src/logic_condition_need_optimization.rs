//! Rule to put cheap operands first in `&&`/`||` conditions.
//!
//! # Rationale
//!
//! `&&` and `||` stop evaluating as soon as the result is known. When a
//! method call sits on the left and a plain variable on the right, the
//! call runs every time even though the variable alone could often decide
//! the result.
//!
//! # Detected Patterns
//!
//! ```java
//! if (isExpensive() && enabled) { ... }    // BAD
//! if (enabled && isExpensive()) { ... }    // GOOD
//! if (a() || b()) { ... }                  // GOOD: both sides call
//! ```
//!
//! Object creation counts as a call. In a chain such as
//! `a() && b && c` only the outermost operator is reported.

use jcheck_core::{ast, FileContext, Node, Rule, RuleConfig, Severity, Suggestion, Violation};

/// Rule code for logic-condition-need-optimization.
pub const CODE: &str = "JC019";

/// Rule name for logic-condition-need-optimization.
pub const NAME: &str = "logic-condition-need-optimization";

const CALL_KINDS: &[&str] = &["method_invocation", "object_creation_expression"];

/// Code in these subtrees does not run when the operand is evaluated.
const DEFERRED: &[&str] = &["lambda_expression", "class_body"];

/// Flags `&&`/`||` whose left operand calls a method and right does not.
#[derive(Debug, Clone)]
pub struct LogicConditionNeedOptimization {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for LogicConditionNeedOptimization {
    fn default() -> Self {
        Self::new()
    }
}

impl LogicConditionNeedOptimization {
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

impl Rule for LogicConditionNeedOptimization {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires operands without method calls to come first in && and || conditions"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn node_kinds(&self) -> &'static [&'static str] {
        &["binary_expression"]
    }

    fn visit(&self, ctx: &FileContext, node: Node<'_>) -> Vec<Violation> {
        let source = ctx.content;
        let Some(op) = logical_operator(node, source) else {
            return Vec::new();
        };
        if !needs_optimization(node) {
            return Vec::new();
        }

        let reported_by_parent = node.parent().is_some_and(|parent| {
            logical_operator(parent, source) == Some(op)
                && parent.child_by_field_name("left") == Some(node)
                && needs_optimization(parent)
        });
        if reported_by_parent {
            return Vec::new();
        }

        vec![Violation::new(
            CODE,
            NAME,
            self.severity,
            ctx.location(node),
            format!(
                "Condition with '{op}' can be optimized: \
                 evaluate operands without method calls first"
            ),
        )
        .with_suggestion(Suggestion::new(
            "Move the operand without method calls to the left",
        ))]
    }
}

fn logical_operator<'s>(node: Node<'_>, source: &'s str) -> Option<&'s str> {
    if node.kind() != "binary_expression" {
        return None;
    }
    ast::operator(node, source).filter(|op| matches!(*op, "&&" | "||"))
}

fn needs_optimization(node: Node<'_>) -> bool {
    let (Some(left), Some(right)) = (
        node.child_by_field_name("left"),
        node.child_by_field_name("right"),
    ) else {
        return false;
    };
    calls(left) && !calls(right)
}

fn calls(operand: Node<'_>) -> bool {
    ast::contains_kind(operand, CALL_KINDS, DEFERRED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::check;

    fn check_code(code: &str) -> Vec<Violation> {
        check(&LogicConditionNeedOptimization::new(), code)
    }

    #[test]
    fn detects_call_before_plain_operand() {
        let violations = check_code(
            r"
class Foo {
    void f() {
        if (isExpensive() && enabled) {
            run();
        }
        boolean b = list.isEmpty() || count > 0;
    }
}
",
        );
        let lines: Vec<usize> = violations.iter().map(|v| v.location.line).collect();
        assert_eq!(lines, vec![4, 7]);
        assert!(violations[1].message.contains("'||'"));
    }

    #[test]
    fn allows_good_order_and_calls_on_both_sides() {
        let violations = check_code(
            r"
class Foo {
    void f() {
        if (enabled && isExpensive()) { }
        if (a() || b()) { }
        if (x > 0 && y < 0) { }
    }
}
",
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn chain_is_reported_once() {
        let violations = check_code(
            r"
class Foo {
    void f() {
        if (a() && b && c) { }
    }
}
",
        );
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].location.column, 13);
    }

    #[test]
    fn object_creation_counts_lambdas_do_not() {
        let violations = check_code(
            r"
class Foo {
    void f() {
        boolean a = new Checker().ok() && flag;
        boolean b = (handler = () -> run()) != null && flag;
    }
}
",
        );
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].location.line, 4);
    }
}
