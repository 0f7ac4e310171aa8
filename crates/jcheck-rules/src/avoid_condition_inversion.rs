//! Rule to forbid negating a comparison that has an inverse operator.
//!
//! # Rationale
//!
//! `!(a == b)` is `a != b`, and `!(a < b)` is `a >= b`. The inverted
//! form makes the reader do the negation in their head.
//!
//! # Detected Patterns
//!
//! ```java
//! if (!(count > limit)) { ... }     // BAD: count <= limit
//! while (!(a == b)) { ... }         // BAD: a != b
//! return !(x < 0);                  // BAD: x >= 0
//! boolean b = !(x < 0);             // GOOD: not a condition
//! ```
//!
//! Only a negation forming the whole condition of `if`, `while`, `do`
//! and `for`, or the whole value of a `return`, is reported.
//!
//! # Configuration
//!
//! - `apply_only_to_relational_operands`: when `false`, also report
//!   `!(a && b)` and `!(a || b)` (default `true`)

use jcheck_core::{ast, FileContext, Node, Rule, RuleConfig, Severity, Suggestion, Violation};

/// Rule code for avoid-condition-inversion.
pub const CODE: &str = "JC020";

/// Rule name for avoid-condition-inversion.
pub const NAME: &str = "avoid-condition-inversion";

/// Forbids `!( a OP b )` where `OP` has an inverse.
#[derive(Debug, Clone)]
pub struct AvoidConditionInversion {
    /// Custom severity.
    pub severity: Severity,
    /// Report only negated comparisons, not negated `&&`/`||`.
    pub only_relational: bool,
}

impl Default for AvoidConditionInversion {
    fn default() -> Self {
        Self::new()
    }
}

impl AvoidConditionInversion {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Warning,
            only_relational: true,
        }
    }

    /// Creates the rule from its configuration block.
    #[must_use]
    pub fn from_config(config: &RuleConfig) -> Self {
        Self {
            only_relational: config.get_bool("apply_only_to_relational_operands", true),
            ..Self::new()
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Sets whether only negated comparisons are reported.
    #[must_use]
    pub fn only_relational(mut self, only: bool) -> Self {
        self.only_relational = only;
        self
    }
}

impl Rule for AvoidConditionInversion {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids negating a comparison in a condition instead of inverting the operator"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn node_kinds(&self) -> &'static [&'static str] {
        &["unary_expression"]
    }

    fn visit(&self, ctx: &FileContext, node: Node<'_>) -> Vec<Violation> {
        let source = ctx.content;
        if ast::operator(node, source) != Some("!") || !is_whole_condition(node) {
            return Vec::new();
        }
        let Some(operand) = node
            .child_by_field_name("operand")
            .filter(|o| o.kind() == "parenthesized_expression")
            .map(ast::unwrap_parens)
            .filter(|o| o.kind() == "binary_expression")
        else {
            return Vec::new();
        };
        let Some(op) = ast::operator(operand, source) else {
            return Vec::new();
        };

        let help = match (inverse(op), op) {
            (Some(inv), _) => format!("Use '{inv}' instead of negating '{op}'"),
            (None, "&&" | "||") if !self.only_relational => {
                "Apply De Morgan's law and invert each operand".to_string()
            }
            _ => return Vec::new(),
        };

        vec![Violation::new(
            CODE,
            NAME,
            self.severity,
            ctx.location(node),
            "Avoid inverting a condition; use the opposite operator instead",
        )
        .with_suggestion(Suggestion::new(help))]
    }
}

/// Operator expressing the negation of `op`.
fn inverse(op: &str) -> Option<&'static str> {
    Some(match op {
        "==" => "!=",
        "!=" => "==",
        "<" => ">=",
        ">=" => "<",
        ">" => "<=",
        "<=" => ">",
        _ => return None,
    })
}

/// Whether the expression, ignoring parentheses, is the entire condition of
/// a loop or `if`, or the value of a `return`.
fn is_whole_condition(expr: Node<'_>) -> bool {
    let mut child = expr;
    let mut parent = expr.parent();
    while let Some(p) = parent.filter(|p| p.kind() == "parenthesized_expression") {
        child = p;
        parent = p.parent();
    }
    parent.is_some_and(|p| match p.kind() {
        "if_statement" | "while_statement" | "do_statement" | "for_statement" => {
            p.child_by_field_name("condition") == Some(child)
        }
        "return_statement" => true,
        _ => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::check;

    fn check_code(code: &str) -> Vec<Violation> {
        check(&AvoidConditionInversion::new(), code)
    }

    #[test]
    fn detects_inverted_comparisons_in_conditions() {
        let violations = check_code(
            r"
class Foo {
    boolean f(int a, int b) {
        if (!(a > b)) { }
        while (!(a == b)) { }
        do { } while (!(a != b));
        for (int i = 0; !(i >= a); i++) { }
        return !(a < b);
    }
}
",
        );
        let lines: Vec<usize> = violations.iter().map(|v| v.location.line).collect();
        assert_eq!(lines, vec![4, 5, 6, 7, 8]);
        let help = violations[0]
            .suggestion
            .as_ref()
            .map(|s| s.message.clone())
            .unwrap();
        assert!(help.contains("'<='"));
    }

    #[test]
    fn allows_inversion_outside_conditions() {
        let violations = check_code(
            r"
class Foo {
    void f(int a, int b) {
        boolean x = !(a < b);
        if (!(a < b) && ready) { }
        call(!(a == b));
    }
}
",
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn logical_operands_depend_on_option() {
        let source = r"
class Foo {
    boolean f(boolean a, boolean b) {
        if (!(a && b)) { }
        return !(a || b);
    }
}
";
        assert!(check_code(source).is_empty());

        let rule = AvoidConditionInversion::new().only_relational(false);
        assert_eq!(check(&rule, source).len(), 2);
    }

    #[test]
    fn plain_negation_is_fine() {
        let violations = check_code(
            r"
class Foo {
    boolean f() {
        if (!ready) { }
        return !(ready);
    }
}
",
        );
        assert!(violations.is_empty());
    }
}
