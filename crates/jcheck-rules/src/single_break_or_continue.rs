//! Rule to allow at most one `break` or `continue` per loop.
//!
//! # Rationale
//!
//! Every extra exit point makes the loop's control flow harder to follow.
//! A loop with several `break`/`continue` statements usually wants its
//! condition rewritten or its body extracted into a method.
//!
//! # Detected Patterns
//!
//! ```java
//! // BAD: two exits from the same loop
//! for (Item item : items) {
//!     if (item.isSkipped()) {
//!         continue;
//!     }
//!     if (item.isLast()) {
//!         break;
//!     }
//!     process(item);
//! }
//! ```
//!
//! Statements inside nested loops, switches, lambdas and local or
//! anonymous classes belong to those constructs and are not counted. That
//! includes a labeled `continue outer;` written in an inner loop: it counts
//! towards the inner loop, never the labeled one.

use jcheck_core::{ast, FileContext, Label, Node, Rule, RuleConfig, Severity, Violation};

/// Rule code for single-break-or-continue.
pub const CODE: &str = "JC002";

/// Rule name for single-break-or-continue.
pub const NAME: &str = "single-break-or-continue";

/// Constructs whose `break`/`continue` statements are not the loop's own.
const NESTED_SCOPES: &[&str] = &[
    "for_statement",
    "enhanced_for_statement",
    "while_statement",
    "do_statement",
    "switch_expression",
    "switch_statement",
    "lambda_expression",
    "class_body",
];

/// Limits loops to a single `break` or `continue`.
#[derive(Debug, Clone)]
pub struct SingleBreakOrContinue {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for SingleBreakOrContinue {
    fn default() -> Self {
        Self::new()
    }
}

impl SingleBreakOrContinue {
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

impl Rule for SingleBreakOrContinue {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Allows at most one break or continue statement per loop"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn node_kinds(&self) -> &'static [&'static str] {
        ast::LOOP_KINDS
    }

    fn visit(&self, ctx: &FileContext, node: Node<'_>) -> Vec<Violation> {
        let Some(body) = node.child_by_field_name("body") else {
            return Vec::new();
        };

        let exits = loop_exits(body);
        if exits.len() <= 1 {
            return Vec::new();
        }

        let mut violation = Violation::new(
            CODE,
            NAME,
            self.severity,
            ctx.location(node),
            format!(
                "Loop has {} break/continue statements; at most one is allowed",
                exits.len()
            ),
        );
        for exit in exits {
            violation = violation.with_label(Label::new(
                ctx.location(exit),
                format!("`{}` here", exit.kind().trim_end_matches("_statement")),
            ));
        }
        vec![violation]
    }
}

/// `break` and `continue` statements that belong to the loop whose body is
/// `body`.
fn loop_exits(body: Node<'_>) -> Vec<Node<'_>> {
    if NESTED_SCOPES.contains(&body.kind()) {
        return Vec::new();
    }
    if is_exit(body) {
        return vec![body];
    }
    ast::descendants_pruned(body, NESTED_SCOPES)
        .filter(|n| is_exit(*n))
        .collect()
}

fn is_exit(node: Node<'_>) -> bool {
    matches!(node.kind(), "break_statement" | "continue_statement")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::check;

    fn check_code(code: &str) -> Vec<Violation> {
        check(&SingleBreakOrContinue::new(), code)
    }

    #[test]
    fn detects_break_and_continue() {
        let violations = check_code(
            r"
class Foo {
    void f(java.util.List<String> items) {
        for (String item : items) {
            if (item.isEmpty()) {
                continue;
            }
            if (item.equals(END)) {
                break;
            }
            process(item);
        }
    }
}
",
        );
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].location.line, 4);
        assert_eq!(violations[0].labels.len(), 2);
        assert!(violations[0].message.contains('2'));
    }

    #[test]
    fn allows_single_exit() {
        let violations = check_code(
            r"
class Foo {
    void f() {
        while (true) {
            if (done()) {
                break;
            }
        }
    }
}
",
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn nested_loops_count_separately() {
        let violations = check_code(
            r"
class Foo {
    void f() {
        for (int i = 0; i < 10; i++) {
            for (int j = 0; j < 10; j++) {
                if (j == i) {
                    continue;
                }
            }
            if (i == 5) {
                break;
            }
        }
    }
}
",
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn switch_breaks_are_not_counted() {
        let violations = check_code(
            r"
class Foo {
    void f(int[] codes) {
        for (int code : codes) {
            switch (code) {
                case 1:
                    a();
                    break;
                case 2:
                    b();
                    break;
                default:
                    break;
            }
        }
    }
}
",
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn do_while_with_two_exits() {
        let violations = check_code(
            r"
class Foo {
    void f() {
        do {
            if (a()) continue;
            if (b()) break;
        } while (c());
    }
}
",
        );
        assert_eq!(violations.len(), 1);
    }

    #[test]
    fn lambda_bodies_are_not_counted() {
        let violations = check_code(
            r"
class Foo {
    void f() {
        while (running) {
            Runnable r = () -> {
                for (;;) { break; }
            };
            if (stop()) break;
        }
    }
}
",
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn labeled_jump_counts_for_the_inner_loop() {
        let violations = check_code(
            r"
class Foo {
    void f(int[][] grid) {
        outer:
        for (int[] row : grid) {
            for (int cell : row) {
                if (cell < 0) {
                    continue outer;
                }
            }
            if (row.length == 0) {
                break;
            }
        }
    }
}
",
        );
        assert!(violations.is_empty());

        let violations = check_code(
            r"
class Foo {
    void f(int[][] grid) {
        outer:
        for (int[] row : grid) {
            for (int cell : row) {
                if (cell < 0) {
                    continue outer;
                }
                if (cell == 0) {
                    break;
                }
            }
        }
    }
}
",
        );
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].location.line, 6);
    }
}
