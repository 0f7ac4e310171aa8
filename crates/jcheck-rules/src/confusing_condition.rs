//! Rule to flag `if`/`else` with a negated condition.
//!
//! # Rationale
//!
//! With an `else` branch present, a negative condition makes the reader
//! invert it twice. Swapping the branches and dropping the negation
//! says the same thing directly.
//!
//! # Detected Patterns
//!
//! ```java
//! // BAD
//! if (!ready) {
//!     waitFor();
//! } else {
//!     run();
//! }
//!
//! // GOOD
//! if (ready) {
//!     run();
//! } else {
//!     waitFor();
//! }
//! ```
//!
//! A condition is negative when it is `!x`, `a != b`, or an `&&`/`||`
//! of negative conditions.
//!
//! # Configuration
//!
//! | Option | Default | Effect |
//! |--------|---------|--------|
//! | `ignore_inner_if` | `true` | skip an `if` directly inside an `else` |
//! | `ignore_sequential_if` | `true` | skip when the `else` holds another `if` |
//! | `ignore_null_case_in_if` | `true` | skip `x != null` conditions |
//! | `ignore_throw_in_else` | `true` | skip when the `else` throws |
//! | `multiply_factor_for_else_blocks` | `4` | skip when `then` is this many times longer |

use jcheck_core::{ast, FileContext, Node, Rule, RuleConfig, Severity, Suggestion, Violation};

/// Rule code for confusing-condition.
pub const CODE: &str = "JC015";

/// Rule name for confusing-condition.
pub const NAME: &str = "confusing-condition";

/// Flags `if` statements with an `else` whose condition is negated.
#[derive(Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct ConfusingCondition {
    /// Custom severity.
    pub severity: Severity,
    /// Skip an `if` that sits directly in an `else` branch.
    pub ignore_inner_if: bool,
    /// Skip when the `else` branch contains an `if`.
    pub ignore_sequential_if: bool,
    /// Skip conditions comparing against `null`.
    pub ignore_null_case_in_if: bool,
    /// Skip when the `else` branch throws.
    pub ignore_throw_in_else: bool,
    /// Then/else line ratio from which the `if` is left alone.
    pub multiply_factor_for_else_blocks: usize,
}

impl Default for ConfusingCondition {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfusingCondition {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Warning,
            ignore_inner_if: true,
            ignore_sequential_if: true,
            ignore_null_case_in_if: true,
            ignore_throw_in_else: true,
            multiply_factor_for_else_blocks: 4,
        }
    }

    /// Creates the rule from its configuration block.
    #[must_use]
    pub fn from_config(config: &RuleConfig) -> Self {
        let d = Self::new();
        Self {
            ignore_inner_if: config.get_bool("ignore_inner_if", d.ignore_inner_if),
            ignore_sequential_if: config.get_bool("ignore_sequential_if", d.ignore_sequential_if),
            ignore_null_case_in_if: config
                .get_bool("ignore_null_case_in_if", d.ignore_null_case_in_if),
            ignore_throw_in_else: config.get_bool("ignore_throw_in_else", d.ignore_throw_in_else),
            multiply_factor_for_else_blocks: config.get_usize(
                "multiply_factor_for_else_blocks",
                d.multiply_factor_for_else_blocks,
            ),
            ..d
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Sets whether an `if` inside an `else` is skipped.
    #[must_use]
    pub fn ignore_inner_if(mut self, ignore: bool) -> Self {
        self.ignore_inner_if = ignore;
        self
    }

    /// Sets whether an `else` holding another `if` is skipped.
    #[must_use]
    pub fn ignore_sequential_if(mut self, ignore: bool) -> Self {
        self.ignore_sequential_if = ignore;
        self
    }

    /// Sets whether `null` comparisons are skipped.
    #[must_use]
    pub fn ignore_null_case_in_if(mut self, ignore: bool) -> Self {
        self.ignore_null_case_in_if = ignore;
        self
    }

    /// Sets whether a throwing `else` is skipped.
    #[must_use]
    pub fn ignore_throw_in_else(mut self, ignore: bool) -> Self {
        self.ignore_throw_in_else = ignore;
        self
    }

    /// Sets the then/else line ratio.
    #[must_use]
    pub fn multiply_factor_for_else_blocks(mut self, factor: usize) -> Self {
        self.multiply_factor_for_else_blocks = factor;
        self
    }
}

impl Rule for ConfusingCondition {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Flags if/else statements whose condition is negated"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn node_kinds(&self) -> &'static [&'static str] {
        &["if_statement"]
    }

    fn visit(&self, ctx: &FileContext, node: Node<'_>) -> Vec<Violation> {
        let source = ctx.content;
        let (Some(condition), Some(then_branch), Some(else_branch)) = (
            node.child_by_field_name("condition").map(ast::unwrap_parens),
            node.child_by_field_name("consequence"),
            node.child_by_field_name("alternative"),
        ) else {
            return Vec::new();
        };

        // An `else if` chain reads as a sequence, not as an inversion.
        if else_branch.kind() == "if_statement" {
            return Vec::new();
        }
        if self.ignore_sequential_if && ast::contains_kind(else_branch, &["if_statement"], &[]) {
            return Vec::new();
        }
        if self.ignore_inner_if && is_inside_else(node) {
            return Vec::new();
        }
        if self.ignore_throw_in_else && throws_directly(else_branch) {
            return Vec::new();
        }
        if ast::line_count(then_branch)
            >= ast::line_count(else_branch).saturating_mul(self.multiply_factor_for_else_blocks)
        {
            return Vec::new();
        }
        if self.ignore_null_case_in_if && compares_with_null(condition) {
            return Vec::new();
        }
        if !is_negative(condition, source) {
            return Vec::new();
        }

        vec![Violation::new(
            CODE,
            NAME,
            self.severity,
            ctx.location(node),
            "Condition of an if with an else branch is negated",
        )
        .with_suggestion(Suggestion::new(
            "Remove the negation and swap the if and else branches",
        ))]
    }
}

/// Whether `condition` is `!x`, `a != b`, or a logical combination of
/// negative conditions.
fn is_negative(condition: Node<'_>, source: &str) -> bool {
    let condition = ast::unwrap_parens(condition);
    match (condition.kind(), ast::operator(condition, source)) {
        ("unary_expression", Some("!")) | ("binary_expression", Some("!=")) => true,
        ("binary_expression", Some("&&" | "||")) => {
            let left = condition.child_by_field_name("left");
            let right = condition.child_by_field_name("right");
            left.is_some_and(|l| is_negative(l, source))
                && right.is_some_and(|r| is_negative(r, source))
        }
        _ => false,
    }
}

fn compares_with_null(condition: Node<'_>) -> bool {
    std::iter::once(condition)
        .chain(ast::descendants(condition))
        .any(|n| n.kind() == "null_literal")
}

/// Whether the `if` is the `else` of another `if`, or a statement of the
/// block forming that `else`.
fn is_inside_else(if_node: Node<'_>) -> bool {
    let Some(parent) = if_node.parent() else {
        return false;
    };
    let (branch, owner) = if parent.kind() == "block" {
        (parent, parent.parent())
    } else {
        (if_node, Some(parent))
    };
    owner.is_some_and(|o| {
        o.kind() == "if_statement" && o.child_by_field_name("alternative") == Some(branch)
    })
}

fn throws_directly(branch: Node<'_>) -> bool {
    match branch.kind() {
        "throw_statement" => true,
        "block" => ast::block_statements(branch)
            .iter()
            .any(|s| s.kind() == "throw_statement"),
        _ => false,
    }
}
