//! Rule to limit the number of ternary operators in one expression.
//!
//! # Rationale
//!
//! Chained or nested `?:` operators quickly become unreadable. Beyond one
//! per expression an `if`/`else` or a helper method is usually clearer.
//!
//! # Detected Patterns
//!
//! ```java
//! // BAD: two ternaries in one statement
//! String label = a ? "a" : b ? "b" : "none";
//!
//! // GOOD: the inner one is parenthesized (ignored by default)
//! String label = a ? "a" : (b ? "b" : "none");
//! ```
//!
//! Each statement is one expression, as is each header of `if`, `while`,
//! `do`, `for` and `switch`. The body of an expression lambda counts on its
//! own, and anonymous class bodies and switch blocks never count towards
//! the enclosing statement.
//!
//! # Configuration
//!
//! - `max_ternary_per_expression_count`: allowed ternaries (default 1)
//! - `ignore_ternary_operators_in_braces`: skip parenthesized ternaries
//!   (default `true`)
//! - `ignore_isolated_ternary_on_line`: skip a ternary whose `?` is the
//!   only one on its line (default `false`)

use std::collections::HashMap;

use jcheck_core::{ast, FileContext, Label, Node, Rule, RuleConfig, Severity, Violation};

/// Rule code for ternary-per-expression-count.
pub const CODE: &str = "JC016";

/// Rule name for ternary-per-expression-count.
pub const NAME: &str = "ternary-per-expression-count";

/// Subtrees that form expressions of their own.
const SEPARATE: &[&str] = &["lambda_expression", "class_body", "switch_block"];

/// Statements whose whole text is one expression.
const SIMPLE_STATEMENTS: &[&str] = &[
    "expression_statement",
    "local_variable_declaration",
    "field_declaration",
    "constant_declaration",
    "return_statement",
    "throw_statement",
    "yield_statement",
    "assert_statement",
];

/// Where the search for an enclosing statement stops.
const STATEMENT_BOUNDARIES: &[&str] = &["block", "switch_block", "class_body"];

/// Statements whose header, not body, is the expression.
const COMPOUND_STATEMENTS: &[&str] = &[
    "if_statement",
    "while_statement",
    "do_statement",
    "for_statement",
    "enhanced_for_statement",
    "switch_expression",
];

/// Limits the number of ternary operators per expression.
#[derive(Debug, Clone)]
pub struct TernaryPerExpressionCount {
    /// Custom severity.
    pub severity: Severity,
    /// Maximum ternaries allowed in one expression.
    pub max_count: usize,
    /// Skip ternaries directly inside parentheses.
    pub ignore_in_braces: bool,
    /// Skip ternaries alone on their line.
    pub ignore_isolated_on_line: bool,
}

impl Default for TernaryPerExpressionCount {
    fn default() -> Self {
        Self::new()
    }
}

impl TernaryPerExpressionCount {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Warning,
            max_count: 1,
            ignore_in_braces: true,
            ignore_isolated_on_line: false,
        }
    }

    /// Creates the rule from its configuration block.
    #[must_use]
    pub fn from_config(config: &RuleConfig) -> Self {
        let d = Self::new();
        Self {
            max_count: config.get_usize("max_ternary_per_expression_count", d.max_count),
            ignore_in_braces: config
                .get_bool("ignore_ternary_operators_in_braces", d.ignore_in_braces),
            ignore_isolated_on_line: config
                .get_bool("ignore_isolated_ternary_on_line", d.ignore_isolated_on_line),
            ..d
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Sets the maximum number of ternaries.
    #[must_use]
    pub fn max_count(mut self, max: usize) -> Self {
        self.max_count = max;
        self
    }

    /// Sets whether parenthesized ternaries are skipped.
    #[must_use]
    pub fn ignore_in_braces(mut self, ignore: bool) -> Self {
        self.ignore_in_braces = ignore;
        self
    }

    /// Sets whether ternaries alone on their line are skipped.
    #[must_use]
    pub fn ignore_isolated_on_line(mut self, ignore: bool) -> Self {
        self.ignore_isolated_on_line = ignore;
        self
    }

    fn counted_ternaries<'t>(&self, regions: &[Node<'t>]) -> Vec<Node<'t>> {
        let mut ternaries: Vec<Node<'t>> = regions
            .iter()
            .flat_map(|region| {
                std::iter::once(*region).chain(ast::descendants_pruned(*region, SEPARATE))
            })
            .filter(|n| n.kind() == "ternary_expression")
            .filter(|t| !(self.ignore_in_braces && in_braces(*t)))
            .collect();

        if self.ignore_isolated_on_line {
            let mut per_line: HashMap<usize, usize> = HashMap::new();
            for ternary in &ternaries {
                *per_line.entry(question_line(*ternary)).or_default() += 1;
            }
            ternaries.retain(|t| per_line.get(&question_line(*t)).copied().unwrap_or(0) > 1);
        }
        ternaries
    }
}

/// Whether the ternary is wrapped in parentheses of its own, as opposed to
/// the mandatory parentheses around an `if`/`while`/`switch` condition.
fn in_braces(ternary: Node<'_>) -> bool {
    ternary.parent().is_some_and(|p| {
        p.kind() == "parenthesized_expression"
            && !p.parent().is_some_and(|stmt| {
                COMPOUND_STATEMENTS.contains(&stmt.kind())
                    && stmt.child_by_field_name("condition") == Some(p)
            })
    })
}

/// Row of the `?` token of a ternary.
fn question_line(ternary: Node<'_>) -> usize {
    ast::children(ternary)
        .into_iter()
        .find(|c| c.kind() == "?")
        .unwrap_or(ternary)
        .start_position()
        .row
}

/// Parts of `node` that make up its expression.
fn expression_regions(node: Node<'_>) -> Vec<Node<'_>> {
    let kind = node.kind();
    // `for` headers and switch expressions used as values belong to the
    // enclosing statement.
    if kind == "local_variable_declaration"
        && node.parent().is_some_and(|p| p.kind() == "for_statement")
    {
        return Vec::new();
    }
    if kind == "switch_expression"
        && ast::find_ancestor_until(node, SIMPLE_STATEMENTS, STATEMENT_BOUNDARIES).is_some()
    {
        return Vec::new();
    }
    if SIMPLE_STATEMENTS.contains(&kind) {
        return vec![node];
    }
    if kind == "lambda_expression" {
        return node
            .child_by_field_name("body")
            .filter(|b| b.kind() != "block")
            .into_iter()
            .collect();
    }
    if COMPOUND_STATEMENTS.contains(&kind) {
        return ast::named_children(node)
            .into_iter()
            .filter(|c| {
                node.child_by_field_name("body") != Some(*c)
                    && node.child_by_field_name("consequence") != Some(*c)
                    && node.child_by_field_name("alternative") != Some(*c)
                    && c.kind() != "switch_block"
            })
            .collect();
    }
    Vec::new()
}

impl Rule for TernaryPerExpressionCount {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Limits the number of ternary operators in one expression"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn node_kinds(&self) -> &'static [&'static str] {
        &[
            "expression_statement",
            "local_variable_declaration",
            "field_declaration",
            "constant_declaration",
            "return_statement",
            "throw_statement",
            "yield_statement",
            "assert_statement",
            "if_statement",
            "while_statement",
            "do_statement",
            "for_statement",
            "enhanced_for_statement",
            "switch_expression",
            "lambda_expression",
        ]
    }

    fn visit(&self, ctx: &FileContext, node: Node<'_>) -> Vec<Violation> {
        let regions = expression_regions(node);
        if regions.is_empty() {
            return Vec::new();
        }
        let ternaries = self.counted_ternaries(&regions);
        if ternaries.len() <= self.max_count {
            return Vec::new();
        }

        let location = match node.kind() {
            "lambda_expression" => ctx.location(regions[0]),
            _ => ctx.location(node),
        };
        let mut violation = Violation::new(
            CODE,
            NAME,
            self.severity,
            location,
            format!(
                "Expression has {} ternary operators; at most {} allowed",
                ternaries.len(),
                self.max_count
            ),
        );
        for ternary in ternaries {
            violation = violation.with_label(Label::new(ctx.location(ternary), "ternary"));
        }
        vec![violation]
    }
}
