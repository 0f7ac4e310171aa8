//! Rule trait for defining checks.

use tree_sitter::Node;

use crate::context::FileContext;
use crate::types::{Severity, Violation};

/// A check over the syntax tree of a Java compilation unit.
///
/// The [`walk`](crate::walker::walk) dispatcher visits every node of the
/// tree once, in pre-order, and hands each node whose kind appears in
/// [`Rule::node_kinds`] to [`Rule::visit`]. Rules hold configuration only;
/// all per-file state lives in the tree and the [`FileContext`].
///
/// # Example
///
/// ```ignore
/// use jcheck_core::{FileContext, Rule, Severity, Violation};
/// use tree_sitter::Node;
///
/// pub struct NoEmptyCatch;
///
/// impl Rule for NoEmptyCatch {
///     fn name(&self) -> &'static str { "no-empty-catch" }
///     fn code(&self) -> &'static str { "JC900" }
///     fn node_kinds(&self) -> &'static [&'static str] { &["catch_clause"] }
///
///     fn visit(&self, ctx: &FileContext, node: Node<'_>) -> Vec<Violation> {
///         // inspect `node`, return findings
///         Vec::new()
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "useless-single-catch").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "JC003").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    /// Node kinds this rule wants to visit. Empty means every node.
    fn node_kinds(&self) -> &'static [&'static str];

    /// Inspects one node and returns any violations found at it.
    fn visit(&self, ctx: &FileContext, node: Node<'_>) -> Vec<Violation>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

#[cfg(test)]
mod tests {
    use super::*;

    struct TestRule;

    impl Rule for TestRule {
        fn name(&self) -> &'static str {
            "test-rule"
        }
        fn code(&self) -> &'static str {
            "TEST001"
        }
        fn description(&self) -> &'static str {
            "A test rule"
        }
        fn node_kinds(&self) -> &'static [&'static str] {
            &["class_declaration"]
        }

        fn visit(&self, ctx: &FileContext, node: Node<'_>) -> Vec<Violation> {
            vec![Violation::new(
                self.code(),
                self.name(),
                self.default_severity(),
                ctx.location(node),
                "Test violation",
            )]
        }
    }

    #[test]
    fn test_rule_trait_defaults() {
        let rule = TestRule;
        assert_eq!(rule.name(), "test-rule");
        assert_eq!(rule.code(), "TEST001");
        assert_eq!(rule.default_severity(), Severity::Warning);
    }
}
