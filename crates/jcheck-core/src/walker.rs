//! Visitor dispatch: one pre-order pass over the tree, fanning nodes out
//! to the rules registered for their kind.

use std::collections::HashMap;
use tree_sitter::Node;
use tracing::trace;

use crate::ast;
use crate::context::FileContext;
use crate::rule::Rule;
use crate::types::Violation;

/// Routes nodes to the rules interested in them.
pub struct Dispatcher<'r> {
    by_kind: HashMap<&'static str, Vec<&'r dyn Rule>>,
    every_node: Vec<&'r dyn Rule>,
}

impl<'r> Dispatcher<'r> {
    /// Builds the kind → rules table.
    #[must_use]
    pub fn new<I>(rules: I) -> Self
    where
        I: IntoIterator<Item = &'r dyn Rule>,
    {
        let mut by_kind: HashMap<&'static str, Vec<&'r dyn Rule>> = HashMap::new();
        let mut every_node = Vec::new();

        for rule in rules {
            let kinds = rule.node_kinds();
            if kinds.is_empty() {
                every_node.push(rule);
                continue;
            }
            for &kind in kinds {
                by_kind.entry(kind).or_default().push(rule);
            }
        }

        Self {
            by_kind,
            every_node,
        }
    }

    /// Returns true if no rule is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_kind.is_empty() && self.every_node.is_empty()
    }

    /// Walks the tree under `root` (inclusive) and collects violations in
    /// visiting order.
    #[must_use]
    pub fn walk(&self, ctx: &FileContext, root: Node<'_>) -> Vec<Violation> {
        let mut violations = Vec::new();
        if self.is_empty() {
            return violations;
        }

        for node in std::iter::once(root).chain(ast::descendants(root)) {
            for rule in &self.every_node {
                violations.extend(rule.visit(ctx, node));
            }
            if let Some(rules) = self.by_kind.get(node.kind()) {
                for rule in rules {
                    let found = rule.visit(ctx, node);
                    if !found.is_empty() {
                        trace!(
                            "{} reported {} violation(s) at {}:{}",
                            rule.name(),
                            found.len(),
                            node.start_position().row + 1,
                            node.start_position().column + 1
                        );
                    }
                    violations.extend(found);
                }
            }
        }

        violations
    }
}

/// Convenience wrapper: dispatch `rules` over the tree rooted at `root`.
#[must_use]
pub fn walk<'r, I>(ctx: &FileContext, root: Node<'_>, rules: I) -> Vec<Violation>
where
    I: IntoIterator<Item = &'r dyn Rule>,
{
    Dispatcher::new(rules).walk(ctx, root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use crate::types::Severity;
    use std::path::Path;

    struct CountKind(&'static [&'static str]);

    impl Rule for CountKind {
        fn name(&self) -> &'static str {
            "count-kind"
        }
        fn code(&self) -> &'static str {
            "T001"
        }
        fn node_kinds(&self) -> &'static [&'static str] {
            self.0
        }
        fn visit(&self, ctx: &FileContext, node: Node<'_>) -> Vec<Violation> {
            vec![Violation::new(
                self.code(),
                self.name(),
                Severity::Info,
                ctx.location(node),
                node.kind(),
            )]
        }
    }

    #[test]
    fn dispatches_only_registered_kinds() {
        let src = "class A { void f() {} void g() {} }";
        let tree = parse(src).unwrap();
        let ctx = FileContext::new(Path::new("A.java"), src, Path::new("."));
        let rule = CountKind(&["method_declaration"]);
        let found = walk(&ctx, tree.root_node(), [&rule as &dyn Rule]);
        assert_eq!(found.len(), 2);
        assert!(found[0].location.column < found[1].location.column);
    }

    #[test]
    fn comments_are_dispatched() {
        let src = "class A { /* a */ void f() { // b\n } }";
        let tree = parse(src).unwrap();
        let ctx = FileContext::new(Path::new("A.java"), src, Path::new("."));
        let rule = CountKind(&["block_comment", "line_comment"]);
        let found = walk(&ctx, tree.root_node(), [&rule as &dyn Rule]);
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn empty_kind_list_sees_every_node() {
        let src = "class A {}";
        let tree = parse(src).unwrap();
        let ctx = FileContext::new(Path::new("A.java"), src, Path::new("."));
        let rule = CountKind(&[]);
        let found = walk(&ctx, tree.root_node(), [&rule as &dyn Rule]);
        assert!(found.iter().any(|v| v.message == "program"));
        assert!(found.iter().any(|v| v.message == "class_body"));
    }
}
