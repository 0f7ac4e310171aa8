//! Traversal and matching helpers over the Java syntax tree.
//!
//! Everything here is a pure function of a [`Node`] and, where text is
//! involved, the source it was parsed from. Node kinds are the strings of
//! the tree-sitter Java grammar (`method_declaration`, `catch_clause`, ...).

use tree_sitter::Node;

/// Loop statement kinds.
pub const LOOP_KINDS: &[&str] = &[
    "for_statement",
    "enhanced_for_statement",
    "while_statement",
    "do_statement",
];

/// Switch kinds. The grammar uses `switch_expression` for statements too.
pub const SWITCH_KINDS: &[&str] = &["switch_expression", "switch_statement"];

/// Nodes that open a new executable scope: code inside them never runs as
/// part of the enclosing method body.
pub const SCOPE_BOUNDARY_KINDS: &[&str] = &[
    "method_declaration",
    "constructor_declaration",
    "compact_constructor_declaration",
    "lambda_expression",
    "class_body",
    "interface_body",
    "enum_body",
    "annotation_type_body",
    "static_initializer",
];

/// Method-like declarations with an executable body.
pub const CALLABLE_KINDS: &[&str] = &[
    "method_declaration",
    "constructor_declaration",
    "compact_constructor_declaration",
];

/// Relational and equality operators.
pub const RELATIONAL_OPERATORS: &[&str] = &["==", "!=", "<", ">", "<=", ">="];

/// Source text covered by a node.
#[must_use]
pub fn text<'s>(node: Node<'_>, source: &'s str) -> &'s str {
    source.get(node.start_byte()..node.end_byte()).unwrap_or("")
}

/// All children, named and anonymous, excluding comments.
#[must_use]
pub fn children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.children(&mut cursor).filter(|c| !c.is_extra()).collect()
}

/// Named children, excluding comments.
#[must_use]
pub fn named_children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|c| !c.is_extra())
        .collect()
}

/// Children whose kind equals `kind`.
#[must_use]
pub fn children_of_kind<'t>(node: Node<'t>, kind: &str) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .filter(|c| c.kind() == kind)
        .collect()
}

/// First child whose kind equals `kind`.
#[must_use]
pub fn first_child_of_kind<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    // bound first: the iterator borrows `cursor` and must end before it does
    let found = node.children(&mut cursor).find(|c| c.kind() == kind);
    found
}

/// Iterator over the strict ancestors of a node, nearest first.
#[derive(Debug, Clone)]
pub struct Ancestors<'t> {
    next: Option<Node<'t>>,
}

impl<'t> Iterator for Ancestors<'t> {
    type Item = Node<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent();
        Some(current)
    }
}

/// Ancestors of `node`, starting at its parent.
#[must_use]
pub fn ancestors(node: Node<'_>) -> Ancestors<'_> {
    Ancestors {
        next: node.parent(),
    }
}

/// Nearest ancestor whose kind is in `kinds`.
#[must_use]
pub fn find_ancestor<'t>(node: Node<'t>, kinds: &[&str]) -> Option<Node<'t>> {
    ancestors(node).find(|a| kinds.contains(&a.kind()))
}

/// Nearest ancestor whose kind is in `targets`, giving up as soon as an
/// ancestor of a kind in `stop_at` is reached.
#[must_use]
pub fn find_ancestor_until<'t>(
    node: Node<'t>,
    targets: &[&str],
    stop_at: &[&str],
) -> Option<Node<'t>> {
    for ancestor in ancestors(node) {
        if targets.contains(&ancestor.kind()) {
            return Some(ancestor);
        }
        if stop_at.contains(&ancestor.kind()) {
            return None;
        }
    }
    None
}

/// Nearest enclosing method, constructor or lambda.
#[must_use]
pub fn enclosing_callable(node: Node<'_>) -> Option<Node<'_>> {
    find_ancestor_until(
        node,
        &[
            "method_declaration",
            "constructor_declaration",
            "compact_constructor_declaration",
            "lambda_expression",
        ],
        &["class_body", "interface_body", "enum_body"],
    )
}

/// Pre-order iterator over descendants, pruning selected subtrees.
#[derive(Debug, Clone)]
pub struct Descendants<'t, 'k> {
    stack: Vec<Node<'t>>,
    prune: &'k [&'k str],
}

impl<'t> Iterator for Descendants<'t, '_> {
    type Item = Node<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let node = self.stack.pop()?;
            if self.prune.contains(&node.kind()) {
                continue;
            }
            let mut cursor = node.walk();
            let kids: Vec<Node<'t>> = node.children(&mut cursor).collect();
            self.stack.extend(kids.into_iter().rev());
            return Some(node);
        }
    }
}

/// All strict descendants of `node` in pre-order, comments included.
#[must_use]
pub fn descendants<'t>(node: Node<'t>) -> Descendants<'t, 'static> {
    descendants_pruned(node, &[])
}

/// Strict descendants of `node` in pre-order, never yielding or entering a
/// node whose kind is in `prune`. The root itself is never pruned.
#[must_use]
pub fn descendants_pruned<'t, 'k>(node: Node<'t>, prune: &'k [&'k str]) -> Descendants<'t, 'k> {
    let mut cursor = node.walk();
    let mut stack: Vec<Node<'t>> = node.children(&mut cursor).collect();
    stack.reverse();
    Descendants { stack, prune }
}

/// Nearest earlier named sibling whose kind is in `kinds`, or any named
/// sibling when `kinds` is empty. Comments are skipped.
#[must_use]
pub fn prev_named_sibling<'t>(node: Node<'t>, kinds: &[&str]) -> Option<Node<'t>> {
    std::iter::successors(node.prev_named_sibling(), Node::prev_named_sibling)
        .filter(|s| !s.is_extra())
        .find(|s| kinds.is_empty() || kinds.contains(&s.kind()))
}

/// Nearest later named sibling whose kind is in `kinds`, or any named
/// sibling when `kinds` is empty. Comments are skipped.
#[must_use]
pub fn next_named_sibling<'t>(node: Node<'t>, kinds: &[&str]) -> Option<Node<'t>> {
    std::iter::successors(node.next_named_sibling(), Node::next_named_sibling)
        .filter(|s| !s.is_extra())
        .find(|s| kinds.is_empty() || kinds.contains(&s.kind()))
}

/// The token or node directly before `node`, named or anonymous, when its
/// kind is in `kinds`. Comments are skipped.
#[must_use]
pub fn prev_sibling_of_kind<'t>(node: Node<'t>, kinds: &[&str]) -> Option<Node<'t>> {
    std::iter::successors(node.prev_sibling(), Node::prev_sibling)
        .find(|s| !s.is_extra())
        .filter(|s| kinds.contains(&s.kind()))
}

/// Whether `inner` lies entirely within the byte range of `outer`.
#[must_use]
pub fn range_contains(outer: Node<'_>, inner: Node<'_>) -> bool {
    outer.start_byte() <= inner.start_byte() && inner.end_byte() <= outer.end_byte()
}

/// Structural equality of two subtrees.
///
/// Two nodes are equal when they have the same kind and the same sequence
/// of non-comment children, pairwise equal; leaves compare by text. Layout
/// and comments are ignored, so `Map<String,List<Integer>>` equals
/// `Map<String, /* ids */ List<Integer>>`.
#[must_use]
pub fn structurally_equal(a: Node<'_>, b: Node<'_>, source: &str) -> bool {
    if a.kind() != b.kind() {
        return false;
    }
    let a_kids = children(a);
    let b_kids = children(b);
    if a_kids.len() != b_kids.len() {
        return false;
    }
    if a_kids.is_empty() {
        return text(a, source) == text(b, source);
    }
    a_kids
        .into_iter()
        .zip(b_kids)
        .all(|(x, y)| structurally_equal(x, y, source))
}

/// The `modifiers` child of a declaration, if present.
#[must_use]
pub fn modifiers(node: Node<'_>) -> Option<Node<'_>> {
    first_child_of_kind(node, "modifiers")
}

/// Whether a declaration carries the keyword modifier (e.g. `"static"`).
#[must_use]
pub fn has_modifier(node: Node<'_>, modifier: &str) -> bool {
    modifiers(node).is_some_and(|m| {
        let mut cursor = m.walk();
        // see `first_child_of_kind`
        let found = m.children(&mut cursor).any(|c| c.kind() == modifier);
        found
    })
}

/// Simple names of the annotations on a declaration (`@a.b.Foo` gives `Foo`).
#[must_use]
pub fn annotation_names(node: Node<'_>, source: &str) -> Vec<String> {
    let Some(mods) = modifiers(node) else {
        return Vec::new();
    };
    named_children(mods)
        .into_iter()
        .filter(|c| matches!(c.kind(), "marker_annotation" | "annotation"))
        .filter_map(|a| a.child_by_field_name("name"))
        .map(|name| simple_name(text(name, source)).to_string())
        .collect()
}

/// Whether a declaration carries an annotation with the given simple name.
#[must_use]
pub fn has_annotation(node: Node<'_>, source: &str, name: &str) -> bool {
    annotation_names(node, source).iter().any(|a| a == name)
}

/// Last segment of a dotted name.
#[must_use]
pub fn simple_name(qualified: &str) -> &str {
    qualified.rsplit('.').next().unwrap_or(qualified)
}

/// Whether a node kind is a loop statement.
#[must_use]
pub fn is_loop(kind: &str) -> bool {
    LOOP_KINDS.contains(&kind)
}

/// Whether a node kind is a switch.
#[must_use]
pub fn is_switch(kind: &str) -> bool {
    SWITCH_KINDS.contains(&kind)
}

/// Strips any number of enclosing parentheses.
#[must_use]
pub fn unwrap_parens(node: Node<'_>) -> Node<'_> {
    let mut current = node;
    while current.kind() == "parenthesized_expression" {
        match named_children(current).into_iter().next() {
            Some(inner) => current = inner,
            None => break,
        }
    }
    current
}

/// Number of source lines a node spans.
#[must_use]
pub fn line_count(node: Node<'_>) -> usize {
    node.end_position().row - node.start_position().row + 1
}

/// Statements of a block or constructor body, comments excluded.
#[must_use]
pub fn block_statements(block: Node<'_>) -> Vec<Node<'_>> {
    named_children(block)
}

/// Text of the `operator` field of a binary, unary or assignment expression.
#[must_use]
pub fn operator<'s>(node: Node<'_>, source: &'s str) -> Option<&'s str> {
    node.child_by_field_name("operator")
        .map(|op| text(op, source))
}

/// Text of the `name` field of a declaration.
#[must_use]
pub fn name_of<'s>(node: Node<'_>, source: &'s str) -> Option<&'s str> {
    node.child_by_field_name("name").map(|n| text(n, source))
}

/// Whether `node` or any node below it is an identifier spelled `name`.
#[must_use]
pub fn references_identifier(node: Node<'_>, source: &str, name: &str) -> bool {
    std::iter::once(node)
        .chain(descendants(node))
        .any(|n| n.kind() == "identifier" && text(n, source) == name)
}

/// Whether `node` or a descendant outside the pruned kinds has one of `kinds`.
#[must_use]
pub fn contains_kind(node: Node<'_>, kinds: &[&str], prune: &[&str]) -> bool {
    kinds.contains(&node.kind())
        || descendants_pruned(node, prune).any(|n| kinds.contains(&n.kind()))
}

/// Topmost node of the tree containing `node`.
#[must_use]
pub fn root_of(node: Node<'_>) -> Node<'_> {
    ancestors(node).last().unwrap_or(node)
}

/// Simple name of the type in a `type` position, type arguments dropped
/// (`java.util.List<String>` gives `List`).
#[must_use]
pub fn type_simple_name<'s>(type_node: Node<'_>, source: &'s str) -> &'s str {
    let base = match type_node.kind() {
        "generic_type" => named_children(type_node)
            .into_iter()
            .next()
            .unwrap_or(type_node),
        _ => type_node,
    };
    simple_name(text(base, source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn find<'t>(root: Node<'t>, kind: &str) -> Vec<Node<'t>> {
        descendants(root).filter(|n| n.kind() == kind).collect()
    }

    #[test]
    fn descendants_visit_in_source_order() {
        let src = "class A { void f() { a(); b(); } }";
        let tree = parse(src).unwrap();
        let names: Vec<&str> = find(tree.root_node(), "method_invocation")
            .into_iter()
            .map(|n| text(n.child_by_field_name("name").unwrap(), src))
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn pruned_descendants_skip_subtrees() {
        let src = "class A { void f() { a(); Runnable r = () -> { b(); }; } }";
        let tree = parse(src).unwrap();
        let body = find(tree.root_node(), "block")[0];
        let calls = descendants_pruned(body, &["lambda_expression"])
            .filter(|n| n.kind() == "method_invocation")
            .count();
        assert_eq!(calls, 1);
    }

    #[test]
    fn ancestor_scan_stops_at_boundary() {
        let src = "class A { void f() { try {} finally { Runnable r = () -> { return; }; } } }";
        let tree = parse(src).unwrap();
        let ret = find(tree.root_node(), "return_statement")[0];
        assert!(find_ancestor(ret, &["finally_clause"]).is_some());
        assert!(find_ancestor_until(ret, &["finally_clause"], &["lambda_expression"]).is_none());
    }

    #[test]
    fn structural_equality_ignores_layout_and_comments() {
        let src = "class A { Map<String,List<Integer>> a; Map<String, /* x */ List<Integer>> b; Map<String, Set<Integer>> c; }";
        let tree = parse(src).unwrap();
        let args = find(tree.root_node(), "type_arguments");
        // outer type_arguments of each field come first in pre-order
        let outer: Vec<Node<'_>> = args
            .into_iter()
            .filter(|n| n.parent().is_some_and(|p| p.parent().is_some_and(|g| g.kind() == "field_declaration")))
            .collect();
        assert_eq!(outer.len(), 3);
        assert!(structurally_equal(outer[0], outer[1], src));
        assert!(!structurally_equal(outer[0], outer[2], src));
    }

    #[test]
    fn range_containment() {
        let src = "class A { void f() { /* c */ } }";
        let tree = parse(src).unwrap();
        let method = find(tree.root_node(), "method_declaration")[0];
        let comment = find(tree.root_node(), "block_comment")[0];
        assert!(range_contains(method, comment));
        assert!(!range_contains(comment, method));
    }

    #[test]
    fn modifiers_and_annotations() {
        let src = "class A { @Override @javax.annotation.Nullable public static void f() {} }";
        let tree = parse(src).unwrap();
        let method = find(tree.root_node(), "method_declaration")[0];
        assert!(has_modifier(method, "static"));
        assert!(!has_modifier(method, "final"));
        assert_eq!(annotation_names(method, src), vec!["Override", "Nullable"]);
    }

    #[test]
    fn unwraps_nested_parentheses() {
        let src = "class A { boolean f() { return ((x)); } }";
        let tree = parse(src).unwrap();
        let paren = find(tree.root_node(), "parenthesized_expression")[0];
        assert_eq!(unwrap_parens(paren).kind(), "identifier");
    }

    #[test]
    fn type_simple_names() {
        let src = "class A { java.util.List<String> a; int b; }";
        let tree = parse(src).unwrap();
        let fields = find(tree.root_node(), "field_declaration");
        let names: Vec<&str> = fields
            .into_iter()
            .map(|f| type_simple_name(f.child_by_field_name("type").unwrap(), src))
            .collect();
        assert_eq!(names, vec!["List", "int"]);
    }

    #[test]
    fn loop_and_switch_kinds() {
        let src = "class A { void f(int[] xs) { for (int x : xs) { switch (x) { default: } } do {} while (true); } }";
        let tree = parse(src).unwrap();
        let kinds: Vec<&str> = descendants(tree.root_node()).map(|n| n.kind()).collect();
        let loops: Vec<&str> = kinds.iter().copied().filter(|k| is_loop(k)).collect();
        assert_eq!(loops, vec!["enhanced_for_statement", "do_statement"]);
        assert!(kinds.iter().any(|k| is_switch(k)));
        assert!(!is_loop("switch_expression"));
    }

    #[test]
    fn sibling_scans_filter_by_kind_and_skip_comments() {
        let src = "class A { int a; /* gap */ void f() {} int b; void g() {} }";
        let tree = parse(src).unwrap();
        let f = find(tree.root_node(), "method_declaration")[0];

        let prev = prev_named_sibling(f, &[]).unwrap();
        assert_eq!(prev.kind(), "field_declaration");
        assert_eq!(text(prev, src), "int a;");

        let next = next_named_sibling(f, &[]).unwrap();
        assert_eq!(text(next, src), "int b;");
        let next_method = next_named_sibling(f, &["method_declaration"]).unwrap();
        assert_eq!(name_of(next_method, src), Some("g"));
        assert!(prev_named_sibling(f, &["method_declaration"]).is_none());
    }

    #[test]
    fn previous_token_includes_anonymous_nodes() {
        let src = "class A { int[] a = {1}; }";
        let tree = parse(src).unwrap();
        let init = find(tree.root_node(), "array_initializer")[0];
        let eq = prev_sibling_of_kind(init, &["="]).unwrap();
        assert_eq!(eq.end_byte() + 1, init.start_byte());
        assert!(prev_sibling_of_kind(init, &["dimensions"]).is_none());
    }
}
