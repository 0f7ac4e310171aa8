//! Rule to prefer `&&`/`||` over `&`/`|` on booleans.
//!
//! # Rationale
//!
//! The bitwise operators evaluate both operands even when the result is
//! already known. On booleans that is either a wasted call or, worse, a
//! `NullPointerException` that `&&` would have avoided:
//!
//! ```java
//! if (user != null & user.isActive()) { ... }   // NPE when user is null
//! ```
//!
//! # Detected Patterns
//!
//! `&`, `|`, `&=` and `|=` where an operand is visibly boolean: a `true`
//! or `false` literal, a comparison, `instanceof`, `!`, a logical
//! operator, or a variable declared `boolean`/`Boolean` in the enclosing
//! method (or a field of its class that the method does not shadow).
//! Ternaries count through their branches only; a comparison inside a
//! ternary condition, an index or a call argument says nothing about the
//! operand's type.
//!
//! ```java
//! boolean ok = valid() | retry;       // BAD when retry is boolean
//! ok &= count > 0;                    // BAD
//! int mask = flags & 0x0F;            // GOOD: integer arithmetic
//! ```

use std::collections::{HashMap, HashSet};

use jcheck_core::{ast, FileContext, Node, Rule, RuleConfig, Severity, Suggestion, Violation};

/// Rule code for avoid-not-short-circuit-operators-for-boolean.
pub const CODE: &str = "JC011";

/// Rule name for avoid-not-short-circuit-operators-for-boolean.
pub const NAME: &str = "avoid-not-short-circuit-operators-for-boolean";

/// Declarations whose parameters and locals form the scope of a use.
const METHOD_SCOPES: &[&str] = &[
    "method_declaration",
    "constructor_declaration",
    "compact_constructor_declaration",
    "static_initializer",
];

/// Bodies that open a new class scope.
const TYPE_BODIES: &[&str] = &["class_body", "interface_body", "enum_body"];

/// Flags non-short-circuit logical operators on boolean operands.
#[derive(Debug, Clone)]
pub struct AvoidNotShortCircuitOperatorsForBoolean {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for AvoidNotShortCircuitOperatorsForBoolean {
    fn default() -> Self {
        Self::new()
    }
}

impl AvoidNotShortCircuitOperatorsForBoolean {
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

impl Rule for AvoidNotShortCircuitOperatorsForBoolean {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires && and || instead of & and | on boolean operands"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn node_kinds(&self) -> &'static [&'static str] {
        &["binary_expression", "assignment_expression"]
    }

    fn visit(&self, ctx: &FileContext, node: Node<'_>) -> Vec<Violation> {
        let source = ctx.content;
        let Some(op) = ast::operator(node, source) else {
            return Vec::new();
        };
        let replacement = match op {
            "&" | "&=" => "&&",
            "|" | "|=" => "||",
            _ => return Vec::new(),
        };

        // Binary and assignment expressions name their operands alike.
        let operands = [
            node.child_by_field_name("left"),
            node.child_by_field_name("right"),
        ];
        let booleans = boolean_names(node, source);
        let is_boolean = operands
            .into_iter()
            .flatten()
            .any(|operand| is_boolean_operand(operand, source, &booleans));
        if !is_boolean {
            return Vec::new();
        }

        let message = if op.ends_with('=') {
            format!(
                "Operator '{op}' on booleans always evaluates the right side; \
                 use 'x = x {replacement} y'"
            )
        } else {
            format!("Operator '{op}' on booleans always evaluates both sides; use '{replacement}'")
        };
        vec![Violation::new(CODE, NAME, self.severity, ctx.location(node), message)
            .with_suggestion(Suggestion::new(format!(
                "Replace '{op}' with the short-circuit operator '{replacement}'"
            )))]
    }
}

/// Whether an operand is recognisably boolean, judged by the operand
/// itself: nested operands only count through the logical and bitwise
/// operators and the branches of a ternary.
fn is_boolean_operand(operand: Node<'_>, source: &str, booleans: &HashSet<&str>) -> bool {
    let operand = ast::unwrap_parens(operand);
    let recurse = |field: &str| {
        operand
            .child_by_field_name(field)
            .is_some_and(|n| is_boolean_operand(n, source, booleans))
    };
    match operand.kind() {
        "true" | "false" | "instanceof_expression" => true,
        "unary_expression" => ast::operator(operand, source) == Some("!"),
        "binary_expression" => match ast::operator(operand, source) {
            Some(op) if ast::RELATIONAL_OPERATORS.contains(&op) => true,
            Some("&&" | "||") => true,
            Some("&" | "|" | "^") => recurse("left") || recurse("right"),
            _ => false,
        },
        "ternary_expression" => recurse("consequence") || recurse("alternative"),
        "cast_expression" => operand
            .child_by_field_name("type")
            .is_some_and(|ty| is_boolean_type(ty, source)),
        "identifier" => booleans.contains(ast::text(operand, source)),
        "field_access" => {
            let on_this = operand
                .child_by_field_name("object")
                .is_some_and(|o| o.kind() == "this");
            on_this
                && operand
                    .child_by_field_name("field")
                    .is_some_and(|f| booleans.contains(ast::text(f, source)))
        }
        _ => false,
    }
}

fn is_boolean_type(ty: Node<'_>, source: &str) -> bool {
    ty.kind() == "boolean_type" || ast::type_simple_name(ty, source) == "Boolean"
}

/// Names a declaration introduces, with whether they are boolean-typed.
fn declared_names<'s>(decl: Node<'_>, source: &'s str) -> Option<(Vec<&'s str>, bool)> {
    let ty = decl.child_by_field_name("type")?;
    let names = match decl.kind() {
        "local_variable_declaration" | "field_declaration" => {
            ast::children_of_kind(decl, "variable_declarator")
                .into_iter()
                .filter_map(|d| ast::name_of(d, source))
                .collect()
        }
        "formal_parameter" | "catch_formal_parameter" | "enhanced_for_statement" => {
            ast::name_of(decl, source).into_iter().collect()
        }
        _ => return None,
    };
    Some((names, is_boolean_type(ty, source)))
}

/// Names declared `boolean` or `Boolean` that are visible at `node`: the
/// parameters and locals of the enclosing method, then the fields of its
/// class that none of those shadows.
fn boolean_names<'s>(node: Node<'_>, source: &'s str) -> HashSet<&'s str> {
    let mut locals: HashMap<&'s str, bool> = HashMap::new();
    if let Some(method) = ast::find_ancestor_until(node, METHOD_SCOPES, TYPE_BODIES) {
        for decl in ast::descendants_pruned(method, TYPE_BODIES) {
            if let Some((names, boolean)) = declared_names(decl, source) {
                for name in names {
                    // a boolean declaration anywhere in the method wins
                    *locals.entry(name).or_insert(boolean) |= boolean;
                }
            }
        }
    }

    let mut names: HashSet<&'s str> = locals
        .iter()
        .filter(|(_, boolean)| **boolean)
        .map(|(name, _)| *name)
        .collect();
    if let Some(body) = ast::find_ancestor(node, TYPE_BODIES) {
        for field in class_fields(body) {
            if let Some((fields, true)) = declared_names(field, source) {
                names.extend(fields.into_iter().filter(|n| !locals.contains_key(n)));
            }
        }
    }
    names
}

/// Field declarations directly in a type body (enum fields sit one level
/// down, after the constants).
fn class_fields(body: Node<'_>) -> Vec<Node<'_>> {
    ast::named_children(body)
        .into_iter()
        .flat_map(|member| {
            if member.kind() == "enum_body_declarations" {
                ast::named_children(member)
            } else {
                vec![member]
            }
        })
        .filter(|member| member.kind() == "field_declaration")
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::check;

    fn check_code(code: &str) -> Vec<Violation> {
        check(&AvoidNotShortCircuitOperatorsForBoolean::new(), code)
    }

    #[test]
    fn detects_bitwise_or_with_comparison() {
        let violations = check_code(
            r"
class Foo {
    void f(User user) {
        if (user != null & user.isActive()) {
            run();
        }
    }
}
",
        );
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].location.line, 4);
        assert!(violations[0].message.contains("'&&'"));
    }

    #[test]
    fn detects_boolean_variables_and_compound_assignment() {
        let violations = check_code(
            r"
class Foo {
    private Boolean cached;

    void f(boolean retry, int count) {
        boolean ok = valid() | retry;
        ok &= count > 0;
        ok |= cached;
    }
}
",
        );
        assert_eq!(violations.len(), 3);
    }

    #[test]
    fn detects_literals_negation_and_instanceof() {
        let violations = check_code(
            r"
class Foo {
    void f(Object o) {
        boolean a = x() & true;
        boolean b = !y() | z();
        boolean c = o instanceof String & w();
    }
}
",
        );
        assert_eq!(violations.len(), 3);
    }

    #[test]
    fn allows_integer_arithmetic() {
        let violations = check_code(
            r"
class Foo {
    void f(int flags, long bits) {
        int mask = flags & 0x0F;
        bits |= 1L << 3;
        int m = flags | compute(a > b);
        flags &= ~mask;
    }
}
",
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn allows_short_circuit_operators() {
        let violations = check_code(
            r"
class Foo {
    void f(boolean a, boolean b) {
        boolean c = a && b || !a;
    }
}
",
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn method_name_matching_boolean_is_not_a_use() {
        let violations = check_code(
            r"
class Foo {
    boolean ready;

    int f(Foo other) {
        return other.ready() & 7;
    }
}
",
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn comparison_inside_integer_operand_is_not_boolean() {
        let violations = check_code(
            r"
class Foo {
    int f(int a, int b, int mask, int[] table) {
        int x = (a == b ? 1 : 2) & mask;
        int y = table[a > b ? 0 : 1] | mask;
        int z = (int) (a < b ? 3L : 4L) & mask;
        return x | y | z;
    }
}
",
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn ternary_with_boolean_branch_is_boolean() {
        let violations = check_code(
            r"
class Foo {
    boolean f(boolean c, int a, int b) {
        return (c ? a > b : false) & ready();
    }
}
",
        );
        assert_eq!(violations.len(), 1);
    }

    #[test]
    fn boolean_declared_in_another_method_does_not_count() {
        let violations = check_code(
            r"
class Foo {
    void f() {
        boolean flag = true;
        use(flag);
    }

    int g(int flag) {
        return flag & 1;
    }
}
",
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn parameter_shadows_boolean_field() {
        let violations = check_code(
            r"
class Foo {
    private boolean flag;

    int f(int flag) {
        return flag & 1;
    }

    boolean g(boolean other) {
        return this.flag | other;
    }
}
",
        );
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].location.line, 10);
    }
}
