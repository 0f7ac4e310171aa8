//! Rule to suggest the diamond operator in variable definitions.
//!
//! # Rationale
//!
//! Since Java 7 the type arguments of a constructor call can be inferred
//! from the declared type. Repeating them adds noise and a second place
//! to update.
//!
//! # Detected Patterns
//!
//! ```java
//! // BAD: type arguments repeated
//! List<String> names = new ArrayList<String>();
//! private final Map<Long, List<Order>> byCustomer = new HashMap<Long, List<Order>>();
//!
//! // GOOD
//! List<String> names = new ArrayList<>();
//!
//! // GOOD: arguments differ, inference would pick a different type
//! List<? extends Number> nums = new ArrayList<Integer>();
//!
//! // GOOD: anonymous classes cannot use diamond before Java 9
//! Comparator<String> c = new Comparator<String>() { ... };
//! ```
//!
//! The declared and instantiated type arguments are compared structurally,
//! so formatting and comments inside them do not matter.

use jcheck_core::{
    ast, FileContext, Node, Replacement, Rule, RuleConfig, Severity, Suggestion, Violation,
};

/// Rule code for diamond-operator-for-variable-definition.
pub const CODE: &str = "JC001";

/// Rule name for diamond-operator-for-variable-definition.
pub const NAME: &str = "diamond-operator-for-variable-definition";

/// Suggests `<>` where constructor type arguments repeat the declared ones.
#[derive(Debug, Clone)]
pub struct DiamondOperatorForVariableDefinition {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for DiamondOperatorForVariableDefinition {
    fn default() -> Self {
        Self::new()
    }
}

impl DiamondOperatorForVariableDefinition {
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

impl Rule for DiamondOperatorForVariableDefinition {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Suggests the diamond operator where type arguments repeat the declaration"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn node_kinds(&self) -> &'static [&'static str] {
        &["local_variable_declaration", "field_declaration"]
    }

    fn visit(&self, ctx: &FileContext, node: Node<'_>) -> Vec<Violation> {
        let Some(declared_args) = node
            .child_by_field_name("type")
            .filter(|t| t.kind() == "generic_type")
            .and_then(|t| ast::first_child_of_kind(t, "type_arguments"))
        else {
            return Vec::new();
        };
        if ast::named_children(declared_args).is_empty() {
            return Vec::new();
        }

        ast::children_of_kind(node, "variable_declarator")
            .into_iter()
            .filter_map(|declarator| declarator.child_by_field_name("value"))
            .filter_map(|value| redundant_type_arguments(value, declared_args, ctx.content))
            .map(|args| {
                let location = ctx.location(args);
                Violation::new(
                    CODE,
                    NAME,
                    self.severity,
                    location.clone(),
                    "Diamond operator should be used instead of repeating type arguments",
                )
                .with_suggestion(Suggestion::with_fix(
                    "Replace the type arguments with `<>`",
                    Replacement::new(location, "<>"),
                ))
            })
            .collect()
    }
}

/// Returns the instantiated `type_arguments` node when it repeats the
/// declared arguments.
fn redundant_type_arguments<'t>(
    value: Node<'t>,
    declared_args: Node<'_>,
    source: &str,
) -> Option<Node<'t>> {
    if value.kind() != "object_creation_expression" {
        return None;
    }
    if ast::first_child_of_kind(value, "class_body").is_some() {
        return None;
    }

    let created = value
        .child_by_field_name("type")
        .filter(|t| t.kind() == "generic_type")?;
    let created_args = ast::first_child_of_kind(created, "type_arguments")?;
    if ast::named_children(created_args).is_empty() {
        return None;
    }

    ast::structurally_equal(declared_args, created_args, source).then_some(created_args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::check;

    fn check_code(code: &str) -> Vec<Violation> {
        check(&DiamondOperatorForVariableDefinition::new(), code)
    }

    #[test]
    fn detects_repeated_arguments_in_local() {
        let violations = check_code(
            r"
class Foo {
    void f() {
        List<String> names = new ArrayList<String>();
    }
}
",
        );
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].code, CODE);
        assert_eq!(violations[0].location.line, 4);
        let fix = violations[0]
            .suggestion
            .as_ref()
            .and_then(|s| s.replacement.as_ref())
            .unwrap();
        assert_eq!(fix.new_text, "<>");
    }

    #[test]
    fn detects_nested_arguments_in_field() {
        let violations = check_code(
            r"
class Foo {
    private final Map<Long, List<Order>> byCustomer = new HashMap<Long,List<Order>>();
}
",
        );
        assert_eq!(violations.len(), 1);
    }

    #[test]
    fn allows_diamond_and_raw_types() {
        let violations = check_code(
            r"
class Foo {
    List<String> a = new ArrayList<>();
    List b = new ArrayList();
    List<String> c = build();
}
",
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn allows_different_arguments() {
        let violations = check_code(
            r"
class Foo {
    List<? extends Number> nums = new ArrayList<Integer>();
}
",
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn allows_anonymous_classes() {
        let violations = check_code(
            r"
class Foo {
    Comparator<String> c = new Comparator<String>() {
        public int compare(String a, String b) { return 0; }
    };
}
",
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn checks_each_declarator() {
        let violations = check_code(
            r"
class Foo {
    void f() {
        List<String> a = new ArrayList<String>(), b = new LinkedList<>(), c = new Vector<String>();
    }
}
",
        );
        assert_eq!(violations.len(), 2);
    }
}
