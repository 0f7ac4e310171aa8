//! Rule to forbid `main` methods in abstract classes.
//!
//! # Rationale
//!
//! An abstract class cannot be instantiated, so a `main` entry point in it
//! is almost always a leftover or misplaced code.
//!
//! # Detected Patterns
//!
//! ```java
//! // BAD
//! public abstract class Job {
//!     public static void main(String[] args) { ... }
//! }
//! ```
//!
//! Only the real entry-point signature is flagged: `public static void`,
//! one parameter of type `String[]`, `String...` or `String args[]`.

use jcheck_core::{ast, FileContext, Node, Rule, RuleConfig, Severity, Violation};

/// Rule code for no-main-method-in-abstract-class.
pub const CODE: &str = "JC010";

/// Rule name for no-main-method-in-abstract-class.
pub const NAME: &str = "no-main-method-in-abstract-class";

/// Forbids `public static void main(String[])` in abstract classes.
#[derive(Debug, Clone)]
pub struct NoMainMethodInAbstractClass {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for NoMainMethodInAbstractClass {
    fn default() -> Self {
        Self::new()
    }
}

impl NoMainMethodInAbstractClass {
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

impl Rule for NoMainMethodInAbstractClass {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids main methods in abstract classes"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn node_kinds(&self) -> &'static [&'static str] {
        &["method_declaration"]
    }

    fn visit(&self, ctx: &FileContext, node: Node<'_>) -> Vec<Violation> {
        let source = ctx.content;
        if ast::name_of(node, source) != Some("main") || !is_entry_point(node, source) {
            return Vec::new();
        }
        let in_abstract_class = node
            .parent()
            .and_then(|body| body.parent())
            .is_some_and(|c| c.kind() == "class_declaration" && ast::has_modifier(c, "abstract"));
        if !in_abstract_class {
            return Vec::new();
        }

        vec![Violation::new(
            CODE,
            NAME,
            self.severity,
            ctx.location(node),
            "Abstract class must not declare a main method",
        )]
    }
}

fn is_entry_point(method: Node<'_>, source: &str) -> bool {
    let returns_void = method
        .child_by_field_name("type")
        .is_some_and(|t| t.kind() == "void_type");
    if !returns_void || !ast::has_modifier(method, "public") || !ast::has_modifier(method, "static")
    {
        return false;
    }

    let Some(params) = method.child_by_field_name("parameters") else {
        return false;
    };
    let params = ast::named_children(params);
    let [param] = params.as_slice() else {
        return false;
    };
    is_string_array_param(*param, source)
}

fn is_string_array_param(param: Node<'_>, source: &str) -> bool {
    match param.kind() {
        // `String... args`
        "spread_parameter" => ast::named_children(param)
            .into_iter()
            .find(|c| c.kind() != "modifiers")
            .is_some_and(|t| is_string(t, source)),
        "formal_parameter" => {
            let Some(ty) = param.child_by_field_name("type") else {
                return false;
            };
            match ty.kind() {
                // `String[] args`
                "array_type" => {
                    ty.child_by_field_name("element")
                        .is_some_and(|e| is_string(e, source))
                        && ty
                            .child_by_field_name("dimensions")
                            .is_some_and(|d| ast::text(d, source).matches('[').count() == 1)
                }
                // `String args[]`
                _ => {
                    is_string(ty, source)
                        && param
                            .child_by_field_name("dimensions")
                            .is_some_and(|d| ast::text(d, source).matches('[').count() == 1)
                }
            }
        }
        _ => false,
    }
}

fn is_string(ty: Node<'_>, source: &str) -> bool {
    matches!(ty.kind(), "type_identifier" | "scoped_type_identifier")
        && ast::type_simple_name(ty, source) == "String"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::check;

    fn check_code(code: &str) -> Vec<Violation> {
        check(&NoMainMethodInAbstractClass::new(), code)
    }

    #[test]
    fn detects_main_in_abstract_class() {
        let violations = check_code(
            r"
public abstract class Job {
    public static void main(String[] args) {
        run();
    }
}
",
        );
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].location.line, 3);
    }

    #[test]
    fn detects_varargs_and_c_style_arrays() {
        let violations = check_code(
            r"
abstract class A {
    public static void main(String... args) { }
}
abstract class B {
    public static void main(java.lang.String args[]) { }
}
",
        );
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn allows_main_in_concrete_class() {
        let violations = check_code(
            r"
public class App {
    public static void main(String[] args) { }
}
",
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn allows_other_main_signatures() {
        let violations = check_code(
            r"
abstract class A {
    public void main(String[] args) { }
    static void main(String[] args, int x) { }
    public static int main(String[] args) { return 0; }
    public static void main(int[] args) { }
    public static void main(String[][] args) { }
    public static void main() { }
}
",
        );
        assert!(violations.is_empty());
    }
}
