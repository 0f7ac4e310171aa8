//! Rule to forbid a `return;` that ends a void body anyway.
//!
//! # Rationale
//!
//! Control leaves a void method, constructor or lambda at its closing
//! brace. A bare `return;` right before it does nothing.
//!
//! # Detected Patterns
//!
//! ```java
//! void close() {
//!     release();
//!     return;               // BAD
//! }
//!
//! void load() {
//!     try {
//!         read();
//!         return;           // BAD: the try ends the method
//!     } catch (IOException e) {
//!         log(e);
//!         return;           // BAD
//!     }
//! }
//! ```
//!
//! # Configuration
//!
//! - `allow_return_in_empty_methods_and_constructors`: accept a body made
//!   of nothing but `return;` (default `false`)

use jcheck_core::{ast, FileContext, Node, Rule, RuleConfig, Severity, Suggestion, Violation};

/// Rule code for redundant-return.
pub const CODE: &str = "JC018";

/// Rule name for redundant-return.
pub const NAME: &str = "redundant-return";

/// Forbids `return;` as the last statement of a void body.
#[derive(Debug, Clone)]
pub struct RedundantReturn {
    /// Custom severity.
    pub severity: Severity,
    /// Accept bodies consisting of a single `return;`.
    pub allow_in_empty_bodies: bool,
}

impl Default for RedundantReturn {
    fn default() -> Self {
        Self::new()
    }
}

impl RedundantReturn {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Warning,
            allow_in_empty_bodies: false,
        }
    }

    /// Creates the rule from its configuration block.
    #[must_use]
    pub fn from_config(config: &RuleConfig) -> Self {
        Self {
            allow_in_empty_bodies: config
                .get_bool("allow_return_in_empty_methods_and_constructors", false),
            ..Self::new()
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Accepts bodies made of a single `return;`.
    #[must_use]
    pub fn allow_in_empty_bodies(mut self, allow: bool) -> Self {
        self.allow_in_empty_bodies = allow;
        self
    }
}

impl Rule for RedundantReturn {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids a bare return as the last statement of a void body"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn node_kinds(&self) -> &'static [&'static str] {
        &["return_statement"]
    }

    fn visit(&self, ctx: &FileContext, node: Node<'_>) -> Vec<Violation> {
        if !ast::named_children(node).is_empty() {
            return Vec::new();
        }
        let Some(block) = node.parent() else {
            return Vec::new();
        };
        if ast::next_named_sibling(node, &[]).is_some() {
            return Vec::new();
        }
        let only_statement = ast::prev_named_sibling(node, &[]).is_none();
        if self.allow_in_empty_bodies && only_statement && is_void_body(block) {
            return Vec::new();
        }
        if !ends_void_body(block) {
            return Vec::new();
        }

        vec![Violation::new(
            CODE,
            NAME,
            self.severity,
            ctx.location(node),
            "Redundant return statement",
        )
        .with_suggestion(Suggestion::new("Remove the return statement"))]
    }
}

/// Whether leaving `block` through its closing brace leaves a void callable.
fn ends_void_body(block: Node<'_>) -> bool {
    if is_void_body(block) {
        return true;
    }
    let Some(parent) = block.parent() else {
        return false;
    };
    let try_node = match parent.kind() {
        "try_statement" | "try_with_resources_statement"
            if parent.child_by_field_name("body") == Some(block) =>
        {
            parent
        }
        "catch_clause" => match parent.parent() {
            Some(t) => t,
            None => return false,
        },
        _ => return false,
    };
    let Some(outer) = try_node.parent() else {
        return false;
    };
    ast::next_named_sibling(try_node, &[]).is_none() && ends_void_body(outer)
}

/// Whether `block` is the body of a void method, a constructor or a lambda.
fn is_void_body(block: Node<'_>) -> bool {
    if !matches!(block.kind(), "block" | "constructor_body") {
        return false;
    }
    let Some(owner) = block.parent() else {
        return false;
    };
    if owner.child_by_field_name("body") != Some(block) {
        return false;
    }
    match owner.kind() {
        "method_declaration" => owner
            .child_by_field_name("type")
            .is_some_and(|t| t.kind() == "void_type"),
        "constructor_declaration" | "compact_constructor_declaration" | "lambda_expression" => {
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::check;

    fn check_code(code: &str) -> Vec<Violation> {
        check(&RedundantReturn::new(), code)
    }

    #[test]
    fn detects_trailing_return_in_method_ctor_and_lambda() {
        let violations = check_code(
            r"
class Foo {
    Foo() {
        init();
        return;
    }

    void close() {
        release();
        return;
    }

    void f() {
        Runnable r = () -> {
            go();
            return;
        };
    }
}
",
        );
        let lines: Vec<usize> = violations.iter().map(|v| v.location.line).collect();
        assert_eq!(lines, vec![5, 10, 16]);
    }

    #[test]
    fn detects_in_closing_try_and_catch() {
        let violations = check_code(
            r"
class Foo {
    void load() {
        try {
            read();
            return;
        } catch (IOException e) {
            log(e);
            return;
        } finally {
            done();
        }
    }
}
",
        );
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn allows_early_returns() {
        let violations = check_code(
            r"
class Foo {
    void f() {
        if (done) {
            return;
        }
        try {
            read();
            return;
        } catch (IOException e) {
            return;
        }
        finish();
    }

    void g() {
        for (Item i : items) {
            return;
        }
    }
}
",
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn allows_value_returns() {
        let violations = check_code(
            r"
class Foo {
    int f() {
        work();
        return 1;
    }
}
",
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn empty_body_option() {
        let source = r"
class Foo {
    Foo() {
        return;
    }

    void noop() {
        return;
    }
}
";
        assert_eq!(check_code(source).len(), 2);

        let rule = RedundantReturn::new().allow_in_empty_bodies(true);
        assert!(check(&rule, source).is_empty());
    }
}
