//! Rule to keep the caught exception as the cause of a rethrown one.
//!
//! # Rationale
//!
//! Throwing a new exception from a `catch` block without passing the
//! caught one along throws away its stack trace, the single most useful
//! piece of information when diagnosing the failure.
//!
//! # Detected Patterns
//!
//! ```java
//! // BAD: the IOException is lost
//! catch (IOException e) {
//!     throw new StorageException("read failed");
//! }
//!
//! // BAD: same, through a local variable
//! catch (IOException e) {
//!     StorageException ex = new StorageException("read failed");
//!     throw ex;
//! }
//!
//! // GOOD
//! catch (IOException e) {
//!     throw new StorageException("read failed", e);
//! }
//!
//! // GOOD: cause attached after construction
//! catch (IOException e) {
//!     StorageException ex = new StorageException("read failed");
//!     ex.initCause(e);
//!     throw ex;
//! }
//! ```

use jcheck_core::{ast, FileContext, Node, Rule, RuleConfig, Severity, Suggestion, Violation};

/// Rule code for avoid-hiding-cause-exception.
pub const CODE: &str = "JC005";

/// Rule name for avoid-hiding-cause-exception.
pub const NAME: &str = "avoid-hiding-cause-exception";

/// Subtrees whose `throw` statements do not belong to the catch block.
const FOREIGN_SCOPES: &[&str] = &["catch_clause", "lambda_expression", "class_body"];

/// Requires new exceptions thrown from a catch block to carry the cause.
#[derive(Debug, Clone)]
pub struct AvoidHidingCauseException {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for AvoidHidingCauseException {
    fn default() -> Self {
        Self::new()
    }
}

impl AvoidHidingCauseException {
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

impl Rule for AvoidHidingCauseException {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires exceptions thrown from a catch block to keep the caught exception as cause"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn node_kinds(&self) -> &'static [&'static str] {
        &["catch_clause"]
    }

    fn visit(&self, ctx: &FileContext, node: Node<'_>) -> Vec<Violation> {
        let source = ctx.content;
        let Some(param) = ast::first_child_of_kind(node, "catch_formal_parameter")
            .and_then(|p| ast::name_of(p, source))
        else {
            return Vec::new();
        };
        let Some(body) = node.child_by_field_name("body") else {
            return Vec::new();
        };

        ast::descendants_pruned(body, FOREIGN_SCOPES)
            .filter(|n| n.kind() == "throw_statement")
            .filter(|throw| hides_cause(*throw, body, param, source))
            .map(|throw| {
                Violation::new(
                    CODE,
                    NAME,
                    self.severity,
                    ctx.location(throw),
                    format!("Original exception '{param}' is not passed to the thrown exception"),
                )
                .with_suggestion(Suggestion::new(format!(
                    "Pass '{param}' as the cause of the new exception"
                )))
            })
            .collect()
    }
}

/// Whether `throw` raises a new exception that never references `param`.
fn hides_cause(throw: Node<'_>, catch_body: Node<'_>, param: &str, source: &str) -> bool {
    let Some(thrown) = ast::named_children(throw)
        .into_iter()
        .next()
        .map(ast::unwrap_parens)
    else {
        return false;
    };

    match thrown.kind() {
        "object_creation_expression" => !ast::references_identifier(thrown, source, param),
        "identifier" => {
            let name = ast::text(thrown, source);
            if name == param {
                return false;
            }
            if attaches_cause(catch_body, name, param, source) {
                return false;
            }
            let values = assigned_values(catch_body, name, source);
            !values.is_empty()
                && values.iter().all(|v| {
                    v.kind() == "object_creation_expression"
                        && !ast::references_identifier(*v, source, param)
                })
        }
        _ => false,
    }
}

/// Whether a call on local `name` receives `param` as an argument, as in
/// `ex.initCause(e)` or `ex.addSuppressed(e)`.
fn attaches_cause(catch_body: Node<'_>, name: &str, param: &str, source: &str) -> bool {
    ast::descendants_pruned(catch_body, &["lambda_expression", "class_body"])
        .filter(|n| n.kind() == "method_invocation")
        .filter(|call| {
            call.child_by_field_name("object")
                .map(ast::unwrap_parens)
                .is_some_and(|o| o.kind() == "identifier" && ast::text(o, source) == name)
        })
        .filter_map(|call| call.child_by_field_name("arguments"))
        .any(|args| ast::references_identifier(args, source, param))
}

/// Values assigned to local `name` inside the catch body, by declaration or
/// plain assignment.
fn assigned_values<'t>(catch_body: Node<'t>, name: &str, source: &str) -> Vec<Node<'t>> {
    ast::descendants_pruned(catch_body, &["lambda_expression", "class_body"])
        .filter_map(|n| match n.kind() {
            "variable_declarator" if ast::name_of(n, source) == Some(name) => {
                n.child_by_field_name("value")
            }
            "assignment_expression" => {
                let left = n.child_by_field_name("left")?;
                (left.kind() == "identifier" && ast::text(left, source) == name)
                    .then(|| n.child_by_field_name("right"))
                    .flatten()
            }
            _ => None,
        })
        .map(ast::unwrap_parens)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::check;

    fn check_code(code: &str) -> Vec<Violation> {
        check(&AvoidHidingCauseException::new(), code)
    }

    #[test]
    fn detects_new_exception_without_cause() {
        let violations = check_code(
            r#"
class Foo {
    void f() {
        try {
            read();
        } catch (IOException e) {
            throw new StorageException("read failed");
        }
    }
}
"#,
        );
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].location.line, 7);
        assert!(violations[0].message.contains("'e'"));
    }

    #[test]
    fn allows_cause_passed_anywhere_in_arguments() {
        let violations = check_code(
            r#"
class Foo {
    void f() {
        try {
            read();
        } catch (IOException e) {
            throw new StorageException("read failed: " + e.getMessage(), e);
        }
        try {
            read();
        } catch (IOException ioe) {
            throw new StorageException(describe(ioe));
        }
    }
}
"#,
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn follows_local_variable() {
        let violations = check_code(
            r#"
class Foo {
    void f() {
        try {
            read();
        } catch (IOException e) {
            StorageException ex = new StorageException("read failed");
            throw ex;
        }
        try {
            read();
        } catch (IOException e) {
            StorageException ex = new StorageException("read failed");
            ex.initCause(e);
            throw ex;
        }
    }
}
"#,
        );
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn wrapped_local_is_fine() {
        let violations = check_code(
            r#"
class Foo {
    void f() {
        try {
            read();
        } catch (IOException e) {
            StorageException ex = new StorageException(e);
            throw ex;
        }
    }
}
"#,
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn rethrow_and_unknown_variables_are_fine() {
        let violations = check_code(
            r"
class Foo {
    void f() throws Exception {
        try {
            read();
        } catch (IOException e) {
            cleanup();
            throw e;
        }
        try {
            read();
        } catch (IOException e) {
            throw pending;
        }
    }
}
",
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn nested_catch_is_judged_on_its_own() {
        let violations = check_code(
            r#"
class Foo {
    void f() {
        try {
            read();
        } catch (IOException e) {
            try {
                recover();
            } catch (IllegalStateException inner) {
                throw new StorageException("recovery failed", e);
            }
        }
    }
}
"#,
        );
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("'inner'"));
    }

    #[test]
    fn cause_attached_after_construction() {
        let violations = check_code(
            r#"
class Foo {
    void f() {
        try {
            read();
        } catch (IOException e) {
            StorageException ex = new StorageException("read failed");
            ex.initCause(e);
            throw ex;
        } catch (RuntimeException e) {
            StorageException ex = new StorageException("failed");
            ex.setMessage(describe());
            throw ex;
        }
    }
}
"#,
        );
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].location.line, 13);
    }
}
