//! Rule to forbid throwing instances of anonymous exception classes.
//!
//! # Rationale
//!
//! An anonymous subclass of an exception has no name a caller can catch,
//! and shows up in stack traces as `Foo$1`. Declare a named exception
//! class instead.
//!
//! # Detected Patterns
//!
//! ```java
//! // BAD
//! throw new IllegalStateException("closed") {
//!     @Override
//!     public String getMessage() { return "closed: " + id; }
//! };
//!
//! // BAD: through a local variable
//! RuntimeException ex = new RuntimeException() { };
//! throw ex;
//! ```
//!
//! # Configuration
//!
//! - `exception_class_name_regex`: which instantiated types count as
//!   exceptions (default `^.*Exception`)

use std::sync::LazyLock;

use jcheck_core::{ast, FileContext, Node, Rule, RuleConfig, Severity, Suggestion, Violation};
use regex::Regex;
use tracing::warn;

/// Rule code for forbid-throw-anonymous-exceptions.
pub const CODE: &str = "JC006";

/// Rule name for forbid-throw-anonymous-exceptions.
pub const NAME: &str = "forbid-throw-anonymous-exceptions";

#[allow(clippy::expect_used)]
static DEFAULT_EXCEPTION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^.*Exception").expect("valid default pattern"));

/// Forbids throwing anonymous exception classes.
#[derive(Debug, Clone)]
pub struct ForbidThrowAnonymousExceptions {
    /// Custom severity.
    pub severity: Severity,
    /// Pattern an instantiated type name must match to be an exception.
    pub exception_class_name: Regex,
}

impl Default for ForbidThrowAnonymousExceptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ForbidThrowAnonymousExceptions {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Warning,
            exception_class_name: DEFAULT_EXCEPTION_PATTERN.clone(),
        }
    }

    /// Creates the rule from its configuration block.
    ///
    /// An invalid `exception_class_name_regex` is logged and replaced by the
    /// default pattern.
    #[must_use]
    pub fn from_config(config: &RuleConfig) -> Self {
        let mut rule = Self::new();
        if let Some(pattern) = config.get_option::<String>("exception_class_name_regex") {
            match Regex::new(&pattern) {
                Ok(re) => rule.exception_class_name = re,
                Err(e) => warn!(rule = NAME, %pattern, error = %e, "Invalid regex, using default"),
            }
        }
        rule
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Sets the exception class name pattern.
    #[must_use]
    pub fn exception_class_name(mut self, pattern: Regex) -> Self {
        self.exception_class_name = pattern;
        self
    }

    /// Whether `value` instantiates an anonymous class of an exception type.
    fn is_anonymous_exception(&self, value: Node<'_>, source: &str) -> bool {
        let value = ast::unwrap_parens(value);
        value.kind() == "object_creation_expression"
            && ast::first_child_of_kind(value, "class_body").is_some()
            && value
                .child_by_field_name("type")
                .is_some_and(|t| {
                    self.exception_class_name
                        .is_match(ast::type_simple_name(t, source))
                })
    }
}

impl Rule for ForbidThrowAnonymousExceptions {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids throwing instances of anonymous exception classes"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn node_kinds(&self) -> &'static [&'static str] {
        &["throw_statement"]
    }

    fn visit(&self, ctx: &FileContext, node: Node<'_>) -> Vec<Violation> {
        let source = ctx.content;
        let Some(thrown) = ast::named_children(node)
            .into_iter()
            .next()
            .map(ast::unwrap_parens)
        else {
            return Vec::new();
        };

        let anonymous = match thrown.kind() {
            "object_creation_expression" => self.is_anonymous_exception(thrown, source),
            "identifier" => {
                let name = ast::text(thrown, source);
                let scope = ast::enclosing_callable(node).unwrap_or_else(|| ast::root_of(node));
                ast::descendants(scope)
                    .filter(|n| n.kind() == "variable_declarator")
                    .filter(|d| ast::name_of(*d, source) == Some(name))
                    .filter_map(|d| d.child_by_field_name("value"))
                    .any(|v| self.is_anonymous_exception(v, source))
            }
            _ => false,
        };
        if !anonymous {
            return Vec::new();
        }

        vec![Violation::new(
            CODE,
            NAME,
            self.severity,
            ctx.location(node),
            "Throwing an instance of an anonymous exception class",
        )
        .with_suggestion(Suggestion::new(
            "Declare a named exception class and throw that instead",
        ))]
    }
}
