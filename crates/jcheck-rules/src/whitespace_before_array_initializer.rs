//! Rule to require whitespace before an array initializer's `{`.
//!
//! # Detected Patterns
//!
//! ```java
//! int[] a ={1, 2};                // BAD
//! int[] b = new int[]{1, 2};      // BAD
//! int[] c = new int[] {1, 2};     // GOOD
//! int[][] d = {{1}, {2}};         // GOOD: nested initializers
//! ```

use jcheck_core::{
    ast, FileContext, Node, Replacement, Rule, RuleConfig, Severity, Suggestion, Violation,
};

/// Rule code for whitespace-before-array-initializer.
pub const CODE: &str = "JC023";

/// Rule name for whitespace-before-array-initializer.
pub const NAME: &str = "whitespace-before-array-initializer";

/// Tokens an array initializer must be separated from.
const SEPARATED_FROM: &[&str] = &["dimensions", "]", "="];

/// Requires a space between `]` or `=` and an array initializer.
#[derive(Debug, Clone)]
pub struct WhitespaceBeforeArrayInitializer {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for WhitespaceBeforeArrayInitializer {
    fn default() -> Self {
        Self::new()
    }
}

impl WhitespaceBeforeArrayInitializer {
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

impl Rule for WhitespaceBeforeArrayInitializer {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires whitespace before the opening brace of an array initializer"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn node_kinds(&self) -> &'static [&'static str] {
        &["array_initializer"]
    }

    fn visit(&self, ctx: &FileContext, node: Node<'_>) -> Vec<Violation> {
        let adjacent = ast::prev_sibling_of_kind(node, SEPARATED_FROM)
            .is_some_and(|prev| prev.end_byte() == node.start_byte());
        if !adjacent {
            return Vec::new();
        }

        let location = ctx.location(node);
        let insert_at = location.clone().with_span(node.start_byte(), 0);
        vec![Violation::new(
            CODE,
            NAME,
            self.severity,
            location,
            "Array initializer '{' is not preceded by whitespace",
        )
        .with_suggestion(Suggestion::with_fix(
            "Insert a space before '{'",
            Replacement::new(insert_at, " "),
        ))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::check;

    fn check_code(code: &str) -> Vec<Violation> {
        check(&WhitespaceBeforeArrayInitializer::new(), code)
    }

    #[test]
    fn detects_missing_whitespace() {
        let violations = check_code(
            r"
class Foo {
    int[] a ={1, 2};
    int[] b = new int[]{1, 2};
    String[][] c = new String[][]{{}, {}};
}
",
        );
        let lines: Vec<usize> = violations.iter().map(|v| v.location.line).collect();
        assert_eq!(lines, vec![3, 4, 5]);
        let fix = violations[0]
            .suggestion
            .as_ref()
            .and_then(|s| s.replacement.as_ref())
            .unwrap();
        assert_eq!(fix.new_text, " ");
        assert_eq!(fix.location.length, 0);
    }

    #[test]
    fn allows_separated_and_nested_initializers() {
        let violations = check_code(
            r"
class Foo {
    int[] a = {1, 2};
    int[] b = new int[] {1, 2};
    int[][] c = {{1}, {2}};
    int[] d =
        {3};
}
",
        );
        assert!(violations.is_empty());
    }
}
