//! Rule to require digit grouping in long numeric literals.
//!
//! # Rationale
//!
//! `10000000` and `100000000` are hard to tell apart; `10_000_000` is not.
//! Since Java 7 underscores may separate digits in any numeric literal.
//!
//! # Detected Patterns
//!
//! ```java
//! long big = 10000000L;          // BAD
//! long big = 10_000_000L;        // GOOD
//! int mask = 0xFFFFFFFF;         // BAD
//! int mask = 0xFFFF_FFFF;        // GOOD
//! double d = 3.1415926535;       // BAD: fraction part is long
//! ```
//!
//! A literal is reported when it has at least the minimum number of
//! digits for its radix and some run of digits between underscores is
//! longer than the maximum. The integer and fraction parts of a decimal
//! floating-point literal are judged separately; exponents are ignored.
//! Octal and hexadecimal floating-point literals are never reported.
//!
//! # Configuration
//!
//! | Option | Default |
//! |--------|---------|
//! | `min_decimal_symbol_length` | 7 |
//! | `max_decimal_symbols_until_underscore` | 3 |
//! | `min_hex_symbol_length` | 5 |
//! | `max_hex_symbols_until_underscore` | 4 |
//! | `min_binary_symbol_length` | 9 |
//! | `max_binary_symbols_until_underscore` | 8 |
//! | `ignore_field_name_pattern` | `serialVersionUID` |

use std::sync::LazyLock;

use jcheck_core::{ast, FileContext, Node, Rule, RuleConfig, Severity, Suggestion, Violation};
use regex::Regex;
use tracing::warn;

/// Rule code for numeric-literal-needs-underscore.
pub const CODE: &str = "JC013";

/// Rule name for numeric-literal-needs-underscore.
pub const NAME: &str = "numeric-literal-needs-underscore";

#[allow(clippy::expect_used)]
static DEFAULT_IGNORED_FIELDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^(?:serialVersionUID)$").expect("valid default pattern"));

/// Length limits for one radix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grouping {
    /// Literals with fewer digits are never reported.
    pub min_length: usize,
    /// Longest run of digits allowed between underscores.
    pub max_group: usize,
}

impl Grouping {
    /// Whether a run of digits (underscores included) breaks the limits.
    fn violated_by(self, digits: &str) -> bool {
        let count = digits.chars().filter(|c| *c != '_').count();
        count >= self.min_length && digits.split('_').any(|group| group.len() > self.max_group)
    }
}

/// Requires underscores in long numeric literals.
#[derive(Debug, Clone)]
pub struct NumericLiteralNeedsUnderscore {
    /// Custom severity.
    pub severity: Severity,
    /// Limits for decimal integer and floating-point literals.
    pub decimal: Grouping,
    /// Limits for hexadecimal literals.
    pub hex: Grouping,
    /// Limits for binary literals.
    pub binary: Grouping,
    /// Literals initialising variables whose name matches are skipped.
    pub ignore_field_name: Regex,
}

impl Default for NumericLiteralNeedsUnderscore {
    fn default() -> Self {
        Self::new()
    }
}

impl NumericLiteralNeedsUnderscore {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Warning,
            decimal: Grouping {
                min_length: 7,
                max_group: 3,
            },
            hex: Grouping {
                min_length: 5,
                max_group: 4,
            },
            binary: Grouping {
                min_length: 9,
                max_group: 8,
            },
            ignore_field_name: DEFAULT_IGNORED_FIELDS.clone(),
        }
    }

    /// Creates the rule from its configuration block.
    #[must_use]
    pub fn from_config(config: &RuleConfig) -> Self {
        let defaults = Self::new();
        let grouping = |prefix: &str, default: Grouping| Grouping {
            min_length: config
                .get_usize(&format!("min_{prefix}_symbol_length"), default.min_length),
            max_group: config.get_usize(
                &format!("max_{prefix}_symbols_until_underscore"),
                default.max_group,
            ),
        };

        let mut rule = Self {
            decimal: grouping("decimal", defaults.decimal),
            hex: grouping("hex", defaults.hex),
            binary: grouping("binary", defaults.binary),
            ..defaults
        };
        if let Some(pattern) = config.get_option::<String>("ignore_field_name_pattern") {
            match Regex::new(&format!("^(?:{pattern})$")) {
                Ok(re) => rule.ignore_field_name = re,
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

    /// Sets the decimal limits.
    #[must_use]
    pub fn decimal(mut self, min_length: usize, max_group: usize) -> Self {
        self.decimal = Grouping {
            min_length,
            max_group,
        };
        self
    }

    /// Sets the hexadecimal limits.
    #[must_use]
    pub fn hex(mut self, min_length: usize, max_group: usize) -> Self {
        self.hex = Grouping {
            min_length,
            max_group,
        };
        self
    }

    /// Sets the binary limits.
    #[must_use]
    pub fn binary(mut self, min_length: usize, max_group: usize) -> Self {
        self.binary = Grouping {
            min_length,
            max_group,
        };
        self
    }

    /// Whether the literal text needs more underscores.
    fn needs_underscore(&self, kind: &str, literal: &str) -> Option<Grouping> {
        match kind {
            // A leading zero makes the literal octal.
            "decimal_integer_literal" if literal.len() > 1 && literal.starts_with('0') => None,
            "decimal_integer_literal" => {
                let digits = literal.trim_end_matches(['l', 'L']);
                self.decimal.violated_by(digits).then_some(self.decimal)
            }
            "hex_integer_literal" => {
                let digits = strip_radix_prefix(literal, 'x').trim_end_matches(['l', 'L']);
                self.hex.violated_by(digits).then_some(self.hex)
            }
            "binary_integer_literal" => {
                let digits = strip_radix_prefix(literal, 'b').trim_end_matches(['l', 'L']);
                self.binary.violated_by(digits).then_some(self.binary)
            }
            "decimal_floating_point_literal" => {
                let mantissa = literal
                    .trim_end_matches(['f', 'F', 'd', 'D'])
                    .split(['e', 'E'])
                    .next()
                    .unwrap_or("");
                mantissa
                    .split('.')
                    .any(|part| self.decimal.violated_by(part))
                    .then_some(self.decimal)
            }
            _ => None,
        }
    }
}

fn strip_radix_prefix(literal: &str, radix: char) -> &str {
    let mut chars = literal.chars();
    match (chars.next(), chars.next()) {
        (Some('0'), Some(c)) if c.eq_ignore_ascii_case(&radix) => &literal[2..],
        _ => literal,
    }
}

impl Rule for NumericLiteralNeedsUnderscore {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires underscores to group digits in long numeric literals"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn node_kinds(&self) -> &'static [&'static str] {
        &[
            "decimal_integer_literal",
            "hex_integer_literal",
            "binary_integer_literal",
            "decimal_floating_point_literal",
        ]
    }

    fn visit(&self, ctx: &FileContext, node: Node<'_>) -> Vec<Violation> {
        let literal = ctx.text(node);
        let Some(grouping) = self.needs_underscore(node.kind(), literal) else {
            return Vec::new();
        };

        let ignored = ast::find_ancestor(node, &["variable_declarator"])
            .and_then(|d| ast::name_of(d, ctx.content))
            .is_some_and(|name| self.ignore_field_name.is_match(name));
        if ignored {
            return Vec::new();
        }

        vec![Violation::new(
            CODE,
            NAME,
            self.severity,
            ctx.location(node),
            format!(
                "Numeric literal '{literal}' should group its digits with underscores \
                 (at most {} digits per group)",
                grouping.max_group
            ),
        )
        .with_suggestion(Suggestion::new("Insert `_` between digit groups"))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::check;

    fn check_code(code: &str) -> Vec<Violation> {
        check(&NumericLiteralNeedsUnderscore::new(), code)
    }

    #[test]
    fn detects_long_decimal() {
        let violations = check_code(
            r"
class Foo {
    long big = 10000000L;
    long ok = 10_000_000L;
    int small = 999999;
}
",
        );
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].location.line, 3);
        assert!(violations[0].message.contains("10000000L"));
    }

    #[test]
    fn badly_grouped_decimal_is_reported() {
        let violations = check_code(
            r"
class Foo {
    long a = 1000_0000;
}
",
        );
        assert_eq!(violations.len(), 1);
    }

    #[test]
    fn hex_and_binary() {
        let violations = check_code(
            r"
class Foo {
    int a = 0xFFFFFFFF;
    int b = 0xFFFF_FFFF;
    int c = 0xFFFF;
    int d = 0b101010101;
    int e = 0b1_01010101;
    int f = 0B10101010_10101010;
}
",
        );
        let lines: Vec<usize> = violations.iter().map(|v| v.location.line).collect();
        assert_eq!(lines, vec![3, 6]);
    }

    #[test]
    fn floating_point_parts_are_separate() {
        let violations = check_code(
            r"
class Foo {
    double a = 3.1415926535;
    double b = 123456.5;
    double c = 1234567.0e10;
    double d = 3.141_592_653_5d;
    float e = 1e1000000f;
}
",
        );
        let lines: Vec<usize> = violations.iter().map(|v| v.location.line).collect();
        assert_eq!(lines, vec![3, 5]);
    }

    #[test]
    fn ignores_serial_version_uid() {
        let violations = check_code(
            r"
class Foo {
    private static final long serialVersionUID = 4328743295743289573L;
}
",
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn options_from_config() {
        let config: RuleConfig = toml::from_str(
            r#"
min_decimal_symbol_length = 4
max_decimal_symbols_until_underscore = 3
ignore_field_name_pattern = "MAGIC_.*"
"#,
        )
        .unwrap();
        let rule = NumericLiteralNeedsUnderscore::from_config(&config);
        let violations = check(
            &rule,
            r"
class Foo {
    int a = 1000;
    int MAGIC_NUMBER = 123456789;
    int b = 1_000;
}
",
        );
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].location.line, 3);
    }

    #[test]
    fn octal_is_ignored() {
        let violations = check_code(
            r"
class Foo {
    int mode = 07777777777;
}
",
        );
        assert!(violations.is_empty());
    }
}
