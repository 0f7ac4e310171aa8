//! Comment-based allowance directives.
//!
//! Supports directives like:
//! ```text
//! // jcheck: allow(useless-single-catch) reason="keeps the stack frame"
//! /* jcheck: allow(all) */
//! ```
//!
//! A directive applies to the line it is written on and to the line below.

use std::collections::{BTreeSet, HashMap};

/// Marker that introduces a directive inside a comment.
const DIRECTIVE_PREFIX: &str = "jcheck:";

/// Key that matches every rule.
const ALL_RULES: &str = "all";

/// Outcome of looking up a violation in the directives of its file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowCheck {
    /// No directive covers the violation.
    Denied,
    /// A directive covers the violation.
    Allowed {
        /// The `reason="..."` of the directive, if written.
        reason: Option<String>,
    },
}

impl AllowCheck {
    /// Returns true if allowed.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }

    /// Returns the reason if allowed.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Allowed { reason } => reason.as_deref(),
            Self::Denied => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AllowDirective {
    keys: BTreeSet<String>,
    reason: Option<String>,
}

impl AllowDirective {
    fn covers(&self, keys: &[&str]) -> bool {
        self.keys.contains(ALL_RULES) || keys.iter().any(|k| self.keys.contains(*k))
    }
}

/// The allow directives of one source file, indexed by 1-based line.
#[derive(Debug, Clone, Default)]
pub struct AllowIndex {
    by_line: HashMap<usize, AllowDirective>,
}

impl AllowIndex {
    /// Scans `content` for directives.
    #[must_use]
    pub fn parse(content: &str) -> Self {
        let by_line = content
            .lines()
            .enumerate()
            .filter(|(_, text)| text.contains(DIRECTIVE_PREFIX))
            .filter_map(|(i, text)| parse_directive(text).map(|d| (i + 1, d)))
            .collect();
        Self { by_line }
    }

    /// Number of lines carrying a directive.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_line.len()
    }

    /// Whether the file has no directive at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_line.is_empty()
    }

    /// Looks up the directive covering `line` for a rule answering to any
    /// of `keys` (its name and code). The line above wins over a trailing
    /// directive on the line itself.
    #[must_use]
    pub fn check(&self, line: usize, keys: &[&str]) -> AllowCheck {
        [line.saturating_sub(1), line]
            .into_iter()
            .filter(|&l| l > 0)
            .filter_map(|l| self.by_line.get(&l))
            .find(|directive| directive.covers(keys))
            .map_or(AllowCheck::Denied, |directive| AllowCheck::Allowed {
                reason: directive.reason.clone(),
            })
    }
}

/// Parses the directive of a single source line, if it has one.
fn parse_directive(line: &str) -> Option<AllowDirective> {
    let body = comment_body(line)?;
    let args = body
        .strip_prefix(DIRECTIVE_PREFIX)?
        .trim_start()
        .strip_prefix("allow")?
        .trim_start()
        .strip_prefix('(')?;
    let (list, rest) = args.split_once(')')?;

    let keys: BTreeSet<String> = list
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(String::from)
        .collect();
    if keys.is_empty() {
        return None;
    }

    let reason = rest
        .trim_start()
        .strip_prefix("reason")
        .and_then(|r| r.trim_start().strip_prefix('='))
        .and_then(|r| r.trim_start().strip_prefix('"'))
        .and_then(|r| r.split_once('"'))
        .map(|(text, _)| text.to_string());

    Some(AllowDirective { keys, reason })
}

/// Text of the first comment on `line`, without its delimiters.
fn comment_body(line: &str) -> Option<&str> {
    let (start, block) = match (line.find("//"), line.find("/*")) {
        (Some(l), Some(b)) if b < l => (b, true),
        (Some(l), _) => (l, false),
        (None, Some(b)) => (b, true),
        (None, None) => return None,
    };
    let body = line[start + 2..].trim_start_matches(['/', '*']).trim();
    if block {
        Some(body.split_once("*/").map_or(body, |(inner, _)| inner).trim())
    } else {
        Some(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(directive: &AllowDirective) -> Vec<&str> {
        directive.keys.iter().map(String::as_str).collect()
    }

    #[test]
    fn parses_line_comment_directive() {
        let directive = parse_directive("// jcheck: allow(useless-single-catch)").unwrap();
        assert_eq!(keys(&directive), vec!["useless-single-catch"]);
        assert!(directive.reason.is_none());
    }

    #[test]
    fn parses_reason() {
        let directive =
            parse_directive("// jcheck: allow(JC004) reason = \"legacy contract\"").unwrap();
        assert_eq!(keys(&directive), vec!["JC004"]);
        assert_eq!(directive.reason.as_deref(), Some("legacy contract"));
    }

    #[test]
    fn parses_block_comment_directive() {
        let directive = parse_directive("    /* jcheck: allow(rule2, rule1) */ foo();").unwrap();
        assert_eq!(keys(&directive), vec!["rule1", "rule2"]);
    }

    #[test]
    fn parses_trailing_directive() {
        let directive = parse_directive("    int x = a | b; // jcheck: allow(all)").unwrap();
        assert!(directive.covers(&["anything"]));
    }

    #[test]
    fn ignores_plain_comments_and_empty_lists() {
        assert!(parse_directive("// just a note").is_none());
        assert!(parse_directive("int x = 1;").is_none());
        assert!(parse_directive("// jcheck: allow()").is_none());
        assert!(parse_directive("String s = \"jcheck: allow(all)\";").is_none());
    }

    #[test]
    fn covers_own_line_and_the_next() {
        let content = "void f() {\n    // jcheck: allow(redundant-return)\n    return;\n}";
        let index = AllowIndex::parse(content);
        assert_eq!(index.len(), 1);

        assert!(index.check(2, &["redundant-return"]).is_allowed());
        assert!(index.check(3, &["redundant-return"]).is_allowed());
        assert!(!index.check(3, &["other-rule"]).is_allowed());
        assert!(!index.check(4, &["redundant-return"]).is_allowed());
    }

    #[test]
    fn matches_by_code() {
        let content = "// jcheck: allow(JC018) reason=\"generated\"\nreturn;";
        let result = AllowIndex::parse(content).check(2, &["redundant-return", "JC018"]);
        assert_eq!(
            result,
            AllowCheck::Allowed {
                reason: Some("generated".to_string())
            }
        );
        assert_eq!(result.reason(), Some("generated"));
    }

    #[test]
    fn file_without_directives() {
        let index = AllowIndex::parse("class A {}\n");
        assert!(index.is_empty());
        assert_eq!(index.check(1, &["JC001"]), AllowCheck::Denied);
    }
}
