//! Rule to forbid wildcard type arguments in method return types.
//!
//! # Rationale
//!
//! A wildcard in a return type pushes the burden of dealing with it onto
//! every caller: `List<? extends Shape>` cannot be added to and must be
//! copied or cast before use. Wildcards belong in parameter types, where
//! they make an API more flexible.
//!
//! # Detected Patterns
//!
//! ```java
//! public List<? extends Shape> shapes();        // BAD
//! public Map<String, ?> attributes();           // BAD
//! public List<Shape> shapes();                  // GOOD
//! public Comparator<? super T> comparator();    // GOOD: ignored type
//! ```
//!
//! # Configuration
//!
//! | Option | Default |
//! |--------|---------|
//! | `check_public_methods` | `true` |
//! | `check_protected_methods` | `true` |
//! | `check_package_methods` | `true` |
//! | `check_private_methods` | `false` |
//! | `check_overridden_methods` | `false` |
//! | `check_deprecated_methods` | `false` |
//! | `allow_returning_wildcard_with_extends` | `false` |
//! | `allow_returning_wildcard_with_super` | `false` |
//! | `return_type_class_names_ignore_regex` | `^(Comparator\|Comparable)$` |
//!
//! Methods declared in interfaces without `private` count as public.

use std::sync::LazyLock;

use jcheck_core::{ast, FileContext, Label, Node, Rule, RuleConfig, Severity, Violation};
use regex::Regex;
use tracing::warn;

/// Rule code for forbid-wildcard-as-return-type.
pub const CODE: &str = "JC014";

/// Rule name for forbid-wildcard-as-return-type.
pub const NAME: &str = "forbid-wildcard-as-return-type";

#[allow(clippy::expect_used)]
static DEFAULT_IGNORED_TYPES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^(Comparator|Comparable)$").expect("valid default pattern"));

/// Visibility of a method declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Access {
    Public,
    Protected,
    Package,
    Private,
}

/// Kind of wildcard type argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Wildcard {
    Unbounded,
    Extends,
    Super,
}

/// Forbids wildcard type arguments in method return types.
#[derive(Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct ForbidWildcardAsReturnType {
    /// Custom severity.
    pub severity: Severity,
    /// Check public methods.
    pub check_public: bool,
    /// Check protected methods.
    pub check_protected: bool,
    /// Check package-private methods.
    pub check_package: bool,
    /// Check private methods.
    pub check_private: bool,
    /// Check methods annotated `@Override`.
    pub check_overridden: bool,
    /// Check methods annotated `@Deprecated`.
    pub check_deprecated: bool,
    /// Accept `? extends T`.
    pub allow_extends: bool,
    /// Accept `? super T`.
    pub allow_super: bool,
    /// Generic types whose wildcard arguments are accepted.
    pub ignored_types: Regex,
}

impl Default for ForbidWildcardAsReturnType {
    fn default() -> Self {
        Self::new()
    }
}

impl ForbidWildcardAsReturnType {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Warning,
            check_public: true,
            check_protected: true,
            check_package: true,
            check_private: false,
            check_overridden: false,
            check_deprecated: false,
            allow_extends: false,
            allow_super: false,
            ignored_types: DEFAULT_IGNORED_TYPES.clone(),
        }
    }

    /// Creates the rule from its configuration block.
    #[must_use]
    pub fn from_config(config: &RuleConfig) -> Self {
        let d = Self::new();
        let mut rule = Self {
            check_public: config.get_bool("check_public_methods", d.check_public),
            check_protected: config.get_bool("check_protected_methods", d.check_protected),
            check_package: config.get_bool("check_package_methods", d.check_package),
            check_private: config.get_bool("check_private_methods", d.check_private),
            check_overridden: config.get_bool("check_overridden_methods", d.check_overridden),
            check_deprecated: config.get_bool("check_deprecated_methods", d.check_deprecated),
            allow_extends: config
                .get_bool("allow_returning_wildcard_with_extends", d.allow_extends),
            allow_super: config.get_bool("allow_returning_wildcard_with_super", d.allow_super),
            ..d
        };
        let ignored = config.get_option::<String>("return_type_class_names_ignore_regex");
        if let Some(pattern) = ignored {
            match Regex::new(&pattern) {
                Ok(re) => rule.ignored_types = re,
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

    /// Also checks private methods.
    #[must_use]
    pub fn check_private(mut self, check: bool) -> Self {
        self.check_private = check;
        self
    }

    /// Also checks `@Override` methods.
    #[must_use]
    pub fn check_overridden(mut self, check: bool) -> Self {
        self.check_overridden = check;
        self
    }

    /// Accepts `? extends T` in return types.
    #[must_use]
    pub fn allow_extends(mut self, allow: bool) -> Self {
        self.allow_extends = allow;
        self
    }

    /// Accepts `? super T` in return types.
    #[must_use]
    pub fn allow_super(mut self, allow: bool) -> Self {
        self.allow_super = allow;
        self
    }

    fn checks_access(&self, access: Access) -> bool {
        match access {
            Access::Public => self.check_public,
            Access::Protected => self.check_protected,
            Access::Package => self.check_package,
            Access::Private => self.check_private,
        }
    }

    fn forbids(&self, wildcard: Wildcard) -> bool {
        match wildcard {
            Wildcard::Unbounded => true,
            Wildcard::Extends => !self.allow_extends,
            Wildcard::Super => !self.allow_super,
        }
    }
}

impl Rule for ForbidWildcardAsReturnType {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids wildcard type arguments in method return types"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn node_kinds(&self) -> &'static [&'static str] {
        &["method_declaration"]
    }

    fn visit(&self, ctx: &FileContext, node: Node<'_>) -> Vec<Violation> {
        let source = ctx.content;
        if !self.checks_access(access_of(node)) {
            return Vec::new();
        }
        if !self.check_overridden && ast::has_annotation(node, source, "Override") {
            return Vec::new();
        }
        if !self.check_deprecated && ast::has_annotation(node, source, "Deprecated") {
            return Vec::new();
        }
        let Some(return_type) = node.child_by_field_name("type") else {
            return Vec::new();
        };

        let offending: Vec<Node<'_>> = ast::descendants(return_type)
            .filter(|n| n.kind() == "wildcard")
            .filter(|w| !self.is_ignored_owner(*w, source))
            .filter(|w| self.forbids(classify(*w)))
            .collect();
        if offending.is_empty() {
            return Vec::new();
        }

        let method = ast::name_of(node, source).unwrap_or("<method>");
        let mut violation = Violation::new(
            CODE,
            NAME,
            self.severity,
            ctx.location(return_type),
            format!("Method '{method}' returns a type with a wildcard type argument"),
        );
        for wildcard in offending {
            violation = violation.with_label(Label::new(ctx.location(wildcard), "wildcard"));
        }
        vec![violation]
    }
}

impl ForbidWildcardAsReturnType {
    /// Whether the generic type owning the wildcard is exempt.
    fn is_ignored_owner(&self, wildcard: Node<'_>, source: &str) -> bool {
        wildcard
            .parent()
            .and_then(|args| args.parent())
            .filter(|owner| owner.kind() == "generic_type")
            .is_some_and(|owner| {
                self.ignored_types
                    .is_match(ast::type_simple_name(owner, source))
            })
    }
}

fn classify(wildcard: Node<'_>) -> Wildcard {
    let mut cursor = wildcard.walk();
    let mut kind = Wildcard::Unbounded;
    for child in wildcard.children(&mut cursor) {
        match child.kind() {
            "extends" => kind = Wildcard::Extends,
            "super" => kind = Wildcard::Super,
            _ => {}
        }
    }
    kind
}

fn access_of(method: Node<'_>) -> Access {
    if ast::has_modifier(method, "private") {
        Access::Private
    } else if ast::has_modifier(method, "public") {
        Access::Public
    } else if ast::has_modifier(method, "protected") {
        Access::Protected
    } else if method
        .parent()
        .is_some_and(|p| matches!(p.kind(), "interface_body" | "annotation_type_body"))
    {
        Access::Public
    } else {
        Access::Package
    }
}
