//! Rule to forbid `super()` calls the compiler inserts anyway.
//!
//! # Rationale
//!
//! Every constructor without an explicit `this(...)` or `super(...)` call
//! already starts with an implicit `super()`. Writing it out adds nothing,
//! and in a class without `extends` it only calls `Object()`.
//!
//! # Detected Patterns
//!
//! ```java
//! // BAD: class does not extend anything
//! class Plain {
//!     Plain() { super(); }
//! }
//!
//! // BAD: implicit call would be identical
//! class Child extends Base {
//!     Child() { super(); }
//! }
//!
//! // GOOD
//! class Child extends Base {
//!     Child(int x) { super(x); }
//! }
//! ```
//!
//! # Configuration
//!
//! - `allow_call_to_no_args_super_ctor`: accept `super()` in classes that
//!   extend another class (default `false`)
//! - `allow_call_to_no_args_super_ctor_if_multiple_public_ctor`: accept it
//!   when the class has more than one public constructor (default `false`)

use jcheck_core::{ast, FileContext, Node, Rule, RuleConfig, Severity, Suggestion, Violation};

/// Rule code for useless-super-ctor-call.
pub const CODE: &str = "JC009";

/// Rule name for useless-super-ctor-call.
pub const NAME: &str = "useless-super-ctor-call";

/// Flags explicit `super(...)` calls that are redundant.
#[derive(Debug, Clone)]
pub struct UselessSuperCtorCall {
    /// Custom severity.
    pub severity: Severity,
    /// Accept `super()` in classes with a superclass.
    pub allow_no_args_super: bool,
    /// Accept `super()` when the class has several public constructors.
    pub allow_no_args_super_if_multiple_public_ctor: bool,
}

impl Default for UselessSuperCtorCall {
    fn default() -> Self {
        Self::new()
    }
}

impl UselessSuperCtorCall {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Warning,
            allow_no_args_super: false,
            allow_no_args_super_if_multiple_public_ctor: false,
        }
    }

    /// Creates the rule from its configuration block.
    #[must_use]
    pub fn from_config(config: &RuleConfig) -> Self {
        Self {
            allow_no_args_super: config.get_bool("allow_call_to_no_args_super_ctor", false),
            allow_no_args_super_if_multiple_public_ctor: config
                .get_bool("allow_call_to_no_args_super_ctor_if_multiple_public_ctor", false),
            ..Self::new()
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Accepts `super()` in classes that extend another class.
    #[must_use]
    pub fn allow_no_args_super(mut self, allow: bool) -> Self {
        self.allow_no_args_super = allow;
        self
    }

    /// Accepts `super()` in classes with more than one public constructor.
    #[must_use]
    pub fn allow_no_args_super_if_multiple_public_ctor(mut self, allow: bool) -> Self {
        self.allow_no_args_super_if_multiple_public_ctor = allow;
        self
    }
}

impl Rule for UselessSuperCtorCall {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Flags explicit super constructor calls that the compiler would insert"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn node_kinds(&self) -> &'static [&'static str] {
        &["explicit_constructor_invocation"]
    }

    fn visit(&self, ctx: &FileContext, node: Node<'_>) -> Vec<Violation> {
        let calls_super = node
            .child_by_field_name("constructor")
            .is_some_and(|c| c.kind() == "super");
        // `outer.super()` targets an inner superclass and is never implicit.
        if !calls_super || node.child_by_field_name("object").is_some() {
            return Vec::new();
        }
        let Some(class) = ast::find_ancestor(node, &["constructor_declaration"])
            .and_then(|ctor| ctor.parent())
            .and_then(|body| body.parent())
            .filter(|c| c.kind() == "class_declaration")
        else {
            return Vec::new();
        };

        let message = if class.child_by_field_name("superclass").is_none() {
            "Useless super constructor call in a class that does not extend another class"
        } else {
            let no_args = node
                .child_by_field_name("arguments")
                .is_some_and(|a| ast::named_children(a).is_empty());
            if !no_args || self.allow_no_args_super {
                return Vec::new();
            }
            if self.allow_no_args_super_if_multiple_public_ctor && public_ctor_count(class) > 1 {
                return Vec::new();
            }
            "Useless call to the no-argument super constructor"
        };

        vec![Violation::new(CODE, NAME, self.severity, ctx.location(node), message)
            .with_suggestion(Suggestion::new("Remove the super constructor call"))]
    }
}

fn public_ctor_count(class: Node<'_>) -> usize {
    class
        .child_by_field_name("body")
        .map(|body| {
            ast::children_of_kind(body, "constructor_declaration")
                .into_iter()
                .filter(|c| ast::has_modifier(*c, "public"))
                .count()
        })
        .unwrap_or(0)
}
