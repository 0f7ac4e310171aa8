//! Rule to forbid a lone empty public constructor.
//!
//! # Rationale
//!
//! When a class declares exactly one constructor and it is public, takes
//! no parameters and does nothing, it is identical to the default
//! constructor the compiler would generate. It can simply be removed.
//!
//! # Detected Patterns
//!
//! ```java
//! // BAD
//! public class Registry {
//!     public Registry() {
//!     }
//! }
//!
//! // GOOD: a second constructor exists, the empty one is needed
//! public class Registry {
//!     public Registry() { }
//!     public Registry(int capacity) { ... }
//! }
//! ```
//!
//! # Configuration
//!
//! - `class_annotation_names`: class annotations that exempt the class
//! - `ctor_annotation_names`: constructor annotations that exempt it
//!
//! Names may be simple (`Inject`) or qualified (`javax.inject.Inject`);
//! both match either spelling in source.

use jcheck_core::{ast, FileContext, Node, Rule, RuleConfig, Severity, Suggestion, Violation};

/// Rule code for empty-public-ctor-in-class.
pub const CODE: &str = "JC008";

/// Rule name for empty-public-ctor-in-class.
pub const NAME: &str = "empty-public-ctor-in-class";

/// Flags a class whose only constructor is public, parameterless and empty.
#[derive(Debug, Clone)]
pub struct EmptyPublicCtorInClass {
    /// Custom severity.
    pub severity: Severity,
    /// Class annotations that exempt the class.
    pub class_annotation_names: Vec<String>,
    /// Constructor annotations that exempt the constructor.
    pub ctor_annotation_names: Vec<String>,
}

impl Default for EmptyPublicCtorInClass {
    fn default() -> Self {
        Self::new()
    }
}

impl EmptyPublicCtorInClass {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Warning,
            class_annotation_names: Vec::new(),
            ctor_annotation_names: Vec::new(),
        }
    }

    /// Creates the rule from its configuration block.
    #[must_use]
    pub fn from_config(config: &RuleConfig) -> Self {
        Self {
            class_annotation_names: config.get_str_array("class_annotation_names"),
            ctor_annotation_names: config.get_str_array("ctor_annotation_names"),
            ..Self::new()
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Sets the exempting class annotations.
    #[must_use]
    pub fn class_annotations<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.class_annotation_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the exempting constructor annotations.
    #[must_use]
    pub fn ctor_annotations<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ctor_annotation_names = names.into_iter().map(Into::into).collect();
        self
    }
}

impl Rule for EmptyPublicCtorInClass {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Flags a class whose only constructor is public, parameterless and empty"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn node_kinds(&self) -> &'static [&'static str] {
        &["class_declaration"]
    }

    fn visit(&self, ctx: &FileContext, node: Node<'_>) -> Vec<Violation> {
        let source = ctx.content;
        let Some(body) = node.child_by_field_name("body") else {
            return Vec::new();
        };
        let ctors = ast::children_of_kind(body, "constructor_declaration");
        let [ctor] = ctors.as_slice() else {
            return Vec::new();
        };

        if !is_empty_public_no_arg(*ctor)
            || annotated_with_any(node, source, &self.class_annotation_names)
            || annotated_with_any(*ctor, source, &self.ctor_annotation_names)
        {
            return Vec::new();
        }

        let class_name = ast::name_of(node, source).unwrap_or("<class>");
        vec![Violation::new(
            CODE,
            NAME,
            self.severity,
            ctx.location(*ctor),
            format!("Class '{class_name}' has only an empty public no-argument constructor"),
        )
        .with_suggestion(Suggestion::new(
            "Remove the constructor; the compiler generates an identical one",
        ))]
    }
}

fn is_empty_public_no_arg(ctor: Node<'_>) -> bool {
    ast::has_modifier(ctor, "public")
        && ctor
            .child_by_field_name("parameters")
            .is_some_and(|p| ast::named_children(p).is_empty())
        && ctor
            .child_by_field_name("body")
            .is_some_and(|b| ast::block_statements(b).is_empty())
}

fn annotated_with_any(decl: Node<'_>, source: &str, names: &[String]) -> bool {
    if names.is_empty() {
        return false;
    }
    let Some(mods) = ast::modifiers(decl) else {
        return false;
    };
    ast::named_children(mods)
        .into_iter()
        .filter(|c| matches!(c.kind(), "marker_annotation" | "annotation"))
        .filter_map(|a| a.child_by_field_name("name"))
        .map(|n| ast::text(n, source))
        .any(|written| {
            names.iter().any(|configured| {
                written == configured || ast::simple_name(written) == ast::simple_name(configured)
            })
        })
}
