//! Rule to forbid returning `null` where a collection or array is expected.
//!
//! # Rationale
//!
//! Callers iterate over returned collections without checking for `null`.
//! An empty collection or array expresses "nothing" just as well and
//! cannot blow up.
//!
//! # Detected Patterns
//!
//! ```java
//! List<User> find(String name) {
//!     if (name.isEmpty()) {
//!         return null;                       // BAD
//!     }
//!     return repository.find(name);
//! }
//!
//! int[] ids() {
//!     return null;                           // BAD: return new int[0]
//! }
//! ```
//!
//! # Configuration
//!
//! - `collection_list`: simple names of collection types (defaults to the
//!   common `java.util` interfaces and implementations)
//! - `search_through_method_body`: also report returning a local variable
//!   whose every assignment is `null` (default `false`)

use jcheck_core::{ast, FileContext, Node, Rule, RuleConfig, Severity, Suggestion, Violation};

/// Rule code for no-null-for-collection-return.
pub const CODE: &str = "JC024";

/// Rule name for no-null-for-collection-return.
pub const NAME: &str = "no-null-for-collection-return";

const DEFAULT_COLLECTIONS: &[&str] = &[
    "Collection",
    "List",
    "ArrayList",
    "LinkedList",
    "Stack",
    "Vector",
    "Set",
    "HashSet",
    "TreeSet",
    "LinkedHashSet",
    "Map",
    "HashMap",
    "TreeMap",
    "LinkedHashMap",
    "Queue",
    "Deque",
    "Iterable",
];

/// Returns inside these belong to another callable.
const NESTED_CALLABLES: &[&str] = &["lambda_expression", "class_body"];

/// Forbids `return null` from methods returning collections or arrays.
#[derive(Debug, Clone)]
pub struct NoNullForCollectionReturn {
    /// Custom severity.
    pub severity: Severity,
    /// Simple names of types treated as collections.
    pub collections: Vec<String>,
    /// Follow returned local variables to their assignments.
    pub search_through_method_body: bool,
}

impl Default for NoNullForCollectionReturn {
    fn default() -> Self {
        Self::new()
    }
}

impl NoNullForCollectionReturn {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Warning,
            collections: DEFAULT_COLLECTIONS.iter().map(|s| (*s).to_string()).collect(),
            search_through_method_body: false,
        }
    }

    /// Creates the rule from its configuration block.
    #[must_use]
    pub fn from_config(config: &RuleConfig) -> Self {
        let mut rule = Self::new();
        if let Some(collections) = config.get_str_list("collection_list") {
            rule.collections = collections;
        }
        rule.search_through_method_body = config.get_bool("search_through_method_body", false);
        rule
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Sets whether returned variables are traced to their assignments.
    #[must_use]
    pub fn search_through_method_body(mut self, search: bool) -> Self {
        self.search_through_method_body = search;
        self
    }

    fn returns_collection(&self, method: Node<'_>, source: &str) -> bool {
        if method.child_by_field_name("dimensions").is_some() {
            return true;
        }
        let Some(ty) = method.child_by_field_name("type") else {
            return false;
        };
        if ty.kind() == "array_type" {
            return true;
        }
        let name = ast::type_simple_name(ty, source);
        self.collections.iter().any(|c| c == name)
    }

    fn returns_null(&self, ret: Node<'_>, body: Node<'_>, source: &str) -> bool {
        let Some(value) = ast::named_children(ret).into_iter().next().map(ast::unwrap_parens)
        else {
            return false;
        };
        match value.kind() {
            "null_literal" => true,
            "identifier" if self.search_through_method_body => {
                only_null_assigned(body, ast::text(value, source), source)
            }
            _ => false,
        }
    }
}

/// Whether the local `name` is declared in `body` and every value it is
/// given there is `null`.
fn only_null_assigned(body: Node<'_>, name: &str, source: &str) -> bool {
    let mut values = Vec::new();
    for node in ast::descendants_pruned(body, NESTED_CALLABLES) {
        match node.kind() {
            "variable_declarator" if ast::name_of(node, source) == Some(name) => {
                if let Some(value) = node.child_by_field_name("value") {
                    values.push(value);
                }
            }
            "assignment_expression" => {
                let target = node.child_by_field_name("left");
                if target.is_some_and(|t| t.kind() == "identifier" && ast::text(t, source) == name)
                {
                    if let Some(value) = node.child_by_field_name("right") {
                        values.push(value);
                    }
                }
            }
            _ => {}
        }
    }
    !values.is_empty()
        && values
            .into_iter()
            .all(|v| ast::unwrap_parens(v).kind() == "null_literal")
}

impl Rule for NoNullForCollectionReturn {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids returning null from methods returning a collection or array"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn node_kinds(&self) -> &'static [&'static str] {
        &["method_declaration"]
    }

    fn visit(&self, ctx: &FileContext, node: Node<'_>) -> Vec<Violation> {
        let source = ctx.content;
        let Some(body) = node.child_by_field_name("body") else {
            return Vec::new();
        };
        if !self.returns_collection(node, source) {
            return Vec::new();
        }

        ast::descendants_pruned(body, NESTED_CALLABLES)
            .filter(|n| n.kind() == "return_statement")
            .filter(|ret| self.returns_null(*ret, body, source))
            .map(|ret| {
                Violation::new(
                    CODE,
                    NAME,
                    self.severity,
                    ctx.location(ret),
                    "Method returning a collection or array must not return null",
                )
                .with_suggestion(Suggestion::new(
                    "Return an empty collection or array instead",
                ))
            })
            .collect()
    }
}
