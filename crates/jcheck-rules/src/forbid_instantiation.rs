//! Rule to forbid creating instances of selected classes.
//!
//! # Rationale
//!
//! Some classes should never be instantiated by application code. The
//! classic example is `NullPointerException`: throwing one by hand hides
//! the real problem behind the most generic error the JVM has. Use
//! `Objects.requireNonNull` or a meaningful exception instead.
//!
//! # Detected Patterns
//!
//! ```java
//! throw new NullPointerException("id");           // BAD
//! throw new java.lang.NullPointerException();     // BAD
//! ```
//!
//! Class names are resolved the way the compiler would see them: a
//! fully-qualified name is taken as written, a simple name through its
//! single-type import, or otherwise through the current package, the
//! on-demand imports and `java.lang`.
//!
//! # Configuration
//!
//! - `forbidden_classes`: fully-qualified class names (default
//!   `["java.lang.NullPointerException"]`)

use jcheck_core::{ast, FileContext, Node, Rule, RuleConfig, Severity, Violation};

/// Rule code for forbid-instantiation.
pub const CODE: &str = "JC022";

/// Rule name for forbid-instantiation.
pub const NAME: &str = "forbid-instantiation";

const DEFAULT_FORBIDDEN: &[&str] = &["java.lang.NullPointerException"];

/// Forbids `new` of configured classes.
#[derive(Debug, Clone)]
pub struct ForbidInstantiation {
    /// Custom severity.
    pub severity: Severity,
    /// Fully-qualified names of classes that must not be instantiated.
    pub forbidden_classes: Vec<String>,
}

impl Default for ForbidInstantiation {
    fn default() -> Self {
        Self::new()
    }
}

impl ForbidInstantiation {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Warning,
            forbidden_classes: DEFAULT_FORBIDDEN.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    /// Creates the rule from its configuration block.
    #[must_use]
    pub fn from_config(config: &RuleConfig) -> Self {
        let mut rule = Self::new();
        if let Some(classes) = config.get_str_list("forbidden_classes") {
            rule.forbidden_classes = classes;
        }
        rule
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Sets the forbidden classes.
    #[must_use]
    pub fn forbidden_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.forbidden_classes = classes.into_iter().map(Into::into).collect();
        self
    }

    fn is_forbidden(&self, qualified: &str) -> bool {
        self.forbidden_classes.iter().any(|c| c == qualified)
    }
}

/// Imports of a compilation unit.
#[derive(Debug, Default)]
struct Imports {
    single: Vec<String>,
    on_demand: Vec<String>,
}

impl Imports {
    fn of(root: Node<'_>, source: &str) -> Self {
        let mut imports = Self::default();
        for import in ast::children_of_kind(root, "import_declaration") {
            let is_static = ast::children(import).iter().any(|c| c.kind() == "static");
            if is_static {
                continue;
            }
            let Some(name) = ast::named_children(import)
                .into_iter()
                .find(|c| matches!(c.kind(), "identifier" | "scoped_identifier"))
                .map(|n| compact(ast::text(n, source)))
            else {
                continue;
            };
            if ast::first_child_of_kind(import, "asterisk").is_some() {
                imports.on_demand.push(name);
            } else {
                imports.single.push(name);
            }
        }
        imports
    }

    /// Fully-qualified names `simple` may refer to.
    fn candidates(&self, simple: &str, package: Option<&str>) -> Vec<String> {
        if let Some(explicit) = self
            .single
            .iter()
            .find(|i| ast::simple_name(i) == simple)
        {
            return vec![explicit.clone()];
        }
        let mut candidates = Vec::new();
        if let Some(package) = package {
            candidates.push(format!("{package}.{simple}"));
        }
        candidates.extend(self.on_demand.iter().map(|p| format!("{p}.{simple}")));
        candidates.push(format!("java.lang.{simple}"));
        candidates
    }
}

fn compact(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Class name of an instantiated type, type arguments dropped.
fn instantiated_name(ty: Node<'_>, source: &str) -> String {
    let base = if ty.kind() == "generic_type" {
        ast::named_children(ty).into_iter().next().unwrap_or(ty)
    } else {
        ty
    };
    compact(ast::text(base, source))
}

impl Rule for ForbidInstantiation {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids instantiating configured classes"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn node_kinds(&self) -> &'static [&'static str] {
        &["program"]
    }

    fn visit(&self, ctx: &FileContext, node: Node<'_>) -> Vec<Violation> {
        if self.forbidden_classes.is_empty() {
            return Vec::new();
        }
        let imports = Imports::of(node, ctx.content);

        ast::descendants(node)
            .filter(|n| n.kind() == "object_creation_expression")
            .filter_map(|creation| {
                let ty = creation.child_by_field_name("type")?;
                let class = self.resolve(&instantiated_name(ty, ctx.content), &imports, ctx)?;
                Some(Violation::new(
                    CODE,
                    NAME,
                    self.severity,
                    ctx.location(creation),
                    format!("Instantiation of '{class}' is forbidden"),
                ))
            })
            .collect()
    }
}

impl ForbidInstantiation {
    /// Fully-qualified forbidden class `name` resolves to, if any.
    fn resolve(&self, name: &str, imports: &Imports, ctx: &FileContext) -> Option<String> {
        if name.contains('.') {
            return self.is_forbidden(name).then(|| name.to_string());
        }
        imports
            .candidates(name, ctx.package.as_deref())
            .into_iter()
            .find(|c| self.is_forbidden(c))
    }
}
