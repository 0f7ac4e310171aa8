//! Context types for rule execution.

use std::path::{Path, PathBuf};
use tree_sitter::Node;

use crate::ast;
use crate::types::Location;

/// Context provided to rules for a single compilation unit.
///
/// Contains metadata about the file being analyzed that rules can use
/// to make context-aware decisions (e.g., skip checks in test sources).
#[derive(Debug, Clone)]
pub struct FileContext<'a> {
    /// Absolute path to the file.
    pub path: &'a Path,
    /// File contents as a string.
    pub content: &'a str,
    /// Whether this file is detected as a test source.
    pub is_test: bool,
    /// Package declared by the compilation unit, if any.
    pub package: Option<String>,
    /// Path relative to the analysis root.
    pub relative_path: PathBuf,
}

impl<'a> FileContext<'a> {
    /// Creates a new file context.
    #[must_use]
    pub fn new(path: &'a Path, content: &'a str, root: &Path) -> Self {
        let is_test = Self::detect_test_file(path);
        let relative_path = path
            .strip_prefix(root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf);

        Self {
            path,
            content,
            is_test,
            package: None,
            relative_path,
        }
    }

    /// Sets the declared package.
    #[must_use]
    pub fn with_package(mut self, package: Option<String>) -> Self {
        self.package = package;
        self
    }

    /// Detects if a file is a test source based on Maven/Gradle conventions.
    fn detect_test_file(path: &Path) -> bool {
        let components: Vec<String> = path
            .components()
            .filter_map(|c| match c {
                std::path::Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();

        if components
            .windows(2)
            .any(|w| w[0] == "src" && (w[1] == "test" || w[1] == "testFixtures"))
        {
            return true;
        }

        if let Some(stem) = path.file_stem().and_then(|n| n.to_str()) {
            if stem.ends_with("Test")
                || stem.ends_with("Tests")
                || stem.ends_with("IT")
                || (stem.starts_with("Test") && stem.len() > 4)
            {
                return true;
            }
        }

        false
    }

    /// Source text covered by a node.
    #[must_use]
    pub fn text(&self, node: Node<'_>) -> &'a str {
        ast::text(node, self.content)
    }

    /// Location of a node relative to the analysis root.
    #[must_use]
    pub fn location(&self, node: Node<'_>) -> Location {
        Location::from_node(self.relative_path.clone(), node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_test_file() {
        assert!(FileContext::detect_test_file(Path::new(
            "module/src/test/java/com/acme/Foo.java"
        )));
        assert!(FileContext::detect_test_file(Path::new("src/FooTest.java")));
        assert!(FileContext::detect_test_file(Path::new("src/FooTests.java")));
        assert!(FileContext::detect_test_file(Path::new("src/TestFoo.java")));
        assert!(!FileContext::detect_test_file(Path::new(
            "src/main/java/com/acme/Foo.java"
        )));
        assert!(!FileContext::detect_test_file(Path::new("src/Test.java")));
    }

    #[test]
    fn test_relative_path() {
        let ctx = FileContext::new(
            Path::new("/repo/src/main/java/Foo.java"),
            "",
            Path::new("/repo"),
        );
        assert_eq!(ctx.relative_path, PathBuf::from("src/main/java/Foo.java"));
    }

    #[test]
    fn location_is_relative_to_root() {
        let content = "package a;\n\nclass Foo {}\n";
        let tree = crate::parser::parse(content).unwrap();
        let ctx = FileContext::new(Path::new("/repo/a/Foo.java"), content, Path::new("/repo"));
        let class = tree.root_node().named_child(1).unwrap();

        let location = ctx.location(class);
        assert_eq!(location.file, PathBuf::from("a/Foo.java"));
        assert_eq!((location.line, location.column), (3, 1));
        assert_eq!(ctx.text(class), "class Foo {}");
    }
}
