//! Thin wrapper around the tree-sitter Java grammar.

use tree_sitter::{Language, Parser, Tree};

use crate::ast;

/// Errors produced while turning source text into a syntax tree.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The grammar could not be loaded into the parser.
    #[error("failed to load Java grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    /// tree-sitter gave up without producing a tree.
    #[error("parser produced no syntax tree")]
    NoTree,
}

/// The tree-sitter Java language.
#[must_use]
pub fn java_language() -> Language {
    tree_sitter_java::LANGUAGE.into()
}

/// Parses a Java compilation unit.
///
/// tree-sitter is error tolerant: a tree is returned even for malformed
/// input, with `ERROR`/`MISSING` nodes marking the damage. Use
/// [`Tree::root_node`]`.has_error()` to find out.
///
/// # Errors
///
/// Returns an error if the grammar cannot be loaded or no tree is produced.
pub fn parse(source: &str) -> Result<Tree, ParseError> {
    let mut parser = Parser::new();
    parser.set_language(&java_language())?;
    parser.parse(source, None).ok_or(ParseError::NoTree)
}

/// Returns the package named by the `package` declaration, if any.
#[must_use]
pub fn package_name(tree: &Tree, source: &str) -> Option<String> {
    let root = tree.root_node();
    let decl = ast::first_child_of_kind(root, "package_declaration")?;
    ast::named_children(decl)
        .into_iter()
        .find(|n| matches!(n.kind(), "scoped_identifier" | "identifier"))
        .map(|n| ast::text(n, source).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_class() {
        let tree = parse("class Foo { void bar() {} }").unwrap();
        let root = tree.root_node();
        assert_eq!(root.kind(), "program");
        assert!(!root.has_error());
    }

    #[test]
    fn reports_damaged_input() {
        let tree = parse("class Foo { void bar( }").unwrap();
        assert!(tree.root_node().has_error());
    }

    #[test]
    fn extracts_package() {
        let src = "package com.acme.billing;\n\nclass Invoice {}\n";
        let tree = parse(src).unwrap();
        assert_eq!(package_name(&tree, src).as_deref(), Some("com.acme.billing"));
    }

    #[test]
    fn default_package_is_none() {
        let src = "class Invoice {}\n";
        let tree = parse(src).unwrap();
        assert!(package_name(&tree, src).is_none());
    }
}
