//! # jcheck-core
//!
//! Core framework for Java static checks over a tree-sitter syntax tree.
//!
//! This crate provides the foundational pieces the checks in `jcheck-rules`
//! are written against:
//!
//! - [`Rule`] trait: a check declares the node kinds it cares about and
//!   inspects one node at a time
//! - [`walker`]: single-pass visitor dispatch from node kind to rules
//! - [`ast`]: traversal, sibling/parent scans, range containment and
//!   structural equality helpers
//! - [`Analyzer`] for discovering, parsing and checking `*.java` files
//! - [`Violation`] for representing findings
//!
//! ## Example
//!
//! ```ignore
//! use jcheck_core::Analyzer;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./src/main/java")
//!     .rule(MyRule::new())
//!     .build()?;
//!
//! let result = analyzer.analyze()?;
//! println!("{}", result.summary());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
pub mod ast;
mod config;
mod context;
pub mod parser;
mod rule;
mod types;
pub mod walker;

/// Utility modules for rule implementations.
pub mod utils;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig, DOC_REF_OPTION};
pub use context::FileContext;
pub use rule::{Rule, RuleBox};
pub use types::{
    Label, LintResult, Location, Replacement, Severity, Suggestion, Violation,
    ViolationDiagnostic,
};
pub use utils::allowance::{AllowCheck, AllowIndex};

/// Re-export of the syntax tree types rules are written against.
pub use tree_sitter::{Node, Tree};
