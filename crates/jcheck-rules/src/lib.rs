//! # jcheck-rules
//!
//! Built-in Java checks for jcheck.
//!
//! Every check is a [`Rule`] that subscribes to a handful of tree-sitter
//! node kinds and inspects one node at a time. Checks are configured from
//! their `[rules.<name>]` table through `from_config`, or in code through
//! builder methods.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | JC001 | `diamond-operator-for-variable-definition` | Type arguments repeated on `new` |
//! | JC002 | `single-break-or-continue` | More than one `break`/`continue` per loop |
//! | JC003 | `useless-single-catch` | Lone catch that only rethrows |
//! | JC004 | `forbid-return-in-finally-block` | `return` inside `finally` |
//! | JC005 | `avoid-hiding-cause-exception` | Rethrow that drops the caught exception |
//! | JC006 | `forbid-throw-anonymous-exceptions` | Throwing anonymous exception classes |
//! | JC007 | `forbid-c-comments-in-methods` | `/* */` comments in method bodies |
//! | JC008 | `empty-public-ctor-in-class` | Sole empty public constructor |
//! | JC009 | `useless-super-ctor-call` | `super()` with nothing to initialize |
//! | JC010 | `no-main-method-in-abstract-class` | `main` in abstract classes |
//! | JC011 | `avoid-not-short-circuit-operators-for-boolean` | `&`/`|` on booleans |
//! | JC012 | `return-boolean-from-ternary` | Ternary with a boolean literal branch |
//! | JC013 | `numeric-literal-needs-underscore` | Long literals without `_` groups |
//! | JC014 | `forbid-wildcard-as-return-type` | Wildcards in return types |
//! | JC015 | `confusing-condition` | Negated `if` with an `else` |
//! | JC016 | `ternary-per-expression-count` | Too many ternaries in one expression |
//! | JC017 | `forbid-certain-imports` | Configured imports in configured packages |
//! | JC018 | `redundant-return` | `return;` at the end of a void body |
//! | JC019 | `logic-condition-need-optimization` | Method call before a plain operand |
//! | JC020 | `avoid-condition-inversion` | `!(a < b)` in a condition |
//! | JC021 | `return-null-instead-of-boolean` | `return null` from `Boolean` methods |
//! | JC022 | `forbid-instantiation` | `new` of configured classes |
//! | JC023 | `whitespace-before-array-initializer` | `{` glued to `]` or `=` |
//! | JC024 | `no-null-for-collection-return` | `return null` for collections or arrays |
//!
//! ## Usage
//!
//! ```ignore
//! use jcheck_core::Analyzer;
//! use jcheck_rules::{RedundantReturn, UselessSingleCatch};
//!
//! let analyzer = Analyzer::builder()
//!     .root("./src/main/java")
//!     .rule(UselessSingleCatch::new())
//!     .rule(RedundantReturn::new().allow_in_empty_bodies(true))
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod avoid_condition_inversion;
mod avoid_hiding_cause_exception;
mod avoid_not_short_circuit_operators_for_boolean;
mod confusing_condition;
mod diamond_operator_for_variable_definition;
mod empty_public_ctor_in_class;
mod forbid_c_comments_in_methods;
mod forbid_certain_imports;
mod forbid_instantiation;
mod forbid_return_in_finally_block;
mod forbid_throw_anonymous_exceptions;
mod forbid_wildcard_as_return_type;
mod logic_condition_need_optimization;
mod no_main_method_in_abstract_class;
mod no_null_for_collection_return;
mod numeric_literal_needs_underscore;
mod presets;
mod redundant_return;
mod registry;
mod return_boolean_from_ternary;
mod return_null_instead_of_boolean;
mod single_break_or_continue;
mod ternary_per_expression_count;
mod useless_single_catch;
mod useless_super_ctor_call;
mod whitespace_before_array_initializer;

pub use avoid_condition_inversion::AvoidConditionInversion;
pub use avoid_hiding_cause_exception::AvoidHidingCauseException;
pub use avoid_not_short_circuit_operators_for_boolean::AvoidNotShortCircuitOperatorsForBoolean;
pub use confusing_condition::ConfusingCondition;
pub use diamond_operator_for_variable_definition::DiamondOperatorForVariableDefinition;
pub use empty_public_ctor_in_class::EmptyPublicCtorInClass;
pub use forbid_c_comments_in_methods::ForbidCCommentsInMethods;
pub use forbid_certain_imports::ForbidCertainImports;
pub use forbid_instantiation::ForbidInstantiation;
pub use forbid_return_in_finally_block::ForbidReturnInFinallyBlock;
pub use forbid_throw_anonymous_exceptions::ForbidThrowAnonymousExceptions;
pub use forbid_wildcard_as_return_type::ForbidWildcardAsReturnType;
pub use logic_condition_need_optimization::LogicConditionNeedOptimization;
pub use no_main_method_in_abstract_class::NoMainMethodInAbstractClass;
pub use no_null_for_collection_return::NoNullForCollectionReturn;
pub use numeric_literal_needs_underscore::{Grouping, NumericLiteralNeedsUnderscore};
pub use presets::{all_rules, minimal_rules, recommended_rules, strict_rules, Preset};
pub use redundant_return::RedundantReturn;
pub use registry::{find_rule, rule_from_config, rule_names, rules_for_config, RuleInfo, RULES};
pub use return_boolean_from_ternary::ReturnBooleanFromTernary;
pub use return_null_instead_of_boolean::ReturnNullInsteadOfBoolean;
pub use single_break_or_continue::SingleBreakOrContinue;
pub use ternary_per_expression_count::TernaryPerExpressionCount;
pub use useless_single_catch::UselessSingleCatch;
pub use useless_super_ctor_call::UselessSuperCtorCall;
pub use whitespace_before_array_initializer::WhitespaceBeforeArrayInitializer;

/// Re-export core types for convenience.
pub use jcheck_core::{Rule, RuleBox, Severity, Violation};

#[cfg(test)]
pub(crate) mod test_support {
    use jcheck_core::{parser, walker, FileContext, Rule, Violation};
    use std::path::Path;

    /// Runs a single rule over a Java snippet compiled as `Sample.java`.
    pub fn check(rule: &dyn Rule, source: &str) -> Vec<Violation> {
        let tree = parser::parse(source).expect("parser should produce a tree");
        assert!(
            !tree.root_node().has_error(),
            "test source does not parse cleanly:\n{source}"
        );
        let path = Path::new("Sample.java");
        let ctx = FileContext::new(path, source, Path::new(""))
            .with_package(parser::package_name(&tree, source));
        walker::walk(&ctx, tree.root_node(), [rule])
    }
}
