//! Lookup of built-in rules by name or code.

use jcheck_core::{Config, RuleBox, RuleConfig};
use tracing::{debug, warn};

use crate::presets::Preset;
use crate::{
    AvoidConditionInversion, AvoidHidingCauseException, AvoidNotShortCircuitOperatorsForBoolean,
    ConfusingCondition, DiamondOperatorForVariableDefinition, EmptyPublicCtorInClass,
    ForbidCCommentsInMethods, ForbidCertainImports, ForbidInstantiation,
    ForbidReturnInFinallyBlock, ForbidThrowAnonymousExceptions, ForbidWildcardAsReturnType,
    LogicConditionNeedOptimization, NoMainMethodInAbstractClass, NoNullForCollectionReturn,
    NumericLiteralNeedsUnderscore, RedundantReturn, ReturnBooleanFromTernary,
    ReturnNullInsteadOfBoolean, SingleBreakOrContinue, TernaryPerExpressionCount,
    UselessSingleCatch, UselessSuperCtorCall, WhitespaceBeforeArrayInitializer,
};

/// A built-in rule and how to construct it from configuration.
#[derive(Clone, Copy)]
pub struct RuleInfo {
    /// Rule code, e.g. `JC003`.
    pub code: &'static str,
    /// Kebab-case rule name.
    pub name: &'static str,
    build: fn(&RuleConfig) -> RuleBox,
}

impl RuleInfo {
    /// Builds the rule from its configuration block.
    #[must_use]
    pub fn build(&self, config: &RuleConfig) -> RuleBox {
        (self.build)(config)
    }

    fn matches(&self, name_or_code: &str) -> bool {
        self.name == name_or_code || self.code.eq_ignore_ascii_case(name_or_code)
    }
}

impl std::fmt::Debug for RuleInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleInfo")
            .field("code", &self.code)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

macro_rules! rule_info {
    ($module:ident, $ty:ident) => {
        RuleInfo {
            code: crate::$module::CODE,
            name: crate::$module::NAME,
            build: |config: &RuleConfig| -> RuleBox { Box::new($ty::from_config(config)) },
        }
    };
}

/// Every built-in rule, ordered by code.
pub static RULES: &[RuleInfo] = &[
    rule_info!(diamond_operator_for_variable_definition, DiamondOperatorForVariableDefinition),
    rule_info!(single_break_or_continue, SingleBreakOrContinue),
    rule_info!(useless_single_catch, UselessSingleCatch),
    rule_info!(forbid_return_in_finally_block, ForbidReturnInFinallyBlock),
    rule_info!(avoid_hiding_cause_exception, AvoidHidingCauseException),
    rule_info!(forbid_throw_anonymous_exceptions, ForbidThrowAnonymousExceptions),
    rule_info!(forbid_c_comments_in_methods, ForbidCCommentsInMethods),
    rule_info!(empty_public_ctor_in_class, EmptyPublicCtorInClass),
    rule_info!(useless_super_ctor_call, UselessSuperCtorCall),
    rule_info!(no_main_method_in_abstract_class, NoMainMethodInAbstractClass),
    rule_info!(
        avoid_not_short_circuit_operators_for_boolean,
        AvoidNotShortCircuitOperatorsForBoolean
    ),
    rule_info!(return_boolean_from_ternary, ReturnBooleanFromTernary),
    rule_info!(numeric_literal_needs_underscore, NumericLiteralNeedsUnderscore),
    rule_info!(forbid_wildcard_as_return_type, ForbidWildcardAsReturnType),
    rule_info!(confusing_condition, ConfusingCondition),
    rule_info!(ternary_per_expression_count, TernaryPerExpressionCount),
    rule_info!(forbid_certain_imports, ForbidCertainImports),
    rule_info!(redundant_return, RedundantReturn),
    rule_info!(logic_condition_need_optimization, LogicConditionNeedOptimization),
    rule_info!(avoid_condition_inversion, AvoidConditionInversion),
    rule_info!(return_null_instead_of_boolean, ReturnNullInsteadOfBoolean),
    rule_info!(forbid_instantiation, ForbidInstantiation),
    rule_info!(whitespace_before_array_initializer, WhitespaceBeforeArrayInitializer),
    rule_info!(no_null_for_collection_return, NoNullForCollectionReturn),
];

/// Finds a built-in rule by name or code.
#[must_use]
pub fn find_rule(name_or_code: &str) -> Option<&'static RuleInfo> {
    RULES.iter().find(|info| info.matches(name_or_code))
}

/// Builds a rule by name or code, applying its options when given.
#[must_use]
pub fn rule_from_config(name_or_code: &str, config: Option<&RuleConfig>) -> Option<RuleBox> {
    let default = RuleConfig::default();
    find_rule(name_or_code).map(|info| info.build(config.unwrap_or(&default)))
}

/// Names of all built-in rules, ordered by code.
#[must_use]
pub fn rule_names() -> Vec<&'static str> {
    RULES.iter().map(|info| info.name).collect()
}

/// Builds the rule set a configuration asks for.
///
/// Starts from the configured preset (`recommended` when unset), adds any
/// rule that has its own `[rules.<name>]` (or `[rules.<code>]`) table, and
/// drops rules switched off with `enabled = false`. Tables naming an
/// unknown rule are logged and ignored.
#[must_use]
pub fn rules_for_config(config: &Config) -> Vec<RuleBox> {
    let preset = match config.preset.as_deref() {
        None => Preset::Recommended,
        Some(name) => name.parse().unwrap_or_else(|e| {
            warn!(preset = name, error = %e, "Unknown preset, using recommended");
            Preset::Recommended
        }),
    };

    for name in config.rules.keys() {
        if find_rule(name).is_none() {
            warn!(rule = %name, "Configuration for unknown rule ignored");
        }
    }

    let selected = preset.codes();
    let rules: Vec<RuleBox> = RULES
        .iter()
        .filter(|info| match config_for(config, info) {
            Some(table) => table.enabled.unwrap_or(true),
            None => selected.contains(&info.code),
        })
        .map(|info| info.build(config_for(config, info).unwrap_or(&RuleConfig::default())))
        .collect();

    debug!(preset = ?preset, count = rules.len(), "Resolved rule set");
    rules
}

/// The rule's configuration table, keyed by name or by code.
fn config_for<'c>(config: &'c Config, info: &RuleInfo) -> Option<&'c RuleConfig> {
    config.rule(info.name).or_else(|| config.rule(info.code))
}
