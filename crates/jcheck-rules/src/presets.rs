//! Rule presets for common configurations.

use std::str::FromStr;

use jcheck_core::{RuleBox, RuleConfig};

use crate::registry::RULES;

const MINIMAL: &[&str] = &["JC003", "JC004", "JC005"];

const RECOMMENDED: &[&str] = &[
    "JC001", "JC002", "JC003", "JC004", "JC005", "JC006", "JC007", "JC009", "JC010", "JC011",
    "JC012", "JC021", "JC024",
];

/// Preset configurations for jcheck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Bug-prone exception handling only, for gradual adoption.
    Minimal,
    /// Rules with few false positives and sensible defaults.
    Recommended,
    /// Every rule with its default options.
    Strict,
    /// Every rule.
    All,
}

impl Preset {
    /// Codes of the rules in this preset, ordered by code.
    #[must_use]
    pub fn codes(self) -> Vec<&'static str> {
        match self {
            Self::Minimal => MINIMAL.to_vec(),
            Self::Recommended => RECOMMENDED.to_vec(),
            Self::Strict | Self::All => RULES.iter().map(|info| info.code).collect(),
        }
    }

    /// Returns the rules for this preset, built with default options.
    #[must_use]
    pub fn rules(self) -> Vec<RuleBox> {
        let codes = self.codes();
        let defaults = RuleConfig::default();
        RULES
            .iter()
            .filter(|info| codes.contains(&info.code))
            .map(|info| info.build(&defaults))
            .collect()
    }

    /// Lowercase preset name as used in configuration files.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Minimal => "minimal",
            Self::Recommended => "recommended",
            Self::Strict => "strict",
            Self::All => "all",
        }
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "minimal" => Ok(Self::Minimal),
            "recommended" => Ok(Self::Recommended),
            "strict" => Ok(Self::Strict),
            "all" => Ok(Self::All),
            other => Err(format!(
                "unknown preset '{other}' (expected minimal, recommended, strict or all)"
            )),
        }
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the recommended set of rules.
///
/// The minimal set plus checks on generics, loops, comments, constructors,
/// boolean operators and `null` returns.
#[must_use]
pub fn recommended_rules() -> Vec<RuleBox> {
    Preset::Recommended.rules()
}

/// Returns the strict set of rules.
#[must_use]
pub fn strict_rules() -> Vec<RuleBox> {
    Preset::Strict.rules()
}

/// Returns the minimal set of rules.
///
/// For gradual adoption, only includes:
/// - `useless-single-catch` (JC003)
/// - `forbid-return-in-finally-block` (JC004)
/// - `avoid-hiding-cause-exception` (JC005)
#[must_use]
pub fn minimal_rules() -> Vec<RuleBox> {
    Preset::Minimal.rules()
}

/// Returns all available rules.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    Preset::All.rules()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_rules() {
        assert_eq!(minimal_rules().len(), 3);
        assert_eq!(recommended_rules().len(), 13);
        assert_eq!(all_rules().len(), RULES.len());
        assert_eq!(strict_rules().len(), RULES.len());
    }

    #[test]
    fn recommended_contains_minimal() {
        let recommended = Preset::Recommended.codes();
        assert!(Preset::Minimal
            .codes()
            .iter()
            .all(|code| recommended.contains(code)));
    }

    #[test]
    fn preset_names_round_trip() {
        for preset in [Preset::Minimal, Preset::Recommended, Preset::Strict, Preset::All] {
            assert_eq!(preset.as_str().parse::<Preset>(), Ok(preset));
        }
        assert!("lenient".parse::<Preset>().is_err());
    }
}
