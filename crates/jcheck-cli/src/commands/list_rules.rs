//! List rules command implementation.

use jcheck_core::RuleConfig;
use jcheck_rules::{Preset, RULES};

/// Runs the list-rules command.
pub fn run() {
    let recommended = Preset::Recommended.codes();
    let minimal = Preset::Minimal.codes();

    println!("Available rules:\n");
    println!("{:<7} {:<46} {:<8} Description", "Code", "Name", "Preset");
    println!("{}", "-".repeat(120));

    for info in RULES {
        let rule = info.build(&RuleConfig::default());
        let preset = if minimal.contains(&info.code) {
            "minimal"
        } else if recommended.contains(&info.code) {
            "recomm."
        } else {
            "strict"
        };
        println!(
            "{:<7} {:<46} {:<8} {}",
            info.code,
            info.name,
            preset,
            rule.description()
        );
    }

    println!("\nPresets:");
    println!("  minimal      - {}", minimal.join(", "));
    println!("  recommended  - minimal + the rules marked recomm. (default)");
    println!("  strict, all  - every rule");

    println!("\nUse --rules to filter specific rules, e.g.:");
    println!("  jcheck check --rules redundant-return,useless-single-catch");
    println!("  jcheck check --rules JC003,JC018");
}
