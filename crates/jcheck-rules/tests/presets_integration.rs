//! Integration test: built-in rules selected through presets and
//! configuration, run over a small Java source tree.

use jcheck_core::{Analyzer, Config, LintResult};
use jcheck_rules::rules_for_config;
use std::fs;
use tempfile::TempDir;

const ORDER_SERVICE: &str = r#"package com.acme.orders;

import java.util.List;

public class OrderService {
    public List<Order> find(String customer) {
        if (customer == null) {
            return null;
        }
        try {
            return repository.find(customer);
        } catch (RepositoryException e) {
            throw e;
        }
    }

    public Boolean isOpen(Order order) {
        if (order == null) {
            return null;
        }
        return order.open();
    }

    void close() {
        flush();
        return;
    }
}
"#;

const LEGACY: &str = r#"package com.acme.legacy;

class Legacy {
    int compute() {
        try {
            return 1;
        } finally {
            // jcheck: allow(forbid-return-in-finally-block) reason="kept for compatibility"
            return 2;
        }
    }
}
"#;

fn project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let orders = tmp.path().join("src/main/java/com/acme/orders");
    let legacy = tmp.path().join("src/main/java/com/acme/legacy");
    fs::create_dir_all(&orders).unwrap();
    fs::create_dir_all(&legacy).unwrap();
    fs::write(orders.join("OrderService.java"), ORDER_SERVICE).unwrap();
    fs::write(legacy.join("Legacy.java"), LEGACY).unwrap();
    tmp
}

fn run(tmp: &TempDir, toml: &str) -> LintResult {
    let config = Config::parse(toml).unwrap();
    let rules = rules_for_config(&config);
    Analyzer::builder()
        .root(tmp.path())
        .config(config)
        .rules(rules)
        .build()
        .unwrap()
        .analyze()
        .unwrap()
}

fn codes_and_lines(result: &LintResult) -> Vec<(&str, usize)> {
    result
        .violations
        .iter()
        .map(|v| (v.code.as_str(), v.location.line))
        .collect()
}

#[test]
fn recommended_preset_over_project() {
    let tmp = project();
    let result = run(&tmp, "");

    assert_eq!(result.files_checked, 2);
    assert_eq!(
        codes_and_lines(&result),
        vec![("JC024", 8), ("JC003", 12), ("JC021", 19)]
    );
}

#[test]
fn minimal_preset_plus_configured_rule() {
    let tmp = project();
    let result = run(
        &tmp,
        r#"
preset = "minimal"

[rules.redundant-return]
severity = "error"
"#,
    );

    assert_eq!(codes_and_lines(&result), vec![("JC003", 12), ("JC018", 26)]);
    assert!(result.has_errors());
}

#[test]
fn disabled_rules_are_not_run() {
    let tmp = project();
    let result = run(
        &tmp,
        r#"
[rules.no-null-for-collection-return]
enabled = false

[rules.JC021]
enabled = false
"#,
    );

    let codes: Vec<&str> = result.violations.iter().map(|v| v.code.as_str()).collect();
    assert_eq!(codes, vec!["JC003"]);
}
