//! Shared output formatting for check results.

use anyhow::Result;
use jcheck_core::{LintResult, ViolationDiagnostic};
use miette::{NamedSource, Report};
use std::path::Path;

use crate::OutputFormat;

/// Print check results in the specified format.
pub fn print(result: &LintResult, format: OutputFormat, root: &Path) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(result),
        OutputFormat::Json => return print_json(result),
        OutputFormat::Compact => print_compact(result),
        OutputFormat::Pretty => print_pretty(result, root),
    }
    Ok(())
}

fn print_text(result: &LintResult) {
    for violation in &result.violations {
        println!("{}", violation.format());
    }

    print_parse_errors(result);

    let (errors, warnings, _) = result.count_by_severity();
    let summary_color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };
    println!("{}{}\x1b[0m", summary_color, result.summary());
}

fn print_json(result: &LintResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

fn print_compact(result: &LintResult) {
    for violation in &result.violations {
        println!("{violation}");
    }
}

fn print_pretty(result: &LintResult, root: &Path) {
    for violation in &result.violations {
        let file = &violation.location.file;
        let diagnostic = ViolationDiagnostic::from(violation);
        match std::fs::read_to_string(root.join(file)) {
            Ok(content) => {
                let source = NamedSource::new(file.display().to_string(), content);
                eprintln!("{:?}", Report::new(diagnostic).with_source_code(source));
            }
            Err(e) => {
                tracing::debug!("Cannot read {} for rendering: {}", file.display(), e);
                eprintln!("{:?}", Report::new(diagnostic));
            }
        }
    }

    print_parse_errors(result);
    println!("{}", result.summary());
}

fn print_parse_errors(result: &LintResult) {
    for path in &result.parse_errors {
        println!("skipped (syntax error): {}", path.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jcheck_core::{Location, Severity, Violation};
    use std::path::PathBuf;

    #[test]
    fn compact_format_is_violation_display() {
        let violation = Violation::new(
            "JC018",
            "redundant-return",
            Severity::Warning,
            Location::new(PathBuf::from("src/main/java/Foo.java"), 12, 9),
            "Redundant return statement",
        );
        insta::assert_snapshot!(
            violation.to_string(),
            @"src/main/java/Foo.java:12:9: warning [JC018] Redundant return statement"
        );
    }
}
