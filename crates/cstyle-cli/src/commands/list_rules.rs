//! List rules command implementation.

use cstyle_rules::{all_rules, minimal_rules};

/// Runs the list-rules command.
pub fn run() {
    print!("{}", render());
}

fn render() -> String {
    use std::fmt::Write;

    let mut out = String::from("Available rules:\n\n");
    let _ = writeln!(out, "{:<8} {:<32} {:<8} Description", "Code", "Name", "Severity");
    let _ = writeln!(out, "{}", "-".repeat(90));
    for rule in all_rules() {
        let _ = writeln!(
            out,
            "{:<8} {:<32} {:<8} {}",
            rule.code(),
            rule.name(),
            rule.default_severity().to_string(),
            rule.description()
        );
    }

    let minimal: Vec<_> = minimal_rules().iter().map(|r| r.code()).collect();
    let _ = writeln!(out, "\nPresets:");
    let _ = writeln!(out, "  recommended  - all rules (default)");
    let _ = writeln!(out, "  minimal      - {}", minimal.join(", "));

    let _ = writeln!(out, "\nUse --rules to select rules by name or code, e.g.:");
    let _ = writeln!(out, "  cstyle check --rules forbidden-call,main-must-return");
    let _ = writeln!(out, "  cstyle check --rules CSC001,CSC004");
    out
}
