//! The `rules` command: list the built-in catalog.

use loopify_rewrite::RuleTable;
use loopify_rules::builtin_rules;

use super::finish;
use crate::CliError;

/// One line per rule, in resolution order: position, name and temps.
pub fn list_rules(rules: &RuleTable) -> Vec<String> {
    rules
        .iter()
        .enumerate()
        .map(|(i, rule)| {
            format!(
                "{:>2}. {:<18} temps: {}",
                i + 1,
                rule.name(),
                rule.temp_names().join(", ")
            )
        })
        .collect()
}

pub fn run_rules() -> i32 {
    finish(print_rules())
}

fn print_rules() -> Result<(), CliError> {
    for line in list_rules(&builtin_rules()?) {
        println!("{line}");
    }
    Ok(())
}
