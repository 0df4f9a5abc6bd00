//! The `check` command: report what a rewrite would do without printing it.

use loopify_rewrite::{FireCounts, RewriteOptions, RuleFailure};
use loopify_rules::builtin_rules;

use super::{finish, single_path};
use crate::diagnostics::describe_failure;
use crate::pipeline::{self, SourceText};
use crate::CliError;

/// What rewriting one file would change.
#[derive(Debug)]
pub struct CheckReport {
    pub path: String,
    pub fire_counts: FireCounts,
    pub failures: Vec<RuleFailure>,
}

impl CheckReport {
    /// Summary lines: one per rule that fired, then a total.
    pub fn lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .fire_counts
            .iter()
            .map(|(rule, count)| format!("  {rule}: {count}"))
            .collect();
        let total = self.fire_counts.total();
        let noun = if total == 1 { "chain" } else { "chains" };
        lines.push(format!("{}: {total} {noun} would be rewritten", self.path));
        lines
    }
}

pub fn check_file(source: &SourceText) -> Result<CheckReport, CliError> {
    let rules = builtin_rules()?;
    let tree = source.parse()?;
    let outcome = pipeline::rewrite(&rules, tree, &RewriteOptions::default())?;
    Ok(CheckReport {
        path: source.path.clone(),
        fire_counts: outcome.fire_counts,
        failures: outcome.failures,
    })
}

pub fn run_check(args: &[String]) -> i32 {
    finish(check(args))
}

fn check(args: &[String]) -> Result<(), CliError> {
    let path = single_path(args, &[])?;
    let report = check_file(&SourceText::read(path)?)?;
    for failure in &report.failures {
        eprintln!("{}", describe_failure(&report.path, failure));
    }
    for line in report.lines() {
        println!("{line}");
    }
    Ok(())
}
