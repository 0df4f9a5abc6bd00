//! The `run` command: evaluate a program and print what it logs.

use loopify_rewrite::RewriteOptions;
use loopify_rules::builtin_rules;
use loopify_syntax::print;

use super::{finish, single_path};
use crate::pipeline::{self, SourceText};
use crate::CliError;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunInvocation {
    pub path: String,
    /// Rewrite first and run the printed result.
    pub rewrite: bool,
}

pub fn parse_run_args(args: &[String]) -> Result<RunInvocation, CliError> {
    let path = single_path(args, &["--rewrite"])?;
    Ok(RunInvocation {
        path: path.to_owned(),
        rewrite: args.iter().any(|arg| arg == "--rewrite"),
    })
}

/// Lines logged by the program in `source`.
pub fn run_file(source: &SourceText, rewrite: bool) -> Result<Vec<String>, CliError> {
    let tree = source.parse()?;
    if !rewrite {
        return pipeline::run(&source.path, &tree);
    }
    let rules = builtin_rules()?;
    let outcome = pipeline::rewrite(&rules, tree, &RewriteOptions::default())?;
    let rewritten = SourceText::new(source.path.clone(), print(&outcome.tree));
    pipeline::run(&rewritten.path, &rewritten.parse()?)
}

pub fn run_run(args: &[String]) -> i32 {
    finish(run(args))
}

fn run(args: &[String]) -> Result<(), CliError> {
    let invocation = parse_run_args(args)?;
    let source = SourceText::read(&invocation.path)?;
    for line in run_file(&source, invocation.rewrite)? {
        println!("{line}");
    }
    Ok(())
}
