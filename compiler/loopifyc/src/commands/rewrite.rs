//! The `rewrite` command: rewrite files and print or write the result.

use std::path::{Path, PathBuf};

use loopify_rewrite::{FireCounts, RewriteOptions, RuleFailure, RuleTable};
use loopify_rules::builtin_rules;
use loopify_syntax::print;
use rayon::prelude::*;
use tracing::debug;

use super::{finish, EXIT_FAILURE, EXIT_OK};
use crate::diagnostics::{self, describe_failure};
use crate::pipeline::{self, is_valid_temp_prefix, SourceText};
use crate::CliError;

/// Parsed `rewrite` arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RewriteInvocation {
    pub files: Vec<String>,
    pub options: RewriteOptions,
    /// Print per-rule fire counts and rule failures to stderr.
    pub stats: bool,
    /// Run original and rewrite and require identical output.
    pub check: bool,
    pub parallel: bool,
    /// Output file, or directory when several files are given.
    pub output: Option<PathBuf>,
}

impl Default for RewriteInvocation {
    fn default() -> Self {
        RewriteInvocation {
            files: Vec::new(),
            options: RewriteOptions::default(),
            stats: false,
            check: false,
            parallel: true,
            output: None,
        }
    }
}

pub fn parse_rewrite_args(args: &[String]) -> Result<RewriteInvocation, CliError> {
    let mut invocation = RewriteInvocation::default();
    let mut i = 0;
    while i < args.len() {
        let arg = &args[i];
        if arg == "-o" {
            let Some(path) = args.get(i + 1) else {
                return Err(CliError::Usage("`-o` needs a path".to_owned()));
            };
            invocation.output = Some(PathBuf::from(path));
            i += 2;
            continue;
        }
        if let Some(prefix) = arg.strip_prefix("--temp-prefix=") {
            if !is_valid_temp_prefix(prefix) {
                return Err(CliError::Usage(format!(
                    "`{prefix}` cannot start an identifier"
                )));
            }
            prefix.clone_into(&mut invocation.options.temp_prefix);
        } else if arg == "--stats" {
            invocation.stats = true;
        } else if arg == "--check" {
            invocation.check = true;
        } else if arg == "--no-parallel" {
            invocation.parallel = false;
        } else if arg == "--no-reserve" {
            invocation.options.reserve_input_names = false;
        } else if arg.starts_with('-') {
            return Err(CliError::Usage(format!("unknown option `{arg}`")));
        } else {
            invocation.files.push(arg.clone());
        }
        i += 1;
    }
    if invocation.files.is_empty() {
        return Err(CliError::Usage("no input files".to_owned()));
    }
    Ok(invocation)
}

/// One rewritten file.
#[derive(Clone, Debug)]
pub struct FileRewrite {
    pub path: String,
    pub printed: String,
    pub fire_counts: FireCounts,
    pub failures: Vec<RuleFailure>,
    /// Lines logged by both versions, when `--check` ran them.
    pub verified: Option<Vec<String>>,
}

pub fn rewrite_file(
    rules: &RuleTable,
    source: &SourceText,
    invocation: &RewriteInvocation,
) -> Result<FileRewrite, CliError> {
    let tree = source.parse()?;
    let outcome = pipeline::rewrite(rules, tree.clone(), &invocation.options)?;
    let printed = print(&outcome.tree);
    let verified = if invocation.check {
        Some(pipeline::verify(&source.path, &tree, &printed)?)
    } else {
        None
    };
    Ok(FileRewrite {
        path: source.path.clone(),
        printed,
        fire_counts: outcome.fire_counts,
        failures: outcome.failures,
        verified,
    })
}

/// Rewrite every file of `invocation`, in parallel unless disabled.
///
/// Results come back in input order; one file failing does not stop the
/// others.
pub fn rewrite_files(
    invocation: &RewriteInvocation,
) -> Result<Vec<Result<FileRewrite, CliError>>, CliError> {
    let rules = builtin_rules()?;
    let rewrite_one = |path: &String| -> Result<FileRewrite, CliError> {
        let source = SourceText::read(path)?;
        rewrite_file(&rules, &source, invocation)
    };
    let results = if invocation.parallel && invocation.files.len() > 1 {
        invocation.files.par_iter().map(rewrite_one).collect()
    } else {
        invocation.files.iter().map(rewrite_one).collect()
    };
    Ok(results)
}

pub fn run_rewrite(args: &[String]) -> i32 {
    let invocation = match parse_rewrite_args(args) {
        Ok(invocation) => invocation,
        Err(error) => return finish(Err(error)),
    };
    let results = match rewrite_files(&invocation) {
        Ok(results) => results,
        Err(error) => return finish(Err(error)),
    };

    let several = invocation.files.len() > 1;
    let mut total = FireCounts::default();
    let mut code = EXIT_OK;
    for result in results {
        let rewritten = match result {
            Ok(rewritten) => rewritten,
            Err(error) => {
                diagnostics::report(&error);
                code = EXIT_FAILURE;
                continue;
            }
        };
        if invocation.stats {
            print_stats(&rewritten);
        }
        if let Err(error) = emit(&rewritten, invocation.output.as_deref(), several) {
            diagnostics::report(&error);
            code = EXIT_FAILURE;
        }
        total.merge(&rewritten.fire_counts);
    }
    if invocation.stats && several {
        eprintln!("total: {} ({} rewrites)", total, total.total());
    }
    code
}

fn print_stats(rewritten: &FileRewrite) {
    for failure in &rewritten.failures {
        eprintln!("{}", describe_failure(&rewritten.path, failure));
    }
    let counts = &rewritten.fire_counts;
    if counts.is_empty() {
        eprintln!("{}: no rewrites", rewritten.path);
    } else {
        eprintln!("{}: {counts} ({} rewrites)", rewritten.path, counts.total());
    }
    if let Some(lines) = &rewritten.verified {
        eprintln!("{}: output unchanged ({} lines)", rewritten.path, lines.len());
    }
}

/// Write the rewrite to stdout or to `output`.
fn emit(rewritten: &FileRewrite, output: Option<&Path>, several: bool) -> Result<(), CliError> {
    let Some(output) = output else {
        if several {
            println!("// {}", rewritten.path);
        }
        print!("{}", rewritten.printed);
        return Ok(());
    };
    let target = if several {
        std::fs::create_dir_all(output).map_err(|source| CliError::Write {
            path: output.display().to_string(),
            source,
        })?;
        let name = Path::new(&rewritten.path)
            .file_name()
            .map_or_else(|| PathBuf::from(&rewritten.path), PathBuf::from);
        output.join(name)
    } else {
        output.to_path_buf()
    };
    debug!(path = %target.display(), "writing rewrite");
    std::fs::write(&target, &rewritten.printed).map_err(|source| CliError::Write {
        path: target.display().to_string(),
        source,
    })
}
