//! Command handlers for the `loopify` CLI.
//!
//! Each handler takes the arguments after its subcommand name, prints its
//! results, reports errors through [`crate::diagnostics`], and returns the
//! process exit code.

mod check;
mod rewrite;
mod rules;
mod run;

pub use check::{check_file, run_check, CheckReport};
pub use rewrite::{
    parse_rewrite_args, rewrite_file, rewrite_files, run_rewrite, FileRewrite, RewriteInvocation,
};
pub use rules::{list_rules, run_rules};
pub use run::{parse_run_args, run_file, run_run, RunInvocation};

use crate::diagnostics;
use crate::CliError;

/// Exit code for success.
pub const EXIT_OK: i32 = 0;
/// Exit code for any reported error.
pub const EXIT_FAILURE: i32 = 1;

/// Report `result`'s error, if any, and turn it into an exit code.
fn finish(result: Result<(), CliError>) -> i32 {
    match result {
        Ok(()) => EXIT_OK,
        Err(error) => {
            diagnostics::report(&error);
            EXIT_FAILURE
        }
    }
}

/// The only path in `args`; options are rejected unless `allowed` names them.
fn single_path<'a>(args: &'a [String], allowed: &[&str]) -> Result<&'a str, CliError> {
    let mut path = None;
    for arg in args {
        if arg.starts_with('-') {
            if !allowed.contains(&arg.as_str()) {
                return Err(CliError::Usage(format!("unknown option `{arg}`")));
            }
        } else if path.replace(arg.as_str()).is_some() {
            return Err(CliError::Usage("expected exactly one file".to_owned()));
        }
    }
    path.ok_or_else(|| CliError::Usage("missing file path".to_owned()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
