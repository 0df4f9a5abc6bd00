//! Terminal rendering of CLI errors.
//!
//! Syntax errors are drawn against their source with `ariadne`; everything
//! else is a single `error:` line.

use std::io::{self, Write};
use std::ops::Range;

use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};
use loopify_ir::Span;
use loopify_rewrite::RuleFailure;
use loopify_syntax::ParseError;

use crate::CliError;

/// Byte range for `span` that ariadne can label: non-empty and, when the
/// text allows it, inside `len`.
pub fn label_range(span: Span, len: usize) -> Range<usize> {
    let range = span.to_range();
    let start = range.start.min(len.saturating_sub(1));
    let end = range.end.min(len).max(start + 1);
    start..end
}

/// Draw every error of one file into `out`.
pub fn write_parse_errors(
    out: &mut impl Write,
    path: &str,
    text: &str,
    errors: &[ParseError],
    color: bool,
) -> io::Result<()> {
    let config = Config::default()
        .with_color(color)
        .with_index_type(IndexType::Byte);
    for error in errors {
        let range = label_range(error.span, text.len());
        let mut report = Report::build(ReportKind::Error, (path, range.clone()))
            .with_config(config)
            .with_message("syntax error")
            .with_label(
                Label::new((path, range))
                    .with_message(&error.message)
                    .with_color(Color::Red),
            );
        if let Some(context) = error.context {
            report = report.with_note(format!("while parsing {context}"));
        }
        report.finish().write((path, Source::from(text)), &mut *out)?;
    }
    Ok(())
}

/// Print `error` to stderr.
pub fn report(error: &CliError) {
    let color = io::IsTerminal::is_terminal(&io::stderr());
    match error {
        CliError::Parse { path, text, errors } => {
            let mut stderr = io::stderr().lock();
            if write_parse_errors(&mut stderr, path, text, errors, color).is_err() {
                eprintln!("error: {error}");
            }
        }
        CliError::Mismatch {
            expected, actual, ..
        } => {
            eprintln!("error: {error}");
            eprintln!("{}", describe_mismatch(expected, actual));
        }
        _ => eprintln!("error: {error}"),
    }
}

/// Line-by-line account of where two logs part ways.
pub fn describe_mismatch(expected: &[String], actual: &[String]) -> String {
    let first = expected
        .iter()
        .zip(actual)
        .position(|(e, a)| e != a)
        .unwrap_or_else(|| expected.len().min(actual.len()));
    let line = |lines: &[String]| {
        lines
            .get(first)
            .map_or_else(|| "<nothing>".to_owned(), Clone::clone)
    };
    format!(
        "  first difference at line {}\n  original:  {}\n  rewritten: {}",
        first + 1,
        line(expected),
        line(actual)
    )
}

/// `warning:` line for a rule that matched but did not apply.
pub fn describe_failure(path: &str, failure: &RuleFailure) -> String {
    format!(
        "warning: {path}:{}: rule `{}` did not apply: {}",
        failure.span, failure.rule, failure.error
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
