use super::*;
use loopify_rewrite::RewriteError;
use loopify_syntax::parse_source;
use pretty_assertions::assert_eq;

fn render(path: &str, text: &str) -> String {
    let errors = parse_source(text).errors;
    assert!(!errors.is_empty(), "`{text}` should not parse");
    let mut out = Vec::new();
    write_parse_errors(&mut out, path, text, &errors, false).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn label_range_keeps_valid_spans() {
    assert_eq!(label_range(Span::new(2, 5), 10), 2..5);
}

#[test]
fn label_range_widens_empty_spans() {
    assert_eq!(label_range(Span::new(4, 4), 10), 4..5);
}

#[test]
fn label_range_clamps_to_text() {
    assert_eq!(label_range(Span::new(10, 10), 10), 9..10);
    assert_eq!(label_range(Span::new(3, 40), 10), 3..10);
}

#[test]
fn parse_errors_render_with_path_and_message() {
    let text = "const a = ;\n";
    let rendered = render("broken.js", text);
    assert!(rendered.contains("syntax error"), "{rendered}");
    assert!(rendered.contains("broken.js"), "{rendered}");
    let message = &parse_source(text).errors[0].message;
    assert!(rendered.contains(message.as_str()), "{rendered}");
}

#[test]
fn uncolored_output_has_no_escapes() {
    let rendered = render("broken.js", "let = 1;\n");
    assert!(!rendered.contains('\u{1b}'), "{rendered}");
}

#[test]
fn mismatch_names_the_first_differing_line() {
    let expected = vec!["1".to_owned(), "2".to_owned()];
    let actual = vec!["1".to_owned(), "3".to_owned()];
    assert_eq!(
        describe_mismatch(&expected, &actual),
        "  first difference at line 2\n  original:  2\n  rewritten: 3"
    );
}

#[test]
fn mismatch_reports_missing_lines() {
    let expected = vec!["1".to_owned()];
    assert_eq!(
        describe_mismatch(&expected, &[]),
        "  first difference at line 1\n  original:  1\n  rewritten: <nothing>"
    );
}

#[test]
fn failures_name_rule_and_span() {
    let failure = RuleFailure {
        rule: "map".to_owned(),
        span: Span::new(10, 24),
        error: RewriteError::TemplateParse {
            message: "unexpected `)`".to_owned(),
        },
    };
    let line = describe_failure("a.js", &failure);
    assert!(line.starts_with("warning: a.js:10..24: rule `map` did not apply: "), "{line}");
}
