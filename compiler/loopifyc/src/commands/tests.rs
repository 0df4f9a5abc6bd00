use super::*;
use crate::pipeline::SourceText;
use loopify_rules::builtin_rules;
use pretty_assertions::assert_eq;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|&arg| arg.to_owned()).collect()
}

const PROGRAM: &str = "\
const nums = [1, 2, 3, 4];
const doubled = nums.map(n => n * 2);
const total = nums.filter(n => n % 2 === 0).reduce((acc, n) => acc + n, 0);
console.log(doubled, total);
";

#[test]
fn rewrite_args_defaults() {
    let invocation = parse_rewrite_args(&args(&["a.js"])).unwrap();
    assert_eq!(invocation.files, vec!["a.js".to_owned()]);
    assert!(invocation.parallel);
    assert!(!invocation.stats);
    assert!(!invocation.check);
    assert_eq!(invocation.output, None);
    assert_eq!(invocation.options.temp_prefix, "_");
}

#[test]
fn rewrite_args_flags_anywhere() {
    let invocation = parse_rewrite_args(&args(&[
        "--stats",
        "a.js",
        "--temp-prefix=tmp",
        "-o",
        "out",
        "b.js",
        "--no-parallel",
        "--check",
        "--no-reserve",
    ]))
    .unwrap();
    assert_eq!(invocation.files, vec!["a.js".to_owned(), "b.js".to_owned()]);
    assert!(invocation.stats);
    assert!(invocation.check);
    assert!(!invocation.parallel);
    assert!(!invocation.options.reserve_input_names);
    assert_eq!(invocation.options.temp_prefix, "tmp");
    assert_eq!(invocation.output, Some(std::path::PathBuf::from("out")));
}

#[test]
fn rewrite_args_rejects_bad_input() {
    for bad in [
        &["--stats"][..],
        &["a.js", "-o"],
        &["a.js", "--fast"],
        &["a.js", "--temp-prefix=1x"],
        &["a.js", "--temp-prefix="],
    ] {
        let error = parse_rewrite_args(&args(bad)).unwrap_err();
        assert!(matches!(error, CliError::Usage(_)), "{bad:?}: {error}");
    }
}

#[test]
fn run_args() {
    let invocation = parse_run_args(&args(&["--rewrite", "a.js"])).unwrap();
    assert_eq!(
        invocation,
        RunInvocation {
            path: "a.js".to_owned(),
            rewrite: true,
        }
    );
    assert!(!parse_run_args(&args(&["a.js"])).unwrap().rewrite);
    assert!(parse_run_args(&args(&["a.js", "b.js"])).is_err());
    assert!(parse_run_args(&args(&["--compile", "a.js"])).is_err());
    assert!(parse_run_args(&args(&["--rewrite"])).is_err());
}

#[test]
fn rules_listed_in_resolution_order() {
    let lines = list_rules(&builtin_rules().unwrap());
    assert_eq!(lines.len(), 11);
    assert!(lines[0].starts_with(" 1. filter_map_reduce"), "{}", lines[0]);
    assert!(lines[10].starts_with("11. every"), "{}", lines[10]);
    assert!(lines[5].contains("temps: arr, res, i, x, idx, array"), "{}", lines[5]);
}

#[test]
fn check_counts_each_chain() {
    let report = check_file(&SourceText::new("p.js", PROGRAM)).unwrap();
    assert_eq!(report.fire_counts.get("map"), 1);
    assert_eq!(report.fire_counts.get("filter_reduce"), 1);
    assert!(report.failures.is_empty());
    assert_eq!(
        report.lines(),
        vec![
            "  map: 1".to_owned(),
            "  filter_reduce: 1".to_owned(),
            "p.js: 2 chains would be rewritten".to_owned(),
        ]
    );
}

#[test]
fn check_reports_parse_errors() {
    let error = check_file(&SourceText::new("bad.js", "const = 1;")).unwrap_err();
    let CliError::Parse { path, errors, .. } = error else {
        panic!("expected a parse error, got {error}");
    };
    assert_eq!(path, "bad.js");
    assert!(!errors.is_empty());
}

#[test]
fn run_with_and_without_rewrite_agree() {
    let source = SourceText::new("p.js", PROGRAM);
    let plain = run_file(&source, false).unwrap();
    let rewritten = run_file(&source, true).unwrap();
    assert_eq!(plain, vec!["[ 2, 4, 6, 8 ] 6".to_owned()]);
    assert_eq!(rewritten, plain);
}

#[test]
fn rewrite_file_checks_output() {
    let rules = builtin_rules().unwrap();
    let invocation = RewriteInvocation {
        check: true,
        ..RewriteInvocation::default()
    };
    let rewritten = rewrite_file(&rules, &SourceText::new("p.js", PROGRAM), &invocation).unwrap();
    assert_eq!(rewritten.fire_counts.total(), 2);
    assert_eq!(rewritten.verified, Some(vec!["[ 2, 4, 6, 8 ] 6".to_owned()]));
    assert!(!rewritten.printed.contains(".map("), "{}", rewritten.printed);
    assert!(rewritten.printed.contains("for (let _i"), "{}", rewritten.printed);
}

#[test]
fn rewrite_file_honors_temp_prefix() {
    let rules = builtin_rules().unwrap();
    let invocation = parse_rewrite_args(&args(&["p.js", "--temp-prefix=t$"])).unwrap();
    let source = SourceText::new("p.js", "const a = [1].map(v => v + 1);\n");
    let rewritten = rewrite_file(&rules, &source, &invocation).unwrap();
    assert!(rewritten.printed.contains("t$arr0"), "{}", rewritten.printed);
    assert!(!rewritten.printed.contains("_arr"), "{}", rewritten.printed);
}

#[test]
fn single_path_accepts_one_file() {
    assert_eq!(single_path(&args(&["a.js"]), &[]).unwrap(), "a.js");
    assert!(single_path(&args(&[]), &[]).is_err());
}

#[test]
fn finish_maps_errors_to_exit_codes() {
    assert_eq!(finish(Ok(())), EXIT_OK);
    assert_eq!(finish(Err(CliError::Usage("x".to_owned()))), EXIT_FAILURE);
}
