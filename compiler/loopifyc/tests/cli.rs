//! Commands driven against files on disk.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use std::fs;
use std::path::Path;

use loopifyc::commands::{
    parse_rewrite_args, rewrite_files, run_check, run_rewrite, run_run, EXIT_FAILURE, EXIT_OK,
};
use loopifyc::pipeline::SourceText;
use loopifyc::CliError;
use pretty_assertions::assert_eq;

const SQUARES: &str = "const xs = [1, 2, 3];\nconsole.log(xs.map(x => x * x));\n";
const EVENS: &str = "const xs = [1, 2, 3, 4];\nconsole.log(xs.filter(x => x % 2 === 0));\n";

fn write(dir: &Path, name: &str, text: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, text).unwrap();
    path.display().to_string()
}

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|&arg| arg.to_owned()).collect()
}

#[test]
fn files_keep_input_order_in_parallel() {
    let dir = tempfile::tempdir().unwrap();
    let a = write(dir.path(), "a.js", SQUARES);
    let b = write(dir.path(), "b.js", EVENS);
    let invocation = parse_rewrite_args(&args(&[&a, &b, "--check"])).unwrap();

    let results = rewrite_files(&invocation).unwrap();
    let results: Vec<_> = results.into_iter().map(Result::unwrap).collect();
    assert_eq!(results[0].path, a);
    assert_eq!(results[0].fire_counts.get("map"), 1);
    assert_eq!(results[0].verified, Some(vec!["[ 1, 4, 9 ]".to_owned()]));
    assert_eq!(results[1].path, b);
    assert_eq!(results[1].fire_counts.get("filter"), 1);
    assert_eq!(results[1].verified, Some(vec!["[ 2, 4 ]".to_owned()]));
}

#[test]
fn sequential_and_parallel_agree() {
    let dir = tempfile::tempdir().unwrap();
    let a = write(dir.path(), "a.js", SQUARES);
    let b = write(dir.path(), "b.js", EVENS);
    let printed = |extra: &[&str]| -> Vec<String> {
        let mut list = vec![a.as_str(), b.as_str()];
        list.extend_from_slice(extra);
        let invocation = parse_rewrite_args(&args(&list)).unwrap();
        rewrite_files(&invocation)
            .unwrap()
            .into_iter()
            .map(|result| result.unwrap().printed)
            .collect()
    };
    assert_eq!(printed(&[]), printed(&["--no-parallel"]));
}

#[test]
fn one_bad_file_does_not_stop_the_rest() {
    let dir = tempfile::tempdir().unwrap();
    let good = write(dir.path(), "good.js", SQUARES);
    let missing = dir.path().join("missing.js").display().to_string();
    let invocation = parse_rewrite_args(&args(&[&missing, &good])).unwrap();

    let results = rewrite_files(&invocation).unwrap();
    assert!(matches!(results[0], Err(CliError::Read { .. })));
    assert!(results[1].is_ok());
}

#[test]
fn output_directory_receives_each_file() {
    let dir = tempfile::tempdir().unwrap();
    let a = write(dir.path(), "a.js", SQUARES);
    let b = write(dir.path(), "b.js", EVENS);
    let out = dir.path().join("out");
    let out_arg = out.display().to_string();

    let code = run_rewrite(&args(&[&a, &b, "-o", &out_arg]));
    assert_eq!(code, EXIT_OK);
    for name in ["a.js", "b.js"] {
        let text = fs::read_to_string(out.join(name)).unwrap();
        assert!(text.contains("for (let"), "{text}");
        SourceText::new(name, text).parse().unwrap();
    }
}

#[test]
fn output_file_for_a_single_input() {
    let dir = tempfile::tempdir().unwrap();
    let a = write(dir.path(), "a.js", SQUARES);
    let out = dir.path().join("a.out.js");
    let out_arg = out.display().to_string();

    assert_eq!(run_rewrite(&args(&[&a, "-o", &out_arg])), EXIT_OK);
    let text = fs::read_to_string(&out).unwrap();
    assert!(!text.contains(".map("), "{text}");
}

#[test]
fn syntax_errors_fail_the_command() {
    let dir = tempfile::tempdir().unwrap();
    let bad = write(dir.path(), "bad.js", "const xs = [1, 2;\n");
    assert_eq!(run_rewrite(&args(&[&bad])), EXIT_FAILURE);
    assert_eq!(run_check(&args(&[&bad])), EXIT_FAILURE);
    assert_eq!(run_run(&args(&[&bad])), EXIT_FAILURE);
}

#[test]
fn check_and_run_succeed_on_valid_files() {
    let dir = tempfile::tempdir().unwrap();
    let a = write(dir.path(), "a.js", SQUARES);
    assert_eq!(run_check(&args(&[&a])), EXIT_OK);
    assert_eq!(run_run(&args(&[&a, "--rewrite"])), EXIT_OK);
}
