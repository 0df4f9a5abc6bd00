//! Loopify CLI
//!
//! Rewrites sequence-method chains into explicit loops.

use loopifyc::commands::{run_check, run_rewrite, run_rules, run_run, EXIT_FAILURE, EXIT_OK};

fn main() {
    loopifyc::logging::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    let code = match command.as_str() {
        "rewrite" => {
            if args.len() < 3 {
                eprintln!("Usage: loopify rewrite <files...> [options]");
                eprintln!();
                eprintln!("Options:");
                eprintln!("  --stats              Print per-rule rewrite counts to stderr");
                eprintln!("  --check              Run original and rewrite, require equal output");
                eprintln!("  --temp-prefix=<p>    Prefix of generated names (default: _)");
                eprintln!("  --no-reserve         Only avoid names near each rewrite");
                eprintln!("  --no-parallel        Process files one at a time");
                eprintln!("  -o <path>            Output file (directory for several files)");
                std::process::exit(EXIT_FAILURE);
            }
            run_rewrite(&args[2..])
        }
        "check" => {
            if args.len() < 3 {
                eprintln!("Usage: loopify check <file>");
                std::process::exit(EXIT_FAILURE);
            }
            run_check(&args[2..])
        }
        "run" => {
            if args.len() < 3 {
                eprintln!("Usage: loopify run <file> [--rewrite]");
                eprintln!();
                eprintln!("Options:");
                eprintln!("  --rewrite    Rewrite first and run the result");
                std::process::exit(EXIT_FAILURE);
            }
            run_run(&args[2..])
        }
        "rules" => run_rules(),
        "help" | "--help" | "-h" => {
            print_usage();
            EXIT_OK
        }
        "version" | "--version" | "-V" => {
            println!("loopify {}", env!("CARGO_PKG_VERSION"));
            EXIT_OK
        }
        _ => {
            // A bare script path means `rewrite <path>`
            if std::path::Path::new(command)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("js") || ext.eq_ignore_ascii_case("ts"))
            {
                run_rewrite(&args[1..])
            } else {
                eprintln!("Unknown command: {command}");
                eprintln!();
                print_usage();
                EXIT_FAILURE
            }
        }
    };
    std::process::exit(code);
}

fn print_usage() {
    println!("Loopify - rewrite sequence-method chains into loops");
    println!();
    println!("Usage: loopify <command> [options]");
    println!();
    println!("Commands:");
    println!("  rewrite <files...>   Rewrite files and print the result");
    println!("  check <file>         Count the chains a rewrite would replace");
    println!("  run <file>           Run a program and print what it logs");
    println!("  rules                List the built-in rules in resolution order");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Environment:");
    println!("  RUST_LOG             Enable tracing output (e.g. loopify_rewrite=debug)");
    println!("  LOOPIFY_LOG_TREE     Draw tracing spans as a tree");
}
