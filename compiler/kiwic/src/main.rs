//! Kiwi front-end CLI.

use std::io;

use kiwi_diagnostic::ColorMode;
use kiwic::commands::{
    check_files, lex_file, parse_color_mode, parse_files, stderr_emitter, CommandError,
};
use kiwic::Session;

fn main() {
    kiwic::init_tracing();

    let (args, color) = split_color_flag(std::env::args());
    if args.len() < 2 {
        print_usage();
        return;
    }

    let session = Session::new();
    let result = match args[1].as_str() {
        "lex" => {
            if args.len() != 3 {
                eprintln!("Usage: kiwi lex <file.kiwi>");
                std::process::exit(1);
            }
            lex_file(&session, &args[2], &mut io::stdout().lock())
        }
        "parse" => {
            let paths = files_or_exit(&args, "parse");
            parse_files(&session, paths, &mut io::stdout().lock(), &mut stderr_emitter(&session, color))
        }
        "check" => {
            let paths = files_or_exit(&args, "check");
            check_files(&session, paths, &mut io::stdout().lock(), &mut stderr_emitter(&session, color))
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        "version" | "--version" | "-V" => {
            println!("kiwi {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        unknown => {
            eprintln!("Unknown command: {unknown}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    match result {
        Ok(()) => {}
        // Diagnostics already explain the failure.
        Err(CommandError::Failed { .. }) => std::process::exit(1),
        Err(error) => {
            eprintln!("error: {error}");
            std::process::exit(1);
        }
    }
}

/// Remove `--color[=when]` from the arguments. Color is off unless asked
/// for; a bare `--color` means `always`.
fn split_color_flag(raw: impl Iterator<Item = String>) -> (Vec<String>, ColorMode) {
    let mut color = ColorMode::Never;
    let mut args = Vec::new();
    for arg in raw {
        let when = match arg.strip_prefix("--color") {
            Some("") => "always",
            Some(rest) if rest.starts_with('=') => rest.trim_start_matches('='),
            _ => {
                args.push(arg);
                continue;
            }
        };
        color = parse_color_mode(when).unwrap_or_else(|| {
            eprintln!("Invalid --color value '{when}': expected always, auto or never");
            std::process::exit(1);
        });
    }
    (args, color)
}

fn files_or_exit<'a>(args: &'a [String], command: &str) -> &'a [String] {
    if args.len() < 3 {
        eprintln!("Usage: kiwi {command} <file.kiwi>...");
        std::process::exit(1);
    }
    &args[2..]
}

fn print_usage() {
    println!("Kiwi front end");
    println!();
    println!("Usage: kiwi <command> [args]");
    println!();
    println!("Commands:");
    println!("  lex <file>         Print every token, comments included");
    println!("  parse <files...>   Parse files as one program and print the tree");
    println!("  check <files...>   Parse files and report errors only");
    println!("  help               Show this message");
    println!("  version            Show version");
    println!();
    println!("Options:");
    println!("  --color=<when>     Color diagnostics: always, auto or never (default)");
    println!();
    println!("A file named '-' is read from standard input.");
    println!("Set RUST_LOG (e.g. RUST_LOG=kiwi_parse=trace) to trace the front end.");
}
