// mallow - A small interactive Lisp written in Rust
// Copyright (c) 2025 Tom Waddington. MIT licensed.

use std::env;
use std::process;
use std::rc::Rc;
use std::thread;

use mallow_core::{Interpreter, StdHost, set_max_eval_depth};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::debug;

/// Stack for the interpreter thread. Evaluation grows its own stack, but
/// deeply nested values are still freed recursively.
const INTERPRETER_STACK_SIZE: usize = 256 * 1024 * 1024;

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    // Handle --version flag
    if args.len() == 1 && (args[0] == "--version" || args[0] == "-v") {
        println!("Mallow v{}", env!("CARGO_PKG_VERSION"));
        return;
    }

    init_tracing();

    let handle = thread::Builder::new()
        .name("mallow".into())
        .stack_size(INTERPRETER_STACK_SIZE)
        .spawn(move || run(&args));

    let code = match handle {
        Ok(handle) => handle.join().unwrap_or(1),
        Err(e) => {
            eprintln!("Failed to start interpreter: {}", e);
            1
        }
    };
    process::exit(code);
}

/// Install a `tracing` subscriber when `RUST_LOG` is set.
fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    if env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

/// Apply `MALLOW_MAX_DEPTH` to this thread's depth limit.
fn configure_depth() {
    let Ok(raw) = env::var("MALLOW_MAX_DEPTH") else {
        return;
    };
    match raw.parse::<usize>() {
        Ok(depth) if depth > 0 => {
            let _ = set_max_eval_depth(depth);
            debug!(depth, "max eval depth");
        }
        _ => eprintln!("Ignoring invalid MALLOW_MAX_DEPTH '{}'", raw),
    }
}

/// Run a file or the REPL, returning the process exit code.
fn run(args: &[String]) -> i32 {
    configure_depth();

    let interp = match Interpreter::new(Rc::new(StdHost)) {
        Ok(interp) => interp,
        Err(e) => {
            eprintln!("Failed to start interpreter: {}", e);
            return 1;
        }
    };

    match args.split_first() {
        Some((file, rest)) => run_file(&interp, file, rest),
        None => {
            interp.set_argv(Vec::<String>::new());
            run_repl(&interp)
        }
    }
}

/// Evaluate a source file with `*ARGV*` bound to the remaining arguments
fn run_file(interp: &Interpreter, file: &str, argv: &[String]) -> i32 {
    interp.set_argv(argv);
    match interp.load_file(file) {
        Ok(_) => 0,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

/// Run the interactive REPL
fn run_repl(interp: &Interpreter) -> i32 {
    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("Could not initialise line editor: {}", e);
            return 1;
        }
    };

    loop {
        match rl.readline("user> ") {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line.as_str());

                match interp.rep(&line) {
                    Ok(out) if out.is_empty() => {}
                    Ok(out) => println!("{}", out),
                    Err(e) => eprintln!("Error: {}", e),
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => return 0,
            Err(e) => {
                eprintln!("Read error: {}", e);
                return 1;
            }
        }
    }
}
