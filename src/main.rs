mod builtins;
mod config;
mod env;
mod error;
mod eval;
mod parser;
mod value;

use builtins::register_builtins;
use clap::Parser;
use env::Environment;
use eval::eval;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::process::ExitCode;
use value::Value;

/// A tree-walking interpreter for a small Scheme dialect.
#[derive(Parser, Debug)]
#[command(name = "scheme-dialect")]
#[command(version = config::VERSION)]
#[command(about = "A tree-walking interpreter for a small Scheme dialect")]
struct CliArgs {
    /// Script to run in batch mode; with none, starts the REPL
    script: Option<String>,

    /// Extra arguments exposed to the script as the list `args`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    script_args: Vec<String>,
}

fn main() -> ExitCode {
    let cli = CliArgs::parse();
    match cli.script {
        Some(script) => run_batch(&script, cli.script_args),
        None => {
            run_repl();
            ExitCode::SUCCESS
        }
    }
}

fn run_batch(script: &str, script_args: Vec<String>) -> ExitCode {
    let env = Environment::new();
    register_builtins(&env);
    env.define(
        "args".to_string(),
        Value::List(script_args.into_iter().map(Value::String).collect()),
    );

    let load_form = Value::List(vec![
        Value::Atom("load".to_string()),
        Value::String(script.to_string()),
    ]);

    // Both a value and a caught evaluation error are printed the same way;
    // only a host-level panic is an "unhandled" error per the exit code
    // contract, so either branch here is a normal termination.
    match eval(&load_form, &env) {
        Ok(result) => eprintln!("{result}"),
        Err(e) => eprintln!("{e}"),
    }
    ExitCode::SUCCESS
}

fn run_repl() {
    let env = Environment::new();
    register_builtins(&env);

    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("Failed to initialize line editor: {e}");
            return;
        }
    };

    loop {
        match rl.readline(config::PROMPT) {
            Ok(line) => {
                let _ = rl.add_history_entry(line.as_str());
                if line.trim() == "quit" {
                    println!("{}", config::GOODBYE);
                    break;
                }
                if line.trim().is_empty() {
                    continue;
                }
                match parser::parse_one(&line) {
                    Ok(expr) => match eval(&expr, &env) {
                        Ok(value) => println!("{value}"),
                        Err(e) => println!("{e}"),
                    },
                    Err(e) => println!("{e}"),
                }
            }
            Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => {
                println!("{}", config::GOODBYE);
                break;
            }
            Err(e) => {
                eprintln!("{e}");
                break;
            }
        }
    }
}
