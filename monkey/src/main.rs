//! Monkey CLI

use clap::{Parser, Subcommand};
use monkey::error::report_parse_errors;
use monkey::interp::{Interpreter, Object};
use monkey::repl::Repl;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "monkey", version, about = "Monkey language interpreter")]
struct Cli {
    /// Disable colored diagnostics
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run a Monkey source file
    Run {
        /// Source file to run
        file: PathBuf,
    },
    /// Parse and print the program (debug)
    Parse {
        /// Source file to parse
        file: PathBuf,
        /// Dump the AST as JSON instead of the canonical form
        #[arg(long)]
        json: bool,
    },
    /// Tokenize and dump tokens (debug)
    Tokens {
        /// Source file to tokenize
        file: PathBuf,
    },
    /// Start the interactive REPL (default)
    Repl,
}

/// Command outcome that maps to the process exit status
enum Outcome {
    Success,
    Failure,
}

fn main() -> ExitCode {
    monkey::init_tracing();
    let cli = Cli::parse();
    let color = !cli.no_color;

    let result = match cli.command.unwrap_or(Command::Repl) {
        Command::Run { file } => run_file(&file, color),
        Command::Parse { file, json } => parse_file(&file, json, color),
        Command::Tokens { file } => tokenize_file(&file),
        Command::Repl => start_repl(color),
    };

    match result {
        Ok(Outcome::Success) => ExitCode::SUCCESS,
        Ok(Outcome::Failure) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run_file(path: &Path, color: bool) -> Result<Outcome, Box<dyn std::error::Error>> {
    let source = std::fs::read_to_string(path)?;
    let filename = path.display().to_string();

    let interpreter = Interpreter::new();
    match interpreter.eval_source(&source) {
        Err(errors) => {
            report_parse_errors(&filename, &source, &errors, color)?;
            Ok(Outcome::Failure)
        }
        Ok(Object::Null) => Ok(Outcome::Success),
        Ok(value @ Object::Error(_)) => {
            eprintln!("{value}");
            Ok(Outcome::Failure)
        }
        Ok(value) => {
            println!("{value}");
            Ok(Outcome::Success)
        }
    }
}

fn parse_file(path: &Path, json: bool, color: bool) -> Result<Outcome, Box<dyn std::error::Error>> {
    let source = std::fs::read_to_string(path)?;
    let filename = path.display().to_string();

    let (program, errors) = monkey::parser::parse(&source);
    if !errors.is_empty() {
        report_parse_errors(&filename, &source, &errors, color)?;
        return Ok(Outcome::Failure);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&program)?);
    } else {
        println!("{program}");
    }
    Ok(Outcome::Success)
}

fn tokenize_file(path: &Path) -> Result<Outcome, Box<dyn std::error::Error>> {
    let source = std::fs::read_to_string(path)?;

    for token in monkey::lexer::tokenize(&source) {
        println!("{token}");
    }

    Ok(Outcome::Success)
}

fn start_repl(color: bool) -> Result<Outcome, Box<dyn std::error::Error>> {
    Repl::new(color)?.run()?;
    Ok(Outcome::Success)
}
