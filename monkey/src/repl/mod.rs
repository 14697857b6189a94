//! REPL (Read-Eval-Print Loop) for Monkey

use crate::error::report_parse_errors;
use crate::interp::{Interpreter, builtins};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::path::PathBuf;
use tracing::debug;

const PROMPT: &str = ">> ";
const HISTORY_FILE: &str = ".monkey_history";

/// What the loop should do after a `:` command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// REPL state
pub struct Repl {
    editor: DefaultEditor,
    interpreter: Interpreter,
    history_path: Option<PathBuf>,
    color: bool,
}

impl Repl {
    /// Create a new REPL
    pub fn new(color: bool) -> RlResult<Self> {
        let editor = DefaultEditor::new()?;
        let history_path = dirs_home().map(|h| h.join(HISTORY_FILE));

        let mut repl = Repl {
            editor,
            interpreter: Interpreter::new(),
            history_path,
            color,
        };

        if let Some(ref path) = repl.history_path {
            // A missing history file is normal on first run
            if let Err(err) = repl.editor.load_history(path) {
                debug!(path = %path.display(), %err, "no history loaded");
            }
        }

        Ok(repl)
    }

    /// Run the REPL
    pub fn run(&mut self) -> RlResult<()> {
        println!("Monkey REPL v{}", env!("CARGO_PKG_VERSION"));
        println!("Type :help for help, :quit to exit.\n");

        loop {
            match self.editor.readline(PROMPT) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    let _ = self.editor.add_history_entry(line);

                    if line.starts_with(':') {
                        if self.handle_command(line) == Flow::Quit {
                            break;
                        }
                        continue;
                    }

                    self.eval_input(line);
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Goodbye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {err}");
                    break;
                }
            }
        }

        if let Some(ref path) = self.history_path
            && let Err(err) = self.editor.save_history(path)
        {
            debug!(path = %path.display(), %err, "failed to save history");
        }

        Ok(())
    }

    /// Handle REPL commands (starting with :)
    fn handle_command(&mut self, cmd: &str) -> Flow {
        match cmd {
            ":quit" | ":q" | ":exit" => {
                println!("Goodbye!");
                Flow::Quit
            }
            ":help" | ":h" | ":?" => {
                self.print_help();
                Flow::Continue
            }
            ":env" => {
                for (name, value) in self.env_listing() {
                    println!("{name} = {value}");
                }
                Flow::Continue
            }
            _ => {
                println!("Unknown command: {cmd}");
                println!("Type :help for help.");
                Flow::Continue
            }
        }
    }

    /// Global bindings rendered for `:env`
    fn env_listing(&self) -> Vec<(String, String)> {
        self.interpreter
            .env()
            .borrow()
            .local_bindings()
            .into_iter()
            .map(|(name, value)| (name, value.to_string()))
            .collect()
    }

    fn print_help(&self) {
        println!("Monkey REPL Commands:");
        println!("  :help, :h, :?   Show this help");
        println!("  :quit, :q       Exit the REPL");
        println!("  :env            List global bindings");
        println!();
        println!("Bindings persist between lines, e.g.");
        println!("  let add = fn(a, b) {{ a + b }};");
        println!("  add(1, 2)");
        println!();
        let names: Vec<_> = builtins::names().collect();
        println!("Built-in functions: {}", names.join(", "));
    }

    /// Evaluate one line and print its result
    fn eval_input(&mut self, input: &str) {
        match self.interpreter.eval_source(input) {
            Ok(value) => println!("{value}"),
            Err(errors) => {
                if let Err(err) = report_parse_errors("<repl>", input, &errors, self.color) {
                    eprintln!("Error: {err}");
                }
            }
        }
    }
}

/// Get home directory
fn dirs_home() -> Option<PathBuf> {
    #[cfg(windows)]
    {
        std::env::var("USERPROFILE").ok().map(PathBuf::from)
    }
    #[cfg(not(windows))]
    {
        std::env::var("HOME").ok().map(PathBuf::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interp::Object;

    fn repl() -> Repl {
        Repl::new(false).expect("create REPL")
    }

    #[test]
    fn test_handle_command_quit() {
        let mut repl = repl();
        assert_eq!(repl.handle_command(":quit"), Flow::Quit);
        assert_eq!(repl.handle_command(":q"), Flow::Quit);
        assert_eq!(repl.handle_command(":exit"), Flow::Quit);
    }

    #[test]
    fn test_handle_command_help_and_unknown() {
        let mut repl = repl();
        assert_eq!(repl.handle_command(":help"), Flow::Continue);
        assert_eq!(repl.handle_command(":?"), Flow::Continue);
        assert_eq!(repl.handle_command(":unknown"), Flow::Continue);
    }

    #[test]
    fn test_constants() {
        assert_eq!(PROMPT, ">> ");
        assert_eq!(HISTORY_FILE, ".monkey_history");
    }

    #[test]
    fn test_bindings_persist_across_lines() {
        let mut repl = repl();
        repl.eval_input("let a = 5;");
        repl.eval_input("let double = fn(x) { x * 2 };");
        assert_eq!(
            repl.interpreter.eval_source("double(a)"),
            Ok(Object::Integer(10))
        );
    }

    #[test]
    fn test_parse_error_does_not_bind() {
        let mut repl = repl();
        repl.eval_input("let x 5;");
        assert!(repl.env_listing().is_empty());
    }

    #[test]
    fn test_env_listing() {
        let mut repl = repl();
        repl.eval_input("let b = [1, 2];");
        repl.eval_input(r#"let a = "hi";"#);
        assert_eq!(
            repl.env_listing(),
            vec![
                ("a".to_string(), "hi".to_string()),
                ("b".to_string(), "[1, 2]".to_string()),
            ]
        );
        assert_eq!(repl.handle_command(":env"), Flow::Continue);
    }
}
