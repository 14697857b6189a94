//! Monkey Interpreter Library
//!
//! Lexer, Pratt parser and tree-walking evaluator for the Monkey language.

pub mod ast;
pub mod error;
pub mod interp;
pub mod lexer;
pub mod parser;
pub mod repl;

pub use ast::Span;
pub use error::ParseError;
pub use interp::{Interpreter, Object};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a stderr `tracing` subscriber filtered by `RUST_LOG`
///
/// Does nothing unless `RUST_LOG` is set; safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt, prelude::*};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
                .with(filter)
                .init();
        }
    });
}
