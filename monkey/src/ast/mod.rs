//! Abstract Syntax Tree definitions
//!
//! Every node renders to a canonical, fully parenthesised form through
//! `Display`; the parser tests and the `parse` CLI command rely on it.

mod expr;
mod span;

pub use expr::*;
pub use span::*;

use serde::Serialize;
use std::fmt;

/// A program is an ordered sequence of statements
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Program {
    pub fn token_literal(&self) -> String {
        self.statements
            .first()
            .map(Statement::token_literal)
            .unwrap_or_default()
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_joined(f, &self.statements, "\n")
    }
}

/// Statement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Statement {
    /// `let <name> = <value>;`
    Let { name: Identifier, value: Expression },
    /// `return <value>;`; `value` is `None` only when it failed to parse
    Return { value: Option<Expression> },
    /// A bare expression, optionally terminated by `;`
    Expression(Expression),
}

impl Statement {
    pub fn token_literal(&self) -> String {
        match self {
            Statement::Let { .. } => "let".to_string(),
            Statement::Return { .. } => "return".to_string(),
            Statement::Expression(expr) => expr.token_literal(),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Let { name, value } => write!(f, "let {name} = {value};"),
            Statement::Return { value: Some(value) } => write!(f, "return {value};"),
            Statement::Return { value: None } => f.write_str("return;"),
            Statement::Expression(expr) => write!(f, "{expr}"),
        }
    }
}

/// `{ statement* }` as used by `if` branches and function bodies
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BlockStatement {
    pub statements: Vec<Statement>,
}

impl BlockStatement {
    pub fn token_literal(&self) -> String {
        "{".to_string()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

impl fmt::Display for BlockStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_joined(f, &self.statements, "\n")
    }
}

pub(crate) fn write_joined<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: &[T],
    sep: &str,
) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}
