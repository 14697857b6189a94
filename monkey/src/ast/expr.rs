//! Expression AST nodes

use super::{BlockStatement, write_joined};
use serde::Serialize;
use std::fmt;
use std::rc::Rc;

/// Expression
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expression {
    /// Variable reference
    Identifier(Identifier),
    /// Integer literal
    Integer(i64),
    /// Boolean literal
    Boolean(bool),
    /// String literal (delimiters already stripped)
    String(String),

    /// `[a, b, c]`
    Array(Vec<Expression>),
    /// `{k: v, ...}`; pairs stay in source order
    Hash(Vec<(Expression, Expression)>),

    /// `fn(params) { body }`
    Function(Rc<FunctionLiteral>),

    /// `<op><right>`
    Prefix {
        operator: PrefixOp,
        right: Box<Expression>,
    },

    /// `<left> <op> <right>`
    Infix {
        operator: InfixOp,
        left: Box<Expression>,
        right: Box<Expression>,
    },

    /// `if (condition) { consequence } else { alternative }`
    If {
        condition: Box<Expression>,
        consequence: BlockStatement,
        alternative: Option<BlockStatement>,
    },

    /// `function(arguments)`
    Call {
        function: Box<Expression>,
        arguments: Vec<Expression>,
    },

    /// `left[index]`
    Index {
        left: Box<Expression>,
        index: Box<Expression>,
    },
}

impl Expression {
    pub fn token_literal(&self) -> String {
        match self {
            Expression::Identifier(ident) => ident.value.clone(),
            Expression::Integer(n) => n.to_string(),
            Expression::Boolean(b) => b.to_string(),
            Expression::String(s) => s.clone(),
            Expression::Array(_) | Expression::Index { .. } => "[".to_string(),
            Expression::Hash(_) => "{".to_string(),
            Expression::Function(_) => "fn".to_string(),
            Expression::Prefix { operator, .. } => operator.to_string(),
            Expression::Infix { operator, .. } => operator.to_string(),
            Expression::If { .. } => "if".to_string(),
            Expression::Call { .. } => "(".to_string(),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Identifier(ident) => write!(f, "{ident}"),
            Expression::Integer(n) => write!(f, "{n}"),
            Expression::Boolean(b) => write!(f, "{b}"),
            Expression::String(s) => f.write_str(s),
            Expression::Array(elements) => {
                f.write_str("[")?;
                write_joined(f, elements, ", ")?;
                f.write_str("]")
            }
            Expression::Hash(pairs) => {
                if pairs.is_empty() {
                    return f.write_str("{}");
                }
                f.write_str("{ ")?;
                for (i, (key, value)) in pairs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str(" }")
            }
            Expression::Function(func) => write!(f, "{func}"),
            Expression::Prefix { operator, right } => write!(f, "({operator}{right})"),
            Expression::Infix {
                operator,
                left,
                right,
            } => write!(f, "({left} {operator} {right})"),
            Expression::If {
                condition,
                consequence,
                alternative,
            } => {
                write!(f, "if {condition} then {consequence}")?;
                if let Some(alt) = alternative {
                    write!(f, " else {alt}")?;
                }
                Ok(())
            }
            Expression::Call {
                function,
                arguments,
            } => {
                write!(f, "{function}(")?;
                write_joined(f, arguments, ", ")?;
                f.write_str(")")
            }
            Expression::Index { left, index } => write!(f, "({left}[{index}])"),
        }
    }
}

/// Identifier (binding name or reference)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Identifier {
    pub value: String,
}

impl Identifier {
    pub fn new(value: impl Into<String>) -> Self {
        Identifier {
            value: value.into(),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// Function literal; shared with every closure created from it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionLiteral {
    pub parameters: Vec<Identifier>,
    pub body: BlockStatement,
}

impl fmt::Display for FunctionLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("fn(")?;
        write_joined(f, &self.parameters, ", ")?;
        if self.body.is_empty() {
            f.write_str(") {}")
        } else {
            write!(f, ") {{ {} }}", self.body)
        }
    }
}

/// Prefix operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PrefixOp {
    /// `!`
    Not,
    /// `-`
    Neg,
}

impl fmt::Display for PrefixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrefixOp::Not => f.write_str("!"),
            PrefixOp::Neg => f.write_str("-"),
        }
    }
}

/// Infix (binary) operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InfixOp {
    Add,
    Sub,
    Mul,
    Div,
    Lt,
    Gt,
    Eq,
    NotEq,
}

impl fmt::Display for InfixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InfixOp::Add => "+",
            InfixOp::Sub => "-",
            InfixOp::Mul => "*",
            InfixOp::Div => "/",
            InfixOp::Lt => "<",
            InfixOp::Gt => ">",
            InfixOp::Eq => "==",
            InfixOp::NotEq => "!=",
        };
        f.write_str(s)
    }
}
