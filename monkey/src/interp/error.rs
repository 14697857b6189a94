//! Runtime errors for the interpreter

use super::value::Object;
use thiserror::Error;

/// Runtime error during evaluation
///
/// Errors are ordinary values in Monkey: once raised they unwind to the
/// top level and surface as [`Object::Error`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RuntimeError {
    pub kind: ErrorKind,
    pub message: String,
}

/// Kinds of runtime errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Operand or argument of the wrong type
    TypeError,
    /// Operator not defined for the operand type
    UnknownOperator,
    /// Unbound identifier
    ReferenceError,
    /// Argument count mismatch
    WrongArguments,
    /// Hash key that is not an integer, boolean or string
    UnusableHashKey,
    /// Integer division by zero
    DivisionByZero,
}

impl RuntimeError {
    fn new(kind: ErrorKind, message: String) -> Self {
        RuntimeError { kind, message }
    }

    /// Free-form `TypeError: <detail>`
    pub fn type_error(detail: impl std::fmt::Display) -> Self {
        Self::new(ErrorKind::TypeError, format!("TypeError: {detail}"))
    }

    /// Binary operator applied to operands of different types
    pub fn type_mismatch(left: &str, operator: impl std::fmt::Display, right: &str) -> Self {
        Self::type_error(format!("{left} {operator} {right}"))
    }

    pub fn unknown_prefix(operator: impl std::fmt::Display, right: &str) -> Self {
        Self::new(
            ErrorKind::UnknownOperator,
            format!("UnknownOperator: {operator}{right}"),
        )
    }

    pub fn unknown_infix(left: &str, operator: impl std::fmt::Display, right: &str) -> Self {
        Self::new(
            ErrorKind::UnknownOperator,
            format!("UnknownOperator: {left} {operator} {right}"),
        )
    }

    pub fn undefined(name: &str) -> Self {
        Self::new(
            ErrorKind::ReferenceError,
            format!("ReferenceError: {name} is not defined"),
        )
    }

    pub fn wrong_arguments(expected: usize, got: usize) -> Self {
        Self::new(
            ErrorKind::WrongArguments,
            format!("Wrong number of arguments. Expected {expected}, got {got}"),
        )
    }

    pub fn not_a_function(type_name: &str) -> Self {
        Self::type_error(format!("{type_name} is not a function"))
    }

    /// Non-hashable key in a hash literal
    pub fn unusable_hash_key(type_name: &str) -> Self {
        Self::new(
            ErrorKind::UnusableHashKey,
            format!("Unusable as hash key: {type_name}"),
        )
    }

    /// Non-hashable index into a hash
    pub fn unusable_hash_index(type_name: &str) -> Self {
        Self::new(
            ErrorKind::UnusableHashKey,
            format!("TypeError: Unusable as hash key: {type_name}"),
        )
    }

    pub fn division_by_zero(dividend: i64) -> Self {
        Self::new(
            ErrorKind::DivisionByZero,
            format!("DivisionByZero: {dividend} / 0"),
        )
    }
}

/// Result type for operations that can only fail (builtins, operators)
pub type InterpResult<T> = Result<T, RuntimeError>;

/// Non-local exit from a statement sequence
#[derive(Debug, Clone)]
pub enum Signal {
    /// `return` unwinding to the nearest function call or the program
    Return(Object),
    /// Runtime error unwinding to the program
    Error(RuntimeError),
}

impl From<RuntimeError> for Signal {
    fn from(err: RuntimeError) -> Self {
        Signal::Error(err)
    }
}

/// Result of evaluating a node
pub type EvalResult = Result<Object, Signal>;
