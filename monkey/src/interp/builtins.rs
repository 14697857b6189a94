//! Built-in functions
//!
//! Built-ins are resolved before user bindings, so `let len = 1;` does not
//! hide `len`.

use super::error::{InterpResult, RuntimeError};
use super::value::{ArrayRef, Builtin, NULL, Object};
use std::rc::Rc;

/// Builtin function type
pub type BuiltinFn = fn(&[Object]) -> InterpResult<Object>;

const BUILTINS: &[(&str, BuiltinFn)] = &[
    ("len", builtin_len),
    ("head", builtin_head),
    ("tail", builtin_tail),
    ("last", builtin_last),
    ("push", builtin_push),
    ("puts", builtin_puts),
];

/// Find a built-in by name
pub fn lookup(name: &str) -> Option<Builtin> {
    BUILTINS
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|&(name, func)| Builtin { name, func })
}

/// Names of every built-in, in registration order
pub fn names() -> impl Iterator<Item = &'static str> {
    BUILTINS.iter().map(|(name, _)| *name)
}

fn check_arity(args: &[Object], expected: usize) -> InterpResult<()> {
    if args.len() != expected {
        return Err(RuntimeError::wrong_arguments(expected, args.len()));
    }
    Ok(())
}

fn builtin_len(args: &[Object]) -> InterpResult<Object> {
    check_arity(args, 1)?;
    let len = match &args[0] {
        Object::String(s) => s.chars().count(),
        Object::Array(elements) => elements.borrow().len(),
        other => {
            return Err(RuntimeError::type_error(format!(
                "`len` expects a string, got {}",
                other.type_name()
            )));
        }
    };
    Ok(Object::Integer(i64::try_from(len).unwrap_or(i64::MAX)))
}

/// Shared argument check for the single-array built-ins
fn single_array<'a>(name: &str, args: &'a [Object]) -> InterpResult<&'a ArrayRef> {
    check_arity(args, 1)?;
    match &args[0] {
        Object::Array(elements) => Ok(elements),
        other => Err(RuntimeError::type_error(format!(
            "`{name}` expects an array, got {}",
            other.type_name()
        ))),
    }
}

fn builtin_head(args: &[Object]) -> InterpResult<Object> {
    let elements = single_array("head", args)?;
    let first = elements.borrow().first().cloned();
    Ok(first.unwrap_or(NULL))
}

fn builtin_tail(args: &[Object]) -> InterpResult<Object> {
    let elements = single_array("tail", args)?;
    let elements = elements.borrow();
    match elements.split_first() {
        Some((_, rest)) => Ok(Object::array(rest.to_vec())),
        None => Ok(NULL),
    }
}

fn builtin_last(args: &[Object]) -> InterpResult<Object> {
    let elements = single_array("last", args)?;
    let last = elements.borrow().last().cloned();
    Ok(last.unwrap_or(NULL))
}

fn builtin_push(args: &[Object]) -> InterpResult<Object> {
    check_arity(args, 2)?;
    match &args[0] {
        Object::Array(elements) => {
            elements.borrow_mut().push(args[1].clone());
            Ok(Object::Array(Rc::clone(elements)))
        }
        other => Err(RuntimeError::type_error(format!(
            "`push` expects an array and value, got {} and {}",
            other.type_name(),
            args[1].type_name()
        ))),
    }
}

fn builtin_puts(args: &[Object]) -> InterpResult<Object> {
    for arg in args {
        println!("{arg}");
    }
    Ok(NULL)
}
