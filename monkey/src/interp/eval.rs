//! Tree-walking evaluator
//!
//! Every evaluation step returns [`EvalResult`]: `Ok` carries a value, while
//! `return` and runtime errors travel on the `Err` side as a [`Signal`] so
//! that `?` unwinds them. Function calls absorb `Signal::Return`; the program
//! absorbs both.
//!
//! Evaluation recurses once per AST node and is not depth-limited: a deeply
//! recursive Monkey program can overflow the host stack.

use super::builtins;
use super::env::{EnvRef, Environment, child_env};
use super::error::{EvalResult, InterpResult, RuntimeError, Signal};
use super::value::{Function, HashPair, HashPairs, NULL, Object};
use crate::ast::{BlockStatement, Expression, Identifier, InfixOp, PrefixOp, Program, Statement};
use crate::error::ParseError;
use crate::parser;
use std::rc::Rc;
use tracing::{debug, trace};

/// The interpreter: a persistent global environment
///
/// Bindings made by one call to [`Interpreter::eval_source`] remain visible
/// to the next, which is what the REPL relies on.
pub struct Interpreter {
    /// Global environment
    global_env: EnvRef,
}

impl Interpreter {
    /// Create a new interpreter
    pub fn new() -> Self {
        Interpreter {
            global_env: Environment::new().into_ref(),
        }
    }

    /// Global environment
    pub fn env(&self) -> &EnvRef {
        &self.global_env
    }

    /// Parse and evaluate source text
    ///
    /// Parse errors abort before any evaluation happens. Runtime errors are
    /// returned as `Ok(Object::Error(..))`.
    pub fn eval_source(&self, source: &str) -> Result<Object, Vec<ParseError>> {
        let (program, errors) = parser::parse(source);
        if !errors.is_empty() {
            debug!(errors = errors.len(), "parse failed, skipping evaluation");
            return Err(errors);
        }
        Ok(self.eval(&program))
    }

    /// Evaluate an already parsed program in the global environment
    pub fn eval(&self, program: &Program) -> Object {
        eval_program(program, &self.global_env)
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

/// Evaluate a program in `env`
pub fn eval_program(program: &Program, env: &EnvRef) -> Object {
    debug!(statements = program.statements.len(), "eval program");
    match eval_statements(&program.statements, env) {
        Ok(value) | Err(Signal::Return(value)) => value,
        Err(Signal::Error(err)) => {
            debug!(error = %err, "runtime error");
            Object::Error(err)
        }
    }
}

/// Evaluate statements in order; the last value wins, an empty list is null
fn eval_statements(statements: &[Statement], env: &EnvRef) -> EvalResult {
    let mut result = NULL;
    for statement in statements {
        result = eval_statement(statement, env)?;
    }
    Ok(result)
}

fn eval_block(block: &BlockStatement, env: &EnvRef) -> EvalResult {
    eval_statements(&block.statements, env)
}

fn eval_statement(statement: &Statement, env: &EnvRef) -> EvalResult {
    match statement {
        Statement::Let { name, value } => {
            let value = eval_expression(value, env)?;
            env.borrow_mut().define(name.value.clone(), value.clone());
            Ok(value)
        }
        Statement::Return { value: Some(value) } => Err(Signal::Return(eval_expression(value, env)?)),
        Statement::Return { value: None } => Err(Signal::Return(NULL)),
        Statement::Expression(expr) => eval_expression(expr, env),
    }
}

fn eval_expression(expr: &Expression, env: &EnvRef) -> EvalResult {
    match expr {
        Expression::Identifier(ident) => Ok(eval_identifier(ident, env)?),
        Expression::Integer(n) => Ok(Object::Integer(*n)),
        Expression::Boolean(b) => Ok(Object::from(*b)),
        Expression::String(s) => Ok(Object::String(s.clone())),

        Expression::Array(elements) => Ok(Object::array(eval_expressions(elements, env)?)),
        Expression::Hash(pairs) => eval_hash_literal(pairs, env),

        Expression::Function(literal) => Ok(Object::Function(Rc::new(Function {
            literal: Rc::clone(literal),
            env: Rc::clone(env),
        }))),

        Expression::Prefix { operator, right } => {
            let right = eval_expression(right, env)?;
            Ok(eval_prefix(*operator, &right)?)
        }

        Expression::Infix {
            operator,
            left,
            right,
        } => {
            let left = eval_expression(left, env)?;
            let right = eval_expression(right, env)?;
            Ok(eval_infix(*operator, &left, &right)?)
        }

        Expression::If {
            condition,
            consequence,
            alternative,
        } => {
            let condition = eval_expression(condition, env)?;
            if condition.is_truthy() {
                eval_block(consequence, env)
            } else if let Some(alternative) = alternative {
                eval_block(alternative, env)
            } else {
                Ok(NULL)
            }
        }

        Expression::Call {
            function,
            arguments,
        } => {
            let callee = eval_expression(function, env)?;
            let args = eval_expressions(arguments, env)?;
            apply_function(&callee, args)
        }

        Expression::Index { left, index } => {
            let left = eval_expression(left, env)?;
            let index = eval_expression(index, env)?;
            Ok(eval_index(&left, &index)?)
        }
    }
}

/// Evaluate left to right, stopping at the first error
fn eval_expressions(exprs: &[Expression], env: &EnvRef) -> Result<Vec<Object>, Signal> {
    exprs.iter().map(|expr| eval_expression(expr, env)).collect()
}

fn eval_identifier(ident: &Identifier, env: &EnvRef) -> InterpResult<Object> {
    if let Some(builtin) = builtins::lookup(&ident.value) {
        return Ok(Object::Builtin(builtin));
    }
    env.borrow()
        .get(&ident.value)
        .ok_or_else(|| RuntimeError::undefined(&ident.value))
}

fn eval_prefix(operator: PrefixOp, right: &Object) -> InterpResult<Object> {
    match operator {
        PrefixOp::Not => Ok(Object::from(!right.is_truthy())),
        PrefixOp::Neg => match right {
            Object::Integer(n) => Ok(Object::Integer(n.wrapping_neg())),
            other => Err(RuntimeError::unknown_prefix(operator, other.type_name())),
        },
    }
}

fn eval_infix(operator: InfixOp, left: &Object, right: &Object) -> InterpResult<Object> {
    match (left, right) {
        (Object::Integer(l), Object::Integer(r)) => eval_integer_infix(operator, *l, *r),
        (Object::String(l), Object::String(r)) => eval_string_infix(operator, l, r),
        _ => match operator {
            InfixOp::Eq => Ok(Object::from(left.identical(right))),
            InfixOp::NotEq => Ok(Object::from(!left.identical(right))),
            _ if left.type_name() != right.type_name() => Err(RuntimeError::type_mismatch(
                left.type_name(),
                operator,
                right.type_name(),
            )),
            _ => Err(RuntimeError::unknown_infix(
                left.type_name(),
                operator,
                right.type_name(),
            )),
        },
    }
}

/// Wrapping arithmetic; division truncates toward zero
fn eval_integer_infix(operator: InfixOp, left: i64, right: i64) -> InterpResult<Object> {
    let value = match operator {
        InfixOp::Add => Object::Integer(left.wrapping_add(right)),
        InfixOp::Sub => Object::Integer(left.wrapping_sub(right)),
        InfixOp::Mul => Object::Integer(left.wrapping_mul(right)),
        InfixOp::Div => {
            if right == 0 {
                return Err(RuntimeError::division_by_zero(left));
            }
            Object::Integer(left.wrapping_div(right))
        }
        InfixOp::Lt => Object::from(left < right),
        InfixOp::Gt => Object::from(left > right),
        InfixOp::Eq => Object::from(left == right),
        InfixOp::NotEq => Object::from(left != right),
    };
    Ok(value)
}

fn eval_string_infix(operator: InfixOp, left: &str, right: &str) -> InterpResult<Object> {
    match operator {
        InfixOp::Add => Ok(Object::String(format!("{left}{right}"))),
        _ => Err(RuntimeError::unknown_infix("STRING", operator, "STRING")),
    }
}

fn eval_index(left: &Object, index: &Object) -> InterpResult<Object> {
    match (left, index) {
        (Object::Array(elements), Object::Integer(i)) => {
            let elements = elements.borrow();
            let element = usize::try_from(*i)
                .ok()
                .and_then(|i| elements.get(i).cloned());
            Ok(element.unwrap_or(NULL))
        }
        (Object::Array(_), other) => Err(RuntimeError::type_error(format!(
            "ARRAY index must be INTEGER, got {}",
            other.type_name()
        ))),
        (Object::Hash(pairs), key) => {
            let hash_key = key
                .hash_key()
                .ok_or_else(|| RuntimeError::unusable_hash_index(key.type_name()))?;
            Ok(pairs
                .get(&hash_key)
                .map(|pair| pair.value.clone())
                .unwrap_or(NULL))
        }
        _ => Err(RuntimeError::type_error(format!(
            "index operator not supported: {}[{}]",
            left.type_name(),
            index.type_name()
        ))),
    }
}

fn eval_hash_literal(pairs: &[(Expression, Expression)], env: &EnvRef) -> EvalResult {
    let mut hash = HashPairs::new();

    for (key_expr, value_expr) in pairs {
        let key = eval_expression(key_expr, env)?;
        let hash_key = key
            .hash_key()
            .ok_or_else(|| RuntimeError::unusable_hash_key(key.type_name()))?;
        let value = eval_expression(value_expr, env)?;
        hash.insert(hash_key, HashPair { key, value });
    }

    Ok(Object::Hash(Rc::new(hash)))
}

fn apply_function(callee: &Object, args: Vec<Object>) -> EvalResult {
    match callee {
        Object::Function(func) => {
            let params = func.parameters();
            if params.len() != args.len() {
                return Err(RuntimeError::wrong_arguments(params.len(), args.len()).into());
            }
            trace!(function = %func.literal, args = args.len(), "call");

            let call_env = child_env(&func.env);
            {
                let mut scope = call_env.borrow_mut();
                for (param, arg) in params.iter().zip(args) {
                    scope.define(param.value.clone(), arg);
                }
            }

            match eval_block(&func.literal.body, &call_env) {
                Err(Signal::Return(value)) => Ok(value),
                other => other,
            }
        }
        Object::Builtin(builtin) => {
            trace!(builtin = builtin.name, args = args.len(), "call builtin");
            Ok((builtin.func)(&args)?)
        }
        other => Err(RuntimeError::not_a_function(other.type_name()).into()),
    }
}
