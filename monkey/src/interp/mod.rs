//! Monkey interpreter
//!
//! Tree-walking evaluation over the AST, with closures capturing
//! `Rc<RefCell<Environment>>` scopes.

pub mod builtins;
mod env;
mod error;
mod eval;
mod value;

pub use env::{EnvRef, Environment, child_env};
pub use error::{ErrorKind, EvalResult, InterpResult, RuntimeError, Signal};
pub use eval::{Interpreter, eval_program};
pub use value::{
    ArrayRef, Builtin, FALSE, Function, HashKey, HashPair, HashPairs, Hashable, NULL, Object, TRUE,
    fnv1a64,
};
