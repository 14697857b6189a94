//! Runtime values for the interpreter

use super::builtins::BuiltinFn;
use super::env::EnvRef;
use super::error::RuntimeError;
use crate::ast::{FunctionLiteral, Identifier};
use fnv::FnvHasher;
use indexmap::IndexMap;
use std::cell::RefCell;
use std::fmt;
use std::hash::Hasher;
use std::rc::Rc;

pub const TRUE: Object = Object::Boolean(true);
pub const FALSE: Object = Object::Boolean(false);
pub const NULL: Object = Object::Null;

/// Shared, mutable array storage
pub type ArrayRef = Rc<RefCell<Vec<Object>>>;

/// Hash storage; iteration follows first insertion of each key
pub type HashPairs = IndexMap<HashKey, HashPair>;

type ArrayPtr = *const RefCell<Vec<Object>>;

/// Arrays on the current rendering path. An array can hold itself
/// (`push(a, a)`), so recursion into elements stops on re-entry.
type ArrayPath = Vec<ArrayPtr>;

/// Runtime value
#[derive(Clone)]
pub enum Object {
    Integer(i64),
    Boolean(bool),
    Null,
    String(String),
    /// Arrays are shared: every alias sees `push`
    Array(ArrayRef),
    Hash(Rc<HashPairs>),
    /// Closure over its defining environment
    Function(Rc<Function>),
    Builtin(Builtin),
    Error(RuntimeError),
}

impl Object {
    pub fn array(elements: Vec<Object>) -> Object {
        Object::Array(Rc::new(RefCell::new(elements)))
    }

    /// Get type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Integer(_) => "INTEGER",
            Object::Boolean(_) => "BOOLEAN",
            Object::Null => "NULL",
            Object::String(_) => "STRING",
            Object::Array(_) => "ARRAY",
            Object::Hash(_) => "HASH",
            Object::Function(_) => "FUNCTION",
            Object::Builtin(_) => "BUILTIN",
            Object::Error(_) => "ERROR",
        }
    }

    /// Only `false` and `null` are falsy
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Object::Null | Object::Boolean(false))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Object::Error(_))
    }

    /// Identity comparison backing `==`/`!=` for non-integer operands
    ///
    /// Booleans and null compare by value (they are interned constants);
    /// arrays, hashes and functions compare by reference.
    pub fn identical(&self, other: &Object) -> bool {
        match (self, other) {
            (Object::Integer(a), Object::Integer(b)) => a == b,
            (Object::Boolean(a), Object::Boolean(b)) => a == b,
            (Object::Null, Object::Null) => true,
            (Object::String(a), Object::String(b)) => a == b,
            (Object::Array(a), Object::Array(b)) => Rc::ptr_eq(a, b),
            (Object::Hash(a), Object::Hash(b)) => Rc::ptr_eq(a, b),
            (Object::Function(a), Object::Function(b)) => Rc::ptr_eq(a, b),
            (Object::Builtin(a), Object::Builtin(b)) => a.name == b.name,
            _ => false,
        }
    }

    /// Key under which this value is stored in a hash, if it is hashable
    pub fn hash_key(&self) -> Option<HashKey> {
        match self {
            Object::Integer(n) => Some(n.to_hash_key()),
            Object::Boolean(b) => Some(b.to_hash_key()),
            Object::String(s) => Some(s.as_str().to_hash_key()),
            _ => None,
        }
    }
}

impl From<bool> for Object {
    fn from(value: bool) -> Self {
        if value { TRUE } else { FALSE }
    }
}

impl From<RuntimeError> for Object {
    fn from(err: RuntimeError) -> Self {
        Object::Error(err)
    }
}

impl PartialEq for Object {
    /// Structural equality, used by tests and host code
    fn eq(&self, other: &Self) -> bool {
        self.structurally_equal(other, &mut Vec::new())
    }
}

impl Object {
    /// A pair of arrays already being compared further up counts as equal
    fn structurally_equal(&self, other: &Object, path: &mut Vec<(ArrayPtr, ArrayPtr)>) -> bool {
        match (self, other) {
            (Object::Array(a), Object::Array(b)) => {
                let pair = (Rc::as_ptr(a), Rc::as_ptr(b));
                if Rc::ptr_eq(a, b) || path.contains(&pair) {
                    return true;
                }
                path.push(pair);
                let (left, right) = (a.borrow(), b.borrow());
                let mut equal = left.len() == right.len();
                for (x, y) in left.iter().zip(right.iter()) {
                    if !equal {
                        break;
                    }
                    equal = x.structurally_equal(y, path);
                }
                path.pop();
                equal
            }
            (Object::Hash(a), Object::Hash(b)) => {
                if Rc::ptr_eq(a, b) {
                    return true;
                }
                if a.len() != b.len() {
                    return false;
                }
                for (key, pair) in a.iter() {
                    let Some(candidate) = b.get(key) else {
                        return false;
                    };
                    if !pair.key.structurally_equal(&candidate.key, path)
                        || !pair.value.structurally_equal(&candidate.value, path)
                    {
                        return false;
                    }
                }
                true
            }
            (Object::Error(a), Object::Error(b)) => a == b,
            _ => self.identical(other),
        }
    }

    fn render(&self, f: &mut fmt::Formatter<'_>, path: &mut ArrayPath) -> fmt::Result {
        match self {
            Object::Integer(n) => write!(f, "{n}"),
            Object::Boolean(b) => write!(f, "{b}"),
            Object::Null => f.write_str("null"),
            Object::String(s) => f.write_str(s),
            Object::Array(elements) => {
                let ptr = Rc::as_ptr(elements);
                if path.contains(&ptr) {
                    return f.write_str("[...]");
                }
                path.push(ptr);
                f.write_str("[")?;
                for (i, element) in elements.borrow().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    element.render(f, path)?;
                }
                path.pop();
                f.write_str("]")
            }
            Object::Hash(pairs) => {
                if pairs.is_empty() {
                    return f.write_str("{}");
                }
                f.write_str("{ ")?;
                for (i, pair) in pairs.values().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    pair.key.render(f, path)?;
                    f.write_str(": ")?;
                    pair.value.render(f, path)?;
                }
                f.write_str(" }")
            }
            Object::Function(func) => write!(f, "{}", func.literal),
            Object::Builtin(_) => f.write_str("builtin function"),
            Object::Error(err) => write!(f, "ERROR: {err}"),
        }
    }

    fn render_debug(&self, f: &mut fmt::Formatter<'_>, path: &mut ArrayPath) -> fmt::Result {
        match self {
            Object::Integer(n) => write!(f, "Integer({n})"),
            Object::Boolean(b) => write!(f, "Boolean({b})"),
            Object::Null => f.write_str("Null"),
            Object::String(s) => write!(f, "String({s:?})"),
            Object::Array(elements) => {
                let ptr = Rc::as_ptr(elements);
                if path.contains(&ptr) {
                    return f.write_str("Array([...])");
                }
                path.push(ptr);
                f.write_str("Array([")?;
                for (i, element) in elements.borrow().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    element.render_debug(f, path)?;
                }
                path.pop();
                f.write_str("])")
            }
            Object::Hash(pairs) => {
                f.write_str("Hash({")?;
                for (i, pair) in pairs.values().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    pair.key.render_debug(f, path)?;
                    f.write_str(": ")?;
                    pair.value.render_debug(f, path)?;
                }
                f.write_str("})")
            }
            // The captured environment may contain the function itself
            Object::Function(func) => write!(f, "Function({})", func.literal),
            Object::Builtin(builtin) => write!(f, "Builtin({})", builtin.name),
            Object::Error(err) => f.debug_tuple("Error").field(err).finish(),
        }
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, &mut Vec::new())
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render_debug(f, &mut Vec::new())
    }
}

/// User-defined function value
pub struct Function {
    pub literal: Rc<FunctionLiteral>,
    pub env: EnvRef,
}

impl Function {
    pub fn parameters(&self) -> &[Identifier] {
        &self.literal.parameters
    }
}

/// Native function value
#[derive(Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub func: BuiltinFn,
}

/// Original key and value of a hash entry
#[derive(Debug, Clone, PartialEq)]
pub struct HashPair {
    pub key: Object,
    pub value: Object,
}

/// Map key derived from a hashable value: `<TYPE>@<value>`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HashKey(String);

impl HashKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HashKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Values usable as hash keys
pub trait Hashable {
    fn to_hash_key(&self) -> HashKey;
}

impl Hashable for i64 {
    fn to_hash_key(&self) -> HashKey {
        HashKey(format!("INTEGER@{self}"))
    }
}

impl Hashable for bool {
    fn to_hash_key(&self) -> HashKey {
        HashKey(format!("BOOLEAN@{}", u8::from(*self)))
    }
}

impl Hashable for str {
    fn to_hash_key(&self) -> HashKey {
        HashKey(format!("STRING@{}", fnv1a64(self.as_bytes())))
    }
}

/// 64-bit FNV-1a digest
pub fn fnv1a64(bytes: &[u8]) -> u64 {
    let mut hasher = FnvHasher::default();
    hasher.write(bytes);
    hasher.finish()
}
