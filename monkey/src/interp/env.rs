//! Environment for variable bindings

use super::Object;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Shared reference to an environment
pub type EnvRef = Rc<RefCell<Environment>>;

/// Environment holding variable bindings
#[derive(Default)]
pub struct Environment {
    /// Variable bindings in this scope
    bindings: HashMap<String, Object>,
    /// Enclosing environment for lexical scoping
    outer: Option<EnvRef>,
}

impl Environment {
    /// Create a new top-level environment
    pub fn new() -> Self {
        Environment::default()
    }

    /// Create a new environment enclosed by `outer`
    pub fn with_outer(outer: EnvRef) -> Self {
        Environment {
            bindings: HashMap::new(),
            outer: Some(outer),
        }
    }

    /// Wrap in Rc<RefCell<>>
    pub fn into_ref(self) -> EnvRef {
        Rc::new(RefCell::new(self))
    }

    /// Bind a name in the current scope, shadowing any outer binding
    pub fn define(&mut self, name: impl Into<String>, value: Object) {
        self.bindings.insert(name.into(), value);
    }

    /// Look up a variable in the scope chain
    pub fn get(&self, name: &str) -> Option<Object> {
        if let Some(value) = self.bindings.get(name) {
            Some(value.clone())
        } else if let Some(outer) = &self.outer {
            outer.borrow().get(name)
        } else {
            None
        }
    }

    /// Bindings of this scope only, sorted by name
    pub fn local_bindings(&self) -> Vec<(String, Object)> {
        let mut bindings: Vec<_> = self
            .bindings
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        bindings.sort_by(|a, b| a.0.cmp(&b.0));
        bindings
    }
}

/// Create a child environment from an outer reference
pub fn child_env(outer: &EnvRef) -> EnvRef {
    Environment::with_outer(Rc::clone(outer)).into_ref()
}
