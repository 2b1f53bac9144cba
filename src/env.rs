// ABOUTME: Environment module for managing lexically nested variable bindings

use crate::error::EvalError;
use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// A frame of bindings with an optional parent frame.
///
/// Each frame owns exactly one `RefCell<HashMap<...>>`. Because frames are
/// shared via `Rc`, a `set!` that mutates a frame's map is visible through
/// every `Rc<Environment>` that points at it — a closure holding its
/// defining environment, a child scope's parent pointer, or the top-level
/// binding itself. This is what gives bindings "mutable cell" semantics
/// without a separate cell type per name.
#[derive(Debug)]
pub struct Environment {
    bindings: RefCell<HashMap<String, Value>>,
    parent: Option<Rc<Environment>>,
}

impl Environment {
    /// An empty environment with no parent.
    pub fn new() -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            parent: None,
        })
    }

    /// A child scope with no bindings of its own yet.
    pub fn with_parent(parent: Rc<Environment>) -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            parent: Some(parent),
        })
    }

    /// A child scope prepopulated with `bindings`, the shape `apply` needs
    /// when it extends a closure's environment with its argument list.
    pub fn extend(parent: Rc<Environment>, bindings: Vec<(String, Value)>) -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(bindings.into_iter().collect()),
            parent: Some(parent),
        })
    }

    /// Defines `name` in THIS frame only. Rebinds the cell if `name` is
    /// already present at this frame; otherwise prepends a new binding.
    /// Never fails.
    pub fn define(&self, name: String, value: Value) {
        self.bindings.borrow_mut().insert(name, value);
    }

    /// Looks up `name` in this frame, then each parent frame in turn.
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.bindings.borrow().get(name) {
            return Some(value.clone());
        }
        self.parent.as_ref().and_then(|p| p.get(name))
    }

    pub fn lookup(&self, name: &str) -> Result<Value, EvalError> {
        self.get(name)
            .ok_or_else(|| EvalError::unbound_var("Getting an unbound variable", name))
    }

    /// Mutates the nearest existing binding named `name`, searching this
    /// frame and then each parent in turn. Fails `UnboundVar` if absent
    /// anywhere along the chain.
    pub fn set(&self, name: &str, value: Value) -> Result<(), EvalError> {
        if self.bindings.borrow().contains_key(name) {
            self.bindings.borrow_mut().insert(name.to_string(), value);
            return Ok(());
        }
        match &self.parent {
            Some(parent) => parent.set(name, value),
            None => Err(EvalError::unbound_var("Setting an unbound variable", name)),
        }
    }
}
