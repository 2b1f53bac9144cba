// ABOUTME: Value types representing Scheme data structures and runtime values

use crate::env::Environment;
use crate::error::EvalError;
use num_bigint::BigInt;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::io::{BufRead, Write};
use std::rc::Rc;

/// Arbitrary-precision signed integer, the interpreter's only numeric type.
pub type Integer = BigInt;

/// Which way a `Port` was opened; governs which builtins may touch it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortDirection {
    Input,
    Output,
}

/// A handle to an open OS file stream.
///
/// Input ports buffer over `dyn BufRead` and output ports over `dyn Write` so
/// the same variant covers real files as well as stdin/stdout. `closed` makes
/// a double `close-*-port` or a use-after-close observable instead of UB.
pub struct PortHandle {
    pub direction: PortDirection,
    pub reader: Option<RefCell<Box<dyn BufRead>>>,
    pub writer: Option<RefCell<Box<dyn Write>>>,
    pub closed: Cell<bool>,
}

impl fmt::Debug for PortHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PortHandle")
            .field("direction", &self.direction)
            .field("closed", &self.closed.get())
            .finish()
    }
}

impl PortHandle {
    pub fn new_input(reader: Box<dyn BufRead>) -> Rc<Self> {
        Rc::new(PortHandle {
            direction: PortDirection::Input,
            reader: Some(RefCell::new(reader)),
            writer: None,
            closed: Cell::new(false),
        })
    }

    pub fn new_output(writer: Box<dyn Write>) -> Rc<Self> {
        Rc::new(PortHandle {
            direction: PortDirection::Output,
            reader: None,
            writer: Some(RefCell::new(writer)),
            closed: Cell::new(false),
        })
    }
}

pub type PrimitiveFn = fn(&[Value]) -> Result<Value, EvalError>;

#[derive(Clone)]
pub enum Value {
    /// An identifier. Never `#t`/`#f` — those parse straight to `Bool`.
    Atom(String),
    /// A proper, finite list.
    List(Vec<Value>),
    /// An improper list: `head` is non-empty, `tail` is not itself a list.
    DottedList(Vec<Value>, Box<Value>),
    Number(Integer),
    String(String),
    Bool(bool),
    Port(Rc<PortHandle>),
    /// A pure builtin: no side effects, takes already-evaluated arguments.
    PrimitiveFunc(PrimitiveFn),
    /// A builtin that may perform I/O.
    IOFunc(PrimitiveFn),
    Func {
        params: Vec<String>,
        varargs: Option<String>,
        body: Vec<Value>,
        closure: Rc<Environment>,
    },
}

impl Value {
    /// Builds a `DottedList`, normalizing a tail that is itself a `List` by
    /// flattening it — `(a . (b c))` is just `(a b c)`.
    pub fn dotted(mut head: Vec<Value>, tail: Value) -> Value {
        match tail {
            Value::List(mut rest) => {
                head.append(&mut rest);
                Value::List(head)
            }
            Value::DottedList(mut rest, rest_tail) => {
                head.append(&mut rest);
                Value::DottedList(head, rest_tail)
            }
            other => Value::DottedList(head, Box::new(other)),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Atom(_) => "symbol",
            Value::List(_) => "list",
            Value::DottedList(_, _) => "pair",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Bool(_) => "boolean",
            Value::Port(_) => "port",
            Value::PrimitiveFunc(_) | Value::IOFunc(_) | Value::Func { .. } => "procedure",
        }
    }

    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Bool(false))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Atom(name) => write!(f, "{name}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => write!(f, "\"{s}\""),
            Value::Bool(true) => write!(f, "#t"),
            Value::Bool(false) => write!(f, "#f"),
            Value::List(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, ")")
            }
            Value::DottedList(head, tail) => {
                write!(f, "(")?;
                for item in head {
                    write!(f, "{item} ")?;
                }
                write!(f, ". {tail})")
            }
            Value::Port(_) => write!(f, "<IO port>"),
            Value::PrimitiveFunc(_) | Value::IOFunc(_) => write!(f, "<primitive>"),
            Value::Func {
                params, varargs, ..
            } => {
                write!(f, "(lambda (")?;
                for (i, p) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{p}")?;
                }
                if let Some(rest) = varargs {
                    if !params.is_empty() {
                        write!(f, " ")?;
                    }
                    write!(f, ". {rest}")?;
                }
                write!(f, ") ...)")
            }
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_display_is_decimal() {
        let n = Value::Number(Integer::from(42));
        assert_eq!(format!("{n}"), "42");

        let neg = Value::Number(Integer::from(-7));
        assert_eq!(format!("{neg}"), "-7");
    }

    #[test]
    fn bool_display() {
        assert_eq!(format!("{}", Value::Bool(true)), "#t");
        assert_eq!(format!("{}", Value::Bool(false)), "#f");
    }

    #[test]
    fn list_display_nested() {
        let nested = Value::List(vec![
            Value::Number(Integer::from(1)),
            Value::List(vec![Value::Number(Integer::from(2)), Value::Number(Integer::from(3))]),
        ]);
        assert_eq!(format!("{nested}"), "(1 (2 3))");

        let empty = Value::List(vec![]);
        assert_eq!(format!("{empty}"), "()");
    }

    #[test]
    fn dotted_list_display() {
        let v = Value::DottedList(
            vec![Value::Number(Integer::from(1)), Value::Number(Integer::from(2))],
            Box::new(Value::Number(Integer::from(3))),
        );
        assert_eq!(format!("{v}"), "(1 2 . 3)");
    }

    #[test]
    fn dotted_construction_flattens_list_tail() {
        let v = Value::dotted(
            vec![Value::Atom("a".into())],
            Value::List(vec![Value::Atom("b".into()), Value::Atom("c".into())]),
        );
        match v {
            Value::List(items) => assert_eq!(items.len(), 3),
            _ => panic!("expected flattened list"),
        }
    }

    #[test]
    fn string_display_has_quotes_no_escaping() {
        let s = Value::String("hi\\there".to_string());
        assert_eq!(format!("{s}"), "\"hi\\there\"");
    }

    #[test]
    fn truthiness_only_false_is_falsy() {
        assert!(!Value::Bool(false).is_truthy());
        assert!(Value::Bool(true).is_truthy());
        assert!(Value::Number(Integer::from(0)).is_truthy());
        assert!(Value::String(String::new()).is_truthy());
        assert!(Value::List(vec![]).is_truthy());
    }
}
