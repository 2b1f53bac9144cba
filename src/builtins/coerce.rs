// ABOUTME: Cross-type coercion helpers shared by arithmetic, comparison, and equality builtins

use crate::error::EvalError;
use crate::value::{Integer, Value};
use std::str::FromStr;

/// Coerces `v` to a `Number`: a `Number` as-is, a `String` that fully parses
/// as a (possibly signed) integer, or a single-element `List` wrapping
/// either of those.
pub fn unpack_num(v: &Value) -> Result<Integer, EvalError> {
    match v {
        Value::Number(n) => Ok(n.clone()),
        Value::String(s) => {
            Integer::from_str(s.trim()).map_err(|_| EvalError::type_mismatch("number", v))
        }
        Value::List(items) if items.len() == 1 => unpack_num(&items[0]),
        _ => Err(EvalError::type_mismatch("number", v)),
    }
}

/// Coerces `v` to a `String` by stringifying `Number` and `Bool` via their
/// display forms; strings pass through unchanged.
pub fn unpack_str(v: &Value) -> Result<String, EvalError> {
    match v {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(if *b { "#t" } else { "#f" }.to_string()),
        _ => Err(EvalError::type_mismatch("string", v)),
    }
}

/// Accepts only `Bool`.
pub fn unpack_bool(v: &Value) -> Result<bool, EvalError> {
    match v {
        Value::Bool(b) => Ok(*b),
        _ => Err(EvalError::type_mismatch("boolean", v)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpack_num_accepts_string_and_wrapping_list() {
        assert_eq!(unpack_num(&Value::String("42".into())).unwrap(), Integer::from(42));
        assert_eq!(unpack_num(&Value::String(" -7 ".into())).unwrap(), Integer::from(-7));
        let wrapped = Value::List(vec![Value::Number(Integer::from(3))]);
        assert_eq!(unpack_num(&wrapped).unwrap(), Integer::from(3));
    }

    #[test]
    fn unpack_num_rejects_non_numeric_string() {
        assert!(unpack_num(&Value::String("abc".into())).is_err());
    }

    #[test]
    fn unpack_str_stringifies_number_and_bool() {
        assert_eq!(unpack_str(&Value::Number(Integer::from(9))).unwrap(), "9");
        assert_eq!(unpack_str(&Value::Bool(true)).unwrap(), "#t");
        assert_eq!(unpack_str(&Value::String("hi".into())).unwrap(), "hi");
    }

    #[test]
    fn unpack_bool_rejects_non_bool() {
        assert!(unpack_bool(&Value::Number(Integer::from(1))).is_err());
        assert!(unpack_bool(&Value::Bool(false)).unwrap() == false);
    }
}
