// ABOUTME: Type predicates rounding out the primitive library: symbol? string? number? bool? list? pair? null? procedure?

use crate::env::Environment;
use crate::error::EvalError;
use crate::value::Value;
use std::rc::Rc;

fn unary(args: &[Value]) -> Result<&Value, EvalError> {
    match args {
        [v] => Ok(v),
        _ => Err(EvalError::num_args("1", args)),
    }
}

pub fn symbol_p(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Bool(matches!(unary(args)?, Value::Atom(_))))
}

pub fn string_p(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Bool(matches!(unary(args)?, Value::String(_))))
}

pub fn number_p(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Bool(matches!(unary(args)?, Value::Number(_))))
}

pub fn bool_p(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Bool(matches!(unary(args)?, Value::Bool(_))))
}

/// True for any `List` — including the empty list — but false for `DottedList`.
pub fn list_p(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Bool(matches!(unary(args)?, Value::List(_))))
}

/// True for any non-empty `List` or any `DottedList`.
pub fn pair_p(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Bool(match unary(args)? {
        Value::List(items) => !items.is_empty(),
        Value::DottedList(_, _) => true,
        _ => false,
    }))
}

/// True only for the empty `List`.
pub fn null_p(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Bool(matches!(unary(args)?, Value::List(items) if items.is_empty())))
}

pub fn procedure_p(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Bool(matches!(
        unary(args)?,
        Value::PrimitiveFunc(_) | Value::IOFunc(_) | Value::Func { .. }
    )))
}

pub fn register(env: &Rc<Environment>) {
    env.define("symbol?".to_string(), Value::PrimitiveFunc(symbol_p));
    env.define("string?".to_string(), Value::PrimitiveFunc(string_p));
    env.define("number?".to_string(), Value::PrimitiveFunc(number_p));
    env.define("bool?".to_string(), Value::PrimitiveFunc(bool_p));
    env.define("list?".to_string(), Value::PrimitiveFunc(list_p));
    env.define("pair?".to_string(), Value::PrimitiveFunc(pair_p));
    env.define("null?".to_string(), Value::PrimitiveFunc(null_p));
    env.define("procedure?".to_string(), Value::PrimitiveFunc(procedure_p));
}
