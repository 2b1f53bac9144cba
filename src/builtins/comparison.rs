// ABOUTME: Strictly-binary comparison primitives: numeric, string, and boolean

use crate::builtins::coerce::unpack_num;
use crate::env::Environment;
use crate::error::EvalError;
use crate::value::Value;
use std::cmp::Ordering;
use std::rc::Rc;

fn numeric_cmp(args: &[Value], ok: impl Fn(Ordering) -> bool) -> Result<Value, EvalError> {
    let [a, b] = args else {
        return Err(EvalError::num_args("2", args));
    };
    let a = unpack_num(a)?;
    let b = unpack_num(b)?;
    Ok(Value::Bool(ok(a.cmp(&b))))
}

pub fn num_eq(args: &[Value]) -> Result<Value, EvalError> {
    numeric_cmp(args, |o| o == Ordering::Equal)
}

pub fn num_lt(args: &[Value]) -> Result<Value, EvalError> {
    numeric_cmp(args, |o| o == Ordering::Less)
}

pub fn num_gt(args: &[Value]) -> Result<Value, EvalError> {
    numeric_cmp(args, |o| o == Ordering::Greater)
}

pub fn num_ne(args: &[Value]) -> Result<Value, EvalError> {
    numeric_cmp(args, |o| o != Ordering::Equal)
}

pub fn num_ge(args: &[Value]) -> Result<Value, EvalError> {
    numeric_cmp(args, |o| o != Ordering::Less)
}

pub fn num_le(args: &[Value]) -> Result<Value, EvalError> {
    numeric_cmp(args, |o| o != Ordering::Greater)
}

fn string_cmp(args: &[Value], ok: impl Fn(Ordering) -> bool) -> Result<Value, EvalError> {
    let [a, b] = args else {
        return Err(EvalError::num_args("2", args));
    };
    let (Value::String(a), Value::String(b)) = (a, b) else {
        let bad = if matches!(a, Value::String(_)) { b } else { a };
        return Err(EvalError::type_mismatch("string", bad));
    };
    Ok(Value::Bool(ok(a.cmp(b))))
}

pub fn string_eq(args: &[Value]) -> Result<Value, EvalError> {
    string_cmp(args, |o| o == Ordering::Equal)
}

pub fn string_lt(args: &[Value]) -> Result<Value, EvalError> {
    string_cmp(args, |o| o == Ordering::Less)
}

pub fn string_gt(args: &[Value]) -> Result<Value, EvalError> {
    string_cmp(args, |o| o == Ordering::Greater)
}

pub fn string_le(args: &[Value]) -> Result<Value, EvalError> {
    string_cmp(args, |o| o != Ordering::Greater)
}

pub fn string_ge(args: &[Value]) -> Result<Value, EvalError> {
    string_cmp(args, |o| o != Ordering::Less)
}

fn bool_op(args: &[Value], op: impl Fn(bool, bool) -> bool) -> Result<Value, EvalError> {
    let [a, b] = args else {
        return Err(EvalError::num_args("2", args));
    };
    let (Value::Bool(a), Value::Bool(b)) = (a, b) else {
        let bad = if matches!(a, Value::Bool(_)) { b } else { a };
        return Err(EvalError::type_mismatch("boolean", bad));
    };
    Ok(Value::Bool(op(*a, *b)))
}

pub fn and(args: &[Value]) -> Result<Value, EvalError> {
    bool_op(args, |a, b| a && b)
}

pub fn or(args: &[Value]) -> Result<Value, EvalError> {
    bool_op(args, |a, b| a || b)
}

pub fn register(env: &Rc<Environment>) {
    env.define("=".to_string(), Value::PrimitiveFunc(num_eq));
    env.define("<".to_string(), Value::PrimitiveFunc(num_lt));
    env.define(">".to_string(), Value::PrimitiveFunc(num_gt));
    env.define("/=".to_string(), Value::PrimitiveFunc(num_ne));
    env.define(">=".to_string(), Value::PrimitiveFunc(num_ge));
    env.define("<=".to_string(), Value::PrimitiveFunc(num_le));

    env.define("string=?".to_string(), Value::PrimitiveFunc(string_eq));
    env.define("string<?".to_string(), Value::PrimitiveFunc(string_lt));
    env.define("string>?".to_string(), Value::PrimitiveFunc(string_gt));
    env.define("string<=?".to_string(), Value::PrimitiveFunc(string_le));
    env.define("string>=?".to_string(), Value::PrimitiveFunc(string_ge));

    env.define("&&".to_string(), Value::PrimitiveFunc(and));
    env.define("||".to_string(), Value::PrimitiveFunc(or));
}
