// ABOUTME: Integer arithmetic primitives: + - * / mod quotient remainder

use crate::builtins::coerce::unpack_num;
use crate::env::Environment;
use crate::error::EvalError;
use crate::value::{Integer, Value};
use num_traits::Zero;
use std::rc::Rc;

fn fold<F>(args: &[Value], op: F) -> Result<Value, EvalError>
where
    F: Fn(Integer, &Integer) -> Integer,
{
    if args.len() < 2 {
        return Err(EvalError::num_args("2", args));
    }
    let mut acc = unpack_num(&args[0])?;
    for arg in &args[1..] {
        acc = op(acc, &unpack_num(arg)?);
    }
    Ok(Value::Number(acc))
}

fn fold_checked_div<F>(args: &[Value], op: F) -> Result<Value, EvalError>
where
    F: Fn(&Integer, &Integer) -> Integer,
{
    if args.len() < 2 {
        return Err(EvalError::num_args("2", args));
    }
    let mut acc = unpack_num(&args[0])?;
    for arg in &args[1..] {
        let divisor = unpack_num(arg)?;
        if divisor.is_zero() {
            return Err(EvalError::Default("Division by zero".to_string()));
        }
        acc = op(&acc, &divisor);
    }
    Ok(Value::Number(acc))
}

pub fn add(args: &[Value]) -> Result<Value, EvalError> {
    fold(args, |a, b| a + b)
}

pub fn sub(args: &[Value]) -> Result<Value, EvalError> {
    fold(args, |a, b| a - b)
}

pub fn mul(args: &[Value]) -> Result<Value, EvalError> {
    fold(args, |a, b| a * b)
}

/// Truncating (toward zero) division, the same as `quotient`.
pub fn div(args: &[Value]) -> Result<Value, EvalError> {
    fold_checked_div(args, |a, b| a / b)
}

pub fn quotient(args: &[Value]) -> Result<Value, EvalError> {
    fold_checked_div(args, |a, b| a / b)
}

/// Remainder under truncating division, the same as `remainder`.
pub fn rem(args: &[Value]) -> Result<Value, EvalError> {
    fold_checked_div(args, |a, b| a % b)
}

pub fn remainder(args: &[Value]) -> Result<Value, EvalError> {
    fold_checked_div(args, |a, b| a % b)
}

pub fn register(env: &Rc<Environment>) {
    env.define("+".to_string(), Value::PrimitiveFunc(add));
    env.define("-".to_string(), Value::PrimitiveFunc(sub));
    env.define("*".to_string(), Value::PrimitiveFunc(mul));
    env.define("/".to_string(), Value::PrimitiveFunc(div));
    env.define("mod".to_string(), Value::PrimitiveFunc(rem));
    env.define("quotient".to_string(), Value::PrimitiveFunc(quotient));
    env.define("remainder".to_string(), Value::PrimitiveFunc(remainder));
}
