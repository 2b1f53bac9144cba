// ABOUTME: Equality primitives: eqv?, eq?, equal?

use crate::builtins::coerce::{unpack_bool, unpack_num, unpack_str};
use crate::env::Environment;
use crate::error::EvalError;
use crate::value::Value;
use std::rc::Rc;

/// Structural equality with no cross-type coercion: both values must be the
/// same `Value` variant with equal payload. Pairs and lists recurse
/// element-wise. `Func`s are compared by closure identity and structural
/// equality of params/varargs/body — there is no other notion of procedure
/// identity available once a `Func` has been passed around by value.
pub fn eqv(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Atom(x), Value::Atom(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::List(xs), Value::List(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| eqv(x, y))
        }
        (Value::DottedList(xh, xt), Value::DottedList(yh, yt)) => {
            xh.len() == yh.len() && xh.iter().zip(yh).all(|(x, y)| eqv(x, y)) && eqv(xt, yt)
        }
        (Value::Port(x), Value::Port(y)) => Rc::ptr_eq(x, y),
        (Value::PrimitiveFunc(x), Value::PrimitiveFunc(y)) => std::ptr::eq(
            *x as *const (),
            *y as *const (),
        ),
        (Value::IOFunc(x), Value::IOFunc(y)) => std::ptr::eq(*x as *const (), *y as *const ()),
        (
            Value::Func {
                params: xp,
                varargs: xv,
                body: xb,
                closure: xc,
            },
            Value::Func {
                params: yp,
                varargs: yv,
                body: yb,
                closure: yc,
            },
        ) => {
            xp == yp
                && xv == yv
                && xb.len() == yb.len()
                && xb.iter().zip(yb).all(|(a, b)| eqv(a, b))
                && Rc::ptr_eq(xc, yc)
        }
        _ => false,
    }
}

pub fn eqv_prim(args: &[Value]) -> Result<Value, EvalError> {
    match args {
        [a, b] => Ok(Value::Bool(eqv(a, b))),
        _ => Err(EvalError::num_args("2", args)),
    }
}

/// Additionally `#t` when any one of `unpackNum`/`unpackStr`/`unpackBool`
/// succeeds on both sides and yields equal values — so `(equal? 2 "2")`.
pub fn equal(args: &[Value]) -> Result<Value, EvalError> {
    let [a, b] = args else {
        return Err(EvalError::num_args("2", args));
    };
    if eqv(a, b) {
        return Ok(Value::Bool(true));
    }
    let coerced_eq = matches!((unpack_num(a), unpack_num(b)), (Ok(x), Ok(y)) if x == y)
        || matches!((unpack_str(a), unpack_str(b)), (Ok(x), Ok(y)) if x == y)
        || matches!((unpack_bool(a), unpack_bool(b)), (Ok(x), Ok(y)) if x == y);
    Ok(Value::Bool(coerced_eq))
}

pub fn register(env: &Rc<Environment>) {
    env.define("eqv?".to_string(), Value::PrimitiveFunc(eqv_prim));
    env.define("eq?".to_string(), Value::PrimitiveFunc(eqv_prim));
    env.define("equal?".to_string(), Value::PrimitiveFunc(equal));
}
