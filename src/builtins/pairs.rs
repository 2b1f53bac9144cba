// ABOUTME: Pair surgery primitives: car, cdr, cons

use crate::env::Environment;
use crate::error::EvalError;
use crate::value::Value;
use std::rc::Rc;

pub fn car(args: &[Value]) -> Result<Value, EvalError> {
    match args {
        [Value::List(items)] => match items.split_first() {
            Some((head, _)) => Ok(head.clone()),
            None => Err(EvalError::type_mismatch("pair", &args[0])),
        },
        [Value::DottedList(head, _)] => Ok(head[0].clone()),
        [other] => Err(EvalError::type_mismatch("pair", other)),
        _ => Err(EvalError::num_args("1", args)),
    }
}

pub fn cdr(args: &[Value]) -> Result<Value, EvalError> {
    match args {
        [Value::List(items)] => match items.split_first() {
            Some((_, rest)) => Ok(Value::List(rest.to_vec())),
            None => Err(EvalError::type_mismatch("pair", &args[0])),
        },
        [Value::DottedList(head, tail)] if head.len() == 1 => Ok((**tail).clone()),
        [Value::DottedList(head, tail)] => {
            Ok(Value::DottedList(head[1..].to_vec(), tail.clone()))
        }
        [other] => Err(EvalError::type_mismatch("pair", other)),
        _ => Err(EvalError::num_args("1", args)),
    }
}

pub fn cons(args: &[Value]) -> Result<Value, EvalError> {
    match args {
        [x, Value::List(ys)] => {
            let mut items = Vec::with_capacity(ys.len() + 1);
            items.push(x.clone());
            items.extend(ys.iter().cloned());
            Ok(Value::List(items))
        }
        [x, Value::DottedList(ys, tail)] => {
            let mut items = Vec::with_capacity(ys.len() + 1);
            items.push(x.clone());
            items.extend(ys.iter().cloned());
            Ok(Value::DottedList(items, tail.clone()))
        }
        [x, y] => Ok(Value::DottedList(vec![x.clone()], Box::new(y.clone()))),
        _ => Err(EvalError::num_args("2", args)),
    }
}

pub fn register(env: &Rc<Environment>) {
    env.define("car".to_string(), Value::PrimitiveFunc(car));
    env.define("cdr".to_string(), Value::PrimitiveFunc(cdr));
    env.define("cons".to_string(), Value::PrimitiveFunc(cons));
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    fn num(n: i64) -> Value {
        Value::Number(BigInt::from(n))
    }

    #[test]
    fn car_of_proper_list() {
        assert!(matches!(car(&[Value::List(vec![num(1), num(2)])]), Ok(Value::Number(n)) if n == BigInt::from(1)));
    }

    #[test]
    fn car_of_empty_list_is_type_mismatch() {
        assert!(matches!(car(&[Value::List(vec![])]), Err(EvalError::TypeMismatch { .. })));
    }

    #[test]
    fn car_of_dotted_list() {
        let dotted = Value::DottedList(vec![num(1), num(2)], Box::new(num(3)));
        assert!(matches!(car(&[dotted]), Ok(Value::Number(n)) if n == BigInt::from(1)));
    }

    #[test]
    fn cdr_of_proper_list() {
        match cdr(&[Value::List(vec![num(1), num(2), num(3)])]) {
            Ok(Value::List(items)) => assert_eq!(items.len(), 2),
            other => panic!("{other:?}"),
        }
    }

    #[test]
    fn cdr_of_singleton_dotted_list_returns_tail() {
        let dotted = Value::DottedList(vec![num(1)], Box::new(num(2)));
        assert!(matches!(cdr(&[dotted]), Ok(Value::Number(n)) if n == BigInt::from(2)));
    }

    #[test]
    fn cdr_of_multi_head_dotted_list_stays_dotted() {
        let dotted = Value::DottedList(vec![num(1), num(2)], Box::new(num(3)));
        match cdr(&[dotted]) {
            Ok(Value::DottedList(head, tail)) => {
                assert_eq!(head.len(), 1);
                assert!(matches!(*tail, Value::Number(n) if n == BigInt::from(3)));
            }
            other => panic!("{other:?}"),
        }
    }

    #[test]
    fn cons_onto_list_stays_proper() {
        match cons(&[num(1), Value::List(vec![num(2), num(3)])]) {
            Ok(Value::List(items)) => assert_eq!(items.len(), 3),
            other => panic!("{other:?}"),
        }
    }

    #[test]
    fn cons_onto_non_list_makes_dotted_pair() {
        match cons(&[num(1), num(2)]) {
            Ok(Value::DottedList(head, tail)) => {
                assert_eq!(head.len(), 1);
                assert!(matches!(*tail, Value::Number(n) if n == BigInt::from(2)));
            }
            other => panic!("{other:?}"),
        }
    }
}
