// ABOUTME: Evaluator module — form dispatch, special forms, and procedure application

use crate::env::Environment;
use crate::error::EvalError;
use crate::parser;
use crate::value::Value;
use std::rc::Rc;

/// Evaluates `expr` against `env`.
///
/// Strings, numbers, booleans, and the empty list are self-evaluating. An
/// atom looks itself up. A non-empty list whose head is one of the special
/// form keywords below is dispatched specially (its operands are not
/// eagerly evaluated); everything else is application — evaluate the head,
/// evaluate each argument left to right, then apply.
pub fn eval(expr: &Value, env: &Rc<Environment>) -> Result<Value, EvalError> {
    match expr {
        Value::Number(_) | Value::String(_) | Value::Bool(_) => Ok(expr.clone()),
        Value::Atom(name) => env.lookup(name),
        Value::List(items) if items.is_empty() => Ok(Value::List(vec![])),
        Value::List(items) => match &items[0] {
            Value::Atom(s) if s == "quote" => eval_quote(items),
            Value::Atom(s) if s == "if" => eval_if(items, env),
            Value::Atom(s) if s == "cond" => eval_cond(items, env),
            Value::Atom(s) if s == "case" => eval_case(items, env),
            Value::Atom(s) if s == "set!" => eval_set(items, env),
            Value::Atom(s) if s == "define" => eval_define(items, env),
            Value::Atom(s) if s == "lambda" => eval_lambda(items, env),
            Value::Atom(s) if s == "load" => eval_load(items, env),
            _ => eval_application(items, env),
        },
        // Ports and procedures are never produced by the reader; when they
        // surface as the result of evaluation and are evaluated again
        // (e.g. re-evaluating a previously-read value), they stand for
        // themselves.
        Value::DottedList(_, _)
        | Value::Port(_)
        | Value::PrimitiveFunc(_)
        | Value::IOFunc(_)
        | Value::Func { .. } => Ok(expr.clone()),
    }
}

fn bad_form(message: &str, items: &[Value]) -> EvalError {
    EvalError::bad_special_form(message, &Value::List(items.to_vec()))
}

fn eval_body(body: &[Value], env: &Rc<Environment>) -> Result<Value, EvalError> {
    let (last, init) = body.split_last().ok_or_else(|| {
        EvalError::Default("a body must evaluate at least one expression".to_string())
    })?;
    for expr in init {
        eval(expr, env)?;
    }
    eval(last, env)
}

/// An empty clause body is undefined by the original source this dialect
/// follows; here it signals BadSpecialForm rather than the generic empty-body
/// Default error.
fn eval_clause_body(body: &[Value], items: &[Value], env: &Rc<Environment>) -> Result<Value, EvalError> {
    if body.is_empty() {
        return Err(bad_form("Clause body must not be empty", items));
    }
    eval_body(body, env)
}

fn eval_quote(items: &[Value]) -> Result<Value, EvalError> {
    match items {
        [_, x] => Ok(x.clone()),
        _ => Err(bad_form("Unrecognized special form", items)),
    }
}

fn eval_if(items: &[Value], env: &Rc<Environment>) -> Result<Value, EvalError> {
    match items {
        [_, pred, conseq, alt] => {
            if eval(pred, env)?.is_truthy() {
                eval(conseq, env)
            } else {
                eval(alt, env)
            }
        }
        _ => Err(bad_form("Unrecognized special form", items)),
    }
}

/// `(cond (test body...)... )`, with an optional trailing `(else body...)`.
fn eval_cond(items: &[Value], env: &Rc<Environment>) -> Result<Value, EvalError> {
    let clauses = &items[1..];
    for (i, clause) in clauses.iter().enumerate() {
        let Value::List(parts) = clause else {
            return Err(bad_form("Unrecognized special form", items));
        };
        let Some((head, body)) = parts.split_first() else {
            return Err(bad_form("Unrecognized special form", items));
        };
        let is_else = matches!(head, Value::Atom(s) if s == "else");
        if is_else {
            if i != clauses.len() - 1 {
                return Err(bad_form("else clause must be last in cond", items));
            }
            return eval_clause_body(body, items, env);
        }
        match eval(head, env)? {
            Value::Bool(true) => return eval_clause_body(body, items, env),
            Value::Bool(false) => continue,
            other => return Err(EvalError::type_mismatch("boolean", &other)),
        }
    }
    Err(bad_form("No matching clause in cond", items))
}

/// `(case key ((datum...) body...)... )`, with an optional trailing
/// `(else body...)`. Datum matching uses `eqv?`.
fn eval_case(items: &[Value], env: &Rc<Environment>) -> Result<Value, EvalError> {
    if items.len() < 2 {
        return Err(bad_form("Unrecognized special form", items));
    }
    let key = eval(&items[1], env)?;
    let clauses = &items[2..];
    for (i, clause) in clauses.iter().enumerate() {
        let Value::List(parts) = clause else {
            return Err(bad_form("Unrecognized special form", items));
        };
        let Some((head, body)) = parts.split_first() else {
            return Err(bad_form("Unrecognized special form", items));
        };
        if matches!(head, Value::Atom(s) if s == "else") {
            if i != clauses.len() - 1 {
                return Err(bad_form("else clause must be last in case", items));
            }
            return eval_clause_body(body, items, env);
        }
        let Value::List(datums) = head else {
            return Err(bad_form("Unrecognized special form", items));
        };
        if datums.iter().any(|d| crate::builtins::equality::eqv(d, &key)) {
            return eval_clause_body(body, items, env);
        }
    }
    Err(bad_form("No matching clause in case", items))
}

fn eval_set(items: &[Value], env: &Rc<Environment>) -> Result<Value, EvalError> {
    match items {
        [_, Value::Atom(name), expr] => {
            let value = eval(expr, env)?;
            env.set(name, value.clone())?;
            Ok(value)
        }
        _ => Err(bad_form("Unrecognized special form", items)),
    }
}

/// `(define name expr)` or `(define (name params...) body...)` / `(define
/// (name params... . rest) body...)`.
fn eval_define(items: &[Value], env: &Rc<Environment>) -> Result<Value, EvalError> {
    if items.len() < 3 {
        return Err(bad_form("Unrecognized special form", items));
    }
    match &items[1] {
        Value::Atom(name) => {
            if items.len() != 3 {
                return Err(bad_form("Unrecognized special form", items));
            }
            let value = eval(&items[2], env)?;
            env.define(name.clone(), value.clone());
            Ok(value)
        }
        Value::List(parts) => {
            let Some((Value::Atom(name), params)) = parts.split_first() else {
                return Err(bad_form("Unrecognized special form", items));
            };
            let params = atoms_to_names(params)?;
            let func = Value::Func {
                params,
                varargs: None,
                body: items[2..].to_vec(),
                closure: env.clone(),
            };
            env.define(name.clone(), func.clone());
            Ok(func)
        }
        Value::DottedList(parts, rest) => {
            let Some((Value::Atom(name), params)) = parts.split_first() else {
                return Err(bad_form("Unrecognized special form", items));
            };
            let Value::Atom(rest_name) = rest.as_ref() else {
                return Err(bad_form("Unrecognized special form", items));
            };
            let params = atoms_to_names(params)?;
            let func = Value::Func {
                params,
                varargs: Some(rest_name.clone()),
                body: items[2..].to_vec(),
                closure: env.clone(),
            };
            env.define(name.clone(), func.clone());
            Ok(func)
        }
        _ => Err(bad_form("Unrecognized special form", items)),
    }
}

/// `(lambda (params...) body...)`, `(lambda (params... . rest) body...)`,
/// or `(lambda rest body...)`.
fn eval_lambda(items: &[Value], env: &Rc<Environment>) -> Result<Value, EvalError> {
    if items.len() < 3 {
        return Err(bad_form("Unrecognized special form", items));
    }
    let body = items[2..].to_vec();
    match &items[1] {
        Value::List(params) => Ok(Value::Func {
            params: atoms_to_names(params)?,
            varargs: None,
            body,
            closure: env.clone(),
        }),
        Value::DottedList(params, rest) => {
            let Value::Atom(rest_name) = rest.as_ref() else {
                return Err(bad_form("Unrecognized special form", items));
            };
            Ok(Value::Func {
                params: atoms_to_names(params)?,
                varargs: Some(rest_name.clone()),
                body,
                closure: env.clone(),
            })
        }
        Value::Atom(rest_name) => Ok(Value::Func {
            params: vec![],
            varargs: Some(rest_name.clone()),
            body,
            closure: env.clone(),
        }),
        _ => Err(bad_form("Unrecognized special form", items)),
    }
}

fn atoms_to_names(values: &[Value]) -> Result<Vec<String>, EvalError> {
    values
        .iter()
        .map(|v| match v {
            Value::Atom(name) => Ok(name.clone()),
            other => Err(EvalError::type_mismatch("symbol", other)),
        })
        .collect()
}

/// `(load "path")` — reads every expression in the file and evaluates them
/// in order in the current environment, returning the last result.
fn eval_load(items: &[Value], env: &Rc<Environment>) -> Result<Value, EvalError> {
    let [_, path_expr] = items else {
        return Err(bad_form("Unrecognized special form", items));
    };
    let path = match eval(path_expr, env)? {
        Value::String(s) => s,
        other => return Err(EvalError::type_mismatch("string", &other)),
    };
    let contents =
        std::fs::read_to_string(&path).map_err(|e| EvalError::Default(format!("{path}: {e}")))?;
    let exprs = parser::parse_many(&contents)?;
    let mut result = Value::List(vec![]);
    for expr in &exprs {
        result = eval(expr, env)?;
    }
    Ok(result)
}

fn eval_application(items: &[Value], env: &Rc<Environment>) -> Result<Value, EvalError> {
    let callee = eval(&items[0], env)?;
    let mut args = Vec::with_capacity(items.len() - 1);
    for arg in &items[1..] {
        args.push(eval(arg, env)?);
    }
    apply_procedure(callee, args)
}

/// Applies `callee` to the already-evaluated `args`.
///
/// Exposed so that the `apply` IO primitive (which must dispatch through
/// exactly this logic, including `Func` arity/closure handling) can call
/// back into it.
pub fn apply_procedure(callee: Value, args: Vec<Value>) -> Result<Value, EvalError> {
    match callee {
        Value::PrimitiveFunc(f) => f(&args),
        Value::IOFunc(f) => f(&args),
        Value::Func {
            params,
            varargs,
            body,
            closure,
        } => {
            let arity_ok = match &varargs {
                Some(_) => args.len() >= params.len(),
                None => args.len() == params.len(),
            };
            if !arity_ok {
                let expected = match &varargs {
                    Some(_) => format!("at least {}", params.len()),
                    None => params.len().to_string(),
                };
                return Err(EvalError::num_args(expected, &args));
            }
            let mut bindings: Vec<(String, Value)> = params
                .iter()
                .cloned()
                .zip(args.iter().take(params.len()).cloned())
                .collect();
            if let Some(rest_name) = varargs {
                bindings.push((rest_name, Value::List(args[params.len()..].to_vec())));
            }
            let call_env = Environment::extend(closure, bindings);
            eval_body(&body, &call_env)
        }
        other => Err(EvalError::not_function("Not a function", other.to_string())),
    }
}
