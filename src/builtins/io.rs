// ABOUTME: IO primitives: apply, port open/close, read, write, file slurp

use crate::env::Environment;
use crate::error::EvalError;
use crate::eval::apply_procedure;
use crate::parser;
use crate::value::{PortDirection, PortHandle, Value};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::rc::Rc;

/// `(apply f args…)` — if the last argument is a `List`, its elements are
/// spread onto the call; otherwise every argument is passed verbatim.
pub fn apply(args: &[Value]) -> Result<Value, EvalError> {
    let [callee, rest @ ..] = args else {
        return Err(EvalError::num_args("at least 1", args));
    };
    let final_args = match rest.split_last() {
        Some((Value::List(spread), init)) => {
            let mut all = init.to_vec();
            all.extend(spread.iter().cloned());
            all
        }
        _ => rest.to_vec(),
    };
    apply_procedure(callee.clone(), final_args)
}

pub fn open_input_file(args: &[Value]) -> Result<Value, EvalError> {
    let [Value::String(path)] = args else {
        return Err(EvalError::num_args("1", args));
    };
    let file = File::open(path).map_err(|e| EvalError::Default(format!("{path}: {e}")))?;
    Ok(Value::Port(PortHandle::new_input(Box::new(BufReader::new(file)))))
}

pub fn open_output_file(args: &[Value]) -> Result<Value, EvalError> {
    let [Value::String(path)] = args else {
        return Err(EvalError::num_args("1", args));
    };
    let file = File::create(path).map_err(|e| EvalError::Default(format!("{path}: {e}")))?;
    Ok(Value::Port(PortHandle::new_output(Box::new(file))))
}

fn close_port(args: &[Value], direction: PortDirection) -> Result<Value, EvalError> {
    match args {
        [Value::Port(handle)] if handle.direction == direction => {
            handle.closed.set(true);
            Ok(Value::Bool(true))
        }
        [_] => Ok(Value::Bool(false)),
        _ => Err(EvalError::num_args("1", args)),
    }
}

pub fn close_input_port(args: &[Value]) -> Result<Value, EvalError> {
    close_port(args, PortDirection::Input)
}

pub fn close_output_port(args: &[Value]) -> Result<Value, EvalError> {
    close_port(args, PortDirection::Output)
}

/// Reads one line from the given port (default stdin), parses it as one
/// expression.
pub fn read(args: &[Value]) -> Result<Value, EvalError> {
    let mut line = String::new();
    match args {
        [] => {
            io::stdin()
                .lock()
                .read_line(&mut line)
                .map_err(|e| EvalError::Default(e.to_string()))?;
        }
        [Value::Port(handle)] => {
            let Some(reader) = &handle.reader else {
                return Err(EvalError::type_mismatch("input port", &args[0]));
            };
            if handle.closed.get() {
                return Err(EvalError::Default("read from a closed port".to_string()));
            }
            reader
                .borrow_mut()
                .read_line(&mut line)
                .map_err(|e| EvalError::Default(e.to_string()))?;
        }
        [other] => return Err(EvalError::type_mismatch("port", other)),
        _ => return Err(EvalError::num_args("0 or 1", args)),
    }
    parser::parse_one(&line)
}

/// Writes the printed form of `obj` followed by a newline to the port
/// (default stdout); returns `#t`.
pub fn write(args: &[Value]) -> Result<Value, EvalError> {
    let (obj, port) = match args {
        [obj] => (obj, None),
        [obj, Value::Port(handle)] => (obj, Some(handle)),
        [_, other] => return Err(EvalError::type_mismatch("port", other)),
        _ => return Err(EvalError::num_args("1 or 2", args)),
    };
    let line = format!("{obj}\n");
    match port {
        None => {
            print!("{line}");
            io::stdout().flush().map_err(|e| EvalError::Default(e.to_string()))?;
        }
        Some(handle) => {
            let Some(writer) = &handle.writer else {
                return Err(EvalError::type_mismatch("output port", &Value::Port(handle.clone())));
            };
            if handle.closed.get() {
                return Err(EvalError::Default("write to a closed port".to_string()));
            }
            writer
                .borrow_mut()
                .write_all(line.as_bytes())
                .map_err(|e| EvalError::Default(e.to_string()))?;
        }
    }
    Ok(Value::Bool(true))
}

pub fn read_contents(args: &[Value]) -> Result<Value, EvalError> {
    let [Value::String(path)] = args else {
        return Err(EvalError::num_args("1", args));
    };
    let contents =
        std::fs::read_to_string(path).map_err(|e| EvalError::Default(format!("{path}: {e}")))?;
    Ok(Value::String(contents))
}

pub fn read_all(args: &[Value]) -> Result<Value, EvalError> {
    let [Value::String(path)] = args else {
        return Err(EvalError::num_args("1", args));
    };
    let contents =
        std::fs::read_to_string(path).map_err(|e| EvalError::Default(format!("{path}: {e}")))?;
    Ok(Value::List(parser::parse_many(&contents)?))
}

pub fn register(env: &Rc<Environment>) {
    env.define("apply".to_string(), Value::IOFunc(apply));
    env.define("open-input-file".to_string(), Value::IOFunc(open_input_file));
    env.define("open-output-file".to_string(), Value::IOFunc(open_output_file));
    env.define("close-input-port".to_string(), Value::IOFunc(close_input_port));
    env.define("close-output-port".to_string(), Value::IOFunc(close_output_port));
    env.define("read".to_string(), Value::IOFunc(read));
    env.define("write".to_string(), Value::IOFunc(write));
    env.define("read-contents".to_string(), Value::IOFunc(read_contents));
    env.define("read-all".to_string(), Value::IOFunc(read_all));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::PrimitiveFn;
    use num_bigint::BigInt;

    fn identity(args: &[Value]) -> Result<Value, EvalError> {
        Ok(args.first().cloned().unwrap_or(Value::List(vec![])))
    }

    #[test]
    fn apply_spreads_trailing_list() {
        let f = Value::PrimitiveFunc(identity as PrimitiveFn);
        let args = vec![f, Value::List(vec![Value::Number(BigInt::from(9))])];
        assert!(matches!(apply(&args), Ok(Value::Number(n)) if n == BigInt::from(9)));
    }

    #[test]
    fn apply_passes_verbatim_without_trailing_list() {
        let f = Value::PrimitiveFunc(identity as PrimitiveFn);
        let args = vec![f, Value::Number(BigInt::from(3))];
        assert!(matches!(apply(&args), Ok(Value::Number(n)) if n == BigInt::from(3)));
    }

    #[test]
    fn close_input_port_false_for_non_port() {
        assert!(matches!(
            close_input_port(&[Value::Bool(true)]),
            Ok(Value::Bool(false))
        ));
    }

    #[test]
    fn close_input_port_true_for_matching_port() {
        let port = Value::Port(PortHandle::new_input(Box::new(io::empty())));
        assert!(matches!(close_input_port(&[port]), Ok(Value::Bool(true))));
    }
}
