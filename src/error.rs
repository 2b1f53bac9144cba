// ABOUTME: Error taxonomy propagated through parsing and evaluation

use crate::value::Value;
use thiserror::Error;

fn show_list(values: &[Value]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Every way a read or an evaluation can fail.
///
/// `Display` renders the "`<Kind>: <detail>`" user-visible form described in
/// the error handling design; the REPL and batch driver print this directly
/// in place of a value.
#[derive(Error, Debug, Clone)]
pub enum EvalError {
    #[error("Expected {expected} args; found values {}", show_list(.got))]
    NumArgs { expected: String, got: Vec<Value> },

    #[error("Invalid type: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: Value },

    #[error("Parse error at {0}")]
    Parser(String),

    #[error("{message}: {form}")]
    BadSpecialForm { message: String, form: Value },

    #[error("{message}: {callee}")]
    NotFunction { message: String, callee: String },

    #[error("{message}: {name}")]
    UnboundVar { message: String, name: String },

    #[error("{0}")]
    Default(String),
}

impl EvalError {
    pub fn num_args(expected: impl Into<String>, got: &[Value]) -> Self {
        EvalError::NumArgs {
            expected: expected.into(),
            got: got.to_vec(),
        }
    }

    pub fn type_mismatch(expected: impl Into<String>, found: &Value) -> Self {
        EvalError::TypeMismatch {
            expected: expected.into(),
            found: found.clone(),
        }
    }

    pub fn bad_special_form(message: impl Into<String>, form: &Value) -> Self {
        EvalError::BadSpecialForm {
            message: message.into(),
            form: form.clone(),
        }
    }

    pub fn not_function(message: impl Into<String>, callee: impl Into<String>) -> Self {
        EvalError::NotFunction {
            message: message.into(),
            callee: callee.into(),
        }
    }

    pub fn unbound_var(message: impl Into<String>, name: impl Into<String>) -> Self {
        EvalError::UnboundVar {
            message: message.into(),
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    #[test]
    fn num_args_message() {
        let err = EvalError::num_args("2", &[Value::Number(BigInt::from(1))]);
        assert_eq!(err.to_string(), "Expected 2 args; found values 1");
    }

    #[test]
    fn type_mismatch_message() {
        let err = EvalError::type_mismatch("pair", &Value::Bool(false));
        assert_eq!(err.to_string(), "Invalid type: expected pair, found #f");
    }

    #[test]
    fn unbound_var_message() {
        let err = EvalError::unbound_var("Getting an unbound variable", "x");
        assert_eq!(
            err.to_string(),
            "Getting an unbound variable: x"
        );
    }

    #[test]
    fn parser_message_includes_detail() {
        let err = EvalError::Parser("line 1, column 3".to_string());
        assert_eq!(err.to_string(), "Parse error at line 1, column 3");
    }
}
