// ABOUTME: Reader module — parses Scheme source text into a Value tree via nom combinators

use crate::error::EvalError;
use crate::value::{Integer, Value};
use nom::{
    branch::alt,
    bytes::complete::take_while,
    character::complete::{char, digit1, multispace1, satisfy},
    combinator::recognize,
    multi::many0,
    IResult, Parser,
};
use std::str::FromStr;

const SYMBOL_CHARS: &str = "!$%&|*+-/:<=>?@^_~#";

fn is_symbol_char(c: char) -> bool {
    SYMBOL_CHARS.contains(c)
}

fn is_atom_start(c: char) -> bool {
    c.is_ascii_alphabetic() || is_symbol_char(c)
}

fn is_atom_cont(c: char) -> bool {
    c.is_ascii_alphabetic() || c.is_ascii_digit() || is_symbol_char(c)
}

fn ws0(input: &str) -> IResult<&str, ()> {
    many0(multispace1).map(|_| ()).parse(input)
}

fn parse_number(input: &str) -> IResult<&str, Value> {
    digit1
        .map(|s: &str| {
            Value::Number(Integer::from_str(s).expect("digit1 only emits valid decimal digits"))
        })
        .parse(input)
}

/// An atom whose text happens to be `#t`/`#f` is never an `Atom` — it's the
/// literal boolean, per the invariant that the reader never produces those
/// two atom names.
fn parse_atom_or_bool(input: &str) -> IResult<&str, Value> {
    let (rest, text) = recognize((satisfy(is_atom_start), take_while(is_atom_cont))).parse(input)?;
    let value = match text {
        "#t" => Value::Bool(true),
        "#f" => Value::Bool(false),
        _ => Value::Atom(text.to_string()),
    };
    Ok((rest, value))
}

/// No escape processing beyond delimiting: content runs until the next `"`.
fn parse_string(input: &str) -> IResult<&str, Value> {
    let (input, _) = char('"')(input)?;
    let (input, text) = take_while(|c| c != '"')(input)?;
    let (input, _) = char('"')(input)?;
    Ok((input, Value::String(text.to_string())))
}

/// `'x` rewrites to `(quote x)`.
fn parse_quoted(input: &str) -> IResult<&str, Value> {
    let (input, _) = char('\'')(input)?;
    let (input, expr) = parse_expr(input)?;
    Ok((input, Value::List(vec![Value::Atom("quote".to_string()), expr])))
}

/// `(expr...)`, proper or dotted, or `()` for the empty list.
///
/// A standalone `.` can only ever be the dotted-tail marker in this grammar
/// — no atom or number in this dialect starts with `.` — so detecting it by
/// lookahead for `.` is equivalent to the grammar's "try proper, then try
/// dotted" phrasing, without needing to backtrack.
fn parse_list(input: &str) -> IResult<&str, Value> {
    let (input, _) = char('(')(input)?;
    let (mut input, _) = ws0(input)?;
    let mut items = Vec::new();

    loop {
        if let Ok((rest, _)) = char::<_, nom::error::Error<&str>>(')')(input) {
            return Ok((rest, Value::List(items)));
        }

        if !items.is_empty() {
            if let Ok((rest, _)) = char::<_, nom::error::Error<&str>>('.')(input) {
                let (rest, _) = ws0(rest)?;
                let (rest, tail) = parse_expr(rest)?;
                let (rest, _) = ws0(rest)?;
                let (rest, _) = char(')')(rest)?;
                return Ok((rest, Value::dotted(items, tail)));
            }
        }

        let (rest, item) = parse_expr(input)?;
        items.push(item);
        let (rest, _) = ws0(rest)?;
        input = rest;
    }
}

fn parse_expr(input: &str) -> IResult<&str, Value> {
    let (input, _) = ws0(input)?;
    alt((parse_quoted, parse_list, parse_number, parse_string, parse_atom_or_bool)).parse(input)
}

fn position_of(original: &str, remaining: &str) -> (usize, usize) {
    let offset = original.len().saturating_sub(remaining.len());
    let mut line = 1usize;
    let mut col = 1usize;
    for ch in original[..offset.min(original.len())].chars() {
        if ch == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    (line, col)
}

fn parse_error_from_nom(original: &str, err: nom::Err<nom::error::Error<&str>>) -> EvalError {
    let remaining = match &err {
        nom::Err::Error(e) | nom::Err::Failure(e) => e.input,
        nom::Err::Incomplete(_) => "",
    };
    let (line, col) = position_of(original, remaining);
    EvalError::Parser(format!("line {line}, column {col}"))
}

/// Parses exactly one expression, failing if anything but whitespace
/// follows it.
pub fn parse_one(input: &str) -> Result<Value, EvalError> {
    match parse_expr(input) {
        Ok((rest, value)) => {
            let (rest, _) = ws0(rest).unwrap_or((rest, ()));
            if rest.is_empty() {
                Ok(value)
            } else {
                let (line, col) = position_of(input, rest);
                Err(EvalError::Parser(format!(
                    "line {line}, column {col}: unexpected trailing input"
                )))
            }
        }
        Err(e) => Err(parse_error_from_nom(input, e)),
    }
}

/// Parses every expression in `input`, in order — used for `load` and for
/// `read-all`.
pub fn parse_many(input: &str) -> Result<Vec<Value>, EvalError> {
    let mut remaining = input;
    let mut values = Vec::new();
    loop {
        let (rest, _) = ws0(remaining).unwrap_or((remaining, ()));
        if rest.is_empty() {
            break;
        }
        match parse_expr(rest) {
            Ok((rest2, value)) => {
                values.push(value);
                remaining = rest2;
            }
            Err(e) => return Err(parse_error_from_nom(input, e)),
        }
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(n: i64) -> Value {
        Value::Number(Integer::from(n))
    }

    #[test]
    fn parses_number() {
        assert!(matches!(parse_one("42"), Ok(Value::Number(n)) if n == Integer::from(42)));
    }

    #[test]
    fn parses_bool_not_atom() {
        assert!(matches!(parse_one("#t"), Ok(Value::Bool(true))));
        assert!(matches!(parse_one("#f"), Ok(Value::Bool(false))));
    }

    #[test]
    fn parses_atom_starting_with_symbol_char() {
        assert!(matches!(parse_one("+"), Ok(Value::Atom(s)) if s == "+"));
        assert!(matches!(parse_one("foo?"), Ok(Value::Atom(s)) if s == "foo?"));
        assert!(matches!(parse_one("set!"), Ok(Value::Atom(s)) if s == "set!"));
    }

    #[test]
    fn parses_string_without_escapes() {
        assert!(matches!(parse_one(r#""a\nb""#), Ok(Value::String(s)) if s == r"a\nb"));
    }

    #[test]
    fn parses_empty_list() {
        assert!(matches!(parse_one("()"), Ok(Value::List(items)) if items.is_empty()));
    }

    #[test]
    fn parses_proper_list() {
        match parse_one("(1 2 3)") {
            Ok(Value::List(items)) => assert_eq!(items.len(), 3),
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn parses_dotted_list() {
        match parse_one("(1 2 . 3)") {
            Ok(Value::DottedList(head, tail)) => {
                assert_eq!(head.len(), 2);
                assert!(matches!(*tail, Value::Number(n) if n == Integer::from(3)));
            }
            other => panic!("expected dotted list, got {other:?}"),
        }
    }

    #[test]
    fn dotted_tail_that_is_a_list_collapses() {
        match parse_one("(1 . (2 3))") {
            Ok(Value::List(items)) => assert_eq!(items.len(), 3),
            other => panic!("expected flattened proper list, got {other:?}"),
        }
    }

    #[test]
    fn quote_expands_to_quote_form() {
        match parse_one("'x") {
            Ok(Value::List(items)) => {
                assert_eq!(items.len(), 2);
                assert!(matches!(&items[0], Value::Atom(s) if s == "quote"));
                assert!(matches!(&items[1], Value::Atom(s) if s == "x"));
            }
            other => panic!("expected quote form, got {other:?}"),
        }
    }

    #[test]
    fn nested_lists() {
        match parse_one("(1 (2 3) 4)") {
            Ok(Value::List(items)) => {
                assert_eq!(items.len(), 3);
                assert!(matches!(&items[1], Value::List(inner) if inner.len() == 2));
            }
            other => panic!("expected nested list, got {other:?}"),
        }
    }

    #[test]
    fn unexpected_trailing_input_is_a_parse_error() {
        assert!(parse_one("1 2").is_err());
    }

    #[test]
    fn unclosed_list_is_a_parse_error() {
        assert!(parse_one("(1 2").is_err());
    }

    #[test]
    fn parse_many_reads_all_top_level_forms() {
        let values = parse_many("(define x 1) (define y 2) (+ x y)").unwrap();
        assert_eq!(values.len(), 3);
    }

    #[test]
    fn parse_error_reports_line_and_column() {
        let err = parse_one("(1 2").unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("Parse error at line"));
    }

    #[test]
    fn numbers_round_trip_through_show() {
        let v = num(12345);
        let shown = v.to_string();
        assert!(matches!(parse_one(&shown), Ok(Value::Number(n)) if n == Integer::from(12345)));
    }
}
