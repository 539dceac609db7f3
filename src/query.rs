//! The primary entry points: run a query string against a host value.

use std::fmt;

use crate::evaluator::{Context, EvalError};
use crate::lexer::{LexError, lex};
use crate::native::{BridgeError, Native, from_native, json_to_native, native_to_json, to_native};
use crate::parser::{ParseError, Parser};

/// Any failure surfaced by a whole-query run.
///
/// Each stage's error propagates unchanged; nothing is retried or
/// defaulted, and a failed query leaves no state behind for the next one.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Lex(LexError),
    Parse(ParseError),
    Eval(EvalError),
    Bridge(BridgeError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Lex(e) => write!(f, "lex error: {}", e),
            Error::Parse(e) => write!(f, "parse error: {}", e),
            Error::Eval(e) => write!(f, "eval error: {}", e),
            Error::Bridge(e) => write!(f, "bridge error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Lex(e) => Some(e),
            Error::Parse(e) => Some(e),
            Error::Eval(e) => Some(e),
            Error::Bridge(e) => Some(e),
        }
    }
}

impl From<LexError> for Error {
    fn from(e: LexError) -> Self {
        Error::Lex(e)
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Error::Parse(e)
    }
}

impl From<EvalError> for Error {
    fn from(e: EvalError) -> Self {
        Error::Eval(e)
    }
}

impl From<BridgeError> for Error {
    fn from(e: BridgeError) -> Self {
        Error::Bridge(e)
    }
}

fn run(source: &str, input: &Native, lazy: bool) -> Result<Native, Error> {
    let tokens = lex(source)?;
    let expr = Parser::new(tokens).parse()?;
    let ctx = Context::with_root(from_native(input, lazy));
    let result = expr.eval(&ctx)?;
    Ok(to_native(result))
}

/// Runs `source` against `input` with eager bridging.
///
/// Equivalent to lex, parse, then evaluate with `$` bound to the input,
/// converting the result back to a host value.
///
/// # Examples
///
/// ```
/// use pluck_lang::{Native, query};
///
/// let input = Native::map([("foo", Native::seq([Native::Int(3), Native::Int(4)]))]);
/// assert_eq!(query("$.foo[0]", &input).unwrap(), Native::Int(3));
/// assert_eq!(query("1+2", &input).unwrap(), Native::Int(3));
/// ```
pub fn query(source: &str, input: &Native) -> Result<Native, Error> {
    run(source, input, false)
}

/// Runs `source` against `input` with lazy port bridging.
///
/// Observably equivalent to [`query`], but sequences and mappings are
/// traversed through ports: subtrees the query never touches are never
/// converted. Worthwhile when the input is large and the query reads a
/// few leaves.
pub fn query_lazy(source: &str, input: &Native) -> Result<Native, Error> {
    run(source, input, true)
}

/// Runs `source` against a JSON document, producing JSON.
///
/// # Examples
///
/// ```
/// use pluck_lang::query_json;
///
/// let input = serde_json::json!({"foo": [3, 4]});
/// assert_eq!(query_json("$.foo[0]", input).unwrap(), serde_json::json!(3));
/// ```
pub fn query_json(
    source: &str,
    input: serde_json::Value,
) -> Result<serde_json::Value, Error> {
    let native = json_to_native(input)?;
    let result = query(source, &native)?;
    Ok(native_to_json(&result))
}
