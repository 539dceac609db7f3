pub mod ast;
pub mod decode;
pub mod evaluator;
pub mod lexer;
pub mod native;
pub mod parser;
pub mod query;
pub mod value;

pub use ast::{Expr, Op, Token, TokenKind};
pub use evaluator::{Context, EvalError, ROOT_VAR};
pub use lexer::{LexError, Lexer, lex};
pub use native::{BridgeError, HostFn, Native, from_native, json_to_native, native_to_json, to_native};
pub use parser::{ParseError, Parser};
pub use query::{Error, query, query_json, query_lazy};
pub use value::{Kind, NativeFn, Port, Value};
