//! # Pluck Query Language - Abstract Syntax Tree
//!
//! This module defines the lexical tokens and expression tree for the Pluck
//! query language, a small path/expression language for extracting values
//! out of dynamically-typed data.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[operators]** - Unary/binary operators, including index and field access
//! - **[expressions]** - Expression nodes (literals, variables, operations, calls)
//!
//! ## Core Concepts
//!
//! Every query is a single expression evaluated against a set of variable
//! bindings, conventionally including `$` for the query's input:
//!
//! ```text
//! $.foo[0].bar()
//! ```
//!
//! Field access is sugar: `$.foo` parses to the same binary node shape as
//! `$['foo']` would, with the field name as a string literal on the right.
//! Postfix index/call/field operators chain in any order and quantity.
//!
//! All binary operators share a single precedence level and associate to
//! the right: `1+2+3` parses as `1+(2+3)`. A parsed tree is immutable.

pub mod expressions;
pub mod operators;
pub mod tokens;

pub use expressions::Expr;
pub use operators::Op;
pub use tokens::{Token, TokenKind};
