use std::fmt;

use crate::ast::TokenKind;

/// Operators as they appear in the expression tree.
///
/// Index and field access are operators too: `$.foo` and `$[0]` both parse
/// to a binary node, differing only in the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    // Arithmetic
    /// Addition or string concatenation (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Quo,
    /// Remainder (`%`)
    Rem,

    // Comparison
    /// Equality (`==`)
    Equal,
    /// Inequality (`!=`)
    NotEqual,
    /// Less than (`<`)
    Less,
    /// Less than or equal (`<=`)
    LessEq,
    /// Greater than (`>`)
    Greater,
    /// Greater than or equal (`>=`)
    GreaterEq,

    /// Logical not (`!`)
    Not,

    // Postfix
    /// Index access (`a[i]`)
    Index,
    /// Field access (`a.name`)
    Field,
}

impl TokenKind {
    /// The operator this token stands for in an expression, if any.
    ///
    /// Besides the operator tokens proper, `[` maps to [`Op::Index`] and
    /// `.` to [`Op::Field`] since postfix access parses into binary nodes.
    pub fn op(self) -> Option<Op> {
        let op = match self {
            TokenKind::Add => Op::Add,
            TokenKind::Sub => Op::Sub,
            TokenKind::Mul => Op::Mul,
            TokenKind::Quo => Op::Quo,
            TokenKind::Rem => Op::Rem,
            TokenKind::Equal => Op::Equal,
            TokenKind::NotEqual => Op::NotEqual,
            TokenKind::Lt => Op::Less,
            TokenKind::Lte => Op::LessEq,
            TokenKind::Gt => Op::Greater,
            TokenKind::Gte => Op::GreaterEq,
            TokenKind::Not => Op::Not,
            TokenKind::LBrack => Op::Index,
            TokenKind::Dot => Op::Field,
            _ => return None,
        };
        Some(op)
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Op::Add => "+",
            Op::Sub => "-",
            Op::Mul => "*",
            Op::Quo => "/",
            Op::Rem => "%",
            Op::Equal => "==",
            Op::NotEqual => "!=",
            Op::Less => "<",
            Op::LessEq => "<=",
            Op::Greater => ">",
            Op::GreaterEq => ">=",
            Op::Not => "!",
            Op::Index => "[]",
            Op::Field => ".",
        };
        f.write_str(s)
    }
}
