use std::fmt;

use crate::ast::Op;

/// Abstract Syntax Tree node representing a parsed expression.
///
/// A parent node exclusively owns its children; the tree is acyclic and
/// never mutated after parsing.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Integer literal
    Int(i64),

    /// Float literal
    Float(f64),

    /// String literal
    Str(String),

    /// Variable reference, resolved against the evaluation context
    ///
    /// # Examples
    /// ```text
    /// $
    /// foo
    /// ```
    Var(String),

    /// Unary operation: the operator binds the entire remaining
    /// expression, so `!a + b` parses as `!(a + b)`.
    Unary { op: Op, right: Box<Expr> },

    /// Binary operation
    ///
    /// Index and field access are binary nodes too; `$.foo` has
    /// `op: Field` with `Str("foo")` as its right operand.
    Binary {
        op: Op,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Call of a callee expression with comma-separated arguments
    ///
    /// The callee may itself be a chain (`$[0].f()()` is legal).
    Call { func: Box<Expr>, args: Vec<Expr> },
}

impl Expr {
    pub fn binary(op: Op, left: Expr, right: Expr) -> Expr {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn unary(op: Op, right: Expr) -> Expr {
        Expr::Unary {
            op,
            right: Box::new(right),
        }
    }
}

/// Renders the tree in an unambiguous fully-parenthesized form, used in
/// parse diagnostics.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Int(i) => write!(f, "<int {}>", i),
            Expr::Float(n) => write!(f, "<float {}>", n),
            Expr::Str(s) => write!(f, "<string {}>", s),
            Expr::Var(name) => write!(f, "<var {}>", name),
            Expr::Unary { op, right } => write!(f, "({} {})", op, right),
            Expr::Binary { op: Op::Index, left, right } => {
                write!(f, "({}[{}])", left, right)
            }
            Expr::Binary { op, left, right } => {
                write!(f, "({} {} {})", left, op, right)
            }
            Expr::Call { func, args } => {
                write!(f, "({}(", func)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, "))")
            }
        }
    }
}
