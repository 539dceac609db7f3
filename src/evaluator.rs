use std::collections::HashMap;
use std::fmt;

use crate::ast::{Expr, Op};
use crate::value::{Kind, Value, binary};

/// Variable bindings available during one evaluation.
///
/// A context is supplied fresh per top-level query invocation and is
/// read-only during evaluation; the expression language itself never
/// introduces a binding. The query's input is conventionally bound to
/// the root variable `$`.
#[derive(Debug, Clone, Default)]
pub struct Context {
    decls: HashMap<String, Value>,
}

/// The conventional name of the root binding.
pub const ROOT_VAR: &str = "$";

impl Context {
    pub fn new() -> Self {
        Context::default()
    }

    /// A context with `value` bound to the root variable `$`.
    pub fn with_root(value: Value) -> Self {
        let mut ctx = Context::new();
        ctx.declare(ROOT_VAR, value);
        ctx
    }

    /// Binds `name` to `value`. This is the host's hook for exposing
    /// extra variables (including callables) to queries.
    pub fn declare(&mut self, name: impl Into<String>, value: Value) {
        self.decls.insert(name.into(), value);
    }

    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.decls.get(name)
    }
}

/// Errors that abort evaluation.
///
/// All of these are unrecoverable within a single query: the engine does
/// not retry or substitute defaults, and a failed query leaves no shared
/// state behind.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// Variable reference not bound in the context
    UndeclaredVariable(String),

    /// No defined conversion between the two kinds
    TypeConversion { from: Kind, to: Kind },

    /// No dispatch entry for this operator at this winning kind
    UnsupportedOperator { op: Op, kind: Kind },

    /// Unary operators are declared in the grammar but carry no
    /// evaluation semantics
    UnsupportedUnary { op: Op },

    /// A value of the wrong shape where a specific one is required,
    /// e.g. a non-callable invoked or a non-integer array index
    TypeMismatch(String),

    /// Map lookup miss
    KeyNotFound(String),

    /// Array or port-sequence index outside `0..len`
    IndexOutOfRange { index: i64, len: usize },

    /// A port capability invoked on a backing shape that does not
    /// support it
    UnsupportedCapability {
        operation: &'static str,
        backing: &'static str,
    },
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::UndeclaredVariable(name) => {
                write!(f, "variable not declared in context: {}", name)
            }
            EvalError::TypeConversion { from, to } => {
                write!(f, "no conversion from '{}' to '{}'", from, to)
            }
            EvalError::UnsupportedOperator { op, kind } => {
                write!(f, "operator '{}' not implemented for type '{}'", op, kind)
            }
            EvalError::UnsupportedUnary { op } => {
                write!(f, "unary operator '{}' is not implemented", op)
            }
            EvalError::TypeMismatch(msg) => write!(f, "type mismatch: {}", msg),
            EvalError::KeyNotFound(key) => write!(f, "object doesn't have key: {}", key),
            EvalError::IndexOutOfRange { index, len } => {
                write!(f, "index {} out of range for length {}", index, len)
            }
            EvalError::UnsupportedCapability { operation, backing } => {
                write!(f, "'{}' not supported on a port backed by a {}", operation, backing)
            }
        }
    }
}

impl std::error::Error for EvalError {}

impl Expr {
    /// Walks this expression tree against the context's bindings.
    ///
    /// Literals evaluate to themselves (a whole-valued float literal
    /// shrinks to an int). Binary operands evaluate right side first;
    /// that order is observable through host callables and is part of
    /// the contract. Call arguments evaluate left to right.
    pub fn eval(&self, ctx: &Context) -> Result<Value, EvalError> {
        match self {
            Expr::Int(i) => Ok(Value::Int(*i)),
            Expr::Float(n) => Ok(Value::Float(*n).shrink()),
            Expr::Str(s) => Ok(Value::Str(s.clone())),

            Expr::Var(name) => match ctx.lookup(name) {
                Some(v) => Ok(v.clone()),
                None => Err(EvalError::UndeclaredVariable(name.clone())),
            },

            // declared in the grammar, deliberately without semantics
            Expr::Unary { op, right: _ } => Err(EvalError::UnsupportedUnary { op: *op }),

            Expr::Binary { op, left, right } => {
                let rhs = right.eval(ctx)?;
                let lhs = left.eval(ctx)?;
                binary::apply(*op, lhs, rhs)
            }

            Expr::Call { func, args } => {
                let callee = func.eval(ctx)?;
                let Value::Func(f) = callee else {
                    return Err(EvalError::TypeMismatch(format!(
                        "cannot call a value of type '{}'",
                        callee.kind()
                    )));
                };

                let mut argv = Vec::with_capacity(args.len());
                for arg in args {
                    argv.push(arg.eval(ctx)?);
                }

                f.call(&argv)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::NativeFn;

    #[test]
    fn literals_evaluate_to_themselves() {
        let ctx = Context::new();
        assert_eq!(Expr::Int(1).eval(&ctx).unwrap(), Value::Int(1));
        assert_eq!(Expr::Float(1.5).eval(&ctx).unwrap(), Value::Float(1.5));
        assert_eq!(
            Expr::Str("x".into()).eval(&ctx).unwrap(),
            Value::Str("x".into())
        );
    }

    #[test]
    fn whole_float_literal_shrinks() {
        let ctx = Context::new();
        assert_eq!(Expr::Float(1.0).eval(&ctx).unwrap(), Value::Int(1));
    }

    #[test]
    fn variables_resolve_through_context() {
        let mut ctx = Context::new();
        ctx.declare("foo", Value::Int(4));
        assert_eq!(
            Expr::Var("foo".into()).eval(&ctx).unwrap(),
            Value::Int(4)
        );
        assert_eq!(
            Expr::Var("bar".into()).eval(&ctx).unwrap_err(),
            EvalError::UndeclaredVariable("bar".to_string())
        );
    }

    #[test]
    fn root_binding() {
        let ctx = Context::with_root(Value::Str("in".into()));
        assert_eq!(
            Expr::Var("$".into()).eval(&ctx).unwrap(),
            Value::Str("in".into())
        );
    }

    #[test]
    fn unary_is_unsupported() {
        let ctx = Context::new();
        let e = Expr::unary(Op::Not, Expr::Int(1));
        assert_eq!(
            e.eval(&ctx).unwrap_err(),
            EvalError::UnsupportedUnary { op: Op::Not }
        );
    }

    #[test]
    fn call_invokes_func_values() {
        let mut ctx = Context::new();
        ctx.declare(
            "sum",
            Value::Func(NativeFn::new(|args| {
                let mut total = 0;
                for a in args {
                    let Value::Int(i) = a else {
                        return Err(EvalError::TypeMismatch("int args only".into()));
                    };
                    total += i;
                }
                Ok(Value::Int(total))
            })),
        );

        let call = Expr::Call {
            func: Box::new(Expr::Var("sum".into())),
            args: vec![Expr::Int(5), Expr::Int(15)],
        };
        assert_eq!(call.eval(&ctx).unwrap(), Value::Int(20));
    }

    #[test]
    fn calling_a_non_callable_fails() {
        let ctx = Context::with_root(Value::Int(1));
        let call = Expr::Call {
            func: Box::new(Expr::Var("$".into())),
            args: vec![],
        };
        assert!(matches!(
            call.eval(&ctx).unwrap_err(),
            EvalError::TypeMismatch(_)
        ));
    }

    #[test]
    fn binary_evaluates_right_side_first() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let order = Rc::new(RefCell::new(Vec::new()));
        let mut ctx = Context::new();
        for name in ["l", "r"] {
            let order = Rc::clone(&order);
            ctx.declare(
                name,
                Value::Func(NativeFn::new(move |_| {
                    order.borrow_mut().push(name);
                    Ok(Value::Int(1))
                })),
            );
        }

        let e = Expr::binary(
            Op::Add,
            Expr::Call {
                func: Box::new(Expr::Var("l".into())),
                args: vec![],
            },
            Expr::Call {
                func: Box::new(Expr::Var("r".into())),
                args: vec![],
            },
        );

        assert_eq!(e.eval(&ctx).unwrap(), Value::Int(2));
        assert_eq!(*order.borrow(), vec!["r", "l"]);
    }
}
