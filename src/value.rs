//! The runtime value system: a closed set of value variants with explicit
//! promotion and conversion rules, plus the binary-operator dispatch that
//! drives index/field/arithmetic evaluation.

pub mod binary;
pub mod port;

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::evaluator::EvalError;

pub use port::{Cargo, Port};

/// Type tag of a [`Value`], in promotion-rank order.
///
/// Declaration order is the rank: for a binary operation both operands are
/// converted to the higher-ranked ("winning") of their two kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Kind {
    Int,
    Float,
    String,
    Array,
    Map,
    Port,
    Func,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Kind::Int => "int",
            Kind::Float => "float",
            Kind::String => "string",
            Kind::Array => "array",
            Kind::Map => "map",
            Kind::Port => "port",
            Kind::Func => "func",
        };
        f.write_str(s)
    }
}

/// A host-provided callable living inside the value system.
///
/// Cloning shares the underlying closure; equality is handle identity.
#[derive(Clone)]
pub struct NativeFn(Rc<dyn Fn(&[Value]) -> Result<Value, EvalError>>);

impl NativeFn {
    pub fn new(f: impl Fn(&[Value]) -> Result<Value, EvalError> + 'static) -> Self {
        NativeFn(Rc::new(f))
    }

    pub fn call(&self, args: &[Value]) -> Result<Value, EvalError> {
        (self.0)(args)
    }
}

impl fmt::Debug for NativeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NativeFn(..)")
    }
}

impl PartialEq for NativeFn {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// A runtime value.
///
/// Values are created during evaluation and native bridging and are never
/// mutated once constructed; operators produce fresh values.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// 64-bit signed integer
    Int(i64),

    /// 64-bit float
    Float(f64),

    /// String
    Str(String),

    /// Ordered sequence of values
    Array(Vec<Value>),

    /// String-keyed mapping; unordered for iteration, string-sorted for
    /// display
    Map(HashMap<String, Value>),

    /// Host callable
    Func(NativeFn),

    /// Lazy bridge to host-native data, see [`Port`]
    Port(Port),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Int(_) => Kind::Int,
            Value::Float(_) => Kind::Float,
            Value::Str(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Map(_) => Kind::Map,
            Value::Func(_) => Kind::Func,
            Value::Port(_) => Kind::Port,
        }
    }

    /// Converts this value to the target kind.
    ///
    /// Conversion is a partial function, defined for exactly these pairs
    /// (besides the identity conversions):
    ///
    /// - `Int -> Float` widens
    /// - `Int -> Array` and `Float -> Array` wrap a singleton
    /// - `Int -> Port` adapts so the port's `get` yields the int, letting
    ///   int operands take part in index operations against ports
    /// - `Str -> Map` wraps as `{"key": s}`, letting string operands take
    ///   part in key lookups against maps
    /// - `Str -> Port` adapts so the port's `get` yields the string
    ///
    /// Any other pair fails with [`EvalError::TypeConversion`].
    pub fn convert(self, to: Kind) -> Result<Value, EvalError> {
        let from = self.kind();
        if from == to {
            return Ok(self);
        }

        match (self, to) {
            (Value::Int(i), Kind::Float) => Ok(Value::Float(i as f64)),
            (Value::Int(i), Kind::Array) => Ok(Value::Array(vec![Value::Int(i)])),
            (Value::Int(i), Kind::Port) => Ok(Value::Port(Port::new(Cargo::Int(i)))),
            (Value::Float(n), Kind::Array) => Ok(Value::Array(vec![Value::Float(n)])),
            (Value::Str(s), Kind::Map) => {
                let mut m = HashMap::with_capacity(1);
                m.insert("key".to_string(), Value::Str(s));
                Ok(Value::Map(m))
            }
            (Value::Str(s), Kind::Port) => Ok(Value::Port(Port::new(Cargo::Str(s)))),
            _ => Err(EvalError::TypeConversion { from, to }),
        }
    }

    /// Normalizes a computed value to a more specific type when safe: a
    /// whole-valued float collapses to an int, a single-element array to
    /// its element. Idempotent.
    pub fn shrink(self) -> Value {
        match self {
            Value::Float(n) if n.fract() == 0.0 && n.is_finite() => {
                if n >= i64::MIN as f64 && n <= i64::MAX as f64 {
                    Value::Int(n as i64)
                } else {
                    Value::Float(n)
                }
            }
            Value::Array(mut a) if a.len() == 1 => a.remove(0),
            v => v,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(n) => write!(f, "{}", n),
            Value::Str(s) => f.write_str(s),
            Value::Array(a) => {
                write!(f, "[")?;
                for (i, v) in a.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                write!(f, "]")
            }
            Value::Map(m) => {
                // string-sorted so rendering is deterministic
                let mut entries: Vec<String> =
                    m.iter().map(|(k, v)| format!("{}:{}", k, v)).collect();
                entries.sort();
                write!(f, "{{{}}}", entries.join(", "))
            }
            Value::Func(_) => f.write_str("func()"),
            Value::Port(_) => f.write_str("{ port }"),
        }
    }
}
