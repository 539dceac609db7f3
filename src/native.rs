//! Bridging between host-native dynamic values and the value system.
//!
//! Hosts hand data in as [`Native`] and get results back as [`Native`].
//! Conversion into the value system is either eager (sequences and
//! mappings materialize element-wise) or lazy (they become ports that
//! defer conversion of nested structure until accessed). JSON interop
//! goes through serde_json.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::evaluator::EvalError;
use crate::value::{Cargo, NativeFn, Port, Value};

/// A host-provided callable at the bridge boundary.
///
/// Cloning shares the closure; equality is handle identity.
#[derive(Clone)]
pub struct HostFn(Rc<dyn Fn(&[Native]) -> Result<Native, EvalError>>);

impl HostFn {
    pub fn new(f: impl Fn(&[Native]) -> Result<Native, EvalError> + 'static) -> Self {
        HostFn(Rc::new(f))
    }

    pub fn call(&self, args: &[Native]) -> Result<Native, EvalError> {
        (self.0)(args)
    }
}

impl fmt::Debug for HostFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HostFn(..)")
    }
}

impl PartialEq for HostFn {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// A host-native dynamically-typed value.
///
/// Sequence and mapping payloads are `Rc`-shared so that lazy bridging
/// can hold onto subtrees without copying them; cloning a `Native` is
/// cheap at every level.
#[derive(Debug, Clone, PartialEq)]
pub enum Native {
    Int(i64),
    Float(f64),
    Str(String),
    Seq(Rc<Vec<Native>>),
    Map(Rc<HashMap<String, Native>>),
    Func(HostFn),
}

impl Native {
    /// A sequence from plain elements.
    pub fn seq(elems: impl IntoIterator<Item = Native>) -> Native {
        Native::Seq(Rc::new(elems.into_iter().collect()))
    }

    /// A mapping from key/value pairs.
    pub fn map<K: Into<String>>(pairs: impl IntoIterator<Item = (K, Native)>) -> Native {
        Native::Map(Rc::new(
            pairs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        ))
    }

    /// A callable from a closure.
    pub fn func(f: impl Fn(&[Native]) -> Result<Native, EvalError> + 'static) -> Native {
        Native::Func(HostFn::new(f))
    }
}

impl From<i64> for Native {
    fn from(i: i64) -> Self {
        Native::Int(i)
    }
}

impl From<f64> for Native {
    fn from(n: f64) -> Self {
        Native::Float(n)
    }
}

impl From<&str> for Native {
    fn from(s: &str) -> Self {
        Native::Str(s.to_string())
    }
}

impl From<String> for Native {
    fn from(s: String) -> Self {
        Native::Str(s)
    }
}

/// Transforms a host value into the value system.
///
/// Primitives convert verbatim. Sequences and mappings convert
/// element-wise when `lazy` is false, or become [`Port`]s sharing the
/// host data when `lazy` is true: nothing nested is converted until an
/// operator actually reaches for it. Callables are always wrapped
/// (arguments and results marshal back through this bridge, results
/// keeping the same lazy flag).
pub fn from_native(n: &Native, lazy: bool) -> Value {
    match n {
        Native::Int(i) => Value::Int(*i),
        Native::Float(f) => Value::Float(*f),
        Native::Str(s) => Value::Str(s.clone()),

        Native::Seq(seq) => {
            if lazy {
                Value::Port(Port::new(Cargo::Seq(Rc::clone(seq))))
            } else {
                Value::Array(seq.iter().map(|e| from_native(e, false)).collect())
            }
        }

        Native::Map(map) => {
            if lazy {
                Value::Port(Port::new(Cargo::Map(Rc::clone(map))))
            } else {
                Value::Map(
                    map.iter()
                        .map(|(k, v)| (k.clone(), from_native(v, false)))
                        .collect(),
                )
            }
        }

        Native::Func(host) => {
            let host = host.clone();
            Value::Func(NativeFn::new(move |args| {
                let native_args: Vec<Native> =
                    args.iter().map(|a| to_native(a.clone())).collect();
                Ok(from_native(&host.call(&native_args)?, lazy))
            }))
        }
    }
}

/// Transforms a value back into a host value.
///
/// Ports unwrap to the host data they bridge with no conversion; funcs
/// become host callables marshaling through the bridge.
pub fn to_native(v: Value) -> Native {
    match v {
        Value::Int(i) => Native::Int(i),
        Value::Float(n) => Native::Float(n),
        Value::Str(s) => Native::Str(s),
        Value::Array(a) => Native::Seq(Rc::new(a.into_iter().map(to_native).collect())),
        Value::Map(m) => Native::Map(Rc::new(
            m.into_iter().map(|(k, v)| (k, to_native(v))).collect(),
        )),
        Value::Func(f) => Native::Func(HostFn::new(move |args| {
            let vals: Vec<Value> = args.iter().map(|a| from_native(a, false)).collect();
            Ok(to_native(f.call(&vals)?))
        })),
        Value::Port(p) => p.into_native(),
    }
}

/// A JSON value the bridge cannot represent.
///
/// The value system has neither null nor booleans, matching the original
/// surface of the language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    UnsupportedJson { json_type: &'static str },
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BridgeError::UnsupportedJson { json_type } => {
                write!(f, "JSON {} has no native counterpart", json_type)
            }
        }
    }
}

impl std::error::Error for BridgeError {}

/// Converts parsed JSON into a host value.
///
/// Numbers become ints when they fit `i64` and floats otherwise; `null`
/// and booleans are rejected.
pub fn json_to_native(v: serde_json::Value) -> Result<Native, BridgeError> {
    match v {
        serde_json::Value::Null => Err(BridgeError::UnsupportedJson { json_type: "null" }),
        serde_json::Value::Bool(_) => Err(BridgeError::UnsupportedJson {
            json_type: "boolean",
        }),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Native::Int(i))
            } else {
                // as_f64 is total for serde_json numbers
                Ok(Native::Float(n.as_f64().unwrap_or(f64::NAN)))
            }
        }
        serde_json::Value::String(s) => Ok(Native::Str(s)),
        serde_json::Value::Array(arr) => Ok(Native::Seq(Rc::new(
            arr.into_iter()
                .map(json_to_native)
                .collect::<Result<_, _>>()?,
        ))),
        serde_json::Value::Object(obj) => Ok(Native::Map(Rc::new(
            obj.into_iter()
                .map(|(k, v)| Ok((k, json_to_native(v)?)))
                .collect::<Result<_, BridgeError>>()?,
        ))),
    }
}

/// Converts a host value to JSON.
///
/// Callables and non-finite floats have no JSON form and map to null.
pub fn native_to_json(n: &Native) -> serde_json::Value {
    match n {
        Native::Int(i) => serde_json::Value::Number((*i).into()),
        Native::Float(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Native::Str(s) => serde_json::Value::String(s.clone()),
        Native::Seq(seq) => serde_json::Value::Array(seq.iter().map(native_to_json).collect()),
        Native::Map(map) => serde_json::Value::Object(
            map.iter().map(|(k, v)| (k.clone(), native_to_json(v))).collect(),
        ),
        Native::Func(_) => serde_json::Value::Null,
    }
}
