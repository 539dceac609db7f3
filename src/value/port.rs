use std::collections::HashMap;
use std::rc::Rc;

use crate::evaluator::EvalError;
use crate::native::{Native, from_native};
use crate::value::Value;

/// What a [`Port`] bridges to.
///
/// Each backing shape supports exactly one of the two port capabilities:
/// mappings answer `get`, sequences answer `range`. The scalar cargos
/// exist so that int and string operands can be promoted to ports and
/// hand their own value to the operator implementation.
#[derive(Debug, Clone, PartialEq)]
pub enum Cargo {
    /// Host mapping, keyed access via `get`
    Map(Rc<HashMap<String, Native>>),

    /// Host sequence, positional access via `range`
    Seq(Rc<Vec<Native>>),

    /// Promoted int operand; `get` yields the int itself
    Int(i64),

    /// Promoted string operand; `get` yields the string itself
    Str(String),
}

impl Cargo {
    fn backing(&self) -> &'static str {
        match self {
            Cargo::Map(_) => "map",
            Cargo::Seq(_) => "seq",
            Cargo::Int(_) => "int",
            Cargo::Str(_) => "string",
        }
    }
}

/// A lazy, shared-ownership bridge to a host-native value.
///
/// A port defers conversion of nested structure until a specific key or
/// range is accessed; whatever it hands back is itself lazily bridged.
/// It exposes exactly two capabilities, each valid only for certain
/// backing shapes; invoking the wrong one is a typed failure.
#[derive(Debug, Clone, PartialEq)]
pub struct Port {
    cargo: Cargo,
}

impl Port {
    pub fn new(cargo: Cargo) -> Self {
        Port { cargo }
    }

    /// Looks up `key` in the bridged value.
    ///
    /// Valid for map, int and string cargo (the scalar cargos ignore the
    /// key and yield their own value). A sequence cargo fails with
    /// [`EvalError::UnsupportedCapability`].
    pub fn get(&self, key: &str) -> Result<Value, EvalError> {
        match &self.cargo {
            Cargo::Map(m) => match m.get(key) {
                Some(n) => Ok(from_native(n, true)),
                None => Err(EvalError::KeyNotFound(key.to_string())),
            },
            Cargo::Int(i) => Ok(Value::Int(*i)),
            Cargo::Str(s) => Ok(Value::Str(s.clone())),
            Cargo::Seq(_) => Err(EvalError::UnsupportedCapability {
                operation: "get",
                backing: self.cargo.backing(),
            }),
        }
    }

    /// Bridges the elements `lo..hi` of the bridged sequence, shrinking
    /// a single-element result to its bare element.
    ///
    /// Only valid for sequence cargo; negative or out-of-range bounds
    /// fail rather than clamp, reporting the sequence length.
    pub fn range(&self, lo: i64, hi: i64) -> Result<Value, EvalError> {
        match &self.cargo {
            Cargo::Seq(seq) => {
                let bounds = usize::try_from(lo)
                    .ok()
                    .zip(usize::try_from(hi).ok())
                    .filter(|&(l, h)| l <= h && h <= seq.len());
                let Some((lo, hi)) = bounds else {
                    return Err(EvalError::IndexOutOfRange {
                        index: lo,
                        len: seq.len(),
                    });
                };

                let vals = seq[lo..hi].iter().map(|n| from_native(n, true)).collect();
                Ok(Value::Array(vals).shrink())
            }
            _ => Err(EvalError::UnsupportedCapability {
                operation: "range",
                backing: self.cargo.backing(),
            }),
        }
    }

    /// The host data this port bridges, with no conversion performed.
    pub fn into_native(self) -> Native {
        match self.cargo {
            Cargo::Map(m) => Native::Map(m),
            Cargo::Seq(s) => Native::Seq(s),
            Cargo::Int(i) => Native::Int(i),
            Cargo::Str(s) => Native::Str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq_port(vals: Vec<Native>) -> Port {
        Port::new(Cargo::Seq(Rc::new(vals)))
    }

    fn map_port(pairs: Vec<(&str, Native)>) -> Port {
        let m = pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect::<HashMap<_, _>>();
        Port::new(Cargo::Map(Rc::new(m)))
    }

    #[test]
    fn map_get_bridges_lazily() {
        let port = map_port(vec![
            ("a", Native::Int(1)),
            ("nested", Native::Seq(Rc::new(vec![Native::Int(2)]))),
        ]);

        assert_eq!(port.get("a").unwrap(), Value::Int(1));
        // nested structure comes back as a port, not a materialized array
        assert!(matches!(port.get("nested").unwrap(), Value::Port(_)));
    }

    #[test]
    fn map_get_missing_key() {
        let port = map_port(vec![("a", Native::Int(1))]);
        assert_eq!(
            port.get("b").unwrap_err(),
            EvalError::KeyNotFound("b".to_string())
        );
    }

    #[test]
    fn seq_range_shrinks_single_element() {
        let port = seq_port(vec![Native::Int(3), Native::Int(4)]);
        assert_eq!(port.range(1, 2).unwrap(), Value::Int(4));
        assert_eq!(
            port.range(2, 3).unwrap_err(),
            EvalError::IndexOutOfRange { index: 2, len: 2 }
        );
    }

    #[test]
    fn negative_range_bounds_report_the_length() {
        let port = seq_port(vec![Native::Int(3), Native::Int(4)]);
        assert_eq!(
            port.range(-1, 0).unwrap_err(),
            EvalError::IndexOutOfRange { index: -1, len: 2 }
        );
    }

    #[test]
    fn wrong_capability_is_a_typed_failure() {
        let seq = seq_port(vec![Native::Int(1)]);
        assert_eq!(
            seq.get("a").unwrap_err(),
            EvalError::UnsupportedCapability {
                operation: "get",
                backing: "seq",
            }
        );

        let map = map_port(vec![]);
        assert_eq!(
            map.range(0, 1).unwrap_err(),
            EvalError::UnsupportedCapability {
                operation: "range",
                backing: "map",
            }
        );
    }

    #[test]
    fn scalar_cargo_yields_itself() {
        assert_eq!(
            Port::new(Cargo::Int(7)).get("anything").unwrap(),
            Value::Int(7)
        );
        assert_eq!(
            Port::new(Cargo::Str("k".into())).get("").unwrap(),
            Value::Str("k".into())
        );
    }
}
