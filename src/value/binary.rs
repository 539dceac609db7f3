//! Binary-operator dispatch.
//!
//! Both operands are first converted to the "winning" (higher-ranked)
//! kind of the pair, then a single exhaustive match over
//! `(operator, winning kind)` selects the implementation. A pairing with
//! no implementation is a typed failure, not a silent no-op.

use crate::ast::Op;
use crate::evaluator::EvalError;
use crate::value::{Kind, Value};

/// Applies `op` to two already-evaluated operands.
///
/// The evaluator evaluates the right operand before the left one; by the
/// time this runs, only promotion and the operation itself remain.
pub fn apply(op: Op, lhs: Value, rhs: Value) -> Result<Value, EvalError> {
    let winner = lhs.kind().max(rhs.kind());
    let lhs = lhs.convert(winner)?;
    let rhs = rhs.convert(winner)?;

    match (op, winner) {
        // addition and string concatenation
        (Op::Add, Kind::Int) => match (lhs, rhs) {
            (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a.wrapping_add(b))),
            _ => unreachable!("both operands converted to int"),
        },
        (Op::Add, Kind::Float) => match (lhs, rhs) {
            (Value::Float(a), Value::Float(b)) => Ok(Value::Float(a + b).shrink()),
            _ => unreachable!("both operands converted to float"),
        },
        (Op::Add, Kind::String) => match (lhs, rhs) {
            (Value::Str(a), Value::Str(b)) => Ok(Value::Str(a + &b)),
            _ => unreachable!("both operands converted to string"),
        },

        // key reading: field and index behave identically on maps
        (Op::Field | Op::Index, Kind::Map) => read_key(lhs, rhs),

        // index reading on arrays
        (Op::Index, Kind::Array) => index_array(lhs, rhs),

        // lazy reading through ports
        (Op::Field, Kind::Port) => match (lhs, rhs) {
            (Value::Port(obj), Value::Port(field)) => match field.get("")? {
                Value::Str(key) => obj.get(&key),
                other => Err(EvalError::TypeMismatch(format!(
                    "port field name must be a string, got {}",
                    other.kind()
                ))),
            },
            _ => unreachable!("both operands converted to port"),
        },
        (Op::Index, Kind::Port) => match (lhs, rhs) {
            (Value::Port(obj), Value::Port(index)) => match index.get("")? {
                // the port checks the bounds against its own length
                Value::Int(i) => obj.range(i, i.saturating_add(1)),
                other => Err(EvalError::TypeMismatch(format!(
                    "port index must be an integer, got {}",
                    other.kind()
                ))),
            },
            _ => unreachable!("both operands converted to port"),
        },

        (op, kind) => Err(EvalError::UnsupportedOperator { op, kind }),
    }
}

/// Key lookup on a map. The right operand arrives as the `{"key": s}`
/// wrapper produced by string-to-map promotion.
fn read_key(lhs: Value, rhs: Value) -> Result<Value, EvalError> {
    let (Value::Map(map), Value::Map(wrapper)) = (lhs, rhs) else {
        unreachable!("both operands converted to map");
    };

    let key = match wrapper.get("key") {
        Some(Value::Str(s)) => s,
        _ => {
            return Err(EvalError::TypeMismatch(
                "map key must be a string".to_string(),
            ));
        }
    };

    match map.get(key) {
        Some(v) => Ok(v.clone()),
        None => Err(EvalError::KeyNotFound(key.clone())),
    }
}

/// Index reading on an array. The right operand is itself an array of
/// integer indices (repeated postfix indexing chains produce them one at
/// a time; int-to-array promotion wraps the singleton). Each index
/// selects an element; out of range fails rather than clamps. A
/// single-element result shrinks to its bare element.
fn index_array(lhs: Value, rhs: Value) -> Result<Value, EvalError> {
    let (Value::Array(items), Value::Array(indices)) = (lhs, rhs) else {
        unreachable!("both operands converted to array");
    };

    let mut vals = Vec::with_capacity(indices.len());
    for iv in indices {
        let Value::Int(i) = iv else {
            return Err(EvalError::TypeMismatch(format!(
                "non-integer array index: {}",
                iv
            )));
        };

        let idx = usize::try_from(i)
            .ok()
            .filter(|&idx| idx < items.len())
            .ok_or(EvalError::IndexOutOfRange {
                index: i,
                len: items.len(),
            })?;

        vals.push(items[idx].clone());
    }

    Ok(Value::Array(vals).shrink())
}
