//! Populating host records field-by-field, one query per field.
//!
//! [`decode`] takes a list of `(field, query)` pairs, runs each query
//! against the source value, assembles the results into a JSON object and
//! deserializes it into the target type via serde. Nested record types
//! and element-wise sequences fall out of serde's own recursion; fields
//! without an entry are left to `#[serde(default)]`.
//!
//! ```
//! use pluck_lang::{Native, decode::decode};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Found {
//!     bar: i64,
//! }
//!
//! let src = Native::map([("foo", Native::seq([Native::Int(7)]))]);
//! let found: Found = decode(&[("bar", "$.foo[0]")], &src).unwrap();
//! assert_eq!(found.bar, 7);
//! ```

use std::fmt;

use serde::de::DeserializeOwned;

use crate::native::{Native, native_to_json};
use crate::query::{Error, query};

/// Errors from the field-mapping layer.
#[derive(Debug)]
pub enum DecodeError {
    /// A field's query failed; carries the field name and the failure.
    Query { field: String, source: Error },

    /// A field's query produced a value with no JSON form (a callable).
    NotRepresentable { field: String },

    /// The assembled results did not deserialize into the target type;
    /// carries the path of the offending field and the serde error
    /// naming the expected and the produced type.
    Deserialize {
        field: String,
        source: serde_json::Error,
    },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Query { field, source } => {
                write!(f, "query for field '{}' failed: {}", field, source)
            }
            DecodeError::NotRepresentable { field } => {
                write!(f, "query for field '{}' produced a callable", field)
            }
            DecodeError::Deserialize { field, source } => {
                write!(f, "field '{}' doesn't fit target: {}", field, source)
            }
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DecodeError::Query { source, .. } => Some(source),
            DecodeError::NotRepresentable { .. } => None,
            DecodeError::Deserialize { source, .. } => Some(source),
        }
    }
}

/// Runs one query per `(field, query)` pair against `src` and
/// deserializes the collected results into `T`.
pub fn decode<T: DeserializeOwned>(
    fields: &[(&str, &str)],
    src: &Native,
) -> Result<T, DecodeError> {
    let mut object = serde_json::Map::with_capacity(fields.len());

    for (field, q) in fields {
        let result = query(q, src).map_err(|source| DecodeError::Query {
            field: field.to_string(),
            source,
        })?;

        if matches!(result, Native::Func(_)) {
            return Err(DecodeError::NotRepresentable {
                field: field.to_string(),
            });
        }

        object.insert(field.to_string(), native_to_json(&result));
    }

    // deserialize with path tracking so a mismatch names the field
    serde_path_to_error::deserialize(serde_json::Value::Object(object)).map_err(|e| {
        let field = e.path().to_string();
        DecodeError::Deserialize {
            field,
            source: e.into_inner(),
        }
    })
}
