//! Stored value representations.

pub mod archive;
pub mod tagged;
pub mod text;

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Number, Value};

use crate::error::{InspectorError, InspectorResult};
use crate::json::JsonObject;

/// A value as held by a [`Store`](crate::Store).
///
/// This is the closed set of representations a settings store can persist.
/// URLs have no variant of their own: they are stored as archived
/// [`StoreValue::Data`] (see [`archive`]).
#[derive(Debug, Clone, PartialEq)]
pub enum StoreValue {
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    Integer(i64),
    /// 32-bit float.
    Float(f32),
    /// 64-bit float.
    Double(f64),
    /// UTF-8 text.
    String(String),
    /// Binary blob.
    Data(Vec<u8>),
    /// Point in time.
    Date(DateTime<Utc>),
    /// Ordered list of values.
    Array(Vec<StoreValue>),
    /// String-keyed map of values.
    Dictionary(BTreeMap<String, StoreValue>),
}

impl StoreValue {
    /// Converts the value into a JSON tree.
    ///
    /// `Data` is substituted by its lowercase hex string. This substitution
    /// is one-directional.
    ///
    /// # Errors
    ///
    /// Returns [`InspectorError::InvariantViolation`] for values outside the
    /// JSON grammar: dates and non-finite floats.
    pub fn to_json_tree(&self) -> InspectorResult<Value> {
        Ok(match self {
            Self::Bool(value) => Value::Bool(*value),
            Self::Integer(value) => Value::Number((*value).into()),
            Self::Float(value) => finite_number(f64::from(*value))?,
            Self::Double(value) => finite_number(*value)?,
            Self::String(value) => Value::String(value.clone()),
            Self::Data(bytes) => Value::String(hex::encode(bytes)),
            Self::Date(date) => {
                return Err(InspectorError::InvariantViolation(format!(
                    "date {} is not representable in JSON",
                    date.to_rfc3339_opts(SecondsFormat::AutoSi, true)
                )))
            }
            Self::Array(items) => Value::Array(
                items
                    .iter()
                    .map(Self::to_json_tree)
                    .collect::<InspectorResult<_>>()?,
            ),
            Self::Dictionary(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(key, value)| -> InspectorResult<(String, Value)> {
                        Ok((key.clone(), value.to_json_tree()?))
                    })
                    .collect::<InspectorResult<_>>()?,
            ),
        })
    }

    /// Converts a JSON tree into a store value.
    ///
    /// Numbers that fit in `i64` become [`StoreValue::Integer`], all others
    /// [`StoreValue::Double`]. Returns `None` if the tree contains `null`,
    /// which has no store representation.
    #[must_use]
    pub fn from_json_tree(tree: &Value) -> Option<Self> {
        Some(match tree {
            Value::Null => return None,
            Value::Bool(value) => Self::Bool(*value),
            Value::Number(number) => match number.as_i64() {
                Some(integer) => Self::Integer(integer),
                None => Self::Double(number.as_f64()?),
            },
            Value::String(value) => Self::String(value.clone()),
            Value::Array(items) => {
                Self::Array(items.iter().map(Self::from_json_tree).collect::<Option<_>>()?)
            }
            Value::Object(object) => Self::Dictionary(dictionary_from_json(object)?),
        })
    }

    /// Returns the name of the representation, for diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Double(_) => "double",
            Self::String(_) => "string",
            Self::Data(_) => "data",
            Self::Date(_) => "date",
            Self::Array(_) => "array",
            Self::Dictionary(_) => "dictionary",
        }
    }
}

/// Converts a JSON object into a store dictionary; `None` if it contains `null`.
#[must_use]
pub fn dictionary_from_json(object: &JsonObject) -> Option<BTreeMap<String, StoreValue>> {
    object
        .iter()
        .map(|(key, value)| Some((key.clone(), StoreValue::from_json_tree(value)?)))
        .collect()
}

fn finite_number(value: f64) -> InspectorResult<Value> {
    Number::from_f64(value).map(Value::Number).ok_or_else(|| {
        InspectorError::InvariantViolation(format!("{value} is not representable in JSON"))
    })
}

impl From<bool> for StoreValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for StoreValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f32> for StoreValue {
    fn from(value: f32) -> Self {
        Self::Float(value)
    }
}

impl From<f64> for StoreValue {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<&str> for StoreValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for StoreValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<u8>> for StoreValue {
    fn from(value: Vec<u8>) -> Self {
        Self::Data(value)
    }
}

impl From<DateTime<Utc>> for StoreValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Date(value)
    }
}

/// Original on-store representation of a decoded JSON document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonSource {
    /// Stored as a UTF-8 `Data` blob.
    Data,
    /// Stored as a `String`.
    String,
}

/// A JSON object decoded from a stored blob or string.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonDocument {
    /// The decoded top-level object.
    pub object: JsonObject,
    /// How the document was stored.
    pub source: JsonSource,
}

/// A value as returned by a container lookup.
///
/// The loader pre-decodes blobs and strings that hold a JSON object, so the
/// type model can tell document-shaped settings apart from plain ones.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// A stored JSON object document.
    Json(JsonDocument),
    /// Any other stored value.
    Plain(StoreValue),
}

impl RawValue {
    /// Decodes a stored value, recognising JSON object documents.
    #[must_use]
    pub fn load(value: StoreValue) -> Self {
        let document = match &value {
            StoreValue::Data(bytes) => crate::json::object_from_bytes(bytes).map(|object| {
                JsonDocument {
                    object,
                    source: JsonSource::Data,
                }
            }),
            StoreValue::String(text) => {
                crate::json::object_from_text(text).map(|object| JsonDocument {
                    object,
                    source: JsonSource::String,
                })
            }
            _ => None,
        };
        document.map_or(Self::Plain(value), Self::Json)
    }
}
