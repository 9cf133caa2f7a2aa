//! JSON text codec for document-shaped settings.
//!
//! Trees are plain [`serde_json::Value`]s. Byte blobs never appear in a tree
//! directly; they are substituted with lowercase hex while a
//! [`StoreValue`](crate::StoreValue) is converted (see
//! [`StoreValue::to_json_tree`](crate::StoreValue::to_json_tree)).

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::{Map, Value};

use crate::error::{InspectorError, InspectorResult};

/// A decoded JSON object.
pub type JsonObject = Map<String, Value>;

const PRETTY_INDENT: &[u8] = b"  ";

/// Serializes `tree` as indented text with object keys sorted at every level.
///
/// Slashes are not escaped.
///
/// # Errors
///
/// Returns [`InspectorError::InvariantViolation`] if the tree cannot be serialized.
pub fn to_pretty_text(tree: &Value) -> InspectorResult<String> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(PRETTY_INDENT);
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    sorted(tree)
        .serialize(&mut serializer)
        .map_err(|err| InspectorError::InvariantViolation(format!("pretty JSON: {err}")))?;
    String::from_utf8(buffer)
        .map_err(|err| InspectorError::InvariantViolation(format!("pretty JSON: {err}")))
}

/// Serializes `tree` as compact single-line text. Key order is unspecified.
///
/// # Errors
///
/// Returns [`InspectorError::InvariantViolation`] if the tree cannot be serialized.
pub fn to_compact_text(tree: &Value) -> InspectorResult<String> {
    serde_json::to_string(tree)
        .map_err(|err| InspectorError::InvariantViolation(format!("compact JSON: {err}")))
}

/// Parses JSON text, returning `None` for malformed input.
#[must_use]
pub fn from_text(text: &str) -> Option<Value> {
    serde_json::from_str(text).ok()
}

/// Parses JSON text whose top level is an object.
#[must_use]
pub fn object_from_text(text: &str) -> Option<JsonObject> {
    match from_text(text)? {
        Value::Object(object) => Some(object),
        _ => None,
    }
}

/// Parses UTF-8 bytes whose top level is a JSON object.
#[must_use]
pub fn object_from_bytes(bytes: &[u8]) -> Option<JsonObject> {
    match serde_json::from_slice(bytes).ok()? {
        Value::Object(object) => Some(object),
        _ => None,
    }
}

/// Rebuilds `tree` inserting object keys in lexicographic order, so output
/// is sorted whichever map backend `serde_json` was built with.
fn sorted(tree: &Value) -> Value {
    match tree {
        Value::Array(items) => Value::Array(items.iter().map(sorted).collect()),
        Value::Object(object) => {
            let mut entries: Vec<_> = object.iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key.clone(), sorted(value)))
                    .collect(),
            )
        }
        scalar => scalar.clone(),
    }
}
