//! Editable value shapes and the detect/encode pipeline.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::Value;
use strum::{Display, EnumIter};
use url::Url;

use super::archive::archive_url;
use super::{JsonSource, RawValue, StoreValue};
use crate::error::{InspectorError, InspectorResult};
use crate::json::{self, JsonObject};
use crate::store::Store;

/// Tag of an editable value shape.
///
/// `Display` yields the type name shown next to a key in the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum ValueType {
    /// Boolean.
    #[strum(to_string = "Bool")]
    Bool,
    /// Signed integer.
    #[strum(to_string = "Int")]
    Int,
    /// 32-bit float.
    #[strum(to_string = "Float")]
    Float,
    /// 64-bit float.
    #[strum(to_string = "Double")]
    Double,
    /// Text.
    #[strum(to_string = "String")]
    String,
    /// URL, persisted as an archived blob.
    #[strum(to_string = "URL")]
    Url,
    /// Point in time.
    #[strum(to_string = "Date")]
    Date,
    /// List of arbitrary values.
    #[strum(to_string = "[Any]")]
    Array,
    /// String-keyed map of arbitrary values.
    #[strum(to_string = "[String: Any]")]
    Dictionary,
    /// JSON object stored as a blob.
    #[strum(to_string = "Data")]
    JsonData,
    /// JSON object stored as text.
    #[strum(to_string = "String")]
    JsonString,
    /// Anything else; read-only.
    #[strum(to_string = "(Unknown)")]
    Unknown,
}

/// A stored value decoded into one of the editable shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum TaggedValue {
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// 32-bit float.
    Float(f32),
    /// 64-bit float.
    Double(f64),
    /// Text.
    String(String),
    /// URL; `None` removes the key on save.
    Url(Option<Url>),
    /// Date; `None` removes the key on save.
    Date(Option<DateTime<Utc>>),
    /// List with elements kept in their stored representation.
    Array(Vec<StoreValue>),
    /// Map with values kept in their stored representation.
    Dictionary(BTreeMap<String, StoreValue>),
    /// JSON object decoded from a blob.
    JsonData(JsonObject),
    /// JSON object decoded from text.
    JsonString(JsonObject),
    /// Unsupported value; cannot be saved.
    Unknown,
}

impl TaggedValue {
    /// Returns the tag of this value.
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        match self {
            Self::Bool(_) => ValueType::Bool,
            Self::Int(_) => ValueType::Int,
            Self::Float(_) => ValueType::Float,
            Self::Double(_) => ValueType::Double,
            Self::String(_) => ValueType::String,
            Self::Url(_) => ValueType::Url,
            Self::Date(_) => ValueType::Date,
            Self::Array(_) => ValueType::Array,
            Self::Dictionary(_) => ValueType::Dictionary,
            Self::JsonData(_) => ValueType::JsonData,
            Self::JsonString(_) => ValueType::JsonString,
            Self::Unknown => ValueType::Unknown,
        }
    }
}

/// A write to apply to the store for one key.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreWrite {
    /// Store the value.
    Set(StoreValue),
    /// Remove the key.
    Remove,
    /// Leave the store untouched.
    Skip,
}

/// Maps the value looked up for `key` to exactly one editable shape.
///
/// The checks run in a fixed order and the first match wins. Values the
/// generic lookup cannot classify fall back to the store's URL accessor and
/// then to its object accessor.
pub fn detect(raw: Option<RawValue>, store: &dyn Store, key: &str) -> TaggedValue {
    match raw {
        Some(RawValue::Json(document)) => match document.source {
            JsonSource::Data => return TaggedValue::JsonData(document.object),
            JsonSource::String => return TaggedValue::JsonString(document.object),
        },
        Some(RawValue::Plain(value)) => match value {
            StoreValue::Bool(value) => return TaggedValue::Bool(value),
            StoreValue::Integer(value) => return TaggedValue::Int(value),
            StoreValue::Float(value) => return TaggedValue::Float(value),
            StoreValue::Double(value) => return TaggedValue::Double(value),
            StoreValue::String(value) => return TaggedValue::String(value),
            StoreValue::Array(items) => return TaggedValue::Array(items),
            StoreValue::Dictionary(entries) => return TaggedValue::Dictionary(entries),
            StoreValue::Data(_) | StoreValue::Date(_) => {}
        },
        None => {}
    }

    if let Some(url) = store.url(key) {
        return TaggedValue::Url(Some(url));
    }

    match store.object(key) {
        Some(StoreValue::Date(date)) => TaggedValue::Date(Some(date)),
        other => {
            log::warn!(
                "unsupported value type for key '{key}': {}",
                other.as_ref().map_or("nil", StoreValue::kind)
            );
            TaggedValue::Unknown
        }
    }
}

/// Encodes `value` back into a store write of the same representation family.
///
/// # Errors
///
/// Returns [`InspectorError::InvariantViolation`] if a JSON document or URL
/// archive cannot be serialized. Callers treat this as fatal.
pub fn encode(value: &TaggedValue) -> InspectorResult<StoreWrite> {
    let write = match value {
        TaggedValue::Bool(value) => StoreWrite::Set(StoreValue::Bool(*value)),
        TaggedValue::Int(value) => StoreWrite::Set(StoreValue::Integer(*value)),
        TaggedValue::Float(value) => StoreWrite::Set(StoreValue::Float(*value)),
        TaggedValue::Double(value) => StoreWrite::Set(StoreValue::Double(*value)),
        TaggedValue::String(value) => StoreWrite::Set(StoreValue::String(value.clone())),
        TaggedValue::Url(Some(url)) => StoreWrite::Set(StoreValue::Data(archive_url(url)?)),
        TaggedValue::Date(Some(date)) => StoreWrite::Set(StoreValue::Date(*date)),
        TaggedValue::Url(None) | TaggedValue::Date(None) => StoreWrite::Remove,
        TaggedValue::Array(items) => StoreWrite::Set(StoreValue::Array(items.clone())),
        TaggedValue::Dictionary(entries) => {
            StoreWrite::Set(StoreValue::Dictionary(entries.clone()))
        }
        TaggedValue::JsonData(object) => {
            let text = json::to_pretty_text(&Value::Object(object.clone())).map_err(|err| {
                InspectorError::InvariantViolation(format!("can't save JSON as data: {err}"))
            })?;
            StoreWrite::Set(StoreValue::Data(text.into_bytes()))
        }
        TaggedValue::JsonString(object) => {
            let text = json::to_compact_text(&Value::Object(object.clone())).map_err(|err| {
                InspectorError::InvariantViolation(format!("can't save JSON as string: {err}"))
            })?;
            StoreWrite::Set(StoreValue::String(text))
        }
        TaggedValue::Unknown => StoreWrite::Skip,
    };
    Ok(write)
}
