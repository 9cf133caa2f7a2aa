//! Text representations used by the editors.
//!
//! A candidate text is valid when it parses back into the target type
//! without loss. Nilable types (URL, date) accept the empty string as "no
//! value".

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;
use url::Url;

use super::{dictionary_from_json, StoreValue};
use crate::error::InspectorResult;
use crate::json::{self, JsonObject};

/// Conversion between a value and its editable text.
pub trait EditText: Sized {
    /// Renders the value for editing.
    ///
    /// # Errors
    ///
    /// Returns [`InspectorError::InvariantViolation`](crate::InspectorError::InvariantViolation)
    /// if a structured value is not representable as JSON.
    fn to_edit_text(&self) -> InspectorResult<String>;

    /// Parses edited text, returning `None` if it is not valid for the type.
    fn from_edit_text(text: &str) -> Option<Self>;
}

impl EditText for bool {
    fn to_edit_text(&self) -> InspectorResult<String> {
        Ok(self.to_string())
    }

    fn from_edit_text(text: &str) -> Option<Self> {
        text.parse().ok()
    }
}

impl EditText for String {
    fn to_edit_text(&self) -> InspectorResult<String> {
        Ok(self.clone())
    }

    fn from_edit_text(text: &str) -> Option<Self> {
        Some(text.to_string())
    }
}

impl EditText for i64 {
    fn to_edit_text(&self) -> InspectorResult<String> {
        Ok(self.to_string())
    }

    fn from_edit_text(text: &str) -> Option<Self> {
        text.parse().ok()
    }
}

impl EditText for f32 {
    fn to_edit_text(&self) -> InspectorResult<String> {
        Ok(self.to_string())
    }

    /// Rejects text that has no exact `f32` rendering, such as `16777217`.
    fn from_edit_text(text: &str) -> Option<Self> {
        let value = text.parse::<Self>().ok().filter(|value| value.is_finite())?;
        let written = text.parse::<f64>().ok()?;
        let rendered = value.to_string().parse::<f64>().ok()?;
        (rendered.to_bits() == written.to_bits()).then_some(value)
    }
}

impl EditText for f64 {
    fn to_edit_text(&self) -> InspectorResult<String> {
        Ok(self.to_string())
    }

    fn from_edit_text(text: &str) -> Option<Self> {
        text.parse::<Self>().ok().filter(|value| value.is_finite())
    }
}

impl EditText for Option<Url> {
    fn to_edit_text(&self) -> InspectorResult<String> {
        Ok(self.as_ref().map(Url::to_string).unwrap_or_default())
    }

    fn from_edit_text(text: &str) -> Option<Self> {
        if text.is_empty() {
            return Some(None);
        }
        Url::parse(text).ok().map(Some)
    }
}

impl EditText for Option<DateTime<Utc>> {
    fn to_edit_text(&self) -> InspectorResult<String> {
        Ok(self
            .map(|date| date.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            .unwrap_or_default())
    }

    fn from_edit_text(text: &str) -> Option<Self> {
        if text.is_empty() {
            return Some(None);
        }
        DateTime::parse_from_rfc3339(text)
            .ok()
            .map(|date| Some(date.with_timezone(&Utc)))
    }
}

impl EditText for Vec<StoreValue> {
    fn to_edit_text(&self) -> InspectorResult<String> {
        let tree = StoreValue::Array(self.clone()).to_json_tree()?;
        json::to_pretty_text(&tree)
    }

    fn from_edit_text(text: &str) -> Option<Self> {
        match json::from_text(text)? {
            Value::Array(items) => items.iter().map(StoreValue::from_json_tree).collect(),
            _ => None,
        }
    }
}

impl EditText for BTreeMap<String, StoreValue> {
    fn to_edit_text(&self) -> InspectorResult<String> {
        let tree = StoreValue::Dictionary(self.clone()).to_json_tree()?;
        json::to_pretty_text(&tree)
    }

    fn from_edit_text(text: &str) -> Option<Self> {
        dictionary_from_json(&json::object_from_text(text)?)
    }
}

impl EditText for JsonObject {
    fn to_edit_text(&self) -> InspectorResult<String> {
        json::to_pretty_text(&Value::Object(self.clone()))
    }

    fn from_edit_text(text: &str) -> Option<Self> {
        json::object_from_text(text)
    }
}
