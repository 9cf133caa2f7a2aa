//! Edit session for a single stored key.
//!
//! A [`ValueEditor`] loads the current value, tracks edits and their
//! validity, and writes back on save. There is no concurrency check against
//! the store between load and save; the last write wins.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use url::Url;

use crate::container::Container;
use crate::error::{InspectorError, InspectorResult};
use crate::json::JsonObject;
use crate::value::tagged::{detect, encode, TaggedValue, ValueType};
use crate::value::text::EditText;
use crate::value::StoreValue;

/// In-progress edit of one key in one container.
#[derive(Debug)]
pub struct ValueEditor {
    container: Container,
    key: String,
    value: TaggedValue,
    text: String,
    is_valid: bool,
}

impl ValueEditor {
    /// Loads the value stored under `key` for editing.
    ///
    /// # Errors
    ///
    /// Returns [`InspectorError::InvariantViolation`] if a structured value
    /// cannot be rendered as JSON edit text.
    pub fn load(container: &Container, key: &str) -> InspectorResult<Self> {
        let value = detect(container.lookup(key), container.store(), key);
        let text = edit_text(&value)?;
        log::debug!("editing '{key}' in '{}' as {}", container.name(), value.value_type());
        Ok(Self {
            container: container.clone(),
            key: key.to_string(),
            value,
            text,
            is_valid: true,
        })
    }

    /// Returns the key being edited.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the name of the container the key lives in.
    #[must_use]
    pub fn container_name(&self) -> &str {
        self.container.name()
    }

    /// Returns the last valid value.
    #[must_use]
    pub const fn value(&self) -> &TaggedValue {
        &self.value
    }

    /// Returns the detected type.
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        self.value.value_type()
    }

    /// Returns the header line, `"<key>: <type name>"`.
    #[must_use]
    pub fn title(&self) -> String {
        format!("{}: {}", self.key, self.value_type())
    }

    /// Returns the current edit text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns `false` while the edit text does not parse.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Returns `true` if [`ValueEditor::save`] would write.
    #[must_use]
    pub fn can_save(&self) -> bool {
        self.is_valid && self.value_type() != ValueType::Unknown
    }

    /// Replaces the edit text and revalidates it.
    ///
    /// When the text is valid the value is updated; otherwise the last
    /// valid value is kept. Returns the new validity.
    pub fn set_text(&mut self, text: &str) -> bool {
        text.clone_into(&mut self.text);
        match parse_text(&self.value, text) {
            Some(value) => {
                self.value = value;
                self.is_valid = true;
            }
            None => self.is_valid = false,
        }
        self.is_valid
    }

    /// Sets a boolean value.
    ///
    /// # Errors
    ///
    /// Returns [`InspectorError::InvalidInput`] if the key is not a boolean.
    pub fn set_bool(&mut self, value: bool) -> InspectorResult<()> {
        self.expect_type(ValueType::Bool)?;
        self.set_text(&value.to_string());
        Ok(())
    }

    /// Sets a string value.
    ///
    /// # Errors
    ///
    /// Returns [`InspectorError::InvalidInput`] if the key is not a string.
    pub fn set_string(&mut self, value: &str) -> InspectorResult<()> {
        self.expect_type(ValueType::String)?;
        self.set_text(value);
        Ok(())
    }

    /// Encodes the value and writes it to the store.
    ///
    /// Saving an [`ValueType::Unknown`] value is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`InspectorError::InvalidInput`] while the edit text is invalid,
    /// and [`InspectorError::InvariantViolation`] if encoding fails.
    pub fn save(&self) -> InspectorResult<()> {
        if self.value_type() == ValueType::Unknown {
            return Ok(());
        }
        if !self.is_valid {
            return Err(InspectorError::InvalidInput(format!(
                "'{}' is not a valid {}",
                self.text,
                self.value_type()
            )));
        }
        let write = encode(&self.value)?;
        self.container.apply(&self.key, write);
        Ok(())
    }

    /// Deletes the key from the store, ending the session.
    pub fn delete(self) {
        self.container.remove(&self.key);
    }

    /// Discards the session without writing.
    pub fn cancel(self) {
        log::debug!("discarded edit of '{}'", self.key);
    }

    fn expect_type(&self, expected: ValueType) -> InspectorResult<()> {
        if self.value_type() == expected {
            Ok(())
        } else {
            Err(InspectorError::InvalidInput(format!(
                "'{}' holds {}, not {expected}",
                self.key,
                self.value_type()
            )))
        }
    }
}

fn edit_text(value: &TaggedValue) -> InspectorResult<String> {
    match value {
        TaggedValue::Bool(value) => value.to_edit_text(),
        TaggedValue::Int(value) => value.to_edit_text(),
        TaggedValue::Float(value) => value.to_edit_text(),
        TaggedValue::Double(value) => value.to_edit_text(),
        TaggedValue::String(value) => value.to_edit_text(),
        TaggedValue::Url(value) => value.to_edit_text(),
        TaggedValue::Date(value) => value.to_edit_text(),
        TaggedValue::Array(items) => items.to_edit_text(),
        TaggedValue::Dictionary(entries) => entries.to_edit_text(),
        TaggedValue::JsonData(object) | TaggedValue::JsonString(object) => object.to_edit_text(),
        TaggedValue::Unknown => Ok(String::new()),
    }
}

fn parse_text(current: &TaggedValue, text: &str) -> Option<TaggedValue> {
    Some(match current {
        TaggedValue::Bool(_) => TaggedValue::Bool(bool::from_edit_text(text)?),
        TaggedValue::Int(_) => TaggedValue::Int(i64::from_edit_text(text)?),
        TaggedValue::Float(_) => TaggedValue::Float(f32::from_edit_text(text)?),
        TaggedValue::Double(_) => TaggedValue::Double(f64::from_edit_text(text)?),
        TaggedValue::String(_) => TaggedValue::String(String::from_edit_text(text)?),
        TaggedValue::Url(_) => TaggedValue::Url(Option::<Url>::from_edit_text(text)?),
        TaggedValue::Date(_) => {
            TaggedValue::Date(Option::<DateTime<Utc>>::from_edit_text(text)?)
        }
        TaggedValue::Array(_) => TaggedValue::Array(Vec::<StoreValue>::from_edit_text(text)?),
        TaggedValue::Dictionary(_) => {
            TaggedValue::Dictionary(BTreeMap::<String, StoreValue>::from_edit_text(text)?)
        }
        TaggedValue::JsonData(_) => TaggedValue::JsonData(JsonObject::from_edit_text(text)?),
        TaggedValue::JsonString(_) => {
            TaggedValue::JsonString(JsonObject::from_edit_text(text)?)
        }
        TaggedValue::Unknown => return None,
    })
}
