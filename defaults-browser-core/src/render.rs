//! Human-readable rendering of stored values.

use chrono::SecondsFormat;
use serde_json::Value;

use crate::container::Container;
use crate::error::InspectorResult;
use crate::json;
use crate::value::{JsonSource, RawValue, StoreValue};

const DECODED_DATA_NOTE: &str = "<Decoded JSON Data>";
const DECODED_STRING_NOTE: &str = "<Decoded JSON String>";

/// Display form of one stored value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedValue {
    /// Main rendering. Arrays, dictionaries and JSON documents are pretty JSON.
    pub pretty: String,
    /// Note about the stored representation, for decoded JSON documents.
    pub raw: Option<String>,
}

impl RenderedValue {
    /// Text exported to the console or pasteboard for `key`.
    #[must_use]
    pub fn export_text(&self, key: &str) -> String {
        let mut text = format!("\n{key}\n\n{}", self.pretty);
        if let Some(raw) = &self.raw {
            text.push('\n');
            text.push_str(raw);
        }
        text
    }
}

/// Renders the value stored under `key` in `container`.
///
/// # Errors
///
/// Returns [`InspectorError::InvariantViolation`](crate::InspectorError::InvariantViolation)
/// if an array or dictionary holds a value that cannot be shown as JSON.
pub fn render(container: &Container, key: &str) -> InspectorResult<RenderedValue> {
    let rendered = match container.lookup(key) {
        Some(RawValue::Plain(value @ (StoreValue::Array(_) | StoreValue::Dictionary(_)))) => {
            RenderedValue {
                pretty: json::to_pretty_text(&value.to_json_tree()?)?,
                raw: None,
            }
        }
        Some(RawValue::Json(document)) => RenderedValue {
            pretty: json::to_pretty_text(&Value::Object(document.object))?,
            raw: Some(
                match document.source {
                    JsonSource::Data => DECODED_DATA_NOTE,
                    JsonSource::String => DECODED_STRING_NOTE,
                }
                .to_string(),
            ),
        },
        Some(RawValue::Plain(value)) => RenderedValue {
            pretty: describe(&value),
            raw: None,
        },
        None => RenderedValue {
            pretty: "nil".to_string(),
            raw: None,
        },
    };
    Ok(rendered)
}

/// Writes the export text for `key` to the log.
///
/// # Errors
///
/// Propagates rendering errors from [`render`].
pub fn log_export(container: &Container, key: &str) -> InspectorResult<()> {
    let rendered = render(container, key)?;
    log::info!("{}", rendered.export_text(key));
    Ok(())
}

fn describe(value: &StoreValue) -> String {
    match value {
        StoreValue::Bool(value) => value.to_string(),
        StoreValue::Integer(value) => value.to_string(),
        StoreValue::Float(value) => value.to_string(),
        StoreValue::Double(value) => value.to_string(),
        StoreValue::String(value) => format!("{value:?}"),
        StoreValue::Data(bytes) => format!("{} bytes <{}>", bytes.len(), hex::encode(bytes)),
        StoreValue::Date(date) => date.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        StoreValue::Array(items) => format!(
            "[{}]",
            items.iter().map(describe).collect::<Vec<_>>().join(", ")
        ),
        StoreValue::Dictionary(entries) => format!(
            "[{}]",
            entries
                .iter()
                .map(|(key, value)| format!("{key:?}: {}", describe(value)))
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::classifier::KeyClassifier;
    use crate::container::exclude_nothing;
    use crate::store::MemoryStore;

    fn container(store: MemoryStore) -> Container {
        Container::new(
            "Standard",
            Arc::new(store),
            exclude_nothing(),
            Arc::new(KeyClassifier::default()),
        )
    }

    #[test]
    fn test_render_scalars() {
        let date = Utc.with_ymd_and_hms(2022, 5, 3, 0, 0, 0).unwrap();
        let container = container(MemoryStore::with_entries([
            ("flag", StoreValue::Bool(true)),
            ("name", StoreValue::from("Alice \"A\"")),
            ("blob", StoreValue::Data(vec![0xDE, 0xAD])),
            ("when", StoreValue::Date(date)),
        ]));

        assert_eq!(render(&container, "flag").unwrap().pretty, "true");
        assert_eq!(render(&container, "name").unwrap().pretty, "\"Alice \\\"A\\\"\"");
        assert_eq!(render(&container, "blob").unwrap().pretty, "2 bytes <dead>");
        assert_eq!(render(&container, "when").unwrap().pretty, "2022-05-03T00:00:00Z");
        assert_eq!(render(&container, "missing").unwrap().pretty, "nil");
    }

    #[test]
    fn test_render_dictionary_as_pretty_json() {
        let entries = BTreeMap::from([
            ("b".to_string(), StoreValue::Data(vec![0xDE, 0xAD])),
            ("a".to_string(), StoreValue::Integer(1)),
        ]);
        let container = container(MemoryStore::with_entries([(
            "dict",
            StoreValue::Dictionary(entries),
        )]));

        let rendered = render(&container, "dict").unwrap();
        assert_eq!(rendered.pretty, "{\n  \"a\": 1,\n  \"b\": \"dead\"\n}");
        assert_eq!(rendered.raw, None);
    }

    #[test]
    fn test_render_json_documents_with_note() {
        let container = container(MemoryStore::with_entries([
            ("text", StoreValue::from("{\"a\":1}")),
            ("data", StoreValue::Data(b"{\"a\":1}".to_vec())),
        ]));

        let text = render(&container, "text").unwrap();
        assert_eq!(text.pretty, "{\n  \"a\": 1\n}");
        assert_eq!(text.raw.as_deref(), Some("<Decoded JSON String>"));

        let data = render(&container, "data").unwrap();
        assert_eq!(data.raw.as_deref(), Some("<Decoded JSON Data>"));
    }

    #[test]
    fn test_render_array_with_date_is_fatal() {
        let date = Utc.with_ymd_and_hms(2022, 5, 3, 0, 0, 0).unwrap();
        let container = container(MemoryStore::with_entries([(
            "dates",
            StoreValue::Array(vec![StoreValue::Date(date)]),
        )]));

        assert!(render(&container, "dates").unwrap_err().is_fatal());
    }

    #[test]
    fn test_export_text() {
        let rendered = RenderedValue {
            pretty: "{}".to_string(),
            raw: Some(DECODED_DATA_NOTE.to_string()),
        };
        assert_eq!(rendered.export_text("key"), "\nkey\n\n{}\n<Decoded JSON Data>");

        let plain = RenderedValue {
            pretty: "1".to_string(),
            raw: None,
        };
        assert_eq!(plain.export_text("n"), "\nn\n\n1");
    }
}
