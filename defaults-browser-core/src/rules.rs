//! Classification rule tables.
//!
//! Rules are plain configuration data. [`ClassificationRules::default`]
//! carries the built-in tables; hosts and tests may substitute their own,
//! either programmatically or from a JSON document.

use serde::{Deserialize, Serialize};

use crate::error::{InspectorError, InspectorResult};

/// Key prefix reserved for the inspector's own bookkeeping entries.
///
/// Keys under this prefix are dropped before any rule is consulted and
/// cannot be reclassified by substituted rules.
pub const RESERVED_KEY_PREFIX: &str = "dev.defaults-browser.";

const SYSTEM_KEYS: &[&str] = &[
    "AddingEmojiKeybordHandled",
    "CarCapabilities",
    "MSVLoggingMasterSwitchEnabledKey",
    "PreferredLanguages",
    "shouldShowRSVPDataDetectors",
];

const SYSTEM_KEY_PREFIXES: &[&str] = &[
    "Apple",
    "cloud.",
    "com.apple.",
    "internalSettings.",
    "METAL",
    "INNext",
    "AK",
    "_AK",
    "NS",
    "SS",
    "PK",
    "WebKit",
    "mapping_",
];

const FACEBOOK_KEY_PREFIXES: &[&str] = &["com.facebook"];

const FIREBASE_KEY_PREFIXES: &[&str] = &["com.fireperf", "firebase"];

/// Exact-match keys and prefixes identifying one bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyRule {
    /// Keys that belong to the bucket when matched exactly.
    pub keys: Vec<String>,
    /// Prefixes that place any key starting with them in the bucket.
    pub prefixes: Vec<String>,
}

impl KeyRule {
    /// Builds a rule from exact keys and prefixes.
    #[must_use]
    pub fn new(keys: &[&str], prefixes: &[&str]) -> Self {
        Self {
            keys: keys.iter().map(ToString::to_string).collect(),
            prefixes: prefixes.iter().map(ToString::to_string).collect(),
        }
    }

    /// Returns `true` if `key` matches an exact key or starts with a prefix.
    #[must_use]
    pub fn matches(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
            || self.prefixes.iter().any(|prefix| key.starts_with(prefix.as_str()))
    }
}

/// Rule tables for the System, Facebook and Firebase buckets.
///
/// Fields missing from a deserialized document fall back to the built-in
/// tables.
///
/// ```rust
/// use defaults_browser_core::ClassificationRules;
///
/// let rules = ClassificationRules::from_json(r#"{ "facebook": { "prefixes": ["fb."] } }"#)?;
/// assert!(rules.facebook.matches("fb.token"));
/// assert!(rules.system.matches("AppleLocale"));
/// # Ok::<(), defaults_browser_core::InspectorError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationRules {
    /// Platform-internal keys.
    pub system: KeyRule,
    /// Facebook SDK keys.
    pub facebook: KeyRule,
    /// Firebase SDK keys.
    pub firebase: KeyRule,
}

impl Default for ClassificationRules {
    fn default() -> Self {
        Self {
            system: KeyRule::new(SYSTEM_KEYS, SYSTEM_KEY_PREFIXES),
            facebook: KeyRule::new(&[], FACEBOOK_KEY_PREFIXES),
            firebase: KeyRule::new(&[], FIREBASE_KEY_PREFIXES),
        }
    }
}

impl ClassificationRules {
    /// Parses rules from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`InspectorError::InvalidRules`] if the document is not valid JSON
    /// or does not have the expected shape.
    pub fn from_json(json: &str) -> InspectorResult<Self> {
        serde_json::from_str(json).map_err(|err| InspectorError::InvalidRules(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("AppleLocale", true ; "apple prefix")]
    #[test_case("com.apple.keyboard", true ; "vendor namespace")]
    #[test_case("PreferredLanguages", true ; "exact key")]
    #[test_case("PreferredLanguagesOverride", false ; "exact key is not a prefix")]
    #[test_case("myFeatureFlag", false ; "user key")]
    #[test_case("com.facebook.sdk.token", false ; "facebook key")]
    fn test_default_system_rule(key: &str, expected: bool) {
        assert_eq!(ClassificationRules::default().system.matches(key), expected);
    }

    #[test]
    fn test_from_json_fills_missing_tables() {
        let rules = ClassificationRules::from_json(r#"{ "firebase": { "prefixes": ["fb_"] } }"#)
            .expect("valid rules");
        assert_eq!(rules.firebase, KeyRule::new(&[], &["fb_"]));
        assert_eq!(rules.system, ClassificationRules::default().system);
    }

    #[test]
    fn test_from_json_rejects_malformed_document() {
        let err = ClassificationRules::from_json(r#"{ "system": [1, 2] }"#).unwrap_err();
        assert!(matches!(err, InspectorError::InvalidRules(_)));
    }

    #[test]
    fn test_rules_serialization_round_trip() {
        let rules = ClassificationRules::default();
        let json = serde_json::to_string(&rules).unwrap();
        assert_eq!(ClassificationRules::from_json(&json).unwrap(), rules);
    }
}
