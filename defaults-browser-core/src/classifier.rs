//! Partitioning of a flat key space into provenance buckets.

use std::collections::BTreeSet;

use crate::bucket::Bucket;
use crate::rules::{ClassificationRules, RESERVED_KEY_PREFIX};

/// Keys grouped by bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// Keys in [`Bucket::User`].
    pub user: BTreeSet<String>,
    /// Keys in [`Bucket::System`].
    pub system: BTreeSet<String>,
    /// Keys in [`Bucket::Facebook`].
    pub facebook: BTreeSet<String>,
    /// Keys in [`Bucket::Firebase`].
    pub firebase: BTreeSet<String>,
}

impl Classification {
    /// Returns the keys classified into `bucket`.
    #[must_use]
    pub const fn get(&self, bucket: Bucket) -> &BTreeSet<String> {
        match bucket {
            Bucket::User => &self.user,
            Bucket::System => &self.system,
            Bucket::Facebook => &self.facebook,
            Bucket::Firebase => &self.firebase,
        }
    }
}

/// Classifies keys according to a set of [`ClassificationRules`].
///
/// Classification is a pure function of the keys, the rules and the
/// exclusion predicate.
#[derive(Debug, Clone, Default)]
pub struct KeyClassifier {
    rules: ClassificationRules,
}

impl KeyClassifier {
    /// Creates a classifier over `rules`.
    #[must_use]
    pub const fn new(rules: ClassificationRules) -> Self {
        Self { rules }
    }

    /// Returns the rules this classifier applies.
    #[must_use]
    pub const fn rules(&self) -> &ClassificationRules {
        &self.rules
    }

    /// Returns `true` for keys owned by the inspector itself.
    #[must_use]
    pub fn is_reserved(key: &str) -> bool {
        key.starts_with(RESERVED_KEY_PREFIX)
    }

    /// Returns `true` if `key` belongs to `bucket`, ignoring filtering.
    ///
    /// Buckets are evaluated independently; only [`Bucket::User`] is defined
    /// in terms of the other three.
    #[must_use]
    pub fn matches(&self, bucket: Bucket, key: &str) -> bool {
        match bucket {
            Bucket::System => self.rules.system.matches(key),
            Bucket::Facebook => self.rules.facebook.matches(key),
            Bucket::Firebase => self.rules.firebase.matches(key),
            Bucket::User => {
                !self.rules.system.matches(key)
                    && !self.rules.facebook.matches(key)
                    && !self.rules.firebase.matches(key)
            }
        }
    }

    /// Drops reserved keys and keys rejected by `exclude`.
    pub fn visible_keys<'a, I, F>(keys: I, exclude: F) -> impl Iterator<Item = &'a str>
    where
        I: IntoIterator<Item = &'a str>,
        I::IntoIter: 'a,
        F: Fn(&str) -> bool + 'a,
    {
        keys.into_iter()
            .filter(move |&key| !Self::is_reserved(key) && !exclude(key))
    }

    /// Returns the visible keys that belong to `bucket`.
    pub fn extract_keys<'a, I, F>(&self, bucket: Bucket, keys: I, exclude: F) -> BTreeSet<String>
    where
        I: IntoIterator<Item = &'a str>,
        I::IntoIter: 'a,
        F: Fn(&str) -> bool,
    {
        keys.into_iter()
            .filter(|&key| !Self::is_reserved(key) && !exclude(key))
            .filter(|&key| self.matches(bucket, key))
            .map(ToString::to_string)
            .collect()
    }

    /// Classifies every visible key into all buckets it matches.
    pub fn classify<'a, I, F>(&self, keys: I, exclude: F) -> Classification
    where
        I: IntoIterator<Item = &'a str>,
        I::IntoIter: 'a,
        F: Fn(&str) -> bool,
    {
        let mut classification = Classification::default();
        for key in keys {
            if Self::is_reserved(key) || exclude(key) {
                continue;
            }
            let mut matched = false;
            if self.rules.system.matches(key) {
                classification.system.insert(key.to_string());
                matched = true;
            }
            if self.rules.facebook.matches(key) {
                classification.facebook.insert(key.to_string());
                matched = true;
            }
            if self.rules.firebase.matches(key) {
                classification.firebase.insert(key.to_string());
                matched = true;
            }
            if !matched {
                classification.user.insert(key.to_string());
            }
        }
        log::debug!(
            "classified keys: user={} system={} facebook={} firebase={}",
            classification.user.len(),
            classification.system.len(),
            classification.facebook.len(),
            classification.firebase.len()
        );
        classification
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;
    use crate::rules::KeyRule;

    const SCENARIO_KEYS: [&str; 4] = [
        "AppleLocale",
        "myFeatureFlag",
        "com.facebook.sdk.token",
        "firebase.instance_id",
    ];

    fn set(keys: &[&str]) -> BTreeSet<String> {
        keys.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_default_rules_scenario() {
        let classifier = KeyClassifier::default();
        let classification = classifier.classify(SCENARIO_KEYS, |_| false);

        assert_eq!(classification.system, set(&["AppleLocale"]));
        assert_eq!(classification.user, set(&["myFeatureFlag"]));
        assert_eq!(classification.facebook, set(&["com.facebook.sdk.token"]));
        assert_eq!(classification.firebase, set(&["firebase.instance_id"]));
    }

    #[test]
    fn test_extract_keys_agrees_with_classify() {
        let classifier = KeyClassifier::default();
        let classification = classifier.classify(SCENARIO_KEYS, |_| false);
        for bucket in Bucket::iter() {
            assert_eq!(
                &classifier.extract_keys(bucket, SCENARIO_KEYS, |_| false),
                classification.get(bucket),
                "{bucket}"
            );
        }
    }

    #[test]
    fn test_facebook_and_firebase_views_return_matching_keys() {
        let classifier = KeyClassifier::default();
        let keys = ["com.facebook.a", "com.fireperf.b", "plain"];

        assert_eq!(
            classifier.extract_keys(Bucket::Facebook, keys, |_| false),
            set(&["com.facebook.a"])
        );
        assert_eq!(
            classifier.extract_keys(Bucket::Firebase, keys, |_| false),
            set(&["com.fireperf.b"])
        );
    }

    #[test]
    fn test_reserved_keys_never_classified() {
        let classifier = KeyClassifier::default();
        let reserved = format!("{RESERVED_KEY_PREFIX}history");
        let keys = [reserved.as_str(), "AppleLocale", "myFlag"];

        for bucket in Bucket::iter() {
            let extracted = classifier.extract_keys(bucket, keys, |_| false);
            assert!(!extracted.contains(&reserved), "{bucket}");
        }
    }

    #[test]
    fn test_reserved_filter_runs_before_rules() {
        let rules = ClassificationRules {
            system: KeyRule::new(&[], &["dev."]),
            ..ClassificationRules::default()
        };
        let classifier = KeyClassifier::new(rules);
        let reserved = format!("{RESERVED_KEY_PREFIX}lastTab");

        let classification = classifier.classify([reserved.as_str(), "dev.other"], |_| false);
        assert_eq!(classification.system, set(&["dev.other"]));
        assert!(classification.user.is_empty());
    }

    #[test]
    fn test_reserved_keys_hidden_under_substituted_rules() {
        let reserved = format!("{RESERVED_KEY_PREFIX}x");
        let keys = [reserved.as_str(), "myFlag", "AppleLocale"];
        let documents = [
            r#"{ "reserved_prefix": "acme." }"#,
            r#"{ "reserved_prefix": "" }"#,
            r#"{ "system": { "keys": [], "prefixes": [] } }"#,
        ];

        for document in documents {
            let rules = ClassificationRules::from_json(document).unwrap();
            let classifier = KeyClassifier::new(rules);
            let classification = classifier.classify(keys, |_| false);
            for bucket in Bucket::iter() {
                assert!(!classification.get(bucket).contains(&reserved), "{document} {bucket}");
                assert!(
                    !classifier.extract_keys(bucket, keys, |_| false).contains(&reserved),
                    "{document} {bucket}"
                );
            }
            assert!(classification.user.contains("myFlag"), "{document}");
        }
    }

    #[test]
    fn test_excluded_keys_dropped_from_every_bucket() {
        let classifier = KeyClassifier::default();
        let classification = classifier.classify(SCENARIO_KEYS, |key| key.contains('.'));

        assert_eq!(classification.system, set(&["AppleLocale"]));
        assert_eq!(classification.user, set(&["myFeatureFlag"]));
        assert!(classification.facebook.is_empty());
        assert!(classification.firebase.is_empty());
    }

    #[test]
    fn test_system_key_never_user() {
        let classifier = KeyClassifier::default();
        let keys = ["CarCapabilities", "WebKitCache", "mapping_1"];
        let classification = classifier.classify(keys, |_| false);

        assert_eq!(classification.system, set(&keys));
        assert!(classification.user.is_empty());
    }

    #[test]
    fn test_substituted_rules_with_overlap() {
        let rules = ClassificationRules {
            system: KeyRule::new(&["shared"], &[]),
            facebook: KeyRule::new(&[], &["sh"]),
            firebase: KeyRule::new(&[], &[]),
        };
        let classifier = KeyClassifier::new(rules);
        let reserved = format!("{RESERVED_KEY_PREFIX}shared");
        let classification =
            classifier.classify(["shared", reserved.as_str(), "other"], |_| false);

        assert_eq!(classification.system, set(&["shared"]));
        assert_eq!(classification.facebook, set(&["shared"]));
        assert_eq!(classification.user, set(&["other"]));
    }

    #[test]
    fn test_classification_is_deterministic() {
        let classifier = KeyClassifier::default();
        let first = classifier.classify(SCENARIO_KEYS, |_| false);
        let second = classifier.classify(SCENARIO_KEYS, |_| false);
        assert_eq!(first, second);
    }

    #[test]
    fn test_visible_keys() {
        let reserved = format!("{RESERVED_KEY_PREFIX}x");
        let keys = vec![reserved.as_str(), "a", "b"];
        let visible: Vec<_> = KeyClassifier::visible_keys(keys, |key| key == "b").collect();
        assert_eq!(visible, ["a"]);
    }
}
