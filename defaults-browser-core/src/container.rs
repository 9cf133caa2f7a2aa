//! A named store bound to the key classifier.

use std::fmt;
use std::sync::Arc;

use crate::bucket::Bucket;
use crate::classifier::KeyClassifier;
use crate::store::Store;
use crate::value::tagged::StoreWrite;
use crate::value::RawValue;

/// Predicate over keys; keys for which it returns `true` are hidden.
pub type ExcludeKeys = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Returns a predicate that hides nothing.
#[must_use]
pub fn exclude_nothing() -> ExcludeKeys {
    Arc::new(|_: &str| false)
}

/// A settings store together with its display name, exclusion predicate and
/// classifier.
///
/// Cloning is cheap; clones share the same store.
#[derive(Clone)]
pub struct Container {
    name: String,
    store: Arc<dyn Store>,
    exclude_keys: ExcludeKeys,
    classifier: Arc<KeyClassifier>,
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl Container {
    /// Binds `store` under `name`.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        store: Arc<dyn Store>,
        exclude_keys: ExcludeKeys,
        classifier: Arc<KeyClassifier>,
    ) -> Self {
        Self {
            name: name.into(),
            store,
            exclude_keys,
            classifier,
        }
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the underlying store.
    #[must_use]
    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    /// Returns every visible key, sorted.
    ///
    /// Reserved keys and keys hidden by the exclusion predicate are dropped.
    #[must_use]
    pub fn all_keys(&self) -> Vec<String> {
        let keys = self.store.keys();
        let mut visible: Vec<String> = KeyClassifier::visible_keys(
            keys.iter().map(String::as_str),
            self.exclude_keys.as_ref(),
        )
        .map(ToString::to_string)
        .collect();
        visible.sort();
        visible
    }

    /// Returns the visible keys in `bucket`, sorted.
    #[must_use]
    pub fn extract_keys(&self, bucket: Bucket) -> Vec<String> {
        let keys = self.store.keys();
        self.classifier
            .extract_keys(
                bucket,
                keys.iter().map(String::as_str),
                self.exclude_keys.as_ref(),
            )
            .into_iter()
            .collect()
    }

    /// Removes every key currently in `bucket` and returns how many were removed.
    ///
    /// The key set is snapshotted once; deletes are independent, so a
    /// concurrent writer may leave a key behind.
    pub fn remove_all(&self, bucket: Bucket) -> usize {
        let keys = self.extract_keys(bucket);
        for key in &keys {
            self.store.remove(key);
        }
        log::debug!("removed {} {bucket} keys from '{}'", keys.len(), self.name);
        keys.len()
    }

    /// Looks up `key`, decoding JSON object documents.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<RawValue> {
        self.store.get(key).map(RawValue::load)
    }

    /// Removes `key`.
    pub fn remove(&self, key: &str) {
        log::debug!("removing '{key}' from '{}'", self.name);
        self.store.remove(key);
    }

    /// Applies an encoded write to `key`.
    pub fn apply(&self, key: &str, write: StoreWrite) {
        match write {
            StoreWrite::Set(value) => {
                log::debug!("writing {} to '{key}' in '{}'", value.kind(), self.name);
                self.store.set(key, value);
            }
            StoreWrite::Remove => self.remove(key),
            StoreWrite::Skip => {}
        }
    }
}
