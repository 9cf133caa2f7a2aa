//! In-memory implementations of the store traits.
//!
//! Used by the test suite and by hosts that want to preview the inspector
//! without touching real settings.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{Store, StoreProvider};
use crate::value::StoreValue;

// =============================================================================
// Memory Store
// =============================================================================

/// Thread-safe store backed by a `BTreeMap`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<BTreeMap<String, StoreValue>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `entries`.
    #[must_use]
    pub fn with_entries<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<StoreValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        let values = entries
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self {
            values: Mutex::new(values),
        }
    }

    /// Returns the number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values().len()
    }

    /// Returns `true` if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values().is_empty()
    }

    fn values(&self) -> MutexGuard<'_, BTreeMap<String, StoreValue>> {
        self.values.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Option<StoreValue> {
        self.values().get(key).cloned()
    }

    fn set(&self, key: &str, value: StoreValue) {
        self.values().insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) {
        self.values().remove(key);
    }

    fn keys(&self) -> Vec<String> {
        self.values().keys().cloned().collect()
    }
}

// =============================================================================
// Memory Store Provider
// =============================================================================

/// Provider serving one standard [`MemoryStore`] and any registered suites.
#[derive(Default)]
pub struct MemoryStoreProvider {
    standard: Arc<MemoryStore>,
    suites: HashMap<String, Arc<MemoryStore>>,
}

impl MemoryStoreProvider {
    /// Creates a provider around `standard` with no suites.
    #[must_use]
    pub fn new(standard: Arc<MemoryStore>) -> Self {
        Self {
            standard,
            suites: HashMap::new(),
        }
    }

    /// Registers a named suite. Unregistered names cannot be opened.
    #[must_use]
    pub fn with_suite(mut self, name: impl Into<String>, store: Arc<MemoryStore>) -> Self {
        self.suites.insert(name.into(), store);
        self
    }
}

impl StoreProvider for MemoryStoreProvider {
    fn standard(&self) -> Arc<dyn Store> {
        self.standard.clone()
    }

    fn suite(&self, name: &str) -> Option<Arc<dyn Store>> {
        self.suites
            .get(name)
            .map(|store| Arc::clone(store) as Arc<dyn Store>)
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use super::*;
    use crate::value::archive::archive_url;

    #[test]
    fn test_memory_store_basic_operations() {
        let store = MemoryStore::with_entries([("a", StoreValue::Integer(1))]);
        assert_eq!(store.len(), 1);

        store.set("b", StoreValue::from("two"));
        assert_eq!(store.get("b"), Some(StoreValue::from("two")));
        assert_eq!(store.keys(), ["a", "b"]);

        store.remove("a");
        store.remove("a");
        assert_eq!(store.get("a"), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_url_accessor_decodes_archive() {
        let url = Url::parse("https://example.com").unwrap();
        let store = MemoryStore::with_entries([
            ("url", StoreValue::Data(archive_url(&url).unwrap())),
            ("blob", StoreValue::Data(vec![1, 2, 3])),
            ("text", StoreValue::from("https://example.com")),
        ]);

        assert_eq!(store.url("url"), Some(url));
        assert_eq!(store.url("blob"), None);
        assert_eq!(store.url("text"), None);
        assert_eq!(store.url("missing"), None);
    }

    #[test]
    fn test_provider_opens_registered_suites_only() {
        let suite = Arc::new(MemoryStore::with_entries([("k", true)]));
        let provider = MemoryStoreProvider::default().with_suite("group.shared", suite);

        let opened = provider.suite("group.shared").expect("registered suite");
        assert_eq!(opened.get("k"), Some(StoreValue::Bool(true)));
        assert!(provider.suite("group.other").is_none());
        assert!(provider.standard().keys().is_empty());
    }
}
