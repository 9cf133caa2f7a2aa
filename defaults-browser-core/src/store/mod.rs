//! Platform abstraction for settings stores.
//!
//! The inspector never talks to the platform store directly. Each platform
//! provides implementations of these traits:
//!
//! - [`Store`]: one named key-value store (`UserDefaults` on iOS,
//!   `SharedPreferences` on Android)
//! - [`StoreProvider`]: opens the standard store and named suites
//!
//! [`memory`] contains in-memory implementations for tests and previews.

pub mod memory;

use std::sync::Arc;

use url::Url;

use crate::value::archive::unarchive_url;
use crate::value::StoreValue;

pub use memory::{MemoryStore, MemoryStoreProvider};

/// A mutable, string-keyed settings store.
///
/// Single-key reads and writes must be thread-safe. No cross-key
/// transaction is expected.
pub trait Store: Send + Sync {
    /// Returns the value stored under `key`.
    fn get(&self, key: &str) -> Option<StoreValue>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: StoreValue);

    /// Removes `key`. Removing an absent key is a no-op.
    fn remove(&self, key: &str);

    /// Returns every key currently in the store.
    fn keys(&self) -> Vec<String>;

    /// Returns the URL stored under `key`.
    ///
    /// URLs are persisted as archived blobs, so they are invisible to
    /// [`Store::get`] as anything but opaque data.
    fn url(&self, key: &str) -> Option<Url> {
        match self.get(key)? {
            StoreValue::Data(bytes) => unarchive_url(&bytes),
            _ => None,
        }
    }

    /// Returns the object stored under `key` through the generic accessor.
    fn object(&self, key: &str) -> Option<StoreValue> {
        self.get(key)
    }
}

/// Provider of the stores an inspector session can browse.
pub trait StoreProvider: Send + Sync {
    /// Returns the application's standard store.
    fn standard(&self) -> Arc<dyn Store>;

    /// Opens the named suite, or `None` if the platform refuses the name.
    fn suite(&self, name: &str) -> Option<Arc<dyn Store>>;
}
