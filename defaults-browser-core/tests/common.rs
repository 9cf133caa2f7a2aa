//! Common test utilities shared across integration tests.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use defaults_browser_core::value::archive::archive_url;
use defaults_browser_core::{MemoryStore, MemoryStoreProvider, StoreValue};
use url::Url;

/// Name of the app-group suite registered by [`create_test_provider`].
pub const GROUP_SUITE: &str = "group.dev.example.shared";

/// A standard store populated the way a real app's defaults look: a mix of
/// app keys, system keys and SDK keys.
pub fn create_standard_store() -> Arc<MemoryStore> {
    let homepage = Url::parse("https://example.com/welcome").expect("url");
    Arc::new(MemoryStore::with_entries([
        ("AppleLanguages", StoreValue::Array(vec![StoreValue::from("en")])),
        ("AppleLocale", StoreValue::from("en_US")),
        ("NSInterfaceStyle", StoreValue::from("macintosh")),
        ("com.apple.content-rating.AppRating", StoreValue::Integer(1000)),
        ("com.facebook.sdk:autoLogAppEventsEnabled", StoreValue::Bool(true)),
        ("firebase_installations_id", StoreValue::from("fid")),
        ("dev.defaults-browser.lastTab", StoreValue::Integer(2)),
        ("volume", StoreValue::Float(42.0)),
        ("profile", StoreValue::from("{\"name\":\"Alice\",\"age\":30}")),
        (
            "homepage",
            StoreValue::Data(archive_url(&homepage).expect("archive")),
        ),
        (
            "installedAt",
            StoreValue::Date(Utc.with_ymd_and_hms(2022, 5, 1, 8, 0, 0).unwrap()),
        ),
    ]))
}

/// An app-group suite holding only app keys.
#[allow(dead_code, reason = "used in tests")]
pub fn create_group_store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::with_entries([
        ("sharedToken", StoreValue::from("abc")),
        ("widgetRefreshCount", StoreValue::Integer(3)),
    ]))
}

/// A provider serving [`create_standard_store`] and [`create_group_store`]
/// under [`GROUP_SUITE`]. Returns both stores for direct inspection.
#[allow(dead_code, reason = "used in tests")]
pub fn create_test_provider() -> (Arc<MemoryStore>, Arc<MemoryStore>, MemoryStoreProvider) {
    let standard = create_standard_store();
    let group = create_group_store();
    let provider =
        MemoryStoreProvider::new(standard.clone()).with_suite(GROUP_SUITE, group.clone());
    (standard, group, provider)
}
