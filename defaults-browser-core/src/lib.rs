#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
//! Core of an in-app inspector for mobile settings stores.
//!
//! The crate sorts the keys of a key-value settings store (`UserDefaults`,
//! `SharedPreferences`) into provenance buckets, detects the shape of each
//! stored value, renders it for display and round-trips edits back into
//! the store. Platform stores plug in through [`Store`] and
//! [`StoreProvider`].
//!
//! ```
//! use std::sync::Arc;
//!
//! use defaults_browser_core::{
//!     Browser, BrowserOptions, Bucket, MemoryStore, MemoryStoreProvider, StoreValue,
//! };
//!
//! let store = Arc::new(MemoryStore::with_entries([
//!     ("AppleLocale", StoreValue::from("en_US")),
//!     ("myFeatureFlag", StoreValue::Bool(true)),
//! ]));
//! let browser = Browser::new(&MemoryStoreProvider::new(store), BrowserOptions::new());
//!
//! let sections = browser.sections(Bucket::User, None);
//! assert_eq!(sections[0].keys, ["myFeatureFlag"]);
//! ```

mod browser;
pub use browser::*;

mod bucket;
pub use bucket::*;

mod classifier;
pub use classifier::*;

mod container;
pub use container::*;

mod editor;
pub use editor::*;

mod error;
pub use error::*;

mod render;
pub use render::*;

mod rules;
pub use rules::*;

pub mod json;
pub mod logger;
pub mod store;
pub use store::{MemoryStore, MemoryStoreProvider, Store, StoreProvider};

pub mod value;
pub use value::tagged::{detect, encode, StoreWrite, TaggedValue, ValueType};
pub use value::text::EditText;
pub use value::{JsonDocument, JsonSource, RawValue, StoreValue};

#[cfg(feature = "ffi")]
uniffi::setup_scaffolding!("defaults_browser_core");
