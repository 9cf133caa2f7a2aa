//! Inspector session over the standard store and any named suites.

use std::collections::HashMap;
use std::sync::Arc;

use crate::bucket::Bucket;
use crate::classifier::KeyClassifier;
use crate::container::{exclude_nothing, Container, ExcludeKeys};
use crate::rules::ClassificationRules;
use crate::store::StoreProvider;

/// Display name of the application's standard store.
pub const STANDARD_CONTAINER_NAME: &str = "Standard";

/// Options for building a [`Browser`].
#[derive(Clone)]
pub struct BrowserOptions {
    suite_names: Vec<String>,
    rules: ClassificationRules,
    exclude_keys: ExcludeKeys,
    bucket_exclusions: HashMap<Bucket, ExcludeKeys>,
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            suite_names: Vec::new(),
            rules: ClassificationRules::default(),
            exclude_keys: exclude_nothing(),
            bucket_exclusions: HashMap::new(),
        }
    }
}

impl BrowserOptions {
    /// Creates options with the built-in rules and no suites.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds named suites to browse after the standard store.
    #[must_use]
    pub fn suite_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.suite_names.extend(names.into_iter().map(Into::into));
        self
    }

    /// Replaces the classification rules.
    #[must_use]
    pub fn rules(mut self, rules: ClassificationRules) -> Self {
        self.rules = rules;
        self
    }

    /// Hides keys matching `exclude` from every bucket of every container.
    #[must_use]
    pub fn exclude_keys(mut self, exclude: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        self.exclude_keys = Arc::new(exclude);
        self
    }

    /// Hides keys matching `exclude` from `bucket` only.
    #[must_use]
    pub fn exclude_from_bucket(
        mut self,
        bucket: Bucket,
        exclude: impl Fn(&str) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.bucket_exclusions.insert(bucket, Arc::new(exclude));
        self
    }
}

/// Keys of one container shown under a bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Name of the container.
    pub container_name: String,
    /// Matching keys, sorted.
    pub keys: Vec<String>,
}

/// An inspector session over a fixed list of containers.
pub struct Browser {
    containers: Vec<Container>,
    bucket_exclusions: HashMap<Bucket, ExcludeKeys>,
}

impl Browser {
    /// Opens the standard store and each requested suite.
    ///
    /// Suites the provider cannot open are skipped.
    #[must_use]
    pub fn new(provider: &dyn StoreProvider, options: BrowserOptions) -> Self {
        let classifier = Arc::new(KeyClassifier::new(options.rules));
        let mut containers = vec![Container::new(
            STANDARD_CONTAINER_NAME,
            provider.standard(),
            options.exclude_keys.clone(),
            classifier.clone(),
        )];
        for name in options.suite_names {
            match provider.suite(&name) {
                Some(store) => containers.push(Container::new(
                    name,
                    store,
                    options.exclude_keys.clone(),
                    classifier.clone(),
                )),
                None => log::warn!("unable to open suite '{name}'"),
            }
        }
        Self {
            containers,
            bucket_exclusions: options.bucket_exclusions,
        }
    }

    /// Returns the containers in display order.
    #[must_use]
    pub fn containers(&self) -> &[Container] {
        &self.containers
    }

    /// Returns the container named `name`.
    #[must_use]
    pub fn container(&self, name: &str) -> Option<&Container> {
        self.containers.iter().find(|container| container.name() == name)
    }

    /// Lists the keys in `bucket` for every container.
    ///
    /// `query`, when non-empty, keeps only keys containing it
    /// case-insensitively. Containers with no matching keys are omitted.
    #[must_use]
    pub fn sections(&self, bucket: Bucket, query: Option<&str>) -> Vec<Section> {
        let query = query
            .map(str::trim)
            .filter(|query| !query.is_empty())
            .map(str::to_lowercase);
        self.containers
            .iter()
            .filter_map(|container| {
                let keys: Vec<String> = self
                    .bucket_keys(container, bucket)
                    .into_iter()
                    .filter(|key| {
                        query
                            .as_deref()
                            .map_or(true, |query| key.to_lowercase().contains(query))
                    })
                    .collect();
                (!keys.is_empty()).then(|| Section {
                    container_name: container.name().to_string(),
                    keys,
                })
            })
            .collect()
    }

    /// Removes every key shown under `bucket` from every container.
    ///
    /// Returns the number of removed keys.
    pub fn remove_all(&self, bucket: Bucket) -> usize {
        let mut removed = 0;
        for container in &self.containers {
            for key in self.bucket_keys(container, bucket) {
                container.remove(&key);
                removed += 1;
            }
        }
        log::debug!("removed {removed} {bucket} keys");
        removed
    }

    fn bucket_keys(&self, container: &Container, bucket: Bucket) -> Vec<String> {
        let mut keys = container.extract_keys(bucket);
        if let Some(exclude) = self.bucket_exclusions.get(&bucket) {
            keys.retain(|key| !exclude(key));
        }
        keys
    }
}
