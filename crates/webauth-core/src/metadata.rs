//! Per-request ambient metadata.
//!
//! The upstream authentication tier communicates through flat key/value
//! pairs resembling environment variables. [`Metadata`] is the snapshot of
//! those pairs for one request. It is owned data: once an envelope is built
//! from it, later changes to the external mapping are invisible.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Flat key/value mapping carrying the upstream authentication result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(HashMap<String, String>);

impl Metadata {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the current process environment.
    ///
    /// For CGI-style deployments, where the upstream module exports its
    /// variables into the real environment of the handling process.
    pub fn from_process_env() -> Self {
        std::env::vars().collect()
    }

    /// Look up a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Whether a key is present, regardless of its value.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Set a key, returning the previous value if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    /// Iterate over all entries, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the mapping is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<HashMap<String, String>> for Metadata {
    fn from(map: HashMap<String, String>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for Metadata {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.0
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}

/// Capability interface for anything that can hand out ambient metadata.
///
/// Callers that hold the mapping directly implement this trivially;
/// wrappers (request objects, test fixtures) implement it by unwrapping.
/// Resolution is by explicit implementation, never by introspection.
pub trait MetadataSource {
    /// The ambient metadata for the current request, if available.
    fn ambient_metadata(&self) -> Option<&Metadata>;
}

impl MetadataSource for Metadata {
    fn ambient_metadata(&self) -> Option<&Metadata> {
        Some(self)
    }
}
