//! Synthesis of WebAuth metadata from structured test data.
//!
//! For development and test environments with no real authentication tier
//! in front: a [`TestFields`] table of logical field names is encoded into
//! exactly the flat key convention the decoder expects, so everything
//! downstream behaves as it would in production.
//!
//! The encoding is the strict inverse of [`decode_attributes`]: applying a
//! table and decoding the result reproduces the table.
//!
//! [`decode_attributes`]: crate::attributes::decode_attributes

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::keys;
use crate::metadata::Metadata;

/// Logical fields that map to their own `WEBAUTH_<NAME>` carrier key
/// instead of the LDAP attribute namespace.
pub const DIRECT_FIELDS: [&str; 5] = [
    "USER",
    "TOKEN_LASTUSED",
    "TOKEN_EXPIRATION",
    "LDAPAUTHRULE",
    "LDAPPRIVGROUP",
];

/// A field value to synthesize: one string, or an ordered sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Encoded as a bare key.
    Single(String),
    /// Encoded as one key per element with a 1-based positional suffix.
    Multi(Vec<String>),
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Single(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Single(v)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(vs: Vec<&str>) -> Self {
        FieldValue::Multi(vs.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(vs: Vec<String>) -> Self {
        FieldValue::Multi(vs)
    }
}

/// Table of logical field name → value(s) to synthesize.
///
/// Field names are case-insensitive (`user` and `USER` are the same
/// field). Serde-transparent, so a dev environment can keep its test
/// identity in plain TOML:
///
/// ```toml
/// user = "test-user"
/// mail = "someone@example.com"
/// groups = ["staff", "admins"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TestFields(BTreeMap<String, FieldValue>);

impl TestFields {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, builder-style.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    /// Iterate over the fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Encode every field of `fields` into `metadata`.
pub fn apply_fields(metadata: &mut Metadata, fields: &TestFields) {
    for (name, value) in fields.iter() {
        apply_field(metadata, name, value);
    }
}

fn apply_field(metadata: &mut Metadata, name: &str, value: &FieldValue) {
    let normalized = name.to_ascii_uppercase();
    if DIRECT_FIELDS.contains(&normalized.as_str()) {
        let single = match value {
            FieldValue::Single(v) => Some(v.as_str()),
            // A direct carrier key holds exactly one value.
            FieldValue::Multi(vs) => {
                log::warn!(
                    "test field {normalized:?} is direct but was given {} values; using the first",
                    vs.len()
                );
                vs.first().map(String::as_str)
            }
        };
        if let Some(v) = single {
            metadata.insert(format!("WEBAUTH_{normalized}"), v);
        }
    } else {
        match value {
            FieldValue::Single(v) => {
                metadata.insert(format!("{}{normalized}", keys::LDAP_ATTRIBUTE_PREFIX), v.as_str());
            }
            FieldValue::Multi(vs) => {
                for (i, v) in vs.iter().enumerate() {
                    metadata.insert(
                        format!("{}{normalized}{}", keys::LDAP_ATTRIBUTE_PREFIX, i + 1),
                        v.as_str(),
                    );
                }
            }
        }
    }
}
