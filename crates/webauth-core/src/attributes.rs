//! LDAP attribute decoding.
//!
//! The upstream tier flattens multi-valued LDAP attributes into the
//! metadata namespace with a positional suffix:
//!
//! ```text
//! WEBAUTH_LDAP_FOO  = "x"     (scalar form, discarded — see below)
//! WEBAUTH_LDAP_FOO1 = "x"
//! WEBAUTH_LDAP_FOO2 = "y"
//! WEBAUTH_LDAP_BAR  = "z"
//! ```
//!
//! decodes to `{ "FOO" => ["x", "y"], "BAR" => "z" }`.
//!
//! When a bare key and digit-suffixed keys share a name, the upstream set
//! the bare key to an arbitrary one of the values; the suffixed form is the
//! authoritative one, so the scalar is discarded no matter which key is
//! scanned first.

use std::collections::HashMap;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::metadata::Metadata;

/// Decoded attribute mapping, attribute name → value(s).
pub type Attributes = HashMap<String, AttrValue>;

/// A single decoded attribute value.
///
/// Multi-valued attributes keep positional order; a slot is `None` when the
/// source indices were non-contiguous (the position was never supplied, as
/// opposed to supplied-but-empty).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// Value from a bare `WEBAUTH_LDAP_<NAME>` key.
    Single(String),
    /// Values from `WEBAUTH_LDAP_<NAME><n>` keys, indexed by `n - 1`.
    Multi(Vec<Option<String>>),
}

impl AttrValue {
    /// The scalar value, if this attribute is single-valued.
    pub fn as_single(&self) -> Option<&str> {
        match self {
            AttrValue::Single(v) => Some(v.as_str()),
            AttrValue::Multi(_) => None,
        }
    }

    /// The first present value, scalar or positional.
    pub fn first(&self) -> Option<&str> {
        match self {
            AttrValue::Single(v) => Some(v.as_str()),
            AttrValue::Multi(slots) => slots.iter().flatten().map(String::as_str).next(),
        }
    }

    /// All present values in positional order (a scalar yields one value).
    /// Holes are skipped.
    pub fn values(&self) -> Vec<&str> {
        match self {
            AttrValue::Single(v) => vec![v.as_str()],
            AttrValue::Multi(slots) => slots.iter().flatten().map(String::as_str).collect(),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        AttrValue::Single(v.to_string())
    }
}

impl From<Vec<&str>> for AttrValue {
    fn from(vs: Vec<&str>) -> Self {
        AttrValue::Multi(vs.into_iter().map(|v| Some(v.to_string())).collect())
    }
}

/// Decode the `WEBAUTH_LDAP_*` keys of a metadata mapping.
pub fn decode_attributes(metadata: &Metadata) -> Attributes {
    decode_entries(metadata.iter())
}

/// Decode attribute entries from any `(key, value)` iterator.
///
/// The result does not depend on encounter order: the suffixed (sequence)
/// form wins over the bare (scalar) form whichever arrives first, and a
/// scalar never displaces an established sequence.
pub fn decode_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Attributes {
    let multi_re =
        Regex::new(r"^WEBAUTH_LDAP_(\w+?)(\d+)$").expect("invalid multi-valued attribute regex");
    let single_re =
        Regex::new(r"^WEBAUTH_LDAP_(\w+)$").expect("invalid single-valued attribute regex");

    let mut attrs = Attributes::new();
    for (key, value) in entries {
        if let Some(caps) = multi_re.captures(key) {
            // Suffixes are 1-based; 0 or an unparseable run of digits has
            // no valid position and the key is ignored.
            let Some(index) = caps[2].parse::<usize>().ok().and_then(|n| n.checked_sub(1)) else {
                continue;
            };
            let entry = attrs
                .entry(caps[1].to_string())
                .or_insert_with(|| AttrValue::Multi(Vec::new()));
            if let AttrValue::Single(_) = entry {
                // Bare key for the same name: its value is arbitrary,
                // the sequence form replaces it.
                *entry = AttrValue::Multi(Vec::new());
            }
            if let AttrValue::Multi(slots) = entry {
                if slots.len() <= index {
                    slots.resize(index + 1, None);
                }
                slots[index] = Some(value.to_string());
            }
        } else if let Some(caps) = single_re.captures(key) {
            attrs
                .entry(caps[1].to_string())
                .or_insert_with(|| AttrValue::Single(value.to_string()));
        }
        // other keys are not attribute-related
    }
    attrs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_scalar_and_sequence() {
        let md: Metadata = [
            ("WEBAUTH_LDAP_FOO", "x"),
            ("WEBAUTH_LDAP_FOO1", "x"),
            ("WEBAUTH_LDAP_FOO2", "y"),
            ("WEBAUTH_LDAP_BAR", "z"),
        ]
        .into_iter()
        .collect();

        let attrs = decode_attributes(&md);
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs["FOO"], AttrValue::from(vec!["x", "y"]));
        assert_eq!(attrs["BAR"], AttrValue::from("z"));
    }

    #[test]
    fn sequence_wins_when_scalar_scanned_first() {
        let attrs = decode_entries([
            ("WEBAUTH_LDAP_FOO", "stale"),
            ("WEBAUTH_LDAP_FOO1", "x"),
            ("WEBAUTH_LDAP_FOO2", "y"),
        ]);
        assert_eq!(attrs["FOO"], AttrValue::from(vec!["x", "y"]));
    }

    #[test]
    fn sequence_wins_when_scalar_scanned_last() {
        let attrs = decode_entries([
            ("WEBAUTH_LDAP_FOO2", "y"),
            ("WEBAUTH_LDAP_FOO1", "x"),
            ("WEBAUTH_LDAP_FOO", "stale"),
        ]);
        assert_eq!(attrs["FOO"], AttrValue::from(vec!["x", "y"]));
    }

    #[test]
    fn non_contiguous_indices_leave_holes() {
        let attrs = decode_entries([("WEBAUTH_LDAP_FOO1", "x"), ("WEBAUTH_LDAP_FOO3", "z")]);
        assert_eq!(
            attrs["FOO"],
            AttrValue::Multi(vec![
                Some("x".to_string()),
                None,
                Some("z".to_string()),
            ])
        );
        assert_eq!(attrs["FOO"].values(), vec!["x", "z"]);
    }

    #[test]
    fn zero_suffix_is_ignored() {
        let attrs = decode_entries([("WEBAUTH_LDAP_FOO0", "x"), ("WEBAUTH_LDAP_FOO1", "y")]);
        assert_eq!(attrs["FOO"], AttrValue::from(vec!["y"]));
    }

    #[test]
    fn unrelated_keys_are_ignored() {
        let attrs = decode_entries([
            ("WEBAUTH_USER", "blue"),
            ("WEBAUTH_TOKEN_CREATION", "1234567890"),
            ("PATH", "/usr/bin"),
        ]);
        assert!(attrs.is_empty());
    }

    #[test]
    fn name_splits_before_trailing_digits() {
        // The digit run at the end is the position, not part of the name.
        let attrs = decode_entries([("WEBAUTH_LDAP_FOO12", "v")]);
        let slots = match &attrs["FOO"] {
            AttrValue::Multi(slots) => slots,
            other => panic!("expected sequence, got {other:?}"),
        };
        assert_eq!(slots.len(), 12);
        assert_eq!(slots[11].as_deref(), Some("v"));
    }

    #[test]
    fn accessors_flatten_consistently() {
        let single = AttrValue::from("z");
        assert_eq!(single.as_single(), Some("z"));
        assert_eq!(single.first(), Some("z"));
        assert_eq!(single.values(), vec!["z"]);

        let multi = AttrValue::Multi(vec![None, Some("b".to_string())]);
        assert_eq!(multi.as_single(), None);
        assert_eq!(multi.first(), Some("b"));
        assert_eq!(multi.values(), vec!["b"]);
    }
}
