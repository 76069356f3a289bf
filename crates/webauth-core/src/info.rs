//! The per-request identity envelope.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};

use crate::attributes::{AttrValue, Attributes, decode_attributes};
use crate::error::{Error, Result};
use crate::keys;
use crate::metadata::{Metadata, MetadataSource};

/// Identity information for one request, derived from ambient metadata.
///
/// Login state and name are resolved at construction; everything else is
/// computed on first access and memoized for the life of the envelope. The
/// envelope owns a snapshot of the metadata, so nothing it reports can
/// change after construction.
///
/// One envelope per request, never shared across requests. It is `Clone +
/// Send + Sync` so the middleware can park it in `http::Extensions`;
/// memoized fields survive the clone.
#[derive(Debug, Clone, Default)]
pub struct WebauthInfo {
    metadata: Metadata,
    login: Option<String>,
    logged_in: bool,
    attributes: OnceLock<Attributes>,
    privgroup: OnceLock<Option<String>>,
    authrule: OnceLock<Option<String>>,
    token_creation: OnceLock<Result<Option<DateTime<Utc>>>>,
    token_expiration: OnceLock<Result<Option<DateTime<Utc>>>>,
    token_lastused: OnceLock<Result<Option<DateTime<Utc>>>>,
}

impl WebauthInfo {
    /// Build an envelope from a metadata snapshot.
    ///
    /// `WEBAUTH_USER` takes precedence over `REMOTE_USER`. Whichever wins
    /// must be non-empty and not the anonymous sentinel, otherwise the
    /// request is treated as not logged in and the login name is cleared.
    pub fn new(metadata: Metadata) -> Self {
        let login = metadata
            .get(keys::WEBAUTH_USER)
            .or_else(|| metadata.get(keys::REMOTE_USER));
        let logged_in = matches!(login, Some(l) if !l.is_empty() && l != keys::ANONYMOUS);
        let login = if logged_in {
            login.map(str::to_string)
        } else {
            None
        };
        Self {
            metadata,
            login,
            logged_in,
            ..Self::default()
        }
    }

    /// Build an envelope from anything that can supply metadata.
    /// A source with no metadata yields a logged-out envelope.
    pub fn from_source<S: MetadataSource + ?Sized>(source: &S) -> Self {
        Self::new(source.ambient_metadata().cloned().unwrap_or_default())
    }

    /// Login name of the authenticated user. `None` when not logged in,
    /// even if a carrier key was present but empty or anonymous.
    pub fn login(&self) -> Option<&str> {
        self.login.as_deref()
    }

    /// Whether the request carries an authenticated identity.
    pub fn logged_in(&self) -> bool {
        self.logged_in
    }

    /// LDAP attributes passed by the upstream tier, decoded on first
    /// access. See [`decode_attributes`] for the encoding.
    pub fn attributes(&self) -> &Attributes {
        self.attributes
            .get_or_init(|| decode_attributes(&self.metadata))
    }

    /// Look up one attribute by name, case-insensitively
    /// (attribute names are uppercase on the wire).
    pub fn attribute(&self, name: &str) -> Option<&AttrValue> {
        self.attributes().get(&name.to_ascii_uppercase())
    }

    /// Privilege group that authorized the user.
    ///
    /// Reads the documented key first, then the misspelled variant
    /// (see [`keys::WEBAUTH_LDAPPRIVGROUP_COMPAT`]).
    pub fn privgroup(&self) -> Option<&str> {
        self.privgroup
            .get_or_init(|| {
                self.metadata
                    .get(keys::WEBAUTH_LDAPPRIVGROUP)
                    .or_else(|| self.metadata.get(keys::WEBAUTH_LDAPPRIVGROUP_COMPAT))
                    .map(str::to_string)
            })
            .as_deref()
    }

    /// The `Require` rule that authenticated the user.
    pub fn authrule(&self) -> Option<&str> {
        self.authrule
            .get_or_init(|| self.metadata.get(keys::WEBAUTH_LDAPAUTHRULE).map(str::to_string))
            .as_deref()
    }

    /// When the authentication token was created.
    pub fn token_creation(&self) -> Result<Option<DateTime<Utc>>> {
        self.token_creation
            .get_or_init(|| self.parse_timestamp(keys::WEBAUTH_TOKEN_CREATION))
            .clone()
    }

    /// When the authentication token expires. Not authoritative — an
    /// inactivity expiry may fire earlier.
    pub fn token_expiration(&self) -> Result<Option<DateTime<Utc>>> {
        self.token_expiration
            .get_or_init(|| self.parse_timestamp(keys::WEBAUTH_TOKEN_EXPIRATION))
            .clone()
    }

    /// When the authentication token was last used. Only present when the
    /// upstream tracks last use.
    pub fn token_lastused(&self) -> Result<Option<DateTime<Utc>>> {
        self.token_lastused
            .get_or_init(|| self.parse_timestamp(keys::WEBAUTH_TOKEN_LASTUSED))
            .clone()
    }

    fn parse_timestamp(&self, key: &'static str) -> Result<Option<DateTime<Utc>>> {
        let Some(raw) = self.metadata.get(key) else {
            return Ok(None);
        };
        raw.parse::<i64>()
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .map(Some)
            .ok_or_else(|| Error::MalformedTimestamp {
                key,
                value: raw.to_string(),
            })
    }
}
