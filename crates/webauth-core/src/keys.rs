//! Carrier-key constants for WebAuth metadata.
//!
//! These are the fixed, case-sensitive keys under which the upstream
//! authentication tier transports each logical field. They match what
//! mod_webauth and mod_webauthldap set in the request environment.

/// Login name of the authenticated user (primary carrier).
pub const WEBAUTH_USER: &str = "WEBAUTH_USER";

/// Login name fallback, set by generic auth modules.
pub const REMOTE_USER: &str = "REMOTE_USER";

/// Prefix for LDAP attributes (`WEBAUTH_LDAP_<NAME>` single-valued,
/// `WEBAUTH_LDAP_<NAME><n>` multi-valued with a 1-based suffix).
pub const LDAP_ATTRIBUTE_PREFIX: &str = "WEBAUTH_LDAP_";

/// Privilege group that authorized the user.
pub const WEBAUTH_LDAPPRIVGROUP: &str = "WEBAUTH_LDAPPRIVGROUP";

/// Misspelled variant of the privilege-group key found in the wild.
/// Read as a fallback so deployments relying on it keep working.
pub const WEBAUTH_LDAPPRIVGROUP_COMPAT: &str = "WEABUTH_LDAPPRIVGROUP";

/// The `Require` rule that authenticated the user.
pub const WEBAUTH_LDAPAUTHRULE: &str = "WEBAUTH_LDAPAUTHRULE";

/// Creation time of the authentication token, integer epoch seconds.
pub const WEBAUTH_TOKEN_CREATION: &str = "WEBAUTH_TOKEN_CREATION";

/// Expiration time of the authentication token, integer epoch seconds.
/// Not authoritative — an inactivity expiry may fire earlier.
pub const WEBAUTH_TOKEN_EXPIRATION: &str = "WEBAUTH_TOKEN_EXPIRATION";

/// Last-use time of the authentication token, integer epoch seconds.
/// Only present when the upstream tracks last use.
pub const WEBAUTH_TOKEN_LASTUSED: &str = "WEBAUTH_TOKEN_LASTUSED";

/// Sentinel login name meaning "present but not authenticated" (set when
/// the upstream allows optional authentication).
pub const ANONYMOUS: &str = "<anonymous>";
