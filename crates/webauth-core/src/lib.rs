//! Core WebAuth metadata model.
//!
//! An upstream trusted tier (Apache mod_webauth / mod_webauthldap, or a
//! reverse proxy standing in for it) authenticates each request and injects
//! the result into per-request metadata as flat, environment-variable-style
//! key/value pairs. This crate owns the protocol for that metadata:
//!
//! - [`Metadata`] — the flat per-request key/value mapping
//! - [`keys`] — the fixed carrier-key constants
//! - [`decode_attributes`] — flat `WEBAUTH_LDAP_*` keys → nested attributes
//! - [`WebauthInfo`] — the lazily-computed identity envelope for one request
//! - [`testing`] — synthesis of the same encoding from structured test data
//! - [`Error`] / [`Result`] — error types
//!
//! Nothing here authenticates anyone: the metadata is trusted as-is. There
//! is no I/O; everything is synchronous and O(number of metadata keys).

#![forbid(unsafe_code)]

pub mod attributes;
pub mod error;
pub mod info;
pub mod keys;
pub mod metadata;
pub mod testing;

pub use attributes::{AttrValue, Attributes, decode_attributes};
pub use error::{Error, Result};
pub use info::WebauthInfo;
pub use metadata::{Metadata, MetadataSource};
pub use testing::{FieldValue, TestFields, apply_fields};
