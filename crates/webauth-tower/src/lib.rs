//! Tower middleware for WebAuth identity.
//!
//! Provides:
//! - [`WebauthLayer`] / [`WebauthService`] — build a [`WebauthInfo`]
//!   envelope from the request's ambient [`Metadata`] and publish it into
//!   request extensions
//! - [`TestWebauthLayer`] / [`TestWebauthService`] — synthesize metadata
//!   from a [`TestFields`] table for environments with no real
//!   authentication tier (stack it *outside* [`WebauthLayer`] so it runs
//!   first)
//! - [`HasWebauthInfo`] / [`webauth`] — envelope access from anything
//!   holding request extensions
//! - [`Webauth`] — axum extractor for handlers
//!
//! [`WebauthInfo`]: webauth_core::WebauthInfo
//! [`Metadata`]: webauth_core::Metadata
//! [`TestFields`]: webauth_core::TestFields

mod extract;
mod helpers;
mod middleware;
mod testing;

pub use extract::Webauth;
pub use helpers::{HasWebauthInfo, login_from_parts, webauth};
pub use middleware::{WebauthLayer, WebauthService};
pub use testing::{TestWebauthLayer, TestWebauthService};
