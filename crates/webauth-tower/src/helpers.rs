//! Envelope access for arbitrary call sites.
//!
//! Anything that holds request extensions can hand out the envelope the
//! middleware published there. [`HasWebauthInfo`] is the capability;
//! [`webauth`] is the strict accessor that treats a missing envelope as
//! the wiring mistake it is.

use http::{Extensions, Request, request::Parts};
use webauth_core::{Error, Result, WebauthInfo};

/// Capability: holds (or can reach) the request's identity envelope.
pub trait HasWebauthInfo {
    /// The envelope published by the middleware, if any.
    fn webauth_info(&self) -> Option<&WebauthInfo>;
}

impl HasWebauthInfo for Extensions {
    fn webauth_info(&self) -> Option<&WebauthInfo> {
        self.get::<WebauthInfo>()
    }
}

impl HasWebauthInfo for Parts {
    fn webauth_info(&self) -> Option<&WebauthInfo> {
        self.extensions.get::<WebauthInfo>()
    }
}

impl<B> HasWebauthInfo for Request<B> {
    fn webauth_info(&self) -> Option<&WebauthInfo> {
        self.extensions().get::<WebauthInfo>()
    }
}

/// The current request's identity envelope.
///
/// Errors when no envelope is present, which means the injecting
/// middleware is not installed (or this source never saw the request's
/// extensions) — a configuration problem, not a logged-out user.
pub fn webauth<S: HasWebauthInfo + ?Sized>(source: &S) -> Result<&WebauthInfo> {
    source
        .webauth_info()
        .ok_or(Error::Unavailable("request extensions"))
}

/// The authenticated login name, if any.
///
/// `None` both when the user is not logged in and when the middleware is
/// missing; use [`webauth`] to tell those apart.
pub fn login_from_parts(parts: &Parts) -> Option<&str> {
    parts.webauth_info().and_then(WebauthInfo::login)
}
