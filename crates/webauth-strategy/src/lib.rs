//! Strategy adapter for pluggable-authentication frameworks.
//!
//! Frameworks that chain authentication strategies per request need two
//! answers from a WebAuth-backed strategy: *should this strategy run*
//! ([`WebauthStrategy::valid`] — the envelope's login state) and *who is
//! the user* ([`WebauthStrategy::authenticate`] — a configurable finder
//! evaluated against the envelope and the request).
//!
//! The finder is an explicit field injected at construction, generic over
//! the application's user type. The default finder builds a minimal
//! [`WebauthUser`] from the envelope; a real application ties the strategy
//! to its own user model:
//!
//! ```ignore
//! let strategy = WebauthStrategy::with_finder(|cx| {
//!     let mail = cx.info.attribute("mail")?.first()?;
//!     users.find_by_email(mail)
//! });
//! ```

use std::fmt;
use std::sync::Arc;

use http::request::Parts;
use webauth_core::{Result, WebauthInfo};
use webauth_tower::webauth;

/// Minimal identity holder resolved by the default finder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebauthUser {
    /// Login name from the envelope.
    pub login: String,
}

impl WebauthUser {
    /// Build from an envelope; `None` when not logged in.
    pub fn from_info(info: &WebauthInfo) -> Option<Self> {
        info.login().map(|login| Self {
            login: login.to_string(),
        })
    }
}

/// What the finder gets to look at: the identity envelope plus the rest of
/// the request, so it can consult headers or other extensions.
pub struct StrategyContext<'a> {
    /// The request's identity envelope.
    pub info: &'a WebauthInfo,
    /// The request head.
    pub parts: &'a Parts,
}

/// User-lookup function evaluated by [`WebauthStrategy::authenticate`].
pub type Finder<U> = Arc<dyn Fn(&StrategyContext<'_>) -> Option<U> + Send + Sync>;

/// Outcome of an authentication attempt.
///
/// A finder that resolves nobody is a *failed authentication*, not an
/// error; errors are reserved for misconfiguration (see
/// [`webauth_core::Error`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Authentication<U> {
    /// The finder resolved a user.
    Success(U),
    /// The finder resolved nobody; carries the failure label.
    Failure(&'static str),
}

impl<U> Authentication<U> {
    /// The resolved user, if authentication succeeded.
    pub fn user(&self) -> Option<&U> {
        match self {
            Authentication::Success(user) => Some(user),
            Authentication::Failure(_) => None,
        }
    }
}

/// WebAuth-backed authentication strategy.
pub struct WebauthStrategy<U = WebauthUser> {
    finder: Finder<U>,
}

impl<U> WebauthStrategy<U> {
    /// Create a strategy with an injected finder.
    pub fn with_finder<F>(finder: F) -> Self
    where
        F: Fn(&StrategyContext<'_>) -> Option<U> + Send + Sync + 'static,
    {
        Self {
            finder: Arc::new(finder),
        }
    }

    /// Whether this strategy applies to the request: the envelope's
    /// logged-in state. A missing envelope is a configuration error, not
    /// "not logged in".
    pub fn valid(&self, parts: &Parts) -> Result<bool> {
        Ok(webauth(parts)?.logged_in())
    }

    /// Resolve the user via the finder.
    pub fn authenticate(&self, parts: &Parts) -> Result<Authentication<U>> {
        let info = webauth(parts)?;
        let cx = StrategyContext { info, parts };
        match (self.finder)(&cx) {
            Some(user) => Ok(Authentication::Success(user)),
            None => {
                log::debug!("finder resolved no user for {:?}", info.login());
                Ok(Authentication::Failure("invalid"))
            }
        }
    }
}

impl WebauthStrategy<WebauthUser> {
    /// Strategy with the default finder.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for WebauthStrategy<WebauthUser> {
    fn default() -> Self {
        Self::with_finder(|cx| WebauthUser::from_info(cx.info))
    }
}

impl<U> Clone for WebauthStrategy<U> {
    fn clone(&self) -> Self {
        Self {
            finder: self.finder.clone(),
        }
    }
}

impl<U> fmt::Debug for WebauthStrategy<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebauthStrategy").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Request;
    use webauth_core::{Error, Metadata};

    fn parts_with_info(pairs: &[(&str, &str)]) -> Parts {
        let md: Metadata = pairs.iter().copied().collect();
        let (mut parts, _body) = Request::new(()).into_parts();
        parts.extensions.insert(WebauthInfo::new(md));
        parts
    }

    #[test]
    fn valid_mirrors_login_state() {
        let logged_in = parts_with_info(&[("WEBAUTH_USER", "blue")]);
        let logged_out = parts_with_info(&[]);
        let strategy = WebauthStrategy::new();
        assert!(strategy.valid(&logged_in).unwrap());
        assert!(!strategy.valid(&logged_out).unwrap());
    }

    #[test]
    fn default_finder_builds_a_webauth_user() {
        let parts = parts_with_info(&[("WEBAUTH_USER", "blue")]);
        let outcome = WebauthStrategy::new().authenticate(&parts).unwrap();
        assert_eq!(
            outcome,
            Authentication::Success(WebauthUser {
                login: "blue".to_string()
            })
        );
        assert_eq!(outcome.user().map(|u| u.login.as_str()), Some("blue"));
    }

    #[test]
    fn default_finder_fails_when_logged_out() {
        let parts = parts_with_info(&[("WEBAUTH_USER", "<anonymous>")]);
        let outcome = WebauthStrategy::new().authenticate(&parts).unwrap();
        assert_eq!(outcome, Authentication::Failure("invalid"));
        assert!(outcome.user().is_none());
    }

    #[test]
    fn custom_finder_sees_envelope_and_request() {
        #[derive(Debug, PartialEq)]
        struct AppUser {
            email: String,
        }

        let parts = parts_with_info(&[
            ("WEBAUTH_USER", "blue"),
            ("WEBAUTH_LDAP_MAIL", "blue@example.com"),
        ]);
        let strategy = WebauthStrategy::with_finder(|cx: &StrategyContext<'_>| {
            let email = cx.info.attribute("mail")?.first()?;
            Some(AppUser {
                email: email.to_string(),
            })
        });

        let outcome = strategy.authenticate(&parts).unwrap();
        assert_eq!(
            outcome,
            Authentication::Success(AppUser {
                email: "blue@example.com".to_string()
            })
        );
    }

    #[test]
    fn custom_finder_miss_is_a_failure_not_an_error() {
        let parts = parts_with_info(&[("WEBAUTH_USER", "blue")]);
        let strategy: WebauthStrategy<WebauthUser> = WebauthStrategy::with_finder(|_| None);
        assert_eq!(
            strategy.authenticate(&parts).unwrap(),
            Authentication::Failure("invalid")
        );
    }

    #[test]
    fn missing_envelope_is_an_error() {
        let (parts, _body) = Request::new(()).into_parts();
        let strategy = WebauthStrategy::new();
        assert_eq!(
            strategy.valid(&parts).unwrap_err(),
            Error::Unavailable("request extensions")
        );
        assert!(strategy.authenticate(&parts).is_err());
    }
}
