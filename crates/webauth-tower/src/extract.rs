//! Axum extractor for the identity envelope.

use axum::extract::FromRequestParts;
use http::{StatusCode, request::Parts};
use webauth_core::WebauthInfo;

/// Extractor handing the request's [`WebauthInfo`] to an axum handler.
///
/// ```ignore
/// async fn whoami(Webauth(info): Webauth) -> String {
///     info.login().unwrap_or("<not logged in>").to_string()
/// }
/// ```
///
/// Rejects with 500 when [`WebauthLayer`] is not installed — that is a
/// deployment mistake, and answering 401 would misreport it as an
/// unauthenticated user.
///
/// [`WebauthLayer`]: crate::WebauthLayer
#[derive(Debug, Clone)]
pub struct Webauth(pub WebauthInfo);

impl<S> FromRequestParts<S> for Webauth
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<WebauthInfo>()
            .cloned()
            .map(Webauth)
            .ok_or((
                StatusCode::INTERNAL_SERVER_ERROR,
                "webauth middleware not installed",
            ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Request;
    use webauth_core::Metadata;

    #[tokio::test]
    async fn extracts_the_envelope() {
        let md: Metadata = [("WEBAUTH_USER", "blue")].into_iter().collect();
        let req = Request::builder()
            .extension(WebauthInfo::new(md))
            .body(())
            .unwrap();
        let (mut parts, _body) = req.into_parts();

        let Webauth(info) = Webauth::from_request_parts(&mut parts, &())
            .await
            .expect("extraction should succeed");
        assert_eq!(info.login(), Some("blue"));
    }

    #[tokio::test]
    async fn rejects_when_middleware_is_missing() {
        let (mut parts, _body) = Request::new(()).into_parts();
        let (status, _msg) = Webauth::from_request_parts(&mut parts, &())
            .await
            .expect_err("extraction should fail");
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
