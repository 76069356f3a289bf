//! The envelope-injecting middleware.

use std::task::{Context, Poll};

use http::Request;
use tower::{Layer, Service};
use webauth_core::{Metadata, WebauthInfo};

/// Tower `Layer` that publishes a [`WebauthInfo`] envelope per request.
#[derive(Clone, Debug, Default)]
pub struct WebauthLayer;

impl WebauthLayer {
    /// Create the layer.
    pub fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for WebauthLayer {
    type Service = WebauthService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        WebauthService { inner }
    }
}

/// Tower `Service` wrapping an inner service with envelope injection.
///
/// On each request, builds a fresh [`WebauthInfo`] from the request's
/// [`Metadata`] extension (requests without one get a logged-out envelope),
/// inserts it into the extensions, and delegates. The metadata must be
/// fully populated before this service runs — stack any synthesizing layer
/// outside it.
///
/// Nothing is awaited here, so the inner service's future is returned
/// untouched.
#[derive(Clone, Debug)]
pub struct WebauthService<S> {
    inner: S,
}

impl<S, B> Service<Request<B>> for WebauthService<S>
where
    S: Service<Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<B>) -> Self::Future {
        let metadata = req
            .extensions()
            .get::<Metadata>()
            .cloned()
            .unwrap_or_default();
        let info = WebauthInfo::new(metadata);
        if info.logged_in() {
            log::debug!("request authenticated upstream as {:?}", info.login());
        }
        req.extensions_mut().insert(info);
        self.inner.call(req)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    use std::convert::Infallible;
    use std::future::{Ready, ready};
    use std::sync::{Arc, Mutex};

    use http::{Response, StatusCode};
    use tower::ServiceExt;

    /// Mock inner service that captures the injected envelope.
    #[derive(Clone)]
    pub(crate) struct MockService {
        pub(crate) captured_info: Arc<Mutex<Option<WebauthInfo>>>,
    }

    impl MockService {
        pub(crate) fn new() -> Self {
            Self {
                captured_info: Arc::new(Mutex::new(None)),
            }
        }
    }

    impl Service<Request<()>> for MockService {
        type Response = Response<()>;
        type Error = Infallible;
        type Future = Ready<Result<Self::Response, Self::Error>>;

        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }

        fn call(&mut self, req: Request<()>) -> Self::Future {
            let info = req.extensions().get::<WebauthInfo>().cloned();
            *self.captured_info.lock().unwrap() = info;
            ready(Ok(Response::builder()
                .status(StatusCode::OK)
                .body(())
                .unwrap()))
        }
    }

    #[tokio::test]
    async fn injects_envelope_from_metadata_extension() {
        let mock = MockService::new();
        let captured = mock.captured_info.clone();
        let service = WebauthLayer::new().layer(mock);

        let metadata: Metadata = [("WEBAUTH_USER", "blue")].into_iter().collect();
        let req = Request::builder().extension(metadata).body(()).unwrap();
        let resp = service.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let info = captured.lock().unwrap();
        let info = info.as_ref().expect("envelope should be injected");
        assert!(info.logged_in());
        assert_eq!(info.login(), Some("blue"));
    }

    #[tokio::test]
    async fn missing_metadata_yields_logged_out_envelope() {
        let mock = MockService::new();
        let captured = mock.captured_info.clone();
        let service = WebauthLayer::new().layer(mock);

        let req = Request::builder().body(()).unwrap();
        service.oneshot(req).await.unwrap();

        let info = captured.lock().unwrap();
        let info = info.as_ref().expect("envelope should be injected");
        assert!(!info.logged_in());
        assert_eq!(info.login(), None);
    }

    #[tokio::test]
    async fn each_request_gets_a_fresh_envelope() {
        let mock = MockService::new();
        let captured = mock.captured_info.clone();
        let service = WebauthLayer::new().layer(mock);

        let metadata: Metadata = [("WEBAUTH_USER", "blue")].into_iter().collect();
        let req = Request::builder().extension(metadata).body(()).unwrap();
        service.clone().oneshot(req).await.unwrap();
        assert_eq!(
            captured.lock().unwrap().as_ref().and_then(|i| i.login().map(String::from)),
            Some("blue".to_string())
        );

        let req = Request::builder().body(()).unwrap();
        service.oneshot(req).await.unwrap();
        assert_eq!(
            captured.lock().unwrap().as_ref().and_then(|i| i.login()),
            None
        );
    }
}
