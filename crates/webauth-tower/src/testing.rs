//! Metadata-synthesizing middleware for test and dev environments.

use std::task::{Context, Poll};

use http::Request;
use tower::{Layer, Service};
use webauth_core::{Metadata, TestFields, apply_fields};

/// Tower `Layer` that synthesizes WebAuth metadata from a fixed
/// [`TestFields`] table, for environments where no real authentication
/// tier runs in front of the service.
///
/// Must be stacked *outside* [`WebauthLayer`] so the synthesized keys are
/// in place before the envelope is built:
///
/// ```ignore
/// let app = ServiceBuilder::new()
///     .layer(TestWebauthLayer::new(
///         TestFields::new()
///             .set("user", "test-user")
///             .set("mail", "someone@example.com"),
///     ))
///     .layer(WebauthLayer::new())
///     .service(inner);
/// ```
///
/// [`WebauthLayer`]: crate::WebauthLayer
#[derive(Clone, Debug, Default)]
pub struct TestWebauthLayer {
    fields: TestFields,
}

impl TestWebauthLayer {
    /// Create the layer from a field table.
    pub fn new(fields: TestFields) -> Self {
        Self { fields }
    }
}

impl<S> Layer<S> for TestWebauthLayer {
    type Service = TestWebauthService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        TestWebauthService {
            inner,
            fields: self.fields.clone(),
        }
    }
}

/// Tower `Service` that merges synthesized keys into the request's
/// [`Metadata`] extension before delegating.
#[derive(Clone, Debug)]
pub struct TestWebauthService<S> {
    inner: S,
    fields: TestFields,
}

impl<S, B> Service<Request<B>> for TestWebauthService<S>
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
        let mut metadata = req
            .extensions()
            .get::<Metadata>()
            .cloned()
            .unwrap_or_default();
        apply_fields(&mut metadata, &self.fields);
        req.extensions_mut().insert(metadata);
        self.inner.call(req)
    }
}
