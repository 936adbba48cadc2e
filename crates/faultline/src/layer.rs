use std::convert::Infallible;
use std::error::Error;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::{Request, StatusCode};
use tower::{Layer, Service, ServiceExt};

use crate::classify::{Classified, classify};
use crate::negotiate::{AcceptHeader, Negotiator};
use crate::sink::{ErrorSink, TracingSink};

/// Boxed error accepted from wrapped services
pub type BoxError = Box<dyn Error + Send + Sync>;

/// Response extension marking a normalized failure and carrying its cause
#[derive(Clone)]
struct CaughtError(Arc<dyn Error + Send + Sync>);

/// Returns the original error behind a normalized response, if any
///
/// Only responses produced by [`NormalizeError`] carry one. Middleware
/// layered outside the normalizer can use this to act on the raw error
/// after the client-facing representation has been decided.
pub fn failure_cause<B>(response: &http::Response<B>) -> Option<&(dyn Error + 'static)> {
    response
        .extensions()
        .get::<CaughtError>()
        .map(|caught| caught.0.as_ref() as &(dyn Error + 'static))
}

/// Layer applying [`NormalizeError`] to a service
///
/// Defaults to `Accept`-header negotiation and a `tracing` sink; both can
/// be swapped out before the layer is mounted.
#[derive(Clone)]
pub struct NormalizeErrorLayer {
    negotiator: Arc<dyn Negotiator>,
    sink: Arc<dyn ErrorSink>,
}

impl NormalizeErrorLayer {
    /// Creates a layer with the default negotiator and sink
    pub fn new() -> Self {
        Self {
            negotiator: Arc::new(AcceptHeader),
            sink: Arc::new(TracingSink),
        }
    }

    /// Replaces the content negotiator
    #[must_use]
    pub fn with_negotiator(mut self, negotiator: impl Negotiator + 'static) -> Self {
        self.negotiator = Arc::new(negotiator);
        self
    }

    /// Replaces the sink receiving redacted errors
    #[must_use]
    pub fn with_sink(mut self, sink: impl ErrorSink + 'static) -> Self {
        self.sink = Arc::new(sink);
        self
    }
}

impl Default for NormalizeErrorLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Layer<S> for NormalizeErrorLayer {
    type Service = NormalizeError<S>;

    fn layer(&self, inner: S) -> Self::Service {
        NormalizeError {
            inner,
            negotiator: Arc::clone(&self.negotiator),
            sink: Arc::clone(&self.sink),
        }
    }
}

/// Middleware converting service errors into client responses
///
/// Errors from the wrapped service are classified, client faults keep
/// their message (and payload, for JSON clients) while server faults and
/// unrecognized errors are redacted to an empty body and reported to the
/// sink. The middleware itself is infallible and produces exactly one
/// response per request.
#[derive(Clone)]
pub struct NormalizeError<S> {
    inner: S,
    negotiator: Arc<dyn Negotiator>,
    sink: Arc<dyn ErrorSink>,
}

impl<S, ReqBody> Service<Request<ReqBody>> for NormalizeError<S>
where
    S: Service<Request<ReqBody>, Response = Response> + Clone + Send + 'static,
    S::Error: Into<BoxError>,
    S::Future: Send,
    ReqBody: Send + 'static,
{
    type Response = Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Response, Infallible>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        // `call` drives a clone to readiness through `oneshot`, so readiness
        // failures are normalized along with call failures.
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request<ReqBody>) -> Self::Future {
        let wants_json = self.negotiator.accepts_json(request.headers());
        let sink = Arc::clone(&self.sink);
        let clone = self.inner.clone();
        let inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            match inner.oneshot(request).await {
                Ok(response) => Ok(response),
                Err(error) => Ok(resolve(error.into(), wants_json, sink.as_ref())),
            }
        })
    }
}

/// Renders the response for a failed request and records its cause
fn resolve(error: BoxError, wants_json: bool, sink: &dyn ErrorSink) -> Response {
    let mut response = match classify(error.as_ref()) {
        Classified::Known {
            status,
            message,
            payload,
        } if status.as_u16() < 500 => {
            if let Some(payload) = payload
                && wants_json
            {
                (status, Json(payload)).into_response()
            } else {
                (status, message).into_response()
            }
        }
        Classified::Known { status, .. } => {
            sink.unknown_error(error.as_ref());
            status.into_response()
        }
        Classified::Opaque => {
            sink.unknown_error(error.as_ref());
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    };

    response
        .extensions_mut()
        .insert(CaughtError(Arc::from(error)));
    response
}
