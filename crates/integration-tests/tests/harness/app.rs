//! Demo app mounting failing services behind the normalizer

use std::error::Error;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::response::{IntoResponse, Response};
use faultline::{BoxError, ErrorSink, NormalizeErrorLayer, Rejection, StatusError};
use http::{Request, StatusCode};
use tower::timeout::TimeoutLayer;
use tower::{Layer, service_fn};

/// Sink capturing redacted errors for assertions
#[derive(Clone, Default)]
pub struct RecordingSink {
    reports: Arc<Mutex<Vec<String>>>,
}

impl RecordingSink {
    /// Messages reported to the sink so far
    pub fn reports(&self) -> Vec<String> {
        self.reports.lock().unwrap().clone()
    }
}

impl ErrorSink for RecordingSink {
    fn unknown_error(&self, error: &(dyn Error + 'static)) {
        self.reports.lock().unwrap().push(error.to_string());
    }
}

/// Router with one route per failure mode, all normalized into `sink`
pub fn demo_app(sink: RecordingSink) -> Router {
    let normalize = NormalizeErrorLayer::new().with_sink(sink);

    Router::new()
        .route_service("/", normalize.layer(service_fn(bad_request)))
        .route_service("/invalid", normalize.layer(service_fn(invalid_email)))
        .route_service("/missing", normalize.layer(service_fn(missing_order)))
        .route_service("/upstream", normalize.layer(service_fn(upstream_failure)))
        .route_service("/broken", normalize.layer(service_fn(broken_backend)))
        .route_service(
            "/slow",
            normalize.layer(
                TimeoutLayer::new(Duration::from_millis(50)).layer(service_fn(slow_backend)),
            ),
        )
        .route_service("/ok", normalize.layer(service_fn(healthy)))
}

async fn bad_request(_request: Request<Body>) -> Result<Response, BoxError> {
    Err(Rejection::new(StatusCode::BAD_REQUEST, "bad")
        .with_field("message", "bad")
        .into())
}

async fn invalid_email(_request: Request<Body>) -> Result<Response, BoxError> {
    Err(Rejection::new(StatusCode::UNPROCESSABLE_ENTITY, "invalid email")
        .with_field("field", "email")
        .into())
}

async fn missing_order(_request: Request<Body>) -> Result<Response, BoxError> {
    Err(StatusError::new(StatusCode::NOT_FOUND, "no such order").into())
}

async fn upstream_failure(_request: Request<Body>) -> Result<Response, BoxError> {
    Err(
        Rejection::new(StatusCode::BAD_GATEWAY, "billing backend unreachable")
            .with_field("host", "billing.internal")
            .into(),
    )
}

async fn broken_backend(_request: Request<Body>) -> Result<Response, BoxError> {
    Err(std::io::Error::other("connection reset by backend").into())
}

async fn slow_backend(_request: Request<Body>) -> Result<Response, BoxError> {
    tokio::time::sleep(Duration::from_secs(5)).await;
    Ok("done".into_response())
}

async fn healthy(_request: Request<Body>) -> Result<Response, BoxError> {
    Ok("ok".into_response())
}
